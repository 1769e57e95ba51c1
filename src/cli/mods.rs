// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the mod commands.

use clap::Args;
use std::path::PathBuf;

use crate::library::ModPath;

/// Value parser for `owner/repository`.
///
/// # Errors
///
/// Returns the `InvalidModPath` message when `value` is malformed.
pub fn parse_mod_path(value: &str) -> Result<ModPath, String> {
    value.parse().map_err(|e: crate::error::LibraryError| e.to_string())
}

/// A single mod.
#[derive(Debug, Clone, Args)]
pub struct ModArgs {
    /// GitHub repository of the mod.
    #[arg(value_name = "OWNER/REPOSITORY", value_parser = parse_mod_path)]
    pub mod_path: ModPath,
}

/// Arguments for `install`.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// GitHub repository of the mod.
    #[arg(value_name = "OWNER/REPOSITORY", value_parser = parse_mod_path)]
    pub mod_path: ModPath,

    /// Downloads the latest release even if the mod is installed.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `update`.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// GitHub repository of the mod.
    #[arg(value_name = "OWNER/REPOSITORY", value_parser = parse_mod_path)]
    pub mod_path: ModPath,

    /// Reinstalls even if the latest release is already installed.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `config`.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Among Us installation folder.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}
