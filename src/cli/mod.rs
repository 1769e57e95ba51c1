// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for aum-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! aum [global options] <command>
//! install|i|get <owner/repo> [--force]
//! update|u <owner/repo> [--force]
//! remove|r|uninstall|delete <owner/repo>
//! activate|use <owner/repo>
//! <owner/repo>                   (same as activate)
//! vanilla|clear|prune
//! reset
//! config|c <path>
//! list|ls
//! options | files | version
//! ```

pub mod global;
pub mod mods;


use crate::cli::global::GlobalOptions;
use crate::cli::mods::{ConfigArgs, InstallArgs, ModArgs, UpdateArgs};
use crate::library::ModPath;
use clap::{Parser, Subcommand};

/// Among Us Mod Manager
///
/// Installs Among Us mods from their GitHub releases and switches between them.
#[derive(Debug, Parser)]
#[command(
    name = "aum",
    author,
    version,
    about = "Among Us Mod Manager",
    long_about = "aum-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Installs Among Us mods from their GitHub releases and links\n\
                  exactly one of them into the game folder.\n\n\
                  Start with `aum config <path to Among Us>`, then\n\
                  `aum install <owner>/<repository>`. `aum <owner>/<repository>`\n\
                  switches to an installed mod, `aum vanilla` restores the game.",
    after_help = "SETTINGS:\n\n\
                  aum keeps its library in config.json inside the application\n\
                  directory (the per-user config directory followed by `aum`,\n\
                  or --root). An optional aum.toml in the same directory changes\n\
                  logging, paths and the release source; more files can be given\n\
                  with --config. AUM_SECTION__KEY environment variables and\n\
                  --set section/key=value override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all settings and their values.
    Options,

    /// Lists the settings files that were loaded.
    Files,

    /// Downloads the latest release of a mod and activates it.
    #[command(visible_aliases = ["i", "get"])]
    Install(InstallArgs),

    /// Replaces an installed mod with its latest release.
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Deletes an installed mod.
    #[command(visible_aliases = ["r", "uninstall", "delete"])]
    Remove(ModArgs),

    /// Switches the game to an installed mod.
    #[command(visible_alias = "use")]
    Activate(ModArgs),

    /// Deactivates the current mod.
    #[command(visible_aliases = ["clear", "prune"])]
    Vanilla,

    /// Removes every installed mod.
    Reset,

    /// Sets the Among Us game folder.
    #[command(visible_alias = "c")]
    Config(ConfigArgs),

    /// Lists installed mods.
    #[command(visible_alias = "ls")]
    List,

    /// `aum <owner>/<repository>` activates that mod.
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Command {
    /// Resolves the bare `aum <owner>/<repository>` form.
    ///
    /// # Errors
    ///
    /// Returns a message if the arguments are not a single valid mod path.
    pub fn external_mod_path(args: &[String]) -> Result<ModPath, String> {
        match args {
            [first, ..] if !first.contains('/') => Err(format!("unexpected command '{first}'")),
            [single] => mods::parse_mod_path(single),
            [first, ..] => Err(format!("unexpected arguments after '{first}'")),
            [] => Err("no command specified".to_string()),
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
