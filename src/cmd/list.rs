// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for aum-rs.

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::library::LibraryStore;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the library cannot be loaded.
pub fn run_list_command(config: &Config) -> Result<()> {
    let paths = config.paths.app_paths()?;
    let store = LibraryStore::load(paths.clone())
        .with_context(|| format!("failed to open the mod library in {}", paths.root.display()))?;
    for line in format_library(&store) {
        println!("{line}");
    }
    Ok(())
}

/// One line for the game folder, then one per installed mod with `*` on the
/// active one.
#[must_use]
pub fn format_library(store: &LibraryStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.mods().len() + 1);
    lines.push(match store.game_folder() {
        Some(folder) => format!("game folder: {}", folder.display()),
        None => "game folder: not configured".to_string(),
    });

    if store.mods().is_empty() {
        lines.push("No mods installed".to_string());
        return lines;
    }

    for record in store.mods() {
        let marker = if store.config().is_current(&record.path) {
            '*'
        } else {
            ' '
        };
        lines.push(format!("{marker} {record}"));
    }
    lines
}
