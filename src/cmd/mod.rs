// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   mods   (install, update, remove, activate, vanilla, reset, config)
//!   list   (library listing)
//!   config (options, files)
//! ```

pub mod config;
pub mod list;
pub mod mods;

#[cfg(test)]
mod tests;
