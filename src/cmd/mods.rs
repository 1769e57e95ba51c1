// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod lifecycle commands.
//!
//! ```text
//! Config --> open_manager() --> ModManager<GithubReleases, HttpFetcher, ZipExtractor>
//!                                    |
//!            run_install_command  ---+--> install
//!            run_update_command   ---+--> update
//!            run_remove_command   ---+--> remove
//!            run_activate_command ---+--> activate
//!            run_vanilla_command  ---+--> deactivate
//!            run_reset_command    ---+--> reset
//!            run_config_command   ---+--> configure
//! ```

use std::path::Path;

use anyhow::Context;

use crate::archive::{Unpacker, ZipExtractor};
use crate::cli::mods::{InstallArgs, UpdateArgs};
use crate::config::Config;
use crate::error::Result;
use crate::library::{LibraryStore, ModPath, ModRecord};
use crate::manager::{InstallOutcome, ModManager, UpdateOutcome};
use crate::net::{Fetcher, HttpFetcher, ProgressDisplay};
use crate::source::{GithubReleases, ReleaseSource};

/// Manager wired to GitHub, HTTP downloads and zip extraction.
pub type DefaultManager = ModManager<GithubReleases, HttpFetcher, ZipExtractor>;

/// Loads the library and builds the production manager.
///
/// # Errors
///
/// Returns an error if the paths are unresolved or the library cannot be
/// loaded.
pub fn open_manager(config: &Config, progress: ProgressDisplay) -> Result<DefaultManager> {
    let paths = config.paths.app_paths()?;
    let store = LibraryStore::load(paths.clone())
        .with_context(|| format!("failed to open the mod library in {}", paths.root.display()))?;
    Ok(ModManager::new(
        store,
        GithubReleases::from_config(&config.source),
        HttpFetcher::new(progress, config.source.timeout()),
        ZipExtractor,
        config.source.archive_suffixes.clone(),
    ))
}

/// # Errors
///
/// Propagates any [`ModManager::install`] error.
pub async fn run_install_command<R, F, U>(
    manager: &mut ModManager<R, F, U>,
    args: &InstallArgs,
) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let outcome = manager.install(&args.mod_path, args.force).await?;
    println!("{}", install_message(&outcome));
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::update`] error.
pub async fn run_update_command<R, F, U>(
    manager: &mut ModManager<R, F, U>,
    args: &UpdateArgs,
) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let outcome = manager.update(&args.mod_path, args.force).await?;
    println!("{}", update_message(&outcome));
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::remove`] error.
pub async fn run_remove_command<R, F, U>(
    manager: &mut ModManager<R, F, U>,
    mod_path: &ModPath,
) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let record = manager.remove(mod_path).await?;
    println!("{} successfully removed", record.path);
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::activate`] error.
pub async fn run_activate_command<R, F, U>(
    manager: &mut ModManager<R, F, U>,
    mod_path: &ModPath,
) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let record = manager.activate(mod_path).await?;
    println!("{} successfully activated", record.path);
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::deactivate`] error.
pub async fn run_vanilla_command<R, F, U>(manager: &mut ModManager<R, F, U>) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let previous = manager.deactivate().await?;
    println!("{}", vanilla_message(previous.as_ref()));
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::reset`] error.
pub async fn run_reset_command<R, F, U>(manager: &mut ModManager<R, F, U>) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let removed = manager.reset().await?;
    println!("Removed {removed} mod(s), Among Us is now vanilla");
    Ok(())
}

/// # Errors
///
/// Propagates any [`ModManager::configure`] error.
pub async fn run_config_command<R, F, U>(manager: &mut ModManager<R, F, U>, path: &Path) -> Result<()>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    let stored = manager.configure(path).await?;
    println!("Game folder set to {}", stored.display());
    Ok(())
}

pub(crate) fn install_message(outcome: &InstallOutcome) -> String {
    match outcome {
        InstallOutcome::Installed(record) => format!(
            "{} successfully installed (release {}) and activated",
            record.path, record.id
        ),
        InstallOutcome::Activated(record) => {
            format!("{} is already installed, activated it", record.path)
        }
    }
}

pub(crate) fn update_message(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Updated { from, record } => format!(
            "{} successfully updated from release {from} to {}",
            record.path, record.id
        ),
        UpdateOutcome::UpToDate(record) => format!("{} already up to date", record.path),
    }
}

pub(crate) fn vanilla_message(previous: Option<&ModRecord>) -> String {
    match previous {
        Some(record) => format!("Deactivated {}, Among Us is now vanilla", record.path),
        None => "Among Us is now vanilla".to_string(),
    }
}
