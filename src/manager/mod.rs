// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod lifecycle.
//!
//! ```text
//!               install
//! NotInstalled ---------> Active <----+ activate (deactivates the old one)
//!      ^                   |   ^      |
//!      | remove/reset      |   | update (new release, re-activated)
//!      |                   v   |
//!      +------------- Installed ------+
//!          remove        ^  |
//!                        |  | vanilla
//!                        +--+
//! ```
//!
//! At most one mod is active. Identity is always the `owner/repository`
//! path, never the release id.


use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::archive::Unpacker;
use crate::error::{AumResult, LibraryError, ReleaseError};
use crate::library::{LibraryStore, ModPath, ModRecord};
use crate::linker::Linker;
use crate::net::Fetcher;
use crate::source::{Asset, Release, ReleaseSource};

/// Result of [`ModManager::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Downloaded, extracted and activated.
    Installed(ModRecord),
    /// Already in the library; only activated.
    Activated(ModRecord),
}

impl InstallOutcome {
    #[must_use]
    pub const fn record(&self) -> &ModRecord {
        match self {
            Self::Installed(record) | Self::Activated(record) => record,
        }
    }
}

/// Result of [`ModManager::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Replaced release `from` with the one in the record, now active.
    Updated { from: u64, record: ModRecord },
    /// The latest release is the installed one. Nothing changed.
    UpToDate(ModRecord),
}

/// Orchestrates the library store, the linker and the external collaborators.
pub struct ModManager<R, F, U> {
    store: LibraryStore,
    source: R,
    fetcher: F,
    unpacker: U,
    archive_suffixes: Vec<String>,
}

impl<R, F, U> ModManager<R, F, U>
where
    R: ReleaseSource,
    F: Fetcher,
    U: Unpacker,
{
    pub fn new(
        store: LibraryStore,
        source: R,
        fetcher: F,
        unpacker: U,
        archive_suffixes: Vec<String>,
    ) -> Self {
        Self {
            store,
            source,
            fetcher,
            unpacker,
            archive_suffixes,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Installs the latest release of `mod_path` and activates it.
    ///
    /// An installed mod is only activated unless `force` is set, in which
    /// case it is reinstalled from the latest release.
    ///
    /// # Errors
    ///
    /// Returns game folder precondition errors, `ReleaseError` when the
    /// source has nothing to install, and network, archive, link or storage
    /// errors.
    pub async fn install(&mut self, mod_path: &ModPath, force: bool) -> AumResult<InstallOutcome> {
        self.store.require_game_folder()?;
        let key = mod_path.to_string();

        if self.store.find_by_path(&key).is_some() {
            if !force {
                info!(mod_path = %mod_path, "already installed, activating");
                return self.activate(mod_path).await.map(InstallOutcome::Activated);
            }
            return match self.update(mod_path, true).await? {
                UpdateOutcome::Updated { record, .. } | UpdateOutcome::UpToDate(record) => {
                    Ok(InstallOutcome::Installed(record))
                }
            };
        }

        let release = self.latest_release(mod_path).await?;
        let asset = self.package_asset(mod_path, &release)?;
        let archive = self.stage(asset).await?;

        let dest = mod_path.dir_in(&self.store.paths().mods);
        self.unpack_staged(&archive, &dest)?;

        let record = ModRecord::new(release.id, mod_path);
        self.store.add_mod(record.clone())?;
        info!(mod_path = %mod_path, id = release.id, "installed");

        self.activate(mod_path).await?;
        Ok(InstallOutcome::Installed(record))
    }

    /// Deactivates the current mod and links `mod_path` in its place.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ModNotInstalled` before touching anything if the
    /// mod is not in the library, and game folder, link or storage errors.
    pub async fn activate(&mut self, mod_path: &ModPath) -> AumResult<ModRecord> {
        self.store.require_game_folder()?;
        let record = self.installed(mod_path)?;

        if let Some(previous) = self.store.deactivate_current()? {
            debug!(previous = %previous.path, "deactivated previous mod");
        }
        self.store.set_current(&record)?;
        info!(mod_path = %mod_path, "activated");
        Ok(record)
    }

    /// Unlinks the active mod, if any. Returns it.
    ///
    /// # Errors
    ///
    /// Returns game folder, unlink or storage errors.
    pub async fn deactivate(&mut self) -> AumResult<Option<ModRecord>> {
        self.store.require_game_folder()?;
        let previous = self.store.deactivate_current()?;
        match &previous {
            Some(record) => info!(mod_path = %record.path, "deactivated"),
            None => debug!("no active mod"),
        }
        Ok(previous)
    }

    /// Replaces an installed mod with its latest release and activates it.
    ///
    /// The new package is downloaded before the installed copy is touched.
    /// With an unchanged release id nothing is modified unless `force` is set.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ModNotInstalled`, `ReleaseError`, and network,
    /// archive, link or storage errors.
    pub async fn update(&mut self, mod_path: &ModPath, force: bool) -> AumResult<UpdateOutcome> {
        self.store.require_game_folder()?;
        let record = self.installed(mod_path)?;

        let release = self.latest_release(mod_path).await?;
        if release.id == record.id && !force {
            info!(mod_path = %mod_path, id = record.id, "already up to date");
            return Ok(UpdateOutcome::UpToDate(record));
        }

        let asset = self.package_asset(mod_path, &release)?;
        let archive = self.stage(asset).await?;

        if let Err(e) = self.store.evict_files(&record) {
            discard_archive(&archive);
            return Err(e);
        }
        let dest = mod_path.dir_in(&self.store.paths().mods);
        self.unpack_staged(&archive, &dest)?;

        self.store.update_mod_id(&record.path, release.id)?;
        info!(mod_path = %mod_path, from = record.id, to = release.id, "updated");

        let from = record.id;
        let record = self.activate(mod_path).await?;
        Ok(UpdateOutcome::Updated { from, record })
    }

    /// Deactivates (if active), deletes and forgets an installed mod.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ModNotInstalled`, and game folder, unlink,
    /// I/O or storage errors.
    pub async fn remove(&mut self, mod_path: &ModPath) -> AumResult<ModRecord> {
        self.store.require_game_folder()?;
        let record = self.installed(mod_path)?;
        self.store.remove_mod(&record)?;
        info!(mod_path = %mod_path, "removed");
        Ok(record)
    }

    /// Removes every installed mod. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing removal.
    pub async fn reset(&mut self) -> AumResult<usize> {
        self.store.require_game_folder()?;
        let removed = self.store.reset()?;
        info!(removed, "library reset");
        Ok(removed)
    }

    /// Sets the game folder, moving the active mod's links along.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::GameFolderInvalid` if `folder` is not an
    /// existing directory, and link or storage errors.
    pub async fn configure(&mut self, folder: &Path) -> AumResult<PathBuf> {
        if !folder.is_dir() {
            return Err(LibraryError::GameFolderInvalid {
                path: folder.to_path_buf(),
            }
            .into());
        }
        let folder = std::path::absolute(folder)?;

        if let Some(current) = self.store.current().cloned() {
            let mod_dir = self.store.mod_dir(&current)?;
            match self.store.game_folder().map(Path::to_path_buf) {
                Some(old) if old == folder => {}
                Some(old) if old.is_dir() => {
                    Linker::relink(&mod_dir, &old, &folder)?;
                    info!(mod_path = %current.path, "moved links to the new game folder");
                }
                _ => {
                    Linker::link(&mod_dir, &folder)?;
                }
            }
        }

        self.store.set_game_folder_path(folder.clone())?;
        Ok(folder)
    }

    fn installed(&self, mod_path: &ModPath) -> AumResult<ModRecord> {
        let key = mod_path.to_string();
        self.store.find_by_path(&key).cloned().ok_or_else(|| {
            LibraryError::ModNotInstalled { path: key }.into()
        })
    }

    async fn latest_release(&self, mod_path: &ModPath) -> AumResult<Release> {
        self.source
            .latest_release(mod_path)
            .await?
            .ok_or_else(|| {
                ReleaseError::ModNotFound {
                    path: mod_path.to_string(),
                }
                .into()
            })
    }

    fn package_asset<'r>(&self, mod_path: &ModPath, release: &'r Release) -> AumResult<&'r Asset> {
        release
            .package_asset(self.archive_suffixes.as_slice())
            .ok_or_else(|| {
                ReleaseError::NoDownloadableAsset {
                    path: mod_path.to_string(),
                }
                .into()
            })
    }

    /// Downloads `asset` into the staging directory.
    async fn stage(&self, asset: &Asset) -> AumResult<PathBuf> {
        info!(asset = %asset.name, "downloading");
        self.fetcher
            .fetch(&asset.download_url, &self.store.paths().downloads)
            .await
    }

    /// Extracts a staged archive, then removes it from staging.
    fn unpack_staged(&self, archive: &Path, dest: &Path) -> AumResult<()> {
        let result = self.unpacker.unpack(archive, dest);
        discard_archive(archive);
        match result {
            Ok(files) => {
                debug!(dest = %dest.display(), files, "unpacked");
                Ok(())
            }
            Err(e) => {
                error!(dest = %dest.display(), error = %e, "extraction failed, files may be incomplete");
                Err(e)
            }
        }
    }
}

fn discard_archive(archive: &Path) {
    if let Err(e) = std::fs::remove_file(archive) {
        warn!(archive = %archive.display(), error = %e, "could not delete downloaded archive");
    }
}
