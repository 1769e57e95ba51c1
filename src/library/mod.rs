// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Durable mod library.
//!
//! ```text
//! LibraryStore::load(AppPaths)
//!        |
//!        v
//!   LibraryConfig  <-- every mutation --> save() (temp file + rename)
//!        |
//!        +-- set_current / deactivate_current --> Linker (game folder)
//!        +-- remove_mod / evict_files         --> mods/<owner>/<repo>
//! ```
//!
//! The store is the only owner of [`LibraryConfig`]. Every mutating call is
//! written through before it returns.

pub mod record;


use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::paths::AppPaths;
use crate::error::{AumResult, LibraryError};
use crate::linker::Linker;

pub use record::{LibraryConfig, ModPath, ModRecord};

/// Owns the persisted library and all mutations of it.
#[derive(Debug)]
pub struct LibraryStore {
    paths: AppPaths,
    config: LibraryConfig,
}

impl LibraryStore {
    /// Loads the library, creating the directory layout and an empty library
    /// file on first run.
    ///
    /// An existing file is never rewritten by loading.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::StorageCorrupt` if the file cannot be parsed,
    /// `LibraryError::StorageReadFailed` if it cannot be read, and an I/O
    /// error if the directories cannot be created.
    pub fn load(paths: AppPaths) -> AumResult<Self> {
        paths.create_dirs()?;

        let config = match std::fs::read(&paths.library) {
            Ok(bytes) => serde_json::from_slice::<LibraryConfig>(&bytes).map_err(|e| {
                LibraryError::StorageCorrupt {
                    path: paths.library.clone(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %paths.library.display(), "creating empty library");
                let store = Self {
                    paths,
                    config: LibraryConfig::default(),
                };
                store.save()?;
                return Ok(store);
            }
            Err(source) => {
                return Err(LibraryError::StorageReadFailed {
                    path: paths.library.clone(),
                    source,
                }
                .into());
            }
        };

        debug!(
            path = %paths.library.display(),
            mods = config.mods.len(),
            current = config.current_mod.as_ref().map(|m| m.path.as_str()),
            "library loaded"
        );
        Ok(Self { paths, config })
    }

    /// Writes the library through a temporary file in the same directory, so
    /// a reader sees either the old or the new content.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::StorageWriteFailed` on any I/O failure.
    pub fn save(&self) -> AumResult<()> {
        let path = &self.paths.library;
        let write_failed = |source| LibraryError::StorageWriteFailed {
            path: path.clone(),
            source,
        };

        let json = serde_json::to_vec_pretty(&self.config)
            .map_err(|e| write_failed(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
        io::Write::write_all(&mut tmp, &json).map_err(write_failed)?;
        tmp.as_file().sync_all().map_err(write_failed)?;
        tmp.persist(path).map_err(|e| write_failed(e.error))?;

        debug!(path = %path.display(), "library saved");
        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &LibraryConfig {
        &self.config
    }

    #[must_use]
    pub const fn paths(&self) -> &AppPaths {
        &self.paths
    }

    #[must_use]
    pub fn mods(&self) -> &[ModRecord] {
        &self.config.mods
    }

    #[must_use]
    pub const fn current(&self) -> Option<&ModRecord> {
        self.config.current_mod.as_ref()
    }

    #[must_use]
    pub fn game_folder(&self) -> Option<&Path> {
        self.config.game_folder_path.as_deref()
    }

    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&ModRecord> {
        self.config.find_by_path(path)
    }

    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&ModRecord> {
        self.config.find_by_id(id)
    }

    /// The configured game folder, checked to still be a directory.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::GameFolderNotConfigured` or
    /// `LibraryError::GameFolderInvalid`.
    pub fn require_game_folder(&self) -> AumResult<&Path> {
        let folder = self
            .game_folder()
            .ok_or(LibraryError::GameFolderNotConfigured)?;
        if !folder.is_dir() {
            return Err(LibraryError::GameFolderInvalid {
                path: folder.to_path_buf(),
            }
            .into());
        }
        Ok(folder)
    }

    /// Extraction directory of an installed mod.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidModPath` if the record's path is malformed.
    pub fn mod_dir(&self, record: &ModRecord) -> AumResult<PathBuf> {
        Ok(record.mod_path()?.dir_in(&self.paths.mods))
    }

    /// Stores the game folder. The caller validates the directory.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::StorageWriteFailed` if the library cannot be saved.
    pub fn set_game_folder_path(&mut self, path: PathBuf) -> AumResult<()> {
        info!(path = %path.display(), "game folder set");
        self.config.game_folder_path = Some(path);
        self.save()
    }

    /// Appends `record` unless a mod with the same path is already present.
    /// Returns whether it was added.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::StorageWriteFailed` if the library cannot be saved.
    pub fn add_mod(&mut self, record: ModRecord) -> AumResult<bool> {
        if self.config.find_by_path(&record.path).is_some() {
            debug!(path = %record.path, "already in library");
            return Ok(false);
        }
        debug!(path = %record.path, id = record.id, "adding to library");
        self.config.mods.push(record);
        self.save()?;
        Ok(true)
    }

    /// Replaces the release id of `path` in place.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ModNotInstalled` if `path` is unknown, or
    /// `LibraryError::StorageWriteFailed` if the library cannot be saved.
    pub fn update_mod_id(&mut self, path: &str, id: u64) -> AumResult<()> {
        let record = self
            .config
            .mods
            .iter_mut()
            .find(|m| m.path == path)
            .ok_or_else(|| LibraryError::ModNotInstalled {
                path: path.to_string(),
            })?;
        debug!(path, old = record.id, new = id, "updating release id");
        record.id = id;

        if let Some(current) = self.config.current_mod.as_mut()
            && current.path == path
        {
            current.id = id;
        }
        self.save()
    }

    /// Links `record` into the game folder and marks it current.
    ///
    /// The caller deactivates any previous mod first. If linking fails the
    /// partial state is logged and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns game folder precondition errors, link errors, or
    /// `LibraryError::StorageWriteFailed`.
    pub fn set_current(&mut self, record: &ModRecord) -> AumResult<()> {
        let game = self.require_game_folder()?.to_path_buf();
        let mod_dir = self.mod_dir(record)?;

        if let Err(e) = Linker::link(&mod_dir, &game) {
            error!(
                path = %record.path,
                game = %game.display(),
                error = %e,
                "linking stopped part-way, some links may remain in the game folder"
            );
            return Err(e);
        }

        self.config.current_mod = Some(record.clone());
        self.save()
    }

    /// Unlinks the current mod, if any, and clears it. Returns the mod that
    /// was active.
    ///
    /// # Errors
    ///
    /// Returns game folder precondition errors, unlink errors, or
    /// `LibraryError::StorageWriteFailed`.
    pub fn deactivate_current(&mut self) -> AumResult<Option<ModRecord>> {
        let Some(current) = self.config.current_mod.clone() else {
            return Ok(None);
        };
        let game = self.require_game_folder()?.to_path_buf();
        let mod_dir = self.mod_dir(&current)?;

        let removed = Linker::unlink(&mod_dir, &game)?;
        debug!(path = %current.path, removed, "deactivated");

        self.config.current_mod = None;
        self.save()?;
        Ok(Some(current))
    }

    /// Deactivates `record` if it is current, then deletes its extracted
    /// files. The library entry is kept.
    ///
    /// # Errors
    ///
    /// Returns deactivation errors or an I/O error from deleting the files.
    pub fn evict_files(&mut self, record: &ModRecord) -> AumResult<()> {
        if self.config.is_current(&record.path) {
            self.deactivate_current()?;
        }

        let dir = self.mod_dir(record)?;
        match std::fs::remove_dir_all(&dir) {
            Ok(()) => debug!(dir = %dir.display(), "deleted mod files"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if let Some(owner_dir) = dir.parent()
            && owner_dir != self.paths.mods
        {
            remove_dir_if_empty(owner_dir);
        }
        Ok(())
    }

    /// Deactivates `record` if current, deletes its files and drops it from
    /// the library, keeping the order of the remaining entries.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ModNotInstalled` if `record` is not in the
    /// library, or any error from [`LibraryStore::evict_files`] and saving.
    pub fn remove_mod(&mut self, record: &ModRecord) -> AumResult<()> {
        if self.config.find_by_path(&record.path).is_none() {
            return Err(LibraryError::ModNotInstalled {
                path: record.path.clone(),
            }
            .into());
        }

        self.evict_files(record)?;
        self.config.mods.retain(|m| !m.same_mod(record));
        info!(path = %record.path, "removed from library");
        self.save()
    }

    /// Removes every installed mod in insertion order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing removal; mods removed before it stay removed.
    pub fn reset(&mut self) -> AumResult<usize> {
        let snapshot = self.config.mods.clone();
        for record in &snapshot {
            self.remove_mod(record)?;
        }
        if self.config.current_mod.take().is_some() {
            warn!("current mod was not in the library, cleared");
            self.save()?;
        }
        Ok(snapshot.len())
    }
}

fn remove_dir_if_empty(dir: &Path) {
    let is_empty = std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none());
    if is_empty && std::fs::remove_dir(dir).is_ok() {
        debug!(dir = %dir.display(), "removed empty directory");
    }
}
