// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Symlink projection of an extracted mod into the game folder.
//!
//! ```text
//! mods/author/ModA/          game/
//!   BepInEx/        <------    BepInEx    (symlink)
//!   winhttp.dll     <------    winhttp.dll (symlink)
//!   doorstop.ini    <------    doorstop.ini (symlink)
//! ```
//!
//! Only top-level entries are linked. Unlinking never touches anything that
//! is not a symlink, so the game's own files are safe even when a mod ships
//! an entry with the same name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::{AumResult, LinkError};

pub struct Linker;

impl Linker {
    /// Creates one symlink in `game_dir` per top-level entry of `mod_dir`.
    ///
    /// Links that already point at the right entry are left alone. Returns the
    /// number of links created. Stops at the first failure; links created
    /// before it stay in place.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::ReadModFailed` if `mod_dir` cannot be listed and
    /// `LinkError::LinkCreationFailed` if a name is taken by something else or
    /// the platform refuses to create the link.
    pub fn link(mod_dir: &Path, game_dir: &Path) -> AumResult<usize> {
        let mut created = 0;

        for name in Self::entries(mod_dir)? {
            let source = mod_dir.join(&name);
            let target = game_dir.join(&name);

            if let Ok(existing) = fs::read_link(&target) {
                if existing == source {
                    trace!(target = %target.display(), "link already in place");
                    continue;
                }
                return Err(LinkError::LinkCreationFailed {
                    path: target,
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("link points to {}", existing.display()),
                    ),
                }
                .into());
            }
            if target.exists() {
                return Err(LinkError::LinkCreationFailed {
                    path: target,
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "a file or directory with this name already exists",
                    ),
                }
                .into());
            }

            create_symlink(&source, &target).map_err(|source| LinkError::LinkCreationFailed {
                path: target.clone(),
                source,
            })?;
            debug!(link = %target.display(), "linked");
            created += 1;
        }

        Ok(created)
    }

    /// Removes the symlinks `link` created for `mod_dir`.
    ///
    /// Missing names are skipped. A real file or directory occupying a name is
    /// left untouched. If `mod_dir` no longer exists, `game_dir` is scanned for
    /// symlinks pointing into it instead. Returns the number of links removed.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::UnlinkFailed` if an existing link cannot be removed
    /// and `LinkError::ReadModFailed` if neither directory can be listed.
    pub fn unlink(mod_dir: &Path, game_dir: &Path) -> AumResult<usize> {
        let names = if mod_dir.is_dir() {
            Self::entries(mod_dir)?
        } else {
            debug!(dir = %mod_dir.display(), "mod directory missing, scanning game folder");
            Self::links_into(mod_dir, game_dir)?
        };

        let mut removed = 0;
        for name in names {
            let target = game_dir.join(&name);
            let meta = match fs::symlink_metadata(&target) {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(LinkError::UnlinkFailed {
                        path: target,
                        source,
                    }
                    .into());
                }
            };

            if !meta.file_type().is_symlink() {
                warn!(path = %target.display(), "not a symlink, leaving it in place");
                continue;
            }

            match remove_symlink(&target) {
                Ok(()) => {
                    debug!(link = %target.display(), "unlinked");
                    removed += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(LinkError::UnlinkFailed {
                        path: target,
                        source,
                    }
                    .into());
                }
            }
        }

        Ok(removed)
    }

    /// Moves the links of `mod_dir` from one game folder to another.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Linker::unlink`] and [`Linker::link`].
    pub fn relink(mod_dir: &Path, from: &Path, to: &Path) -> AumResult<usize> {
        if from.is_dir() {
            Self::unlink(mod_dir, from)?;
        }
        Self::link(mod_dir, to)
    }

    /// Top-level entry names of an extracted mod, sorted for stable output.
    fn entries(mod_dir: &Path) -> AumResult<Vec<PathBuf>> {
        let read_failed = |source| LinkError::ReadModFailed {
            path: mod_dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(mod_dir).map_err(read_failed)? {
            names.push(PathBuf::from(entry.map_err(read_failed)?.file_name()));
        }
        names.sort();
        Ok(names)
    }

    /// Names in `game_dir` that are symlinks resolving into `mod_dir`.
    fn links_into(mod_dir: &Path, game_dir: &Path) -> AumResult<Vec<PathBuf>> {
        let read_failed = |source| LinkError::ReadModFailed {
            path: game_dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(game_dir).map_err(read_failed)? {
            let entry = entry.map_err(read_failed)?;
            if let Ok(target) = fs::read_link(entry.path())
                && target.starts_with(mod_dir)
            {
                names.push(PathBuf::from(entry.file_name()));
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(unix)]
fn create_symlink(source: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn create_symlink(source: &Path, target: &Path) -> io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}

#[cfg(unix)]
fn remove_symlink(target: &Path) -> io::Result<()> {
    fs::remove_file(target)
}

#[cfg(windows)]
fn remove_symlink(target: &Path) -> io::Result<()> {
    // Directory symlinks are directories to the Windows API.
    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => fs::remove_dir(target),
        _ => fs::remove_file(target),
    }
}
