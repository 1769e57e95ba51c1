// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archive extraction.
//!
//! ```text
//! downloads/ModA.zip --ZipExtractor--> mods/author/ModA/...
//! ```
//!
//! Any unreadable or unsafe entry fails the whole extraction. Stored file
//! modes are applied to files only; directories keep the default mode.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{ArchiveError, AumResult};

/// Expands a downloaded package into a directory.
pub trait Unpacker: Send + Sync {
    /// Extracts `archive` into `dest`, creating it if needed. Returns the
    /// number of files written.
    ///
    /// # Errors
    ///
    /// Returns an `ArchiveError` if the archive or any entry is unusable.
    fn unpack(&self, archive: &Path, dest: &Path) -> AumResult<usize>;
}

/// [`Unpacker`] for `.zip` packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl Unpacker for ZipExtractor {
    fn unpack(&self, archive: &Path, dest: &Path) -> AumResult<usize> {
        let io_err = |path: &Path, source: io::Error| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(archive).map_err(|e| io_err(archive, e))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| ArchiveError::Open {
            path: archive.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;

        let mut written = 0;
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| ArchiveError::CorruptEntry {
                path: archive.to_path_buf(),
                index,
                message: e.to_string(),
            })?;

            let Some(relative) = entry.enclosed_name() else {
                return Err(ArchiveError::UnsafeEntry {
                    path: archive.to_path_buf(),
                    name: entry.name().to_string(),
                }
                .into());
            };
            let out = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out).map_err(|e| io_err(&out, e))?;
            } else {
                if let Some(parent) = out.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
                }
                let mut outfile = File::create(&out).map_err(|e| io_err(&out, e))?;
                io::copy(&mut entry, &mut outfile).map_err(|e| ArchiveError::CorruptEntry {
                    path: archive.to_path_buf(),
                    index,
                    message: e.to_string(),
                })?;
                #[cfg(unix)]
                if let Some(mode) = entry.unix_mode() {
                    use std::os::unix::fs::PermissionsExt;
                    if let Err(e) = fs::set_permissions(&out, fs::Permissions::from_mode(mode)) {
                        warn!(file = %out.display(), error = %e, "failed to apply file mode");
                    }
                }
                trace!(file = %out.display(), "extracted");
                written += 1;
            }
        }

        debug!(
            archive = %archive.display(),
            dest = %dest.display(),
            files = written,
            "extracted archive"
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests;
