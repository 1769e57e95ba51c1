// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/              (<user config dir>/aum)
//!   config.json      persisted library
//!   downloads/       staging, emptied after each extraction
//!   mods/
//!     owner/
//!       repository/  extracted top-level files of one mod
//! ```
//!
//! All paths are optional and resolved from `root` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

const APP_DIR_NAME: &str = "aum";

/// Application directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Application root (default: `<user config dir>/aum`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Download staging directory (default: root/downloads).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<PathBuf>,
    /// Extracted mods directory (default: root/mods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<PathBuf>,
    /// Persisted library file (default: root/config.json).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<PathBuf>,
}

impl PathsConfig {
    /// Fill in `root` from the platform config directory when unset, then
    /// resolve every other path against it.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `root` is unset and the platform
    /// has no per-user config directory.
    pub fn resolve(&mut self) -> Result<()> {
        if self.root.is_none() {
            self.root = default_root();
        }
        let root = std::path::absolute(self.root()?)?;
        self.root = Some(root.clone());

        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(root.join(p.clone()));
            }
            None => {
                *path = Some(root.join(default));
            }
            _ => {}
        };

        resolve(&mut self.downloads, "downloads");
        resolve(&mut self.mods, "mods");
        resolve(&mut self.library, "config.json");

        Ok(())
    }

    /// Get the root path, returning an error if not set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the `root` path is not set.
    pub fn root(&self) -> Result<&Path> {
        self.root.as_deref().ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "root".to_string(),
            }
            .into()
        })
    }

    /// Returns the resolved layout.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` for the first path that has not
    /// been resolved yet.
    pub fn app_paths(&self) -> Result<AppPaths> {
        let required = |path: &Option<PathBuf>, key: &str| {
            path.clone().ok_or_else(|| ConfigError::MissingKey {
                section: "paths".to_string(),
                key: key.to_string(),
            })
        };

        Ok(AppPaths {
            root: self.root()?.to_path_buf(),
            downloads: required(&self.downloads, "downloads")?,
            mods: required(&self.mods, "mods")?,
            library: required(&self.library, "library")?,
        })
    }
}

/// Per-user application directory, `<config dir>/aum`.
#[must_use]
pub fn default_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Fully resolved application directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub downloads: PathBuf,
    pub mods: PathBuf,
    pub library: PathBuf,
}

impl AppPaths {
    /// Default layout below `root`.
    #[must_use]
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            downloads: root.join("downloads"),
            mods: root.join("mods"),
            library: root.join("config.json"),
            root,
        }
    }

    /// Creates the root, staging and mods directories.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a directory cannot be created.
    pub fn create_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.root, &self.downloads, &self.mods] {
            std::fs::create_dir_all(dir)?;
        }
        if let Some(parent) = self.library.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
