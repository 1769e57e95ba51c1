// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted library shape and mod identities.
//!
//! ```text
//! config.json
//! {
//!   "game_folder_path": "/games/au" | null,
//!   "current_mod": { "id": 42, "path": "author/ModA" } | null,
//!   "mods": [ { "id": 42, "path": "author/ModA" }, ... ]
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LibraryError;

/// GitHub owner: alphanumerics and single hyphens. Repository: alphanumerics, `.`, `_`, `-`.
const MOD_PATH_PATTERN: &str = r"^([A-Za-z0-9](?:[A-Za-z0-9-]{0,38}))/([A-Za-z0-9._-]{1,100})$";

fn mod_path_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MOD_PATH_PATTERN).ok()).as_ref()
}

/// One installed mod: release id plus `owner/repository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    pub id: u64,
    pub path: String,
}

impl ModRecord {
    #[must_use]
    pub fn new(id: u64, path: &ModPath) -> Self {
        Self {
            id,
            path: path.to_string(),
        }
    }

    /// Same mod, any release.
    #[must_use]
    pub fn same_mod(&self, other: &Self) -> bool {
        self.path == other.path
    }

    /// Parses the stored path back into its components.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidModPath` if the stored path was edited
    /// into something that is not `owner/repository`.
    pub fn mod_path(&self) -> Result<ModPath, LibraryError> {
        self.path.parse()
    }
}

impl fmt::Display for ModRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.id)
    }
}

/// Validated `owner/repository` identity of a mod.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModPath {
    owner: String,
    repo: String,
}

impl ModPath {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Extraction directory below the mods root: `mods/<owner>/<repo>`.
    #[must_use]
    pub fn dir_in(&self, mods_root: &Path) -> PathBuf {
        mods_root.join(&self.owner).join(&self.repo)
    }
}

impl FromStr for ModPath {
    type Err = LibraryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || LibraryError::InvalidModPath {
            input: input.to_string(),
        };

        let captures = mod_path_regex()
            .and_then(|re| re.captures(input))
            .ok_or_else(invalid)?;
        let owner = captures.get(1).ok_or_else(invalid)?.as_str();
        let repo = captures.get(2).ok_or_else(invalid)?.as_str();

        if owner.ends_with('-') || owner.contains("--") || repo == "." || repo == ".." {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for ModPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The persisted aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub game_folder_path: Option<PathBuf>,
    #[serde(default)]
    pub current_mod: Option<ModRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mods: Vec<ModRecord>,
}

impl LibraryConfig {
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&ModRecord> {
        self.mods.iter().find(|m| m.path == path)
    }

    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&ModRecord> {
        self.mods.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.current_mod.as_ref().is_some_and(|m| m.path == path)
    }
}

/// Older files were written with `"mods": null` for an empty library.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ModRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ModRecord>>::deserialize(deserializer)?.unwrap_or_default())
}
