// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for aum-rs.
//!
//! This is the tool's own settings (logging, directories, release source).
//! The mod library itself lives in `config.json` and is handled by
//! [`crate::library`].
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. aum.toml in the application root
//! 3. --config
//! 4. AUM_* env vars
//! 5. CLI overrides (--root, --token, -s)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! AUM_PATHS__ROOT=/path               → paths.root = "/path"
//! AUM_SOURCE__TOKEN=ghp_...           → source.token = "ghp_..."
//! AUM_SOURCE__ARCHIVE_SUFFIXES=.zip   → source.archive_suffixes = [".zip"]
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, SourceConfig};

/// File name of the optional settings file inside the application root.
pub const SETTINGS_FILE_NAME: &str = "aum.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "AUM";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Application directories.
    pub paths: PathsConfig,
    /// Release source.
    pub source: SourceConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aum_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("aum.toml")
    ///     .with_env_prefix("AUM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no application root can be determined, or if the
    /// release source settings are unusable.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;

        if self.source.api_url.trim().is_empty() {
            return Err(crate::error::ConfigError::InvalidValue {
                section: "source".to_string(),
                key: "api_url".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.source.archive_suffixes.iter().all(|s| s.trim().is_empty()) {
            return Err(crate::error::ConfigError::InvalidValue {
                section: "source".to_string(),
                key: "archive_suffixes".to_string(),
                message: "at least one suffix is required".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields are shown as `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_source_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        options.insert("paths.root".into(), fmt(&self.paths.root));
        options.insert("paths.downloads".into(), fmt(&self.paths.downloads));
        options.insert("paths.mods".into(), fmt(&self.paths.mods));
        options.insert("paths.library".into(), fmt(&self.paths.library));
    }

    fn format_source_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("source.api_url".into(), self.source.api_url.clone());
        if self.source.token.as_deref().is_some_and(|t| !t.is_empty()) {
            options.insert("source.token".into(), "[hidden]".into());
        }
        options.insert(
            "source.timeout_secs".into(),
            self.source.timeout_secs.to_string(),
        );
        options.insert(
            "source.archive_suffixes".into(),
            self.source.archive_suffixes.join(","),
        );
    }
}
