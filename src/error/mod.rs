// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 AumError (16 bytes)
//!                        |
//!   +--------+-------+---+----+--------+-------+----+
//!   |        |       |        |        |       |    |
//!   v        v       v        v        v       v    v
//! Library  Link   Release  Network  Archive Config Io
//!   Box     Box     Box      Box      Box     Box  Box
//!
//! Sub-errors (unboxed internally):
//!   Library  StorageCorrupt, StorageWriteFailed, GameFolderNotConfigured,
//!            ModNotInstalled, InvalidModPath
//!   Link     LinkCreationFailed, UnlinkFailed
//!   Release  ModNotFound, NoDownloadableAsset
//!   Network  Reqwest, HttpError, DownloadFailed
//!   Archive  Open, CorruptEntry, UnsafeEntry
//!   Config   ParseError, MissingKey, InvalidValue
//!
//! Severity:  UserInput | Precondition | ExternalSource  -> reported, exit 2
//!            Io                                         -> fatal,    exit 1
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AumError`].
pub type AumResult<T> = std::result::Result<T, AumError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at 16 bytes on the stack.
#[derive(Debug, Error)]
pub enum AumError {
    /// Library state or precondition error.
    #[error("{0}")]
    Library(#[from] Box<LibraryError>),

    /// Symlink projection into the game folder failed.
    #[error("link error: {0}")]
    Link(#[from] Box<LinkError>),

    /// Release source could not provide an installable package.
    #[error("{0}")]
    Release(#[from] Box<ReleaseError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Archive extraction failed.
    #[error("archive error: {0}")]
    Archive(#[from] Box<ArchiveError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// How an error should be reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Malformed arguments; nothing was touched.
    UserInput,
    /// The library is not in a state that allows the operation.
    Precondition,
    /// The release source had nothing usable.
    ExternalSource,
    /// Storage, link or archive failure; the filesystem may be half-mutated.
    Io,
}

impl AumError {
    /// Classifies this error for reporting.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Library(err) => err.severity(),
            Self::Release(_) => Severity::ExternalSource,
            Self::Config(_) => Severity::UserInput,
            Self::Link(_) | Self::Network(_) | Self::Archive(_) | Self::Io(_) => {
                Severity::Io
            }
        }
    }

    /// Returns true if the process should abort rather than report and exit.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Io
    }
}

/// Process exit code for an error that reached `main`.
///
/// Settings that fail to parse count as user input. Anything that is not an
/// [`AumError`] is treated as fatal.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(aum) = err.downcast_ref::<AumError>() {
        return if aum.is_fatal() { 1 } else { 2 };
    }
    if err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<config::ConfigError>().is_some()
    {
        return 2;
    }
    1
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AumError {
                fn from(err: $error) -> Self {
                    AumError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    LibraryError => Library,
    LinkError => Link,
    ReleaseError => Release,
    NetworkError => Network,
    ArchiveError => Archive,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Library Errors ---

/// Library store and lifecycle precondition errors.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The persisted library exists but cannot be parsed.
    #[error("library file '{path}' is corrupt: {message}")]
    StorageCorrupt { path: PathBuf, message: String },

    /// The persisted library could not be read.
    #[error("failed to read library file '{path}': {source}")]
    StorageReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The library could not be written back to disk.
    #[error("failed to write library file '{path}': {source}")]
    StorageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No game folder has been configured yet.
    #[error("game folder is not configured, run `aum config <path>` first")]
    GameFolderNotConfigured,

    /// The configured (or requested) game folder is not a directory.
    #[error("game folder '{path}' is not an existing directory")]
    GameFolderInvalid { path: PathBuf },

    /// The mod is not in the library.
    #[error("mod {path} is not installed")]
    ModNotInstalled { path: String },

    /// The argument is not of the form `owner/repository`.
    #[error("'{input}' is not a valid owner/repository")]
    InvalidModPath { input: String },
}

impl LibraryError {
    const fn severity(&self) -> Severity {
        match self {
            Self::StorageCorrupt { .. }
            | Self::StorageReadFailed { .. }
            | Self::StorageWriteFailed { .. } => Severity::Io,
            Self::GameFolderNotConfigured
            | Self::GameFolderInvalid { .. }
            | Self::ModNotInstalled { .. } => Severity::Precondition,
            Self::InvalidModPath { .. } => Severity::UserInput,
        }
    }
}

// --- Link Errors ---

/// Errors raised while projecting a mod into the game folder.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A symlink could not be created (name taken, missing privilege, ...).
    #[error("failed to create link '{path}': {source}")]
    LinkCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing link could not be removed.
    #[error("failed to remove link '{path}': {source}")]
    UnlinkFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extracted mod directory could not be listed.
    #[error("failed to read mod directory '{path}': {source}")]
    ReadModFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Release Errors ---

/// Release source errors that are reported rather than fatal.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// No release exists for the repository.
    #[error("unable to find mod {path}")]
    ModNotFound { path: String },

    /// The latest release has no archive asset.
    #[error("latest release of {path} has no downloadable archive")]
    NoDownloadableAsset { path: String },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// I/O error during download.
    #[error("io error during download: {0}")]
    Io(#[from] std::io::Error),
}

// --- Archive Errors ---

/// Archive extraction errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive could not be opened or its central directory is unreadable.
    #[error("failed to open archive '{path}': {message}")]
    Open { path: PathBuf, message: String },

    /// An entry could not be decoded.
    #[error("corrupt entry #{index} in '{path}': {message}")]
    CorruptEntry {
        path: PathBuf,
        index: usize,
        message: String,
    },

    /// An entry would be written outside the destination directory.
    #[error("entry '{name}' in '{path}' escapes the destination directory")]
    UnsafeEntry { path: PathBuf, name: String },

    /// Writing an extracted entry failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
