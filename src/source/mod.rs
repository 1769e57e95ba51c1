// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release source: latest published release of `owner/repository`.
//!
//! ```text
//! GET {api_url}/repos/{owner}/{repo}/releases/latest
//!   200 -> Some(Release { id, assets: [{ name, browser_download_url }] })
//!   404 -> None  (no release, or no such repository)
//!   *   -> NetworkError::HttpError
//! ```

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::types::SourceConfig;
use crate::error::{AumResult, NetworkError};
use crate::library::ModPath;
use crate::net::global_client;

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// Latest release metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// First asset whose name ends in one of `suffixes`, compared ASCII
    /// case-insensitively.
    #[must_use]
    pub fn package_asset<S: AsRef<str>>(&self, suffixes: &[S]) -> Option<&Asset> {
        self.assets.iter().find(|asset| {
            let name = asset.name.to_ascii_lowercase();
            suffixes.iter().any(|suffix| {
                let suffix = suffix.as_ref().trim().to_ascii_lowercase();
                !suffix.is_empty() && name.ends_with(&suffix)
            })
        })
    }
}

/// Looks up the latest release of a mod.
pub trait ReleaseSource: Send + Sync {
    /// `Ok(None)` means the mod has no release, which is not an error here.
    fn latest_release<'a>(&'a self, mod_path: &'a ModPath) -> BoxFuture<'a, AumResult<Option<Release>>>;
}

/// [`ReleaseSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    api_url: String,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl GithubReleases {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            timeout: config.timeout(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn latest_url(&self, mod_path: &ModPath) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url.trim_end_matches('/'),
            mod_path.owner(),
            mod_path.repo()
        )
    }

    async fn fetch_latest(&self, mod_path: &ModPath) -> AumResult<Option<Release>> {
        let url = self.latest_url(mod_path);

        let mut request = global_client()
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        debug!(url = %url, "fetching latest release");
        let response = request.send().await.map_err(NetworkError::Reqwest)?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(mod_path = %mod_path, "no release found");
                Ok(None)
            }
            status if status.is_success() => {
                let release = response
                    .json::<Release>()
                    .await
                    .map_err(NetworkError::Reqwest)?;
                debug!(
                    mod_path = %mod_path,
                    id = release.id,
                    tag = release.tag_name.as_deref().unwrap_or(""),
                    assets = release.assets.len(),
                    "latest release"
                );
                Ok(Some(release))
            }
            status => Err(NetworkError::HttpError {
                status: status.as_u16(),
                url,
            }
            .into()),
        }
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_release<'a>(&'a self, mod_path: &'a ModPath) -> BoxFuture<'a, AumResult<Option<Release>>> {
        Box::pin(self.fetch_latest(mod_path))
    }
}
