// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the network layer using wiremock.
//!
//! Covers:
//! - File downloads and staging by URL basename
//! - HTTP errors
//! - GitHub latest-release lookups

use aum_rs::error::{AumError, NetworkError};
use aum_rs::library::ModPath;
use aum_rs::net::{Downloader, Fetcher, HttpFetcher, ProgressDisplay};
use aum_rs::source::{GithubReleases, ReleaseSource};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn mod_path(s: &str) -> ModPath {
    s.parse().unwrap()
}

fn expect_http_status(err: AumError, expected: u16) {
    match err {
        AumError::Network(boxed) => match *boxed {
            NetworkError::HttpError { status, .. } => assert_eq!(status, expected),
            other => panic!("Expected NetworkError::HttpError, got {other:?}"),
        },
        other => panic!("Expected AumError::Network, got {other:?}"),
    }
}

// =============================================================================
// Downloader
// =============================================================================

#[tokio::test]
async fn test_download_file_success() {
    let mock_server = MockServer::start().await;
    let body = b"PK\x03\x04 not really a zip";
    Mock::given(method("GET"))
        .and(path("/ModA.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_slice()))
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let output = temp_dir.path().join("nested").join("ModA.zip");

    Downloader::new()
        .url(format!("{}/ModA.zip", mock_server.uri()))
        .file(&output)
        .silent()
        .download()
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), body);
}

#[tokio::test]
async fn test_download_http_errors_leave_no_file() {
    for status in [404, 500] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let temp_dir = temp_dir();
        let output = temp_dir.path().join("ModA.zip");
        let err = Downloader::new()
            .url(format!("{}/ModA.zip", mock_server.uri()))
            .file(&output)
            .silent()
            .download()
            .await
            .unwrap_err();

        expect_http_status(err, status);
        assert!(!output.exists());
    }
}

#[tokio::test]
async fn test_http_fetcher_stages_by_basename() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/download/v1/TheOtherRoles.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("archive"))
        .mount(&mock_server)
        .await;

    let staging = temp_dir();
    let fetcher = HttpFetcher::new(ProgressDisplay::Silent, None);
    let url = format!(
        "{}/releases/download/v1/TheOtherRoles.zip?raw=1",
        mock_server.uri()
    );

    let file = fetcher.fetch(&url, staging.path()).await.unwrap();

    assert_eq!(file, staging.path().join("TheOtherRoles.zip"));
    assert_eq!(std::fs::read_to_string(file).unwrap(), "archive");
}

// =============================================================================
// GitHub Releases
// =============================================================================

#[tokio::test]
async fn test_latest_release_parses_assets() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/Eisbison/TheOtherRoles/releases/latest"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1234,
            "tag_name": "v4.1.0",
            "draft": false,
            "assets": [
                {"id": 1, "name": "TheOtherRoles.dll", "browser_download_url": "https://x/TheOtherRoles.dll"},
                {"id": 2, "name": "TheOtherRoles.zip", "browser_download_url": "https://x/TheOtherRoles.zip"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let source = GithubReleases::new(mock_server.uri());
    let release = source
        .latest_release(&mod_path("Eisbison/TheOtherRoles"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(release.id, 1234);
    assert_eq!(release.tag_name.as_deref(), Some("v4.1.0"));
    let asset = release.package_asset(&[".zip"]).unwrap();
    assert_eq!(asset.download_url, "https://x/TheOtherRoles.zip");
}

#[tokio::test]
async fn test_latest_release_not_found_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let source = GithubReleases::new(mock_server.uri());
    let release = source.latest_release(&mod_path("nobody/nothing")).await.unwrap();

    assert!(release.is_none());
}

#[tokio::test]
async fn test_latest_release_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = GithubReleases::new(mock_server.uri());
    let err = source.latest_release(&mod_path("a/b")).await.unwrap_err();

    expect_http_status(err, 500);
}

#[tokio::test]
async fn test_latest_release_sends_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "assets": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = GithubReleases::new(mock_server.uri()).with_token("ghp_test");
    let release = source.latest_release(&mod_path("a/b")).await.unwrap().unwrap();

    assert!(release.assets.is_empty());
    assert!(release.tag_name.is_none());
}
