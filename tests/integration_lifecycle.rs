// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end lifecycle against a mocked GitHub.
//!
//! Real downloads, real zip extraction, real symlinks; only the remote side
//! is wiremock.

#![cfg(unix)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use aum_rs::archive::ZipExtractor;
use aum_rs::config::paths::AppPaths;
use aum_rs::error::{AumError, ReleaseError};
use aum_rs::library::{LibraryStore, ModPath};
use aum_rs::manager::{InstallOutcome, ModManager, UpdateOutcome};
use aum_rs::net::{HttpFetcher, ProgressDisplay};
use aum_rs::source::GithubReleases;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;

type Manager = ModManager<GithubReleases, HttpFetcher, ZipExtractor>;

struct World {
    _tmp: TempDir,
    server: MockServer,
    paths: AppPaths,
    game: PathBuf,
}

impl World {
    async fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let paths = AppPaths::under(tmp.path().join("aum"));
        let game = tmp.path().join("Among Us");
        fs::create_dir_all(&game).unwrap();
        fs::write(game.join("Among Us.exe"), b"game").unwrap();
        Self {
            _tmp: tmp,
            server: MockServer::start().await,
            paths,
            game,
        }
    }

    fn manager(&self) -> Manager {
        ModManager::new(
            LibraryStore::load(self.paths.clone()).unwrap(),
            GithubReleases::new(self.server.uri()),
            HttpFetcher::new(ProgressDisplay::Silent, None),
            ZipExtractor,
            vec![".zip".to_string()],
        )
    }

    /// Serves `files` zipped as the latest release `id` of `owner/repo`.
    async fn publish(&self, owner: &str, repo: &str, id: u64, files: &[(&str, &[u8])]) {
        let asset = format!("/download/{owner}/{repo}/{id}/{repo}.zip");
        Mock::given(method("GET"))
            .and(path(format!("/repos/{owner}/{repo}/releases/latest")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "tag_name": format!("v{id}"),
                "assets": [
                    {"name": "README.md", "browser_download_url": format!("{}/readme", self.server.uri())},
                    {"name": format!("{repo}.zip"), "browser_download_url": format!("{}{asset}", self.server.uri())}
                ]
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(asset))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes(files)))
            .mount(&self.server)
            .await;
    }

    fn links(&self) -> Vec<(String, PathBuf)> {
        let mut links: Vec<(String, PathBuf)> = fs::read_dir(&self.game)
            .unwrap()
            .filter_map(Result::ok)
            .filter_map(|e| {
                fs::read_link(e.path())
                    .ok()
                    .map(|target| (e.file_name().to_string_lossy().into_owned(), target))
            })
            .collect();
        links.sort();
        links
    }

    fn staged(&self) -> usize {
        fs::read_dir(&self.paths.downloads).map_or(0, Iterator::count)
    }
}

fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn mp(s: &str) -> ModPath {
    s.parse().unwrap()
}

fn read_library(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn lifecycle_install_switch_update_vanilla_reset() {
    let world = World::new().await;
    world
        .publish("author", "ModA", 1, &[("winhttp.dll", b"a1"), ("BepInEx/plugins/A.dll", b"A")])
        .await;
    world
        .publish("other", "ModB", 7, &[("winhttp.dll", b"b7"), ("doorstop_config.ini", b"ini")])
        .await;

    let mut manager = world.manager();
    manager.configure(&world.game).await.unwrap();

    // install
    let outcome = manager.install(&mp("author/ModA"), false).await.unwrap();
    assert!(matches!(outcome, InstallOutcome::Installed(ref r) if r.id == 1));
    let mod_a = world.paths.mods.join("author").join("ModA");
    assert_eq!(
        world.links(),
        vec![
            ("BepInEx".to_string(), mod_a.join("BepInEx")),
            ("winhttp.dll".to_string(), mod_a.join("winhttp.dll")),
        ]
    );
    assert_eq!(fs::read(world.game.join("winhttp.dll")).unwrap(), b"a1");
    assert_eq!(world.staged(), 0);

    // switch
    manager.install(&mp("other/ModB"), false).await.unwrap();
    let mod_b = world.paths.mods.join("other").join("ModB");
    assert!(world.links().iter().all(|(_, target)| target.starts_with(&mod_b)));
    assert_eq!(world.links().len(), 2);

    // update of the inactive mod reactivates it
    world.server.reset().await;
    world
        .publish("author", "ModA", 2, &[("winhttp.dll", b"a2")])
        .await;
    let outcome = manager.update(&mp("author/ModA"), false).await.unwrap();
    match outcome {
        UpdateOutcome::Updated { from, record } => {
            assert_eq!(from, 1);
            assert_eq!(record.id, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(fs::read(world.game.join("winhttp.dll")).unwrap(), b"a2");
    assert!(!mod_a.join("BepInEx").exists());

    let library = read_library(&world.paths.library);
    assert_eq!(library["current_mod"]["path"], "author/ModA");
    assert_eq!(library["mods"][0]["id"], 2);
    assert_eq!(library["mods"][1]["path"], "other/ModB");

    // up to date
    let outcome = manager.update(&mp("author/ModA"), false).await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::UpToDate(_)));

    // vanilla
    let previous = manager.deactivate().await.unwrap();
    assert_eq!(previous.map(|r| r.path), Some("author/ModA".to_string()));
    assert!(world.links().is_empty());
    assert!(world.game.join("Among Us.exe").is_file());

    // reset
    let removed = manager.reset().await.unwrap();
    assert_eq!(removed, 2);
    assert!(!mod_a.exists());
    assert!(!mod_b.exists());
    let library = read_library(&world.paths.library);
    assert_eq!(library["mods"], json!([]));
    assert!(library["current_mod"].is_null());
}

#[tokio::test]
async fn lifecycle_state_survives_a_new_process() {
    let world = World::new().await;
    world.publish("author", "ModA", 3, &[("winhttp.dll", b"a")]).await;

    {
        let mut manager = world.manager();
        manager.configure(&world.game).await.unwrap();
        manager.install(&mp("author/ModA"), false).await.unwrap();
    }

    let manager = world.manager();
    let store = manager.store();
    assert_eq!(store.game_folder(), Some(world.game.as_path()));
    assert_eq!(store.current().map(|r| r.id), Some(3));
    assert_eq!(store.mods().len(), 1);
}

#[tokio::test]
async fn lifecycle_unknown_mod_is_reported() {
    let world = World::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&world.server)
        .await;

    let mut manager = world.manager();
    manager.configure(&world.game).await.unwrap();
    let err = manager.install(&mp("nobody/Nothing"), false).await.unwrap_err();

    assert!(!err.is_fatal());
    match err {
        AumError::Release(inner) => {
            assert!(matches!(*inner, ReleaseError::ModNotFound { ref path } if path == "nobody/Nothing"));
        }
        other => panic!("unexpected {other}"),
    }
    assert!(manager.store().mods().is_empty());
    assert_eq!(world.staged(), 0);
}

#[tokio::test]
async fn lifecycle_failed_download_keeps_installed_version() {
    let world = World::new().await;
    world.publish("author", "ModA", 1, &[("winhttp.dll", b"a1")]).await;

    let mut manager = world.manager();
    manager.configure(&world.game).await.unwrap();
    manager.install(&mp("author/ModA"), false).await.unwrap();

    world.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/repos/author/ModA/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "assets": [{"name": "ModA.zip", "browser_download_url": format!("{}/gone/ModA.zip", world.server.uri())}]
        })))
        .mount(&world.server)
        .await;

    let err = manager.update(&mp("author/ModA"), false).await.unwrap_err();

    assert!(matches!(err, AumError::Network(_)));
    assert_eq!(fs::read(world.game.join("winhttp.dll")).unwrap(), b"a1");
    assert_eq!(manager.store().find_by_path("author/ModA").map(|r| r.id), Some(1));
}
