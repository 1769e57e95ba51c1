// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::paths::{AppPaths, PathsConfig};
use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.source.api_url, "https://api.github.com");
    assert_eq!(config.source.archive_suffixes, vec![".zip".to_string()]);
    assert_eq!(config.source.timeout(), Some(Duration::from_secs(30)));
    assert!(config.paths.root.is_none());
}

#[test]
fn test_parse_resolves_paths_under_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("aum");
    let toml = format!(
        "[paths]\nroot = {:?}\ndownloads = \"staging\"\n",
        root.display().to_string()
    );

    let config = Config::parse(&toml).unwrap();
    let paths = config.paths.app_paths().unwrap();

    assert_eq!(paths.root, root);
    assert_eq!(paths.downloads, root.join("staging"));
    assert_eq!(paths.mods, root.join("mods"));
    assert_eq!(paths.library, root.join("config.json"));
}

#[test]
fn test_absolute_paths_are_kept() {
    let tmp = tempfile::tempdir().unwrap();
    let elsewhere = tmp.path().join("elsewhere").join("library.json");
    let mut paths = PathsConfig {
        root: Some(tmp.path().to_path_buf()),
        library: Some(elsewhere.clone()),
        ..PathsConfig::default()
    };

    paths.resolve().unwrap();

    assert_eq!(paths.library, Some(elsewhere));
    assert_eq!(paths.mods, Some(tmp.path().join("mods")));
}

#[test]
fn test_unresolved_paths_report_missing_key() {
    let paths = PathsConfig::default();
    let err = paths.app_paths().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[paths]'");
}

#[test]
fn test_app_paths_under_and_create_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(tmp.path().join("root"));

    paths.create_dirs().unwrap();

    assert!(paths.downloads.is_dir());
    assert!(paths.mods.is_dir());
    assert_eq!(paths.library.file_name().unwrap(), "config.json");
    assert!(!paths.library.exists());
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result = Config::parse("[source]\nmirror = \"x\"\n");
    assert!(result.is_err());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let result = Config::parse("[global]\noutput_log_level = 9\n");
    assert!(result.is_err());
}

#[test]
fn test_empty_suffix_list_is_rejected() {
    let result = Config::parse("[source]\narchive_suffixes = []\n");
    assert!(result.is_err());
}

#[test]
fn test_overrides_win_over_files() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .add_toml_str("[source]\ntimeout_secs = 5\n")
        .set("paths.root", tmp.path().display().to_string())
        .unwrap()
        .set_option("source/timeout_secs=0")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.source.timeout_secs, 0);
    assert_eq!(config.source.timeout(), None);
    assert_eq!(config.paths.root, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_set_option_requires_key_value() {
    assert!(ConfigLoader::new().set_option("source.token").is_err());
    assert!(ConfigLoader::new().set_option("=value").is_err());
}

#[test]
fn test_optional_file_is_tracked_only_when_present() {
    let tmp = tempfile::tempdir().unwrap();
    let present = tmp.path().join("aum.toml");
    std::fs::write(&present, "[source]\ntimeout_secs = 10\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&present)
        .add_toml_file_optional(tmp.path().join("missing.toml"));

    assert_eq!(
        loader.loaded_files(),
        vec![("optional".to_string(), present.clone())]
    );
    assert_eq!(loader.format_loaded_files().len(), 1);
}

#[test]
fn test_format_options_hides_token() {
    let mut config = Config::default();
    config.paths.root = Some(PathBuf::from("/aum"));
    config.paths.resolve().unwrap();
    config.source.token = Some("ghp_secret".to_string());

    let lines = config.format_options();

    assert!(lines.iter().any(|l| l.starts_with("source.token") && l.ends_with("[hidden]")));
    assert!(!lines.iter().any(|l| l.contains("ghp_secret")));
    assert!(lines.iter().any(|l| l.starts_with("paths.mods")));
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}

#[test]
fn test_relative_root_is_made_absolute() {
    let mut paths = PathsConfig {
        root: Some(PathBuf::from("portable")),
        ..PathsConfig::default()
    };

    paths.resolve().unwrap();

    let root = paths.root().unwrap().to_path_buf();
    assert!(root.is_absolute());
    assert!(root.ends_with("portable"));
    assert_eq!(paths.mods, Some(root.join("mods")));
}
