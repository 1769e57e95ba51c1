// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cmd::list::format_library;
use crate::cmd::mods::{install_message, update_message, vanilla_message};
use crate::config::paths::AppPaths;
use crate::library::{LibraryStore, ModRecord};
use crate::manager::{InstallOutcome, UpdateOutcome};

fn record(id: u64, path: &str) -> ModRecord {
    ModRecord::new(id, &path.parse().unwrap())
}

#[test]
fn test_install_messages() {
    insta::assert_snapshot!(
        install_message(&InstallOutcome::Installed(record(42, "author/ModA"))),
        @"author/ModA successfully installed (release 42) and activated"
    );
    insta::assert_snapshot!(
        install_message(&InstallOutcome::Activated(record(42, "author/ModA"))),
        @"author/ModA is already installed, activated it"
    );
}

#[test]
fn test_update_messages() {
    insta::assert_snapshot!(
        update_message(&UpdateOutcome::Updated { from: 42, record: record(43, "author/ModA") }),
        @"author/ModA successfully updated from release 42 to 43"
    );
    insta::assert_snapshot!(
        update_message(&UpdateOutcome::UpToDate(record(42, "author/ModA"))),
        @"author/ModA already up to date"
    );
}

#[test]
fn test_vanilla_message() {
    insta::assert_snapshot!(vanilla_message(None), @"Among Us is now vanilla");
    insta::assert_snapshot!(
        vanilla_message(Some(&record(1, "a/b"))),
        @"Deactivated a/b, Among Us is now vanilla"
    );
}

#[test]
fn test_format_empty_library() {
    let tmp = tempfile::tempdir().unwrap();
    let store = LibraryStore::load(AppPaths::under(tmp.path())).unwrap();

    assert_eq!(
        format_library(&store),
        vec![
            "game folder: not configured".to_string(),
            "No mods installed".to_string()
        ]
    );
}

#[test]
fn test_format_library_marks_current() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = AppPaths::under(tmp.path());
    paths.create_dirs().unwrap();
    std::fs::write(
        &paths.library,
        r#"{
            "game_folder_path": "/games/au",
            "current_mod": {"id": 7, "path": "b/two"},
            "mods": [{"id": 1, "path": "a/one"}, {"id": 7, "path": "b/two"}]
        }"#,
    )
    .unwrap();
    let store = LibraryStore::load(paths).unwrap();

    insta::assert_snapshot!(format_library(&store).join("\n"), @r"
    game folder: /games/au
      a/one (1)
    * b/two (7)
    ");
}
