// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;

use super::{Unpacker, ZipExtractor};
use crate::error::{AumError, ArchiveError, Severity};

fn write_zip(path: &Path, dirs: &[&str], files: &[(&str, &[u8])]) {
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    for dir in dirs {
        zip.add_directory(*dir, SimpleFileOptions::default()).unwrap();
    }
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_unpack_expands_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("ModA.zip");
    write_zip(
        &archive,
        &["BepInEx/", "BepInEx/plugins/"],
        &[
            ("winhttp.dll", b"dll"),
            ("BepInEx/plugins/ModA.dll", b"plugin"),
        ],
    );
    let dest = tmp.path().join("mods").join("author").join("ModA");

    let written = ZipExtractor.unpack(&archive, &dest).unwrap();

    assert_eq!(written, 2);
    assert_eq!(fs::read(dest.join("winhttp.dll")).unwrap(), b"dll");
    assert_eq!(
        fs::read(dest.join("BepInEx").join("plugins").join("ModA.dll")).unwrap(),
        b"plugin"
    );
}

#[test]
fn test_unpack_creates_parents_for_implicit_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("flat.zip");
    write_zip(&archive, &[], &[("a/b/c.txt", b"c")]);
    let dest = tmp.path().join("out");

    ZipExtractor.unpack(&archive, &dest).unwrap();

    assert!(dest.join("a").join("b").join("c.txt").is_file());
}

#[test]
fn test_unpack_overwrites_previous_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("ModA.zip");
    write_zip(&archive, &[], &[("winhttp.dll", b"v2")]);
    let dest = tmp.path().join("out");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("winhttp.dll"), b"v1").unwrap();

    ZipExtractor.unpack(&archive, &dest).unwrap();

    assert_eq!(fs::read(dest.join("winhttp.dll")).unwrap(), b"v2");
}

#[test]
fn test_unpack_rejects_non_zip() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("broken.zip");
    fs::write(&archive, b"definitely not a zip").unwrap();

    let err = ZipExtractor
        .unpack(&archive, &tmp.path().join("out"))
        .unwrap_err();

    assert!(matches!(err, AumError::Archive(ref e) if matches!(**e, ArchiveError::Open { .. })));
    assert_eq!(err.severity(), Severity::Io);
}

#[test]
fn test_unpack_missing_archive() {
    let tmp = tempfile::tempdir().unwrap();

    let err = ZipExtractor
        .unpack(&tmp.path().join("nope.zip"), &tmp.path().join("out"))
        .unwrap_err();

    assert!(matches!(err, AumError::Archive(ref e) if matches!(**e, ArchiveError::Io { .. })));
}

#[cfg(unix)]
#[test]
fn test_unpack_preserves_executable_bit() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("exec.zip");
    let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    zip.start_file(
        "run.sh",
        SimpleFileOptions::default().unix_permissions(0o755),
    )
    .unwrap();
    zip.write_all(b"#!/bin/sh\n").unwrap();
    zip.finish().unwrap();
    let dest = tmp.path().join("out");

    ZipExtractor.unpack(&archive, &dest).unwrap();

    let mode = fs::metadata(dest.join("run.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn test_unpack_ignores_read_only_directory_mode() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("locked.zip");
    let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    zip.add_directory(
        "BepInEx/",
        SimpleFileOptions::default().unix_permissions(0o555),
    )
    .unwrap();
    zip.start_file("BepInEx/core.dll", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"core").unwrap();
    zip.finish().unwrap();
    let dest = tmp.path().join("out");

    let written = ZipExtractor.unpack(&archive, &dest).unwrap();

    assert_eq!(written, 1);
    assert_eq!(fs::read(dest.join("BepInEx").join("core.dll")).unwrap(), b"core");
    let mode = fs::metadata(dest.join("BepInEx")).unwrap().permissions().mode();
    assert_ne!(mode & 0o200, 0);
}
