//! Integration tests for archive creation on disk

use crate::common::{PROSE, create_test_file, temp_dir};
use fixture_zip::{Archive, ArchiveBuilder, CompressionMethod, DosDateTime, EntryOptions, Error};
use std::fs;

#[test]
fn test_create_archive_with_files() {
    let temp_dir = temp_dir();
    let archive_path = temp_dir.path().join("test.zip");
    let source = create_test_file(temp_dir.path(), "lear.txt", PROSE.as_bytes());

    let mut builder = ArchiveBuilder::create(&archive_path).unwrap();
    builder
        .add_entry_file(
            "stored.txt",
            &source,
            &EntryOptions::new(CompressionMethod::Stored),
        )
        .unwrap();
    builder
        .add_entry_file(
            "bzip2.txt",
            &source,
            &EntryOptions::new(CompressionMethod::Bzip2).level(9),
        )
        .unwrap();

    // Not visible until persisted
    assert!(!archive_path.exists());
    assert_eq!(builder.persist().unwrap(), archive_path);

    let mut archive = Archive::open(&archive_path).unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.read_entry("stored.txt").unwrap(), PROSE.as_bytes());
    assert_eq!(archive.read_entry("bzip2.txt").unwrap(), PROSE.as_bytes());
}

#[test]
fn test_file_entries_take_source_mtime() {
    let temp_dir = temp_dir();
    let source = create_test_file(temp_dir.path(), "lear.txt", PROSE.as_bytes());
    let mtime = fs::metadata(&source).unwrap().modified().unwrap();

    let mut builder = ArchiveBuilder::new(Vec::new());
    builder
        .add_entry_file("a.txt", &source, &EntryOptions::default())
        .unwrap();
    builder
        .add_entry_file(
            "b.txt",
            &source,
            &EntryOptions::default().last_modified(DosDateTime::EPOCH),
        )
        .unwrap();
    let bytes = builder.finish().unwrap();

    let archive = Archive::from_reader(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(
        archive.entry("a.txt").unwrap().last_modified,
        DosDateTime::from_system_time(mtime)
    );
    assert_eq!(
        archive.entry("b.txt").unwrap().last_modified,
        DosDateTime::EPOCH
    );
}

#[test]
fn test_unfinished_builder_leaves_existing_archive() {
    let temp_dir = temp_dir();
    let archive_path = create_test_file(temp_dir.path(), "out.zip", b"previous fixture");

    {
        let mut builder = ArchiveBuilder::create(&archive_path).unwrap();
        builder
            .add_entry_data("x.txt", b"partial", &EntryOptions::default())
            .unwrap();
        let missing = temp_dir.path().join("missing.txt");
        let err = builder
            .add_entry_file("y.txt", &missing, &EntryOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        // builder dropped here without persisting
    }

    assert_eq!(fs::read(&archive_path).unwrap(), b"previous fixture");
    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temporary file left behind: {leftovers:?}");
}

#[test]
fn test_unwritable_destination() {
    let temp_dir = temp_dir();
    let archive_path = temp_dir.path().join("no-such-dir").join("out.zip");

    assert!(matches!(
        ArchiveBuilder::create(&archive_path),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_persist_overwrites_previous_archive() {
    let temp_dir = temp_dir();
    let archive_path = temp_dir.path().join("out.zip");

    for payload in [&b"first"[..], &b"second"[..]] {
        let mut builder = ArchiveBuilder::create(&archive_path).unwrap();
        builder
            .add_entry_data("entry.txt", payload, &EntryOptions::default())
            .unwrap();
        builder.persist().unwrap();
    }

    let mut archive = Archive::open(&archive_path).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.read_entry("entry.txt").unwrap(), b"second");
}
