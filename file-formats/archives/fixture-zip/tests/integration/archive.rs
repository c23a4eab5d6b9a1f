//! Integration tests for reading archives back

use crate::common::{PROSE, archive_with_all_methods};
use fixture_zip::records::LOCAL_FILE_HEADER_SIZE;
use fixture_zip::{Archive, CompressionMethod, Error};
use pretty_assertions::assert_eq;
use std::io::Cursor;

#[test]
fn test_entry_metadata() {
    let bytes = archive_with_all_methods(PROSE.as_bytes());
    let archive = Archive::from_reader(Cursor::new(bytes)).unwrap();

    let names: Vec<&str> = archive.names().collect();
    assert_eq!(names, vec!["stored.txt", "deflated.txt", "bzip2.txt"]);

    let expected_crc = crc32fast::hash(PROSE.as_bytes());
    for entry in archive.entries() {
        assert_eq!(entry.crc32, expected_crc);
        assert_eq!(entry.uncompressed_size, PROSE.len() as u64);
    }

    let stored = archive.entry("stored.txt").unwrap();
    assert_eq!(stored.compression().unwrap(), CompressionMethod::Stored);
    assert_eq!(stored.compressed_size, stored.uncompressed_size);
    assert_eq!(stored.local_header_offset, 0);

    let deflated = archive.entry("deflated.txt").unwrap();
    assert_eq!(
        deflated.local_header_offset,
        LOCAL_FILE_HEADER_SIZE + "stored.txt".len() as u64 + PROSE.len() as u64
    );
}

#[test]
fn test_method_ids_on_disk() {
    let bytes = archive_with_all_methods(b"ids");
    let archive = Archive::from_reader(Cursor::new(bytes)).unwrap();

    let ids: Vec<u16> = archive.entries().iter().map(|e| e.method_id).collect();
    assert_eq!(ids, vec![0, 8, 12]);
}

#[test]
fn test_unsupported_method_reported_on_read() {
    let mut bytes = archive_with_all_methods(b"lzma?");
    let archive = Archive::from_reader(Cursor::new(bytes.clone())).unwrap();
    let stored = archive.entry("stored.txt").unwrap().clone();

    // Patch the stored entry's method to 14 (LZMA) in both headers
    bytes[8] = 14;
    let directory_offset = bytes
        .windows(4)
        .position(|w| w == b"PK\x01\x02")
        .unwrap();
    bytes[directory_offset + 10] = 14;

    let mut archive = Archive::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.entries()[0].name, stored.name);
    assert!(matches!(
        archive.read_entry("stored.txt"),
        Err(Error::UnsupportedCompression(14))
    ));
    // Other entries stay readable
    assert_eq!(archive.read_entry("bzip2.txt").unwrap(), b"lzma?");
}

#[test]
fn test_truncated_archive() {
    let bytes = archive_with_all_methods(PROSE.as_bytes());
    let truncated = bytes[..bytes.len() - 10].to_vec();

    let err = Archive::from_reader(Cursor::new(truncated)).unwrap_err();
    assert!(err.is_corruption());
}
