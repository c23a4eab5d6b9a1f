//! Archives written here must read with an independent zip implementation

use crate::common::{PROSE, generate_repetitive_data};
use fixture_zip::{ArchiveBuilder, CompressionMethod, EntryOptions};
use std::io::{Cursor, Read};

fn build_fixture_like(data: &[u8], iterations: usize) -> Vec<u8> {
    let mut builder = ArchiveBuilder::new(Vec::new());
    for i in 0..iterations {
        for method in CompressionMethod::ALL {
            builder
                .add_entry_data(
                    &format!("{}-n{i}.txt", method.label()),
                    data,
                    &EntryOptions::new(method).level(9),
                )
                .unwrap();
        }
    }
    builder.finish().unwrap()
}

#[test]
fn test_zip_crate_reads_all_methods() {
    let data = generate_repetitive_data(PROSE.as_bytes(), 16 * 1024);
    let bytes = build_fixture_like(&data, 4);

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 12);

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).unwrap();
        let expected_method = match index % 3 {
            0 => zip::CompressionMethod::Stored,
            1 => zip::CompressionMethod::Deflated,
            _ => zip::CompressionMethod::Bzip2,
        };
        assert_eq!(file.compression(), expected_method, "{}", file.name());
        assert_eq!(file.size(), data.len() as u64);
        if expected_method == zip::CompressionMethod::Stored {
            assert_eq!(file.compressed_size(), file.size());
        } else {
            assert!(file.compressed_size() < file.size());
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, data, "{}", file.name());
    }

    assert!(archive.by_name("bzip2-n3.txt").is_ok());
    assert!(archive.by_name("bzip2-n4.txt").is_err());
}

#[test]
fn test_zip_crate_reads_empty_archive() {
    let bytes = ArchiveBuilder::new(Vec::new()).finish().unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert!(archive.is_empty());
}
