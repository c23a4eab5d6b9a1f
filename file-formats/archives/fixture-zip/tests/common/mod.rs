//! Common test utilities and fixtures

#![allow(dead_code)]

use fixture_zip::{ArchiveBuilder, CompressionMethod, EntryOptions};
use std::path::Path;
use tempfile::TempDir;

/// Opening lines of King Lear, compressible prose
pub const PROSE: &str = "Meantime we shall express our darker purpose.\n\
Give me the map there. Know that we have divided\n\
In three our kingdom: and 'tis our fast intent\n\
To shake all cares and business from our age;\n\
Conferring them on younger strengths, while we\n\
Unburthen'd crawl toward death.\n";

/// Create a temporary directory for tests
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Generate repetitive test data (good for compression tests)
pub fn generate_repetitive_data(pattern: &[u8], total_size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(total_size);
    while data.len() < total_size {
        let chunk_size = (total_size - data.len()).min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
    }
    data
}

/// Create a test file with specific content
pub fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Build an in-memory archive holding `data` once per method, named `{label}.txt`
pub fn archive_with_all_methods(data: &[u8]) -> Vec<u8> {
    let mut builder = ArchiveBuilder::new(Vec::new());
    for method in CompressionMethod::ALL {
        builder
            .add_entry_data(
                &format!("{}.txt", method.label()),
                data,
                &EntryOptions::new(method).level(9),
            )
            .expect("Failed to add entry");
    }
    builder.finish().expect("Failed to finish archive")
}
