//! Fixed configuration of the fixture
//!
//! The generator takes no arguments. Everything it needs is collected here so
//! tests can point the same code at temporary directories.

use fixture_zip::{CompressionMethod, EntryOptions};
use std::path::{Path, PathBuf};

/// Archive written to the current working directory
pub const OUTPUT_PATH: &str = "out.zip";

/// Number of times each compression method is repeated
pub const ITERATIONS: usize = 50;

/// Level used for the compressed entries
pub const MAX_LEVEL: u32 = 9;

/// Source text, relative to this crate's directory
pub const SOURCE_RELATIVE_PATH: &str = "tests/data/folder/king-lear.txt";

/// Absolute path of the bundled King Lear text
pub fn default_source_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SOURCE_RELATIVE_PATH)
}

/// Inputs of one fixture run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Document copied into every entry
    pub source_path: PathBuf,
    /// Archive to create or replace
    pub output_path: PathBuf,
    /// Repetitions of the method list
    pub iterations: usize,
    /// Methods written for each repetition, in order
    pub methods: Vec<EntryOptions>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            output_path: PathBuf::from(OUTPUT_PATH),
            iterations: ITERATIONS,
            methods: vec![
                EntryOptions::new(CompressionMethod::Stored),
                EntryOptions::new(CompressionMethod::Deflated).level(MAX_LEVEL),
                EntryOptions::new(CompressionMethod::Bzip2).level(MAX_LEVEL),
            ],
        }
    }
}
