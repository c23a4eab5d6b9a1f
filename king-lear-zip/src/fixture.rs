//! Building and checking the King Lear fixture archive
//!
//! The archive holds `iterations` repetitions of the configured methods.
//! Repetition `i` contributes `{label}-n{i}.txt` for each method in order,
//! every entry carrying the complete source document.

use crate::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use fixture_zip::{Archive, ArchiveBuilder, DosDateTime, EntryOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// One planned archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    /// Repetition this entry belongs to
    pub index: usize,
    /// Entry name inside the archive
    pub name: String,
    /// Compression settings
    pub options: EntryOptions,
}

impl EntrySpec {
    fn new(index: usize, options: EntryOptions) -> Self {
        Self {
            index,
            name: entry_name(&options, index),
            options,
        }
    }
}

/// Name of the entry for a method and repetition, e.g. `bzip2-n7.txt`
pub fn entry_name(options: &EntryOptions, index: usize) -> String {
    format!("{}-n{index}.txt", options.method.label())
}

/// Ordered list of entries the fixture consists of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePlan {
    entries: Vec<EntrySpec>,
}

impl FixturePlan {
    /// Expand a configuration into its entries
    pub fn from_config(config: &FixtureConfig) -> Self {
        let entries = (0..config.iterations)
            .flat_map(|index| {
                config
                    .methods
                    .iter()
                    .map(move |options| EntrySpec::new(index, *options))
            })
            .collect();

        Self { entries }
    }

    /// Entries in archive order
    pub fn entries(&self) -> &[EntrySpec] {
        &self.entries
    }

    /// Entry names in archive order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|spec| spec.name.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSummary {
    /// Where the archive was written
    pub output_path: PathBuf,
    /// Entries written
    pub entries: usize,
    /// Size of the finished archive in bytes
    pub archive_size: u64,
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| FixtureError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the fixture archive described by `config`
///
/// The source is read once. Entries are appended in plan order with one
/// progress line per step. The archive only replaces `output_path` once it
/// is complete; on error nothing is left behind.
pub fn build_fixture(config: &FixtureConfig) -> Result<FixtureSummary> {
    let source = read_source(&config.source_path)?;
    // Entries carry the source's mtime, like `zip` tools do for added files
    let modified = fs::metadata(&config.source_path)
        .and_then(|metadata| metadata.modified())
        .map(DosDateTime::from_system_time)
        .unwrap_or_default();
    log::debug!(
        "Read {} bytes from {}",
        source.len(),
        config.source_path.display()
    );

    let plan = FixturePlan::from_config(config);
    let mut builder = ArchiveBuilder::create(&config.output_path)?;

    for repetition in plan.entries().chunk_by(|a, b| a.index == b.index) {
        log::info!("i={}", repetition[0].index);

        for spec in repetition {
            let options = EntryOptions {
                last_modified: spec.options.last_modified.or(Some(modified)),
                ..spec.options
            };
            builder.add_entry_data(&spec.name, &source, &options)?;
            log::info!("{}", spec.options.method.label());
        }
    }

    let entries = builder.len();
    let output_path = builder.persist()?;
    let archive_size = fs::metadata(&output_path)?.len();

    Ok(FixtureSummary {
        output_path,
        entries,
        archive_size,
    })
}

/// Check an existing archive against the fixture layout
///
/// Verifies entry names and order, compression methods, that every entry
/// decompresses to the source document, and that stored entries are not
/// compressed.
pub fn verify_fixture(config: &FixtureConfig) -> Result<()> {
    let source = read_source(&config.source_path)?;
    let plan = FixturePlan::from_config(config);
    let mut archive = Archive::open(&config.output_path)?;

    if archive.len() != plan.len() {
        return Err(FixtureError::mismatch(format!(
            "expected {} entries, found {}",
            plan.len(),
            archive.len()
        )));
    }

    for (index, spec) in plan.entries().iter().enumerate() {
        let entry = archive.entries()[index].clone();
        if entry.name != spec.name {
            return Err(FixtureError::mismatch(format!(
                "entry {index} is {}, expected {}",
                entry.name, spec.name
            )));
        }

        let method = entry.compression()?;
        if method != spec.options.method {
            return Err(FixtureError::mismatch(format!(
                "{} uses {method}, expected {}",
                entry.name, spec.options.method
            )));
        }

        if method == fixture_zip::CompressionMethod::Stored
            && entry.compressed_size != entry.uncompressed_size
        {
            return Err(FixtureError::mismatch(format!(
                "{} is stored but {} bytes became {}",
                entry.name, entry.uncompressed_size, entry.compressed_size
            )));
        }

        if archive.read_entry_at(index)? != source {
            return Err(FixtureError::mismatch(format!(
                "{} does not match the source document",
                entry.name
            )));
        }
    }

    log::debug!("Verified {} entries in {}", plan.len(), config.output_path.display());
    Ok(())
}
