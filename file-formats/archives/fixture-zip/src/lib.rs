//! # fixture_zip - zip archives for test fixtures
//!
//! A small implementation of the zip container covering what test fixtures
//! need: stored, deflate and bzip2 entries written in one pass, plus a reader
//! to check what was written.
//!
//! ## Features
//!
//! - Streaming [`ArchiveBuilder`]: entries are compressed and written as they
//!   are added, the central directory is written by `finish`
//! - Atomic output: archives created with [`ArchiveBuilder::create`] only
//!   replace their destination once complete
//! - [`Archive`] reader with CRC-32 verification
//!
//! Zip64, encryption, multi-disk archives and data descriptors are not
//! written and are rejected when read.
//!
//! ## Examples
//!
//! ```no_run
//! use fixture_zip::{Archive, ArchiveBuilder, CompressionMethod, EntryOptions};
//!
//! # fn main() -> Result<(), fixture_zip::Error> {
//! let mut builder = ArchiveBuilder::create("example.zip")?;
//! builder.add_entry_data(
//!     "bzip2.txt",
//!     b"To be, or not to be",
//!     &EntryOptions::new(CompressionMethod::Bzip2).level(9),
//! )?;
//! builder.persist()?;
//!
//! let mut archive = Archive::open("example.zip")?;
//! assert_eq!(archive.read_entry("bzip2.txt")?, b"To be, or not to be");
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod archive;
pub mod builder;
pub mod compression;
pub mod cp437;
pub mod datetime;
pub mod error;
pub mod io;
pub mod path;
pub mod records;

pub use archive::{Archive, EntryInfo};
pub use builder::{ArchiveBuilder, EntryOptions};
pub use compression::CompressionMethod;
pub use datetime::DosDateTime;
pub use error::{Error, Result};
pub use io::AtomicFile;
