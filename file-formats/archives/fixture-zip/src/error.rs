//! Error types for the zip fixture library

use std::io;
use thiserror::Error;

/// Result type alias for zip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for zip operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid zip format or corrupted archive
    #[error("Invalid zip format: {0}")]
    InvalidFormat(String),

    /// Compression method id not handled by this library
    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    /// Compression level outside the range accepted by the method
    #[error("Invalid compression level {level} for {method}")]
    InvalidCompressionLevel {
        /// Method label
        method: &'static str,
        /// Requested level
        level: u32,
    },

    /// Entry name cannot be stored in an archive
    #[error("Invalid entry name {name:?}: {reason}")]
    InvalidEntryName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Entry name already present in the archive being written
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Entry not found in archive
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Compression/decompression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// Checksum mismatch
    #[error("Checksum mismatch for {entry}: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Entry name
        entry: String,
        /// Expected checksum
        expected: u32,
        /// Actual checksum
        actual: u32,
    },

    /// Invalid file size
    #[error("Invalid file size: expected {expected}, got {actual}")]
    InvalidFileSize {
        /// Expected size
        expected: u64,
        /// Actual size
        actual: u64,
    },

    /// Archive capacity exceeded (zip64 is not written)
    #[error("Archive capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// An earlier write to the archive sink failed part way
    #[error("Archive writer is unusable after an earlier write error")]
    WriterPoisoned,
}

impl Error {
    /// Create a new InvalidFormat error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// Create a new Compression error
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Error::Compression(msg.into())
    }

    /// Create a new CapacityExceeded error
    pub fn capacity<S: Into<String>>(msg: S) -> Self {
        Error::CapacityExceeded(msg.into())
    }

    /// Check if this error indicates the archive is corrupted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_)
                | Error::ChecksumMismatch { .. }
                | Error::InvalidFileSize { .. }
        )
    }
}
