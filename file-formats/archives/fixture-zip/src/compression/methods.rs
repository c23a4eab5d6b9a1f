//! Compression method definitions and ids

use crate::{Error, Result};
use std::fmt;

/// Compression method ids as stored in zip headers
pub mod ids {
    /// No compression
    pub const STORED: u16 = 0;
    /// Raw deflate
    pub const DEFLATED: u16 = 8;
    /// BZip2
    pub const BZIP2: u16 = 12;
}

/// Compression methods supported for zip entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// Payload stored as-is
    Stored,
    /// Raw deflate stream
    Deflated,
    /// BZip2 stream
    Bzip2,
}

impl CompressionMethod {
    /// All methods in the order the fixture writes them
    pub const ALL: [CompressionMethod; 3] = [Self::Stored, Self::Deflated, Self::Bzip2];

    /// Determine the method from the id found in a zip header
    pub fn from_u16(id: u16) -> Result<Self> {
        match id {
            ids::STORED => Ok(CompressionMethod::Stored),
            ids::DEFLATED => Ok(CompressionMethod::Deflated),
            ids::BZIP2 => Ok(CompressionMethod::Bzip2),
            other => Err(Error::UnsupportedCompression(other)),
        }
    }

    /// Id written to zip headers
    pub fn to_u16(self) -> u16 {
        match self {
            CompressionMethod::Stored => ids::STORED,
            CompressionMethod::Deflated => ids::DEFLATED,
            CompressionMethod::Bzip2 => ids::BZIP2,
        }
    }

    /// Minimum "version needed to extract" (APPNOTE 4.4.3)
    pub fn version_needed(self) -> u16 {
        match self {
            CompressionMethod::Stored | CompressionMethod::Deflated => 20,
            CompressionMethod::Bzip2 => 46,
        }
    }

    /// Short label used in entry names and log lines
    pub fn label(self) -> &'static str {
        match self {
            CompressionMethod::Stored => "stored",
            CompressionMethod::Deflated => "deflated",
            CompressionMethod::Bzip2 => "bzip2",
        }
    }

    /// Level used when none is requested
    pub fn default_level(self) -> Option<u32> {
        match self {
            CompressionMethod::Stored => None,
            CompressionMethod::Deflated => Some(6),
            CompressionMethod::Bzip2 => Some(9),
        }
    }

    /// Resolve a requested level against the range this method accepts
    ///
    /// Stored entries ignore the level entirely.
    pub fn resolve_level(self, level: Option<u32>) -> Result<Option<u32>> {
        let range = match self {
            CompressionMethod::Stored => return Ok(None),
            CompressionMethod::Deflated => 0..=9,
            CompressionMethod::Bzip2 => 1..=9,
        };

        match level {
            None => Ok(self.default_level()),
            Some(level) if range.contains(&level) => Ok(Some(level)),
            Some(level) => Err(Error::InvalidCompressionLevel {
                method: self.label(),
                level,
            }),
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
