//! Error types for fixture generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Errors raised while building or checking the fixture
#[derive(Error, Debug)]
pub enum FixtureError {
    /// The source document could not be read
    #[error("failed to read source document {}", path.display())]
    SourceRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Writing or reading the archive failed
    #[error(transparent)]
    Archive(#[from] fixture_zip::Error),

    /// Other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive on disk does not match the fixture layout
    #[error("fixture mismatch: {0}")]
    Mismatch(String),
}

impl FixtureError {
    /// Create a new Mismatch error
    pub fn mismatch<S: Into<String>>(msg: S) -> Self {
        FixtureError::Mismatch(msg.into())
    }
}
