//! Compression and decompression of zip entry payloads

mod algorithms;
mod compress;
mod decompress;
mod methods;

// Re-export the main public API
pub use compress::compress;
pub use decompress::decompress;
pub use methods::{CompressionMethod, ids};

pub(crate) mod error_helpers {
    use crate::Error;
    use std::fmt::Display;

    pub(crate) fn compression_error(algorithm: &str, err: impl Display) -> Error {
        Error::compression(format!("{algorithm} compression failed: {err}"))
    }

    pub(crate) fn decompression_error(algorithm: &str, err: impl Display) -> Error {
        Error::compression(format!("{algorithm} decompression failed: {err}"))
    }
}
