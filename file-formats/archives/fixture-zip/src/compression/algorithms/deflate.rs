//! Raw deflate compression and decompression

use crate::Result;
use super::{initial_capacity, read_limit};
use crate::compression::error_helpers::{compression_error, decompression_error};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};

/// Decompress a raw deflate stream (zip entries carry no zlib header)
pub(crate) fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data).take(read_limit(expected_size));
    let mut decompressed = Vec::with_capacity(initial_capacity(expected_size));

    decoder.read_to_end(&mut decompressed).map_err(|e| {
        log::debug!("Deflate decompression failed: {e}");
        log::trace!(
            "First 16 bytes of data: {:02X?}",
            &data[..16.min(data.len())]
        );
        decompression_error("Deflate", e)
    })?;

    Ok(decompressed)
}

/// Compress into a raw deflate stream
pub(crate) fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| compression_error("Deflate", e))?;

    encoder
        .finish()
        .map_err(|e| compression_error("Deflate", e))
}
