//! BZip2 compression and decompression

use crate::Result;
use super::{initial_capacity, read_limit};
use crate::compression::error_helpers::{compression_error, decompression_error};
use bzip2::Compression;
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use std::io::{Read, Write};

/// Decompress using BZip2
pub(crate) fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = BzDecoder::new(data).take(read_limit(expected_size));
    let mut decompressed = Vec::with_capacity(initial_capacity(expected_size));

    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| decompression_error("BZip2", e))?;

    Ok(decompressed)
}

/// Compress using BZip2 with a block size level of 1..=9
pub(crate) fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| compression_error("BZip2", e))?;

    encoder.finish().map_err(|e| compression_error("BZip2", e))
}
