//! Main compression logic

use super::algorithms;
use super::methods::CompressionMethod;
use crate::Result;

/// Compress data with the given method and level
///
/// Unlike formats that fall back to storing when compression does not help,
/// a zip entry keeps the method it was asked for, so the output of this
/// function may be larger than its input for incompressible data.
pub fn compress(data: &[u8], method: CompressionMethod, level: Option<u32>) -> Result<Vec<u8>> {
    // Only stored entries resolve to no level
    let level = method.resolve_level(level)?.unwrap_or_default();

    match method {
        CompressionMethod::Stored => Ok(data.to_vec()),
        CompressionMethod::Deflated => algorithms::deflate::compress(data, level),
        CompressionMethod::Bzip2 => algorithms::bzip2::compress(data, level),
    }
}
