//! Compression algorithm implementations

pub(crate) mod bzip2;
pub(crate) mod deflate;

/// Upper bound on what is reserved up front from a size taken out of a header
const MAX_PREALLOCATION: usize = 1 << 20;

/// Bytes to read from a decoder: one past the expected size, so an
/// oversized stream is caught without inflating the rest of it
pub(crate) fn read_limit(expected_size: usize) -> u64 {
    expected_size as u64 + 1
}

/// Initial buffer capacity for an output of `expected_size` bytes
pub(crate) fn initial_capacity(expected_size: usize) -> usize {
    expected_size.min(MAX_PREALLOCATION)
}
