//! Main decompression logic

use super::algorithms;
use super::methods::CompressionMethod;
use crate::{Error, Result};

/// Decompress an entry payload and check it against the size recorded in the archive
pub fn decompress(data: &[u8], method: CompressionMethod, expected_size: usize) -> Result<Vec<u8>> {
    let decompressed = match method {
        CompressionMethod::Stored => data.to_vec(),
        CompressionMethod::Deflated => algorithms::deflate::decompress(data, expected_size)?,
        CompressionMethod::Bzip2 => algorithms::bzip2::decompress(data, expected_size)?,
    };

    if decompressed.len() != expected_size {
        return Err(Error::InvalidFileSize {
            expected: expected_size as u64,
            actual: decompressed.len() as u64,
        });
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::compress;

    #[test]
    fn test_size_mismatch_detected() {
        let original = b"sized payload";
        let compressed = compress(original, CompressionMethod::Bzip2, Some(9)).unwrap();

        let err = decompress(&compressed, CompressionMethod::Bzip2, original.len() + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidFileSize { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_oversized_stream_stops_early() {
        let original = vec![b'A'; 1 << 20];

        for method in [CompressionMethod::Deflated, CompressionMethod::Bzip2] {
            let compressed = compress(&original, method, Some(9)).unwrap();

            // Only one byte past the declared size is ever inflated
            let err = decompress(&compressed, method, 10).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::InvalidFileSize {
                        expected: 10,
                        actual: 11
                    }
                ),
                "{method}: {err}"
            );
        }
    }

    #[test]
    fn test_stored_size_mismatch() {
        let err = decompress(b"abc", CompressionMethod::Stored, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFileSize {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_empty_payload() {
        for method in CompressionMethod::ALL {
            let compressed = compress(b"", method, None).unwrap();
            assert!(decompress(&compressed, method, 0).unwrap().is_empty());
        }
    }
}
