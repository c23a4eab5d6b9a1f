//! Compression tests through the public API

use crate::common::{PROSE, generate_repetitive_data};
use fixture_zip::CompressionMethod;
use fixture_zip::compression::{compress, decompress};

#[test]
fn test_prose_shrinks_at_max_level() {
    let data = generate_repetitive_data(PROSE.as_bytes(), 32 * 1024);

    for method in [CompressionMethod::Deflated, CompressionMethod::Bzip2] {
        let compressed = compress(&data, method, Some(9)).expect("Compression failed");
        assert!(
            compressed.len() < data.len() / 2,
            "{method}: {} -> {} bytes",
            data.len(),
            compressed.len()
        );

        let decompressed = decompress(&compressed, method, data.len()).expect("Decompression failed");
        assert_eq!(decompressed, data);
    }
}

#[test]
fn test_stored_keeps_size() {
    let data = PROSE.as_bytes();
    let stored = compress(data, CompressionMethod::Stored, None).expect("Compression failed");
    assert_eq!(stored.len(), data.len());
}

#[test]
fn test_incompressible_data_keeps_method() {
    // Pseudo-random bytes from a small LCG
    let mut state = 0x1234_5678u32;
    let data: Vec<u8> = (0..4096)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 24) as u8
        })
        .collect();

    let compressed =
        compress(&data, CompressionMethod::Deflated, Some(9)).expect("Compression failed");
    let decompressed = decompress(&compressed, CompressionMethod::Deflated, data.len())
        .expect("Decompression failed");
    assert_eq!(decompressed, data);
}

#[test]
fn test_wrong_method_fails() {
    let compressed = compress(PROSE.as_bytes(), CompressionMethod::Bzip2, Some(9))
        .expect("Compression failed");
    assert!(decompress(&compressed, CompressionMethod::Deflated, PROSE.len()).is_err());
}
