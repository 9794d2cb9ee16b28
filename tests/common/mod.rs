//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use npk_zlib::record::{FileMode, ObjectList, ObjectRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default chunk size of the packaging tools.
pub const BLOCK_SIZE: usize = 0x8000;

/// Deterministic pseudo-random bytes.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(data.as_mut_slice());
    data
}

/// Bytes with a repeating, position-dependent pattern.
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Builds a record list from `(mode, name, payload)` tuples.
pub fn build_list(entries: &[(FileMode, &str, &[u8])]) -> ObjectList {
    entries
        .iter()
        .map(|(mode, name, payload)| {
            ObjectRecord::create(*mode, name, payload).expect("Failed to build record")
        })
        .collect()
}

/// A small filesystem resembling a kernel-only package.
pub fn kernel_package(kernel: &[u8]) -> ObjectList {
    build_list(&[
        (FileMode::directory(0o755), "boot", b""),
        (FileMode::regular(0o755), "boot/kernel", kernel),
        (FileMode::regular(0o644), "UPGRADED", &[0u8; 0x20]),
    ])
}

/// Decodes `raw` with flate2's streaming zlib reader.
pub fn read_with_zlib_decoder(raw: &[u8]) -> std::io::Result<Vec<u8>> {
    use std::io::Read;

    let mut decoder = flate2::read::ZlibDecoder::new(raw);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
