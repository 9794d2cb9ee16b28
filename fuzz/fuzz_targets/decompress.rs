//! Fuzz target for decoding arbitrary payload bytes.
//!
//! Run with: cargo +nightly fuzz run decompress

#![no_main]

use libfuzzer_sys::fuzz_target;
use npk_zlib::codec::{self, CompressOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must decode or fail cleanly
    if let Ok(decoded) = codec::decompress(data) {
        assert!(decoded.trailing_len <= data.len());
        let _ = decoded.describe();
    }

    // Anything we encode must decode back to itself
    let raw = codec::compress(data, &CompressOptions::default()).expect("compress failed");
    let decoded = codec::decompress(&raw).expect("own stream rejected");
    assert!(decoded.eof);
    assert_eq!(decoded.data, data);
});
