//! Fuzz target for splitting arbitrary blobs into object records.
//!
//! Run with: cargo +nightly fuzz run scan

#![no_main]

use libfuzzer_sys::fuzz_target;
use npk_zlib::record::{HEADER_LEN, ObjectList};

/// Largest payload length left in place; bigger ones would only exercise the allocator.
const MAX_PAYLOAD_LEN: u32 = 1 << 16;

/// Offset of the payload length field within a record header.
const PAYLOAD_LEN_OFFSET: usize = 24;

/// Offset of the name length field within a record header.
const NAME_LEN_OFFSET: usize = 28;

/// Clamps the payload length of every record header found in `blob`.
///
/// A trailing partial header still declares a payload once its length field
/// is present, so it is clamped too.
fn clamp_payload_lens(blob: &mut [u8]) {
    let mut offset = 0;
    while offset + NAME_LEN_OFFSET <= blob.len() {
        let field = &mut blob[offset + PAYLOAD_LEN_OFFSET..offset + NAME_LEN_OFFSET];
        let payload_len = u32::from_le_bytes([field[0], field[1], field[2], field[3]]);
        let payload_len = payload_len.min(MAX_PAYLOAD_LEN);
        field.copy_from_slice(&payload_len.to_le_bytes());

        // Missing name length bytes read as zero
        let name_len = match blob.get(offset + NAME_LEN_OFFSET..offset + HEADER_LEN) {
            Some(bytes) => u16::from_le_bytes([bytes[0], bytes[1]]),
            None => u16::from(blob.get(offset + NAME_LEN_OFFSET).copied().unwrap_or(0)),
        };
        offset += HEADER_LEN + usize::from(name_len) + payload_len as usize;
    }
}

fuzz_target!(|data: &[u8]| {
    let mut blob = data.to_vec();
    clamp_payload_lens(&mut blob);

    let list = ObjectList::scan(&blob);
    for record in list.iter() {
        let _ = record.name();
        let _ = record.describe();
    }

    // Repaired records keep the scanned bytes as a prefix
    let flat = list.flatten();
    assert_eq!(&flat[..blob.len()], &blob[..]);
    assert_eq!(ObjectList::scan(&flat), list);
});
