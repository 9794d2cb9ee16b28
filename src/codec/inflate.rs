//! Decoding zlib-wrapped payloads.

use flate2::{Decompress, FlushDecompress, Status};

use crate::{Error, Result};

use super::Decompressed;

/// Smallest amount of free output space offered to the decoder per call.
const MIN_OUTPUT_SPARE: usize = 32 * 1024;

/// Decodes a zlib-wrapped stream with a standard decoder.
///
/// Decoding is lenient about where the stream stops: input that runs out
/// before the final block yields what was decoded so far with `eof == false`,
/// and bytes left over after the trailer are counted in `trailing_len`.
/// Use [`Decompressed::complete`] to require a terminated stream.
///
/// # Errors
///
/// Returns [`Error::CorruptStream`] if the decoder rejects the header, a
/// block, or the trailing checksum.
pub fn decompress(raw: &[u8]) -> Result<Decompressed> {
    let mut inflater = Decompress::new(true);
    let mut data = Vec::with_capacity(raw.len().saturating_mul(2).max(MIN_OUTPUT_SPARE));

    let eof = loop {
        let consumed = inflater.total_in() as usize;
        let produced = data.len();
        if data.capacity() - data.len() < MIN_OUTPUT_SPARE {
            data.reserve(data.len().max(MIN_OUTPUT_SPARE));
        }

        let result = inflater.decompress_vec(&raw[consumed..], &mut data, FlushDecompress::None);
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                return Err(Error::CorruptStream {
                    offset: inflater.total_in(),
                    reason: e.to_string(),
                });
            }
        };

        match status {
            Status::StreamEnd => break true,
            Status::Ok | Status::BufError => {
                let stalled = inflater.total_in() as usize == consumed && data.len() == produced;
                if stalled {
                    break false;
                }
            }
        }
    };

    let consumed = inflater.total_in() as usize;
    let trailing_len = raw.len() - consumed;

    if !eof {
        log::warn!(
            "compressed stream ended before final block after {} input bytes ({} bytes decoded)",
            consumed,
            data.len()
        );
    } else if trailing_len > 0 {
        log::debug!("{} trailing bytes after end of compressed stream", trailing_len);
    }

    Ok(Decompressed {
        data,
        eof,
        consumed,
        trailing_len,
    })
}
