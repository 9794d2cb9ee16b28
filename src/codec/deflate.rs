//! Single-chunk zlib compression.

use flate2::{Compress, Compression, FlushCompress, Status};

use crate::Result;

/// Upper bound on the zlib-wrapped size of `len` input bytes (zlib's `compressBound`).
pub(crate) fn compress_bound(len: usize) -> usize {
    len + (len >> 12) + (len >> 14) + (len >> 25) + 13
}

/// Compresses `chunk` into a standalone zlib stream in a single finishing pass.
///
/// The output buffer is sized up front so the backend emits each stored block
/// at full length instead of splitting it to fit a short output window.
pub(crate) fn compress_chunk(chunk: &[u8], level: u8) -> Result<Vec<u8>> {
    let mut deflater = Compress::new(Compression::new(u32::from(level)), true);
    let mut out = Vec::with_capacity(compress_bound(chunk.len()));

    loop {
        let consumed = deflater.total_in() as usize;
        let status = deflater.compress_vec(&chunk[consumed..], &mut out, FlushCompress::Finish)?;
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => out.reserve(compress_bound(chunk.len() - consumed)),
        }
    }
}
