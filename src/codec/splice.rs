//! Splicing independently compressed chunks into one zlib stream.

use crate::checksum::{Adler32, Checksum};
use crate::{Error, Result};

use super::deflate::compress_chunk;
use super::{CompressOptions, TRAILER_LEN, ZLIB_HEADER};

/// Offset of the first block header byte in a single-chunk stream.
const BLOCK_HEADER_OFFSET: usize = ZLIB_HEADER.len();

/// Offset of the stored bytes in a single-chunk stream (header, block byte, LEN/NLEN).
const STORED_DATA_OFFSET: usize = BLOCK_HEADER_OFFSET + 1 + 4;

/// Block header byte of a stored block that does not end the stream.
const NOT_LAST_MARKER: u8 = 0x00;

/// Compresses `plain` into a spliced zlib stream.
///
/// Every chunk of `options.block_size` bytes is compressed on its own. All
/// chunks but the last lose their zlib header and trailer and have their block
/// header byte replaced by a not-last marker; the last chunk keeps its final
/// block header. Empty input yields a single empty final block.
///
/// The trailer accumulator is fed each single-chunk stream from offset 7 up to
/// its trailer. For stored chunks those are exactly the plain chunk bytes.
///
/// # Errors
///
/// Returns an options error if `options` fail [`CompressOptions::validate`],
/// or [`Error::UnexpectedBlockLayout`] if the backend did not emit one stored
/// block per chunk.
///
/// # Example
///
/// ```rust
/// use npk_zlib::codec::{self, CompressOptions};
///
/// let raw = codec::compress(b"hello", &CompressOptions::default())?;
/// assert_eq!(&raw[..7], &[0x78, 0x01, 0x01, 0x05, 0x00, 0xFA, 0xFF]);
/// assert_eq!(&raw[7..12], b"hello");
/// assert_eq!(&raw[12..], &[0x06, 0x2C, 0x02, 0x15]);
/// # Ok::<(), npk_zlib::Error>(())
/// ```
pub fn compress(plain: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    options.validate()?;

    let block_size = options.block_size;
    let block_count = plain.len().div_ceil(block_size).max(1);
    let mut out =
        Vec::with_capacity(ZLIB_HEADER.len() + plain.len() + block_count * 5 + TRAILER_LEN);
    out.extend_from_slice(&ZLIB_HEADER);

    let mut accumulator = Adler32::new();

    let mut chunks = plain.chunks(block_size).peekable();
    if chunks.peek().is_none() {
        let framed = compress_chunk(&[], options.level)?;
        check_stored_layout(&framed, 0)?;
        out.extend_from_slice(&framed[BLOCK_HEADER_OFFSET..framed.len() - TRAILER_LEN]);
    }

    while let Some(chunk) = chunks.next() {
        let framed = compress_chunk(chunk, options.level)?;
        check_stored_layout(&framed, chunk.len())?;
        let body_end = framed.len() - TRAILER_LEN;

        if chunks.peek().is_some() {
            out.push(NOT_LAST_MARKER);
            out.extend_from_slice(&framed[BLOCK_HEADER_OFFSET + 1..body_end]);
        } else {
            out.extend_from_slice(&framed[BLOCK_HEADER_OFFSET..body_end]);
        }

        accumulator.update(&framed[STORED_DATA_OFFSET..body_end]);
    }

    let checksum = accumulator.finalize();
    out.extend_from_slice(&checksum.to_be_bytes());

    log::debug!(
        "spliced {} bytes into {} block(s), {} bytes, checksum {:#010x}",
        plain.len(),
        block_count,
        out.len(),
        checksum
    );

    Ok(out)
}

/// Verifies that `framed` is one final stored block of `len` bytes.
fn check_stored_layout(framed: &[u8], len: usize) -> Result<()> {
    if framed.len() != STORED_DATA_OFFSET + len + TRAILER_LEN {
        return Err(Error::UnexpectedBlockLayout {
            reason: format!(
                "{} byte chunk compressed to {} bytes, expected {}",
                len,
                framed.len(),
                STORED_DATA_OFFSET + len + TRAILER_LEN
            ),
        });
    }
    if framed[..BLOCK_HEADER_OFFSET] != ZLIB_HEADER {
        return Err(Error::UnexpectedBlockLayout {
            reason: format!("zlib header {:02x} {:02x}", framed[0], framed[1]),
        });
    }
    if framed[BLOCK_HEADER_OFFSET] & 0x07 != 0x01 {
        return Err(Error::UnexpectedBlockLayout {
            reason: format!(
                "block header {:#04x} is not a final stored block",
                framed[BLOCK_HEADER_OFFSET]
            ),
        });
    }
    Ok(())
}
