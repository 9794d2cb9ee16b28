//! Spliced zlib stream codec.
//!
//! Package payloads of the compressed-data container carry a zlib stream that
//! was not produced by a single deflate run. The plain blob is cut into chunks,
//! each chunk is compressed on its own as a stored (level 0) stream, and the
//! resulting blocks are stitched together behind one `78 01` header and in
//! front of one Adler-32 trailer. A standard zlib decoder reads the result as
//! one continuous stream.
//!
//! Layout of a spliced stream:
//!
//! | Part | Size | Content |
//! |------|------|---------|
//! | header | 2 | `78 01` |
//! | non-final block | 1 + 4 + n | `00`, LEN/NLEN, n stored bytes |
//! | final block | 5 + n | `01`, LEN/NLEN, n stored bytes |
//! | trailer | 4 | big-endian checksum accumulator |
//!
//! # Example
//!
//! ```rust
//! use npk_zlib::codec::{self, CompressOptions};
//!
//! let plain = vec![0x41u8; 100_000];
//! let raw = codec::compress(&plain, &CompressOptions::default())?;
//! assert_eq!(&raw[..2], &[0x78, 0x01]);
//!
//! let decoded = codec::decompress(&raw)?;
//! assert!(decoded.eof);
//! assert_eq!(decoded.data, plain);
//! # Ok::<(), npk_zlib::Error>(())
//! ```

mod deflate;
mod inflate;
mod splice;

pub use inflate::decompress;
pub use splice::compress;

use crate::{Error, Result};

/// Fixed zlib header: deflate, 32 KiB window, no preset dictionary, level 0 hint.
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

/// Size of the big-endian checksum trailer.
pub const TRAILER_LEN: usize = 4;

/// Default chunk size used by the firmware packaging tools.
pub const DEFAULT_BLOCK_SIZE: usize = 0x8000;

/// Largest chunk that still fits a single stored block.
pub const MAX_BLOCK_SIZE: usize = 0xFFFF;

/// Options controlling how a plain blob is spliced into a stream.
///
/// # Example
///
/// ```rust
/// use npk_zlib::codec::CompressOptions;
///
/// let opts = CompressOptions::new().block_size(0x4000)?;
/// assert_eq!(opts.block_size, 0x4000);
/// assert_eq!(opts.level, 0);
///
/// assert!(CompressOptions::new().level(6).is_err());
/// # Ok::<(), npk_zlib::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Size of each independently compressed chunk (default `0x8000`).
    pub block_size: usize,
    /// Deflate level for each chunk (default 0, the only spliceable level).
    pub level: u8,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            level: 0,
        }
    }
}

impl CompressOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBlockSize`] unless `1 <= block_size <= 0xFFFF`.
    pub fn block_size(mut self, block_size: usize) -> Result<Self> {
        if !(1..=MAX_BLOCK_SIZE).contains(&block_size) {
            return Err(Error::InvalidBlockSize { block_size });
        }
        self.block_size = block_size;
        Ok(self)
    }

    /// Sets the compression level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLevel`] for anything but 0.
    pub fn level(mut self, level: u8) -> Result<Self> {
        if level != 0 {
            return Err(Error::UnsupportedLevel { level });
        }
        self.level = level;
        Ok(self)
    }

    /// Checks options that were built as a struct literal.
    pub fn validate(&self) -> Result<()> {
        Self::new().block_size(self.block_size)?.level(self.level)?;
        Ok(())
    }
}

/// Result of decoding a compressed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decompressed {
    /// Decoded plain bytes.
    pub data: Vec<u8>,
    /// Whether the decoder reached the final block and a matching trailer.
    pub eof: bool,
    /// Bytes of input the decoder consumed.
    pub consumed: usize,
    /// Bytes of input left over after the end of the stream.
    pub trailing_len: usize,
}

impl Decompressed {
    /// Returns the decoded bytes, requiring a terminated stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStream`] if the input ended before the final
    /// block and trailer were read. Its offset is the consumed input length.
    pub fn complete(self) -> Result<Vec<u8>> {
        if !self.eof {
            return Err(Error::CorruptStream {
                offset: self.consumed as u64,
                reason: "stream ended before final block".into(),
            });
        }
        Ok(self.data)
    }

    /// Human-readable summary lines.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("Uncompressed len: {}", self.data.len()),
            format!("Full decompress:  {}", self.eof),
            format!("Non-decompressed tail length: {}", self.trailing_len),
        ]
    }
}
