//! Error types for package codec operations.
//!
//! This module provides the [`Error`] enum which represents all failure modes
//! of the compressed-stream codec and the archive object records, along with
//! a convenient [`Result<T>`] type alias.
//!
//! Length inconsistencies inside object records and non-zero reserved fields
//! are not errors: they are repaired or reported through the `log` facade.
//! Only the conditions below are surfaced to callers.
//!
//! # Example
//!
//! ```rust
//! use npk_zlib::{Error, codec};
//!
//! match codec::decompress(b"\x78\x01\xff\xff") {
//!     Ok(decoded) => println!("{} bytes, eof={}", decoded.data.len(), decoded.eof),
//!     Err(Error::CorruptStream { offset, reason }) => {
//!         eprintln!("stream corrupt at {offset:#x}: {reason}");
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

/// The main error type for package codec operations.
///
/// | Category | Variants |
/// |----------|----------|
/// | Stream | [`CorruptStream`][Self::CorruptStream], [`UnexpectedBlockLayout`][Self::UnexpectedBlockLayout], [`Deflate`][Self::Deflate] |
/// | Record fields | [`InvalidName`][Self::InvalidName], [`NameTooLong`][Self::NameTooLong], [`PayloadTooLarge`][Self::PayloadTooLarge] |
/// | Options | [`UnsupportedLevel`][Self::UnsupportedLevel], [`InvalidBlockSize`][Self::InvalidBlockSize] |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The compressed stream could not be decoded.
    ///
    /// Returned when the zlib decoder rejects the header, a block, or the
    /// trailing checksum, and by [`Decompressed::complete`] when the stream
    /// ended before its final block.
    ///
    /// A stream that decodes cleanly but is followed by extra bytes is *not*
    /// an error; see [`Decompressed::trailing_len`].
    ///
    /// [`Decompressed::complete`]: crate::codec::Decompressed::complete
    /// [`Decompressed::trailing_len`]: crate::codec::Decompressed::trailing_len
    #[error("corrupt stream at offset {offset:#x}: {reason}")]
    CorruptStream {
        /// Number of input bytes consumed when the failure was detected.
        offset: u64,
        /// A description of the failure.
        reason: String,
    },

    /// An object name contains a byte outside the ASCII range.
    #[error("invalid object name: non-ASCII byte {byte:#04x} at position {position}")]
    InvalidName {
        /// Position of the offending byte within the name.
        position: usize,
        /// The offending byte.
        byte: u8,
    },

    /// An object name does not fit the 16-bit name length field.
    #[error("object name too long: {len} bytes (max {})", u16::MAX)]
    NameTooLong {
        /// Length of the rejected name.
        len: usize,
    },

    /// An object payload does not fit the 32-bit payload length field.
    #[error("object payload too large: {len} bytes (max {})", u32::MAX)]
    PayloadTooLarge {
        /// Length of the rejected payload.
        len: usize,
    },

    /// The requested compression level cannot be spliced.
    ///
    /// Only level 0 produces stored blocks whose first byte is a complete
    /// block header.
    #[error("unsupported compression level {level}: only level 0 can be spliced")]
    UnsupportedLevel {
        /// The rejected level.
        level: u8,
    },

    /// The requested block size cannot be spliced.
    #[error("invalid block size {block_size}: must be 1..=65535")]
    InvalidBlockSize {
        /// The rejected block size.
        block_size: usize,
    },

    /// A single-chunk stream from the deflate backend did not have the
    /// stored-block layout the splice relies on.
    #[error("unexpected block layout: {reason}")]
    UnexpectedBlockLayout {
        /// What was found instead.
        reason: String,
    },

    /// The deflate backend failed.
    #[error("deflate error: {0}")]
    Deflate(#[from] flate2::CompressError),
}

/// Name under which decode failures are commonly referred to.
pub type DecodeError = Error;

impl Error {
    /// Returns true if this error means the compressed stream itself is bad.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(self, Self::CorruptStream { .. })
    }

    /// Returns true if this error was caused by rejected compression options.
    pub fn is_invalid_options(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLevel { .. } | Self::InvalidBlockSize { .. }
        )
    }
}

/// A specialized Result type for package codec operations.
pub type Result<T> = std::result::Result<T, Error>;
