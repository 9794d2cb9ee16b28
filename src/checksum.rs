//! Checksum computation utilities.
//!
//! This module provides the Adler-32 checksum used as the trailer of
//! zlib-wrapped streams.
//!
//! # Adler-32
//!
//! Adler-32 keeps two 16-bit sums modulo 65521. Its state is fully described
//! by the 32-bit value it produces, so an accumulator can be resumed from any
//! previously finalized value with [`Adler32::with_initial`].
//!
//! # Example
//!
//! ```rust
//! use npk_zlib::checksum::{Adler32, Checksum};
//!
//! let mut adler = Adler32::new();
//! adler.update(b"Wiki");
//! adler.update(b"pedia");
//! assert_eq!(adler.finalize(), 0x11E6_0398);
//!
//! // One-shot computation
//! assert_eq!(Adler32::compute(b"Wikipedia"), 0x11E6_0398);
//! ```

/// Common trait for checksum computation.
pub trait Checksum: Default + Clone {
    /// The output type of this checksum.
    type Output: Copy + Eq + std::fmt::Debug;

    /// Creates a new checksum calculator.
    fn new() -> Self;

    /// Updates the checksum with additional data.
    fn update(&mut self, data: &[u8]);

    /// Finishes the checksum computation and returns the value.
    fn finalize(&self) -> Self::Output;

    /// Resets the checksum to its initial state.
    fn reset(&mut self);

    /// Computes the checksum of a single slice in one call.
    fn compute(data: &[u8]) -> Self::Output {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Adler-32 checksum calculator.
///
/// The empty-input value is `1`.
///
/// # Example
///
/// ```rust
/// use npk_zlib::checksum::{Adler32, Checksum};
///
/// let adler = Adler32::compute(b"abc");
/// assert_eq!(adler, 0x024D_0127);
/// ```
#[derive(Clone)]
pub struct Adler32 {
    hasher: adler2::Adler32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Adler32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adler32")
            .field("current", &format_args!("{:#010x}", self.hasher.checksum()))
            .finish()
    }
}

impl Checksum for Adler32 {
    type Output = u32;

    fn new() -> Self {
        Self {
            hasher: adler2::Adler32::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.write_slice(data);
    }

    fn finalize(&self) -> u32 {
        self.hasher.checksum()
    }

    fn reset(&mut self) {
        self.hasher = adler2::Adler32::new();
    }
}

impl Adler32 {
    /// Creates an Adler-32 that continues from a previously finalized value.
    pub fn with_initial(initial: u32) -> Self {
        Self {
            hasher: adler2::Adler32::from_checksum(initial),
        }
    }
}
