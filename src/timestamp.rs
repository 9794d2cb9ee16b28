//! Object record timestamps.
//!
//! Each archive object record carries three 32-bit timestamp values at byte
//! offset 8. Which of them is the creation, access, or modification time is
//! not known, so they are kept in their stored order. Observed values look
//! like Unix seconds, which is what [`Timestamps::as_system_time`] assumes.
//!
//! # Example
//!
//! ```rust
//! use npk_zlib::Timestamps;
//! use std::time::{Duration, SystemTime};
//!
//! let ts = Timestamps::new([0, 60, 3600]);
//! assert_eq!(ts.get(2), Some(3600));
//! assert_eq!(
//!     ts.as_system_time(1),
//!     Some(SystemTime::UNIX_EPOCH + Duration::from_secs(60))
//! );
//! assert_eq!(ts.to_string(), "(0, 60, 3600)");
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Number of timestamp values stored per record.
pub const TIMESTAMP_COUNT: usize = 3;

/// The three raw timestamp values of an object record, in stored order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timestamps {
    values: [u32; TIMESTAMP_COUNT],
}

impl Timestamps {
    /// Creates timestamps from raw values.
    #[inline]
    pub const fn new(values: [u32; TIMESTAMP_COUNT]) -> Self {
        Self { values }
    }

    /// Creates timestamps with all three values set to the same Unix time.
    ///
    /// Returns `None` for times before the epoch or past the 32-bit range.
    pub fn uniform(time: SystemTime) -> Option<Self> {
        let secs = time.duration_since(UNIX_EPOCH).ok()?.as_secs();
        let secs = u32::try_from(secs).ok()?;
        Some(Self::new([secs; TIMESTAMP_COUNT]))
    }

    /// Returns the raw values.
    #[inline]
    pub const fn raw(&self) -> [u32; TIMESTAMP_COUNT] {
        self.values
    }

    /// Returns the raw value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Interprets the value at `index` as Unix seconds.
    pub fn as_system_time(&self, index: usize) -> Option<SystemTime> {
        let secs = self.get(index)?;
        UNIX_EPOCH.checked_add(Duration::from_secs(u64::from(secs)))
    }
}

impl From<[u32; TIMESTAMP_COUNT]> for Timestamps {
    fn from(values: [u32; TIMESTAMP_COUNT]) -> Self {
        Self::new(values)
    }
}

impl std::fmt::Display for Timestamps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.values;
        write!(f, "({}, {}, {})", a, b, c)
    }
}
