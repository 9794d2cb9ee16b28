//! A single packed filesystem object.

use std::cmp::Ordering;
use std::iter;

use crate::timestamp::Timestamps;
use crate::{Error, Result};

use super::mode::FileMode;

/// Size of the fixed record header; the name starts right after it.
pub const HEADER_LEN: usize = 30;

const MODE_OFFSET: usize = 0;
const RESERVED1_OFFSET: usize = 2;
const TIMESTAMPS_OFFSET: usize = 8;
const RESERVED2_OFFSET: usize = 20;
const PAYLOAD_LEN_OFFSET: usize = 24;
const NAME_LEN_OFFSET: usize = 28;

/// One filesystem object as stored in the decompressed package payload.
///
/// ```text
/// | mode | reserved1 (3 x u16) | timestamps (3 x u32) | reserved2 (u32) |
/// | payload_len (u32) | name_len (u16) | name[name_len] | payload[payload_len] |
/// ```
///
/// All integers are little-endian. The buffer always holds exactly
/// `30 + name_len + payload_len` bytes: buffers that disagree with their
/// header are zero-padded or truncated when constructed, and every setter
/// keeps the length in step with the header.
///
/// # Example
///
/// ```rust
/// use npk_zlib::record::{FileMode, ObjectRecord};
///
/// let mut record = ObjectRecord::new();
/// record.set_mode(FileMode::regular(0o644).bits());
/// record.set_name("boot/kernel")?;
/// record.set_payload(b"\x7fELF")?;
///
/// assert_eq!(record.full_len(), 30 + 11 + 4);
/// assert_eq!(record.name()?, "boot/kernel");
/// assert_eq!(record.payload(), b"\x7fELF");
/// # Ok::<(), npk_zlib::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectRecord {
    data: Vec<u8>,
}

impl Default for ObjectRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObjectRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRecord")
            .field("mode", &self.file_mode())
            .field("name", &String::from_utf8_lossy(self.name_bytes()))
            .field("payload_len", &self.payload_len())
            .field("full_len", &self.full_len())
            .finish()
    }
}

impl ObjectRecord {
    /// Creates an all-zero record with an empty name and payload.
    pub fn new() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Creates a record from its binary form, repairing the length.
    ///
    /// A buffer shorter than its header declares is zero-padded; a longer one
    /// is truncated. Both cases are logged as warnings.
    pub fn from_bytes(binary: impl Into<Vec<u8>>) -> Self {
        let mut record = Self {
            data: binary.into(),
        };
        record.repair_len();
        record
    }

    /// Creates a record with the given mode, name and payload.
    ///
    /// # Errors
    ///
    /// Fails if the name is not ASCII or a length does not fit its field.
    pub fn create(mode: FileMode, name: &str, payload: &[u8]) -> Result<Self> {
        let mut record = Self::new();
        record.set_mode(mode.bits());
        record.set_name(name)?;
        record.set_payload(payload)?;
        Ok(record)
    }

    fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    fn u32_at(&self, offset: usize) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.data[offset..offset + 4]);
        u32::from_le_bytes(buf)
    }

    fn put_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Brings the buffer length in line with the header.
    fn repair_len(&mut self) {
        let actual = self.data.len();
        if actual < HEADER_LEN {
            self.data.resize(HEADER_LEN, 0);
            if actual != 0 {
                log::warn!(
                    "object record data too short for header: {} of {} bytes",
                    actual,
                    HEADER_LEN
                );
            }
        }

        let actual = self.data.len();
        let declared = self.declared_len();
        match actual.cmp(&declared) {
            Ordering::Equal => {}
            Ordering::Less => {
                log::warn!(
                    "object record data too short for name + payload: {} of {} bytes, zero-padding",
                    actual,
                    declared
                );
                self.data.resize(declared, 0);
            }
            Ordering::Greater => {
                log::warn!(
                    "object record data too long for name + payload: {} of {} bytes, truncating",
                    actual,
                    declared
                );
                self.data.truncate(declared);
            }
        }
    }

    /// Raw mode bits.
    pub fn mode(&self) -> u16 {
        self.u16_at(MODE_OFFSET)
    }

    /// Sets the raw mode bits.
    pub fn set_mode(&mut self, mode: u16) {
        self.put_u16(MODE_OFFSET, mode);
    }

    /// Mode as file type and permissions.
    pub fn file_mode(&self) -> FileMode {
        FileMode::from_bits(self.mode())
    }

    /// The three 16-bit words after the mode, expected to be zero.
    pub fn reserved1(&self) -> [u16; 3] {
        let words = [
            self.u16_at(RESERVED1_OFFSET),
            self.u16_at(RESERVED1_OFFSET + 2),
            self.u16_at(RESERVED1_OFFSET + 4),
        ];
        if words != [0, 0, 0] {
            log::warn!(
                "unexpected data in reserved words at offset {}: {:?}",
                RESERVED1_OFFSET,
                words
            );
        }
        words
    }

    /// The timestamp values.
    pub fn timestamps(&self) -> Timestamps {
        Timestamps::new([
            self.u32_at(TIMESTAMPS_OFFSET),
            self.u32_at(TIMESTAMPS_OFFSET + 4),
            self.u32_at(TIMESTAMPS_OFFSET + 8),
        ])
    }

    /// Sets the timestamp values.
    pub fn set_timestamps(&mut self, timestamps: Timestamps) {
        for (i, value) in timestamps.raw().into_iter().enumerate() {
            self.put_u32(TIMESTAMPS_OFFSET + i * 4, value);
        }
    }

    /// The 32-bit word before the lengths, expected to be zero.
    pub fn reserved2(&self) -> u32 {
        let word = self.u32_at(RESERVED2_OFFSET);
        if word != 0 {
            log::warn!(
                "unexpected data in reserved word at offset {}: {:#010x}",
                RESERVED2_OFFSET,
                word
            );
        }
        word
    }

    /// Declared payload length.
    pub fn payload_len(&self) -> u32 {
        self.u32_at(PAYLOAD_LEN_OFFSET)
    }

    /// Rewrites the payload length field and pads or truncates the payload to match.
    pub fn set_payload_len(&mut self, payload_len: u32) {
        self.put_u32(PAYLOAD_LEN_OFFSET, payload_len);
        self.repair_len();
    }

    /// Declared name length.
    pub fn name_len(&self) -> u16 {
        self.u16_at(NAME_LEN_OFFSET)
    }

    /// Resizes the name region in place.
    ///
    /// Shrinking drops the tail of the name; growing appends zero bytes to it.
    /// The payload moves with the end of the name and is left unchanged.
    pub fn set_name_len(&mut self, name_len: u16) {
        let old = usize::from(self.name_len());
        let new = usize::from(name_len);
        let name_end = HEADER_LEN + old;

        match new.cmp(&old) {
            Ordering::Equal => return,
            Ordering::Less => {
                self.data.drain(HEADER_LEN + new..name_end);
            }
            Ordering::Greater => {
                self.data
                    .splice(name_end..name_end, iter::repeat_n(0u8, new - old));
            }
        }
        self.put_u16(NAME_LEN_OFFSET, name_len);
    }

    /// Raw name bytes.
    pub fn name_bytes(&self) -> &[u8] {
        &self.data[HEADER_LEN..HEADER_LEN + usize::from(self.name_len())]
    }

    /// The name as ASCII text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name contains a non-ASCII byte.
    pub fn name(&self) -> Result<&str> {
        let bytes = self.name_bytes();
        check_ascii(bytes)?;
        std::str::from_utf8(bytes).map_err(|e| Error::InvalidName {
            position: e.valid_up_to(),
            byte: bytes[e.valid_up_to()],
        })
    }

    /// Replaces the name, resizing the name region first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for non-ASCII names and
    /// [`Error::NameTooLong`] for names over 65535 bytes. The record is left
    /// untouched on error.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let bytes = name.as_bytes();
        check_ascii(bytes)?;
        let name_len =
            u16::try_from(bytes.len()).map_err(|_| Error::NameTooLong { len: bytes.len() })?;

        self.set_name_len(name_len);
        self.data[HEADER_LEN..HEADER_LEN + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn payload_offset(&self) -> usize {
        HEADER_LEN + usize::from(self.name_len())
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        let start = self.payload_offset();
        &self.data[start..start + self.payload_len() as usize]
    }

    /// Replaces the payload, updating the payload length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] for payloads over `u32::MAX` bytes.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<()> {
        let payload_len = u32::try_from(payload.len())
            .map_err(|_| Error::PayloadTooLarge { len: payload.len() })?;

        self.put_u32(PAYLOAD_LEN_OFFSET, payload_len);
        let start = self.payload_offset();
        self.data.splice(start.., payload.iter().copied());
        Ok(())
    }

    /// Length the header declares: `30 + name_len + payload_len`.
    pub fn declared_len(&self) -> usize {
        HEADER_LEN + usize::from(self.name_len()) + self.payload_len() as usize
    }

    /// Length of the binary form.
    pub fn full_len(&self) -> usize {
        self.data.len()
    }

    /// The binary form.
    pub fn binary(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the record and returns its binary form.
    pub fn into_binary(self) -> Vec<u8> {
        self.data
    }

    /// Human-readable summary lines.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("obj type: {}", self.file_mode()),
            format!("obj timestamps: {}", self.timestamps()),
            format!("obj payload len: {}", self.payload_len()),
            format!("obj name: {}", String::from_utf8_lossy(self.name_bytes())),
        ]
    }
}

/// Total record length declared by a possibly short header.
///
/// Missing header bytes count as zero.
pub(crate) fn declared_len_of(header: &[u8]) -> usize {
    let byte = |i: usize| header.get(i).copied().unwrap_or(0);
    let payload_len = u32::from_le_bytes([
        byte(PAYLOAD_LEN_OFFSET),
        byte(PAYLOAD_LEN_OFFSET + 1),
        byte(PAYLOAD_LEN_OFFSET + 2),
        byte(PAYLOAD_LEN_OFFSET + 3),
    ]);
    let name_len = u16::from_le_bytes([byte(NAME_LEN_OFFSET), byte(NAME_LEN_OFFSET + 1)]);
    HEADER_LEN + usize::from(name_len) + payload_len as usize
}

fn check_ascii(bytes: &[u8]) -> Result<()> {
    match bytes.iter().position(|b| !b.is_ascii()) {
        Some(position) => Err(Error::InvalidName {
            position,
            byte: bytes[position],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FileType;

    fn header(payload_len: u32, name_len: u16) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[PAYLOAD_LEN_OFFSET..PAYLOAD_LEN_OFFSET + 4]
            .copy_from_slice(&payload_len.to_le_bytes());
        data[NAME_LEN_OFFSET..NAME_LEN_OFFSET + 2].copy_from_slice(&name_len.to_le_bytes());
        data
    }

    #[test]
    fn test_new_is_zeroed_header() {
        let record = ObjectRecord::new();
        assert_eq!(record.binary(), &[0u8; HEADER_LEN]);
        assert_eq!(record.full_len(), HEADER_LEN);
        assert_eq!(record.name().unwrap(), "");
        assert!(record.payload().is_empty());
    }

    #[test]
    fn test_boot_directory_length() {
        let mut record = ObjectRecord::new();
        record.set_name("boot").unwrap();
        record.set_payload(b"").unwrap();
        assert_eq!(record.full_len(), 34);
        assert_eq!(record.declared_len(), 34);
    }

    #[test]
    fn test_field_layout() {
        let mut record = ObjectRecord::new();
        record.set_mode(0o100755);
        record.set_timestamps(Timestamps::new([0x11223344, 0x55667788, 0x99AABBCC]));
        record.set_name("ab").unwrap();
        record.set_payload(b"xyz").unwrap();

        let bin = record.binary();
        assert_eq!(&bin[0..2], &0o100755u16.to_le_bytes());
        assert_eq!(&bin[2..8], &[0; 6]);
        assert_eq!(&bin[8..12], &[0x44, 0x33, 0x22, 0x11]);
        assert_eq!(&bin[16..20], &[0xCC, 0xBB, 0xAA, 0x99]);
        assert_eq!(&bin[20..24], &[0; 4]);
        assert_eq!(&bin[24..28], &[3, 0, 0, 0]);
        assert_eq!(&bin[28..30], &[2, 0]);
        assert_eq!(&bin[30..32], b"ab");
        assert_eq!(&bin[32..35], b"xyz");
    }

    #[test]
    fn test_grow_name_len_pads_and_keeps_payload() {
        let mut record = ObjectRecord::new();
        record.set_name("boot").unwrap();
        record.set_payload(b"PAYLOAD").unwrap();

        record.set_name_len(8);
        assert_eq!(record.name_bytes(), b"boot\0\0\0\0");
        assert_eq!(record.payload(), b"PAYLOAD");
        assert_eq!(record.full_len(), 30 + 8 + 7);
    }

    #[test]
    fn test_shrink_name_len_keeps_payload() {
        let mut record = ObjectRecord::new();
        record.set_name("boot/kernel").unwrap();
        record.set_payload(b"PAYLOAD").unwrap();

        record.set_name_len(4);
        assert_eq!(record.name().unwrap(), "boot");
        assert_eq!(record.payload(), b"PAYLOAD");
        assert_eq!(record.full_len(), 30 + 4 + 7);
    }

    #[test]
    fn test_set_name_replaces_longer_name() {
        let mut record = ObjectRecord::new();
        record.set_name("UPGRADED").unwrap();
        record.set_payload(&[0u8; 0x20]).unwrap();
        record.set_name("bin").unwrap();
        assert_eq!(record.name().unwrap(), "bin");
        assert_eq!(record.payload(), &[0u8; 0x20]);
        assert_eq!(record.full_len(), record.declared_len());
    }

    #[test]
    fn test_set_payload_shrinks_and_grows() {
        let mut record = ObjectRecord::new();
        record.set_name("f").unwrap();
        record.set_payload(b"0123456789").unwrap();
        record.set_payload(b"ab").unwrap();
        assert_eq!(record.payload(), b"ab");
        assert_eq!(record.full_len(), 33);
        record.set_payload(b"abcdef").unwrap();
        assert_eq!(record.payload(), b"abcdef");
        assert_eq!(record.full_len(), 37);
    }

    #[test]
    fn test_non_ascii_name_rejected() {
        let mut record = ObjectRecord::new();
        record.set_name("ok").unwrap();
        let err = record.set_name("caf\u{e9}").unwrap_err();
        assert!(matches!(err, Error::InvalidName { position: 3, byte: 0xC3 }));
        assert_eq!(record.name().unwrap(), "ok");
    }

    #[test]
    fn test_non_ascii_stored_name_is_fatal() {
        let mut data = header(0, 2);
        data.extend_from_slice(&[b'a', 0xFF]);
        let record = ObjectRecord::from_bytes(data);
        assert!(matches!(
            record.name(),
            Err(Error::InvalidName { position: 1, byte: 0xFF })
        ));
        assert!(record.describe()[3].starts_with("obj name: a"));
    }

    #[test]
    fn test_name_too_long() {
        let mut record = ObjectRecord::new();
        let name = "a".repeat(usize::from(u16::MAX) + 1);
        assert!(matches!(
            record.set_name(&name),
            Err(Error::NameTooLong { len }) if len == name.len()
        ));
    }

    #[test]
    fn test_short_payload_is_zero_padded() {
        let mut data = header(16, 1);
        data.push(b'x');
        data.extend_from_slice(b"abc");
        let record = ObjectRecord::from_bytes(data);
        assert_eq!(record.full_len(), 30 + 1 + 16);
        assert_eq!(&record.payload()[..3], b"abc");
        assert!(record.payload()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_buffer_is_truncated() {
        let mut data = header(2, 1);
        data.extend_from_slice(b"xAB-trailing-junk");
        let record = ObjectRecord::from_bytes(data);
        assert_eq!(record.full_len(), 33);
        assert_eq!(record.payload(), b"AB");
    }

    #[test]
    fn test_short_header_is_padded() {
        let record = ObjectRecord::from_bytes(vec![0xED, 0x41, 0, 0]);
        assert_eq!(record.full_len(), HEADER_LEN);
        assert_eq!(record.mode(), 0o40755);
        assert!(record.file_mode().is_dir());
    }

    #[test]
    fn test_set_payload_len_repairs() {
        let mut record = ObjectRecord::create(FileMode::regular(0o644), "f", b"abcd").unwrap();
        record.set_payload_len(2);
        assert_eq!(record.payload(), b"ab");
        assert_eq!(record.full_len(), 33);
        record.set_payload_len(5);
        assert_eq!(record.payload(), b"ab\0\0\0");
    }

    #[test]
    fn test_reserved_fields() {
        let mut data = header(0, 0);
        data[RESERVED1_OFFSET] = 1;
        data[RESERVED2_OFFSET + 3] = 0x80;
        let record = ObjectRecord::from_bytes(data);
        assert_eq!(record.reserved1(), [1, 0, 0]);
        assert_eq!(record.reserved2(), 0x8000_0000);
        assert_eq!(ObjectRecord::new().reserved1(), [0, 0, 0]);
        assert_eq!(ObjectRecord::new().reserved2(), 0);
    }

    #[test]
    fn test_describe() {
        let mut record = ObjectRecord::create(FileMode::directory(0o755), "boot", b"").unwrap();
        record.set_timestamps(Timestamps::new([1, 2, 3]));
        assert_eq!(
            record.describe(),
            vec![
                "obj type: 0o40755".to_string(),
                "obj timestamps: (1, 2, 3)".to_string(),
                "obj payload len: 0".to_string(),
                "obj name: boot".to_string(),
            ]
        );
        assert_eq!(record.file_mode().file_type(), FileType::Directory);
    }

    #[test]
    fn test_declared_len_of_short_header() {
        assert_eq!(declared_len_of(&[]), HEADER_LEN);
        assert_eq!(declared_len_of(&header(5, 3)), HEADER_LEN + 8);
        assert_eq!(declared_len_of(&header(5, 3)[..26]), HEADER_LEN + 5);
    }
}
