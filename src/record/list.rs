//! Ordered sequence of object records scanned from a decompressed blob.

use std::ops::{Index, IndexMut};

use super::object::{ObjectRecord, declared_len_of};

/// The records of a decompressed payload, in stored order.
///
/// Concatenating the records' binaries gives back the scanned blob as long as
/// no record was changed, and the edited blob afterwards.
///
/// # Example
///
/// ```rust
/// use npk_zlib::record::{FileMode, ObjectList, ObjectRecord};
///
/// let mut list = ObjectList::new();
/// list.push(ObjectRecord::create(FileMode::directory(0o755), "boot", b"")?);
/// list.push(ObjectRecord::create(FileMode::regular(0o755), "boot/kernel", b"ELF")?);
///
/// let blob = list.flatten();
/// let scanned = ObjectList::scan(&blob);
/// assert_eq!(scanned.len(), 2);
/// assert_eq!(scanned[1].name()?, "boot/kernel");
/// assert_eq!(scanned.flatten(), blob);
/// # Ok::<(), npk_zlib::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectList {
    records: Vec<ObjectRecord>,
}

impl ObjectList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `blob` into records.
    ///
    /// Each record's extent is taken from the payload and name lengths in its
    /// header. A final record that runs past the end of the blob is
    /// zero-padded to its declared length.
    pub fn scan(blob: &[u8]) -> Self {
        let mut records = Vec::new();
        let mut offset = 0;

        while offset < blob.len() {
            let rest = &blob[offset..];
            let record_len = declared_len_of(rest);
            if record_len > rest.len() {
                log::warn!(
                    "object record at offset {:#x} declares {} bytes, only {} remain",
                    offset,
                    record_len,
                    rest.len()
                );
            }
            records.push(ObjectRecord::from_bytes(&rest[..record_len.min(rest.len())]));
            offset += record_len;
        }

        log::debug!("scanned {} object records from {} bytes", records.len(), blob.len());
        Self { records }
    }

    /// Concatenates the binaries of all records in order.
    pub fn flatten(&self) -> Vec<u8> {
        let total = self.records.iter().map(ObjectRecord::full_len).sum();
        let mut blob = Vec::with_capacity(total);
        for record in &self.records {
            blob.extend_from_slice(record.binary());
        }
        blob
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&ObjectRecord> {
        self.records.get(index)
    }

    /// Mutable record at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ObjectRecord> {
        self.records.get_mut(index)
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectRecord> {
        self.records.iter()
    }

    /// Iterates mutably over the records.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ObjectRecord> {
        self.records.iter_mut()
    }

    /// Iterates over `(index, record)` pairs.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &ObjectRecord)> {
        self.records.iter().enumerate()
    }

    /// First record whose name equals `name`.
    pub fn find(&self, name: &str) -> Option<&ObjectRecord> {
        self.records
            .iter()
            .find(|record| record.name_bytes() == name.as_bytes())
    }

    /// Mutable first record whose name equals `name`.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut ObjectRecord> {
        self.records
            .iter_mut()
            .find(|record| record.name_bytes() == name.as_bytes())
    }

    /// Appends a record.
    pub fn push(&mut self, record: ObjectRecord) {
        self.records.push(record);
    }

    /// Removes and returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> ObjectRecord {
        self.records.remove(index)
    }

    /// Keeps only the records for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&ObjectRecord) -> bool) {
        self.records.retain(keep);
    }

    /// Consumes the list and returns the records.
    pub fn into_records(self) -> Vec<ObjectRecord> {
        self.records
    }
}

impl Index<usize> for ObjectList {
    type Output = ObjectRecord;

    fn index(&self, index: usize) -> &ObjectRecord {
        &self.records[index]
    }
}

impl IndexMut<usize> for ObjectList {
    fn index_mut(&mut self, index: usize) -> &mut ObjectRecord {
        &mut self.records[index]
    }
}

impl From<Vec<ObjectRecord>> for ObjectList {
    fn from(records: Vec<ObjectRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ObjectRecord> for ObjectList {
    fn from_iter<I: IntoIterator<Item = ObjectRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ObjectList {
    type Item = ObjectRecord;
    type IntoIter = std::vec::IntoIter<ObjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a ObjectRecord;
    type IntoIter = std::slice::Iter<'a, ObjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
