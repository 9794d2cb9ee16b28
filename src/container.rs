//! Package containers that carry payload bytes.
//!
//! A firmware package is a list of typed containers. Only the compressed-data
//! container transforms its payload; every other type is carried as opaque
//! bytes. Container framing and package assembly happen elsewhere; this module
//! only exposes the payload of each container through [`ContainerPayload`].
//!
//! # Example
//!
//! ```rust
//! use npk_zlib::codec::CompressOptions;
//! use npk_zlib::container::{Container, ContainerPayload, ZLIB_COMPRESSED_DATA, ZlibContainer};
//! use npk_zlib::record::{FileMode, ObjectList, ObjectRecord};
//!
//! let mut zlib = ZlibContainer::new();
//! let list: ObjectList = [ObjectRecord::create(FileMode::directory(0o755), "boot", b"")?]
//!     .into_iter()
//!     .collect();
//! zlib.commit_objects(&list, &CompressOptions::default())?;
//!
//! let container = Container::from_parts(ZLIB_COMPRESSED_DATA, zlib.payload().to_vec());
//! assert_eq!(container.type_tag(), ZLIB_COMPRESSED_DATA);
//! assert!(container.describe().iter().any(|line| line == "Uncompressed len: 34"));
//! # Ok::<(), npk_zlib::Error>(())
//! ```

use std::borrow::Cow;

use crate::Result;
use crate::codec::{self, CompressOptions, Decompressed};
use crate::record::ObjectList;

/// Type tag of the compressed-data container.
pub const ZLIB_COMPRESSED_DATA: u16 = 4;

/// Payload access shared by all container types.
pub trait ContainerPayload {
    /// Numeric container type.
    fn type_tag(&self) -> u16;

    /// Raw payload bytes.
    fn payload(&self) -> &[u8];

    /// Replaces the raw payload bytes.
    fn set_payload(&mut self, payload: Vec<u8>);

    /// Human-readable summary lines.
    fn describe(&self) -> Vec<String> {
        vec![
            format!("Cnt type: {}", self.type_tag()),
            format!("Payload len: {}", self.payload().len()),
        ]
    }
}

/// A container whose payload is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueContainer {
    tag: u16,
    payload: Vec<u8>,
}

impl OpaqueContainer {
    /// Creates an opaque container.
    pub fn new(tag: u16, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }
}

impl ContainerPayload for OpaqueContainer {
    fn type_tag(&self) -> u16 {
        self.tag
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }
}

/// The compressed-data container.
///
/// The decoded stream and the object list are computed on first use and kept
/// until the raw payload is replaced. Edits to a list obtained from
/// [`objects`](Self::objects) are not written back; pass the edited list to
/// [`commit_objects`](Self::commit_objects).
#[derive(Debug, Clone, Default)]
pub struct ZlibContainer {
    payload: Vec<u8>,
    decoded: Option<Decompressed>,
    objects: Option<ObjectList>,
}

impl ZlibContainer {
    /// Creates a container with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from a raw compressed payload.
    pub fn from_payload(payload: Vec<u8>) -> Self {
        Self {
            payload,
            decoded: None,
            objects: None,
        }
    }

    fn invalidate_caches(&mut self) {
        self.decoded = None;
        self.objects = None;
    }

    /// Returns true if the decoded stream is cached.
    pub fn is_decoded(&self) -> bool {
        self.decoded.is_some()
    }

    /// Decodes the payload, caching the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStream`](crate::Error::CorruptStream) if the
    /// payload is not a valid stream. Errors are not cached.
    pub fn decompressed(&mut self) -> Result<&Decompressed> {
        let decoded = match self.decoded.take() {
            Some(decoded) => decoded,
            None => codec::decompress(&self.payload)?,
        };
        Ok(self.decoded.insert(decoded))
    }

    /// Compresses `plain` into the payload.
    pub fn set_decompressed(&mut self, plain: &[u8], options: &CompressOptions) -> Result<()> {
        let payload = codec::compress(plain, options)?;
        self.set_payload(payload);
        Ok(())
    }

    /// Scans the decoded payload into object records, caching the result.
    pub fn objects(&mut self) -> Result<&ObjectList> {
        let objects = match self.objects.take() {
            Some(objects) => objects,
            None => ObjectList::scan(&self.decompressed()?.data),
        };
        Ok(self.objects.insert(objects))
    }

    /// Flattens `objects` and compresses them into the payload.
    pub fn commit_objects(
        &mut self,
        objects: &ObjectList,
        options: &CompressOptions,
    ) -> Result<()> {
        self.set_decompressed(&objects.flatten(), options)
    }
}

impl ContainerPayload for ZlibContainer {
    fn type_tag(&self) -> u16 {
        ZLIB_COMPRESSED_DATA
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
        self.invalidate_caches();
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Cnt type: {}", self.type_tag()),
            format!("Payload len: {}", self.payload.len()),
        ];
        let decoded = match &self.decoded {
            Some(decoded) => Ok(Cow::Borrowed(decoded)),
            None => codec::decompress(&self.payload).map(Cow::Owned),
        };
        match decoded {
            Ok(decoded) => lines.extend(decoded.describe()),
            Err(e) => lines.push(format!("Decompress failed: {}", e)),
        }
        lines
    }
}

/// A package container, dispatched by type tag.
#[derive(Debug, Clone)]
pub enum Container {
    /// Compressed filesystem payload.
    ZlibCompressedData(ZlibContainer),
    /// Any other container type.
    Opaque(OpaqueContainer),
}

impl Container {
    /// Builds the container variant for `tag`.
    pub fn from_parts(tag: u16, payload: Vec<u8>) -> Self {
        match tag {
            ZLIB_COMPRESSED_DATA => Self::ZlibCompressedData(ZlibContainer::from_payload(payload)),
            _ => Self::Opaque(OpaqueContainer::new(tag, payload)),
        }
    }

    /// The compressed-data container, if this is one.
    pub fn as_zlib(&self) -> Option<&ZlibContainer> {
        match self {
            Self::ZlibCompressedData(zlib) => Some(zlib),
            Self::Opaque(_) => None,
        }
    }

    /// The compressed-data container, mutably, if this is one.
    pub fn as_zlib_mut(&mut self) -> Option<&mut ZlibContainer> {
        match self {
            Self::ZlibCompressedData(zlib) => Some(zlib),
            Self::Opaque(_) => None,
        }
    }

    fn inner(&self) -> &dyn ContainerPayload {
        match self {
            Self::ZlibCompressedData(zlib) => zlib,
            Self::Opaque(opaque) => opaque,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ContainerPayload {
        match self {
            Self::ZlibCompressedData(zlib) => zlib,
            Self::Opaque(opaque) => opaque,
        }
    }
}

impl ContainerPayload for Container {
    fn type_tag(&self) -> u16 {
        self.inner().type_tag()
    }

    fn payload(&self) -> &[u8] {
        self.inner().payload()
    }

    fn set_payload(&mut self, payload: Vec<u8>) {
        self.inner_mut().set_payload(payload);
    }

    fn describe(&self) -> Vec<String> {
        self.inner().describe()
    }
}
