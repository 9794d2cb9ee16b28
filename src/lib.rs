//! # npk-zlib
//!
//! Codec for the compressed filesystem payload of firmware packages.
//!
//! The compressed-data container of a package holds a zlib stream that the
//! packaging tools build by splicing independently compressed chunks, and the
//! decompressed stream is a sequence of packed filesystem objects. This crate
//! converts between the two representations:
//!
//! ```text
//! payload bytes -> codec::decompress -> blob -> ObjectList::scan -> records
//! records -> edit -> ObjectList::flatten -> codec::compress -> payload bytes
//! ```
//!
//! ## Quick Start
//!
//! ### Building a Payload
//!
//! ```rust
//! use npk_zlib::codec::{self, CompressOptions};
//! use npk_zlib::record::{FileMode, ObjectList, ObjectRecord};
//!
//! fn main() -> npk_zlib::Result<()> {
//!     let mut list = ObjectList::new();
//!     list.push(ObjectRecord::create(FileMode::directory(0o755), "boot", b"")?);
//!     list.push(ObjectRecord::create(FileMode::regular(0o755), "boot/kernel", b"\x7fELF")?);
//!     list.push(ObjectRecord::create(FileMode::regular(0o644), "UPGRADED", &[0; 0x20])?);
//!
//!     let payload = codec::compress(&list.flatten(), &CompressOptions::default())?;
//!     assert_eq!(&payload[..2], &[0x78, 0x01]);
//!     Ok(())
//! }
//! ```
//!
//! ### Inspecting and Editing a Payload
//!
//! ```rust,no_run
//! use npk_zlib::codec::CompressOptions;
//! use npk_zlib::container::{ContainerPayload, ZlibContainer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let payload: Vec<u8> = std::fs::read("container.bin")?;
//!     let mut zlib = ZlibContainer::from_payload(payload);
//!
//!     for (index, record) in zlib.objects()?.enumerate() {
//!         println!("{index}: {:?}", record.describe());
//!     }
//!
//!     let mut edited = zlib.objects()?.clone();
//!     edited.retain(|record| record.name_bytes() != b"bin/bash");
//!     zlib.commit_objects(&edited, &CompressOptions::default())?;
//!     println!("{:?}", zlib.describe());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T>`]. Records whose lengths disagree
//! with their header and non-zero reserved fields are repaired or reported
//! through the [`log`] facade rather than rejected.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod checksum;
pub mod codec;
pub mod container;
pub mod error;
pub mod record;
pub mod timestamp;

pub use codec::{CompressOptions, Decompressed, compress, decompress};
pub use container::{Container, ContainerPayload, OpaqueContainer, ZlibContainer};
pub use error::{DecodeError, Error, Result};
pub use record::{FileMode, FileType, ObjectList, ObjectRecord};
pub use timestamp::Timestamps;
