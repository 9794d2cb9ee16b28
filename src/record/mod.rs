//! Archive object records carried in the decompressed payload.
//!
//! The decompressed payload of a compressed-data container is a plain
//! concatenation of filesystem objects, each a fixed 30-byte header followed
//! by its name and its payload. [`ObjectList::scan`] splits a blob into
//! [`ObjectRecord`]s and [`ObjectList::flatten`] joins them back.
//!
//! | Field | Offset | Size |
//! |-------|--------|------|
//! | mode | 0 | 2 |
//! | reserved1 | 2 | 6 |
//! | timestamps | 8 | 12 |
//! | reserved2 | 20 | 4 |
//! | payload_len | 24 | 4 |
//! | name_len | 28 | 2 |
//! | name | 30 | name_len |
//! | payload | 30 + name_len | payload_len |

mod list;
mod mode;
mod object;

pub use list::ObjectList;
pub use mode::{
    FileMode, FileType, PERMISSION_MASK, S_IFBLK, S_IFCHR, S_IFDIR, S_IFIFO, S_IFLNK, S_IFMT,
    S_IFREG, S_IFSOCK,
};
pub use object::{HEADER_LEN, ObjectRecord};
