//! Unix file mode of an archive object.

/// File type bits (`S_IFMT`).
pub const S_IFMT: u16 = 0o170000;
/// Socket.
pub const S_IFSOCK: u16 = 0o140000;
/// Symbolic link.
pub const S_IFLNK: u16 = 0o120000;
/// Regular file.
pub const S_IFREG: u16 = 0o100000;
/// Block device.
pub const S_IFBLK: u16 = 0o060000;
/// Directory.
pub const S_IFDIR: u16 = 0o040000;
/// Character device.
pub const S_IFCHR: u16 = 0o020000;
/// FIFO.
pub const S_IFIFO: u16 = 0o010000;

/// Permission bits including setuid, setgid and sticky.
pub const PERMISSION_MASK: u16 = 0o7777;

/// Kind of filesystem object encoded in a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Directory.
    Directory,
    /// Regular file.
    Regular,
    /// Symbolic link.
    Symlink,
    /// Character device.
    CharDevice,
    /// Block device.
    BlockDevice,
    /// FIFO.
    Fifo,
    /// Socket.
    Socket,
    /// Type bits that match none of the above.
    Unknown(u16),
}

/// A 16-bit Unix mode: file type plus permission bits.
///
/// # Example
///
/// ```rust
/// use npk_zlib::record::{FileMode, FileType};
///
/// let mode = FileMode::directory(0o755);
/// assert_eq!(mode.bits(), 0o40755);
/// assert_eq!(mode.file_type(), FileType::Directory);
/// assert_eq!(mode.to_string(), "0o40755");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FileMode(u16);

impl FileMode {
    /// Wraps raw mode bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Directory with the given permissions.
    pub const fn directory(permissions: u16) -> Self {
        Self(S_IFDIR | (permissions & PERMISSION_MASK))
    }

    /// Regular file with the given permissions.
    pub const fn regular(permissions: u16) -> Self {
        Self(S_IFREG | (permissions & PERMISSION_MASK))
    }

    /// Raw mode bits.
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Permission bits (`S_IMODE`).
    pub const fn permissions(&self) -> u16 {
        self.0 & PERMISSION_MASK
    }

    /// File type (`S_IFMT`).
    pub fn file_type(&self) -> FileType {
        match self.0 & S_IFMT {
            S_IFDIR => FileType::Directory,
            S_IFREG => FileType::Regular,
            S_IFLNK => FileType::Symlink,
            S_IFCHR => FileType::CharDevice,
            S_IFBLK => FileType::BlockDevice,
            S_IFIFO => FileType::Fifo,
            S_IFSOCK => FileType::Socket,
            other => FileType::Unknown(other),
        }
    }

    /// Returns true for directories.
    pub fn is_dir(&self) -> bool {
        self.file_type() == FileType::Directory
    }

    /// Returns true for regular files.
    pub fn is_file(&self) -> bool {
        self.file_type() == FileType::Regular
    }

    /// Returns true for symbolic links.
    pub fn is_symlink(&self) -> bool {
        self.file_type() == FileType::Symlink
    }
}

impl From<u16> for FileMode {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<FileMode> for u16 {
    fn from(mode: FileMode) -> Self {
        mode.0
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0o{:o}", self.0)
    }
}
