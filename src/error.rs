#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Superblock validation failed; the device does not carry a
    /// recognizable Minix V3 filesystem.
    NotAFilesystem,
    NotFound,
    NotDirectory,
    NotRegular,
    SymlinkLoop,
    InvalidPath,
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, FsError>;
