//! On-disk record types, decoded field by field at fixed little-endian
//! offsets so the format contract holds on any host, independent of
//! structure layout or alignment.

use crate::config::*;

pub(crate) fn u16_at(buf: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([buf[off], buf[off + 1]])
}

pub(crate) fn u32_at(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

/// Decoded Minix V3 superblock.
#[derive(Debug, Clone, Copy)]
pub struct SuperBlock {
    /// Usable inodes on the device.
    pub ninodes: u32,
    /// Blocks used by the inode bitmap.
    pub imap_blocks: u16,
    /// Blocks used by the zone bitmap.
    pub zmap_blocks: u16,
    /// Total zones on the device.
    pub zones: u32,
    pub magic: u16,
    /// Block size in bytes.
    pub block_size: u16,
    /// Filesystem format sub-version.
    pub disk_version: u8,
}

impl SuperBlock {
    /// Decodes the record found at byte offset 1024 on the device.
    /// `raw` must hold at least the 31 bytes of the V3 layout.
    pub fn decode(raw: &[u8]) -> Self {
        SuperBlock {
            ninodes: u32_at(raw, 0),
            imap_blocks: u16_at(raw, 6),
            zmap_blocks: u16_at(raw, 8),
            zones: u32_at(raw, 20),
            magic: u16_at(raw, 24),
            block_size: u16_at(raw, 28),
            disk_version: raw[30],
        }
    }
}

/// i_mode format bits.
pub const S_IFDIR: u16 = 0x4000;
pub const S_IFREG: u16 = 0x8000;
pub const S_IFLNK: u16 = 0xA000;
pub const S_IFMT: u16 = 0xF000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
    Symlink,
    /// Devices, fifos and anything else the driver cannot open.
    Other,
}

/// One 64-byte V2/V3 inode record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inode {
    /// File type and permission bits, exposed to the caller as-is.
    pub mode: u16,
    pub nlinks: u16,
    pub uid: i16,
    pub gid: u16,
    /// File size in bytes.
    pub size: u32,
    pub atime: u32,
    pub mtime: u32,
    pub ctime: u32,
    /// Direct, indirect and double-indirect zone numbers.
    pub zones: [u32; NR_ZONES],
}

impl Inode {
    pub fn decode(raw: &[u8]) -> Self {
        let mut zones = [0u32; NR_ZONES];
        for (i, zone) in zones.iter_mut().enumerate() {
            *zone = u32_at(raw, 24 + i * 4);
        }
        Inode {
            mode: u16_at(raw, 0),
            nlinks: u16_at(raw, 2),
            uid: u16_at(raw, 4) as i16,
            gid: u16_at(raw, 6),
            size: u32_at(raw, 8),
            atime: u32_at(raw, 12),
            mtime: u32_at(raw, 16),
            ctime: u32_at(raw, 20),
            zones,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self.mode & S_IFMT {
            S_IFREG => FileType::Regular,
            S_IFDIR => FileType::Directory,
            S_IFLNK => FileType::Symlink,
            _ => FileType::Other,
        }
    }
}

/// One 64-byte directory entry: inode number plus fixed name field.
#[derive(Debug, Clone, Copy)]
pub struct DirEntry {
    /// 0 marks a free or deleted slot.
    pub ino: u32,
    pub name: [u8; NAME_LEN],
}

impl DirEntry {
    pub fn decode(raw: &[u8]) -> Self {
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&raw[4..4 + NAME_LEN]);
        DirEntry {
            ino: u32_at(raw, 0),
            name,
        }
    }

    /// Byte-exact comparison against a path component: the name must
    /// equal `name` with no trailing extra characters. Components as
    /// long as the whole field never match.
    pub fn name_matches(&self, name: &[u8]) -> bool {
        name.len() < NAME_LEN && &self.name[..name.len()] == name && self.name[name.len()] == 0
    }
}
