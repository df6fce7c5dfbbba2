/// Size of one physical sector addressed by [`crate::SectorDevice`].
pub const SECTOR_SIZE: usize = 512;
/// The superblock always lives at byte offset 1024 on the device,
/// no matter the block size.
pub const SUPERBLOCK_LBA: u32 = 2;
/// Magic number of a Minix V3 superblock.
pub const SUPERBLOCK_MAGIC: u16 = 0x4D5A;

pub const MIN_BLOCK_SIZE: u32 = 1024;
pub const MAX_BLOCK_SIZE: usize = 4096;

/// Inode number of the root directory.
pub const ROOT_INODE: u32 = 1;
pub const INODE_SIZE: usize = 64; // on-disk V2/V3 inode record size

pub const DIR_ENTRY_SIZE: usize = 64;
/// Length of the name field in a directory entry. A name filling the
/// whole field carries no terminating zero.
pub const NAME_LEN: usize = 60;

/// Number of direct zone slots in an inode.
pub const NR_DIRECT_ZONES: usize = 7;
/// Total zone slots (direct + indirect + double indirect + unused).
pub const NR_ZONES: usize = 10;
/// Zone slot holding the single-indirect block.
pub const IND_ZONE: usize = 7;
/// Zone slot holding the double-indirect root block.
pub const DIND_ZONE: usize = 8;

/// Capacity of the in-driver path buffer.
pub const PATH_MAX: usize = 1024;
/// Symbolic links one `open` call may follow before failing.
pub const MAX_SYMLINK_HOPS: usize = 8;
pub const SEPARATOR: u8 = b'/';
