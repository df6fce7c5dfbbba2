//! Superblock validation and the block geometry derived from it.

use crate::SectorDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::SuperBlock;

/// Geometry constants derived from a validated superblock, immutable
/// for the lifetime of the mount.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Geometry {
    pub block_size: u32,
    pub sectors_per_block: u32,
    /// Zone numbers held by one indirect block.
    pub zones_per_block: u32,
    /// Zone numbers covered by one double-indirect root.
    pub zones_per_block2: u32,
    /// First block of the inode table: 2 + imap_blocks + zmap_blocks.
    pub inode_table: u32,
    pub ninodes: u32,
}

impl Geometry {
    pub(crate) fn from_superblock(sb: &SuperBlock) -> Result<Self> {
        let bs = sb.block_size as u32;
        if sb.magic != SUPERBLOCK_MAGIC
            || bs < MIN_BLOCK_SIZE
            || bs as usize > MAX_BLOCK_SIZE
            || bs % SECTOR_SIZE as u32 != 0
        {
            return Err(FsError::NotAFilesystem);
        }
        let zones_per_block = bs / 4;
        Ok(Geometry {
            block_size: bs,
            sectors_per_block: bs / SECTOR_SIZE as u32,
            zones_per_block,
            zones_per_block2: zones_per_block * zones_per_block,
            inode_table: 2 + sb.imap_blocks as u32 + sb.zmap_blocks as u32,
            ninodes: sb.ninodes,
        })
    }
}

/// Reads the superblock sector and derives the mount geometry.
/// Called at most once per device; a rejected device stays unmounted
/// so a later call may retry.
pub(crate) fn read_geometry<D: SectorDevice>(device: &D, scratch: &mut [u8]) -> Result<Geometry> {
    let sector = &mut scratch[..SECTOR_SIZE];
    device.read_sectors(SUPERBLOCK_LBA, 1, sector);
    Geometry::from_superblock(&SuperBlock::decode(sector))
}
