//! Two-slot cache for indirect zone blocks.
//!
//! Slot 0 holds the first-level block (the single-indirect block, or
//! the double-indirect root), slot 1 the double-indirect leaf. Each
//! slot is tagged with the zone number it was loaded from; zone 0
//! never holds an indirect block, so it doubles as the empty tag.

use crate::SectorDevice;
use crate::config::MAX_BLOCK_SIZE;
use crate::structs::u32_at;
use crate::superblock::Geometry;

pub(crate) const FIRST_LEVEL: usize = 0;
pub(crate) const SECOND_LEVEL: usize = 1;

pub(crate) struct IndirectCache {
    tags: [u32; 2],
    blocks: [[u8; MAX_BLOCK_SIZE]; 2],
}

impl IndirectCache {
    pub(crate) const fn new() -> Self {
        IndirectCache {
            tags: [0; 2],
            blocks: [[0; MAX_BLOCK_SIZE]; 2],
        }
    }

    /// Drops both slots. Must be called whenever a different inode is
    /// loaded, since the cached blocks belong to its zone chain.
    pub(crate) fn invalidate(&mut self) {
        self.tags = [0; 2];
    }

    /// Returns the `index`th zone number recorded in the indirect
    /// block at `zone`, reloading `slot` only when its tag differs.
    pub(crate) fn zone_at<D: SectorDevice>(
        &mut self,
        device: &D,
        geo: &Geometry,
        slot: usize,
        zone: u32,
        index: u32,
    ) -> u32 {
        if self.tags[slot] != zone {
            device.read_sectors(
                zone * geo.sectors_per_block,
                geo.sectors_per_block,
                &mut self.blocks[slot][..geo.block_size as usize],
            );
            self.tags[slot] = zone;
        }
        u32_at(&self.blocks[slot], index as usize * 4)
    }
}
