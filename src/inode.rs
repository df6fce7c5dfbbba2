//! Inode loading and logical-to-physical zone mapping.

use crate::SectorDevice;
use crate::cache::{FIRST_LEVEL, IndirectCache, SECOND_LEVEL};
use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::Inode;
use crate::superblock::Geometry;

/// Loads inode `nr` into the driver's single inode slot and resets
/// the indirect cache. Numbers outside `[1, ninodes)` fail without
/// any I/O.
pub(crate) fn load_inode<D: SectorDevice>(
    device: &D,
    geo: &Geometry,
    nr: u32,
    slot: &mut Inode,
    cache: &mut IndirectCache,
    scratch: &mut [u8; MAX_BLOCK_SIZE],
) -> Result<()> {
    if nr < 1 || nr >= geo.ninodes {
        return Err(FsError::OutOfBounds);
    }
    let per_block = geo.block_size / INODE_SIZE as u32;
    let block = geo.inode_table + (nr - 1) / per_block;
    let offset = ((nr - 1) % per_block) as usize * INODE_SIZE;
    device.read_sectors(
        block * geo.sectors_per_block,
        geo.sectors_per_block,
        &mut scratch[..geo.block_size as usize],
    );
    *slot = Inode::decode(&scratch[offset..offset + INODE_SIZE]);
    cache.invalidate();
    Ok(())
}

/// Translates logical file block `index` into a physical zone number
/// for `inode`. Returns `None` past the mapped extent or on a hole
/// (zone number 0) at any level; the reader stops early on it.
pub(crate) fn map_zone<D: SectorDevice>(
    device: &D,
    geo: &Geometry,
    inode: &Inode,
    cache: &mut IndirectCache,
    index: u32,
) -> Option<u32> {
    let zpb = geo.zones_per_block;
    let direct = NR_DIRECT_ZONES as u32;

    let zone = if index < direct {
        inode.zones[index as usize]
    } else if index < direct + zpb {
        let ind = inode.zones[IND_ZONE];
        if ind == 0 {
            return None;
        }
        cache.zone_at(device, geo, FIRST_LEVEL, ind, index - direct)
    } else if index < direct + zpb + geo.zones_per_block2 {
        let rel = index - direct - zpb;
        let root = inode.zones[DIND_ZONE];
        if root == 0 {
            return None;
        }
        let leaf = cache.zone_at(device, geo, FIRST_LEVEL, root, rel / zpb);
        if leaf == 0 {
            return None;
        }
        cache.zone_at(device, geo, SECOND_LEVEL, leaf, rel % zpb)
    } else {
        return None;
    };

    (zone != 0).then_some(zone)
}
