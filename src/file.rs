//! Byte-range reads against a loaded inode.

use crate::SectorDevice;
use crate::cache::IndirectCache;
use crate::config::MAX_BLOCK_SIZE;
use crate::inode::map_zone;
use crate::structs::Inode;
use crate::superblock::Geometry;

/// Copies up to `dst.len()` bytes starting at byte `offset` of the
/// file into `dst`, clamped so no byte past the inode's recorded size
/// is ever read. The first and last blocks may be copied partially.
///
/// Stops as soon as zone mapping yields no block and returns the
/// bytes copied so far; a hole and the end of the mapped extent are
/// deliberately indistinguishable here.
pub(crate) fn read_at<D: SectorDevice>(
    device: &D,
    geo: &Geometry,
    inode: &Inode,
    cache: &mut IndirectCache,
    scratch: &mut [u8; MAX_BLOCK_SIZE],
    offset: u32,
    dst: &mut [u8],
) -> usize {
    if offset >= inode.size || dst.is_empty() {
        return 0;
    }
    let mut size = dst.len();
    if offset as usize + size > inode.size as usize {
        size = (inode.size - offset) as usize;
    }

    let bs = geo.block_size as usize;
    let mut index = offset / geo.block_size;
    let mut in_block = (offset % geo.block_size) as usize;
    let mut copied = 0usize;

    while copied < size {
        let Some(zone) = map_zone(device, geo, inode, cache, index) else {
            break;
        };
        device.read_sectors(
            zone * geo.sectors_per_block,
            geo.sectors_per_block,
            &mut scratch[..bs],
        );
        let take = (bs - in_block).min(size - copied);
        dst[copied..copied + take].copy_from_slice(&scratch[in_block..in_block + take]);
        copied += take;
        in_block = 0;
        index += 1;
    }
    copied
}
