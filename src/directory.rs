//! Linear scan of directory-entry blocks.

use crate::SectorDevice;
use crate::cache::IndirectCache;
use crate::config::{DIR_ENTRY_SIZE, MAX_BLOCK_SIZE};
use crate::file::read_at;
use crate::structs::{DirEntry, Inode};
use crate::superblock::Geometry;

/// Scans directory `dir` one block at a time for an entry named
/// `name`. Free slots (inode number 0) are skipped; entries are not
/// sorted and the first match wins.
pub(crate) fn lookup<D: SectorDevice>(
    device: &D,
    geo: &Geometry,
    dir: &Inode,
    cache: &mut IndirectCache,
    scratch: &mut [u8; MAX_BLOCK_SIZE],
    entries: &mut [u8; MAX_BLOCK_SIZE],
    name: &[u8],
) -> Option<u32> {
    let bs = geo.block_size as usize;
    let mut offset = 0u32;
    while offset < dir.size {
        let got = read_at(device, geo, dir, cache, scratch, offset, &mut entries[..bs]);
        if got == 0 {
            break;
        }
        offset += bs as u32;
        for raw in entries[..got].chunks_exact(DIR_ENTRY_SIZE) {
            let entry = DirEntry::decode(raw);
            if entry.ino != 0 && entry.name_matches(name) {
                return Some(entry.ino);
            }
        }
    }
    None
}
