//! Shared test fixtures: an in-memory sector device and a minimal
//! mkfs-style builder producing bit-exact Minix V3 images.

#![allow(dead_code)]

use std::cell::Cell;

use mfs::{DIR_ENTRY_SIZE, INODE_SIZE, NAME_LEN, SECTOR_SIZE, SUPERBLOCK_LBA, SectorDevice};

const S_IFREG: u16 = 0x8000;
const S_IFDIR: u16 = 0x4000;
const S_IFLNK: u16 = 0xA000;

pub struct RamDisk {
    data: Vec<u8>,
    superblock_reads: Cell<usize>,
}

impl RamDisk {
    pub fn new(data: Vec<u8>) -> Self {
        RamDisk {
            data,
            superblock_reads: Cell::new(0),
        }
    }

    /// How often the superblock sector has been fetched.
    pub fn superblock_reads(&self) -> usize {
        self.superblock_reads.get()
    }

    /// Raw image access, for corrupting on-disk structures.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl SectorDevice for RamDisk {
    fn read_sectors(&self, lba: u32, count: u32, buf: &mut [u8]) {
        if lba == SUPERBLOCK_LBA {
            self.superblock_reads.set(self.superblock_reads.get() + 1);
        }
        let start = lba as usize * SECTOR_SIZE;
        let len = count as usize * SECTOR_SIZE;
        buf[..len].copy_from_slice(&self.data[start..start + len]);
    }
}

/// Deterministic file content so byte-exact reads can be verified
/// against a reference slice.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8) ^ ((i >> 8) as u8).wrapping_mul(31) ^ seed)
        .collect()
}

struct DirSpec {
    ino: u32,
    entries: Vec<(u32, Vec<u8>)>,
}

/// Builds a Minix V3 image the way mkfs lays one out: boot block,
/// superblock at byte 1024, inode bitmap, zone bitmap, inode table,
/// data zones. Directories are serialized on `build`.
pub struct ImageBuilder {
    block_size: usize,
    ninodes: u32,
    total_blocks: u32,
    image: Vec<u8>,
    next_inode: u32,
    next_zone: u32,
    dirs: Vec<DirSpec>,
}

impl ImageBuilder {
    pub fn new(block_size: usize, ninodes: u32, total_blocks: u32) -> Self {
        let inode_table_blocks =
            (ninodes as usize * INODE_SIZE).div_ceil(block_size) as u32;
        let mut builder = ImageBuilder {
            block_size,
            ninodes,
            total_blocks,
            image: vec![0u8; total_blocks as usize * block_size],
            next_inode: 2,
            // 2 + imap + zmap + inode table
            next_zone: 2 + 1 + 1 + inode_table_blocks,
            dirs: vec![DirSpec {
                ino: 1,
                entries: vec![(1, b".".to_vec()), (1, b"..".to_vec())],
            }],
        };
        builder.write_superblock();
        builder
    }

    /// Inode number of the root directory.
    pub fn root(&self) -> u32 {
        1
    }

    fn write_superblock(&mut self) {
        let ninodes = self.ninodes;
        let zones = self.total_blocks;
        let bs = self.block_size as u16;
        let sb = &mut self.image[1024..1024 + 32];
        sb[0..4].copy_from_slice(&ninodes.to_le_bytes());
        sb[6..8].copy_from_slice(&1u16.to_le_bytes()); // imap_blocks
        sb[8..10].copy_from_slice(&1u16.to_le_bytes()); // zmap_blocks
        sb[12..14].copy_from_slice(&0u16.to_le_bytes()); // log_zone_size
        sb[16..20].copy_from_slice(&0x7fff_ffffu32.to_le_bytes()); // max_size
        sb[20..24].copy_from_slice(&zones.to_le_bytes());
        sb[24..26].copy_from_slice(&0x4D5Au16.to_le_bytes()); // magic
        sb[28..30].copy_from_slice(&bs.to_le_bytes());
        sb[30] = 0; // disk_version
    }

    fn alloc_inode(&mut self) -> u32 {
        let ino = self.next_inode;
        assert!(ino < self.ninodes, "inode table exhausted");
        self.next_inode += 1;
        ino
    }

    /// Claims a data zone and fills its front with `data`.
    pub fn data_zone(&mut self, data: &[u8]) -> u32 {
        assert!(data.len() <= self.block_size);
        let zone = self.next_zone;
        assert!(zone < self.total_blocks, "image out of zones");
        self.next_zone += 1;
        let start = zone as usize * self.block_size;
        self.image[start..start + data.len()].copy_from_slice(data);
        zone
    }

    fn zone_list(&mut self, zones: &[u32]) -> u32 {
        let mut raw = vec![0u8; zones.len() * 4];
        for (i, z) in zones.iter().enumerate() {
            raw[i * 4..i * 4 + 4].copy_from_slice(&z.to_le_bytes());
        }
        self.data_zone(&raw)
    }

    /// Lays out `content` over direct, single-indirect and
    /// double-indirect zones as needed and returns the inode's zone
    /// array.
    fn store(&mut self, content: &[u8]) -> [u32; 10] {
        let bs = self.block_size;
        let zpb = bs / 4;
        let data: Vec<u32> = content.chunks(bs).map(|c| self.data_zone(c)).collect();

        let mut zones = [0u32; 10];
        for (slot, z) in zones.iter_mut().take(7).zip(&data) {
            *slot = *z;
        }
        if data.len() > 7 {
            let end = data.len().min(7 + zpb);
            zones[7] = self.zone_list(&data[7..end]);
        }
        if data.len() > 7 + zpb {
            let leaves: Vec<u32> = data[7 + zpb..]
                .chunks(zpb)
                .map(|chunk| self.zone_list(chunk))
                .collect();
            zones[8] = self.zone_list(&leaves);
        }
        zones
    }

    pub fn write_inode(&mut self, ino: u32, mode: u16, size: u32, zones: [u32; 10]) {
        let per_block = self.block_size / INODE_SIZE;
        let inode_table = 2 + 1 + 1;
        let block = inode_table + (ino as usize - 1) / per_block;
        let offset = block * self.block_size + ((ino as usize - 1) % per_block) * INODE_SIZE;
        let raw = &mut self.image[offset..offset + INODE_SIZE];
        raw[0..2].copy_from_slice(&mode.to_le_bytes());
        raw[2..4].copy_from_slice(&1u16.to_le_bytes()); // nlinks
        raw[8..12].copy_from_slice(&size.to_le_bytes());
        for (i, z) in zones.iter().enumerate() {
            raw[24 + i * 4..28 + i * 4].copy_from_slice(&z.to_le_bytes());
        }
    }

    fn add_entry(&mut self, parent: u32, ino: u32, name: &str) {
        let dir = self
            .dirs
            .iter_mut()
            .find(|d| d.ino == parent)
            .expect("parent is not a directory");
        dir.entries.push((ino, name.as_bytes().to_vec()));
    }

    pub fn add_dir(&mut self, parent: u32, name: &str) -> u32 {
        let ino = self.alloc_inode();
        self.add_entry(parent, ino, name);
        self.dirs.push(DirSpec {
            ino,
            entries: vec![(ino, b".".to_vec()), (parent, b"..".to_vec())],
        });
        ino
    }

    pub fn add_file(&mut self, parent: u32, name: &str, content: &[u8]) -> u32 {
        let ino = self.alloc_inode();
        let zones = self.store(content);
        self.write_inode(ino, S_IFREG | 0o644, content.len() as u32, zones);
        self.add_entry(parent, ino, name);
        ino
    }

    /// Adds a regular file with a hand-built zone array, for sparse
    /// and corrupt layouts.
    pub fn add_file_raw(&mut self, parent: u32, name: &str, size: u32, zones: [u32; 10]) -> u32 {
        let ino = self.alloc_inode();
        self.write_inode(ino, S_IFREG | 0o644, size, zones);
        self.add_entry(parent, ino, name);
        ino
    }

    pub fn add_symlink(&mut self, parent: u32, name: &str, target: &str) -> u32 {
        let ino = self.alloc_inode();
        let zones = self.store(target.as_bytes());
        self.write_inode(ino, S_IFLNK | 0o777, target.len() as u32, zones);
        self.add_entry(parent, ino, name);
        ino
    }

    /// Adds an entry whose inode number is 0, i.e. a deleted slot the
    /// driver must skip.
    pub fn add_free_entry(&mut self, parent: u32, name: &str) {
        self.add_entry(parent, 0, name);
    }

    fn serialize_dirs(&mut self) {
        let dirs = std::mem::take(&mut self.dirs);
        for dir in &dirs {
            let mut content = Vec::with_capacity(dir.entries.len() * DIR_ENTRY_SIZE);
            for (ino, name) in &dir.entries {
                let mut raw = [0u8; DIR_ENTRY_SIZE];
                raw[0..4].copy_from_slice(&ino.to_le_bytes());
                raw[4..4 + name.len().min(NAME_LEN)]
                    .copy_from_slice(&name[..name.len().min(NAME_LEN)]);
                content.extend_from_slice(&raw);
            }
            let zones = self.store(&content);
            self.write_inode(dir.ino, S_IFDIR | 0o755, content.len() as u32, zones);
        }
    }

    pub fn build(mut self) -> RamDisk {
        self.serialize_dirs();
        RamDisk::new(self.image)
    }
}
