//! The driver context and its public `open`/`read`/`close` surface.

use crate::SectorDevice;
use crate::cache::IndirectCache;
use crate::config::*;
use crate::directory;
use crate::error::{FsError, Result};
use crate::file;
use crate::inode::load_inode;
use crate::path::PathBuf;
use crate::structs::{FileType, Inode};
use crate::superblock::{Geometry, read_geometry};

/// A read-only Minix V2/V3 driver instance.
///
/// All working storage lives inline in this value; the driver never
/// allocates. Exactly one file may be open at a time: a successful
/// `open` simply replaces the previous open file, there is no
/// reference counting. Independent instances are fully isolated.
pub struct MinixFs<D: SectorDevice> {
    device: D,
    /// `Some` once the superblock has been validated; the superblock
    /// sector is read at most once per instance.
    geometry: Option<Geometry>,
    /// The single inode slot, valid only while `current` is non-zero.
    inode: Inode,
    /// Number of the inode in the slot, 0 when nothing is loaded.
    current: u32,
    cache: IndirectCache,
    /// Scratch block for data and inode-table reads.
    data: [u8; MAX_BLOCK_SIZE],
    /// Scratch block for directory entries and symlink targets.
    dir: [u8; MAX_BLOCK_SIZE],
    path: PathBuf,
}

impl<D: SectorDevice> MinixFs<D> {
    /// Builds an uninitialized driver for `device`. The superblock is
    /// not touched until the first `open`.
    pub fn new(device: D) -> Self {
        MinixFs {
            device,
            geometry: None,
            inode: Inode::default(),
            current: 0,
            cache: IndirectCache::new(),
            data: [0; MAX_BLOCK_SIZE],
            dir: [0; MAX_BLOCK_SIZE],
            path: PathBuf::new(),
        }
    }

    /// Metadata of the currently open file, on-disk mode bits
    /// included. `None` while nothing is open.
    pub fn open_file(&self) -> Option<&Inode> {
        (self.current != 0).then_some(&self.inode)
    }

    /// Resolves `path` to a regular file and returns its size in
    /// bytes. On success the file stays open for `read` until the
    /// next `open` or `close`; on failure the open-file marker is
    /// cleared. An empty path fails without touching any state.
    pub fn open(&mut self, path: &str) -> Result<u32> {
        if path.is_empty() {
            return Err(FsError::InvalidPath);
        }
        match self.resolve(path.as_bytes()) {
            Ok(size) => Ok(size),
            Err(e) => {
                self.current = 0;
                Err(e)
            }
        }
    }

    /// Copies up to `dst.len()` bytes starting at byte `offset` of
    /// the open file into `dst` and returns the byte count. Returns 0
    /// with no side effects when nothing is open, the device is not
    /// mounted, `offset` is at or past end-of-file, or `dst` is
    /// empty. A short count past a hole is not an error.
    pub fn read(&mut self, offset: u32, dst: &mut [u8]) -> usize {
        let Self {
            device,
            geometry,
            inode,
            current,
            cache,
            data,
            ..
        } = self;
        let Some(geo) = *geometry else {
            return 0;
        };
        if *current == 0 {
            return 0;
        }
        file::read_at(device, &geo, inode, cache, data, offset, dst)
    }

    /// Forgets the open file. Safe to call with nothing open.
    pub fn close(&mut self) {
        self.current = 0;
    }

    fn resolve(&mut self, path: &[u8]) -> Result<u32> {
        let Self {
            device,
            geometry,
            inode,
            current,
            cache,
            data,
            dir,
            path: buf,
        } = self;
        let geo = match *geometry {
            Some(geo) => geo,
            None => {
                let geo = read_geometry(device, data)?;
                *geometry = Some(geo);
                geo
            }
        };

        buf.load(path);
        let mut hops = 0;
        'restart: loop {
            load_inode(device, &geo, ROOT_INODE, inode, cache, data)?;
            *current = ROOT_INODE;
            buf.rewind();
            loop {
                let child = directory::lookup(device, &geo, inode, cache, data, dir, buf.component())
                    .ok_or(FsError::NotFound)?;
                load_inode(device, &geo, child, inode, cache, data)?;
                *current = child;
                match (inode.file_type(), buf.is_last()) {
                    (FileType::Symlink, _) => {
                        if hops == MAX_SYMLINK_HOPS {
                            return Err(FsError::SymlinkLoop);
                        }
                        hops += 1;
                        let len = (inode.size as usize).min(PATH_MAX - 1);
                        let got = file::read_at(device, &geo, inode, cache, data, 0, &mut dir[..len]);
                        if got == 0 {
                            return Err(FsError::NotFound);
                        }
                        buf.follow(&dir[..got]);
                        continue 'restart;
                    }
                    (FileType::Directory, false) => buf.advance(),
                    (FileType::Regular, true) => return Ok(inode.size),
                    // regular file or anything else in the middle of the path
                    (_, false) => return Err(FsError::NotDirectory),
                    // directory or unsupported type at the end of it
                    (_, true) => return Err(FsError::NotRegular),
                }
            }
        }
    }
}
