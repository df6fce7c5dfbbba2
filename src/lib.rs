//! Allocation-free, read-only driver for the Minix V2/V3 on-disk
//! format, meant for boot-time and kernel-early environments where no
//! allocator or OS services exist. The host supplies a raw sector
//! reader; the driver resolves POSIX-style paths and streams file
//! contents out of fixed, pre-allocated working storage.
//!
//! On-disk layout of a Minix filesystem:
//! - Boot block
//! - Superblock (at byte offset 1024)
//! - Inode bitmap
//! - Zone bitmap
//! - Inode table
//! - Data zones
//!
//! The driver's layers (from bottom to top):
//! 1. Sector device: raw 512-byte sector reads.            | Host implemented
//! 2. Superblock: one-time validation, derived geometry.   | Fs implemented
//! 3. Inode: single-slot loading, zone mapping + cache.    | Fs implemented
//! 4. Directory/Path: component lookup, symlink rewriting. | Fs implemented
//! 5. File: clamped byte-range reads.                      | Fs implemented
//! 6. MinixFs: the open/read/close context for users.      | Fs implemented

#![no_std]

mod block_dev;
mod cache;
mod config;
mod directory;
mod error;
mod file;
mod fs;
mod inode;
mod path;
mod structs;
mod superblock;

pub use block_dev::SectorDevice;
pub use config::*;
pub use error::FsError as Error;
pub use error::{FsError, Result};
pub use fs::MinixFs;
pub use structs::*;
