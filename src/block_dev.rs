/// Host-supplied raw sector reader.
///
/// The driver treats the device as blocking and infallible: when
/// `read_sectors` returns, `buf` must hold `count` complete sectors
/// starting at `lba`. There is no error channel; a host that cannot
/// guarantee this must not hand the device to the driver.
pub trait SectorDevice {
    /// Reads `count` 512-byte sectors starting at logical block
    /// address `lba` into the front of `buf`.
    /// `buf.len()` must be at least `count * 512`.
    fn read_sectors(&self, lba: u32, count: u32, buf: &mut [u8]);
}

impl<T: SectorDevice + ?Sized> SectorDevice for &T {
    fn read_sectors(&self, lba: u32, count: u32, buf: &mut [u8]) {
        (**self).read_sectors(lba, count, buf)
    }
}
