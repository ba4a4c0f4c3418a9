//! Binary images and the address arithmetic over them.

use std::fs;
use std::io;
use std::path::Path;

/// A contiguous binary image mapped at a 16-bit origin address.
///
/// Addresses wrap at 64KiB the way the decoded processors' program
/// counters do, but the image itself never wraps: a byte is either
/// inside `origin..origin + len` or absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    origin: u16,
}

impl Image {
    pub fn new(data: Vec<u8>, origin: u16) -> Self {
        Image { data, origin }
    }

    /// Load a raw binary from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, origin: u16) -> io::Result<Self> {
        Ok(Image::new(fs::read(path)?, origin))
    }

    pub fn origin(&self) -> u16 {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The image offset holding `address`, if the address falls inside
    /// the image.
    pub fn offset_of(&self, address: u16) -> Option<usize> {
        let offset = usize::from(address.checked_sub(self.origin)?);

        if offset < self.data.len() {
            Some(offset)
        } else {
            None
        }
    }

    /// The address of the byte at `offset`.
    pub fn address_of(&self, offset: usize) -> Option<u16> {
        if offset < self.data.len() {
            Some(self.origin.wrapping_add(offset as u16))
        } else {
            None
        }
    }

    /// All bytes from `offset` to the end of the image.
    pub fn tail(&self, offset: usize) -> &[u8] {
        &self.data[offset.min(self.data.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_respect_the_origin() {
        let image = Image::new(vec![1, 2, 3], 0x6000);

        assert_eq!(image.offset_of(0x6000), Some(0));
        assert_eq!(image.offset_of(0x6002), Some(2));
        assert_eq!(image.offset_of(0x6003), None);
        assert_eq!(image.offset_of(0x5fff), None);
    }

    #[test]
    fn addresses_round_trip() {
        let image = Image::new(vec![0; 16], 0xfff0);

        assert_eq!(image.address_of(0), Some(0xfff0));
        assert_eq!(image.address_of(15), Some(0xffff));
        assert_eq!(image.address_of(16), None);
    }
}
