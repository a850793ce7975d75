//! This module provides a primitive decoder of binary numbers,
//! which may be in either Little Endian or Big Endian.

use byteordered::{ByteOrdered, Endianness};
use dcmdata_core::Tag;
use std::io::Read;

type Result<T> = std::io::Result<T>;

/// A basic decoder of DICOM primitive values
/// with the byte order chosen at construction.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BasicDecoder {
    endianness: Endianness,
}

impl BasicDecoder {
    /// Create a basic decoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        BasicDecoder { endianness }
    }

    /// Retrieve the source's endianness, as expected by this decoder.
    #[inline]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Decode an unsigned short value from the given source.
    pub fn decode_us<S>(&self, source: S) -> Result<u16>
    where
        S: Read,
    {
        ByteOrdered::runtime(source, self.endianness).read_u16()
    }

    /// Decode an unsigned long value from the given source.
    pub fn decode_ul<S>(&self, source: S) -> Result<u32>
    where
        S: Read,
    {
        ByteOrdered::runtime(source, self.endianness).read_u32()
    }

    /// Decode a DICOM attribute tag from the given source.
    pub fn decode_tag<S>(&self, source: S) -> Result<Tag>
    where
        S: Read,
    {
        let mut source = ByteOrdered::runtime(source, self.endianness);
        let g = source.read_u16()?;
        let e = source.read_u16()?;
        Ok(Tag(g, e))
    }

    /// Interpret the first two bytes of `buf` as an unsigned short.
    #[inline]
    pub(crate) fn read_u16(&self, buf: &[u8]) -> u16 {
        let bytes = [buf[0], buf[1]];
        match self.endianness {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        }
    }

    /// Interpret the first four bytes of `buf` as an unsigned long.
    #[inline]
    pub(crate) fn read_u32(&self, buf: &[u8]) -> u32 {
        let bytes = [buf[0], buf[1], buf[2], buf[3]];
        match self.endianness {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        }
    }
}

impl From<Endianness> for BasicDecoder {
    fn from(endianness: Endianness) -> Self {
        BasicDecoder::new(endianness)
    }
}

impl Default for BasicDecoder {
    fn default() -> Self {
        BasicDecoder::new(Endianness::Little)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers() {
        let data: &[u8] = &[0xC3, 0x3C, 0x33, 0xCC, 0x55, 0xAA, 0x55, 0xAA];

        let le = BasicDecoder::new(Endianness::Little);
        let be = BasicDecoder::new(Endianness::Big);

        assert_eq!(le.decode_us(data).unwrap(), 0x3CC3);
        assert_eq!(be.decode_us(data).unwrap(), 0xC33C);
        assert_eq!(le.decode_ul(data).unwrap(), 0xCC333CC3);
        assert_eq!(be.decode_ul(data).unwrap(), 0xC33C33CC);
        assert_eq!(le.read_u32(&data[4..]), 0xAA55AA55);
        assert_eq!(be.read_u16(&data[4..]), 0x55AA);
    }

    #[test]
    fn test_read_tag() {
        let data: &[u8] = &[0x28, 0x00, 0x10, 0x00];
        let le = BasicDecoder::default();
        assert_eq!(le.decode_tag(data).unwrap(), Tag(0x0028, 0x0010));
        let be = BasicDecoder::new(Endianness::Big);
        assert_eq!(be.decode_tag(data).unwrap(), Tag(0x2800, 0x1000));
    }
}
