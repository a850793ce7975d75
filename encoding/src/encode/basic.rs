//! This module provides a primitive encoder of binary numbers,
//! which may be in either Little Endian or Big Endian.

use byteordered::{ByteOrdered, Endianness};
use dcmdata_core::Tag;
use std::io::Write;

type Result<T> = std::io::Result<T>;

/// A basic encoder of DICOM primitive values
/// with the byte order chosen at construction.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BasicEncoder {
    endianness: Endianness,
}

impl BasicEncoder {
    /// Create a basic encoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        BasicEncoder { endianness }
    }

    /// Retrieve the encoder's endianness.
    #[inline]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Encode an unsigned short value to the given writer.
    pub fn encode_us<W>(&self, to: W, value: u16) -> Result<()>
    where
        W: Write,
    {
        ByteOrdered::runtime(to, self.endianness).write_u16(value)
    }

    /// Encode an unsigned long value to the given writer.
    pub fn encode_ul<W>(&self, to: W, value: u32) -> Result<()>
    where
        W: Write,
    {
        ByteOrdered::runtime(to, self.endianness).write_u32(value)
    }

    /// Encode a DICOM attribute tag to the given writer.
    pub fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut to = ByteOrdered::runtime(to, self.endianness);
        to.write_u16(tag.group())?;
        to.write_u16(tag.element())
    }
}

impl From<Endianness> for BasicEncoder {
    fn from(endianness: Endianness) -> Self {
        BasicEncoder::new(endianness)
    }
}

impl Default for BasicEncoder {
    fn default() -> Self {
        BasicEncoder::new(Endianness::Little)
    }
}
