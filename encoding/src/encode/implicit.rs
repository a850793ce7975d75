//! Implicit VR syntax transfer encoding.

use crate::encode::basic::BasicEncoder;
use crate::encode::{
    Encode, EncodeTo, Result, WriteItemHeaderSnafu, WriteLengthSnafu, WriteTagSnafu,
};
use byteordered::Endianness;
use dcmdata_core::header::{DataElementHeader, Header};
use dcmdata_core::Tag;
use snafu::ResultExt;
use std::io::Write;

/// A data element encoder for the Implicit VR transfer syntaxes.
///
/// Headers are written as a tag followed by a 32-bit length,
/// so no dictionary is involved.
#[derive(Debug, Default, Clone)]
pub struct ImplicitVREncoder {
    basic: BasicEncoder,
}

impl ImplicitVREncoder {
    /// Create an encoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        ImplicitVREncoder {
            basic: BasicEncoder::new(endianness),
        }
    }

    /// Encoder for Implicit VR Little Endian.
    pub fn little_endian() -> Self {
        Self::new(Endianness::Little)
    }
}

impl Encode for ImplicitVREncoder {
    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write,
    {
        self.basic.encode_tag(to, tag).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write,
    {
        Encode::encode_tag(self, to, de.tag())?;
        self.basic
            .encode_ul(&mut *to, de.len.0)
            .context(WriteLengthSnafu)?;
        Ok(8)
    }

    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write,
    {
        self.basic
            .encode_tag(&mut *to, Tag::ITEM)
            .context(WriteItemHeaderSnafu)?;
        self.basic
            .encode_ul(&mut *to, len)
            .context(WriteItemHeaderSnafu)
    }
}

impl<W: ?Sized> EncodeTo<W> for ImplicitVREncoder
where
    W: Write,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        Encode::encode_tag(self, to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        Encode::encode_element_header(self, to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        Encode::encode_item_header(self, to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_item_delimiter(self, to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_sequence_delimiter(self, to)
    }
}
