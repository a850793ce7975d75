//! Implicit VR syntax transfer implementation.
//!
//! Value representations are not in the stream,
//! so they are resolved through a data dictionary.

use crate::decode::basic::BasicDecoder;
use crate::decode::{
    BadSequenceHeaderSnafu, Decode, DecodeFrom, ReadHeaderTagSnafu, ReadItemHeaderSnafu,
    ReadLengthSnafu, ReadTagSnafu, Result,
};
use byteordered::Endianness;
use dcmdata_core::dictionary::DataDictionary;
use dcmdata_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmdata_core::{Tag, VR};
use dcmdata_dictionary_std::StandardDataDictionary;
use snafu::ResultExt;
use std::fmt;
use std::io::Read;

/// An ImplicitVRDecoder which uses the standard data dictionary.
pub type StandardImplicitVRDecoder = ImplicitVRDecoder<StandardDataDictionary>;

/// A data element decoder for the Implicit VR transfer syntaxes.
/// This type contains a reference to an attribute dictionary for resolving
/// value representations.
pub struct ImplicitVRDecoder<D> {
    dict: D,
    basic: BasicDecoder,
}

impl<D> fmt::Debug for ImplicitVRDecoder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitVRDecoder")
            .field("dict", &"«omitted»")
            .field("basic", &self.basic)
            .finish()
    }
}

impl ImplicitVRDecoder<StandardDataDictionary> {
    /// Retrieve the Implicit VR Little Endian decoder
    /// with the standard dictionary.
    pub fn little_endian() -> Self {
        ImplicitVRDecoder::with_dict(StandardDataDictionary, Endianness::Little)
    }
}

impl Default for ImplicitVRDecoder<StandardDataDictionary> {
    fn default() -> Self {
        ImplicitVRDecoder::little_endian()
    }
}

impl<D> ImplicitVRDecoder<D>
where
    D: DataDictionary,
{
    /// Retrieve an Implicit VR decoder with a custom dictionary
    /// and the given byte order.
    pub fn with_dict(dictionary: D, endianness: Endianness) -> Self {
        ImplicitVRDecoder {
            dict: dictionary,
            basic: BasicDecoder::new(endianness),
        }
    }

    /// Resolve the value representation of an attribute.
    ///
    /// Group length attributes are always UL;
    /// attributes missing from the dictionary are UN.
    pub fn resolve_vr(&self, tag: Tag) -> VR {
        if tag.is_group_length() {
            return VR::UL;
        }
        match self.dict.by_tag(tag) {
            Some(entry) => entry.vr.relaxed(),
            None => {
                tracing::trace!("Tag {} not in dictionary, assuming UN", tag);
                VR::UN
            }
        }
    }
}

impl<D> Decode for ImplicitVRDecoder<D>
where
    D: DataDictionary,
{
    fn decode_header<S>(&self, mut source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadHeaderTagSnafu)?;

        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadLengthSnafu)?;
        let len = self.basic.read_u32(&buf);

        // item delimiters do not have a VR
        let vr = if tag.is_item_group() {
            VR::UN
        } else {
            self.resolve_vr(tag)
        };
        Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let group = self.basic.read_u16(&buf[0..2]);
        let element = self.basic.read_u16(&buf[2..4]);
        let len = self.basic.read_u32(&buf[4..8]);

        SequenceItemHeader::new((group, element), Length(len)).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Tag(
            self.basic.read_u16(&buf[0..2]),
            self.basic.read_u16(&buf[2..4]),
        ))
    }
}

impl<S: ?Sized, D> DecodeFrom<S> for ImplicitVRDecoder<D>
where
    S: Read,
    D: DataDictionary,
{
    #[inline]
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)> {
        Decode::decode_header(self, source)
    }

    #[inline]
    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader> {
        Decode::decode_item_header(self, source)
    }

    #[inline]
    fn decode_tag(&self, source: &mut S) -> Result<Tag> {
        Decode::decode_tag(self, source)
    }
}

#[cfg(test)]
mod tests {
    use super::ImplicitVRDecoder;
    use crate::decode::Decode;
    use byteordered::Endianness;
    use dcmdata_core::dictionary::stub::StubDataDictionary;
    use dcmdata_core::header::{HasLength, Header, Length, SequenceItemHeader};
    use dcmdata_core::{Tag, VR};
    use std::io::{Cursor, Seek, SeekFrom};

    #[rustfmt::skip]
    const RAW: &[u8] = &[
        0x02, 0x00, 0x02, 0x00,     // (0002,0002) Media Storage SOP Class UID
            0x1A, 0x00, 0x00, 0x00, // Length: 26
                b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
                b'5', b'.', b'1', b'.', b'4', b'.', b'1', b'.', b'1', b'.', b'1',
                0x00,
        0x18, 0x00, 0x00, 0x00,     // (0018,0000) group length
            0x04, 0x00, 0x00, 0x00,
                0x10, 0x00, 0x00, 0x00,
        0x09, 0x00, 0x10, 0x10,     // (0009,1010) private data
            0x02, 0x00, 0x00, 0x00,
                0xAB, 0xCD,
        0xFE, 0xFF, 0x00, 0xE0,     // item
            0xFF, 0xFF, 0xFF, 0xFF,
    ];

    #[test]
    fn implicit_vr_le_with_standard_dictionary() {
        let dec = ImplicitVRDecoder::little_endian();
        let mut cursor = Cursor::new(RAW);

        let (elem, bytes_read) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0002, 0x0002));
        assert_eq!(elem.vr(), VR::UI);
        assert_eq!(elem.length(), Length(26));
        assert_eq!(bytes_read, 8);
        cursor.seek(SeekFrom::Current(26)).unwrap();

        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0018, 0x0000));
        assert_eq!(elem.vr(), VR::UL);
        cursor.seek(SeekFrom::Current(4)).unwrap();

        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0009, 0x1010));
        assert_eq!(elem.vr(), VR::UN);
        cursor.seek(SeekFrom::Current(2)).unwrap();

        let item = dec.decode_item_header(&mut cursor).unwrap();
        assert_eq!(item, SequenceItemHeader::Item { len: Length::UNDEFINED });
    }

    #[test]
    fn implicit_vr_be_with_stub_dictionary() {
        let dec = ImplicitVRDecoder::with_dict(StubDataDictionary, Endianness::Big);
        let raw: &[u8] = &[0x00, 0x10, 0x00, 0x10, 0x00, 0x00, 0x00, 0x04];
        let (elem, _) = dec.decode_header(&mut Cursor::new(raw)).unwrap();
        assert_eq!(elem.tag(), Tag(0x0010, 0x0010));
        // nothing can be resolved without a dictionary
        assert_eq!(elem.vr(), VR::UN);
        assert_eq!(elem.length(), Length(4));
    }
}
