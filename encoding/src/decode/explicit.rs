//! Explicit VR syntax transfer implementation,
//! for both Little Endian and Big Endian.

use crate::decode::basic::BasicDecoder;
use crate::decode::{
    BadSequenceHeaderSnafu, Decode, DecodeFrom, ReadHeaderTagSnafu, ReadItemHeaderSnafu,
    ReadItemLengthSnafu, ReadLengthSnafu, ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::Endianness;
use dcmdata_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmdata_core::{Tag, VR};
use snafu::ResultExt;
use std::io::Read;

/// A data element decoder for the Explicit VR transfer syntaxes.
#[derive(Debug, Default, Clone)]
pub struct ExplicitVRDecoder {
    basic: BasicDecoder,
}

impl ExplicitVRDecoder {
    /// Create a decoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        ExplicitVRDecoder {
            basic: BasicDecoder::new(endianness),
        }
    }

    /// Decoder for Explicit VR Little Endian.
    pub fn little_endian() -> Self {
        Self::new(Endianness::Little)
    }

    /// Decoder for Explicit VR Big Endian.
    pub fn big_endian() -> Self {
        Self::new(Endianness::Big)
    }

    /// The byte order expected by this decoder.
    pub fn endianness(&self) -> Endianness {
        self.basic.endianness()
    }
}

impl Decode for ExplicitVRDecoder {
    fn decode_header<S>(&self, mut source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        // retrieve tag
        let Tag(group, element) = self
            .basic
            .decode_tag(&mut source)
            .context(ReadHeaderTagSnafu)?;

        let mut buf = [0u8; 4];
        if group == 0xFFFE {
            // item delimiters do not have VR or reserved field
            source.read_exact(&mut buf).context(ReadItemLengthSnafu)?;
            let len = self.basic.read_u32(&buf);
            return Ok((
                DataElementHeader::new((group, element), VR::UN, Length(len)),
                8, // tag + len
            ));
        }

        // retrieve explicit VR
        source.read_exact(&mut buf[0..2]).context(ReadVrSnafu)?;
        let vr = match VR::from_binary([buf[0], buf[1]]) {
            Some(vr) => vr,
            None => {
                tracing::warn!(
                    "Unknown value representation {:02X}{:02X} in element ({:04X},{:04X}), reading as UN",
                    buf[0],
                    buf[1],
                    group,
                    element
                );
                VR::UN
            }
        };

        // PS3.5 7.1.2: the VRs with extended length have two reserved bytes
        // followed by a 32-bit length field,
        // all others have a 16-bit length field
        let (len, bytes_read) = if vr.has_extended_length() {
            source
                .read_exact(&mut buf[0..2])
                .context(ReadReservedSnafu)?;
            source.read_exact(&mut buf).context(ReadLengthSnafu)?;
            (self.basic.read_u32(&buf), 12)
        } else {
            source.read_exact(&mut buf[0..2]).context(ReadLengthSnafu)?;
            (u32::from(self.basic.read_u16(&buf[0..2])), 8)
        };

        Ok((
            DataElementHeader::new((group, element), vr, Length(len)),
            bytes_read,
        ))
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

impl<S: ?Sized> DecodeFrom<S> for ExplicitVRDecoder
where
    S: Read,
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
    use super::ExplicitVRDecoder;
    use crate::decode::{Decode, Error};
    use dcmdata_core::header::{HasLength, Header, Length, SequenceItemHeader};
    use dcmdata_core::{Tag, VR};
    use std::io::{Cursor, Read, Seek, SeekFrom};

    // manually crafting some DICOM data elements
    #[rustfmt::skip]
    const RAW_LE: &[u8] = &[
        0x02, 0x00, 0x02, 0x00,     // (0002,0002) Media Storage SOP Class UID
            b'U', b'I',             // VR: UI
            0x1A, 0x00,             // Length: 26 bytes
                b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
                b'5', b'.', b'1', b'.', b'4', b'.', b'1', b'.', b'1', b'.', b'1',
                0x00,               // padding
        0x08, 0x00, 0x1B, 0x04,     // (0008,041B) RecordKey
            b'O', b'B',             // VR: OB
            0x00, 0x00,             // reserved
            0x02, 0x00, 0x00, 0x00, // Length: 2 bytes
                0x12, 0x34,
        0x08, 0x00, 0x05, 0x00,     // (0008,0005) Specific Character Set
            b'Z', b'Z',             // VR: unknown
            0x00, 0x00,             // reserved
            0x00, 0x00, 0x00, 0x00, // Length: 0 bytes
    ];

    #[rustfmt::skip]
    const RAW_BE: &[u8] = &[
        0x00, 0x08, 0x11, 0x40,     // (0008,1140) Referenced Image Sequence
            b'S', b'Q',             // VR: SQ
            0x00, 0x00,             // reserved
            0xFF, 0xFF, 0xFF, 0xFF, // Length: undefined
        0xFF, 0xFE, 0xE0, 0x00,     // Item
            0x00, 0x00, 0x00, 0x0A, // Length: 10
        0x00, 0x28, 0x00, 0x10,     // (0028,0010) Rows
            b'U', b'S',
            0x00, 0x02,             // Length: 2 bytes
                0x02, 0x00,         // 512
        0xFF, 0xFE, 0xE0, 0xDD,     // Sequence delimiter
            0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decode_explicit_vr_le() {
        let dec = ExplicitVRDecoder::little_endian();
        let mut cursor = Cursor::new(RAW_LE);
        {
            let (elem, bytes_read) = dec
                .decode_header(&mut cursor)
                .expect("should find an element");
            assert_eq!(elem.tag(), Tag(0x0002, 0x0002));
            assert_eq!(elem.vr(), VR::UI);
            assert_eq!(elem.length(), Length(26));
            assert_eq!(bytes_read, 8);
            assert_eq!(cursor.seek(SeekFrom::Current(26)).unwrap(), 34);
        }
        {
            let (elem, bytes_read) = dec
                .decode_header(&mut cursor)
                .expect("should find an element");
            assert_eq!(elem.tag(), Tag(0x0008, 0x041B));
            assert_eq!(elem.vr(), VR::OB);
            assert_eq!(elem.length(), Length(2));
            assert_eq!(bytes_read, 12);
            let mut value = [0u8; 2];
            cursor.read_exact(&mut value).unwrap();
            assert_eq!(value, [0x12, 0x34]);
        }
        {
            // unknown VR degrades to UN with a long length field
            let (elem, bytes_read) = dec
                .decode_header(&mut cursor)
                .expect("should find an element");
            assert_eq!(elem.tag(), Tag(0x0008, 0x0005));
            assert_eq!(elem.vr(), VR::UN);
            assert_eq!(elem.length(), Length(0));
            assert_eq!(bytes_read, 12);
        }
        assert!(dec.decode_header(&mut cursor).is_err());
    }

    #[test]
    fn decode_explicit_vr_be_sequence() {
        let dec = ExplicitVRDecoder::big_endian();
        let mut cursor = Cursor::new(RAW_BE);
        let (elem, bytes_read) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0008, 0x1140));
        assert_eq!(elem.vr(), VR::SQ);
        assert!(elem.length().is_undefined());
        assert_eq!(bytes_read, 12);

        let item = dec.decode_item_header(&mut cursor).unwrap();
        assert_eq!(item, SequenceItemHeader::Item { len: Length(10) });

        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0028, 0x0010));
        assert_eq!(elem.length(), Length(2));
        let mut value = [0u8; 2];
        cursor.read_exact(&mut value).unwrap();
        assert_eq!(u16::from_be_bytes(value), 512);

        let delimiter = dec.decode_item_header(&mut cursor).unwrap();
        assert_eq!(delimiter, SequenceItemHeader::SequenceDelimiter);
    }

    #[test]
    fn non_item_tag_is_rejected_as_item_header() {
        let dec = ExplicitVRDecoder::little_endian();
        let mut cursor = Cursor::new(RAW_LE);
        let err = dec.decode_item_header(&mut cursor).unwrap_err();
        assert!(matches!(err, Error::BadSequenceHeader { .. }));
    }
}
