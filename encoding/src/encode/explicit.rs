//! Explicit VR syntax transfer encoding,
//! for both Little Endian and Big Endian.

use crate::encode::basic::BasicEncoder;
use crate::encode::{
    Encode, EncodeTo, LengthTooLongSnafu, Result, WriteItemHeaderSnafu, WriteLengthSnafu,
    WriteReservedSnafu, WriteTagSnafu, WriteVrSnafu,
};
use byteordered::Endianness;
use dcmdata_core::header::{DataElementHeader, Header};
use dcmdata_core::Tag;
use snafu::{ensure, ResultExt};
use std::io::Write;

/// A data element encoder for the Explicit VR transfer syntaxes.
#[derive(Debug, Default, Clone)]
pub struct ExplicitVREncoder {
    basic: BasicEncoder,
}

impl ExplicitVREncoder {
    /// Create an encoder for the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        ExplicitVREncoder {
            basic: BasicEncoder::new(endianness),
        }
    }

    /// Encoder for Explicit VR Little Endian.
    pub fn little_endian() -> Self {
        Self::new(Endianness::Little)
    }

    /// Encoder for Explicit VR Big Endian.
    pub fn big_endian() -> Self {
        Self::new(Endianness::Big)
    }
}

impl Encode for ExplicitVREncoder {
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

        if de.tag().is_item_group() {
            // items and delimiters have no VR
            self.basic.encode_ul(&mut *to, de.len.0).context(WriteLengthSnafu)?;
            return Ok(8);
        }

        to.write_all(&de.vr().to_bytes()).context(WriteVrSnafu)?;
        if de.vr().has_extended_length() {
            to.write_all(&[0u8; 2]).context(WriteReservedSnafu)?;
            self.basic.encode_ul(&mut *to, de.len.0).context(WriteLengthSnafu)?;
            Ok(12)
        } else {
            ensure!(
                de.len.0 <= u32::from(u16::MAX),
                LengthTooLongSnafu {
                    vr: de.vr(),
                    len: de.len.0
                }
            );
            self.basic
                .encode_us(&mut *to, de.len.0 as u16)
                .context(WriteLengthSnafu)?;
            Ok(8)
        }
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

impl<W: ?Sized> EncodeTo<W> for ExplicitVREncoder
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

#[cfg(test)]
mod tests {
    use super::ExplicitVREncoder;
    use crate::decode::{Decode, ExplicitVRDecoder};
    use crate::encode::{Encode, Error};
    use dcmdata_core::header::{DataElementHeader, Length};
    use dcmdata_core::{Tag, VR};
    use std::io::Cursor;

    #[test]
    fn encode_explicit_vr_le() {
        let enc = ExplicitVREncoder::little_endian();
        let mut out = Vec::new();

        let n = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag(0x0002, 0x0002), VR::UI, Length(26)),
            )
            .unwrap();
        assert_eq!(n, 8);
        assert_eq!(&out[..], &[0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1A, 0x00]);

        out.clear();
        let n = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag(0x0008, 0x1140), VR::SQ, Length::UNDEFINED),
            )
            .unwrap();
        assert_eq!(n, 12);
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x08, 0x00, 0x40, 0x11,
            b'S', b'Q', 0x00, 0x00,
            0xFF, 0xFF, 0xFF, 0xFF,
        ];
        assert_eq!(&out[..], expected);
    }

    #[test]
    fn encode_explicit_vr_be() {
        let enc = ExplicitVREncoder::big_endian();
        let mut out = Vec::new();
        enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(2)),
        )
        .unwrap();
        enc.encode_item_header(&mut out, 10).unwrap();
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02,
            0xFF, 0xFE, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x0A,
        ];
        assert_eq!(&out[..], expected);
    }

    #[test]
    fn short_length_overflow_is_rejected() {
        let enc = ExplicitVREncoder::little_endian();
        let mut out = Vec::new();
        let err = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(0x1_0000)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::LengthTooLong { vr: VR::PN, .. }));
    }

    #[test]
    fn headers_survive_a_round_trip() {
        let headers = [
            DataElementHeader::new(Tag(0x0008, 0x0005), VR::CS, Length(10)),
            DataElementHeader::new(Tag(0x0008, 0x1140), VR::SQ, Length::UNDEFINED),
            DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OW, Length(512)),
            DataElementHeader::new(Tag(0x0018, 0x9219), VR::SV, Length(8)),
        ];
        for (enc, dec) in vec![
            (ExplicitVREncoder::little_endian(), ExplicitVRDecoder::little_endian()),
            (ExplicitVREncoder::big_endian(), ExplicitVRDecoder::big_endian()),
        ] {
            let mut out = Vec::new();
            for h in &headers {
                enc.encode_element_header(&mut out, *h).unwrap();
            }
            let mut cursor = Cursor::new(out);
            for h in &headers {
                let (decoded, _) = dec.decode_header(&mut cursor).unwrap();
                assert_eq!(decoded, *h);
            }
        }
    }
}
