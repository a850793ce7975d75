//! Module holding a stateful DICOM data encoding abstraction.
//!
//! The [`StatefulEncoder`] writes element headers and values,
//! converting values from the byte order of the running machine
//! and applying the necessary padding to conform to DICOM encoding rules.

use crate::stateful::even_len;
use dcmdata_core::error::ErrorKind;
use dcmdata_core::{DataElementHeader, Length, VR};
use dcmdata_encoding::encode::{EncodeTo, ExplicitVREncoder};
use dcmdata_encoding::swap::{swap_if_necessary, ByteOrder};
use dcmdata_encoding::transfer_syntax::DynEncoder;
use dcmdata_encoding::{Endianness, TransferSyntax};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Encoding in transfer syntax {} is unsupported", ts))]
    UnsupportedTransferSyntax {
        ts: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to encode a data piece at position {}", position))]
    EncodeData {
        position: u64,
        #[snafu(backtrace)]
        source: dcmdata_encoding::encode::Error,
    },

    #[snafu(display("Could not write value data at position {}", position))]
    WriteValueData {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not flush the output"))]
    Flush {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedTransferSyntax { .. } => ErrorKind::IllegalCall,
            Error::EncodeData { source, .. } => source.kind(),
            Error::WriteValueData { .. } | Error::Flush { .. } => ErrorKind::InvalidStream,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Alias for a stateful encoder
/// whose element header encoder is resolved at run time.
pub type DynStatefulEncoder<W> = StatefulEncoder<DynEncoder<W>, W>;

/// Also called a printer, this encoder type provides a stateful mid-level
/// abstraction for writing DICOM content. Unlike `Encode`,
/// the stateful encoder writes values with padding and in the right byte order,
/// and keeps track of how many bytes were written.
/// `W` is the write target and `E` is the element header encoder.
#[derive(Debug)]
pub struct StatefulEncoder<E, W> {
    to: W,
    encoder: E,
    byte_order: ByteOrder,
    bytes_written: u64,
    buffer: Vec<u8>,
}

impl<E, W> StatefulEncoder<E, W> {
    /// Create a new stateful encoder from its parts.
    /// `endianness` must be the byte order produced by `encoder`.
    pub fn new(to: W, encoder: E, endianness: Endianness) -> Self {
        StatefulEncoder {
            to,
            encoder,
            byte_order: ByteOrder::from(endianness),
            bytes_written: 0,
            buffer: Vec::with_capacity(128),
        }
    }

    /// The number of bytes written so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The byte order of the output.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Retrieve the underlying writer.
    pub fn into_inner(self) -> W {
        self.to
    }
}

impl<W> DynStatefulEncoder<W>
where
    W: Write,
{
    /// Create a new stateful encoder for the given transfer syntax.
    pub fn from_transfer_syntax(to: W, ts: &TransferSyntax) -> Result<Self> {
        let encoder = ts
            .encoder_for::<W>()
            .context(UnsupportedTransferSyntaxSnafu { ts: ts.uid() })?;
        tracing::debug!("Writing in {}", ts.name());
        Ok(StatefulEncoder::new(to, encoder, ts.endianness()))
    }
}

impl<W> StatefulEncoder<ExplicitVREncoder, W>
where
    W: Write,
{
    /// Create a new stateful encoder for writing the file meta group,
    /// which is always in _Explicit VR Little Endian_.
    pub fn file_header_printer(to: W) -> Self {
        StatefulEncoder::new(to, ExplicitVREncoder::little_endian(), Endianness::Little)
    }
}

impl<E, W> StatefulEncoder<E, W>
where
    W: Write,
    E: EncodeTo<W>,
{
    /// Encode and write a data element header.
    /// A defined odd length is rounded up to the padded value length.
    pub fn encode_element_header(&mut self, mut de: DataElementHeader) -> Result<()> {
        if let Some(len) = de.len.get() {
            de.len = Length(even_len(len))
        }
        let bytes = self
            .encoder
            .encode_element_header(&mut self.to, de)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += bytes as u64;
        Ok(())
    }

    /// Encode and write an item header,
    /// where `len` is the specified length of the item
    /// (can be `0xFFFF_FFFF` for undefined length).
    pub fn encode_item_header(&mut self, len: u32) -> Result<()> {
        let len = if len == Length::UNDEFINED.0 {
            len
        } else {
            even_len(len)
        };
        self.encoder
            .encode_item_header(&mut self.to, len)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write an item delimiter.
    pub fn encode_item_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_item_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write a sequence delimiter.
    pub fn encode_sequence_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_sequence_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Write the given bytes as they are, without any padding.
    pub fn write_raw_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.to.write_all(bytes).context(WriteValueDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write the given bytes as they are,
    /// followed by a zero byte if their length is odd.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_padded(bytes, 0)
    }

    /// Write a value held in the byte order of the running machine,
    /// converting it to the byte order of the output
    /// and padding it to an even length.
    pub fn write_value(&mut self, vr: VR, value: &[u8]) -> Result<()> {
        let width = vr.value_width();
        if width <= 1 || self.byte_order == ByteOrder::native() {
            return self.write_padded(value, vr.padding());
        }
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        buffer.extend_from_slice(value);
        swap_if_necessary(self.byte_order, ByteOrder::native(), &mut buffer, width);
        let out = self.write_padded(&buffer, vr.padding());
        self.buffer = buffer;
        out
    }

    /// Encode and write a primitive element,
    /// with its value in the byte order of the running machine.
    /// The header length is derived from the value.
    pub fn encode_primitive_element(&mut self, header: &DataElementHeader, value: &[u8]) -> Result<()> {
        let header = DataElementHeader::new(header.tag, header.vr, Length(value.len() as u32));
        self.encode_element_header(header)?;
        self.write_value(header.vr, value)
    }

    /// Encode and write the basic offset table item
    /// of an encapsulated pixel data element.
    pub fn encode_offset_table(&mut self, table: &[u32]) -> Result<()> {
        self.encode_item_header(table.len() as u32 * 4)?;
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        for offset in table {
            match self.byte_order {
                ByteOrder::Big => buffer.extend_from_slice(&offset.to_be_bytes()),
                _ => buffer.extend_from_slice(&offset.to_le_bytes()),
            }
        }
        let out = self.write_raw_bytes(&buffer);
        self.buffer = buffer;
        out
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.to.flush().context(FlushSnafu)
    }

    fn write_padded(&mut self, bytes: &[u8], padding: u8) -> Result<()> {
        self.write_raw_bytes(bytes)?;
        if bytes.len() % 2 == 1 {
            self.write_raw_bytes(&[padding])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_core::Tag;
    use dcmdata_encoding::encode::ImplicitVREncoder;
    use rstest::rstest;

    /// Odd lengthed string values are padded with a space
    #[test]
    fn encode_odd_length_element_pn() {
        let mut out = Vec::new();
        {
            let mut encoder = StatefulEncoder::file_header_printer(&mut out);
            let header = DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(0));
            encoder.encode_primitive_element(&header, b"Doe^John").unwrap();
            let header = DataElementHeader::new(Tag(0x0010, 0x0020), VR::LO, Length(0));
            encoder.encode_primitive_element(&header, b"ABC").unwrap();
            assert_eq!(encoder.bytes_written(), 28);
        }
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00,
                b'D', b'o', b'e', b'^', b'J', b'o', b'h', b'n',
            0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x04, 0x00,
                b'A', b'B', b'C', b' ',
        ];
        assert_eq!(&out[..], expected);
    }

    /// Odd lengthed UIDs are padded with a null character
    #[test]
    fn encode_odd_length_element_uid() {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::file_header_printer(&mut out);
        let header = DataElementHeader::new(Tag(0x0002, 0x0010), VR::UI, Length(0));
        encoder.encode_primitive_element(&header, b"1.2.840.10008.1.2").unwrap();
        assert_eq!(out.len(), 8 + 18);
        assert_eq!(&out[6..8], &[0x12, 0x00]);
        assert_eq!(out.last(), Some(&0));
    }

    /// Odd lengthed item values are encoded with even padding
    #[test]
    fn encode_odd_length_item_bytes() {
        let mut out = Vec::new();
        {
            let mut encoder = StatefulEncoder::file_header_printer(&mut out);
            encoder.encode_item_header(9).unwrap();
            encoder.write_bytes(&[5; 9]).unwrap();
        }
        assert_eq!(
            &out[..],
            &[
                0xFE, 0xFF, 0x00, 0xE0, // tag (0xFFFE, 0xE000)
                0x0A, 0x00, 0x00, 0x00, // length
                // ---------- value ----------
                5, 5, 5, 5, 5, 5, 5, 5, 5, 0,
            ][..],
        )
    }

    #[test]
    fn values_are_written_in_output_byte_order() {
        let be = TransferSyntax::new(
            "1.2.840.10008.1.2.2",
            "Explicit VR Big Endian",
            Endianness::Big,
            true,
        );
        let mut out = Vec::new();
        let mut encoder = DynStatefulEncoder::from_transfer_syntax(&mut out, &be).unwrap();
        let mut value = Vec::new();
        value.extend_from_slice(&512u16.to_ne_bytes());
        value.extend_from_slice(&16u16.to_ne_bytes());
        let header = DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(0));
        encoder.encode_primitive_element(&header, &value).unwrap();
        encoder.encode_offset_table(&[0, 0x100]).unwrap();
        drop(encoder);
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x04,
                0x02, 0x00, 0x00, 0x10,
            0xFF, 0xFE, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x08,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
        ];
        assert_eq!(&out[..], expected);
    }

    #[test]
    fn delimiters_in_implicit_vr() {
        let mut out = Vec::new();
        let mut encoder =
            StatefulEncoder::new(&mut out, ImplicitVREncoder::little_endian(), Endianness::Little);
        encoder.encode_item_header(Length::UNDEFINED.0).unwrap();
        encoder.encode_item_delimiter().unwrap();
        encoder.encode_sequence_delimiter().unwrap();
        assert_eq!(encoder.bytes_written(), 24);
        assert_eq!(&out[4..8], &[0xFF; 4]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 2)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(0xFFFF_FFFD, 0xFFFF_FFFE)]
    fn test_even_len(#[case] len: u32, #[case] expected: u32) {
        assert_eq!(even_len(len), expected);
    }
}
