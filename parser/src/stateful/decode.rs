//! This module provides a higher level abstraction for reading DICOM data.
//! The [`StatefulDecoder`] binds a byte source to an element header decoder,
//! reads element values and keeps track of the reading position.

use dcmdata_core::error::ErrorKind;
use dcmdata_core::header::{DataElementHeader, SequenceItemHeader};
use dcmdata_core::Tag;
use dcmdata_encoding::decode::{DecodeFrom, ExplicitVRDecoder, StandardImplicitVRDecoder};
use dcmdata_encoding::swap::{swap_if_necessary, ByteOrder};
use dcmdata_encoding::transfer_syntax::DynDecoder;
use dcmdata_encoding::{Endianness, TransferSyntax};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::TryReserveError;
use std::io::{self, Read};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Decoding in transfer syntax {} is unsupported", ts))]
    UnsupportedTransferSyntax {
        ts: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not decode element header at position {}", position))]
    DecodeElementHeader {
        position: u64,
        #[snafu(backtrace)]
        source: dcmdata_encoding::decode::Error,
    },

    #[snafu(display("Could not decode item header at position {}", position))]
    DecodeItemHeader {
        position: u64,
        #[snafu(backtrace)]
        source: dcmdata_encoding::decode::Error,
    },

    #[snafu(display("Could not decode tag at position {}", position))]
    DecodeTag {
        position: u64,
        #[snafu(backtrace)]
        source: dcmdata_encoding::decode::Error,
    },

    #[snafu(display(
        "Undefined value length of element tagged {} at position {}",
        tag,
        position
    ))]
    UndefinedValueLength {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },

    #[snafu(display("Element tagged {} is a sequence, not a primitive value", tag))]
    NonPrimitiveType { tag: Tag, backtrace: Backtrace },

    #[snafu(display("Could not read value data at position {}", position))]
    ReadValueData {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Value at position {} ended after {} of {} bytes",
        position,
        got,
        expected
    ))]
    TruncatedValue {
        position: u64,
        expected: u32,
        got: u64,
        backtrace: Backtrace,
    },

    #[snafu(display("Cannot allocate {} bytes for value at position {}", len, position))]
    AllocationSize {
        len: u32,
        position: u64,
        source: TryReserveError,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not skip {} bytes at position {}", len, position))]
    SkipValue {
        len: u64,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedTransferSyntax { .. }
            | Error::UndefinedValueLength { .. }
            | Error::NonPrimitiveType { .. } => ErrorKind::IllegalCall,
            Error::DecodeElementHeader { source, .. }
            | Error::DecodeItemHeader { source, .. }
            | Error::DecodeTag { source, .. } => source.kind(),
            Error::ReadValueData { source, .. } | Error::SkipValue { source, .. } => {
                if source.kind() == io::ErrorKind::UnexpectedEof {
                    ErrorKind::EndOfStream
                } else {
                    ErrorKind::InvalidStream
                }
            }
            Error::TruncatedValue { .. } => ErrorKind::EndOfStream,
            Error::AllocationSize { .. } => ErrorKind::MemoryExhausted,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Alias for a dynamically resolved stateful decoder.
/// Although the data source may be known at compile time,
/// the required decoder may vary according to an object's transfer syntax.
pub type DynStatefulDecoder<S> = StatefulDecoder<DynDecoder<S>, S>;

/// A stateful abstraction for the full DICOM content reading process.
///
/// `S` is the type of the byte source,
/// `D` is the element header decoder.
/// Values are handed out in the byte order of the running machine.
#[derive(Debug)]
pub struct StatefulDecoder<D, S> {
    from: S,
    decoder: D,
    byte_order: ByteOrder,
    position: u64,
    /// decoder for the content of sequences of unknown VR
    implicit: StandardImplicitVRDecoder,
    /// nesting level of such sequences
    implicit_depth: u32,
}

impl<S> DynStatefulDecoder<S>
where
    S: Read,
{
    /// Create a new stateful decoder for the given transfer syntax.
    pub fn new_with(from: S, ts: &TransferSyntax) -> Result<Self> {
        let decoder = ts
            .decoder_for::<S>()
            .context(UnsupportedTransferSyntaxSnafu { ts: ts.uid() })?;
        Ok(StatefulDecoder::new(from, decoder, ts.endianness()))
    }
}

impl<S> StatefulDecoder<ExplicitVRDecoder, S>
where
    S: Read,
{
    /// Create a new stateful decoder for reading the file meta group,
    /// which is always in _Explicit VR Little Endian_.
    pub fn file_header_parser(from: S) -> Self {
        StatefulDecoder::new(from, ExplicitVRDecoder::little_endian(), Endianness::Little)
    }
}

impl<D, S> StatefulDecoder<D, S> {
    /// Create a new stateful decoder from its parts.
    /// `endianness` must be the byte order expected by `decoder`.
    pub fn new(from: S, decoder: D, endianness: Endianness) -> Self {
        StatefulDecoder {
            from,
            decoder,
            byte_order: ByteOrder::from(endianness),
            position: 0,
            implicit: StandardImplicitVRDecoder::little_endian(),
            implicit_depth: 0,
        }
    }

    /// Start counting positions from the given value,
    /// for sources which do not start at the beginning of a stream.
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    /// The number of bytes read so far,
    /// plus the initial position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The byte order of the data currently being read.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        if self.implicit_depth > 0 {
            ByteOrder::Little
        } else {
            self.byte_order
        }
    }

    /// Decode what follows in _Implicit VR Little Endian_,
    /// regardless of the transfer syntax,
    /// until the matching call to [`leave_implicit_vr_le`].
    ///
    /// This is how the items of an element with the UN value representation
    /// and undefined length are encoded.
    /// Calls may be nested.
    ///
    /// [`leave_implicit_vr_le`]: StatefulDecoder::leave_implicit_vr_le
    pub fn enter_implicit_vr_le(&mut self) {
        self.implicit_depth += 1;
    }

    /// Return to the encoding in place
    /// before the last call to [`enter_implicit_vr_le`].
    ///
    /// [`enter_implicit_vr_le`]: StatefulDecoder::enter_implicit_vr_le
    pub fn leave_implicit_vr_le(&mut self) {
        self.implicit_depth = self.implicit_depth.saturating_sub(1);
    }

    /// Whether the decoder is reading the content
    /// of a sequence of unknown VR.
    pub fn is_implicit_vr_le(&self) -> bool {
        self.implicit_depth > 0
    }

    /// Borrow the underlying source.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.from
    }

    /// Retrieve the underlying source.
    pub fn into_inner(self) -> S {
        self.from
    }
}

impl<D, S> StatefulDecoder<D, S>
where
    D: DecodeFrom<S>,
    S: Read,
{
    /// Decode the next data element header.
    pub fn decode_header(&mut self) -> Result<DataElementHeader> {
        let decoded = if self.implicit_depth > 0 {
            DecodeFrom::<S>::decode_header(&self.implicit, &mut self.from)
        } else {
            self.decoder.decode_header(&mut self.from)
        };
        let (header, bytes_read) = decoded.context(DecodeElementHeaderSnafu {
            position: self.position,
        })?;
        tracing::trace!("{:?} at position {}", header, self.position);
        self.position += bytes_read as u64;
        Ok(header)
    }

    /// Decode the next item header, item delimiter or sequence delimiter.
    pub fn decode_item_header(&mut self) -> Result<SequenceItemHeader> {
        let decoded = if self.implicit_depth > 0 {
            DecodeFrom::<S>::decode_item_header(&self.implicit, &mut self.from)
        } else {
            self.decoder.decode_item_header(&mut self.from)
        };
        let header = decoded.context(DecodeItemHeaderSnafu {
            position: self.position,
        })?;
        self.position += 8;
        Ok(header)
    }

    /// Decode a single tag.
    pub fn decode_tag(&mut self) -> Result<Tag> {
        let decoded = if self.implicit_depth > 0 {
            DecodeFrom::<S>::decode_tag(&self.implicit, &mut self.from)
        } else {
            self.decoder.decode_tag(&mut self.from)
        };
        let tag = decoded.context(DecodeTagSnafu {
            position: self.position,
        })?;
        self.position += 4;
        Ok(tag)
    }

    /// Read the value of a primitive element
    /// and convert it to the byte order of the running machine,
    /// in units of the value representation's width.
    pub fn read_value(&mut self, header: &DataElementHeader) -> Result<Vec<u8>> {
        let mut data = self.read_value_preserved(header)?;
        swap_if_necessary(
            ByteOrder::native(),
            self.byte_order(),
            &mut data,
            header.vr().value_width(),
        );
        Ok(data)
    }

    /// Read the value of a primitive element as it is in the source.
    pub fn read_value_preserved(&mut self, header: &DataElementHeader) -> Result<Vec<u8>> {
        ensure!(
            header.vr() != dcmdata_core::VR::SQ,
            NonPrimitiveTypeSnafu { tag: header.tag }
        );
        let len = header.len.get().context(UndefinedValueLengthSnafu {
            tag: header.tag,
            position: self.position,
        })?;
        self.read_raw_bytes(len)
    }

    /// Read exactly `len` bytes from the source,
    /// such as the contents of a pixel data fragment.
    pub fn read_raw_bytes(&mut self, len: u32) -> Result<Vec<u8>> {
        let position = self.position;
        let mut data = Vec::new();
        data.try_reserve_exact(len as usize)
            .context(AllocationSizeSnafu { len, position })?;
        let got = (&mut self.from)
            .take(u64::from(len))
            .read_to_end(&mut data)
            .context(ReadValueDataSnafu { position })? as u64;
        self.position += got;
        ensure!(
            got == u64::from(len),
            TruncatedValueSnafu {
                position,
                expected: len,
                got,
            }
        );
        Ok(data)
    }

    /// Skip over the value of a primitive element.
    pub fn skip_value(&mut self, header: &DataElementHeader) -> Result<()> {
        let len = header.len.get().context(UndefinedValueLengthSnafu {
            tag: header.tag,
            position: self.position,
        })?;
        self.skip_bytes(u64::from(len))
    }

    /// Skip `len` bytes of the source.
    pub fn skip_bytes(&mut self, len: u64) -> Result<()> {
        let position = self.position;
        let skipped = io::copy(&mut (&mut self.from).take(len), &mut io::sink())
            .context(SkipValueSnafu { len, position })?;
        self.position += skipped;
        if skipped < len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof))
                .context(SkipValueSnafu { len, position });
        }
        Ok(())
    }
}
