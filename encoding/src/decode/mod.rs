//! This module contains all DICOM data element header decoding logic.

use dcmdata_core::error::ErrorKind;
use dcmdata_core::header::{DataElementHeader, SequenceItemHeader};
use dcmdata_core::Tag;
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

pub mod basic;
pub mod explicit;
pub mod implicit;

pub use self::basic::BasicDecoder;
pub use self::explicit::ExplicitVRDecoder;
pub use self::implicit::{ImplicitVRDecoder, StandardImplicitVRDecoder};

/// Module-level error type:
/// for errors which may occur while decoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to read the beginning (tag) of the header"))]
    ReadHeaderTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the item header"))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's item length field"))]
    ReadItemLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's tag field"))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's reserved bytes"))]
    ReadReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's element length field"))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's value representation"))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Bad sequence item header"))]
    BadSequenceHeader { source: dcmdata_core::Error },
}

impl Error {
    /// Classify this error.
    ///
    /// Premature ends of the source are reported as
    /// [`EndOfStream`](ErrorKind::EndOfStream).
    pub fn kind(&self) -> ErrorKind {
        let source = match self {
            Error::BadSequenceHeader { source } => return source.kind(),
            Error::ReadHeaderTag { source, .. }
            | Error::ReadItemHeader { source, .. }
            | Error::ReadItemLength { source, .. }
            | Error::ReadTag { source, .. }
            | Error::ReadReserved { source, .. }
            | Error::ReadLength { source, .. }
            | Error::ReadVr { source, .. } => source,
        };
        if source.kind() == io::ErrorKind::UnexpectedEof {
            ErrorKind::EndOfStream
        } else {
            ErrorKind::InvalidStream
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Obtain the default data element decoder.
/// According to the standard, data elements are encoded in Implicit
/// VR Little Endian by default.
pub fn default_reader() -> StandardImplicitVRDecoder {
    ImplicitVRDecoder::little_endian()
}

/// Obtain a data element decoder for reading the data elements in a DICOM
/// file's Meta information. According to the standard, these are always
/// encoded in Explicit VR Little Endian.
pub fn file_header_decoder() -> ExplicitVRDecoder {
    ExplicitVRDecoder::little_endian()
}

/// Type trait for reading and decoding DICOM data element headers.
///
/// The methods are generic over the data source,
/// so this trait is not object safe.
/// See [`DecodeFrom`] for the object safe counterpart.
pub trait Decode {
    /// Fetch and decode the next data element header from the given source.
    /// This method returns only the header of the element. At the end of this operation, the source
    /// will be pointing at the element's value data,
    /// which should be read or skipped as necessary.
    ///
    /// Decoding an item or sequence delimiter is considered valid, and so should be properly handled
    /// by the decoder. The value representation in this case should be `UN`.
    ///
    /// Returns the expected header and the exact number of bytes read from the source.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read;

    /// Fetch and decode the next sequence item head from the given source.
    /// Item headers never carry a value representation,
    /// so this is the same for every transfer syntax of a given byte order.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;
}

impl<'a, T: ?Sized> Decode for &'a T
where
    T: Decode,
{
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        (**self).decode_header(source)
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        (**self).decode_item_header(source)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        (**self).decode_tag(source)
    }
}

/// Type trait for reading and decoding DICOM header data from a specific source type.
///
/// This trait is object safe,
/// so decoders for any transfer syntax can be chosen at run time.
pub trait DecodeFrom<S: ?Sized + Read>: std::fmt::Debug {
    /// Fetch and decode the next data element header from the given source.
    ///
    /// Returns the expected header and the exact number of bytes read from the source.
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)>;

    /// Fetch and decode the next sequence item head from the given source.
    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader>;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag(&self, source: &mut S) -> Result<Tag>;
}

impl<S: ?Sized, T: ?Sized> DecodeFrom<S> for &T
where
    S: Read,
    T: DecodeFrom<S>,
{
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)> {
        (**self).decode_header(source)
    }

    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader> {
        (**self).decode_item_header(source)
    }

    fn decode_tag(&self, source: &mut S) -> Result<Tag> {
        (**self).decode_tag(source)
    }
}

impl<S: ?Sized, T: ?Sized> DecodeFrom<S> for Box<T>
where
    S: Read,
    T: DecodeFrom<S>,
{
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)> {
        (**self).decode_header(source)
    }

    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader> {
        (**self).decode_item_header(source)
    }

    fn decode_tag(&self, source: &mut S) -> Result<Tag> {
        (**self).decode_tag(source)
    }
}
