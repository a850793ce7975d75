//! This module contains all DICOM data element header encoding logic.

use dcmdata_core::error::ErrorKind;
use dcmdata_core::{DataElementHeader, Tag, VR};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

pub mod basic;
pub mod explicit;
pub mod implicit;

pub use self::basic::BasicEncoder;
pub use self::explicit::ExplicitVREncoder;
pub use self::implicit::ImplicitVREncoder;

/// Module-level error type:
/// for errors which may occur while encoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to write tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write value representation"))]
    WriteVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write reserved bytes"))]
    WriteReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write element length"))]
    WriteLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display(
        "Length {} does not fit in the 16-bit length field of a {} element",
        len,
        vr
    ))]
    LengthTooLong {
        vr: VR,
        len: u32,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LengthTooLong { .. } => ErrorKind::IllegalCall,
            _ => ErrorKind::InvalidStream,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type trait for a data element header encoder.
///
/// The methods are generic over the destination,
/// so this trait is not object safe.
/// See [`EncodeTo`] for the object safe counterpart.
pub trait Encode {
    /// Encode and write an element tag.
    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write;

    /// Encode and write a DICOM sequence item header to the given destination.
    /* Although item element headers are always a tag and length sequence regardless of TS,
    the encoding of the length is unknown at this level. So no default impl. */
    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write;

    /// Encode and write a DICOM sequence item delimiter to the given destination.
    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        self.encode_tag(to, Tag::ITEM_DELIMITATION)?;
        to.write_all(&[0u8; 4]).context(WriteItemDelimiterSnafu)?;
        Ok(())
    }

    /// Encode and write a DICOM sequence delimiter to the given destination.
    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        self.encode_tag(to, Tag::SEQUENCE_DELIMITATION)?;
        to.write_all(&[0u8; 4])
            .context(WriteSequenceDelimiterSnafu)?;
        Ok(())
    }
}

impl<T: ?Sized> Encode for &T
where
    T: Encode,
{
    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write,
    {
        (**self).encode_tag(to, tag)
    }

    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write,
    {
        (**self).encode_element_header(to, de)
    }

    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write,
    {
        (**self).encode_item_header(to, len)
    }

    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        (**self).encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        (**self).encode_sequence_delimiter(to)
    }
}

/// Type trait for a data element encoder to a single known writer type.
///
/// This trait is object safe,
/// so encoders for any transfer syntax can be chosen at run time.
pub trait EncodeTo<W: ?Sized>: std::fmt::Debug {
    /// Encode and write an element tag.
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()>;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize>;

    /// Encode and write a DICOM sequence item header to the given destination.
    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()>;

    /// Encode and write a DICOM sequence item delimiter to the given destination.
    fn encode_item_delimiter(&self, to: &mut W) -> Result<()>;

    /// Encode and write a DICOM sequence delimiter to the given destination.
    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()>;
}

impl<W: ?Sized, T: ?Sized> EncodeTo<W> for &T
where
    T: EncodeTo<W>,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        (**self).encode_tag(to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        (**self).encode_element_header(to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        (**self).encode_item_header(to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        (**self).encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        (**self).encode_sequence_delimiter(to)
    }
}

impl<W: ?Sized, T: ?Sized> EncodeTo<W> for Box<T>
where
    T: EncodeTo<W>,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        (**self).encode_tag(to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        (**self).encode_element_header(to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        (**self).encode_item_header(to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        (**self).encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        (**self).encode_sequence_delimiter(to)
    }
}
