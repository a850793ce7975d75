//! Error kinds shared by all layers of the engine,
//! and the error type of this crate.

use crate::header::Tag;
use snafu::{Backtrace, Snafu};
use std::fmt;

/// The category of a failed operation.
///
/// Every error type in the engine can be classified into one of these kinds
/// through its `kind()` method,
/// so that callers may react to a class of failure
/// without matching on every concrete variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tag is malformed or not acceptable in this position.
    InvalidTag,
    /// The requested tag does not exist in the object.
    TagNotFound,
    /// The value representation is unknown or not acceptable.
    InvalidVR,
    /// The byte stream does not follow the expected encoding.
    InvalidStream,
    /// The byte stream ended prematurely.
    EndOfStream,
    /// The data is internally inconsistent.
    CorruptedData,
    /// The operation was called with wrong parameters or in a wrong state.
    IllegalCall,
    /// A sequence delimiter was found.
    SequenceEnd,
    /// An item delimiter was found.
    ItemEnd,
    /// The element is already present in the item.
    DoubledTag,
    /// A memory allocation could not be satisfied.
    MemoryExhausted,
    /// The requested pixel data representation is not available.
    RepresentationNotFound,
    /// The pixel data cannot be converted to the requested representation.
    CannotChangeRepresentation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidTag => "invalid tag",
            ErrorKind::TagNotFound => "tag not found",
            ErrorKind::InvalidVR => "invalid VR",
            ErrorKind::InvalidStream => "invalid stream",
            ErrorKind::EndOfStream => "end of stream",
            ErrorKind::CorruptedData => "corrupted data",
            ErrorKind::IllegalCall => "illegal call",
            ErrorKind::SequenceEnd => "sequence end",
            ErrorKind::ItemEnd => "item end",
            ErrorKind::DoubledTag => "doubled tag",
            ErrorKind::MemoryExhausted => "memory exhausted",
            ErrorKind::RepresentationNotFound => "pixel representation not found",
            ErrorKind::CannotChangeRepresentation => "cannot change pixel representation",
        };
        f.write_str(s)
    }
}

/// The error type of this crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Not a valid tag expression
    #[snafu(display("Could not parse tag from `{}`", text))]
    ParseTag { text: String, backtrace: Backtrace },
    /// Not a known value representation
    #[snafu(display("Unknown value representation `{}`", text))]
    ParseVr { text: String, backtrace: Backtrace },
    /// Not a valid tag range expression
    #[snafu(display("Could not parse tag range from `{}`", text))]
    ParseTagRange { text: String, backtrace: Backtrace },
    /// Not a valid value multiplicity expression
    #[snafu(display("Could not parse value multiplicity from `{}`", text))]
    ParseVm { text: String, backtrace: Backtrace },
    /// An item header was expected, but another tag was found
    #[snafu(display("Unexpected tag {} in sequence item header", tag))]
    UnexpectedItemTag { tag: Tag, backtrace: Backtrace },
    /// An item or sequence delimiter carried a non-zero length
    #[snafu(display("Delimiter {} has non-zero length {}", tag, len))]
    UnexpectedDelimiterLength {
        tag: Tag,
        len: u32,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ParseTag { .. } | Error::ParseTagRange { .. } => ErrorKind::InvalidTag,
            Error::ParseVr { .. } => ErrorKind::InvalidVR,
            Error::ParseVm { .. } => ErrorKind::IllegalCall,
            Error::UnexpectedItemTag { .. } | Error::UnexpectedDelimiterLength { .. } => {
                ErrorKind::InvalidStream
            }
        }
    }
}

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
