#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains the DICOM object tree
//! and the means to read it from and write it to a stream.
//!
//! A data set is an [`Item`]: an ordered collection of nodes,
//! each of them a [primitive element](PrimitiveElement),
//! a [sequence](Sequence) of further items,
//! or the [pixel data](PixelData) element.
//! Data sets are read and written in any supported transfer syntax
//! (see [`Dataset`]),
//! and DICOM files combine one with its file meta group
//! (see [`FileFormat`]).
//!
//! # Examples
//!
//! Open a file and fetch an attribute:
//!
//! ```no_run
//! use dcmdata_dictionary_std::tags;
//! use dcmdata_object::open_file;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let file = open_file("0001.dcm")?;
//! let patient_name = file.dataset().get_string(tags::PATIENT_NAME)?;
//! # Ok(())
//! # }
//! ```
//!
//! Build a data set and write it in a given transfer syntax:
//!
//! ```
//! use dcmdata_core::VR;
//! use dcmdata_dictionary_std::tags;
//! use dcmdata_object::{Dataset, WriteOptions};
//! use dcmdata_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dataset = Dataset::new();
//! dataset.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John")?;
//! let mut out = Vec::new();
//! dataset.write_to(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())?;
//! assert_eq!(out.len(), 16);
//! # Ok(())
//! # }
//! ```
pub mod dataset;
pub mod dicomdir;
pub mod element;
pub mod file;
pub mod item;
pub mod list;
pub mod meta;
pub mod node;
pub mod pixel;
pub mod sequence;
pub mod stack;
pub mod tag;

pub use crate::dataset::{Dataset, ReadOptions, WriteOptions};
pub use crate::dicomdir::{DicomDir, DirectoryRecord};
pub use crate::element::{PrimitiveElement, TransferState};
pub use crate::file::{is_part10, is_part10_bytes, open_file, FileFormat};
pub use crate::item::{Item, SearchMode};
pub use crate::list::{DcmList, ListPos};
pub use crate::meta::{MetaInfo, MetaInfoBuilder};
pub use crate::node::{DcmObject, EncodingType, Ident};
pub use crate::pixel::{OffsetList, PixelData, PixelItem, PixelSequence};
pub use crate::sequence::Sequence;
pub use crate::stack::DcmStack;
pub use crate::tag::DcmTag;
pub use dcmdata_core::Tag;

use dcmdata_core::error::ErrorKind;
use snafu::{Backtrace, Snafu};

/// The implementation class UID written to new file meta groups.
///
/// Generated as a UUID-derived UID under the `2.25` root.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.137038125948464847900039011591283709926";

/// The implementation version name written to new file meta groups.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DCMDATA-RS 0.1";

/// An error which may occur when reading a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum ReadError {
    #[snafu(display("Could not open file '{}'", filename.display()))]
    OpenFile {
        filename: std::path::PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    /// Could not read preamble bytes
    ReadPreambleBytes {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Not a DICOM file: the magic code is missing"))]
    NotDicom { backtrace: Backtrace },
    #[snafu(display("Could not parse meta group data set"))]
    ParseMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    ReadUnsupportedTransferSyntax { uid: String, backtrace: Backtrace },
    #[snafu(display("Could not create data set parser"))]
    CreateParser {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::decode::Error,
    },
    #[snafu(display("Could not look ahead in the source"))]
    PeekSource {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not decode data element"))]
    DecodeElement {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::decode::Error,
    },
    #[snafu(display("Undefined length of element {} at position {}", tag, position))]
    UndefinedLength {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Odd length {} of element {}", len, tag))]
    OddLength {
        tag: Tag,
        len: u32,
        backtrace: Backtrace,
    },
    #[snafu(display("Unexpected tag {} at position {}", tag, position))]
    UnexpectedTag {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not insert element into the data set"))]
    InsertElement {
        #[snafu(backtrace)]
        source: crate::node::Error,
    },
}

impl ReadError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadError::OpenFile { .. }
            | ReadError::ReadPreambleBytes { .. }
            | ReadError::NotDicom { .. }
            | ReadError::ReadUnsupportedTransferSyntax { .. }
            | ReadError::PeekSource { .. }
            | ReadError::UndefinedLength { .. }
            | ReadError::UnexpectedTag { .. } => ErrorKind::InvalidStream,
            ReadError::ParseMetaDataSet { source } => source.kind(),
            ReadError::CreateParser { source } | ReadError::DecodeElement { source } => {
                source.kind()
            }
            ReadError::OddLength { .. } => ErrorKind::CorruptedData,
            ReadError::InsertElement { source } => source.kind(),
        }
    }
}

/// An error which may occur when writing a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum WriteError {
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: std::path::PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write object preamble"))]
    WritePreamble {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write magic code"))]
    WriteMagicCode {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    WriteUnsupportedTransferSyntax { uid: String, backtrace: Backtrace },
    #[snafu(display("Could not create data set printer"))]
    CreatePrinter {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::encode::Error,
    },
    #[snafu(display("Could not print meta group data set"))]
    PrintMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Could not print data set"))]
    PrintDataSet {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::encode::Error,
    },
    #[snafu(display("Could not retrieve element value"))]
    ElementValue {
        #[snafu(backtrace)]
        source: crate::node::Error,
    },
    #[snafu(display("No pixel data representation for transfer syntax {}", uid))]
    MissingRepresentation { uid: String, backtrace: Backtrace },
    #[snafu(display("Element {} is too long to be encoded", tag))]
    ValueTooLong { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Items cannot be written outside of a sequence"))]
    UnexpectedItem { backtrace: Backtrace },
    #[snafu(display("Could not finish the deflated data set"))]
    FinishDeflate {
        backtrace: Backtrace,
        source: std::io::Error,
    },
}

impl WriteError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriteError::WriteFile { .. }
            | WriteError::WritePreamble { .. }
            | WriteError::WriteMagicCode { .. }
            | WriteError::FinishDeflate { .. } => ErrorKind::InvalidStream,
            WriteError::WriteUnsupportedTransferSyntax { .. }
            | WriteError::ValueTooLong { .. }
            | WriteError::UnexpectedItem { .. } => ErrorKind::IllegalCall,
            WriteError::CreatePrinter { source } | WriteError::PrintDataSet { source } => {
                source.kind()
            }
            WriteError::PrintMetaDataSet { source } => source.kind(),
            WriteError::ElementValue { source } => source.kind(),
            WriteError::MissingRepresentation { .. } => ErrorKind::RepresentationNotFound,
        }
    }
}
