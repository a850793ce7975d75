#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of the DICOM data encoding engine,
//! containing the concepts and data structures
//! which every other layer of the engine builds upon.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the data types of a DICOM element header:
//!   tags, lengths and sequence item headers.
//! - [`vr`] holds the value representation enumeration
//!   and its static registry of properties.
//! - [`dictionary`] describes the common behavior of DICOM data dictionaries,
//!   including the range-aware in-memory dictionary registry.
//! - [`vm`] contains the value multiplicity parser.
//! - [`check`] implements value conformance checks per value representation.
//! - [`config`] holds process-wide behavior toggles.
//! - [`error`] contains the error kind taxonomy shared by all crates.
//!
//! [`check`]: ./check/index.html
//! [`config`]: ./config/index.html
//! [`dictionary`]: ./dictionary/index.html
//! [`error`]: ./error/index.html
//! [`header`]: ./header/index.html
//! [`vm`]: ./vm/index.html
//! [`vr`]: ./vr/index.html

pub mod check;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod header;
pub mod vm;
pub mod vr;

pub use dictionary::{DataDictionary, DictEntry};
pub use error::{Error, ErrorKind, Result};
pub use header::{DataElementHeader, HasLength, Header, Length, SequenceItemHeader, Tag};
pub use vm::VmSpec;
pub use vr::VR;

// re-export crates that are part of the public API
pub use chrono;
pub use smallvec;
pub use snafu;
