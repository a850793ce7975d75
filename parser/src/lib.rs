#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

//! This crate works on top of the element header codecs
//! to read and write whole DICOM element streams.
//!
//! - [`stateful::decode`] contains the [`StatefulDecoder`],
//!   which reads element headers and values from a byte source
//!   while keeping track of the reading position.
//! - [`stateful::encode`] contains the [`StatefulEncoder`],
//!   which writes element headers and values to a byte sink,
//!   applying byte order conversion and even length padding.
//!
//! Values are exchanged in the byte order of the running machine.
//! The conversion to and from the byte order of the transfer syntax
//! happens inside these types.

pub mod stateful;

pub use dcmdata_encoding;
pub use stateful::decode::{DynStatefulDecoder, StatefulDecoder};
pub use stateful::encode::{DynStatefulEncoder, StatefulEncoder};
