#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! DICOM encoding and decoding primitives.
//!
//! This crate provides the byte order layer of the engine:
//!
//! - [`swap`] converts value bytes between little and big endian in place;
//! - [`decode`] and [`encode`] read and write data element headers
//!   in the explicit and implicit VR flavors, for either byte order;
//! - [`transfer_syntax`] describes a transfer syntax
//!   and builds the matching header codecs;
//! - [`adapters`] holds the contract between the engine
//!   and pixel data codecs (compression and decompression plug-ins).
//!
//! [`swap`]: ./swap/index.html
//! [`decode`]: ./decode/index.html
//! [`encode`]: ./encode/index.html
//! [`transfer_syntax`]: ./transfer_syntax/index.html
//! [`adapters`]: ./adapters/index.html

pub mod adapters;
pub mod decode;
pub mod encode;
pub mod swap;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use decode::Decode;
pub use encode::Encode;
pub use swap::{swap_if_necessary, ByteOrder};
pub use transfer_syntax::{TransferSyntax, TransferSyntaxIndex};

// public dependencies
pub use dcmdata_core;
pub use dcmdata_dictionary_std;
pub use snafu;
