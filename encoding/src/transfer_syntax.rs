//! Module containing the DICOM Transfer Syntax data structure and related methods.
//!
//! A [`TransferSyntax`] describes how a data set is laid out in a byte stream:
//! its byte order, whether value representations are explicit,
//! and whether pixel data is encapsulated or the whole data set compressed.
//! It also hands out the matching header decoder and encoder.
//!
//! This crate does not host the list of known transfer syntaxes.
//! They live in an implementation of [`TransferSyntaxIndex`],
//! such as the one in the `dcmdata-transfer-syntax-registry` crate.

use crate::decode::basic::BasicDecoder;
use crate::decode::{DecodeFrom, ExplicitVRDecoder, ImplicitVRDecoder};
use crate::encode::{EncodeTo, ExplicitVREncoder, ImplicitVREncoder};
use crate::swap::ByteOrder;
use dcmdata_dictionary_std::StandardDataDictionary;
use std::io::{Read, Write};

pub use byteordered::Endianness;

/// A decoder with its type erased.
pub type DynDecoder<S> = Box<dyn DecodeFrom<S>>;

/// An encoder with its type erased.
pub type DynEncoder<W> = Box<dyn EncodeTo<W>>;

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// Whether pixel data is encapsulated in fragments.
    encapsulated: bool,
    /// Whether the encapsulated pixel data is lossy compressed.
    lossy: bool,
    /// Whether the whole data set is compressed with deflate.
    deflated: bool,
}

/// Trait for containers of transfer syntax specifiers.
///
/// Types implementing this trait are held responsible for populating
/// themselves with a set of transfer syntaxes, which can be fully supported,
/// partially supported, or not supported. Usually, only one implementation
/// of this trait is used for the entire program.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) or spaces in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor
    /// with native (non-encapsulated) pixel data.
    ///
    /// Note that only transfer syntax implementors are expected to construct
    /// TS descriptors from scratch. For a practical usage of transfer syntaxes,
    /// one should look up an existing transfer syntax registry by UID.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            encapsulated: false,
            lossy: false,
            deflated: false,
        }
    }

    /// Create a new explicit VR little endian transfer syntax descriptor
    /// with encapsulated pixel data.
    pub const fn new_encapsulated(uid: &'static str, name: &'static str, lossy: bool) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order: Endianness::Little,
            explicit_vr: true,
            encapsulated: true,
            lossy,
            deflated: false,
        }
    }

    /// Mark the whole data set as deflated.
    pub const fn with_deflate(mut self) -> Self {
        self.deflated = true;
        self
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Obtain this transfer syntax' byte order,
    /// for use with the byte swapping routines.
    pub fn byte_order(&self) -> ByteOrder {
        ByteOrder::from(self.byte_order)
    }

    /// Whether value representations are explicit in the stream.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Whether pixel data is encapsulated.
    pub const fn is_encapsulated(&self) -> bool {
        self.encapsulated
    }

    /// Whether pixel data is compressed with loss of information.
    pub const fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// Whether the data set is deflated.
    pub const fn is_deflated(&self) -> bool {
        self.deflated
    }

    /// Check whether data elements cannot be decoded from
    /// or encoded to the raw data set stream.
    /// If this is `true`, element encoders and decoders are not available,
    /// and the stream must be adapted first (inflated, in the case of deflate).
    pub fn unsupported(&self) -> bool {
        self.deflated
    }

    /// Retrieve the appropriate data element decoder for this transfer syntax
    /// and given reader type.
    /// Can yield none if the raw stream cannot be decoded directly.
    ///
    /// Implicit VR decoders resolve value representations
    /// through the standard data dictionary.
    pub fn decoder_for<S>(&self) -> Option<DynDecoder<S>>
    where
        S: ?Sized + Read,
    {
        if self.unsupported() {
            return None;
        }
        if self.explicit_vr {
            Some(Box::new(ExplicitVRDecoder::new(self.byte_order)))
        } else {
            Some(Box::new(ImplicitVRDecoder::with_dict(
                StandardDataDictionary,
                self.byte_order,
            )))
        }
    }

    /// Retrieve the appropriate data element encoder for this transfer syntax
    /// and the given writer type.
    /// Can yield none if the raw stream cannot be encoded directly.
    pub fn encoder_for<W>(&self) -> Option<DynEncoder<W>>
    where
        W: ?Sized + Write,
    {
        if self.unsupported() {
            return None;
        }
        if self.explicit_vr {
            Some(Box::new(ExplicitVREncoder::new(self.byte_order)))
        } else {
            Some(Box::new(ImplicitVREncoder::new(self.byte_order)))
        }
    }

    /// Obtain a dynamic basic decoder, based on this transfer syntax' expected endianness.
    pub fn basic_decoder(&self) -> BasicDecoder {
        BasicDecoder::from(self.endianness())
    }
}
