#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

//! This crate contains the DICOM transfer syntax registry
//! and the registry of pixel data codecs.
//!
//! - The transfer syntax registry maps the UID of a transfer syntax
//!   into the respective transfer syntax specifier.
//!   It is available through [`get_registry`]
//!   and implements [`TransferSyntaxIndex`].
//! - The [`codec`] module contains the [`CodecList`],
//!   which selects a pixel data codec by transfer syntax,
//!   and the global codec list used by default.
//! - The [`adapters`] module contains the codecs built into this crate,
//!   and the objects which register them in the global codec list.
//! - With the `deflate` feature,
//!   the `deflate` module adapts byte streams of deflated data sets.

pub mod adapters;
pub mod codec;
#[cfg(feature = "deflate")]
pub mod deflate;
pub mod entries;

pub use codec::{global_codecs, CodecList};

use dcmdata_encoding::transfer_syntax::{TransferSyntax, TransferSyntaxIndex};
use lazy_static::lazy_static;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Main implementation of a registry of DICOM transfer syntaxes.
pub struct TransferSyntaxRegistry {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistry")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistry {
    /// Obtain a DICOM transfer syntax by its UID.
    /// Trailing null characters and spaces are ignored.
    pub fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        let ts_uid = uid
            .as_ref()
            .trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        self.m.get(ts_uid)
    }

    /// Iterate over all registered transfer syntaxes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }

    /// Register the given transfer syntax.
    /// Returns `false` if a transfer syntax with the same UID
    /// was already registered, in which case no changes are made.
    fn register(&mut self, ts: TransferSyntax) -> bool {
        match self.m.entry(ts.uid()) {
            Entry::Occupied(_) => {
                tracing::warn!("Transfer syntax {} is already registered", ts.uid());
                false
            }
            Entry::Vacant(e) => {
                e.insert(ts);
                true
            }
        }
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        Self::get(self, uid)
    }
}

lazy_static! {
    static ref REGISTRY: TransferSyntaxRegistry = {
        let mut registry = TransferSyntaxRegistry { m: HashMap::new() };
        for ts in entries::ALL.iter() {
            registry.register(ts.clone());
        }
        registry
    };
}

/// Retrieve the default transfer syntax,
/// _Implicit VR Little Endian_.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

/// Retrieve the global transfer syntax registry.
pub fn get_registry() -> &'static TransferSyntaxRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_encoding::Endianness;
    use rstest::rstest;

    #[test]
    fn contains_base_ts() {
        let registry = get_registry();

        let ts = registry.get("1.2.840.10008.1.2").expect("Implicit VR LE");
        assert_eq!(ts.uid(), "1.2.840.10008.1.2");
        assert_eq!(ts.name(), "Implicit VR Little Endian");
        assert!(!ts.is_explicit_vr());
        assert_eq!(ts.endianness(), Endianness::Little);

        let ts = registry.get("1.2.840.10008.1.2.2").expect("Explicit VR BE");
        assert!(ts.is_explicit_vr());
        assert_eq!(ts.endianness(), Endianness::Big);
        assert!(!ts.is_encapsulated());
    }

    #[rstest]
    #[case("1.2.840.10008.1.2.1\0", Some("1.2.840.10008.1.2.1"))]
    #[case("1.2.840.10008.1.2.5 ", Some("1.2.840.10008.1.2.5"))]
    #[case("1.2.840.10008.1.2.5 \0", Some("1.2.840.10008.1.2.5"))]
    #[case("1.2.3.4", None)]
    fn trailing_padding_is_ignored(#[case] uid: &str, #[case] expected: Option<&str>) {
        let registry = get_registry();
        assert_eq!(registry.get(uid).map(|ts| ts.uid()), expected);
        assert_eq!(
            TransferSyntaxIndex::get(registry, uid).map(|ts| ts.uid()),
            expected
        );
    }

    #[test]
    fn deflated_is_registered() {
        let ts = get_registry().get("1.2.840.10008.1.2.1.99").unwrap();
        assert!(ts.is_deflated());
        assert!(ts.is_explicit_vr());
        // elements are only decoded once inflated
        assert!(ts.unsupported());
        assert_eq!(get_registry().iter().count(), entries::ALL.len());
    }

    #[test]
    fn duplicate_registration_is_refused() {
        let mut registry = TransferSyntaxRegistry { m: HashMap::new() };
        assert!(registry.register(entries::RLE_LOSSLESS));
        assert!(!registry.register(entries::RLE_LOSSLESS));
    }
}
