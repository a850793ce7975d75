//! This module contains the concept of a DICOM data dictionary.
//!
//! A data dictionary maps attribute tags (or ranges of tags)
//! to their value representation, keyword and multiplicity.
//! The main implementation is the in-memory [`DictionaryRegistry`],
//! which also resolves repeating groups such as `(60xx,3000)`.

mod range;
mod registry;
pub mod stub;

pub use range::{RangeRestriction, TagRange, TagRangeParseError};
pub use registry::DictionaryRegistry;

use crate::header::Tag;
use crate::vm::VmSpec;
use crate::vr::{VrClass, VR};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A "virtual" value representation,
/// which may also describe a context-dependent representation
/// that is only resolved once the attribute is found in a data set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VirtualVr {
    /// The value representation is exactly known.
    Exact(VR),
    /// Either US or SS, depending on Pixel Representation.
    Xs,
    /// Either OB or OW, depending on the transfer syntax and bits allocated.
    Ox,
    /// Either OB or OW, for pixel data
    /// (OW in implicit VR, OB when encapsulated).
    Px,
    /// Either US or OW, as used by lookup table data.
    Lt,
    /// Unsigned long holding a byte offset (a DICOMDIR record pointer).
    Up,
}

impl VirtualVr {
    /// Resolve to a concrete value representation,
    /// picking the most permissive choice when the representation
    /// is context-dependent.
    pub fn relaxed(self) -> VR {
        match self {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => VR::US,
            VirtualVr::Ox | VirtualVr::Px | VirtualVr::Lt => VR::OW,
            VirtualVr::Up => VR::UL,
        }
    }

    /// The standing of this representation with respect to the standard.
    pub fn class(self) -> VrClass {
        match self {
            VirtualVr::Exact(vr) => vr.class(),
            _ => VrClass::NonStandard,
        }
    }
}

impl From<VR> for VirtualVr {
    fn from(vr: VR) -> Self {
        VirtualVr::Exact(vr)
    }
}

impl fmt::Display for VirtualVr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualVr::Exact(vr) => fmt::Display::fmt(vr, f),
            VirtualVr::Xs => f.write_str("xs"),
            VirtualVr::Ox => f.write_str("ox"),
            VirtualVr::Px => f.write_str("px"),
            VirtualVr::Lt => f.write_str("lt"),
            VirtualVr::Up => f.write_str("up"),
        }
    }
}

/// A data dictionary entry.
///
/// Names and versions are either borrowed from static tables
/// or owned copies, for entries built at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    /// the tag or tag range of the attribute
    pub range: TagRange,
    /// the value representation
    pub vr: VirtualVr,
    /// the attribute keyword, such as `PatientName`
    pub name: Cow<'static, str>,
    /// the value multiplicity constraint
    pub vm: VmSpec,
    /// the standard version in which the attribute was defined,
    /// such as `DICOM` or `ACR/NEMA2`
    pub standard_version: Cow<'static, str>,
}

impl DictEntry {
    /// Create a new dictionary entry.
    pub fn new(
        range: impl Into<TagRange>,
        vr: impl Into<VirtualVr>,
        name: impl Into<Cow<'static, str>>,
        vm: VmSpec,
    ) -> Self {
        DictEntry {
            range: range.into(),
            vr: vr.into(),
            name: name.into(),
            vm,
            standard_version: Cow::Borrowed("DICOM"),
        }
    }

    /// Replace the standard version of this entry.
    pub fn with_standard_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.standard_version = version.into();
        self
    }

    /// The lowest tag covered by this entry.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.range.lower()
    }

    /// Whether this entry covers a range of tags.
    #[inline]
    pub fn is_repeating(&self) -> bool {
        self.range.is_repeating()
    }
}

/// Type trait for a dictionary of DICOM attributes.
///
/// Entries are shared by reference counting,
/// so that resolved tags can keep a weak reference to their entry.
pub trait DataDictionary: fmt::Debug {
    /// Fetch an entry by its usual alias (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases (or keyword) are usually in UpperCamelCase,
    /// not separated by spaces, and are case sensitive.
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>>;

    /// Fetch an entry by its tag.
    /// Repeating group entries are also considered.
    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>>;

    /// Fetch an entry by an expression,
    /// either a keyword or a tag in text form.
    fn by_expr(&self, expr: &str) -> Option<Arc<DictEntry>> {
        match expr.parse::<Tag>() {
            Ok(tag) => self.by_tag(tag),
            Err(_) => self.by_name(expr),
        }
    }

    /// Resolve a keyword or tag expression into a tag.
    ///
    /// Tags written in text form are accepted even when
    /// they are not in the dictionary.
    fn parse_tag(&self, expr: &str) -> Option<Tag> {
        expr.parse::<Tag>()
            .ok()
            .or_else(|| self.by_name(expr).map(|e| e.tag()))
    }
}

impl<D: DataDictionary + ?Sized> DataDictionary for &D {
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>> {
        (**self).by_tag(tag)
    }
}

impl<D: DataDictionary + ?Sized> DataDictionary for Box<D> {
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>> {
        (**self).by_tag(tag)
    }
}

impl<D: DataDictionary + ?Sized> DataDictionary for Arc<D> {
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>> {
        (**self).by_tag(tag)
    }
}
