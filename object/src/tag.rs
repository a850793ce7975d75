//! Tags resolved against a data dictionary.

use dcmdata_core::dictionary::DataDictionary;
use dcmdata_core::{DictEntry, Tag, VmSpec, VR};
use dcmdata_dictionary_std::StandardDataDictionary;
use std::fmt;
use std::sync::Arc;

/// An attribute tag together with its value representation
/// and the dictionary entry describing it, if any.
///
/// Tags missing from the dictionary resolve to `UN`.
#[derive(Debug, Clone)]
pub struct DcmTag {
    tag: Tag,
    vr: VR,
    entry: Option<Arc<DictEntry>>,
}

impl DcmTag {
    /// Resolve a tag with the standard data dictionary.
    pub fn new(tag: Tag) -> Self {
        Self::resolve_with(tag, &StandardDataDictionary)
    }

    /// Resolve a tag with the given data dictionary.
    pub fn resolve_with<D>(tag: Tag, dict: &D) -> Self
    where
        D: DataDictionary + ?Sized,
    {
        let entry = dict.by_tag(tag);
        let vr = match &entry {
            Some(entry) => entry.vr.relaxed(),
            None => {
                tracing::trace!("Tag {} not in dictionary", tag);
                VR::UN
            }
        };
        DcmTag { tag, vr, entry }
    }

    /// Resolve a tag with the standard data dictionary,
    /// but use the given value representation,
    /// such as one read from an explicit VR stream.
    pub fn with_vr(tag: Tag, vr: VR) -> Self {
        let mut out = Self::new(tag);
        out.vr = vr;
        out
    }

    /// The attribute tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The value representation in use.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// Change the value representation.
    pub fn set_vr(&mut self, vr: VR) {
        self.vr = vr;
    }

    /// Whether the tag was found in the dictionary.
    pub fn is_known(&self) -> bool {
        self.entry.is_some()
    }

    /// The dictionary entry of this tag.
    pub fn entry(&self) -> Option<&DictEntry> {
        self.entry.as_deref()
    }

    /// The attribute keyword, such as `PatientName`.
    pub fn name(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| &*e.name)
    }

    /// The value multiplicity allowed by the dictionary.
    pub fn vm(&self) -> Option<VmSpec> {
        self.entry.as_ref().map(|e| e.vm)
    }
}

impl PartialEq for DcmTag {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.vr == other.vr
    }
}

impl From<Tag> for DcmTag {
    fn from(tag: Tag) -> Self {
        DcmTag::new(tag)
    }
}

impl fmt::Display for DcmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} {} {}", self.tag, self.vr, name),
            None => write!(f, "{} {}", self.tag, self.vr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_core::dictionary::stub::StubDataDictionary;
    use dcmdata_dictionary_std::tags;

    #[test]
    fn resolves_known_and_unknown_tags() {
        let tag = DcmTag::new(tags::PATIENT_NAME);
        assert_eq!(tag.vr(), VR::PN);
        assert_eq!(tag.name(), Some("PatientName"));
        assert!(tag.is_known());
        assert_eq!(tag.to_string(), "(0010,0010) PN PatientName");

        let private = DcmTag::new(Tag(0x0009, 0x1001));
        assert_eq!(private.vr(), VR::UN);
        assert!(!private.is_known());

        let stub = DcmTag::resolve_with(tags::PATIENT_NAME, &StubDataDictionary);
        assert_eq!(stub.vr(), VR::UN);
    }

    #[test]
    fn repeating_groups_resolve() {
        let overlay = DcmTag::new(Tag(0x6002, 0x3000));
        assert!(overlay.is_known());
        assert_eq!(overlay.name(), Some("OverlayData"));
    }

    #[test]
    fn explicit_vr_wins() {
        let mut tag = DcmTag::with_vr(tags::PIXEL_DATA, VR::OB);
        assert_eq!(tag.vr(), VR::OB);
        tag.set_vr(VR::OW);
        assert_eq!(tag.vr(), VR::OW);
        assert_eq!(tag.vm(), Some(VmSpec::ONE));
    }
}
