//! Data element dictionary implementation

use crate::tags::ENTRIES;
use dcmdata_core::dictionary::{
    DataDictionary, DictEntry, DictionaryRegistry, RangeRestriction, TagRange, VirtualVr,
};
use dcmdata_core::header::Tag;
use dcmdata_core::vm::VmSpec;
use dcmdata_core::VR;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::sync::Arc;

static DICT: Lazy<DictionaryRegistry> = Lazy::new(init_dictionary);

/// Retrieve a singleton instance of the built-in dictionary registry.
///
/// Note that one does not generally have to call this
/// unless when retrieving the underlying registry is important.
/// The unit type [`StandardDataDictionary`]
/// already provides a lazy loaded singleton implementing the necessary traits.
#[inline]
pub fn registry() -> &'static DictionaryRegistry {
    &DICT
}

/// The tag specification of a static dictionary record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum StaticRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open,
    /// covering even groups only: `(GGxx,EEEE)`
    Group100(Tag),
}

impl From<StaticRange> for TagRange {
    fn from(r: StaticRange) -> Self {
        match r {
            StaticRange::Single(tag) => TagRange::single(tag),
            StaticRange::Group100(Tag(g, e)) => {
                TagRange::new(Tag(g & 0xFF00, e), Tag(g | 0x00FF, e))
                    .with_restrictions(RangeRestriction::Even, RangeRestriction::Unspecified)
            }
        }
    }
}

/// A record of the static dictionary table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct StaticEntry {
    pub tag: StaticRange,
    pub alias: &'static str,
    pub vr: VirtualVr,
    pub vm: &'static str,
}

fn init_dictionary() -> DictionaryRegistry {
    let mut d = DictionaryRegistry::new();
    for entry in ENTRIES {
        let vm = match entry.vm.parse::<VmSpec>() {
            Ok(vm) => vm,
            Err(e) => {
                tracing::warn!("Skipping dictionary entry {}: {}", entry.alias, e);
                continue;
            }
        };
        d.insert(DictEntry::new(
            entry.tag,
            entry.vr,
            Cow::Borrowed(entry.alias),
            vm,
        ));
    }

    // generic group length, for every group without its own record
    d.insert(DictEntry::new(
        TagRange::new(Tag(0x0000, 0x0000), Tag(0xFFFF, 0x0000)),
        VR::UL,
        "GenericGroupLength",
        VmSpec::ONE,
    ));
    // private creator reservations of odd groups
    d.insert(DictEntry::new(
        TagRange::new(Tag(0x0009, 0x0010), Tag(0xFFFF, 0x00FF))
            .with_restrictions(RangeRestriction::Odd, RangeRestriction::Unspecified),
        VR::LO,
        "PrivateCreator",
        VmSpec::ONE,
    ));
    d
}

/// A data element dictionary which consults
/// the library's global DICOM attribute registry.
///
/// This is the type which would generally be used
/// whenever a data element dictionary is needed,
/// such as when reading DICOM objects.
///
/// The dictionary index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl DataDictionary for StandardDataDictionary {
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        registry().by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>> {
        registry().by_tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::StandardDataDictionary;
    use crate::tags;
    use dcmdata_core::dictionary::{DataDictionary, VirtualVr};
    use dcmdata_core::header::Tag;
    use dcmdata_core::VR;

    #[test]
    fn smoke_test() {
        let dict = StandardDataDictionary::default();

        let e = dict.by_name("PatientName").expect("PatientName should exist");
        assert_eq!(e.tag(), tags::PATIENT_NAME);
        assert_eq!(e.vr, VirtualVr::Exact(VR::PN));

        let e = dict
            .by_tag(tags::TRANSFER_SYNTAX_UID)
            .expect("TransferSyntaxUID should exist");
        assert_eq!(e.name, "TransferSyntaxUID");
        assert_eq!(e.vr.relaxed(), VR::UI);

        assert_eq!(dict.parse_tag("SOPInstanceUID"), Some(tags::SOP_INSTANCE_UID));
        assert_eq!(dict.parse_tag("(0010,0020)"), Some(tags::PATIENT_ID));
        assert_eq!(dict.parse_tag("NoSuchAttribute"), None);
    }

    #[test]
    fn repeating_groups() {
        let dict = StandardDataDictionary;
        for group in &[0x5000, 0x5002, 0x50FE] {
            let e = dict.by_tag(Tag(*group, 0x3000)).expect("curve data should exist");
            assert_eq!(e.name, "CurveData");
        }
        for group in &[0x6000, 0x601E] {
            let e = dict.by_tag(Tag(*group, 0x3000)).expect("overlay data should exist");
            assert_eq!(e.name, "OverlayData");
            assert_eq!(e.vr, VirtualVr::Ox);
        }
        assert!(dict.by_tag(Tag(0x6100, 0x3000)).is_none());
    }

    #[test]
    fn generic_entries() {
        let dict = StandardDataDictionary;
        // group length of a group without its own record
        let e = dict.by_tag(Tag(0x0018, 0x0000)).unwrap();
        assert_eq!(e.name, "GenericGroupLength");
        // the file meta group length has its own record
        let e = dict.by_tag(tags::FILE_META_INFORMATION_GROUP_LENGTH).unwrap();
        assert_eq!(e.name, "FileMetaInformationGroupLength");
        // private creator
        let e = dict.by_tag(Tag(0x0029, 0x0010)).unwrap();
        assert_eq!(e.name, "PrivateCreator");
        assert_eq!(e.vr.relaxed(), VR::LO);
        // private data elements are unknown
        assert!(dict.by_tag(Tag(0x0029, 0x1010)).is_none());
    }
}
