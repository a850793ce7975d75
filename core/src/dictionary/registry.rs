//! In-memory dictionary registry.

use super::{DataDictionary, DictEntry};
use crate::header::Tag;
use std::collections::HashMap;
use std::iter::FromIterator;
use std::sync::Arc;

/// An in-memory data dictionary.
///
/// Entries for a single tag live in a hash table,
/// while repeating entries are kept in insertion order
/// and scanned only when no exact entry exists.
/// Among the repeating entries containing a tag,
/// the narrowest range is chosen;
/// entries of equal width resolve to the one inserted first.
#[derive(Debug, Default, Clone)]
pub struct DictionaryRegistry {
    exact: HashMap<Tag, Arc<DictEntry>>,
    repeating: Vec<Arc<DictEntry>>,
    by_name: HashMap<String, Arc<DictEntry>>,
}

impl DictionaryRegistry {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the dictionary.
    ///
    /// An entry for the same tag,
    /// or a repeating entry with exactly the same range,
    /// is replaced.
    pub fn insert(&mut self, entry: DictEntry) {
        let entry = Arc::new(entry);
        if entry.is_repeating() {
            match self
                .repeating
                .iter_mut()
                .find(|e| e.range == entry.range)
            {
                Some(old) => {
                    tracing::debug!("Replacing dictionary entry {}", old.name);
                    *old = Arc::clone(&entry)
                }
                None => self.repeating.push(Arc::clone(&entry)),
            }
        } else if let Some(old) = self.exact.insert(entry.tag(), Arc::clone(&entry)) {
            tracing::debug!("Replacing dictionary entry {}", old.name);
        }
        if !entry.name.is_empty() {
            self.by_name.insert(entry.name.to_string(), entry);
        }
    }

    /// Look up the entry for the given tag.
    pub fn lookup(&self, tag: Tag) -> Option<&Arc<DictEntry>> {
        self.exact.get(&tag).or_else(|| self.lookup_repeating(tag))
    }

    fn lookup_repeating(&self, tag: Tag) -> Option<&Arc<DictEntry>> {
        let mut best: Option<&Arc<DictEntry>> = None;
        for entry in self.repeating.iter().filter(|e| e.range.contains(tag)) {
            match best {
                Some(b) if b.range.width() <= entry.range.width() => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Look up an entry by its keyword.
    pub fn lookup_name(&self, name: &str) -> Option<&Arc<DictEntry>> {
        self.by_name.get(name)
    }

    /// The total number of entries.
    pub fn len(&self) -> usize {
        self.exact.len() + self.repeating.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.repeating.is_empty()
    }

    /// Iterate over the repeating entries in lookup order.
    pub fn repeating_entries(&self) -> impl Iterator<Item = &DictEntry> {
        self.repeating.iter().map(|e| &**e)
    }
}

impl Extend<DictEntry> for DictionaryRegistry {
    fn extend<I: IntoIterator<Item = DictEntry>>(&mut self, iter: I) {
        for e in iter {
            self.insert(e);
        }
    }
}

impl FromIterator<DictEntry> for DictionaryRegistry {
    fn from_iter<I: IntoIterator<Item = DictEntry>>(iter: I) -> Self {
        let mut dict = DictionaryRegistry::new();
        dict.extend(iter);
        dict
    }
}

impl DataDictionary for DictionaryRegistry {
    fn by_name(&self, name: &str) -> Option<Arc<DictEntry>> {
        self.lookup_name(name).cloned()
    }

    fn by_tag(&self, tag: Tag) -> Option<Arc<DictEntry>> {
        self.lookup(tag).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{TagRange, VirtualVr};
    use crate::vm::VmSpec;
    use crate::vr::VR;
    use std::borrow::Cow;

    fn range(s: &str) -> TagRange {
        s.parse().unwrap()
    }

    fn sample() -> DictionaryRegistry {
        vec![
            DictEntry::new(Tag(0x0010, 0x0010), VR::PN, "PatientName", VmSpec::ONE),
            DictEntry::new(range("(50xx,0005)"), VR::US, "CurveDimensions", VmSpec::ONE),
            DictEntry::new(range("(60xx,3000)"), VirtualVr::Ox, "OverlayData", VmSpec::ONE),
            DictEntry::new(range("(60xx,0010)"), VR::US, "OverlayRows", VmSpec::ONE),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn exact_lookup() {
        let dict = sample();
        let e = dict.by_tag(Tag(0x0010, 0x0010)).unwrap();
        assert_eq!(e.name, "PatientName");
        assert_eq!(e.vr, VirtualVr::Exact(VR::PN));
        assert!(dict.by_tag(Tag(0x0010, 0x0020)).is_none());
        assert_eq!(dict.by_name("PatientName").unwrap().tag(), Tag(0x0010, 0x0010));
    }

    #[test]
    fn repeating_group_lookup() {
        let dict = sample();
        for group in (0x5000..=0x50FF).step_by(2) {
            let e = dict
                .by_tag(Tag(group, 0x0005))
                .unwrap_or_else(|| panic!("no entry for group {:04X}", group));
            assert_eq!(e.name, "CurveDimensions");
        }
        assert!(dict.by_tag(Tag(0x5100, 0x0005)).is_none());
        assert!(dict.by_tag(Tag(0x4FFE, 0x0005)).is_none());
        assert!(dict.by_tag(Tag(0x5001, 0x0005)).is_none());
        assert_eq!(dict.by_tag(Tag(0x6002, 0x3000)).unwrap().vr, VirtualVr::Ox);
    }

    #[test]
    fn exact_entry_beats_range() {
        let mut dict = sample();
        dict.insert(DictEntry::new(
            Tag(0x5000, 0x0005),
            VR::UL,
            "SpecialCurveDimensions",
            VmSpec::ONE,
        ));
        assert_eq!(
            dict.by_tag(Tag(0x5000, 0x0005)).unwrap().name,
            "SpecialCurveDimensions"
        );
        assert_eq!(
            dict.by_tag(Tag(0x5002, 0x0005)).unwrap().name,
            "CurveDimensions"
        );
    }

    #[test]
    fn narrowest_range_wins() {
        let mut dict = DictionaryRegistry::new();
        // wide range inserted first
        dict.insert(DictEntry::new(
            TagRange::new(Tag(0x0000, 0x3000), Tag(0xFFFF, 0x3000)),
            VR::OB,
            "AnyGroupData",
            VmSpec::ONE,
        ));
        dict.insert(DictEntry::new(
            range("(60xx,3000)"),
            VirtualVr::Ox,
            "OverlayData",
            VmSpec::ONE,
        ));
        assert_eq!(dict.by_tag(Tag(0x6000, 0x3000)).unwrap().name, "OverlayData");
        assert_eq!(dict.by_tag(Tag(0x7000, 0x3000)).unwrap().name, "AnyGroupData");
    }

    #[test]
    fn equal_width_ties_follow_insertion_order() {
        let mut dict = DictionaryRegistry::new();
        dict.insert(DictEntry::new(
            TagRange::new(Tag(0x7000, 0x0010), Tag(0x7010, 0x0010)),
            VR::LO,
            "First",
            VmSpec::ONE,
        ));
        dict.insert(DictEntry::new(
            TagRange::new(Tag(0x7008, 0x0010), Tag(0x7018, 0x0010)),
            VR::SH,
            "Second",
            VmSpec::ONE,
        ));
        assert_eq!(dict.by_tag(Tag(0x7009, 0x0010)).unwrap().name, "First");
        assert_eq!(dict.by_tag(Tag(0x7011, 0x0010)).unwrap().name, "Second");
    }

    #[test]
    fn same_range_is_replaced() {
        let mut dict = sample();
        let before = dict.len();
        dict.insert(DictEntry::new(
            range("(50xx,0005)"),
            VR::US,
            Cow::Owned(String::from("CurveDimensionsV2")),
            VmSpec::ONE,
        ));
        assert_eq!(dict.len(), before);
        assert_eq!(
            dict.by_tag(Tag(0x5004, 0x0005)).unwrap().name,
            "CurveDimensionsV2"
        );
    }
}
