//! This module contains a stub dictionary.

use super::{DataDictionary, DictEntry};
use crate::header::Tag;
use std::sync::Arc;

/// An empty attribute dictionary.
///
/// Every lookup misses,
/// so implicit VR tags resolve to the unknown representation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StubDataDictionary;

impl DataDictionary for StubDataDictionary {
    fn by_name(&self, _: &str) -> Option<Arc<DictEntry>> {
        None
    }

    fn by_tag(&self, _: Tag) -> Option<Arc<DictEntry>> {
        None
    }
}
