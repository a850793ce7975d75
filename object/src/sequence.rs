//! Sequences of items.

use crate::item::Item;
use crate::list::DcmList;
use crate::node::{DcmObject, EncodingType, ItemIndexOutOfRangeSnafu, Result};
use crate::tag::DcmTag;
use dcmdata_core::{Tag, VR};
use dcmdata_encoding::TransferSyntax;
use snafu::OptionExt;

/// A data element of VR `SQ`, holding an ordered list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    tag: DcmTag,
    items: DcmList<DcmObject>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new(tag: Tag) -> Self {
        Sequence {
            tag: DcmTag::with_vr(tag, VR::SQ),
            items: DcmList::new(),
        }
    }

    /// Create a sequence holding the given items.
    pub fn from_items<I>(tag: Tag, items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        Sequence {
            tag: DcmTag::with_vr(tag, VR::SQ),
            items: items.into_iter().map(DcmObject::Item).collect(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag.tag()
    }

    pub fn dcm_tag(&self) -> &DcmTag {
        &self.tag
    }

    /// The number of items.
    pub fn card(&self) -> usize {
        self.items.card()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item at the end of the sequence.
    pub fn append(&mut self, item: Item) {
        self.items.append(DcmObject::Item(item));
    }

    /// Insert an item at the given index,
    /// or at the end if the index is past it.
    pub fn insert(&mut self, item: Item, index: usize) {
        self.items.insert_at(index, DcmObject::Item(item));
    }

    /// The item at the given index.
    pub fn item(&self, index: usize) -> Result<&Item> {
        let card = self.card();
        self.items
            .get_at(index)
            .and_then(DcmObject::as_item)
            .context(ItemIndexOutOfRangeSnafu { index, card })
    }

    /// The item at the given index, mutably.
    pub fn item_mut(&mut self, index: usize) -> Result<&mut Item> {
        let card = self.card();
        self.items
            .get_at_mut(index)
            .and_then(DcmObject::as_item_mut)
            .context(ItemIndexOutOfRangeSnafu { index, card })
    }

    /// Remove and return the item at the given index.
    pub fn remove(&mut self, index: usize) -> Result<Item> {
        let card = self.card();
        self.items
            .remove_at(index)
            .and_then(|obj| match obj {
                DcmObject::Item(item) => Some(item),
                _ => None,
            })
            .context(ItemIndexOutOfRangeSnafu { index, card })
    }

    /// Iterate over the items in order.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> {
        self.items.iter().filter_map(DcmObject::as_item)
    }

    /// Iterate mutably over the items in order.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut().filter_map(DcmObject::as_item_mut)
    }

    /// The item nodes, for building paths through the tree.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &DcmObject> {
        self.items.iter()
    }

    /// The length of the encoded items,
    /// not counting the sequence header and delimiter.
    pub fn calc_value_length(&self, ts: &TransferSyntax, encoding: EncodingType) -> u64 {
        self.items
            .iter()
            .map(|i| i.calc_element_length(ts, encoding))
            .sum()
    }
}
