//! Items: ordered collections of data elements.
//!
//! An item is the body of a sequence item,
//! and also the body of a data set and of the file meta group.
//! Its nodes are kept sorted by tag,
//! and each tag appears at most once.

use crate::element::{PrimitiveElement, C};
use crate::list::DcmList;
use crate::node::{
    DcmObject, DoubledTagSnafu, EncodingType, Ident, IllegalChildSnafu, IncompatibleVrSnafu,
    NoSuchDataElementTagSnafu, Result,
};
use crate::stack::DcmStack;
use dcmdata_core::{Tag, VR};
use dcmdata_dictionary_std::tags;
use dcmdata_encoding::adapters::{AttributeUpdate, AttributeValue, PixelDataObject};
use dcmdata_encoding::TransferSyntax;
use snafu::OptionExt;

/// Where a search starts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Search the whole subtree, discarding the contents of the stack.
    FromHere,
    /// Resume a previous search,
    /// looking only at the nodes after the node on top of the stack.
    AfterStackTop,
}

/// A list of nodes kept in ascending tag order.
#[derive(Debug, Clone)]
pub struct Item {
    elements: DcmList<DcmObject>,
    ident: Ident,
    offset: Option<u64>,
}

impl Default for Item {
    fn default() -> Self {
        Item::new()
    }
}

impl PartialEq for Item {
    /// Items are equal if they hold equal nodes,
    /// wherever they were read from.
    fn eq(&self, other: &Self) -> bool {
        self.ident == other.ident && self.elements == other.elements
    }
}

impl Item {
    /// Create an empty sequence item.
    pub fn new() -> Self {
        Item::with_ident(Ident::Item)
    }

    /// Create an empty directory record.
    pub fn directory_record() -> Self {
        Item::with_ident(Ident::DirectoryRecord)
    }

    pub(crate) fn with_ident(ident: Ident) -> Self {
        Item {
            elements: DcmList::new(),
            ident,
            offset: None,
        }
    }

    /// The kind of this item.
    pub fn ident(&self) -> Ident {
        self.ident
    }

    pub(crate) fn set_ident(&mut self, ident: Ident) {
        self.ident = ident;
    }

    /// The position of the item header in the stream this item was read from,
    /// if it was read from one.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    /// The number of nodes in this item.
    pub fn card(&self) -> usize {
        self.elements.card()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Insert a node at the position dictated by its tag.
    ///
    /// If a node with the same tag is already present,
    /// it is replaced and returned if `replace_old` is true,
    /// and the insertion fails otherwise.
    /// Items cannot be inserted directly into other items.
    pub fn insert(
        &mut self,
        obj: impl Into<DcmObject>,
        replace_old: bool,
    ) -> Result<Option<DcmObject>> {
        let obj = obj.into();
        if let DcmObject::Item(item) = &obj {
            return IllegalChildSnafu {
                parent: self.ident,
                child: item.ident(),
            }
            .fail();
        }
        let tag = obj.tag();
        match self.elements.binary_search_by_key(&tag, DcmObject::tag) {
            Ok(i) if replace_old => Ok(self.elements.replace_at(i, obj)),
            Ok(_) => DoubledTagSnafu { tag }.fail(),
            Err(i) => {
                self.elements.insert_at(i, obj);
                Ok(None)
            }
        }
    }

    pub(crate) fn put_node(&mut self, obj: DcmObject) -> Option<DcmObject> {
        let tag = obj.tag();
        match self.elements.binary_search_by_key(&tag, DcmObject::tag) {
            Ok(i) => self.elements.replace_at(i, obj),
            Err(i) => {
                self.elements.insert_at(i, obj);
                None
            }
        }
    }

    /// Insert a primitive element,
    /// replacing and returning any node with the same tag.
    pub fn put_element(&mut self, element: PrimitiveElement) -> Option<DcmObject> {
        self.put_node(DcmObject::Element(element))
    }

    /// Insert a sequence,
    /// replacing and returning any node with the same tag.
    pub fn put_sequence(&mut self, sequence: crate::sequence::Sequence) -> Option<DcmObject> {
        self.put_node(DcmObject::Sequence(sequence))
    }

    /// Insert pixel data,
    /// replacing and returning any node with the same tag.
    pub fn put_pixel_data(&mut self, pixel_data: crate::pixel::PixelData) -> Option<DcmObject> {
        self.put_node(DcmObject::PixelData(pixel_data))
    }

    /// Whether a node with the given tag is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.position(tag).is_some()
    }

    fn position(&self, tag: Tag) -> Option<usize> {
        self.elements
            .binary_search_by_key(&tag, DcmObject::tag)
            .ok()
    }

    /// Retrieve the node with the given tag, if present.
    pub fn get(&self, tag: Tag) -> Option<&DcmObject> {
        self.position(tag).and_then(|i| self.elements.get_at(i))
    }

    /// Retrieve the node with the given tag mutably, if present.
    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut DcmObject> {
        let i = self.position(tag)?;
        self.elements.get_at_mut(i)
    }

    /// Retrieve the node with the given tag.
    pub fn element(&self, tag: Tag) -> Result<&DcmObject> {
        self.get(tag).context(NoSuchDataElementTagSnafu { tag })
    }

    /// Retrieve the node with the given tag mutably.
    pub fn element_mut(&mut self, tag: Tag) -> Result<&mut DcmObject> {
        self.get_mut(tag).context(NoSuchDataElementTagSnafu { tag })
    }

    /// Retrieve the primitive element with the given tag.
    pub fn primitive(&self, tag: Tag) -> Result<&PrimitiveElement> {
        let obj = self.element(tag)?;
        obj.as_element().context(IncompatibleVrSnafu {
            tag,
            vr: obj.vr().unwrap_or(VR::UN),
            requested: "primitive",
        })
    }

    /// Remove and return the node with the given tag.
    pub fn remove(&mut self, tag: Tag) -> Result<DcmObject> {
        self.position(tag)
            .and_then(|i| self.elements.remove_at(i))
            .context(NoSuchDataElementTagSnafu { tag })
    }

    /// Iterate over the nodes in tag order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DcmObject> + ExactSizeIterator {
        self.elements.iter()
    }

    /// Iterate mutably over the nodes in tag order.
    ///
    /// Changing the tag of a node through this iterator
    /// leaves the item out of order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DcmObject> {
        self.elements.iter_mut()
    }

    /// Search this subtree for a node with the given tag,
    /// in pre-order.
    ///
    /// On success, the stack holds the path
    /// from a node of this item down to the node found.
    /// With [`SearchMode::AfterStackTop`],
    /// the search resumes after the node on top of the stack,
    /// so that repeated calls visit every match.
    /// Nested items are searched only if `into_sub` is true.
    pub fn search<'a>(
        &'a self,
        tag: Tag,
        stack: &mut DcmStack<'a>,
        mode: SearchMode,
        into_sub: bool,
    ) -> Result<()> {
        let start = match mode {
            SearchMode::FromHere => None,
            SearchMode::AfterStackTop => stack.top(),
        };
        let mut passed = start.is_none();
        let mut path = Vec::new();
        let found = walk(self, &mut path, into_sub, &mut |path: &[&'a DcmObject]| {
            let node = match path.last() {
                Some(node) => *node,
                None => return false,
            };
            match start {
                Some(start) if !passed => {
                    passed = std::ptr::eq(node, start);
                    false
                }
                _ => node.tag() == tag,
            }
        });
        if found {
            stack.replace_with(&path);
            Ok(())
        } else {
            NoSuchDataElementTagSnafu { tag }.fail()
        }
    }

    /// The first value of a string element, without padding.
    pub fn get_string(&self, tag: Tag) -> Result<String> {
        self.primitive(tag)?.get_string(0)
    }

    /// All values of a string element, without padding.
    pub fn get_strings(&self, tag: Tag) -> Result<C<String>> {
        self.primitive(tag)?.get_strings()
    }

    pub fn get_u16(&self, tag: Tag) -> Result<u16> {
        self.primitive(tag)?.get_u16(0)
    }

    pub fn get_u32(&self, tag: Tag) -> Result<u32> {
        self.primitive(tag)?.get_u32(0)
    }

    pub fn get_i32(&self, tag: Tag) -> Result<i32> {
        self.primitive(tag)?.get_i32(0)
    }

    pub fn get_f64(&self, tag: Tag) -> Result<f64> {
        self.primitive(tag)?.get_f64(0)
    }

    /// Set a string element, creating it if missing.
    pub fn put_str(&mut self, tag: Tag, vr: VR, value: &str) -> Result<()> {
        let mut element = PrimitiveElement::new_with_vr(tag, vr);
        element.put_string(value)?;
        self.put_element(element);
        Ok(())
    }

    /// Set an unsigned short element, creating it if missing.
    pub fn put_u16(&mut self, tag: Tag, value: u16) -> Result<()> {
        let mut element = PrimitiveElement::new_with_vr(tag, VR::US);
        element.put_u16(value)?;
        self.put_element(element);
        Ok(())
    }

    /// Set an unsigned long element, creating it if missing.
    pub fn put_u32(&mut self, tag: Tag, value: u32) -> Result<()> {
        let mut element = PrimitiveElement::new_with_vr(tag, VR::UL);
        element.put_u32(value)?;
        self.put_element(element);
        Ok(())
    }

    /// Apply an attribute change requested by a pixel data codec.
    pub fn apply_update(&mut self, update: &AttributeUpdate) -> Result<()> {
        let mut element = PrimitiveElement::new_with_vr(update.tag, update.vr);
        match &update.value {
            AttributeValue::Str(s) => element.put_string(s)?,
            AttributeValue::U16(v) => element.put_u16(*v)?,
        }
        tracing::debug!("Setting {} after pixel data conversion", element.dcm_tag());
        self.put_element(element);
        Ok(())
    }

    /// The length of the encoded contents of this item,
    /// not counting its own header and delimiter.
    pub fn calc_length(&self, ts: &TransferSyntax, encoding: EncodingType) -> u64 {
        self.elements
            .iter()
            .map(|e| e.calc_element_length(ts, encoding))
            .sum()
    }
}

/// Visit the nodes of an item in pre-order,
/// keeping the path to the current node,
/// until `visit` returns true.
fn walk<'a, F>(item: &'a Item, path: &mut Vec<&'a DcmObject>, into_sub: bool, visit: &mut F) -> bool
where
    F: FnMut(&[&'a DcmObject]) -> bool,
{
    for obj in item.iter() {
        path.push(obj);
        if visit(path.as_slice()) {
            return true;
        }
        if into_sub {
            if let DcmObject::Sequence(seq) = obj {
                for node in seq.nodes() {
                    path.push(node);
                    if visit(path.as_slice()) {
                        return true;
                    }
                    if let DcmObject::Item(inner) = node {
                        if walk(inner, path, into_sub, visit) {
                            return true;
                        }
                    }
                    path.pop();
                }
            }
        }
        path.pop();
    }
    false
}

impl PixelDataObject for Item {
    fn rows(&self) -> Option<u16> {
        self.get_u16(tags::ROWS).ok()
    }

    fn cols(&self) -> Option<u16> {
        self.get_u16(tags::COLUMNS).ok()
    }

    fn samples_per_pixel(&self) -> Option<u16> {
        self.get_u16(tags::SAMPLES_PER_PIXEL).ok()
    }

    fn bits_allocated(&self) -> Option<u16> {
        self.get_u16(tags::BITS_ALLOCATED).ok()
    }

    fn bits_stored(&self) -> Option<u16> {
        self.get_u16(tags::BITS_STORED).ok()
    }

    fn pixel_representation(&self) -> Option<u16> {
        self.get_u16(tags::PIXEL_REPRESENTATION).ok()
    }

    fn planar_configuration(&self) -> Option<u16> {
        self.get_u16(tags::PLANAR_CONFIGURATION).ok()
    }

    fn number_of_frames(&self) -> Option<u32> {
        self.get_u32(tags::NUMBER_OF_FRAMES).ok()
    }

    fn photometric_interpretation(&self) -> Option<String> {
        self.get_string(tags::PHOTOMETRIC_INTERPRETATION).ok()
    }
}
