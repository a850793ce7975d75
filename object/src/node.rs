//! The nodes of the DICOM object tree.
//!
//! A tree is rooted at a data set or a file meta group,
//! both of which are [items](crate::item::Item).
//! Items own their nodes in tag order:
//! primitive elements, pixel data and sequences.
//! Sequences in turn own items.
//!
//! Every node has a kind ([`Ident`]),
//! which is kept when the node is cloned
//! and checked when one node is copied onto another.

use crate::element::PrimitiveElement;
use crate::item::Item;
use crate::pixel::PixelData;
use crate::sequence::Sequence;
use dcmdata_core::error::ErrorKind;
use dcmdata_core::{Tag, VR};
use dcmdata_encoding::TransferSyntax;
use snafu::{ensure, Backtrace, Snafu};
use std::fmt;

/// The kind of a node in the object tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ident {
    /// an element holding character strings with backslash separated values
    ByteString,
    /// an element holding a single free text value
    Text,
    /// an element holding binary numbers or attribute tags
    Numeric,
    /// an element holding other byte or other word data
    OtherByteWord,
    /// an overlay data element
    OverlayData,
    /// the pixel data element
    PixelData,
    /// a sequence of items
    Sequence,
    /// a sequence item
    Item,
    /// a sequence item of a DICOMDIR directory record sequence
    DirectoryRecord,
    /// the fragments of encapsulated pixel data
    PixelSequence,
    /// one fragment of encapsulated pixel data
    PixelItem,
    /// the root data set
    Dataset,
    /// the file meta information group
    MetaInfo,
    /// a DICOM file
    FileFormat,
    /// a DICOMDIR file
    DicomDir,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How to write the length of sequences and items.
/// Encapsulated pixel data is always written with undefined length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodingType {
    /// compute and write the actual lengths
    ExplicitLength,
    /// write undefined lengths followed by delimiters
    UndefinedLength,
}

impl Default for EncodingType {
    fn default() -> Self {
        EncodingType::ExplicitLength
    }
}

/// An error in an operation on the object tree.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Cannot copy a {} node into a {} node", got, expected))]
    IllegalCopy {
        expected: Ident,
        got: Ident,
        backtrace: Backtrace,
    },
    #[snafu(display("The value of element {} is not loaded", tag))]
    ValueNotLoaded { tag: Tag, backtrace: Backtrace },
    #[snafu(display("No such data element with tag {}", tag))]
    NoSuchDataElementTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Data element {} is already present", tag))]
    DoubledTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("No value at position {} in element {}", position, tag))]
    ValuePositionOutOfRange {
        tag: Tag,
        position: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Element {} with VR {} cannot hold {} values", tag, vr, requested))]
    IncompatibleVr {
        tag: Tag,
        vr: VR,
        requested: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read {:?} in element {} as {}", value, tag, requested))]
    ParseValue {
        tag: Tag,
        value: String,
        requested: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("A {} node cannot be placed in a {} node", child, parent))]
    IllegalChild {
        parent: Ident,
        child: Ident,
        backtrace: Backtrace,
    },
    #[snafu(display("No item at index {}, the sequence has {} items", index, card))]
    ItemIndexOutOfRange {
        index: usize,
        card: usize,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalCopy { .. }
            | Error::ValueNotLoaded { .. }
            | Error::ValuePositionOutOfRange { .. }
            | Error::IllegalChild { .. }
            | Error::ItemIndexOutOfRange { .. } => ErrorKind::IllegalCall,
            Error::NoSuchDataElementTag { .. } => ErrorKind::TagNotFound,
            Error::DoubledTag { .. } => ErrorKind::DoubledTag,
            Error::IncompatibleVr { .. } => ErrorKind::InvalidVR,
            Error::ParseValue { .. } => ErrorKind::CorruptedData,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A node of the object tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DcmObject {
    /// an element with a primitive value
    Element(PrimitiveElement),
    /// the pixel data element, in one or more representations
    PixelData(PixelData),
    /// a sequence of items
    Sequence(Sequence),
    /// an item of a sequence
    Item(Item),
}

impl DcmObject {
    /// The tag of this node.
    /// Items are tagged with the item tag `(FFFE,E000)`.
    pub fn tag(&self) -> Tag {
        match self {
            DcmObject::Element(e) => e.tag(),
            DcmObject::PixelData(p) => p.tag(),
            DcmObject::Sequence(s) => s.tag(),
            DcmObject::Item(_) => Tag::ITEM,
        }
    }

    /// The value representation of this node,
    /// or `None` for items.
    pub fn vr(&self) -> Option<VR> {
        match self {
            DcmObject::Element(e) => Some(e.vr()),
            DcmObject::PixelData(p) => Some(p.vr()),
            DcmObject::Sequence(_) => Some(VR::SQ),
            DcmObject::Item(_) => None,
        }
    }

    /// The kind of this node.
    pub fn ident(&self) -> Ident {
        match self {
            DcmObject::Element(e) => e.ident(),
            DcmObject::PixelData(_) => Ident::PixelData,
            DcmObject::Sequence(_) => Ident::Sequence,
            DcmObject::Item(i) => i.ident(),
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, DcmObject::Element(_) | DcmObject::PixelData(_))
    }

    /// Replace this node with a deep copy of another node of the same kind.
    pub fn copy_from(&mut self, rhs: &DcmObject) -> Result<()> {
        ensure!(
            self.ident() == rhs.ident(),
            IllegalCopySnafu {
                expected: self.ident(),
                got: rhs.ident(),
            }
        );
        *self = rhs.clone();
        Ok(())
    }

    pub fn as_element(&self) -> Option<&PrimitiveElement> {
        match self {
            DcmObject::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut PrimitiveElement> {
        match self {
            DcmObject::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_pixel_data(&self) -> Option<&PixelData> {
        match self {
            DcmObject::PixelData(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pixel_data_mut(&mut self) -> Option<&mut PixelData> {
        match self {
            DcmObject::PixelData(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            DcmObject::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            DcmObject::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            DcmObject::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match self {
            DcmObject::Item(i) => Some(i),
            _ => None,
        }
    }

    /// The number of bytes this node takes when encoded
    /// in the given transfer syntax, header included.
    pub fn calc_element_length(&self, ts: &TransferSyntax, encoding: EncodingType) -> u64 {
        let explicit = ts.is_explicit_vr();
        match self {
            DcmObject::Element(e) => {
                header_length(e.vr(), explicit) + u64::from(e.length().0)
            }
            DcmObject::PixelData(p) => p.calc_element_length(ts),
            DcmObject::Sequence(s) => {
                let delimiter = match encoding {
                    EncodingType::ExplicitLength => 0,
                    EncodingType::UndefinedLength => 8,
                };
                header_length(VR::SQ, explicit) + s.calc_value_length(ts, encoding) + delimiter
            }
            DcmObject::Item(i) => {
                let delimiter = match encoding {
                    EncodingType::ExplicitLength => 0,
                    EncodingType::UndefinedLength => 8,
                };
                8 + i.calc_length(ts, encoding) + delimiter
            }
        }
    }
}

impl From<PrimitiveElement> for DcmObject {
    fn from(e: PrimitiveElement) -> Self {
        DcmObject::Element(e)
    }
}

impl From<PixelData> for DcmObject {
    fn from(p: PixelData) -> Self {
        DcmObject::PixelData(p)
    }
}

impl From<Sequence> for DcmObject {
    fn from(s: Sequence) -> Self {
        DcmObject::Sequence(s)
    }
}

impl From<Item> for DcmObject {
    fn from(i: Item) -> Self {
        DcmObject::Item(i)
    }
}

/// The size of an element header.
/// Explicit VR headers of some representations
/// have two reserved bytes and a 32-bit length.
pub(crate) fn header_length(vr: VR, explicit_vr: bool) -> u64 {
    if explicit_vr && vr.has_extended_length() {
        12
    } else {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::PrimitiveElement;
    use dcmdata_dictionary_std::tags;
    use dcmdata_transfer_syntax_registry::entries;

    #[test]
    fn clone_keeps_the_kind() {
        let text = DcmObject::from(PrimitiveElement::new_with_vr(Tag(0x0008, 0x0080), VR::LO));
        assert_eq!(text.ident(), Ident::ByteString);
        assert_eq!(text.clone().ident(), Ident::ByteString);

        let seq = DcmObject::from(Sequence::new(tags::DIRECTORY_RECORD_SEQUENCE));
        assert_eq!(seq.clone().ident(), Ident::Sequence);
        assert_eq!(seq.vr(), Some(VR::SQ));
        assert_eq!(DcmObject::from(Item::new()).vr(), None);
    }

    #[test]
    fn copy_between_kinds_is_refused() {
        let mut text = DcmObject::from(PrimitiveElement::new_with_vr(tags::PATIENT_NAME, VR::PN));
        let mut other = PrimitiveElement::new_with_vr(tags::PATIENT_ID, VR::LO);
        other.put_string("12345").unwrap();
        text.copy_from(&DcmObject::from(other)).unwrap();
        assert_eq!(text.tag(), tags::PATIENT_ID);

        let seq = DcmObject::from(Sequence::new(tags::DIRECTORY_RECORD_SEQUENCE));
        let err = text.copy_from(&seq).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCall);
        assert!(matches!(
            err,
            Error::IllegalCopy {
                expected: Ident::ByteString,
                got: Ident::Sequence,
                ..
            }
        ));
    }

    #[test]
    fn element_lengths_follow_the_transfer_syntax() {
        let mut e = PrimitiveElement::new_with_vr(tags::SPECIFIC_CHARACTER_SET, VR::CS);
        e.put_string("ISO_IR 100").unwrap();
        let e = DcmObject::from(e);
        let explicit = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let implicit = entries::IMPLICIT_VR_LITTLE_ENDIAN;
        assert_eq!(e.calc_element_length(&explicit, EncodingType::ExplicitLength), 18);
        assert_eq!(e.calc_element_length(&implicit, EncodingType::ExplicitLength), 18);

        let mut ob = PrimitiveElement::new_with_vr(Tag(0x0009, 0x1010), VR::OB);
        ob.put_bytes(vec![1, 2, 3]);
        let ob = DcmObject::from(ob);
        // odd values are padded
        assert_eq!(ob.calc_element_length(&explicit, EncodingType::ExplicitLength), 16);
        assert_eq!(ob.calc_element_length(&implicit, EncodingType::ExplicitLength), 12);
    }
}
