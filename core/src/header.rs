//! This modules contains the data types of a DICOM element header:
//! the attribute tag key, the value length,
//! and the headers found inside sequences.

use crate::error::{
    Error, ParseTagSnafu, Result, UnexpectedDelimiterLengthSnafu, UnexpectedItemTagSnafu,
};
use crate::vr::VR;
use snafu::ensure;
use std::fmt;
use std::str::FromStr;

/// A trait for a data type containing a DICOM header.
pub trait HasLength {
    /// Retrieve the value data's length as specified by the data element or
    /// item, in bytes.
    ///
    /// It is named `length` to make it distinct from the conventional method
    /// signature `len(&self) -> usize` for the number of elements of a
    /// collection.
    fn length(&self) -> Length;

    /// Check whether the value is empty (0 length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A trait for a type which has a data element header.
pub trait Header: HasLength {
    /// Retrieve the element's tag as a `(group, element)` tuple.
    fn tag(&self) -> Tag;

    /// Check whether this is the header of an item.
    fn is_item(&self) -> bool {
        self.tag() == Tag::ITEM
    }

    /// Check whether this is the header of an item delimiter.
    fn is_item_delimiter(&self) -> bool {
        self.tag() == Tag::ITEM_DELIMITATION
    }

    /// Check whether this is the header of a sequence delimiter.
    fn is_sequence_delimiter(&self) -> bool {
        self.tag() == Tag::SEQUENCE_DELIMITATION
    }
}

/// Group number type
pub type GroupNumber = u16;
/// Element number type
pub type ElementNumber = u16;

/// The data type for the key of a DICOM attribute,
/// also known as the attribute tag.
///
/// Tags are ordered by group number first, then by element number,
/// which is the order in which elements appear in an encoded data set.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// The wildcard key, matching any attribute in searches.
    pub const WILDCARD: Tag = Tag(0xFFFF, 0xFFFF);
    /// Item `(FFFE,E000)`
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// Item Delimitation Item `(FFFE,E00D)`
    pub const ITEM_DELIMITATION: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence Delimitation Item `(FFFE,E0DD)`
    pub const SEQUENCE_DELIMITATION: Tag = Tag(0xFFFE, 0xE0DD);

    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// Whether this is the wildcard key.
    #[inline]
    pub fn is_wildcard(self) -> bool {
        self == Tag::WILDCARD
    }

    /// Whether the tag belongs to a private group (odd group number),
    /// excluding the illegal groups 0001, 0003, 0005, 0007 and FFFF.
    pub fn is_private(self) -> bool {
        self.0 % 2 == 1 && self.0 > 0x0008 && self.0 != 0xFFFF
    }

    /// Whether this is a private creator element `(gggg,0010-00FF)`.
    pub fn is_private_reservation(self) -> bool {
        self.is_private() && (0x0010..=0x00FF).contains(&self.1)
    }

    /// Whether this is a group length element `(gggg,0000)`.
    pub fn is_group_length(self) -> bool {
        self.1 == 0x0000
    }

    /// Whether the tag belongs to group FFFE,
    /// used for items and delimiters only.
    pub fn is_item_group(self) -> bool {
        self.0 == 0xFFFE
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            f.write_str("(????,????)")
        } else {
            write!(f, "({:04X},{:04X})", self.0, self.1)
        }
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// Parse a tag from one of the text forms
/// `(gggg,eeee)`, `gggg,eeee` or `ggggeeee`.
impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let t = t
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(t);
        let (g, e) = match t.split_once(',') {
            Some(parts) => parts,
            None if t.len() == 8 && t.is_char_boundary(4) => t.split_at(4),
            None => return ParseTagSnafu { text: s }.fail(),
        };
        ensure!(g.len() == 4 && e.len() == 4, ParseTagSnafu { text: s });
        match (
            u16::from_str_radix(g, 16),
            u16::from_str_radix(e, 16),
        ) {
            (Ok(g), Ok(e)) => Ok(Tag(g, e)),
            _ => ParseTagSnafu { text: s }.fail(),
        }
    }
}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// (unspecified) length, which would have to be determined
/// with a traversal based on the content's encoding.
///
/// Unlike plain `u32`, arithmetic over an undefined length
/// always stays undefined.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Create a new length value from its internal representation.
    /// This is equivalent to `Length(len)`.
    #[inline]
    pub fn new(len: u32) -> Self {
        Length(len)
    }

    /// Create a new length value with the given number of bytes.
    ///
    /// # Panic
    ///
    /// This function will panic if `len` represents an undefined length.
    #[inline]
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Check whether this length is undefined (unknown).
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined (not undefined).
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    /// Returns `None` if it represents an undefined length.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }

    /// Whether the length is defined and odd.
    #[inline]
    pub fn is_odd(self) -> bool {
        self.get().map(|l| l % 2 == 1).unwrap_or(false)
    }
}

impl From<u32> for Length {
    #[inline]
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Self;

    fn add(self, rhs: Length) -> Self::Output {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Length::UNDEFINED,
            (l1, l2) => {
                let o = l1.saturating_add(l2);
                debug_assert!(o != UNDEFINED_LEN, "integer overflow (0xFFFF_FFFF reserved)");
                Length(o)
            }
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", l),
        }
    }
}

/// A data structure for a data element header, containing
/// a tag, value representation and specified length.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DataElementHeader {
    /// DICOM tag
    pub tag: Tag,
    /// Value Representation
    pub vr: VR,
    /// Element length
    pub len: Length,
}

impl HasLength for DataElementHeader {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

impl Header for DataElementHeader {
    #[inline]
    fn tag(&self) -> Tag {
        self.tag
    }
}

impl DataElementHeader {
    /// Create a new data element header with the given properties.
    /// This is just a trivial constructor.
    #[inline]
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr,
            len,
        }
    }

    /// Retrieve the element's value representation, which can be unknown.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// Check whether the header suggests the value to be a sequence value:
    /// if the value representation is SQ or the length is undefined.
    #[inline]
    pub fn is_non_primitive(&self) -> bool {
        self.vr == VR::SQ || self.len.is_undefined()
    }

    /// Check whether the header describes
    /// an encapsulated pixel data element.
    #[inline]
    pub fn is_encapsulated_pixeldata(&self) -> bool {
        self.tag == Tag(0x7FE0, 0x0010) && self.len.is_undefined()
    }
}

/// Data type for describing a sequence item data element.
/// If the element represents an item, it will also contain
/// the specified length.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// The cursor contains an item.
    Item {
        /// the length of the item in bytes (can be undefined)
        len: Length,
    },
    /// The cursor read an item delimiter.
    /// The element ends here and should not be read any further.
    ItemDelimiter,
    /// The cursor read a sequence delimiter.
    /// The element ends here and should not be read any further.
    SequenceDelimiter,
}

impl SequenceItemHeader {
    /// Create a sequence item header using the element's raw properties.
    /// An error can be raised if the given properties do not relate to a
    /// sequence item, a sequence item delimiter or a sequence delimiter.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> Result<SequenceItemHeader> {
        let tag = tag.into();
        match tag {
            Tag::ITEM => Ok(SequenceItemHeader::Item { len }),
            Tag::ITEM_DELIMITATION | Tag::SEQUENCE_DELIMITATION => {
                // delimiters should not have a positive length
                ensure!(
                    len == Length(0),
                    UnexpectedDelimiterLengthSnafu { tag, len: len.0 }
                );
                if tag == Tag::ITEM_DELIMITATION {
                    Ok(SequenceItemHeader::ItemDelimiter)
                } else {
                    Ok(SequenceItemHeader::SequenceDelimiter)
                }
            }
            tag => UnexpectedItemTagSnafu { tag }.fail(),
        }
    }
}

impl HasLength for SequenceItemHeader {
    #[inline]
    fn length(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len } => len,
            SequenceItemHeader::ItemDelimiter | SequenceItemHeader::SequenceDelimiter => {
                Length(0)
            }
        }
    }
}

impl Header for SequenceItemHeader {
    #[inline]
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Tag::ITEM,
            SequenceItemHeader::ItemDelimiter => Tag::ITEM_DELIMITATION,
            SequenceItemHeader::SequenceDelimiter => Tag::SEQUENCE_DELIMITATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display_and_order() {
        assert_eq!(Tag(0x0008, 0x0005).to_string(), "(0008,0005)");
        assert_eq!(Tag(0x7FE0, 0x0010).to_string(), "(7FE0,0010)");
        assert_eq!(Tag::WILDCARD.to_string(), "(????,????)");

        assert!(Tag(0x0008, 0xFFFF) < Tag(0x0010, 0x0000));
        assert!(Tag(0x0010, 0x0010) < Tag(0x0010, 0x0020));
    }

    #[test]
    fn tag_from_str() {
        assert_eq!("(0010,0020)".parse::<Tag>().unwrap(), Tag(0x0010, 0x0020));
        assert_eq!("7fe0,0010".parse::<Tag>().unwrap(), Tag(0x7FE0, 0x0010));
        assert_eq!("00280010".parse::<Tag>().unwrap(), Tag(0x0028, 0x0010));
        assert!("0010,20".parse::<Tag>().is_err());
        assert!("PatientName".parse::<Tag>().is_err());
    }

    #[test]
    fn length_arithmetic() {
        assert_eq!(Length(4) + Length(6), Length(10));
        assert!((Length(4) + Length::UNDEFINED).is_undefined());
        assert_eq!(Length::UNDEFINED.get(), None);
        assert!(Length(3).is_odd());
        assert!(!Length::UNDEFINED.is_odd());
        assert_eq!(Length::UNDEFINED.to_string(), "U/L");
    }

    #[test]
    fn sequence_item_headers() {
        assert_eq!(
            SequenceItemHeader::new(Tag::ITEM, Length(12)).unwrap(),
            SequenceItemHeader::Item { len: Length(12) }
        );
        assert_eq!(
            SequenceItemHeader::new(Tag::SEQUENCE_DELIMITATION, Length(0)).unwrap(),
            SequenceItemHeader::SequenceDelimiter
        );
        assert!(SequenceItemHeader::new(Tag::ITEM_DELIMITATION, Length(4)).is_err());
        assert!(SequenceItemHeader::new(Tag(0x0008, 0x0016), Length(4)).is_err());
    }
}
