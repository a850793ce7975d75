//! Tag ranges, for dictionary entries which cover repeating groups
//! or repeating elements.

use crate::header::Tag;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::str::FromStr;

/// Restriction of the values in a range of groups or elements.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RangeRestriction {
    /// every value in the range is accepted
    #[default]
    Unspecified,
    /// only even values are accepted
    Even,
    /// only odd values are accepted
    Odd,
}

impl RangeRestriction {
    #[inline]
    fn accepts(self, v: u16) -> bool {
        match self {
            RangeRestriction::Unspecified => true,
            RangeRestriction::Even => v % 2 == 0,
            RangeRestriction::Odd => v % 2 == 1,
        }
    }
}

/// Specification of the range of tags pertaining to an attribute.
///
/// Very often, the dictionary of attributes indicates a unique
/// group part and element part `(group,elem)`,
/// but occasionally an attribute may cover
/// a range of groups or elements instead.
/// For example,
/// _Overlay Data_ (60xx,3000) has more than one possible tag,
/// since it is part of a repeating group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TagRange {
    lower: Tag,
    upper: Tag,
    group_restriction: RangeRestriction,
    element_restriction: RangeRestriction,
}

impl TagRange {
    /// A range of exactly one tag.
    pub fn single(tag: Tag) -> Self {
        TagRange {
            lower: tag,
            upper: tag,
            group_restriction: RangeRestriction::Unspecified,
            element_restriction: RangeRestriction::Unspecified,
        }
    }

    /// A range bounded by the given keys (inclusive),
    /// with the group part and element part ranging independently.
    pub fn new(lower: Tag, upper: Tag) -> Self {
        TagRange {
            lower: Tag(lower.0.min(upper.0), lower.1.min(upper.1)),
            upper: Tag(lower.0.max(upper.0), lower.1.max(upper.1)),
            group_restriction: RangeRestriction::Unspecified,
            element_restriction: RangeRestriction::Unspecified,
        }
    }

    /// Restrict the range to even or odd groups and elements.
    pub fn with_restrictions(
        mut self,
        group_restriction: RangeRestriction,
        element_restriction: RangeRestriction,
    ) -> Self {
        self.group_restriction = group_restriction;
        self.element_restriction = element_restriction;
        self
    }

    /// The lowest tag key in the range.
    #[inline]
    pub fn lower(&self) -> Tag {
        self.lower
    }

    /// The highest tag key in the range.
    #[inline]
    pub fn upper(&self) -> Tag {
        self.upper
    }

    /// The restriction applied to the group part.
    #[inline]
    pub fn group_restriction(&self) -> RangeRestriction {
        self.group_restriction
    }

    /// The restriction applied to the element part.
    #[inline]
    pub fn element_restriction(&self) -> RangeRestriction {
        self.element_restriction
    }

    /// Whether the range covers more than one tag.
    #[inline]
    pub fn is_repeating(&self) -> bool {
        self.lower != self.upper
    }

    /// Check whether the given tag is covered by this range.
    pub fn contains(&self, tag: Tag) -> bool {
        (self.lower.0..=self.upper.0).contains(&tag.0)
            && (self.lower.1..=self.upper.1).contains(&tag.1)
            && self.group_restriction.accepts(tag.0)
            && self.element_restriction.accepts(tag.1)
    }

    /// The number of tag keys covered by the bounds of this range,
    /// used to find the most specific range among overlapping ones.
    pub fn width(&self) -> u64 {
        let groups = u64::from(self.upper.0 - self.lower.0) + 1;
        let elements = u64::from(self.upper.1 - self.lower.1) + 1;
        let factor = |r: RangeRestriction, n: u64| match r {
            RangeRestriction::Unspecified => n,
            _ => (n + 1) / 2,
        };
        factor(self.group_restriction, groups) * factor(self.element_restriction, elements)
    }
}

impl From<Tag> for TagRange {
    fn from(tag: Tag) -> Self {
        TagRange::single(tag)
    }
}

impl fmt::Display for TagRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_repeating() {
            return fmt::Display::fmt(&self.lower, f);
        }
        let part = |f: &mut fmt::Formatter<'_>, lo: u16, hi: u16| {
            if lo == hi {
                write!(f, "{:04X}", lo)
            } else if lo & 0xFF == 0 && hi == lo | 0xFF {
                write!(f, "{:02X}xx", lo >> 8)
            } else {
                write!(f, "{:04X}-{:04X}", lo, hi)
            }
        };
        f.write_str("(")?;
        part(f, self.lower.0, self.upper.0)?;
        f.write_str(",")?;
        part(f, self.lower.1, self.upper.1)?;
        f.write_str(")")
    }
}

/// An error returned when parsing an invalid tag range.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TagRangeParseError {
    #[snafu(display("Not enough tag components, expected tag (group, element)"))]
    MissingTag { backtrace: Backtrace },
    #[snafu(display("Not enough tag components, expected tag element"))]
    MissingTagElement { backtrace: Backtrace },
    #[snafu(display("Tag component `{}` has an invalid form", component))]
    InvalidComponent {
        component: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Invalid hexadecimal number in tag component `{}`", component))]
    InvalidNumber {
        component: String,
        backtrace: Backtrace,
        source: std::num::ParseIntError,
    },
}

/// Parse one range component:
/// `gggg`, `ggxx` (the two rightmost digits open)
/// or `gggg-hhhh` (an explicit range).
fn parse_component(c: &str) -> Result<(u16, u16, bool), TagRangeParseError> {
    let hex = |s: &str| u16::from_str_radix(s, 16).context(InvalidNumberSnafu { component: c });
    if let Some((lo, hi)) = c.split_once('-') {
        ensure!(
            lo.len() == 4 && hi.len() == 4,
            InvalidComponentSnafu { component: c }
        );
        return Ok((hex(lo)?, hex(hi)?, false));
    }
    ensure!(c.len() == 4, InvalidComponentSnafu { component: c });
    match c.get(2..) {
        Some("xx") | Some("XX") => {
            let head = c.get(..2).context(InvalidComponentSnafu { component: c })?;
            let lo = hex(head)? << 8;
            Ok((lo, lo | 0xFF, true))
        }
        _ => {
            let v = hex(c)?;
            Ok((v, v, false))
        }
    }
}

/// Parse a tag range such as `(0010,0010)`, `(60xx,3000)`,
/// `(0020,31xx)` or `(6000-60FF,3000)`.
///
/// Repeating groups written as `ggxx` only cover even groups,
/// as is the case of the standard curve, overlay and audio groups.
impl FromStr for TagRange {
    type Err = TagRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);
        let mut parts = s.split(',');
        let group = parts.next().filter(|p| !p.is_empty()).context(MissingTagSnafu)?;
        let elem = parts.next().context(MissingTagElementSnafu)?;
        let (g_lo, g_hi, g_open) = parse_component(group.trim())?;
        let (e_lo, e_hi, _) = parse_component(elem.trim())?;
        let group_restriction = if g_open {
            RangeRestriction::Even
        } else {
            RangeRestriction::Unspecified
        };
        Ok(TagRange::new(Tag(g_lo, e_lo), Tag(g_hi, e_hi))
            .with_restrictions(group_restriction, RangeRestriction::Unspecified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tag_ranges() {
        let single: TagRange = "(0010,0010)".parse().unwrap();
        assert_eq!(single, TagRange::single(Tag(0x0010, 0x0010)));
        assert!(!single.is_repeating());

        let overlay: TagRange = "(60xx,3000)".parse().unwrap();
        assert!(overlay.is_repeating());
        assert_eq!(overlay.lower(), Tag(0x6000, 0x3000));
        assert_eq!(overlay.upper(), Tag(0x60FF, 0x3000));
        assert_eq!(overlay.group_restriction(), RangeRestriction::Even);
        assert!(overlay.contains(Tag(0x6002, 0x3000)));
        assert!(!overlay.contains(Tag(0x6001, 0x3000)));
        assert!(!overlay.contains(Tag(0x6100, 0x3000)));

        let elements: TagRange = "0020,31xx".parse().unwrap();
        assert!(elements.contains(Tag(0x0020, 0x3101)));
        assert!(!elements.contains(Tag(0x0021, 0x3101)));

        let explicit: TagRange = "(7F00-7FFF,0010)".parse().unwrap();
        assert!(explicit.contains(Tag(0x7F13, 0x0010)));

        assert!("(0010)".parse::<TagRange>().is_err());
        assert!("(00G0,0010)".parse::<TagRange>().is_err());
        assert!("(010,0010)".parse::<TagRange>().is_err());
    }

    #[test]
    fn range_width() {
        let single = TagRange::single(Tag(0x0010, 0x0010));
        assert_eq!(single.width(), 1);
        let overlay: TagRange = "(60xx,3000)".parse().unwrap();
        assert_eq!(overlay.width(), 128);
        let all_groups = TagRange::new(Tag(0x0000, 0x3000), Tag(0xFFFF, 0x3000));
        assert!(all_groups.width() > overlay.width());
    }

    #[test]
    fn display_ranges() {
        let overlay: TagRange = "(60xx,3000)".parse().unwrap();
        assert_eq!(overlay.to_string(), "(60xx,3000)");
        let explicit: TagRange = "(7F00-7F10,0010)".parse().unwrap();
        assert_eq!(explicit.to_string(), "(7F00-7F10,0010)");
    }
}
