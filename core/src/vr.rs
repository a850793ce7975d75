//! Value representations and their static registry.
//!
//! Each [`VR`] maps to one [`VrInfo`] entry in a static table,
//! which tells how values of that representation are laid out:
//! the atomic unit for byte swapping,
//! the maximum value length,
//! whether values are text, and so on.

use crate::error::{Error, ParseVrSnafu, Result};
use std::fmt;
use std::str::FromStr;

/// An enum type for a DICOM value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Double
    FD,
    /// Floating Point Single
    FL,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

/// How a value representation stands with respect to the standard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VrClass {
    /// Defined by the DICOM standard and written to streams.
    Standard,
    /// Only used to tag nodes of the object tree, never encoded.
    Internal,
    /// Used by dictionaries for context-dependent representations,
    /// resolved to a standard one before encoding.
    NonStandard,
}

/// Properties of a value representation, as a set of flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct VrFlags(u8);

impl VrFlags {
    /// No flags.
    pub const NONE: VrFlags = VrFlags(0);
    /// Values are character strings.
    pub const STRING: VrFlags = VrFlags(1);
    /// Values are free text with a multiplicity of exactly one,
    /// the backslash being a literal character.
    pub const TEXT: VrFlags = VrFlags(1 << 1);
    /// The explicit VR header uses two reserved bytes and a 32-bit length.
    pub const EXTENDED_LENGTH: VrFlags = VrFlags(1 << 2);
    /// Values are sequences of fixed-size binary numbers.
    pub const NUMERIC: VrFlags = VrFlags(1 << 3);

    /// Whether all flags in `other` are set.
    #[inline]
    pub const fn contains(self, other: VrFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for VrFlags {
    type Output = VrFlags;

    fn bitor(self, rhs: VrFlags) -> VrFlags {
        VrFlags(self.0 | rhs.0)
    }
}

/// A static registry entry for a value representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VrInfo {
    /// the value representation described
    pub vr: VR,
    /// the two-letter code
    pub name: &'static str,
    /// human readable description
    pub description: &'static str,
    /// size of the atomic unit for byte swapping,
    /// 0 for representations without any byte order dependency
    pub value_width: usize,
    /// maximum length of one value in bytes (or characters for text),
    /// `None` when only bounded by the length field
    pub max_value_length: Option<u32>,
    /// property flags
    pub flags: VrFlags,
}

const S: VrFlags = VrFlags::STRING;
const N: VrFlags = VrFlags::NUMERIC;
const X: VrFlags = VrFlags::EXTENDED_LENGTH;

const fn or(a: VrFlags, b: VrFlags) -> VrFlags {
    VrFlags(a.0 | b.0)
}

const TXT: VrFlags = or(or(VrFlags::STRING, VrFlags::TEXT), VrFlags::EXTENDED_LENGTH);

macro_rules! vr_info {
    ($vr: ident, $desc: expr, $width: expr, $max: expr, $flags: expr) => {
        VrInfo {
            vr: VR::$vr,
            name: stringify!($vr),
            description: $desc,
            value_width: $width,
            max_value_length: $max,
            flags: $flags,
        }
    };
}

/// The value representation table,
/// indexed by the discriminant of `VR`.
static VR_TABLE: [VrInfo; 34] = [
    vr_info!(AE, "Application Entity", 1, Some(16), S),
    vr_info!(AS, "Age String", 1, Some(4), S),
    vr_info!(AT, "Attribute Tag", 2, Some(4), N),
    vr_info!(CS, "Code String", 1, Some(16), S),
    vr_info!(DA, "Date", 1, Some(8), S),
    vr_info!(DS, "Decimal String", 1, Some(16), S),
    vr_info!(DT, "Date Time", 1, Some(26), S),
    vr_info!(FD, "Floating Point Double", 8, Some(8), N),
    vr_info!(FL, "Floating Point Single", 4, Some(4), N),
    vr_info!(IS, "Integer String", 1, Some(12), S),
    vr_info!(LO, "Long String", 1, Some(64), S),
    vr_info!(LT, "Long Text", 1, Some(10240), or(S, VrFlags::TEXT)),
    vr_info!(OB, "Other Byte", 1, None, X),
    vr_info!(OD, "Other Double", 8, None, X),
    vr_info!(OF, "Other Float", 4, None, X),
    vr_info!(OL, "Other Long", 4, None, X),
    vr_info!(OV, "Other Very Long", 8, None, X),
    vr_info!(OW, "Other Word", 2, None, X),
    vr_info!(PN, "Person Name", 1, Some(64), S),
    vr_info!(SH, "Short String", 1, Some(16), S),
    vr_info!(SL, "Signed Long", 4, Some(4), N),
    vr_info!(SQ, "Sequence of Items", 0, None, X),
    vr_info!(SS, "Signed Short", 2, Some(2), N),
    vr_info!(ST, "Short Text", 1, Some(1024), or(S, VrFlags::TEXT)),
    vr_info!(SV, "Signed Very Long", 8, Some(8), or(N, X)),
    vr_info!(TM, "Time", 1, Some(16), S),
    vr_info!(UC, "Unlimited Characters", 1, None, or(S, X)),
    vr_info!(UI, "Unique Identifier", 1, Some(64), S),
    vr_info!(UL, "Unsigned Long", 4, Some(4), N),
    vr_info!(UN, "Unknown", 1, None, X),
    vr_info!(UR, "Universal Resource Identifier", 1, None, TXT),
    vr_info!(US, "Unsigned Short", 2, Some(2), N),
    vr_info!(UT, "Unlimited Text", 1, None, TXT),
    vr_info!(UV, "Unsigned Very Long", 8, Some(8), or(N, X)),
];

#[cfg(debug_assertions)]
static TABLE_CHECK: std::sync::Once = std::sync::Once::new();

#[cfg(debug_assertions)]
fn check_table() {
    for (i, info) in VR_TABLE.iter().enumerate() {
        assert_eq!(
            info.vr as usize, i,
            "VR table entry {} describes {:?}",
            i, info.vr
        );
        assert_eq!(info.name.as_bytes(), &info.vr.to_bytes());
    }
}

impl VR {
    /// All standard value representations, in table order.
    pub const ALL: [VR; 34] = [
        VR::AE,
        VR::AS,
        VR::AT,
        VR::CS,
        VR::DA,
        VR::DS,
        VR::DT,
        VR::FD,
        VR::FL,
        VR::IS,
        VR::LO,
        VR::LT,
        VR::OB,
        VR::OD,
        VR::OF,
        VR::OL,
        VR::OV,
        VR::OW,
        VR::PN,
        VR::SH,
        VR::SL,
        VR::SQ,
        VR::SS,
        VR::ST,
        VR::SV,
        VR::TM,
        VR::UC,
        VR::UI,
        VR::UL,
        VR::UN,
        VR::UR,
        VR::US,
        VR::UT,
        VR::UV,
    ];

    /// Obtain the registry entry of this value representation.
    pub fn info(self) -> &'static VrInfo {
        #[cfg(debug_assertions)]
        TABLE_CHECK.call_once(check_table);
        &VR_TABLE[self as usize]
    }

    /// Obtain the value representation corresponding to the given two
    /// bytes. Each byte should represent an alphabetic character in upper
    /// case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        std::str::from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        self.info().name
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.name_bytes();
        [bytes[0], bytes[1]]
    }

    fn name_bytes(self) -> &'static [u8] {
        // not going through `info` to keep the table check free of recursion
        VR_TABLE[self as usize].name.as_bytes()
    }

    /// The size of the atomic unit for byte swapping.
    #[inline]
    pub fn value_width(self) -> usize {
        self.info().value_width
    }

    /// Standard value representations are always `VrClass::Standard`.
    #[inline]
    pub fn class(self) -> VrClass {
        VrClass::Standard
    }

    /// Whether values of this representation are character strings.
    #[inline]
    pub fn is_string(self) -> bool {
        self.info().flags.contains(VrFlags::STRING)
    }

    /// Whether values are free text, where the backslash is not a separator.
    #[inline]
    pub fn is_text(self) -> bool {
        self.info().flags.contains(VrFlags::TEXT)
    }

    /// Whether values are binary numbers of fixed width.
    #[inline]
    pub fn is_numeric(self) -> bool {
        self.info().flags.contains(VrFlags::NUMERIC)
    }

    /// Whether the explicit VR element header carries two reserved bytes
    /// and a 32-bit length field.
    #[inline]
    pub fn has_extended_length(self) -> bool {
        self.info().flags.contains(VrFlags::EXTENDED_LENGTH)
    }

    /// Whether this is one of the other-binary representations
    /// (OB, OD, OF, OL, OV, OW, UN).
    pub fn is_other_binary(self) -> bool {
        matches!(
            self,
            VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::UN
        )
    }

    /// The byte used to pad values of this representation to an even length.
    pub fn padding(self) -> u8 {
        match self {
            VR::UI => b'\0',
            vr if vr.is_string() => b' ',
            _ => 0,
        }
    }
}

impl FromStr for VR {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        VR_TABLE
            .iter()
            .find(|info| info.name == string)
            .map(|info| info.vr)
            .ok_or_else(|| ParseVrSnafu { text: string }.build())
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}
