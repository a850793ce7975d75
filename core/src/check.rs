//! Conformance checks for values in text form,
//! following the rules of each value representation.
//!
//! Checks never fail with an error:
//! the outcome is reported as a [`ValueCheck`] status.

use crate::vm::{vm_from_str, VmSpec, VALUE_SEPARATOR};
use crate::vr::VR;
use chrono::NaiveDate;
use std::fmt;

/// The outcome of a value conformance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCheck {
    /// The value conforms to the value representation.
    Valid,
    /// A character outside of the allowed repertoire was found.
    InvalidCharacter {
        /// index of the value in a multi-valued string
        value: usize,
        /// byte position within the value
        position: usize,
    },
    /// A value exceeds the maximum length of the representation.
    MaximumLengthViolated {
        /// index of the value in a multi-valued string
        value: usize,
    },
    /// The number of values does not satisfy the multiplicity constraint.
    MultiplicityViolated {
        /// the number of values found
        vm: usize,
    },
    /// A value does not have the structure required by the representation,
    /// such as an impossible date.
    InvalidValue {
        /// index of the value in a multi-valued string
        value: usize,
    },
}

impl ValueCheck {
    /// Whether the check passed.
    #[inline]
    pub fn is_valid(self) -> bool {
        self == ValueCheck::Valid
    }
}

impl fmt::Display for ValueCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueCheck::Valid => f.write_str("valid"),
            ValueCheck::InvalidCharacter { value, position } => write!(
                f,
                "invalid character at position {} of value {}",
                position, value
            ),
            ValueCheck::MaximumLengthViolated { value } => {
                write!(f, "value {} exceeds maximum length", value)
            }
            ValueCheck::MultiplicityViolated { vm } => {
                write!(f, "value multiplicity {} not allowed", vm)
            }
            ValueCheck::InvalidValue { value } => write!(f, "value {} is malformed", value),
        }
    }
}

/// Check a string value of the given representation,
/// and its multiplicity when a constraint is given.
///
/// Multi-valued representations are split by backslash,
/// while text representations are checked as a single value.
/// Values are expected without the trailing padding.
pub fn check_value(vr: VR, value: &str, vm: Option<&VmSpec>) -> ValueCheck {
    let values: Vec<&str> = if vr.is_text() {
        vec![value]
    } else {
        value.split(VALUE_SEPARATOR).collect()
    };
    if let Some(multiplicity) = vm {
        let count = if value.is_empty() {
            0
        } else if vr.is_text() {
            1
        } else {
            vm_from_str(value)
        };
        // an empty value is always acceptable
        if count > 0 && !multiplicity.contains(count as u32) {
            return ValueCheck::MultiplicityViolated { vm: count };
        }
    }
    for (i, v) in values.iter().enumerate() {
        let outcome = check_single(vr, i, v);
        if !outcome.is_valid() {
            return outcome;
        }
    }
    ValueCheck::Valid
}

fn check_single(vr: VR, index: usize, value: &str) -> ValueCheck {
    if let Some(max) = vr.info().max_value_length {
        let len = if vr.is_text() || vr == VR::PN {
            value.chars().count()
        } else {
            value.len()
        };
        if len > max as usize {
            return ValueCheck::MaximumLengthViolated { value: index };
        }
    }
    if value.is_empty() {
        return ValueCheck::Valid;
    }

    let invalid_at = |position: usize| ValueCheck::InvalidCharacter {
        value: index,
        position,
    };
    let first_bad = |accept: &dyn Fn(char) -> bool| {
        value
            .char_indices()
            .find(|(_, c)| !accept(*c))
            .map(|(i, _)| invalid_at(i))
    };

    let bad = match vr {
        VR::CS => first_bad(&|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == ' '),
        VR::UI => first_bad(&|c| c.is_ascii_digit() || c == '.'),
        VR::DA => first_bad(&|c| c.is_ascii_digit()),
        VR::TM => first_bad(&|c| c.is_ascii_digit() || c == '.' || c == ' '),
        VR::DT => first_bad(&|c| c.is_ascii_digit() || c == '.' || c == '+' || c == '-' || c == ' '),
        VR::IS => first_bad(&|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' '),
        VR::DS => first_bad(&|c| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | ' ')
        }),
        VR::AS => first_bad(&|c| c.is_ascii_digit() || matches!(c, 'D' | 'W' | 'M' | 'Y')),
        VR::AE | VR::SH | VR::LO | VR::UC => first_bad(&|c| !c.is_control() || c == '\u{1b}'),
        VR::PN => first_bad(&|c| !c.is_control() || c == '\u{1b}'),
        VR::LT | VR::ST | VR::UT => {
            first_bad(&|c| !c.is_control() || matches!(c, '\r' | '\n' | '\t' | '\u{c}' | '\u{1b}'))
        }
        VR::UR => first_bad(&|c| c.is_ascii_graphic()),
        _ => None,
    };
    if let Some(outcome) = bad {
        return outcome;
    }

    let well_formed = match vr {
        VR::UI => is_valid_uid(value),
        VR::DA => is_valid_date(value),
        VR::TM => is_valid_time(value.trim_end()),
        VR::AS => {
            value.len() == 4
                && value[..3].bytes().all(|b| b.is_ascii_digit())
                && value[3..].bytes().all(|b| matches!(b, b'D' | b'W' | b'M' | b'Y'))
        }
        VR::IS => value.trim().parse::<i64>().map_or(false, |v| {
            v >= i64::from(i32::MIN) && v <= i64::from(i32::MAX)
        }),
        VR::DS => value.trim().parse::<f64>().map_or(false, |v| v.is_finite()),
        VR::AE => !value.trim().is_empty(),
        _ => true,
    };
    if well_formed {
        ValueCheck::Valid
    } else {
        ValueCheck::InvalidValue { value: index }
    }
}

/// Check the structure of a UID:
/// dot separated numeric components without leading zeros.
pub fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty()
        && uid.len() <= 64
        && uid.split('.').all(|c| {
            !c.is_empty()
                && c.bytes().all(|b| b.is_ascii_digit())
                && (c == "0" || !c.starts_with('0'))
        })
}

fn is_valid_date(value: &str) -> bool {
    if value.len() != 8 {
        return false;
    }
    let year = value[0..4].parse::<i32>();
    let month = value[4..6].parse::<u32>();
    let day = value[6..8].parse::<u32>();
    match (year, month, day) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

fn is_valid_time(value: &str) -> bool {
    let (hms, fraction) = match value.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (value, None),
    };
    if !matches!(hms.len(), 2 | 4 | 6) || !hms.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if let Some(fraction) = fraction {
        if hms.len() != 6 || fraction.is_empty() || fraction.len() > 6 {
            return false;
        }
    }
    let field = |i: usize| hms.get(i..i + 2).and_then(|s| s.parse::<u32>().ok());
    let hour_ok = field(0).map_or(false, |h| h < 24);
    let minute_ok = field(2).map_or(true, |m| m < 60);
    // leap seconds are allowed
    let second_ok = field(4).map_or(true, |s| s < 61);
    hour_ok && minute_ok && second_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VR::CS, "ORIGINAL\\PRIMARY", true)]
    #[case(VR::CS, "ISO_IR 100", true)]
    #[case(VR::CS, "lowercase", false)]
    #[case(VR::CS, "WAY_TOO_LONG_CODE_STRING", false)]
    #[case(VR::UI, "1.2.840.10008.1.2.1", true)]
    #[case(VR::UI, "1.2.840.010008", false)]
    #[case(VR::UI, "1.2.3 ", false)]
    #[case(VR::DA, "20240229", true)]
    #[case(VR::DA, "20230229", false)]
    #[case(VR::TM, "235959.123456", true)]
    #[case(VR::TM, "2460", false)]
    #[case(VR::IS, "-12\\+7", true)]
    #[case(VR::IS, "4294967296", false)]
    #[case(VR::DS, "1.5E-3\\ 2", true)]
    #[case(VR::DS, "1,5", false)]
    #[case(VR::AS, "045Y", true)]
    #[case(VR::AS, "45Y", false)]
    #[case(VR::LT, "line one\r\nline two \\ still one value", true)]
    #[case(VR::LO, "bell\u{7}", false)]
    fn check_values(#[case] vr: VR, #[case] value: &str, #[case] valid: bool) {
        assert_eq!(check_value(vr, value, None).is_valid(), valid, "{} {:?}", vr, value);
    }

    #[test]
    fn code_string_reports_position() {
        assert_eq!(
            check_value(VR::CS, "AB\\C-D", None),
            ValueCheck::InvalidCharacter {
                value: 1,
                position: 1
            }
        );
    }

    #[test]
    fn multiplicity_is_checked() {
        let pairs: VmSpec = "2-2n".parse().unwrap();
        assert!(check_value(VR::DS, "1\\2", Some(&pairs)).is_valid());
        assert_eq!(
            check_value(VR::DS, "1\\2\\3", Some(&pairs)),
            ValueCheck::MultiplicityViolated { vm: 3 }
        );
        // text keeps a multiplicity of one
        assert!(check_value(VR::ST, "a\\b", Some(&VmSpec::ONE)).is_valid());
        // empty values are accepted regardless of multiplicity
        assert!(check_value(VR::CS, "", Some(&pairs)).is_valid());
    }
}
