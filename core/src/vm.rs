//! Value multiplicity: counting and splitting backslash-delimited values,
//! and the multiplicity constraints found in data dictionaries.

use crate::error::{Error, ParseVmSnafu, Result};
use snafu::OptionExt;
use std::fmt;
use std::str::FromStr;

/// The separator between the values of a multi-valued string.
pub const VALUE_SEPARATOR: char = '\\';

/// Count the number of values in a backslash-delimited string.
///
/// An empty string holds one empty value,
/// so the result is never zero.
pub fn vm_from_str(s: &str) -> usize {
    s.matches(VALUE_SEPARATOR).count() + 1
}

/// Extract the first value of a backslash-delimited string.
///
/// `cursor` is advanced past the delimiter,
/// or set to `None` once the last value was taken.
/// Returns `None` when the cursor was already exhausted.
///
/// ```
/// # use dcmdata_core::vm::first_value_from_str;
/// let mut cursor = Some("a\\b");
/// assert_eq!(first_value_from_str(&mut cursor).as_deref(), Some("a"));
/// assert_eq!(first_value_from_str(&mut cursor).as_deref(), Some("b"));
/// assert_eq!(cursor, None);
/// assert_eq!(first_value_from_str(&mut cursor), None);
/// ```
pub fn first_value_from_str(cursor: &mut Option<&str>) -> Option<String> {
    let s = cursor.take()?;
    match s.split_once(VALUE_SEPARATOR) {
        Some((first, rest)) => {
            *cursor = Some(rest);
            Some(first.to_string())
        }
        None => Some(s.to_string()),
    }
}

/// Retrieve the value at position `pos` (zero-based)
/// of a backslash-delimited string.
pub fn value_at(s: &str, pos: usize) -> Option<&str> {
    s.split(VALUE_SEPARATOR).nth(pos)
}

/// A value multiplicity constraint,
/// such as `1`, `1-3`, `1-n` or `2-2n`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VmSpec {
    /// the minimum number of values
    pub min: u32,
    /// the maximum number of values, `None` if unbounded
    pub max: Option<u32>,
    /// the number of values must be `min` plus a multiple of `step`
    pub step: u32,
}

impl VmSpec {
    /// Exactly one value.
    pub const ONE: VmSpec = VmSpec::exactly(1);
    /// One or more values.
    pub const ONE_OR_MORE: VmSpec = VmSpec {
        min: 1,
        max: None,
        step: 1,
    };

    /// A constraint for an exact number of values.
    pub const fn exactly(n: u32) -> Self {
        VmSpec {
            min: n,
            max: Some(n),
            step: 1,
        }
    }

    /// A constraint for a bounded range of values.
    pub const fn range(min: u32, max: u32) -> Self {
        VmSpec {
            min,
            max: Some(max),
            step: 1,
        }
    }

    /// Check whether the given number of values satisfies this constraint.
    pub fn contains(&self, vm: u32) -> bool {
        if vm < self.min {
            return false;
        }
        if let Some(max) = self.max {
            if vm > max {
                return false;
            }
        }
        self.step <= 1 || (vm - self.min) % self.step == 0
    }
}

impl Default for VmSpec {
    fn default() -> Self {
        VmSpec::ONE
    }
}

impl FromStr for VmSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let parse = |n: &str| n.parse::<u32>().ok();
        let Some((min, max)) = text.split_once('-') else {
            let n = parse(text).context(ParseVmSnafu { text: s })?;
            return Ok(VmSpec::exactly(n));
        };
        let min = parse(min).context(ParseVmSnafu { text: s })?;
        if let Some(factor) = max.strip_suffix('n') {
            // "1-n", "2-2n", "3-3n"
            let step = if factor.is_empty() {
                1
            } else {
                parse(factor).context(ParseVmSnafu { text: s })?
            };
            if step == 0 || (step > 1 && step != min) {
                return ParseVmSnafu { text: s }.fail();
            }
            return Ok(VmSpec {
                min,
                max: None,
                step,
            });
        }
        let max = parse(max).context(ParseVmSnafu { text: s })?;
        if max < min {
            return ParseVmSnafu { text: s }.fail();
        }
        Ok(VmSpec::range(min, max))
    }
}

impl fmt::Display for VmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.max, self.step) {
            (Some(max), _) if max == self.min => write!(f, "{}", max),
            (Some(max), _) => write!(f, "{}-{}", self.min, max),
            (None, 1) => write!(f, "{}-n", self.min),
            (None, step) => write!(f, "{}-{}n", self.min, step),
        }
    }
}
