//! Root module for the built-in pixel data codecs.
//!
//! Each codec family comes with registration objects
//! which add its codecs to the [global codec list](crate::global_codecs)
//! and remove them again.
//!
//! - [`rle`] provides native RLE Lossless decoding and encoding.
//!   Requires the `rle` feature,
//!   enabled by default.
//! - [`jpeg`] provides JPEG decoding
//!   (baseline, extended and lossless)
//!   and encoding (baseline),
//!   through `jpeg-decoder` and `jpeg-encoder`.
//!   Requires the `jpeg` feature.

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "rle")]
pub mod rle;

/// **Note:** This module is a stub.
/// Enable the `jpeg` feature to use this module.
#[cfg(not(feature = "jpeg"))]
pub mod jpeg {}

/// **Note:** This module is a stub.
/// Enable the `rle` feature to use this module.
#[cfg(not(feature = "rle"))]
pub mod rle {}

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether the given transfer syntax holds native pixel data.
#[allow(dead_code)]
pub(crate) fn is_native(uid: &str) -> bool {
    crate::get_registry()
        .get(uid)
        .map_or(false, |ts| !ts.is_encapsulated())
}

static UID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Create a new unique identifier under the `2.25` root,
/// for codecs which assign a new SOP instance UID
/// to the images they encode.
#[allow(dead_code)]
pub(crate) fn new_instance_uid() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let count = UID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    // fits in the 39 digits allowed after the root
    let value = (nanos << 48) ^ (u128::from(pid) << 32) ^ u128::from(count);
    format!("2.25.{}", value & ((1u128 << 127) - 1))
}

#[cfg(test)]
mod tests {
    use super::new_instance_uid;
    use dcmdata_core::check::is_valid_uid;

    #[test]
    fn instance_uids_are_unique_and_valid() {
        let a = new_instance_uid();
        let b = new_instance_uid();
        assert_ne!(a, b);
        assert!(a.starts_with("2.25."));
        assert!(a.len() <= 64);
        assert!(is_valid_uid(&a));
    }
}
