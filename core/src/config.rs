//! Process-wide behavior toggles.
//!
//! These flags apply to every reading operation
//! unless overridden by the operation's own options.

use std::sync::atomic::{AtomicBool, Ordering};

static AUTOMATIC_DATA_CORRECTION: AtomicBool = AtomicBool::new(true);
static ACCEPT_ODD_LENGTH: AtomicBool = AtomicBool::new(true);

/// Whether malformed values are corrected while reading,
/// such as UIDs carrying whitespace or trailing padding.
///
/// Enabled by default.
pub fn automatic_data_correction() -> bool {
    AUTOMATIC_DATA_CORRECTION.load(Ordering::Relaxed)
}

/// Enable or disable the automatic correction of malformed values.
pub fn set_automatic_data_correction(enabled: bool) {
    AUTOMATIC_DATA_CORRECTION.store(enabled, Ordering::Relaxed);
}

/// Whether elements with an odd value length are accepted while reading.
/// When disabled, such elements are reported as corrupted data.
///
/// Enabled by default.
pub fn accept_odd_length() -> bool {
    ACCEPT_ODD_LENGTH.load(Ordering::Relaxed)
}

/// Enable or disable the acceptance of odd value lengths.
pub fn set_accept_odd_length(enabled: bool) {
    ACCEPT_ODD_LENGTH.store(enabled, Ordering::Relaxed);
}
