//! Stateful element stream decoding and encoding.

pub mod decode;
pub mod encode;

/// Round a value length up to the next even number.
#[inline]
pub(crate) fn even_len(len: u32) -> u32 {
    len.saturating_add(1) & !1
}
