//! In-place byte order conversion of value buffers.
//!
//! Values are held in memory in the byte order of the running machine,
//! and converted to the byte order of a transfer syntax
//! only when read from or written to a stream.

use byteordered::Endianness;

/// The byte order of a stream or buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// The byte order is not known,
    /// so no conversion may take place.
    Unknown,
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the running machine.
    #[inline]
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Convert to the endianness type of `byteordered`,
    /// if the byte order is known.
    pub fn endianness(self) -> Option<Endianness> {
        match self {
            ByteOrder::Unknown => None,
            ByteOrder::Little => Some(Endianness::Little),
            ByteOrder::Big => Some(Endianness::Big),
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::Unknown
    }
}

impl From<Endianness> for ByteOrder {
    fn from(e: Endianness) -> Self {
        match e {
            Endianness::Little => ByteOrder::Little,
            Endianness::Big => ByteOrder::Big,
        }
    }
}

/// Convert the values in `buf` from byte order `old` to byte order `new`,
/// where each value occupies `value_width` bytes.
///
/// Nothing happens if either order is unknown, if both orders are the same,
/// or if values are single bytes.
/// A trailing incomplete value is left untouched.
/// Calling this twice with the same arguments restores the original buffer.
pub fn swap_if_necessary(new: ByteOrder, old: ByteOrder, buf: &mut [u8], value_width: usize) {
    if new == ByteOrder::Unknown || old == ByteOrder::Unknown || new == old || value_width <= 1 {
        return;
    }
    swap_bytes(buf, value_width);
}

/// Reverse the bytes of each `value_width`-sized unit of `buf`.
pub fn swap_bytes(buf: &mut [u8], value_width: usize) {
    match (value_width, buf.len()) {
        (0, _) | (1, _) => {}
        (2, 2) => buf.swap(0, 1),
        (4, 4) => buf.reverse(),
        (w, _) => {
            for unit in buf.chunks_exact_mut(w) {
                unit.reverse();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn swaps_words() {
        let mut buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        swap_if_necessary(ByteOrder::Big, ByteOrder::Little, &mut buf, 2);
        assert_eq!(buf, [0x02, 0x01, 0x04, 0x03, 0x06, 0x05]);
    }

    #[test]
    fn swaps_long_words() {
        let mut buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        swap_if_necessary(ByteOrder::Little, ByteOrder::Big, &mut buf, 4);
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01, 0x08, 0x07, 0x06, 0x05]);

        let mut single = 0x1234_5678_u32.to_le_bytes();
        swap_if_necessary(ByteOrder::Big, ByteOrder::Little, &mut single, 4);
        assert_eq!(single, 0x1234_5678_u32.to_be_bytes());
    }

    #[rstest]
    #[case(ByteOrder::Little, ByteOrder::Little, 2)]
    #[case(ByteOrder::Unknown, ByteOrder::Big, 4)]
    #[case(ByteOrder::Big, ByteOrder::Unknown, 2)]
    #[case(ByteOrder::Little, ByteOrder::Big, 1)]
    #[case(ByteOrder::Little, ByteOrder::Big, 0)]
    fn no_op_cases(#[case] new: ByteOrder, #[case] old: ByteOrder, #[case] width: usize) {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_if_necessary(new, old, &mut buf, width);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[rstest]
    #[case(2)]
    #[case(4)]
    #[case(8)]
    fn swap_is_an_involution(#[case] width: usize) {
        let original: Vec<u8> = (0..64).collect();
        let mut buf = original.clone();
        swap_if_necessary(ByteOrder::Big, ByteOrder::Little, &mut buf, width);
        assert_ne!(buf, original);
        swap_if_necessary(ByteOrder::Big, ByteOrder::Little, &mut buf, width);
        assert_eq!(buf, original);
    }

    #[test]
    fn trailing_partial_unit_is_kept() {
        let mut buf = [1, 2, 3, 4, 5];
        swap_if_necessary(ByteOrder::Big, ByteOrder::Little, &mut buf, 2);
        assert_eq!(buf, [2, 1, 4, 3, 5]);
    }

    #[test]
    fn native_order_matches_target() {
        let native = ByteOrder::native();
        assert_eq!(
            native,
            ByteOrder::from(Endianness::native()),
        );
        assert_eq!(native.endianness(), Some(Endianness::native()));
        assert_eq!(ByteOrder::Unknown.endianness(), None);
    }
}
