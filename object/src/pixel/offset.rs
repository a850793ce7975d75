//! The basic offset table of encapsulated pixel data.

use byteordered::byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use dcmdata_encoding::adapters::EncapsulatedPixelData;
use dcmdata_encoding::swap::ByteOrder;
use std::ops::Deref;

/// The byte offset of the first fragment item of each frame,
/// relative to the first fragment item.
/// An empty table means that no offsets are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetList(Vec<u32>);

impl OffsetList {
    pub fn new() -> Self {
        OffsetList(Vec::new())
    }

    /// Parse the contents of the offset table item,
    /// given the byte order of the stream.
    pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
        let mut offsets = vec![0u32; bytes.len() / 4];
        let bytes = &bytes[..offsets.len() * 4];
        match order {
            ByteOrder::Big => BigEndian::read_u32_into(bytes, &mut offsets),
            _ => LittleEndian::read_u32_into(bytes, &mut offsets),
        }
        OffsetList(offsets)
    }

    /// Compute the table from the lengths of the fragments
    /// and the index of the first fragment of each frame.
    pub fn compute<I>(fragment_lengths: I, frame_starts: &[usize]) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut position = 0u32;
        let positions: Vec<u32> = fragment_lengths
            .into_iter()
            .map(|len| {
                let current = position;
                position = position.wrapping_add(EncapsulatedPixelData::fragment_item_size(len));
                current
            })
            .collect();
        OffsetList(
            frame_starts
                .iter()
                .map(|&i| positions.get(i).copied().unwrap_or(0))
                .collect(),
        )
    }

    /// Whether the table is consistent with the number of frames:
    /// either empty or with one offset per frame.
    pub fn is_valid_for(&self, number_of_frames: u32) -> bool {
        self.0.is_empty() || self.0.len() == number_of_frames as usize
    }

    /// The number of bytes of the offset table item value.
    pub fn byte_len(&self) -> u64 {
        4 * self.0.len() as u64
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for OffsetList {
    fn from(offsets: Vec<u32>) -> Self {
        OffsetList(offsets)
    }
}

impl Deref for OffsetList {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_fragment_sizes() {
        // fragments of 10, 5 (padded to 6) and 4 bytes
        let table = OffsetList::compute(vec![10, 5, 4], &[0, 2]);
        assert_eq!(&*table, &[0, 18 + 14]);
        assert!(table.is_valid_for(2));
        assert!(!table.is_valid_for(3));
        assert!(OffsetList::new().is_valid_for(3));
        assert_eq!(table.byte_len(), 8);
    }

    #[test]
    fn parse_in_either_byte_order() {
        let le = [0, 0, 0, 0, 0x20, 0, 0, 0];
        assert_eq!(&*OffsetList::from_bytes(&le, ByteOrder::Little), &[0, 0x20]);
        let be = [0, 0, 0, 0, 0, 0, 0, 0x20];
        assert_eq!(&*OffsetList::from_bytes(&be, ByteOrder::Big), &[0, 0x20]);
    }
}
