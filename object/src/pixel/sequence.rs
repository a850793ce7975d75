//! Fragments of encapsulated pixel data.

use super::offset::OffsetList;
use crate::list::DcmList;
use crate::node::{Ident, ItemIndexOutOfRangeSnafu, Result};
use dcmdata_core::Length;
use dcmdata_encoding::adapters::EncapsulatedPixelData;
use snafu::OptionExt;

/// One fragment of encapsulated pixel data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelItem {
    data: Vec<u8>,
}

impl PixelItem {
    pub fn new(data: Vec<u8>) -> Self {
        PixelItem { data }
    }

    pub fn ident(&self) -> Ident {
        Ident::PixelItem
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The encoded length of the fragment, padded to an even number.
    pub fn length(&self) -> Length {
        let len = self.data.len() as u32;
        Length(len + (len & 1))
    }
}

/// The basic offset table and the fragments of
/// one encapsulated representation of pixel data.
///
/// The sequence keeps track of the first fragment of each frame
/// when it is known,
/// so that the offset table can be recomputed before writing.
#[derive(Debug, Clone, Default)]
pub struct PixelSequence {
    offset_table: OffsetList,
    fragments: DcmList<PixelItem>,
    frame_starts: Option<Vec<usize>>,
}

impl PartialEq for PixelSequence {
    fn eq(&self, other: &Self) -> bool {
        self.offset_table == other.offset_table && self.fragments == other.fragments
    }
}

impl PixelSequence {
    pub fn new() -> Self {
        PixelSequence::default()
    }

    /// Take the contents of encapsulated pixel data.
    pub fn from_encapsulated(data: EncapsulatedPixelData) -> Self {
        let mut out = PixelSequence {
            offset_table: OffsetList::new(),
            fragments: data.fragments.into_iter().map(PixelItem::new).collect(),
            frame_starts: None,
        };
        out.set_offset_table(OffsetList::from(data.offset_table));
        out
    }

    /// Copy the contents into encapsulated pixel data,
    /// as exchanged with codecs.
    pub fn to_encapsulated(&self) -> EncapsulatedPixelData {
        EncapsulatedPixelData::new(
            self.offset_table.to_vec(),
            self.fragments.iter().map(|f| f.data().to_vec()).collect(),
        )
    }

    pub fn ident(&self) -> Ident {
        Ident::PixelSequence
    }

    pub fn offset_table(&self) -> &OffsetList {
        &self.offset_table
    }

    /// Replace the basic offset table.
    /// Frames are located from the table
    /// if every offset points at the start of a fragment.
    pub fn set_offset_table(&mut self, table: OffsetList) {
        self.frame_starts = if table.is_empty() {
            None
        } else {
            let positions = self.fragment_positions();
            table
                .iter()
                .map(|offset| positions.iter().position(|p| p == offset))
                .collect()
        };
        self.offset_table = table;
    }

    /// The number of fragments.
    pub fn card(&self) -> usize {
        self.fragments.card()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragment(&self, index: usize) -> Result<&PixelItem> {
        let card = self.card();
        self.fragments
            .get_at(index)
            .context(ItemIndexOutOfRangeSnafu { index, card })
    }

    pub fn fragments(&self) -> impl DoubleEndedIterator<Item = &PixelItem> + ExactSizeIterator {
        self.fragments.iter()
    }

    /// Add a fragment at the end.
    pub fn append(&mut self, fragment: PixelItem) {
        self.fragments.append(fragment);
    }

    /// Add a fragment which starts a new frame.
    pub fn append_frame(&mut self, fragment: PixelItem) {
        let index = self.fragments.card();
        if let Some(starts) = &mut self.frame_starts {
            starts.push(index);
        } else if index == 0 {
            self.frame_starts = Some(vec![0]);
        }
        self.fragments.append(fragment);
    }

    /// Insert a fragment at the given index.
    /// The frame layout is forgotten.
    pub fn insert(&mut self, fragment: PixelItem, index: usize) {
        self.fragments.insert_at(index, fragment);
        self.frame_starts = None;
    }

    /// Remove the fragment at the given index.
    /// The frame layout is forgotten.
    pub fn remove(&mut self, index: usize) -> Result<PixelItem> {
        let card = self.card();
        let out = self
            .fragments
            .remove_at(index)
            .context(ItemIndexOutOfRangeSnafu { index, card })?;
        self.frame_starts = None;
        Ok(out)
    }

    /// The position of each fragment item relative to the first one.
    pub fn fragment_positions(&self) -> Vec<u32> {
        let mut position = 0u32;
        self.fragments
            .iter()
            .map(|f| {
                let current = position;
                position = position.wrapping_add(8 + f.length().0);
                current
            })
            .collect()
    }

    /// The index of the first fragment of each frame.
    ///
    /// The known layout is used if it matches the number of frames.
    /// Otherwise a single frame spans all fragments,
    /// and as many fragments as frames map one to one.
    pub fn frame_starts(&self, number_of_frames: u32) -> Option<Vec<usize>> {
        let frames = number_of_frames as usize;
        match &self.frame_starts {
            Some(starts) if starts.len() == frames => return Some(starts.clone()),
            _ => {}
        }
        if frames == 0 || self.fragments.is_empty() {
            None
        } else if frames == 1 {
            Some(vec![0])
        } else if self.fragments.card() == frames {
            Some((0..frames).collect())
        } else {
            None
        }
    }

    /// The offset table matching the current fragments,
    /// as it should be written.
    /// Falls back to the table as read when the frame layout is unknown.
    pub fn computed_offset_table(&self) -> OffsetList {
        match &self.frame_starts {
            Some(starts) => {
                OffsetList::compute(self.fragments.iter().map(|f| f.data().len()), starts)
            }
            None => self.offset_table.clone(),
        }
    }

    /// Recompute the offset table from the fragment sizes,
    /// for the given number of frames.
    /// Returns whether the frame layout could be determined.
    pub fn recompute_offset_table(&mut self, number_of_frames: u32) -> bool {
        match self.frame_starts(number_of_frames) {
            Some(starts) => {
                self.offset_table =
                    OffsetList::compute(self.fragments.iter().map(|f| f.data().len()), &starts);
                self.frame_starts = Some(starts);
                true
            }
            None => false,
        }
    }

    /// The length of the encoded sequence after the element header:
    /// the offset table item, the fragment items and the sequence delimiter.
    pub fn calc_value_length(&self, offset_table: &OffsetList) -> u64 {
        let fragments: u64 = self
            .fragments
            .iter()
            .map(|f| 8 + u64::from(f.length().0))
            .sum();
        8 + offset_table.byte_len() + fragments + 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_layout_comes_from_the_offset_table() {
        let data = EncapsulatedPixelData::from_frames(
            vec![vec![1; 10], vec![2; 5], vec![3; 4]],
            Some(4),
            true,
        );
        let seq = PixelSequence::from_encapsulated(data);
        // 10 bytes in three fragments, 5 bytes in two, 4 bytes in one
        assert_eq!(seq.card(), 6);
        assert_eq!(seq.frame_starts(3), Some(vec![0, 3, 5]));
        assert_eq!(seq.computed_offset_table(), *seq.offset_table());
        assert_eq!(&**seq.offset_table(), &[0, 34, 56]);
    }

    #[test]
    fn layout_without_offset_table() {
        let mut seq = PixelSequence::new();
        seq.append(PixelItem::new(vec![0; 4]));
        seq.append(PixelItem::new(vec![0; 3]));
        assert_eq!(seq.frame_starts(1), Some(vec![0]));
        assert_eq!(seq.frame_starts(2), Some(vec![0, 1]));
        assert_eq!(seq.frame_starts(3), None);
        assert!(seq.computed_offset_table().is_empty());

        assert!(seq.recompute_offset_table(2));
        assert_eq!(&**seq.offset_table(), &[0, 12]);
        // 8 + 8 + (8 + 4) + (8 + 4) + 8
        assert_eq!(seq.calc_value_length(seq.offset_table()), 48);
    }

    #[test]
    fn editing_fragments_forgets_the_layout() {
        let mut seq = PixelSequence::new();
        seq.append_frame(PixelItem::new(vec![0; 8]));
        seq.append_frame(PixelItem::new(vec![0; 8]));
        seq.append(PixelItem::new(vec![0; 8]));
        assert_eq!(seq.frame_starts(2), Some(vec![0, 1]));
        assert_eq!(&*seq.computed_offset_table(), &[0, 16]);

        let removed = seq.remove(0).unwrap();
        assert_eq!(removed.data().len(), 8);
        assert!(seq.computed_offset_table().is_empty());
        assert!(seq.remove(5).is_err());
    }
}
