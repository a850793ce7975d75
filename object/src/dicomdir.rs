//! DICOMDIR files and their tree of directory records.
//!
//! The records of a DICOMDIR are the items of its
//! Directory Record Sequence `(0004,1220)`,
//! linked to each other by the file offsets of their item headers.
//! Reading the file keeps those offsets,
//! from which the record hierarchy is rebuilt here.

use crate::file::FileFormat;
use crate::item::Item;
use crate::node::{DcmObject, Ident};
use crate::ReadError;
use dcmdata_core::error::ErrorKind;
use dcmdata_dictionary_std::tags;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not read the DICOMDIR file"))]
    ReadFile {
        #[snafu(backtrace)]
        source: ReadError,
    },
    #[snafu(display("The data set has no directory record sequence"))]
    MissingRecordSequence { backtrace: Backtrace },
    #[snafu(display("No directory record at offset {}", offset))]
    UnknownRecordOffset { offset: u32, backtrace: Backtrace },
    #[snafu(display("Directory record at offset {} is referenced twice", offset))]
    RecordCycle { offset: u32, backtrace: Backtrace },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ReadFile { source } => source.kind(),
            Error::MissingRecordSequence { .. } => ErrorKind::TagNotFound,
            Error::UnknownRecordOffset { .. } | Error::RecordCycle { .. } => {
                ErrorKind::CorruptedData
            }
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A node of the directory record tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    item: usize,
    record_type: String,
    lower: Vec<DirectoryRecord>,
    mrdr_offset: Option<u32>,
}

impl DirectoryRecord {
    /// The index of the record in the directory record sequence.
    pub fn item(&self) -> usize {
        self.item
    }

    /// The directory record type, such as `PATIENT` or `IMAGE`.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// The records of the referenced lower level directory entity.
    pub fn lower(&self) -> &[DirectoryRecord] {
        &self.lower
    }

    /// The offset of the referenced multi-referenced file record, if any.
    pub fn mrdr_offset(&self) -> Option<u32> {
        self.mrdr_offset
    }
}

/// A DICOMDIR file with its directory record tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DicomDir {
    file: FileFormat,
    root: Vec<DirectoryRecord>,
}

impl DicomDir {
    /// Open a DICOMDIR file and build its record tree.
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = FileFormat::open_file(path).context(ReadFileSnafu)?;
        DicomDir::from_file(file)
    }

    /// Build the record tree of a DICOMDIR file read from a stream.
    pub fn from_file(file: FileFormat) -> Result<Self> {
        let root = build_tree(&file)?;
        tracing::debug!("DICOMDIR with {} root records", root.len());
        Ok(DicomDir { file, root })
    }

    pub fn ident(&self) -> Ident {
        Ident::DicomDir
    }

    /// The records of the root directory entity.
    pub fn root_records(&self) -> &[DirectoryRecord] {
        &self.root
    }

    /// The item holding the attributes of the given record.
    pub fn record_item(&self, record: &DirectoryRecord) -> Option<&Item> {
        self.record_sequence()?.item(record.item).ok()
    }

    /// The file IDs referenced by all records, in sequence order.
    pub fn referenced_file_ids(&self) -> Vec<String> {
        self.record_sequence()
            .map(|seq| {
                seq.items()
                    .filter_map(|item| item.get_strings(tags::REFERENCED_FILE_ID).ok())
                    .map(|parts| parts.join("/"))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn file(&self) -> &FileFormat {
        &self.file
    }

    pub fn into_file(self) -> FileFormat {
        self.file
    }

    fn record_sequence(&self) -> Option<&crate::sequence::Sequence> {
        self.file
            .dataset()
            .get(tags::DIRECTORY_RECORD_SEQUENCE)
            .and_then(DcmObject::as_sequence)
    }
}

struct TreeBuilder<'a> {
    items: Vec<&'a Item>,
    by_offset: HashMap<u64, usize>,
    visited: HashSet<usize>,
}

fn build_tree(file: &FileFormat) -> Result<Vec<DirectoryRecord>> {
    let dataset = file.dataset();
    let seq = dataset
        .get(tags::DIRECTORY_RECORD_SEQUENCE)
        .and_then(DcmObject::as_sequence)
        .context(MissingRecordSequenceSnafu)?;
    let items: Vec<&Item> = seq.items().collect();
    let by_offset = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.offset().map(|offset| (offset, i)))
        .collect();
    let mut builder = TreeBuilder {
        items,
        by_offset,
        visited: HashSet::new(),
    };
    let first = offset_value(
        dataset,
        tags::OFFSET_OF_THE_FIRST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY,
    );
    builder.chain(first)
}

impl TreeBuilder<'_> {
    /// Follow the next record offsets from the first record of an entity.
    fn chain(&mut self, mut offset: Option<u32>) -> Result<Vec<DirectoryRecord>> {
        let mut records = Vec::new();
        while let Some(current) = offset {
            let index = *self
                .by_offset
                .get(&u64::from(current))
                .context(UnknownRecordOffsetSnafu { offset: current })?;
            if !self.visited.insert(index) {
                return RecordCycleSnafu { offset: current }.fail();
            }
            let item = self.items[index];
            let lower = self.chain(offset_value(
                item,
                tags::OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY,
            ))?;
            records.push(DirectoryRecord {
                item: index,
                record_type: item
                    .get_string(tags::DIRECTORY_RECORD_TYPE)
                    .unwrap_or_default(),
                lower,
                mrdr_offset: offset_value(item, tags::MRDR_DIRECTORY_RECORD_OFFSET),
            });
            offset = offset_value(item, tags::OFFSET_OF_THE_NEXT_DIRECTORY_RECORD);
        }
        Ok(records)
    }
}

/// Read a record offset, where zero means no record.
fn offset_value(item: &Item, tag: dcmdata_core::Tag) -> Option<u32> {
    item.get_u32(tag).ok().filter(|offset| *offset != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, ReadOptions, WriteOptions};
    use crate::sequence::Sequence;
    use dcmdata_core::VR;

    fn record(record_type: &str) -> Item {
        let mut item = Item::directory_record();
        item.put_u32(tags::OFFSET_OF_THE_NEXT_DIRECTORY_RECORD, 0).unwrap();
        item.put_u16(tags::RECORD_IN_USE_FLAG, 0xFFFF).unwrap();
        item.put_u32(tags::OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY, 0)
            .unwrap();
        item.put_str(tags::DIRECTORY_RECORD_TYPE, VR::CS, record_type)
            .unwrap();
        item
    }

    fn write_and_read(file: &FileFormat) -> FileFormat {
        let mut out = Vec::new();
        file.write_to(&mut out, &WriteOptions::default()).unwrap();
        FileFormat::read_from(&out[..], &ReadOptions::default()).unwrap()
    }

    /// A patient with two studies, linked with the offsets of a first pass.
    fn sample(link_twice: bool) -> FileFormat {
        let mut image = record("IMAGE");
        image
            .put_str(tags::REFERENCED_FILE_ID, VR::CS, "DIR\\IMG1")
            .unwrap();
        let items = vec![record("PATIENT"), record("STUDY"), record("STUDY"), image];
        let mut dataset = Dataset::new();
        dataset
            .put_str(tags::FILE_SET_ID, VR::CS, "TEST")
            .unwrap();
        dataset
            .put_u32(
                tags::OFFSET_OF_THE_FIRST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY,
                0,
            )
            .unwrap();
        dataset
            .put_u32(
                tags::OFFSET_OF_THE_LAST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY,
                0,
            )
            .unwrap();
        dataset.put_sequence(Sequence::from_items(tags::DIRECTORY_RECORD_SEQUENCE, items));
        let mut file = FileFormat::from_dataset(dataset, "1.2.840.10008.1.2.1");

        // the offsets are only known once the records have been written
        let read = write_and_read(&file);
        let offsets: Vec<u32> = read
            .dataset()
            .get(tags::DIRECTORY_RECORD_SEQUENCE)
            .and_then(DcmObject::as_sequence)
            .unwrap()
            .items()
            .map(|item| item.offset().unwrap() as u32)
            .collect();

        let dataset = file.dataset_mut();
        dataset
            .put_u32(
                tags::OFFSET_OF_THE_FIRST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY,
                offsets[0],
            )
            .unwrap();
        let seq = dataset
            .get_mut(tags::DIRECTORY_RECORD_SEQUENCE)
            .and_then(DcmObject::as_sequence_mut)
            .unwrap();
        let links = [
            (0, tags::OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY, offsets[1]),
            (1, tags::OFFSET_OF_THE_NEXT_DIRECTORY_RECORD, offsets[2]),
            (2, tags::OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY, offsets[3]),
        ];
        for (i, tag, offset) in links.iter() {
            seq.item_mut(*i).unwrap().put_u32(*tag, *offset).unwrap();
        }
        if link_twice {
            // the image record points back at the patient
            seq.item_mut(3)
                .unwrap()
                .put_u32(tags::OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY, offsets[0])
                .unwrap();
        }
        write_and_read(&file)
    }

    #[test]
    fn record_tree_follows_offsets() {
        let dir = DicomDir::from_file(sample(false)).unwrap();
        assert_eq!(dir.ident(), Ident::DicomDir);
        let root = dir.root_records();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].record_type(), "PATIENT");
        let studies = root[0].lower();
        assert_eq!(studies.len(), 2);
        assert_eq!(studies[0].item(), 1);
        assert!(studies[0].lower().is_empty());
        assert_eq!(studies[1].lower()[0].record_type(), "IMAGE");
        assert_eq!(studies[1].lower()[0].mrdr_offset(), None);

        let image = dir.record_item(&studies[1].lower()[0]).unwrap();
        assert_eq!(image.ident(), Ident::DirectoryRecord);
        assert_eq!(dir.referenced_file_ids(), vec!["DIR/IMG1".to_string()]);
    }

    #[test]
    fn cycles_are_corrupted_data() {
        let err = DicomDir::from_file(sample(true)).unwrap_err();
        assert!(matches!(err, Error::RecordCycle { .. }));
        assert_eq!(err.kind(), ErrorKind::CorruptedData);
    }

    #[test]
    fn missing_sequence() {
        let file = FileFormat::from_dataset(Dataset::new(), "1.2.840.10008.1.2.1");
        let err = DicomDir::from_file(file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagNotFound);
    }
}
