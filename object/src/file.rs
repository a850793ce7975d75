//! DICOM files: a preamble, the file meta group and a data set.

use crate::dataset::{Dataset, ReadOptions, WriteOptions};
use crate::meta::MetaInfo;
use crate::node::Ident;
use crate::pixel;
use crate::{
    NotDicomSnafu, OpenFileSnafu, ParseMetaDataSetSnafu, PrintMetaDataSetSnafu, ReadError,
    ReadPreambleBytesSnafu, ReadUnsupportedTransferSyntaxSnafu, WriteError, WriteFileSnafu,
    WriteMagicCodeSnafu, WritePreambleSnafu, WriteUnsupportedTransferSyntaxSnafu,
};
use dcmdata_dictionary_std::tags;
use dcmdata_encoding::adapters::RepresentationParameter;
use dcmdata_transfer_syntax_registry::{get_registry, CodecList};
use snafu::{ensure, OptionExt, ResultExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// The magic code following the preamble of a DICOM file.
pub const DICM_MAGIC_CODE: [u8; 4] = *b"DICM";

/// The length of the preamble of a DICOM file.
pub const PREAMBLE_LENGTH: usize = 128;

type ReadResult<T> = std::result::Result<T, ReadError>;
type WriteResult<T> = std::result::Result<T, WriteError>;

/// Open a DICOM file with the default reading options.
pub fn open_file<P>(path: P) -> ReadResult<FileFormat>
where
    P: AsRef<Path>,
{
    FileFormat::open_file(path)
}

/// Check whether the source starts with a preamble
/// followed by the DICOM magic code.
/// Sources shorter than that are not DICOM files.
pub fn is_part10<R>(mut source: R) -> std::io::Result<bool>
where
    R: Read,
{
    let mut buf = [0u8; PREAMBLE_LENGTH + 4];
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(is_part10_bytes(&buf))
}

/// Check whether the bytes start with a preamble
/// followed by the DICOM magic code.
pub fn is_part10_bytes(bytes: &[u8]) -> bool {
    bytes.len() >= PREAMBLE_LENGTH + 4
        && bytes[PREAMBLE_LENGTH..PREAMBLE_LENGTH + 4] == DICM_MAGIC_CODE
}

/// A DICOM file in memory.
///
/// The transfer syntax of the data set
/// is the one announced by the file meta group.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFormat {
    meta: MetaInfo,
    dataset: Dataset,
}

impl FileFormat {
    /// Put a data set together with a file meta group.
    pub fn new(meta: MetaInfo, dataset: Dataset) -> Self {
        FileFormat { meta, dataset }
    }

    /// Create a file for the data set,
    /// to be written in the given transfer syntax.
    ///
    /// The file meta group identifies the instance
    /// by the SOP class and instance UIDs of the data set.
    pub fn from_dataset(dataset: Dataset, transfer_syntax: &str) -> Self {
        let sop_class = dataset.get_string(tags::SOP_CLASS_UID).unwrap_or_default();
        let sop_instance = dataset
            .get_string(tags::SOP_INSTANCE_UID)
            .unwrap_or_default();
        let meta = MetaInfo::new(&sop_class, &sop_instance, transfer_syntax);
        FileFormat { meta, dataset }
    }

    pub fn ident(&self) -> Ident {
        Ident::FileFormat
    }

    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaInfo {
        &mut self.meta
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    pub fn into_parts(self) -> (MetaInfo, Dataset) {
        (self.meta, self.dataset)
    }

    /// Open a DICOM file with the default reading options.
    pub fn open_file<P>(path: P) -> ReadResult<Self>
    where
        P: AsRef<Path>,
    {
        FileFormat::open_file_with(path, &ReadOptions::default())
    }

    /// Open a DICOM file.
    pub fn open_file_with<P>(path: P, options: &ReadOptions) -> ReadResult<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).context(OpenFileSnafu { filename: path })?;
        FileFormat::read_from(file, options)
    }

    /// Read a DICOM file from the source,
    /// starting at the preamble.
    pub fn read_from<R>(from: R, options: &ReadOptions) -> ReadResult<Self>
    where
        R: Read,
    {
        let mut from = BufReader::new(from);
        let mut head = [0u8; PREAMBLE_LENGTH + 4];
        from.read_exact(&mut head).context(ReadPreambleBytesSnafu)?;
        ensure!(is_part10_bytes(&head), NotDicomSnafu);

        let (meta, meta_len) =
            MetaInfo::read_with_length(&mut from).context(ParseMetaDataSetSnafu)?;
        let uid = meta.transfer_syntax().unwrap_or_default();
        let ts = get_registry()
            .get(&uid)
            .context(ReadUnsupportedTransferSyntaxSnafu { uid: uid.as_str() })?;
        tracing::debug!("Reading data set in {}", ts.name());

        let position = (PREAMBLE_LENGTH + 4) as u64 + meta_len;
        let dataset = Dataset::read_buffered(from, ts, options, position)?;
        Ok(FileFormat { meta, dataset })
    }

    /// Save the file with the default writing options.
    pub fn save_file<P>(&self, path: P) -> WriteResult<()>
    where
        P: AsRef<Path>,
    {
        self.save_file_with(path, &WriteOptions::default())
    }

    /// Save the file.
    pub fn save_file_with<P>(&self, path: P, options: &WriteOptions) -> WriteResult<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).context(WriteFileSnafu { filename: path })?;
        let mut to = BufWriter::new(file);
        self.write_to(&mut to, options)?;
        to.flush().context(WriteFileSnafu { filename: path })
    }

    /// Write the preamble, the file meta group and the data set,
    /// in the transfer syntax announced by the file meta group.
    pub fn write_to<W>(&self, mut to: W, options: &WriteOptions) -> WriteResult<()>
    where
        W: Write,
    {
        let uid = self.meta.transfer_syntax().unwrap_or_default();
        let ts = get_registry()
            .get(&uid)
            .context(WriteUnsupportedTransferSyntaxSnafu { uid: uid.as_str() })?;

        to.write_all(&[0u8; PREAMBLE_LENGTH])
            .context(WritePreambleSnafu)?;
        to.write_all(&DICM_MAGIC_CODE).context(WriteMagicCodeSnafu)?;
        self.meta.write_to(&mut to).context(PrintMetaDataSetSnafu)?;
        self.dataset.write_to(to, ts, options)
    }

    /// Convert pixel data to the given transfer syntax
    /// with the global codec list,
    /// and announce it in the file meta group.
    pub fn choose_representation(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
    ) -> pixel::Result<()> {
        self.dataset.choose_representation(uid, param)?;
        self.meta.set_transfer_syntax(uid);
        Ok(())
    }

    /// Convert pixel data to the given transfer syntax
    /// with the given codec list,
    /// and announce it in the file meta group.
    pub fn choose_representation_with(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
        codecs: &CodecList,
    ) -> pixel::Result<()> {
        self.dataset.choose_representation_with(uid, param, codecs)?;
        self.meta.set_transfer_syntax(uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_core::VR;
    use dcmdata_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;

    fn sample() -> FileFormat {
        let mut dataset = Dataset::new();
        dataset
            .put_str(tags::SOP_CLASS_UID, VR::UI, "1.2.840.10008.5.1.4.1.1.7")
            .unwrap();
        dataset
            .put_str(tags::SOP_INSTANCE_UID, VR::UI, "1.2.3.4.5")
            .unwrap();
        dataset.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John").unwrap();
        FileFormat::from_dataset(dataset, EXPLICIT_VR_LITTLE_ENDIAN.uid())
    }

    #[test]
    fn part10_predicate() {
        assert!(!is_part10_bytes(b"DICM"));
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        assert!(is_part10_bytes(&bytes));
        assert!(is_part10(&bytes[..]).unwrap());
        assert!(!is_part10(&bytes[..131]).unwrap());
        bytes[130] = b'X';
        assert!(!is_part10_bytes(&bytes));
    }

    #[test]
    fn write_and_read_back() {
        let file = sample();
        assert_eq!(
            file.meta().media_storage_sop_instance_uid().as_deref(),
            Some("1.2.3.4.5")
        );
        let mut out = Vec::new();
        file.write_to(&mut out, &WriteOptions::default()).unwrap();
        assert!(is_part10_bytes(&out));

        let read = FileFormat::read_from(&out[..], &ReadOptions::default()).unwrap();
        assert_eq!(read, file);
        assert_eq!(
            read.dataset().transfer_syntax(),
            Some(EXPLICIT_VR_LITTLE_ENDIAN.uid())
        );
        assert_eq!(read.dataset().get_string(tags::PATIENT_NAME).unwrap(), "Doe^John");
    }

    #[test]
    fn missing_magic_code() {
        let err = FileFormat::read_from(&[0u8; 200][..], &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, ReadError::NotDicom { .. }));
    }

    #[test]
    fn unknown_transfer_syntax() {
        let mut file = sample();
        file.meta_mut().set_transfer_syntax("1.2.3.999");
        let err = file.write_to(Vec::new(), &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, WriteError::WriteUnsupportedTransferSyntax { .. }));
    }
}
