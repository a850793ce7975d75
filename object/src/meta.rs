//! The file meta information group.
//!
//! The meta group heads every DICOM file, after the preamble.
//! It is always encoded in _Explicit VR Little Endian_
//! and announces the transfer syntax of the data set that follows.
//! Its group length `(0002,0000)` is recomputed whenever it is written.

use crate::element::PrimitiveElement;
use crate::item::Item;
use crate::node::{header_length, DcmObject, Ident};
use crate::tag::DcmTag;
use crate::{IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME};
use dcmdata_core::error::ErrorKind;
use dcmdata_core::header::{DataElementHeader, Length};
use dcmdata_core::{Tag, VR};
use dcmdata_dictionary_std::tags;
use dcmdata_parser::stateful::decode::StatefulDecoder;
use dcmdata_parser::stateful::encode::StatefulEncoder;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{BufRead, Write};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The source could not be inspected for the next element.
    #[snafu(display("Could not read from the source"))]
    ReadSource {
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// An issue occurred while decoding the next data element
    /// in the file meta data set.
    #[snafu(display("Could not decode data element"))]
    DecodeElement {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::decode::Error,
    },

    /// A data element outside of the file meta group was found
    /// where the group was expected to continue.
    #[snafu(display("Unexpected data element tagged {}", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },

    /// A required file meta data element is missing.
    #[snafu(display("Missing data element `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },

    /// The value length of a data element is undefined,
    /// but knowing the length is required in its context.
    #[snafu(display("Undefined value length for data element tagged {}", tag))]
    UndefinedValueLength { tag: Tag, backtrace: Backtrace },

    /// The file meta group holds a node which is not a primitive element.
    #[snafu(display("Data element tagged {} is not a primitive element", tag))]
    NonPrimitive { tag: Tag, backtrace: Backtrace },

    /// A value in the meta group is not loaded.
    #[snafu(display("Could not retrieve element value"))]
    ElementValue {
        #[snafu(backtrace)]
        source: crate::node::Error,
    },

    /// The file meta group data set could not be written.
    #[snafu(display("Could not write file meta group data set"))]
    WriteSet {
        #[snafu(backtrace)]
        source: dcmdata_parser::stateful::encode::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ReadSource { .. } | Error::UnexpectedTag { .. } => ErrorKind::InvalidStream,
            Error::DecodeElement { source } => source.kind(),
            Error::MissingElement { .. } => ErrorKind::TagNotFound,
            Error::UndefinedValueLength { .. } | Error::NonPrimitive { .. } => {
                ErrorKind::CorruptedData
            }
            Error::ElementValue { source } => source.kind(),
            Error::WriteSet { source } => source.kind(),
        }
    }
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information group.
///
/// Dereferences to the [`Item`] holding its elements,
/// all of them in group `0002`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaInfo {
    item: Item,
}

impl Deref for MetaInfo {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.item
    }
}

impl DerefMut for MetaInfo {
    fn deref_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl MetaInfo {
    /// Create a file meta group for a new file,
    /// with the implementation identification of this crate.
    pub fn new(
        media_storage_sop_class_uid: &str,
        media_storage_sop_instance_uid: &str,
        transfer_syntax: &str,
    ) -> Self {
        MetaInfo::assemble(&MetaInfoBuilder {
            media_storage_sop_class_uid: Some(media_storage_sop_class_uid.to_string()),
            media_storage_sop_instance_uid: Some(media_storage_sop_instance_uid.to_string()),
            transfer_syntax: Some(transfer_syntax.to_string()),
            ..MetaInfoBuilder::default()
        })
    }

    /// Read the file meta group from the source,
    /// which must be positioned right after the magic code.
    ///
    /// Reading stops at the end announced by the group length,
    /// or, if it is missing, at the first element of another group.
    pub fn read_from<S>(source: S) -> Result<Self>
    where
        S: BufRead,
    {
        MetaInfo::read_with_length(source).map(|(meta, _)| meta)
    }

    /// Read the file meta group,
    /// also returning the number of bytes read.
    pub(crate) fn read_with_length<S>(source: S) -> Result<(Self, u64)>
    where
        S: BufRead,
    {
        let mut dec = StatefulDecoder::file_header_parser(source);
        let mut item = Item::with_ident(Ident::MetaInfo);
        let mut end: Option<u64> = None;
        loop {
            match end {
                Some(end) if dec.position() >= end => break,
                Some(_) => {}
                None => {
                    let buf = dec.inner_mut().fill_buf().context(ReadSourceSnafu)?;
                    if buf.is_empty() {
                        break;
                    }
                    if buf.len() >= 2 && u16::from_le_bytes([buf[0], buf[1]]) != 0x0002 {
                        break;
                    }
                }
            }
            let header = dec.decode_header().context(DecodeElementSnafu)?;
            ensure!(
                header.tag.group() == 0x0002,
                UnexpectedTagSnafu { tag: header.tag }
            );
            ensure!(
                !header.len.is_undefined() && header.vr != VR::SQ,
                UndefinedValueLengthSnafu { tag: header.tag }
            );
            let value = dec.read_value(&header).context(DecodeElementSnafu)?;
            let element =
                PrimitiveElement::with_value(DcmTag::with_vr(header.tag, header.vr), value);
            if header.tag == tags::FILE_META_INFORMATION_GROUP_LENGTH {
                if let Ok(len) = element.get_u32(0) {
                    end = Some(dec.position() + u64::from(len));
                }
            }
            item.put_element(element);
        }

        let meta = MetaInfo { item };
        meta.transfer_syntax().context(MissingElementSnafu {
            alias: "TransferSyntaxUID",
        })?;
        Ok((meta, dec.position()))
    }

    /// Write the file meta group,
    /// with the group length recomputed from the other elements.
    pub fn write_to<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        let mut enc = StatefulEncoder::file_header_printer(to);
        let group_length = self.calc_group_length();
        enc.encode_primitive_element(
            &DataElementHeader::new(tags::FILE_META_INFORMATION_GROUP_LENGTH, VR::UL, Length(4)),
            &group_length.to_ne_bytes(),
        )
        .context(WriteSetSnafu)?;
        for obj in self.elements_after_group_length() {
            let e = obj
                .as_element()
                .context(NonPrimitiveSnafu { tag: obj.tag() })?;
            let value = e.value().context(ElementValueSnafu)?;
            enc.encode_primitive_element(
                &DataElementHeader::new(e.tag(), e.vr(), Length(value.len() as u32)),
                value,
            )
            .context(WriteSetSnafu)?;
        }
        enc.flush().context(WriteSetSnafu)
    }

    fn elements_after_group_length(&self) -> impl Iterator<Item = &DcmObject> {
        self.item
            .iter()
            .filter(|obj| obj.tag() != tags::FILE_META_INFORMATION_GROUP_LENGTH)
    }

    /// The length of the group after the group length element.
    pub fn calc_group_length(&self) -> u32 {
        self.elements_after_group_length()
            .map(|obj| {
                let vr = obj.vr().unwrap_or(VR::UN);
                let len = obj.as_element().map_or(0, |e| e.length().0);
                header_length(vr, true) as u32 + len
            })
            .sum()
    }

    /// Set the group length element to the current length of the group.
    pub fn update_group_length(&mut self) {
        let len = self.calc_group_length();
        let mut element =
            PrimitiveElement::new_with_vr(tags::FILE_META_INFORMATION_GROUP_LENGTH, VR::UL);
        element.put_bytes(len.to_ne_bytes().to_vec());
        self.item.put_element(element);
    }

    /// The transfer syntax UID of the data set.
    pub fn transfer_syntax(&self) -> Option<String> {
        self.item.get_string(tags::TRANSFER_SYNTAX_UID).ok()
    }

    /// Announce another transfer syntax for the data set.
    pub fn set_transfer_syntax(&mut self, uid: &str) {
        self.item.put_element(ui_element(tags::TRANSFER_SYNTAX_UID, uid));
    }

    pub fn media_storage_sop_class_uid(&self) -> Option<String> {
        self.item.get_string(tags::MEDIA_STORAGE_SOP_CLASS_UID).ok()
    }

    pub fn media_storage_sop_instance_uid(&self) -> Option<String> {
        self.item
            .get_string(tags::MEDIA_STORAGE_SOP_INSTANCE_UID)
            .ok()
    }

    pub fn implementation_class_uid(&self) -> Option<String> {
        self.item.get_string(tags::IMPLEMENTATION_CLASS_UID).ok()
    }

    pub fn implementation_version_name(&self) -> Option<String> {
        self.item.get_string(tags::IMPLEMENTATION_VERSION_NAME).ok()
    }

    pub fn source_application_entity_title(&self) -> Option<String> {
        self.item
            .get_string(tags::SOURCE_APPLICATION_ENTITY_TITLE)
            .ok()
    }

    fn assemble(builder: &MetaInfoBuilder) -> Self {
        let mut item = Item::with_ident(Ident::MetaInfo);
        let mut version = PrimitiveElement::new_with_vr(tags::FILE_META_INFORMATION_VERSION, VR::OB);
        version.put_bytes(builder.information_version.unwrap_or([0, 1]).to_vec());
        item.put_element(version);

        let uids = [
            (
                tags::MEDIA_STORAGE_SOP_CLASS_UID,
                builder.media_storage_sop_class_uid.as_deref(),
            ),
            (
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
                builder.media_storage_sop_instance_uid.as_deref(),
            ),
            (tags::TRANSFER_SYNTAX_UID, builder.transfer_syntax.as_deref()),
            (
                tags::IMPLEMENTATION_CLASS_UID,
                Some(
                    builder
                        .implementation_class_uid
                        .as_deref()
                        .unwrap_or(IMPLEMENTATION_CLASS_UID),
                ),
            ),
        ];
        for (tag, uid) in uids.iter() {
            if let Some(uid) = uid {
                item.put_element(ui_element(*tag, uid));
            }
        }

        let texts = [
            (
                tags::IMPLEMENTATION_VERSION_NAME,
                VR::SH,
                Some(
                    builder
                        .implementation_version_name
                        .as_deref()
                        .unwrap_or(IMPLEMENTATION_VERSION_NAME),
                ),
            ),
            (
                tags::SOURCE_APPLICATION_ENTITY_TITLE,
                VR::AE,
                builder.source_application_entity_title.as_deref(),
            ),
        ];
        for (tag, vr, text) in texts.iter() {
            if let Some(text) = text {
                let mut e = PrimitiveElement::new_with_vr(*tag, *vr);
                e.put_bytes(text.as_bytes().to_vec());
                item.put_element(e);
            }
        }

        let mut meta = MetaInfo { item };
        meta.update_group_length();
        meta
    }
}

fn ui_element(tag: Tag, uid: &str) -> PrimitiveElement {
    let mut e = PrimitiveElement::new_with_vr(tag, VR::UI);
    e.put_bytes(uid.as_bytes().to_vec());
    e
}

/// A builder for DICOM file meta groups.
#[derive(Debug, Default, Clone)]
pub struct MetaInfoBuilder {
    /// File Meta Information Version (OB)
    information_version: Option<[u8; 2]>,
    /// Media Storage SOP Class UID (UI)
    media_storage_sop_class_uid: Option<String>,
    /// Media Storage SOP Instance UID (UI)
    media_storage_sop_instance_uid: Option<String>,
    /// Transfer Syntax UID (UI)
    transfer_syntax: Option<String>,
    /// Implementation Class UID (UI)
    implementation_class_uid: Option<String>,
    /// Implementation Version Name (SH)
    implementation_version_name: Option<String>,
    /// Source Application Entity Title (AE)
    source_application_entity_title: Option<String>,
}

impl MetaInfoBuilder {
    /// Create a new, empty builder.
    pub fn new() -> MetaInfoBuilder {
        MetaInfoBuilder::default()
    }

    /// Define the meta information version.
    pub fn information_version(mut self, value: [u8; 2]) -> MetaInfoBuilder {
        self.information_version = Some(value);
        self
    }

    /// Define the media storage SOP class UID.
    pub fn media_storage_sop_class_uid<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_class_uid = Some(value.into());
        self
    }

    /// Define the media storage SOP instance UID.
    pub fn media_storage_sop_instance_uid<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_instance_uid = Some(value.into());
        self
    }

    /// Define the transfer syntax UID.
    pub fn transfer_syntax<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.transfer_syntax = Some(value.into());
        self
    }

    /// Define the implementation class UID.
    pub fn implementation_class_uid<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.implementation_class_uid = Some(value.into());
        self
    }

    /// Define the implementation version name.
    pub fn implementation_version_name<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.implementation_version_name = Some(value.into());
        self
    }

    /// Define the source application entity title.
    pub fn source_application_entity_title<T>(mut self, value: T) -> MetaInfoBuilder
    where
        T: Into<String>,
    {
        self.source_application_entity_title = Some(value.into());
        self
    }

    /// Build the file meta group.
    /// The implementation class UID and version name
    /// default to those of this crate.
    pub fn build(self) -> Result<MetaInfo> {
        self.media_storage_sop_class_uid
            .as_ref()
            .context(MissingElementSnafu {
                alias: "MediaStorageSOPClassUID",
            })?;
        self.media_storage_sop_instance_uid
            .as_ref()
            .context(MissingElementSnafu {
                alias: "MediaStorageSOPInstanceUID",
            })?;
        self.transfer_syntax.as_ref().context(MissingElementSnafu {
            alias: "TransferSyntax",
        })?;
        Ok(MetaInfo::assemble(&self))
    }
}
