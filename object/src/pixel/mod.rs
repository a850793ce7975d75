//! Pixel data in one or more representations.
//!
//! A [`PixelData`] element holds the native (uncompressed) pixel data
//! and any number of encapsulated representations,
//! each identified by a transfer syntax and a representation parameter.
//! One representation is the original, as read or first assigned,
//! and one is the current, which is used by default.
//! Conversions between representations go through the codec list.

mod offset;
mod sequence;

pub use self::offset::OffsetList;
pub use self::sequence::{PixelItem, PixelSequence};

use crate::node::{header_length, Ident};
use crate::tag::DcmTag;
use dcmdata_core::error::ErrorKind;
use dcmdata_core::{Tag, VR};
use dcmdata_dictionary_std::tags;
use dcmdata_encoding::adapters::{
    AttributeUpdate, EncodedPixelData, PixelDataObject, RepresentationParameter,
};
use dcmdata_encoding::swap::{swap_if_necessary, ByteOrder};
use dcmdata_encoding::TransferSyntax;
use dcmdata_transfer_syntax_registry::{codec, get_registry, CodecList};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::borrow::Cow;

/// An error in choosing or managing pixel data representations.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unknown transfer syntax {}", uid))]
    UnknownTransferSyntax { uid: String, backtrace: Backtrace },
    #[snafu(display("No pixel data representation in transfer syntax {}", uid))]
    RepresentationNotFound { uid: String, backtrace: Backtrace },
    #[snafu(display("Could not convert pixel data from {} to {}", from, to))]
    ConvertPixelData {
        from: String,
        to: String,
        #[snafu(backtrace)]
        source: codec::Error,
    },
    #[snafu(display("Cannot remove the current or the original representation"))]
    RemoveSelected { backtrace: Backtrace },
    #[snafu(display("Could not apply attribute changes after conversion"))]
    ApplyUpdate {
        #[snafu(backtrace)]
        source: crate::node::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownTransferSyntax { .. } | Error::RemoveSelected { .. } => {
                ErrorKind::IllegalCall
            }
            Error::RepresentationNotFound { .. } => ErrorKind::RepresentationNotFound,
            Error::ConvertPixelData { .. } => ErrorKind::CannotChangeRepresentation,
            Error::ApplyUpdate { source } => source.kind(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One encapsulated representation of pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
    transfer_syntax: String,
    parameter: Option<Box<dyn RepresentationParameter>>,
    sequence: PixelSequence,
}

impl Representation {
    /// The UID of the transfer syntax of this representation.
    pub fn transfer_syntax(&self) -> &str {
        &self.transfer_syntax
    }

    pub fn parameter(&self) -> Option<&dyn RepresentationParameter> {
        self.parameter.as_deref()
    }

    pub fn sequence(&self) -> &PixelSequence {
        &self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut PixelSequence {
        &mut self.sequence
    }

    /// Whether this representation is in the given transfer syntax
    /// and, if a parameter is given, has an equal parameter.
    fn matches(&self, uid: &str, param: Option<&dyn RepresentationParameter>) -> bool {
        self.transfer_syntax == uid
            && match (param, self.parameter.as_deref()) {
                (None, _) => true,
                (Some(p), Some(q)) => p.class_name() == q.class_name() && q.eq_param(p),
                (Some(_), None) => false,
            }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Selected {
    Native,
    Encapsulated(usize),
}

/// The pixel data element.
///
/// Native pixel data is kept in the byte order of the running machine.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelData {
    tag: DcmTag,
    native: Option<Vec<u8>>,
    native_vr: VR,
    representations: Vec<Representation>,
    original: Selected,
    current: Selected,
}

impl Default for PixelData {
    fn default() -> Self {
        PixelData::new()
    }
}

impl PixelData {
    /// Create an empty pixel data element.
    pub fn new() -> Self {
        PixelData {
            tag: DcmTag::with_vr(tags::PIXEL_DATA, VR::OW),
            native: None,
            native_vr: VR::OW,
            representations: Vec::new(),
            original: Selected::Native,
            current: Selected::Native,
        }
    }

    /// Create a pixel data element from native pixel data
    /// in the byte order of the running machine.
    pub fn from_native(vr: VR, data: Vec<u8>) -> Self {
        let mut out = PixelData::new();
        out.put_native(vr, data);
        out
    }

    /// Create a pixel data element from its encapsulated representation.
    pub fn from_encapsulated(
        transfer_syntax: &str,
        parameter: Option<Box<dyn RepresentationParameter>>,
        sequence: PixelSequence,
    ) -> Self {
        let mut out = PixelData::new();
        out.put_original_representation(transfer_syntax, parameter, sequence);
        out
    }

    pub fn ident(&self) -> Ident {
        Ident::PixelData
    }

    pub fn tag(&self) -> Tag {
        self.tag.tag()
    }

    /// The value representation of the current representation:
    /// `OB` when encapsulated.
    pub fn vr(&self) -> VR {
        match self.current {
            Selected::Native => self.native_vr,
            Selected::Encapsulated(_) => VR::OB,
        }
    }

    /// The value representation of the native pixel data.
    pub fn native_vr(&self) -> VR {
        self.native_vr
    }

    /// Whether the current representation is encapsulated.
    pub fn is_encapsulated(&self) -> bool {
        matches!(self.current, Selected::Encapsulated(_))
    }

    /// The native pixel data, if present,
    /// in the byte order of the running machine.
    pub fn native_value(&self) -> Option<&[u8]> {
        self.native.as_deref()
    }

    /// The current representation, if encapsulated.
    pub fn current_representation(&self) -> Option<&Representation> {
        self.representation_at(self.current)
    }

    /// The original representation, if encapsulated.
    pub fn original_representation(&self) -> Option<&Representation> {
        self.representation_at(self.original)
    }

    fn representation_at(&self, selected: Selected) -> Option<&Representation> {
        match selected {
            Selected::Native => None,
            Selected::Encapsulated(i) => self.representations.get(i),
        }
    }

    /// Iterate over the encapsulated representations.
    pub fn representations(&self) -> impl Iterator<Item = &Representation> {
        self.representations.iter()
    }

    /// The encapsulated representation to write in the given transfer syntax,
    /// preferring the current one.
    pub fn representation_for(&self, uid: &str) -> Option<&Representation> {
        self.current_representation()
            .filter(|r| r.transfer_syntax == uid)
            .or_else(|| self.representations.iter().find(|r| r.transfer_syntax == uid))
    }

    /// The transfer syntax UID of the current representation,
    /// or `None` if it is native.
    pub fn current_transfer_syntax(&self) -> Option<&str> {
        self.current_representation().map(Representation::transfer_syntax)
    }

    fn find(&self, uid: &str, param: Option<&dyn RepresentationParameter>) -> Option<usize> {
        self.representations
            .iter()
            .position(|r| r.matches(uid, param))
    }

    /// Whether a representation exists for the given transfer syntax,
    /// without conversion.
    pub fn has_representation(&self, uid: &str, param: Option<&dyn RepresentationParameter>) -> bool {
        match get_registry().get(uid) {
            Some(ts) if !ts.is_encapsulated() => self.native.is_some(),
            Some(ts) => self.find(ts.uid(), param).is_some(),
            None => false,
        }
    }

    /// Whether the element can be written in the given transfer syntax
    /// as it is.
    pub fn can_write_xfer(&self, ts: &TransferSyntax) -> bool {
        if ts.is_encapsulated() {
            self.representation_for(ts.uid()).is_some()
        } else {
            self.native.is_some()
        }
    }

    /// Whether the element could be converted
    /// into the given transfer syntax with the given codecs.
    pub fn can_choose_representation(&self, uid: &str, codecs: &CodecList) -> bool {
        let ts = match get_registry().get(uid) {
            Some(ts) => ts,
            None => return false,
        };
        if self.has_representation(ts.uid(), None) {
            return true;
        }
        let can_decode = self.native.is_some()
            || self
                .source_representation()
                .map_or(false, |r| codecs.search_decoder(&r.transfer_syntax).is_some());
        if !ts.is_encapsulated() {
            return can_decode;
        }
        let can_transcode = self
            .current_transfer_syntax()
            .map_or(false, |from| codecs.can_change_coding(from, ts.uid()));
        can_transcode || (can_decode && codecs.search_encoder(ts.uid()).is_some())
    }

    /// Make the given transfer syntax the current representation,
    /// converting the pixel data if no such representation exists.
    ///
    /// `attrs` provides the image attributes of the enclosing data set.
    /// Returns the attribute changes that the data set must receive
    /// to describe the new representation.
    pub fn choose_representation(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
        codecs: &CodecList,
        attrs: &dyn PixelDataObject,
    ) -> Result<Vec<AttributeUpdate>> {
        let ts = get_registry()
            .get(uid)
            .context(UnknownTransferSyntaxSnafu { uid })?;
        let uid = ts.uid();

        if !ts.is_encapsulated() {
            let updates = if self.native.is_none() {
                self.decode_source(codecs, attrs)?
            } else {
                Vec::new()
            };
            self.current = Selected::Native;
            return Ok(updates);
        }

        if let Some(i) = self.find(uid, param) {
            self.current = Selected::Encapsulated(i);
            return Ok(Vec::new());
        }

        if let Some(rep) = self.current_representation() {
            if self.native.is_none() && codecs.can_change_coding(&rep.transfer_syntax, uid) {
                match codecs.transcode(
                    &rep.transfer_syntax,
                    rep.parameter(),
                    &rep.sequence.to_encapsulated(),
                    uid,
                    param,
                    attrs,
                ) {
                    Ok(encoded) => {
                        tracing::debug!("Transcoded pixel data from {} to {}", rep.transfer_syntax, uid);
                        return Ok(self.push_encoded(uid, param, codecs, encoded));
                    }
                    Err(e) => {
                        tracing::debug!("Direct transcoding failed, decoding first: {}", e);
                    }
                }
            }
        }

        let mut updates = if self.native.is_none() {
            self.decode_source(codecs, attrs)?
        } else {
            Vec::new()
        };
        let from = self
            .current_transfer_syntax()
            .unwrap_or("native")
            .to_string();
        let native = self
            .native_le()
            .context(RepresentationNotFoundSnafu { uid: "native" })?;
        let encoded = codecs
            .encode(uid, &native, param, attrs)
            .context(ConvertPixelDataSnafu { from, to: uid })?;
        tracing::debug!("Encoded pixel data in {}", uid);
        updates.extend(self.push_encoded(uid, param, codecs, encoded));
        Ok(updates)
    }

    /// The encapsulated representation to decode from.
    fn source_representation(&self) -> Option<&Representation> {
        self.current_representation()
            .or_else(|| self.original_representation())
    }

    /// Decode the current (or else the original) encapsulated representation
    /// into the native pixel data.
    fn decode_source(
        &mut self,
        codecs: &CodecList,
        attrs: &dyn PixelDataObject,
    ) -> Result<Vec<AttributeUpdate>> {
        let rep = self
            .source_representation()
            .context(RepresentationNotFoundSnafu { uid: "native" })?;
        let from = rep.transfer_syntax.clone();
        let src = rep.sequence.to_encapsulated();
        let decoded = codecs
            .decode(&from, rep.parameter(), &src, attrs)
            .context(ConvertPixelDataSnafu {
                from: &from,
                to: "native",
            })?;

        let mut updates = Vec::new();
        match codecs.determine_decompressed_color_model(&from, rep.parameter(), &src, attrs) {
            Ok(model) => {
                if attrs.photometric_interpretation().as_deref() != Some(&*model) {
                    updates.push(AttributeUpdate::string(
                        tags::PHOTOMETRIC_INTERPRETATION,
                        VR::CS,
                        model,
                    ));
                }
            }
            Err(e) => tracing::debug!("Could not determine decompressed color model: {}", e),
        }
        let vr = if attrs.bits_allocated().unwrap_or(8) > 8 {
            VR::OW
        } else {
            VR::OB
        };
        tracing::debug!("Decoded pixel data from {}", from);
        self.set_native_le(vr, decoded);
        Ok(updates)
    }

    /// The native pixel data in little endian, as codecs expect it.
    fn native_le(&self) -> Option<Cow<'_, [u8]>> {
        let native = self.native.as_deref()?;
        if ByteOrder::native() == ByteOrder::Little {
            Some(Cow::Borrowed(native))
        } else {
            let mut data = native.to_vec();
            swap_if_necessary(
                ByteOrder::Little,
                ByteOrder::native(),
                &mut data,
                self.native_vr.value_width(),
            );
            Some(Cow::Owned(data))
        }
    }

    fn set_native_le(&mut self, vr: VR, mut data: Vec<u8>) {
        swap_if_necessary(ByteOrder::native(), ByteOrder::Little, &mut data, vr.value_width());
        self.native = Some(data);
        self.native_vr = vr;
    }

    fn push_encoded(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
        codecs: &CodecList,
        encoded: EncodedPixelData,
    ) -> Vec<AttributeUpdate> {
        let parameter = param.map(|p| p.clone_box()).or_else(|| {
            codecs
                .search_encoder(uid)
                .and_then(|e| e.representation())
                .map(|p| p.clone_box())
        });
        self.representations.push(Representation {
            transfer_syntax: uid.to_string(),
            parameter,
            sequence: PixelSequence::from_encapsulated(encoded.pixel_data),
        });
        self.current = Selected::Encapsulated(self.representations.len() - 1);
        encoded.updates
    }

    /// Replace all representations with native pixel data,
    /// which becomes the original and current representation.
    pub fn put_native(&mut self, vr: VR, data: Vec<u8>) {
        self.representations.clear();
        self.native = Some(data);
        self.native_vr = vr;
        self.original = Selected::Native;
        self.current = Selected::Native;
    }

    /// Replace all representations with an encapsulated one,
    /// which becomes the original and current representation.
    pub fn put_original_representation(
        &mut self,
        transfer_syntax: &str,
        parameter: Option<Box<dyn RepresentationParameter>>,
        sequence: PixelSequence,
    ) {
        self.native = None;
        self.representations.clear();
        self.representations.push(Representation {
            transfer_syntax: transfer_syntax.to_string(),
            parameter,
            sequence,
        });
        self.original = Selected::Encapsulated(0);
        self.current = Selected::Encapsulated(0);
    }

    /// Remove every representation except the current one,
    /// which becomes the original.
    pub fn remove_all_but_current(&mut self) {
        self.keep_only(self.current);
    }

    /// Remove every representation except the original one,
    /// which becomes the current.
    pub fn remove_all_but_original(&mut self) {
        self.keep_only(self.original);
    }

    fn keep_only(&mut self, selected: Selected) {
        match selected {
            Selected::Native => self.representations.clear(),
            Selected::Encapsulated(i) => {
                self.native = None;
                let kept = self.representations.swap_remove(i);
                self.representations.clear();
                self.representations.push(kept);
            }
        }
        let selected = match selected {
            Selected::Native => Selected::Native,
            Selected::Encapsulated(_) => Selected::Encapsulated(0),
        };
        self.original = selected;
        self.current = selected;
    }

    /// Remove the representation in the given transfer syntax.
    /// The current and the original representations cannot be removed.
    pub fn remove_representation(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
    ) -> Result<()> {
        let ts = get_registry()
            .get(uid)
            .context(UnknownTransferSyntaxSnafu { uid })?;
        if !ts.is_encapsulated() {
            snafu::ensure!(
                self.current != Selected::Native && self.original != Selected::Native,
                RemoveSelectedSnafu
            );
            self.native = None;
            return Ok(());
        }
        let i = self
            .find(ts.uid(), param)
            .context(RepresentationNotFoundSnafu { uid })?;
        let selected = Selected::Encapsulated(i);
        snafu::ensure!(
            self.current != selected && self.original != selected,
            RemoveSelectedSnafu
        );
        self.representations.remove(i);
        let shift = |s: Selected| match s {
            Selected::Encapsulated(j) if j > i => Selected::Encapsulated(j - 1),
            s => s,
        };
        self.current = shift(self.current);
        self.original = shift(self.original);
        Ok(())
    }

    /// The number of bytes this element takes
    /// when encoded in the given transfer syntax, header included.
    pub fn calc_element_length(&self, ts: &TransferSyntax) -> u64 {
        if ts.is_encapsulated() {
            let header = header_length(VR::OB, ts.is_explicit_vr());
            match self.representation_for(ts.uid()) {
                Some(rep) => {
                    let table = rep.sequence.computed_offset_table();
                    header + rep.sequence.calc_value_length(&table)
                }
                None => header,
            }
        } else {
            let len = self.native.as_ref().map_or(0, |n| n.len() as u64);
            header_length(self.native_vr, ts.is_explicit_vr()) + len + (len & 1)
        }
    }
}
