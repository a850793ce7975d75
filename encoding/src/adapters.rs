//! Core module for building pixel data codecs.
//!
//! This module contains the contract between the engine
//! and the compression plug-ins of transfer syntaxes
//! with encapsulated pixel data:
//!
//! - [`Codec`] converts pixel data between the native representation
//!   and the encapsulated representation of one transfer syntax;
//! - [`CodecParameter`] is the configuration given to a codec
//!   when it is registered;
//! - [`RepresentationParameter`] describes the properties of one
//!   encapsulated representation (such as the quality of a lossy encoding);
//! - [`PixelDataObject`] gives a codec access to the image attributes
//!   of the data set holding the pixel data;
//! - [`EncapsulatedPixelData`] holds the fragments and the basic offset table,
//!   and maps frames to fragments.
//!
//! Native pixel data is always exchanged with codecs
//! as a byte stream in little endian.

use self::encode_error::TranscodeNotSupportedSnafu;
use dcmdata_core::error::ErrorKind;
use dcmdata_core::{Tag, VR};
use snafu::Snafu;
use std::any::Any;
use std::fmt;
use std::ops::Range;

/// The possible error conditions when decoding (reading) pixel data.
///
/// Users of this type are free to handle errors based on their variant,
/// but should not make decisions based on the display message,
/// since that is not considered part of the API
/// and may change on any new release.
///
/// Implementers of codecs
/// are recommended to choose the most fitting error variant
/// for the tested condition.
/// When no suitable variant is available,
/// the [`Custom`](DecodeError::Custom) variant may be used.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub), module)]
pub enum DecodeError {
    /// A custom error occurred when decoding,
    /// reported as a dynamic error value with a message.
    ///
    /// The [`whatever!`](snafu::whatever) macro can be used
    /// to easily create an error of this kind.
    #[snafu(whatever, display("{}", message))]
    Custom {
        /// The error message.
        message: String,
        /// The underlying error cause, if any.
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync + 'static>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The input pixel data is not encapsulated.
    NotEncapsulated,

    /// The requested frame range is outside the given object's frame range.
    FrameRangeOutOfBounds,

    /// A required attribute is missing
    /// from the DICOM object representing the image.
    #[snafu(display("Missing required attribute `{}`", name))]
    MissingAttribute { name: &'static str },

    /// The codec was given a parameter of another codec family.
    #[snafu(display("Expected codec parameter `{}`, got `{}`", expected, got))]
    InvalidParameter {
        expected: &'static str,
        got: &'static str,
    },
}

impl DecodeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Custom { .. } => ErrorKind::CorruptedData,
            DecodeError::NotEncapsulated => ErrorKind::CannotChangeRepresentation,
            DecodeError::FrameRangeOutOfBounds | DecodeError::InvalidParameter { .. } => {
                ErrorKind::IllegalCall
            }
            DecodeError::MissingAttribute { .. } => ErrorKind::TagNotFound,
        }
    }
}

/// The possible error conditions when encoding (writing) pixel data.
///
/// Users of this type are free to handle errors based on their variant,
/// but should not make decisions based on the display message,
/// since that is not considered part of the API
/// and may change on any new release.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub), module)]
pub enum EncodeError {
    /// A custom error when encoding fails.
    /// Read the `message` and the underlying `source`
    /// for more details.
    #[snafu(whatever, display("{}", message))]
    Custom {
        /// The error message.
        message: String,
        /// The underlying error cause, if any.
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync + 'static>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// Input pixel data is not native, should be decoded first.
    NotNative,

    /// The requested frame range is outside the given object's frame range.
    FrameRangeOutOfBounds,

    /// A required attribute is missing
    /// from the DICOM object representing the image.
    #[snafu(display("Missing required attribute `{}`", name))]
    MissingAttribute { name: &'static str },

    /// The codec was given a parameter of another codec family.
    #[snafu(display("Expected codec parameter `{}`, got `{}`", expected, got))]
    InvalidParameter {
        expected: &'static str,
        got: &'static str,
    },

    /// The codec cannot convert between the two encapsulated representations.
    #[snafu(display("Transcoding from {} is not supported", from))]
    TranscodeNotSupported { from: String },
}

impl EncodeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Custom { .. }
            | EncodeError::NotNative
            | EncodeError::TranscodeNotSupported { .. } => ErrorKind::CannotChangeRepresentation,
            EncodeError::FrameRangeOutOfBounds | EncodeError::InvalidParameter { .. } => {
                ErrorKind::IllegalCall
            }
            EncodeError::MissingAttribute { .. } => ErrorKind::TagNotFound,
        }
    }
}

/// The result of decoding (reading) pixel data
pub type DecodeResult<T, E = DecodeError> = Result<T, E>;

/// The result of encoding (writing) pixel data
pub type EncodeResult<T, E = EncodeError> = Result<T, E>;

/// A DICOM object trait to be interpreted as pixel data.
///
/// Codecs read the image attributes through this trait,
/// so that they only have to depend on this crate.
pub trait PixelDataObject {
    /// Return the _Rows_, or `None` if it is not found
    fn rows(&self) -> Option<u16>;

    /// Return the _Columns_, or `None` if it is not found
    fn cols(&self) -> Option<u16>;

    /// Return the _Samples Per Pixel_, or `None` if it is not found
    fn samples_per_pixel(&self) -> Option<u16>;

    /// Return the _Bits Allocated_, or `None` if it is not defined
    fn bits_allocated(&self) -> Option<u16>;

    /// Return the _Bits Stored_, or `None` if it is not defined
    fn bits_stored(&self) -> Option<u16>;

    /// Return the _Pixel Representation_, or `None` if it is not defined
    fn pixel_representation(&self) -> Option<u16>;

    /// Return the _Planar Configuration_, or `None` if it is not defined
    fn planar_configuration(&self) -> Option<u16>;

    /// Return the _Number Of Frames_, or `None` if it is not defined
    fn number_of_frames(&self) -> Option<u32>;

    /// Return the _Photometric Interpretation_
    /// without trailing padding, or `None` if it is not defined
    fn photometric_interpretation(&self) -> Option<String>;

    /// The number of bytes of one native frame,
    /// if the image attributes needed to compute it are present.
    fn frame_length(&self) -> Option<usize> {
        let rows = usize::from(self.rows()?);
        let cols = usize::from(self.cols()?);
        let samples = usize::from(self.samples_per_pixel()?);
        let bytes = (usize::from(self.bits_allocated()?) + 7) / 8;
        Some(rows * cols * samples * bytes)
    }
}

impl<T: ?Sized> PixelDataObject for &T
where
    T: PixelDataObject,
{
    fn rows(&self) -> Option<u16> {
        (**self).rows()
    }
    fn cols(&self) -> Option<u16> {
        (**self).cols()
    }
    fn samples_per_pixel(&self) -> Option<u16> {
        (**self).samples_per_pixel()
    }
    fn bits_allocated(&self) -> Option<u16> {
        (**self).bits_allocated()
    }
    fn bits_stored(&self) -> Option<u16> {
        (**self).bits_stored()
    }
    fn pixel_representation(&self) -> Option<u16> {
        (**self).pixel_representation()
    }
    fn planar_configuration(&self) -> Option<u16> {
        (**self).planar_configuration()
    }
    fn number_of_frames(&self) -> Option<u32> {
        (**self).number_of_frames()
    }
    fn photometric_interpretation(&self) -> Option<String> {
        (**self).photometric_interpretation()
    }
}

/// A plain set of image attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    pub rows: u16,
    pub cols: u16,
    pub samples_per_pixel: u16,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    pub pixel_representation: u16,
    pub planar_configuration: u16,
    pub number_of_frames: u32,
    pub photometric_interpretation: String,
}

impl ImageInfo {
    /// Describe a single frame monochrome image.
    pub fn monochrome(rows: u16, cols: u16, bits_allocated: u16) -> Self {
        ImageInfo {
            rows,
            cols,
            samples_per_pixel: 1,
            bits_allocated,
            bits_stored: bits_allocated,
            pixel_representation: 0,
            planar_configuration: 0,
            number_of_frames: 1,
            photometric_interpretation: "MONOCHROME2".to_string(),
        }
    }

    /// Describe a single frame 8-bit RGB image.
    pub fn rgb(rows: u16, cols: u16) -> Self {
        ImageInfo {
            samples_per_pixel: 3,
            photometric_interpretation: "RGB".to_string(),
            ..ImageInfo::monochrome(rows, cols, 8)
        }
    }

    /// Change the number of frames.
    pub fn with_frames(mut self, number_of_frames: u32) -> Self {
        self.number_of_frames = number_of_frames;
        self
    }
}

impl PixelDataObject for ImageInfo {
    fn rows(&self) -> Option<u16> {
        Some(self.rows)
    }
    fn cols(&self) -> Option<u16> {
        Some(self.cols)
    }
    fn samples_per_pixel(&self) -> Option<u16> {
        Some(self.samples_per_pixel)
    }
    fn bits_allocated(&self) -> Option<u16> {
        Some(self.bits_allocated)
    }
    fn bits_stored(&self) -> Option<u16> {
        Some(self.bits_stored)
    }
    fn pixel_representation(&self) -> Option<u16> {
        Some(self.pixel_representation)
    }
    fn planar_configuration(&self) -> Option<u16> {
        Some(self.planar_configuration)
    }
    fn number_of_frames(&self) -> Option<u32> {
        Some(self.number_of_frames)
    }
    fn photometric_interpretation(&self) -> Option<String> {
        Some(self.photometric_interpretation.clone())
    }
}

/// Configuration of a codec, given once at registration.
///
/// Parameters identify themselves through a class name,
/// which codecs check before downcasting.
pub trait CodecParameter: fmt::Debug + Send + Sync {
    /// The name of the parameter type.
    fn class_name(&self) -> &'static str;

    /// Create a boxed copy of this parameter.
    fn clone_param(&self) -> Box<dyn CodecParameter>;

    /// Obtain this parameter as a dynamically typed value,
    /// to downcast it into its concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn CodecParameter> {
    fn clone(&self) -> Self {
        self.clone_param()
    }
}

/// Retrieve the concrete type of a codec parameter,
/// failing if it belongs to another codec family.
pub fn downcast_param<'a, P>(
    param: &'a dyn CodecParameter,
    expected: &'static str,
) -> Result<&'a P, (&'static str, &'static str)>
where
    P: 'static,
{
    param
        .as_any()
        .downcast_ref::<P>()
        .ok_or((expected, param.class_name()))
}

/// Properties of one encapsulated pixel data representation,
/// such as the quality of a lossy encoding.
///
/// Two parameters are equal only if
/// they have the same class name and equal fields.
pub trait RepresentationParameter: fmt::Debug + Send + Sync {
    /// The name of the parameter type.
    fn class_name(&self) -> &'static str;

    /// Create a boxed copy of this parameter.
    fn clone_box(&self) -> Box<dyn RepresentationParameter>;

    /// Obtain this parameter as a dynamically typed value.
    fn as_any(&self) -> &dyn Any;

    /// Whether the representation keeps all pixel information.
    fn is_lossless(&self) -> bool;

    /// Compare the fields of this parameter with another one
    /// of the same class.
    fn eq_param(&self, other: &dyn RepresentationParameter) -> bool;
}

impl PartialEq for dyn RepresentationParameter {
    fn eq(&self, other: &Self) -> bool {
        self.class_name() == other.class_name() && self.eq_param(other)
    }
}

impl Clone for Box<dyn RepresentationParameter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Whether a codec decompresses or compresses pixel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodecRole {
    /// Converts the encapsulated representation into native pixel data.
    Decoder,
    /// Converts native pixel data into the encapsulated representation.
    Encoder,
}

impl fmt::Display for CodecRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecRole::Decoder => f.write_str("decoder"),
            CodecRole::Encoder => f.write_str("encoder"),
        }
    }
}

/// The value of an attribute to be changed
/// after pixel data takes a new representation.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A string value
    Str(String),
    /// An unsigned short value
    U16(u16),
}

/// An attribute change requested by a codec.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeUpdate {
    pub tag: Tag,
    pub vr: VR,
    pub value: AttributeValue,
}

impl AttributeUpdate {
    /// Request a string attribute to be set.
    pub fn string(tag: Tag, vr: VR, value: impl Into<String>) -> Self {
        AttributeUpdate {
            tag,
            vr,
            value: AttributeValue::Str(value.into()),
        }
    }

    /// Request an unsigned short attribute to be set.
    pub fn u16(tag: Tag, value: u16) -> Self {
        AttributeUpdate {
            tag,
            vr: VR::US,
            value: AttributeValue::U16(value),
        }
    }
}

/// The outcome of an encoding operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPixelData {
    /// the encapsulated pixel data
    pub pixel_data: EncapsulatedPixelData,
    /// the attributes to change in the data set
    pub updates: Vec<AttributeUpdate>,
}

/// A pixel data codec for one transfer syntax and role.
///
/// Codecs are shared between threads through the codec list,
/// so they must not hold mutable state.
pub trait Codec: fmt::Debug + Send + Sync {
    /// The UID of the transfer syntax handled by this codec.
    fn transfer_syntax(&self) -> &'static str;

    /// Whether this codec decodes or encodes.
    fn role(&self) -> CodecRole;

    /// Whether this codec is able to convert pixel data
    /// from the transfer syntax `old` into the transfer syntax `new`.
    fn can_change_coding(&self, old: &str, new: &str) -> bool;

    /// Decode all frames of the given encapsulated pixel data
    /// into native pixel data in little endian.
    fn decode(
        &self,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> DecodeResult<Vec<u8>> {
        let frames = attrs.number_of_frames().unwrap_or(1);
        let mut dst = Vec::new();
        for frame in 0..frames {
            self.decode_frame(from_param, src, params, attrs, frame, &mut dst)?;
        }
        Ok(dst)
    }

    /// Decode a single frame of the given encapsulated pixel data,
    /// appending the native pixel data in little endian to `dst`.
    fn decode_frame(
        &self,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
        frame: u32,
        dst: &mut Vec<u8>,
    ) -> DecodeResult<()>;

    /// Encode native pixel data in little endian
    /// into the encapsulated representation of this codec.
    fn encode(
        &self,
        native: &[u8],
        to_param: Option<&dyn RepresentationParameter>,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> EncodeResult<EncodedPixelData>;

    /// Convert pixel data from another encapsulated representation
    /// directly into the representation of this codec.
    ///
    /// Not supported unless overridden.
    fn transcode(
        &self,
        from_transfer_syntax: &str,
        _from_param: Option<&dyn RepresentationParameter>,
        _src: &EncapsulatedPixelData,
        _to_param: Option<&dyn RepresentationParameter>,
        _params: &dyn CodecParameter,
        _attrs: &dyn PixelDataObject,
    ) -> EncodeResult<EncodedPixelData> {
        TranscodeNotSupportedSnafu {
            from: from_transfer_syntax,
        }
        .fail()
    }

    /// Determine the photometric interpretation
    /// which decoding the given pixel data would produce.
    fn determine_decompressed_color_model(
        &self,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> DecodeResult<String>;
}

/// The contents of an encapsulated pixel data element:
/// the basic offset table and the fragments which follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncapsulatedPixelData {
    /// The byte offsets of each frame,
    /// relative to the first byte of the first fragment item,
    /// or empty if there is no basic offset table.
    pub offset_table: Vec<u32>,
    /// The fragment values.
    pub fragments: Vec<Vec<u8>>,
}

impl EncapsulatedPixelData {
    /// Assemble encapsulated pixel data from its parts.
    pub fn new(offset_table: Vec<u32>, fragments: Vec<Vec<u8>>) -> Self {
        EncapsulatedPixelData {
            offset_table,
            fragments,
        }
    }

    /// Build encapsulated pixel data from encoded frames.
    ///
    /// Each frame is split into fragments of at most `fragment_size` bytes
    /// (rounded down to an even number),
    /// or kept whole if no size is given.
    /// The basic offset table is filled if `offset_table` is true.
    pub fn from_frames(
        frames: Vec<Vec<u8>>,
        fragment_size: Option<usize>,
        offset_table: bool,
    ) -> Self {
        let mut fragments = Vec::new();
        let mut frame_starts = Vec::with_capacity(frames.len());
        let max = fragment_size.map(|s| (s & !1).max(2));
        for frame in frames {
            frame_starts.push(fragments.len());
            match max {
                Some(max) if frame.len() > max => {
                    fragments.extend(frame.chunks(max).map(|c| c.to_vec()));
                }
                _ => fragments.push(frame),
            }
        }
        let mut out = EncapsulatedPixelData::new(Vec::new(), fragments);
        if offset_table {
            out.offset_table = out.offsets_for(&frame_starts);
        }
        out
    }

    /// The size that a fragment item occupies in the stream,
    /// including the item header and padding to an even length.
    pub fn fragment_item_size(len: usize) -> u32 {
        (8 + len + (len & 1)) as u32
    }

    /// The position of each fragment item in the stream,
    /// relative to the first fragment item.
    pub fn fragment_positions(&self) -> Vec<u32> {
        let mut pos = 0u32;
        self.fragments
            .iter()
            .map(|f| {
                let current = pos;
                pos = pos.wrapping_add(Self::fragment_item_size(f.len()));
                current
            })
            .collect()
    }

    /// Compute the basic offset table from the actual fragment sizes,
    /// given the index of the first fragment of each frame.
    pub fn offsets_for(&self, frame_starts: &[usize]) -> Vec<u32> {
        let positions = self.fragment_positions();
        frame_starts
            .iter()
            .map(|&i| positions.get(i).copied().unwrap_or(0))
            .collect()
    }

    /// Determine the index of the first fragment of each frame.
    ///
    /// A single frame spans all fragments,
    /// and as many fragments as frames map one to one.
    /// Otherwise the basic offset table must have one entry per frame,
    /// each pointing at the start of a fragment item.
    /// Returns `None` if the layout cannot be determined this way.
    pub fn frame_starts(&self, number_of_frames: u32) -> Option<Vec<usize>> {
        let frames = number_of_frames as usize;
        if frames == 0 || self.fragments.is_empty() {
            return None;
        }
        if frames == 1 {
            return Some(vec![0]);
        }
        if self.fragments.len() == frames {
            return Some((0..frames).collect());
        }
        if self.offset_table.len() != frames {
            return None;
        }
        let positions = self.fragment_positions();
        self.offset_table
            .iter()
            .map(|offset| positions.iter().position(|p| p == offset))
            .collect()
    }

    /// Determine the index of the first fragment of each frame,
    /// using the given predicate to recognize the first fragment of a frame
    /// when the layout cannot be determined otherwise.
    pub fn frame_starts_with<F>(&self, number_of_frames: u32, is_frame_start: F) -> Option<Vec<usize>>
    where
        F: Fn(&[u8]) -> bool,
    {
        if let Some(starts) = self.frame_starts(number_of_frames) {
            return Some(starts);
        }
        let starts: Vec<usize> = self
            .fragments
            .iter()
            .enumerate()
            .filter(|(_, f)| is_frame_start(f))
            .map(|(i, _)| i)
            .collect();
        if starts.len() == number_of_frames as usize && starts.first() == Some(&0) {
            Some(starts)
        } else {
            None
        }
    }

    /// The range of fragments composing the given frame.
    pub fn frame_fragments(&self, frame_starts: &[usize], frame: u32) -> Option<Range<usize>> {
        let frame = frame as usize;
        let start = *frame_starts.get(frame)?;
        let end = frame_starts
            .get(frame + 1)
            .copied()
            .unwrap_or_else(|| self.fragments.len());
        if start <= end && end <= self.fragments.len() {
            Some(start..end)
        } else {
            None
        }
    }

    /// Concatenate the fragments of the given frame.
    pub fn frame_data(&self, frame_starts: &[usize], frame: u32) -> Option<Vec<u8>> {
        let range = self.frame_fragments(frame_starts, frame)?;
        Some(self.fragments[range].concat())
    }
}
