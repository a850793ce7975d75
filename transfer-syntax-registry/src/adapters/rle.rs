//! Support for RLE Lossless image decoding and encoding.
//!
//! Each frame is encoded into a single fragment holding
//! a 64-byte header followed by up to 15 segments.
//! A segment contains one byte of every sample of one channel,
//! compressed with the PackBits scheme one row at a time.
//! For each channel, the segment with the most significant bytes
//! comes first.
//!
//! See <https://dicom.nema.org/medical/dicom/current/output/chtml/part05/chapter_G.html>
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmdata_core::VR;
use dcmdata_dictionary_std::{tags, uids};
use dcmdata_encoding::adapters::{
    decode_error, downcast_param, encode_error, AttributeUpdate, Codec, CodecParameter,
    CodecRole, DecodeResult, EncapsulatedPixelData, EncodeResult, EncodedPixelData,
    PixelDataObject, RepresentationParameter,
};
use snafu::{ensure, ensure_whatever, whatever, OptionExt};
use std::any::Any;
use std::sync::Arc;

use super::is_native;
use crate::codec::{deregister_global, is_registered_global, register_global, update_global_parameter};

/// The size of the RLE header preceding the segments of a frame.
const HEADER_LEN: usize = 64;
/// The maximum number of segments in a frame.
const MAX_SEGMENTS: usize = 15;

/// Configuration of the RLE Lossless codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleCodecParameter {
    /// Maximum fragment size in kibibytes, 0 for unlimited.
    /// Frames larger than this are split into several fragments.
    pub fragment_size: u32,
    /// Whether the encoder fills the basic offset table.
    pub create_offset_table: bool,
    /// Whether the decoder expects the segments of each channel
    /// with the least significant byte first.
    /// Some writers create such files.
    pub reverse_decompression_byte_order: bool,
    /// Whether the encoder assigns a new SOP instance UID.
    pub uid_creation: bool,
}

impl Default for RleCodecParameter {
    fn default() -> Self {
        RleCodecParameter {
            fragment_size: 0,
            create_offset_table: true,
            reverse_decompression_byte_order: false,
            uid_creation: false,
        }
    }
}

impl RleCodecParameter {
    const CLASS_NAME: &'static str = "RleCodecParameter";

    fn max_fragment_len(&self) -> Option<usize> {
        if self.fragment_size == 0 {
            None
        } else {
            Some(self.fragment_size as usize * 1024)
        }
    }
}

impl CodecParameter for RleCodecParameter {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn clone_param(&self) -> Box<dyn CodecParameter> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The representation parameter of RLE Lossless,
/// which has no options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RleRepresentationParameter;

impl RepresentationParameter for RleRepresentationParameter {
    fn class_name(&self) -> &'static str {
        "RleRepresentationParameter"
    }

    fn clone_box(&self) -> Box<dyn RepresentationParameter> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_lossless(&self) -> bool {
        true
    }

    fn eq_param(&self, other: &dyn RepresentationParameter) -> bool {
        other.as_any().is::<Self>()
    }
}

/// The layout of one native frame.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    cols: usize,
    pixels: usize,
    samples: usize,
    bytes: usize,
    planar: bool,
}

impl Geometry {
    /// Read the frame layout from the image attributes,
    /// or the name of the first missing attribute.
    fn from_attrs(attrs: &dyn PixelDataObject) -> Result<Self, &'static str> {
        let rows = attrs.rows().ok_or("Rows")?;
        let cols = attrs.cols().ok_or("Columns")?;
        let samples = attrs.samples_per_pixel().ok_or("SamplesPerPixel")?;
        let bits = attrs.bits_allocated().ok_or("BitsAllocated")?;
        Ok(Geometry {
            cols: usize::from(cols),
            pixels: usize::from(rows) * usize::from(cols),
            samples: usize::from(samples),
            bytes: (usize::from(bits) + 7) / 8,
            planar: samples > 1 && attrs.planar_configuration() == Some(1),
        })
    }

    fn frame_len(&self) -> usize {
        self.pixels * self.samples * self.bytes
    }

    fn segment_count(&self) -> usize {
        self.samples * self.bytes
    }

    /// Position of a byte of a sample in the native frame,
    /// where byte 0 is the least significant.
    fn index(&self, pixel: usize, sample: usize, byte: usize) -> usize {
        if self.planar {
            (sample * self.pixels + pixel) * self.bytes + byte
        } else {
            (pixel * self.samples + sample) * self.bytes + byte
        }
    }

    /// The channel and the byte held by the given segment.
    fn segment_target(&self, segment: usize, lsb_first: bool) -> (usize, usize) {
        let sample = segment / self.bytes;
        let r = segment % self.bytes;
        let byte = if lsb_first { r } else { self.bytes - 1 - r };
        (sample, byte)
    }
}

/// Expand a PackBits segment until `expected` bytes are produced.
fn unpack_bits(segment: &[u8], expected: usize) -> Result<Vec<u8>, &'static str> {
    let mut out = Vec::with_capacity(expected);
    let mut i = 0;
    while out.len() < expected && i < segment.len() {
        let header = segment[i];
        i += 1;
        match header {
            0..=127 => {
                let n = usize::from(header) + 1;
                let literal = segment
                    .get(i..i + n)
                    .ok_or("literal run exceeds the segment")?;
                out.extend_from_slice(literal);
                i += n;
            }
            128 => {}
            _ => {
                let n = 257 - usize::from(header);
                let value = *segment.get(i).ok_or("replicate run exceeds the segment")?;
                i += 1;
                out.resize(out.len() + n, value);
            }
        }
    }
    if out.len() < expected {
        return Err("segment is too short");
    }
    out.truncate(expected);
    Ok(out)
}

/// Compress one row with the PackBits scheme.
fn pack_bits(row: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < row.len() {
        let mut run = 1;
        while i + run < row.len() && run < 128 && row[i + run] == row[i] {
            run += 1;
        }
        if run > 1 {
            out.push((257 - run) as u8);
            out.push(row[i]);
            i += run;
        } else {
            let start = i;
            i += 1;
            while i < row.len() && i - start < 128 {
                if i + 2 < row.len() && row[i] == row[i + 1] && row[i] == row[i + 2] {
                    break;
                }
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&row[start..i]);
        }
    }
}

/// Read the segment boundaries from the RLE header of a frame.
fn read_header(frame: &[u8], expected: usize) -> Result<Vec<(usize, usize)>, String> {
    if frame.len() < HEADER_LEN {
        return Err(format!("RLE header needs {} bytes, got {}", HEADER_LEN, frame.len()));
    }
    let count = LittleEndian::read_u32(&frame[0..4]) as usize;
    if count != expected {
        return Err(format!("expected {} RLE segments, found {}", expected, count));
    }
    let mut starts = vec![0u32; MAX_SEGMENTS];
    LittleEndian::read_u32_into(&frame[4..HEADER_LEN], &mut starts);
    let starts: Vec<usize> = starts[..count].iter().map(|&s| s as usize).collect();
    let mut bounds = Vec::with_capacity(count);
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or_else(|| frame.len());
        if start < HEADER_LEN || start > end || end > frame.len() {
            return Err(format!("invalid offset of RLE segment {}", i));
        }
        bounds.push((start, end));
    }
    Ok(bounds)
}

/// Decoder for RLE Lossless (UID `1.2.840.10008.1.2.5`).
///
/// Native frames follow the planar configuration of the image.
#[derive(Debug, Default, Clone, Copy)]
pub struct RleDecoder;

impl Codec for RleDecoder {
    fn transfer_syntax(&self) -> &'static str {
        uids::RLE_LOSSLESS
    }

    fn role(&self) -> CodecRole {
        CodecRole::Decoder
    }

    fn can_change_coding(&self, old: &str, new: &str) -> bool {
        old == uids::RLE_LOSSLESS && is_native(new)
    }

    fn decode_frame(
        &self,
        _from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
        frame: u32,
        dst: &mut Vec<u8>,
    ) -> DecodeResult<()> {
        let params: &RleCodecParameter = downcast_param(params, RleCodecParameter::CLASS_NAME)
            .map_err(|(expected, got)| {
                decode_error::InvalidParameterSnafu { expected, got }.build()
            })?;
        let geometry = Geometry::from_attrs(attrs)
            .map_err(|name| decode_error::MissingAttributeSnafu { name }.build())?;
        let segments = geometry.segment_count();
        ensure_whatever!(
            segments > 0 && segments <= MAX_SEGMENTS,
            "Cannot decode {} samples of {} bytes from RLE",
            geometry.samples,
            geometry.bytes
        );

        let frames = attrs.number_of_frames().unwrap_or(1);
        ensure!(frame < frames, decode_error::FrameRangeOutOfBoundsSnafu);
        let starts = src
            .frame_starts(frames)
            .whatever_context("Cannot map RLE fragments to frames")?;
        let data = src
            .frame_data(&starts, frame)
            .whatever_context("No pixel data found for frame")?;

        let bounds = match read_header(&data, segments) {
            Ok(bounds) => bounds,
            Err(e) => whatever!("Invalid RLE frame #{}: {}", frame, e),
        };

        let base = dst.len();
        dst.resize(base + geometry.frame_len(), 0);
        for (n, &(start, end)) in bounds.iter().enumerate() {
            let plane = match unpack_bits(&data[start..end], geometry.pixels) {
                Ok(plane) => plane,
                Err(e) => whatever!("Invalid RLE segment {} in frame #{}: {}", n, frame, e),
            };
            let (sample, byte) =
                geometry.segment_target(n, params.reverse_decompression_byte_order);
            for (pixel, value) in plane.into_iter().enumerate() {
                dst[base + geometry.index(pixel, sample, byte)] = value;
            }
        }
        Ok(())
    }

    fn encode(
        &self,
        _native: &[u8],
        _to_param: Option<&dyn RepresentationParameter>,
        _params: &dyn CodecParameter,
        _attrs: &dyn PixelDataObject,
    ) -> EncodeResult<EncodedPixelData> {
        whatever!("The RLE decoder cannot encode")
    }

    fn determine_decompressed_color_model(
        &self,
        _from_param: Option<&dyn RepresentationParameter>,
        _src: &EncapsulatedPixelData,
        _params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> DecodeResult<String> {
        attrs
            .photometric_interpretation()
            .context(decode_error::MissingAttributeSnafu {
                name: "PhotometricInterpretation",
            })
    }
}

/// Encoder for RLE Lossless (UID `1.2.840.10008.1.2.5`).
#[derive(Debug, Default, Clone, Copy)]
pub struct RleEncoder;

impl RleEncoder {
    fn encode_frame(geometry: &Geometry, frame: &[u8]) -> Vec<u8> {
        let count = geometry.segment_count();
        let mut out = vec![0u8; HEADER_LEN];
        let mut offsets = [0u32; MAX_SEGMENTS + 1];
        offsets[0] = count as u32;
        let mut plane = Vec::with_capacity(geometry.pixels);
        for n in 0..count {
            offsets[n + 1] = out.len() as u32;
            let (sample, byte) = geometry.segment_target(n, false);
            plane.clear();
            plane.extend((0..geometry.pixels).map(|p| frame[geometry.index(p, sample, byte)]));
            for row in plane.chunks(geometry.cols.max(1)) {
                pack_bits(row, &mut out);
            }
            if out.len() % 2 != 0 {
                out.push(0);
            }
        }
        LittleEndian::write_u32_into(&offsets, &mut out[..HEADER_LEN]);
        out
    }
}

impl Codec for RleEncoder {
    fn transfer_syntax(&self) -> &'static str {
        uids::RLE_LOSSLESS
    }

    fn role(&self) -> CodecRole {
        CodecRole::Encoder
    }

    fn can_change_coding(&self, old: &str, new: &str) -> bool {
        is_native(old) && new == uids::RLE_LOSSLESS
    }

    fn decode_frame(
        &self,
        _from_param: Option<&dyn RepresentationParameter>,
        _src: &EncapsulatedPixelData,
        _params: &dyn CodecParameter,
        _attrs: &dyn PixelDataObject,
        _frame: u32,
        _dst: &mut Vec<u8>,
    ) -> DecodeResult<()> {
        whatever!("The RLE encoder cannot decode")
    }

    fn encode(
        &self,
        native: &[u8],
        _to_param: Option<&dyn RepresentationParameter>,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> EncodeResult<EncodedPixelData> {
        let params: &RleCodecParameter = downcast_param(params, RleCodecParameter::CLASS_NAME)
            .map_err(|(expected, got)| {
                encode_error::InvalidParameterSnafu { expected, got }.build()
            })?;
        let geometry = Geometry::from_attrs(attrs)
            .map_err(|name| encode_error::MissingAttributeSnafu { name }.build())?;
        let count = geometry.segment_count();
        ensure_whatever!(
            count > 0 && count <= MAX_SEGMENTS,
            "Cannot encode {} samples of {} bytes into RLE",
            geometry.samples,
            geometry.bytes
        );

        let frames = attrs.number_of_frames().unwrap_or(1) as usize;
        let frame_len = geometry.frame_len();
        ensure_whatever!(
            native.len() >= frame_len * frames,
            "Native pixel data has {} bytes, expected {}",
            native.len(),
            frame_len * frames
        );

        let encoded: Vec<Vec<u8>> = native
            .chunks(frame_len.max(1))
            .take(frames)
            .map(|frame| Self::encode_frame(&geometry, frame))
            .collect();
        tracing::debug!(
            "RLE encoded {} frames from {} into {} bytes",
            frames,
            native.len(),
            encoded.iter().map(Vec::len).sum::<usize>()
        );

        let pixel_data = EncapsulatedPixelData::from_frames(
            encoded,
            params.max_fragment_len(),
            params.create_offset_table,
        );
        let mut updates = Vec::new();
        if params.uid_creation {
            updates.push(AttributeUpdate::string(
                tags::SOP_INSTANCE_UID,
                VR::UI,
                super::new_instance_uid(),
            ));
        }
        Ok(EncodedPixelData {
            pixel_data,
            updates,
        })
    }

    fn determine_decompressed_color_model(
        &self,
        _from_param: Option<&dyn RepresentationParameter>,
        _src: &EncapsulatedPixelData,
        _params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> DecodeResult<String> {
        attrs
            .photometric_interpretation()
            .context(decode_error::MissingAttributeSnafu {
                name: "PhotometricInterpretation",
            })
    }
}

const DECODER_REGISTRATION: &str = "rle-decoder";
const ENCODER_REGISTRATION: &str = "rle-encoder";

/// Registers the RLE Lossless decoder in the global codec list.
#[derive(Debug, Clone, Copy)]
pub struct RleDecoderRegistration;

impl RleDecoderRegistration {
    /// Register the decoder with the given parameter.
    /// Does nothing and returns `false` if it is already registered.
    pub fn register_codecs(param: RleCodecParameter) -> bool {
        register_global(DECODER_REGISTRATION, move || {
            vec![(
                Arc::new(RleDecoder) as Arc<dyn Codec>,
                None,
                Box::new(param) as Box<dyn CodecParameter>,
            )]
        })
    }

    /// Replace the parameter of the registered decoder.
    /// Returns `false` if it is not registered.
    pub fn update_parameter(param: RleCodecParameter) -> bool {
        update_global_parameter(DECODER_REGISTRATION, &param)
    }

    /// Whether the decoder is registered.
    pub fn is_registered() -> bool {
        is_registered_global(DECODER_REGISTRATION)
    }

    /// Remove the decoder from the global codec list.
    /// Returns `false` if it was not registered.
    pub fn cleanup() -> bool {
        deregister_global(DECODER_REGISTRATION)
    }
}

/// Registers the RLE Lossless encoder in the global codec list.
#[derive(Debug, Clone, Copy)]
pub struct RleEncoderRegistration;

impl RleEncoderRegistration {
    /// Register the encoder with the given parameter.
    /// Does nothing and returns `false` if it is already registered.
    pub fn register_codecs(param: RleCodecParameter) -> bool {
        register_global(ENCODER_REGISTRATION, move || {
            vec![(
                Arc::new(RleEncoder) as Arc<dyn Codec>,
                Some(Box::new(RleRepresentationParameter) as Box<dyn RepresentationParameter>),
                Box::new(param) as Box<dyn CodecParameter>,
            )]
        })
    }

    /// Replace the parameter of the registered encoder.
    /// Returns `false` if it is not registered.
    pub fn update_parameter(param: RleCodecParameter) -> bool {
        update_global_parameter(ENCODER_REGISTRATION, &param)
    }

    /// Whether the encoder is registered.
    pub fn is_registered() -> bool {
        is_registered_global(ENCODER_REGISTRATION)
    }

    /// Remove the encoder from the global codec list.
    /// Returns `false` if it was not registered.
    pub fn cleanup() -> bool {
        deregister_global(ENCODER_REGISTRATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_encoding::adapters::{DecodeError, ImageInfo};

    #[test]
    fn test_packbits() {
        let encoded = vec![
            0xFE, 0xAA, 0x02, 0x80, 0x00, 0x2A, 0xFD, 0xAA, 0x03, 0x80, 0x00, 0x2A, 0x22, 0xF7,
            0xAA,
        ];
        let decoded = unpack_bits(&encoded, 24).unwrap();
        let expected = vec![
            0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0xAA, 0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0x22,
            0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA,
        ];
        assert_eq!(decoded, expected);
        assert!(unpack_bits(&encoded, 30).is_err());
    }

    #[test]
    fn packbits_runs_and_literals() {
        let row = [1, 2, 3, 7, 7, 7, 7, 9];
        let mut packed = Vec::new();
        pack_bits(&row, &mut packed);
        assert_eq!(packed, vec![2, 1, 2, 3, 0xFD, 7, 0, 9]);
        assert_eq!(unpack_bits(&packed, row.len()).unwrap(), row.to_vec());

        let long = vec![5u8; 300];
        packed.clear();
        pack_bits(&long, &mut packed);
        assert_eq!(packed, vec![0x81, 5, 0x81, 5, 0xD5, 5]);
        assert_eq!(unpack_bits(&packed, 300).unwrap(), long);
    }

    #[test]
    fn encode_16bit_frame_segments_msb_first() {
        let attrs = ImageInfo::monochrome(1, 2, 16);
        let native = [0x34, 0x12, 0x78, 0x56];
        let encoded = RleEncoder
            .encode(&native, None, &RleCodecParameter::default(), &attrs)
            .unwrap();
        let frame = &encoded.pixel_data.fragments[0];
        assert_eq!(LittleEndian::read_u32(&frame[0..4]), 2);
        assert_eq!(LittleEndian::read_u32(&frame[4..8]), 64);
        assert_eq!(LittleEndian::read_u32(&frame[8..12]), 68);
        // most significant bytes first
        assert_eq!(&frame[64..68], &[1, 0x12, 0x56, 0]);
        assert_eq!(&frame[68..72], &[1, 0x34, 0x78, 0]);
        assert_eq!(encoded.pixel_data.offset_table, vec![0]);
        assert!(encoded.updates.is_empty());

        let decoded = RleDecoder
            .decode(None, &encoded.pixel_data, &RleCodecParameter::default(), &attrs)
            .unwrap();
        assert_eq!(decoded, native.to_vec());

        // reading the segments in reverse swaps the bytes
        let reversed = RleCodecParameter {
            reverse_decompression_byte_order: true,
            ..Default::default()
        };
        let decoded = RleDecoder
            .decode(None, &encoded.pixel_data, &reversed, &attrs)
            .unwrap();
        assert_eq!(decoded, vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn rgb_round_trip_in_both_planar_configurations() {
        let native: Vec<u8> = (0..2 * 3 * 3 * 2).map(|i| (i * 7 % 5) as u8).collect();
        for planar in [0, 1].iter().copied() {
            let attrs = ImageInfo {
                planar_configuration: planar,
                ..ImageInfo::rgb(2, 3).with_frames(2)
            };
            let encoded = RleEncoder
                .encode(&native, None, &RleCodecParameter::default(), &attrs)
                .unwrap();
            assert_eq!(encoded.pixel_data.fragments.len(), 2);
            let decoded = RleDecoder
                .decode(None, &encoded.pixel_data, &RleCodecParameter::default(), &attrs)
                .unwrap();
            assert_eq!(decoded, native);

            let mut second = Vec::new();
            RleDecoder
                .decode_frame(None, &encoded.pixel_data, &RleCodecParameter::default(), &attrs, 1, &mut second)
                .unwrap();
            assert_eq!(second, native[18..].to_vec());
        }
    }

    #[test]
    fn fragments_and_uid_creation() {
        let attrs = ImageInfo::monochrome(64, 64, 8);
        let native: Vec<u8> = (0..64 * 64).map(|i| (i * 31 % 251) as u8).collect();
        let params = RleCodecParameter {
            fragment_size: 1,
            create_offset_table: false,
            uid_creation: true,
            ..Default::default()
        };
        let encoded = RleEncoder.encode(&native, None, &params, &attrs).unwrap();
        assert!(encoded.pixel_data.fragments.len() > 1);
        assert!(encoded.pixel_data.fragments.iter().all(|f| f.len() <= 1024));
        assert!(encoded.pixel_data.offset_table.is_empty());
        assert_eq!(encoded.updates.len(), 1);
        assert_eq!(encoded.updates[0].tag, tags::SOP_INSTANCE_UID);

        // a single frame spans all fragments
        let decoded = RleDecoder
            .decode(None, &encoded.pixel_data, &params, &attrs)
            .unwrap();
        assert_eq!(decoded, native);
    }

    #[test]
    fn invalid_input_is_reported() {
        let attrs = ImageInfo::monochrome(2, 2, 8);
        let params = RleCodecParameter::default();

        let short = EncapsulatedPixelData::new(vec![], vec![vec![0; 10]]);
        assert!(matches!(
            RleDecoder.decode(None, &short, &params, &attrs),
            Err(DecodeError::Custom { .. })
        ));

        let mut dst = Vec::new();
        assert!(matches!(
            RleDecoder.decode_frame(None, &short, &params, &attrs, 3, &mut dst),
            Err(DecodeError::FrameRangeOutOfBounds)
        ));

        assert!(RleEncoder.encode(&[0; 3], None, &params, &attrs).is_err());
    }

    #[test]
    fn coding_changes() {
        assert!(RleDecoder.can_change_coding(uids::RLE_LOSSLESS, uids::EXPLICIT_VR_LITTLE_ENDIAN));
        assert!(!RleDecoder.can_change_coding(uids::RLE_LOSSLESS, uids::JPEG_BASELINE8_BIT));
        assert!(RleEncoder.can_change_coding(uids::IMPLICIT_VR_LITTLE_ENDIAN, uids::RLE_LOSSLESS));
        assert!(RleRepresentationParameter.is_lossless());
    }
}
