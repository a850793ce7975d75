//! Support for JPEG image decoding and encoding.
//!
//! Decoding covers JPEG Baseline, Extended and the two lossless
//! transfer syntaxes, as far as `jpeg-decoder` supports them.
//! Encoding produces JPEG Baseline with `jpeg-encoder`,
//! reducing samples to 8 bits if necessary.
use dcmdata_core::VR;
use dcmdata_dictionary_std::{tags, uids};
use dcmdata_encoding::adapters::{
    decode_error, downcast_param, encode_error, AttributeUpdate, Codec, CodecParameter,
    CodecRole, DecodeResult, EncapsulatedPixelData, EncodeResult, EncodedPixelData,
    PixelDataObject, RepresentationParameter,
};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, SamplingFactor};
use snafu::{ensure, ensure_whatever, whatever, OptionExt, ResultExt};
use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use super::{is_native, new_instance_uid};
use crate::codec::{
    deregister_global, is_registered_global, register_global, update_global_parameter,
    CodecRegistration,
};

/// The start of image marker, which opens every JPEG stream.
const SOI: [u8; 2] = [0xFF, 0xD8];

/// Chroma subsampling applied by the encoder to color images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegSubsampling {
    /// no subsampling
    S444,
    /// horizontal subsampling
    S422,
    /// horizontal and vertical subsampling
    S420,
}

impl JpegSubsampling {
    fn factor(self) -> SamplingFactor {
        match self {
            JpegSubsampling::S444 => SamplingFactor::R_4_4_4,
            JpegSubsampling::S422 => SamplingFactor::R_4_2_2,
            JpegSubsampling::S420 => SamplingFactor::R_4_2_0,
        }
    }
}

/// Configuration of the JPEG codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegCodecParameter {
    /// Quality from 1 to 100,
    /// used when no representation parameter is given
    pub quality: u8,
    pub subsampling: JpegSubsampling,
    /// Strength of the smoothing filter applied before encoding,
    /// from 0 (off) to 100.
    pub smoothing: u8,
    pub optimize_huffman: bool,
    /// Maximum fragment size in kibibytes, 0 for unlimited.
    pub fragment_size: u32,
    pub create_offset_table: bool,
    pub uid_creation: bool,
}

impl Default for JpegCodecParameter {
    fn default() -> Self {
        JpegCodecParameter {
            quality: 90,
            subsampling: JpegSubsampling::S422,
            smoothing: 0,
            optimize_huffman: false,
            fragment_size: 0,
            create_offset_table: true,
            uid_creation: false,
        }
    }
}

impl JpegCodecParameter {
    const CLASS_NAME: &'static str = "JpegCodecParameter";
}

impl CodecParameter for JpegCodecParameter {
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

/// The representation parameter of JPEG encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegRepresentationParameter {
    pub quality: u8,
    pub lossless: bool,
}

impl JpegRepresentationParameter {
    const CLASS_NAME: &'static str = "JpegRepresentationParameter";

    /// A lossy representation of the given quality.
    pub fn lossy(quality: u8) -> Self {
        JpegRepresentationParameter {
            quality,
            lossless: false,
        }
    }
}

impl RepresentationParameter for JpegRepresentationParameter {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn clone_box(&self) -> Box<dyn RepresentationParameter> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_lossless(&self) -> bool {
        self.lossless
    }

    fn eq_param(&self, other: &dyn RepresentationParameter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

/// Rearrange interleaved samples into color planes.
fn to_planar(data: &[u8], samples: usize) -> Vec<u8> {
    let pixels = data.len() / samples;
    let mut out = vec![0; data.len()];
    for (i, &v) in data.iter().enumerate() {
        out[(i % samples) * pixels + i / samples] = v;
    }
    out
}

/// Rearrange color planes into interleaved samples.
fn to_interleaved(data: &[u8], samples: usize) -> Vec<u8> {
    let pixels = data.len() / samples;
    let mut out = vec![0; data.len()];
    for (i, &v) in data.iter().enumerate() {
        out[(i % pixels) * samples + i / pixels] = v;
    }
    out
}

/// Reduce samples to 8 bits, keeping the most significant ones.
fn narrow_8bit(frame: &[u8], bits_allocated: u16, bits_stored: u16) -> EncodeResult<Cow<[u8]>> {
    match (bits_allocated, bits_stored) {
        (8, _) => Ok(Cow::Borrowed(frame)),
        (16, 8..=16) => Ok(Cow::Owned(
            frame
                .chunks_exact(2)
                .map(|c| (u16::from_le_bytes([c[0], c[1]]) >> (bits_stored - 8)) as u8)
                .collect(),
        )),
        (a, s) => whatever!("Cannot encode {} bits stored in {} bits into JPEG", s, a),
    }
}

/// Blend each sample with its eight neighbors of the same channel.
fn smooth(data: &mut [u8], rows: usize, cols: usize, samples: usize, factor: u8) {
    let neighbor = f32::from(factor.min(100)) / 800.;
    let center = 1. - 8. * neighbor;
    let src = data.to_vec();
    let at = |r: usize, c: usize, s: usize| f32::from(src[(r * cols + c) * samples + s]);
    for r in 0..rows {
        for c in 0..cols {
            for s in 0..samples {
                let mut sum = 0.;
                for dr in [-1isize, 0, 1].iter() {
                    for dc in [-1isize, 0, 1].iter() {
                        if *dr == 0 && *dc == 0 {
                            continue;
                        }
                        let nr = (r as isize + dr).max(0).min(rows as isize - 1) as usize;
                        let nc = (c as isize + dc).max(0).min(cols as isize - 1) as usize;
                        sum += at(nr, nc, s);
                    }
                }
                let value = center * at(r, c, s) + neighbor * sum;
                data[(r * cols + c) * samples + s] = value.round().max(0.).min(255.) as u8;
            }
        }
    }
}

/// Decoder for one of the JPEG transfer syntaxes.
#[derive(Debug, Clone, Copy)]
pub struct JpegDecoder {
    ts: &'static str,
}

impl JpegDecoder {
    /// The transfer syntaxes which this decoder can be built for.
    pub const TRANSFER_SYNTAXES: [&'static str; 4] = [
        uids::JPEG_BASELINE8_BIT,
        uids::JPEG_EXTENDED12_BIT,
        uids::JPEG_LOSSLESS,
        uids::JPEG_LOSSLESS_SV1,
    ];

    /// Create a decoder for the given transfer syntax,
    /// or `None` if it is not a supported JPEG transfer syntax.
    pub fn new(ts: &str) -> Option<Self> {
        Self::TRANSFER_SYNTAXES
            .iter()
            .find(|&&uid| uid == ts)
            .map(|&ts| JpegDecoder { ts })
    }
}

impl Codec for JpegDecoder {
    fn transfer_syntax(&self) -> &'static str {
        self.ts
    }

    fn role(&self) -> CodecRole {
        CodecRole::Decoder
    }

    fn can_change_coding(&self, old: &str, new: &str) -> bool {
        old == self.ts && is_native(new)
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
        downcast_param::<JpegCodecParameter>(params, JpegCodecParameter::CLASS_NAME).map_err(
            |(expected, got)| decode_error::InvalidParameterSnafu { expected, got }.build(),
        )?;
        let cols = attrs
            .cols()
            .context(decode_error::MissingAttributeSnafu { name: "Columns" })?;
        let rows = attrs
            .rows()
            .context(decode_error::MissingAttributeSnafu { name: "Rows" })?;
        let samples_per_pixel =
            attrs
                .samples_per_pixel()
                .context(decode_error::MissingAttributeSnafu {
                    name: "SamplesPerPixel",
                })?;
        let bits_allocated = attrs
            .bits_allocated()
            .context(decode_error::MissingAttributeSnafu {
                name: "BitsAllocated",
            })?;

        let frames = attrs.number_of_frames().unwrap_or(1);
        ensure!(frame < frames, decode_error::FrameRangeOutOfBoundsSnafu);

        // a frame may span several fragments,
        // the first of which starts with the SOI marker
        let starts = src
            .frame_starts_with(frames, |f| f.starts_with(&SOI))
            .whatever_context("Cannot map JPEG fragments to frames")?;
        let data = src
            .frame_data(&starts, frame)
            .whatever_context("No pixel data found for frame")?;

        let mut decoder = Decoder::new(&data[..]);
        let decoded = decoder
            .decode()
            .map_err(|e| Box::new(e) as Box<_>)
            .with_whatever_context(|_| format!("JPEG decoding failure on frame {}", frame))?;
        let info = decoder
            .info()
            .whatever_context("JPEG decoder gave no image information")?;
        ensure_whatever!(
            info.width == cols && info.height == rows,
            "JPEG frame is {}x{}, expected {}x{}",
            info.width,
            info.height,
            cols,
            rows
        );

        let decoded = match (info.pixel_format, bits_allocated, samples_per_pixel) {
            (PixelFormat::L8, 8, 1) | (PixelFormat::L16, 16, 1) | (PixelFormat::RGB24, 8, 3) => {
                decoded
            }
            (PixelFormat::L8, 16, 1) => decoded.iter().flat_map(|&v| vec![v, 0]).collect(),
            (format, bits, samples) => whatever!(
                "Cannot store JPEG pixel format {:?} in {} samples of {} bits",
                format,
                samples,
                bits
            ),
        };
        if samples_per_pixel == 3 && attrs.planar_configuration() == Some(1) {
            dst.extend_from_slice(&to_planar(&decoded, 3));
        } else {
            dst.extend_from_slice(&decoded);
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
        whatever!("The JPEG decoder cannot encode")
    }

    fn determine_decompressed_color_model(
        &self,
        _from_param: Option<&dyn RepresentationParameter>,
        _src: &EncapsulatedPixelData,
        _params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> DecodeResult<String> {
        // color is converted to RGB when decoding
        if attrs.samples_per_pixel() == Some(3) {
            return Ok("RGB".to_string());
        }
        attrs
            .photometric_interpretation()
            .context(decode_error::MissingAttributeSnafu {
                name: "PhotometricInterpretation",
            })
    }
}

/// Encoder for JPEG Baseline (UID `1.2.840.10008.1.2.4.50`).
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegEncoder;

impl Codec for JpegEncoder {
    fn transfer_syntax(&self) -> &'static str {
        uids::JPEG_BASELINE8_BIT
    }

    fn role(&self) -> CodecRole {
        CodecRole::Encoder
    }

    fn can_change_coding(&self, old: &str, new: &str) -> bool {
        is_native(old) && new == uids::JPEG_BASELINE8_BIT
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
        whatever!("The JPEG encoder cannot decode")
    }

    fn encode(
        &self,
        native: &[u8],
        to_param: Option<&dyn RepresentationParameter>,
        params: &dyn CodecParameter,
        attrs: &dyn PixelDataObject,
    ) -> EncodeResult<EncodedPixelData> {
        let params: &JpegCodecParameter =
            downcast_param(params, JpegCodecParameter::CLASS_NAME).map_err(
                |(expected, got)| encode_error::InvalidParameterSnafu { expected, got }.build(),
            )?;
        let quality = match to_param {
            Some(p) => {
                let rep = p
                    .as_any()
                    .downcast_ref::<JpegRepresentationParameter>()
                    .context(encode_error::InvalidParameterSnafu {
                        expected: JpegRepresentationParameter::CLASS_NAME,
                        got: p.class_name(),
                    })?;
                ensure_whatever!(!rep.lossless, "JPEG Baseline cannot encode losslessly");
                rep.quality
            }
            None => params.quality,
        };

        let cols = attrs
            .cols()
            .context(encode_error::MissingAttributeSnafu { name: "Columns" })?;
        let rows = attrs
            .rows()
            .context(encode_error::MissingAttributeSnafu { name: "Rows" })?;
        let samples_per_pixel =
            attrs
                .samples_per_pixel()
                .context(encode_error::MissingAttributeSnafu {
                    name: "SamplesPerPixel",
                })?;
        let bits_allocated = attrs
            .bits_allocated()
            .context(encode_error::MissingAttributeSnafu {
                name: "BitsAllocated",
            })?;
        let bits_stored = attrs
            .bits_stored()
            .context(encode_error::MissingAttributeSnafu { name: "BitsStored" })?;

        let color_type = match samples_per_pixel {
            1 => ColorType::Luma,
            3 => ColorType::Rgb,
            _ => whatever!("Unsupported samples per pixel: {}", samples_per_pixel),
        };

        let frames = attrs.number_of_frames().unwrap_or(1) as usize;
        let frame_size = usize::from(cols)
            * usize::from(rows)
            * usize::from(samples_per_pixel)
            * ((usize::from(bits_allocated) + 7) / 8);
        ensure_whatever!(
            frame_size > 0 && native.len() >= frame_size * frames,
            "Native pixel data has {} bytes, expected {}",
            native.len(),
            frame_size * frames
        );
        let planar = samples_per_pixel == 3 && attrs.planar_configuration() == Some(1);

        let mut encoded = Vec::with_capacity(frames);
        for frame in native.chunks_exact(frame_size).take(frames) {
            let mut data = narrow_8bit(frame, bits_allocated, bits_stored)?.into_owned();
            if planar {
                data = to_interleaved(&data, 3);
            }
            if params.smoothing > 0 {
                smooth(
                    &mut data,
                    usize::from(rows),
                    usize::from(cols),
                    usize::from(samples_per_pixel),
                    params.smoothing,
                );
            }

            let mut out = Vec::new();
            let mut encoder = jpeg_encoder::Encoder::new(&mut out, quality);
            encoder.set_progressive(false);
            encoder.set_sampling_factor(params.subsampling.factor());
            encoder.set_optimized_huffman_tables(params.optimize_huffman);
            encoder
                .encode(&data, cols, rows, color_type)
                .map_err(|e| Box::new(e) as Box<_>)
                .whatever_context("JPEG encoding failed")?;
            encoded.push(out);
        }

        let compressed: usize = encoded.iter().map(Vec::len).sum();
        let ratio = (frame_size * frames) as f64 / compressed.max(1) as f64;
        tracing::debug!(
            "JPEG encoded {} frames at quality {}, ratio {:.2}",
            frames,
            quality,
            ratio
        );

        let mut updates = vec![
            AttributeUpdate::u16(tags::BITS_ALLOCATED, 8),
            AttributeUpdate::u16(tags::BITS_STORED, 8),
            AttributeUpdate::u16(tags::HIGH_BIT, 7),
            AttributeUpdate::string(tags::LOSSY_IMAGE_COMPRESSION, VR::CS, "01"),
            AttributeUpdate::string(
                tags::LOSSY_IMAGE_COMPRESSION_RATIO,
                VR::DS,
                format!("{:.6}", ratio),
            ),
            AttributeUpdate::string(tags::LOSSY_IMAGE_COMPRESSION_METHOD, VR::CS, "ISO_10918_1"),
        ];
        let pmi = attrs.photometric_interpretation();
        let pmi = pmi.as_deref();
        if samples_per_pixel == 1 {
            if pmi != Some("MONOCHROME1") && pmi != Some("MONOCHROME2") {
                updates.push(AttributeUpdate::string(
                    tags::PHOTOMETRIC_INTERPRETATION,
                    VR::CS,
                    "MONOCHROME2",
                ));
            }
        } else {
            if pmi != Some("RGB") {
                updates.push(AttributeUpdate::string(
                    tags::PHOTOMETRIC_INTERPRETATION,
                    VR::CS,
                    "RGB",
                ));
            }
            updates.push(AttributeUpdate::u16(tags::PLANAR_CONFIGURATION, 0));
        }
        if params.uid_creation {
            updates.push(AttributeUpdate::string(
                tags::SOP_INSTANCE_UID,
                VR::UI,
                new_instance_uid(),
            ));
        }

        let fragment_size = match params.fragment_size {
            0 => None,
            kib => Some(kib as usize * 1024),
        };
        Ok(EncodedPixelData {
            pixel_data: EncapsulatedPixelData::from_frames(
                encoded,
                fragment_size,
                params.create_offset_table,
            ),
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

const DECODER_REGISTRATION: &str = "jpeg-decoders";
const ENCODER_REGISTRATION: &str = "jpeg-encoder";

/// Registers the JPEG decoders in the global codec list,
/// one for each supported JPEG transfer syntax.
#[derive(Debug, Clone, Copy)]
pub struct JpegDecoderRegistration;

impl JpegDecoderRegistration {
    /// Register the decoders with the given parameter.
    /// Does nothing and returns `false` if they are already registered.
    pub fn register_codecs(param: JpegCodecParameter) -> bool {
        register_global(DECODER_REGISTRATION, move || {
            JpegDecoder::TRANSFER_SYNTAXES
                .iter()
                .map(|&ts| -> CodecRegistration {
                    (
                        Arc::new(JpegDecoder { ts }) as Arc<dyn Codec>,
                        None,
                        Box::new(param.clone()) as Box<dyn CodecParameter>,
                    )
                })
                .collect()
        })
    }

    /// Replace the parameter of the registered decoders.
    /// Returns `false` if they are not registered.
    pub fn update_parameter(param: JpegCodecParameter) -> bool {
        update_global_parameter(DECODER_REGISTRATION, &param)
    }

    /// Whether the decoders are registered.
    pub fn is_registered() -> bool {
        is_registered_global(DECODER_REGISTRATION)
    }

    /// Remove the decoders from the global codec list.
    /// Returns `false` if they were not registered.
    pub fn cleanup() -> bool {
        deregister_global(DECODER_REGISTRATION)
    }
}

/// Registers the JPEG Baseline encoder in the global codec list.
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoderRegistration;

impl JpegEncoderRegistration {
    /// Register the encoder with the given parameter.
    /// Its quality is also the default representation.
    /// Does nothing and returns `false` if it is already registered.
    pub fn register_codecs(param: JpegCodecParameter) -> bool {
        register_global(ENCODER_REGISTRATION, move || {
            let representation = JpegRepresentationParameter::lossy(param.quality);
            vec![(
                Arc::new(JpegEncoder) as Arc<dyn Codec>,
                Some(Box::new(representation) as Box<dyn RepresentationParameter>),
                Box::new(param) as Box<dyn CodecParameter>,
            )]
        })
    }

    /// Replace the parameter of the registered encoder.
    /// Returns `false` if it is not registered.
    pub fn update_parameter(param: JpegCodecParameter) -> bool {
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
    use dcmdata_encoding::adapters::{AttributeValue, ImageInfo};

    fn gradient(rows: usize, cols: usize) -> Vec<u8> {
        (0..rows * cols)
            .map(|i| ((i % cols) * 255 / (cols - 1)) as u8)
            .collect()
    }

    #[test]
    fn baseline_round_trip_is_close() {
        let attrs = ImageInfo::monochrome(16, 16, 8).with_frames(2);
        let mut native = gradient(16, 16);
        native.extend(gradient(16, 16).into_iter().rev());
        let params = JpegCodecParameter::default();
        let encoded = JpegEncoder
            .encode(&native, Some(&JpegRepresentationParameter::lossy(100)), &params, &attrs)
            .unwrap();
        assert_eq!(encoded.pixel_data.fragments.len(), 2);
        assert_eq!(encoded.pixel_data.offset_table.len(), 2);
        assert!(encoded
            .pixel_data
            .fragments
            .iter()
            .all(|f| f.starts_with(&SOI)));
        let lossy = encoded
            .updates
            .iter()
            .find(|u| u.tag == tags::LOSSY_IMAGE_COMPRESSION)
            .unwrap();
        assert_eq!(lossy.value, AttributeValue::Str("01".to_string()));

        let decoder = JpegDecoder::new(uids::JPEG_BASELINE8_BIT).unwrap();
        let decoded = decoder
            .decode(None, &encoded.pixel_data, &params, &attrs)
            .unwrap();
        assert_eq!(decoded.len(), native.len());
        for (a, b) in decoded.iter().zip(&native) {
            assert!((i16::from(*a) - i16::from(*b)).abs() <= 8);
        }
    }

    #[test]
    fn frames_spanning_fragments_are_found_by_marker() {
        let attrs = ImageInfo::monochrome(8, 8, 8).with_frames(2);
        let native = vec![128u8; 128];
        let params = JpegCodecParameter {
            create_offset_table: false,
            ..Default::default()
        };
        let encoded = JpegEncoder.encode(&native, None, &params, &attrs).unwrap();
        // split each frame in two fragments, without an offset table
        let mut fragments = Vec::new();
        for f in &encoded.pixel_data.fragments {
            let mid = (f.len() / 2) & !1;
            fragments.push(f[..mid].to_vec());
            fragments.push(f[mid..].to_vec());
        }
        let split = EncapsulatedPixelData::new(vec![], fragments);
        let decoder = JpegDecoder::new(uids::JPEG_BASELINE8_BIT).unwrap();
        let mut second = Vec::new();
        decoder
            .decode_frame(None, &split, &params, &attrs, 1, &mut second)
            .unwrap();
        assert_eq!(second.len(), 64);
    }

    #[test]
    fn rgb_updates_and_color_model() {
        let attrs = ImageInfo {
            photometric_interpretation: "YBR_FULL".to_string(),
            ..ImageInfo::rgb(8, 8)
        };
        let native = vec![200u8; 8 * 8 * 3];
        let params = JpegCodecParameter {
            uid_creation: true,
            smoothing: 50,
            ..Default::default()
        };
        let encoded = JpegEncoder.encode(&native, None, &params, &attrs).unwrap();
        let pmi = encoded
            .updates
            .iter()
            .find(|u| u.tag == tags::PHOTOMETRIC_INTERPRETATION)
            .unwrap();
        assert_eq!(pmi.value, AttributeValue::Str("RGB".to_string()));
        assert!(encoded.updates.iter().any(|u| u.tag == tags::SOP_INSTANCE_UID));

        let decoder = JpegDecoder::new(uids::JPEG_BASELINE8_BIT).unwrap();
        let model = decoder
            .determine_decompressed_color_model(None, &encoded.pixel_data, &params, &attrs)
            .unwrap();
        assert_eq!(model, "RGB");
    }

    #[test]
    fn lossless_representation_is_refused() {
        let attrs = ImageInfo::monochrome(4, 4, 8);
        let rep = JpegRepresentationParameter {
            quality: 100,
            lossless: true,
        };
        assert!(JpegEncoder
            .encode(&[0; 16], Some(&rep), &JpegCodecParameter::default(), &attrs)
            .is_err());
        assert!(JpegDecoder::new(uids::RLE_LOSSLESS).is_none());
    }

    #[test]
    fn planes_and_narrowing() {
        let interleaved = [1, 2, 3, 4, 5, 6];
        let planar = to_planar(&interleaved, 3);
        assert_eq!(planar, vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(to_interleaved(&planar, 3), interleaved.to_vec());

        let narrowed = narrow_8bit(&[0xF0, 0x0F, 0x00, 0x01], 16, 12).unwrap();
        assert_eq!(&*narrowed, &[0xFF, 0x10]);
    }
}
