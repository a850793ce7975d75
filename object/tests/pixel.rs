//! Pixel data representations converted with the RLE codecs.
#![cfg(feature = "rle")]

use dcmdata_core::error::ErrorKind;
use dcmdata_core::VR;
use dcmdata_dictionary_std::tags;
use dcmdata_object::{Dataset, DcmObject, PixelData, ReadOptions, WriteOptions};
use dcmdata_transfer_syntax_registry::adapters::rle::{
    RleCodecParameter, RleDecoder, RleEncoder, RleRepresentationParameter,
};
use dcmdata_transfer_syntax_registry::entries::{EXPLICIT_VR_LITTLE_ENDIAN, RLE_LOSSLESS};
use dcmdata_transfer_syntax_registry::CodecList;
use std::sync::Arc;

fn rle_codecs() -> CodecList {
    let mut codecs = CodecList::new();
    codecs.register_codec(
        Arc::new(RleEncoder),
        Some(Box::new(RleRepresentationParameter)),
        Box::new(RleCodecParameter::default()),
    );
    codecs.register_codec(
        Arc::new(RleDecoder),
        Some(Box::new(RleRepresentationParameter)),
        Box::new(RleCodecParameter::default()),
    );
    codecs
}

/// Two frames of 4x4 monochrome 8-bit pixels.
fn image() -> (Dataset, Vec<u8>) {
    let pixels: Vec<u8> = (0..32u8).map(|i| i / 3).collect();
    let mut dataset = Dataset::new();
    dataset.put_u16(tags::SAMPLES_PER_PIXEL, 1).unwrap();
    dataset
        .put_str(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME2")
        .unwrap();
    dataset.put_str(tags::NUMBER_OF_FRAMES, VR::IS, "2").unwrap();
    dataset.put_u16(tags::ROWS, 4).unwrap();
    dataset.put_u16(tags::COLUMNS, 4).unwrap();
    dataset.put_u16(tags::BITS_ALLOCATED, 8).unwrap();
    dataset.put_u16(tags::BITS_STORED, 8).unwrap();
    dataset.put_u16(tags::HIGH_BIT, 7).unwrap();
    dataset.put_u16(tags::PIXEL_REPRESENTATION, 0).unwrap();
    dataset.put_pixel_data(PixelData::from_native(VR::OB, pixels.clone()));
    (dataset, pixels)
}

fn pixel_data(dataset: &Dataset) -> &PixelData {
    dataset
        .get(tags::PIXEL_DATA)
        .and_then(DcmObject::as_pixel_data)
        .unwrap()
}

#[test]
fn encode_write_read_and_decode() {
    let codecs = rle_codecs();
    let (mut dataset, pixels) = image();
    assert!(!dataset.can_write_xfer(&RLE_LOSSLESS));

    dataset
        .choose_representation_with(RLE_LOSSLESS.uid(), None, &codecs)
        .unwrap();
    assert!(dataset.can_write_xfer(&RLE_LOSSLESS));
    assert!(dataset.can_write_xfer(&EXPLICIT_VR_LITTLE_ENDIAN));
    let pixel = pixel_data(&dataset);
    assert!(pixel.is_encapsulated());
    assert_eq!(pixel.current_transfer_syntax(), Some(RLE_LOSSLESS.uid()));
    assert!(pixel.has_representation(RLE_LOSSLESS.uid(), Some(&RleRepresentationParameter)));
    let seq = pixel.current_representation().unwrap().sequence();
    // one fragment per frame
    assert_eq!(seq.card(), 2);
    assert_eq!(seq.offset_table().len(), 2);

    let mut out = Vec::new();
    dataset
        .write_to(&mut out, &RLE_LOSSLESS, &WriteOptions::default())
        .unwrap();
    let mut read = Dataset::read_from(&out[..], &RLE_LOSSLESS, &ReadOptions::default()).unwrap();
    {
        let pixel = pixel_data(&read);
        assert!(pixel.native_value().is_none());
        assert_eq!(
            pixel.current_representation().unwrap().sequence(),
            pixel_data(&dataset).current_representation().unwrap().sequence()
        );
    }

    read.choose_representation_with(EXPLICIT_VR_LITTLE_ENDIAN.uid(), None, &codecs)
        .unwrap();
    let pixel = pixel_data(&read);
    assert!(!pixel.is_encapsulated());
    assert_eq!(pixel.native_vr(), VR::OB);
    assert_eq!(pixel.native_value(), Some(&pixels[..]));
    assert_eq!(
        read.get_string(tags::PHOTOMETRIC_INTERPRETATION).unwrap(),
        "MONOCHROME2"
    );
}

#[test]
fn representations_can_be_dropped() {
    let codecs = rle_codecs();
    let (mut dataset, pixels) = image();
    dataset
        .choose_representation_with(RLE_LOSSLESS.uid(), None, &codecs)
        .unwrap();

    dataset.remove_all_but_original_representations();
    let pixel = pixel_data(&dataset);
    assert_eq!(pixel.representations().count(), 0);
    assert!(!pixel.is_encapsulated());
    assert_eq!(pixel.native_value(), Some(&pixels[..]));

    dataset
        .choose_representation_with(RLE_LOSSLESS.uid(), None, &codecs)
        .unwrap();
    dataset.remove_all_but_current_representations();
    let pixel = pixel_data(&dataset);
    assert!(pixel.native_value().is_none());
    assert_eq!(pixel.representations().count(), 1);
    assert!(!dataset.can_write_xfer(&EXPLICIT_VR_LITTLE_ENDIAN));
}

#[test]
fn conversion_needs_a_codec() {
    let (mut dataset, _) = image();
    let err = dataset
        .choose_representation_with(RLE_LOSSLESS.uid(), None, &CodecList::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotChangeRepresentation);

    let err = dataset
        .choose_representation_with("1.2.3.4.5", None, &rle_codecs())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalCall);
}
