//! Test suite for the RLE Lossless codecs in the global codec list
#![cfg(feature = "rle")]

use dcmdata_encoding::adapters::{CodecRole, ImageInfo};
use dcmdata_transfer_syntax_registry::adapters::rle::{
    RleCodecParameter, RleDecoderRegistration, RleEncoderRegistration,
};
use dcmdata_transfer_syntax_registry::{entries, global_codecs};

const RLE: &str = "1.2.840.10008.1.2.5";

/// The global codec list is shared by the whole test binary,
/// so the registration lifecycle is checked in a single test.
#[test]
fn rle_registration_lifecycle() {
    // cleaning up before registering is harmless
    assert!(!RleDecoderRegistration::cleanup());
    assert!(!RleEncoderRegistration::cleanup());
    assert!(global_codecs().search_decoder(RLE).is_none());

    assert!(RleDecoderRegistration::register_codecs(RleCodecParameter::default()));
    assert!(RleEncoderRegistration::register_codecs(RleCodecParameter::default()));
    // registering twice does not add another codec
    assert!(!RleDecoderRegistration::register_codecs(RleCodecParameter::default()));
    assert!(RleDecoderRegistration::is_registered());
    {
        let codecs = global_codecs();
        assert_eq!(
            codecs
                .iter()
                .filter(|e| e.codec().transfer_syntax() == RLE)
                .count(),
            2
        );
        let encoder = codecs.search_encoder(RLE).unwrap();
        assert_eq!(encoder.codec().role(), CodecRole::Encoder);
        assert!(encoder.representation().unwrap().is_lossless());
        assert!(codecs.can_change_coding(
            entries::EXPLICIT_VR_LITTLE_ENDIAN.uid(),
            RLE
        ));
    }

    // round trip through the global list
    let attrs = ImageInfo::monochrome(4, 4, 16).with_frames(3);
    let native: Vec<u8> = (0..4 * 4 * 2 * 3).map(|i| (i / 3) as u8).collect();
    let encoded = global_codecs().encode(RLE, &native, None, &attrs).unwrap();
    assert_eq!(encoded.pixel_data.fragments.len(), 3);
    assert_eq!(encoded.pixel_data.offset_table.len(), 3);
    let decoded = global_codecs()
        .decode(RLE, None, &encoded.pixel_data, &attrs)
        .unwrap();
    assert_eq!(decoded, native);

    // new parameters take effect on the next conversion
    assert!(RleEncoderRegistration::update_parameter(RleCodecParameter {
        create_offset_table: false,
        ..Default::default()
    }));
    let encoded = global_codecs().encode(RLE, &native, None, &attrs).unwrap();
    assert!(encoded.pixel_data.offset_table.is_empty());

    assert!(RleDecoderRegistration::cleanup());
    assert!(RleEncoderRegistration::cleanup());
    assert!(!RleDecoderRegistration::cleanup());
    assert!(global_codecs().search_decoder(RLE).is_none());
    assert!(global_codecs()
        .decode(RLE, None, &encoded.pixel_data, &attrs)
        .is_err());

    // registering again after cleanup is allowed
    assert!(RleDecoderRegistration::register_codecs(RleCodecParameter::default()));
    assert!(RleDecoderRegistration::cleanup());
}
