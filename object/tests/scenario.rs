//! A small data set with a nested sequence,
//! written and read back in the uncompressed transfer syntaxes.

use dcmdata_core::{Tag, VR};
use dcmdata_dictionary_std::tags;
use dcmdata_encoding::TransferSyntax;
use dcmdata_object::{
    Dataset, DcmObject, DcmStack, EncodingType, Item, ReadOptions, SearchMode, Sequence,
    WriteOptions,
};
use dcmdata_transfer_syntax_registry::entries::{
    EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
};
use rstest::rstest;

fn referenced_image(uid: &str) -> Item {
    let mut item = Item::new();
    item.put_str(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, uid)
        .unwrap();
    item
}

fn sample() -> Dataset {
    let mut dataset = Dataset::new();
    dataset
        .put_str(tags::SPECIFIC_CHARACTER_SET, VR::CS, "ISO_IR 100")
        .unwrap();
    let seq = Sequence::from_items(
        tags::REFERENCED_IMAGE_SEQUENCE,
        vec![referenced_image("1.2.3"), referenced_image("1.2.4")],
    );
    dataset.put_sequence(seq);
    dataset
}

#[test]
fn explicit_vr_little_endian_bytes() {
    let dataset = sample();
    let mut out = Vec::new();
    dataset
        .write_to(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())
        .unwrap();

    #[rustfmt::skip]
    let expected: &[&[u8]] = &[
        // (0008,0005) CS "ISO_IR 100"
        &[0x08, 0x00, 0x05, 0x00, b'C', b'S', 0x0A, 0x00],
        b"ISO_IR 100",
        // (0008,1140) SQ, 44 bytes
        &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00],
        // item, 14 bytes
        &[0xFE, 0xFF, 0x00, 0xE0, 0x0E, 0x00, 0x00, 0x00],
        &[0x08, 0x00, 0x55, 0x11, b'U', b'I', 0x06, 0x00],
        b"1.2.3\0",
        &[0xFE, 0xFF, 0x00, 0xE0, 0x0E, 0x00, 0x00, 0x00],
        &[0x08, 0x00, 0x55, 0x11, b'U', b'I', 0x06, 0x00],
        b"1.2.4\0",
    ];
    assert_eq!(out, expected.concat());
}

#[rstest]
#[case(&EXPLICIT_VR_LITTLE_ENDIAN, EncodingType::ExplicitLength, 74)]
#[case(&EXPLICIT_VR_LITTLE_ENDIAN, EncodingType::UndefinedLength, 98)]
#[case(&EXPLICIT_VR_BIG_ENDIAN, EncodingType::ExplicitLength, 74)]
#[case(&IMPLICIT_VR_LITTLE_ENDIAN, EncodingType::ExplicitLength, 70)]
#[case(&IMPLICIT_VR_LITTLE_ENDIAN, EncodingType::UndefinedLength, 94)]
fn round_trip(#[case] ts: &TransferSyntax, #[case] encoding: EncodingType, #[case] len: usize) {
    let dataset = sample();
    assert_eq!(dataset.calc_length(ts, encoding), len as u64);

    let mut out = Vec::new();
    let options = WriteOptions::new().sequence_encoding(encoding);
    dataset.write_to(&mut out, ts, &options).unwrap();
    assert_eq!(out.len(), len);

    let read = Dataset::read_from(&out[..], ts, &ReadOptions::default()).unwrap();
    assert_eq!(read.transfer_syntax(), Some(ts.uid()));
    assert!(!read.is_partial());
    assert_eq!(read, dataset);
    assert_eq!(read.get_string(tags::SPECIFIC_CHARACTER_SET).unwrap(), "ISO_IR 100");
}

#[test]
fn search_through_the_sequence() {
    let dataset = sample();
    let mut stack = DcmStack::new();
    dataset
        .search(tags::REFERENCED_SOP_INSTANCE_UID, &mut stack, SearchMode::FromHere, true)
        .unwrap();
    // sequence, item, element
    assert_eq!(stack.card(), 3);
    let found = stack.top().and_then(DcmObject::as_element).unwrap();
    assert_eq!(found.get_string(0).unwrap(), "1.2.3");

    dataset
        .search(tags::REFERENCED_SOP_INSTANCE_UID, &mut stack, SearchMode::AfterStackTop, true)
        .unwrap();
    let found = stack.top().and_then(DcmObject::as_element).unwrap();
    assert_eq!(found.get_string(0).unwrap(), "1.2.4");

    assert!(dataset
        .search(tags::REFERENCED_SOP_INSTANCE_UID, &mut stack, SearchMode::AfterStackTop, true)
        .is_err());
    assert!(dataset
        .search(tags::REFERENCED_SOP_INSTANCE_UID, &mut DcmStack::new(), SearchMode::FromHere, false)
        .is_err());
}

#[test]
fn unknown_tags_are_read_as_unknown() {
    let private = Tag(0x0009, 0x1001);
    let mut dataset = sample();
    dataset.put_str(private, VR::LO, "ACME").unwrap();

    let mut out = Vec::new();
    dataset
        .write_to(&mut out, &IMPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())
        .unwrap();
    let read =
        Dataset::read_from(&out[..], &IMPLICIT_VR_LITTLE_ENDIAN, &ReadOptions::default()).unwrap();
    let element = read.primitive(private).unwrap();
    assert_eq!(element.vr(), VR::UN);
    assert_eq!(element.value().unwrap(), b"ACME");
}
