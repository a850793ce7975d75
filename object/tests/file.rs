use dcmdata_core::error::ErrorKind;
use dcmdata_core::VR;
use dcmdata_dictionary_std::tags;
use dcmdata_object::{
    is_part10, open_file, Dataset, FileFormat, MetaInfoBuilder, ReadOptions, WriteOptions,
};
use dcmdata_transfer_syntax_registry::entries::{
    EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
};
use std::fs::File;

const SECONDARY_CAPTURE_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.7";

fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset
        .put_str(tags::SOP_CLASS_UID, VR::UI, SECONDARY_CAPTURE_IMAGE_STORAGE)
        .unwrap();
    dataset
        .put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.1234")
        .unwrap();
    dataset.put_str(tags::MODALITY, VR::CS, "OT").unwrap();
    dataset.put_str(tags::PATIENT_NAME, VR::PN, "Doe^Jane").unwrap();
    dataset.put_str(tags::PATIENT_ID, VR::LO, "ID1").unwrap();
    dataset.put_u16(tags::ROWS, 512).unwrap();
    dataset
}

#[test]
fn save_and_open_in_each_transfer_syntax() {
    let dir = tempfile::tempdir().unwrap();
    for ts in &[
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
    ] {
        let path = dir.path().join(format!("{}.dcm", ts.uid()));
        let file = FileFormat::from_dataset(sample_dataset(), ts.uid());
        file.save_file(&path).unwrap();

        assert!(is_part10(File::open(&path).unwrap()).unwrap());
        let read = open_file(&path).unwrap();
        assert_eq!(read.meta().transfer_syntax().as_deref(), Some(ts.uid()));
        assert_eq!(read.dataset().transfer_syntax(), Some(ts.uid()));
        assert_eq!(read.dataset(), file.dataset());
        assert_eq!(read.dataset().get_u16(tags::ROWS).unwrap(), 512);
        assert_eq!(read.dataset().get_string(tags::PATIENT_ID).unwrap(), "ID1");
    }
}

#[cfg(feature = "deflate")]
#[test]
fn deflated_file_keeps_its_meta_group_plain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deflated.dcm");
    let ts = dcmdata_transfer_syntax_registry::entries::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN;
    let file = FileFormat::from_dataset(sample_dataset(), ts.uid());
    file.save_file(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(is_part10(&bytes[..]).unwrap());
    // the transfer syntax UID can be found in the plain meta group
    assert!(bytes
        .windows(ts.uid().len())
        .any(|w| w == ts.uid().as_bytes()));

    let read = open_file(&path).unwrap();
    assert_eq!(read.meta().transfer_syntax().as_deref(), Some(ts.uid()));
    assert_eq!(read.dataset(), file.dataset());
    assert_eq!(read.dataset().get_string(tags::PATIENT_NAME).unwrap(), "Doe^Jane");
}

#[test]
fn meta_group_is_rewritten_with_its_group_length() {
    let meta = MetaInfoBuilder::new()
        .media_storage_sop_class_uid(SECONDARY_CAPTURE_IMAGE_STORAGE)
        .media_storage_sop_instance_uid("2.25.1234")
        .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
        .source_application_entity_title("STORESCU")
        .build()
        .unwrap();
    let file = FileFormat::new(meta, sample_dataset());
    let mut out = Vec::new();
    file.write_to(&mut out, &WriteOptions::default()).unwrap();

    let read = FileFormat::read_from(&out[..], &ReadOptions::default()).unwrap();
    assert_eq!(
        read.meta().source_application_entity_title().as_deref(),
        Some("STORESCU")
    );
    let group_length = read
        .meta()
        .get_u32(tags::FILE_META_INFORMATION_GROUP_LENGTH)
        .unwrap();
    assert_eq!(group_length, read.meta().calc_group_length());
    assert_eq!(read, file);
}

#[test]
fn read_until_leaves_a_partial_data_set() {
    let file = FileFormat::from_dataset(sample_dataset(), EXPLICIT_VR_LITTLE_ENDIAN.uid());
    let mut out = Vec::new();
    file.write_to(&mut out, &WriteOptions::default()).unwrap();

    let options = ReadOptions::new().read_until(tags::PATIENT_NAME);
    let read = FileFormat::read_from(&out[..], &options).unwrap();
    assert!(read.dataset().is_partial());
    assert!(read.dataset().contains(tags::MODALITY));
    assert!(!read.dataset().contains(tags::PATIENT_NAME));
    assert!(!read.dataset().contains(tags::ROWS));
}

#[test]
fn missing_files_and_truncated_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_file(dir.path().join("missing.dcm")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStream);

    let file = FileFormat::from_dataset(sample_dataset(), EXPLICIT_VR_LITTLE_ENDIAN.uid());
    let mut out = Vec::new();
    file.write_to(&mut out, &WriteOptions::default()).unwrap();
    out.truncate(out.len() - 3);
    let err = FileFormat::read_from(&out[..], &ReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EndOfStream);
}

#[test]
fn change_of_transfer_syntax() {
    let mut file = FileFormat::from_dataset(sample_dataset(), EXPLICIT_VR_LITTLE_ENDIAN.uid());
    file.choose_representation(IMPLICIT_VR_LITTLE_ENDIAN.uid(), None)
        .unwrap();
    assert_eq!(
        file.meta().transfer_syntax().as_deref(),
        Some(IMPLICIT_VR_LITTLE_ENDIAN.uid())
    );

    let mut out = Vec::new();
    file.write_to(&mut out, &WriteOptions::default()).unwrap();
    let read = FileFormat::read_from(&out[..], &ReadOptions::default()).unwrap();
    assert_eq!(
        read.dataset().transfer_syntax(),
        Some(IMPLICIT_VR_LITTLE_ENDIAN.uid())
    );
}
