//! Data element tag declarations
//!
//! This module contains a constant for each attribute
//! in the built-in dictionary,
//! as well as the table of entries from which the dictionary is built.
//! Repeating group attributes are declared with the open part zeroed.

use dcmdata_core::dictionary::VirtualVr::*;
use dcmdata_core::header::Tag;
use dcmdata_core::VR;

use crate::data_element::{StaticEntry as E, StaticRange::*};

/// CommandGroupLength (0000,0000) UL 1
#[rustfmt::skip]
pub const COMMAND_GROUP_LENGTH: Tag = Tag(0x0000, 0x0000);
/// FileMetaInformationGroupLength (0002,0000) UL 1
#[rustfmt::skip]
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// FileMetaInformationVersion (0002,0001) OB 1
#[rustfmt::skip]
pub const FILE_META_INFORMATION_VERSION: Tag = Tag(0x0002, 0x0001);
/// MediaStorageSOPClassUID (0002,0002) UI 1
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// MediaStorageSOPInstanceUID (0002,0003) UI 1
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// TransferSyntaxUID (0002,0010) UI 1
#[rustfmt::skip]
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// ImplementationClassUID (0002,0012) UI 1
#[rustfmt::skip]
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// ImplementationVersionName (0002,0013) SH 1
#[rustfmt::skip]
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);
/// SourceApplicationEntityTitle (0002,0016) AE 1
#[rustfmt::skip]
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);
/// PrivateInformationCreatorUID (0002,0100) UI 1
#[rustfmt::skip]
pub const PRIVATE_INFORMATION_CREATOR_UID: Tag = Tag(0x0002, 0x0100);
/// PrivateInformation (0002,0102) OB 1
#[rustfmt::skip]
pub const PRIVATE_INFORMATION: Tag = Tag(0x0002, 0x0102);
/// FileSetID (0004,1130) CS 1
#[rustfmt::skip]
pub const FILE_SET_ID: Tag = Tag(0x0004, 0x1130);
/// OffsetOfTheFirstDirectoryRecordOfTheRootDirectoryEntity (0004,1200) up 1
#[rustfmt::skip]
pub const OFFSET_OF_THE_FIRST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY: Tag = Tag(0x0004, 0x1200);
/// OffsetOfTheLastDirectoryRecordOfTheRootDirectoryEntity (0004,1202) up 1
#[rustfmt::skip]
pub const OFFSET_OF_THE_LAST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY: Tag = Tag(0x0004, 0x1202);
/// FileSetConsistencyFlag (0004,1212) US 1
#[rustfmt::skip]
pub const FILE_SET_CONSISTENCY_FLAG: Tag = Tag(0x0004, 0x1212);
/// DirectoryRecordSequence (0004,1220) SQ 1
#[rustfmt::skip]
pub const DIRECTORY_RECORD_SEQUENCE: Tag = Tag(0x0004, 0x1220);
/// OffsetOfTheNextDirectoryRecord (0004,1400) up 1
#[rustfmt::skip]
pub const OFFSET_OF_THE_NEXT_DIRECTORY_RECORD: Tag = Tag(0x0004, 0x1400);
/// RecordInUseFlag (0004,1410) US 1
#[rustfmt::skip]
pub const RECORD_IN_USE_FLAG: Tag = Tag(0x0004, 0x1410);
/// OffsetOfReferencedLowerLevelDirectoryEntity (0004,1420) up 1
#[rustfmt::skip]
pub const OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY: Tag = Tag(0x0004, 0x1420);
/// DirectoryRecordType (0004,1430) CS 1
#[rustfmt::skip]
pub const DIRECTORY_RECORD_TYPE: Tag = Tag(0x0004, 0x1430);
/// PrivateRecordUID (0004,1432) UI 1
#[rustfmt::skip]
pub const PRIVATE_RECORD_UID: Tag = Tag(0x0004, 0x1432);
/// ReferencedFileID (0004,1500) CS 1-8
#[rustfmt::skip]
pub const REFERENCED_FILE_ID: Tag = Tag(0x0004, 0x1500);
/// MRDRDirectoryRecordOffset (0004,1504) up 1
#[rustfmt::skip]
pub const MRDR_DIRECTORY_RECORD_OFFSET: Tag = Tag(0x0004, 0x1504);
/// ReferencedSOPClassUIDInFile (0004,1510) UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_CLASS_UID_IN_FILE: Tag = Tag(0x0004, 0x1510);
/// ReferencedSOPInstanceUIDInFile (0004,1511) UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_INSTANCE_UID_IN_FILE: Tag = Tag(0x0004, 0x1511);
/// ReferencedTransferSyntaxUIDInFile (0004,1512) UI 1
#[rustfmt::skip]
pub const REFERENCED_TRANSFER_SYNTAX_UID_IN_FILE: Tag = Tag(0x0004, 0x1512);
/// NumberOfReferences (0004,1600) UL 1
#[rustfmt::skip]
pub const NUMBER_OF_REFERENCES: Tag = Tag(0x0004, 0x1600);
/// SpecificCharacterSet (0008,0005) CS 1-n
#[rustfmt::skip]
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// ImageType (0008,0008) CS 2-n
#[rustfmt::skip]
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
/// InstanceCreationDate (0008,0012) DA 1
#[rustfmt::skip]
pub const INSTANCE_CREATION_DATE: Tag = Tag(0x0008, 0x0012);
/// InstanceCreationTime (0008,0013) TM 1
#[rustfmt::skip]
pub const INSTANCE_CREATION_TIME: Tag = Tag(0x0008, 0x0013);
/// SOPClassUID (0008,0016) UI 1
#[rustfmt::skip]
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// SOPInstanceUID (0008,0018) UI 1
#[rustfmt::skip]
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// StudyDate (0008,0020) DA 1
#[rustfmt::skip]
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
/// SeriesDate (0008,0021) DA 1
#[rustfmt::skip]
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);
/// AcquisitionDate (0008,0022) DA 1
#[rustfmt::skip]
pub const ACQUISITION_DATE: Tag = Tag(0x0008, 0x0022);
/// ContentDate (0008,0023) DA 1
#[rustfmt::skip]
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);
/// AcquisitionDateTime (0008,002A) DT 1
#[rustfmt::skip]
pub const ACQUISITION_DATE_TIME: Tag = Tag(0x0008, 0x002A);
/// StudyTime (0008,0030) TM 1
#[rustfmt::skip]
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
/// SeriesTime (0008,0031) TM 1
#[rustfmt::skip]
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);
/// ContentTime (0008,0033) TM 1
#[rustfmt::skip]
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);
/// AccessionNumber (0008,0050) SH 1
#[rustfmt::skip]
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
/// QueryRetrieveLevel (0008,0052) CS 1
#[rustfmt::skip]
pub const QUERY_RETRIEVE_LEVEL: Tag = Tag(0x0008, 0x0052);
/// RetrieveAETitle (0008,0054) AE 1-n
#[rustfmt::skip]
pub const RETRIEVE_AE_TITLE: Tag = Tag(0x0008, 0x0054);
/// Modality (0008,0060) CS 1
#[rustfmt::skip]
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// ConversionType (0008,0064) CS 1
#[rustfmt::skip]
pub const CONVERSION_TYPE: Tag = Tag(0x0008, 0x0064);
/// Manufacturer (0008,0070) LO 1
#[rustfmt::skip]
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
/// InstitutionName (0008,0080) LO 1
#[rustfmt::skip]
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
/// ReferringPhysicianName (0008,0090) PN 1
#[rustfmt::skip]
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);
/// CodeValue (0008,0100) SH 1
#[rustfmt::skip]
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
/// CodingSchemeDesignator (0008,0102) SH 1
#[rustfmt::skip]
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
/// CodeMeaning (0008,0104) LO 1
#[rustfmt::skip]
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);
/// StudyDescription (0008,1030) LO 1
#[rustfmt::skip]
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
/// SeriesDescription (0008,103E) LO 1
#[rustfmt::skip]
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
/// ManufacturerModelName (0008,1090) LO 1
#[rustfmt::skip]
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
/// ReferencedStudySequence (0008,1110) SQ 1
#[rustfmt::skip]
pub const REFERENCED_STUDY_SEQUENCE: Tag = Tag(0x0008, 0x1110);
/// ReferencedSeriesSequence (0008,1115) SQ 1
#[rustfmt::skip]
pub const REFERENCED_SERIES_SEQUENCE: Tag = Tag(0x0008, 0x1115);
/// ReferencedImageSequence (0008,1140) SQ 1
#[rustfmt::skip]
pub const REFERENCED_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x1140);
/// ReferencedSOPClassUID (0008,1150) UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);
/// ReferencedSOPInstanceUID (0008,1155) UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
/// SourceImageSequence (0008,2112) SQ 1
#[rustfmt::skip]
pub const SOURCE_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x2112);
/// DerivationCodeSequence (0008,9215) SQ 1
#[rustfmt::skip]
pub const DERIVATION_CODE_SEQUENCE: Tag = Tag(0x0008, 0x9215);
/// PatientName (0010,0010) PN 1
#[rustfmt::skip]
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// PatientID (0010,0020) LO 1
#[rustfmt::skip]
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
/// PatientBirthDate (0010,0030) DA 1
#[rustfmt::skip]
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
/// PatientSex (0010,0040) CS 1
#[rustfmt::skip]
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
/// PatientAge (0010,1010) AS 1
#[rustfmt::skip]
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
/// PatientSize (0010,1020) DS 1
#[rustfmt::skip]
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);
/// PatientWeight (0010,1030) DS 1
#[rustfmt::skip]
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);
/// PatientComments (0010,4000) LT 1
#[rustfmt::skip]
pub const PATIENT_COMMENTS: Tag = Tag(0x0010, 0x4000);
/// BodyPartExamined (0018,0015) CS 1
#[rustfmt::skip]
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);
/// SliceThickness (0018,0050) DS 1
#[rustfmt::skip]
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
/// KVP (0018,0060) DS 1
#[rustfmt::skip]
pub const KVP: Tag = Tag(0x0018, 0x0060);
/// SpacingBetweenSlices (0018,0088) DS 1
#[rustfmt::skip]
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
/// SoftwareVersions (0018,1020) LO 1-n
#[rustfmt::skip]
pub const SOFTWARE_VERSIONS: Tag = Tag(0x0018, 0x1020);
/// ProtocolName (0018,1030) LO 1
#[rustfmt::skip]
pub const PROTOCOL_NAME: Tag = Tag(0x0018, 0x1030);
/// PatientPosition (0018,5100) CS 1
#[rustfmt::skip]
pub const PATIENT_POSITION: Tag = Tag(0x0018, 0x5100);
/// StudyInstanceUID (0020,000D) UI 1
#[rustfmt::skip]
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// SeriesInstanceUID (0020,000E) UI 1
#[rustfmt::skip]
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// StudyID (0020,0010) SH 1
#[rustfmt::skip]
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);
/// SeriesNumber (0020,0011) IS 1
#[rustfmt::skip]
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
/// AcquisitionNumber (0020,0012) IS 1
#[rustfmt::skip]
pub const ACQUISITION_NUMBER: Tag = Tag(0x0020, 0x0012);
/// InstanceNumber (0020,0013) IS 1
#[rustfmt::skip]
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
/// PatientOrientation (0020,0020) CS 2
#[rustfmt::skip]
pub const PATIENT_ORIENTATION: Tag = Tag(0x0020, 0x0020);
/// ImagePositionPatient (0020,0032) DS 3
#[rustfmt::skip]
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
/// ImageOrientationPatient (0020,0037) DS 6
#[rustfmt::skip]
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
/// FrameOfReferenceUID (0020,0052) UI 1
#[rustfmt::skip]
pub const FRAME_OF_REFERENCE_UID: Tag = Tag(0x0020, 0x0052);
/// SliceLocation (0020,1041) DS 1
#[rustfmt::skip]
pub const SLICE_LOCATION: Tag = Tag(0x0020, 0x1041);
/// ImageComments (0020,4000) LT 1
#[rustfmt::skip]
pub const IMAGE_COMMENTS: Tag = Tag(0x0020, 0x4000);
/// ConcatenationUID (0020,9161) UI 1
#[rustfmt::skip]
pub const CONCATENATION_UID: Tag = Tag(0x0020, 0x9161);
/// SamplesPerPixel (0028,0002) US 1
#[rustfmt::skip]
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
/// PhotometricInterpretation (0028,0004) CS 1
#[rustfmt::skip]
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
/// PlanarConfiguration (0028,0006) US 1
#[rustfmt::skip]
pub const PLANAR_CONFIGURATION: Tag = Tag(0x0028, 0x0006);
/// NumberOfFrames (0028,0008) IS 1
#[rustfmt::skip]
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
/// FrameIncrementPointer (0028,0009) AT 1-n
#[rustfmt::skip]
pub const FRAME_INCREMENT_POINTER: Tag = Tag(0x0028, 0x0009);
/// Rows (0028,0010) US 1
#[rustfmt::skip]
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns (0028,0011) US 1
#[rustfmt::skip]
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// PixelSpacing (0028,0030) DS 2
#[rustfmt::skip]
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
/// PixelAspectRatio (0028,0034) IS 2
#[rustfmt::skip]
pub const PIXEL_ASPECT_RATIO: Tag = Tag(0x0028, 0x0034);
/// BitsAllocated (0028,0100) US 1
#[rustfmt::skip]
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// BitsStored (0028,0101) US 1
#[rustfmt::skip]
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
/// HighBit (0028,0102) US 1
#[rustfmt::skip]
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
/// PixelRepresentation (0028,0103) US 1
#[rustfmt::skip]
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// SmallestImagePixelValue (0028,0106) xs 1
#[rustfmt::skip]
pub const SMALLEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0106);
/// LargestImagePixelValue (0028,0107) xs 1
#[rustfmt::skip]
pub const LARGEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0107);
/// WindowCenter (0028,1050) DS 1-n
#[rustfmt::skip]
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
/// WindowWidth (0028,1051) DS 1-n
#[rustfmt::skip]
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);
/// RescaleIntercept (0028,1052) DS 1
#[rustfmt::skip]
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
/// RescaleSlope (0028,1053) DS 1
#[rustfmt::skip]
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);
/// RescaleType (0028,1054) LO 1
#[rustfmt::skip]
pub const RESCALE_TYPE: Tag = Tag(0x0028, 0x1054);
/// RedPaletteColorLookupTableDescriptor (0028,1101) xs 3
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1101);
/// RedPaletteColorLookupTableData (0028,1201) OW 1
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1201);
/// LossyImageCompression (0028,2110) CS 1
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION: Tag = Tag(0x0028, 0x2110);
/// LossyImageCompressionRatio (0028,2112) DS 1-n
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_RATIO: Tag = Tag(0x0028, 0x2112);
/// LossyImageCompressionMethod (0028,2114) CS 1-n
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_METHOD: Tag = Tag(0x0028, 0x2114);
/// LUTDescriptor (0028,3002) xs 3
#[rustfmt::skip]
pub const LUT_DESCRIPTOR: Tag = Tag(0x0028, 0x3002);
/// LUTData (0028,3006) lt 1-n
#[rustfmt::skip]
pub const LUT_DATA: Tag = Tag(0x0028, 0x3006);
/// PixelDataProviderURL (0028,7FE0) UR 1
#[rustfmt::skip]
pub const PIXEL_DATA_PROVIDER_URL: Tag = Tag(0x0028, 0x7FE0);
/// RequestAttributesSequence (0040,0275) SQ 1
#[rustfmt::skip]
pub const REQUEST_ATTRIBUTES_SEQUENCE: Tag = Tag(0x0040, 0x0275);
/// ContentSequence (0040,A730) SQ 1
#[rustfmt::skip]
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);
/// ValueType (0040,A040) CS 1
#[rustfmt::skip]
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);
/// TextValue (0040,A160) UT 1
#[rustfmt::skip]
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);
/// NumberOfSlices (0054,0081) US 1
#[rustfmt::skip]
pub const NUMBER_OF_SLICES: Tag = Tag(0x0054, 0x0081);
/// IconImageSequence (0088,0200) SQ 1
#[rustfmt::skip]
pub const ICON_IMAGE_SEQUENCE: Tag = Tag(0x0088, 0x0200);
/// CurveDimensions (50xx,0005) US 1
#[rustfmt::skip]
pub const CURVE_DIMENSIONS: Tag = Tag(0x5000, 0x0005);
/// NumberOfPoints (50xx,0010) US 1
#[rustfmt::skip]
pub const NUMBER_OF_POINTS: Tag = Tag(0x5000, 0x0010);
/// TypeOfData (50xx,0020) CS 1
#[rustfmt::skip]
pub const TYPE_OF_DATA: Tag = Tag(0x5000, 0x0020);
/// CurveDescription (50xx,0022) LO 1
#[rustfmt::skip]
pub const CURVE_DESCRIPTION: Tag = Tag(0x5000, 0x0022);
/// AxisUnits (50xx,0030) SH 1-n
#[rustfmt::skip]
pub const AXIS_UNITS: Tag = Tag(0x5000, 0x0030);
/// DataValueRepresentation (50xx,0103) US 1
#[rustfmt::skip]
pub const DATA_VALUE_REPRESENTATION: Tag = Tag(0x5000, 0x0103);
/// CurveData (50xx,3000) ox 1
#[rustfmt::skip]
pub const CURVE_DATA: Tag = Tag(0x5000, 0x3000);
/// OverlayRows (60xx,0010) US 1
#[rustfmt::skip]
pub const OVERLAY_ROWS: Tag = Tag(0x6000, 0x0010);
/// OverlayColumns (60xx,0011) US 1
#[rustfmt::skip]
pub const OVERLAY_COLUMNS: Tag = Tag(0x6000, 0x0011);
/// NumberOfFramesInOverlay (60xx,0015) IS 1
#[rustfmt::skip]
pub const NUMBER_OF_FRAMES_IN_OVERLAY: Tag = Tag(0x6000, 0x0015);
/// OverlayDescription (60xx,0022) LO 1
#[rustfmt::skip]
pub const OVERLAY_DESCRIPTION: Tag = Tag(0x6000, 0x0022);
/// OverlayType (60xx,0040) CS 1
#[rustfmt::skip]
pub const OVERLAY_TYPE: Tag = Tag(0x6000, 0x0040);
/// OverlayOrigin (60xx,0050) SS 2
#[rustfmt::skip]
pub const OVERLAY_ORIGIN: Tag = Tag(0x6000, 0x0050);
/// OverlayBitsAllocated (60xx,0100) US 1
#[rustfmt::skip]
pub const OVERLAY_BITS_ALLOCATED: Tag = Tag(0x6000, 0x0100);
/// OverlayBitPosition (60xx,0102) US 1
#[rustfmt::skip]
pub const OVERLAY_BIT_POSITION: Tag = Tag(0x6000, 0x0102);
/// OverlayData (60xx,3000) ox 1
#[rustfmt::skip]
pub const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);
/// ExtendedOffsetTable (7FE0,0001) OV 1
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE: Tag = Tag(0x7FE0, 0x0001);
/// ExtendedOffsetTableLengths (7FE0,0002) OV 1
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE_LENGTHS: Tag = Tag(0x7FE0, 0x0002);
/// FloatPixelData (7FE0,0008) OF 1
#[rustfmt::skip]
pub const FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0008);
/// DoubleFloatPixelData (7FE0,0009) OD 1
#[rustfmt::skip]
pub const DOUBLE_FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0009);
/// PixelData (7FE0,0010) px 1
#[rustfmt::skip]
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
/// DigitalSignaturesSequence (FFFA,FFFA) SQ 1
#[rustfmt::skip]
pub const DIGITAL_SIGNATURES_SEQUENCE: Tag = Tag(0xFFFA, 0xFFFA);
/// DataSetTrailingPadding (FFFC,FFFC) OB 1
#[rustfmt::skip]
pub const DATA_SET_TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);
/// Item (FFFE,E000) NA 1
#[rustfmt::skip]
pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
/// ItemDelimitationItem (FFFE,E00D) NA 1
#[rustfmt::skip]
pub const ITEM_DELIMITATION_ITEM: Tag = Tag(0xFFFE, 0xE00D);
/// SequenceDelimitationItem (FFFE,E0DD) NA 1
#[rustfmt::skip]
pub const SEQUENCE_DELIMITATION_ITEM: Tag = Tag(0xFFFE, 0xE0DD);

#[rustfmt::skip]
pub(crate) const ENTRIES: &[E] = &[
    E { tag: Single(COMMAND_GROUP_LENGTH), alias: "CommandGroupLength", vr: Exact(VR::UL), vm: "1" },
    E { tag: Single(FILE_META_INFORMATION_GROUP_LENGTH), alias: "FileMetaInformationGroupLength", vr: Exact(VR::UL), vm: "1" },
    E { tag: Single(FILE_META_INFORMATION_VERSION), alias: "FileMetaInformationVersion", vr: Exact(VR::OB), vm: "1" },
    E { tag: Single(MEDIA_STORAGE_SOP_CLASS_UID), alias: "MediaStorageSOPClassUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(MEDIA_STORAGE_SOP_INSTANCE_UID), alias: "MediaStorageSOPInstanceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(TRANSFER_SYNTAX_UID), alias: "TransferSyntaxUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(IMPLEMENTATION_CLASS_UID), alias: "ImplementationClassUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(IMPLEMENTATION_VERSION_NAME), alias: "ImplementationVersionName", vr: Exact(VR::SH), vm: "1" },
    E { tag: Single(SOURCE_APPLICATION_ENTITY_TITLE), alias: "SourceApplicationEntityTitle", vr: Exact(VR::AE), vm: "1" },
    E { tag: Single(PRIVATE_INFORMATION_CREATOR_UID), alias: "PrivateInformationCreatorUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(PRIVATE_INFORMATION), alias: "PrivateInformation", vr: Exact(VR::OB), vm: "1" },
    E { tag: Single(FILE_SET_ID), alias: "FileSetID", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(OFFSET_OF_THE_FIRST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY), alias: "OffsetOfTheFirstDirectoryRecordOfTheRootDirectoryEntity", vr: Up, vm: "1" },
    E { tag: Single(OFFSET_OF_THE_LAST_DIRECTORY_RECORD_OF_THE_ROOT_DIRECTORY_ENTITY), alias: "OffsetOfTheLastDirectoryRecordOfTheRootDirectoryEntity", vr: Up, vm: "1" },
    E { tag: Single(FILE_SET_CONSISTENCY_FLAG), alias: "FileSetConsistencyFlag", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(DIRECTORY_RECORD_SEQUENCE), alias: "DirectoryRecordSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(OFFSET_OF_THE_NEXT_DIRECTORY_RECORD), alias: "OffsetOfTheNextDirectoryRecord", vr: Up, vm: "1" },
    E { tag: Single(RECORD_IN_USE_FLAG), alias: "RecordInUseFlag", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(OFFSET_OF_REFERENCED_LOWER_LEVEL_DIRECTORY_ENTITY), alias: "OffsetOfReferencedLowerLevelDirectoryEntity", vr: Up, vm: "1" },
    E { tag: Single(DIRECTORY_RECORD_TYPE), alias: "DirectoryRecordType", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(PRIVATE_RECORD_UID), alias: "PrivateRecordUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(REFERENCED_FILE_ID), alias: "ReferencedFileID", vr: Exact(VR::CS), vm: "1-8" },
    E { tag: Single(MRDR_DIRECTORY_RECORD_OFFSET), alias: "MRDRDirectoryRecordOffset", vr: Up, vm: "1" },
    E { tag: Single(REFERENCED_SOP_CLASS_UID_IN_FILE), alias: "ReferencedSOPClassUIDInFile", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(REFERENCED_SOP_INSTANCE_UID_IN_FILE), alias: "ReferencedSOPInstanceUIDInFile", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(REFERENCED_TRANSFER_SYNTAX_UID_IN_FILE), alias: "ReferencedTransferSyntaxUIDInFile", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(NUMBER_OF_REFERENCES), alias: "NumberOfReferences", vr: Exact(VR::UL), vm: "1" },
    E { tag: Single(SPECIFIC_CHARACTER_SET), alias: "SpecificCharacterSet", vr: Exact(VR::CS), vm: "1-n" },
    E { tag: Single(IMAGE_TYPE), alias: "ImageType", vr: Exact(VR::CS), vm: "2-n" },
    E { tag: Single(INSTANCE_CREATION_DATE), alias: "InstanceCreationDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(INSTANCE_CREATION_TIME), alias: "InstanceCreationTime", vr: Exact(VR::TM), vm: "1" },
    E { tag: Single(SOP_CLASS_UID), alias: "SOPClassUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(SOP_INSTANCE_UID), alias: "SOPInstanceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(STUDY_DATE), alias: "StudyDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(SERIES_DATE), alias: "SeriesDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(ACQUISITION_DATE), alias: "AcquisitionDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(CONTENT_DATE), alias: "ContentDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(ACQUISITION_DATE_TIME), alias: "AcquisitionDateTime", vr: Exact(VR::DT), vm: "1" },
    E { tag: Single(STUDY_TIME), alias: "StudyTime", vr: Exact(VR::TM), vm: "1" },
    E { tag: Single(SERIES_TIME), alias: "SeriesTime", vr: Exact(VR::TM), vm: "1" },
    E { tag: Single(CONTENT_TIME), alias: "ContentTime", vr: Exact(VR::TM), vm: "1" },
    E { tag: Single(ACCESSION_NUMBER), alias: "AccessionNumber", vr: Exact(VR::SH), vm: "1" },
    E { tag: Single(QUERY_RETRIEVE_LEVEL), alias: "QueryRetrieveLevel", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(RETRIEVE_AE_TITLE), alias: "RetrieveAETitle", vr: Exact(VR::AE), vm: "1-n" },
    E { tag: Single(MODALITY), alias: "Modality", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(CONVERSION_TYPE), alias: "ConversionType", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(MANUFACTURER), alias: "Manufacturer", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(INSTITUTION_NAME), alias: "InstitutionName", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(REFERRING_PHYSICIAN_NAME), alias: "ReferringPhysicianName", vr: Exact(VR::PN), vm: "1" },
    E { tag: Single(CODE_VALUE), alias: "CodeValue", vr: Exact(VR::SH), vm: "1" },
    E { tag: Single(CODING_SCHEME_DESIGNATOR), alias: "CodingSchemeDesignator", vr: Exact(VR::SH), vm: "1" },
    E { tag: Single(CODE_MEANING), alias: "CodeMeaning", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(STUDY_DESCRIPTION), alias: "StudyDescription", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(SERIES_DESCRIPTION), alias: "SeriesDescription", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(MANUFACTURER_MODEL_NAME), alias: "ManufacturerModelName", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(REFERENCED_STUDY_SEQUENCE), alias: "ReferencedStudySequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(REFERENCED_SERIES_SEQUENCE), alias: "ReferencedSeriesSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(REFERENCED_IMAGE_SEQUENCE), alias: "ReferencedImageSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(REFERENCED_SOP_CLASS_UID), alias: "ReferencedSOPClassUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(REFERENCED_SOP_INSTANCE_UID), alias: "ReferencedSOPInstanceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(SOURCE_IMAGE_SEQUENCE), alias: "SourceImageSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(DERIVATION_CODE_SEQUENCE), alias: "DerivationCodeSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(PATIENT_NAME), alias: "PatientName", vr: Exact(VR::PN), vm: "1" },
    E { tag: Single(PATIENT_ID), alias: "PatientID", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(PATIENT_BIRTH_DATE), alias: "PatientBirthDate", vr: Exact(VR::DA), vm: "1" },
    E { tag: Single(PATIENT_SEX), alias: "PatientSex", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(PATIENT_AGE), alias: "PatientAge", vr: Exact(VR::AS), vm: "1" },
    E { tag: Single(PATIENT_SIZE), alias: "PatientSize", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(PATIENT_WEIGHT), alias: "PatientWeight", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(PATIENT_COMMENTS), alias: "PatientComments", vr: Exact(VR::LT), vm: "1" },
    E { tag: Single(BODY_PART_EXAMINED), alias: "BodyPartExamined", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(SLICE_THICKNESS), alias: "SliceThickness", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(KVP), alias: "KVP", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(SPACING_BETWEEN_SLICES), alias: "SpacingBetweenSlices", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(SOFTWARE_VERSIONS), alias: "SoftwareVersions", vr: Exact(VR::LO), vm: "1-n" },
    E { tag: Single(PROTOCOL_NAME), alias: "ProtocolName", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(PATIENT_POSITION), alias: "PatientPosition", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(STUDY_INSTANCE_UID), alias: "StudyInstanceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(SERIES_INSTANCE_UID), alias: "SeriesInstanceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(STUDY_ID), alias: "StudyID", vr: Exact(VR::SH), vm: "1" },
    E { tag: Single(SERIES_NUMBER), alias: "SeriesNumber", vr: Exact(VR::IS), vm: "1" },
    E { tag: Single(ACQUISITION_NUMBER), alias: "AcquisitionNumber", vr: Exact(VR::IS), vm: "1" },
    E { tag: Single(INSTANCE_NUMBER), alias: "InstanceNumber", vr: Exact(VR::IS), vm: "1" },
    E { tag: Single(PATIENT_ORIENTATION), alias: "PatientOrientation", vr: Exact(VR::CS), vm: "2" },
    E { tag: Single(IMAGE_POSITION_PATIENT), alias: "ImagePositionPatient", vr: Exact(VR::DS), vm: "3" },
    E { tag: Single(IMAGE_ORIENTATION_PATIENT), alias: "ImageOrientationPatient", vr: Exact(VR::DS), vm: "6" },
    E { tag: Single(FRAME_OF_REFERENCE_UID), alias: "FrameOfReferenceUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(SLICE_LOCATION), alias: "SliceLocation", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(IMAGE_COMMENTS), alias: "ImageComments", vr: Exact(VR::LT), vm: "1" },
    E { tag: Single(CONCATENATION_UID), alias: "ConcatenationUID", vr: Exact(VR::UI), vm: "1" },
    E { tag: Single(SAMPLES_PER_PIXEL), alias: "SamplesPerPixel", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(PHOTOMETRIC_INTERPRETATION), alias: "PhotometricInterpretation", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(PLANAR_CONFIGURATION), alias: "PlanarConfiguration", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(NUMBER_OF_FRAMES), alias: "NumberOfFrames", vr: Exact(VR::IS), vm: "1" },
    E { tag: Single(FRAME_INCREMENT_POINTER), alias: "FrameIncrementPointer", vr: Exact(VR::AT), vm: "1-n" },
    E { tag: Single(ROWS), alias: "Rows", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(COLUMNS), alias: "Columns", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(PIXEL_SPACING), alias: "PixelSpacing", vr: Exact(VR::DS), vm: "2" },
    E { tag: Single(PIXEL_ASPECT_RATIO), alias: "PixelAspectRatio", vr: Exact(VR::IS), vm: "2" },
    E { tag: Single(BITS_ALLOCATED), alias: "BitsAllocated", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(BITS_STORED), alias: "BitsStored", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(HIGH_BIT), alias: "HighBit", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(PIXEL_REPRESENTATION), alias: "PixelRepresentation", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(SMALLEST_IMAGE_PIXEL_VALUE), alias: "SmallestImagePixelValue", vr: Xs, vm: "1" },
    E { tag: Single(LARGEST_IMAGE_PIXEL_VALUE), alias: "LargestImagePixelValue", vr: Xs, vm: "1" },
    E { tag: Single(WINDOW_CENTER), alias: "WindowCenter", vr: Exact(VR::DS), vm: "1-n" },
    E { tag: Single(WINDOW_WIDTH), alias: "WindowWidth", vr: Exact(VR::DS), vm: "1-n" },
    E { tag: Single(RESCALE_INTERCEPT), alias: "RescaleIntercept", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(RESCALE_SLOPE), alias: "RescaleSlope", vr: Exact(VR::DS), vm: "1" },
    E { tag: Single(RESCALE_TYPE), alias: "RescaleType", vr: Exact(VR::LO), vm: "1" },
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR), alias: "RedPaletteColorLookupTableDescriptor", vr: Xs, vm: "3" },
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "RedPaletteColorLookupTableData", vr: Exact(VR::OW), vm: "1" },
    E { tag: Single(LOSSY_IMAGE_COMPRESSION), alias: "LossyImageCompression", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(LOSSY_IMAGE_COMPRESSION_RATIO), alias: "LossyImageCompressionRatio", vr: Exact(VR::DS), vm: "1-n" },
    E { tag: Single(LOSSY_IMAGE_COMPRESSION_METHOD), alias: "LossyImageCompressionMethod", vr: Exact(VR::CS), vm: "1-n" },
    E { tag: Single(LUT_DESCRIPTOR), alias: "LUTDescriptor", vr: Xs, vm: "3" },
    E { tag: Single(LUT_DATA), alias: "LUTData", vr: Lt, vm: "1-n" },
    E { tag: Single(PIXEL_DATA_PROVIDER_URL), alias: "PixelDataProviderURL", vr: Exact(VR::UR), vm: "1" },
    E { tag: Single(REQUEST_ATTRIBUTES_SEQUENCE), alias: "RequestAttributesSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(CONTENT_SEQUENCE), alias: "ContentSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(VALUE_TYPE), alias: "ValueType", vr: Exact(VR::CS), vm: "1" },
    E { tag: Single(TEXT_VALUE), alias: "TextValue", vr: Exact(VR::UT), vm: "1" },
    E { tag: Single(NUMBER_OF_SLICES), alias: "NumberOfSlices", vr: Exact(VR::US), vm: "1" },
    E { tag: Single(ICON_IMAGE_SEQUENCE), alias: "IconImageSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Group100(CURVE_DIMENSIONS), alias: "CurveDimensions", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(NUMBER_OF_POINTS), alias: "NumberOfPoints", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(TYPE_OF_DATA), alias: "TypeOfData", vr: Exact(VR::CS), vm: "1" },
    E { tag: Group100(CURVE_DESCRIPTION), alias: "CurveDescription", vr: Exact(VR::LO), vm: "1" },
    E { tag: Group100(AXIS_UNITS), alias: "AxisUnits", vr: Exact(VR::SH), vm: "1-n" },
    E { tag: Group100(DATA_VALUE_REPRESENTATION), alias: "DataValueRepresentation", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(CURVE_DATA), alias: "CurveData", vr: Ox, vm: "1" },
    E { tag: Group100(OVERLAY_ROWS), alias: "OverlayRows", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(OVERLAY_COLUMNS), alias: "OverlayColumns", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(NUMBER_OF_FRAMES_IN_OVERLAY), alias: "NumberOfFramesInOverlay", vr: Exact(VR::IS), vm: "1" },
    E { tag: Group100(OVERLAY_DESCRIPTION), alias: "OverlayDescription", vr: Exact(VR::LO), vm: "1" },
    E { tag: Group100(OVERLAY_TYPE), alias: "OverlayType", vr: Exact(VR::CS), vm: "1" },
    E { tag: Group100(OVERLAY_ORIGIN), alias: "OverlayOrigin", vr: Exact(VR::SS), vm: "2" },
    E { tag: Group100(OVERLAY_BITS_ALLOCATED), alias: "OverlayBitsAllocated", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(OVERLAY_BIT_POSITION), alias: "OverlayBitPosition", vr: Exact(VR::US), vm: "1" },
    E { tag: Group100(OVERLAY_DATA), alias: "OverlayData", vr: Ox, vm: "1" },
    E { tag: Single(EXTENDED_OFFSET_TABLE), alias: "ExtendedOffsetTable", vr: Exact(VR::OV), vm: "1" },
    E { tag: Single(EXTENDED_OFFSET_TABLE_LENGTHS), alias: "ExtendedOffsetTableLengths", vr: Exact(VR::OV), vm: "1" },
    E { tag: Single(FLOAT_PIXEL_DATA), alias: "FloatPixelData", vr: Exact(VR::OF), vm: "1" },
    E { tag: Single(DOUBLE_FLOAT_PIXEL_DATA), alias: "DoubleFloatPixelData", vr: Exact(VR::OD), vm: "1" },
    E { tag: Single(PIXEL_DATA), alias: "PixelData", vr: Px, vm: "1" },
    E { tag: Single(DIGITAL_SIGNATURES_SEQUENCE), alias: "DigitalSignaturesSequence", vr: Exact(VR::SQ), vm: "1" },
    E { tag: Single(DATA_SET_TRAILING_PADDING), alias: "DataSetTrailingPadding", vr: Exact(VR::OB), vm: "1" },
];
