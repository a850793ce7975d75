//! UID declarations

/// SOP Class: Verification SOP Class
pub const VERIFICATION: &str = "1.2.840.10008.1.1";
/// Transfer Syntax: Implicit VR Little Endian: Default Transfer Syntax for DICOM
pub const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";
/// Transfer Syntax: Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
/// Transfer Syntax: Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1.99";
/// Transfer Syntax: Explicit VR Big Endian (Retired)
pub const EXPLICIT_VR_BIG_ENDIAN: &str = "1.2.840.10008.1.2.2";
/// Transfer Syntax: JPEG Baseline (Process 1)
pub const JPEG_BASELINE8_BIT: &str = "1.2.840.10008.1.2.4.50";
/// Transfer Syntax: JPEG Extended (Process 2 & 4)
pub const JPEG_EXTENDED12_BIT: &str = "1.2.840.10008.1.2.4.51";
/// Transfer Syntax: JPEG Spectral Selection, Non-Hierarchical (Process 6 & 8) (Retired)
pub const JPEG_SPECTRAL_SELECTION_NON_HIERARCHICAL68: &str = "1.2.840.10008.1.2.4.53";
/// Transfer Syntax: JPEG Full Progression, Non-Hierarchical (Process 10 & 12) (Retired)
pub const JPEG_FULL_PROGRESSION_NON_HIERARCHICAL1012: &str = "1.2.840.10008.1.2.4.55";
/// Transfer Syntax: JPEG Lossless, Non-Hierarchical (Process 14)
pub const JPEG_LOSSLESS: &str = "1.2.840.10008.1.2.4.57";
/// Transfer Syntax: JPEG Lossless, Non-Hierarchical, First-Order Prediction (Process 14 [Selection Value 1])
pub const JPEG_LOSSLESS_SV1: &str = "1.2.840.10008.1.2.4.70";
/// Transfer Syntax: JPEG-LS Lossless Image Compression
pub const JPEGLS_LOSSLESS: &str = "1.2.840.10008.1.2.4.80";
/// Transfer Syntax: JPEG-LS Lossy (Near-Lossless) Image Compression
pub const JPEGLS_NEAR_LOSSLESS: &str = "1.2.840.10008.1.2.4.81";
/// Transfer Syntax: JPEG 2000 Image Compression (Lossless Only)
pub const JPEG2000_LOSSLESS: &str = "1.2.840.10008.1.2.4.90";
/// Transfer Syntax: JPEG 2000 Image Compression
pub const JPEG2000: &str = "1.2.840.10008.1.2.4.91";
/// Transfer Syntax: RLE Lossless
pub const RLE_LOSSLESS: &str = "1.2.840.10008.1.2.5";
/// SOP Class: Media Storage Directory Storage
pub const MEDIA_STORAGE_DIRECTORY_STORAGE: &str = "1.2.840.10008.1.3.10";
/// SOP Class: Secondary Capture Image Storage
pub const SECONDARY_CAPTURE_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.7";
/// SOP Class: CT Image Storage
pub const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
