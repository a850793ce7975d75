//! A list of compiled transfer syntax specifiers.
//!
//! The constants exported here refer to the library's built-in support
//! for DICOM transfer syntaxes.
//!
//! - **Fully implemented** means that data sets can be read and written,
//!   and pixel data is native.
//! - **Encapsulated** transfer syntaxes can be read and written,
//!   while converting their pixel data needs a codec
//!   registered in the codec list
//!   (see [`adapters`](crate::adapters)).
//! - **Deflated** data sets are read and written
//!   through the [`deflate`](crate::deflate) adapter
//!   (requires the `deflate` feature).

use byteordered::Endianness;
use dcmdata_dictionary_std::uids;
use dcmdata_encoding::transfer_syntax::TransferSyntax as Ts;

// -- the three base transfer syntaxes, fully supported --

/// **Fully implemented:** Implicit VR Little Endian: Default Transfer Syntax for DICOM
pub const IMPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    uids::IMPLICIT_VR_LITTLE_ENDIAN,
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
);

/// **Fully implemented:** Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    uids::EXPLICIT_VR_LITTLE_ENDIAN,
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
);

/// **Fully implemented:** Explicit VR Big Endian
pub const EXPLICIT_VR_BIG_ENDIAN: Ts = Ts::new(
    uids::EXPLICIT_VR_BIG_ENDIAN,
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
);

// -- transfer syntaxes with the whole data set compressed --

/// **Deflated:** Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    "Deflated Explicit VR Little Endian",
    Endianness::Little,
    true,
)
.with_deflate();

// -- encapsulated pixel data --

/// **Encapsulated:** RLE Lossless
pub const RLE_LOSSLESS: Ts = Ts::new_encapsulated(uids::RLE_LOSSLESS, "RLE Lossless", false);

/// **Encapsulated:** JPEG Baseline (Process 1):
/// Default Transfer Syntax for Lossy JPEG 8-bit Image Compression
pub const JPEG_BASELINE: Ts =
    Ts::new_encapsulated(uids::JPEG_BASELINE8_BIT, "JPEG Baseline (Process 1)", true);

/// **Encapsulated:** JPEG Extended (Process 2 & 4):
/// Default Transfer Syntax for Lossy JPEG 12-bit Image Compression
pub const JPEG_EXTENDED: Ts = Ts::new_encapsulated(
    uids::JPEG_EXTENDED12_BIT,
    "JPEG Extended (Process 2 & 4)",
    true,
);

/// **Encapsulated:** JPEG Lossless, Non-Hierarchical (Process 14)
pub const JPEG_LOSSLESS_NON_HIERARCHICAL: Ts = Ts::new_encapsulated(
    uids::JPEG_LOSSLESS,
    "JPEG Lossless, Non-Hierarchical (Process 14)",
    false,
);

/// **Encapsulated:** JPEG Lossless, Non-Hierarchical, First-Order Prediction
/// (Process 14 [Selection Value 1]):
/// Default Transfer Syntax for Lossless JPEG Image Compression
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: Ts = Ts::new_encapsulated(
    uids::JPEG_LOSSLESS_SV1,
    "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
    false,
);

/// **Encapsulated:** JPEG-LS Lossless Image Compression
pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: Ts = Ts::new_encapsulated(
    uids::JPEGLS_LOSSLESS,
    "JPEG-LS Lossless Image Compression",
    false,
);

/// **Encapsulated:** JPEG-LS Lossy (Near-Lossless) Image Compression
pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: Ts = Ts::new_encapsulated(
    uids::JPEGLS_NEAR_LOSSLESS,
    "JPEG-LS Lossy (Near-Lossless) Image Compression",
    true,
);

/// **Encapsulated:** JPEG 2000 Image Compression (Lossless Only)
pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = Ts::new_encapsulated(
    uids::JPEG2000_LOSSLESS,
    "JPEG 2000 Image Compression (Lossless Only)",
    false,
);

/// **Encapsulated:** JPEG 2000 Image Compression
pub const JPEG_2000_IMAGE_COMPRESSION: Ts =
    Ts::new_encapsulated(uids::JPEG2000, "JPEG 2000 Image Compression", true);

/// All built-in transfer syntaxes.
pub const ALL: [Ts; 13] = [
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    RLE_LOSSLESS,
    JPEG_BASELINE,
    JPEG_EXTENDED,
    JPEG_LOSSLESS_NON_HIERARCHICAL,
    JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
    JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
    JPEG_LS_LOSSY_IMAGE_COMPRESSION,
    JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
    JPEG_2000_IMAGE_COMPRESSION,
];
