//! The registry of pixel data codecs.
//!
//! A [`CodecList`] holds at most one codec per transfer syntax and role,
//! kept in transfer syntax UID order.
//! Registering a codec for a transfer syntax and role already taken
//! replaces the previous one.
//!
//! The process-wide codec list is reachable through [`global_codecs`].
//! Codecs are added to it and removed from it
//! by registration objects such as
//! [`RleDecoderRegistration`](crate::adapters::rle::RleDecoderRegistration),
//! which make sure that each codec is registered at most once.

use dcmdata_core::error::ErrorKind;
use dcmdata_encoding::adapters::{
    Codec, CodecParameter, CodecRole, DecodeError, EncapsulatedPixelData, EncodeError,
    EncodedPixelData, PixelDataObject, RepresentationParameter,
};
use lazy_static::lazy_static;
use snafu::{OptionExt, ResultExt, Snafu};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// An error from looking up or invoking a registered codec.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// No codec is registered for the transfer syntax and role
    #[snafu(display("No {} registered for transfer syntax {}", role, ts))]
    NoCodec { ts: String, role: CodecRole },

    /// The codec failed to decode
    #[snafu(display("Could not decode pixel data from {}", ts))]
    Decode { ts: String, source: DecodeError },

    /// The codec failed to encode
    #[snafu(display("Could not encode pixel data into {}", ts))]
    Encode { ts: String, source: EncodeError },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoCodec { .. } => ErrorKind::CannotChangeRepresentation,
            Error::Decode { source, .. } => source.kind(),
            Error::Encode { source, .. } => source.kind(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Compare two UIDs component by component,
/// numeric components being compared by value.
pub fn compare_uids(a: &str, b: &str) -> Ordering {
    let mut a_parts = a.split('.');
    let mut b_parts = b.split('.');
    loop {
        match (a_parts.next(), b_parts.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let x = x.trim_start_matches('0');
                let y = y.trim_start_matches('0');
                let ord = x.len().cmp(&y.len()).then_with(|| x.cmp(y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// A codec registered in a codec list,
/// with its default representation parameter and its codec parameter.
#[derive(Debug)]
pub struct CodecEntry {
    codec: Arc<dyn Codec>,
    representation: Option<Box<dyn RepresentationParameter>>,
    parameter: Box<dyn CodecParameter>,
}

impl CodecEntry {
    /// The registered codec.
    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    /// The default representation parameter of the codec,
    /// used when a conversion does not name one.
    pub fn representation(&self) -> Option<&dyn RepresentationParameter> {
        self.representation.as_deref()
    }

    /// The parameter given to the codec on every conversion.
    pub fn parameter(&self) -> &dyn CodecParameter {
        &*self.parameter
    }

    fn key(&self) -> (&'static str, CodecRole) {
        (self.codec.transfer_syntax(), self.codec.role())
    }
}

fn same_codec(a: &Arc<dyn Codec>, b: &Arc<dyn Codec>) -> bool {
    // compare the data pointers only
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

fn cmp_key(entry: (&str, CodecRole), ts: &str, role: CodecRole) -> Ordering {
    compare_uids(entry.0, ts).then(entry.1.cmp(&role))
}

/// A list of pixel data codecs,
/// sorted by transfer syntax UID and role.
#[derive(Debug, Default)]
pub struct CodecList {
    entries: Vec<CodecEntry>,
}

impl CodecList {
    /// Create an empty codec list.
    pub fn new() -> Self {
        CodecList::default()
    }

    /// The number of registered codecs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no codecs are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered codecs in transfer syntax order.
    pub fn iter(&self) -> impl Iterator<Item = &CodecEntry> {
        self.entries.iter()
    }

    fn position(&self, ts: &str, role: CodecRole) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|e| cmp_key(e.key(), ts, role))
    }

    /// Register a codec.
    ///
    /// A codec registered earlier
    /// for the same transfer syntax and role is replaced,
    /// and returned.
    pub fn register_codec(
        &mut self,
        codec: Arc<dyn Codec>,
        representation: Option<Box<dyn RepresentationParameter>>,
        parameter: Box<dyn CodecParameter>,
    ) -> Option<Arc<dyn Codec>> {
        let ts = codec.transfer_syntax();
        let role = codec.role();
        let entry = CodecEntry {
            codec,
            representation,
            parameter,
        };
        match self.position(ts, role) {
            Ok(i) => {
                tracing::debug!("Replacing {} for transfer syntax {}", role, ts);
                let old = std::mem::replace(&mut self.entries[i], entry);
                Some(old.codec)
            }
            Err(i) => {
                tracing::debug!("Registering {} for transfer syntax {}", role, ts);
                self.entries.insert(i, entry);
                None
            }
        }
    }

    /// Remove the given codec from the list.
    /// Returns whether it was registered.
    pub fn deregister_codec(&mut self, codec: &Arc<dyn Codec>) -> bool {
        match self.entries.iter().position(|e| same_codec(&e.codec, codec)) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Replace the parameter of the given codec.
    /// Returns whether the codec is registered.
    pub fn update_codec_parameter(
        &mut self,
        codec: &Arc<dyn Codec>,
        parameter: Box<dyn CodecParameter>,
    ) -> bool {
        match self.entries.iter_mut().find(|e| same_codec(&e.codec, codec)) {
            Some(entry) => {
                entry.parameter = parameter;
                true
            }
            None => false,
        }
    }

    /// Find the codec for the given transfer syntax and role.
    /// Trailing null characters and spaces in the UID are ignored.
    pub fn search_codec(&self, ts: &str, role: CodecRole) -> Option<&CodecEntry> {
        let ts = ts.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        self.position(ts, role).ok().map(|i| &self.entries[i])
    }

    /// Find the decoder for the given transfer syntax.
    pub fn search_decoder(&self, ts: &str) -> Option<&CodecEntry> {
        self.search_codec(ts, CodecRole::Decoder)
    }

    /// Find the encoder for the given transfer syntax.
    pub fn search_encoder(&self, ts: &str) -> Option<&CodecEntry> {
        self.search_codec(ts, CodecRole::Encoder)
    }

    /// Whether pixel data can be converted
    /// from the transfer syntax `from` into the transfer syntax `to`
    /// by a single registered codec.
    pub fn can_change_coding(&self, from: &str, to: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.codec.can_change_coding(from, to))
    }

    /// Decode all frames of encapsulated pixel data
    /// with the decoder registered for `ts`.
    pub fn decode(
        &self,
        ts: &str,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        attrs: &dyn PixelDataObject,
    ) -> Result<Vec<u8>> {
        let entry = self.require(ts, CodecRole::Decoder)?;
        entry
            .codec
            .decode(from_param, src, entry.parameter(), attrs)
            .context(DecodeSnafu { ts })
    }

    /// Decode a single frame of encapsulated pixel data
    /// with the decoder registered for `ts`,
    /// appending the native frame to `dst`.
    pub fn decode_frame(
        &self,
        ts: &str,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        attrs: &dyn PixelDataObject,
        frame: u32,
        dst: &mut Vec<u8>,
    ) -> Result<()> {
        let entry = self.require(ts, CodecRole::Decoder)?;
        entry
            .codec
            .decode_frame(from_param, src, entry.parameter(), attrs, frame, dst)
            .context(DecodeSnafu { ts })
    }

    /// Encode native pixel data with the encoder registered for `ts`.
    /// Without a representation parameter,
    /// the default one of the encoder is used.
    pub fn encode(
        &self,
        ts: &str,
        native: &[u8],
        to_param: Option<&dyn RepresentationParameter>,
        attrs: &dyn PixelDataObject,
    ) -> Result<EncodedPixelData> {
        let entry = self.require(ts, CodecRole::Encoder)?;
        let to_param = to_param.or_else(|| entry.representation());
        entry
            .codec
            .encode(native, to_param, entry.parameter(), attrs)
            .context(EncodeSnafu { ts })
    }

    /// Convert encapsulated pixel data from the transfer syntax `from`
    /// into the transfer syntax `to`
    /// with the encoder registered for `to`.
    pub fn transcode(
        &self,
        from: &str,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        to: &str,
        to_param: Option<&dyn RepresentationParameter>,
        attrs: &dyn PixelDataObject,
    ) -> Result<EncodedPixelData> {
        let entry = self.require(to, CodecRole::Encoder)?;
        let to_param = to_param.or_else(|| entry.representation());
        entry
            .codec
            .transcode(from, from_param, src, to_param, entry.parameter(), attrs)
            .context(EncodeSnafu { ts: to })
    }

    /// Determine the photometric interpretation
    /// of the pixel data decoded from `ts`.
    pub fn determine_decompressed_color_model(
        &self,
        ts: &str,
        from_param: Option<&dyn RepresentationParameter>,
        src: &EncapsulatedPixelData,
        attrs: &dyn PixelDataObject,
    ) -> Result<String> {
        let entry = self.require(ts, CodecRole::Decoder)?;
        entry
            .codec
            .determine_decompressed_color_model(from_param, src, entry.parameter(), attrs)
            .context(DecodeSnafu { ts })
    }

    fn require(&self, ts: &str, role: CodecRole) -> Result<&CodecEntry> {
        self.search_codec(ts, role).context(NoCodecSnafu { ts, role })
    }
}

/// A codec with the parameters it is registered with.
pub type CodecRegistration = (
    Arc<dyn Codec>,
    Option<Box<dyn RepresentationParameter>>,
    Box<dyn CodecParameter>,
);

/// The state behind the global codec list.
#[derive(Debug, Default)]
struct GlobalCodecs {
    list: CodecList,
    /// codecs registered through registration objects, by registration name
    registered: HashMap<&'static str, Vec<Arc<dyn Codec>>>,
}

lazy_static! {
    static ref GLOBAL_CODECS: RwLock<GlobalCodecs> = RwLock::new(GlobalCodecs::default());
}

/// A read guard over the global codec list.
pub struct GlobalCodecsGuard(RwLockReadGuard<'static, GlobalCodecs>);

impl fmt::Debug for GlobalCodecsGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobalCodecsGuard").field(&self.0.list).finish()
    }
}

impl Deref for GlobalCodecsGuard {
    type Target = CodecList;

    fn deref(&self) -> &CodecList {
        &self.0.list
    }
}

/// Obtain read access to the global codec list.
///
/// Registrations and deregistrations wait
/// until all guards are dropped.
pub fn global_codecs() -> GlobalCodecsGuard {
    GlobalCodecsGuard(GLOBAL_CODECS.read().unwrap_or_else(PoisonError::into_inner))
}

/// Register a family of codecs in the global list under a registration name,
/// unless codecs were already registered under that name.
///
/// The codecs and their parameters are only built
/// while holding exclusive access to the list,
/// so that concurrent registrations of the same name
/// result in a single registration.
/// Returns whether the codecs were registered.
pub(crate) fn register_global<F>(name: &'static str, make: F) -> bool
where
    F: FnOnce() -> Vec<CodecRegistration>,
{
    let mut global = GLOBAL_CODECS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if global.registered.contains_key(name) {
        return false;
    }
    let mut codecs = Vec::new();
    for (codec, representation, parameter) in make() {
        codecs.push(Arc::clone(&codec));
        global.list.register_codec(codec, representation, parameter);
    }
    global.registered.insert(name, codecs);
    true
}

/// Remove the codecs registered under the given name from the global list.
/// Returns whether codecs were registered under that name.
pub(crate) fn deregister_global(name: &'static str) -> bool {
    let mut global = GLOBAL_CODECS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let removed = global.registered.remove(name);
    match removed {
        Some(codecs) => {
            for codec in &codecs {
                global.list.deregister_codec(codec);
            }
            true
        }
        None => false,
    }
}

/// Replace the parameter of the codecs registered under the given name.
/// Returns whether codecs were registered under that name.
pub(crate) fn update_global_parameter(name: &'static str, parameter: &dyn CodecParameter) -> bool {
    let mut global = GLOBAL_CODECS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let GlobalCodecs { list, registered } = &mut *global;
    match registered.get(name) {
        Some(codecs) => {
            for codec in codecs {
                list.update_codec_parameter(codec, parameter.clone_param());
            }
            true
        }
        None => false,
    }
}

/// Whether codecs are registered under the given name.
pub(crate) fn is_registered_global(name: &'static str) -> bool {
    GLOBAL_CODECS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .registered
        .contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_encoding::adapters::{DecodeResult, EncodeResult, ImageInfo};
    use std::any::Any;

    #[derive(Debug)]
    struct NoParameter;

    impl CodecParameter for NoParameter {
        fn class_name(&self) -> &'static str {
            "NoParameter"
        }
        fn clone_param(&self) -> Box<dyn CodecParameter> {
            Box::new(NoParameter)
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// A codec which "decodes" by copying the fragments,
    /// tagged so that replacements can be told apart.
    #[derive(Debug)]
    struct CopyCodec {
        ts: &'static str,
        role: CodecRole,
        tag: u8,
    }

    impl Codec for CopyCodec {
        fn transfer_syntax(&self) -> &'static str {
            self.ts
        }
        fn role(&self) -> CodecRole {
            self.role
        }
        fn can_change_coding(&self, old: &str, _new: &str) -> bool {
            old == self.ts
        }
        fn decode_frame(
            &self,
            _from_param: Option<&dyn RepresentationParameter>,
            src: &EncapsulatedPixelData,
            _params: &dyn CodecParameter,
            _attrs: &dyn PixelDataObject,
            frame: u32,
            dst: &mut Vec<u8>,
        ) -> DecodeResult<()> {
            dst.push(self.tag);
            dst.extend_from_slice(&src.fragments[frame as usize]);
            Ok(())
        }
        fn encode(
            &self,
            native: &[u8],
            _to_param: Option<&dyn RepresentationParameter>,
            _params: &dyn CodecParameter,
            _attrs: &dyn PixelDataObject,
        ) -> EncodeResult<EncodedPixelData> {
            Ok(EncodedPixelData {
                pixel_data: EncapsulatedPixelData::new(vec![], vec![native.to_vec()]),
                updates: vec![],
            })
        }
        fn determine_decompressed_color_model(
            &self,
            _from_param: Option<&dyn RepresentationParameter>,
            _src: &EncapsulatedPixelData,
            _params: &dyn CodecParameter,
            _attrs: &dyn PixelDataObject,
        ) -> DecodeResult<String> {
            Ok("MONOCHROME2".to_string())
        }
    }

    fn codec(ts: &'static str, role: CodecRole, tag: u8) -> Arc<dyn Codec> {
        Arc::new(CopyCodec { ts, role, tag })
    }

    #[test]
    fn uids_compare_numerically() {
        // component by component, not by length
        assert_eq!(
            compare_uids("1.2.840.10008.1.2.4.50", "1.2.840.10008.1.2.5"),
            Ordering::Less
        );
        assert_eq!(
            compare_uids("1.2.840.10008.1.2.5", "1.2.840.10008.1.2.4.50"),
            Ordering::Greater
        );
        assert_eq!(
            compare_uids("1.2.840.10008.1.2.4.100", "1.2.840.10008.1.2.4.90"),
            Ordering::Greater
        );
        assert_eq!(compare_uids("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_uids("1.2", "1.2.3"), Ordering::Less);
    }

    #[test]
    fn most_recent_registration_wins() {
        let mut list = CodecList::new();
        let first = codec("1.2.840.10008.1.2.5", CodecRole::Decoder, 1);
        let second = codec("1.2.840.10008.1.2.5", CodecRole::Decoder, 2);
        assert!(list
            .register_codec(first.clone(), None, Box::new(NoParameter))
            .is_none());
        let replaced = list.register_codec(second.clone(), None, Box::new(NoParameter));
        assert!(replaced.map_or(false, |c| same_codec(&c, &first)));
        assert_eq!(list.len(), 1);

        let src = EncapsulatedPixelData::new(vec![], vec![vec![9, 9]]);
        let attrs = ImageInfo::monochrome(1, 2, 8);
        let decoded = list.decode("1.2.840.10008.1.2.5\0", None, &src, &attrs).unwrap();
        assert_eq!(decoded, vec![2, 9, 9]);

        // the replaced codec is no longer registered
        assert!(!list.deregister_codec(&first));
        assert!(list.deregister_codec(&second));
        assert!(list.is_empty());
    }

    #[test]
    fn entries_are_sorted_by_uid_and_role() {
        let mut list = CodecList::new();
        list.register_codec(codec("1.2.840.10008.1.2.5", CodecRole::Encoder, 0), None, Box::new(NoParameter));
        list.register_codec(codec("1.2.840.10008.1.2.4.50", CodecRole::Decoder, 0), None, Box::new(NoParameter));
        list.register_codec(codec("1.2.840.10008.1.2.5", CodecRole::Decoder, 0), None, Box::new(NoParameter));
        let keys: Vec<_> = list.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                ("1.2.840.10008.1.2.4.50", CodecRole::Decoder),
                ("1.2.840.10008.1.2.5", CodecRole::Decoder),
                ("1.2.840.10008.1.2.5", CodecRole::Encoder),
            ]
        );
        assert!(list.search_encoder("1.2.840.10008.1.2.4.50").is_none());
        assert!(list.can_change_coding("1.2.840.10008.1.2.4.50", "1.2.840.10008.1.2.1"));
    }

    #[test]
    fn missing_codec_is_reported() {
        let list = CodecList::new();
        let attrs = ImageInfo::monochrome(1, 1, 8);
        let err = list.encode("1.2.840.10008.1.2.5", &[0], None, &attrs).unwrap_err();
        assert!(matches!(err, Error::NoCodec { role: CodecRole::Encoder, .. }));
        assert_eq!(err.kind(), ErrorKind::CannotChangeRepresentation);
    }

    #[test]
    fn parameters_are_updated_in_place() {
        #[derive(Debug)]
        struct Level(u8);
        impl CodecParameter for Level {
            fn class_name(&self) -> &'static str {
                "Level"
            }
            fn clone_param(&self) -> Box<dyn CodecParameter> {
                Box::new(Level(self.0))
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let mut list = CodecList::new();
        let c = codec("1.2.840.10008.1.2.5", CodecRole::Decoder, 0);
        list.register_codec(c.clone(), None, Box::new(Level(1)));
        assert!(list.update_codec_parameter(&c, Box::new(Level(7))));
        let entry = list.search_decoder("1.2.840.10008.1.2.5").unwrap();
        let level = entry.parameter().as_any().downcast_ref::<Level>().unwrap();
        assert_eq!(level.0, 7);

        let other = codec("1.2.840.10008.1.2.5", CodecRole::Decoder, 0);
        assert!(!list.update_codec_parameter(&other, Box::new(Level(3))));
    }

    #[test]
    fn global_registration_is_idempotent() {
        let name = "test-copy-decoder";
        let make = || {
            vec![
                (
                    codec("1.2.3.999", CodecRole::Decoder, 5),
                    None,
                    Box::new(NoParameter) as Box<dyn CodecParameter>,
                ),
                (
                    codec("1.2.3.999", CodecRole::Encoder, 5),
                    None,
                    Box::new(NoParameter) as Box<dyn CodecParameter>,
                ),
            ]
        };
        assert!(!deregister_global(name));
        assert!(register_global(name, make));
        assert!(!register_global(name, make));
        assert!(is_registered_global(name));
        assert!(global_codecs().search_decoder("1.2.3.999").is_some());
        assert!(update_global_parameter(name, &NoParameter));
        assert!(deregister_global(name));
        assert!(!deregister_global(name));
        assert!(global_codecs().search_decoder("1.2.3.999").is_none());
        assert!(global_codecs().search_encoder("1.2.3.999").is_none());
        // registering again after cleanup is allowed
        assert!(register_global(name, make));
        assert!(deregister_global(name));
    }
}
