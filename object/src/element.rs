//! Data elements holding a primitive value.
//!
//! Values are held as bytes in the byte order of the running machine,
//! without the padding added when encoding.
//! String values are kept as they were read,
//! and trimmed when accessed.

use crate::node::{
    IncompatibleVrSnafu, Ident, ParseValueSnafu, Result, ValueNotLoadedSnafu,
    ValuePositionOutOfRangeSnafu,
};
use crate::tag::DcmTag;
use byteordered::byteorder::{ByteOrder, NativeEndian};
use dcmdata_core::check::{check_value, ValueCheck};
use dcmdata_core::vm::{value_at, vm_from_str, VALUE_SEPARATOR};
use dcmdata_core::{Length, Tag, VmSpec, VR};
use itertools::Itertools;

use smallvec::SmallVec;
use snafu::{ensure, OptionExt};
use std::borrow::Cow;
use std::str::FromStr;

/// An aggregation of one or more values.
pub type C<T> = SmallVec<[T; 2]>;

/// The reading state of an element.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferState {
    /// Only the tag is known.
    TagRead,
    /// The tag and the value length are known,
    /// but the value was not read.
    LengthRead,
    /// The value is available.
    ValueLoaded,
}

/// A data element with a primitive value:
/// strings, binary numbers or other byte and word data.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveElement {
    tag: DcmTag,
    length: Length,
    value: Option<Vec<u8>>,
    state: TransferState,
}

/// A binary number read from a value.
enum Number {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl Number {
    fn cast<T: num_traits::NumCast>(self) -> Option<T> {
        match self {
            Number::Unsigned(v) => <T as num_traits::NumCast>::from(v),
            Number::Signed(v) => <T as num_traits::NumCast>::from(v),
            Number::Float(v) => <T as num_traits::NumCast>::from(v),
        }
    }
}

impl PrimitiveElement {
    /// Create an element with an empty value.
    pub fn new(tag: DcmTag) -> Self {
        PrimitiveElement {
            tag,
            length: Length(0),
            value: Some(Vec::new()),
            state: TransferState::ValueLoaded,
        }
    }

    /// Create an element with an empty value
    /// and the given value representation.
    pub fn new_with_vr(tag: Tag, vr: VR) -> Self {
        Self::new(DcmTag::with_vr(tag, vr))
    }

    /// Create an element holding the given value,
    /// in the byte order of the running machine.
    pub fn with_value(tag: DcmTag, value: Vec<u8>) -> Self {
        let mut e = Self::new(tag);
        e.put_bytes(value);
        e
    }

    /// Create an element of which only the tag was read.
    pub fn from_tag(tag: DcmTag) -> Self {
        PrimitiveElement {
            tag,
            length: Length(0),
            value: None,
            state: TransferState::TagRead,
        }
    }

    /// Record the value length read from the stream.
    pub fn read_length(&mut self, length: Length) {
        self.length = length;
        self.value = None;
        self.state = TransferState::LengthRead;
    }

    /// Provide the value read from the stream,
    /// in the byte order of the running machine.
    pub fn load_value(&mut self, value: Vec<u8>) {
        self.put_bytes(value);
    }

    /// The reading state of this element.
    #[inline]
    pub fn transfer_state(&self) -> TransferState {
        self.state
    }

    /// Whether the value is available.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.state == TransferState::ValueLoaded
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag.tag()
    }

    #[inline]
    pub fn vr(&self) -> VR {
        self.tag.vr()
    }

    /// The resolved tag of this element.
    pub fn dcm_tag(&self) -> &DcmTag {
        &self.tag
    }

    /// Change the value representation.
    /// The value bytes are kept as they are.
    pub fn set_vr(&mut self, vr: VR) {
        self.tag.set_vr(vr);
    }

    /// The length of the value when encoded,
    /// padded to an even number of bytes.
    pub fn length(&self) -> Length {
        let len = match &self.value {
            Some(value) => value.len() as u32,
            None => self.length.0,
        };
        Length(len + (len & 1))
    }

    /// The kind of this element, following its value representation.
    pub fn ident(&self) -> Ident {
        let vr = self.vr();
        if vr.is_text() {
            Ident::Text
        } else if vr.is_string() {
            Ident::ByteString
        } else if vr.is_numeric() {
            Ident::Numeric
        } else if is_overlay_data(self.tag()) {
            Ident::OverlayData
        } else {
            Ident::OtherByteWord
        }
    }

    /// The value bytes, in the byte order of the running machine.
    pub fn value(&self) -> Result<&[u8]> {
        self.value
            .as_deref()
            .context(ValueNotLoadedSnafu { tag: self.tag() })
    }

    /// The value bytes, mutably.
    pub fn value_mut(&mut self) -> Result<&mut Vec<u8>> {
        let tag = self.tag();
        self.value.as_mut().context(ValueNotLoadedSnafu { tag })
    }

    /// Take the value out of the element, leaving it empty.
    pub fn take_value(&mut self) -> Result<Vec<u8>> {
        let value = std::mem::take(self.value_mut()?);
        self.length = Length(0);
        Ok(value)
    }

    /// Replace the value with the given bytes,
    /// in the byte order of the running machine.
    /// Odd values are padded to an even length.
    pub fn put_bytes(&mut self, mut value: Vec<u8>) {
        if value.len() % 2 == 1 {
            value.push(self.vr().padding());
        }
        self.length = Length(value.len() as u32);
        self.value = Some(value);
        self.state = TransferState::ValueLoaded;
    }

    /// The value multiplicity of the current value.
    /// Empty and unloaded values have no values.
    pub fn vm(&self) -> usize {
        let value = match &self.value {
            Some(value) if !value.is_empty() => value,
            _ => return 0,
        };
        let vr = self.vr();
        if vr.is_text() {
            1
        } else if vr.is_string() {
            vm_from_str(&String::from_utf8_lossy(value))
        } else if vr.is_numeric() {
            let width = if vr == VR::AT { 4 } else { vr.value_width() };
            value.len() / width
        } else {
            1
        }
    }

    /// Check the value against the rules of its value representation
    /// and the given multiplicity,
    /// or the multiplicity in the dictionary if none is given.
    pub fn check_value(&self, vm: Option<&VmSpec>) -> ValueCheck {
        let vm = vm.copied().or_else(|| self.tag.vm());
        let value = match &self.value {
            Some(value) => value,
            None => return ValueCheck::Valid,
        };
        let vr = self.vr();
        if vr.is_string() {
            let text = String::from_utf8_lossy(value);
            check_value(vr, trim_padding(&text), vm.as_ref())
        } else {
            let count = self.vm();
            match vm {
                Some(multiplicity) if vr.is_numeric() && count > 0 && !multiplicity.contains(count as u32) => {
                    ValueCheck::MultiplicityViolated { vm: count }
                }
                _ => ValueCheck::Valid,
            }
        }
    }

    /// The whole string value, without trailing padding.
    pub fn get_full_string(&self) -> Result<Cow<'_, str>> {
        self.ensure_string("string")?;
        let value = self.value()?;
        Ok(match String::from_utf8_lossy(value) {
            Cow::Borrowed(s) => Cow::Borrowed(trim_padding(s)),
            Cow::Owned(s) => Cow::Owned(trim_padding(&s).to_string()),
        })
    }

    /// The string value at the given position, trimmed.
    /// Text representations hold a single value.
    pub fn get_string(&self, pos: usize) -> Result<String> {
        let full = self.get_full_string()?;
        let value = if self.vr().is_text() {
            Some(&*full).filter(|_| pos == 0)
        } else {
            value_at(&full, pos).map(str::trim)
        };
        value.map(str::to_string).context(ValuePositionOutOfRangeSnafu {
            tag: self.tag(),
            position: pos,
        })
    }

    /// All string values, trimmed.
    pub fn get_strings(&self) -> Result<C<String>> {
        let full = self.get_full_string()?;
        if full.is_empty() {
            return Ok(C::new());
        }
        if self.vr().is_text() {
            return Ok(std::iter::once(full.into_owned()).collect());
        }
        Ok(full
            .split(VALUE_SEPARATOR)
            .map(|s| s.trim().to_string())
            .collect())
    }

    pub fn get_u16(&self, pos: usize) -> Result<u16> {
        self.get_number(pos, "u16")
    }

    pub fn get_u32(&self, pos: usize) -> Result<u32> {
        self.get_number(pos, "u32")
    }

    pub fn get_i32(&self, pos: usize) -> Result<i32> {
        self.get_number(pos, "i32")
    }

    pub fn get_f32(&self, pos: usize) -> Result<f32> {
        self.get_number(pos, "f32")
    }

    pub fn get_f64(&self, pos: usize) -> Result<f64> {
        self.get_number(pos, "f64")
    }

    /// The attribute tag at the given position of an AT value.
    pub fn get_tag(&self, pos: usize) -> Result<Tag> {
        ensure!(
            self.vr() == VR::AT,
            IncompatibleVrSnafu {
                tag: self.tag(),
                vr: self.vr(),
                requested: "tag",
            }
        );
        let bytes = self.value_unit(pos, 4)?;
        Ok(Tag(
            NativeEndian::read_u16(&bytes[0..2]),
            NativeEndian::read_u16(&bytes[2..4]),
        ))
    }

    /// Replace the value with a single string.
    pub fn put_string(&mut self, value: &str) -> Result<()> {
        self.ensure_string("string")?;
        self.put_bytes(value.as_bytes().to_vec());
        Ok(())
    }

    /// Replace the value with several strings,
    /// separated by backslashes.
    pub fn put_strings<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_string("string")?;
        let joined = values
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .join(&VALUE_SEPARATOR.to_string());
        self.put_bytes(joined.into_bytes());
        Ok(())
    }

    pub fn put_u16(&mut self, value: u16) -> Result<()> {
        self.put_u16s(&[value])
    }

    pub fn put_u16s(&mut self, values: &[u16]) -> Result<()> {
        if self.vr() == VR::IS {
            return self.put_strings(values.iter().map(|v| v.to_string()));
        }
        self.ensure_binary(2, "u16")?;
        let mut bytes = vec![0; values.len() * 2];
        NativeEndian::write_u16_into(values, &mut bytes);
        self.put_bytes(bytes);
        Ok(())
    }

    pub fn put_u32(&mut self, value: u32) -> Result<()> {
        if self.vr() == VR::IS {
            return self.put_string(&value.to_string());
        }
        self.ensure_binary(4, "u32")?;
        let mut bytes = vec![0; 4];
        NativeEndian::write_u32(&mut bytes, value);
        self.put_bytes(bytes);
        Ok(())
    }

    pub fn put_i32(&mut self, value: i32) -> Result<()> {
        if matches!(self.vr(), VR::IS | VR::DS) {
            return self.put_string(&value.to_string());
        }
        self.ensure_binary(4, "i32")?;
        let mut bytes = vec![0; 4];
        NativeEndian::write_i32(&mut bytes, value);
        self.put_bytes(bytes);
        Ok(())
    }

    pub fn put_f32(&mut self, value: f32) -> Result<()> {
        if self.vr() == VR::DS {
            return self.put_string(&value.to_string());
        }
        self.ensure_binary(4, "f32")?;
        let mut bytes = vec![0; 4];
        NativeEndian::write_f32(&mut bytes, value);
        self.put_bytes(bytes);
        Ok(())
    }

    pub fn put_f64(&mut self, value: f64) -> Result<()> {
        if self.vr() == VR::DS {
            return self.put_string(&value.to_string());
        }
        self.ensure_binary(8, "f64")?;
        let mut bytes = vec![0; 8];
        NativeEndian::write_f64(&mut bytes, value);
        self.put_bytes(bytes);
        Ok(())
    }

    /// Replace the value of an AT element with a single tag.
    pub fn put_tag(&mut self, value: Tag) -> Result<()> {
        ensure!(
            self.vr() == VR::AT,
            IncompatibleVrSnafu {
                tag: self.tag(),
                vr: self.vr(),
                requested: "tag",
            }
        );
        let mut bytes = vec![0; 4];
        NativeEndian::write_u16(&mut bytes[0..2], value.group());
        NativeEndian::write_u16(&mut bytes[2..4], value.element());
        self.put_bytes(bytes);
        Ok(())
    }

    fn get_number<T>(&self, pos: usize, requested: &'static str) -> Result<T>
    where
        T: num_traits::NumCast + FromStr,
    {
        let vr = self.vr();
        if matches!(vr, VR::IS | VR::DS) {
            let text = self.get_string(pos)?;
            return text
                .parse::<T>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(<T as num_traits::NumCast>::from))
                .context(ParseValueSnafu {
                    tag: self.tag(),
                    value: text.clone(),
                    requested,
                });
        }
        let number = self.binary_number(pos, requested)?;
        number.cast::<T>().context(ParseValueSnafu {
            tag: self.tag(),
            value: format!("#{}", pos),
            requested,
        })
    }

    fn binary_number(&self, pos: usize, requested: &'static str) -> Result<Number> {
        let vr = self.vr();
        let width = match vr {
            VR::AT | VR::SQ => 0,
            vr if vr.is_string() => 0,
            VR::OB | VR::UN => 1,
            vr => vr.value_width(),
        };
        ensure!(
            width > 0,
            IncompatibleVrSnafu {
                tag: self.tag(),
                vr,
                requested,
            }
        );
        let b = self.value_unit(pos, width)?;
        Ok(match vr {
            VR::OB | VR::UN => Number::Unsigned(u64::from(b[0])),
            VR::US | VR::OW => Number::Unsigned(u64::from(NativeEndian::read_u16(b))),
            VR::SS => Number::Signed(i64::from(NativeEndian::read_i16(b))),
            VR::UL | VR::OL => Number::Unsigned(u64::from(NativeEndian::read_u32(b))),
            VR::SL => Number::Signed(i64::from(NativeEndian::read_i32(b))),
            VR::UV | VR::OV => Number::Unsigned(NativeEndian::read_u64(b)),
            VR::SV => Number::Signed(NativeEndian::read_i64(b)),
            VR::FL | VR::OF => Number::Float(f64::from(NativeEndian::read_f32(b))),
            _ => Number::Float(NativeEndian::read_f64(b)),
        })
    }

    fn value_unit(&self, pos: usize, width: usize) -> Result<&[u8]> {
        let value = self.value()?;
        pos.checked_mul(width)
            .and_then(|start| Some(start..start.checked_add(width)?))
            .and_then(|range| value.get(range))
            .context(ValuePositionOutOfRangeSnafu {
                tag: self.tag(),
                position: pos,
            })
    }

    fn ensure_string(&self, requested: &'static str) -> Result<()> {
        ensure!(
            self.vr().is_string(),
            IncompatibleVrSnafu {
                tag: self.tag(),
                vr: self.vr(),
                requested,
            }
        );
        Ok(())
    }

    fn ensure_binary(&self, width: usize, requested: &'static str) -> Result<()> {
        let vr = self.vr();
        let compatible = vr != VR::AT
            && vr.value_width() == width
            && (vr.is_numeric() || vr.is_other_binary());
        ensure!(
            compatible,
            IncompatibleVrSnafu {
                tag: self.tag(),
                vr,
                requested,
            }
        );
        Ok(())
    }
}

/// Remove the trailing padding of a string value.
pub(crate) fn trim_padding(s: &str) -> &str {
    s.trim_end_matches(|c| c == ' ' || c == '\0')
}

/// Whether the tag is the overlay data of one of the overlay groups.
fn is_overlay_data(tag: Tag) -> bool {
    let group = tag.group();
    (0x6000..=0x60FF).contains(&group) && group % 2 == 0 && tag.element() == 0x3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_core::ErrorKind;
    use dcmdata_dictionary_std::tags;
    use rstest::rstest;

    fn element(tag: Tag, vr: VR) -> PrimitiveElement {
        PrimitiveElement::new_with_vr(tag, vr)
    }

    #[test]
    fn reading_states() {
        let mut e = PrimitiveElement::from_tag(DcmTag::new(tags::PATIENT_NAME));
        assert_eq!(e.transfer_state(), TransferState::TagRead);
        e.read_length(Length(9));
        assert_eq!(e.transfer_state(), TransferState::LengthRead);
        assert_eq!(e.length(), Length(10));
        let err = e.value().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCall);
        assert_eq!(e.get_string(0).unwrap_err().kind(), ErrorKind::IllegalCall);

        e.load_value(b"Doe^John ".to_vec());
        assert!(e.is_loaded());
        assert_eq!(e.get_string(0).unwrap(), "Doe^John");
    }

    #[rstest]
    #[case(VR::CS, "", 0)]
    #[case(VR::CS, "ORIGINAL\\PRIMARY\\AXIAL", 3)]
    #[case(VR::LT, "one\\two", 1)]
    #[case(VR::UR, "http://x/a\\b", 1)]
    fn string_multiplicity(#[case] vr: VR, #[case] value: &str, #[case] vm: usize) {
        let mut e = element(Tag(0x0009, 0x0010), vr);
        e.put_string(value).unwrap();
        assert_eq!(e.vm(), vm);
    }

    #[test]
    fn binary_multiplicity() {
        let mut e = element(tags::ROWS, VR::US);
        e.put_u16s(&[1, 2, 3]).unwrap();
        assert_eq!(e.vm(), 3);
        assert_eq!(e.get_u16(2).unwrap(), 3);
        assert_eq!(e.get_u16(3).unwrap_err().kind(), ErrorKind::IllegalCall);
        // the end of the requested unit lies past usize::MAX
        assert_eq!(
            e.get_u16(usize::MAX / 2).unwrap_err().kind(),
            ErrorKind::IllegalCall
        );
        assert_eq!(e.get_u16(usize::MAX).unwrap_err().kind(), ErrorKind::IllegalCall);

        let mut ob = element(Tag(0x0009, 0x1010), VR::OB);
        ob.put_bytes(vec![0; 10]);
        assert_eq!(ob.vm(), 1);

        let mut at = element(Tag(0x0020, 0x5000), VR::AT);
        at.put_tag(tags::PIXEL_DATA).unwrap();
        assert_eq!(at.vm(), 1);
        assert_eq!(at.get_tag(0).unwrap(), tags::PIXEL_DATA);
    }

    #[test]
    fn strings_are_trimmed() {
        let mut e = element(tags::SPECIFIC_CHARACTER_SET, VR::CS);
        e.put_strings(&["ISO_IR 100", " ISO 2022 IR 87"]).unwrap();
        assert_eq!(e.get_strings().unwrap().as_slice(), ["ISO_IR 100", "ISO 2022 IR 87"]);
        assert_eq!(e.get_string(1).unwrap(), "ISO 2022 IR 87");

        let mut uid = element(tags::SOP_INSTANCE_UID, VR::UI);
        uid.put_bytes(b"1.2.3\0".to_vec());
        assert_eq!(uid.get_full_string().unwrap(), "1.2.3");
        assert_eq!(uid.length(), Length(6));
    }

    #[test]
    fn numbers_convert_between_types() {
        let mut frames = element(tags::NUMBER_OF_FRAMES, VR::IS);
        frames.put_u32(12).unwrap();
        assert_eq!(frames.get_string(0).unwrap(), "12");
        assert_eq!(frames.get_u16(0).unwrap(), 12);

        let mut ds = element(Tag(0x0028, 0x0030), VR::DS);
        ds.put_string("0.5\\2").unwrap();
        assert_eq!(ds.get_f64(0).unwrap(), 0.5);
        assert_eq!(ds.get_i32(1).unwrap(), 2);

        let mut ss = element(Tag(0x0028, 0x0106), VR::SS);
        ss.put_bytes((-5i16).to_ne_bytes().to_vec());
        assert_eq!(ss.get_i32(0).unwrap(), -5);
        // a negative value does not fit
        assert_eq!(ss.get_u16(0).unwrap_err().kind(), ErrorKind::CorruptedData);

        let mut fd = element(Tag(0x0018, 0x9087), VR::FD);
        fd.put_f64(1.25).unwrap();
        assert_eq!(fd.get_f32(0).unwrap(), 1.25);
    }

    #[test]
    fn incompatible_representations_are_refused() {
        let mut cs = element(tags::PHOTOMETRIC_INTERPRETATION, VR::CS);
        assert_eq!(cs.put_u16(1).unwrap_err().kind(), ErrorKind::InvalidVR);
        let mut us = element(tags::ROWS, VR::US);
        assert_eq!(us.put_string("1").unwrap_err().kind(), ErrorKind::InvalidVR);
        assert_eq!(us.put_u32(1).unwrap_err().kind(), ErrorKind::InvalidVR);
        assert_eq!(us.get_tag(0).unwrap_err().kind(), ErrorKind::InvalidVR);
    }

    #[test]
    fn value_checks() {
        let mut cs = element(tags::MODALITY, VR::CS);
        cs.put_string("CT").unwrap();
        assert_eq!(cs.check_value(None), ValueCheck::Valid);
        cs.put_string("ct").unwrap();
        assert_eq!(
            cs.check_value(None),
            ValueCheck::InvalidCharacter { value: 0, position: 0 }
        );
        cs.put_string("CT\\MR").unwrap();
        // the dictionary allows one value
        assert_eq!(cs.check_value(None), ValueCheck::MultiplicityViolated { vm: 2 });
        let multiplicity: VmSpec = "1-n".parse().unwrap();
        assert_eq!(cs.check_value(Some(&multiplicity)), ValueCheck::Valid);

        let mut uid = element(tags::SOP_INSTANCE_UID, VR::UI);
        uid.put_string("1.2.840.10008\0").unwrap();
        assert!(uid.check_value(None).is_valid());

        let mut us = element(tags::ROWS, VR::US);
        us.put_u16s(&[1, 2]).unwrap();
        assert_eq!(us.check_value(None), ValueCheck::MultiplicityViolated { vm: 2 });
    }

    #[test]
    fn kinds_follow_the_representation() {
        assert_eq!(element(tags::PATIENT_NAME, VR::PN).ident(), Ident::ByteString);
        assert_eq!(element(Tag(0x0020, 0x4000), VR::LT).ident(), Ident::Text);
        assert_eq!(element(tags::ROWS, VR::US).ident(), Ident::Numeric);
        assert_eq!(element(Tag(0x0020, 0x5000), VR::AT).ident(), Ident::Numeric);
        assert_eq!(element(Tag(0x6002, 0x3000), VR::OW).ident(), Ident::OverlayData);
        assert_eq!(element(Tag(0x0009, 0x1010), VR::UN).ident(), Ident::OtherByteWord);
    }
}
