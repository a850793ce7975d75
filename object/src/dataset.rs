//! The root data set and its encoding in a stream.

use crate::element::PrimitiveElement;
use crate::item::Item;
use crate::node::{DcmObject, EncodingType, Ident};
use crate::pixel::{self, ApplyUpdateSnafu, OffsetList, PixelData, PixelItem, PixelSequence};
use crate::sequence::Sequence;
use crate::tag::DcmTag;
#[cfg(feature = "deflate")]
use crate::FinishDeflateSnafu;
use crate::{
    CreateParserSnafu, CreatePrinterSnafu, DecodeElementSnafu, ElementValueSnafu,
    InsertElementSnafu, MissingRepresentationSnafu, OddLengthSnafu, PeekSourceSnafu,
    PrintDataSetSnafu, ReadError, ReadUnsupportedTransferSyntaxSnafu, UndefinedLengthSnafu,
    UnexpectedItemSnafu, UnexpectedTagSnafu, ValueTooLongSnafu, WriteError,
    WriteUnsupportedTransferSyntaxSnafu,
};
use dcmdata_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmdata_core::{config, Tag, VR};
use dcmdata_dictionary_std::tags;
use dcmdata_encoding::adapters::RepresentationParameter;
use dcmdata_encoding::decode::DecodeFrom;
use dcmdata_encoding::encode::EncodeTo;
use dcmdata_encoding::TransferSyntax;
use dcmdata_parser::stateful::decode::StatefulDecoder;
use dcmdata_parser::stateful::encode::StatefulEncoder;
#[cfg(feature = "deflate")]
use dcmdata_encoding::{decode::ExplicitVRDecoder, encode::ExplicitVREncoder, Endianness};
#[cfg(feature = "deflate")]
use dcmdata_transfer_syntax_registry::deflate::FlateAdapter;
use dcmdata_transfer_syntax_registry::{global_codecs, CodecList};
use snafu::{ensure, OptionExt, ResultExt};
use std::convert::TryFrom;
use std::io::{BufRead, BufReader, Read, Write};
use std::ops::{Deref, DerefMut};

type ReadResult<T> = std::result::Result<T, ReadError>;
type WriteResult<T> = std::result::Result<T, WriteError>;

/// Options for reading a data set.
///
/// Options left unset follow the global configuration
/// in [`dcmdata_core::config`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    permissive: Option<bool>,
    accept_odd_length: Option<bool>,
    max_value_length: Option<u32>,
    read_until: Option<Tag>,
}

impl ReadOptions {
    pub fn new() -> Self {
        ReadOptions::default()
    }

    /// Whether to repair common defects while reading,
    /// such as whitespace in unique identifiers.
    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = Some(permissive);
        self
    }

    /// Whether to accept elements with an odd value length.
    pub fn accept_odd_length(mut self, accept: bool) -> Self {
        self.accept_odd_length = Some(accept);
        self
    }

    /// Leave the values of elements longer than the given length unloaded.
    pub fn max_value_length(mut self, len: u32) -> Self {
        self.max_value_length = Some(len);
        self
    }

    /// Stop reading the data set at the first element
    /// with a tag greater than or equal to the given one.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }
}

/// Options for writing a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    sequence_encoding: EncodingType,
    write_offset_table: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            sequence_encoding: EncodingType::ExplicitLength,
            write_offset_table: true,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        WriteOptions::default()
    }

    /// How to encode the length of sequences and items.
    pub fn sequence_encoding(mut self, encoding: EncodingType) -> Self {
        self.sequence_encoding = encoding;
        self
    }

    /// Whether to write the basic offset table of encapsulated pixel data,
    /// recomputed from the fragments.
    /// If false, an empty table is written.
    pub fn write_offset_table(mut self, write: bool) -> Self {
        self.write_offset_table = write;
        self
    }

    pub fn encoding(&self) -> EncodingType {
        self.sequence_encoding
    }
}

/// The root data set of a DICOM object.
///
/// Dereferences to the [`Item`] holding its elements.
#[derive(Debug, Clone)]
pub struct Dataset {
    item: Item,
    transfer_syntax: Option<String>,
    partial: bool,
}

impl PartialEq for Dataset {
    /// Data sets are equal if they hold equal elements,
    /// whichever transfer syntax they were read in.
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new()
    }
}

impl Deref for Dataset {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.item
    }
}

impl DerefMut for Dataset {
    fn deref_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl From<Item> for Dataset {
    fn from(mut item: Item) -> Self {
        item.set_ident(Ident::Dataset);
        Dataset {
            item,
            transfer_syntax: None,
            partial: false,
        }
    }
}

impl Dataset {
    /// Create an empty data set.
    pub fn new() -> Self {
        Dataset {
            item: Item::with_ident(Ident::Dataset),
            transfer_syntax: None,
            partial: false,
        }
    }

    /// The UID of the transfer syntax the data set was read in.
    pub fn transfer_syntax(&self) -> Option<&str> {
        self.transfer_syntax.as_deref()
    }

    /// Whether reading stopped before the end of the data set.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn into_item(self) -> Item {
        self.item
    }

    /// Read a data set encoded in the given transfer syntax
    /// until the end of the source.
    pub fn read_from<R>(from: R, ts: &TransferSyntax, options: &ReadOptions) -> ReadResult<Self>
    where
        R: Read,
    {
        Dataset::read_buffered(BufReader::new(from), ts, options, 0)
    }

    /// Read a data set from a buffered source,
    /// which starts at the given position of the stream.
    pub(crate) fn read_buffered<S>(
        from: S,
        ts: &TransferSyntax,
        options: &ReadOptions,
        position: u64,
    ) -> ReadResult<Self>
    where
        S: BufRead,
    {
        if ts.is_deflated() {
            return Dataset::read_deflated(from, ts, options);
        }
        ensure!(
            !ts.unsupported(),
            ReadUnsupportedTransferSyntaxSnafu { uid: ts.uid() }
        );
        let dec = StatefulDecoder::new_with(from, ts)
            .context(CreateParserSnafu)?
            .with_position(position);
        Dataset::read_with(dec, ts, options)
    }

    /// Inflate the source and read the _Explicit VR Little Endian_ data set in it.
    /// Positions are counted in the inflated stream.
    #[cfg(feature = "deflate")]
    fn read_deflated<S>(from: S, ts: &TransferSyntax, options: &ReadOptions) -> ReadResult<Self>
    where
        S: BufRead,
    {
        let inflated = BufReader::new(FlateAdapter.adapt_reader(from));
        let dec = StatefulDecoder::new(
            inflated,
            ExplicitVRDecoder::little_endian(),
            Endianness::Little,
        );
        Dataset::read_with(dec, ts, options)
    }

    #[cfg(not(feature = "deflate"))]
    fn read_deflated<S>(_from: S, ts: &TransferSyntax, _options: &ReadOptions) -> ReadResult<Self>
    where
        S: BufRead,
    {
        ReadUnsupportedTransferSyntaxSnafu { uid: ts.uid() }.fail()
    }

    fn read_with<D, S>(
        dec: StatefulDecoder<D, S>,
        ts: &TransferSyntax,
        options: &ReadOptions,
    ) -> ReadResult<Self>
    where
        D: DecodeFrom<S>,
        S: BufRead,
    {
        let permissive = options
            .permissive
            .unwrap_or_else(config::automatic_data_correction);
        let mut reader = DatasetReader {
            dec,
            ts,
            permissive,
            accept_odd_length: options
                .accept_odd_length
                .unwrap_or_else(config::accept_odd_length),
            max_value_length: options.max_value_length,
            read_until: options.read_until,
            stopped: false,
        };
        let mut dataset = Dataset::new();
        reader.read_content(&mut dataset.item, None, true)?;
        dataset.transfer_syntax = Some(ts.uid().to_string());
        dataset.partial = reader.stopped;
        tracing::debug!(
            "Read data set of {} elements in {}",
            dataset.item.card(),
            ts.name()
        );
        Ok(dataset)
    }

    /// Write the data set in the given transfer syntax.
    ///
    /// Pixel data must already have a representation
    /// in the transfer syntax (see [`Dataset::choose_representation`]).
    pub fn write_to<W>(&self, to: W, ts: &TransferSyntax, options: &WriteOptions) -> WriteResult<()>
    where
        W: Write,
    {
        if ts.is_deflated() {
            return self.write_deflated(to, ts, options);
        }
        ensure!(
            !ts.unsupported(),
            WriteUnsupportedTransferSyntaxSnafu { uid: ts.uid() }
        );
        let enc = StatefulEncoder::from_transfer_syntax(to, ts).context(CreatePrinterSnafu)?;
        self.write_with(enc, ts, options)
    }

    /// Write the data set in _Explicit VR Little Endian_ through a deflate stream.
    #[cfg(feature = "deflate")]
    fn write_deflated<W>(&self, to: W, ts: &TransferSyntax, options: &WriteOptions) -> WriteResult<()>
    where
        W: Write,
    {
        let mut deflated = FlateAdapter.adapt_writer(to);
        let enc = StatefulEncoder::new(
            &mut deflated,
            ExplicitVREncoder::little_endian(),
            Endianness::Little,
        );
        self.write_with(enc, ts, options)?;
        deflated.finish().context(FinishDeflateSnafu)?;
        Ok(())
    }

    #[cfg(not(feature = "deflate"))]
    fn write_deflated<W>(&self, _to: W, ts: &TransferSyntax, _options: &WriteOptions) -> WriteResult<()>
    where
        W: Write,
    {
        WriteUnsupportedTransferSyntaxSnafu { uid: ts.uid() }.fail()
    }

    fn write_with<E, W>(
        &self,
        enc: StatefulEncoder<E, W>,
        ts: &TransferSyntax,
        options: &WriteOptions,
    ) -> WriteResult<()>
    where
        E: EncodeTo<W>,
        W: Write,
    {
        let mut writer = DatasetWriter {
            enc,
            ts,
            options: *options,
        };
        writer.write_content(&self.item)?;
        writer.enc.flush().context(PrintDataSetSnafu)?;
        Ok(())
    }

    /// Whether the data set can be written in the given transfer syntax
    /// without converting pixel data.
    pub fn can_write_xfer(&self, ts: &TransferSyntax) -> bool {
        match self.item.get(tags::PIXEL_DATA) {
            Some(DcmObject::PixelData(pixel)) => pixel.can_write_xfer(ts),
            Some(_) => !ts.is_encapsulated(),
            None => true,
        }
    }

    /// Whether pixel data has a representation in the given transfer syntax.
    pub fn has_representation(
        &self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
    ) -> bool {
        match self.item.get(tags::PIXEL_DATA) {
            Some(DcmObject::PixelData(pixel)) => pixel.has_representation(uid, param),
            _ => true,
        }
    }

    /// Convert pixel data to the given transfer syntax
    /// with the global codec list,
    /// and update the image attributes accordingly.
    pub fn choose_representation(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
    ) -> pixel::Result<()> {
        let codecs = global_codecs();
        self.choose_representation_with(uid, param, &codecs)
    }

    /// Convert pixel data to the given transfer syntax
    /// with the given codec list,
    /// and update the image attributes accordingly.
    ///
    /// A data set without pixel data is left unchanged.
    pub fn choose_representation_with(
        &mut self,
        uid: &str,
        param: Option<&dyn RepresentationParameter>,
        codecs: &CodecList,
    ) -> pixel::Result<()> {
        let mut pixel = match self.item.remove(tags::PIXEL_DATA) {
            Ok(DcmObject::PixelData(pixel)) => pixel,
            Ok(other) => {
                self.item.put_node(other);
                return pixel::RepresentationNotFoundSnafu { uid: "native" }.fail();
            }
            Err(_) => return Ok(()),
        };
        let result = pixel.choose_representation(uid, param, codecs, &self.item);
        self.item.put_pixel_data(pixel);
        for update in result? {
            self.item.apply_update(&update).context(ApplyUpdateSnafu)?;
        }
        Ok(())
    }

    /// Keep only the current pixel data representation.
    pub fn remove_all_but_current_representations(&mut self) {
        if let Some(DcmObject::PixelData(pixel)) = self.item.get_mut(tags::PIXEL_DATA) {
            pixel.remove_all_but_current();
        }
    }

    /// Keep only the original pixel data representation.
    pub fn remove_all_but_original_representations(&mut self) {
        if let Some(DcmObject::PixelData(pixel)) = self.item.get_mut(tags::PIXEL_DATA) {
            pixel.remove_all_but_original();
        }
    }
}

struct DatasetReader<'t, D, S> {
    dec: StatefulDecoder<D, S>,
    ts: &'t TransferSyntax,
    permissive: bool,
    accept_odd_length: bool,
    max_value_length: Option<u32>,
    read_until: Option<Tag>,
    stopped: bool,
}

impl<D, S> DatasetReader<'_, D, S>
where
    D: DecodeFrom<S>,
    S: BufRead,
{
    /// Read elements into `item`
    /// until the defined end position,
    /// the item delimiter of an item of undefined length,
    /// or the end of the source at the top level.
    fn read_content(&mut self, item: &mut Item, end: Option<u64>, top: bool) -> ReadResult<()> {
        loop {
            match end {
                Some(end) if self.dec.position() >= end => break,
                None if top => {
                    let buf = self.dec.inner_mut().fill_buf().context(PeekSourceSnafu)?;
                    if buf.is_empty() {
                        break;
                    }
                }
                _ => {}
            }
            let position = self.dec.position();
            let header = self.dec.decode_header().context(DecodeElementSnafu)?;
            let tag = header.tag;

            if tag == Tag::ITEM_DELIMITATION {
                if end.is_none() && !top {
                    break;
                }
                ensure!(self.permissive, UnexpectedTagSnafu { tag, position });
                tracing::warn!("Ignoring stray item delimiter at position {}", position);
                continue;
            }
            if tag == Tag::SEQUENCE_DELIMITATION && top && self.permissive {
                tracing::warn!("Ignoring stray sequence delimiter at position {}", position);
                continue;
            }
            ensure!(!tag.is_item_group(), UnexpectedTagSnafu { tag, position });

            if top {
                if let Some(until) = self.read_until {
                    if tag >= until {
                        self.stopped = true;
                        break;
                    }
                }
            }

            let obj = self.read_element(header)?;
            match item.insert(obj, false) {
                Ok(_) => {}
                Err(crate::node::Error::DoubledTag { .. }) => {
                    tracing::warn!("Element {} found twice, ignoring the second one", tag);
                }
                Err(e) => return Err(e).context(InsertElementSnafu),
            }
        }
        Ok(())
    }

    fn read_element(&mut self, header: DataElementHeader) -> ReadResult<DcmObject> {
        let tag = header.tag;
        if tag == tags::PIXEL_DATA && header.len.is_undefined() {
            return self.read_pixel_sequence(header);
        }
        if header.vr == VR::SQ || (header.vr == VR::UN && header.len.is_undefined()) {
            return Ok(DcmObject::Sequence(self.read_sequence(header)?));
        }

        let position = self.dec.position();
        let len = header
            .len
            .get()
            .context(UndefinedLengthSnafu { tag, position })?;
        if len % 2 == 1 {
            ensure!(self.accept_odd_length, OddLengthSnafu { tag, len });
            tracing::debug!("Element {} has odd length {}", tag, len);
        }

        let dcm_tag = DcmTag::with_vr(tag, header.vr);
        if let Some(max) = self.max_value_length {
            if len > max {
                self.dec.skip_value(&header).context(DecodeElementSnafu)?;
                let mut element = PrimitiveElement::from_tag(dcm_tag);
                element.read_length(header.len);
                return Ok(element.into());
            }
        }

        let mut value = self.dec.read_value(&header).context(DecodeElementSnafu)?;
        if header.vr == VR::UI && self.permissive {
            value = correct_uid(tag, value);
        }
        if tag == tags::PIXEL_DATA {
            return Ok(PixelData::from_native(header.vr, value).into());
        }
        Ok(PrimitiveElement::with_value(dcm_tag, value).into())
    }

    fn read_sequence(&mut self, header: DataElementHeader) -> ReadResult<Sequence> {
        if header.vr != VR::UN {
            return self.read_items(header);
        }
        // items of unknown VR are always in Implicit VR Little Endian
        tracing::debug!("Reading element {} of unknown VR as a sequence", header.tag);
        self.dec.enter_implicit_vr_le();
        let seq = self.read_items(header);
        self.dec.leave_implicit_vr_le();
        seq
    }

    fn read_items(&mut self, header: DataElementHeader) -> ReadResult<Sequence> {
        let mut seq = Sequence::new(header.tag);
        let end = header
            .len
            .get()
            .map(|len| self.dec.position() + u64::from(len));
        loop {
            if let Some(end) = end {
                if self.dec.position() >= end {
                    break;
                }
            }
            let position = self.dec.position();
            match self.dec.decode_item_header().context(DecodeElementSnafu)? {
                SequenceItemHeader::Item { len } => {
                    let mut item = if header.tag == tags::DIRECTORY_RECORD_SEQUENCE {
                        Item::directory_record()
                    } else {
                        Item::new()
                    };
                    item.set_offset(position);
                    let item_end = len.get().map(|len| self.dec.position() + u64::from(len));
                    self.read_content(&mut item, item_end, false)?;
                    seq.append(item);
                }
                SequenceItemHeader::SequenceDelimiter => {
                    if end.is_some() {
                        tracing::warn!(
                            "Sequence delimiter in sequence {} of defined length",
                            header.tag
                        );
                    }
                    break;
                }
                SequenceItemHeader::ItemDelimiter => {
                    ensure!(
                        self.permissive,
                        UnexpectedTagSnafu {
                            tag: Tag::ITEM_DELIMITATION,
                            position
                        }
                    );
                    tracing::warn!("Ignoring stray item delimiter at position {}", position);
                }
            }
        }
        Ok(seq)
    }

    fn read_pixel_sequence(&mut self, header: DataElementHeader) -> ReadResult<DcmObject> {
        let mut seq = PixelSequence::new();
        let mut offset_table = None;
        loop {
            let position = self.dec.position();
            match self.dec.decode_item_header().context(DecodeElementSnafu)? {
                SequenceItemHeader::Item { len } => {
                    let len = len.get().context(UndefinedLengthSnafu {
                        tag: Tag::ITEM,
                        position,
                    })?;
                    let bytes = self.dec.read_raw_bytes(len).context(DecodeElementSnafu)?;
                    if offset_table.is_none() {
                        offset_table = Some(OffsetList::from_bytes(&bytes, self.dec.byte_order()));
                    } else {
                        seq.append(PixelItem::new(bytes));
                    }
                }
                SequenceItemHeader::SequenceDelimiter => break,
                SequenceItemHeader::ItemDelimiter => {
                    return UnexpectedTagSnafu {
                        tag: Tag::ITEM_DELIMITATION,
                        position,
                    }
                    .fail();
                }
            }
        }
        seq.set_offset_table(offset_table.unwrap_or_default());
        tracing::trace!(
            "Read {} fragments of pixel data {}",
            seq.card(),
            header.tag
        );
        Ok(PixelData::from_encapsulated(self.ts.uid(), None, seq).into())
    }
}

/// Remove whitespace and trailing padding from a unique identifier.
fn correct_uid(tag: Tag, value: Vec<u8>) -> Vec<u8> {
    let mut end = value.len();
    while end > 0 && value[end - 1] == 0 {
        end -= 1;
    }
    let unpadded = &value[..end];
    let mut corrected: Vec<u8> = if unpadded.iter().any(u8::is_ascii_whitespace) {
        let corrected: Vec<u8> = unpadded
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        tracing::warn!(
            "Removed whitespace from unique identifier {}: {:?}",
            tag,
            String::from_utf8_lossy(&corrected)
        );
        corrected
    } else {
        unpadded.to_vec()
    };
    if corrected.len() % 2 == 1 {
        corrected.push(0);
    }
    corrected
}

struct DatasetWriter<'t, E, W> {
    enc: StatefulEncoder<E, W>,
    ts: &'t TransferSyntax,
    options: WriteOptions,
}

impl<E, W> DatasetWriter<'_, E, W>
where
    E: EncodeTo<W>,
    W: Write,
{
    fn write_content(&mut self, item: &Item) -> WriteResult<()> {
        for obj in item.iter() {
            self.write_node(obj)?;
        }
        Ok(())
    }

    fn write_node(&mut self, obj: &DcmObject) -> WriteResult<()> {
        match obj {
            DcmObject::Element(e) => {
                let value = e.value().context(ElementValueSnafu)?;
                let len = length32(value.len() as u64, e.tag())?;
                let header = DataElementHeader::new(e.tag(), e.vr(), Length(len));
                self.enc
                    .encode_primitive_element(&header, value)
                    .context(PrintDataSetSnafu)
            }
            DcmObject::Sequence(seq) => self.write_sequence(seq),
            DcmObject::PixelData(pixel) => self.write_pixel_data(pixel),
            DcmObject::Item(_) => UnexpectedItemSnafu.fail(),
        }
    }

    fn write_sequence(&mut self, seq: &Sequence) -> WriteResult<()> {
        let encoding = self.options.sequence_encoding;
        let undefined = encoding == EncodingType::UndefinedLength;
        let len = if undefined {
            Length::UNDEFINED
        } else {
            Length(length32(seq.calc_value_length(self.ts, encoding), seq.tag())?)
        };
        self.enc
            .encode_element_header(DataElementHeader::new(seq.tag(), VR::SQ, len))
            .context(PrintDataSetSnafu)?;
        for item in seq.items() {
            let len = if undefined {
                Length::UNDEFINED.0
            } else {
                length32(item.calc_length(self.ts, encoding), seq.tag())?
            };
            self.enc.encode_item_header(len).context(PrintDataSetSnafu)?;
            self.write_content(item)?;
            if undefined {
                self.enc.encode_item_delimiter().context(PrintDataSetSnafu)?;
            }
        }
        if undefined {
            self.enc
                .encode_sequence_delimiter()
                .context(PrintDataSetSnafu)?;
        }
        Ok(())
    }

    fn write_pixel_data(&mut self, pixel: &PixelData) -> WriteResult<()> {
        let uid = self.ts.uid();
        if !self.ts.is_encapsulated() {
            let native = pixel
                .native_value()
                .context(MissingRepresentationSnafu { uid })?;
            let len = length32(native.len() as u64, pixel.tag())?;
            let header = DataElementHeader::new(pixel.tag(), pixel.native_vr(), Length(len));
            return self
                .enc
                .encode_primitive_element(&header, native)
                .context(PrintDataSetSnafu);
        }

        let rep = pixel
            .representation_for(uid)
            .context(MissingRepresentationSnafu { uid })?;
        let seq = rep.sequence();
        let table = if self.options.write_offset_table {
            seq.computed_offset_table()
        } else {
            OffsetList::new()
        };
        self.enc
            .encode_element_header(DataElementHeader::new(
                pixel.tag(),
                VR::OB,
                Length::UNDEFINED,
            ))
            .context(PrintDataSetSnafu)?;
        self.enc
            .encode_offset_table(&table)
            .context(PrintDataSetSnafu)?;
        for fragment in seq.fragments() {
            let len = length32(u64::from(fragment.length().0), pixel.tag())?;
            self.enc.encode_item_header(len).context(PrintDataSetSnafu)?;
            self.enc
                .write_bytes(fragment.data())
                .context(PrintDataSetSnafu)?;
        }
        self.enc
            .encode_sequence_delimiter()
            .context(PrintDataSetSnafu)
    }
}

/// Fit a length into a 32-bit length field,
/// which cannot hold the undefined length value.
fn length32(len: u64, tag: Tag) -> WriteResult<u32> {
    u32::try_from(len)
        .ok()
        .filter(|len| *len != Length::UNDEFINED.0)
        .context(ValueTooLongSnafu { tag })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmdata_core::error::ErrorKind;
    use dcmdata_transfer_syntax_registry::entries;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new();
        dataset
            .put_str(tags::SOP_INSTANCE_UID, VR::UI, "1.2.3.4")
            .unwrap();
        dataset.put_str(tags::PATIENT_ID, VR::LO, "ID1").unwrap();
        dataset
    }

    #[test]
    fn explicit_little_endian_bytes() {
        let mut out = Vec::new();
        sample()
            .write_to(&mut out, &entries::EXPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())
            .unwrap();
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x08, 0x00, 0x18, 0x00, b'U', b'I', 0x08, 0x00,
            b'1', b'.', b'2', b'.', b'3', b'.', b'4', 0x00,
            0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x04, 0x00,
            b'I', b'D', b'1', b' ',
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn read_back_in_implicit_vr() {
        let ts = entries::IMPLICIT_VR_LITTLE_ENDIAN;
        let mut out = Vec::new();
        sample()
            .write_to(&mut out, &ts, &WriteOptions::default())
            .unwrap();
        assert_eq!(out.len() as u64, sample().calc_length(&ts, EncodingType::ExplicitLength));
        let read = Dataset::read_from(&out[..], &ts, &ReadOptions::new()).unwrap();
        assert_eq!(read, sample());
        assert_eq!(read.transfer_syntax(), Some(ts.uid()));
        assert_eq!(read.ident(), Ident::Dataset);
    }

    #[test]
    fn uid_whitespace_is_corrected_when_permissive() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        #[rustfmt::skip]
        let data: &[u8] = &[
            0x08, 0x00, 0x18, 0x00, b'U', b'I', 0x08, 0x00,
            b'1', b'.', b'2', b' ', b'.', b'3', b' ', 0x00,
        ];
        let read = Dataset::read_from(data, &ts, &ReadOptions::new().permissive(true)).unwrap();
        assert_eq!(read.get_string(tags::SOP_INSTANCE_UID).unwrap(), "1.2.3");

        let strict = Dataset::read_from(data, &ts, &ReadOptions::new().permissive(false)).unwrap();
        let element = strict.primitive(tags::SOP_INSTANCE_UID).unwrap();
        assert_eq!(element.value().unwrap(), b"1.2 .3 \0");
    }

    #[test]
    fn odd_lengths_can_be_refused() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let data: &[u8] = &[0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x03, 0x00, b'I', b'D', b'1'];
        let err = Dataset::read_from(data, &ts, &ReadOptions::new().accept_odd_length(false))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptedData);
        let read = Dataset::read_from(data, &ts, &ReadOptions::new().accept_odd_length(true))
            .unwrap();
        assert_eq!(read.get_string(tags::PATIENT_ID).unwrap(), "ID1");
    }

    #[test]
    fn long_values_are_left_unloaded() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut out = Vec::new();
        sample()
            .write_to(&mut out, &ts, &WriteOptions::default())
            .unwrap();
        let read = Dataset::read_from(&out[..], &ts, &ReadOptions::new().max_value_length(6))
            .unwrap();
        let uid = read.primitive(tags::SOP_INSTANCE_UID).unwrap();
        assert!(!uid.is_loaded());
        assert_eq!(uid.length(), Length(8));
        assert_eq!(read.get_string(tags::PATIENT_ID).unwrap(), "ID1");

        // unloaded values cannot be written
        let err = read
            .write_to(Vec::new(), &ts, &WriteOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCall);
    }

    #[test]
    fn read_until_stops_early() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut out = Vec::new();
        sample()
            .write_to(&mut out, &ts, &WriteOptions::default())
            .unwrap();
        let read = Dataset::read_from(&out[..], &ts, &ReadOptions::new().read_until(tags::PATIENT_ID))
            .unwrap();
        assert!(read.is_partial());
        assert_eq!(read.card(), 1);
    }

    #[test]
    fn unknown_vr_of_undefined_length_is_an_implicit_sequence() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        #[rustfmt::skip]
        let data: &[u8] = &[
            // (0009,1010) UN, undefined length
            0x09, 0x00, 0x10, 0x10, b'U', b'N', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            // item, undefined length
            0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
            // (0010,0020) in implicit VR, 4 bytes
            0x10, 0x00, 0x20, 0x00, 0x04, 0x00, 0x00, 0x00, b'I', b'D', b'1', b' ',
            // item delimiter, sequence delimiter
            0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00,
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
            // (0010,0040) CS, back in explicit VR
            0x10, 0x00, 0x40, 0x00, b'C', b'S', 0x02, 0x00, b'M', b' ',
        ];
        let read = Dataset::read_from(data, &ts, &ReadOptions::new()).unwrap();
        let seq = read
            .get(Tag(0x0009, 0x1010))
            .and_then(DcmObject::as_sequence)
            .unwrap();
        assert_eq!(seq.card(), 1);
        let item = seq.item(0).unwrap();
        assert_eq!(item.primitive(tags::PATIENT_ID).unwrap().vr(), VR::LO);
        assert_eq!(item.get_string(tags::PATIENT_ID).unwrap(), "ID1");
        assert_eq!(read.get_string(tags::PATIENT_SEX).unwrap(), "M");
    }

    #[cfg(feature = "deflate")]
    #[test]
    fn deflated_data_set_round_trip() {
        let ts = entries::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN;
        let mut dataset = sample();
        let comments = "CONTRAST PHASE ".repeat(20);
        dataset
            .put_str(tags::IMAGE_COMMENTS, VR::LT, comments.trim_end())
            .unwrap();

        let mut deflated = Vec::new();
        dataset
            .write_to(&mut deflated, &ts, &WriteOptions::default())
            .unwrap();
        let mut plain = Vec::new();
        dataset
            .write_to(&mut plain, &entries::EXPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())
            .unwrap();
        assert!(deflated.len() < plain.len());

        // the stream inflates into the explicit VR little endian encoding
        let mut inflated = Vec::new();
        FlateAdapter
            .adapt_reader(&deflated[..])
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, plain);

        let read = Dataset::read_from(&deflated[..], &ts, &ReadOptions::new()).unwrap();
        assert_eq!(read, dataset);
        assert_eq!(read.transfer_syntax(), Some(ts.uid()));
        assert_eq!(read.get_string(tags::PATIENT_ID).unwrap(), "ID1");
    }

    #[test]
    fn truncated_input_fails() {
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let data: &[u8] = &[0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x04, 0x00, b'I', b'D'];
        let err = Dataset::read_from(data, &ts, &ReadOptions::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndOfStream);
    }

    #[test]
    fn encapsulated_pixel_data_round_trip() {
        let ts = entries::RLE_LOSSLESS;
        let mut seq = PixelSequence::new();
        seq.append_frame(PixelItem::new(vec![1, 2, 3]));
        seq.append_frame(PixelItem::new(vec![4, 5, 6, 7]));
        let mut dataset = sample();
        dataset.put_pixel_data(PixelData::from_encapsulated(ts.uid(), None, seq));

        let mut out = Vec::new();
        dataset
            .write_to(&mut out, &ts, &WriteOptions::default())
            .unwrap();
        assert_eq!(
            out.len() as u64,
            dataset.calc_length(&ts, EncodingType::ExplicitLength)
        );
        let read = Dataset::read_from(&out[..], &ts, &ReadOptions::new()).unwrap();
        let pixel = read.get(tags::PIXEL_DATA).and_then(DcmObject::as_pixel_data).unwrap();
        let seq = pixel.current_representation().unwrap().sequence();
        assert_eq!(&**seq.offset_table(), &[0, 12]);
        assert_eq!(seq.fragment(0).unwrap().data(), &[1, 2, 3, 0]);
        assert_eq!(seq.fragment(1).unwrap().data(), &[4, 5, 6, 7]);

        // native transfer syntaxes need a native representation
        let err = dataset
            .write_to(Vec::new(), &entries::EXPLICIT_VR_LITTLE_ENDIAN, &WriteOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RepresentationNotFound);
        assert!(!dataset.can_write_xfer(&entries::EXPLICIT_VR_LITTLE_ENDIAN));
    }
}
