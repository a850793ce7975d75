//! Implementation of Deflated Explicit VR Little Endian.
//!
//! The data set of this transfer syntax is a raw deflate stream
//! (no zlib or gzip wrapper)
//! which inflates into an _Explicit VR Little Endian_ data set.
//! The file meta group is never deflated.
use flate2::Compression;
use std::io::{Read, Write};

/// Immaterial type representing an adapter for deflated data sets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlateAdapter;

impl FlateAdapter {
    /// Wrap a source of deflated data
    /// into a reader of the inflated data set.
    pub fn adapt_reader<R>(&self, reader: R) -> flate2::read::DeflateDecoder<R>
    where
        R: Read,
    {
        flate2::read::DeflateDecoder::new(reader)
    }

    /// Wrap a destination into a writer
    /// which deflates the data set written to it.
    ///
    /// The writer must be finished
    /// for the end of the deflate stream to be written.
    pub fn adapt_writer<W>(&self, writer: W) -> flate2::write::DeflateEncoder<W>
    where
        W: Write,
    {
        flate2::write::DeflateEncoder::new(writer, Compression::default())
    }
}

#[cfg(test)]
mod tests {
    use super::FlateAdapter;
    use std::io::{Read, Write};

    #[test]
    fn deflated_data_inflates_back() {
        let data: Vec<u8> = b"ISO_IR 100".iter().cycle().take(400).cloned().collect();
        let mut writer = FlateAdapter.adapt_writer(Vec::new());
        writer.write_all(&data).unwrap();
        let deflated = writer.finish().unwrap();
        assert!(deflated.len() < data.len());

        let mut inflated = Vec::new();
        FlateAdapter
            .adapt_reader(&deflated[..])
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, data);
    }
}
