#![no_main]
use dcmdata_object::{FileFormat, ReadOptions, WriteOptions};
use libfuzzer_sys::{fuzz_target, Corpus};
use std::error::Error;

fuzz_target!(|data: &[u8]| -> Corpus {
    match fuzz(data) {
        Ok(_) => Corpus::Keep,
        Err(_) => Corpus::Reject,
    }
});

fn fuzz(data: &[u8]) -> Result<(), Box<dyn Error>> {
    // values are kept as read
    let options = ReadOptions::new().permissive(false).accept_odd_length(false);
    let file = FileFormat::read_from(data, &options)?;

    // write it back, skipping files which cannot be represented
    let mut bytes = Vec::new();
    file.write_to(&mut bytes, &WriteOptions::default())?;

    let file2 = FileFormat::read_from(bytes.as_slice(), &options)
        .expect("written file should always be readable");
    assert_eq!(file, file2);

    Ok(())
}
