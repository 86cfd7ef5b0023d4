#![no_main]

use asciistream::filter::AsciiFilter;
use asciistream::utils::stream::read_to_end;
use asciistream::{Context, Source};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let size = 1 + data.first().copied().unwrap_or(0) as usize;
    let mut filter = AsciiFilter::from_bytes(data);
    if let Ok(output) = read_to_end(&mut filter, Context::new(size)) {
        assert!(output.is_ascii());
        assert!(std::str::from_utf8(data).is_ok());
    }
    // The condition stays latched.
    let mut buffer = [0u8; 8];
    assert!(filter.read(&mut buffer).is_err());
    assert!(filter.position() <= data.len());
});
