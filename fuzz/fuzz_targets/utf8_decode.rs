#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes; the decoder must never panic and must account
    // for every input byte with at least one output unit per maximal
    // ill-formed subsequence.
    let units = unistr::utf8_to_utf16(data);

    // Re-encoding the decoded text must be valid UTF-8 (replacements and
    // all), and decoding that again must be a fixed point.
    let bytes = unistr::utf16_to_utf8(&units);
    assert!(unistr::is_valid_utf8(&bytes));
    assert_eq!(unistr::utf8_to_utf16(&bytes), units);
});
