#![no_main]
use libfuzzer_sys::fuzz_target;

use unistr::{normalize, NormalizationForm, UnicodeVersion, Utf16View};

fuzz_target!(|data: &[u8]| {
    let units: Vec<u16> = data
        .chunks(2)
        .map(|c| u16::from_le_bytes([c[0], *c.get(1).unwrap_or(&0)]))
        .collect();

    for form in [
        NormalizationForm::D,
        NormalizationForm::C,
        NormalizationForm::KD,
        NormalizationForm::KC,
    ] {
        let once = normalize(Utf16View::new(&units), form, UnicodeVersion::CURRENT);
        let twice = normalize(once.view(), form, UnicodeVersion::CURRENT);
        assert_eq!(once, twice);
    }
});
