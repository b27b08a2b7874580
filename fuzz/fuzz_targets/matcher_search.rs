#![no_main]
use libfuzzer_sys::fuzz_target;

use unistr::{CaseSensitivity, StringMatcher, Utf16View};

fuzz_target!(|data: &[u8]| {
    // First byte picks the split and the sensitivity; the rest becomes
    // pattern + haystack unit soup (surrogate halves included).
    if data.len() < 2 {
        return;
    }
    let cs = if data[0] & 1 == 0 { CaseSensitivity::Sensitive } else { CaseSensitivity::Insensitive };
    let split = 1 + (data[0] as usize >> 1) % data.len().min(64);

    let units: Vec<u16> = data[1..]
        .chunks(2)
        .map(|c| u16::from_le_bytes([c[0], *c.get(1).unwrap_or(&0)]))
        .collect();
    let split = split.min(units.len());
    let (pattern, haystack) = units.split_at(split);

    let m = StringMatcher::new(Utf16View::new(pattern), cs);
    let found = m.index_in(Utf16View::new(haystack), 0);

    // Any reported match must verify, and must be inside the haystack.
    if found >= 0 {
        let start = found as usize;
        assert!(start + pattern.len() <= haystack.len());
        if cs == CaseSensitivity::Sensitive {
            assert_eq!(&haystack[start..start + pattern.len()], pattern);
        }
    }
});
