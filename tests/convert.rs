// Integration tests: encoding conversions and validity scans.

use unistr::{
    is_valid_utf16, is_valid_utf8, ucs4_to_utf16, utf16_bytes_to_utf16, utf16_to_ucs4,
    utf16_to_utf8, utf8_to_utf16, UString,
};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn utf8_round_trip_multilingual() {
    for text in ["", "ascii", "héllo wörld", "Ελληνικά", "日本語テキスト", "🎉🎊", "mix: aé€😀z"] {
        let units = u(text);
        let bytes = utf16_to_utf8(&units);
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(utf8_to_utf16(&bytes), units, "{text}");
    }
}

#[test]
fn utf8_maximal_subsequence_policy() {
    // One replacement per maximal ill-formed subsequence.
    assert_eq!(utf8_to_utf16(&[0xE2, 0x82]), [0xFFFD]);
    assert_eq!(utf8_to_utf16(&[0xE2, 0x82, 0xE2, 0x82, 0xAC]), [0xFFFD, 0x20AC]);
    assert_eq!(utf8_to_utf16(&[0xF0, 0x9F, 0x98, 0x41]), [0xFFFD, 0x41]);
    assert_eq!(utf8_to_utf16(&[0x80, 0x80]), [0xFFFD, 0xFFFD]);
}

#[test]
fn ucs4_round_trip_and_replacement() {
    let cps = [0x41u32, 0xE9, 0x20AC, 0x1F600];
    let units = ucs4_to_utf16(&cps);
    assert_eq!(utf16_to_ucs4(&units), cps);

    assert_eq!(ucs4_to_utf16(&[0xD800, 0x110000, 0x41]), [0xFFFD, 0xFFFD, 0x41]);
}

#[test]
fn bom_selection() {
    let be = [0xFE, 0xFF, 0x01, 0x02];
    let le = [0xFF, 0xFE, 0x01, 0x02];
    assert_eq!(utf16_bytes_to_utf16(&be), [0x0102]);
    assert_eq!(utf16_bytes_to_utf16(&le), [0x0201]);
}

#[test]
fn validity_predicates() {
    assert!(is_valid_utf16(&u("fine 😀")));
    assert!(!is_valid_utf16(&[0xD800]));
    assert!(is_valid_utf8("fine 😀".as_bytes()));
    assert!(!is_valid_utf8(&[0xF5]));
}

#[test]
fn ustring_conversion_surface() {
    let s = UString::from("Grüße 😀");
    assert_eq!(UString::from_utf8(&s.to_utf8()), s);
    assert_eq!(UString::from_ucs4(&s.to_ucs4()), s);

    let narrowed = s.to_latin1();
    assert_eq!(narrowed.len(), s.len());
    // The emoji's two surrogate units each become '?'.
    assert_eq!(&narrowed, b"Gr\xFC\xDFe ??");
}
