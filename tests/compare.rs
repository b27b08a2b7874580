// Integration tests: the encoding-pair comparison matrix.

use unistr::compare::{compare_views, equal_views};
use unistr::{CaseSensitivity, Latin1View, UString, Utf16View, Utf8View};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

const CS: CaseSensitivity = CaseSensitivity::Sensitive;
const CI: CaseSensitivity = CaseSensitivity::Insensitive;

#[test]
fn all_nine_pairs_agree_on_equal_text() {
    let text = "Grüße";
    let w = u(text);
    let utf16 = Utf16View::new(&w);
    let latin1 = Latin1View::new(b"Gr\xFC\xDFe");
    let utf8 = Utf8View::from_str(text);

    assert!(equal_views(&utf16, &utf16, CS));
    assert!(equal_views(&utf16, &latin1, CS));
    assert!(equal_views(&utf16, &utf8, CS));
    assert!(equal_views(&latin1, &utf16, CS));
    assert!(equal_views(&latin1, &latin1, CS));
    assert!(equal_views(&latin1, &utf8, CS));
    assert!(equal_views(&utf8, &utf16, CS));
    assert!(equal_views(&utf8, &latin1, CS));
    assert!(equal_views(&utf8, &utf8, CS));
}

#[test]
fn sign_convention_is_consistent_across_encodings() {
    let a16 = u("apple");
    let b16 = u("banana");
    let a = Utf16View::new(&a16);
    let b = Utf16View::new(&b16);
    assert!(compare_views(&a, &b, CS) < 0);
    assert!(compare_views(&b, &a, CS) > 0);

    let bl = Latin1View::new(b"banana");
    assert!(compare_views(&a, &bl, CS) < 0);
    let b8 = Utf8View::from_str("banana");
    assert!(compare_views(&b8, &a, CS) > 0);
}

#[test]
fn shorter_prefix_sorts_first() {
    let ab = u("ab");
    let abc = u("abc");
    assert!(compare_views(&Utf16View::new(&ab), &Utf16View::new(&abc), CS) < 0);
    assert!(compare_views(&Utf8View::from_str("abc"), &Utf8View::from_str("ab"), CS) > 0);
}

#[test]
fn folding_spans_encodings() {
    let upper = u("STRASSE");
    assert!(equal_views(
        &Utf16View::new(&upper),
        &Latin1View::new(b"strasse"),
        CI
    ));
    // Micro sign folds to Greek mu, which Latin-1 cannot express.
    let micro = u("\u{00B5}");
    let mu = u("\u{03BC}");
    assert!(equal_views(&Utf16View::new(&micro), &Utf16View::new(&mu), CI));
    assert!(!equal_views(&Utf16View::new(&micro), &Utf16View::new(&mu), CS));
}

#[test]
fn utf8_errors_compare_as_replacement() {
    // An ill-formed UTF-8 byte decodes as U+FFFD and compares as such.
    let bad = Utf8View::new(&[0xC0]);
    let replacement = u("\u{FFFD}");
    assert!(equal_views(&bad, &Utf16View::new(&replacement), CS));
}

#[test]
fn ustring_participates_in_the_matrix() {
    let s = UString::from("Value");
    assert!(s.starts_with(&Latin1View::new(b"va"), CI));
    assert!(s.ends_with(&Utf8View::from_str("LUE"), CI));
    assert_eq!(s.compare(&Latin1View::new(b"Value"), CS), 0);
}

#[test]
fn locale_compare_is_a_total_order_fallback() {
    let a = UString::from("alpha");
    let b = UString::from("beta");
    assert!(a.locale_aware_compare(&b) < 0);
    assert!(b.locale_aware_compare(&a) > 0);
    assert_eq!(a.locale_aware_compare(&a), 0);
}
