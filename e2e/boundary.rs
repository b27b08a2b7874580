//! E2E Suite 01: boundary scenarios.
//!
//! Each test pins one documented edge of the library with literal inputs:
//! - Boyer–Moore offsets, case-sensitive and case-insensitive
//! - the 256-unit fold buffer and its tail verification
//! - the Latin-1 fold-table exceptions
//! - UTF-8 replacement policy
//! - `arg` rank ordering
//! - shared-mutation isolation (detach on write)

use unistr::{CaseSensitivity, StringMatcher, UString, Utf16View};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 1: case-sensitive Boyer–Moore
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boyer_moore_case_sensitive_offsets() {
    let pat = u("needle");
    let m = StringMatcher::new(Utf16View::new(&pat), CaseSensitivity::Sensitive);

    let hay = u("find the needle in haystack");
    assert_eq!(m.index_in(Utf16View::new(&hay), 0), 9);

    let miss = u("no match here");
    assert_eq!(m.index_in(Utf16View::new(&miss), 0), -1);

    assert_eq!(m.index_in(Utf16View::new(&[]), 0), -1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 2: case-insensitive search past the fold buffer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boyer_moore_long_pattern_fold_buffer() {
    // 300 characters: 256 fill the fold buffer, "Xyz" + 41 units form the
    // verified tail.
    let pattern = format!("{}Xyz{}", "A".repeat(256), "A".repeat(41));
    let haystack = format!("b{}xYZ{}c", "a".repeat(256), "a".repeat(41));
    let pat = u(&pattern);
    let hay = u(&haystack);
    assert_eq!(pat.len(), 300);

    let m = StringMatcher::new(Utf16View::new(&pat), CaseSensitivity::Insensitive);
    assert_eq!(m.index_in(Utf16View::new(&hay), 0), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 3: Latin-1 fold exceptions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn latin1_fold_exceptions() {
    let times_a = u("\u{00D7}");
    let times_b = u("\u{00D7}");
    assert_eq!(
        unistr::compare::compare_utf16(&times_a, &times_b, CaseSensitivity::Insensitive),
        0
    );

    let sharp = u("\u{00DF}");
    let ss = u("SS");
    assert_ne!(
        unistr::compare::compare_utf16(&sharp, &ss, CaseSensitivity::Insensitive),
        0
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 4: UTF-8 replacement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn utf8_invalid_lead_byte_replacement() {
    let decoded = unistr::utf8_to_utf16(&[0x41, 0xC0, 0x41]);
    assert_eq!(decoded, [0x0041, 0xFFFD, 0x0041]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 5: arg ordering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn arg_rank_ordering() {
    let out = UString::from("%2-%1-%1").arg_str("x").arg_str("y");
    assert_eq!(out, "y-x-x");
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario 6: shared mutation isolation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn shared_mutation_detaches() {
    let a = UString::from("hello");
    let mut b = a.clone();
    assert_eq!(a.data(), b.data());

    let world = u(" world");
    b.append(Utf16View::new(&world));

    assert_eq!(a, "hello");
    assert_eq!(b, "hello world");
    assert_ne!(a.data(), b.data());
}
