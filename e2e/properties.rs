//! E2E Suite 02: universal invariants as property tests.
//!
//! Randomized checks for the library-wide contracts:
//! - owned buffers are always zero-terminated
//! - `compare == 0` iff `equal`, for every sensitivity
//! - UTF-8 and Latin-1 round trips
//! - lossy narrowing length and `?` policy
//! - matcher results agree with the naive quadratic search
//! - rebuilt matchers are bit-for-bit identical
//! - normalization is idempotent

use proptest::prelude::*;

use unistr::view::utf16::Utf16CodePoints;
use unistr::{
    CaseSensitivity, NormalizationForm, StringMatcher, UString, UnicodeVersion, Utf16View,
};

/// UTF-16 unit soup, surrogate halves included: the contracts hold for
/// ill-formed input too.
fn unit_vec() -> impl Strategy<Value = Vec<u16>> {
    proptest::collection::vec(
        prop_oneof![
            0x0000u16..0x0080,   // ASCII
            0x0080u16..0x0400,   // Latin-1 and friends
            0xD7F0u16..0xE010,   // surrogate boundary region
            proptest::num::u16::ANY,
        ],
        0..48,
    )
}

fn any_cs() -> impl Strategy<Value = CaseSensitivity> {
    prop_oneof![Just(CaseSensitivity::Sensitive), Just(CaseSensitivity::Insensitive)]
}

proptest! {
    #[test]
    fn owned_buffers_are_zero_terminated(units in unit_vec()) {
        let s = UString::from_utf16(&units);
        if !s.is_empty() {
            // SAFETY: owned non-empty buffers carry the terminator slot.
            unsafe { prop_assert_eq!(*s.data().add(s.len()), 0) };
        }
    }

    #[test]
    fn compare_zero_iff_equal(a in unit_vec(), b in unit_vec(), cs in any_cs()) {
        let va = Utf16View::new(&a);
        let vb = Utf16View::new(&b);
        prop_assert_eq!(
            unistr::compare::compare_views(&va, &vb, cs) == 0,
            unistr::compare::equal_views(&va, &vb, cs)
        );
    }

    #[test]
    fn utf8_round_trip_without_lone_surrogates(text in "\\PC*") {
        let units: Vec<u16> = text.encode_utf16().collect();
        let bytes = unistr::utf16_to_utf8(&units);
        prop_assert_eq!(unistr::utf8_to_utf16(&bytes), units);
    }

    #[test]
    fn latin1_round_trip_any_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut wide = vec![0u16; bytes.len()];
        unistr::latin1_to_utf16(&mut wide, &bytes);
        let mut back = vec![0u8; wide.len()];
        unistr::utf16_to_latin1_unchecked(&mut back, &wide);
        prop_assert_eq!(back, bytes);
    }

    #[test]
    fn lossy_narrowing_length_and_replacement(units in unit_vec()) {
        let mut narrow = vec![0u8; units.len()];
        unistr::utf16_to_latin1_lossy(&mut narrow, &units);
        prop_assert_eq!(narrow.len(), units.len());
        for (&u, &b) in units.iter().zip(narrow.iter()) {
            if u > 0x00FF {
                prop_assert_eq!(b, b'?');
            } else {
                prop_assert_eq!(b, u as u8);
            }
        }
    }

    #[test]
    fn matcher_agrees_with_naive_search(
        hay in unit_vec(),
        pat in proptest::collection::vec(0x0041u16..0x0140, 0..6),
        cs in any_cs(),
    ) {
        let m = StringMatcher::new(Utf16View::new(&pat), cs);
        let got = m.index_in(Utf16View::new(&hay), 0);

        let expected = if pat.is_empty() {
            0
        } else {
            let mut found = -1isize;
            if hay.len() >= pat.len() {
                for i in 0..=hay.len() - pat.len() {
                    if unistr::compare::equal_utf16(&hay[i..i + pat.len()], &pat, cs) {
                        found = i as isize;
                        break;
                    }
                }
            }
            found
        };
        prop_assert_eq!(got, expected, "pattern {:?} in {:?}", pat, hay);
    }

    #[test]
    fn skip_tables_are_deterministic(pat in unit_vec(), cs in any_cs()) {
        let a = StringMatcher::new(Utf16View::new(&pat), cs);
        let mut b = StringMatcher::new(Utf16View::new(&pat), cs);
        prop_assert_eq!(a.index_in(Utf16View::new(&pat), 0), 0);
        // Setting the same pattern and sensitivity twice changes nothing
        // observable: every search result stays identical.
        b.set_pattern(Utf16View::new(&pat));
        b.set_case_sensitivity(cs);
        prop_assert_eq!(a.index_in(Utf16View::new(&pat), 0), b.index_in(Utf16View::new(&pat), 0));
    }

    #[test]
    fn normalization_is_idempotent(text in "\\PC{0,24}") {
        let units: Vec<u16> = text.encode_utf16().collect();
        for form in [
            NormalizationForm::D,
            NormalizationForm::C,
            NormalizationForm::KD,
            NormalizationForm::KC,
        ] {
            let once = unistr::normalize(Utf16View::new(&units), form, UnicodeVersion::CURRENT);
            let twice = unistr::normalize(once.view(), form, UnicodeVersion::CURRENT);
            prop_assert_eq!(&once, &twice);
        }
    }

    #[test]
    fn code_point_iteration_covers_all_units(units in unit_vec()) {
        // Every unit is consumed exactly once: pairs count 2, singles 1.
        let mut consumed = 0usize;
        for cp in Utf16CodePoints::new(&units) {
            consumed += if cp > 0xFFFF { 2 } else { 1 };
        }
        prop_assert_eq!(consumed, units.len());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// arg placeholder-count invariant (deterministic, not randomized)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn single_arg_consumes_exactly_one_distinct_placeholder() {
    let count = |s: &UString| {
        // Count distinct unreplaced %NN markers the way the parser does.
        let mut seen = std::collections::BTreeSet::new();
        let units: Vec<u16> = s.as_slice().to_vec();
        let mut i = 0;
        while i < units.len() {
            if units[i] == u16::from(b'%') && i + 1 < units.len() {
                let mut j = i + 1;
                if units[j] == u16::from(b'L') && j + 1 < units.len() {
                    j += 1;
                }
                let d = |u: u16| (0x30..=0x39).contains(&u).then(|| (u - 0x30) as u8);
                if let Some(d1) = d(units[j]) {
                    let mut n = d1;
                    let mut end = j + 1;
                    if end < units.len() {
                        if let Some(d2) = d(units[end]) {
                            n = n * 10 + d2;
                            end += 1;
                        }
                    }
                    if n >= 1 {
                        seen.insert(n);
                        i = end;
                        continue;
                    }
                }
            }
            i += 1;
        }
        seen.len()
    };

    for pattern in ["%1", "%1 %2", "%2 %1 %2", "%5 %9 %5 %32", "plain"] {
        let p = UString::from(pattern);
        let before = count(&p);
        let after = count(&p.arg_str("a"));
        assert_eq!(after, before.saturating_sub(1), "{pattern}");
    }
}
