//! Unicode normalization.
//!
//! The pipeline, in order:
//!
//! 1. ASCII fast path — all-ASCII input is already in every form.
//! 2. Quick check — a conservative per-code-point scan; strings it clears
//!    are returned as-is.
//! 3. Decomposition — canonical (D, C) or compatibility (KD, KC), recursive,
//!    with algorithmic Hangul and the pinned-version corrections applied in
//!    the table lookup.
//! 4. Canonical ordering — a stable insertion sort of each combining-mark
//!    run by combining class.
//! 5. Composition (C, KC only) — the canonical pair-composition algorithm
//!    with blocking, plus Hangul LV/LVT.
//!
//! Unpaired surrogate halves are passed through untouched, so normalizing
//! never corrupts data that plain copying would preserve.

use crate::scan;
use crate::string::UString;
use crate::tables::normalization::{
    canonical_decomposition, combining_class, compatibility_decomposition, compose_pair,
    decompose_hangul, is_hangul_jamo, is_hangul_syllable,
};
use crate::view::Utf16View;

pub use crate::tables::normalization::UnicodeVersion;

/// The four normalization forms.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NormalizationForm {
    /// Canonical decomposition.
    D,
    /// Canonical decomposition followed by canonical composition.
    C,
    /// Compatibility decomposition.
    KD,
    /// Compatibility decomposition followed by canonical composition.
    KC,
}

impl NormalizationForm {
    #[inline]
    fn compat(self) -> bool {
        matches!(self, NormalizationForm::KD | NormalizationForm::KC)
    }

    #[inline]
    fn composes(self) -> bool {
        matches!(self, NormalizationForm::C | NormalizationForm::KC)
    }
}

/// Normalizes `text` to `form` under the pinned table `version`.
pub fn normalize(text: Utf16View<'_>, form: NormalizationForm, version: UnicodeVersion) -> UString {
    let units = text.as_slice();
    if scan::is_ascii_utf16(units) {
        return UString::from_utf16(units);
    }

    let cps: Vec<u32> = text.code_points().collect();
    if quick_check(&cps, form, version) {
        return UString::from_utf16(units);
    }

    // Decompose.
    let mut decomposed = Vec::with_capacity(cps.len() * 2);
    for &cp in &cps {
        decompose_into(cp, form.compat(), version, &mut decomposed);
    }

    // Canonical ordering.
    canonical_order(&mut decomposed);

    // Compose.
    let composed;
    let result = if form.composes() {
        composed = compose(&decomposed);
        &composed
    } else {
        &decomposed
    };

    encode_utf16(result)
}

// ─────────────────────────────────────────────────────────────────────────────
// Quick check
// ─────────────────────────────────────────────────────────────────────────────

/// Conservative per-code-point check: `true` means the input is certainly in
/// `form` already; `false` sends it through the full pipeline.
fn quick_check(cps: &[u32], form: NormalizationForm, version: UnicodeVersion) -> bool {
    let mut prev_ccc = 0u8;
    for &cp in cps {
        let ccc = combining_class(cp);
        if ccc != 0 && prev_ccc > ccc {
            return false; // marks out of canonical order
        }
        match form {
            NormalizationForm::D | NormalizationForm::KD => {
                if is_hangul_syllable(cp) || canonical_decomposition(cp, version).is_some() {
                    return false;
                }
                if form.compat() && compatibility_decomposition(cp).is_some() {
                    return false;
                }
            }
            NormalizationForm::C | NormalizationForm::KC => {
                // Any mark might compose with what precedes it, any jamo
                // might join a syllable, and singleton decompositions are
                // never in composed form.
                if ccc != 0 || is_hangul_jamo(cp) {
                    return false;
                }
                if canonical_decomposition(cp, version).is_some_and(|m| m.len() < 2) {
                    return false;
                }
                if form.compat() && compatibility_decomposition(cp).is_some() {
                    return false;
                }
            }
        }
        prev_ccc = ccc;
    }
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Decomposition
// ─────────────────────────────────────────────────────────────────────────────

fn decompose_into(cp: u32, compat: bool, version: UnicodeVersion, out: &mut Vec<u32>) {
    if let Some((jamo, n)) = decompose_hangul(cp) {
        out.extend_from_slice(&jamo[..n]);
        return;
    }
    if let Some(mapping) = canonical_decomposition(cp, version) {
        for &c in mapping {
            decompose_into(c, compat, version, out);
        }
        return;
    }
    if compat {
        if let Some(mapping) = compatibility_decomposition(cp) {
            for &c in mapping {
                decompose_into(c, compat, version, out);
            }
            return;
        }
    }
    out.push(cp);
}

/// Reorders each run of combining marks by combining class.  Insertion sort:
/// runs are short, and equal classes must keep their relative order.
fn canonical_order(cps: &mut [u32]) {
    for i in 1..cps.len() {
        let ccc = combining_class(cps[i]);
        if ccc == 0 {
            continue;
        }
        let mut j = i;
        while j > 0 {
            let prev = combining_class(cps[j - 1]);
            if prev == 0 || prev <= ccc {
                break;
            }
            cps.swap(j - 1, j);
            j -= 1;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical pair composition over a decomposed, canonically ordered
/// sequence.
fn compose(cps: &[u32]) -> Vec<u32> {
    let mut out: Vec<u32> = Vec::with_capacity(cps.len());
    let mut starter: Option<usize> = None;
    let mut last_ccc = 0u8;

    for &cp in cps {
        let ccc = combining_class(cp);
        if let Some(si) = starter {
            // Blocked unless `cp` directly follows the starter or every
            // character in between has a strictly lower class.
            let directly_follows = out.len() == si + 1;
            let blocked = !directly_follows && (last_ccc == 0 || last_ccc >= ccc);
            if !blocked {
                if let Some(composed) = compose_pair(out[si], cp) {
                    out[si] = composed;
                    continue;
                }
            }
        }
        if ccc == 0 {
            starter = Some(out.len());
        }
        last_ccc = ccc;
        out.push(cp);
    }
    out
}

fn encode_utf16(cps: &[u32]) -> UString {
    let mut out = UString::with_capacity(cps.len());
    for &cp in cps {
        // Lone surrogate values round-trip; real supplementary code points
        // re-pair.
        out.push_code_point(cp);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const V: UnicodeVersion = UnicodeVersion::CURRENT;

    fn norm(text: &str, form: NormalizationForm) -> UString {
        let units: Vec<u16> = text.encode_utf16().collect();
        normalize(Utf16View::new(&units), form, V)
    }

    #[test]
    fn ascii_is_untouched_in_every_form() {
        for form in [
            NormalizationForm::D,
            NormalizationForm::C,
            NormalizationForm::KD,
            NormalizationForm::KC,
        ] {
            assert_eq!(norm("plain ascii 123", form), "plain ascii 123");
        }
    }

    #[test]
    fn nfd_decomposes_and_nfc_recomposes() {
        let composed = "caf\u{00E9}";
        let decomposed = "cafe\u{0301}";
        assert_eq!(norm(composed, NormalizationForm::D), decomposed);
        assert_eq!(norm(decomposed, NormalizationForm::C), composed);
        assert_eq!(norm(composed, NormalizationForm::C), composed);
        assert_eq!(norm(decomposed, NormalizationForm::D), decomposed);
    }

    #[test]
    fn marks_are_canonically_ordered() {
        // cedilla (202) must sort before acute (230) regardless of input
        // order; both orders normalize identically.
        let a = "c\u{0301}\u{0327}";
        let b = "c\u{0327}\u{0301}";
        assert_eq!(norm(a, NormalizationForm::D), norm(b, NormalizationForm::D));
        assert_eq!(norm(a, NormalizationForm::C), norm(b, NormalizationForm::C));
        // And NFC composes c + cedilla into U+00E7 with the acute appended.
        assert_eq!(norm(b, NormalizationForm::C), "\u{00E7}\u{0301}");
    }

    #[test]
    fn compat_forms_expand_compat_characters() {
        assert_eq!(norm("\u{FB01}", NormalizationForm::KD), "fi");
        assert_eq!(norm("\u{FB01}", NormalizationForm::KC), "fi");
        // NFC leaves the ligature alone.
        assert_eq!(norm("\u{FB01}", NormalizationForm::C), "\u{FB01}");
        // Micro sign is compatibility-equivalent to Greek mu.
        assert_eq!(norm("\u{00B5}", NormalizationForm::KC), "\u{03BC}");
        assert_eq!(norm("\u{00B5}", NormalizationForm::C), "\u{00B5}");
    }

    #[test]
    fn singletons_never_recompose() {
        // The ohm sign decomposes to capital omega and stays there under NFC.
        assert_eq!(norm("\u{2126}", NormalizationForm::C), "\u{03A9}");
        assert_eq!(norm("\u{2126}", NormalizationForm::D), "\u{03A9}");
    }

    #[test]
    fn hangul_round_trips() {
        let syllable = "\u{AC01}"; // GAG
        let jamo = "\u{1100}\u{1161}\u{11A8}";
        assert_eq!(norm(syllable, NormalizationForm::D), jamo);
        assert_eq!(norm(jamo, NormalizationForm::C), syllable);
        assert_eq!(norm(syllable, NormalizationForm::C), syllable);
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = ["cafe\u{0301}", "\u{00C5}\u{0327}x", "\u{1E69}", "a\u{0327}\u{0301}b"];
        for form in [
            NormalizationForm::D,
            NormalizationForm::C,
            NormalizationForm::KD,
            NormalizationForm::KC,
        ] {
            for input in inputs {
                let units: Vec<u16> = input.encode_utf16().collect();
                let once = normalize(Utf16View::new(&units), form, V);
                let twice = normalize(once.view(), form, V);
                assert_eq!(once, twice, "{input:?} under {form:?}");
            }
        }
    }

    #[test]
    fn version_pinning_restores_old_mappings() {
        let units: Vec<u16> = "\u{F951}".encode_utf16().collect();
        let old = normalize(Utf16View::new(&units), NormalizationForm::D, UnicodeVersion::V3_0);
        let new = normalize(Utf16View::new(&units), NormalizationForm::D, UnicodeVersion::CURRENT);
        assert_eq!(old, "\u{96FB}");
        assert_eq!(new, "\u{964B}");
        assert_ne!(old, new);
    }

    #[test]
    fn lone_surrogates_survive() {
        let units = [0x0041u16, 0xD800, 0x0042];
        let out = normalize(Utf16View::new(&units), NormalizationForm::C, V);
        assert_eq!(out.as_slice(), &units);
    }
}
