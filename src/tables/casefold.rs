//! Unicode simple case folding.
//!
//! Maps each code point to its case-insensitive representative.  Simple
//! folding only: every code point folds to exactly one code point, so the
//! sharp s (`U+00DF`) and the ligatures keep their identity rather than
//! expanding to multi-character sequences.
//!
//! The data is range-encoded.  Contiguous cased blocks fold with a constant
//! delta; the interleaved upper/lower blocks (Latin Extended, Cyrillic
//! extensions, Coptic, …) fold with an even/odd pairing rule.  Code points
//! not covered by any range fold to themselves.

use crate::view::{
    combine_surrogates, high_surrogate, is_high_surrogate, is_low_surrogate, low_surrogate,
};

// ─────────────────────────────────────────────────────────────────────────────
// Range encoding
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FoldKind {
    /// Every code point in the range folds by the same signed delta.
    Delta(i32),
    /// Even code points fold to the next odd one; odd ones fold to themselves.
    EvenToOdd,
    /// Odd code points fold to the next even one; even ones fold to themselves.
    OddToEven,
}

struct FoldRange {
    first: u32,
    last: u32,
    kind: FoldKind,
}

const fn d(first: u32, last: u32, delta: i32) -> FoldRange {
    FoldRange { first, last, kind: FoldKind::Delta(delta) }
}

const fn eo(first: u32, last: u32) -> FoldRange {
    FoldRange { first, last, kind: FoldKind::EvenToOdd }
}

const fn oe(first: u32, last: u32) -> FoldRange {
    FoldRange { first, last, kind: FoldKind::OddToEven }
}

// Sorted by `first`; consulted by binary search.  Coverage spans the cased
// scripts of the BMP plus the cased supplementary-plane scripts.
#[rustfmt::skip]
static FOLD_RANGES: &[FoldRange] = &[
    d(0x0041, 0x005A, 32),
    d(0x00B5, 0x00B5, 775),       // micro sign -> Greek small mu
    d(0x00C0, 0x00D6, 32),
    d(0x00D8, 0x00DE, 32),
    eo(0x0100, 0x012F),
    eo(0x0132, 0x0137),
    oe(0x0139, 0x0148),
    eo(0x014A, 0x0177),
    d(0x0178, 0x0178, -121),      // Y with diaeresis -> 0x00FF
    oe(0x0179, 0x017E),
    d(0x017F, 0x017F, -268),      // long s -> s
    d(0x0181, 0x0181, 210),
    eo(0x0182, 0x0185),
    d(0x0186, 0x0186, 206),
    oe(0x0187, 0x0188),
    d(0x0189, 0x018A, 205),
    oe(0x018B, 0x018C),
    d(0x018E, 0x018E, 79),
    d(0x018F, 0x018F, 202),
    d(0x0190, 0x0190, 203),
    oe(0x0191, 0x0192),
    d(0x0193, 0x0193, 205),
    d(0x0194, 0x0194, 207),
    d(0x0196, 0x0196, 211),
    d(0x0197, 0x0197, 209),
    eo(0x0198, 0x0199),
    d(0x019C, 0x019C, 211),
    d(0x019D, 0x019D, 213),
    d(0x019F, 0x019F, 214),
    eo(0x01A0, 0x01A5),
    d(0x01A6, 0x01A6, 218),
    oe(0x01A7, 0x01A8),
    d(0x01A9, 0x01A9, 218),
    eo(0x01AC, 0x01AD),
    d(0x01AE, 0x01AE, 218),
    oe(0x01AF, 0x01B0),
    d(0x01B1, 0x01B2, 217),
    oe(0x01B3, 0x01B6),
    d(0x01B7, 0x01B7, 219),
    eo(0x01B8, 0x01B9),
    eo(0x01BC, 0x01BD),
    d(0x01C4, 0x01C4, 2),         // DZ with caron titlecase trio
    d(0x01C5, 0x01C5, 1),
    d(0x01C7, 0x01C7, 2),
    d(0x01C8, 0x01C8, 1),
    d(0x01CA, 0x01CA, 2),
    d(0x01CB, 0x01CB, 1),
    oe(0x01CD, 0x01DC),
    eo(0x01DE, 0x01EF),
    d(0x01F1, 0x01F1, 2),
    d(0x01F2, 0x01F2, 1),
    eo(0x01F4, 0x01F5),
    d(0x01F6, 0x01F6, -97),
    d(0x01F7, 0x01F7, -56),
    eo(0x01F8, 0x021F),
    d(0x0220, 0x0220, -130),
    eo(0x0222, 0x0233),
    d(0x023A, 0x023A, 10795),
    oe(0x023B, 0x023C),
    d(0x023D, 0x023D, -163),
    d(0x023E, 0x023E, 10792),
    oe(0x0241, 0x0242),
    d(0x0243, 0x0243, -195),
    d(0x0244, 0x0244, 69),
    d(0x0245, 0x0245, 71),
    eo(0x0246, 0x024F),
    d(0x0345, 0x0345, 116),       // ypogegrammeni -> iota
    eo(0x0370, 0x0373),
    eo(0x0376, 0x0377),
    d(0x037F, 0x037F, 116),
    d(0x0386, 0x0386, 38),
    d(0x0388, 0x038A, 37),
    d(0x038C, 0x038C, 64),
    d(0x038E, 0x038F, 63),
    d(0x0391, 0x03A1, 32),
    d(0x03A3, 0x03AB, 32),
    d(0x03C2, 0x03C2, 1),         // final sigma -> sigma
    d(0x03CF, 0x03CF, 8),
    d(0x03D0, 0x03D0, -30),
    d(0x03D1, 0x03D1, -25),
    d(0x03D5, 0x03D5, -15),
    d(0x03D6, 0x03D6, -22),
    eo(0x03D8, 0x03EF),
    d(0x03F0, 0x03F0, -54),
    d(0x03F1, 0x03F1, -48),
    d(0x03F4, 0x03F4, -60),
    d(0x03F5, 0x03F5, -64),
    oe(0x03F7, 0x03F8),
    d(0x03F9, 0x03F9, -7),
    eo(0x03FA, 0x03FB),
    d(0x03FD, 0x03FF, -130),
    d(0x0400, 0x040F, 80),
    d(0x0410, 0x042F, 32),
    eo(0x0460, 0x0481),
    eo(0x048A, 0x04BF),
    d(0x04C0, 0x04C0, 15),
    oe(0x04C1, 0x04CE),
    eo(0x04D0, 0x052F),
    d(0x0531, 0x0556, 48),
    d(0x10A0, 0x10C5, 7264),
    d(0x10C7, 0x10C7, 7264),
    d(0x10CD, 0x10CD, 7264),
    d(0x13F8, 0x13FD, -8),        // Cherokee small letters fold upward
    eo(0x1E00, 0x1E95),
    d(0x1E9B, 0x1E9B, -58),
    d(0x1E9E, 0x1E9E, -7615),     // capital sharp s -> 0x00DF
    eo(0x1EA0, 0x1EFF),
    d(0x1F08, 0x1F0F, -8),
    d(0x1F18, 0x1F1D, -8),
    d(0x1F28, 0x1F2F, -8),
    d(0x1F38, 0x1F3F, -8),
    d(0x1F48, 0x1F4D, -8),
    d(0x1F59, 0x1F59, -8),
    d(0x1F5B, 0x1F5B, -8),
    d(0x1F5D, 0x1F5D, -8),
    d(0x1F5F, 0x1F5F, -8),
    d(0x1F68, 0x1F6F, -8),
    d(0x1F88, 0x1F8F, -8),
    d(0x1F98, 0x1F9F, -8),
    d(0x1FA8, 0x1FAF, -8),
    d(0x1FB8, 0x1FB9, -8),
    d(0x1FBA, 0x1FBB, -74),
    d(0x1FBC, 0x1FBC, -9),
    d(0x1FBE, 0x1FBE, -7173),     // prosgegrammeni -> iota
    d(0x1FC8, 0x1FCB, -86),
    d(0x1FCC, 0x1FCC, -9),
    d(0x1FD8, 0x1FD9, -8),
    d(0x1FDA, 0x1FDB, -100),
    d(0x1FE8, 0x1FE9, -8),
    d(0x1FEA, 0x1FEB, -112),
    d(0x1FEC, 0x1FEC, -7),
    d(0x1FF8, 0x1FF9, -128),
    d(0x1FFA, 0x1FFB, -126),
    d(0x1FFC, 0x1FFC, -9),
    d(0x2126, 0x2126, -7517),     // ohm sign -> omega
    d(0x212A, 0x212A, -8383),     // Kelvin sign -> k
    d(0x212B, 0x212B, -8262),     // Angstrom sign -> a with ring
    d(0x2132, 0x2132, 28),
    d(0x2160, 0x216F, 16),
    oe(0x2183, 0x2184),
    d(0x24B6, 0x24CF, 26),
    d(0x2C00, 0x2C2F, 48),
    eo(0x2C60, 0x2C61),
    d(0x2C62, 0x2C62, -10743),
    d(0x2C63, 0x2C63, -3814),
    d(0x2C64, 0x2C64, -10727),
    oe(0x2C67, 0x2C6C),
    d(0x2C6D, 0x2C6D, -10780),
    d(0x2C6E, 0x2C6E, -10749),
    d(0x2C6F, 0x2C6F, -10783),
    d(0x2C70, 0x2C70, -10782),
    eo(0x2C72, 0x2C73),
    oe(0x2C75, 0x2C76),
    eo(0x2C80, 0x2CE3),
    eo(0xA640, 0xA66D),
    eo(0xA680, 0xA69B),
    eo(0xA722, 0xA72F),
    eo(0xA732, 0xA76F),
    oe(0xA779, 0xA77C),
    d(0xA77D, 0xA77D, -35332),
    eo(0xA77E, 0xA787),
    d(0xAB70, 0xABBF, -38864),    // Cherokee small-letter block
    d(0xFF21, 0xFF3A, 32),        // fullwidth Latin
    d(0x10400, 0x10427, 40),      // Deseret
    d(0x104B0, 0x104D3, 40),      // Osage
    d(0x10C80, 0x10CB2, 64),      // Old Hungarian
    d(0x118A0, 0x118BF, 32),      // Warang Citi
    d(0x16E40, 0x16E5F, 32),      // Medefaidrin
    d(0x1E900, 0x1E921, 34),      // Adlam
];

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Folds a code point to its case-insensitive representative.  Code points
/// outside the table fold to themselves.
pub fn fold_code_point(cp: u32) -> u32 {
    let idx = match FOLD_RANGES.binary_search_by(|r| {
        if r.last < cp {
            core::cmp::Ordering::Less
        } else if r.first > cp {
            core::cmp::Ordering::Greater
        } else {
            core::cmp::Ordering::Equal
        }
    }) {
        Ok(i) => i,
        Err(_) => return cp,
    };
    match FOLD_RANGES[idx].kind {
        FoldKind::Delta(delta) => (cp as i64 + i64::from(delta)) as u32,
        FoldKind::EvenToOdd => {
            if cp & 1 == 0 {
                cp + 1
            } else {
                cp
            }
        }
        FoldKind::OddToEven => {
            if cp & 1 == 1 {
                cp + 1
            } else {
                cp
            }
        }
    }
}

/// Folds the code unit at `units[i]`, combining a surrogate pair with its
/// partner so that supplementary-plane code points fold as a whole.  The
/// returned unit is the corresponding half of the folded code point; an
/// unpaired surrogate folds to itself.
pub fn fold_unit(units: &[u16], i: usize) -> u16 {
    let u = units[i];
    if is_high_surrogate(u) {
        if let Some(&lo) = units.get(i + 1) {
            if is_low_surrogate(lo) {
                let folded = fold_code_point(combine_surrogates(u, lo));
                return if folded > 0xFFFF { high_surrogate(folded) } else { folded as u16 };
            }
        }
        u
    } else if is_low_surrogate(u) {
        if i > 0 && is_high_surrogate(units[i - 1]) {
            let folded = fold_code_point(combine_surrogates(units[i - 1], u));
            return if folded > 0xFFFF { low_surrogate(folded) } else { folded as u16 };
        }
        u
    } else {
        // Simple foldings of BMP code points stay in the BMP.
        fold_code_point(u32::from(u)) as u16
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_sorted_and_disjoint() {
        for pair in FOLD_RANGES.windows(2) {
            assert!(pair[0].last < pair[1].first, "overlap near U+{:04X}", pair[1].first);
        }
        for r in FOLD_RANGES {
            assert!(r.first <= r.last);
        }
    }

    #[test]
    fn ascii_and_latin1() {
        assert_eq!(fold_code_point(u32::from(b'A')), u32::from(b'a'));
        assert_eq!(fold_code_point(0x00C9), 0x00E9); // E with acute
        assert_eq!(fold_code_point(0x00DF), 0x00DF); // sharp s keeps itself
        assert_eq!(fold_code_point(0x00D7), 0x00D7); // multiplication sign
        assert_eq!(fold_code_point(0x00B5), 0x03BC); // micro -> mu
    }

    #[test]
    fn interleaved_blocks() {
        assert_eq!(fold_code_point(0x0100), 0x0101);
        assert_eq!(fold_code_point(0x0101), 0x0101);
        assert_eq!(fold_code_point(0x0139), 0x013A);
        assert_eq!(fold_code_point(0x013A), 0x013A);
    }

    #[test]
    fn greek_and_cyrillic() {
        assert_eq!(fold_code_point(0x0391), 0x03B1); // Alpha
        assert_eq!(fold_code_point(0x03C2), 0x03C3); // final sigma
        assert_eq!(fold_code_point(0x0401), 0x0451); // Io
        assert_eq!(fold_code_point(0x0410), 0x0430); // A
    }

    #[test]
    fn folding_is_idempotent_over_bmp() {
        for cp in 0u32..=0xFFFF {
            let once = fold_code_point(cp);
            assert_eq!(fold_code_point(once), once, "U+{cp:04X}");
        }
    }

    #[test]
    fn supplementary_plane_pairs() {
        // Deseret capital long I (U+10400) folds to U+10428.
        assert_eq!(fold_code_point(0x10400), 0x10428);
        let units = [0xD801u16, 0xDC00];
        assert_eq!(fold_unit(&units, 0), 0xD801);
        assert_eq!(fold_unit(&units, 1), 0xDC28);
    }

    #[test]
    fn unpaired_surrogates_fold_to_themselves() {
        let units = [0xDC00u16, 0x0041, 0xD800];
        assert_eq!(fold_unit(&units, 0), 0xDC00);
        assert_eq!(fold_unit(&units, 2), 0xD800);
    }
}
