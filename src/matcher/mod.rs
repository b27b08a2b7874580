//! Substring search.
//!
//! Submodules:
//! - [`utf16`]  — [`StringMatcher`]: Boyer–Moore over UTF-16 patterns
//! - [`latin1`] — [`Latin1Matcher`]: Boyer–Moore over Latin-1 patterns
//!
//! This module also provides the free search functions used by one-off
//! lookups: short needles run a rolling-hash loop, longer ones build a
//! matcher on the fly.  The rolling hash is the recurrence
//! `h' = ((h - leaving << (n-1)) << 1) + entering` on the platform word with
//! wraparound; hash equality is always confirmed by a full comparison.

pub mod latin1;
pub mod utf16;

pub use latin1::Latin1Matcher;
pub use utf16::StringMatcher;

use crate::config::HASH_SEARCH_MAX_NEEDLE;
use crate::tables::fold_unit;
use crate::view::{CaseSensitivity, Utf16View};

// ─────────────────────────────────────────────────────────────────────────────
// Folded unit access
// ─────────────────────────────────────────────────────────────────────────────

/// The unit at `units[i]`, folded when the search is case-insensitive.
/// Folding sees the whole slice so surrogate pairs fold as code points.
#[inline]
pub(crate) fn search_unit(units: &[u16], i: usize, cs: CaseSensitivity) -> u16 {
    match cs {
        CaseSensitivity::Sensitive => units[i],
        CaseSensitivity::Insensitive => fold_unit(units, i),
    }
}

/// Unit-wise equality of `haystack[hay_start..hay_start+needle.len()]` and
/// `needle` under `cs`.
pub(crate) fn window_equals(
    haystack: &[u16],
    hay_start: usize,
    needle: &[u16],
    cs: CaseSensitivity,
) -> bool {
    (0..needle.len()).all(|i| search_unit(haystack, hay_start + i, cs) == search_unit(needle, i, cs))
}

// ─────────────────────────────────────────────────────────────────────────────
// Forward search
// ─────────────────────────────────────────────────────────────────────────────

/// Lowest index `i >= from` where `needle` occurs in `haystack` under `cs`.
/// An empty needle matches at `from` whenever `from <= haystack.len()`.
pub fn find_string(
    haystack: &[u16],
    from: usize,
    needle: &[u16],
    cs: CaseSensitivity,
) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    if needle.len() > haystack.len() - from {
        return None;
    }
    if needle.len() > HASH_SEARCH_MAX_NEEDLE {
        let m = StringMatcher::new(Utf16View::new(needle), cs);
        let r = m.index_in(Utf16View::new(haystack), from as isize);
        return if r < 0 { None } else { Some(r as usize) };
    }
    hash_find(haystack, from, needle, cs)
}

/// Rolling-hash forward search for short needles.
fn hash_find(
    haystack: &[u16],
    from: usize,
    needle: &[u16],
    cs: CaseSensitivity,
) -> Option<usize> {
    let sl = needle.len();
    let sl_minus_1 = (sl - 1) as u32;
    let last = haystack.len() - sl;

    let mut hash_needle: usize = 0;
    let mut hash_hay: usize = 0;
    for i in 0..sl {
        hash_needle = hash_needle.wrapping_shl(1).wrapping_add(search_unit(needle, i, cs).into());
        hash_hay = hash_hay.wrapping_shl(1).wrapping_add(search_unit(haystack, from + i, cs).into());
    }

    let mut pos = from;
    loop {
        if hash_hay == hash_needle && window_equals(haystack, pos, needle, cs) {
            return Some(pos);
        }
        if pos == last {
            return None;
        }
        // Slide the window right: drop the leading unit, admit the next.
        // Once the window spans the whole hash word the leading unit has
        // already shifted out, so there is nothing to subtract.
        if sl_minus_1 < usize::BITS {
            let leaving = usize::from(search_unit(haystack, pos, cs));
            hash_hay = hash_hay.wrapping_sub(leaving.wrapping_shl(sl_minus_1));
        }
        let entering = usize::from(search_unit(haystack, pos + sl, cs));
        hash_hay = hash_hay.wrapping_shl(1).wrapping_add(entering);
        pos += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backward search
// ─────────────────────────────────────────────────────────────────────────────

/// Highest index `i <= from` where `needle` occurs, or -1.
///
/// A negative `from` counts back from the end (`-1` names the last unit), so
/// an empty needle with a negative `from` cannot match at the end-of-string
/// position while `from = haystack.len()` can.
pub fn rfind_string(haystack: &[u16], from: isize, needle: &[u16], cs: CaseSensitivity) -> isize {
    let l = haystack.len() as isize;
    let sl = needle.len() as isize;

    if sl == 0 {
        let resolved = if from < 0 { from + l } else { from };
        return if resolved < 0 || resolved > l { -1 } else { resolved };
    }

    let mut from = if from < 0 { from + l } else { from };
    let delta = l - sl;
    if from < 0 || delta < 0 {
        return -1;
    }
    if from > delta {
        from = delta;
    }

    let sl = sl as usize;
    let pos = from as usize;
    let sl_minus_1 = (sl - 1) as u32;

    // Backward windows weight the unit at offset `i` by `2^i`, so sliding
    // left drops the trailing unit and admits the one before the window.
    let mut hash_needle: usize = 0;
    let mut hash_hay: usize = 0;
    for i in (0..sl).rev() {
        hash_needle = hash_needle.wrapping_shl(1).wrapping_add(search_unit(needle, i, cs).into());
        hash_hay = hash_hay.wrapping_shl(1).wrapping_add(search_unit(haystack, pos + i, cs).into());
    }

    let mut pos = pos;
    loop {
        if hash_hay == hash_needle && window_equals(haystack, pos, needle, cs) {
            return pos as isize;
        }
        if pos == 0 {
            return -1;
        }
        pos -= 1;
        if sl_minus_1 < usize::BITS {
            let leaving = usize::from(search_unit(haystack, pos + sl, cs));
            hash_hay = hash_hay.wrapping_sub(leaving.wrapping_shl(sl_minus_1));
        }
        let entering = usize::from(search_unit(haystack, pos, cs));
        hash_hay = hash_hay.wrapping_shl(1).wrapping_add(entering);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn short_needles_use_the_hash_loop() {
        let hay = u("the cat sat on the mat");
        assert_eq!(find_string(&hay, 0, &u("cat"), CaseSensitivity::Sensitive), Some(4));
        assert_eq!(find_string(&hay, 5, &u("at"), CaseSensitivity::Sensitive), Some(5));
        assert_eq!(find_string(&hay, 6, &u("at"), CaseSensitivity::Sensitive), Some(9));
        assert_eq!(find_string(&hay, 0, &u("dog"), CaseSensitivity::Sensitive), None);
    }

    #[test]
    fn long_needles_promote_to_a_matcher() {
        let hay = u("find the needle in haystack");
        assert_eq!(find_string(&hay, 0, &u("needle"), CaseSensitivity::Sensitive), Some(9));
        assert_eq!(find_string(&hay, 10, &u("needle"), CaseSensitivity::Sensitive), None);
    }

    #[test]
    fn empty_needle_rule() {
        let hay = u("abc");
        assert_eq!(find_string(&hay, 0, &[], CaseSensitivity::Sensitive), Some(0));
        assert_eq!(find_string(&hay, 3, &[], CaseSensitivity::Sensitive), Some(3));
        assert_eq!(find_string(&hay, 4, &[], CaseSensitivity::Sensitive), None);
    }

    #[test]
    fn case_insensitive_hash_search() {
        let hay = u("The Cat");
        assert_eq!(find_string(&hay, 0, &u("cat"), CaseSensitivity::Insensitive), Some(4));
        assert_eq!(find_string(&hay, 0, &u("cat"), CaseSensitivity::Sensitive), None);
    }

    #[test]
    fn backward_search_basics() {
        let hay = u("abab");
        assert_eq!(rfind_string(&hay, -1, &u("ab"), CaseSensitivity::Sensitive), 2);
        assert_eq!(rfind_string(&hay, 1, &u("ab"), CaseSensitivity::Sensitive), 0);
        assert_eq!(rfind_string(&hay, -1, &u("ba"), CaseSensitivity::Sensitive), 1);
        assert_eq!(rfind_string(&hay, -1, &u("zz"), CaseSensitivity::Sensitive), -1);
    }

    #[test]
    fn backward_empty_needle_asymmetry() {
        let hay = u("abc");
        // Negative from resolves against the length and excludes the end.
        assert_eq!(rfind_string(&hay, -1, &[], CaseSensitivity::Sensitive), 2);
        // Non-negative from includes the end-of-string position.
        assert_eq!(rfind_string(&hay, 3, &[], CaseSensitivity::Sensitive), 3);
        assert_eq!(rfind_string(&hay, 4, &[], CaseSensitivity::Sensitive), -1);
        assert_eq!(rfind_string(&hay, -4, &[], CaseSensitivity::Sensitive), -1);
    }

    #[test]
    fn backward_search_long_needle() {
        let mut hay = u("x").repeat(300);
        let needle = u("x").repeat(280);
        assert_eq!(
            rfind_string(&hay, -1, &needle, CaseSensitivity::Sensitive),
            20
        );
        hay[299] = b'y' as u16;
        assert_eq!(
            rfind_string(&hay, -1, &needle, CaseSensitivity::Sensitive),
            19
        );
    }
}
