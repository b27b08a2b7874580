//! Boyer–Moore matcher for UTF-16 patterns.
//!
//! The matcher owns a copy of its pattern and a 256-entry skip table built
//! once per (pattern, sensitivity) pair, so one matcher amortizes the setup
//! across many haystacks.  Code units hash into the table through their low
//! byte; collisions only cost a verification pass, never a miss.
//!
//! Case-insensitive matching folds up to [`FOLD_BUFFER_CAPACITY`] leading
//! pattern units into a fold buffer.  A longer pattern verifies in two
//! steps: the buffered prefix through the skip table, then the remaining
//! tail with a folded comparison of the haystack suffix.

use crate::config::FOLD_BUFFER_CAPACITY;
use crate::tables::{fold_latin1, fold_unit};
use crate::view::{CaseSensitivity, Utf16View};

// ─────────────────────────────────────────────────────────────────────────────
// Skip-table hash
// ─────────────────────────────────────────────────────────────────────────────

/// Hash of the unit at `units[i]` into the 8-bit skip-table alphabet.
#[inline(always)]
fn skip_hash(units: &[u16], i: usize, cs: CaseSensitivity) -> usize {
    match cs {
        CaseSensitivity::Sensitive => (units[i] & 0xFF) as usize,
        CaseSensitivity::Insensitive => fold_latin1((fold_unit(units, i) & 0xFF) as u8) as usize,
    }
}

fn build_skiptable(pattern: &[u16], cs: CaseSensitivity) -> [u8; 256] {
    let len = match cs {
        CaseSensitivity::Sensitive => pattern.len(),
        CaseSensitivity::Insensitive => pattern.len().min(FOLD_BUFFER_CAPACITY),
    };
    let l = len.min(255);
    let mut table = [l as u8; 256];
    // The last `l` pattern positions seed the table; the final position gets
    // skip 0, which is what sends the search loop into verification.
    let base = len - l;
    for j in 0..l {
        table[skip_hash(pattern, base + j, cs)] = (l - 1 - j) as u8;
    }
    table
}

// ─────────────────────────────────────────────────────────────────────────────
// Matcher
// ─────────────────────────────────────────────────────────────────────────────

/// Which verification data the matcher carries; built once per pattern and
/// sensitivity change.
#[derive(Clone, Debug)]
enum Verifier {
    /// Compare raw units against the pattern.
    Exact,
    /// Compare folded units against this folded copy of the pattern prefix
    /// (capped at [`FOLD_BUFFER_CAPACITY`] units).
    Folded(Vec<u16>),
}

/// Reusable Boyer–Moore searcher for a UTF-16 pattern.
#[derive(Clone, Debug)]
pub struct StringMatcher {
    pattern: Vec<u16>,
    cs: CaseSensitivity,
    skiptable: [u8; 256],
    verifier: Verifier,
}

impl StringMatcher {
    /// Builds a matcher for `pattern` under `cs`.
    pub fn new(pattern: Utf16View<'_>, cs: CaseSensitivity) -> Self {
        let mut m = StringMatcher {
            pattern: pattern.as_slice().to_vec(),
            cs,
            skiptable: [0; 256],
            verifier: Verifier::Exact,
        };
        m.rebuild();
        m
    }

    /// The pattern being searched for.
    pub fn pattern(&self) -> Utf16View<'_> {
        Utf16View::new(&self.pattern)
    }

    /// Replaces the pattern and rebuilds the skip table.
    pub fn set_pattern(&mut self, pattern: Utf16View<'_>) {
        self.pattern = pattern.as_slice().to_vec();
        self.rebuild();
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.cs
    }

    /// Changes the sensitivity and rebuilds the skip table.  A no-op when
    /// the sensitivity is unchanged.
    pub fn set_case_sensitivity(&mut self, cs: CaseSensitivity) {
        if self.cs == cs {
            return;
        }
        self.cs = cs;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.skiptable = build_skiptable(&self.pattern, self.cs);
        self.verifier = match self.cs {
            CaseSensitivity::Sensitive => Verifier::Exact,
            CaseSensitivity::Insensitive => {
                let fold_len = self.pattern.len().min(FOLD_BUFFER_CAPACITY);
                let folded = (0..fold_len).map(|i| fold_unit(&self.pattern, i)).collect();
                Verifier::Folded(folded)
            }
        };
    }

    #[cfg(test)]
    pub(crate) fn skiptable(&self) -> &[u8; 256] {
        &self.skiptable
    }

    /// Lowest index `i >= max(from, 0)` at which the pattern occurs in
    /// `haystack`, or -1.  An empty pattern matches at `from` whenever
    /// `from <= haystack.len()`.
    pub fn index_in(&self, haystack: Utf16View<'_>, from: isize) -> isize {
        let from = from.max(0) as usize;
        let hay = haystack.as_slice();
        match &self.verifier {
            Verifier::Exact => self.find_exact(hay, from),
            Verifier::Folded(folded) => self.find_folded(hay, from, folded),
        }
    }

    fn find_exact(&self, hay: &[u16], from: usize) -> isize {
        let l = hay.len();
        let pat = &self.pattern;
        let pl = pat.len();
        if pl == 0 {
            return if from > l { -1 } else { from as isize };
        }

        let pl_minus_1 = pl - 1;
        let mut current = from + pl_minus_1;
        while current < l {
            let mut skip = self.skiptable[(hay[current] & 0xFF) as usize] as usize;
            if skip == 0 {
                // Possible match: walk backward over the window.
                while skip < pl {
                    if hay[current - skip] != pat[pl_minus_1 - skip] {
                        break;
                    }
                    skip += 1;
                }
                if skip > pl_minus_1 {
                    return (current - pl_minus_1) as isize;
                }
                // Mismatch: a one-unit skip unless the offending unit cannot
                // occur in the pattern at all.
                if self.skiptable[(hay[current - skip] & 0xFF) as usize] as usize == pl {
                    skip = pl - skip;
                } else {
                    skip = 1;
                }
            }
            current += skip;
        }
        -1
    }

    fn find_folded(&self, hay: &[u16], from: usize, folded: &[u16]) -> isize {
        let l = hay.len();
        let pl = self.pattern.len();
        if pl == 0 {
            return if from > l { -1 } else { from as isize };
        }

        let fold_len = folded.len();
        let rest_needle = &self.pattern[fold_len..];
        let fold_end = fold_len - 1;
        let mut current = from + fold_end;
        while current < l {
            let mut skip =
                self.skiptable[fold_latin1((fold_unit(hay, current) & 0xFF) as u8) as usize]
                    as usize;
            if skip == 0 {
                while skip < fold_len {
                    if fold_unit(hay, current - skip) != folded[fold_end - skip] {
                        break;
                    }
                    skip += 1;
                }
                if skip > fold_end {
                    // The buffered prefix matched; for patterns longer than
                    // the fold buffer the tail still has to agree.
                    let candidate = current - fold_end;
                    let rest_start = l.min(candidate + fold_len);
                    if rest_needle.is_empty()
                        || folded_starts_with(&hay[rest_start..], rest_needle)
                    {
                        return candidate as isize;
                    }
                    // Tail mismatch after a full prefix match: step one unit
                    // and rescan.
                    skip = 1;
                } else if self.skiptable
                    [fold_latin1((fold_unit(hay, current - skip) & 0xFF) as u8) as usize]
                    as usize
                    == fold_len
                {
                    skip = fold_len - skip;
                } else {
                    skip = 1;
                }
            }
            current += skip;
        }
        -1
    }
}

/// Folded unit-wise prefix test used by the long-pattern tail verification.
fn folded_starts_with(hay: &[u16], needle: &[u16]) -> bool {
    if needle.len() > hay.len() {
        return false;
    }
    (0..needle.len()).all(|i| fold_unit(hay, i) == fold_unit(needle, i))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
