//! Latin-1 ↔ UTF-16.
//!
//! Widening is exact: byte value `n` is code point `U+00n`.  Narrowing comes
//! in two variants: the lossy one turns every code unit above `U+00FF` into
//! `?`, the unchecked one truncates to the low byte and is only meaningful
//! when the caller already knows the input is Latin-1 (it is the exact
//! inverse of widening for arbitrary byte sequences).

/// Widens Latin-1 bytes into the front of `dst`.  Returns the number of
/// units written (`src.len()`).
///
/// Panics if `dst` is shorter than `src` — the caller sizes the destination.
pub fn latin1_to_utf16(dst: &mut [u16], src: &[u8]) -> usize {
    assert!(dst.len() >= src.len());
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = u16::from(s);
    }
    src.len()
}

/// Widens Latin-1 bytes into freshly allocated UTF-16.
pub fn latin1_to_utf16_vec(src: &[u8]) -> Vec<u16> {
    src.iter().map(|&b| u16::from(b)).collect()
}

/// Narrows UTF-16 to Latin-1, replacing every code unit above `U+00FF`
/// (surrogate halves included) with `?`.  Output length equals input length.
pub fn utf16_to_latin1_lossy(dst: &mut [u8], src: &[u16]) -> usize {
    assert!(dst.len() >= src.len());
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = if s > 0x00FF { b'?' } else { s as u8 };
    }
    src.len()
}

/// Narrows UTF-16 to Latin-1 by truncating each unit to its low byte.  The
/// inverse of [`latin1_to_utf16`]; garbage in, garbage out for anything
/// above `U+00FF`.
pub fn utf16_to_latin1_unchecked(dst: &mut [u8], src: &[u16]) -> usize {
    assert!(dst.len() >= src.len());
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = s as u8;
    }
    src.len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
