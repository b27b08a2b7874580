//! Cross-encoding comparison.
//!
//! Every pair of encodings in {UTF-16, Latin-1, UTF-8} can be compared,
//! case-sensitively or folded.  Rather than nine pairwise functions, each
//! view type decodes itself into a stream of code points ([`DecodableView`])
//! and a single comparator walks the two streams:
//!
//! - case-sensitive comparison orders by scalar value;
//! - case-insensitive comparison folds each code point first;
//! - when one stream is a prefix of the other, the shorter sorts first.
//!
//! Latin-1 bytes decode by zero-extension, UTF-8 with `U+FFFD` replacement,
//! and UTF-16 passes unpaired surrogates through as their own values so the
//! order is total for any input.

use crate::convert::Utf8CodePoints;
use crate::tables::fold_code_point;
use crate::view::utf16::Utf16CodePoints;
use crate::view::{CaseSensitivity, Encoding, Latin1View, Utf16View, Utf8View};

// ─────────────────────────────────────────────────────────────────────────────
// Per-encoding decoders
// ─────────────────────────────────────────────────────────────────────────────

/// Code-point stream over any of the three view encodings.
pub enum CodePointStream<'a> {
    Utf16(Utf16CodePoints<'a>),
    Latin1(core::slice::Iter<'a, u8>),
    Utf8(Utf8CodePoints<'a>),
}

impl Iterator for CodePointStream<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        match self {
            CodePointStream::Utf16(it) => it.next(),
            CodePointStream::Latin1(it) => it.next().map(|&b| u32::from(b)),
            CodePointStream::Utf8(it) => it.next(),
        }
    }
}

/// A view that can decode itself into code points.
pub trait DecodableView {
    fn encoding(&self) -> Encoding;
    /// Length in code units (16-bit for UTF-16, bytes otherwise).
    fn unit_len(&self) -> usize;
    fn stream(&self) -> CodePointStream<'_>;
}

impl DecodableView for Utf16View<'_> {
    fn encoding(&self) -> Encoding {
        Encoding::Utf16
    }
    fn unit_len(&self) -> usize {
        self.len()
    }
    fn stream(&self) -> CodePointStream<'_> {
        CodePointStream::Utf16(self.code_points())
    }
}

impl DecodableView for Latin1View<'_> {
    fn encoding(&self) -> Encoding {
        Encoding::Latin1
    }
    fn unit_len(&self) -> usize {
        self.len()
    }
    fn stream(&self) -> CodePointStream<'_> {
        CodePointStream::Latin1(self.as_slice().iter())
    }
}

impl DecodableView for Utf8View<'_> {
    fn encoding(&self) -> Encoding {
        Encoding::Utf8
    }
    fn unit_len(&self) -> usize {
        self.len()
    }
    fn stream(&self) -> CodePointStream<'_> {
        CodePointStream::Utf8(Utf8CodePoints::new(self.as_slice()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// The comparator
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn maybe_fold(cp: u32, cs: CaseSensitivity) -> u32 {
    match cs {
        CaseSensitivity::Sensitive => cp,
        CaseSensitivity::Insensitive => fold_code_point(cp),
    }
}

/// Compares two code-point streams.  Negative / zero / positive with the
/// usual meaning; exhaustion ties break toward the shorter stream.
pub fn compare_streams<A, B>(mut a: A, mut b: B, cs: CaseSensitivity) -> i32
where
    A: Iterator<Item = u32>,
    B: Iterator<Item = u32>,
{
    loop {
        match (a.next(), b.next()) {
            (Some(ca), Some(cb)) => {
                let (ca, cb) = (maybe_fold(ca, cs), maybe_fold(cb, cs));
                if ca != cb {
                    return if ca < cb { -1 } else { 1 };
                }
            }
            (Some(_), None) => return 1,
            (None, Some(_)) => return -1,
            (None, None) => return 0,
        }
    }
}

/// Compares two views of any encoding pair.
pub fn compare_views<A, B>(a: &A, b: &B, cs: CaseSensitivity) -> i32
where
    A: DecodableView + ?Sized,
    B: DecodableView + ?Sized,
{
    compare_streams(a.stream(), b.stream(), cs)
}

/// Equality across any encoding pair.  Same-encoding case-sensitive
/// comparisons short-circuit on a length mismatch.
pub fn equal_views<A, B>(a: &A, b: &B, cs: CaseSensitivity) -> bool
where
    A: DecodableView + ?Sized,
    B: DecodableView + ?Sized,
{
    if cs == CaseSensitivity::Sensitive
        && a.encoding() == b.encoding()
        && a.unit_len() != b.unit_len()
    {
        return false;
    }
    compare_views(a, b, cs) == 0
}

/// Whether `a` begins with the code points of `prefix`.
pub fn starts_with_views<A, B>(a: &A, prefix: &B, cs: CaseSensitivity) -> bool
where
    A: DecodableView + ?Sized,
    B: DecodableView + ?Sized,
{
    let mut sa = a.stream();
    let mut sp = prefix.stream();
    loop {
        match sp.next() {
            None => return true,
            Some(cp) => match sa.next() {
                Some(ca) if maybe_fold(ca, cs) == maybe_fold(cp, cs) => {}
                _ => return false,
            },
        }
    }
}

/// Whether `a` ends with the code points of `suffix`.
pub fn ends_with_views<A, B>(a: &A, suffix: &B, cs: CaseSensitivity) -> bool
where
    A: DecodableView + ?Sized,
    B: DecodableView + ?Sized,
{
    let n_a = a.stream().count();
    let n_s = suffix.stream().count();
    if n_s > n_a {
        return false;
    }
    let tail = a.stream().skip(n_a - n_s);
    compare_streams(tail, suffix.stream(), cs) == 0
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice-level conveniences
// ─────────────────────────────────────────────────────────────────────────────

/// Compares two UTF-16 slices.
pub fn compare_utf16(a: &[u16], b: &[u16], cs: CaseSensitivity) -> i32 {
    compare_streams(Utf16CodePoints::new(a), Utf16CodePoints::new(b), cs)
}

/// Equality of two UTF-16 slices.
pub fn equal_utf16(a: &[u16], b: &[u16], cs: CaseSensitivity) -> bool {
    if cs == CaseSensitivity::Sensitive {
        return a == b;
    }
    compare_utf16(a, b, cs) == 0
}

// ─────────────────────────────────────────────────────────────────────────────
// Locale-aware collation hook
// ─────────────────────────────────────────────────────────────────────────────

/// Collates two UTF-16 strings using the process locale.
///
/// On Unix this converts both sides to the C library's multibyte encoding
/// (via UTF-8, which is what every contemporary locale uses) and calls
/// `strcoll`.  Elsewhere, or when either side contains an embedded zero
/// unit, it falls back to plain code-point comparison.
pub fn locale_aware_compare(a: &[u16], b: &[u16]) -> i32 {
    #[cfg(unix)]
    {
        use std::ffi::CString;

        let a8 = crate::convert::utf16_to_utf8(a);
        let b8 = crate::convert::utf16_to_utf8(b);
        if let (Ok(ca), Ok(cb)) = (CString::new(a8), CString::new(b8)) {
            // SAFETY: both pointers are valid zero-terminated C strings for
            // the duration of the call.
            let r = unsafe { libc::strcoll(ca.as_ptr(), cb.as_ptr()) };
            return r.signum();
        }
    }
    compare_utf16(a, b, CaseSensitivity::Sensitive).signum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
