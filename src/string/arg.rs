//! Positional placeholder substitution.
//!
//! Patterns contain `%NN` / `%LNN` placeholders, where `NN` is one or two
//! ASCII digits naming a number from 1 to 99.  Substitution is by rank: the
//! distinct placeholder numbers are sorted, and the k-th argument replaces
//! every occurrence of the k-th smallest number.  Single-argument calls are
//! the same algorithm with one argument, which is what lets chained calls
//! fill a pattern left to right:
//!
//! ```
//! use unistr::UString;
//! let s = UString::from("%2-%1-%1").arg_str("x").arg_str("y");
//! assert_eq!(s, "y-x-x");
//! ```
//!
//! The `L` prefix requests locale-style rendering; it only affects numeric
//! arguments (digit grouping) and is preserved through the rank machinery
//! otherwise.  Rendering sums the exact output size first and writes into a
//! single allocation.

use crate::diag::diag;
use crate::string::number::{format_f64, format_i64, format_u64, DoubleForm, NumberFlags};
use crate::string::UString;
use crate::view::Utf16View;

// ─────────────────────────────────────────────────────────────────────────────
// Pattern parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Part {
    /// Literal span `[start, end)` of the pattern.
    Literal { start: usize, end: usize },
    /// Placeholder occupying `[start, end)` with its parsed number.
    Placeholder { number: u8, locale: bool, start: usize, end: usize },
}

#[inline]
fn ascii_digit(u: u16) -> Option<u8> {
    if (0x30..=0x39).contains(&u) {
        Some((u - 0x30) as u8)
    } else {
        None
    }
}

/// Splits the pattern into literal runs and placeholders.  Only ASCII
/// digits form placeholders; `%0`, a bare `%`, and `%L` without digits are
/// literal text.
fn parse_parts(units: &[u16]) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut lit_start = 0;
    let mut i = 0;
    while i < units.len() {
        if units[i] == u16::from(b'%') && i + 1 < units.len() {
            let mut j = i + 1;
            let locale = units[j] == u16::from(b'L') && j + 1 < units.len();
            if locale {
                j += 1;
            }
            if let Some(d1) = ascii_digit(units[j]) {
                let mut number = d1;
                let mut end = j + 1;
                if end < units.len() {
                    if let Some(d2) = ascii_digit(units[end]) {
                        number = number * 10 + d2;
                        end += 1;
                    }
                }
                if number >= 1 {
                    if lit_start < i {
                        parts.push(Part::Literal { start: lit_start, end: i });
                    }
                    parts.push(Part::Placeholder { number, locale, start: i, end });
                    i = end;
                    lit_start = end;
                    continue;
                }
            }
        }
        i += 1;
    }
    if lit_start < units.len() {
        parts.push(Part::Literal { start: lit_start, end: units.len() });
    }
    parts
}

/// Sorted, deduplicated placeholder numbers of a parsed pattern.
fn distinct_numbers(parts: &[Part]) -> Vec<u8> {
    let mut numbers: Vec<u8> = parts
        .iter()
        .filter_map(|p| match p {
            Part::Placeholder { number, .. } => Some(*number),
            Part::Literal { .. } => None,
        })
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}

// ─────────────────────────────────────────────────────────────────────────────
// Field-width padding
// ─────────────────────────────────────────────────────────────────────────────

/// Pads `text` to `|field_width|` units: positive widths right-align,
/// negative left-align.  A `0` fill on a right-aligned value keeps the sign
/// in front of the zeros.
fn padded(text: &[u16], field_width: isize, fill: u16) -> Vec<u16> {
    let width = field_width.unsigned_abs();
    if width <= text.len() {
        return text.to_vec();
    }
    let pad = width - text.len();
    let mut out = Vec::with_capacity(width);
    if field_width > 0 {
        let sign_first = fill == u16::from(b'0')
            && matches!(text.first(), Some(&u) if u == u16::from(b'-') || u == u16::from(b'+'));
        if sign_first {
            out.push(text[0]);
            out.extend(std::iter::repeat(fill).take(pad));
            out.extend_from_slice(&text[1..]);
        } else {
            out.extend(std::iter::repeat(fill).take(pad));
            out.extend_from_slice(text);
        }
    } else {
        out.extend_from_slice(text);
        out.extend(std::iter::repeat(fill).take(pad));
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Substitution
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// Core single-argument substitution: replaces every occurrence of the
    /// lowest placeholder number with `plain` (or `localized` at `%L`
    /// occurrences), padded to `field_width`.
    fn arg_replace(
        &self,
        field_width: isize,
        fill: u16,
        plain: &[u16],
        localized: Option<&[u16]>,
    ) -> UString {
        let units = self.as_slice();
        let parts = parse_parts(units);
        let numbers = distinct_numbers(&parts);
        let Some(&lowest) = numbers.first() else {
            diag(1, &format!("arg: no place marker in \"{self}\""));
            return self.clone();
        };

        let plain = padded(plain, field_width, fill);
        let localized = localized.map(|l| padded(l, field_width, fill));

        let mut size = 0;
        for part in &parts {
            size += match *part {
                Part::Literal { start, end } => end - start,
                Part::Placeholder { number, locale, start, end } => {
                    if number == lowest {
                        if locale { localized.as_ref().unwrap_or(&plain).len() } else { plain.len() }
                    } else {
                        end - start
                    }
                }
            };
        }

        let mut out = UString::with_capacity(size);
        for part in &parts {
            match *part {
                Part::Literal { start, end } => {
                    out.append(Utf16View::new(&units[start..end]));
                }
                Part::Placeholder { number, locale, start, end } => {
                    if number == lowest {
                        let text =
                            if locale { localized.as_ref().unwrap_or(&plain) } else { &plain };
                        out.append(Utf16View::new(text));
                    } else {
                        // Left for a later arg() call.
                        out.append(Utf16View::new(&units[start..end]));
                    }
                }
            }
        }
        out
    }

    /// Replaces the lowest-numbered placeholder with `a`, padded to
    /// `field_width` with `fill`.
    pub fn arg_view(&self, a: Utf16View<'_>, field_width: isize, fill: u16) -> UString {
        self.arg_replace(field_width, fill, a.as_slice(), None)
    }

    /// Replaces the lowest-numbered placeholder with `a`.
    pub fn arg(&self, a: &UString) -> UString {
        self.arg_view(a.view(), 0, u16::from(b' '))
    }

    /// Replaces the lowest-numbered placeholder with `a`.
    pub fn arg_str(&self, a: &str) -> UString {
        self.arg(&UString::from(a))
    }

    /// Replaces the lowest-numbered placeholder with `value` rendered in
    /// `base`.  `%L` occurrences group decimal digits.
    pub fn arg_int(&self, value: i64, field_width: isize, base: u32, fill: u16) -> UString {
        let plain = format_i64(value, base, NumberFlags::empty());
        let localized = format_i64(value, base, NumberFlags::GROUP_DIGITS);
        self.arg_replace(field_width, fill, plain.as_slice(), Some(localized.as_slice()))
    }

    /// Unsigned companion of [`arg_int`](Self::arg_int).
    pub fn arg_uint(&self, value: u64, field_width: isize, base: u32, fill: u16) -> UString {
        let plain = format_u64(value, base, NumberFlags::empty());
        let localized = format_u64(value, base, NumberFlags::GROUP_DIGITS);
        self.arg_replace(field_width, fill, plain.as_slice(), Some(localized.as_slice()))
    }

    /// Replaces the lowest-numbered placeholder with `value` rendered in
    /// `form` at `precision`.
    pub fn arg_double(
        &self,
        value: f64,
        field_width: isize,
        form: DoubleForm,
        precision: usize,
        fill: u16,
    ) -> UString {
        let plain = format_f64(value, form, precision, NumberFlags::empty());
        let localized = format_f64(value, form, precision, NumberFlags::GROUP_DIGITS);
        self.arg_replace(field_width, fill, plain.as_slice(), Some(localized.as_slice()))
    }

    /// Simultaneous substitution: the k-th argument replaces every
    /// occurrence of the k-th smallest distinct placeholder number.  Excess
    /// arguments are ignored; placeholders without an argument stay verbatim
    /// (and a diagnostic is emitted).
    pub fn multi_arg(&self, args: &[Utf16View<'_>]) -> UString {
        let units = self.as_slice();
        let parts = parse_parts(units);
        let numbers = distinct_numbers(&parts);
        if numbers.is_empty() {
            diag(1, &format!("arg: no place marker in \"{self}\""));
            return self.clone();
        }
        if args.len() < numbers.len() {
            diag(
                1,
                &format!(
                    "arg: {} argument(s) missing in \"{self}\"",
                    numbers.len() - args.len()
                ),
            );
        }

        let rank_of = |number: u8| numbers.binary_search(&number).expect("number was collected");

        let mut size = 0;
        for part in &parts {
            size += match *part {
                Part::Literal { start, end } => end - start,
                Part::Placeholder { number, start, end, .. } => {
                    let rank = rank_of(number);
                    if rank < args.len() { args[rank].len() } else { end - start }
                }
            };
        }

        let mut out = UString::with_capacity(size);
        for part in &parts {
            match *part {
                Part::Literal { start, end } => {
                    out.append(Utf16View::new(&units[start..end]));
                }
                Part::Placeholder { number, start, end, .. } => {
                    let rank = rank_of(number);
                    if rank < args.len() {
                        out.append(args[rank]);
                    } else {
                        out.append(Utf16View::new(&units[start..end]));
                    }
                }
            }
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> UString {
        UString::from(text)
    }

    #[test]
    fn chained_args_fill_by_rank() {
        assert_eq!(s("%2-%1-%1").arg_str("x").arg_str("y"), "y-x-x");
        assert_eq!(s("%1 of %2").arg_str("2").arg_str("3"), "2 of 3");
    }

    #[test]
    fn multi_arg_substitutes_simultaneously() {
        let pattern = s("%3 %1 %2 %1");
        let a: Vec<u16> = "a".encode_utf16().collect();
        let b: Vec<u16> = "b".encode_utf16().collect();
        let c: Vec<u16> = "c".encode_utf16().collect();
        let out = pattern.multi_arg(&[
            Utf16View::new(&a),
            Utf16View::new(&b),
            Utf16View::new(&c),
        ]);
        assert_eq!(out, "c a b a");
    }

    #[test]
    fn missing_arguments_stay_verbatim() {
        let pattern = s("%1 and %2");
        let x: Vec<u16> = "x".encode_utf16().collect();
        assert_eq!(pattern.multi_arg(&[Utf16View::new(&x)]), "x and %2");
        // A later call fills the rest.
        assert_eq!(pattern.arg_str("x").arg_str("y"), "x and y");
    }

    #[test]
    fn excess_arguments_are_ignored() {
        let pattern = s("%1!");
        let a: Vec<u16> = "hi".encode_utf16().collect();
        let b: Vec<u16> = "bye".encode_utf16().collect();
        assert_eq!(pattern.multi_arg(&[Utf16View::new(&a), Utf16View::new(&b)]), "hi!");
    }

    #[test]
    fn no_placeholder_returns_pattern() {
        assert_eq!(s("nothing here").arg_str("x"), "nothing here");
        assert_eq!(s("50%").arg_str("x"), "50%");
        assert_eq!(s("%0").arg_str("x"), "%0");
    }

    #[test]
    fn two_digit_placeholders() {
        assert_eq!(s("%10").arg_str("ten"), "ten");
        assert_eq!(s("%1 %12").arg_str("one"), "one %12");
        assert_eq!(s("%99").arg_str("最"), "最");
    }

    #[test]
    fn digits_only_ascii() {
        // A non-ASCII digit after % is literal text.
        assert_eq!(s("%١").arg_str("x"), "%١");
    }

    #[test]
    fn field_width_and_fill() {
        let x = s("[%1]");
        let v: Vec<u16> = "ab".encode_utf16().collect();
        assert_eq!(x.arg_view(Utf16View::new(&v), 5, u16::from(b' ')), "[   ab]");
        assert_eq!(x.arg_view(Utf16View::new(&v), -5, u16::from(b' ')), "[ab   ]");
        assert_eq!(x.arg_int(-7, 5, 10, u16::from(b'0')), "[-0007]");
        assert_eq!(x.arg_int(42, 4, 10, u16::from(b'0')), "[0042]");
    }

    #[test]
    fn numeric_and_locale_rendering() {
        assert_eq!(s("%1").arg_int(255, 0, 16, u16::from(b' ')), "ff");
        assert_eq!(s("%L1").arg_int(1234567, 0, 10, u16::from(b' ')), "1,234,567");
        assert_eq!(s("%1").arg_int(1234567, 0, 10, u16::from(b' ')), "1234567");
        assert_eq!(
            s("%1").arg_double(1.5, 0, DoubleForm::Decimal, 2, u16::from(b' ')),
            "1.50"
        );
    }

    #[test]
    fn unreplaced_placeholder_count_is_preserved() {
        // One arg consumes exactly one distinct number.
        let pattern = s("%1 %2 %3 %2");
        let once = pattern.arg_str("x");
        let count = |u: &UString| {
            let parts = parse_parts(u.as_slice());
            distinct_numbers(&parts).len()
        };
        assert_eq!(count(&pattern), 3);
        assert_eq!(count(&once), 2);
    }
}
