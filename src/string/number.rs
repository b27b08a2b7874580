//! Number parsing and rendering.
//!
//! Parsing follows the `(value, ok)` contract of the string API: failures
//! are ordinary `Err` values, never panics.  Leading and trailing whitespace
//! is accepted; anything else unparsed is an error.  Base 0 auto-detects
//! `0x`/`0o`/`0b` prefixes (and a bare leading `0` as octal).
//!
//! Rendering supports any base from 2 to 36 and three floating-point forms,
//! with a flag set for the usual printf-style variations (capital digits,
//! forced sign, blank before positive, digit grouping, zero-padded
//! exponent).

use bitflags::bitflags;

use crate::error::ParseNumberError;
use crate::string::UString;

bitflags! {
    /// Rendering variations for [`format_i64`] / [`format_f64`].
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct NumberFlags: u32 {
        /// Upper-case digits above 9 and an upper-case exponent marker.
        const CAPITAL = 1 << 0;
        /// Always write a sign, `+` included.
        const SHOW_SIGN = 1 << 1;
        /// Write a blank where a `+` would go.
        const BLANK_BEFORE_POSITIVE = 1 << 2;
        /// Group the integer part in threes.
        const GROUP_DIGITS = 1 << 3;
        /// Pad the exponent to at least two digits.
        const ZERO_PAD_EXPONENT = 1 << 4;
    }
}

/// Floating-point rendering forms.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DoubleForm {
    /// Fixed-point with `precision` fractional digits.
    Decimal,
    /// Scientific notation with `precision` fractional digits.
    Exponent,
    /// `precision` significant digits, shortest faithful style.
    SignificantDigits,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

fn is_parse_space(u: u16) -> bool {
    matches!(u, 0x09..=0x0D | 0x20)
}

fn trim(units: &[u16]) -> &[u16] {
    let start = units.iter().position(|&u| !is_parse_space(u)).unwrap_or(units.len());
    let end = units.iter().rposition(|&u| !is_parse_space(u)).map_or(start, |i| i + 1);
    &units[start..end]
}

fn digit_value(u: u16) -> Option<u64> {
    match u {
        0x30..=0x39 => Some(u64::from(u) - 0x30),        // 0-9
        0x41..=0x5A => Some(u64::from(u) - 0x41 + 10),   // A-Z
        0x61..=0x7A => Some(u64::from(u) - 0x61 + 10),   // a-z
        _ => None,
    }
}

/// Splits an optional sign off the front; returns (negative, rest).
fn split_sign(units: &[u16]) -> (bool, &[u16]) {
    match units.first() {
        Some(&0x2D) => (true, &units[1..]),
        Some(&0x2B) => (false, &units[1..]),
        _ => (false, units),
    }
}

/// Resolves base 0 against a prefix; returns (base, digits).
fn detect_base(units: &[u16], base: u32) -> Result<(u32, &[u16]), ParseNumberError> {
    if base != 0 {
        if !(2..=36).contains(&base) {
            return Err(ParseNumberError::InvalidBase);
        }
        // A 0x/0X prefix is accepted (and skipped) for base 16.
        if base == 16 && units.len() >= 2 && units[0] == 0x30 && (units[1] | 0x20) == 0x78 {
            return Ok((16, &units[2..]));
        }
        return Ok((base, units));
    }
    if units.len() >= 2 && units[0] == 0x30 {
        match units[1] | 0x20 {
            0x78 => return Ok((16, &units[2..])), // 0x
            0x6F => return Ok((8, &units[2..])),  // 0o
            0x62 => return Ok((2, &units[2..])),  // 0b
            _ => return Ok((8, &units[1..])),     // legacy leading zero
        }
    }
    Ok((10, units))
}

/// Parses an unsigned integer from UTF-16 units.
pub fn parse_u64(units: &[u16], base: u32) -> Result<u64, ParseNumberError> {
    let trimmed = trim(units);
    let (negative, rest) = split_sign(trimmed);
    if negative {
        return Err(ParseNumberError::InvalidDigit);
    }
    let (base, digits) = detect_base(rest, base)?;
    if digits.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    let mut value: u64 = 0;
    for &u in digits {
        let d = digit_value(u).filter(|&d| d < u64::from(base)).ok_or(ParseNumberError::InvalidDigit)?;
        value = value
            .checked_mul(u64::from(base))
            .and_then(|v| v.checked_add(d))
            .ok_or(ParseNumberError::OutOfRange)?;
    }
    Ok(value)
}

/// Parses a signed integer from UTF-16 units.
pub fn parse_i64(units: &[u16], base: u32) -> Result<i64, ParseNumberError> {
    let trimmed = trim(units);
    let (negative, rest) = split_sign(trimmed);
    let (base, digits) = detect_base(rest, base)?;
    if digits.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    let mut magnitude: u64 = 0;
    for &u in digits {
        let d = digit_value(u).filter(|&d| d < u64::from(base)).ok_or(ParseNumberError::InvalidDigit)?;
        magnitude = magnitude
            .checked_mul(u64::from(base))
            .and_then(|v| v.checked_add(d))
            .ok_or(ParseNumberError::OutOfRange)?;
    }
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(ParseNumberError::OutOfRange);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| ParseNumberError::OutOfRange)
    }
}

/// Parses a floating-point value from UTF-16 units.  Accepts the usual
/// fixed and scientific notations plus `inf`/`nan` (any case).
pub fn parse_f64(units: &[u16]) -> Result<f64, ParseNumberError> {
    let trimmed = trim(units);
    if trimmed.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    let mut text = String::with_capacity(trimmed.len());
    for &u in trimmed {
        // Everything a float literal can contain is ASCII.
        if u >= 0x80 {
            return Err(ParseNumberError::InvalidDigit);
        }
        text.push(u as u8 as char);
    }
    text.parse::<f64>().map_err(|_| ParseNumberError::InvalidDigit)
}

// ─────────────────────────────────────────────────────────────────────────────
// Integer rendering
// ─────────────────────────────────────────────────────────────────────────────

const DIGITS_LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const DIGITS_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn render_magnitude(mut v: u64, base: u32, flags: NumberFlags) -> String {
    let digits = if flags.contains(NumberFlags::CAPITAL) { DIGITS_UPPER } else { DIGITS_LOWER };
    let mut buf = Vec::new();
    loop {
        buf.push(digits[(v % u64::from(base)) as usize]);
        v /= u64::from(base);
        if v == 0 {
            break;
        }
    }
    let mut s: String = buf.iter().rev().map(|&b| b as char).collect();
    if flags.contains(NumberFlags::GROUP_DIGITS) && base == 10 {
        s = group_in_threes(&s);
    }
    s
}

fn group_in_threes(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(b as char);
    }
    out
}

fn apply_sign(negative: bool, body: String, flags: NumberFlags) -> String {
    if negative {
        format!("-{body}")
    } else if flags.contains(NumberFlags::SHOW_SIGN) {
        format!("+{body}")
    } else if flags.contains(NumberFlags::BLANK_BEFORE_POSITIVE) {
        format!(" {body}")
    } else {
        body
    }
}

/// Renders a signed integer in the given base (2..=36).
pub fn format_i64(value: i64, base: u32, flags: NumberFlags) -> UString {
    debug_assert!((2..=36).contains(&base));
    let negative = value < 0;
    let magnitude = value.unsigned_abs();
    UString::from(apply_sign(negative, render_magnitude(magnitude, base, flags), flags).as_str())
}

/// Renders an unsigned integer in the given base (2..=36).
pub fn format_u64(value: u64, base: u32, flags: NumberFlags) -> UString {
    debug_assert!((2..=36).contains(&base));
    UString::from(apply_sign(false, render_magnitude(value, base, flags), flags).as_str())
}

// ─────────────────────────────────────────────────────────────────────────────
// Floating-point rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Renders a double in the requested form.  `precision` is the fractional
/// digit count for [`DoubleForm::Decimal`] / [`DoubleForm::Exponent`] and
/// the significant digit count (minimum 1) for
/// [`DoubleForm::SignificantDigits`].
pub fn format_f64(value: f64, form: DoubleForm, precision: usize, flags: NumberFlags) -> UString {
    let negative = value.is_sign_negative() && !value.is_nan();
    let magnitude = value.abs();

    let body = if magnitude.is_nan() {
        String::from(if flags.contains(NumberFlags::CAPITAL) { "NAN" } else { "nan" })
    } else if magnitude.is_infinite() {
        String::from(if flags.contains(NumberFlags::CAPITAL) { "INF" } else { "inf" })
    } else {
        match form {
            DoubleForm::Decimal => {
                let mut s = format!("{magnitude:.precision$}");
                if flags.contains(NumberFlags::GROUP_DIGITS) {
                    s = group_decimal(&s);
                }
                s
            }
            DoubleForm::Exponent => render_exponent(magnitude, precision, flags),
            DoubleForm::SignificantDigits => render_significant(magnitude, precision.max(1), flags),
        }
    };
    UString::from(apply_sign(negative, body, flags).as_str())
}

fn group_decimal(s: &str) -> String {
    match s.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_in_threes(int), frac),
        None => group_in_threes(s),
    }
}

/// `m.mmme±X` with the exponent optionally zero-padded to two digits.
fn render_exponent(magnitude: f64, precision: usize, flags: NumberFlags) -> String {
    let raw = format!("{magnitude:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').expect("exponent format");
    let exp: i32 = exp.parse().expect("exponent digits");
    let e = if flags.contains(NumberFlags::CAPITAL) { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    let abs = exp.unsigned_abs();
    if flags.contains(NumberFlags::ZERO_PAD_EXPONENT) {
        format!("{mantissa}{e}{sign}{abs:02}")
    } else {
        format!("{mantissa}{e}{sign}{abs}")
    }
}

/// Shortest-style rendering with a fixed number of significant digits:
/// fixed-point for moderate exponents, scientific otherwise, trailing zeros
/// trimmed either way.
fn render_significant(magnitude: f64, significant: usize, flags: NumberFlags) -> String {
    if magnitude == 0.0 {
        return String::from("0");
    }
    let exp10 = magnitude.abs().log10().floor() as i32;
    if exp10 >= -4 && (exp10 as i64) < significant as i64 {
        let decimals = (significant as i64 - 1 - i64::from(exp10)).max(0) as usize;
        let fixed = format!("{magnitude:.decimals$}");
        trim_trailing_zeros(&fixed)
    } else {
        let sci = render_exponent(magnitude, significant - 1, flags);
        // Trim zeros inside the mantissa only.
        let (mantissa, exp) = sci.split_once(['e', 'E']).expect("exponent format");
        let e = if flags.contains(NumberFlags::CAPITAL) { 'E' } else { 'e' };
        format!("{}{e}{exp}", trim_trailing_zeros(mantissa))
    }
}

fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// UString surface
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// Parses the string as a signed integer in `base` (0 = auto-detect).
    pub fn to_int(&self, base: u32) -> Result<i64, ParseNumberError> {
        parse_i64(self.as_slice(), base)
    }

    /// Parses the string as an unsigned integer in `base` (0 = auto-detect).
    pub fn to_uint(&self, base: u32) -> Result<u64, ParseNumberError> {
        parse_u64(self.as_slice(), base)
    }

    /// Parses the string as a double.
    pub fn to_double(&self) -> Result<f64, ParseNumberError> {
        parse_f64(self.as_slice())
    }

    /// A signed integer rendered in `base`.
    pub fn number(value: i64, base: u32) -> UString {
        format_i64(value, base, NumberFlags::empty())
    }

    /// An unsigned integer rendered in `base`.
    pub fn number_unsigned(value: u64, base: u32) -> UString {
        format_u64(value, base, NumberFlags::empty())
    }

    /// A double rendered in `form` with `precision`.
    pub fn number_double(value: f64, form: DoubleForm, precision: usize) -> UString {
        format_f64(value, form, precision, NumberFlags::empty())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
