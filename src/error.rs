//! Error types for the recoverable failure modes.
//!
//! Only number parsing has a recoverable error here.  Decoding never fails
//! (ill-formed input becomes `U+FFFD` replacements; strict callers use the
//! `is_valid_*` predicates), and allocation failure is fatal and routed
//! through [`std::alloc::handle_alloc_error`] by the storage layer.

use thiserror::Error;

/// Failure modes of [`to_int`](crate::string::UString::to_int),
/// [`to_uint`](crate::string::UString::to_uint) and
/// [`to_double`](crate::string::UString::to_double).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ParseNumberError {
    /// The input was empty, or contained only whitespace.
    #[error("empty input")]
    Empty,
    /// A character was not a valid digit in the requested base.
    #[error("invalid digit in input")]
    InvalidDigit,
    /// The parsed value does not fit the target type.
    #[error("number out of range")]
    OutOfRange,
    /// The requested base is outside 2..=36 (and not the auto-detect 0).
    #[error("base out of range")]
    InvalidBase,
}
