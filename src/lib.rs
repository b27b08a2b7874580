// unistr — implicitly shared UTF-16 strings with Boyer–Moore search,
// cross-encoding comparison, conversion, and normalization.

pub mod compare;
pub mod config;
pub mod convert;
pub mod diag;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod scan;
pub mod string;
pub mod tables;
pub mod view;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// The owned, implicitly shared, mutable UTF-16 string.
pub use string::UString;

/// Non-owning views over the three supported encodings.
pub use view::{Latin1View, Utf16View, Utf8View};

/// Case handling for comparisons and searches.
pub use view::CaseSensitivity;

/// Empty-part policy for [`Utf16View::split`].
pub use view::SplitBehavior;

/// Reusable Boyer–Moore searchers.
pub use matcher::{Latin1Matcher, StringMatcher};

/// One-off searches (rolling hash for short needles, matcher for long ones).
pub use matcher::{find_string, rfind_string};

/// The cross-encoding comparison matrix and collation hook.
pub use compare::{compare_views, equal_views, locale_aware_compare, DecodableView};

/// One-shot encoding conversions.
pub use convert::{
    is_valid_utf16, is_valid_utf8, latin1_to_utf16, ucs4_to_utf16, utf16_bytes_to_utf16,
    utf16_to_latin1_lossy, utf16_to_latin1_unchecked, utf16_to_ucs4, utf16_to_utf8, utf8_to_utf16,
};

/// Unicode normalization.
pub use normalize::{normalize, NormalizationForm, UnicodeVersion};

/// Number rendering configuration (used by `arg` and the `number`
/// constructors).
pub use string::{DoubleForm, NumberFlags};

/// Recoverable error of the number parsers.
pub use error::ParseNumberError;

/// Diagnostic channel control (silent by default).
pub use diag::{diagnostic_level, set_diagnostic_level};

// ─────────────────────────────────────────────────────────────────────────────
// Version API
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION_MAJOR: i32 = 0;
pub const VERSION_MINOR: i32 = 3;
pub const VERSION_PATCH: i32 = 1;
pub const VERSION_STRING: &str = "0.3.1";

/// Returns the library version as one number (e.g. 301 for 0.3.1).
pub fn version_number() -> i32 {
    VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_PATCH
}

/// Returns the library version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

/// The character-database version the bundled tables were generated from.
pub fn unicode_version() -> UnicodeVersion {
    UnicodeVersion::CURRENT
}
