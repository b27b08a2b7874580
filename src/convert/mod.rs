//! One-shot encoding conversions.
//!
//! Submodules:
//! - [`latin1`] — Latin-1 ↔ UTF-16 (widening, lossy and unchecked narrowing)
//! - [`utf8`]   — UTF-8 ↔ UTF-16 with `U+FFFD` substitution, validity scans
//! - [`ucs4`]   — UCS-4 ↔ UTF-16 (surrogate pairing)
//! - [`bom`]    — UTF-16 byte-stream decoding with byte-order-mark handling
//!
//! Every function here is stateless: it either writes into an explicit
//! destination or returns freshly allocated output.  Nothing carries decoder
//! state between calls, so a truncated sequence at the end of an input is
//! ill-formed input, not a resumable prefix.

pub mod bom;
pub mod latin1;
pub mod ucs4;
pub mod utf8;

pub use bom::utf16_bytes_to_utf16;
pub use latin1::{latin1_to_utf16, utf16_to_latin1_lossy, utf16_to_latin1_unchecked};
pub use ucs4::{ucs4_to_utf16, utf16_to_ucs4};
pub use utf8::{is_valid_utf8, utf16_to_utf8, utf8_to_utf16, Utf8CodePoints};

use crate::view::{is_high_surrogate, is_low_surrogate};

/// Whether `units` is well-formed UTF-16: every high surrogate is followed
/// by a low one and no low surrogate appears unpaired.
pub fn is_valid_utf16(units: &[u16]) -> bool {
    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        if is_high_surrogate(u) {
            if i + 1 >= units.len() || !is_low_surrogate(units[i + 1]) {
                return false;
            }
            i += 2;
        } else if is_low_surrogate(u) {
            return false;
        } else {
            i += 1;
        }
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────
