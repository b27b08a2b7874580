//! Latin-1 lowercase fold table.
//!
//! A 256-entry byte table mapping each Latin-1 code unit to its lowercase
//! equivalent.  Two entries intentionally map to themselves rather than to a
//! case partner:
//!
//! - `0xD7` (multiplication sign) — not a letter; its visual uppercase slot
//!   neighbour `0xF7` (division sign) likewise folds to itself.
//! - `0xDF` (sharp s) — lowercases to itself; its uppercase partner is the
//!   two-character sequence "SS", which a byte table cannot express.
//!
//! The table is the hash function of the case-insensitive matchers and the
//! fold step of Latin-1 comparisons, so it is part of the observable
//! contract: the values below are bit-exact.

/// Maps each Latin-1 byte to its lowercase equivalent.
#[rustfmt::skip]
pub static LATIN1_LOWER: [u8; 256] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
    0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b, 0x3c, 0x3d, 0x3e, 0x3f,
    0x40, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x6b, 0x6c, 0x6d, 0x6e, 0x6f,
    0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f,
    0x60, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x6b, 0x6c, 0x6d, 0x6e, 0x6f,
    0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x7b, 0x7c, 0x7d, 0x7e, 0x7f,
    0x80, 0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x8b, 0x8c, 0x8d, 0x8e, 0x8f,
    0x90, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0x9b, 0x9c, 0x9d, 0x9e, 0x9f,
    0xa0, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xab, 0xac, 0xad, 0xae, 0xaf,
    0xb0, 0xb1, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xbb, 0xbc, 0xbd, 0xbe, 0xbf,
    // 0xd7 (multiplication sign) and 0xdf (sharp s) stay put in the two rows
    // below; every other letter maps into 0xe0..=0xfe.
    0xe0, 0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xeb, 0xec, 0xed, 0xee, 0xef,
    0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xd7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xdf,
    0xe0, 0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xeb, 0xec, 0xed, 0xee, 0xef,
    0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff,
];

/// Folds one Latin-1 byte to lowercase.
#[inline(always)]
pub fn fold_latin1(b: u8) -> u8 {
    LATIN1_LOWER[b as usize]
}

/// Signed difference between the folds of two Latin-1 bytes.  Zero iff the
/// bytes are equal under case-insensitive Latin-1 comparison.
#[inline(always)]
pub fn latin1_fold_diff(lhs: u8, rhs: u8) -> i32 {
    i32::from(LATIN1_LOWER[lhs as usize]) - i32::from(LATIN1_LOWER[rhs as usize])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_fold_to_lowercase() {
        for b in b'A'..=b'Z' {
            assert_eq!(fold_latin1(b), b + 0x20);
        }
        for b in b'a'..=b'z' {
            assert_eq!(fold_latin1(b), b);
        }
    }

    #[test]
    fn latin1_letters_fold_to_lowercase() {
        for b in 0xC0u8..=0xDE {
            if b == 0xD7 {
                continue;
            }
            assert_eq!(fold_latin1(b), b + 0x20);
        }
    }

    #[test]
    fn multiplication_sign_folds_to_itself() {
        assert_eq!(fold_latin1(0xD7), 0xD7);
        assert_eq!(fold_latin1(0xF7), 0xF7);
    }

    #[test]
    fn sharp_s_folds_to_itself() {
        assert_eq!(fold_latin1(0xDF), 0xDF);
        assert_eq!(fold_latin1(0xFF), 0xFF);
    }

    #[test]
    fn folding_is_idempotent() {
        for b in 0u16..=255 {
            let once = fold_latin1(b as u8);
            assert_eq!(fold_latin1(once), once);
        }
    }
}
