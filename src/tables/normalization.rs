//! Normalization data: combining classes, decomposition mappings, derived
//! composition pairs, version corrections, and the algorithmic Hangul
//! constants.
//!
//! The decomposition tables are a curated subset of the character database:
//! Latin-1 Supplement, Latin Extended-A, Greek and Cyrillic precomposed
//! letters, the combining-mark singletons, and the CJK compatibility
//! ideographs that carry normalization corrections.  A code point outside
//! the tables is a starter that decomposes to itself, which preserves every
//! pipeline property (idempotence, canonical-order stability) for covered
//! and uncovered text alike.
//!
//! The composition pair map is not stored; it is derived once, on first
//! use, from the canonical table: pair decompositions whose first element
//! is a starter, minus the singleton and non-starter decompositions that
//! the derivation rule already excludes.  Script-specific composition
//! exclusions do not intersect the curated set.

use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Unicode versions
// ─────────────────────────────────────────────────────────────────────────────

/// Character-database versions the normalization tables can be pinned to.
/// Ordering follows release order, so `<` / `>` compare meaningfully.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[allow(non_camel_case_types)]
pub enum UnicodeVersion {
    V1_1,
    V2_0,
    V2_1,
    V3_0,
    V3_1,
    V3_2,
    V4_0,
    V4_1,
    V5_0,
    V5_1,
    V5_2,
    V6_0,
    V6_1,
    V6_2,
    V6_3,
    V7_0,
    V8_0,
    V9_0,
    V10_0,
    V11_0,
    V12_0,
    V12_1,
    V13_0,
    V14_0,
    V15_0,
    V15_1,
}

impl UnicodeVersion {
    /// The version the bundled tables were generated from.
    pub const CURRENT: UnicodeVersion = UnicodeVersion::V15_1;
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonical combining classes
// ─────────────────────────────────────────────────────────────────────────────

struct CccRange {
    first: u32,
    last: u32,
    ccc: u8,
}

const fn c(first: u32, last: u32, ccc: u8) -> CccRange {
    CccRange { first, last, ccc }
}

// Sorted by `first`.  Covers the combining-mark blocks the decomposition
// tables can produce, plus the common marks of the major scripts.
#[rustfmt::skip]
static CCC_RANGES: &[CccRange] = &[
    c(0x0300, 0x0314, 230), c(0x0315, 0x0315, 232), c(0x0316, 0x0319, 220),
    c(0x031A, 0x031A, 232), c(0x031B, 0x031B, 216), c(0x031C, 0x0320, 220),
    c(0x0321, 0x0322, 202), c(0x0323, 0x0326, 220), c(0x0327, 0x0328, 202),
    c(0x0329, 0x0333, 220), c(0x0334, 0x0338, 1),   c(0x0339, 0x033C, 220),
    c(0x033D, 0x0344, 230), c(0x0345, 0x0345, 240), c(0x0346, 0x0346, 230),
    c(0x0347, 0x0349, 220), c(0x034A, 0x034C, 230), c(0x034D, 0x034E, 220),
    c(0x0350, 0x0352, 230), c(0x0353, 0x0356, 220), c(0x0357, 0x0357, 230),
    c(0x0358, 0x0358, 232), c(0x0359, 0x035A, 220), c(0x035B, 0x035B, 230),
    c(0x035C, 0x035C, 233), c(0x035D, 0x035E, 234), c(0x035F, 0x035F, 233),
    c(0x0360, 0x0361, 234), c(0x0362, 0x0362, 233), c(0x0363, 0x036F, 230),
    c(0x0483, 0x0487, 230),
    c(0x0591, 0x0591, 220), c(0x0592, 0x0595, 230), c(0x0596, 0x0596, 220),
    c(0x0597, 0x0599, 230), c(0x059A, 0x059A, 222), c(0x059B, 0x059B, 220),
    c(0x059C, 0x05A1, 230), c(0x05A2, 0x05A7, 220), c(0x05A8, 0x05A9, 230),
    c(0x05AA, 0x05AA, 220), c(0x05AB, 0x05AC, 230), c(0x05AD, 0x05AD, 222),
    c(0x05AE, 0x05AE, 228), c(0x05AF, 0x05AF, 230),
    c(0x05B0, 0x05B0, 10),  c(0x05B1, 0x05B1, 11),  c(0x05B2, 0x05B2, 12),
    c(0x05B3, 0x05B3, 13),  c(0x05B4, 0x05B4, 14),  c(0x05B5, 0x05B5, 15),
    c(0x05B6, 0x05B6, 16),  c(0x05B7, 0x05B7, 17),  c(0x05B8, 0x05B8, 18),
    c(0x05B9, 0x05BA, 19),  c(0x05BB, 0x05BB, 20),  c(0x05BC, 0x05BC, 21),
    c(0x05BD, 0x05BD, 22),  c(0x05BF, 0x05BF, 23),  c(0x05C1, 0x05C1, 24),
    c(0x05C2, 0x05C2, 25),  c(0x05C4, 0x05C4, 230), c(0x05C5, 0x05C5, 220),
    c(0x05C7, 0x05C7, 18),
    c(0x0610, 0x0617, 230), c(0x0618, 0x0618, 30),  c(0x0619, 0x0619, 31),
    c(0x061A, 0x061A, 32),
    c(0x064B, 0x064B, 27),  c(0x064C, 0x064C, 28),  c(0x064D, 0x064D, 29),
    c(0x064E, 0x064E, 30),  c(0x064F, 0x064F, 31),  c(0x0650, 0x0650, 32),
    c(0x0651, 0x0651, 33),  c(0x0652, 0x0652, 34),  c(0x0653, 0x0654, 230),
    c(0x0655, 0x0656, 220), c(0x0657, 0x065B, 230), c(0x065C, 0x065C, 220),
    c(0x065D, 0x065E, 230), c(0x065F, 0x065F, 220), c(0x0670, 0x0670, 35),
    c(0x06D6, 0x06DC, 230), c(0x06DF, 0x06E2, 230), c(0x06E3, 0x06E3, 220),
    c(0x06E4, 0x06E4, 230), c(0x06E7, 0x06E8, 230), c(0x06EA, 0x06EA, 220),
    c(0x06EB, 0x06EC, 230), c(0x06ED, 0x06ED, 220),
    c(0x0711, 0x0711, 36),
    c(0x093C, 0x093C, 7),   c(0x094D, 0x094D, 9),
    c(0x09BC, 0x09BC, 7),   c(0x09CD, 0x09CD, 9),
    c(0x0A3C, 0x0A3C, 7),   c(0x0A4D, 0x0A4D, 9),
    c(0x0ABC, 0x0ABC, 7),   c(0x0ACD, 0x0ACD, 9),
    c(0x0B3C, 0x0B3C, 7),   c(0x0B4D, 0x0B4D, 9),
    c(0x0BCD, 0x0BCD, 9),
    c(0x0C4D, 0x0C4D, 9),   c(0x0C55, 0x0C55, 84),  c(0x0C56, 0x0C56, 91),
    c(0x0CBC, 0x0CBC, 7),   c(0x0CCD, 0x0CCD, 9),
    c(0x0D4D, 0x0D4D, 9),   c(0x0DCA, 0x0DCA, 9),
    c(0x0E38, 0x0E39, 103), c(0x0E3A, 0x0E3A, 9),   c(0x0E48, 0x0E4B, 107),
    c(0x0EB8, 0x0EB9, 118), c(0x0EC8, 0x0ECB, 122),
    c(0x0F71, 0x0F71, 129), c(0x0F72, 0x0F72, 130), c(0x0F74, 0x0F74, 132),
    c(0x0F7A, 0x0F7D, 130), c(0x0F80, 0x0F80, 130), c(0x0F82, 0x0F83, 230),
    c(0x0F84, 0x0F84, 9),
    c(0x1037, 0x1037, 7),   c(0x1039, 0x103A, 9),
    c(0x17D2, 0x17D2, 9),   c(0x1A60, 0x1A60, 9),
    c(0x1B34, 0x1B34, 7),   c(0x1B44, 0x1B44, 9),
    c(0x1DC0, 0x1DC1, 230),
    c(0x20D0, 0x20D1, 230), c(0x20D2, 0x20D3, 1),   c(0x20D4, 0x20D7, 230),
    c(0x20D8, 0x20DA, 1),   c(0x20DB, 0x20DC, 230), c(0x20E1, 0x20E1, 230),
    c(0x3099, 0x309A, 8),
    c(0xFB1E, 0xFB1E, 26),
    c(0xFE20, 0xFE26, 230),
];

/// Canonical combining class of `cp`; 0 (starter) when not in the table.
pub fn combining_class(cp: u32) -> u8 {
    match CCC_RANGES.binary_search_by(|r| {
        if r.last < cp {
            core::cmp::Ordering::Less
        } else if r.first > cp {
            core::cmp::Ordering::Greater
        } else {
            core::cmp::Ordering::Equal
        }
    }) {
        Ok(i) => CCC_RANGES[i].ccc,
        Err(_) => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonical decompositions
// ─────────────────────────────────────────────────────────────────────────────

struct Decomposition {
    cp: u32,
    mapping: &'static [u32],
}

const fn m(cp: u32, mapping: &'static [u32]) -> Decomposition {
    Decomposition { cp, mapping }
}

// Sorted by `cp`.  Mappings are stored fully composed-of-parts; the pipeline
// recurses, so nested entries (base letters that decompose further) are fine.
#[rustfmt::skip]
static CANONICAL: &[Decomposition] = &[
    m(0x00C0, &[0x0041, 0x0300]), m(0x00C1, &[0x0041, 0x0301]), m(0x00C2, &[0x0041, 0x0302]),
    m(0x00C3, &[0x0041, 0x0303]), m(0x00C4, &[0x0041, 0x0308]), m(0x00C5, &[0x0041, 0x030A]),
    m(0x00C7, &[0x0043, 0x0327]), m(0x00C8, &[0x0045, 0x0300]), m(0x00C9, &[0x0045, 0x0301]),
    m(0x00CA, &[0x0045, 0x0302]), m(0x00CB, &[0x0045, 0x0308]), m(0x00CC, &[0x0049, 0x0300]),
    m(0x00CD, &[0x0049, 0x0301]), m(0x00CE, &[0x0049, 0x0302]), m(0x00CF, &[0x0049, 0x0308]),
    m(0x00D1, &[0x004E, 0x0303]), m(0x00D2, &[0x004F, 0x0300]), m(0x00D3, &[0x004F, 0x0301]),
    m(0x00D4, &[0x004F, 0x0302]), m(0x00D5, &[0x004F, 0x0303]), m(0x00D6, &[0x004F, 0x0308]),
    m(0x00D9, &[0x0055, 0x0300]), m(0x00DA, &[0x0055, 0x0301]), m(0x00DB, &[0x0055, 0x0302]),
    m(0x00DC, &[0x0055, 0x0308]), m(0x00DD, &[0x0059, 0x0301]),
    m(0x00E0, &[0x0061, 0x0300]), m(0x00E1, &[0x0061, 0x0301]), m(0x00E2, &[0x0061, 0x0302]),
    m(0x00E3, &[0x0061, 0x0303]), m(0x00E4, &[0x0061, 0x0308]), m(0x00E5, &[0x0061, 0x030A]),
    m(0x00E7, &[0x0063, 0x0327]), m(0x00E8, &[0x0065, 0x0300]), m(0x00E9, &[0x0065, 0x0301]),
    m(0x00EA, &[0x0065, 0x0302]), m(0x00EB, &[0x0065, 0x0308]), m(0x00EC, &[0x0069, 0x0300]),
    m(0x00ED, &[0x0069, 0x0301]), m(0x00EE, &[0x0069, 0x0302]), m(0x00EF, &[0x0069, 0x0308]),
    m(0x00F1, &[0x006E, 0x0303]), m(0x00F2, &[0x006F, 0x0300]), m(0x00F3, &[0x006F, 0x0301]),
    m(0x00F4, &[0x006F, 0x0302]), m(0x00F5, &[0x006F, 0x0303]), m(0x00F6, &[0x006F, 0x0308]),
    m(0x00F9, &[0x0075, 0x0300]), m(0x00FA, &[0x0075, 0x0301]), m(0x00FB, &[0x0075, 0x0302]),
    m(0x00FC, &[0x0075, 0x0308]), m(0x00FD, &[0x0079, 0x0301]), m(0x00FF, &[0x0079, 0x0308]),
    m(0x0100, &[0x0041, 0x0304]), m(0x0101, &[0x0061, 0x0304]), m(0x0102, &[0x0041, 0x0306]),
    m(0x0103, &[0x0061, 0x0306]), m(0x0104, &[0x0041, 0x0328]), m(0x0105, &[0x0061, 0x0328]),
    m(0x0106, &[0x0043, 0x0301]), m(0x0107, &[0x0063, 0x0301]), m(0x0108, &[0x0043, 0x0302]),
    m(0x0109, &[0x0063, 0x0302]), m(0x010A, &[0x0043, 0x0307]), m(0x010B, &[0x0063, 0x0307]),
    m(0x010C, &[0x0043, 0x030C]), m(0x010D, &[0x0063, 0x030C]), m(0x010E, &[0x0044, 0x030C]),
    m(0x010F, &[0x0064, 0x030C]),
    m(0x0112, &[0x0045, 0x0304]), m(0x0113, &[0x0065, 0x0304]), m(0x0114, &[0x0045, 0x0306]),
    m(0x0115, &[0x0065, 0x0306]), m(0x0116, &[0x0045, 0x0307]), m(0x0117, &[0x0065, 0x0307]),
    m(0x0118, &[0x0045, 0x0328]), m(0x0119, &[0x0065, 0x0328]), m(0x011A, &[0x0045, 0x030C]),
    m(0x011B, &[0x0065, 0x030C]), m(0x011C, &[0x0047, 0x0302]), m(0x011D, &[0x0067, 0x0302]),
    m(0x011E, &[0x0047, 0x0306]), m(0x011F, &[0x0067, 0x0306]), m(0x0120, &[0x0047, 0x0307]),
    m(0x0121, &[0x0067, 0x0307]), m(0x0122, &[0x0047, 0x0327]), m(0x0123, &[0x0067, 0x0327]),
    m(0x0124, &[0x0048, 0x0302]), m(0x0125, &[0x0068, 0x0302]),
    m(0x0128, &[0x0049, 0x0303]), m(0x0129, &[0x0069, 0x0303]), m(0x012A, &[0x0049, 0x0304]),
    m(0x012B, &[0x0069, 0x0304]), m(0x012C, &[0x0049, 0x0306]), m(0x012D, &[0x0069, 0x0306]),
    m(0x012E, &[0x0049, 0x0328]), m(0x012F, &[0x0069, 0x0328]), m(0x0130, &[0x0049, 0x0307]),
    m(0x0134, &[0x004A, 0x0302]), m(0x0135, &[0x006A, 0x0302]), m(0x0136, &[0x004B, 0x0327]),
    m(0x0137, &[0x006B, 0x0327]), m(0x0139, &[0x004C, 0x0301]), m(0x013A, &[0x006C, 0x0301]),
    m(0x013B, &[0x004C, 0x0327]), m(0x013C, &[0x006C, 0x0327]), m(0x013D, &[0x004C, 0x030C]),
    m(0x013E, &[0x006C, 0x030C]),
    m(0x0143, &[0x004E, 0x0301]), m(0x0144, &[0x006E, 0x0301]), m(0x0145, &[0x004E, 0x0327]),
    m(0x0146, &[0x006E, 0x0327]), m(0x0147, &[0x004E, 0x030C]), m(0x0148, &[0x006E, 0x030C]),
    m(0x014C, &[0x004F, 0x0304]), m(0x014D, &[0x006F, 0x0304]), m(0x014E, &[0x004F, 0x0306]),
    m(0x014F, &[0x006F, 0x0306]), m(0x0150, &[0x004F, 0x030B]), m(0x0151, &[0x006F, 0x030B]),
    m(0x0154, &[0x0052, 0x0301]), m(0x0155, &[0x0072, 0x0301]), m(0x0156, &[0x0052, 0x0327]),
    m(0x0157, &[0x0072, 0x0327]), m(0x0158, &[0x0052, 0x030C]), m(0x0159, &[0x0072, 0x030C]),
    m(0x015A, &[0x0053, 0x0301]), m(0x015B, &[0x0073, 0x0301]), m(0x015C, &[0x0053, 0x0302]),
    m(0x015D, &[0x0073, 0x0302]), m(0x015E, &[0x0053, 0x0327]), m(0x015F, &[0x0073, 0x0327]),
    m(0x0160, &[0x0053, 0x030C]), m(0x0161, &[0x0073, 0x030C]), m(0x0162, &[0x0054, 0x0327]),
    m(0x0163, &[0x0074, 0x0327]), m(0x0164, &[0x0054, 0x030C]), m(0x0165, &[0x0074, 0x030C]),
    m(0x0168, &[0x0055, 0x0303]), m(0x0169, &[0x0075, 0x0303]), m(0x016A, &[0x0055, 0x0304]),
    m(0x016B, &[0x0075, 0x0304]), m(0x016C, &[0x0055, 0x0306]), m(0x016D, &[0x0075, 0x0306]),
    m(0x016E, &[0x0055, 0x030A]), m(0x016F, &[0x0075, 0x030A]), m(0x0170, &[0x0055, 0x030B]),
    m(0x0171, &[0x0075, 0x030B]), m(0x0172, &[0x0055, 0x0328]), m(0x0173, &[0x0075, 0x0328]),
    m(0x0174, &[0x0057, 0x0302]), m(0x0175, &[0x0077, 0x0302]), m(0x0176, &[0x0059, 0x0302]),
    m(0x0177, &[0x0079, 0x0302]), m(0x0178, &[0x0059, 0x0308]), m(0x0179, &[0x005A, 0x0301]),
    m(0x017A, &[0x007A, 0x0301]), m(0x017B, &[0x005A, 0x0307]), m(0x017C, &[0x007A, 0x0307]),
    m(0x017D, &[0x005A, 0x030C]), m(0x017E, &[0x007A, 0x030C]),
    m(0x01CD, &[0x0041, 0x030C]), m(0x01CE, &[0x0061, 0x030C]), m(0x01CF, &[0x0049, 0x030C]),
    m(0x01D0, &[0x0069, 0x030C]), m(0x01D1, &[0x004F, 0x030C]), m(0x01D2, &[0x006F, 0x030C]),
    m(0x01D3, &[0x0055, 0x030C]), m(0x01D4, &[0x0075, 0x030C]),
    m(0x01D5, &[0x00DC, 0x0304]), m(0x01D6, &[0x00FC, 0x0304]), m(0x01D7, &[0x00DC, 0x0301]),
    m(0x01D8, &[0x00FC, 0x0301]), m(0x01D9, &[0x00DC, 0x030C]), m(0x01DA, &[0x00FC, 0x030C]),
    m(0x01DB, &[0x00DC, 0x0300]), m(0x01DC, &[0x00FC, 0x0300]),
    m(0x0340, &[0x0300]), m(0x0341, &[0x0301]), m(0x0343, &[0x0313]),
    m(0x0344, &[0x0308, 0x0301]),
    m(0x0385, &[0x00A8, 0x0301]),
    m(0x0386, &[0x0391, 0x0301]), m(0x0388, &[0x0395, 0x0301]), m(0x0389, &[0x0397, 0x0301]),
    m(0x038A, &[0x0399, 0x0301]), m(0x038C, &[0x039F, 0x0301]), m(0x038E, &[0x03A5, 0x0301]),
    m(0x038F, &[0x03A9, 0x0301]), m(0x0390, &[0x03CA, 0x0301]),
    m(0x03AA, &[0x0399, 0x0308]), m(0x03AB, &[0x03A5, 0x0308]),
    m(0x03AC, &[0x03B1, 0x0301]), m(0x03AD, &[0x03B5, 0x0301]), m(0x03AE, &[0x03B7, 0x0301]),
    m(0x03AF, &[0x03B9, 0x0301]), m(0x03B0, &[0x03CB, 0x0301]),
    m(0x03CA, &[0x03B9, 0x0308]), m(0x03CB, &[0x03C5, 0x0308]), m(0x03CC, &[0x03BF, 0x0301]),
    m(0x03CD, &[0x03C5, 0x0301]), m(0x03CE, &[0x03C9, 0x0301]),
    m(0x0400, &[0x0415, 0x0300]), m(0x0401, &[0x0415, 0x0308]), m(0x0403, &[0x0413, 0x0301]),
    m(0x0407, &[0x0406, 0x0308]), m(0x040C, &[0x041A, 0x0301]), m(0x040D, &[0x0418, 0x0300]),
    m(0x040E, &[0x0423, 0x0306]), m(0x0419, &[0x0418, 0x0306]),
    m(0x0439, &[0x0438, 0x0306]), m(0x0450, &[0x0435, 0x0300]), m(0x0451, &[0x0435, 0x0308]),
    m(0x0453, &[0x0433, 0x0301]), m(0x0457, &[0x0456, 0x0308]), m(0x045C, &[0x043A, 0x0301]),
    m(0x045D, &[0x0438, 0x0300]), m(0x045E, &[0x0443, 0x0306]),
    m(0x1E60, &[0x0053, 0x0307]), m(0x1E61, &[0x0073, 0x0307]),
    m(0x1EBE, &[0x00CA, 0x0301]), m(0x1EBF, &[0x00EA, 0x0301]),
    m(0x2126, &[0x03A9]), m(0x212A, &[0x004B]), m(0x212B, &[0x00C5]),
    m(0xF951, &[0x964B]),
    m(0x2F868, &[0x36FC]), m(0x2F874, &[0x5F33]), m(0x2F91F, &[0x243AB]),
    m(0x2F95F, &[0x7AEE]), m(0x2F9BF, &[0x45D7]),
];

// ─────────────────────────────────────────────────────────────────────────────
// Compatibility decompositions (NFKD / NFKC only)
// ─────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static COMPATIBILITY: &[Decomposition] = &[
    m(0x00A0, &[0x0020]),
    m(0x00A8, &[0x0020, 0x0308]),
    m(0x00AA, &[0x0061]),
    m(0x00AF, &[0x0020, 0x0304]),
    m(0x00B2, &[0x0032]),
    m(0x00B3, &[0x0033]),
    m(0x00B4, &[0x0020, 0x0301]),
    m(0x00B5, &[0x03BC]),
    m(0x00B8, &[0x0020, 0x0327]),
    m(0x00B9, &[0x0031]),
    m(0x00BA, &[0x006F]),
    m(0x00BC, &[0x0031, 0x2044, 0x0034]),
    m(0x00BD, &[0x0031, 0x2044, 0x0032]),
    m(0x00BE, &[0x0033, 0x2044, 0x0034]),
    m(0x0132, &[0x0049, 0x004A]),
    m(0x0133, &[0x0069, 0x006A]),
    m(0x013F, &[0x004C, 0x00B7]),
    m(0x0140, &[0x006C, 0x00B7]),
    m(0x0149, &[0x02BC, 0x006E]),
    m(0x017F, &[0x0073]),
    m(0x2002, &[0x0020]),
    m(0x2003, &[0x0020]),
    m(0x2011, &[0x2010]),
    m(0xFB00, &[0x0066, 0x0066]),
    m(0xFB01, &[0x0066, 0x0069]),
    m(0xFB02, &[0x0066, 0x006C]),
    m(0xFB03, &[0x0066, 0x0066, 0x0069]),
    m(0xFB04, &[0x0066, 0x0066, 0x006C]),
];

// ─────────────────────────────────────────────────────────────────────────────
// Version corrections
// ─────────────────────────────────────────────────────────────────────────────

struct Correction {
    cp: u32,
    /// Mapping published before the correction shipped.
    old: [u32; 1],
    /// First version carrying the corrected mapping in `CANONICAL`.
    version: UnicodeVersion,
}

static CORRECTIONS: &[Correction] = &[
    Correction { cp: 0xF951, old: [0x96FB], version: UnicodeVersion::V3_2 },
    Correction { cp: 0x2F868, old: [0x2136A], version: UnicodeVersion::V4_0 },
    Correction { cp: 0x2F874, old: [0x5F53], version: UnicodeVersion::V4_0 },
    Correction { cp: 0x2F91F, old: [0x2291F], version: UnicodeVersion::V4_0 },
    Correction { cp: 0x2F95F, old: [0x7AAE], version: UnicodeVersion::V4_0 },
    Correction { cp: 0x2F9BF, old: [0x45C7], version: UnicodeVersion::V4_0 },
];

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

fn table_lookup(table: &'static [Decomposition], cp: u32) -> Option<&'static [u32]> {
    table
        .binary_search_by(|e| e.cp.cmp(&cp))
        .ok()
        .map(|i| table[i].mapping)
}

/// Canonical decomposition of `cp`, honoring the pinned table `version`:
/// a corrected code point reports its pre-correction mapping when the
/// requested version predates the correction.
pub fn canonical_decomposition(cp: u32, version: UnicodeVersion) -> Option<&'static [u32]> {
    if let Some(corr) = CORRECTIONS.iter().find(|corr| corr.cp == cp) {
        if version < corr.version {
            return Some(&corr.old);
        }
    }
    table_lookup(CANONICAL, cp)
}

/// Compatibility decomposition of `cp` (`None` when only the canonical
/// mapping, or no mapping at all, exists).
pub fn compatibility_decomposition(cp: u32) -> Option<&'static [u32]> {
    table_lookup(COMPATIBILITY, cp)
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived composition pairs
// ─────────────────────────────────────────────────────────────────────────────

fn composition_pairs() -> &'static [((u32, u32), u32)] {
    static PAIRS: OnceLock<Vec<((u32, u32), u32)>> = OnceLock::new();
    PAIRS.get_or_init(|| {
        let mut pairs: Vec<((u32, u32), u32)> = CANONICAL
            .iter()
            .filter(|e| e.mapping.len() == 2 && combining_class(e.mapping[0]) == 0)
            .map(|e| ((e.mapping[0], e.mapping[1]), e.cp))
            .collect();
        pairs.sort_unstable_by_key(|&(key, _)| key);
        pairs
    })
}

/// Primary composite formed by `starter` + `combiner`, if any.  Hangul LV
/// and LVT composition is algorithmic and handled here as well.
pub fn compose_pair(starter: u32, combiner: u32) -> Option<u32> {
    if let Some(s) = compose_hangul(starter, combiner) {
        return Some(s);
    }
    let pairs = composition_pairs();
    pairs
        .binary_search_by_key(&(starter, combiner), |&(key, _)| key)
        .ok()
        .map(|i| pairs[i].1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hangul (algorithmic)
// ─────────────────────────────────────────────────────────────────────────────

pub const HANGUL_S_BASE: u32 = 0xAC00;
pub const HANGUL_L_BASE: u32 = 0x1100;
pub const HANGUL_V_BASE: u32 = 0x1161;
pub const HANGUL_T_BASE: u32 = 0x11A7;
pub const HANGUL_L_COUNT: u32 = 19;
pub const HANGUL_V_COUNT: u32 = 21;
pub const HANGUL_T_COUNT: u32 = 28;
pub const HANGUL_N_COUNT: u32 = HANGUL_V_COUNT * HANGUL_T_COUNT;
pub const HANGUL_S_COUNT: u32 = HANGUL_L_COUNT * HANGUL_N_COUNT;

/// Whether `cp` is a precomposed Hangul syllable.
#[inline]
pub fn is_hangul_syllable(cp: u32) -> bool {
    (HANGUL_S_BASE..HANGUL_S_BASE + HANGUL_S_COUNT).contains(&cp)
}

/// Whether `cp` is a conjoining jamo that could compose into a syllable.
#[inline]
pub fn is_hangul_jamo(cp: u32) -> bool {
    (HANGUL_L_BASE..HANGUL_T_BASE + HANGUL_T_COUNT).contains(&cp)
}

/// Decomposes a Hangul syllable into 2 or 3 jamo; `None` for anything else.
pub fn decompose_hangul(cp: u32) -> Option<([u32; 3], usize)> {
    if !is_hangul_syllable(cp) {
        return None;
    }
    let s_index = cp - HANGUL_S_BASE;
    let l = HANGUL_L_BASE + s_index / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (s_index % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t_index = s_index % HANGUL_T_COUNT;
    if t_index == 0 {
        Some(([l, v, 0], 2))
    } else {
        Some(([l, v, HANGUL_T_BASE + t_index], 3))
    }
}

/// Composes L+V into an LV syllable or LV+T into an LVT syllable.
pub fn compose_hangul(first: u32, second: u32) -> Option<u32> {
    // L + V
    if (HANGUL_L_BASE..HANGUL_L_BASE + HANGUL_L_COUNT).contains(&first)
        && (HANGUL_V_BASE..HANGUL_V_BASE + HANGUL_V_COUNT).contains(&second)
    {
        let l_index = first - HANGUL_L_BASE;
        let v_index = second - HANGUL_V_BASE;
        return Some(HANGUL_S_BASE + (l_index * HANGUL_V_COUNT + v_index) * HANGUL_T_COUNT);
    }
    // LV + T
    if is_hangul_syllable(first)
        && (first - HANGUL_S_BASE) % HANGUL_T_COUNT == 0
        && (HANGUL_T_BASE + 1..HANGUL_T_BASE + HANGUL_T_COUNT).contains(&second)
    {
        return Some(first + (second - HANGUL_T_BASE));
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted() {
        for w in CCC_RANGES.windows(2) {
            assert!(w[0].last < w[1].first);
        }
        for w in CANONICAL.windows(2) {
            assert!(w[0].cp < w[1].cp);
        }
        for w in COMPATIBILITY.windows(2) {
            assert!(w[0].cp < w[1].cp);
        }
    }

    #[test]
    fn combining_classes() {
        assert_eq!(combining_class(0x0301), 230); // acute
        assert_eq!(combining_class(0x0327), 202); // cedilla
        assert_eq!(combining_class(0x0334), 1);   // tilde overlay
        assert_eq!(combining_class(0x0041), 0);
    }

    #[test]
    fn canonical_lookup() {
        let v = UnicodeVersion::CURRENT;
        assert_eq!(canonical_decomposition(0x00E9, v), Some(&[0x0065, 0x0301][..]));
        assert_eq!(canonical_decomposition(0x2126, v), Some(&[0x03A9][..]));
        assert_eq!(canonical_decomposition(0x0041, v), None);
    }

    #[test]
    fn corrections_restore_old_mappings() {
        assert_eq!(
            canonical_decomposition(0xF951, UnicodeVersion::V3_0),
            Some(&[0x96FB][..])
        );
        assert_eq!(
            canonical_decomposition(0xF951, UnicodeVersion::V3_2),
            Some(&[0x964B][..])
        );
        assert_eq!(
            canonical_decomposition(0x2F868, UnicodeVersion::V3_2),
            Some(&[0x2136A][..])
        );
        assert_eq!(
            canonical_decomposition(0x2F868, UnicodeVersion::CURRENT),
            Some(&[0x36FC][..])
        );
    }

    #[test]
    fn composition_pairs_exclude_singletons_and_non_starters() {
        // Singleton: the ohm sign never re-composes.
        assert_eq!(compose_pair(0x03A9, 0), None);
        // Non-starter first element (0x0344 = 0x0308 0x0301) is excluded.
        assert_eq!(compose_pair(0x0308, 0x0301), None);
        // Ordinary pair round-trips.
        assert_eq!(compose_pair(0x0065, 0x0301), Some(0x00E9));
        assert_eq!(compose_pair(0x0041, 0x030A), Some(0x00C5));
    }

    #[test]
    fn hangul_round_trip() {
        // U+AC01 (GAG) = L 0x1100, V 0x1161, T 0x11A8
        let (jamo, n) = decompose_hangul(0xAC01).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&jamo[..3], &[0x1100, 0x1161, 0x11A8]);
        let lv = compose_hangul(0x1100, 0x1161).unwrap();
        assert_eq!(lv, 0xAC00);
        assert_eq!(compose_hangul(lv, 0x11A8), Some(0xAC01));
        // U+AC00 (GA) decomposes to two jamo.
        let (jamo, n) = decompose_hangul(0xAC00).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&jamo[..2], &[0x1100, 0x1161]);
    }
}
