//! UTF-16 byte-stream decoding.
//!
//! A leading byte-order mark selects the byte order and is consumed; without
//! one the stream is read in host order.  A dangling odd byte at the end is
//! ill-formed input and becomes `U+FFFD`.

/// Decodes a UTF-16 byte stream into code units, honoring a leading BOM.
pub fn utf16_bytes_to_utf16(bytes: &[u8]) -> Vec<u16> {
    let (big_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (cfg!(target_endian = "big"), bytes),
    };

    let mut out = Vec::with_capacity(body.len() / 2 + 1);
    let mut chunks = body.chunks_exact(2);
    for pair in &mut chunks {
        let unit = if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        };
        out.push(unit);
    }
    if !chunks.remainder().is_empty() {
        out.push(0xFFFD);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
