//! Process-level diagnostic channel.
//!
//! Developer-facing misuse (a formatting call with no placeholder left, an
//! `arg` call with fewer arguments than placeholders) is reported here rather
//! than through return values.  The channel is silent by default; programs
//! opt in by raising the level.  Messages go to stderr with a stable
//! `unistr: ` prefix so they can be filtered in logs.

use std::io::Write;
use std::sync::atomic::{AtomicI32, Ordering};

/// Global diagnostic level.  0 = silent (default), 1 = misuse warnings,
/// 2 = verbose.  Stored in an atomic for safe concurrent access.
pub static DIAG_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Sets the global diagnostic level and returns the previous one.
pub fn set_diagnostic_level(level: i32) -> i32 {
    DIAG_LEVEL.swap(level, Ordering::Relaxed)
}

/// Returns the current diagnostic level.
#[inline]
pub fn diagnostic_level() -> i32 {
    DIAG_LEVEL.load(Ordering::Relaxed)
}

/// Writes `msg` to stderr (with the `unistr: ` prefix) when the global level
/// is at least `level`.  Write errors are ignored; diagnostics must never
/// turn into failures of the operation that emitted them.
pub fn diag(level: i32, msg: &str) {
    if DIAG_LEVEL.load(Ordering::Relaxed) >= level {
        let stderr = std::io::stderr();
        let mut lock = stderr.lock();
        let _ = writeln!(lock, "unistr: {msg}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_silent() {
        // Other tests may have raised the level; only assert the setter's
        // round-trip behaviour.
        let prev = set_diagnostic_level(2);
        assert_eq!(diagnostic_level(), 2);
        set_diagnostic_level(prev);
    }

    #[test]
    fn diag_below_level_is_a_no_op() {
        let prev = set_diagnostic_level(0);
        diag(1, "must not appear");
        set_diagnostic_level(prev);
    }
}
