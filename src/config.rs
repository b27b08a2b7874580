// config.rs — Compile-time configuration constants.
//
// Everything that tunes the behaviour of the search and storage layers is
// collected here so the numbers live in one place.  None of these are
// runtime-configurable; they are part of the library's observable contract
// (skip-table semantics, growth policy) and changing them changes behaviour.

/// Capacity of the case-folded pattern prefix used by case-insensitive
/// matchers.  Patterns longer than this are verified in two steps: the folded
/// prefix through the skip table, then the remaining tail with a
/// case-insensitive prefix comparison.
pub const FOLD_BUFFER_CAPACITY: usize = 256;

/// Needle lengths up to this bound are searched with the rolling-hash loop;
/// longer needles build a Boyer–Moore skip table first.
pub const HASH_SEARCH_MAX_NEEDLE: usize = 5;

/// Smallest non-zero heap allocation, in UTF-16 code units (terminator
/// excluded).  Requests below this are rounded up so short-string append
/// loops do not reallocate on every character.
pub const MIN_ALLOC_UNITS: usize = 8;

/// Stack scratch size, in code units, used when a mutation's source range
/// aliases its destination buffer.  Larger overlapping sources take one
/// temporary heap copy instead.
pub const OVERLAP_SCRATCH_UNITS: usize = 32;
