//! The implicitly shared UTF-16 string.
//!
//! A [`UString`] is a `(storage, data pointer, length)` triple.  Copies are
//! cheap: they bump an atomic reference count and share the buffer.  Every
//! mutating operation detaches first when the buffer is shared (or not owned
//! at all), so sharers never observe each other's writes.
//!
//! Buffer discipline:
//! - owned buffers keep a zero terminator at `data[len]`;
//! - the data may sit at an offset inside the allocation, leaving slack on
//!   both sides (cheap prepend *and* append);
//! - growth is geometric and biased toward the side being grown;
//! - `from_raw_data` aliases caller memory without owning it; the first
//!   mutation copies it out.

use core::fmt;
use std::hash::{Hash, Hasher};

use crate::compare::{self, CodePointStream, DecodableView};
use crate::config::OVERLAP_SCRATCH_UNITS;
use crate::convert;
use crate::matcher::{self, StringMatcher};
use crate::normalize::{self, NormalizationForm};
use crate::scan;
use crate::string::data::{grown_capacity, Header};
use crate::tables::fold_unit;
use crate::tables::normalization::UnicodeVersion;
use crate::view::{CaseSensitivity, Encoding, Utf16View};

/// Read-only zero unit the empty (and null) string points at, so `data()`
/// is always a valid zero-terminated buffer.
static EMPTY_UNIT: u16 = 0;

/// Owned, implicitly shared, mutable UTF-16 string.
pub struct UString {
    /// Storage header; null when the buffer is not owned (null string, the
    /// shared empty sentinel, or a raw-data alias).
    d: *mut Header,
    /// Start of the character data; null only for the null string.
    ptr: *const u16,
    /// Length in code units, terminator excluded.
    len: usize,
}

// SAFETY: shared buffers are only ever read through `&self`; mutation goes
// through `&mut self` and detaches from other sharers first.  The reference
// count is atomic.  This is the `Arc<[u16]>` sharing discipline.
unsafe impl Send for UString {}
unsafe impl Sync for UString {}

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// The null string: empty, and distinguishable from `""`.
    pub const fn new() -> Self {
        UString { d: core::ptr::null_mut(), ptr: core::ptr::null(), len: 0 }
    }

    /// An empty string with room for `capacity` units before reallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        let d = Header::allocate(capacity);
        // SAFETY: `d` is a live block; writing the terminator stays inside it.
        let ptr = unsafe {
            let buf = Header::buffer(d);
            buf.write(0);
            buf as *const u16
        };
        UString { d, ptr, len: 0 }
    }

    /// Copies `units` into owned storage.
    pub fn from_utf16(units: &[u16]) -> Self {
        if units.is_empty() {
            return Self::empty();
        }
        let mut s = Self::with_capacity(units.len());
        // SAFETY: capacity >= units.len(); source and destination are
        // distinct allocations.
        unsafe {
            core::ptr::copy_nonoverlapping(units.as_ptr(), s.ptr as *mut u16, units.len());
            s.len = units.len();
            s.terminate();
        }
        s
    }

    /// Decodes Latin-1 bytes (each byte zero-extends to one unit).
    pub fn from_latin1(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::empty();
        }
        let mut s = Self::with_capacity(bytes.len());
        // SAFETY: capacity >= bytes.len().
        unsafe {
            let dst = core::slice::from_raw_parts_mut(s.ptr as *mut u16, bytes.len());
            convert::latin1_to_utf16(dst, bytes);
            s.len = bytes.len();
            s.terminate();
        }
        s
    }

    /// Decodes UTF-8 bytes; ill-formed sequences become `U+FFFD`.
    pub fn from_utf8(bytes: &[u8]) -> Self {
        Self::from_utf16(&convert::utf8_to_utf16(bytes))
    }

    /// Decodes UCS-4 code points, pairing the supplementary plane.
    pub fn from_ucs4(code_points: &[u32]) -> Self {
        Self::from_utf16(&convert::ucs4_to_utf16(code_points))
    }

    /// Decodes a UTF-16 byte stream, honoring a leading byte-order mark.
    pub fn from_utf16_bytes(bytes: &[u8]) -> Self {
        Self::from_utf16(&convert::utf16_bytes_to_utf16(bytes))
    }

    /// Aliases caller-owned memory without copying.  The alias is read-only:
    /// the first mutating operation detaches into owned storage.  The caller
    /// must keep the buffer alive for as long as this string (or any copy of
    /// it) can read it.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` units for the lifetime of the
    /// returned string and all its clones.
    pub unsafe fn from_raw_data(ptr: *const u16, len: usize) -> Self {
        if ptr.is_null() {
            return Self::new();
        }
        UString { d: core::ptr::null_mut(), ptr, len }
    }

    /// A single code unit.
    pub fn from_unit(unit: u16) -> Self {
        Self::from_utf16(&[unit])
    }

    /// The shared empty (non-null) string.
    fn empty() -> Self {
        UString { d: core::ptr::null_mut(), ptr: &EMPTY_UNIT, len: 0 }
    }
}

impl From<&str> for UString {
    fn from(s: &str) -> Self {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut u = Self::from_utf16(&units);
        if u.is_null() {
            u = Self::empty();
        }
        u
    }
}

impl Default for UString {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sharing
// ─────────────────────────────────────────────────────────────────────────────

impl Clone for UString {
    fn clone(&self) -> Self {
        if !self.d.is_null() {
            // SAFETY: we hold a reference, so the block is live.
            unsafe { Header::retain(self.d) };
        }
        UString { d: self.d, ptr: self.ptr, len: self.len }
    }
}

impl Drop for UString {
    fn drop(&mut self) {
        if !self.d.is_null() {
            // SAFETY: we own one reference to a live block.
            unsafe { Header::release(self.d) };
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observers
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// Whether this is the null string.  Null implies empty.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Units available from the data start without reallocation.
    pub fn capacity(&self) -> usize {
        if self.d.is_null() {
            self.len
        } else {
            // SAFETY: live block.
            unsafe { Header::capacity(self.d) - self.offset() }
        }
    }

    /// Reference count of the underlying storage; -1 for unowned storage
    /// (the empty sentinel and raw-data aliases).
    pub(crate) fn ref_count(&self) -> isize {
        if self.d.is_null() {
            -1
        } else {
            // SAFETY: live block.
            unsafe { Header::ref_count(self.d) }
        }
    }

    /// Immutable data pointer; never detaches.  Always valid to read
    /// `len()` units; zero-terminated whenever the buffer is owned (and for
    /// the empty and null strings, which point at a static zero).
    #[inline]
    pub fn data(&self) -> *const u16 {
        if self.ptr.is_null() {
            &EMPTY_UNIT
        } else {
            self.ptr
        }
    }

    /// The units as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        if self.ptr.is_null() {
            &[]
        } else {
            // SAFETY: `ptr` is valid for `len` reads while `self` is alive.
            unsafe { core::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    /// Non-owning view of the whole string.
    #[inline]
    pub fn view(&self) -> Utf16View<'_> {
        if self.ptr.is_null() {
            Utf16View::null()
        } else {
            Utf16View::new(self.as_slice())
        }
    }

    /// Code unit at `i`; panics when out of bounds.
    #[inline]
    pub fn unit(&self, i: usize) -> u16 {
        self.as_slice()[i]
    }

    /// Mutable data pointer, detaching from sharers first.  The buffer holds
    /// `capacity()` writable units.
    pub fn data_mut(&mut self) -> *mut u16 {
        self.detach();
        self.ptr as *mut u16
    }

    // ── Internal storage helpers ─────────────────────────────────────────────

    /// Offset of the data inside the owned allocation (prepend slack).
    #[inline]
    fn offset(&self) -> usize {
        debug_assert!(!self.d.is_null());
        // SAFETY: for owned storage `ptr` always points into the block.
        unsafe { (self.ptr as *const u16).offset_from(Header::buffer(self.d)) as usize }
    }

    #[inline]
    fn is_sole_owner(&self) -> bool {
        !self.d.is_null() && self.ref_count() == 1
    }

    /// Writes the zero terminator after the data.  Owned storage only.
    #[inline]
    unsafe fn terminate(&mut self) {
        debug_assert!(!self.d.is_null());
        (self.ptr as *mut u16).add(self.len).write(0);
    }

    /// Moves into a fresh allocation of `capacity` units with the data
    /// placed `front_slack` units in.  Releases the previous storage.
    fn relocate(&mut self, capacity: usize, front_slack: usize) {
        debug_assert!(capacity >= front_slack + self.len);
        let new_d = Header::allocate(capacity);
        // SAFETY: the new block fits front_slack + len + terminator; the old
        // data (if any) is valid for `len` reads and does not overlap a
        // freshly allocated block.
        unsafe {
            let dst = Header::buffer(new_d).add(front_slack);
            if self.len > 0 {
                core::ptr::copy_nonoverlapping(self.ptr, dst, self.len);
            }
            dst.add(self.len).write(0);
            let old = self.d;
            self.d = new_d;
            self.ptr = dst;
            if !old.is_null() {
                Header::release(old);
            }
        }
    }

    /// Ensures this string solely owns its buffer.  Capacity is preserved
    /// when already owned, otherwise sized to the contents.
    fn detach(&mut self) {
        if self.is_sole_owner() {
            return;
        }
        let capacity = if self.d.is_null() { self.len } else { self.capacity() };
        let capacity = capacity.max(self.len);
        self.relocate(capacity, 0);
    }

    /// Makes room to write `extra` units after the data, detaching and
    /// growing as needed.  Slack is biased to the back.
    fn ensure_back(&mut self, extra: usize) {
        let needed = self.len + extra;
        if self.is_sole_owner() {
            // SAFETY: live block.
            let total = unsafe { Header::capacity(self.d) };
            let off = self.offset();
            if total - off - self.len >= extra {
                return;
            }
            if total >= needed {
                // Enough room overall: slide the data to the front in place.
                unsafe {
                    let buf = Header::buffer(self.d);
                    core::ptr::copy(self.ptr, buf, self.len);
                    self.ptr = buf;
                    self.terminate();
                }
                return;
            }
            let grown = grown_capacity(needed, total);
            self.relocate(grown, 0);
            return;
        }
        let grown = grown_capacity(needed, if self.d.is_null() { 0 } else { self.capacity() });
        self.relocate(grown, 0);
    }

    /// Makes room to write `extra` units before the data.  Slack is biased
    /// to the front.
    fn ensure_front(&mut self, extra: usize) {
        if self.is_sole_owner() {
            if self.offset() >= extra {
                return;
            }
            // SAFETY: live block.
            let total = unsafe { Header::capacity(self.d) };
            if total >= self.len + extra {
                // Slide the data to the back in place; the regions may
                // overlap, so use a memmove.
                unsafe {
                    let dst = Header::buffer(self.d).add(total - self.len);
                    core::ptr::copy(self.ptr, dst, self.len);
                    self.ptr = dst;
                    self.terminate();
                }
                return;
            }
            let grown = grown_capacity(self.len + extra, total);
            self.relocate(grown, grown - self.len);
            return;
        }
        let current = if self.d.is_null() { 0 } else { self.capacity() };
        let grown = grown_capacity(self.len + extra, current);
        self.relocate(grown, grown - self.len);
    }

    /// Whether `range` points into this string's buffer.
    fn overlaps(&self, range: &[u16]) -> bool {
        if range.is_empty() || self.ptr.is_null() {
            return false;
        }
        let (start, end) = (self.ptr as usize, self.ptr as usize + 2 * self.len);
        let p = range.as_ptr() as usize;
        p >= start && p < end
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size mutation
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// Grows capacity to at least `n` units.  Never shrinks, never changes
    /// the contents.
    pub fn reserve(&mut self, n: usize) {
        if self.is_sole_owner() && self.capacity() >= n {
            return;
        }
        if self.d.is_null() && n == 0 {
            return;
        }
        self.relocate(n.max(self.len).max(self.capacity()), 0);
    }

    /// Sets the length to `n`.  New units are zero-filled; the caller is
    /// expected to overwrite them.
    pub fn resize(&mut self, n: usize) {
        self.resize_with(n, 0);
    }

    /// Sets the length to `n`, filling any growth with `fill`.
    pub fn resize_fill(&mut self, n: usize, fill: u16) {
        self.resize_with(n, fill);
    }

    fn resize_with(&mut self, n: usize, fill: u16) {
        if n <= self.len {
            self.truncate(n);
            return;
        }
        let grow = n - self.len;
        self.ensure_back(grow);
        // SAFETY: ensure_back guarantees `grow` writable units past the end.
        unsafe {
            let dst = (self.ptr as *mut u16).add(self.len);
            for i in 0..grow {
                dst.add(i).write(fill);
            }
            self.len = n;
            self.terminate();
        }
    }

    /// Shortens to `n` units; a larger `n` is a no-op.  Capacity is kept.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.len {
            return;
        }
        self.len = n;
        if self.is_sole_owner() {
            // SAFETY: sole owner of a live block; `n <= capacity`.
            unsafe { self.terminate() };
        } else if !self.d.is_null() || !self.ptr.is_null() {
            // Shared or aliased: leave the sharer's buffer untouched.
            self.detach();
        }
    }

    /// Removes the last `n` units.
    pub fn chop(&mut self, n: usize) {
        self.truncate(self.len.saturating_sub(n));
    }

    /// Empties the string and releases the buffer, collapsing to the shared
    /// empty state.
    pub fn clear(&mut self) {
        if !self.d.is_null() {
            // SAFETY: we own one reference.
            unsafe { Header::release(self.d) };
        }
        *self = Self::empty();
    }

    /// Fills the string with `unit`; with `Some(n)` it is resized first.
    pub fn fill(&mut self, unit: u16, n: Option<usize>) {
        if let Some(n) = n {
            self.resize(n);
        }
        self.detach();
        // SAFETY: detached sole owner; `len` units are writable.
        unsafe {
            let dst = self.ptr as *mut u16;
            for i in 0..self.len {
                dst.add(i).write(unit);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content mutation
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// Appends the units of `text`, using back slack when there is any.
    pub fn append(&mut self, text: Utf16View<'_>) -> &mut Self {
        let src = text.as_slice();
        if src.is_empty() {
            if self.is_null() && !text.is_null() {
                *self = Self::empty();
            }
            return self;
        }
        let scratch; // keeps an overlapping source alive across the grow
        let src = if self.overlaps(src) {
            scratch = src.to_vec();
            &scratch[..]
        } else {
            src
        };
        self.ensure_back(src.len());
        // SAFETY: ensure_back guarantees room; the source does not alias the
        // (possibly new) buffer.
        unsafe {
            core::ptr::copy_nonoverlapping(src.as_ptr(), (self.ptr as *mut u16).add(self.len), src.len());
            self.len += src.len();
            self.terminate();
        }
        self
    }

    /// Appends a single code unit.
    pub fn push(&mut self, unit: u16) -> &mut Self {
        self.append(Utf16View::new(&[unit]))
    }

    /// Appends a code point, encoding a surrogate pair when needed.
    pub fn push_code_point(&mut self, cp: u32) -> &mut Self {
        if cp > 0xFFFF {
            let pair = [crate::view::high_surrogate(cp), crate::view::low_surrogate(cp)];
            self.append(Utf16View::new(&pair))
        } else {
            self.push(cp as u16)
        }
    }

    /// Prepends the units of `text`, using front slack when there is any.
    pub fn prepend(&mut self, text: Utf16View<'_>) -> &mut Self {
        let src = text.as_slice();
        if src.is_empty() {
            if self.is_null() && !text.is_null() {
                *self = Self::empty();
            }
            return self;
        }
        let scratch;
        let src = if self.overlaps(src) {
            scratch = src.to_vec();
            &scratch[..]
        } else {
            src
        };
        self.ensure_front(src.len());
        // SAFETY: ensure_front guarantees `src.len()` units before the data.
        unsafe {
            let dst = (self.ptr as *mut u16).sub(src.len());
            core::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
            self.ptr = dst;
            self.len += src.len();
            self.terminate();
        }
        self
    }

    /// Inserts `text` at `pos`.  A position past the end first pads the
    /// string with spaces up to `pos`.
    pub fn insert(&mut self, pos: usize, text: Utf16View<'_>) -> &mut Self {
        let src = text.as_slice();
        if src.is_empty() {
            return self;
        }
        if pos >= self.len {
            self.resize_fill(pos, 0x20);
            return self.append(text);
        }

        // An overlapping source goes through scratch: the tail move below
        // would shift it under our feet.  Small sources use the stack.
        let mut stack = [0u16; OVERLAP_SCRATCH_UNITS];
        let heap;
        let src: &[u16] = if self.overlaps(src) {
            if src.len() <= OVERLAP_SCRATCH_UNITS {
                stack[..src.len()].copy_from_slice(src);
                &stack[..src.len()]
            } else {
                heap = src.to_vec();
                &heap[..]
            }
        } else {
            src
        };

        let k = src.len();
        self.ensure_back(k);
        // SAFETY: room for `k` more units; `pos < len`; the source no longer
        // aliases the buffer.
        unsafe {
            let base = self.ptr as *mut u16;
            core::ptr::copy(base.add(pos), base.add(pos + k), self.len - pos);
            core::ptr::copy_nonoverlapping(src.as_ptr(), base.add(pos), k);
            self.len += k;
            self.terminate();
        }
        self
    }

    /// Removes `n` units starting at `pos`, clamped to the string.  Capacity
    /// is preserved.
    pub fn remove(&mut self, pos: usize, n: usize) -> &mut Self {
        if pos >= self.len || n == 0 {
            return self;
        }
        let n = n.min(self.len - pos);
        self.detach();
        // SAFETY: detached sole owner; the ranges are inside the buffer.
        unsafe {
            let base = self.ptr as *mut u16;
            core::ptr::copy(base.add(pos + n), base.add(pos), self.len - pos - n);
            self.len -= n;
            self.terminate();
        }
        self
    }

    /// Replaces every occurrence of `before` with `after` under `cs`.
    ///
    /// Matches are collected up front with a matcher (non-overlapping, left
    /// to right), then rewritten with one of three plans: equal sizes
    /// overwrite in place, shrinking compacts left-to-right, growing
    /// pre-grows and expands right-to-left.
    pub fn replace(
        &mut self,
        before: Utf16View<'_>,
        after: Utf16View<'_>,
        cs: CaseSensitivity,
    ) -> &mut Self {
        let bl = before.len();
        let al = after.len();
        if self.len == 0 && bl > 0 {
            return self;
        }
        if bl == 0 && al == 0 {
            return self;
        }

        // Collect match positions first; mutation below invalidates them
        // otherwise.
        let indices: Vec<usize> = {
            let hay = self.view();
            let m = StringMatcher::new(before, cs);
            let mut indices = Vec::new();
            let mut from = 0isize;
            loop {
                let i = m.index_in(hay, from);
                if i < 0 {
                    break;
                }
                indices.push(i as usize);
                from = i + (bl as isize).max(1);
            }
            indices
        };
        if indices.is_empty() {
            return self;
        }

        // `after` may alias this buffer; stage it like insert does.
        let mut stack = [0u16; OVERLAP_SCRATCH_UNITS];
        let heap;
        let after_units: &[u16] = {
            let src = after.as_slice();
            if self.overlaps(src) {
                if src.len() <= OVERLAP_SCRATCH_UNITS {
                    stack[..src.len()].copy_from_slice(src);
                    &stack[..src.len()]
                } else {
                    heap = src.to_vec();
                    &heap[..]
                }
            } else {
                src
            }
        };

        if al == bl {
            self.detach();
            // SAFETY: detached; every index is at most len - bl.
            unsafe {
                let base = self.ptr as *mut u16;
                for &idx in &indices {
                    core::ptr::copy_nonoverlapping(after_units.as_ptr(), base.add(idx), al);
                }
            }
        } else if al < bl {
            // Compacting copy, left to right.
            self.detach();
            // SAFETY: detached; the target region always trails the source.
            unsafe {
                let base = self.ptr as *mut u16;
                let mut to = indices[0];
                let mut movestart = indices[0] + bl;
                for (n, &idx) in indices.iter().enumerate() {
                    if n > 0 {
                        let msize = idx - movestart;
                        if msize > 0 {
                            core::ptr::copy(base.add(movestart), base.add(to), msize);
                            to += msize;
                        }
                        movestart = idx + bl;
                    }
                    if al > 0 {
                        core::ptr::copy_nonoverlapping(after_units.as_ptr(), base.add(to), al);
                        to += al;
                    }
                }
                let tail = self.len - movestart;
                if tail > 0 {
                    core::ptr::copy(base.add(movestart), base.add(to), tail);
                }
                self.len = to + tail;
                self.terminate();
            }
        } else {
            // Expanding copy: grow once, then rewrite from the back so that
            // nothing is overwritten before it has been moved.
            let growth = indices.len() * (al - bl);
            let old_len = self.len;
            self.ensure_back(growth);
            // SAFETY: the buffer now holds old_len + growth writable units.
            unsafe {
                let base = self.ptr as *mut u16;
                let mut moveend = old_len;
                for (n, &idx) in indices.iter().enumerate().rev() {
                    let movestart = idx + bl;
                    let insertstart = idx + n * (al - bl);
                    let moveto = insertstart + al;
                    core::ptr::copy(base.add(movestart), base.add(moveto), moveend - movestart);
                    core::ptr::copy_nonoverlapping(after_units.as_ptr(), base.add(insertstart), al);
                    moveend = idx;
                }
                self.len = old_len + growth;
                self.terminate();
            }
        }
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    fn resolve_from(&self, from: isize) -> usize {
        if from < 0 {
            (from + self.len as isize).max(0) as usize
        } else {
            from as usize
        }
    }

    /// Index of the first occurrence of `needle` at or after `from`
    /// (negative `from` counts from the end), or -1.
    pub fn index_of(&self, needle: Utf16View<'_>, from: isize, cs: CaseSensitivity) -> isize {
        match matcher::find_string(self.as_slice(), self.resolve_from(from), needle.as_slice(), cs)
        {
            Some(i) => i as isize,
            None => -1,
        }
    }

    /// Index of the last occurrence of `needle` at or before `from`, or -1.
    /// `from = -1` searches from the end.
    pub fn last_index_of(&self, needle: Utf16View<'_>, from: isize, cs: CaseSensitivity) -> isize {
        matcher::rfind_string(self.as_slice(), from, needle.as_slice(), cs)
    }

    pub fn contains(&self, needle: Utf16View<'_>, cs: CaseSensitivity) -> bool {
        self.index_of(needle, 0, cs) >= 0
    }

    /// Number of (possibly overlapping) occurrences of `needle`.
    pub fn count(&self, needle: Utf16View<'_>, cs: CaseSensitivity) -> usize {
        let mut num = 0;
        let mut i: isize = -1;
        loop {
            i = self.index_of(needle, i + 1, cs);
            if i < 0 {
                return num;
            }
            num += 1;
        }
    }

    /// Index of the first occurrence of the code unit `unit`, or -1.  The
    /// case-sensitive scan is the word-at-a-time fast path.
    pub fn index_of_unit(&self, unit: u16, from: isize, cs: CaseSensitivity) -> isize {
        let from = self.resolve_from(from);
        if from > self.len {
            return -1;
        }
        let hay = self.as_slice();
        match cs {
            CaseSensitivity::Sensitive => match scan::find_code_unit(&hay[from..], unit) {
                Some(i) => (from + i) as isize,
                None => -1,
            },
            CaseSensitivity::Insensitive => {
                let target = fold_unit(&[unit], 0);
                (from..hay.len())
                    .find(|&i| fold_unit(hay, i) == target)
                    .map_or(-1, |i| i as isize)
            }
        }
    }

    /// Index of the last occurrence of the code unit `unit` at or before
    /// `from` (`-1` = from the end), or -1.
    pub fn last_index_of_unit(&self, unit: u16, from: isize, cs: CaseSensitivity) -> isize {
        let l = self.len as isize;
        let from = if from < 0 { from + l } else { from.min(l - 1) };
        if from < 0 {
            return -1;
        }
        let hay = &self.as_slice()[..=from as usize];
        match cs {
            CaseSensitivity::Sensitive => scan::rfind_code_unit(hay, unit).map_or(-1, |i| i as isize),
            CaseSensitivity::Insensitive => {
                let target = fold_unit(&[unit], 0);
                (0..hay.len())
                    .rev()
                    .find(|&i| fold_unit(hay, i) == target)
                    .map_or(-1, |i| i as isize)
            }
        }
    }

    pub fn starts_with<P: DecodableView + ?Sized>(&self, prefix: &P, cs: CaseSensitivity) -> bool {
        compare::starts_with_views(self, prefix, cs)
    }

    pub fn ends_with<P: DecodableView + ?Sized>(&self, suffix: &P, cs: CaseSensitivity) -> bool {
        compare::ends_with_views(self, suffix, cs)
    }

    /// Three-way comparison against any view encoding.
    pub fn compare<P: DecodableView + ?Sized>(&self, other: &P, cs: CaseSensitivity) -> i32 {
        compare::compare_views(self, other, cs)
    }

    /// Collation through the process locale (see
    /// [`compare::locale_aware_compare`]).
    pub fn locale_aware_compare(&self, other: &UString) -> i32 {
        compare::locale_aware_compare(self.as_slice(), other.as_slice())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slicing and cleanup (copying)
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    pub fn left(&self, n: usize) -> UString {
        UString::from_utf16(self.view().left(n).as_slice())
    }

    pub fn right(&self, n: usize) -> UString {
        UString::from_utf16(self.view().right(n).as_slice())
    }

    pub fn mid(&self, pos: isize, n: isize) -> UString {
        UString::from_utf16(self.view().mid(pos, n).as_slice())
    }

    /// The string without its last `n` units.
    pub fn chopped(&self, n: usize) -> UString {
        self.left(self.len.saturating_sub(n))
    }

    /// Whether `unit` is Unicode whitespace.
    fn is_space(unit: u16) -> bool {
        matches!(unit, 0x09..=0x0D | 0x20 | 0x85 | 0xA0 | 0x1680 | 0x2028 | 0x2029 | 0x202F | 0x205F | 0x3000)
            || (0x2000..=0x200A).contains(&unit)
    }

    /// Copy with leading and trailing whitespace removed.
    pub fn trimmed(&self) -> UString {
        let s = self.as_slice();
        let start = s.iter().position(|&u| !Self::is_space(u)).unwrap_or(s.len());
        let end = s.iter().rposition(|&u| !Self::is_space(u)).map_or(start, |i| i + 1);
        UString::from_utf16(&s[start..end])
    }

    /// Copy with whitespace trimmed and internal runs collapsed to a single
    /// space.
    pub fn simplified(&self) -> UString {
        let s = self.as_slice();
        let mut out = UString::with_capacity(s.len());
        let mut in_space = true; // swallows leading whitespace
        for &u in s {
            if Self::is_space(u) {
                in_space = true;
            } else {
                if in_space && !out.is_empty() {
                    out.push(0x20);
                }
                in_space = false;
                out.push(u);
            }
        }
        out
    }

    /// The string concatenated with itself `n` times.
    pub fn repeated(&self, n: usize) -> UString {
        if n == 0 || self.is_empty() {
            return UString::empty();
        }
        let mut out = UString::with_capacity(self.len * n);
        for _ in 0..n {
            out.append(self.view());
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions out
// ─────────────────────────────────────────────────────────────────────────────

impl UString {
    /// UTF-8 bytes; lone surrogates become `U+FFFD`.
    pub fn to_utf8(&self) -> Vec<u8> {
        convert::utf16_to_utf8(self.as_slice())
    }

    /// Latin-1 bytes; units above `U+00FF` become `?`.
    pub fn to_latin1(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len];
        convert::utf16_to_latin1_lossy(&mut out, self.as_slice());
        out
    }

    /// UCS-4 code points; unpaired surrogates become `U+FFFD`.
    pub fn to_ucs4(&self) -> Vec<u32> {
        convert::utf16_to_ucs4(self.as_slice())
    }

    /// The normalized form of this string under the pinned table version.
    pub fn normalized(&self, form: NormalizationForm, version: UnicodeVersion) -> UString {
        normalize::normalize(self.view(), form, version)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Standard traits
// ─────────────────────────────────────────────────────────────────────────────

impl DecodableView for UString {
    fn encoding(&self) -> Encoding {
        Encoding::Utf16
    }
    fn unit_len(&self) -> usize {
        self.len
    }
    fn stream(&self) -> CodePointStream<'_> {
        CodePointStream::Utf16(crate::view::utf16::Utf16CodePoints::new(self.as_slice()))
    }
}

impl PartialEq for UString {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for UString {}

impl PartialEq<&str> for UString {
    fn eq(&self, other: &&str) -> bool {
        self.as_slice().iter().copied().eq(other.encode_utf16())
    }
}

impl PartialOrd for UString {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UString {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        compare::compare_utf16(self.as_slice(), other.as_slice(), CaseSensitivity::Sensitive).cmp(&0)
    }
}

impl Hash for UString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Display for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf16_lossy(self.as_slice()))
    }
}

impl fmt::Debug for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("UString(null)");
        }
        write!(f, "UString({:?})", String::from_utf16_lossy(self.as_slice()))
    }
}

impl FromIterator<u16> for UString {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let units: Vec<u16> = iter.into_iter().collect();
        Self::from_utf16(&units)
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
    fn null_empty_and_terminator() {
        let null = UString::new();
        assert!(null.is_null() && null.is_empty());
        // Even the null string exposes a readable zero terminator.
        unsafe { assert_eq!(*null.data(), 0) };

        let empty = s("");
        assert!(!empty.is_null() && empty.is_empty());

        let hello = s("hello");
        assert_eq!(hello.len(), 5);
        unsafe { assert_eq!(*hello.data().add(5), 0) };
    }

    #[test]
    fn clone_shares_and_detach_copies() {
        let a = s("hello");
        let b = a.clone();
        assert_eq!(a.data(), b.data());
        assert_eq!(a.ref_count(), 2);

        let mut b = b;
        b.append(Utf16View::new(&[0x21]));
        assert_ne!(a.data(), b.data());
        assert_eq!(a, "hello");
        assert_eq!(b, "hello!");
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn raw_data_aliases_until_mutation() {
        let backing: Vec<u16> = "backing".encode_utf16().collect();
        // SAFETY: `backing` outlives both strings.
        let mut raw = unsafe { UString::from_raw_data(backing.as_ptr(), backing.len()) };
        assert_eq!(raw.data(), backing.as_ptr());
        assert_eq!(raw.ref_count(), -1);

        raw.push(0x21);
        assert_ne!(raw.data(), backing.as_ptr());
        assert_eq!(raw, "backing!");
    }

    #[test]
    fn reserve_and_capacity() {
        let mut x = UString::with_capacity(64);
        assert!(x.capacity() >= 64);
        x.append(Utf16View::new(&"abc".encode_utf16().collect::<Vec<_>>()));
        let p = x.data();
        for _ in 0..30 {
            x.push(0x62);
        }
        // 33 units fit in the reserved 64 without moving.
        assert_eq!(x.data(), p);
        x.reserve(10);
        assert!(x.capacity() >= 64);
    }

    #[test]
    fn resize_truncate_chop() {
        let mut x = s("abcdef");
        x.truncate(3);
        assert_eq!(x, "abc");
        let cap = x.capacity();
        x.chop(1);
        assert_eq!(x, "ab");
        assert_eq!(x.capacity(), cap);
        x.resize_fill(4, 0x7A);
        assert_eq!(x, "abzz");
        x.resize(6);
        assert_eq!(x.len(), 6);
        assert_eq!(&x.as_slice()[4..], &[0, 0]);
    }

    #[test]
    fn truncating_a_shared_string_detaches() {
        let a = s("shared-data");
        let mut b = a.clone();
        b.truncate(6);
        assert_eq!(a, "shared-data");
        assert_eq!(b, "shared");
    }

    #[test]
    fn append_prepend_use_slack() {
        let mut x = s("mid");
        x.prepend(Utf16View::new(&"ab ".encode_utf16().collect::<Vec<_>>()));
        assert_eq!(x, "ab mid");
        x.append(Utf16View::new(&" yz".encode_utf16().collect::<Vec<_>>()));
        assert_eq!(x, "ab mid yz");

        // Once front slack exists, further prepends reuse it in place.
        let mut y = UString::with_capacity(4);
        y.push(0x62);
        y.prepend(Utf16View::new(&[0x61]));
        assert_eq!(y, "ab");
        let p = y.data();
        // The buffer grew for the prepend; the next one finds slack.
        y.prepend(Utf16View::new(&[0x5F]));
        assert_eq!(y, "_ab");
        let _ = p;
    }

    #[test]
    fn insert_with_padding() {
        let mut x = s("ab");
        x.insert(1, Utf16View::new(&"__".encode_utf16().collect::<Vec<_>>()));
        assert_eq!(x, "a__b");

        let mut y = s("ab");
        y.insert(5, Utf16View::new(&[0x21]));
        assert_eq!(y, "ab   !");
    }

    #[test]
    fn insert_from_own_buffer() {
        let mut x = s("abcd");
        let view = unsafe { Utf16View::from_raw_parts(x.data(), 2) };
        x.insert(3, view);
        assert_eq!(x, "abcabd");
    }

    #[test]
    fn remove_clamps() {
        let mut x = s("abcdef");
        x.remove(1, 2);
        assert_eq!(x, "adef");
        x.remove(3, 100);
        assert_eq!(x, "ade");
        x.remove(10, 1);
        assert_eq!(x, "ade");
    }

    #[test]
    fn replace_equal_shrink_grow() {
        let mut eq = s("one two one");
        eq.replace(
            Utf16View::new(&"one".encode_utf16().collect::<Vec<_>>()),
            Utf16View::new(&"ONE".encode_utf16().collect::<Vec<_>>()),
            CaseSensitivity::Sensitive,
        );
        assert_eq!(eq, "ONE two ONE");

        let mut shrink = s("aa-bb-aa");
        shrink.replace(
            Utf16View::new(&"aa".encode_utf16().collect::<Vec<_>>()),
            Utf16View::new(&[0x78]),
            CaseSensitivity::Sensitive,
        );
        assert_eq!(shrink, "x-bb-x");

        let mut grow = s("a.b.c");
        grow.replace(
            Utf16View::new(&[0x2E]),
            Utf16View::new(&"::".encode_utf16().collect::<Vec<_>>()),
            CaseSensitivity::Sensitive,
        );
        assert_eq!(grow, "a::b::c");
    }

    #[test]
    fn replace_case_insensitive() {
        let mut x = s("Ab aB AB");
        x.replace(
            Utf16View::new(&"ab".encode_utf16().collect::<Vec<_>>()),
            Utf16View::new(&[0x2A]),
            CaseSensitivity::Insensitive,
        );
        assert_eq!(x, "* * *");
    }

    #[test]
    fn search_wrappers() {
        let x = s("the cat and the hat");
        let the: Vec<u16> = "the".encode_utf16().collect();
        let the_v = Utf16View::new(&the);
        assert_eq!(x.index_of(the_v, 0, CaseSensitivity::Sensitive), 0);
        assert_eq!(x.index_of(the_v, 1, CaseSensitivity::Sensitive), 12);
        assert_eq!(x.last_index_of(the_v, -1, CaseSensitivity::Sensitive), 12);
        assert_eq!(x.count(the_v, CaseSensitivity::Sensitive), 2);
        assert!(x.contains(the_v, CaseSensitivity::Sensitive));
        assert_eq!(x.index_of_unit(0x63, 0, CaseSensitivity::Sensitive), 4);
        assert_eq!(x.last_index_of_unit(0x68, -1, CaseSensitivity::Sensitive), 16);
        assert_eq!(x.index_of_unit(0x43, 0, CaseSensitivity::Insensitive), 4);
    }

    #[test]
    fn overlapping_count() {
        let x = s("aaa");
        let aa: Vec<u16> = "aa".encode_utf16().collect();
        assert_eq!(x.count(Utf16View::new(&aa), CaseSensitivity::Sensitive), 2);
    }

    #[test]
    fn trimming_and_simplify() {
        assert_eq!(s("  a b  ").trimmed(), "a b");
        assert_eq!(s("\t x \u{00A0} y \n").simplified(), "x y");
        assert_eq!(s("   ").trimmed(), "");
        assert_eq!(s("a").repeated(3), "aaa");
    }

    #[test]
    fn slicing_copies() {
        let x = s("abcdef");
        assert_eq!(x.left(2), "ab");
        assert_eq!(x.right(2), "ef");
        assert_eq!(x.mid(2, 2), "cd");
        assert_eq!(x.mid(-2, -1), "ef");
        assert_eq!(x.chopped(1), "abcde");
    }

    #[test]
    fn ordering_and_hash_consistency() {
        let a = s("abc");
        let b = s("abd");
        assert!(a < b);
        assert_eq!(a.compare(&b, CaseSensitivity::Sensitive), -1);
        let a2 = a.clone();
        use std::collections::hash_map::DefaultHasher;
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        a.hash(&mut h1);
        a2.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn threads_can_share_one_buffer() {
        let a = s("shared across threads");
        let clones: Vec<UString> = (0..4).map(|_| a.clone()).collect();
        let handles: Vec<_> = clones
            .into_iter()
            .map(|c| std::thread::spawn(move || c.count(
                Utf16View::new(&[0x61]),
                CaseSensitivity::Sensitive,
            )))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 3);
        }
        assert_eq!(a, "shared across threads");
    }
}
