//! Reference-counted storage block for [`UString`](super::UString).
//!
//! One heap allocation holds a [`Header`] followed by `capacity + 1` code
//! units; the extra slot always leaves room for the zero terminator.  The
//! string keeps its own `(data pointer, length)` pair, so the data may start
//! anywhere inside the block: units before it are prepend slack, units after
//! `data + len` are append slack.
//!
//! The reference count is only meaningful for heap blocks.  Unowned storage
//! (the static empty sentinel and `from_raw_data` aliases) has no header at
//! all and reports a count of -1; it is never freed and never written.
//!
//! Memory ordering: increments use acquire-release, decrements release, and
//! the releasing thread that drops the count to zero performs an acquire
//! fence before deallocating, so every write made by other sharers is
//! visible to the free.

use std::alloc::{self, Layout};
use std::sync::atomic::{fence, AtomicIsize, Ordering};

use crate::config::MIN_ALLOC_UNITS;

/// Header at the front of every owned allocation.
#[repr(C)]
pub(crate) struct Header {
    refcnt: AtomicIsize,
    capacity: usize,
}

/// Layout of a block holding `capacity + 1` units behind a header.
/// A capacity large enough to overflow the layout arithmetic is treated as
/// allocation failure.
fn block_layout(capacity: usize) -> Layout {
    let units = Layout::array::<u16>(capacity + 1)
        .unwrap_or_else(|_| alloc::handle_alloc_error(Layout::new::<Header>()));
    Layout::new::<Header>()
        .extend(units)
        .unwrap_or_else(|_| alloc::handle_alloc_error(Layout::new::<Header>()))
        .0
        .pad_to_align()
}

impl Header {
    /// Allocates a block for `capacity` units with a reference count of 1.
    /// Allocation failure is fatal.
    pub(crate) fn allocate(capacity: usize) -> *mut Header {
        let layout = block_layout(capacity);
        // SAFETY: the layout has non-zero size (it always includes the
        // header and the terminator slot).
        let raw = unsafe { alloc::alloc(layout) } as *mut Header;
        if raw.is_null() {
            alloc::handle_alloc_error(layout);
        }
        // SAFETY: `raw` is valid for writes of a Header.
        unsafe {
            raw.write(Header { refcnt: AtomicIsize::new(1), capacity });
        }
        raw
    }

    /// First unit slot of the block.
    ///
    /// # Safety
    /// `this` must point to a live block from [`Header::allocate`].
    #[inline]
    pub(crate) unsafe fn buffer(this: *mut Header) -> *mut u16 {
        let base = (this as *mut u8).add(core::mem::size_of::<Header>());
        base as *mut u16
    }

    /// Usable capacity in units (terminator slot excluded).
    ///
    /// # Safety
    /// `this` must point to a live block.
    #[inline]
    pub(crate) unsafe fn capacity(this: *const Header) -> usize {
        (*this).capacity
    }

    /// Current reference count.
    ///
    /// # Safety
    /// `this` must point to a live block.
    #[inline]
    pub(crate) unsafe fn ref_count(this: *const Header) -> isize {
        (*this).refcnt.load(Ordering::Relaxed)
    }

    /// Registers another sharer.
    ///
    /// # Safety
    /// `this` must point to a live block and the caller must hold one of the
    /// existing references.
    #[inline]
    pub(crate) unsafe fn retain(this: *mut Header) {
        (*this).refcnt.fetch_add(1, Ordering::AcqRel);
    }

    /// Drops one reference; frees the block when it was the last.
    ///
    /// # Safety
    /// `this` must point to a live block and the caller must own the
    /// reference being released.  `this` is dangling afterwards.
    pub(crate) unsafe fn release(this: *mut Header) {
        if (*this).refcnt.fetch_sub(1, Ordering::Release) == 1 {
            fence(Ordering::Acquire);
            let layout = block_layout((*this).capacity);
            alloc::dealloc(this as *mut u8, layout);
        }
    }
}

/// Which end of the buffer a mutation is about to grow.  Reallocation puts
/// the slack on that side.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum GrowthSide {
    Front,
    Back,
}

/// Geometric growth: at least double the larger of what is needed and what
/// is already there, with a floor for small strings.
pub(crate) fn grown_capacity(needed: usize, current: usize) -> usize {
    (2 * needed.max(current)).max(MIN_ALLOC_UNITS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
