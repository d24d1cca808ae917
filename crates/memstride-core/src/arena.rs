//! Working buffers for measurement passes.

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};

/// Memory page size assumed by the page-copy routines and page scenarios.
pub const PAGE_SIZE: usize = 4096;

/// Cache-line "chunk" granularity used by the chunk-aligned scenarios.
pub const CHUNK_SIZE: usize = 32;

/// The chunk region starts 17 chunks into the page region, so it is neither
/// page aligned nor at an obvious power-of-two offset.
pub const CHUNK_BASE: usize = 17 * CHUNK_SIZE;

/// Total size of the scratch allocation.
pub const ARENA_SIZE: usize = 32 * 1024 * 1024;

/// The single large scratch allocation every benchmark copy operates on.
///
/// Page aligned, allocated once at startup. Scenario offsets are relative to
/// its base; chunk scenarios add [`CHUNK_BASE`]. Every copy call mutates it,
/// but execution is single-threaded so there is nothing to guard.
#[derive(Debug)]
pub struct Arena {
    ptr: *mut u8,
    layout: Layout,
}

impl Arena {
    /// Allocate the scratch region.
    #[must_use]
    pub fn new() -> Self {
        let layout = Layout::from_size_align(ARENA_SIZE, PAGE_SIZE)
            .expect("arena layout is statically valid");
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            handle_alloc_error(layout);
        }
        Self { ptr, layout }
    }

    /// Base of the page-aligned region.
    #[must_use]
    pub fn base(&mut self) -> *mut u8 {
        self.ptr
    }

    /// Size of the region in bytes.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn len(&self) -> usize {
        ARENA_SIZE
    }

    /// Always false; the arena has a fixed non-zero size.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Touch the whole region, read then write, to push the benchmark
    /// working set out of the CPU caches before a measurement.
    pub fn evict_caches(&mut self) {
        let mut acc: u8 = 0;
        // SAFETY: all offsets are within the allocation.
        unsafe {
            let mut i = 0;
            while i < ARENA_SIZE {
                acc = acc.wrapping_add(*self.ptr.add(i));
                i += 4;
            }
            let acc = std::hint::black_box(acc);
            let mut i = 0;
            while i < ARENA_SIZE {
                *self.ptr.add(i) = acc;
                i += 4;
            }
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with this exact layout.
        unsafe { dealloc(self.ptr, self.layout) }
    }
}
