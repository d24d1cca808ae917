//! The copy routines under test.
//!
//! The harness itself never looks inside these: it consumes them purely as
//! [`CopyFn`] values satisfying the `copy(dest, src, len) -> dest` contract.
//! They are interchangeable and could be swapped for platform-tuned
//! assembly without touching the rest of the crate. The page-copy routines
//! ignore `len` and always move exactly one [`PAGE_SIZE`] block.

use crate::arena::PAGE_SIZE;

/// Uniform signature shared by every copy routine.
///
/// Callers guarantee that `[dest, dest + len)` and `[src, src + len)` are
/// valid for writes/reads and do not overlap (for page routines, valid for a
/// full page regardless of `len`).
pub type CopyFn = unsafe fn(*mut u8, *const u8, usize) -> *mut u8;

/// Plain copy through the standard library's intrinsic path.
///
/// # Safety
///
/// `dest` and `src` must be valid for `len` bytes and must not overlap.
pub unsafe fn standard_copy(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
    std::ptr::copy_nonoverlapping(src, dest, len);
    dest
}

/// Kernel-style reference copy: one byte at a time, front to back.
///
/// # Safety
///
/// `dest` and `src` must be valid for `len` bytes and must not overlap.
pub unsafe fn kernel_copy_orig(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
    for i in 0..len {
        *dest.add(i) = *src.add(i);
    }
    dest
}

/// Kernel-style optimized copy: aligns the destination, then moves 32-byte
/// blocks as four word transfers, with word and byte tails.
///
/// # Safety
///
/// `dest` and `src` must be valid for `len` bytes and must not overlap.
pub unsafe fn kernel_copy_opt(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
    const WORD: usize = std::mem::size_of::<u64>();

    let mut d = dest;
    let mut s = src;
    let mut n = len;

    while n > 0 && (d as usize) & (WORD - 1) != 0 {
        *d = *s;
        d = d.add(1);
        s = s.add(1);
        n -= 1;
    }

    // Destination is now word aligned; the source may not be.
    while n >= 4 * WORD {
        let w0 = s.cast::<u64>().read_unaligned();
        let w1 = s.add(WORD).cast::<u64>().read_unaligned();
        let w2 = s.add(2 * WORD).cast::<u64>().read_unaligned();
        let w3 = s.add(3 * WORD).cast::<u64>().read_unaligned();
        d.cast::<u64>().write(w0);
        d.add(WORD).cast::<u64>().write(w1);
        d.add(2 * WORD).cast::<u64>().write(w2);
        d.add(3 * WORD).cast::<u64>().write(w3);
        d = d.add(4 * WORD);
        s = s.add(4 * WORD);
        n -= 4 * WORD;
    }

    while n >= WORD {
        d.cast::<u64>().write(s.cast::<u64>().read_unaligned());
        d = d.add(WORD);
        s = s.add(WORD);
        n -= WORD;
    }

    while n > 0 {
        *d = *s;
        d = d.add(1);
        s = s.add(1);
        n -= 1;
    }

    dest
}

/// Reference page copy: a plain word loop over exactly one page. `len` is
/// ignored.
///
/// # Safety
///
/// `dest` and `src` must be valid for [`PAGE_SIZE`] bytes and must not
/// overlap, regardless of `len`.
pub unsafe fn page_copy_orig(dest: *mut u8, src: *const u8, _len: usize) -> *mut u8 {
    const WORD: usize = std::mem::size_of::<u64>();
    for i in 0..PAGE_SIZE / WORD {
        let w = src.add(i * WORD).cast::<u64>().read_unaligned();
        dest.add(i * WORD).cast::<u64>().write_unaligned(w);
    }
    dest
}

/// Optimized page copy: one full-page block transfer. `len` is ignored.
///
/// # Safety
///
/// `dest` and `src` must be valid for [`PAGE_SIZE`] bytes and must not
/// overlap, regardless of `len`.
pub unsafe fn page_copy_opt(dest: *mut u8, src: *const u8, _len: usize) -> *mut u8 {
    std::ptr::copy_nonoverlapping(src, dest, PAGE_SIZE);
    dest
}
