//! The search drivers.
//!
//! Each driver scans `[0, tail_idx)` one stride at a time with a single
//! vector predicate test per stride and returns on the first hit, then
//! checks `[tail_idx, len)` one element at a time. Nothing is allocated and
//! the input is only read.
//!
//! # Example
//!
//! ```rust
//! use lfind_simd::{lfind32, lfind8, lfind8_le};
//!
//! let odd = [1u8, 3, 5, 7, 9, 11, 13, 15];
//! assert!(lfind8(5, &odd));
//! assert!(!lfind8(2, &odd));
//!
//! let tens = [10u8, 30, 50, 70, 90, 110, 130, 150];
//! assert!(lfind8_le(25, &tens));
//! assert!(!lfind8_le(5, &tens));
//!
//! assert!(lfind32(0xDEADBEEF, &[0xDEADBEEF]));
//! assert!(!lfind32(0xCAFEBABE, &[0xDEADBEEF]));
//! ```

use crate::predicate::{has_equal, has_less_or_equal};
use crate::simd::{Vector, Vector32, Vector8};

/// Elements consumed per vector iteration by [`lfind8`] and [`lfind8_le`].
pub const LFIND8_STRIDE: usize = Vector8::LANES;

/// Registers compared per [`lfind32`] iteration before one combined test.
pub const LFIND32_UNROLL: usize = 4;

/// Elements consumed per vector iteration by [`lfind32`].
pub const LFIND32_STRIDE: usize = LFIND32_UNROLL * Vector32::LANES;

/// Largest prefix of `nelem` that is a whole number of strides.
///
/// `stride` must be a power of two.
#[inline(always)]
pub(crate) const fn tail_index(nelem: usize, stride: usize) -> usize {
    debug_assert!(stride.is_power_of_two());
    nelem & !(stride - 1)
}

/// Return true if any element of `base` equals `key`.
#[inline]
pub fn lfind8(key: u8, base: &[u8]) -> bool {
    scan8(base, |chunk| has_equal(chunk, key), |x| x == key)
}

/// Return true if any element of `base` is less than or equal to `key`.
#[inline]
pub fn lfind8_le(key: u8, base: &[u8]) -> bool {
    scan8(base, |chunk| has_less_or_equal(chunk, key), |x| x <= key)
}

#[inline(always)]
fn scan8<V, S>(base: &[u8], vector_hit: V, scalar_hit: S) -> bool
where
    V: Fn(Vector8) -> bool,
    S: Fn(u8) -> bool,
{
    let tail_idx = tail_index(base.len(), LFIND8_STRIDE);
    let ptr = base.as_ptr();

    let mut i = 0;
    while i < tail_idx {
        // Safety: i + LFIND8_STRIDE <= tail_idx <= base.len().
        let chunk = unsafe { Vector8::load_unaligned(ptr.add(i)) };
        if vector_hit(chunk) {
            return true;
        }
        i += LFIND8_STRIDE;
    }

    base[tail_idx..].iter().any(|&x| scalar_hit(x))
}

/// Return true if any element of `base` equals `key`.
///
/// Each iteration loads four registers, compares all of them against the
/// key, ORs the results together and tests once. Which register matched is
/// not tracked; only existence is reported.
#[inline]
pub fn lfind32(key: u32, base: &[u32]) -> bool {
    // Safety: a slice provides `len` readable elements (none when empty).
    unsafe { scan32(key, base.as_ptr(), base.len()) }
}

/// Pointer-based core of [`lfind32`] and [`lfind32_raw`]; never forms a
/// `&[u32]`, so `ptr` may be unaligned.
///
/// # Safety
///
/// `nelem` `u32`s must be readable from `ptr`; alignment is not required.
#[inline(always)]
unsafe fn scan32(key: u32, ptr: *const u32, nelem: usize) -> bool {
    const PER_VECTOR: usize = Vector32::LANES;

    let keys = Vector32::splat(key);
    let tail_idx = tail_index(nelem, LFIND32_STRIDE);

    let mut i = 0;
    while i < tail_idx {
        // i + LFIND32_STRIDE <= tail_idx <= nelem, and the four loads cover
        // exactly [i, i + LFIND32_STRIDE).
        let vals1 = Vector32::load_unaligned(ptr.add(i));
        let vals2 = Vector32::load_unaligned(ptr.add(i + PER_VECTOR));
        let vals3 = Vector32::load_unaligned(ptr.add(i + PER_VECTOR * 2));
        let vals4 = Vector32::load_unaligned(ptr.add(i + PER_VECTOR * 3));

        let result1 = keys.cmpeq(vals1);
        let result2 = keys.cmpeq(vals2);
        let result3 = keys.cmpeq(vals3);
        let result4 = keys.cmpeq(vals4);

        let tmp1 = result1.or(result2);
        let tmp2 = result3.or(result4);
        if tmp1.or(tmp2).is_highbit_set() {
            return true;
        }

        i += LFIND32_STRIDE;
    }

    while i < nelem {
        if ptr.add(i).read_unaligned() == key {
            return true;
        }
        i += 1;
    }

    false
}

/// Pointer-and-count form of [`lfind8`].
///
/// # Safety
///
/// If `nelem > 0`, `base` must point to `nelem` initialized, readable `u8`s
/// that are not mutated for the duration of the call. If `nelem == 0`,
/// `base` is never dereferenced and may be null. No alignment is required.
pub unsafe fn lfind8_raw(key: u8, base: *const u8, nelem: u32) -> bool {
    if nelem == 0 {
        return false;
    }
    lfind8(key, std::slice::from_raw_parts(base, nelem as usize))
}

/// Pointer-and-count form of [`lfind8_le`].
///
/// # Safety
///
/// Same contract as [`lfind8_raw`].
pub unsafe fn lfind8_le_raw(key: u8, base: *const u8, nelem: u32) -> bool {
    if nelem == 0 {
        return false;
    }
    lfind8_le(key, std::slice::from_raw_parts(base, nelem as usize))
}

/// Pointer-and-count form of [`lfind32`].
///
/// # Safety
///
/// If `nelem > 0`, `base` must point to `nelem` initialized, readable `u32`s
/// that are not mutated for the duration of the call. If `nelem == 0`,
/// `base` is never dereferenced and may be null. `base` does not have to be
/// 4-byte aligned.
pub unsafe fn lfind32_raw(key: u32, base: *const u32, nelem: u32) -> bool {
    if nelem == 0 {
        return false;
    }
    scan32(key, base, nelem as usize)
}
