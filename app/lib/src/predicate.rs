//! Boolean predicates over one vector.
//!
//! These compose the backend primitives and know nothing about the
//! architecture underneath. Each collapses a whole vector to a single
//! boolean with one high-bit reduction.

use crate::simd::{Lane, SaturatingSub, Vector};

/// True if any lane of `v` equals `c`.
#[inline(always)]
pub fn has_equal<V: Vector>(v: V, c: V::Lane) -> bool {
    v.cmpeq(V::splat(c)).is_highbit_set()
}

/// True if any lane of `v` is zero.
#[inline(always)]
pub fn has_zero<V: Vector>(v: V) -> bool {
    has_equal(v, <V::Lane as Lane>::ZERO)
}

/// True if any lane of `v` is less than or equal to `c`.
///
/// Lanes `<= c` become zero under saturating subtraction and only those do,
/// so this needs no unsigned compare instruction.
#[inline(always)]
pub fn has_less_or_equal<V: SaturatingSub>(v: V, c: V::Lane) -> bool {
    has_zero(v.saturating_sub(V::splat(c)))
}
