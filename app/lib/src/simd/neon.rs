//! NEON backend for aarch64.
//!
//! NEON is mandatory on aarch64, so these wrappers are always usable once
//! compiled. Unlike x86, NEON has distinct register types per lane width
//! (`uint8x16_t`, `uint32x4_t`); the 32-bit high-bit test reinterprets the
//! register as bytes to reuse the 8-bit reduction.
//!
//! # Safety
//!
//! Only `load_unaligned` is unsafe to call: it dereferences a raw pointer.

#![allow(unused_unsafe)]

use std::arch::aarch64::*;

use super::{SaturatingSub, Vector};

/// Sixteen `u8` lanes in one NEON register.
#[derive(Debug, Clone, Copy)]
pub struct Vector8(uint8x16_t);

/// Four `u32` lanes in one NEON register.
#[derive(Debug, Clone, Copy)]
pub struct Vector32(uint32x4_t);

impl Vector for Vector8 {
    type Lane = u8;
    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn load_unaligned(src: *const u8) -> Self {
        Vector8(vld1q_u8(src))
    }

    #[inline(always)]
    fn splat(value: u8) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector8(unsafe { vdupq_n_u8(value) })
    }

    #[inline(always)]
    fn cmpeq(self, other: Self) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector8(unsafe { vceqq_u8(self.0, other.0) })
    }

    #[inline(always)]
    fn or(self, other: Self) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector8(unsafe { vorrq_u8(self.0, other.0) })
    }

    /// The largest byte exceeds 0x7F iff some byte has its top bit set.
    #[inline(always)]
    fn is_highbit_set(self) -> bool {
        // Safety: NEON is mandatory on aarch64.
        unsafe { vmaxvq_u8(self.0) > 0x7F }
    }
}

impl SaturatingSub for Vector8 {
    #[inline(always)]
    fn saturating_sub(self, other: Self) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector8(unsafe { vqsubq_u8(self.0, other.0) })
    }
}

impl Vector for Vector32 {
    type Lane = u32;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load_unaligned(src: *const u32) -> Self {
        Vector32(vld1q_u32(src))
    }

    #[inline(always)]
    fn splat(value: u32) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector32(unsafe { vdupq_n_u32(value) })
    }

    #[inline(always)]
    fn cmpeq(self, other: Self) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector32(unsafe { vceqq_u32(self.0, other.0) })
    }

    #[inline(always)]
    fn or(self, other: Self) -> Self {
        // Safety: NEON is mandatory on aarch64.
        Vector32(unsafe { vorrq_u32(self.0, other.0) })
    }

    /// Byte-level reduction over the reinterpreted register. `vceqq_u32`
    /// yields 0 or 0xFFFFFFFF per lane, so a matched lane contributes four
    /// 0xFF bytes and an unmatched lane none.
    #[inline(always)]
    fn is_highbit_set(self) -> bool {
        // Safety: NEON is mandatory on aarch64.
        unsafe { vmaxvq_u8(vreinterpretq_u8_u32(self.0)) > 0x7F }
    }
}
