//! SSE2 backend for x86_64.
//!
//! SSE2 is part of the x86_64 baseline, so every intrinsic used here is
//! available on any CPU this module can be compiled for. One integer type,
//! `__m128i`, backs both lane widths; the wrappers keep them apart.
//!
//! # Safety
//!
//! Only `load_unaligned` is unsafe to call: it dereferences a raw pointer.

// Intrinsics are safe to call on newer toolchains when SSE2 is statically enabled.
#![allow(unused_unsafe)]

use std::arch::x86_64::*;

use super::{SaturatingSub, Vector};

/// Sixteen `u8` lanes in one SSE register.
#[derive(Debug, Clone, Copy)]
pub struct Vector8(__m128i);

/// Four `u32` lanes in one SSE register.
#[derive(Debug, Clone, Copy)]
pub struct Vector32(__m128i);

impl Vector for Vector8 {
    type Lane = u8;
    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn load_unaligned(src: *const u8) -> Self {
        Vector8(_mm_loadu_si128(src as *const __m128i))
    }

    #[inline(always)]
    fn splat(value: u8) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector8(unsafe { _mm_set1_epi8(value as i8) })
    }

    #[inline(always)]
    fn cmpeq(self, other: Self) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector8(unsafe { _mm_cmpeq_epi8(self.0, other.0) })
    }

    #[inline(always)]
    fn or(self, other: Self) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector8(unsafe { _mm_or_si128(self.0, other.0) })
    }

    #[inline(always)]
    fn is_highbit_set(self) -> bool {
        // Safety: SSE2 is enabled for every x86_64 target.
        unsafe { _mm_movemask_epi8(self.0) != 0 }
    }
}

impl SaturatingSub for Vector8 {
    #[inline(always)]
    fn saturating_sub(self, other: Self) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector8(unsafe { _mm_subs_epu8(self.0, other.0) })
    }
}

impl Vector for Vector32 {
    type Lane = u32;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load_unaligned(src: *const u32) -> Self {
        Vector32(_mm_loadu_si128(src as *const __m128i))
    }

    #[inline(always)]
    fn splat(value: u32) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector32(unsafe { _mm_set1_epi32(value as i32) })
    }

    #[inline(always)]
    fn cmpeq(self, other: Self) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector32(unsafe { _mm_cmpeq_epi32(self.0, other.0) })
    }

    #[inline(always)]
    fn or(self, other: Self) -> Self {
        // Safety: SSE2 is enabled for every x86_64 target.
        Vector32(unsafe { _mm_or_si128(self.0, other.0) })
    }

    /// `_mm_movemask_epi8` gathers the top bit of all 16 bytes. A 32-bit
    /// comparison lane is 0x00000000 or 0xFFFFFFFF, so its four bytes agree
    /// and any one of them stands for the whole lane.
    #[inline(always)]
    fn is_highbit_set(self) -> bool {
        // Safety: SSE2 is enabled for every x86_64 target.
        unsafe { _mm_movemask_epi8(self.0) != 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load8(bytes: &[u8; 16]) -> Vector8 {
        unsafe { Vector8::load_unaligned(bytes.as_ptr()) }
    }

    fn load32(words: &[u32; 4]) -> Vector32 {
        unsafe { Vector32::load_unaligned(words.as_ptr()) }
    }

    fn lanes8(v: Vector8) -> [u8; 16] {
        let mut out = [0u8; 16];
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, v.0) };
        out
    }

    fn lanes32(v: Vector32) -> [u32; 4] {
        let mut out = [0u32; 4];
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, v.0) };
        out
    }

    #[test]
    fn test_splat_fills_every_lane() {
        assert_eq!(lanes8(Vector8::splat(0xAB)), [0xAB; 16]);
        assert_eq!(lanes32(Vector32::splat(0xDEADBEEF)), [0xDEADBEEF; 4]);
    }

    #[test]
    fn test_load_unaligned_offsets() {
        let data: Vec<u8> = (0..48).collect();
        for offset in 0..32 {
            let v = unsafe { Vector8::load_unaligned(data.as_ptr().add(offset)) };
            let expected: Vec<u8> = (offset as u8..offset as u8 + 16).collect();
            assert_eq!(lanes8(v).to_vec(), expected, "offset {}", offset);
        }

        let words: Vec<u32> = (100..120).collect();
        for offset in 0..16 {
            let v = unsafe { Vector32::load_unaligned(words.as_ptr().add(offset)) };
            let base = 100 + offset as u32;
            assert_eq!(lanes32(v), [base, base + 1, base + 2, base + 3]);
        }
    }

    #[test]
    fn test_cmpeq_lanes_are_all_or_nothing() {
        let mut bytes = [0u8; 16];
        bytes[3] = 9;
        bytes[15] = 9;
        let eq = lanes8(load8(&bytes).cmpeq(Vector8::splat(9)));
        for (i, lane) in eq.iter().enumerate() {
            let expected = if i == 3 || i == 15 { 0xFF } else { 0x00 };
            assert_eq!(*lane, expected, "lane {}", i);
        }

        let eq = lanes32(load32(&[1, 0x8000_0001, 1, 7]).cmpeq(Vector32::splat(1)));
        assert_eq!(eq, [u32::MAX, 0, u32::MAX, 0]);
    }

    #[test]
    fn test_or_combines() {
        let a = load32(&[0xF0, 0, 0, 0]);
        let b = load32(&[0x0F, 0, 0, 0x10]);
        assert_eq!(lanes32(a.or(b)), [0xFF, 0, 0, 0x10]);

        let a = Vector8::splat(0x01);
        let b = Vector8::splat(0x80);
        assert_eq!(lanes8(a.or(b)), [0x81; 16]);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let bytes = [0, 1, 24, 25, 26, 100, 200, 255, 0, 0, 0, 0, 0, 0, 0, 25];
        let result = lanes8(load8(&bytes).saturating_sub(Vector8::splat(25)));
        for (i, (&input, &out)) in bytes.iter().zip(result.iter()).enumerate() {
            assert_eq!(out, input.saturating_sub(25), "lane {}", i);
            assert_eq!(out == 0, input <= 25, "lane {}", i);
        }
    }

    #[test]
    fn test_highbit_reduction_vector8() {
        assert!(!Vector8::splat(0x7F).is_highbit_set());
        assert!(Vector8::splat(0x80).is_highbit_set());
        for lane in 0..16 {
            let mut bytes = [0u8; 16];
            bytes[lane] = 0x80;
            assert!(load8(&bytes).is_highbit_set(), "lane {}", lane);
        }
    }

    #[test]
    fn test_highbit_reduction_is_byte_granular_for_vector32() {
        // Any byte's top bit counts, not only the top bit of each u32.
        assert!(Vector32::splat(0x0000_0080).is_highbit_set());
        assert!(Vector32::splat(0x8000_0000).is_highbit_set());
        assert!(!Vector32::splat(0x7F7F_7F7F).is_highbit_set());
    }

    #[test]
    fn test_vector32_comparison_reduction_matches_lane_test() {
        // Every combination of matching lanes: the byte-level reduction of the
        // comparison result must agree with "some u32 lane matched".
        let key = 0x1234_5678u32;
        for mask in 0u32..16 {
            let mut words = [0x8765_4321u32; 4];
            for (lane, word) in words.iter_mut().enumerate() {
                if mask & (1 << lane) != 0 {
                    *word = key;
                }
            }
            let hit = load32(&words).cmpeq(Vector32::splat(key)).is_highbit_set();
            assert_eq!(hit, mask != 0, "mask {:#06b}", mask);
        }
    }
}
