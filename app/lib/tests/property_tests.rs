//! Property-based tests: every driver agrees with its scalar reference scan.

use lfind_simd::harness::reference::{linear_search_u32, linear_search_u8, linear_search_u8_le};
use lfind_simd::{lfind32, lfind32_raw, lfind8, lfind8_le, lfind8_raw};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn lfind8_equivalence(
        base in prop::collection::vec(any::<u8>(), 0..300),
        key in any::<u8>()
    ) {
        prop_assert_eq!(lfind8(key, &base), linear_search_u8(key, &base));
    }

    #[test]
    fn lfind8_le_equivalence(
        base in prop::collection::vec(any::<u8>(), 0..300),
        key in any::<u8>()
    ) {
        prop_assert_eq!(lfind8_le(key, &base), linear_search_u8_le(key, &base));
    }

    #[test]
    fn lfind32_equivalence(
        base in prop::collection::vec(any::<u32>(), 0..300),
        key in any::<u32>()
    ) {
        prop_assert_eq!(lfind32(key, &base), linear_search_u32(key, &base));
    }

    #[test]
    fn lfind32_finds_every_element(base in prop::collection::vec(any::<u32>(), 1..300)) {
        for &value in &base {
            prop_assert!(lfind32(value, &base));
        }
    }

    #[test]
    fn lfind8_le_monotone_in_key(
        base in prop::collection::vec(any::<u8>(), 0..200),
        key in any::<u8>()
    ) {
        // A hit at `key` stays a hit for every larger key.
        if lfind8_le(key, &base) {
            prop_assert!(lfind8_le(key.saturating_add(1), &base));
            prop_assert!(lfind8_le(u8::MAX, &base));
        }
    }

    #[test]
    fn lfind8_le_agrees_with_minimum(base in prop::collection::vec(any::<u8>(), 1..200)) {
        let min = *base.iter().min().unwrap();
        prop_assert!(lfind8_le(min, &base));
        if min > 0 {
            prop_assert!(!lfind8_le(min - 1, &base));
        }
    }

    #[test]
    fn raw_matches_slice(
        base in prop::collection::vec(any::<u8>(), 0..300),
        key in any::<u8>()
    ) {
        let raw = unsafe { lfind8_raw(key, base.as_ptr(), base.len() as u32) };
        prop_assert_eq!(raw, lfind8(key, &base));

        let words: Vec<u32> = base.iter().map(|&b| u32::from(b) * 0x0101_0101).collect();
        let key32 = u32::from(key) * 0x0101_0101;
        let raw32 = unsafe { lfind32_raw(key32, words.as_ptr(), words.len() as u32) };
        prop_assert_eq!(raw32, lfind32(key32, &words));
    }

    #[test]
    fn prefix_results_are_consistent(
        base in prop::collection::vec(any::<u8>(), 0..300),
        key in any::<u8>(),
        cut in 0usize..300,
    ) {
        // A hit in a prefix implies a hit in the whole array.
        let cut = cut.min(base.len());
        if lfind8(key, &base[..cut]) {
            prop_assert!(lfind8(key, &base));
        }
        if lfind8_le(key, &base[..cut]) {
            prop_assert!(lfind8_le(key, &base));
        }
    }
}
