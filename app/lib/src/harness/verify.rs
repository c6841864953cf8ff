//! Functional verification of the search drivers.
//!
//! Every check runs a driver and its scalar reference scan on the same array
//! and key and records a [`Failure`] when they disagree. The run is split
//! into sections:
//!
//! - `scenarios`: fixed inputs with known answers
//! - `stride-sweep`: every length up to [`VerifyConfig::sweep_len`], which
//!   covers every tail remainder of every driver at least twice
//! - `large-sampled`: million-element arrays searched with sampled keys
//! - `no-mutation`: answers checked and inputs compared bit for bit after
//!   each call, partly through the pointer entry points

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use super::workload::{
    even_pattern_u32, modulo_pattern_u8, random_u32_array, random_u8_array, search_keys,
    seeded_rng,
};
use super::{Driver, Pairing, EQ32, EQ8, LE8};
use crate::config::VerifyConfig;
use crate::error::{LfindError, Result};
use crate::search::{lfind32, lfind32_raw, lfind8, lfind8_le, lfind8_le_raw, lfind8_raw};

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The driver's answer differs from the expected one.
    Mismatch {
        /// Driver under test
        driver: Driver,
        /// Array length
        len: usize,
        /// Search key, widened to `u32`
        key: u32,
        /// Answer of the reference scan (or the known answer)
        expected: bool,
        /// Answer of the driver
        actual: bool,
    },
    /// The input array changed during a call.
    Mutated {
        /// Driver under test
        driver: Driver,
        /// Array length
        len: usize,
    },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Mismatch {
                driver,
                len,
                key,
                expected,
                actual,
            } => write!(
                f,
                "{}: key {} in {} elements, expected {}, got {}",
                driver, key, len, expected, actual
            ),
            Failure::Mutated { driver, len } => {
                write!(f, "{}: input of {} elements was modified", driver, len)
            }
        }
    }
}

/// Outcome of one verification section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    /// Section name.
    pub name: &'static str,
    /// Number of checks performed.
    pub checks: usize,
    /// Checks that failed.
    pub failures: Vec<Failure>,
}

impl SectionReport {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            checks: 0,
            failures: Vec::new(),
        }
    }

    /// Checks that passed.
    pub fn passed(&self) -> usize {
        self.checks - self.failures.len()
    }

    fn expect(&mut self, driver: Driver, len: usize, key: u32, expected: bool, actual: bool) {
        self.checks += 1;
        if expected != actual {
            self.failures.push(Failure::Mismatch {
                driver,
                len,
                key,
                expected,
                actual,
            });
        }
    }

    fn unchanged(&mut self, driver: Driver, len: usize, unchanged: bool) {
        self.checks += 1;
        if !unchanged {
            self.failures.push(Failure::Mutated { driver, len });
        }
    }

    /// Compare `pair` with its reference for every key, possibly in parallel.
    fn sweep<T>(&mut self, pair: Pairing<T>, base: &[T], keys: &[T], parallel: bool)
    where
        T: Copy + Into<u32> + Send + Sync,
    {
        let check = |key: T| {
            let expected = (pair.reference)(key, base);
            let actual = (pair.simd)(key, base);
            (expected != actual).then(|| Failure::Mismatch {
                driver: pair.driver,
                len: base.len(),
                key: key.into(),
                expected,
                actual,
            })
        };
        self.checks += keys.len();
        self.failures.extend(filter_keys(keys, parallel, check));
    }
}

#[cfg(feature = "parallel")]
fn filter_keys<T, F>(keys: &[T], parallel: bool, check: F) -> Vec<Failure>
where
    T: Copy + Send + Sync,
    F: Fn(T) -> Option<Failure> + Send + Sync,
{
    if parallel {
        keys.par_iter().filter_map(|&key| check(key)).collect()
    } else {
        keys.iter().filter_map(|&key| check(key)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn filter_keys<T, F>(keys: &[T], _parallel: bool, check: F) -> Vec<Failure>
where
    T: Copy + Send + Sync,
    F: Fn(T) -> Option<Failure> + Send + Sync,
{
    keys.iter().filter_map(|&key| check(key)).collect()
}

/// Outcome of a whole verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Per-section outcomes, in execution order.
    pub sections: Vec<SectionReport>,
}

impl VerifyReport {
    /// Total number of checks.
    pub fn total_checks(&self) -> usize {
        self.sections.iter().map(|s| s.checks).sum()
    }

    /// Number of failed checks.
    pub fn failed_checks(&self) -> usize {
        self.sections.iter().map(|s| s.failures.len()).sum()
    }

    /// Number of passed checks.
    pub fn passed_checks(&self) -> usize {
        self.total_checks() - self.failed_checks()
    }

    /// True if no check failed.
    pub fn is_success(&self) -> bool {
        self.failed_checks() == 0
    }

    /// Percentage of passed checks (100 for an empty run).
    pub fn success_rate(&self) -> f64 {
        let total = self.total_checks();
        if total == 0 {
            100.0
        } else {
            self.passed_checks() as f64 / total as f64 * 100.0
        }
    }

    /// All failures across sections.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.sections.iter().flat_map(|s| s.failures.iter())
    }

    /// Turn a failed run into [`LfindError::VerificationFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(LfindError::VerificationFailed {
                failures: self.failed_checks(),
                total: self.total_checks(),
            })
        }
    }
}

/// Run every verification section.
pub fn run_verification(config: &VerifyConfig) -> Result<VerifyReport> {
    config.validate()?;
    Ok(VerifyReport {
        sections: vec![
            scenarios(),
            stride_sweep(config),
            large_sampled(config),
            no_mutation(config),
        ],
    })
}

/// Fixed inputs with known answers.
pub fn scenarios() -> SectionReport {
    let mut section = SectionReport::new("scenarios");
    let d8 = Driver::Lfind8;
    let le = Driver::Lfind8Le;
    let d32 = Driver::Lfind32;

    let odd = [1u8, 3, 5, 7, 9, 11, 13, 15];
    let odd_cases = [(5, true), (1, true), (15, true), (2, false), (16, false), (0, false)];
    for (key, expected) in odd_cases {
        section.expect(d8, odd.len(), key as u32, expected, lfind8(key, &odd));
    }

    // Zero length, including through the pointer entry points with null.
    section.expect(d8, 0, 5, false, lfind8(5, &[]));
    section.expect(le, 0, 255, false, lfind8_le(255, &[]));
    section.expect(d32, 0, 5, false, lfind32(5, &[]));
    // Safety: a zero count never dereferences the pointer.
    unsafe {
        section.expect(d8, 0, 5, false, lfind8_raw(5, std::ptr::null(), 0));
        section.expect(le, 0, 255, false, lfind8_le_raw(255, std::ptr::null(), 0));
        section.expect(d32, 0, 5, false, lfind32_raw(5, std::ptr::null(), 0));
    }

    let single = [42u8];
    section.expect(d8, 1, 42, true, lfind8(42, &single));
    section.expect(d8, 1, 41, false, lfind8(41, &single));

    let duplicates = [1u8, 2, 3, 2, 4, 2, 5];
    section.expect(d8, duplicates.len(), 2, true, lfind8(2, &duplicates));

    let tens = [10u8, 30, 50, 70, 90, 110, 130, 150];
    let tens_cases = [(50, true), (25, true), (200, true), (10, true), (9, false), (5, false)];
    for (key, expected) in tens_cases {
        section.expect(le, tens.len(), key as u32, expected, lfind8_le(key, &tens));
    }

    let tens32 = [10u32, 30, 50, 70, 90, 110, 130, 150];
    let tens32_cases = [(50, true), (10, true), (150, true), (25, false), (200, false), (5, false)];
    for (key, expected) in tens32_cases {
        section.expect(d32, tens32.len(), key, expected, lfind32(key, &tens32));
    }

    let single32 = [0xDEADBEEFu32];
    section.expect(d32, 1, 0xDEADBEEF, true, lfind32(0xDEADBEEF, &single32));
    section.expect(d32, 1, 0xCAFEBABE, false, lfind32(0xCAFEBABE, &single32));

    let extremes = [0u32, u32::MAX, 1, u32::MAX - 1];
    let extreme_cases = [
        (0, true),
        (u32::MAX, true),
        (1, true),
        (u32::MAX - 1, true),
        (2, false),
    ];
    for (key, expected) in extreme_cases {
        section.expect(d32, extremes.len(), key, expected, lfind32(key, &extremes));
    }

    let ramp = modulo_pattern_u8(10_000, 256);
    section.expect(d8, ramp.len(), 100, true, lfind8(100, &ramp));
    section.expect(d8, ramp.len(), 255, true, lfind8(255, &ramp));

    let evens = even_pattern_u32(10_000);
    section.expect(d32, evens.len(), 1000, true, lfind32(1000, &evens));
    section.expect(d32, evens.len(), 1001, false, lfind32(1001, &evens));

    section
}

/// Every array length from 0 to [`VerifyConfig::sweep_len`].
pub fn stride_sweep(config: &VerifyConfig) -> SectionReport {
    let mut section = SectionReport::new("stride-sweep");
    let mut rng = seeded_rng(config.seed);
    let all_bytes: Vec<u8> = (0..=u8::MAX).collect();

    for len in 0..=config.sweep_len() {
        let byte_arrays = [
            modulo_pattern_u8(len, 256),
            (0..len).map(|i| u8::MAX - (i % 32) as u8).collect(),
            random_u8_array(len, &mut rng),
        ];
        for array in &byte_arrays {
            section.sweep(EQ8, array, &all_bytes, config.parallel);
            section.sweep(LE8, array, &all_bytes, config.parallel);
        }

        let word_arrays = [
            even_pattern_u32(len),
            (0..len as u32).map(|i| u32::MAX - i).collect(),
            random_u32_array(len, &mut rng),
        ];
        for array in &word_arrays {
            let mut keys: Vec<u32> = array
                .iter()
                .flat_map(|&v| [v, v.wrapping_add(1), v.wrapping_sub(1)])
                .collect();
            keys.extend([0, 1, u32::MAX, 0x8000_0000, 0x0000_0080]);
            section.sweep(EQ32, array, &keys, config.parallel);
        }
    }

    section
}

/// Large arrays searched with sampled keys.
pub fn large_sampled(config: &VerifyConfig) -> SectionReport {
    let mut section = SectionReport::new("large-sampled");
    let mut rng = seeded_rng(config.seed.wrapping_add(1));

    let byte_keys: Vec<u8> = if config.sampled_keys_u8 >= 256 {
        (0..=u8::MAX).collect()
    } else {
        random_u8_array(config.sampled_keys_u8, &mut rng)
    };
    let byte_arrays = [
        random_u8_array(config.sampled_len, &mut rng),
        modulo_pattern_u8(config.sampled_len, 255),
        modulo_pattern_u8(10_000, 256),
    ];
    for array in &byte_arrays {
        section.sweep(EQ8, array, &byte_keys, config.parallel);
        section.sweep(LE8, array, &byte_keys, config.parallel);
    }

    let random_words = random_u32_array(config.sampled_len, &mut rng);
    let keys = search_keys(&random_words, config.sampled_keys_u32, 4, &mut rng);
    section.sweep(EQ32, &random_words, &keys, config.parallel);

    let evens = even_pattern_u32(10_000);
    let keys: Vec<u32> = (0..1000).step_by(10).chain((1..1000).step_by(10)).collect();
    section.sweep(EQ32, &evens, &keys, config.parallel);

    section
}

/// Answers match the reference scan and inputs stay bit-identical after every call.
pub fn no_mutation(config: &VerifyConfig) -> SectionReport {
    let mut section = SectionReport::new("no-mutation");
    let mut rng = seeded_rng(config.seed.wrapping_add(2));

    for len in [0usize, 1, 15, 16, 17, 63, 64, 65, 1000] {
        let bytes = random_u8_array(len, &mut rng);
        let snapshot = bytes.clone();
        for key in [0u8, 1, 127, 128, 255] {
            let expected = (EQ8.reference)(key, &snapshot);
            // Safety: pointer and count come from a live slice.
            let actual = unsafe { lfind8_raw(key, bytes.as_ptr(), len as u32) };
            section.expect(Driver::Lfind8, len, key.into(), expected, actual);
            section.unchanged(Driver::Lfind8, len, bytes == snapshot);

            let expected = (LE8.reference)(key, &snapshot);
            let actual = lfind8_le(key, &bytes);
            section.expect(Driver::Lfind8Le, len, key.into(), expected, actual);
            section.unchanged(Driver::Lfind8Le, len, bytes == snapshot);
        }

        let words = random_u32_array(len, &mut rng);
        let snapshot = words.clone();
        let present = words.first().copied().unwrap_or(0);
        for key in [0u32, 1, u32::MAX, present] {
            let expected = (EQ32.reference)(key, &snapshot);
            // Safety: as above.
            let actual = unsafe { lfind32_raw(key, words.as_ptr(), len as u32) };
            section.expect(Driver::Lfind32, len, key, expected, actual);
            section.unchanged(Driver::Lfind32, len, words == snapshot);
        }
    }

    section
}
