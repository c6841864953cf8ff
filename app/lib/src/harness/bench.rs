//! SIMD versus linear timing.
//!
//! Wall-clock measurements with [`Instant`]; every result goes through
//! [`black_box`] so neither loop can be optimised away. For statistically
//! careful numbers use the criterion benches instead.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::distributions::{Distribution, Standard};
use serde::Serialize;

use super::workload::{
    modulo_pattern_u8, random_u32_array, random_u8_array, search_keys, seeded_rng,
};
use super::{Driver, Pairing, EQ32, EQ8};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::simd::BackendInfo;

/// Label for an array size in the timing table.
pub fn size_label(size: usize) -> &'static str {
    match size {
        0..=10_000 => "small",
        10_001..=100_000 => "medium",
        100_001..=1_000_000 => "large",
        _ => "xlarge",
    }
}

/// One row of the timing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfResult {
    /// Driver and size label, e.g. `lfind8_small`.
    pub name: String,
    /// Driver under test.
    pub driver: Driver,
    /// Elements in the searched array.
    pub array_size: usize,
    /// Total time of all SIMD calls, in milliseconds.
    pub simd_ms: f64,
    /// Total time of all linear calls, in milliseconds.
    pub linear_ms: f64,
    /// `linear_ms / simd_ms`.
    pub speedup: f64,
    /// SIMD and linear agreed on the sampled keys.
    pub correctness_verified: bool,
}

/// Aggregate over a set of [`PerfResult`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSummary {
    /// Rows measured.
    pub total: usize,
    /// Rows whose correctness check passed.
    pub passed: usize,
    /// Rows whose correctness check failed.
    pub failed: usize,
    /// Mean speedup over verified rows; 0 when none passed.
    pub average_speedup: f64,
}

impl BenchSummary {
    /// Summarise a table.
    pub fn from_results(results: &[PerfResult]) -> Self {
        let verified: Vec<f64> = results
            .iter()
            .filter(|r| r.correctness_verified)
            .map(|r| r.speedup)
            .collect();
        let average_speedup = if verified.is_empty() {
            0.0
        } else {
            verified.iter().sum::<f64>() / verified.len() as f64
        };
        Self {
            total: results.len(),
            passed: verified.len(),
            failed: results.len() - verified.len(),
            average_speedup,
        }
    }
}

/// Full output of [`run_benchmarks`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    /// Backend the numbers were taken on.
    pub backend: BackendInfo,
    /// Timed calls per row and implementation.
    pub iterations: usize,
    /// One row per driver and size.
    pub results: Vec<PerfResult>,
    /// Aggregate over `results`.
    pub summary: BenchSummary,
}

impl BenchReport {
    /// True if every row passed its correctness check.
    pub fn all_verified(&self) -> bool {
        self.summary.failed == 0
    }
}

/// Output of [`run_worst_case`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstCaseReport {
    /// Elements in the searched array.
    pub array_size: usize,
    /// The absent key.
    pub key: u8,
    /// Calls per implementation.
    pub reps: usize,
    /// Total SIMD time in milliseconds.
    pub simd_ms: f64,
    /// Total linear time in milliseconds.
    pub linear_ms: f64,
    /// `linear_ms / simd_ms`.
    pub speedup: f64,
    /// Both implementations reported the key absent.
    pub agreed: bool,
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn ratio(linear_ms: f64, simd_ms: f64) -> f64 {
    if simd_ms > 0.0 {
        linear_ms / simd_ms
    } else {
        0.0
    }
}

fn time_calls<T: Copy>(search: fn(T, &[T]) -> bool, base: &[T], keys: &[T]) -> f64 {
    let start = Instant::now();
    for &key in keys {
        black_box(search(black_box(key), black_box(base)));
    }
    millis(start.elapsed())
}

fn measure<T>(pair: Pairing<T>, base: &[T], config: &BenchConfig, seed: u64) -> PerfResult
where
    T: Copy,
    Standard: Distribution<T>,
{
    let mut rng = seeded_rng(seed);
    let keys = search_keys(base, config.iterations, config.miss_every, &mut rng);

    for &key in keys.iter().cycle().take(config.warmup_runs) {
        black_box((pair.simd)(key, base));
        black_box((pair.reference)(key, base));
    }

    let simd_ms = time_calls(pair.simd, base, &keys);
    let linear_ms = time_calls(pair.reference, base, &keys);

    let correctness_verified = keys
        .iter()
        .take(config.verify_samples)
        .all(|&key| (pair.simd)(key, base) == (pair.reference)(key, base));

    PerfResult {
        name: format!("{}_{}", pair.driver, size_label(base.len())),
        driver: pair.driver,
        array_size: base.len(),
        simd_ms,
        linear_ms,
        speedup: ratio(linear_ms, simd_ms),
        correctness_verified,
    }
}

/// Time `lfind8` and `lfind32` against the linear scans for every size.
pub fn run_benchmarks(config: &BenchConfig) -> Result<BenchReport> {
    config.validate()?;
    let mut rng = seeded_rng(config.seed);
    let mut results = Vec::with_capacity(config.sizes.len() * 2);

    for &size in &config.sizes {
        let bytes = random_u8_array(size, &mut rng);
        results.push(measure(EQ8, &bytes, config, config.seed ^ size as u64));
        drop(bytes);

        let words = random_u32_array(size, &mut rng);
        results.push(measure(EQ32, &words, config, config.seed ^ size as u64));
    }

    let summary = BenchSummary::from_results(&results);
    Ok(BenchReport {
        backend: BackendInfo::current(),
        iterations: config.iterations,
        results,
        summary,
    })
}

/// Scan an array that never contains the key, so both sides read every byte.
pub fn run_worst_case(config: &BenchConfig) -> Result<WorstCaseReport> {
    config.validate()?;
    const KEY: u8 = 255;
    let base = modulo_pattern_u8(config.worst_case_len, 255);
    let keys = vec![KEY; config.worst_case_reps];

    let simd_ms = time_calls(EQ8.simd, &base, &keys);
    let linear_ms = time_calls(EQ8.reference, &base, &keys);
    let agreed = !(EQ8.simd)(KEY, &base) && !(EQ8.reference)(KEY, &base);

    Ok(WorstCaseReport {
        array_size: base.len(),
        key: KEY,
        reps: config.worst_case_reps,
        simd_ms,
        linear_ms,
        speedup: ratio(linear_ms, simd_ms),
        agreed,
    })
}
