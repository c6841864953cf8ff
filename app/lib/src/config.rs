//! Configuration types for the verification and performance harness.
//!
//! The search drivers take no configuration at all: the backend and the
//! strides are fixed at build time. These structs only steer the harness
//! that exercises the drivers, and can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LfindError, Result};

/// Configuration for the performance harness.
///
/// Defaults reproduce the classic table: four array sizes, 1000 search keys
/// per size with every fourth key drawn at random, ten warmup calls, and a
/// fixed seed so runs are comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Array lengths to measure, in elements.
    ///
    /// Default: 10,000 / 100,000 / 1,000,000 / 10,000,000
    pub sizes: Vec<usize>,

    /// Timed calls per implementation and size.
    ///
    /// Default: 1000
    pub iterations: usize,

    /// Untimed calls per implementation before measuring.
    ///
    /// Default: 10
    pub warmup_runs: usize,

    /// Every `miss_every`-th search key is drawn at random instead of being
    /// sampled from the array.
    ///
    /// Default: 4 (75% of keys present)
    pub miss_every: usize,

    /// Search keys re-checked against the reference scan after timing.
    /// Capped at `iterations`.
    ///
    /// Default: 100
    pub verify_samples: usize,

    /// Length of the key-absent worst-case array.
    ///
    /// Default: 100,000
    pub worst_case_len: usize,

    /// Calls per implementation in the worst-case analysis.
    ///
    /// Default: 100
    pub worst_case_reps: usize,

    /// Seed for array and key generation.
    ///
    /// Default: 42
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10_000, 100_000, 1_000_000, 10_000_000],
            iterations: 1000,
            warmup_runs: 10,
            miss_every: 4,
            verify_samples: 100,
            worst_case_len: 100_000,
            worst_case_reps: 100,
            seed: 42,
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the array sizes to measure.
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Set the number of timed calls per size.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of warmup calls.
    pub fn with_warmup_runs(mut self, runs: usize) -> Self {
        self.warmup_runs = runs;
        self
    }

    /// Set how often a search key is drawn at random.
    pub fn with_miss_every(mut self, every: usize) -> Self {
        self.miss_every = every;
        self
    }

    /// Set how many search keys are re-verified after timing.
    pub fn with_verify_samples(mut self, samples: usize) -> Self {
        self.verify_samples = samples;
        self
    }

    /// Set the worst-case array length and repetition count.
    pub fn with_worst_case(mut self, len: usize, reps: usize) -> Self {
        self.worst_case_len = len;
        self.worst_case_reps = reps;
        self
    }

    /// Set the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration describes a runnable benchmark.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(invalid("sizes", "at least one array size is required"));
        }
        if self.sizes.contains(&0) {
            return Err(invalid("sizes", "array sizes must be greater than zero"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be greater than zero"));
        }
        if self.miss_every == 0 {
            return Err(invalid("miss_every", "must be greater than zero"));
        }
        if self.worst_case_len == 0 {
            return Err(invalid("worst_case_len", "must be greater than zero"));
        }
        if self.worst_case_reps == 0 {
            return Err(invalid("worst_case_reps", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Configuration for the verification harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Every length from 0 up to this bound is checked exhaustively. Raised
    /// automatically to twice the largest driver stride if smaller.
    ///
    /// Default: 64
    pub exhaustive_max_len: usize,

    /// Length of the large randomly filled arrays.
    ///
    /// Default: 1,000,000
    pub sampled_len: usize,

    /// Keys searched against each large `u8` array.
    ///
    /// Default: 256
    pub sampled_keys_u8: usize,

    /// Keys searched against each large `u32` array.
    ///
    /// Default: 100
    pub sampled_keys_u32: usize,

    /// Seed for random arrays and keys.
    ///
    /// Default: 42
    pub seed: u64,

    /// Spread key sweeps over the rayon thread pool (requires the
    /// `parallel` feature; ignored otherwise).
    ///
    /// Default: true
    pub parallel: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            exhaustive_max_len: 64,
            sampled_len: 1_000_000,
            sampled_keys_u8: 256,
            sampled_keys_u32: 100,
            seed: 42,
            parallel: true,
        }
    }
}

impl VerifyConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exhaustive length bound.
    pub fn with_exhaustive_max_len(mut self, len: usize) -> Self {
        self.exhaustive_max_len = len;
        self
    }

    /// Set the length of the large sampled arrays.
    pub fn with_sampled_len(mut self, len: usize) -> Self {
        self.sampled_len = len;
        self
    }

    /// Set how many keys are searched against the large arrays.
    pub fn with_sampled_keys(mut self, keys_u8: usize, keys_u32: usize) -> Self {
        self.sampled_keys_u8 = keys_u8;
        self.sampled_keys_u32 = keys_u32;
        self
    }

    /// Set the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel key sweeps.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Length bound actually used for the stride sweep.
    pub fn sweep_len(&self) -> usize {
        let largest_stride = crate::search::LFIND8_STRIDE.max(crate::search::LFIND32_STRIDE);
        self.exhaustive_max_len.max(2 * largest_stride)
    }

    /// Check that the configuration describes a runnable verification.
    pub fn validate(&self) -> Result<()> {
        if self.sampled_len == 0 {
            return Err(invalid("sampled_len", "must be greater than zero"));
        }
        if self.sampled_keys_u8 == 0 {
            return Err(invalid("sampled_keys_u8", "must be greater than zero"));
        }
        if self.sampled_keys_u32 == 0 {
            return Err(invalid("sampled_keys_u32", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Combined harness configuration, as read from a JSON file.
///
/// Missing sections and fields fall back to their defaults:
///
/// ```rust
/// use lfind_simd::HarnessConfig;
///
/// let config = HarnessConfig::from_json_str(r#"{"bench": {"iterations": 50}}"#).unwrap();
/// assert_eq!(config.bench.iterations, 50);
/// assert_eq!(config.bench.warmup_runs, 10);
/// assert_eq!(config.verify.exhaustive_max_len, 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Performance harness settings.
    pub bench: BenchConfig,
    /// Verification harness settings.
    pub verify: VerifyConfig,
}

impl HarnessConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: HarnessConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<()> {
        self.bench.validate()?;
        self.verify.validate()
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> LfindError {
    LfindError::InvalidConfig {
        field,
        message: message.into(),
    }
}
