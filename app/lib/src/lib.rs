//! # lfind-simd
//!
//! Vectorized linear search over unsorted arrays of small integers.
//!
//! Three drivers answer a single yes/no question about a whole array:
//!
//! - [`lfind8`]: does any `u8` element equal the key?
//! - [`lfind8_le`]: is any `u8` element less than or equal to the key?
//! - [`lfind32`]: does any `u32` element equal the key?
//!
//! Each driver compares a full 128-bit register per step, reduces the
//! lane mask to a single "any hit" test and finishes the remainder with a
//! scalar loop. Arrays need no alignment, no padding and no sorting.
//!
//! ## Features
//!
//! - **Build-time backend**: SSE2 on x86_64, NEON on aarch64, a compile
//!   error anywhere else
//! - **Raw entry points**: pointer plus `u32` count, null allowed when the
//!   count is zero
//! - **C ABI**: `lfind8`, `lfind8_le`, `lfind32` and `lfind_backend_name`
//!   behind the `ffi` feature
//! - **Harness**: verification against scalar reference scans and a
//!   SIMD-versus-linear timing table, parallelised with rayon behind the
//!   default `parallel` feature
//!
//! ## Quick Start
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
//!
//! ### Raw pointers
//!
//! ```rust
//! use lfind_simd::lfind8_raw;
//!
//! let bytes = [4u8, 8, 15, 16, 23, 42];
//! // Safety: `bytes` holds six initialized elements.
//! assert!(unsafe { lfind8_raw(42, bytes.as_ptr(), 6) });
//! // Safety: a zero count never dereferences the pointer.
//! assert!(!unsafe { lfind8_raw(42, std::ptr::null(), 0) });
//! ```
//!
//! ### Verification
//!
//! ```rust
//! use lfind_simd::{harness::verify::run_verification, VerifyConfig};
//!
//! let config = VerifyConfig::new().with_sampled_len(10_000);
//! let report = run_verification(&config).unwrap();
//! println!("{} checks, {:.1}% passed", report.total_checks(), report.success_rate());
//! assert!(report.is_success());
//! ```
//!
//! ## Thread Safety
//!
//! The drivers are pure functions over shared borrows and keep no state.
//! Any number of threads may search the same array at once. All public
//! types are `Send + Sync`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod config;
pub mod error;
pub mod harness;
pub mod predicate;
pub mod search;
pub mod simd;

// C FFI bindings (optional)
#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports for convenience
pub use config::{BenchConfig, HarnessConfig, VerifyConfig};
pub use error::{LfindError, Result};
pub use harness::Driver;
pub use search::{
    lfind32, lfind32_raw, lfind8, lfind8_le, lfind8_le_raw, lfind8_raw, LFIND32_STRIDE,
    LFIND32_UNROLL, LFIND8_STRIDE,
};
pub use simd::{Backend, BackendInfo};
