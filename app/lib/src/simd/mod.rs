//! Vector primitives for the search drivers.
//!
//! This module hides the hardware vector instruction set behind a small,
//! fixed capability set:
//!
//! - **load**: read one vector's worth of lanes from an unaligned pointer
//! - **splat**: broadcast a scalar into every lane
//! - **cmpeq**: lane-wise equality producing all-ones or all-zeros lanes
//! - **or**: lane-wise bitwise OR, used to fold several comparison results
//! - **saturating_sub**: lane-wise `max(a - b, 0)` (8-bit lanes)
//! - **is_highbit_set**: true if the most significant bit of any *byte* is set
//!
//! Exactly one backend is compiled in, chosen by target architecture:
//!
//! - **SSE2**: 128-bit vectors on x86_64
//! - **NEON**: 128-bit vectors on aarch64
//!
//! There is no runtime detection and no scalar fallback. Building for any
//! other architecture is a compile error.
//!
//! # Example
//!
//! ```rust
//! use lfind_simd::simd::{Vector, Vector8};
//!
//! let bytes = [7u8; 16];
//! // Safety: `bytes` holds exactly `Vector8::LANES` readable lanes.
//! let chunk = unsafe { Vector8::load_unaligned(bytes.as_ptr()) };
//! assert!(chunk.cmpeq(Vector8::splat(7)).is_highbit_set());
//! assert!(!chunk.cmpeq(Vector8::splat(8)).is_highbit_set());
//! ```

use serde::Serialize;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
mod sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub use sse2::{Vector32, Vector8};

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::{Vector32, Vector8};

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
compile_error!(
    "lfind-simd: unsupported platform, no SIMD backend is available for this architecture \
     (supported: x86_64 with SSE2, aarch64 with NEON)"
);

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u32 {}
}

/// An unsigned integer type that can occupy a vector lane.
pub trait Lane: sealed::Sealed + Copy + Eq + Ord + Send + Sync + core::fmt::Debug {
    /// The all-zero lane value.
    const ZERO: Self;
    /// Lane width in bits.
    const BITS: u32;
}

impl Lane for u8 {
    const ZERO: Self = 0;
    const BITS: u32 = 8;
}

impl Lane for u32 {
    const ZERO: Self = 0;
    const BITS: u32 = 32;
}

/// The capability set every backend vector type provides.
///
/// Implementations wrap a single hardware register and mark every method
/// `#[inline(always)]` so the drivers compile down to straight-line
/// intrinsics.
pub trait Vector: Copy + core::fmt::Debug {
    /// Element type held in each lane.
    type Lane: Lane;

    /// Number of lanes in one vector.
    const LANES: usize;

    /// Vector width in bytes.
    const BYTES: usize = Self::LANES * (<Self::Lane as Lane>::BITS as usize / 8);

    /// Read `LANES` contiguous elements starting at `src`.
    ///
    /// # Safety
    ///
    /// Callers must guarantee that `LANES` elements are readable from `src`.
    /// No alignment is required.
    unsafe fn load_unaligned(src: *const Self::Lane) -> Self;

    /// Create a vector with `value` in every lane.
    fn splat(value: Self::Lane) -> Self;

    /// Lane-wise equality. Each result lane is all-ones or all-zeros.
    fn cmpeq(self, other: Self) -> Self;

    /// Lane-wise bitwise OR.
    fn or(self, other: Self) -> Self;

    /// True if the most significant bit of any byte in the vector is set.
    ///
    /// The reduction is byte-granular for every lane width. On comparison
    /// results, whose lanes are all-ones or all-zeros, this equals "some lane
    /// matched".
    fn is_highbit_set(self) -> bool;
}

/// Saturating (clamped at zero) lane-wise subtraction.
pub trait SaturatingSub: Vector {
    /// Lane-wise `max(self - other, 0)`, never wrapping.
    fn saturating_sub(self, other: Self) -> Self;
}

/// The backend compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Backend {
    /// SSE2 (128-bit vectors, x86_64).
    Sse2,
    /// NEON (128-bit vectors, aarch64).
    Neon,
}

impl Backend {
    /// The backend selected at build time.
    pub const fn current() -> Self {
        COMPILED_BACKEND
    }

    /// Short name of the instruction set.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sse2 => "SSE2",
            Backend::Neon => "NEON",
        }
    }

    /// Register width in bytes.
    pub fn vector_bytes(&self) -> usize {
        match self {
            Backend::Sse2 | Backend::Neon => 16,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(target_arch = "x86_64")]
const COMPILED_BACKEND: Backend = Backend::Sse2;

#[cfg(target_arch = "aarch64")]
const COMPILED_BACKEND: Backend = Backend::Neon;

/// Describes the compiled backend and the strides the drivers use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendInfo {
    /// Backend selected at build time.
    pub backend: Backend,
    /// Register width in bytes.
    pub vector_bytes: usize,
    /// Elements consumed per vector iteration by `lfind8` and `lfind8_le`.
    pub lfind8_stride: usize,
    /// Elements consumed per vector iteration by `lfind32`.
    pub lfind32_stride: usize,
    /// Vector-related target features enabled at compile time.
    pub target_features: Vec<&'static str>,
}

impl BackendInfo {
    /// Describe the current build.
    pub fn current() -> Self {
        let backend = Backend::current();
        Self {
            backend,
            vector_bytes: backend.vector_bytes(),
            lfind8_stride: crate::search::LFIND8_STRIDE,
            lfind32_stride: crate::search::LFIND32_STRIDE,
            target_features: compiled_target_features(),
        }
    }
}

fn compiled_target_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if cfg!(target_feature = "sse2") {
        features.push("sse2");
    }
    if cfg!(target_feature = "sse4.2") {
        features.push("sse4.2");
    }
    if cfg!(target_feature = "avx2") {
        features.push("avx2");
    }
    if cfg!(target_feature = "neon") {
        features.push("neon");
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_bytes_match_backend() {
        let backend = Backend::current();
        assert_eq!(Vector8::BYTES, backend.vector_bytes());
        assert_eq!(Vector32::BYTES, backend.vector_bytes());
        assert_eq!(Vector8::LANES, 16);
        assert_eq!(Vector32::LANES, 4);
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(format!("{}", Backend::Sse2), "SSE2");
        assert_eq!(format!("{}", Backend::Neon), "NEON");
    }

    #[test]
    fn test_backend_info_current() {
        let info = BackendInfo::current();
        assert_eq!(info.backend, Backend::current());
        assert_eq!(info.vector_bytes, 16);
        assert_eq!(info.lfind8_stride, Vector8::LANES);
        assert_eq!(info.lfind32_stride, 4 * Vector32::LANES);
        assert!(!info.target_features.is_empty());
    }

    #[test]
    fn test_backend_info_serializes() {
        let json = serde_json::to_string(&BackendInfo::current()).unwrap();
        assert!(json.contains("\"lfind8_stride\":16"));
        assert!(json.contains("\"lfind32_stride\":16"));
    }

    #[test]
    fn test_lane_constants() {
        assert_eq!(<u8 as Lane>::BITS, 8);
        assert_eq!(<u32 as Lane>::BITS, 32);
        assert_eq!(<u8 as Lane>::ZERO, 0);
        assert_eq!(<u32 as Lane>::ZERO, 0);
    }
}
