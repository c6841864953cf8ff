//! Verification and performance harness.
//!
//! Everything here sits outside the search core and only calls into it:
//!
//! - [`reference`]: plain scalar scans used as the oracle
//! - [`workload`]: seeded arrays and search keys
//! - [`verify`]: functional verification against the oracle
//! - [`bench`]: SIMD versus linear timing tables
//!
//! # Example
//!
//! ```rust
//! use lfind_simd::harness::verify::run_verification;
//! use lfind_simd::VerifyConfig;
//!
//! let config = VerifyConfig::new().with_sampled_len(4096);
//! let report = run_verification(&config).unwrap();
//! assert!(report.is_success());
//! ```

pub mod bench;
pub mod reference;
pub mod verify;
pub mod workload;

use serde::Serialize;

use crate::search::{lfind32, lfind8, lfind8_le, LFIND32_STRIDE, LFIND8_STRIDE};
use reference::{linear_search_u32, linear_search_u8, linear_search_u8_le};

/// One of the three search drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// [`lfind8`](crate::lfind8): `u8` equality.
    Lfind8,
    /// [`lfind8_le`](crate::lfind8_le): `u8` less-or-equal.
    Lfind8Le,
    /// [`lfind32`](crate::lfind32): `u32` equality.
    Lfind32,
}

impl Driver {
    /// All drivers, in declaration order.
    pub const ALL: [Driver; 3] = [Driver::Lfind8, Driver::Lfind8Le, Driver::Lfind32];

    /// The driver's function name.
    pub fn name(&self) -> &'static str {
        match self {
            Driver::Lfind8 => "lfind8",
            Driver::Lfind8Le => "lfind8_le",
            Driver::Lfind32 => "lfind32",
        }
    }

    /// Elements consumed per vector iteration.
    pub fn stride(&self) -> usize {
        match self {
            Driver::Lfind8 | Driver::Lfind8Le => LFIND8_STRIDE,
            Driver::Lfind32 => LFIND32_STRIDE,
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A driver paired with its reference scan.
#[derive(Clone, Copy)]
pub(crate) struct Pairing<T> {
    pub(crate) driver: Driver,
    pub(crate) simd: fn(T, &[T]) -> bool,
    pub(crate) reference: fn(T, &[T]) -> bool,
}

pub(crate) const EQ8: Pairing<u8> = Pairing {
    driver: Driver::Lfind8,
    simd: lfind8,
    reference: linear_search_u8,
};

pub(crate) const LE8: Pairing<u8> = Pairing {
    driver: Driver::Lfind8Le,
    simd: lfind8_le,
    reference: linear_search_u8_le,
};

pub(crate) const EQ32: Pairing<u32> = Pairing {
    driver: Driver::Lfind32,
    simd: lfind32,
    reference: linear_search_u32,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_names_and_strides() {
        assert_eq!(Driver::Lfind8.to_string(), "lfind8");
        assert_eq!(Driver::Lfind8Le.to_string(), "lfind8_le");
        assert_eq!(Driver::Lfind32.to_string(), "lfind32");
        for driver in Driver::ALL {
            assert_eq!(driver.stride(), 16);
        }
    }

    #[test]
    fn test_driver_serializes_as_function_name() {
        for driver in Driver::ALL {
            let json = serde_json::to_string(&driver).unwrap();
            assert_eq!(json, format!("\"{}\"", driver.name()));
        }
    }

    #[test]
    fn test_pairings_match_functions() {
        let bytes = [10u8, 30, 50];
        assert_eq!((EQ8.simd)(30, &bytes), (EQ8.reference)(30, &bytes));
        assert_eq!((LE8.simd)(9, &bytes), (LE8.reference)(9, &bytes));
        assert_eq!((EQ32.simd)(7, &[7]), (EQ32.reference)(7, &[7]));
        assert_eq!(EQ8.driver, Driver::Lfind8);
        assert_eq!(LE8.driver, Driver::Lfind8Le);
        assert_eq!(EQ32.driver, Driver::Lfind32);
    }
}
