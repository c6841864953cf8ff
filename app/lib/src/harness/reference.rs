//! Scalar reference scans.
//!
//! The oracle the harness and the tests compare every driver against: one
//! element at a time, no chunking.

/// Return true if any element of `base` equals `key`.
pub fn linear_search_u8(key: u8, base: &[u8]) -> bool {
    for &value in base {
        if value == key {
            return true;
        }
    }
    false
}

/// Return true if any element of `base` is less than or equal to `key`.
pub fn linear_search_u8_le(key: u8, base: &[u8]) -> bool {
    for &value in base {
        if value <= key {
            return true;
        }
    }
    false
}

/// Return true if any element of `base` equals `key`.
pub fn linear_search_u32(key: u32, base: &[u32]) -> bool {
    for &value in base {
        if value == key {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_search_u8() {
        assert!(linear_search_u8(3, &[1, 2, 3]));
        assert!(!linear_search_u8(4, &[1, 2, 3]));
        assert!(!linear_search_u8(0, &[]));
    }

    #[test]
    fn test_linear_search_u8_le() {
        assert!(linear_search_u8_le(10, &[10, 30]));
        assert!(!linear_search_u8_le(9, &[10, 30]));
        assert!(linear_search_u8_le(255, &[255]));
        assert!(!linear_search_u8_le(255, &[]));
    }

    #[test]
    fn test_linear_search_u32() {
        assert!(linear_search_u32(u32::MAX, &[0, u32::MAX]));
        assert!(!linear_search_u32(1, &[0, u32::MAX]));
        assert!(!linear_search_u32(0, &[]));
    }
}
