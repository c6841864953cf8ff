//! Error types for the lfind-simd harness and configuration layers.
//!
//! The search drivers themselves cannot fail: they only answer "found" or
//! "not found". Errors arise around them, when loading harness
//! configuration, decoding input buffers, or reporting a failed
//! verification run.

use thiserror::Error;

/// Main error type for the lfind-simd library.
#[derive(Debug, Error)]
pub enum LfindError {
    /// A harness configuration value was rejected.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },

    /// An input buffer cannot be split into whole elements.
    #[error("Input of {len} bytes is not a multiple of the {width}-byte element width")]
    MisalignedInput {
        /// Length of the input in bytes
        len: usize,
        /// Element width in bytes
        width: usize,
    },

    /// A verification run found drivers disagreeing with the reference scan.
    #[error("Verification failed: {failures} of {total} checks disagreed with the reference scan")]
    VerificationFailed {
        /// Number of failed checks
        failures: usize,
        /// Number of checks performed
        total: usize,
    },

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for Results using `LfindError`.
pub type Result<T> = std::result::Result<T, LfindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let error = LfindError::InvalidConfig {
            field: "iterations",
            message: "must be greater than zero".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'iterations'"));
        assert!(display.contains("must be greater than zero"));
    }

    #[test]
    fn test_misaligned_input_display() {
        let error = LfindError::MisalignedInput { len: 10, width: 4 };
        let display = format!("{}", error);
        assert!(display.contains("10 bytes"));
        assert!(display.contains("4-byte"));
    }

    #[test]
    fn test_verification_failed_display() {
        let error = LfindError::VerificationFailed {
            failures: 3,
            total: 1200,
        };
        let display = format!("{}", error);
        assert!(display.contains("3 of 1200"));
    }

    #[test]
    fn test_json_error_from() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: LfindError = json_error.into();
        assert!(matches!(error, LfindError::JsonError(_)));
    }

    #[test]
    fn test_io_error_from() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: LfindError = io_error.into();
        assert!(matches!(error, LfindError::IoError(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LfindError>();
    }
}
