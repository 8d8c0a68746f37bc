//! Error types for sirsim.
//!
//! Every fallible operation returns `Result<T, SirsError>`; nothing in the
//! library panics on bad input.

use thiserror::Error;

/// Result type alias for sirsim operations.
pub type SirsResult<T> = Result<T, SirsError>;

/// Unified error type for all sirsim operations.
///
/// Variants follow the failure taxonomy of the engine:
/// 1. Construction errors (bad dimensions or probabilities)
/// 2. Index errors (sample series access)
/// 3. Precondition failures (too few samples to estimate anything)
/// 4. Configuration and I/O errors from the driver layer
#[derive(Debug, Error)]
pub enum SirsError {
    // ===== Construction Errors =====
    /// Lattice dimensions must both be positive.
    #[error("Invalid lattice dimensions {rows}x{cols}: both must be positive")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Transition probability outside `[0, 1]` or not finite.
    #[error("Probability {name} = {value} is outside [0, 1]")]
    InvalidProbability {
        /// Name of the transition (`prob_si`, `prob_ir`, `prob_rs`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    // ===== Index Errors =====
    /// Sample index out of range.
    #[error("Index {index} out of range for series of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Series length.
        len: usize,
    },

    // ===== Precondition Failures =====
    /// Not enough samples for the requested statistic or estimator.
    #[error("{operation} requires at least {required} samples, found {found}")]
    InsufficientSamples {
        /// Operation that was refused.
        operation: &'static str,
        /// Minimum sample count.
        required: usize,
        /// Actual sample count.
        found: usize,
    },

    /// Invalid estimator argument (e.g. zero bootstrap iterations).
    #[error("Invalid estimator argument: {0}")]
    Estimator(String),

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SirsError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an estimator argument error.
    #[must_use]
    pub fn estimator(message: impl Into<String>) -> Self {
        Self::Estimator(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error is a caller precondition violation.
    #[must_use]
    pub const fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. }
                | Self::InvalidProbability { .. }
                | Self::IndexOutOfRange { .. }
                | Self::InsufficientSamples { .. }
                | Self::Estimator(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        let dims = SirsError::InvalidDimensions { rows: 0, cols: 3 };
        assert!(dims.is_precondition_failure());

        let prob = SirsError::InvalidProbability {
            name: "prob_si",
            value: 1.5,
        };
        assert!(prob.is_precondition_failure());

        let index = SirsError::IndexOutOfRange { index: 4, len: 2 };
        assert!(index.is_precondition_failure());

        let samples = SirsError::InsufficientSamples {
            operation: "jackknife",
            required: 2,
            found: 1,
        };
        assert!(samples.is_precondition_failure());

        let config = SirsError::config("bad");
        assert!(!config.is_precondition_failure());
    }

    #[test]
    fn test_error_display_dimensions() {
        let err = SirsError::InvalidDimensions { rows: 0, cols: 5 };
        let msg = err.to_string();
        assert!(msg.contains("0x5"));
        assert!(msg.contains("positive"));
    }

    #[test]
    fn test_error_display_probability() {
        let err = SirsError::InvalidProbability {
            name: "prob_ir",
            value: -0.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("prob_ir"));
        assert!(msg.contains("-0.25"));
    }

    #[test]
    fn test_error_display_insufficient_samples() {
        let err = SirsError::InsufficientSamples {
            operation: "jackknife",
            required: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "jackknife requires at least 2 samples, found 1"
        );
    }

    #[test]
    fn test_error_config() {
        let err = SirsError::config("measurement interval must be positive");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("measurement interval"));
    }

    #[test]
    fn test_error_estimator() {
        let err = SirsError::estimator("zero iterations");
        assert!(err.is_precondition_failure());
        assert!(err.to_string().contains("zero iterations"));
    }

    #[test]
    fn test_error_io() {
        let err = SirsError::io("disk full");
        assert!(!err.is_precondition_failure());
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err: SirsError = yaml_err.into();
        assert!(matches!(err, SirsError::YamlParse(_)));
    }
}
