//! Error types for the proportion simulation engine
//!
//! Provides a unified error type for all propsim crates. Only construction
//! paths (samples, windows, alias tables, configuration) and random-source
//! acquisition return errors; per-draw operations are infallible.

use thiserror::Error;

/// Core error type for propsim operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// The uniform random source could not deliver a batch
    #[error("Random source error: {0}")]
    RandomSource(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in [0, 1]"))
    }

    /// Create an error for an empty sample
    pub fn empty_sample() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("trim threshold must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: trim threshold must be positive"
        );

        let err = Error::InsufficientData {
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 1 observations, got 0"
        );

        let err = Error::RandomSource("generator closed".to_string());
        assert_eq!(err.to_string(), "Random source error: generator closed");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_probability(1.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: Probability 1.5 must be in [0, 1]"
        );

        match Error::empty_sample() {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::non_finite("probability window");
        assert_eq!(
            err.to_string(),
            "Computation error: probability window contains NaN or infinite values"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("host bridge dropped");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("host bridge dropped"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
