//! Error types for metric computation.

use thiserror::Error;

/// Metric errors
///
/// Validation failures are raised before any computation starts; no partial
/// results are produced. Computation itself is deterministic, so nothing is
/// retried.
#[derive(Debug, Error)]
pub enum MetricError {
    /// A configuration argument is out of range or inconsistent with the task
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Prediction/target arrays violate the task's shape or value contract
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The tp/fp/tn/fn count arrays disagree in shape
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type for metric operations
pub type Result<T> = std::result::Result<T, MetricError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_actionable() {
        let err = MetricError::InvalidArgument("beta must be a positive finite value, got -1".into());
        assert!(err.to_string().contains("invalid argument"));
        assert!(err.to_string().contains("beta"));

        let err = MetricError::ShapeMismatch("true_positives has shape (1, 3)".into());
        assert!(err.to_string().contains("shape mismatch"));
    }
}
