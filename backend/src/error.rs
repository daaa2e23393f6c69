//! Error types for the data-shaping layer.
//!
//! Missing or partial payload data is not an error here: every shaping
//! function degrades to an empty or default result. Only structural
//! contradictions in a payload, or invalid configuration, surface as
//! [`VizError`].

/// Result type for data-shaping operations
pub type VizResult<T> = Result<T, VizError>;

/// Error type for data-shaping operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VizError {
    /// A value array in a detection evaluation does not line up with its
    /// timestamp array.
    #[error(
        "Mismatched series length in evaluation '{evaluation}': \
         '{field}' has {actual} values but 'timestamp' has {expected}"
    )]
    MismatchedSeriesLength {
        evaluation: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A time range label that is not part of the known vocabulary.
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    /// A baseline comparison offset that could not be parsed.
    #[error("Invalid baseline offset: {0}")]
    InvalidBaselineOffset(String),

    /// Configuration file or environment error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl VizError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the error was caused by the caller's payload rather than by
    /// the service itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, VizError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_length_message() {
        let err = VizError::MismatchedSeriesLength {
            evaluation: "output_AnomalyDetectorResult_0".to_string(),
            field: "current",
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("output_AnomalyDetectorResult_0"));
        assert!(msg.contains("'current' has 2 values"));
        assert!(msg.contains("'timestamp' has 3"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(VizError::InvalidTimeRange("x".into()).is_client_error());
        assert!(VizError::InvalidBaselineOffset("P".into()).is_client_error());
        assert!(!VizError::configuration("bad port").is_client_error());
    }
}
