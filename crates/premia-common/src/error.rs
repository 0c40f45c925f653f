//! Error types for the Premia service
//!
//! Provides a unified error type plus the two domain-specific kinds: input
//! validation failures at the collection boundary, and anything raised while
//! invoking the model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using PremiaError
pub type Result<T> = std::result::Result<T, PremiaError>;

/// Unified error type for Premia operations
#[derive(Debug, Error)]
pub enum PremiaError {
    // Model invocation errors
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    // Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Artifact load/save errors
    #[error("Artifact error: {0}")]
    Artifact(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything raised during a predict call
///
/// Caught at the point of invocation and surfaced to the caller with the
/// underlying message; never retried, never propagated past the handler.
#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("input schema mismatch at column {position}: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("input has {actual} columns, model expects {expected}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("missing input column: {0}")]
    MissingColumn(String),

    #[error("unseen value {value:?} for categorical column {column:?}")]
    UnseenCategory { column: String, value: String },

    #[error("column {column:?} is not numeric after encoding")]
    NonNumeric { column: String },

    #[error("model produced a non-finite output: {0}")]
    NonFiniteOutput(f64),

    #[error("{0}")]
    Internal(String),
}

/// Out-of-domain input rejected by the collection boundary
///
/// Domain constraints live at the form boundary, not in the feature step or
/// the predictor (those trust their inputs).
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("policy start date must be between {min} and {max}, got {value}")]
    DateOutOfRange {
        min: NaiveDate,
        max: NaiveDate,
        value: NaiveDate,
    },
}

// Implement From for common external error types
impl From<serde_json::Error> for PremiaError {
    fn from(err: serde_json::Error) -> Self {
        PremiaError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for PremiaError {
    fn from(err: bincode::Error) -> Self {
        PremiaError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_carries_underlying_message() {
        let err = PredictionError::Internal("matrix shape mismatch".to_string());
        assert_eq!(err.to_string(), "matrix shape mismatch");
    }

    #[test]
    fn test_unseen_category_display() {
        let err = PredictionError::UnseenCategory {
            column: "Occupation".to_string(),
            value: "Retired".to_string(),
        };
        assert!(err.to_string().contains("Retired"));
        assert!(err.to_string().contains("Occupation"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::OutOfRange {
            field: "age",
            min: 18,
            max: 100,
            value: 17,
        };
        assert_eq!(err.to_string(), "age must be between 18 and 100, got 17");
    }
}
