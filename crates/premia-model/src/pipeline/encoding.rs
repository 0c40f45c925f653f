//! Fitted encoders for categorical and date columns
//!
//! The regressor consumes numbers only; these encoders are the fitted state
//! that turns raw labels and dates into the values seen at training time.

use chrono::NaiveDate;
use premia_common::PredictionError;
use serde::{Deserialize, Serialize};

/// Ordinal encoder for one categorical column
///
/// `levels` holds the labels in training order; a label encodes to its
/// position. A label the training data never contained is an error, not a
/// fallback code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEncoder {
    pub column: String,
    pub levels: Vec<String>,
}

impl CategoryEncoder {
    pub fn new<I, S>(column: &str, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.to_string(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn encode(&self, value: &str) -> Result<f64, PredictionError> {
        self.levels
            .iter()
            .position(|level| level.as_str() == value)
            .map(|i| i as f64)
            .ok_or_else(|| PredictionError::UnseenCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }
}

/// Encode a date as whole days since the training origin
pub fn encode_date(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}
