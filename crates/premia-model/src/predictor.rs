//! The injected predictor seam
//!
//! The gateway holds the loaded pipeline as `Arc<dyn Predictor>`; handler
//! tests swap in a stub without touching an artifact file.

use premia_common::{PredictionError, RowFrame};

/// A single-row premium predictor
///
/// Implementations are read-only after construction and safe to share across
/// concurrent requests.
pub trait Predictor: Send + Sync {
    /// Predict the premium for one assembled input row.
    ///
    /// The row's column set and order must match the schema the predictor
    /// was built with. Any failure (schema mismatch, unseen categorical
    /// value, corrupt internals) surfaces as a [`PredictionError`] carrying
    /// the underlying message; callers do not retry.
    fn predict_one(&self, row: &RowFrame) -> Result<f64, PredictionError>;
}
