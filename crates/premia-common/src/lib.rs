//! # Premia Common
//!
//! Shared types and errors for the Premia insurance premium prediction
//! service.
//!
//! ## Core Types
//!
//! - [`QuoteRequest`]: one customer's raw attributes, as collected by the form
//! - [`RowFrame`]: a single-row tabular structure with named, ordered columns
//! - [`Cell`]: one heterogeneous value inside a [`RowFrame`]
//! - [`FieldSpec`]: form-field metadata (domains, defaults, category lists)
//!
//! ## Errors
//!
//! - [`PredictionError`]: anything raised while invoking the model
//! - [`ValidationError`]: out-of-domain input rejected at the collection
//!   boundary
//! - [`PremiaError`]: unified error for service-level operations

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{PredictionError, PremiaError, Result, ValidationError};
pub use types::{
    categories::{
        EducationLevel, ExerciseFrequency, Gender, Location, MaritalStatus, Occupation,
        PolicyType, PropertyType, SmokingStatus,
    },
    frame::{columns, Cell, RowFrame},
    quote::{PredictionResult, QuoteRequest},
    schema::{form_fields, FieldSpec},
};

/// Premia version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder identifier carried in every input row to match the training
/// schema. Not meaningful to the model.
pub const PLACEHOLDER_ID: i64 = 0;

/// Earliest admissible policy start date (2000-01-01)
pub fn min_policy_start() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid constant date")
}
