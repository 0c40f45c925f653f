//! Feature derivation - the pipeline's embedded engineering step
//!
//! Two engineered columns, both cheap ratios/interactions over raw inputs:
//!
//! ```text
//! Income_per_Dependent   = Annual Income / (Number of Dependents + 1)
//! Age_Health_Interaction = Age * Health Score
//! ```
//!
//! The step is presence-conditional: each derived column is emitted only if
//! both of its source columns exist in the input. Division is always safe
//! because the denominator is `dependents + 1 >= 1`.
//!
//! This runs inside [`GbmPipeline::predict_one`](crate::GbmPipeline); the
//! gateway never calls it directly.

use premia_common::types::frame::{columns, Cell, RowFrame};
use serde::{Deserialize, Serialize};

/// The pipeline's feature-engineering step
///
/// Serialized as part of the artifact so the step configuration travels with
/// the model that was trained on its output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureEngineer {
    /// Emit `Income_per_Dependent`
    pub income_per_dependent: bool,
    /// Emit `Age_Health_Interaction`
    pub age_health_interaction: bool,
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self {
            income_per_dependent: true,
            age_health_interaction: true,
        }
    }
}

impl FeatureEngineer {
    /// Apply the step: copy all input columns unchanged, append the derived
    /// columns whose sources are present.
    ///
    /// Pure and idempotent: re-applying to an already-augmented row replaces
    /// the derived cells with the same recomputed values.
    pub fn transform(&self, row: &RowFrame) -> RowFrame {
        let mut out = row.clone();

        if self.income_per_dependent {
            let income = row.get(columns::ANNUAL_INCOME).and_then(Cell::as_f64);
            let dependents = row.get(columns::DEPENDENTS).and_then(Cell::as_f64);
            if let (Some(income), Some(dependents)) = (income, dependents) {
                out.set(
                    columns::INCOME_PER_DEPENDENT,
                    Cell::Float(income / (dependents + 1.0)),
                );
            }
        }

        if self.age_health_interaction {
            match (row.get(columns::AGE), row.get(columns::HEALTH_SCORE)) {
                // Integer inputs keep an integer-valued product
                (Some(Cell::Int(age)), Some(Cell::Int(health))) => {
                    out.set(columns::AGE_HEALTH_INTERACTION, Cell::Int(age * health));
                }
                (Some(age), Some(health)) => {
                    if let (Some(age), Some(health)) = (age.as_f64(), health.as_f64()) {
                        out.set(columns::AGE_HEALTH_INTERACTION, Cell::Float(age * health));
                    }
                }
                _ => {}
            }
        }

        out
    }
}
