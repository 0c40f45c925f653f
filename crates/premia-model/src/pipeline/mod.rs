//! The serialized regression pipeline
//!
//! A [`GbmPipeline`] is the deserialized form of the artifact produced by
//! the (external) training process: input schema, embedded feature step,
//! fitted categorical/date encoders, and the boosted-tree ensemble. It is
//! loaded once at startup and never mutated afterwards.

pub mod encoding;
pub mod trees;

use crate::features::FeatureEngineer;
use crate::predictor::Predictor;
use encoding::{encode_date, CategoryEncoder};
use premia_common::types::frame::{columns, Cell, RowFrame};
use premia_common::{PredictionError, PremiaError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use trees::GbmModel;

/// Artifact format version; bumped on incompatible layout changes
pub const ARTIFACT_VERSION: u32 = 1;

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// A fitted pipeline: feature step + encoders + regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmPipeline {
    /// Artifact layout version
    pub version: u32,
    /// Raw input columns, in training order
    pub input_schema: Vec<String>,
    /// Embedded feature-derivation step
    pub features: FeatureEngineer,
    /// Fitted per-column categorical encoders
    pub encoders: Vec<CategoryEncoder>,
    /// Origin for date-to-days encoding
    pub date_origin: chrono::NaiveDate,
    /// Columns fed to the regressor after derivation and encoding, in order
    pub feature_order: Vec<String>,
    /// The boosted ensemble
    pub model: GbmModel,
}

impl GbmPipeline {
    /// Load an artifact from disk
    ///
    /// `.json` files are parsed as JSON, anything else as bincode. A missing
    /// or corrupt artifact is fatal to startup; there is nothing to serve
    /// without a model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PremiaError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PremiaError::Artifact(format!("failed to read {}: {}", path.display(), e))
        })?;

        let pipeline: GbmPipeline = if is_json(path) {
            serde_json::from_slice(&bytes).map_err(|e| {
                PremiaError::Artifact(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            bincode::deserialize(&bytes).map_err(|e| {
                PremiaError::Artifact(format!("failed to decode {}: {}", path.display(), e))
            })?
        };

        if pipeline.version != ARTIFACT_VERSION {
            return Err(PremiaError::Artifact(format!(
                "unsupported artifact version {} (expected {})",
                pipeline.version, ARTIFACT_VERSION
            )));
        }

        info!(
            path = %path.display(),
            trees = pipeline.model.trees.len(),
            features = pipeline.feature_order.len(),
            "loaded pipeline artifact"
        );
        Ok(pipeline)
    }

    /// Write the artifact to disk, format chosen by extension as in
    /// [`load`](Self::load)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PremiaError> {
        let path = path.as_ref();
        let bytes = if is_json(path) {
            serde_json::to_vec_pretty(self)?
        } else {
            bincode::serialize(self)?
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Check the incoming row against the stored raw schema
    fn check_schema(&self, row: &RowFrame) -> Result<(), PredictionError> {
        if row.len() != self.input_schema.len() {
            return Err(PredictionError::ColumnCount {
                expected: self.input_schema.len(),
                actual: row.len(),
            });
        }
        for (position, (actual, expected)) in row.names().zip(&self.input_schema).enumerate() {
            if actual != expected.as_str() {
                return Err(PredictionError::SchemaMismatch {
                    position,
                    expected: expected.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Encode one derived-row cell into the numeric feature vector
    fn encode_cell(&self, name: &str, cell: &Cell) -> Result<f64, PredictionError> {
        if let Some(encoder) = self.encoders.iter().find(|e| e.column == name) {
            let value = cell
                .as_text()
                .ok_or_else(|| PredictionError::NonNumeric {
                    column: name.to_string(),
                })?;
            return encoder.encode(value);
        }
        match cell {
            Cell::Date(d) => Ok(encode_date(self.date_origin, *d)),
            other => other.as_f64().ok_or_else(|| PredictionError::NonNumeric {
                column: name.to_string(),
            }),
        }
    }
}

impl Predictor for GbmPipeline {
    fn predict_one(&self, row: &RowFrame) -> Result<f64, PredictionError> {
        self.check_schema(row)?;

        // The feature step runs inside the pipeline, exactly as it did at
        // training time; callers hand over raw columns only.
        let derived = self.features.transform(row);

        let mut features = Vec::with_capacity(self.feature_order.len());
        for name in &self.feature_order {
            let cell = derived
                .get(name)
                .ok_or_else(|| PredictionError::MissingColumn(name.clone()))?;
            features.push(self.encode_cell(name, cell)?);
        }

        let premium = self.model.score(&features)?;
        if !premium.is_finite() {
            return Err(PredictionError::NonFiniteOutput(premium));
        }

        debug!(premium, "pipeline scored one row");
        Ok(premium)
    }
}

/// A small fixed pipeline for local runs and tests
///
/// Constants only; nothing here is trained. The splits lean on the intuitive
/// drivers (smoking, claims history, the engineered ratio/interaction) so
/// demo outputs move plausibly with the inputs.
pub fn demo_pipeline() -> GbmPipeline {
    use trees::{Node, Tree};

    let input_schema: Vec<String> = columns::RAW.iter().map(|s| s.to_string()).collect();

    let encoders: Vec<CategoryEncoder> = vec![
        CategoryEncoder::new(columns::GENDER, ["Male", "Female"]),
        CategoryEncoder::new(columns::MARITAL_STATUS, ["Single", "Married", "Divorced"]),
        CategoryEncoder::new(
            columns::EDUCATION_LEVEL,
            ["High School", "Bachelor's", "Master's", "PhD"],
        ),
        CategoryEncoder::new(
            columns::OCCUPATION,
            ["Employed", "Self-Employed", "Unemployed"],
        ),
        CategoryEncoder::new(columns::LOCATION, ["Urban", "Suburban", "Rural"]),
        CategoryEncoder::new(
            columns::POLICY_TYPE,
            ["Basic", "Comprehensive", "Premium"],
        ),
        CategoryEncoder::new(columns::SMOKING_STATUS, ["Yes", "No"]),
        CategoryEncoder::new(
            columns::EXERCISE_FREQUENCY,
            ["Daily", "Weekly", "Monthly", "Rarely"],
        ),
        CategoryEncoder::new(columns::PROPERTY_TYPE, ["House", "Apartment", "Condo"]),
    ];

    let mut feature_order: Vec<String> = input_schema.clone();
    feature_order.push(columns::INCOME_PER_DEPENDENT.to_string());
    feature_order.push(columns::AGE_HEALTH_INTERACTION.to_string());

    let idx = |name: &str| {
        feature_order
            .iter()
            .position(|n| n.as_str() == name)
            .expect("demo feature present in order")
    };

    // Tree 1: smokers pay more, heavy claimants more still.
    let smoking = idx(columns::SMOKING_STATUS);
    let claims = idx(columns::PREVIOUS_CLAIMS);
    let tree1 = Tree {
        nodes: vec![
            Node::Split {
                feature: smoking,
                threshold: 0.5, // "Yes" encodes to 0
                left: 1,
                right: 2,
            },
            Node::Split {
                feature: claims,
                threshold: 2.5,
                left: 3,
                right: 4,
            },
            Node::Leaf { value: -120.0 },
            Node::Leaf { value: 260.0 },
            Node::Leaf { value: 520.0 },
        ],
    };

    // Tree 2: the age*health interaction dominates mid-range risk.
    let interaction = idx(columns::AGE_HEALTH_INTERACTION);
    let tree2 = Tree {
        nodes: vec![
            Node::Split {
                feature: interaction,
                threshold: 1500.0,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: -80.0 },
            Node::Split {
                feature: interaction,
                threshold: 3000.0,
                left: 3,
                right: 4,
            },
            Node::Leaf { value: 90.0 },
            Node::Leaf { value: 240.0 },
        ],
    };

    // Tree 3: disposable income per dependent discounts the premium.
    let ratio = idx(columns::INCOME_PER_DEPENDENT);
    let tree3 = Tree {
        nodes: vec![
            Node::Split {
                feature: ratio,
                threshold: 25_000.0,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: 110.0 },
            Node::Leaf { value: -60.0 },
        ],
    };

    GbmPipeline {
        version: ARTIFACT_VERSION,
        input_schema,
        features: FeatureEngineer::default(),
        encoders,
        date_origin: premia_common::min_policy_start(),
        feature_order,
        model: GbmModel {
            base_score: 1100.0,
            learning_rate: 1.0,
            trees: vec![tree1, tree2, tree3],
        },
    }
}
