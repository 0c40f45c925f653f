//! # Premia Model
//!
//! Feature derivation and the serialized regression pipeline behind the
//! premium predictor.
//!
//! ## Pipeline
//!
//! ```text
//! RowFrame (raw, training-schema order)
//!   -> FeatureEngineer      (adds Income_per_Dependent, Age_Health_Interaction)
//!   -> categorical/date encoding
//!   -> gradient-boosted tree ensemble
//!   -> premium (f64)
//! ```
//!
//! The whole pipeline is one serialized artifact ([`GbmPipeline`]), loaded
//! once at startup and held immutable for the life of the process. Callers
//! see only the [`Predictor`] trait, so tests substitute a stub.

pub mod features;
pub mod pipeline;
pub mod predictor;

pub use features::FeatureEngineer;
pub use pipeline::{demo_pipeline, GbmPipeline};
pub use predictor::Predictor;
