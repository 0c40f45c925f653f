//! Core data types for the Premia prediction service

pub mod categories;
pub mod frame;
pub mod quote;
pub mod schema;
