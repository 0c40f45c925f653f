//! RowFrame - a single-row tabular structure
//!
//! The pipeline was trained on a tabular dataset with named columns in a
//! fixed order. A [`RowFrame`] is the one-row equivalent handed to the
//! predictor: column names and order must exactly match the training schema,
//! including the placeholder `id` column and the raw categorical and date
//! columns (the pipeline itself performs encoding).

use chrono::NaiveDate;
use std::fmt;

/// One value inside a [`RowFrame`]
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Numeric view of this cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Text(_) | Cell::Date(_) => None,
        }
    }

    /// Text view of this cell, if it has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Date(d) => write!(f, "{}", d),
        }
    }
}

/// A single row of named, ordered columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFrame {
    columns: Vec<(String, Cell)>,
}

impl RowFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column. An existing column keeps its position and gets its cell
    /// replaced; a new column is appended.
    pub fn set(&mut self, name: impl Into<String>, cell: Cell) {
        let name = name.into();
        match self.columns.iter().position(|(n, _)| *n == name) {
            Some(index) => self.columns[index].1 = cell,
            None => self.columns.push((name, cell)),
        }
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, name: impl Into<String>, cell: Cell) -> Self {
        self.set(name, cell);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n.as_str() == name)
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Training-schema column names
///
/// These are the exact headers of the training dataset; the artifact's
/// stored schema is expressed in the same strings.
pub mod columns {
    pub const ID: &str = "id";
    pub const AGE: &str = "Age";
    pub const ANNUAL_INCOME: &str = "Annual Income";
    pub const DEPENDENTS: &str = "Number of Dependents";
    pub const HEALTH_SCORE: &str = "Health Score";
    pub const PREVIOUS_CLAIMS: &str = "Previous Claims";
    pub const VEHICLE_AGE: &str = "Vehicle Age";
    pub const CREDIT_SCORE: &str = "Credit Score";
    pub const INSURANCE_DURATION: &str = "Insurance Duration";
    pub const POLICY_START_DATE: &str = "Policy Start Date";
    pub const GENDER: &str = "Gender";
    pub const MARITAL_STATUS: &str = "Marital Status";
    pub const EDUCATION_LEVEL: &str = "Education Level";
    pub const OCCUPATION: &str = "Occupation";
    pub const LOCATION: &str = "Location";
    pub const POLICY_TYPE: &str = "Policy Type";
    pub const SMOKING_STATUS: &str = "Smoking Status";
    pub const EXERCISE_FREQUENCY: &str = "Exercise Frequency";
    pub const PROPERTY_TYPE: &str = "Property Type";

    // Engineered columns added by the pipeline's feature step
    pub const INCOME_PER_DEPENDENT: &str = "Income_per_Dependent";
    pub const AGE_HEALTH_INTERACTION: &str = "Age_Health_Interaction";

    /// Raw input columns in training order
    pub const RAW: &[&str] = &[
        ID,
        AGE,
        ANNUAL_INCOME,
        DEPENDENTS,
        HEALTH_SCORE,
        PREVIOUS_CLAIMS,
        VEHICLE_AGE,
        CREDIT_SCORE,
        INSURANCE_DURATION,
        POLICY_START_DATE,
        GENDER,
        MARITAL_STATUS,
        EDUCATION_LEVEL,
        OCCUPATION,
        LOCATION,
        POLICY_TYPE,
        SMOKING_STATUS,
        EXERCISE_FREQUENCY,
        PROPERTY_TYPE,
    ];

    /// Categorical columns, in schema order
    pub const CATEGORICAL: &[&str] = &[
        GENDER,
        MARITAL_STATUS,
        EDUCATION_LEVEL,
        OCCUPATION,
        LOCATION,
        POLICY_TYPE,
        SMOKING_STATUS,
        EXERCISE_FREQUENCY,
        PROPERTY_TYPE,
    ];
}
