//! QuoteRequest - one customer's raw attributes
//!
//! Built once per prediction request from the form values, never mutated,
//! discarded when the response is written. Field domains mirror the form
//! widgets; [`QuoteRequest::validate`] enforces them at the collection
//! boundary so downstream components can trust their input.

use crate::error::ValidationError;
use crate::types::categories::{
    EducationLevel, ExerciseFrequency, Gender, Location, MaritalStatus, Occupation, PolicyType,
    PropertyType, SmokingStatus,
};
use crate::types::frame::{columns, Cell, RowFrame};
use crate::{min_policy_start, PLACEHOLDER_ID};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive numeric field domains, as shown on the form
pub mod domain {
    pub const AGE: (i64, i64) = (18, 100);
    pub const ANNUAL_INCOME: (i64, i64) = (10_000, 1_000_000);
    pub const DEPENDENTS: (i64, i64) = (0, 4);
    pub const HEALTH_SCORE: (i64, i64) = (0, 60);
    pub const PREVIOUS_CLAIMS: (i64, i64) = (0, 9);
    pub const VEHICLE_AGE: (i64, i64) = (0, 20);
    pub const CREDIT_SCORE: (i64, i64) = (300, 850);
    pub const INSURANCE_DURATION: (i64, i64) = (1, 20);
}

/// One customer's attributes, as posted by the quote form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Age in years (18-100)
    pub age: i64,
    /// Annual income (10,000-1,000,000)
    pub annual_income: i64,
    /// Number of dependents (0-4)
    pub dependents: i64,
    /// Health score (0-60)
    pub health_score: i64,
    /// Previous claims count (0-9)
    pub previous_claims: i64,
    /// Vehicle age in years (0-20)
    pub vehicle_age: i64,
    /// Credit score (300-850)
    pub credit_score: i64,
    /// Insurance duration in years (1-20)
    pub insurance_duration: i64,
    /// Policy start date (2000-01-01 .. today)
    pub policy_start_date: NaiveDate,

    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub education_level: EducationLevel,
    pub occupation: Occupation,
    pub location: Location,
    pub policy_type: PolicyType,
    pub smoking_status: SmokingStatus,
    pub exercise_frequency: ExerciseFrequency,
    pub property_type: PropertyType,
}

impl Default for QuoteRequest {
    /// The form's default values
    fn default() -> Self {
        Self {
            age: 30,
            annual_income: 50_000,
            dependents: 0,
            health_score: 30,
            previous_claims: 0,
            vehicle_age: 1,
            credit_score: 600,
            insurance_duration: 5,
            policy_start_date: Utc::now().date_naive(),
            gender: Gender::default(),
            marital_status: MaritalStatus::default(),
            education_level: EducationLevel::default(),
            occupation: Occupation::default(),
            location: Location::default(),
            policy_type: PolicyType::default(),
            smoking_status: SmokingStatus::default(),
            exercise_frequency: ExerciseFrequency::default(),
            property_type: PropertyType::default(),
        }
    }
}

impl QuoteRequest {
    /// Enforce the form's field domains
    ///
    /// Categorical fields need no check here: serde already rejects unknown
    /// labels at deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ranges = [
            ("age", self.age, domain::AGE),
            ("annual_income", self.annual_income, domain::ANNUAL_INCOME),
            ("dependents", self.dependents, domain::DEPENDENTS),
            ("health_score", self.health_score, domain::HEALTH_SCORE),
            (
                "previous_claims",
                self.previous_claims,
                domain::PREVIOUS_CLAIMS,
            ),
            ("vehicle_age", self.vehicle_age, domain::VEHICLE_AGE),
            ("credit_score", self.credit_score, domain::CREDIT_SCORE),
            (
                "insurance_duration",
                self.insurance_duration,
                domain::INSURANCE_DURATION,
            ),
        ];

        for (field, value, (min, max)) in ranges {
            if value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    field,
                    min,
                    max,
                    value,
                });
            }
        }

        let today = Utc::now().date_naive();
        let min_start = min_policy_start();
        if self.policy_start_date < min_start || self.policy_start_date > today {
            return Err(ValidationError::DateOutOfRange {
                min: min_start,
                max: today,
                value: self.policy_start_date,
            });
        }

        Ok(())
    }

    /// Assemble the single-row input frame in training-schema order
    ///
    /// The placeholder `id` column is always 0; categorical fields are passed
    /// through as their raw labels (the pipeline performs encoding).
    pub fn to_row(&self) -> RowFrame {
        RowFrame::new()
            .with(columns::ID, Cell::Int(PLACEHOLDER_ID))
            .with(columns::AGE, Cell::Int(self.age))
            .with(columns::ANNUAL_INCOME, Cell::Int(self.annual_income))
            .with(columns::DEPENDENTS, Cell::Int(self.dependents))
            .with(columns::HEALTH_SCORE, Cell::Int(self.health_score))
            .with(columns::PREVIOUS_CLAIMS, Cell::Int(self.previous_claims))
            .with(columns::VEHICLE_AGE, Cell::Int(self.vehicle_age))
            .with(columns::CREDIT_SCORE, Cell::Int(self.credit_score))
            .with(
                columns::INSURANCE_DURATION,
                Cell::Int(self.insurance_duration),
            )
            .with(
                columns::POLICY_START_DATE,
                Cell::Date(self.policy_start_date),
            )
            .with(columns::GENDER, Cell::Text(self.gender.to_string()))
            .with(
                columns::MARITAL_STATUS,
                Cell::Text(self.marital_status.to_string()),
            )
            .with(
                columns::EDUCATION_LEVEL,
                Cell::Text(self.education_level.to_string()),
            )
            .with(columns::OCCUPATION, Cell::Text(self.occupation.to_string()))
            .with(columns::LOCATION, Cell::Text(self.location.to_string()))
            .with(
                columns::POLICY_TYPE,
                Cell::Text(self.policy_type.to_string()),
            )
            .with(
                columns::SMOKING_STATUS,
                Cell::Text(self.smoking_status.to_string()),
            )
            .with(
                columns::EXERCISE_FREQUENCY,
                Cell::Text(self.exercise_frequency.to_string()),
            )
            .with(
                columns::PROPERTY_TYPE,
                Cell::Text(self.property_type.to_string()),
            )
    }
}

/// The model's output for one request; ephemeral, display-only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub premium: f64,
}

impl PredictionResult {
    pub fn new(premium: f64) -> Self {
        Self { premium }
    }

    /// Display form, two decimal places
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_valid() {
        assert!(QuoteRequest::default().validate().is_ok());
    }

    #[test]
    fn test_row_matches_training_schema_order() {
        let row = QuoteRequest::default().to_row();
        assert_eq!(row.names().collect::<Vec<_>>(), columns::RAW);
    }

    #[test]
    fn test_row_carries_placeholder_id() {
        let row = QuoteRequest::default().to_row();
        assert_eq!(row.get(columns::ID), Some(&Cell::Int(0)));
    }

    #[test]
    fn test_row_passes_raw_categorical_labels() {
        let req = QuoteRequest {
            occupation: Occupation::SelfEmployed,
            ..QuoteRequest::default()
        };
        let row = req.to_row();
        assert_eq!(
            row.get(columns::OCCUPATION).and_then(Cell::as_text),
            Some("Self-Employed")
        );
    }

    #[test]
    fn test_age_below_domain_is_rejected() {
        let req = QuoteRequest {
            age: 17,
            ..QuoteRequest::default()
        };
        assert_eq!(
            req.validate(),
            Err(ValidationError::OutOfRange {
                field: "age",
                min: 18,
                max: 100,
                value: 17,
            })
        );
    }

    #[test]
    fn test_income_above_domain_is_rejected() {
        let req = QuoteRequest {
            annual_income: 2_000_000,
            ..QuoteRequest::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_policy_start_before_2000_is_rejected() {
        let req = QuoteRequest {
            policy_start_date: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            ..QuoteRequest::default()
        };
        assert!(matches!(
            req.validate(),
            Err(ValidationError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_formatted_premium_has_two_decimals() {
        assert_eq!(PredictionResult::new(1234.5).formatted(), "1234.50");
        assert_eq!(PredictionResult::new(0.0).formatted(), "0.00");
    }

    #[test]
    fn test_request_deserializes_from_form_json() {
        let json = r#"{
            "age": 40,
            "annual_income": 90000,
            "dependents": 2,
            "health_score": 30,
            "previous_claims": 1,
            "vehicle_age": 3,
            "credit_score": 700,
            "insurance_duration": 10,
            "policy_start_date": "2023-06-15",
            "gender": "Female",
            "marital_status": "Married",
            "education_level": "Master's",
            "occupation": "Self-Employed",
            "location": "Suburban",
            "policy_type": "Comprehensive",
            "smoking_status": "No",
            "exercise_frequency": "Weekly",
            "property_type": "Condo"
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.education_level, EducationLevel::Masters);
        assert!(req.validate().is_ok());
    }
}
