//! Form-field metadata served to the UI
//!
//! The quote form builds itself from this description, so widget domains and
//! defaults live in exactly one place.

use crate::types::categories::{
    EducationLevel, ExerciseFrequency, Gender, Location, MaritalStatus, Occupation, PolicyType,
    PropertyType, SmokingStatus,
};
use crate::types::quote::domain;
use crate::min_policy_start;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// One form field's widget semantics
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpec {
    Number {
        name: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: i64,
        /// Render as a slider instead of a spinbox
        slider: bool,
    },
    Date {
        name: &'static str,
        label: &'static str,
        min: NaiveDate,
        /// Upper bound and default are both "today"
        max: NaiveDate,
    },
    Select {
        name: &'static str,
        label: &'static str,
        options: Vec<&'static str>,
    },
}

/// Every form field, in display order
pub fn form_fields() -> Vec<FieldSpec> {
    let number = |name, label, (min, max): (i64, i64), default| FieldSpec::Number {
        name,
        label,
        min,
        max,
        default,
        slider: false,
    };
    let select = |name, label, options| FieldSpec::Select {
        name,
        label,
        options,
    };

    vec![
        number("age", "Age", domain::AGE, 30),
        number("annual_income", "Annual Income", domain::ANNUAL_INCOME, 50_000),
        number("dependents", "Number of Dependents", domain::DEPENDENTS, 0),
        FieldSpec::Number {
            name: "health_score",
            label: "Health Score (0\u{2013}60)",
            min: domain::HEALTH_SCORE.0,
            max: domain::HEALTH_SCORE.1,
            default: 30,
            slider: true,
        },
        number("previous_claims", "Previous Claims", domain::PREVIOUS_CLAIMS, 0),
        number("vehicle_age", "Vehicle Age", domain::VEHICLE_AGE, 1),
        number("credit_score", "Credit Score", domain::CREDIT_SCORE, 600),
        number(
            "insurance_duration",
            "Insurance Duration (years)",
            domain::INSURANCE_DURATION,
            5,
        ),
        FieldSpec::Date {
            name: "policy_start_date",
            label: "Policy Start Date",
            min: min_policy_start(),
            max: Utc::now().date_naive(),
        },
        select("gender", "Gender", Gender::labels()),
        select("marital_status", "Marital Status", MaritalStatus::labels()),
        select("education_level", "Education Level", EducationLevel::labels()),
        select("occupation", "Occupation", Occupation::labels()),
        select("location", "Location", Location::labels()),
        select("policy_type", "Policy Type", PolicyType::labels()),
        select("smoking_status", "Smoking Status", SmokingStatus::labels()),
        select(
            "exercise_frequency",
            "Exercise Frequency",
            ExerciseFrequency::labels(),
        ),
        select("property_type", "Property Type", PropertyType::labels()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_field_is_listed() {
        // 9 numeric/date widgets + 9 selectboxes
        assert_eq!(form_fields().len(), 18);
    }

    #[test]
    fn test_health_score_is_the_only_slider() {
        let sliders: Vec<_> = form_fields()
            .into_iter()
            .filter_map(|f| match f {
                FieldSpec::Number { name, slider: true, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(sliders, vec!["health_score"]);
    }

    #[test]
    fn test_selects_carry_full_option_lists() {
        let education = form_fields().into_iter().find_map(|f| match f {
            FieldSpec::Select { name: "education_level", options, .. } => Some(options),
            _ => None,
        });
        assert_eq!(
            education.unwrap(),
            vec!["High School", "Bachelor's", "Master's", "PhD"]
        );
    }
}
