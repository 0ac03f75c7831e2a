// src/validation/schemas.rs
//! Canonical rule sets for each CV entity.
//!
//! Optional fields (phone, summary, end_date, description) validate only
//! when non-empty; `end_date` additionally accepts the "present" sentinel.

use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldRule, Rule, Schema};
use crate::sanitizer::CharFilter;

fn letters() -> &'static Regex {
    CharFilter::letters().allowed_pattern()
}

lazy_static! {
    static ref PERSONAL_INFO: Schema = Schema::new(
        "personal_info",
        vec![
            FieldRule::new("full_name")
                .check(Rule::Required, "Full name is required")
                .check(Rule::MinLen(3), "Full name must be at least 3 characters")
                .check(
                    Rule::Matches(letters()),
                    "Full name may only contain letters, spaces and . - '"
                ),
            FieldRule::new("email")
                .check(Rule::Required, "Email is required")
                .check(Rule::Email, "Invalid email address format"),
            FieldRule::new("phone")
                .check(Rule::ExactDigits(10), "Phone number must be exactly 10 digits"),
            FieldRule::new("location"),
            FieldRule::new("summary")
                .check(Rule::MaxLen(500), "Summary must not exceed 500 characters"),
        ],
    );

    static ref EXPERIENCE: Schema = Schema::new(
        "experience",
        vec![
            FieldRule::new("company")
                .check(Rule::Required, "Company name is required")
                .check(Rule::MinLen(2), "Company name must be at least 2 characters")
                .check(
                    Rule::Matches(letters()),
                    "Company name may only contain letters, spaces and . - '"
                ),
            FieldRule::new("position")
                .check(Rule::Required, "Position is required")
                .check(Rule::MinLen(2), "Position must be at least 2 characters")
                .check(
                    Rule::Matches(letters()),
                    "Position may only contain letters, spaces and . - '"
                ),
            FieldRule::new("start_date")
                .check(Rule::Required, "Start date is required")
                .check(Rule::Date, "Start date must be a valid YYYY-MM-DD date"),
            FieldRule::new("end_date").check(
                Rule::DateOrPresent,
                "End date must be a valid YYYY-MM-DD date or \"present\""
            ),
            FieldRule::new("description")
                .check(Rule::MinLen(10), "Description must be at least 10 characters"),
        ],
    );

    static ref EDUCATION: Schema = Schema::new(
        "education",
        vec![
            FieldRule::new("institution")
                .check(Rule::Required, "Institution name is required")
                .check(Rule::MinLen(2), "Institution name must be at least 2 characters")
                .check(
                    Rule::Matches(letters()),
                    "Institution name may only contain letters, spaces and . - '"
                ),
            FieldRule::new("degree")
                .check(Rule::Required, "Degree is required")
                .check(Rule::MinLen(2), "Degree must be at least 2 characters")
                .check(
                    Rule::Matches(letters()),
                    "Degree may only contain letters, spaces and . - '"
                ),
            FieldRule::new("field"),
            FieldRule::new("start_date")
                .check(Rule::Required, "Start date is required")
                .check(Rule::Date, "Start date must be a valid YYYY-MM-DD date"),
            FieldRule::new("end_date").check(
                Rule::DateOrPresent,
                "End date must be a valid YYYY-MM-DD date or \"present\""
            ),
        ],
    );
}

pub fn personal_info() -> &'static Schema {
    &PERSONAL_INFO
}

pub fn experience() -> &'static Schema {
    &EXPERIENCE
}

pub fn education() -> &'static Schema {
    &EDUCATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldValues;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_personal_info_accepts_minimal_valid_input() {
        let result = personal_info().validate(&values(&[
            ("full_name", "Ana Torres"),
            ("email", "ana@example.com"),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_personal_info_rejects_digits_in_name() {
        let err = personal_info()
            .validate(&values(&[("full_name", "Ana 123"), ("email", "a@b.com")]))
            .unwrap_err();
        assert!(err.message_for("full_name").is_some());
        assert!(err.message_for("email").is_none());
    }

    #[test]
    fn test_personal_info_name_length() {
        let err = personal_info()
            .validate(&values(&[("full_name", "Al"), ("email", "a@b.com")]))
            .unwrap_err();
        assert_eq!(
            err.message_for("full_name"),
            Some("Full name must be at least 3 characters")
        );
    }

    #[test]
    fn test_personal_info_phone_is_optional_but_strict() {
        let base = [("full_name", "Ana Torres"), ("email", "ana@example.com")];

        let mut ok = values(&base);
        ok.insert("phone".to_string(), "0991234567".to_string());
        assert!(personal_info().validate(&ok).is_ok());

        let mut nine = values(&base);
        nine.insert("phone".to_string(), "099123456".to_string());
        assert!(personal_info().validate(&nine).is_err());

        let mut eleven = values(&base);
        eleven.insert("phone".to_string(), "09912345678".to_string());
        assert!(personal_info().validate(&eleven).is_err());

        let mut empty = values(&base);
        empty.insert("phone".to_string(), String::new());
        assert!(personal_info().validate(&empty).is_ok());
    }

    #[test]
    fn test_personal_info_summary_cap() {
        let long = "x".repeat(501);
        let mut vals = values(&[("full_name", "Ana Torres"), ("email", "a@b.com")]);
        vals.insert("summary".to_string(), long);
        let err = personal_info().validate(&vals).unwrap_err();
        assert!(err.message_for("summary").is_some());
    }

    #[test]
    fn test_experience_requires_valid_start_date() {
        let err = experience()
            .validate(&values(&[
                ("company", "Acme Corp"),
                ("position", "Engineer"),
                ("start_date", "January first"),
            ]))
            .unwrap_err();
        assert_eq!(
            err.message_for("start_date"),
            Some("Start date must be a valid YYYY-MM-DD date")
        );
    }

    #[test]
    fn test_experience_end_date_variants() {
        let base = [
            ("company", "Acme Corp"),
            ("position", "Engineer"),
            ("start_date", "2020-01-01"),
        ];

        for end in ["", "present", "2021-06-30"] {
            let mut vals = values(&base);
            vals.insert("end_date".to_string(), end.to_string());
            assert!(experience().validate(&vals).is_ok(), "end_date={:?}", end);
        }

        let mut vals = values(&base);
        vals.insert("end_date".to_string(), "someday".to_string());
        assert!(experience().validate(&vals).is_err());
    }

    #[test]
    fn test_experience_description_min_when_present() {
        let base = [
            ("company", "Acme Corp"),
            ("position", "Engineer"),
            ("start_date", "2020-01-01"),
        ];

        let mut short = values(&base);
        short.insert("description".to_string(), "short".to_string());
        assert!(experience().validate(&short).is_err());

        let mut ok = values(&base);
        ok.insert(
            "description".to_string(),
            "Built things for customers.".to_string(),
        );
        assert!(experience().validate(&ok).is_ok());
    }

    #[test]
    fn test_education_mirrors_experience_rules() {
        let result = education().validate(&values(&[
            ("institution", "Universidad Central"),
            ("degree", "Ingeniería de Software"),
            ("start_date", "2015-09-01"),
            ("end_date", "2020-07-31"),
        ]));
        assert!(result.is_ok());

        let err = education()
            .validate(&values(&[("institution", "U"), ("degree", "Ing")]))
            .unwrap_err();
        assert!(err.message_for("institution").is_some());
        assert!(err.message_for("start_date").is_some());
    }
}
