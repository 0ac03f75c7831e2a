// src/validation/mod.rs
//! Declarative per-entity validation rules evaluated by a generic validator

pub mod schemas;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{DATE_FORMAT, PRESENT};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern");
}

/// Draft field values as held by a form, keyed by field name.
/// A missing key and an empty string are equivalent.
pub type FieldValues = BTreeMap<String, String>;

/// One validation predicate. Rules are data; `Schema::validate` is the only
/// evaluator.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Value must be non-empty (after trimming).
    Required,
    /// At least this many characters.
    MinLen(usize),
    /// At most this many characters.
    MaxLen(usize),
    /// Full string must match the pattern.
    Matches(&'static Regex),
    /// Well-formed email address.
    Email,
    /// Literal `YYYY-MM-DD` calendar date.
    Date,
    /// Calendar date or the "present" sentinel.
    DateOrPresent,
    /// Exactly this many ASCII digit characters.
    ExactDigits(usize),
}

impl Rule {
    fn passes(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::MinLen(n) => value.chars().count() >= *n,
            Rule::MaxLen(n) => value.chars().count() <= *n,
            Rule::Matches(pattern) => pattern.is_match(value),
            Rule::Email => EMAIL.is_match(value),
            Rule::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
            Rule::DateOrPresent => {
                value.eq_ignore_ascii_case(PRESENT)
                    || NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
            }
            Rule::ExactDigits(n) => {
                value.chars().count() == *n && value.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}

/// A rule plus the message shown when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub rule: Rule,
    pub message: &'static str,
}

/// Ordered checks for one field. The first failing check wins.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, rule: Rule, message: &'static str) -> Self {
        self.checks.push(Check { rule, message });
        self
    }

    fn is_required(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.rule, Rule::Required))
    }

    /// First failing check's message, if any. Optional fields skip every
    /// rule except `Required` when the value is empty.
    fn first_failure(&self, value: &str) -> Option<&'static str> {
        for check in &self.checks {
            if value.is_empty() && !matches!(check.rule, Rule::Required) {
                continue;
            }
            if !check.rule.passes(value) {
                return Some(check.message);
            }
        }
        None
    }
}

/// Declarative rule set for one entity type.
#[derive(Debug, Clone)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(entity: &'static str, fields: Vec<FieldRule>) -> Self {
        Self { entity, fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }

    /// Validate a full set of draft values. Missing keys count as empty.
    pub fn validate(&self, values: &FieldValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for field_rule in &self.fields {
            let value = values
                .get(field_rule.field)
                .map(String::as_str)
                .unwrap_or("");
            if let Some(message) = field_rule.first_failure(value) {
                errors.push(field_rule.field, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a single field, for the on-change trigger.
    pub fn validate_field(&self, field: &str, value: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .and_then(|f| f.first_failure(value))
            .map(str::to_string)
    }

    /// Required fields whose draft value is still empty (legacy pre-submit
    /// guard).
    pub fn missing_required<'a>(&self, values: &'a FieldValues) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .filter(|f| {
                values
                    .get(f.field)
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|f| f.field)
            .collect()
    }
}

/// Field-keyed, human-readable validation failures, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    entries: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: &str) {
        self.entries.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Drop any entry for the given field (used by the on-change trigger
    /// when a field becomes valid again).
    pub fn remove(&mut self, field: &str) {
        self.entries.retain(|e| e.field != field);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn toy_schema() -> Schema {
        Schema::new(
            "toy",
            vec![
                FieldRule::new("name")
                    .check(Rule::Required, "name is required")
                    .check(Rule::MinLen(3), "name too short"),
                FieldRule::new("code")
                    .check(Rule::ExactDigits(4), "code must be 4 digits"),
            ],
        )
    }

    #[test]
    fn test_required_fails_on_empty_and_whitespace() {
        let schema = toy_schema();
        assert!(schema.validate(&values(&[("name", "")])).is_err());
        assert!(schema.validate(&values(&[("name", "   ")])).is_err());
        assert!(schema.validate(&values(&[("name", "Ana")])).is_ok());
    }

    #[test]
    fn test_optional_field_skips_rules_when_empty() {
        let schema = toy_schema();
        // code empty: ExactDigits skipped
        assert!(schema.validate(&values(&[("name", "Ana"), ("code", "")])).is_ok());
        let err = schema
            .validate(&values(&[("name", "Ana"), ("code", "12a4")]))
            .unwrap_err();
        assert_eq!(err.message_for("code"), Some("code must be 4 digits"));
    }

    #[test]
    fn test_first_failing_check_wins() {
        let schema = toy_schema();
        let err = schema.validate(&values(&[("name", "")])).unwrap_err();
        assert_eq!(err.message_for("name"), Some("name is required"));
        let err = schema.validate(&values(&[("name", "Al")])).unwrap_err();
        assert_eq!(err.message_for("name"), Some("name too short"));
    }

    #[test]
    fn test_missing_key_counts_as_empty() {
        let schema = toy_schema();
        let err = schema.validate(&FieldValues::new()).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.message_for("name").is_some());
    }

    #[test]
    fn test_date_rules() {
        assert!(Rule::Date.passes("2020-01-31"));
        assert!(!Rule::Date.passes("2020-02-30"));
        assert!(!Rule::Date.passes("31-01-2020"));
        assert!(!Rule::Date.passes("soon"));
        assert!(Rule::DateOrPresent.passes("present"));
        assert!(Rule::DateOrPresent.passes("Present"));
        assert!(Rule::DateOrPresent.passes("2021-12-01"));
        assert!(!Rule::DateOrPresent.passes("ongoing"));
    }

    #[test]
    fn test_email_rule() {
        assert!(Rule::Email.passes("a@b.com"));
        assert!(Rule::Email.passes("first.last@sub.domain.org"));
        assert!(!Rule::Email.passes("not-an-email"));
        assert!(!Rule::Email.passes("a@b"));
        assert!(!Rule::Email.passes("@domain.com"));
    }

    #[test]
    fn test_exact_digits() {
        assert!(Rule::ExactDigits(10).passes("0991234567"));
        assert!(!Rule::ExactDigits(10).passes("099123456"));
        assert!(!Rule::ExactDigits(10).passes("09912345678"));
        assert!(!Rule::ExactDigits(10).passes("09912345ab"));
    }

    #[test]
    fn test_missing_required_listing() {
        let schema = toy_schema();
        let missing = schema.missing_required(&values(&[("code", "1234")]));
        assert_eq!(missing, vec!["name"]);
        let missing = schema.missing_required(&values(&[("name", "Ana")]));
        assert!(missing.is_empty());
    }
}
