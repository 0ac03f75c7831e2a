// src/forms/mod.rs
//! Form binding layer: draft state, sanitization and validation glue.
//!
//! A binding holds local draft values only. The shared document is never
//! touched here; `submit` hands the validated entity back to the caller,
//! who commits it through the store.

use std::marker::PhantomData;

use thiserror::Error;
use tracing::debug;

use crate::sanitizer::{apply_edit, CharFilter, EditOutcome, EditPolicy};
use crate::store::CvStore;
use crate::types::{EducationDraft, ExperienceDraft, PersonalInfo};
use crate::validation::{schemas, FieldValues, Schema, ValidationErrors};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{field}' for {entity} form")]
    UnknownField {
        field: String,
        entity: &'static str,
    },
}

/// One CV section that can back a form: schema, per-field input policies,
/// and conversion to/from draft field values.
pub trait FormSection: Sized {
    fn schema() -> &'static Schema;

    /// Input filter for a field, or `None` for free text.
    fn field_policy(field: &str) -> Option<(EditPolicy, CharFilter)>;

    fn to_values(&self) -> FieldValues;

    /// Build the typed entity from draft values. Only called after the
    /// schema accepted them.
    fn from_values(values: &FieldValues) -> Self;
}

fn get(values: &FieldValues, field: &str) -> String {
    values.get(field).cloned().unwrap_or_default()
}

impl FormSection for PersonalInfo {
    fn schema() -> &'static Schema {
        schemas::personal_info()
    }

    fn field_policy(field: &str) -> Option<(EditPolicy, CharFilter)> {
        match field {
            "full_name" => Some((EditPolicy::StripSilently, CharFilter::letters())),
            "phone" => Some((EditPolicy::StripSilently, CharFilter::digits())),
            _ => None,
        }
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::from([
            ("full_name".to_string(), self.full_name.clone()),
            ("email".to_string(), self.email.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("location".to_string(), self.location.clone()),
            ("summary".to_string(), self.summary.clone()),
        ])
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            full_name: get(values, "full_name"),
            email: get(values, "email"),
            phone: get(values, "phone"),
            location: get(values, "location"),
            summary: get(values, "summary"),
        }
    }
}

impl FormSection for ExperienceDraft {
    fn schema() -> &'static Schema {
        schemas::experience()
    }

    fn field_policy(field: &str) -> Option<(EditPolicy, CharFilter)> {
        match field {
            // The experience form warns and reverts instead of trimming.
            "company" | "position" => Some((EditPolicy::RejectAndRevert, CharFilter::letters())),
            _ => None,
        }
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::from([
            ("company".to_string(), self.company.clone()),
            ("position".to_string(), self.position.clone()),
            ("start_date".to_string(), self.start_date.clone()),
            ("end_date".to_string(), self.end_date.clone()),
            ("description".to_string(), self.description.clone()),
        ])
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            company: get(values, "company"),
            position: get(values, "position"),
            start_date: get(values, "start_date"),
            end_date: get(values, "end_date"),
            description: get(values, "description"),
        }
    }
}

impl FormSection for EducationDraft {
    fn schema() -> &'static Schema {
        schemas::education()
    }

    fn field_policy(field: &str) -> Option<(EditPolicy, CharFilter)> {
        match field {
            "institution" | "degree" => Some((EditPolicy::StripSilently, CharFilter::letters())),
            _ => None,
        }
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::from([
            ("institution".to_string(), self.institution.clone()),
            ("degree".to_string(), self.degree.clone()),
            ("field".to_string(), self.field.clone()),
            ("start_date".to_string(), self.start_date.clone()),
            ("end_date".to_string(), self.end_date.clone()),
        ])
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            institution: get(values, "institution"),
            degree: get(values, "degree"),
            field: get(values, "field"),
            start_date: get(values, "start_date"),
            end_date: get(values, "end_date"),
        }
    }
}

/// Bound form for one section: draft values plus the aggregated error map.
#[derive(Debug, Clone)]
pub struct FormBinding<T: FormSection> {
    values: FieldValues,
    errors: ValidationErrors,
    _section: PhantomData<T>,
}

impl FormBinding<PersonalInfo> {
    /// Personal-info form seeded from the current document snapshot.
    pub fn personal_info(store: &CvStore) -> Self {
        Self::seeded(store.data().personal_info.to_values())
    }
}

impl FormBinding<ExperienceDraft> {
    /// Empty add-experience form.
    pub fn experience() -> Self {
        Self::seeded(ExperienceDraft::default().to_values())
    }
}

impl FormBinding<EducationDraft> {
    /// Empty add-education form.
    pub fn education() -> Self {
        Self::seeded(EducationDraft::default().to_values())
    }
}

impl<T: FormSection> FormBinding<T> {
    fn seeded(values: FieldValues) -> Self {
        Self {
            values,
            errors: ValidationErrors::default(),
            _section: PhantomData,
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.message_for(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Apply one edit: sanitize under the field's policy, store the draft,
    /// and re-validate the single field (on-change trigger). The shared
    /// document is untouched.
    pub fn set_field(&mut self, field: &str, candidate: &str) -> Result<EditOutcome, FormError> {
        let schema = T::schema();
        if !schema.has_field(field) {
            return Err(FormError::UnknownField {
                field: field.to_string(),
                entity: schema.entity,
            });
        }

        let outcome = match T::field_policy(field) {
            Some((policy, filter)) => {
                apply_edit(policy, filter, self.value(field), candidate)
            }
            None => EditOutcome::Accepted(candidate.to_string()),
        };

        self.values
            .insert(field.to_string(), outcome.value().to_string());

        self.errors.remove(field);
        if let Some(message) = schema.validate_field(field, outcome.value()) {
            self.errors.push(field, &message);
        }

        Ok(outcome)
    }

    /// Run full validation. On success the typed entity is returned and the
    /// caller commits it; on failure the drafts stay intact for correction
    /// and the error map is refreshed.
    pub fn submit(&mut self) -> Result<T, ValidationErrors> {
        match T::schema().validate(&self.values) {
            Ok(()) => {
                self.errors = ValidationErrors::default();
                Ok(T::from_values(&self.values))
            }
            Err(errors) => {
                debug!(
                    entity = T::schema().entity,
                    failures = errors.len(),
                    "submit blocked by validation"
                );
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Required fields still empty, for the defensive pre-submit notice.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        T::schema().missing_required(&self.values)
    }

    /// Clear the form back to section defaults (after a successful add).
    pub fn reset(&mut self) {
        self.values = T::from_values(&FieldValues::new()).to_values();
        self.errors = ValidationErrors::default();
    }
}
