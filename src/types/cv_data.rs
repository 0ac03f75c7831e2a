// src/types/cv_data.rs
//! CV document data structures shared by the form, validation and store layers

use serde::{Deserialize, Serialize};

/// Literal token accepted in `end_date` to mean an ongoing period.
/// An empty `end_date` carries the same meaning downstream.
pub const PRESENT: &str = "present";

/// Date format used by every date field in the document.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

/// Singleton section of the document. Fields mirror the form: a field is
/// never absent, only empty, so optionality is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

/// Validated experience payload before the store assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceDraft {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

/// Validated education payload before the store assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

impl ExperienceDraft {
    pub fn into_experience(self, id: String) -> Experience {
        Experience {
            id,
            company: self.company,
            position: self.position,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
        }
    }
}

impl From<&Experience> for ExperienceDraft {
    fn from(e: &Experience) -> Self {
        Self {
            company: e.company.clone(),
            position: e.position.clone(),
            start_date: e.start_date.clone(),
            end_date: e.end_date.clone(),
            description: e.description.clone(),
        }
    }
}

impl From<&Education> for EducationDraft {
    fn from(e: &Education) -> Self {
        Self {
            institution: e.institution.clone(),
            degree: e.degree.clone(),
            field: e.field.clone(),
            start_date: e.start_date.clone(),
            end_date: e.end_date.clone(),
        }
    }
}

impl EducationDraft {
    pub fn into_education(self, id: String) -> Education {
        Education {
            id,
            institution: self.institution,
            degree: self.degree,
            field: self.field,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Render a date range, mapping an empty or sentinel end date to the
/// "Present" label.
pub fn format_date_range(start_date: &str, end_date: &str) -> String {
    if end_date.is_empty() || end_date.eq_ignore_ascii_case(PRESENT) {
        format!("{} - Present", start_date)
    } else {
        format!("{} - {}", start_date, end_date)
    }
}

impl Experience {
    pub fn date_range(&self) -> String {
        format_date_range(&self.start_date, &self.end_date)
    }
}

impl Education {
    pub fn date_range(&self) -> String {
        format_date_range(&self.start_date, &self.end_date)
    }
}

impl PersonalInfo {
    /// Minimum the home screen needs to call this section complete.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && !self.email.is_empty()
    }
}

impl CvData {
    pub fn has_experience(&self) -> bool {
        !self.experiences.is_empty()
    }

    pub fn has_education(&self) -> bool {
        !self.education.is_empty()
    }

    /// One-line progress summary for status displays.
    pub fn summary_line(&self) -> String {
        format!(
            "personal info: {} | experiences: {} | education: {}",
            if self.personal_info.is_complete() {
                "complete"
            } else {
                "pending"
            },
            self.experiences.len(),
            self.education.len()
        )
    }
}
