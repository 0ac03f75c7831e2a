// src/report.rs
//! Whole-document validation report over a committed CV snapshot

use serde::{Deserialize, Serialize};

use crate::forms::FormSection;
use crate::types::{CvData, EducationDraft, ExperienceDraft};
use crate::validation::{schemas, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionFinding {
    pub section: String,
    /// Entry id for list sections, absent for personal info.
    pub entry_id: Option<String>,
    /// Human label for the offending entry (name, company, institution).
    pub label: String,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentReport {
    pub findings: Vec<SectionFinding>,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().map(|f| f.errors.len()).sum()
    }

    pub fn print_report(&self, data: &CvData) {
        println!("=== CV Validation Report ===");
        println!("{}", data.summary_line());

        if self.is_valid() {
            println!("✅ Document passes all section schemas");
            return;
        }

        println!(
            "❌ {} issue(s) across {} section entr(ies):",
            self.error_count(),
            self.findings.len()
        );
        for finding in &self.findings {
            match &finding.entry_id {
                Some(id) => println!("\n[{}] {} (id {})", finding.section, finding.label, id),
                None => println!("\n[{}] {}", finding.section, finding.label),
            }
            for error in finding.errors.iter() {
                println!("  • {}: {}", error.field, error.message);
            }
        }
    }
}

/// Run every section schema over the committed document and collect the
/// per-entry failures.
pub fn validate_document(data: &CvData) -> DocumentReport {
    let mut report = DocumentReport::default();

    if let Err(errors) = schemas::personal_info().validate(&data.personal_info.to_values()) {
        report.findings.push(SectionFinding {
            section: "personal_info".to_string(),
            entry_id: None,
            label: if data.personal_info.full_name.is_empty() {
                "(unnamed)".to_string()
            } else {
                data.personal_info.full_name.clone()
            },
            errors,
        });
    }

    for experience in &data.experiences {
        let values = ExperienceDraft::from(experience).to_values();
        if let Err(errors) = schemas::experience().validate(&values) {
            report.findings.push(SectionFinding {
                section: "experience".to_string(),
                entry_id: Some(experience.id.clone()),
                label: format!("{} — {}", experience.company, experience.position),
                errors,
            });
        }
    }

    for education in &data.education {
        let values = EducationDraft::from(education).to_values();
        if let Err(errors) = schemas::education().validate(&values) {
            report.findings.push(SectionFinding {
                section: "education".to_string(),
                entry_id: Some(education.id.clone()),
                label: format!("{} — {}", education.institution, education.degree),
                errors,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Experience, PersonalInfo};

    #[test]
    fn test_empty_document_fails_on_personal_info_only() {
        let report = validate_document(&CvData::default());
        assert!(!report.is_valid());
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].section, "personal_info");
    }

    #[test]
    fn test_valid_document_produces_no_findings() {
        let data = CvData {
            personal_info: PersonalInfo {
                full_name: "Ana Torres".to_string(),
                email: "ana@example.com".to_string(),
                phone: String::new(),
                location: "Quito".to_string(),
                summary: String::new(),
            },
            experiences: vec![Experience {
                id: "1".to_string(),
                company: "Acme Corp".to_string(),
                position: "Engineer".to_string(),
                start_date: "2020-01-01".to_string(),
                end_date: "present".to_string(),
                description: "Built things for customers.".to_string(),
            }],
            education: vec![],
        };
        let report = validate_document(&data);
        assert!(report.is_valid(), "unexpected findings: {:?}", report.findings);
    }

    #[test]
    fn test_invalid_entry_is_reported_with_its_id() {
        let data = CvData {
            personal_info: PersonalInfo {
                full_name: "Ana Torres".to_string(),
                email: "ana@example.com".to_string(),
                ..PersonalInfo::default()
            },
            experiences: vec![Experience {
                id: "42".to_string(),
                company: "Acme Corp".to_string(),
                position: "Engineer".to_string(),
                start_date: "last year".to_string(),
                end_date: String::new(),
                description: String::new(),
            }],
            education: vec![],
        };
        let report = validate_document(&data);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].entry_id.as_deref(), Some("42"));
        assert!(report.findings[0]
            .errors
            .message_for("start_date")
            .is_some());
    }
}
