//! Form-state and validation core for a CV-authoring application: a shared
//! in-memory document store, declarative per-entity schemas, per-keystroke
//! input sanitization, and the form bindings gluing them together.

pub mod forms;
pub mod report;
pub mod sanitizer;
pub mod store;
pub mod types;
pub mod validation;

pub use forms::{FormBinding, FormError, FormSection};
pub use report::{validate_document, DocumentReport, SectionFinding};
pub use sanitizer::{apply_edit, CharFilter, EditOutcome, EditPolicy};
pub use store::{CvStore, SubscriberId};
pub use types::{
    CvData, Education, EducationDraft, Experience, ExperienceDraft, PersonalInfo, PRESENT,
};
pub use validation::{schemas, FieldValues, Rule, Schema, ValidationErrors};
