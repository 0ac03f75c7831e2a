// src/types/mod.rs
pub mod cv_data;

pub use cv_data::{
    format_date_range, CvData, Education, EducationDraft, Experience, ExperienceDraft,
    PersonalInfo, DATE_FORMAT, PRESENT,
};
