// src/sanitizer.rs
//! Per-keystroke character filtering applied before a value reaches form state

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    // Latin letters incl. accented vowels and ñ/Ñ, whitespace, period,
    // hyphen, apostrophe.
    static ref LETTERS_ALLOWED: Regex =
        Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s.\-']*$").expect("invalid letters pattern");
    static ref LETTERS_DISALLOWED: Regex =
        Regex::new(r"[^a-zA-ZáéíóúÁÉÍÓÚñÑ\s.\-']").expect("invalid letters strip pattern");
    static ref DIGITS_ALLOWED: Regex = Regex::new(r"^[0-9]*$").expect("invalid digits pattern");
    static ref DIGITS_DISALLOWED: Regex =
        Regex::new(r"[^0-9]").expect("invalid digits strip pattern");
}

/// Named character-class filter for one form field.
#[derive(Debug, Clone, Copy)]
pub struct CharFilter {
    pub name: &'static str,
    allowed: &'static Regex,
    disallowed: &'static Regex,
    warning: &'static str,
}

impl CharFilter {
    /// Letter fields: names, companies, positions, institutions.
    pub fn letters() -> Self {
        Self {
            name: "letters",
            allowed: &LETTERS_ALLOWED,
            disallowed: &LETTERS_DISALLOWED,
            warning: "Only letters, spaces and the characters . - ' are allowed",
        }
    }

    /// Digit-only fields: phone numbers.
    pub fn digits() -> Self {
        Self {
            name: "digits",
            allowed: &DIGITS_ALLOWED,
            disallowed: &DIGITS_DISALLOWED,
            warning: "Only digits are allowed",
        }
    }

    /// Full-match pattern for the allowed character class, reused by
    /// validation rules that re-check the charset at submit time.
    pub fn allowed_pattern(&self) -> &'static Regex {
        self.allowed
    }

    pub fn is_allowed(&self, text: &str) -> bool {
        self.allowed.is_match(text)
    }

    /// Remove every disallowed character, preserving the order of the rest.
    pub fn strip(&self, text: &str) -> String {
        self.disallowed.replace_all(text, "").into_owned()
    }
}

/// What to do with an edit containing disallowed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    /// Drop only the offending characters and accept the rest, no warning.
    StripSilently,
    /// Discard the whole edit, keep the previous value, surface a warning.
    RejectAndRevert,
}

/// Result of pushing one edit through a field's filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Candidate accepted as-is.
    Accepted(String),
    /// Disallowed characters were stripped from the candidate.
    Stripped(String),
    /// Edit discarded; carries the previous value and a user-facing warning.
    Rejected { previous: String, warning: String },
}

impl EditOutcome {
    /// The value the form field holds after this edit.
    pub fn value(&self) -> &str {
        match self {
            EditOutcome::Accepted(v) | EditOutcome::Stripped(v) => v,
            EditOutcome::Rejected { previous, .. } => previous,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            EditOutcome::Rejected { warning, .. } => Some(warning),
            _ => None,
        }
    }
}

/// Apply one edit under the field's policy. Pure in its inputs: `previous`
/// is the committed field value, `candidate` the full replacement string.
pub fn apply_edit(
    policy: EditPolicy,
    filter: CharFilter,
    previous: &str,
    candidate: &str,
) -> EditOutcome {
    if filter.is_allowed(candidate) {
        return EditOutcome::Accepted(candidate.to_string());
    }

    match policy {
        EditPolicy::StripSilently => EditOutcome::Stripped(filter.strip(candidate)),
        EditPolicy::RejectAndRevert => {
            warn!(filter = filter.name, "rejected edit with disallowed characters");
            EditOutcome::Rejected {
                previous: previous.to_string(),
                warning: filter.warning.to_string(),
            }
        }
    }
}
