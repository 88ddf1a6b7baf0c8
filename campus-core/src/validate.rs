//! Client-side validation rules
//!
//! These mirror what the admin forms check before they let a request leave
//! the browser. The server remains authoritative; every rule here exists to
//! give the user an early, specific message.

use crate::entity::{ComponentKind, CourseComponent};
use crate::error::ValidationError;
use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Earliest accepted founding year.
pub const MIN_ESTABLISHED_YEAR: i32 = 1800;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Required total of all component weightages.
pub const TOTAL_WEIGHTAGE: f64 = 100.0;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Current calendar year (UTC).
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Return the trimmed value, or a `RequiredFieldMissing` error if blank.
pub fn require<'a>(
    field: &'static str,
    value: &'a str,
    message: &str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field, message));
    }
    Ok(trimmed)
}

pub fn validate_established_year(raw: &str, current_year: i32) -> Result<i32, ValidationError> {
    let year = raw
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_ESTABLISHED_YEAR..=current_year).contains(y));
    year.ok_or_else(|| {
        ValidationError::invalid("establishedYear", "Enter a valid established year")
    })
}

pub fn validate_phone(raw: &str) -> Result<(), ValidationError> {
    if raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            "contactPhone",
            "Enter a valid 10-digit phone number",
        ))
    }
}

pub fn validate_email(raw: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(raw) {
        Ok(())
    } else {
        Err(ValidationError::invalid("contactEmail", "Enter a valid email"))
    }
}

pub fn validate_password(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required("password", "Password is required"));
    }
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::invalid(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Parse a course credit value. Must be a finite, non-negative number.
pub fn parse_credits(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite() && *c >= 0.0)
        .ok_or_else(|| {
            ValidationError::invalid("credits", "Credits must be a valid non-negative number")
        })
}

/// An evaluation component as typed into the course form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDraft {
    pub name: String,
    pub kind: ComponentKind,
    pub max_marks: String,
    pub weightage: String,
}

impl ComponentDraft {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            name: String::new(),
            kind,
            max_marks: String::new(),
            weightage: String::new(),
        }
    }

    fn label(&self) -> String {
        let kind = match self.kind {
            ComponentKind::Theory => "THEORY",
            ComponentKind::Lab => "LAB",
        };
        format!("{} ({})", self.name.trim(), kind)
    }
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Validate the evaluation components of a course and convert them to the
/// wire form (names upper-cased and trimmed).
pub fn validate_components(
    drafts: &[ComponentDraft],
) -> Result<Vec<CourseComponent>, ValidationError> {
    let mut seen = HashSet::new();
    for draft in drafts {
        let key = (draft.name.trim().to_uppercase(), draft.kind);
        if !seen.insert(key) {
            return Err(ValidationError::invalid(
                "components",
                "Duplicate component name with same type not allowed",
            ));
        }
    }

    if drafts.is_empty() {
        return Err(ValidationError::invalid(
            "components",
            "Add at least one evaluation component",
        ));
    }

    // Blank weightage counts as zero; anything unparsable poisons the sum.
    let total: f64 = drafts
        .iter()
        .map(|d| {
            let raw = d.weightage.trim();
            if raw.is_empty() {
                0.0
            } else {
                raw.parse::<f64>().unwrap_or(f64::NAN)
            }
        })
        .sum();
    if total.is_nan() || (total - TOTAL_WEIGHTAGE).abs() >= 1e-9 {
        return Err(ValidationError::invalid(
            "components",
            "Total weightage must be exactly 100%",
        ));
    }

    drafts
        .iter()
        .map(|draft| {
            if draft.name.trim().is_empty() {
                return Err(ValidationError::required(
                    "components",
                    "Component name is required",
                ));
            }
            let max_marks = parse_positive(&draft.max_marks).ok_or_else(|| {
                ValidationError::invalid(
                    "components",
                    format!("Invalid max marks for {}", draft.label()),
                )
            })?;
            let weightage = parse_positive(&draft.weightage).ok_or_else(|| {
                ValidationError::invalid(
                    "components",
                    format!("Invalid weightage for {}", draft.label()),
                )
            })?;
            Ok(CourseComponent {
                name: draft.name.trim().to_uppercase(),
                kind: draft.kind,
                max_marks,
                weightage,
            })
        })
        .collect()
}
