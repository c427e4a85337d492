//! Field-level validation shared by every record type.
//!
//! # Invariants
//! - Validation errors always name the offending JSON field.
//! - Normalization (trim, blank-to-`None`) runs before validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Trims a required text value in place.
pub fn normalize_text(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trims an optional text value and collapses blanks to `None`.
pub fn normalize_optional(value: &mut Option<String>) {
    if let Some(text) = value.as_mut() {
        normalize_text(text);
        if text.is_empty() {
            *value = None;
        }
    }
}

pub fn require_text(field: &'static str, value: &str, max_chars: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "this field is required"));
    }
    check_length(field, value, max_chars)
}

pub fn check_optional_length(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> ValidationResult {
    match value {
        Some(text) => check_length(field, text, max_chars),
        None => Ok(()),
    }
}

pub fn require_reference(field: &'static str, id: i64) -> ValidationResult {
    if id <= 0 {
        return Err(ValidationError::new(field, "this field is required"));
    }
    Ok(())
}

pub fn require_non_negative(field: &'static str, value: i64) -> ValidationResult {
    if value < 0 {
        return Err(ValidationError::new(field, "must be zero or greater"));
    }
    Ok(())
}

pub fn require_positive(field: &'static str, value: Option<i64>) -> ValidationResult {
    match value {
        Some(number) if number <= 0 => {
            Err(ValidationError::new(field, "must be greater than zero"))
        }
        _ => Ok(()),
    }
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> ValidationResult {
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(())
}
