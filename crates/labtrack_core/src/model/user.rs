//! User account model.
//!
//! # Invariants
//! - `password_hash` is never serialized.
//! - `username` uses `[A-Za-z0-9_.@+-]` and is unique (storage-enforced).

use super::status::Role;
use super::validation::{ValidationError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]{3,150}$").expect("valid username regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

const PASSWORD_MIN_CHARS: usize = 8;

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

impl User {
    pub fn validate(&self) -> ValidationResult {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

pub fn validate_username(username: &str) -> ValidationResult {
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::new(
            "username",
            "3-150 characters: letters, digits and @/./+/-/_ only",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    if !email.is_empty() && !EMAIL_RE.is_match(email) {
        return Err(ValidationError::new("email", "enter a valid email address"));
    }
    Ok(())
}

/// Rejects short and purely numeric passwords.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            "password",
            format!("must contain at least {PASSWORD_MIN_CHARS} characters"),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password", "cannot be entirely numeric"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_password, validate_username};

    #[test]
    fn password_rules() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("12345678901").is_err());
        assert!(validate_password("lab-admin-2024").is_ok());
    }

    #[test]
    fn username_and_email_rules() {
        assert!(validate_username("tech.one").is_ok());
        assert!(validate_username("no spaces").is_err());
        assert!(validate_email("").is_ok());
        assert!(validate_email("tech@college.edu").is_ok());
        assert!(validate_email("tech@").is_err());
    }
}
