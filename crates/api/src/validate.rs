//! Request body validation.
//!
//! Handlers accumulate per-field failures into a `Vec<FieldError>` and
//! convert them into one 400 response via [`finish`], so a bad request
//! reports every problem at once.

use serde::Serialize;

use crate::error::ApiError;

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for names, titles and topics.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum allowed length for message and thread bodies.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Require a non-blank value of at most `max` characters.
pub fn check_text(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{field} cannot be empty")));
    } else if trimmed.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{field} is too long (max {max} characters)"),
        ));
    }
}

/// Validate an email address (basic local@domain.tld shape check).
pub fn check_email(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    let email = value.trim();

    if email.is_empty() {
        errors.push(FieldError::new(field, "email cannot be empty"));
        return;
    }

    if email.len() > MAX_EMAIL_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("email is too long (max {MAX_EMAIL_LENGTH} characters)"),
        ));
        return;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        errors.push(FieldError::new(field, "email must look like local@domain"));
        return;
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        errors.push(FieldError::new(field, "email domain is malformed"));
    }
}

/// Validate a password's length.
pub fn check_password(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
}

/// Finish validation, turning accumulated failures into a 400.
pub fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
