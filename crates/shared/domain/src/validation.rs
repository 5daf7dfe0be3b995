//! Field format rules shared by the entity and the use cases.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_PATTERN, MIN_NAME_LENGTH, NAME_PATTERN};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email pattern"));

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(NAME_PATTERN).expect("valid name pattern"));

/// Check an email against the accepted format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a name and return its trimmed form.
///
/// `label` is used in the returned message, e.g. "First name".
pub fn check_name(label: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(format!("{} is required", label));
    }
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(format!(
            "{} must be at least {} characters long",
            label, MIN_NAME_LENGTH
        ));
    }
    if !NAME_REGEX.is_match(trimmed) {
        return Err(format!("{} may only contain letters and spaces", label));
    }

    Ok(trimmed.to_string())
}

/// Check an email and return its trimmed form.
pub fn check_email(value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Email is required".to_string());
    }
    if !is_valid_email(trimmed) {
        return Err("Email format is invalid".to_string());
    }

    Ok(trimmed.to_string())
}
