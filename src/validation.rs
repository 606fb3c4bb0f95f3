//! Input validation rules
//!
//! Single source of truth for field validation: email format, required
//! fields, and the password policy enforced when a password is (re)set
//! through the reset flow.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Practical subset of RFC 5322, compiled once.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Symbols accepted (and one required) by the password policy.
const PASSWORD_SYMBOLS: &str = "!@$#%&*?";

/// User-facing policy message, returned with every `WeakPassword` failure.
pub const PASSWORD_POLICY: &str = "Password must be at least 8 characters, include lowercase, number, and special character (!@$#%&*?).";

/// Normalize an email for storage and lookup: emails are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validates an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField(
            "Email is required".to_string(),
        ));
    }

    if email.len() > 254 {
        return Err(ValidationError::InvalidEmail(
            "Email is too long".to_string(),
        ));
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(format!(
            "Invalid email format: {email}"
        )))
    }
}

/// Validates a required name field (first or last name).
pub fn validate_name(name: &str, field: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField(format!("{field} is required")));
    }

    if name.len() > 100 {
        return Err(ValidationError::InvalidName(format!(
            "{field} must be no more than 100 characters long"
        )));
    }

    Ok(())
}

/// Validates that a required field is present and not whitespace only.
pub fn validate_required(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(format!("{field} is required")));
    }

    Ok(())
}

/// Validates a new password against the reset policy.
///
/// Requirements: at least 8 characters, at least one lowercase letter, one
/// digit, and one symbol from `!@$#%&*?`; only ASCII letters, digits, and
/// those symbols are allowed.
pub fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    let strong = password.len() >= 8
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if strong {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword(PASSWORD_POLICY.to_string()))
    }
}
