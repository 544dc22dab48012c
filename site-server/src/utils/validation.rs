//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are applied
//! at the handler boundary.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: meal title, restaurant name, customer name, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special requests, contact messages
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone, time slot, status, city
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an email address shape.
pub fn validate_email_field(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    if !value.validate_email() {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a meal type discriminator.
pub fn validate_meal_type(value: &str) -> Result<(), AppError> {
    match value {
        "breakfast" | "lunch" | "dinner" => Ok(()),
        other => Err(AppError::validation(format!(
            "type must be breakfast, lunch or dinner (got '{other}')"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email_field("a@b.com", "email").is_ok());
        assert!(validate_email_field("not-an-email", "email").is_err());
    }

    #[test]
    fn meal_type_is_closed_set() {
        assert!(validate_meal_type("lunch").is_ok());
        assert!(validate_meal_type("brunch").is_err());
    }
}
