//! Server-side validation helpers
//!
//! Thin adapters over the shared pure rules, returning [`AppError`] so
//! handlers can use `?` directly. The rules themselves live in
//! `sponsorhub_shared::validation` and are the same ones clients run.

use sponsorhub_shared::validation as rules;

use crate::utils::AppError;

pub use rules::{MAX_NAME_LEN, MAX_TEXT_LEN};

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    rules::validate_required_text(value, field, max_len).map_err(AppError::Validation)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    rules::validate_optional_text(value.as_deref(), field, max_len).map_err(AppError::Validation)
}

/// Validate an optional contact number against the shared phone rule.
pub fn validate_optional_phone(value: &Option<String>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value {
        if !rules::is_valid_phone(v) {
            return Err(AppError::validation(format!(
                "{field} is not a valid contact number"
            )));
        }
    }
    Ok(())
}
