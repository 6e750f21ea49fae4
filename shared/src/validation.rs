//! Pure validation rules
//!
//! One set of rules, callable from any write path. The UI validates with
//! these before it submits and the server validates with the same
//! functions before it persists, so nothing can bypass the rules by
//! talking to the API directly.

use validator::ValidationError;

// ── Text length limits ──────────────────────────────────────────────

/// Names of people, companies, events, packages, postings.
pub const MAX_NAME_LEN: usize = 200;

/// Free text: enquiry messages, organizer responses, descriptions.
pub const MAX_TEXT_LEN: usize = 2000;

/// Email addresses (RFC 5321).
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing).
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Field rules ─────────────────────────────────────────────────────

/// A contact number: 7-15 digits, optional leading `+`, spaces and
/// dashes tolerated.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: Vec<char> = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    (7..=15).contains(&digits.len()) && digits.iter().all(|c| c.is_ascii_digit())
}

/// Validator-compatible wrapper around [`is_valid_phone`].
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Non-empty after trimming and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Present values must be within the length limit; absent is fine.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_common_shapes() {
        assert!(is_valid_phone("+351 912 345 678"));
        assert!(is_valid_phone("912-345-678"));
        assert!(is_valid_phone("5551234"));
    }

    #[test]
    fn phone_rejects_garbage() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
        assert!(!is_valid_phone("+12 34 56 78 90 12 34 56 78"));
    }

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("  ", "title", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "title", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Tech Expo", "title", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn optional_text_allows_absent() {
        assert!(validate_optional_text(None, "message", MAX_TEXT_LEN).is_ok());
        assert!(validate_optional_text(Some("hi"), "message", MAX_TEXT_LEN).is_ok());
        assert!(validate_optional_text(Some(&"y".repeat(2001)), "message", MAX_TEXT_LEN).is_err());
    }
}
