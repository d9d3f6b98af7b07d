//! Validation of destination URLs submitted for shortening.
//!
//! The accepted string is what gets hashed into the short code, so it is
//! returned as submitted (trimmed, with `https://` prepended when no HTTP
//! scheme is present) rather than re-serialized by the parser.

use url::Url;

/// Substrings that are never allowed in a destination URL (case-insensitive).
const BLOCKED_PATTERNS: &[&str] = &[".exe", "javascript:", "data:"];

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("URL exceeds maximum length of {max} characters")]
    TooLong { max: usize },

    #[error("URL contains forbidden content")]
    Forbidden,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Validates a destination URL and returns the form that will be stored.
///
/// # Rules
///
/// 1. Must be non-blank after trimming
/// 2. Must be at most `max_length` bytes
/// 3. Must not contain `.exe`, `javascript:` or `data:` in any case
/// 4. Gets an `https://` prefix if it does not start with `http://` or `https://`
/// 5. Must then parse as an absolute URL with a host
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
pub fn validate_url(input: &str, max_length: usize) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.len() > max_length {
        return Err(UrlValidationError::TooLong { max: max_length });
    }

    let lowercase = trimmed.to_ascii_lowercase();
    if BLOCKED_PATTERNS.iter().any(|p| lowercase.contains(p)) {
        return Err(UrlValidationError::Forbidden);
    }

    let candidate = if lowercase.starts_with("http://") || lowercase.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must include a host".to_string(),
        ));
    }

    Ok(candidate)
}
