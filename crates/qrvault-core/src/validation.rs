//! # Input Validation
//!
//! Form-level validation rules for the generation workflow.
//!
//! ## Validation Strategy
//! ```text
//! User Input ──► Form validation (this module) ──► format_data ──► Encoder
//!                      │
//!                      └── fails fast with ValidationError,
//!                          before any formatting or encoding
//! ```
//!
//! Validation runs on every keystroke in the form layer, so these functions
//! are cheap and allocation-light on the happy path.

use url::Url;

use crate::error::ValidationError;

/// Validates free-form text content.
///
/// Only rule: must not be blank (empty or whitespace-only).
pub fn validate_text(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Blank { field: "text" });
    }
    Ok(())
}

/// Validates a web URL, tolerating a missing scheme.
///
/// Scheme-less input is checked as if `https://` were prepended, so
/// "example.com" is valid while "not a url" is not. Accepts only inputs
/// that parse as an absolute URL with a host.
pub fn validate_url(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field: "url" });
    }

    let candidate = ensure_url_scheme(trimmed);
    match Url::parse(&candidate) {
        Ok(url) if url.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            input: input.to_string(),
        }),
    }
}

/// Returns the input with an `https://` scheme prepended unless it already
/// starts with `http://` or `https://` (case-insensitive).
pub fn ensure_url_scheme(input: &str) -> String {
    let lowered = input.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
