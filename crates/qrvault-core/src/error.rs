//! # Error Types
//!
//! Domain-specific error types for qrvault-core.
//!
//! ## Error Hierarchy
//! ```text
//! qrvault-core errors (this file)
//! ├── CoreError        - General domain errors
//! └── ValidationError  - Form input validation failures
//!
//! qrvault-codec errors (separate crate)
//! ├── EncodeError      - QR symbol construction failures
//! └── DecodeError      - Frame decode failures
//!
//! qrvault-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! qrvault-app errors (application layer)
//! └── AppError         - What a UI shell sees (code + message)
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (type name, field, etc.)
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent rule violations in the generation workflow. They are
/// caught by the application layer and translated into user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selected code type has no generation path yet.
    ///
    /// Several catalog entries (WiFi, vCard, SEPA payment, TOTP, ...) are
    /// listed for scanning and future forms but cannot be generated until a
    /// dedicated multi-field form exists. Selecting one must surface this
    /// error, never crash.
    #[error("Generating {0} codes is not supported yet")]
    TypeNotSupported(&'static str),

    /// The content to encode ended up empty after formatting.
    #[error("Content to encode is empty")]
    EmptyContent,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
///
/// These occur when user input doesn't meet the per-type form rules.
/// Used for early validation before the encoder runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// Input is not a valid web URL (checked after scheme normalization).
    #[error("'{input}' is not a valid URL")]
    InvalidUrl { input: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TypeNotSupported("WiFi network");
        assert_eq!(err.to_string(), "Generating WiFi network codes is not supported yet");

        let err = ValidationError::Blank { field: "text" };
        assert_eq!(err.to_string(), "text must not be blank");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Blank { field: "url" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
