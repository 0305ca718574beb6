//! # Application Error Type
//!
//! Unified error type for the application layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Error Flow                             │
//! │                                                              │
//! │  DbError ───────────┐                                        │
//! │  CoreError ─────────┤                                        │
//! │  EncodeError ───────┼──► AppError { code, message } ──► UI   │
//! │  ScanError ─────────┤                                        │
//! │  MediaError ────────┘                                        │
//! │                                                              │
//! │  `code` is machine-readable (switch on it),                  │
//! │  `message` is what the user sees.                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL text, paths) are logged here and never forwarded
//! in `message`.

use serde::Serialize;

use crate::media::MediaError;
use qrvault_codec::{EncodeError, ScanError};
use qrvault_core::CoreError;
use qrvault_db::DbError;

/// Error returned from application workflows.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Saved code not found: 42" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for application responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The selected code type cannot be generated yet
    Unsupported,

    /// Database operation failed
    DatabaseError,

    /// QR symbol construction failed
    EncodeError,

    /// Scan pipeline failure (worker gone)
    ScanError,

    /// Gallery export failed
    MediaError,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::ValidationError,
                format!("{field} '{value}' already exists"),
            ),
            DbError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TypeNotSupported(_) => AppError::new(ErrorCode::Unsupported, err.to_string()),
            CoreError::EmptyContent => AppError::validation(err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<EncodeError> for AppError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::EmptyContent => AppError::validation(err.to_string()),
            EncodeError::Construction(_) => AppError::new(ErrorCode::EncodeError, err.to_string()),
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        AppError::new(ErrorCode::ScanError, err.to_string())
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        tracing::error!("Gallery export failed: {}", err);
        AppError::new(ErrorCode::MediaError, "Could not save image to gallery")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

// =============================================================================
// Unit Tests
// =============================================================================
