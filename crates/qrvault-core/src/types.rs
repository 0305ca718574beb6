//! # Entity Types
//!
//! The two persisted record types shared across the workspace.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────┐   ┌─────────────────────────┐
//! │    ScannedCode      │   │    GeneratedQrCode      │
//! │  ─────────────────  │   │  ─────────────────────  │
//! │  id (rowid)         │   │  id (rowid)             │
//! │  content            │   │  content (UNIQUE)       │
//! │  kind (decoder int) │   │  image_path             │
//! │  timestamp (millis) │   │  timestamp (millis)     │
//! │                     │   │  is_favorite            │
//! │  append-only log    │   │  note                   │
//! │  owned by history   │   │  upsert-by-content      │
//! └─────────────────────┘   └─────────────────────────┘
//! ```
//!
//! Scan history rows are immutable once created; the generated store keeps at
//! most one row per distinct `content` value.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Returns the current time as epoch milliseconds.
///
/// All persisted timestamps use this representation.
#[inline]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Scanned Code
// =============================================================================

/// One successfully decoded symbol, as recorded in scan history.
///
/// Created on every successful decode; never updated. Deleted only by
/// explicit user action (single delete or clear-all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ScannedCode {
    /// Database-assigned row id.
    pub id: i64,

    /// Raw decoded payload.
    pub content: String,

    /// Decoder-defined barcode kind (see `qrvault-codec::decode` constants).
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub kind: i32,

    /// Capture time, epoch milliseconds.
    pub timestamp: i64,
}

// =============================================================================
// Generated QR Code
// =============================================================================

/// A generated code, keyed by its content.
///
/// Regenerating, saving to the gallery or toggling the favorite flag all
/// update the existing row in place; the store never holds two rows for the
/// same content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GeneratedQrCode {
    /// Database-assigned row id.
    pub id: i64,

    /// The encoded text; unique business key.
    pub content: String,

    /// Path of the exported image in shared picture storage, if any.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "imagePath"))]
    pub image_path: Option<String>,

    /// Last-modified time, epoch milliseconds. Refreshed on every update.
    pub timestamp: i64,

    /// Quick-access flag, independent of scan history.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "isFavorite"))]
    pub is_favorite: bool,

    /// Optional user note.
    pub note: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
