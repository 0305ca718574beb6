//! # qrvault-core: Pure Domain Logic
//!
//! This crate is the foundation of the QRVault workspace, containing ALL
//! pure domain logic with ZERO I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       qrvault-app                           │
//! │              (screens, workflows, media export)             │
//! └───────────────┬──────────────────────┬──────────────────────┘
//!                 │                      │
//! ┌───────────────▼────────┐  ┌──────────▼───────────────────────┐
//! │      qrvault-codec     │  │           qrvault-db             │
//! │  (encode/decode/scan)  │  │  (SQLite persistence, watches)   │
//! └───────────────┬────────┘  └──────────┬───────────────────────┘
//!                 │                      │
//! ┌───────────────▼──────────────────────▼──────────────────────┐
//! │                      qrvault-core  ◄── YOU ARE HERE         │
//! │     (type registry, formatting, validation, entities)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//! | Module       | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | `registry`   | The closed code-type catalog and formatting rules    |
//! | `types`      | Persisted entity types and the timestamp helper      |
//! | `validation` | Form input validation (text, web URL)                |
//! | `error`      | `CoreError` / `ValidationError`                      |
//!
//! ## Design Rules
//! 1. No I/O: no files, no sockets, no database, no camera
//! 2. No async: everything here is a plain synchronous function
//! 3. Formatting never fails; validation fails early and precisely

pub mod error;
pub mod registry;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use registry::{starts_with_recognized_scheme, QrCodeType, RECOGNIZED_SCHEMES};
pub use types::{now_millis, GeneratedQrCode, ScannedCode};
pub use validation::{ensure_url_scheme, validate_text, validate_url};
