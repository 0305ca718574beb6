//! # qrvault-db: SQLite Persistence Layer
//!
//! Async SQLite storage for scan history and generated codes.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       qrvault-app                           │
//! │         (scan workflow, generator, history screens)         │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │                 qrvault-db  ◄── YOU ARE HERE                │
//! │                                                             │
//! │  Database (pool + live channels)                            │
//! │     ├── history()    → HistoryRepository                    │
//! │     │                   append / list / remove / clear      │
//! │     │                   watch() live snapshots              │
//! │     └── generated()  → GeneratedRepository                  │
//! │                         save_or_update (atomic upsert)      │
//! │                         set_favorite / set_note / remove    │
//! │                         watch_all() / watch_favorites()     │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//!                     SQLite (WAL mode)
//! ```
//!
//! Entities come from `qrvault-core` with its `sqlx` feature enabled, so
//! this crate adds no duplicate row types.

pub mod error;
pub mod live;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use live::LiveList;
pub use pool::{Database, DbConfig};
pub use repository::generated::GeneratedRepository;
pub use repository::history::HistoryRepository;
