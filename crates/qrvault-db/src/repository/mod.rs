//! # Repository Layer
//!
//! One repository per store:
//! - [`history::HistoryRepository`] - append-only scan history
//! - [`generated::GeneratedRepository`] - generated codes, keyed by content
//!
//! Repositories are cheap handles (pool clone + shared live lists); create
//! them per call via the `Database` accessors.

pub mod generated;
pub mod history;
