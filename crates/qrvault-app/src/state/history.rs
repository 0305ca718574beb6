//! # History State
//!
//! The scan history screen: a live list of past scans with per-row delete
//! and clear-all.

use serde::Serialize;
use tokio::sync::watch;

use crate::error::AppError;
use qrvault_codec::kind_label;
use qrvault_core::ScannedCode;
use qrvault_db::Database;

/// One history row as the screen shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub code: ScannedCode,

    /// Human-readable kind ("URL", "WiFi", ...), derived from the stored
    /// kind integer.
    pub kind_label: &'static str,
}

impl From<ScannedCode> for HistoryEntry {
    fn from(code: ScannedCode) -> Self {
        let kind_label = kind_label(code.kind);
        HistoryEntry { code, kind_label }
    }
}

/// The history screen's data source.
#[derive(Clone)]
pub struct HistoryState {
    db: Database,
}

impl HistoryState {
    pub fn new(db: Database) -> Self {
        HistoryState { db }
    }

    /// Current history, newest first.
    pub async fn entries(&self) -> Result<Vec<HistoryEntry>, AppError> {
        let rows = self.db.history().list().await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    /// Live raw history snapshots for the screen to map and render.
    pub async fn watch(&self) -> Result<watch::Receiver<Vec<ScannedCode>>, AppError> {
        Ok(self.db.history().watch().await?)
    }

    /// Deletes one row.
    pub async fn remove(&self, code: &ScannedCode) -> Result<(), AppError> {
        self.db.history().remove(code).await?;
        Ok(())
    }

    /// Deletes everything.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.db.history().clear().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qrvault_codec::{KIND_TEXT, KIND_URL};
    use qrvault_db::DbConfig;

    #[tokio::test]
    async fn test_entries_carry_kind_labels() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let history = HistoryState::new(db.clone());

        db.history().append("https://example.com", KIND_URL).await.unwrap();
        db.history().append("plain", KIND_TEXT).await.unwrap();

        let entries = history.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind_label, "Text");
        assert_eq!(entries[1].kind_label, "URL");
    }

    #[tokio::test]
    async fn test_clear_empties_watch_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let history = HistoryState::new(db.clone());

        db.history().append("x", KIND_TEXT).await.unwrap();
        let mut rx = history.watch().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        history.clear().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }
}
