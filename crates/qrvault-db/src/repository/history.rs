//! # Scan History Repository
//!
//! Database operations for the append-only scan history.
//!
//! ## Key Operations
//! - `append` - record one decoded symbol (one row per successful scan)
//! - `list` - newest-first history
//! - `remove` / `clear` - the only ways rows ever leave the table
//! - `watch` - live snapshot stream, re-emitted after every mutation
//!
//! History rows are immutable once created; nothing deduplicates repeated
//! scans of the same content.

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::error::DbResult;
use crate::live::LiveList;
use qrvault_core::{now_millis, ScannedCode};

const COLUMNS: &str = "id, content, type, timestamp";

/// Repository for scan history operations.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
    live: Arc<LiveList<ScannedCode>>,
}

impl HistoryRepository {
    /// Creates a new HistoryRepository sharing the given live list.
    pub fn new(pool: SqlitePool, live: Arc<LiveList<ScannedCode>>) -> Self {
        HistoryRepository { pool, live }
    }

    /// Records one decoded symbol, stamped with the current time.
    ///
    /// Every call inserts a new row; scanning the same content twice yields
    /// two history entries.
    pub async fn append(&self, content: &str, kind: i32) -> DbResult<ScannedCode> {
        let code = sqlx::query_as::<_, ScannedCode>(
            "INSERT INTO scanned_codes (content, type, timestamp) \
             VALUES (?1, ?2, ?3) \
             RETURNING id, content, type, timestamp",
        )
        .bind(content)
        .bind(kind)
        .bind(now_millis())
        .fetch_one(&self.pool)
        .await?;

        debug!(id = code.id, kind = code.kind, "scan recorded");
        self.refresh().await?;
        Ok(code)
    }

    /// Lists all history rows, newest first.
    ///
    /// Ties on timestamp (possible at millisecond resolution) break by row
    /// id so the order is stable.
    pub async fn list(&self) -> DbResult<Vec<ScannedCode>> {
        let rows = sqlx::query_as::<_, ScannedCode>(&format!(
            "SELECT {COLUMNS} FROM scanned_codes ORDER BY timestamp DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Deletes a single history row.
    ///
    /// Deleting a row that is already gone is a no-op, not an error.
    pub async fn remove(&self, code: &ScannedCode) -> DbResult<()> {
        sqlx::query("DELETE FROM scanned_codes WHERE id = ?1")
            .bind(code.id)
            .execute(&self.pool)
            .await?;

        debug!(id = code.id, "history row deleted");
        self.refresh().await
    }

    /// Deletes the entire history.
    pub async fn clear(&self) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM scanned_codes")
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "history cleared");
        self.refresh().await
    }

    /// Subscribes to live history snapshots (newest first).
    ///
    /// The returned receiver's `borrow()` holds the current list right
    /// away; `changed().await` resolves after each subsequent mutation.
    pub async fn watch(&self) -> DbResult<tokio::sync::watch::Receiver<Vec<ScannedCode>>> {
        self.refresh().await?;
        Ok(self.live.subscribe())
    }

    /// Re-queries the list and publishes it to all watchers.
    async fn refresh(&self) -> DbResult<()> {
        let rows = self.list().await?;
        self.live.publish(rows);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use qrvault_core::ScannedCode;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_produces_one_row_per_scan() {
        let db = db().await;
        let repo = db.history();

        for _ in 0..3 {
            repo.append("ACME-123", 7).await.unwrap();
        }

        let rows = repo.list().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.content == "ACME-123" && r.kind == 7));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = db().await;
        let repo = db.history();

        let first = repo.append("first", 7).await.unwrap();
        let second = repo.append("second", 8).await.unwrap();

        let rows = repo.list().await.unwrap();
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);
        // Equal timestamps must not reorder: newest id wins
        assert!(rows[0].timestamp >= rows[1].timestamp);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let db = db().await;
        let repo = db.history();

        let a = repo.append("a", 7).await.unwrap();
        repo.append("b", 7).await.unwrap();

        repo.remove(&a).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);

        // Removing an already-deleted row is a no-op
        repo.remove(&a).await.unwrap();

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_emits_after_mutations() {
        let db = db().await;
        let repo = db.history();

        let mut rx = repo.watch().await.unwrap();
        assert!(rx.borrow().is_empty());

        repo.append("hello", 7).await.unwrap();
        rx.changed().await.unwrap();
        let snapshot: Vec<ScannedCode> = rx.borrow().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].content, "hello");

        repo.clear().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }
}
