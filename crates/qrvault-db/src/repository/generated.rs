//! # Generated Code Repository
//!
//! Database operations for the generated code store.
//!
//! ## Content Is the Key
//! The store holds at most one row per distinct `content` value. All writes
//! that might race (save to favorites vs. gallery download of the same
//! content) go through a single atomic upsert:
//!
//! ```text
//! INSERT ... ON CONFLICT(content) DO UPDATE
//!      │
//!      ├── row absent  ──► insert with the given flags
//!      └── row present ──► update in place, preserving whatever the
//!                          caller left unspecified (image path, favorite)
//! ```
//!
//! SQLite executes the upsert as one statement, so two concurrent saves of
//! the same content can never produce duplicate rows.

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::error::DbResult;
use crate::live::LiveList;
use qrvault_core::{now_millis, GeneratedQrCode};

const COLUMNS: &str = "id, content, imagePath, timestamp, isFavorite, note";

/// Repository for the generated code store.
#[derive(Debug, Clone)]
pub struct GeneratedRepository {
    pool: SqlitePool,
    live_all: Arc<LiveList<GeneratedQrCode>>,
    live_favorites: Arc<LiveList<GeneratedQrCode>>,
}

impl GeneratedRepository {
    /// Creates a new GeneratedRepository sharing the given live lists.
    pub fn new(
        pool: SqlitePool,
        live_all: Arc<LiveList<GeneratedQrCode>>,
        live_favorites: Arc<LiveList<GeneratedQrCode>>,
    ) -> Self {
        GeneratedRepository {
            pool,
            live_all,
            live_favorites,
        }
    }

    /// Looks up the row for exactly this content, if any.
    pub async fn find_by_content(&self, content: &str) -> DbResult<Option<GeneratedQrCode>> {
        let row = sqlx::query_as::<_, GeneratedQrCode>(&format!(
            "SELECT {COLUMNS} FROM generated_qr_codes WHERE content = ?1"
        ))
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts or updates the row for `content` in one atomic statement.
    ///
    /// `None` arguments leave the existing value untouched (and default to
    /// no-image / not-favorite on first insert). The row's timestamp is
    /// refreshed on every call.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // "save to favorites": force the flag, keep any exported image
    /// repo.save_or_update(&content, None, Some(true)).await?;
    ///
    /// // "downloaded to gallery": record the path, keep the flag
    /// repo.save_or_update(&content, Some(&path), None).await?;
    /// ```
    pub async fn save_or_update(
        &self,
        content: &str,
        image_path: Option<&str>,
        favorite: Option<bool>,
    ) -> DbResult<GeneratedQrCode> {
        let row = sqlx::query_as::<_, GeneratedQrCode>(&format!(
            "INSERT INTO generated_qr_codes (content, imagePath, timestamp, isFavorite) \
             VALUES (?1, ?2, ?3, COALESCE(?4, 0)) \
             ON CONFLICT(content) DO UPDATE SET \
                 imagePath  = COALESCE(?2, generated_qr_codes.imagePath), \
                 isFavorite = COALESCE(?4, generated_qr_codes.isFavorite), \
                 timestamp  = ?3 \
             RETURNING {COLUMNS}"
        ))
        .bind(content)
        .bind(image_path)
        .bind(now_millis())
        .bind(favorite)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, favorite = row.is_favorite, "generated code saved");
        self.refresh().await?;
        Ok(row)
    }

    /// Sets the favorite flag on an existing row.
    ///
    /// Leaves the timestamp alone: flipping a star is not an edit.
    pub async fn set_favorite(&self, id: i64, favorite: bool) -> DbResult<()> {
        sqlx::query("UPDATE generated_qr_codes SET isFavorite = ?2 WHERE id = ?1")
            .bind(id)
            .bind(favorite)
            .execute(&self.pool)
            .await?;

        debug!(id, favorite, "favorite flag updated");
        self.refresh().await
    }

    /// Replaces the row's note (pass `None` to clear it).
    pub async fn set_note(&self, id: i64, note: Option<&str>) -> DbResult<()> {
        sqlx::query("UPDATE generated_qr_codes SET note = ?2 WHERE id = ?1")
            .bind(id)
            .bind(note)
            .execute(&self.pool)
            .await?;
        self.refresh().await
    }

    /// Deletes a row from the store.
    pub async fn remove(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM generated_qr_codes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, "generated code deleted");
        self.refresh().await
    }

    /// Lists every stored code, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<GeneratedQrCode>> {
        let rows = sqlx::query_as::<_, GeneratedQrCode>(&format!(
            "SELECT {COLUMNS} FROM generated_qr_codes ORDER BY timestamp DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Lists favorite codes only, newest first.
    pub async fn list_favorites(&self) -> DbResult<Vec<GeneratedQrCode>> {
        let rows = sqlx::query_as::<_, GeneratedQrCode>(&format!(
            "SELECT {COLUMNS} FROM generated_qr_codes \
             WHERE isFavorite = 1 ORDER BY timestamp DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Subscribes to live snapshots of the full store.
    pub async fn watch_all(
        &self,
    ) -> DbResult<tokio::sync::watch::Receiver<Vec<GeneratedQrCode>>> {
        self.refresh().await?;
        Ok(self.live_all.subscribe())
    }

    /// Subscribes to live snapshots of the favorites list.
    pub async fn watch_favorites(
        &self,
    ) -> DbResult<tokio::sync::watch::Receiver<Vec<GeneratedQrCode>>> {
        self.refresh().await?;
        Ok(self.live_favorites.subscribe())
    }

    /// Re-queries both lists and publishes them to all watchers.
    async fn refresh(&self) -> DbResult<()> {
        self.live_all.publish(self.list_all().await?);
        self.live_favorites.publish(self.list_favorites().await?);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_or_update_keeps_one_row_per_content() {
        let db = db().await;
        let repo = db.generated();

        let first = repo
            .save_or_update("https://example.com", None, None)
            .await
            .unwrap();
        let second = repo
            .save_or_update("https://example.com", None, None)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(!second.is_favorite);
        assert!(second.timestamp >= first.timestamp);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unspecified_fields_are_preserved() {
        let db = db().await;
        let repo = db.generated();

        // Save as favorite, no image yet
        repo.save_or_update("payload", None, Some(true)).await.unwrap();

        // Gallery download records the path; the flag must survive
        let row = repo
            .save_or_update("payload", Some("/pictures/QRVault/QR_1.png"), None)
            .await
            .unwrap();
        assert!(row.is_favorite);
        assert_eq!(row.image_path.as_deref(), Some("/pictures/QRVault/QR_1.png"));

        // A later favorite-save must not wipe the recorded image
        let row = repo.save_or_update("payload", None, Some(true)).await.unwrap();
        assert_eq!(row.image_path.as_deref(), Some("/pictures/QRVault/QR_1.png"));
    }

    #[tokio::test]
    async fn test_find_by_content() {
        let db = db().await;
        let repo = db.generated();

        assert!(repo.find_by_content("missing").await.unwrap().is_none());

        repo.save_or_update("present", None, Some(true)).await.unwrap();
        let found = repo.find_by_content("present").await.unwrap().unwrap();
        assert!(found.is_favorite);
    }

    #[tokio::test]
    async fn test_set_favorite_moves_rows_between_lists() {
        let db = db().await;
        let repo = db.generated();

        let row = repo.save_or_update("starme", None, None).await.unwrap();
        assert!(repo.list_favorites().await.unwrap().is_empty());

        repo.set_favorite(row.id, true).await.unwrap();
        assert_eq!(repo.list_favorites().await.unwrap().len(), 1);

        repo.set_favorite(row.id, false).await.unwrap();
        assert!(repo.list_favorites().await.unwrap().is_empty());
        // Still in the full store either way
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_note_round_trip() {
        let db = db().await;
        let repo = db.generated();

        let row = repo.save_or_update("noted", None, None).await.unwrap();
        repo.set_note(row.id, Some("office wifi")).await.unwrap();

        let found = repo.find_by_content("noted").await.unwrap().unwrap();
        assert_eq!(found.note.as_deref(), Some("office wifi"));

        repo.set_note(row.id, None).await.unwrap();
        let found = repo.find_by_content("noted").await.unwrap().unwrap();
        assert!(found.note.is_none());
    }

    #[tokio::test]
    async fn test_watch_favorites_tracks_flag_changes() {
        let db = db().await;
        let repo = db.generated();

        let mut rx = repo.watch_favorites().await.unwrap();
        assert!(rx.borrow().is_empty());

        let row = repo.save_or_update("fav", None, Some(true)).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        repo.remove(row.id).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }
}
