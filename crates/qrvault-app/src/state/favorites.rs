//! # Favorites State
//!
//! The saved-codes screen: a live list of favorites with unstar, delete
//! and note editing.

use tokio::sync::watch;

use crate::error::AppError;
use qrvault_core::GeneratedQrCode;
use qrvault_db::Database;

/// The favorites screen's data source.
#[derive(Clone)]
pub struct FavoritesState {
    db: Database,
}

impl FavoritesState {
    pub fn new(db: Database) -> Self {
        FavoritesState { db }
    }

    /// Current favorites, newest first.
    pub async fn list(&self) -> Result<Vec<GeneratedQrCode>, AppError> {
        Ok(self.db.generated().list_favorites().await?)
    }

    /// Live favorites snapshots.
    pub async fn watch(&self) -> Result<watch::Receiver<Vec<GeneratedQrCode>>, AppError> {
        Ok(self.db.generated().watch_favorites().await?)
    }

    /// Unstars a code; the row stays in the store with its image path.
    pub async fn unfavorite(&self, code: &GeneratedQrCode) -> Result<(), AppError> {
        self.db.generated().set_favorite(code.id, false).await?;
        Ok(())
    }

    /// Deletes a saved code entirely.
    pub async fn remove(&self, code: &GeneratedQrCode) -> Result<(), AppError> {
        self.db.generated().remove(code.id).await?;
        Ok(())
    }

    /// Updates the row's note (empty input clears it).
    pub async fn set_note(&self, code: &GeneratedQrCode, note: &str) -> Result<(), AppError> {
        let trimmed = note.trim();
        let note = (!trimmed.is_empty()).then_some(trimmed);
        self.db.generated().set_note(code.id, note).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
