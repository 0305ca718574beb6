//! # Scanner State
//!
//! Camera permission, frame pipeline and history recording.
//!
//! ## Frame Path
//! ```text
//! camera frame ──► handle_frame()
//!                      │  permission not granted? drop
//!                      ▼
//!                 ScanHandle::analyze (decode thread)
//!                      │
//!        ┌─────────────┼──────────────┐
//!        ▼             ▼              ▼
//!     Decoded       NoCode/Skipped  Failed
//!        │             │              │
//!        ▼             ▼              ▼
//!   history.append   nothing       log, keep scanning
//!        │
//!        ▼
//!   session is paused until the result sheet is dismissed
//!   (resume_scanning)
//! ```

use image::GrayImage;
use tracing::{info, warn};

use crate::error::AppError;
use qrvault_codec::{FrameOutcome, RqrrDecoder, ScanHandle};
use qrvault_core::ScannedCode;
use qrvault_db::Database;

/// Camera permission as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Unknown,
    Granted,
    Denied,
}

/// The scanning workflow state machine.
pub struct ScannerState {
    db: Database,
    scan: Option<ScanHandle>,
    permission: Permission,
    last_scan: Option<ScannedCode>,
}

impl ScannerState {
    /// Creates the workflow and spawns its decode worker.
    pub fn new(db: Database) -> Self {
        ScannerState {
            db,
            scan: Some(qrvault_codec::spawn(RqrrDecoder)),
            permission: Permission::Unknown,
            last_scan: None,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Records the host's permission answer.
    pub fn set_permission(&mut self, permission: Permission) {
        info!(?permission, "camera permission updated");
        self.permission = permission;
    }

    /// The most recent successful scan, if any.
    pub fn last_scan(&self) -> Option<&ScannedCode> {
        self.last_scan.as_ref()
    }

    /// Feeds one camera frame through the pipeline.
    ///
    /// Returns the freshly recorded history row when this frame decoded,
    /// `None` otherwise. After a decode the session stays paused until
    /// `resume_scanning`, so the result sheet shows exactly one hit.
    pub async fn handle_frame(&mut self, frame: GrayImage) -> Result<Option<ScannedCode>, AppError> {
        if self.permission != Permission::Granted {
            return Ok(None);
        }
        let Some(scan) = &self.scan else {
            return Ok(None);
        };

        match scan.analyze(frame).await? {
            FrameOutcome::Decoded(symbol) => {
                let code = self.db.history().append(&symbol.value, symbol.kind).await?;
                info!(id = code.id, kind = code.kind, "scan recorded");
                self.last_scan = Some(code.clone());
                Ok(Some(code))
            }
            FrameOutcome::NoCode | FrameOutcome::Skipped => Ok(None),
            FrameOutcome::Failed(err) => {
                // Routine for blurry/partial frames; the session is still live
                warn!(error = %err, "frame decode failed");
                Ok(None)
            }
        }
    }

    /// Re-arms scanning after the result sheet is dismissed.
    pub fn resume_scanning(&mut self) -> Result<(), AppError> {
        self.last_scan = None;
        if let Some(scan) = &self.scan {
            scan.resume()?;
        }
        Ok(())
    }

    /// The scanner screen came on screen.
    pub fn screen_visible(&mut self) -> Result<(), AppError> {
        if self.permission == Permission::Granted {
            if let Some(scan) = &self.scan {
                scan.resume()?;
            }
        }
        Ok(())
    }

    /// The scanner screen went off screen; stop burning CPU on frames.
    pub fn screen_hidden(&mut self) -> Result<(), AppError> {
        if let Some(scan) = &self.scan {
            scan.pause()?;
        }
        Ok(())
    }

    /// Stops the decode worker. The state is unusable afterwards.
    pub fn dispose(&mut self) {
        if let Some(scan) = self.scan.take() {
            scan.shutdown();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qrvault_codec::QrEncoder;
    use qrvault_db::DbConfig;

    async fn state() -> ScannerState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ScannerState::new(db)
    }

    fn frame(content: &str) -> GrayImage {
        QrEncoder::default().encode(content).unwrap()
    }

    #[tokio::test]
    async fn test_frames_dropped_without_permission() {
        let mut scanner = state().await;

        let hit = scanner.handle_frame(frame("ACME-123")).await.unwrap();
        assert!(hit.is_none());
        assert!(scanner.db.history().list().await.unwrap().is_empty());

        scanner.dispose();
    }

    #[tokio::test]
    async fn test_decode_records_history_and_pauses() {
        let mut scanner = state().await;
        scanner.set_permission(Permission::Granted);

        let hit = scanner.handle_frame(frame("ACME-123")).await.unwrap().unwrap();
        assert_eq!(hit.content, "ACME-123");
        assert_eq!(scanner.last_scan().unwrap().id, hit.id);

        // Paused after the hit: the same code in view is not re-recorded
        let again = scanner.handle_frame(frame("ACME-123")).await.unwrap();
        assert!(again.is_none());
        assert_eq!(scanner.db.history().list().await.unwrap().len(), 1);

        // Dismissing the result re-arms scanning
        scanner.resume_scanning().unwrap();
        assert!(scanner.last_scan().is_none());
        let hit = scanner.handle_frame(frame("ACME-123")).await.unwrap();
        assert!(hit.is_some());
        assert_eq!(scanner.db.history().list().await.unwrap().len(), 2);

        scanner.dispose();
    }

    #[tokio::test]
    async fn test_hidden_screen_skips_frames() {
        let mut scanner = state().await;
        scanner.set_permission(Permission::Granted);

        scanner.screen_hidden().unwrap();
        assert!(scanner.handle_frame(frame("x")).await.unwrap().is_none());

        scanner.screen_visible().unwrap();
        assert!(scanner.handle_frame(frame("x")).await.unwrap().is_some());

        scanner.dispose();
    }

    #[tokio::test]
    async fn test_dispose_is_safe_to_repeat() {
        let mut scanner = state().await;
        scanner.dispose();
        scanner.dispose();

        // Frames after dispose are dropped, not an error
        scanner.set_permission(Permission::Granted);
        assert!(scanner.handle_frame(frame("x")).await.unwrap().is_none());
    }
}
