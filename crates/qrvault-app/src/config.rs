//! # Application Configuration
//!
//! Resolves where the database and exported images live.

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory on this system; nowhere to put app data.
    #[error("Could not determine application directories")]
    NoProjectDirs,
}

/// Application configuration.
///
/// `load()` resolves platform defaults; tests and embedders can point
/// everything at a custom directory with `with_data_dir`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the SQLite database file lives.
    pub database_path: PathBuf,

    /// Root of shared picture storage (exports land in `album` below it).
    pub pictures_dir: PathBuf,

    /// Album (subdirectory) name for exported images.
    pub album: String,

    /// Edge length of generated QR bitmaps, in pixels.
    pub qr_size: u32,
}

impl AppConfig {
    /// Resolves the platform-default configuration.
    ///
    /// Database goes to the per-user data directory; exports go to the
    /// user's Pictures directory (falling back to the data directory when
    /// the platform has none).
    pub fn load() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("com", "QRVault", "QRVault")
            .ok_or(ConfigError::NoProjectDirs)?;

        let data_dir = dirs.data_dir().to_path_buf();
        let pictures_dir = UserDirs::new()
            .and_then(|u| u.picture_dir().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| data_dir.clone());

        let config = AppConfig {
            database_path: data_dir.join("qrvault.db"),
            pictures_dir,
            album: "QRVault".to_string(),
            qr_size: 256,
        };

        info!(
            db = %config.database_path.display(),
            pictures = %config.pictures_dir.display(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Points the database and picture storage at `dir` (used in tests).
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        AppConfig {
            database_path: dir.join("qrvault.db"),
            pictures_dir: dir.join("pictures"),
            album: "QRVault".to_string(),
            qr_size: 256,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_keeps_everything_under_root() {
        let config = AppConfig::with_data_dir("/tmp/qrvault-test");
        assert!(config.database_path.starts_with("/tmp/qrvault-test"));
        assert!(config.pictures_dir.starts_with("/tmp/qrvault-test"));
        assert_eq!(config.qr_size, 256);
    }
}
