//! # qrvault-app: Application Layer
//!
//! Wires the domain, codec and database crates into the workflows a UI
//! shell drives.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        AppState                             │
//! │                                                             │
//! │  generator: Mutex<GeneratorState>  ← create workflow        │
//! │  scanner:   Mutex<ScannerState>    ← scan workflow          │
//! │  history:   HistoryState           ← history screen         │
//! │  favorites: FavoritesState         ← favorites screen       │
//! │  db:        Database               ← shared pool + watches  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The generator and scanner are mutable state machines behind async
//! locks; the two list screens are cheap clones over the shared database
//! handle.
//!
//! ## Startup
//! ```rust,ignore
//! qrvault_app::init_tracing();
//! let config = AppConfig::load()?;
//! let app = AppState::build(config).await?;
//! ```

use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod media;
pub mod screen;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::{AppError, ErrorCode};
pub use media::{MediaError, MediaGallery};
pub use screen::Screen;
pub use state::{
    FavoritesState, GeneratorScreen, GeneratorState, HistoryState, Permission, ScannerState,
};

use qrvault_codec::QrEncoder;
use qrvault_db::{Database, DbConfig};

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to info with debug for our own crates and
/// quiet sqlx.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,qrvault=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Everything a UI shell needs, fully wired.
pub struct AppState {
    /// Shared database handle (pool + live-query channels).
    pub db: Database,

    /// The generation workflow.
    pub generator: Mutex<GeneratorState>,

    /// The scanning workflow.
    pub scanner: Mutex<ScannerState>,

    /// History screen data source.
    pub history: HistoryState,

    /// Favorites screen data source.
    pub favorites: FavoritesState,
}

impl AppState {
    /// Opens the database and builds every workflow state.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Could not create data dir: {e}")))?;
        }

        let db = Database::new(DbConfig::new(&config.database_path))
            .await
            .map_err(AppError::from)?;

        let encoder = QrEncoder::new(config.qr_size);
        let gallery = MediaGallery::new(&config.pictures_dir, &config.album);

        info!("application state ready");
        Ok(AppState {
            generator: Mutex::new(GeneratorState::new(db.clone(), encoder, gallery)),
            scanner: Mutex::new(ScannerState::new(db.clone())),
            history: HistoryState::new(db.clone()),
            favorites: FavoritesState::new(db.clone()),
            db,
        })
    }

    /// Shuts down the scan worker and closes the pool.
    pub async fn shutdown(&self) {
        self.scanner.lock().await.dispose();
        self.db.close().await;
    }
}
