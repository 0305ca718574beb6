//! # Gallery Export
//!
//! Writes generated bitmaps into shared picture storage.
//!
//! ## Two-Phase Write
//! ```text
//! <pictures>/<album>/QR_1700000000000.png.pending   ◄── encode PNG here
//!                          │
//!                          ▼ rename (atomic on the same filesystem)
//! <pictures>/<album>/QR_1700000000000.png           ◄── visible to gallery
//! ```
//!
//! Other apps indexing the pictures directory must never observe a
//! half-written file, so the image is encoded under a `.pending` name and
//! only renamed into place once fully written. Any failure removes the
//! partial file.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;
use tracing::{debug, warn};

use qrvault_core::now_millis;

/// Gallery export failures.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Could not create the album directory.
    #[error("Could not create album directory '{path}': {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    /// PNG encoding or writing failed.
    #[error("Could not write image: {0}")]
    Write(#[from] image::ImageError),

    /// The finished file could not be moved into place.
    #[error("Could not finalize image '{path}': {source}")]
    Finalize {
        path: String,
        source: std::io::Error,
    },
}

/// Exports bitmaps into `<pictures_dir>/<album>/`.
#[derive(Debug, Clone)]
pub struct MediaGallery {
    pictures_dir: PathBuf,
    album: String,
}

impl MediaGallery {
    /// Creates a gallery rooted at `pictures_dir`, writing into `album`.
    pub fn new(pictures_dir: impl Into<PathBuf>, album: impl Into<String>) -> Self {
        MediaGallery {
            pictures_dir: pictures_dir.into(),
            album: album.into(),
        }
    }

    /// A fresh timestamp-based display name, e.g. `QR_1700000000000`.
    pub fn default_display_name() -> String {
        format!("QR_{}", now_millis())
    }

    /// Saves `image` as `<album>/<display_name>.png` and returns the final
    /// path.
    ///
    /// Synchronous filesystem I/O; call from `spawn_blocking` when on an
    /// async runtime.
    pub fn save_png(&self, image: &GrayImage, display_name: &str) -> Result<PathBuf, MediaError> {
        let album_dir = self.pictures_dir.join(&self.album);
        fs::create_dir_all(&album_dir).map_err(|source| MediaError::CreateDir {
            path: album_dir.display().to_string(),
            source,
        })?;

        let final_path = album_dir.join(format!("{display_name}.png"));
        let pending_path = album_dir.join(format!("{display_name}.png.pending"));

        if let Err(err) = image.save_with_format(&pending_path, image::ImageFormat::Png) {
            remove_partial(&pending_path);
            return Err(MediaError::Write(err));
        }

        if let Err(source) = fs::rename(&pending_path, &final_path) {
            remove_partial(&pending_path);
            return Err(MediaError::Finalize {
                path: final_path.display().to_string(),
                source,
            });
        }

        debug!(path = %final_path.display(), "image exported to gallery");
        Ok(final_path)
    }
}

fn remove_partial(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "could not remove partial file");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
