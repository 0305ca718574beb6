//! # QR Encoding
//!
//! Turns formatted text into a grayscale QR bitmap.
//!
//! ## Pipeline
//! ```text
//! "https://example.com"
//!        │
//!        ▼  QrCode::with_error_correction_level (EC level L)
//!   QR symbol (smallest version that fits)
//!        │
//!        ▼  render: quiet zone + scale up to at least size × size
//!   GrayImage (black modules on white)
//! ```
//!
//! Encoding is CPU-bound and synchronous; callers that must not block an
//! async runtime wrap it in `spawn_blocking`.

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::error::EncodeError;

/// Default edge length of generated bitmaps, in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Text-to-bitmap QR encoder.
///
/// Cheap to construct and `Copy`; hold one per configuration rather than
/// per call.
///
/// ## Example
/// ```
/// use qrvault_codec::encode::QrEncoder;
///
/// let encoder = QrEncoder::default();
/// let bitmap = encoder.encode("https://example.com").unwrap();
/// assert!(bitmap.width() >= 256 && bitmap.height() >= 256);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    /// Minimum edge length of the output bitmap, in pixels.
    size: u32,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl QrEncoder {
    /// Creates an encoder producing bitmaps at least `size` pixels square.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// The configured minimum edge length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Encodes `content` into a grayscale QR bitmap.
    ///
    /// Uses error correction level L (highest data density) and always
    /// renders a quiet zone. The output is at least `size × size`; it may
    /// be slightly larger so that every module maps to a whole number of
    /// pixels.
    ///
    /// ## Errors
    /// - [`EncodeError::EmptyContent`] when `content` is empty
    /// - [`EncodeError::Construction`] when the payload does not fit
    pub fn encode(&self, content: &str) -> Result<GrayImage, EncodeError> {
        if content.is_empty() {
            return Err(EncodeError::EmptyContent);
        }

        let code = QrCode::with_error_correction_level(content, EcLevel::L)?;
        let bitmap = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .min_dimensions(self.size, self.size)
            .build();

        debug!(
            content_len = content.len(),
            width = bitmap.width(),
            height = bitmap.height(),
            "encoded qr bitmap"
        );
        Ok(bitmap)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_meets_minimum_size() {
        let encoder = QrEncoder::default();
        let bitmap = encoder.encode("https://example.com").unwrap();
        assert!(bitmap.width() >= DEFAULT_SIZE);
        assert!(bitmap.height() >= DEFAULT_SIZE);
    }

    #[test]
    fn test_encode_custom_size() {
        let encoder = QrEncoder::new(128);
        let bitmap = encoder.encode("hello").unwrap();
        assert!(bitmap.width() >= 128);
    }

    #[test]
    fn test_encode_rejects_empty_content() {
        let encoder = QrEncoder::default();
        assert!(matches!(
            encoder.encode(""),
            Err(EncodeError::EmptyContent)
        ));
    }

    #[test]
    fn test_encode_contains_both_tones() {
        // A valid symbol has black modules on a white quiet zone.
        let bitmap = QrEncoder::default().encode("ACME-123").unwrap();
        let has_black = bitmap.pixels().any(|p| p.0[0] == 0);
        let has_white = bitmap.pixels().any(|p| p.0[0] == 255);
        assert!(has_black && has_white);
    }

    #[test]
    fn test_encode_oversized_payload_fails() {
        // QR caps out around 3KB of 8-bit data; far beyond that must error,
        // not panic.
        let huge = "x".repeat(10_000);
        assert!(matches!(
            QrEncoder::default().encode(&huge),
            Err(EncodeError::Construction(_))
        ));
    }
}
