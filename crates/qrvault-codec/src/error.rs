//! Error types for the encode/decode pipeline.

use thiserror::Error;

/// QR symbol construction failures.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Nothing to encode.
    #[error("Content to encode is empty")]
    EmptyContent,

    /// The content does not fit in any QR version at the chosen error
    /// correction level, or contains data the symbology cannot carry.
    #[error("QR construction failed: {0}")]
    Construction(#[from] qrcode::types::QrError),
}

/// Frame decode failures.
///
/// Absence of a code in a frame is NOT an error (see `FrameOutcome::NoCode`);
/// these variants cover frames where a grid was found but could not be read.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A candidate grid was located but its payload failed to decode.
    #[error("QR payload decode failed: {0}")]
    Payload(#[from] rqrr::DeQRError),
}

/// Scan worker communication failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The decode thread has shut down or panicked; the handle is dead.
    #[error("Scan worker is no longer running")]
    WorkerGone,
}
