//! # Scan Worker
//!
//! Runs a [`ScanSession`] on a dedicated OS thread and exposes an async
//! handle to it.
//!
//! ## Why a dedicated thread
//! Frame decoding is CPU-bound and arrives at camera rate. Running it on the
//! async runtime would starve other tasks; a single decode thread with a
//! bounded hand-off keeps the runtime responsive and gives natural
//! back-pressure (the producer awaits each frame's outcome before submitting
//! the next one, so frames are processed strictly in arrival order and the
//! queue can never grow unbounded).
//!
//! ```text
//!  async caller                           decode thread
//!  ────────────                           ─────────────
//!  analyze(frame) ── mpsc ──────────────► session.process_frame(frame)
//!        │                                        │
//!        └──────── oneshot (outcome) ◄────────────┘
//! ```

use image::GrayImage;
use std::sync::mpsc;
use std::thread;
use tokio::sync::oneshot;
use tracing::debug;

use crate::decode::FrameDecoder;
use crate::error::ScanError;
use crate::session::{FrameOutcome, ScanSession};

enum Msg {
    Frame(GrayImage, oneshot::Sender<FrameOutcome>),
    Resume,
    Pause,
    Shutdown,
}

/// Async handle to a running scan worker.
///
/// Dropping the handle without calling [`ScanHandle::shutdown`] also stops
/// the worker: the inbox disconnects and the thread exits, but nothing joins
/// it. Prefer an explicit shutdown.
pub struct ScanHandle {
    tx: mpsc::Sender<Msg>,
    thread: Option<thread::JoinHandle<()>>,
}

/// Spawns the decode thread for `decoder` and returns its handle.
pub fn spawn<D: FrameDecoder + 'static>(decoder: D) -> ScanHandle {
    let (tx, rx) = mpsc::channel::<Msg>();

    let thread = thread::spawn(move || {
        let mut session = ScanSession::new(decoder);
        while let Ok(msg) = rx.recv() {
            match msg {
                Msg::Frame(frame, reply) => {
                    let outcome = session.process_frame(&frame);
                    // A dropped receiver means the caller gave up on this
                    // frame; the session state change still holds.
                    let _ = reply.send(outcome);
                }
                Msg::Resume => session.resume(),
                Msg::Pause => session.pause(),
                Msg::Shutdown => break,
            }
        }
        debug!("scan worker stopped");
    });

    ScanHandle {
        tx,
        thread: Some(thread),
    }
}

impl ScanHandle {
    /// Submits one frame and awaits its outcome.
    ///
    /// The returned future completes only after the worker has fully
    /// processed (or skipped) the frame, which is what lets a camera loop
    /// release each frame buffer safely.
    pub async fn analyze(&self, frame: GrayImage) -> Result<FrameOutcome, ScanError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Msg::Frame(frame, reply_tx))
            .map_err(|_| ScanError::WorkerGone)?;
        reply_rx.await.map_err(|_| ScanError::WorkerGone)
    }

    /// Re-arms the session (after a decode or an explicit pause).
    pub fn resume(&self) -> Result<(), ScanError> {
        self.tx.send(Msg::Resume).map_err(|_| ScanError::WorkerGone)
    }

    /// Pauses the session; queued and future frames are skipped.
    pub fn pause(&self) -> Result<(), ScanError> {
        self.tx.send(Msg::Pause).map_err(|_| ScanError::WorkerGone)
    }

    /// Stops the worker and joins its thread.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::RqrrDecoder;
    use crate::encode::QrEncoder;

    #[tokio::test]
    async fn test_worker_decodes_then_skips_until_resume() {
        let handle = spawn(RqrrDecoder);
        let frame = QrEncoder::default().encode("ACME-123").unwrap();

        let outcome = handle.analyze(frame.clone()).await.unwrap();
        assert!(matches!(outcome, FrameOutcome::Decoded(s) if s.value == "ACME-123"));

        // Auto-paused: the same frame is now skipped
        assert!(matches!(
            handle.analyze(frame.clone()).await.unwrap(),
            FrameOutcome::Skipped
        ));

        handle.resume().unwrap();
        assert!(matches!(
            handle.analyze(frame).await.unwrap(),
            FrameOutcome::Decoded(_)
        ));

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_worker_explicit_pause() {
        let handle = spawn(RqrrDecoder);
        handle.pause().unwrap();

        let frame = QrEncoder::default().encode("hello").unwrap();
        assert!(matches!(
            handle.analyze(frame).await.unwrap(),
            FrameOutcome::Skipped
        ));

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_shutdown_kills_subsequent_calls() {
        let handle = spawn(RqrrDecoder);
        let tx = handle.tx.clone();
        handle.shutdown();

        // The thread is gone; a cloned sender still delivers into a
        // disconnected channel only until the receiver drops.
        let (reply_tx, reply_rx) = oneshot::channel();
        let send_failed = tx
            .send(Msg::Frame(
                GrayImage::from_pixel(8, 8, image::Luma([255u8])),
                reply_tx,
            ))
            .is_err();
        assert!(send_failed || reply_rx.await.is_err());
    }
}
