//! # Scan Session
//!
//! The frame-by-frame scan state machine.
//!
//! ## States
//! ```text
//!             ┌──────────────────── resume() ───────────────────┐
//!             ▼                                                 │
//!         ┌────────┐   first symbol decoded in a frame     ┌────┴────┐
//!         │ Active │ ─────────────────────────────────────►│ Paused  │
//!         └────────┘          (auto-pause)                 └─────────┘
//!             │                                                 ▲
//!             └───────────────────── pause() ───────────────────┘
//! ```
//!
//! While `Paused`, frames are dropped immediately (`FrameOutcome::Skipped`)
//! without running the decoder. The first symbol in a frame wins; a frame
//! with several codes reports exactly one and pauses before the rest are
//! looked at, so one frame can never produce two decode outcomes.

use image::GrayImage;
use tracing::{debug, warn};

use crate::decode::{DecodedSymbol, FrameDecoder};

/// Whether the session is consuming frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Frames are decoded as they arrive.
    Active,
    /// Frames are dropped unread until `resume()`.
    Paused,
}

/// What a single frame produced.
#[derive(Debug)]
pub enum FrameOutcome {
    /// A symbol was read; the session is now paused.
    Decoded(DecodedSymbol),
    /// The frame was examined and held no readable code.
    NoCode,
    /// The session was paused; the frame was dropped unread.
    Skipped,
    /// The decoder failed on this frame. The session stays active.
    Failed(crate::error::DecodeError),
}

/// Pause-on-decode scan session over a [`FrameDecoder`].
///
/// Synchronous by design; the async boundary lives in the worker that owns
/// the session (see `worker`).
pub struct ScanSession<D: FrameDecoder> {
    decoder: D,
    state: ScanState,
}

impl<D: FrameDecoder> ScanSession<D> {
    /// Creates an active session over `decoder`.
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            state: ScanState::Active,
        }
    }

    /// Current session state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Re-arms the session after a decode (or an explicit pause).
    pub fn resume(&mut self) {
        self.state = ScanState::Active;
    }

    /// Stops consuming frames until `resume()`.
    pub fn pause(&mut self) {
        self.state = ScanState::Paused;
    }

    /// Feeds one frame through the state machine.
    ///
    /// Ordering guarantee: the state transition to `Paused` happens before
    /// this returns `Decoded`, so a caller acting on the outcome observes a
    /// session that is already closed to further frames.
    pub fn process_frame(&mut self, frame: &GrayImage) -> FrameOutcome {
        if self.state == ScanState::Paused {
            return FrameOutcome::Skipped;
        }

        match self.decoder.decode(frame) {
            Ok(symbols) => match symbols.into_iter().next() {
                Some(symbol) => {
                    self.state = ScanState::Paused;
                    debug!(kind = symbol.kind, "scan hit, session paused");
                    FrameOutcome::Decoded(symbol)
                }
                None => FrameOutcome::NoCode,
            },
            Err(err) => {
                // A bad frame is routine (motion blur, partial view);
                // keep scanning.
                warn!(error = %err, "frame decode failed");
                FrameOutcome::Failed(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
