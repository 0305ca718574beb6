//! # qrvault-codec: Encode / Decode / Scan Pipeline
//!
//! Everything that turns text into pixels or pixels into text.
//!
//! ## Data Flow
//! ```text
//!  GENERATE                              SCAN
//!  ────────                              ────
//!  formatted text                        camera frame (GrayImage)
//!       │                                     │
//!       ▼  encode::QrEncoder                  ▼  worker::ScanHandle::analyze
//!  GrayImage bitmap                      decode thread
//!                                             │  session::ScanSession
//!                                             │  decode::RqrrDecoder
//!                                             ▼
//!                                        FrameOutcome
//!                                        (Decoded / NoCode / Skipped / Failed)
//! ```
//!
//! The encoder and decoder are synchronous and CPU-bound. The scan worker
//! wraps the session in a dedicated OS thread so async callers can stream
//! frames without blocking the runtime.

pub mod decode;
pub mod encode;
pub mod error;
pub mod session;
pub mod worker;

pub use decode::{
    classify_value, kind_label, DecodedSymbol, FrameDecoder, RqrrDecoder, KIND_CALENDAR,
    KIND_CONTACT, KIND_EMAIL, KIND_GEO, KIND_ISBN, KIND_PHONE, KIND_PRODUCT, KIND_SMS, KIND_TEXT,
    KIND_URL, KIND_WIFI,
};
pub use encode::QrEncoder;
pub use error::{DecodeError, EncodeError, ScanError};
pub use session::{FrameOutcome, ScanSession, ScanState};
pub use worker::{spawn, ScanHandle};
