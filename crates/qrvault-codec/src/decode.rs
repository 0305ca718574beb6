//! # Frame Decoding
//!
//! Locates and reads QR codes in grayscale camera frames, and classifies
//! decoded payloads into coarse content kinds.
//!
//! ## Kind Classification
//! The decoder reports a payload kind as a small integer so history rows can
//! show a matching icon without re-parsing the content. The constants follow
//! the barcode value types of common mobile scanning SDKs, which is also what
//! the history table's `type` column stores.

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::DecodeError;

// =============================================================================
// Payload Kinds
// =============================================================================

/// Contact card (vCard or MeCard).
pub const KIND_CONTACT: i32 = 1;
/// Email address or message.
pub const KIND_EMAIL: i32 = 2;
/// Book number.
pub const KIND_ISBN: i32 = 3;
/// Phone number.
pub const KIND_PHONE: i32 = 4;
/// Retail product code (EAN/UPC digits).
pub const KIND_PRODUCT: i32 = 5;
/// SMS message.
pub const KIND_SMS: i32 = 6;
/// Plain text (the fallback).
pub const KIND_TEXT: i32 = 7;
/// Web address.
pub const KIND_URL: i32 = 8;
/// WiFi credentials.
pub const KIND_WIFI: i32 = 9;
/// Geographic coordinates.
pub const KIND_GEO: i32 = 10;
/// Calendar event.
pub const KIND_CALENDAR: i32 = 11;

/// Classifies a decoded payload into one of the `KIND_*` constants.
///
/// Pure prefix/shape heuristics; anything unrecognized is [`KIND_TEXT`].
pub fn classify_value(value: &str) -> i32 {
    let lowered = value.to_lowercase();

    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        KIND_URL
    } else if lowered.starts_with("wifi:") {
        KIND_WIFI
    } else if lowered.starts_with("mailto:") || lowered.starts_with("matmsg:") {
        KIND_EMAIL
    } else if lowered.starts_with("tel:") {
        KIND_PHONE
    } else if lowered.starts_with("smsto:") || lowered.starts_with("sms:") {
        KIND_SMS
    } else if lowered.starts_with("geo:") {
        KIND_GEO
    } else if lowered.starts_with("begin:vevent") || lowered.starts_with("begin:vcalendar") {
        KIND_CALENDAR
    } else if lowered.starts_with("begin:vcard") || lowered.starts_with("mecard:") {
        KIND_CONTACT
    } else if lowered.starts_with("isbn:") {
        KIND_ISBN
    } else if matches!(value.len(), 8 | 12 | 13) && value.bytes().all(|b| b.is_ascii_digit()) {
        KIND_PRODUCT
    } else {
        KIND_TEXT
    }
}

/// Human-readable label for a `KIND_*` constant.
pub fn kind_label(kind: i32) -> &'static str {
    match kind {
        KIND_CONTACT => "Contact",
        KIND_EMAIL => "Email",
        KIND_ISBN => "ISBN",
        KIND_PHONE => "Phone",
        KIND_PRODUCT => "Product",
        KIND_SMS => "SMS",
        KIND_URL => "URL",
        KIND_WIFI => "WiFi",
        KIND_GEO => "Location",
        KIND_CALENDAR => "Calendar",
        _ => "Text",
    }
}

// =============================================================================
// Decoded Symbol
// =============================================================================

/// One symbol successfully read out of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedSymbol {
    /// Raw decoded payload.
    pub value: String,

    /// One of the `KIND_*` constants.
    pub kind: i32,
}

impl DecodedSymbol {
    /// Builds a symbol from a raw payload, classifying its kind.
    pub fn from_value(value: String) -> Self {
        let kind = classify_value(&value);
        Self { value, kind }
    }
}

// =============================================================================
// Frame Decoder
// =============================================================================

/// Reads symbols out of a single grayscale frame.
///
/// Implementations must be cheap to call per-frame; the scan worker invokes
/// this on every frame it accepts. `Send` so the worker can own one on its
/// decode thread.
pub trait FrameDecoder: Send {
    /// Returns every symbol found in `frame`, possibly none.
    ///
    /// An empty result is the normal "nothing in view" case; errors are
    /// reserved for frames where a grid was found but unreadable.
    fn decode(&self, frame: &GrayImage) -> Result<Vec<DecodedSymbol>, DecodeError>;
}

/// The production decoder, backed by `rqrr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl FrameDecoder for RqrrDecoder {
    fn decode(&self, frame: &GrayImage) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let mut prepared = rqrr::PreparedImage::prepare(frame.clone());
        let grids = prepared.detect_grids();
        trace!(grids = grids.len(), "frame grid detection");

        let mut symbols = Vec::with_capacity(grids.len());
        for grid in grids {
            let (_meta, value) = grid.decode()?;
            debug!(kind = classify_value(&value), "decoded symbol");
            symbols.push(DecodedSymbol::from_value(value));
        }
        Ok(symbols)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
