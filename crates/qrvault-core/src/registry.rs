//! # Code Type Registry
//!
//! The closed catalog of recognized content kinds.
//!
//! Each entry carries a display name, an icon name, an optional content
//! prefix, an optional format hint and a flag marking whether it needs a
//! multi-field form. The catalog is static and immutable after startup.
//!
//! ## Formatting Rule
//! ```text
//! format_data(input)
//!      │
//!      ├── input already starts with a recognized scheme
//!      │   (case-insensitive)                      ──► input unchanged
//!      │
//!      ├── type has no prefix                      ──► input unchanged
//!      │
//!      └── otherwise                               ──► prefix + input
//! ```
//! This is a lookup/formatting table, not a parser: it never fails and never
//! checks that the result is semantically valid for its type beyond the
//! scheme test above.

use serde::{Deserialize, Serialize};

/// Schemes that mark user input as already structured.
///
/// When input starts with one of these (case-insensitive), `format_data`
/// returns it unchanged instead of prepending the type's prefix.
pub const RECOGNIZED_SCHEMES: &[&str] = &[
    "http://", "https://", "ftp://", "mailto:", "tel:", "smsto:", "geo:", "WIFI:",
];

/// A recognized content kind for generated codes.
///
/// Closed enumeration; variants are ordered the way a type-selection screen
/// lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrCodeType {
    /// Plain text.
    Text,
    /// Web address.
    Url,
    /// WiFi network credentials (`WIFI:S:...;T:...;P:...;;`).
    Wifi,
    /// Bare email address (`mailto:` opens a mail client).
    EmailAddress,
    /// Prefilled email message (`mailto:addr?subject=...&body=...`).
    EmailMessage,
    /// Phone number (`tel:`).
    Phone,
    /// SMS message (`smsto:number:text`).
    Sms,
    /// MMS message (`mmsto:`; device support varies).
    Mms,
    /// Geographic coordinates (`geo:lat,lon`).
    Geolocation,
    /// Calendar event (`BEGIN:VEVENT...`).
    CalendarEvent,
    /// Contact card, vCard flavor.
    ContactVcard,
    /// Contact card, MeCard flavor (simpler alternative to vCard).
    ContactMecard,
    /// App store listing link.
    AppStoreLink,
    /// Deep link into a specific app screen.
    DeepLink,
    /// International Standard Book Number.
    Isbn,
    /// EAN/UPC product code.
    ProductCode,
    /// Cryptocurrency address.
    CryptoAddress,
    /// EPC QR code for SEPA credit transfers.
    EpcPayment,
    /// TOTP authenticator secret (`otpauth://totp/...`).
    TotpAuthenticator,
    /// Social media profile link.
    SocialProfile,
}

impl QrCodeType {
    /// Every catalog entry, in presentation order.
    pub const ALL: &'static [QrCodeType] = &[
        QrCodeType::Text,
        QrCodeType::Url,
        QrCodeType::Wifi,
        QrCodeType::EmailAddress,
        QrCodeType::EmailMessage,
        QrCodeType::Phone,
        QrCodeType::Sms,
        QrCodeType::Mms,
        QrCodeType::Geolocation,
        QrCodeType::CalendarEvent,
        QrCodeType::ContactVcard,
        QrCodeType::ContactMecard,
        QrCodeType::AppStoreLink,
        QrCodeType::DeepLink,
        QrCodeType::Isbn,
        QrCodeType::ProductCode,
        QrCodeType::CryptoAddress,
        QrCodeType::EpcPayment,
        QrCodeType::TotpAuthenticator,
        QrCodeType::SocialProfile,
    ];

    /// Human-readable name shown in the type list.
    pub const fn display_name(&self) -> &'static str {
        match self {
            QrCodeType::Text => "Plain text",
            QrCodeType::Url => "Website URL",
            QrCodeType::Wifi => "WiFi network",
            QrCodeType::EmailAddress => "Email address",
            QrCodeType::EmailMessage => "Email message",
            QrCodeType::Phone => "Phone number",
            QrCodeType::Sms => "SMS message",
            QrCodeType::Mms => "MMS message",
            QrCodeType::Geolocation => "Location",
            QrCodeType::CalendarEvent => "Calendar event",
            QrCodeType::ContactVcard => "Contact (vCard)",
            QrCodeType::ContactMecard => "Contact (MeCard)",
            QrCodeType::AppStoreLink => "App store link",
            QrCodeType::DeepLink => "App deep link",
            QrCodeType::Isbn => "ISBN",
            QrCodeType::ProductCode => "Product code",
            QrCodeType::CryptoAddress => "Crypto address",
            QrCodeType::EpcPayment => "SEPA payment",
            QrCodeType::TotpAuthenticator => "2FA setup (TOTP)",
            QrCodeType::SocialProfile => "Social profile",
        }
    }

    /// Freedesktop-style icon name for the type list.
    pub const fn icon_name(&self) -> &'static str {
        match self {
            QrCodeType::Text => "text-fields",
            QrCodeType::Url => "link",
            QrCodeType::Wifi => "network-wireless",
            QrCodeType::EmailAddress => "mail-unread",
            QrCodeType::EmailMessage => "mail-message-new",
            QrCodeType::Phone => "phone",
            QrCodeType::Sms => "message",
            QrCodeType::Mms => "mail-send",
            QrCodeType::Geolocation => "mark-location",
            QrCodeType::CalendarEvent => "x-office-calendar",
            QrCodeType::ContactVcard => "avatar-default",
            QrCodeType::ContactMecard => "contact-new",
            QrCodeType::AppStoreLink => "system-software-install",
            QrCodeType::DeepLink => "application-x-executable",
            QrCodeType::Isbn => "accessories-dictionary",
            QrCodeType::ProductCode => "view-barcode",
            QrCodeType::CryptoAddress => "wallet",
            QrCodeType::EpcPayment => "credit-card",
            QrCodeType::TotpAuthenticator => "dialog-password",
            QrCodeType::SocialProfile => "emblem-shared",
        }
    }

    /// Fixed content prefix, when the type has one.
    pub const fn data_prefix(&self) -> Option<&'static str> {
        match self {
            QrCodeType::Url => Some("https://"),
            QrCodeType::Wifi => Some("WIFI:"),
            QrCodeType::EmailAddress | QrCodeType::EmailMessage => Some("mailto:"),
            QrCodeType::Phone => Some("tel:"),
            QrCodeType::Sms => Some("smsto:"),
            QrCodeType::Mms => Some("mmsto:"),
            QrCodeType::Geolocation => Some("geo:"),
            QrCodeType::CalendarEvent => Some("BEGIN:VEVENT\n"),
            QrCodeType::ContactVcard => Some("BEGIN:VCARD\nVERSION:3.0\n"),
            QrCodeType::ContactMecard => Some("MECARD:"),
            // Not a standard URI scheme, but it tags the payload's intent.
            QrCodeType::Isbn => Some("ISBN:"),
            QrCodeType::TotpAuthenticator => Some("otpauth://totp/"),
            QrCodeType::Text
            | QrCodeType::AppStoreLink
            | QrCodeType::DeepLink
            | QrCodeType::ProductCode
            | QrCodeType::CryptoAddress
            | QrCodeType::EpcPayment
            | QrCodeType::SocialProfile => None,
        }
    }

    /// Short example of the expected content shape, for form placeholders.
    pub const fn format_hint(&self) -> Option<&'static str> {
        match self {
            QrCodeType::Text => Some("Any text"),
            QrCodeType::Url => Some("example.com or https://example.com"),
            QrCodeType::Wifi => Some("WIFI:S:MyNetwork;T:WPA;P:password;;"),
            QrCodeType::EmailAddress => Some("name@example.com"),
            QrCodeType::EmailMessage => Some("mailto:name@example.com?subject=Hi&body=..."),
            QrCodeType::Phone => Some("+15551234567"),
            QrCodeType::Sms => Some("smsto:+15551234567:Message text"),
            QrCodeType::Mms => Some("mmsto:+15551234567:Subject:Body"),
            QrCodeType::Geolocation => Some("geo:48.1486,17.1077"),
            QrCodeType::CalendarEvent => Some("BEGIN:VEVENT ... END:VEVENT"),
            QrCodeType::ContactVcard => Some("BEGIN:VCARD ... END:VCARD"),
            QrCodeType::ContactMecard => Some("MECARD:N:Doe,Jane;TEL:...;EMAIL:...;;"),
            QrCodeType::AppStoreLink => Some("market://details?id=com.example.app"),
            QrCodeType::DeepLink => Some("myapp://path/to/content"),
            QrCodeType::Isbn => Some("ISBN:9780000000000"),
            QrCodeType::ProductCode => Some("EAN-13 / UPC-A digits"),
            QrCodeType::CryptoAddress => Some("bitcoin:address?amount=0.1"),
            QrCodeType::EpcPayment => Some("BCD\\n002\\n..."),
            QrCodeType::TotpAuthenticator => Some("otpauth://totp/Label?secret=...&issuer=..."),
            QrCodeType::SocialProfile => Some("https://social.example/@profile"),
        }
    }

    /// Whether the type needs a dedicated multi-field form.
    ///
    /// Types with this flag cannot be generated from a single text field;
    /// they stay invalid in the generator until their form is implemented.
    pub const fn requires_complex_input(&self) -> bool {
        matches!(
            self,
            QrCodeType::Wifi
                | QrCodeType::EmailMessage
                | QrCodeType::Sms
                | QrCodeType::Mms
                | QrCodeType::Geolocation
                | QrCodeType::CalendarEvent
                | QrCodeType::ContactVcard
                | QrCodeType::ContactMecard
                | QrCodeType::CryptoAddress
                | QrCodeType::EpcPayment
                | QrCodeType::TotpAuthenticator
        )
    }

    /// Prefix used to pre-fill the form input, or "" for prefix-less types.
    pub fn prefilled_input(&self) -> &'static str {
        self.data_prefix().unwrap_or("")
    }

    /// Gives raw user input the structure this type expects.
    ///
    /// Returns the input unchanged when it already starts with any
    /// recognized scheme (case-insensitive), or when this type has no
    /// prefix; otherwise returns `prefix + input`. Always succeeds.
    pub fn format_data(&self, user_input: &str) -> String {
        let Some(prefix) = self.data_prefix() else {
            return user_input.to_string();
        };

        if starts_with_recognized_scheme(user_input) {
            return user_input.to_string();
        }

        format!("{prefix}{user_input}")
    }
}

/// True when the input starts with any entry of [`RECOGNIZED_SCHEMES`],
/// compared case-insensitively.
pub fn starts_with_recognized_scheme(input: &str) -> bool {
    let lowered = input.to_lowercase();
    RECOGNIZED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(&scheme.to_lowercase()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_data_prepends_prefix() {
        assert_eq!(
            QrCodeType::EmailAddress.format_data("name@example.com"),
            "mailto:name@example.com"
        );
        assert_eq!(QrCodeType::Phone.format_data("+421900123456"), "tel:+421900123456");
        assert_eq!(QrCodeType::Url.format_data("example.com"), "https://example.com");
    }

    #[test]
    fn test_format_data_keeps_recognized_schemes() {
        // Same scheme as the type's own prefix
        assert_eq!(
            QrCodeType::EmailAddress.format_data("mailto:name@example.com"),
            "mailto:name@example.com"
        );
        // A different recognized scheme still suppresses the prefix
        assert_eq!(
            QrCodeType::Phone.format_data("smsto:+421900123456"),
            "smsto:+421900123456"
        );
        // Case-insensitive match
        assert_eq!(
            QrCodeType::Url.format_data("HTTPS://EXAMPLE.COM"),
            "HTTPS://EXAMPLE.COM"
        );
        assert_eq!(QrCodeType::Wifi.format_data("wifi:S:net;;"), "wifi:S:net;;");
    }

    #[test]
    fn test_format_data_without_prefix_is_identity() {
        assert_eq!(QrCodeType::Text.format_data("hello"), "hello");
        assert_eq!(QrCodeType::ProductCode.format_data("5449000000996"), "5449000000996");
    }

    #[test]
    fn test_format_data_for_all_prefixed_types() {
        for ty in QrCodeType::ALL {
            let Some(prefix) = ty.data_prefix() else { continue };

            // Unstructured input gets the prefix
            assert_eq!(ty.format_data("payload"), format!("{prefix}payload"));

            // Already-structured input passes through untouched
            for scheme in RECOGNIZED_SCHEMES {
                let input = format!("{scheme}payload");
                assert_eq!(ty.format_data(&input), input, "type {ty:?} scheme {scheme}");
            }
        }
    }

    #[test]
    fn test_catalog_is_complete_and_consistent() {
        assert_eq!(QrCodeType::ALL.len(), 20);

        for ty in QrCodeType::ALL {
            assert!(!ty.display_name().is_empty());
            assert!(!ty.icon_name().is_empty());
            assert_eq!(ty.prefilled_input(), ty.data_prefix().unwrap_or(""));
        }
    }

    #[test]
    fn test_simple_types_do_not_require_complex_input() {
        assert!(!QrCodeType::Text.requires_complex_input());
        assert!(!QrCodeType::Url.requires_complex_input());
        assert!(QrCodeType::Wifi.requires_complex_input());
        assert!(QrCodeType::TotpAuthenticator.requires_complex_input());
    }
}
