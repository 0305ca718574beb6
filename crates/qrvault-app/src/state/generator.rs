//! # Generator State
//!
//! The code generation workflow, screen by screen.
//!
//! ## Workflow
//! ```text
//! ┌────────────────┐ select_type  ┌────────────┐  generate   ┌────────────┐
//! │ TypeSelection  │─────────────►│ FormInput  │────────────►│ QrDisplay  │
//! │ (catalog list) │              │ (per-type  │             │ (bitmap +  │
//! │                │◄─────────────│  form)     │◄────────────│  actions)  │
//! └────────────────┘    back      └────────────┘    back     └────────────┘
//!        │
//!        └── selecting a type without a form keeps the screen and
//!            surfaces "not supported yet" as a user message
//! ```
//!
//! ## Display Actions
//! - `save_to_favorites` - upsert the content with the favorite flag forced on
//! - `toggle_favorite`   - re-read the stored row and flip its flag
//! - `download_to_gallery` - export the bitmap as PNG, then record its path
//!
//! All three go through the content-keyed upsert in the database layer, so
//! repeating any of them never duplicates rows.

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::media::MediaGallery;
use qrvault_codec::QrEncoder;
use qrvault_core::{validate_text, validate_url, CoreError, QrCodeType};
use qrvault_db::Database;

/// Which generator screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorScreen {
    /// Catalog of code types.
    TypeSelection,
    /// Input form for the selected type.
    FormInput,
    /// The generated bitmap with save/export actions.
    QrDisplay,
}

/// Per-type form data.
///
/// Only single-field forms exist so far; types flagged
/// `requires_complex_input` have no variant here and cannot leave the
/// type-selection screen.
#[derive(Debug, Clone)]
pub enum FormData {
    /// Free text form.
    Text { input: String, error: Option<String> },
    /// Web URL form (scheme-tolerant validation).
    Url { input: String, error: Option<String> },
}

impl FormData {
    fn input(&self) -> &str {
        match self {
            FormData::Text { input, .. } | FormData::Url { input, .. } => input,
        }
    }

    fn error(&self) -> Option<&str> {
        match self {
            FormData::Text { error, .. } | FormData::Url { error, .. } => error.as_deref(),
        }
    }
}

/// The generator workflow state machine.
///
/// One instance per app; the UI shell serializes access (the methods take
/// `&mut self`).
pub struct GeneratorState {
    db: Database,
    encoder: QrEncoder,
    gallery: MediaGallery,

    screen: GeneratorScreen,
    selected: Option<QrCodeType>,
    form: Option<FormData>,

    /// Present only on the display screen.
    bitmap: Option<GrayImage>,
    /// The exact content that was encoded (post-formatting).
    content: Option<String>,
    is_favorite: bool,

    /// True while the encoder runs on the blocking pool; the form shows a
    /// spinner and disables the generate button.
    is_generating: bool,

    /// One-shot message for the UI (snackbar/toast); cleared by
    /// `user_message_shown`.
    user_message: Option<String>,
}

impl GeneratorState {
    /// Creates the workflow at the type-selection screen.
    pub fn new(db: Database, encoder: QrEncoder, gallery: MediaGallery) -> Self {
        GeneratorState {
            db,
            encoder,
            gallery,
            screen: GeneratorScreen::TypeSelection,
            selected: None,
            form: None,
            bitmap: None,
            content: None,
            is_favorite: false,
            is_generating: false,
            user_message: None,
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors for the UI shell
    // -------------------------------------------------------------------------

    pub fn screen(&self) -> GeneratorScreen {
        self.screen
    }

    pub fn selected_type(&self) -> Option<QrCodeType> {
        self.selected
    }

    /// Current form input, if a form is showing.
    pub fn form_input(&self) -> Option<&str> {
        self.form.as_ref().map(FormData::input)
    }

    /// Current form validation error, if any.
    pub fn form_error(&self) -> Option<&str> {
        self.form.as_ref().and_then(FormData::error)
    }

    /// Whether the current input would generate.
    pub fn is_input_valid(&self) -> bool {
        matches!(&self.form, Some(form) if form.error().is_none() && !form.input().trim().is_empty())
    }

    /// The generated bitmap (display screen only).
    pub fn bitmap(&self) -> Option<&GrayImage> {
        self.bitmap.as_ref()
    }

    /// The encoded content (display screen only).
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Whether an encode is in flight.
    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// Acknowledges the one-shot message (the UI showed it).
    pub fn user_message_shown(&mut self) {
        self.user_message = None;
    }

    // -------------------------------------------------------------------------
    // Type selection
    // -------------------------------------------------------------------------

    /// Picks a type from the catalog.
    ///
    /// Types without an implemented form stay on the selection screen and
    /// surface a "not supported yet" message instead.
    pub fn select_type(&mut self, ty: QrCodeType) {
        if ty.requires_complex_input() {
            let err = CoreError::TypeNotSupported(ty.display_name());
            info!(ty = ?ty, "unsupported type selected");
            self.user_message = Some(err.to_string());
            return;
        }

        let prefilled = ty.prefilled_input().to_string();
        self.form = Some(match ty {
            QrCodeType::Url => FormData::Url {
                input: prefilled,
                error: None,
            },
            _ => FormData::Text {
                input: prefilled,
                error: None,
            },
        });
        self.selected = Some(ty);
        self.screen = GeneratorScreen::FormInput;
        self.revalidate();
    }

    // -------------------------------------------------------------------------
    // Form input
    // -------------------------------------------------------------------------

    /// Applies a keystroke's worth of new input and revalidates.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.form {
            Some(FormData::Text { input, .. }) | Some(FormData::Url { input, .. }) => {
                *input = text;
            }
            None => return,
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let Some(form) = &mut self.form else { return };
        match form {
            FormData::Text { input, error } => {
                *error = validate_text(input).err().map(|e| e.to_string());
            }
            FormData::Url { input, error } => {
                *error = validate_url(input).err().map(|e| e.to_string());
            }
        }
    }

    /// Generates the bitmap from the current form and moves to the display
    /// screen.
    ///
    /// Encoding is CPU-bound and runs on the blocking pool.
    pub async fn generate(&mut self) -> Result<(), AppError> {
        let (ty, form) = match (self.selected, &self.form) {
            (Some(ty), Some(form)) => (ty, form),
            _ => return Err(AppError::validation("No code type selected")),
        };
        if let Some(error) = form.error() {
            return Err(AppError::validation(error));
        }

        let content = ty.format_data(form.input().trim());
        if content.is_empty() {
            return Err(CoreError::EmptyContent.into());
        }

        let encoder = self.encoder;
        let encode_content = content.clone();
        self.is_generating = true;
        let encoded = tokio::task::spawn_blocking(move || encoder.encode(&encode_content)).await;
        self.is_generating = false;
        let bitmap = encoded.map_err(|e| AppError::internal(e.to_string()))??;

        // The star on the display screen reflects what is already stored
        let stored = self.db.generated().find_by_content(&content).await?;
        self.is_favorite = stored.map(|row| row.is_favorite).unwrap_or(false);

        debug!(ty = ?ty, content_len = content.len(), "code generated");
        self.bitmap = Some(bitmap);
        self.content = Some(content);
        self.screen = GeneratorScreen::QrDisplay;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Display actions
    // -------------------------------------------------------------------------

    /// Stores the displayed code with the favorite flag forced on.
    pub async fn save_to_favorites(&mut self) -> Result<(), AppError> {
        let content = self.displayed_content()?.to_string();

        self.db
            .generated()
            .save_or_update(&content, None, Some(true))
            .await?;

        self.is_favorite = true;
        self.user_message = Some("Saved to favorites".to_string());
        Ok(())
    }

    /// Flips the favorite flag of the displayed code.
    ///
    /// The stored row is re-read first so the flip applies to the current
    /// database state; a code never stored before is inserted as a
    /// favorite.
    pub async fn toggle_favorite(&mut self) -> Result<(), AppError> {
        let content = self.displayed_content()?.to_string();
        let repo = self.db.generated();

        let favorite = match repo.find_by_content(&content).await? {
            Some(row) => {
                repo.set_favorite(row.id, !row.is_favorite).await?;
                !row.is_favorite
            }
            None => {
                repo.save_or_update(&content, None, Some(true)).await?;
                true
            }
        };

        self.is_favorite = favorite;
        Ok(())
    }

    /// Exports the displayed bitmap to the gallery and records its path.
    ///
    /// The store row is created if this content was never saved; its
    /// favorite flag is left as-is.
    pub async fn download_to_gallery(&mut self) -> Result<(), AppError> {
        let content = self.displayed_content()?.to_string();
        let Some(bitmap) = self.bitmap.clone() else {
            return Err(AppError::internal("No bitmap on display screen"));
        };

        let gallery = self.gallery.clone();
        let saved = tokio::task::spawn_blocking(move || {
            gallery.save_png(&bitmap, &MediaGallery::default_display_name())
        })
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

        let path = match saved {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "gallery export failed");
                self.user_message = Some("Could not save image to gallery".to_string());
                return Err(err.into());
            }
        };

        self.db
            .generated()
            .save_or_update(&content, Some(&path.display().to_string()), None)
            .await?;

        self.user_message = Some("Image saved to gallery".to_string());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// One step back in the workflow.
    pub fn back(&mut self) {
        match self.screen {
            GeneratorScreen::QrDisplay => {
                // Keep the form so the user can tweak and regenerate
                self.bitmap = None;
                self.content = None;
                self.is_favorite = false;
                self.screen = GeneratorScreen::FormInput;
            }
            GeneratorScreen::FormInput => {
                self.form = None;
                self.selected = None;
                self.screen = GeneratorScreen::TypeSelection;
            }
            GeneratorScreen::TypeSelection => {}
        }
    }

    fn displayed_content(&self) -> Result<&str, AppError> {
        self.content
            .as_deref()
            .ok_or_else(|| AppError::internal("No code on display screen"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qrvault_db::DbConfig;

    async fn state() -> GeneratorState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let gallery = MediaGallery::new(
            std::env::temp_dir().join(format!("qrvault-gen-{}", qrvault_core::now_millis())),
            "QRVault",
        );
        GeneratorState::new(db, QrEncoder::default(), gallery)
    }

    #[tokio::test]
    async fn test_unsupported_type_stays_on_selection() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Wifi);
        assert_eq!(gen.screen(), GeneratorScreen::TypeSelection);
        assert_eq!(
            gen.user_message(),
            Some("Generating WiFi network codes is not supported yet")
        );

        gen.user_message_shown();
        assert!(gen.user_message().is_none());
    }

    #[tokio::test]
    async fn test_url_form_prefill_and_validation() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Url);
        assert_eq!(gen.screen(), GeneratorScreen::FormInput);
        assert_eq!(gen.form_input(), Some("https://"));
        // Bare prefix has no host yet
        assert!(!gen.is_input_valid());

        gen.input_changed("example.com");
        assert!(gen.is_input_valid());

        gen.input_changed("not a url");
        assert!(!gen.is_input_valid());
        assert!(gen.form_error().is_some());
    }

    #[tokio::test]
    async fn test_generate_shows_display_screen() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Url);
        gen.input_changed("https://example.com");
        gen.generate().await.unwrap();

        assert_eq!(gen.screen(), GeneratorScreen::QrDisplay);
        assert_eq!(gen.content(), Some("https://example.com"));
        let bitmap = gen.bitmap().unwrap();
        assert!(bitmap.width() >= 256);
        assert!(!gen.is_favorite());
    }

    #[tokio::test]
    async fn test_generating_flag_clears_on_success_and_failure() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Text);
        assert!(!gen.is_generating());

        gen.input_changed("hello");
        gen.generate().await.unwrap();
        assert!(!gen.is_generating());

        // A payload too large for any QR version fails the encode; the
        // in-flight flag must still come back down
        gen.back();
        gen.input_changed("x".repeat(10_000));
        assert!(gen.generate().await.is_err());
        assert!(!gen.is_generating());
        assert_eq!(gen.screen(), GeneratorScreen::FormInput);
    }

    #[tokio::test]
    async fn test_generate_formats_schemeless_input() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Url);
        gen.input_changed("example.com");
        gen.generate().await.unwrap();

        assert_eq!(gen.content(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_save_to_favorites_then_toggle() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Text);
        gen.input_changed("hello");
        gen.generate().await.unwrap();

        gen.save_to_favorites().await.unwrap();
        assert!(gen.is_favorite());
        assert_eq!(gen.user_message(), Some("Saved to favorites"));

        // Toggling re-reads the stored row and flips it off
        gen.toggle_favorite().await.unwrap();
        assert!(!gen.is_favorite());

        // Saving twice never duplicates the row
        gen.save_to_favorites().await.unwrap();
        gen.save_to_favorites().await.unwrap();
        let rows = gen.db.generated().list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_on_unsaved_code_inserts_favorite() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Text);
        gen.input_changed("fresh");
        gen.generate().await.unwrap();

        gen.toggle_favorite().await.unwrap();
        assert!(gen.is_favorite());

        let row = gen
            .db
            .generated()
            .find_by_content("fresh")
            .await
            .unwrap()
            .unwrap();
        assert!(row.is_favorite);
    }

    #[tokio::test]
    async fn test_download_records_image_path() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Text);
        gen.input_changed("exported");
        gen.generate().await.unwrap();

        gen.download_to_gallery().await.unwrap();
        assert_eq!(gen.user_message(), Some("Image saved to gallery"));

        let row = gen
            .db
            .generated()
            .find_by_content("exported")
            .await
            .unwrap()
            .unwrap();
        let path = row.image_path.unwrap();
        assert!(path.ends_with(".png"));
        assert!(std::path::Path::new(&path).exists());
        // Download alone does not favorite
        assert!(!row.is_favorite);
    }

    #[tokio::test]
    async fn test_back_navigation() {
        let mut gen = state().await;

        gen.select_type(QrCodeType::Text);
        gen.input_changed("hi");
        gen.generate().await.unwrap();

        gen.back();
        assert_eq!(gen.screen(), GeneratorScreen::FormInput);
        assert_eq!(gen.form_input(), Some("hi"));
        assert!(gen.bitmap().is_none());

        gen.back();
        assert_eq!(gen.screen(), GeneratorScreen::TypeSelection);
        assert!(gen.form_input().is_none());

        // Back at the root is a no-op
        gen.back();
        assert_eq!(gen.screen(), GeneratorScreen::TypeSelection);
    }
}
