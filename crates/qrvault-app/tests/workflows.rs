//! End-to-end workflow tests over a fully wired AppState.

use image::GrayImage;
use qrvault_app::{AppConfig, AppState, GeneratorScreen, Permission};
use qrvault_codec::QrEncoder;
use qrvault_core::{now_millis, QrCodeType};

async fn app() -> (AppState, std::path::PathBuf) {
    let root = std::env::temp_dir().join(format!("qrvault-e2e-{}", now_millis()));
    let app = AppState::build(AppConfig::with_data_dir(&root)).await.unwrap();
    (app, root)
}

fn frame_with(content: &str) -> GrayImage {
    QrEncoder::default().encode(content).unwrap()
}

#[tokio::test]
async fn generate_save_and_list_favorites() {
    let (app, root) = app().await;

    {
        let mut generator = app.generator.lock().await;
        generator.select_type(QrCodeType::Url);
        generator.input_changed("example.com");
        generator.generate().await.unwrap();

        assert_eq!(generator.screen(), GeneratorScreen::QrDisplay);
        assert_eq!(generator.content(), Some("https://example.com"));
        assert!(generator.bitmap().unwrap().width() >= 256);

        // Nothing stored until the user saves
        assert!(app
            .db
            .generated()
            .find_by_content("https://example.com")
            .await
            .unwrap()
            .is_none());

        generator.save_to_favorites().await.unwrap();
    }

    let favorites = app.favorites.list().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].content, "https://example.com");
    assert!(favorites[0].is_favorite);

    app.shutdown().await;
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn scan_records_history_and_pauses_until_dismissed() {
    let (app, root) = app().await;

    let mut history_rx = app.history.watch().await.unwrap();

    {
        let mut scanner = app.scanner.lock().await;
        scanner.set_permission(Permission::Granted);

        let hit = scanner
            .handle_frame(frame_with("ACME-123"))
            .await
            .unwrap()
            .expect("first frame should decode");
        assert_eq!(hit.content, "ACME-123");

        // Paused: the same frame again is dropped
        assert!(scanner
            .handle_frame(frame_with("ACME-123"))
            .await
            .unwrap()
            .is_none());

        scanner.resume_scanning().unwrap();
        assert!(scanner
            .handle_frame(frame_with("https://example.com"))
            .await
            .unwrap()
            .is_some());
    }

    history_rx.changed().await.ok();
    let entries = app.history.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first
    assert_eq!(entries[0].code.content, "https://example.com");
    assert_eq!(entries[0].kind_label, "URL");
    assert_eq!(entries[1].code.content, "ACME-123");

    app.history.clear().await.unwrap();
    assert!(app.history.entries().await.unwrap().is_empty());

    app.shutdown().await;
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn download_then_favorite_uses_one_row() {
    let (app, root) = app().await;

    {
        let mut generator = app.generator.lock().await;
        generator.select_type(QrCodeType::Text);
        generator.input_changed("shared-content");
        generator.generate().await.unwrap();

        generator.download_to_gallery().await.unwrap();
        generator.save_to_favorites().await.unwrap();
    }

    let rows = app.db.generated().list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_favorite);
    let image_path = rows[0].image_path.clone().unwrap();
    assert!(std::path::Path::new(&image_path).exists());
    assert!(image_path.contains("QRVault"));

    app.shutdown().await;
    let _ = std::fs::remove_dir_all(root);
}
