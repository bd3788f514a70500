use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use designkit_core::{
    thread_safe, AppEvent, EventBus, EventCategory, EventFilter, NotificationEvent,
    NotificationLevel, ObjectId, ThreadSafe,
};
use designkit_editor::{Editor, EditorConfig, HeadlessCanvas, ObjectKind, ShapeOverrides, Size};
use designkit_remote::{
    AssetBridge, BackgroundRemover, CatalogImage, ImageCatalog, ImageUrls, ImageUser,
    Orientation, Pagination, RemoteError, SearchParams, SearchResponse,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode");
    bytes
}

fn png_data_url(width: u32, height: u32) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png(width, height)))
}

struct MockRemover {
    result: Result<String, String>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    seen: Mutex<Vec<String>>,
}

impl MockRemover {
    fn ok(data_url: String) -> Self {
        Self {
            result: Ok(data_url),
            calls: AtomicUsize::new(0),
            gate: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            ..Self::ok(String::new())
        }
    }
}

#[async_trait::async_trait]
impl BackgroundRemover for MockRemover {
    async fn remove_background(&self, image_data: &str) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(image_data.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone().map_err(RemoteError::Service)
    }
}

#[derive(Default)]
struct MockCatalog {
    bytes: Vec<u8>,
    offline: bool,
    searches: AtomicUsize,
    listings: Mutex<Vec<(Option<Orientation>, u32)>>,
    uploads: Mutex<Vec<(String, usize)>>,
}

fn catalog_image(id: &str) -> CatalogImage {
    CatalogImage {
        id: id.to_string(),
        urls: ImageUrls {
            regular: format!("https://images.example.com/{}.png", id),
            ..ImageUrls::default()
        },
        alt_description: None,
        description: None,
        user: ImageUser::default(),
    }
}

#[async_trait::async_trait]
impl ImageCatalog for MockCatalog {
    async fn get_images(
        &self,
        orientation: Option<Orientation>,
        count: u32,
    ) -> Result<Vec<CatalogImage>, RemoteError> {
        if self.offline {
            return Err(RemoteError::Request("connection refused".to_string()));
        }
        self.listings.lock().push((orientation, count));
        Ok(vec![catalog_image("a"), catalog_image("b")])
    }

    async fn get_image(&self, id: &str) -> Result<CatalogImage, RemoteError> {
        Ok(catalog_image(id))
    }

    async fn search_images(&self, params: &SearchParams) -> Result<SearchResponse, RemoteError> {
        if self.offline {
            return Err(RemoteError::Request("connection refused".to_string()));
        }
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(SearchResponse {
            photos: vec![catalog_image(&params.query)],
            pagination: Pagination {
                total: 41,
                total_pages: 2,
                current_page: params.page,
                per_page: params.per_page,
            },
        })
    }

    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<CatalogImage, RemoteError> {
        self.uploads.lock().push((file_name.to_string(), bytes.len()));
        Ok(catalog_image("uploaded"))
    }

    async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, RemoteError> {
        if self.bytes.is_empty() {
            return Err(RemoteError::Status {
                status: 404,
                body: "missing".to_string(),
            });
        }
        Ok(self.bytes.clone())
    }
}

struct Fixture {
    editor: ThreadSafe<Editor>,
    notifications: Arc<Mutex<Vec<NotificationEvent>>>,
}

fn fixture() -> Fixture {
    let bus = EventBus::new();
    let notifications = Arc::new(Mutex::new(Vec::new()));
    let sink = notifications.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Notification]),
        move |event| {
            if let AppEvent::Notification(n) = event {
                sink.lock().push(n);
            }
        },
    );
    let editor = Editor::new(
        Box::new(HeadlessCanvas::new()),
        Size::new(1000.0, 800.0),
        EditorConfig::default(),
        bus,
    )
    .expect("editor");
    Fixture {
        editor: thread_safe(editor),
        notifications,
    }
}

fn add_photo(editor: &ThreadSafe<Editor>) -> ObjectId {
    editor
        .lock()
        .add_image_url("https://images.example.com/cat.png", 1000.0, 600.0)
        .expect("image added")
}

#[tokio::test]
async fn test_remove_background_replaces_selected_image() {
    let fx = fixture();
    let original = add_photo(&fx.editor);
    let before = fx.editor.lock().surface().object(original).cloned().expect("object");
    let remover = Arc::new(MockRemover::ok(png_data_url(20, 12)));
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        remover.clone(),
        Arc::new(MockCatalog::default()),
    );

    let id = bridge
        .remove_background()
        .await
        .expect("removal")
        .expect("replacement");

    assert_eq!(
        remover.seen.lock().as_slice(),
        ["https://images.example.com/cat.png"]
    );
    let editor = fx.editor.lock();
    assert!(editor.surface().object(original).is_none());
    let replacement = editor.surface().object(id).expect("replacement");
    assert_eq!(replacement.transform.left, before.transform.left);
    assert_eq!(replacement.transform.top, before.transform.top);
    assert_eq!(replacement.transform.scale_x, before.transform.scale_x);
    assert_eq!(replacement.transform.scale_y, before.transform.scale_y);
    match &replacement.kind {
        ObjectKind::Image { src, width, height } => {
            assert!(src.starts_with("data:image/png;base64,"));
            assert_eq!((*width, *height), (20.0, 12.0));
        }
        other => panic!("expected image, got {:?}", other),
    }
    assert!(editor.is_object_selected(id));
    assert_eq!(editor.history().len(), 3);
    assert!(!editor.is_processing_image());
    drop(editor);

    let notifications = fx.notifications.lock();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn test_remove_background_without_image_does_nothing() {
    let fx = fixture();
    fx.editor.lock().add_circle(&ShapeOverrides::default());
    let remover = Arc::new(MockRemover::ok(png_data_url(4, 4)));
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        remover.clone(),
        Arc::new(MockCatalog::default()),
    );

    assert!(bridge.remove_background().await.expect("no-op").is_none());
    assert_eq!(remover.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.editor.lock().history().len(), 2);
}

#[tokio::test]
async fn test_remove_background_failure_keeps_image_and_notifies() {
    let fx = fixture();
    let original = add_photo(&fx.editor);
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::failing("Image too large")),
        Arc::new(MockCatalog::default()),
    );

    let err = bridge.remove_background().await.expect_err("failure");
    assert!(matches!(err, RemoteError::Service(ref m) if m == "Image too large"));

    let editor = fx.editor.lock();
    assert!(editor.surface().object(original).is_some());
    assert_eq!(editor.history().len(), 2);
    assert!(!editor.is_processing_image());
    drop(editor);

    let notifications = fx.notifications.lock();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].message, "Image too large");
}

#[tokio::test]
async fn test_second_removal_while_running_is_busy() {
    let fx = fixture();
    add_photo(&fx.editor);
    let gate = Arc::new(Notify::new());
    let remover = Arc::new(MockRemover {
        gate: Some(gate.clone()),
        ..MockRemover::ok(png_data_url(8, 8))
    });
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        remover.clone(),
        Arc::new(MockCatalog::default()),
    );

    let (first, second) = tokio::join!(bridge.remove_background(), async {
        let busy = bridge.remove_background().await;
        assert!(bridge.is_processing());
        gate.notify_one();
        busy
    });

    assert!(first.expect("first").is_some());
    assert!(matches!(second, Err(RemoteError::Busy)));
    assert_eq!(remover.calls.load(Ordering::SeqCst), 1);
    assert!(!bridge.is_processing());
}

#[tokio::test]
async fn test_cancelled_removal_releases_the_slot() {
    let fx = fixture();
    add_photo(&fx.editor);
    let gate = Arc::new(Notify::new());
    let remover = Arc::new(MockRemover {
        gate: Some(gate.clone()),
        ..MockRemover::ok(png_data_url(8, 8))
    });
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        remover.clone(),
        Arc::new(MockCatalog::default()),
    );

    let timed_out =
        tokio::time::timeout(Duration::from_millis(20), bridge.remove_background()).await;
    assert!(timed_out.is_err());
    assert!(!bridge.is_processing());

    gate.notify_one();
    let retried = bridge.remove_background().await.expect("retry");
    assert!(retried.is_some());
    assert_eq!(remover.calls.load(Ordering::SeqCst), 2);
    assert!(!bridge.is_processing());
}

#[tokio::test]
async fn test_removal_after_dispose_is_dropped() {
    let fx = fixture();
    add_photo(&fx.editor);
    let gate = Arc::new(Notify::new());
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover {
            gate: Some(gate.clone()),
            ..MockRemover::ok(png_data_url(8, 8))
        }),
        Arc::new(MockCatalog::default()),
    );

    let (result, _) = tokio::join!(bridge.remove_background(), async {
        fx.editor.lock().dispose();
        gate.notify_one();
    });

    assert!(result.expect("no error").is_none());
    assert!(fx.editor.lock().is_disposed());
}

#[tokio::test]
async fn test_browse_lists_or_searches() {
    let fx = fixture();
    let catalog = Arc::new(MockCatalog::default());
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        catalog.clone(),
    );

    let listing = bridge
        .browse(&SearchParams {
            orientation: Some(Orientation::Landscape),
            ..SearchParams::default()
        })
        .await
        .expect("listing");
    assert_eq!(listing.photos.len(), 2);
    assert_eq!(listing.pagination.total_pages, 1);
    assert_eq!(
        catalog.listings.lock().as_slice(),
        [(Some(Orientation::Landscape), 30)]
    );

    let search = bridge
        .browse(&SearchParams::new("forest"))
        .await
        .expect("search");
    assert_eq!(search.photos[0].id, "forest");
    assert!(search.pagination.has_next());
    assert_eq!(catalog.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_insert_catalog_image_uses_regular_url_and_scales() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog {
            bytes: png(1000, 400),
            ..MockCatalog::default()
        }),
    );

    let image = catalog_image("lake");
    let id = bridge
        .insert_catalog_image(&image)
        .await
        .expect("insert")
        .expect("added");

    let editor = fx.editor.lock();
    let object = editor.surface().object(id).expect("object");
    match &object.kind {
        ObjectKind::Image { src, .. } => assert_eq!(src, &image.urls.regular),
        other => panic!("expected image, got {:?}", other),
    }
    let size = object.scaled_size();
    assert!((size.width - 500.0).abs() < 1e-6);
    assert!((size.height - 200.0).abs() < 1e-6);
    assert!(editor.is_object_selected(id));
}

#[tokio::test]
async fn test_insert_catalog_image_fetch_failure_notifies() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog::default()),
    );

    let err = bridge
        .insert_catalog_image(&catalog_image("gone"))
        .await
        .expect_err("missing");
    assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    assert_eq!(fx.editor.lock().history().len(), 1);
    assert_eq!(fx.notifications.lock()[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_browse_failure_notifies() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog {
            offline: true,
            ..MockCatalog::default()
        }),
    );

    let listing = bridge.browse(&SearchParams::default()).await;
    assert!(matches!(listing, Err(RemoteError::Request(_))));
    let search = bridge.browse(&SearchParams::new("forest")).await;
    assert!(matches!(search, Err(RemoteError::Request(_))));

    let notifications = fx.notifications.lock();
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| n.level == NotificationLevel::Error && n.title == "Images failed to load"));
    assert_eq!(
        notifications[0].message,
        "The asset service is unavailable. Please try again."
    );
}

#[tokio::test]
async fn test_insert_catalog_image_undecodable_bytes_notify() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog {
            bytes: b"<html>not an image</html>".to_vec(),
            ..MockCatalog::default()
        }),
    );

    let err = bridge
        .insert_catalog_image(&catalog_image("broken"))
        .await
        .expect_err("undecodable");
    assert!(matches!(err, RemoteError::Import(_)));
    assert_eq!(fx.editor.lock().history().len(), 1);

    let notifications = fx.notifications.lock();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Image failed to load");
}

#[tokio::test]
async fn test_insert_image_file_failures_notify() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog::default()),
    );
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = bridge.insert_image_file(&dir.path().join("nope.png")).await;
    assert!(matches!(missing, Err(RemoteError::Io(_))));

    let text_path = dir.path().join("notes.png");
    std::fs::write(&text_path, "plain text").expect("write");
    let garbage = bridge.insert_image_file(&text_path).await;
    assert!(matches!(garbage, Err(RemoteError::Import(_))));

    let notifications = fx.notifications.lock();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].title, "Image import failed");
    assert_eq!(notifications[0].message, "The file could not be read.");
    assert_eq!(notifications[1].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_local_files() {
    let fx = fixture();
    let catalog = Arc::new(MockCatalog::default());
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        catalog.clone(),
    );
    let dir = tempfile::tempdir().expect("tempdir");

    let png_path = dir.path().join("photo.png");
    std::fs::write(&png_path, png(30, 10)).expect("write png");
    let uploaded = bridge.upload_file(&png_path).await.expect("upload");
    assert_eq!(uploaded.id, "uploaded");
    assert_eq!(catalog.uploads.lock()[0].0, "photo.png");

    let id = bridge
        .insert_image_file(&png_path)
        .await
        .expect("insert")
        .expect("added");
    assert!(fx.editor.lock().is_object_selected(id));

    let svg_path = dir.path().join("logo.svg");
    std::fs::write(
        &svg_path,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="40" cy="40" r="40"/></svg>"#,
    )
    .expect("write svg");
    let svg = bridge
        .import_svg_file(&svg_path)
        .await
        .expect("import")
        .expect("added");
    assert_eq!(
        fx.editor.lock().surface().object(svg).map(|o| o.type_name()),
        Some("circle")
    );

    let missing = bridge.insert_image_file(&dir.path().join("nope.png")).await;
    assert!(matches!(missing, Err(RemoteError::Io(_))));
}

#[tokio::test]
async fn test_import_svg_file_reports_invalid_markup() {
    let fx = fixture();
    let bridge = AssetBridge::new(
        fx.editor.clone(),
        Arc::new(MockRemover::ok(String::new())),
        Arc::new(MockCatalog::default()),
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.svg");
    std::fs::write(
        &path,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><rect width="1" height="1"/></defs></svg>"#,
    )
    .expect("write");

    let err = bridge.import_svg_file(&path).await.expect_err("nothing drawable");
    assert!(matches!(err, RemoteError::Import(_)));
    assert_eq!(
        fx.notifications.lock()[0].message,
        "No valid SVG elements found"
    );
}
