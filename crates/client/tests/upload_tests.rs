//! Integration tests for media uploads: object-store routing, backend
//! fallback, aggregate progress, and partial-failure reporting

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use causeway_client::upload::ProgressFn;
use causeway_client::{ApiError, ApiResult, Client, MediaFile, ObjectStore};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn progress_recorder() -> (Arc<Mutex<Vec<u8>>>, impl Fn(u8) + Send + Sync) {
    let samples = Arc::new(Mutex::new(Vec::new()));
    let sink = samples.clone();
    (samples, move |p| sink.lock().unwrap().push(p))
}

#[tokio::test]
async fn fallback_upload_reports_partial_failure_and_continues() {
    let server = MockServer::start().await;

    for name in ["a.png", "c.png"] {
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("action=uploadMedia"))
            .and(body_string_contains(format!("fileName={name}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"url": format!("https://cdn.example.org/media/{name}")}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(body_string_contains("action=uploadMedia"))
        .and(body_string_contains("fileName=b.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "quota exceeded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder().endpoint(server.uri()).build().unwrap();
    let files = vec![
        MediaFile::new("a.png", "image/png", vec![1, 2, 3]),
        MediaFile::new("b.png", "image/png", vec![4, 5, 6]),
        MediaFile::new("c.png", "image/png", vec![7, 8, 9]),
    ];

    let (samples, on_progress) = progress_recorder();
    let report = client
        .admin()
        .upload_media(&files, "posts", on_progress)
        .await
        .unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "b.png");
    assert!(report.failures[0].message.contains("quota exceeded"));
    assert_eq!(report.uploaded[0].url, "https://cdn.example.org/media/a.png");

    // files 0 and 2 completed: 100/3 rounds to 33, 300/3 to 100
    let samples = samples.lock().unwrap();
    assert_eq!(*samples, vec![33, 100]);
}

#[tokio::test]
async fn batches_over_the_cap_are_rejected_before_any_request() {
    let server = MockServer::start().await;
    let client = Client::builder().endpoint(server.uri()).build().unwrap();

    let files: Vec<MediaFile> = (0..21)
        .map(|i| MediaFile::new(format!("f{i}.png"), "image/png", vec![]))
        .collect();

    let err = client
        .admin()
        .upload_media(&files, "posts", |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

struct RecordingStore {
    uploads: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    fn is_configured(&self) -> bool {
        true
    }

    async fn upload_image(
        &self,
        file: &MediaFile,
        folder: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> ApiResult<String> {
        on_progress(50);
        on_progress(100);
        self.uploads.lock().unwrap().push(format!("image:{}", file.name));
        Ok(format!("https://store.example.org/{folder}/{}", file.name))
    }

    async fn upload_video(
        &self,
        file: &MediaFile,
        folder: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> ApiResult<String> {
        on_progress(50);
        on_progress(100);
        self.uploads.lock().unwrap().push(format!("video:{}", file.name));
        Ok(format!("https://store.example.org/{folder}/{}", file.name))
    }
}

#[tokio::test]
async fn configured_store_routes_by_media_kind() {
    let server = MockServer::start().await;
    let store = Arc::new(RecordingStore::new());

    let client = Client::builder()
        .endpoint(server.uri())
        .object_store(store.clone())
        .build()
        .unwrap();

    let files = vec![
        MediaFile::new("cover.jpg", "image/jpeg", vec![1]),
        MediaFile::new("clip.mp4", "video/mp4", vec![2]),
    ];

    let (samples, on_progress) = progress_recorder();
    let report = client
        .admin()
        .upload_media(&files, "gallery", on_progress)
        .await
        .unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(
        *store.uploads.lock().unwrap(),
        vec!["image:cover.jpg".to_string(), "video:clip.mp4".to_string()]
    );
    assert_eq!(*samples.lock().unwrap(), vec![25, 50, 75, 100]);

    // nothing reached the backend
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_media_targets_the_stored_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("action=deleteMedia"))
        .and(body_string_contains("cdn.example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder().endpoint(server.uri()).build().unwrap();
    client
        .admin()
        .delete_media("https://cdn.example.org/media/a.png")
        .await
        .unwrap();
}
