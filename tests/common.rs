//! Common test utilities for studyaid integration tests
//!
//! This file contains shared functions and utilities for all integration tests,
//! including test application setup, request helpers and a scripted
//! flashcard generator.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use studyaid::{
    create_app,
    generator::{FlashcardGenerator, GeneratedCard, GenerationError},
    models::Subject,
    store::Store,
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Boundary used for hand-built multipart bodies
pub const BOUNDARY: &str = "studyaid-test-boundary";

/// Upload limit used by the test application
pub const TEST_UPLOAD_LIMIT: usize = 64 * 1024;

/// A running test application over a temporary data directory
///
/// The data directory is removed when this value is dropped.
pub struct TestApp {
    pub dir: TempDir,
    pub state: Arc<AppState>,
    pub router: Router,
}

impl TestApp {
    /// Opens a second store over the same data directory
    pub fn reopen_store(&self) -> Store {
        Store::open(self.state.store.data_dir().to_path_buf()).unwrap()
    }
}

/// Generator that answers every document with the same cards
pub struct FixedGenerator(pub Vec<GeneratedCard>);

#[async_trait]
impl FlashcardGenerator for FixedGenerator {
    async fn generate(&self, _document_text: &str) -> Result<Vec<GeneratedCard>, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Generator that turns every `# heading` line into a card
pub struct HeadingGenerator;

#[async_trait]
impl FlashcardGenerator for HeadingGenerator {
    async fn generate(&self, document_text: &str) -> Result<Vec<GeneratedCard>, GenerationError> {
        Ok(document_text
            .lines()
            .filter_map(|line| line.strip_prefix("# "))
            .map(|heading| GeneratedCard {
                question: format!("What is {}?", heading.trim()),
                answer: heading.trim().to_string(),
            })
            .collect())
    }
}

/// Creates a test application with a fresh temporary data directory
///
/// ### Arguments
///
/// * `generator` - The flashcard generator, or `None` to leave processing disabled
pub fn create_test_app(generator: Option<Arc<dyn FlashcardGenerator>>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("data")).unwrap();
    let state = Arc::new(AppState::new(store, generator));
    let router = create_app(state.clone(), TEST_UPLOAD_LIMIT);
    TestApp { dir, state, router }
}

/// Sends a request and returns the status and JSON body
///
/// An empty body is returned as `Value::Null`.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() { Value::Null } else { serde_json::from_slice(&body).unwrap() };
    (status, json)
}

/// Sends a request without a body
pub async fn send_empty(app: &TestApp, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Sends a JSON request
pub async fn send_json(app: &TestApp, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Creates a subject via the API
pub async fn create_subject(app: &TestApp, name: &str) -> Subject {
    let (status, body) = send_json(app, "POST", "/api/subjects", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    serde_json::from_value(body).unwrap()
}

/// Builds a multipart body from optional `subject_id` and `file` parts
pub fn multipart_body(subject_id: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(subject_id) = subject_id {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"subject_id\"\r\n\r\n{}\r\n",
                BOUNDARY, subject_id
            )
            .as_bytes(),
        );
    }

    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: text/markdown\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Posts a multipart upload to `/api/document`
pub async fn upload(app: &TestApp, subject_id: Option<&str>, file: Option<(&str, &[u8])>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/document")
        .header("Content-Type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(subject_id, file)))
        .unwrap();
    send(app, request).await
}

/// Uploads a markdown document and returns the stored record as JSON
pub async fn upload_markdown(app: &TestApp, subject_id: &str, filename: &str, content: &str) -> Value {
    let (status, body) = upload(app, Some(subject_id), Some((filename, content.as_bytes()))).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    assert_eq!(body["message"], "File uploaded successfully");
    body["document"].clone()
}
