use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tedx_pass::domain::{PassId, RegistrationStore, StoredRegistration};
use tedx_pass::server::router;
use tedx_pass::{MemoryRegistrationStore, PassError};
use tower::ServiceExt;

async fn post_register(
    store: Arc<dyn RegistrationStore>,
    content_type: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router(store).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_valid_registration_returns_record() {
    let store = Arc::new(MemoryRegistrationStore::new());

    let (status, body) = post_register(
        store.clone(),
        "application/json",
        r#"{"name":"A","email":"a@b.com"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@b.com");
    let pass_id = body["passId"].as_str().unwrap();
    assert!(!pass_id.is_empty());

    let stored = store.get(&PassId::from(pass_id)).await.unwrap().unwrap();
    assert_eq!(stored.record.name, "A");
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let store = Arc::new(MemoryRegistrationStore::new());

    let (status, body) = post_register(
        store.clone(),
        "application/json",
        r#"{"name":"","email":"a@b.com"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"error": "Name and email are required."}));
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_field_and_unreadable_bodies_are_rejected() {
    let store = Arc::new(MemoryRegistrationStore::new());
    let cases = [
        ("application/json", r#"{"name":"A"}"#),
        ("application/json", r#"{"email":"a@b.com"}"#),
        ("application/json", "not json"),
        ("application/json", r#"{"name":5,"email":"a@b.com"}"#),
        ("text/plain", r#"{"name":"A","email":"a@b.com"}"#),
    ];

    for (content_type, body) in cases {
        let (status, json) = post_register(store.clone(), content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "Name and email are required.");
    }
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_email_shape_is_not_checked_by_service() {
    let store = Arc::new(MemoryRegistrationStore::new());

    let (status, body) = post_register(
        store,
        "application/json",
        r#"{"name":"A","email":"no-at-sign"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "no-at-sign");
}

#[tokio::test]
async fn test_identical_requests_issue_distinct_passes() {
    let store = Arc::new(MemoryRegistrationStore::new());
    let payload = r#"{"name":"A","email":"a@b.com"}"#;

    let (_, first) = post_register(store.clone(), "application/json", payload).await;
    let (_, second) = post_register(store.clone(), "application/json", payload).await;

    assert_ne!(first["passId"], second["passId"]);
    assert_eq!(store.len().await.unwrap(), 2);
}

struct BrokenStore;

#[async_trait]
impl RegistrationStore for BrokenStore {
    async fn insert(&self, _registration: StoredRegistration) -> tedx_pass::Result<()> {
        Err(PassError::storage("disk full"))
    }

    async fn get(&self, _pass_id: &PassId) -> tedx_pass::Result<Option<StoredRegistration>> {
        Ok(None)
    }

    async fn len(&self) -> tedx_pass::Result<usize> {
        Err(PassError::storage("unavailable"))
    }
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (status, body) = post_register(
        Arc::new(BrokenStore),
        "application/json",
        r#"{"name":"A","email":"a@b.com"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to store registration.");
}

#[tokio::test]
async fn test_health_reports_registration_count() {
    let store = Arc::new(MemoryRegistrationStore::new());
    post_register(
        store.clone(),
        "application/json",
        r#"{"name":"A","email":"a@b.com"}"#,
    )
    .await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router(store).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({"status": "ok", "registrations": 1}));
}
