//! Webhook ingestion integration tests
//!
//! Drives the full router against an in-memory database, covering the
//! create/update/no-op flows and the builder's connectivity probe.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use locsync_common::db::init_memory_database;
use locsync_ingest::{build_router, AppState};

async fn test_state() -> AppState {
    let pool = init_memory_database().await.unwrap();
    AppState::new(pool)
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/webhook/tilda")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn row_count(state: &AppState) -> i64 {
    state.store.count().await.unwrap()
}

#[tokio::test]
async fn webhook_creates_record_from_form_delivery() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(form_request(
            "%D0%9D%D0%B0%D0%B7%D0%B2%D0%B0%D0%BD%D0%B8%D0%B5=Arena&Email=a%40b.com&record_id=R1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");

    let record = state.store.fetch_by_record_id("R1").await.unwrap().unwrap();
    assert_eq!(record.name.as_deref(), Some("Arena"));
    assert_eq!(record.email.as_deref(), Some("a@b.com"));
}

#[tokio::test]
async fn followup_with_empty_field_preserves_stored_value() {
    let state = test_state().await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(json_request(
            "/api/webhook/tilda",
            r#"{"Название": "Arena", "Email": "a@b.com", "record_id": "R1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Builder re-submits with the email field blanked
    let app = build_router(state.clone());
    let response = app
        .oneshot(json_request(
            "/api/webhook/tilda",
            r#"{"record_id": "R1", "Email": ""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = state.store.fetch_by_record_id("R1").await.unwrap().unwrap();
    assert_eq!(record.email.as_deref(), Some("a@b.com"));
    assert_eq!(row_count(&state).await, 1);
}

#[tokio::test]
async fn connectivity_probe_is_acknowledged_without_storage() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request("/api/webhook/tilda", r#"{"test": "test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
    assert_eq!(row_count(&state).await, 0);
}

#[tokio::test]
async fn unknown_keys_only_acknowledged_without_record() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request(
            "/api/webhook/tilda",
            r#"{"some_builder_key": "x", "another": "y"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(row_count(&state).await, 0);
}

#[tokio::test]
async fn array_delivery_processes_each_payload() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request(
            "/api/webhook/tilda",
            r#"[{"record_id": "R1", "Название": "Arena"},
                {"record_id": "R2", "Название": "Dome"}]"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(row_count(&state).await, 2);
}

#[tokio::test]
async fn scalar_json_body_is_rejected_as_client_error() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request("/api/webhook/tilda", r#""not an object""#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");
    assert_eq!(row_count(&state).await, 0);
}

#[tokio::test]
async fn empty_delivery_is_rejected() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request("/api/webhook/tilda", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alias_priority_applies_end_to_end() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request(
            "/api/webhook/tilda",
            r#"{"record_id": "R1",
                "Приз_1_картинка": "https://cdn.example/old.png",
                "Приз_1_картинка_2": "https://cdn.example/new.png"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = state.store.fetch_by_record_id("R1").await.unwrap().unwrap();
    assert_eq!(
        record.prize_1_image.as_deref(),
        Some("https://cdn.example/new.png")
    );
}

#[tokio::test]
async fn numeric_fields_ingest_as_integers() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(form_request(
            "record_id=R1&%D0%9F%D0%BE%D0%BF%D0%BE%D0%BB%D0%BD%D0%B5%D0%BD%D0%B8%D0%B5_1=5000&%D0%91%D0%BE%D0%BD%D1%83%D1%81_1=bad",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = state.store.fetch_by_record_id("R1").await.unwrap().unwrap();
    assert_eq!(record.deposit_1, Some(5000));
    // Malformed bonus resolved to absent, not zero
    assert_eq!(record.bonus_1, None);
}
