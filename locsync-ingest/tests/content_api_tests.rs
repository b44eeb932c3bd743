//! Content-fetch and administrative read API tests

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

async fn ingest(state: &AppState, json: &str) {
    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhook/tilda")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn fetch_content_round_trips_ingested_fields() {
    let state = test_state().await;
    ingest(
        &state,
        r#"{"record_id": "R1", "Название": "Arena", "Email": "a@b.com",
            "Пополнение_1": "5000", "Бонус_1": "500", "Накопление_1": "10000",
            "Привилегия_1": "free hour"}"#,
    )
    .await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tilda/fetch-content")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["title"], "Arena");
    assert_eq!(record["email"], "a@b.com");
    assert_eq!(record["vznos1"], 5000);
    assert_eq!(record["bonus1"], 500);
    assert_eq!(record["nakoplenie1"], 10000);
    assert_eq!(record["privilege1"], "free hour");
    assert_eq!(record["record_id"], "R1");
    // Never-filled fields render as empty strings for the templates
    assert_eq!(record["prizetxt1"], "");
    assert_eq!(record["time-card1"], "");
}

#[tokio::test]
async fn fetch_content_filters_by_record_id() {
    let state = test_state().await;
    ingest(&state, r#"{"record_id": "R1", "Название": "Arena"}"#).await;
    ingest(&state, r#"{"record_id": "R2", "Название": "Dome"}"#).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tilda/fetch-content")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"filters": "{\"record_id\": \"R2\"}"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Dome");
}

#[tokio::test]
async fn fetch_content_tolerates_garbage_filters() {
    let state = test_state().await;
    ingest(&state, r#"{"record_id": "R1", "Название": "Arena"}"#).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tilda/fetch-content")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"filters": "not json at all"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn locations_list_and_get() {
    let state = test_state().await;
    ingest(&state, r#"{"record_id": "R1", "Название": "Arena"}"#).await;

    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/locations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    let guid = body["data"][0]["guid"].as_str().unwrap().to_string();

    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/locations/{}", guid))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Arena");
}

#[tokio::test]
async fn unknown_location_is_404() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/locations/no-such-guid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "locsync-ingest");
}
