//! Content-fetch endpoint for the consuming website
//!
//! The published pages pull their per-location content from here. Records
//! are returned keyed by display names (see [`crate::display`]).

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::display::display_record;
use crate::{ApiResult, AppState};

/// Request body for content fetch. The builder sends viewer profile and
/// bookkeeping fields we do not consume; only the filter string matters.
#[derive(Debug, Default, Deserialize)]
pub struct FetchContentRequest {
    /// JSON-encoded filter object, e.g. `{"record_id": "R1"}`
    #[serde(default)]
    pub filters: Option<String>,
}

/// Parsed filter set
#[derive(Debug, Default, Deserialize)]
struct ContentFilters {
    record_id: Option<String>,
}

/// POST /api/tilda/fetch-content
pub async fn fetch_content(
    State(state): State<AppState>,
    payload: Option<Json<FetchContentRequest>>,
) -> ApiResult<Json<Value>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    // A broken filter string degrades to "no filter" rather than failing
    // the page render
    let filters = match request.filters.as_deref() {
        Some(raw) => serde_json::from_str::<ContentFilters>(raw).unwrap_or_else(|e| {
            warn!("Ignoring unparseable content filters: {}", e);
            ContentFilters::default()
        }),
        None => ContentFilters::default(),
    };

    let records = match filters.record_id.as_deref() {
        Some(record_id) => state
            .store
            .fetch_by_record_id(record_id)
            .await?
            .into_iter()
            .collect(),
        None => state.store.fetch_all().await?,
    };

    let records: Vec<Value> = records
        .iter()
        .map(|record| Value::Object(display_record(record)))
        .collect();

    Ok(Json(json!({ "records": records })))
}

/// Build content-fetch routes
pub fn content_routes() -> Router<AppState> {
    Router::new().route("/api/tilda/fetch-content", post(fetch_content))
}
