//! Administrative read endpoints for location records

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{ApiError, ApiResult, AppState};

/// GET /api/locations
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let records = state.store.fetch_all().await?;
    Ok(Json(json!({
        "success": true,
        "count": records.len(),
        "data": records,
    })))
}

/// GET /api/locations/:guid
pub async fn get_location(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<Json<Value>> {
    let record = state
        .store
        .fetch_by_guid(&guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Location {} not found", guid)))?;

    Ok(Json(json!({
        "success": true,
        "data": record,
    })))
}

/// Build location routes
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/api/locations", get(list_locations))
        .route("/api/locations/:guid", get(get_location))
}
