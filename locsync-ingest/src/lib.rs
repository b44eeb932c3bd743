//! locsync-ingest library interface
//!
//! Exposes the router and ingestion core for integration testing.

pub mod api;
pub mod display;
pub mod error;
pub mod ingest;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::ingest::{LocationStore, Reconciler};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Record store (reads)
    pub store: LocationStore,
    /// Reconciler (webhook writes)
    pub reconciler: Reconciler,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let store = LocationStore::new(db.clone());
        let reconciler = Reconciler::new(store.clone());
        Self {
            db,
            store,
            reconciler,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is permissive: the website builder posts webhooks and the published
/// pages fetch content from arbitrary origins.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::webhook_routes())
        .merge(api::content_routes())
        .merge(api::location_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
