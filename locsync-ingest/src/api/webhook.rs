//! Webhook ingestion endpoint
//!
//! The website builder delivers form submissions here. Deliveries arrive as
//! form-urlencoded key/value pairs (the builder's native encoding), as a
//! JSON object, or - in the older integration variant - as a JSON array of
//! objects processed independently and in order.
//!
//! Response contract: the builder checks for a literal "OK" body, retries
//! on 5xx, and stops retrying on 4xx.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::post,
    Router,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::ingest::{transform, IncomingPayload};
use crate::{ApiError, ApiResult, AppState};

/// POST /api/webhook/tilda
///
/// Processes one webhook delivery. Each payload in the delivery is
/// transformed to its canonical map and reconciled; a connectivity probe
/// (`{"test": "test"}`) is acknowledged without touching storage.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<&'static str> {
    let payloads = parse_delivery(&headers, &body)?;

    if payloads.is_empty() {
        return Err(ApiError::BadRequest("Empty webhook delivery".to_string()));
    }

    let single = payloads.len() == 1;
    for payload in &payloads {
        if is_connectivity_probe(payload) {
            info!("Acknowledged connectivity probe");
            continue;
        }
        if payload.is_empty() {
            // A lone empty object is a client error; inside a batch it is
            // just skipped so the rest of the batch still lands
            if single {
                return Err(ApiError::BadRequest("No data in delivery".to_string()));
            }
            continue;
        }

        let map = transform(payload);
        let outcome = state.reconciler.reconcile(map).await?;
        debug!(action = ?outcome.action, record_id = outcome.record_id.as_deref().unwrap_or("-"), "Delivery reconciled");
    }

    Ok("OK")
}

/// Split a delivery body into individual flat payloads.
///
/// Fails with `InvalidPayload` only on structural problems (unparseable
/// body, JSON that is neither an object nor an array of objects). Field
/// level problems are resolved later, during normalization.
fn parse_delivery(headers: &HeaderMap, body: &[u8]) -> Result<Vec<IncomingPayload>, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("json") {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidPayload(format!("Unparseable JSON body: {}", e)))?;
        return match value {
            Value::Object(obj) => Ok(vec![flatten_object(obj)]),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(obj) => Ok(flatten_object(obj)),
                    other => Err(ApiError::InvalidPayload(format!(
                        "Array element is not an object: {}",
                        other
                    ))),
                })
                .collect(),
            other => Err(ApiError::InvalidPayload(format!(
                "Payload must be an object or array of objects, got: {}",
                other
            ))),
        };
    }

    // The builder's default encoding
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| ApiError::InvalidPayload(format!("Unparseable form body: {}", e)))?;
    Ok(vec![pairs.into_iter().collect()])
}

/// Reduce a JSON object to the flat string map the transformer consumes.
/// Scalars are stringified; null and nested composites carry no usable
/// field value and are dropped.
fn flatten_object(obj: serde_json::Map<String, Value>) -> IncomingPayload {
    let mut payload = IncomingPayload::new();
    for (key, value) in obj {
        match value {
            Value::String(s) => {
                payload.insert(key, s);
            }
            Value::Number(n) => {
                payload.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                payload.insert(key, b.to_string());
            }
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                debug!("Dropping non-flat value for key: {}", key);
            }
        }
    }
    payload
}

/// The builder sends `{"test": "test"}` when the integration is configured,
/// to verify the endpoint answers
fn is_connectivity_probe(payload: &IncomingPayload) -> bool {
    payload.len() == 1 && payload.get("test").map(String::as_str) == Some("test")
}

/// Build webhook routes
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/api/webhook/tilda", post(receive_webhook))
}
