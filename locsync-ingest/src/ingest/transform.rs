//! Payload transformation
//!
//! Applies the canonical field table across one incoming payload, producing
//! the typed attribute map the reconciler consumes. Pure: no storage access,
//! no side effects beyond debug logging of dropped keys.

use std::collections::BTreeMap;
use tracing::debug;

use super::fields::{self, FieldValue, CANONICAL_FIELDS};

/// One webhook delivery: a flat external key -> raw string mapping
pub type IncomingPayload = BTreeMap<String, String>;

/// Canonical field name -> typed value. Holds only fields that resolved to
/// a concrete value; absent sentinels and unparseable numerics never enter
/// the map, so downstream merge filtering is inherent in the type.
pub type CanonicalMap = BTreeMap<&'static str, FieldValue>;

/// Convert one payload into a canonical attribute map.
///
/// Guarantees exactly one value per canonical field: the table's alias
/// order is walked per field and the first alias present in the payload
/// wins, independent of payload iteration order. Unknown keys are dropped.
pub fn transform(payload: &IncomingPayload) -> CanonicalMap {
    let mut map = CanonicalMap::new();

    for field in CANONICAL_FIELDS {
        for alias in field.aliases {
            if let Some(raw) = payload.get(*alias) {
                if let Some(value) = fields::coerce(field, raw) {
                    map.insert(field.name, value);
                    break;
                }
                // Sentinel or unparseable: keep scanning lower-priority
                // aliases, a usable value may still be present
            }
        }
    }

    for key in payload.keys() {
        if fields::resolve(key).is_none() {
            debug!("Ignoring unknown payload key: {}", key);
        }
    }

    map
}
