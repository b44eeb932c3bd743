//! Reconciliation: create-or-update for one webhook delivery
//!
//! The reconciler owns the read-modify-write cycle for a record identified
//! by its external `record_id`. The merge is non-destructive: an update
//! never replaces a stored value with an absent one (the transformer has
//! already reduced empty/"null"/"undefined"/unparseable input to absent),
//! which makes concurrent partial updates for the same record commutative
//! per field. There is no in-process locking; a single insert or update
//! statement is the only storage write per call.

use tracing::info;
use uuid::Uuid;

use locsync_common::Result;

use super::fields::FieldValue;
use super::store::LocationStore;
use super::transform::CanonicalMap;

/// What a reconciliation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// New record inserted
    Created,
    /// Existing record partially updated
    Updated,
    /// Nothing eligible to write; delivery acknowledged anyway
    NoOp,
}

/// Result of reconciling one delivery
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub action: ReconcileAction,
    /// Internal identity of the affected record; None when nothing was
    /// created or touched
    pub guid: Option<String>,
    /// External identifier, when the delivery carried one
    pub record_id: Option<String>,
}

#[derive(Clone)]
pub struct Reconciler {
    store: LocationStore,
}

impl Reconciler {
    pub fn new(store: LocationStore) -> Self {
        Self { store }
    }

    /// Reconcile one canonical attribute map into the store.
    ///
    /// A delivery with a known `record_id` updates that record; anything
    /// else creates a new one. Deliveries without any `record_id` always
    /// create: the builder owns the identifier and there is no reliable
    /// alternate key to deduplicate on.
    pub async fn reconcile(&self, map: CanonicalMap) -> Result<ReconcileOutcome> {
        // A payload of only unknown or empty fields normalizes to nothing;
        // acknowledge it without manufacturing a record from garbage
        if map.is_empty() {
            info!("Delivery carried no recognized fields, nothing to reconcile");
            return Ok(ReconcileOutcome {
                action: ReconcileAction::NoOp,
                guid: None,
                record_id: None,
            });
        }

        let record_id = match map.get("record_id") {
            Some(FieldValue::Text(s)) => Some(s.clone()),
            _ => None,
        };

        let existing = match &record_id {
            Some(rid) => self.store.find_guid_by_record_id(rid).await?,
            None => None,
        };

        match existing {
            Some(guid) => self.update_existing(guid, record_id, map).await,
            None => self.create_new(record_id, map).await,
        }
    }

    async fn create_new(
        &self,
        record_id: Option<String>,
        map: CanonicalMap,
    ) -> Result<ReconcileOutcome> {
        let guid = Uuid::new_v4().to_string();
        self.store.insert(&guid, &map).await?;

        info!(
            record_id = record_id.as_deref().unwrap_or("-"),
            guid = %guid,
            fields = map.len(),
            "Created location"
        );

        Ok(ReconcileOutcome {
            action: ReconcileAction::Created,
            guid: Some(guid),
            record_id,
        })
    }

    async fn update_existing(
        &self,
        guid: String,
        record_id: Option<String>,
        mut map: CanonicalMap,
    ) -> Result<ReconcileOutcome> {
        // The identifier matched an existing row; rewriting it would be a
        // pointless self-assignment
        map.remove("record_id");

        if map.is_empty() {
            info!(
                record_id = record_id.as_deref().unwrap_or("-"),
                "No non-empty fields in delivery, skipping update"
            );
            return Ok(ReconcileOutcome {
                action: ReconcileAction::NoOp,
                guid: Some(guid),
                record_id,
            });
        }

        self.store.update_fields(&guid, &map).await?;

        info!(
            record_id = record_id.as_deref().unwrap_or("-"),
            guid = %guid,
            fields = map.len(),
            "Updated location"
        );

        Ok(ReconcileOutcome {
            action: ReconcileAction::Updated,
            guid: Some(guid),
            record_id,
        })
    }
}
