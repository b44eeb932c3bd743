//! Webhook ingestion core
//!
//! raw payload -> [`transform`] (via the canonical field table in
//! [`fields`]) -> canonical attribute map -> [`reconcile`] -> locations
//! table via [`store`].

pub mod fields;
pub mod reconcile;
pub mod store;
pub mod transform;

pub use fields::{CanonicalField, FieldKind, FieldValue};
pub use reconcile::{ReconcileAction, ReconcileOutcome, Reconciler};
pub use store::LocationStore;
pub use transform::{transform, CanonicalMap, IncomingPayload};
