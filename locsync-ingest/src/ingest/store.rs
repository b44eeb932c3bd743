//! Record store access for the locations table
//!
//! Thin data-access layer over the connection pool. Writes to canonical
//! fields go exclusively through the reconciler; the read methods serve the
//! content-fetch and administrative APIs.

use locsync_common::db::LocationRecord;
use locsync_common::Result;
use sqlx::SqlitePool;

use super::fields::FieldValue;
use super::transform::CanonicalMap;

/// Keyed access to persisted location records
#[derive(Clone)]
pub struct LocationStore {
    db: SqlitePool,
}

impl LocationStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Look up the internal identity for an external record identifier
    pub async fn find_guid_by_record_id(&self, record_id: &str) -> Result<Option<String>> {
        let guid: Option<String> =
            sqlx::query_scalar("SELECT guid FROM locations WHERE record_id = ? LIMIT 1")
                .bind(record_id)
                .fetch_optional(&self.db)
                .await?;
        Ok(guid)
    }

    /// Insert a new record with the provided canonical fields.
    ///
    /// Column names come from the static canonical field table, never from
    /// payload input, so assembling them into SQL is safe; values are bound.
    pub async fn insert(&self, guid: &str, map: &CanonicalMap) -> Result<()> {
        let mut columns = vec!["guid"];
        columns.extend(map.keys());
        let placeholders = vec!["?"; columns.len()].join(", ");

        let sql = format!(
            "INSERT INTO locations ({}) VALUES ({})",
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(guid);
        for value in map.values() {
            query = match value {
                FieldValue::Text(s) => query.bind(s.as_str()),
                FieldValue::Integer(i) => query.bind(*i),
            };
        }
        query.execute(&self.db).await?;
        Ok(())
    }

    /// Update only the given canonical fields on an existing record,
    /// bumping `updated_at`. Columns not named stay untouched.
    pub async fn update_fields(&self, guid: &str, map: &CanonicalMap) -> Result<()> {
        let set_clause = map
            .keys()
            .map(|name| format!("{} = ?", name))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "UPDATE locations SET {}, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
            set_clause
        );

        let mut query = sqlx::query(&sql);
        for value in map.values() {
            query = match value {
                FieldValue::Text(s) => query.bind(s.as_str()),
                FieldValue::Integer(i) => query.bind(*i),
            };
        }
        query.bind(guid).execute(&self.db).await?;
        Ok(())
    }

    /// All records, newest first
    pub async fn fetch_all(&self) -> Result<Vec<LocationRecord>> {
        let records = sqlx::query_as::<_, LocationRecord>(
            "SELECT * FROM locations ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(records)
    }

    pub async fn fetch_by_guid(&self, guid: &str) -> Result<Option<LocationRecord>> {
        let record =
            sqlx::query_as::<_, LocationRecord>("SELECT * FROM locations WHERE guid = ?")
                .bind(guid)
                .fetch_optional(&self.db)
                .await?;
        Ok(record)
    }

    pub async fn fetch_by_record_id(&self, record_id: &str) -> Result<Option<LocationRecord>> {
        let record = sqlx::query_as::<_, LocationRecord>(
            "SELECT * FROM locations WHERE record_id = ? LIMIT 1",
        )
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(record)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}
