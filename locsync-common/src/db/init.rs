//! Database initialization
//!
//! Opens (creating if missing) the SQLite database and brings the schema up
//! to date. All schema statements are idempotent, so init is safe to call on
//! every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_connection(&pool).await?;
    create_locations_table(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database with the full schema (tests)
///
/// Capped at one connection: each pooled connection to `:memory:` would
/// otherwise open its own empty database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;
    create_locations_table(&pool).await?;
    Ok(pool)
}

async fn configure_connection(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers while a webhook delivery is writing
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    Ok(())
}

/// Create the locations table
///
/// One row per business location. Every canonical field is nullable: webhook
/// deliveries are partial and rows are filled in over time. `record_id` is
/// the external identifier owned by the website builder and is the natural
/// key for reconciliation when present.
pub async fn create_locations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            guid TEXT PRIMARY KEY,
            record_id TEXT,
            name TEXT,
            email TEXT,
            address TEXT,
            cover_image TEXT,
            time_card_price_1h INTEGER,
            time_card_price_2h INTEGER,
            time_card_price_3h INTEGER,
            time_card_price_4h INTEGER,
            time_card_price_5h INTEGER,
            prize_1_text TEXT,
            prize_2_text TEXT,
            prize_3_text TEXT,
            prize_1_image TEXT,
            prize_2_image TEXT,
            prize_3_image TEXT,
            prizes_text TEXT,
            top_up_amount INTEGER,
            next_draw_date TEXT,
            thursday_promo_title TEXT,
            thursday_promo_text TEXT,
            time_card_display_1h INTEGER,
            time_card_display_2h INTEGER,
            time_card_display_3h INTEGER,
            time_card_display_4h INTEGER,
            time_card_display_5h INTEGER,
            deposit_1 INTEGER,
            bonus_1 INTEGER,
            deposit_2 INTEGER,
            bonus_2 INTEGER,
            deposit_3 INTEGER,
            bonus_3 INTEGER,
            deposit_4 INTEGER,
            bonus_4 INTEGER,
            deposit_5 INTEGER,
            bonus_5 INTEGER,
            deposit_6 INTEGER,
            bonus_6 INTEGER,
            tier_threshold_1 INTEGER,
            tier_privilege_1 TEXT,
            tier_threshold_2 INTEGER,
            tier_privilege_2 TEXT,
            tier_threshold_3 INTEGER,
            tier_privilege_3 TEXT,
            tier_threshold_4 INTEGER,
            tier_privilege_4 TEXT,
            ma_name TEXT,
            ma_email TEXT,
            tranid TEXT,
            formid TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // record_id is the reconciliation lookup key
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_locations_record_id ON locations(record_id)")
        .execute(pool)
        .await?;

    Ok(())
}
