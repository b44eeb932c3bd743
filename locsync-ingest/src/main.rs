//! locsync-ingest - Location Content Sync Service
//!
//! Receives per-location business data pushed by the website builder's
//! webhooks, reconciles it into the locations table, and serves it back to
//! the published pages through the content-fetch API.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use locsync_ingest::AppState;

#[derive(Debug, Parser)]
#[command(name = "locsync-ingest", about = "Location content sync service")]
struct Args {
    /// Address to bind the HTTP server to (overrides env and config file)
    #[arg(long)]
    bind_addr: Option<String>,

    /// Path to the SQLite database file (overrides env and config file)
    #[arg(long)]
    database_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting locsync-ingest");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = locsync_common::config::resolve_config(
        args.bind_addr.as_deref(),
        args.database_path.as_deref(),
    )?;
    info!("Database: {}", config.database_path.display());

    let db_pool = locsync_common::db::init_database(&config.database_path).await?;
    info!("Database connection established");

    let state = AppState::new(db_pool);
    let app = locsync_ingest::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Webhook endpoint: http://{}/api/webhook/tilda", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
