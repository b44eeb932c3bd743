//! Configuration loading and database path resolution
//!
//! All configuration is resolved once at startup and passed by value to the
//! components that need it. Nothing in this crate reads configuration from
//! process-wide mutable state after startup.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            database_path: default_data_dir().join("locsync.db"),
        }
    }
}

/// On-disk TOML representation; every field optional so a partial file
/// overrides only what it names.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    bind_addr: Option<String>,
    database_path: Option<String>,
}

/// Resolve service configuration in priority order:
/// 1. Command-line arguments (highest priority)
/// 2. Environment variables (`LOCSYNC_BIND_ADDR`, `LOCSYNC_DATABASE_PATH`)
/// 3. TOML config file (`~/.config/locsync/config.toml` or `/etc/locsync/config.toml`)
/// 4. Compiled defaults (fallback)
pub fn resolve_config(
    cli_bind_addr: Option<&str>,
    cli_database_path: Option<&str>,
) -> Result<ServiceConfig> {
    let mut config = ServiceConfig::default();

    // Priority 3: TOML config file
    if let Some(path) = find_config_file() {
        let file = load_config_file(&path)?;
        if let Some(addr) = file.bind_addr {
            config.bind_addr = parse_addr(&addr)?;
        }
        if let Some(db) = file.database_path {
            config.database_path = PathBuf::from(db);
        }
    }

    // Priority 2: Environment variables
    if let Ok(addr) = std::env::var("LOCSYNC_BIND_ADDR") {
        config.bind_addr = parse_addr(&addr)?;
    }
    if let Ok(db) = std::env::var("LOCSYNC_DATABASE_PATH") {
        config.database_path = PathBuf::from(db);
    }

    // Priority 1: Command-line arguments
    if let Some(addr) = cli_bind_addr {
        config.bind_addr = parse_addr(addr)?;
    }
    if let Some(db) = cli_database_path {
        config.database_path = PathBuf::from(db);
    }

    Ok(config)
}

fn parse_addr(s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", s, e)))
}

/// Parse a TOML config file into its partial representation
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Locate the config file for the platform, if one exists
fn find_config_file() -> Option<PathBuf> {
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("locsync").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/locsync/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("locsync"))
        .unwrap_or_else(|| PathBuf::from("./locsync_data"))
}
