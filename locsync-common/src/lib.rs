//! # locsync Common Library
//!
//! Shared code for the locsync services:
//! - Database initialization and persisted models
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
