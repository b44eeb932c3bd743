//! HTTP API endpoints

pub mod content;
pub mod health;
pub mod locations;
pub mod webhook;

pub use content::content_routes;
pub use health::health_routes;
pub use locations::location_routes;
pub use webhook::webhook_routes;
