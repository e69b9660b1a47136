//! ClubMate Admission Service
//!
//! Backend core for the ClubMate campus events platform: decides event
//! registrations and club joins, aggregates a user's admissions for
//! display, grounds the campus assistant in live event/club data, and
//! provides the admin authoring surface.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClubMateError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
