//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, run_migrations, DatabasePool, PoolConfig};
pub use repositories::{ClubJoinRepository, ClubRepository, EventRepository, RegistrationRepository};
pub use service::DatabaseService;
