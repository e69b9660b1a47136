//! Test helpers module
//!
//! Database setup utilities shared by the integration tests.

pub mod database_helper;

pub use database_helper::*;
