//! Error handling for ClubMate
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the ClubMate application
#[derive(Error, Debug)]
pub enum ClubMateError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Assistant API error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Mail dispatch error: {0}")]
    Mail(#[from] MailError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No signed-in user; sign in before registering or joining")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: i64, user_id: String },

    #[error("User {user_id} already has a pending or approved join for club {club_id}")]
    AlreadyJoined { club_id: i64, user_id: String },

    #[error("Event {event_id} is full (capacity {capacity})")]
    CapacityExceeded { event_id: i64, capacity: i32 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Club not found: {club_id}")]
    ClubNotFound { club_id: i64 },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Assistant completion API specific errors
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Completion request failed: {0}")]
    RequestFailed(String),

    #[error("Completion request timed out")]
    Timeout,

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Completion service unavailable")]
    ServiceUnavailable,
}

/// Mail API specific errors
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail request failed: {0}")]
    RequestFailed(String),

    #[error("Mail service rejected the message: {0}")]
    Rejected(String),

    #[error("Mail service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for ClubMate operations
pub type Result<T> = std::result::Result<T, ClubMateError>;

/// Result type alias for assistant operations
pub type AssistantResult<T> = std::result::Result<T, AssistantError>;

impl ClubMateError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClubMateError::Database(_) => false,
            ClubMateError::Migration(_) => false,
            ClubMateError::Assistant(_) => true,
            ClubMateError::Mail(_) => true,
            ClubMateError::Config(_) => false,
            ClubMateError::Unauthenticated => false,
            ClubMateError::Validation(_) => false,
            ClubMateError::AlreadyRegistered { .. } => false,
            ClubMateError::AlreadyJoined { .. } => false,
            ClubMateError::CapacityExceeded { .. } => false,
            ClubMateError::EventNotFound { .. } => false,
            ClubMateError::ClubNotFound { .. } => false,
            ClubMateError::Http(_) => true,
            ClubMateError::Serialization(_) => false,
            ClubMateError::Io(_) => true,
            ClubMateError::ServiceUnavailable(_) => true,
        }
    }

    /// Message shown to the user as a transient notification, if the error
    /// is one the UI surfaces directly. Admission failures never propagate
    /// past the call site uncaught.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            ClubMateError::Unauthenticated => Some("Please sign in to continue".to_string()),
            ClubMateError::Validation(msg) => Some(msg.clone()),
            ClubMateError::AlreadyRegistered { .. } => {
                Some("You are already registered for this event".to_string())
            }
            ClubMateError::AlreadyJoined { .. } => {
                Some("You have already requested to join this club".to_string())
            }
            ClubMateError::CapacityExceeded { .. } => Some("This event is full".to_string()),
            ClubMateError::EventNotFound { .. } => {
                Some("This event no longer exists".to_string())
            }
            ClubMateError::ClubNotFound { .. } => Some("This club no longer exists".to_string()),
            ClubMateError::Assistant(_) => {
                Some("The assistant is unavailable right now. Please try again.".to_string())
            }
            _ => None,
        }
    }
}
