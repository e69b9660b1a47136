//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub assistant: AssistantConfig,
    pub mail: MailConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Assistant completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

/// Mail dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    pub enabled: bool,
}

/// Admin gate configuration (demo credential pair, not real authentication)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CLUBMATE"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ClubMateError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/clubmate".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            assistant: AssistantConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                api_key: String::new(),
                model: "gemini-1.5-flash".to_string(),
                timeout_seconds: 30,
            },
            mail: MailConfig {
                api_url: "https://api.mail.local/v1/send".to_string(),
                api_key: String::new(),
                from_address: "ClubMate <noreply@clubmate.app>".to_string(),
                enabled: false,
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/clubmate".to_string(),
            },
        }
    }
}
