//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{ClubMateError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_assistant_config(&settings.assistant)?;
    validate_mail_config(&settings.mail)?;
    validate_admin_config(&settings.admin)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ClubMateError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(ClubMateError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ClubMateError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate assistant configuration
fn validate_assistant_config(config: &super::AssistantConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(ClubMateError::Config(
            "Assistant API URL is required".to_string(),
        ));
    }

    if config.model.is_empty() {
        return Err(ClubMateError::Config(
            "Assistant model name is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ClubMateError::Config(
            "Assistant timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate mail configuration
fn validate_mail_config(config: &super::MailConfig) -> Result<()> {
    if config.enabled && config.api_url.is_empty() {
        return Err(ClubMateError::Config(
            "Mail API URL is required when mail is enabled".to_string(),
        ));
    }

    if config.enabled && config.from_address.is_empty() {
        return Err(ClubMateError::Config(
            "Mail from address is required when mail is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validate admin gate configuration
fn validate_admin_config(config: &super::AdminConfig) -> Result<()> {
    if config.username.is_empty() || config.password.is_empty() {
        return Err(ClubMateError::Config(
            "Admin demo credentials are required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClubMateError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClubMateError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
