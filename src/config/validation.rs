//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GatherlyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_payment_config(&settings.payment)?;
    validate_polling_config(&settings.polling)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate event repository API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(GatherlyError::Config(
            "Event repository base URL is required".to_string(),
        ));
    }

    if url::Url::parse(&config.base_url).is_err() {
        return Err(GatherlyError::Config(
            "Event repository base URL is not a valid URL".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GatherlyError::Config(
            "Event repository timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate payment gateway configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(GatherlyError::Config(
            "Payment gateway base URL is required".to_string(),
        ));
    }

    if url::Url::parse(&config.base_url).is_err() {
        return Err(GatherlyError::Config(
            "Payment gateway base URL is not a valid URL".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GatherlyError::Config(
            "Payment gateway timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate polling configuration
fn validate_polling_config(config: &super::PollingConfig) -> Result<()> {
    if config.enabled && config.interval_seconds == 0 {
        return Err(GatherlyError::Config(
            "Polling interval must be greater than 0 when polling is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GatherlyError::Config(
            "Logging level is required".to_string(),
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
        return Err(GatherlyError::Config(format!(
            "Invalid logging level: {}",
            config.level
        )));
    }

    Ok(())
}
