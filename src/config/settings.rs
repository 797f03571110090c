//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main configuration structure for the participation core
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub payment: PaymentConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

/// Event repository API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Read-only snapshot polling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
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
            .add_source(config::Environment::with_prefix("GATHERLY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GatherlyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.gatherly.app/v1/".to_string(),
                timeout_seconds: 10,
            },
            payment: PaymentConfig {
                base_url: "https://pay.gatherly.app/v1/".to_string(),
                timeout_seconds: 10,
            },
            polling: PollingConfig {
                enabled: true,
                interval_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/gatherly".to_string(),
            },
        }
    }
}
