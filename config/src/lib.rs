//! # Configuration Management for report-filter
//!
//! This crate provides the configuration structures consumed by the operator
//! registry, currently the calendar settings used by relative date operators.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::OperatorConfig;
//!
//! // Weeks start on Sunday
//! let operators = OperatorConfig::new(7);
//! assert_eq!(operators.first_day_of_week, 7);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [operators]
//! # 1 = Monday ... 7 = Sunday
//! first_day_of_week = 1
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from report_filter.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./report_filter.toml";
const CONFIG_PATH_VAR: &str = "REPORT_FILTER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub operators: OperatorConfig,
}

/// Operator registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// ISO weekday number the "this week" operator starts on (1 = Monday, 7 = Sunday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,
}

fn default_first_day_of_week() -> u8 {
    1
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: default_first_day_of_week(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env, or the default path
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            // A missing .env file is fine, a malformed one is not
            if let Err(err) = dotenvy::dotenv() {
                if !err.not_found() {
                    return Err(err.into());
                }
            }

            if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
                Self::from_file(&config_path)
            } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as {} or in {} file",
                    CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=7).contains(&self.operators.first_day_of_week) {
            return Err(ConfigError::Invalid(format!(
                "Operators first_day_of_week must be between 1 (Monday) and 7 (Sunday), got {}",
                self.operators.first_day_of_week
            )));
        }

        Ok(())
    }
}

impl OperatorConfig {
    /// Create a new operator configuration
    pub fn new(first_day_of_week: u8) -> Self {
        Self { first_day_of_week }
    }
}
