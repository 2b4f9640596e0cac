//! Application configuration
//!
//! This module provides centralized configuration management using the
//! `config` crate. Configuration can be loaded from environment variables
//! and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub routing: RoutingConfig,
    pub rating: RatingConfig,
}

/// Digit-tree routing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Path to the dial-plan file loaded into the digit tree at startup
    #[serde(default = "default_dial_plan_path")]
    pub dial_plan_path: String,

    /// Path to the fixed-line (two-key) dial-plan file, if any
    #[serde(default)]
    pub fixed_line_plan_path: Option<String>,

    /// Catch-all destination registered at the tree root
    ///
    /// When unset, numbers matching no prefix resolve to an explicit miss.
    #[serde(default)]
    pub default_destination: Option<String>,
}

fn default_dial_plan_path() -> String {
    "config/dial_plan.csv".to_string()
}

/// Rating/balance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RatingConfig {
    /// Default counter validity horizon in days (0 = unbounded)
    #[serde(default)]
    pub counter_horizon_days: i64,
}

impl RatingConfig {
    /// Validity end for a counter starting at `valid_from`
    ///
    /// A horizon of 0 (or less) means the counter never expires and runs
    /// to [`HIGH_DATE`](crate::time::HIGH_DATE).
    pub fn counter_valid_to(&self, valid_from: i64) -> i64 {
        if self.counter_horizon_days <= 0 {
            crate::time::HIGH_DATE
        } else {
            valid_from + self.counter_horizon_days * 86_400
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("routing.dial_plan_path", "config/dial_plan.csv")?
            .set_default("rating.counter_horizon_days", 0)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with MERIDIAN_ prefix
            .add_source(
                Environment::with_prefix("MERIDIAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            counter_horizon_days: 0,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            dial_plan_path: default_dial_plan_path(),
            fixed_line_plan_path: None,
            default_destination: None,
        }
    }
}
