//! Main application configuration
//!
//! This module defines the top-level configuration for the scrim-elo binary,
//! including TOML file loading, environment variable overrides and validation.

use crate::config::{BalanceConfig, DistributionPolicy, RatingConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub balance: BalanceConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scrim-elo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(factor) = env::var("RESPONSIBILITY_FACTOR") {
            config.rating.responsibility_factor = factor
                .parse()
                .map_err(|_| anyhow!("Invalid RESPONSIBILITY_FACTOR value: {}", factor))?;
        }
        if let Ok(threshold) = env::var("OUTPERFORM_THRESHOLD") {
            config.rating.outperform_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid OUTPERFORM_THRESHOLD value: {}", threshold))?;
        }
        if let Ok(k) = env::var("DEFAULT_K") {
            config.rating.default_k = k
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_K value: {}", k))?;
        }
        if let Ok(initial) = env::var("INITIAL_RATING") {
            config.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(policy) = env::var("DISTRIBUTION_POLICY") {
            config.rating.distribution = policy
                .parse::<DistributionPolicy>()
                .map_err(|_| anyhow!("Invalid DISTRIBUTION_POLICY value: {}", policy))?;
        }

        // Balance settings
        if let Ok(size) = env::var("MAX_BALANCE_POOL_SIZE") {
            config.balance.max_pool_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_BALANCE_POOL_SIZE value: {}", size))?;
        }
        if let Ok(options) = env::var("TEAM_SELECTION_NUM_OPTIONS") {
            config.balance.top_n_options = options
                .parse()
                .map_err(|_| anyhow!("Invalid TEAM_SELECTION_NUM_OPTIONS value: {}", options))?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;
    config.balance.validate()?;

    Ok(())
}
