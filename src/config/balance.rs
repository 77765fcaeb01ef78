//! Team balancer configuration

use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};

/// Hard ceiling on the exhaustive search, regardless of configuration
pub const MAX_EXHAUSTIVE_POOL_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Largest pool the exhaustive balancer accepts
    pub max_pool_size: usize,
    /// Number of ranked splits returned
    pub top_n_options: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_pool_size: 10,
            top_n_options: 10,
        }
    }
}

impl BalanceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_pool_size > MAX_EXHAUSTIVE_POOL_SIZE {
            return Err(EloError::ConfigurationError {
                message: format!(
                    "Max pool size {} exceeds the ceiling of {}",
                    self.max_pool_size, MAX_EXHAUSTIVE_POOL_SIZE
                ),
            }
            .into());
        }

        if self.top_n_options == 0 {
            return Err(EloError::ConfigurationError {
                message: "Number of team options must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BalanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_pool_limit() {
        let config = BalanceConfig {
            max_pool_size: 13,
            ..BalanceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_options() {
        let config = BalanceConfig {
            top_n_options: 0,
            ..BalanceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
