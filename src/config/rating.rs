//! Rating system configuration

use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};

/// Volatility factor applied when the score disparity falls in `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KBucket {
    pub lo: f64,
    pub hi: f64,
    pub k: f64,
}

impl KBucket {
    pub const fn new(lo: f64, hi: f64, k: f64) -> Self {
        Self { lo, hi, k }
    }
}

/// How a team's rating delta is shared among its players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionPolicy {
    /// Equal shares scaled by performance against a percentile-weighted expectation
    #[default]
    PerformanceWeighted,
    /// Shares proportional to each player's part of the team rating
    Proportional,
}

impl std::str::FromStr for DistributionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "performance_weighted" | "performance" => Ok(Self::PerformanceWeighted),
            "proportional" => Ok(Self::Proportional),
            _ => Err(anyhow::anyhow!("Invalid distribution policy: {}", s)),
        }
    }
}

impl std::fmt::Display for DistributionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionPolicy::PerformanceWeighted => write!(f, "performance_weighted"),
            DistributionPolicy::Proportional => write!(f, "proportional"),
        }
    }
}

/// Tunable constants of the rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Higher values compress the spread of expected performance across a team
    pub responsibility_factor: f64,
    /// Performance margin worth one full share of the team delta
    pub outperform_threshold: f64,
    /// Checked in order, first match wins
    pub k_buckets: Vec<KBucket>,
    pub default_k: f64,
    pub distribution: DistributionPolicy,
    /// Rating given to players added to a roster without one
    pub initial_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            responsibility_factor: 11.0,
            outperform_threshold: 200.0,
            k_buckets: vec![
                KBucket::new(0.00, 0.25, 120.0), // 0-13 to 3-13
                KBucket::new(0.25, 0.50, 80.0),  // 4-13 to 6-13
                KBucket::new(0.50, 0.80, 40.0),  // 7-13 to 10-13
                KBucket::new(0.80, 1.00, 20.0),  // 11-13 to 13-13
            ],
            default_k: 32.0,
            distribution: DistributionPolicy::PerformanceWeighted,
            initial_rating: 1000.0,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.responsibility_factor.is_finite() && self.responsibility_factor > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "Responsibility factor must be positive".to_string(),
            }
            .into());
        }

        if !(self.outperform_threshold.is_finite() && self.outperform_threshold > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "Outperform threshold must be positive".to_string(),
            }
            .into());
        }

        if !self.default_k.is_finite() || self.default_k < 0.0 {
            return Err(EloError::ConfigurationError {
                message: "Default K must be non-negative".to_string(),
            }
            .into());
        }

        for bucket in &self.k_buckets {
            if !(bucket.lo.is_finite() && bucket.hi.is_finite()) || bucket.lo > bucket.hi {
                return Err(EloError::ConfigurationError {
                    message: format!("Invalid K bucket range [{}, {}]", bucket.lo, bucket.hi),
                }
                .into());
            }
            if !bucket.k.is_finite() || bucket.k < 0.0 {
                return Err(EloError::ConfigurationError {
                    message: format!("K bucket [{}, {}] has negative K", bucket.lo, bucket.hi),
                }
                .into());
            }
        }

        if !self.initial_rating.is_finite() {
            return Err(EloError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
