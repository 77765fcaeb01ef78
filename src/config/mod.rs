//! Configuration management for the rating engine and team balancer
//!
//! Tunable constants live in explicit structs handed to the engine and the
//! balancer at construction; the application layer loads them from a TOML
//! file or from environment variables.

pub mod app;
pub mod balance;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use balance::BalanceConfig;
pub use rating::{DistributionPolicy, KBucket, RatingConfig};
