//! Error types for rating updates and team balancing
//!
//! Fallible operations return the anyhow-backed [`Result`] alias; callers that
//! need to react to a specific condition downcast to [`EloError`].

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Conditions raised by the rating engine and the team balancer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EloError {
    #[error("Score disparity undefined for a {rounds_one}-{rounds_two} match")]
    DivisionUndefined { rounds_one: u32, rounds_two: u32 },

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("Invalid team selection {selection}: {available} option(s) available")]
    InvalidSelection { selection: String, available: usize },

    #[error("Pool of {size} players exceeds the exhaustive balancing limit of {max}")]
    PoolTooLarge { size: usize, max: usize },

    #[error("Invalid player pool: {reason}")]
    InvalidPool { reason: String },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("No recorded matches to revert")]
    EmptyHistory,

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

/// Extract the [`EloError`] behind an anyhow error, if there is one
pub fn as_elo_error(error: &anyhow::Error) -> Option<&EloError> {
    error.downcast_ref::<EloError>()
}
