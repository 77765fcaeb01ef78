//! Team balancing for a pool of players
//!
//! The exhaustive balancer guarantees the globally most even split for small
//! pools; the greedy balancer is the fallback for anything larger.

pub mod exhaustive;
pub mod greedy;
pub mod permutations;
pub mod selection;

// Re-export commonly used types
pub use exhaustive::{assign_ids, validate_pool, TeamBalancer};
pub use greedy::greedy_balance;
pub use permutations::Permutations;
pub use selection::{select_by_id, select_by_rank};
