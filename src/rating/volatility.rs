//! Volatility factor selection from the round score
//!
//! Lopsided results move ratings further than close ones. The disparity of a
//! score is `min / max` of the two round counts and is mapped onto a K value
//! through an ordered list of inclusive buckets.

use crate::config::KBucket;
use crate::error::{EloError, Result};
use crate::utils::in_range;
use tracing::debug;

/// Ratio of the losing side's rounds to the winning side's, in [0, 1]
///
/// Fails with [`EloError::DivisionUndefined`] for a 0-0 score.
pub fn decisiveness(rounds_one: u32, rounds_two: u32) -> Result<f64> {
    let high = rounds_one.max(rounds_two);
    if high == 0 {
        return Err(EloError::DivisionUndefined {
            rounds_one,
            rounds_two,
        }
        .into());
    }

    Ok(f64::from(rounds_one.min(rounds_two)) / f64::from(high))
}

/// Pick the K value for a round score
///
/// Buckets are inclusive on both ends and overlap at their edges; the first
/// bucket in list order that contains the disparity wins. `default_k` is
/// returned when no bucket matches.
pub fn determine_k(
    rounds_one: u32,
    rounds_two: u32,
    buckets: &[KBucket],
    default_k: f64,
) -> Result<f64> {
    let disparity = decisiveness(rounds_one, rounds_two)?;

    let k = buckets
        .iter()
        .find(|bucket| in_range(disparity, bucket.lo, bucket.hi))
        .map(|bucket| bucket.k)
        .unwrap_or(default_k);

    debug!(
        "Score {}-{} has disparity {:.3}, using K={}",
        rounds_one, rounds_two, disparity, k
    );

    Ok(k)
}
