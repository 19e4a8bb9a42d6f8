//! Near-duplicate rejection for bulk question generation.

use crate::screening::similarity::similarity;

/// Default similarity threshold above which a candidate question is treated
/// as a near-duplicate of an already accepted one.
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.6;

/// Returns true if `candidate` scores above `threshold` against any question
/// in `accepted`. Strictly greater-than: a score exactly at the threshold is
/// still accepted.
pub fn is_near_duplicate<'a, I>(candidate: &str, accepted: I, threshold: f64) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    accepted
        .into_iter()
        .any(|q| similarity(candidate, q) > threshold)
}
