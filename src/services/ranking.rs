// src/services/ranking.rs
use std::cmp::Ordering;

use crate::message::Gem;

/// Places at or above this review count are too well-known to be gems.
pub const MAX_REVIEW_COUNT: u64 = 300;

/// How many gems a discovery round may yield.
pub const MAX_RESULTS: usize = 3;

/// Normalize a candidate set to the hidden-gem contract: fewer than 300
/// reviews, best-rated first, at most three. The runtime's analysis tool
/// applies the same rule, but its output is model-mediated and not
/// guaranteed, so the backend re-applies it before caching. Sort is stable,
/// so equally-rated gems keep their incoming order.
pub fn rank_gems(mut gems: Vec<Gem>) -> Vec<Gem> {
    gems.retain(|gem| gem.review_count < MAX_REVIEW_COUNT);
    gems.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    gems.truncate(MAX_RESULTS);
    gems
}
