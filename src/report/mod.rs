//! Reporting utilities: batch leaderboard and formatted terminal output.

use crate::app::pipeline::BatchResult;

pub mod format;

pub use format::*;

/// Strongest/weakest profiles by estimated probability (top-N each side).
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub strongest: Vec<BatchResult>,
    pub weakest: Vec<BatchResult>,
}

/// Rank batch results by probability.
///
/// Ties keep input order (stable sort), so the leaderboard is deterministic
/// for a fixed input file.
pub fn rank(results: &[BatchResult], top_n: usize) -> Leaderboard {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        b.output
            .estimate
            .probability_percent
            .partial_cmp(&a.output.estimate.probability_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let strongest = sorted.iter().take(top_n).cloned().collect();
    let weakest = sorted.iter().rev().take(top_n).cloned().collect();

    Leaderboard { strongest, weakest }
}
