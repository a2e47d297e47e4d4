//! Solve output.

pub use crate::tracker::Solution;
use crate::model::Score;

/// Counters describing a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    /// Independent trials run (restarts and perturbations).
    pub trials: usize,
    /// Trials abandoned because randomized placement found no room for
    /// some unit.
    pub failed_placements: usize,
}

/// Every distinct best-scoring assignment found.
///
/// `solutions` is ordered by partition key and empty only for a problem
/// without participants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    pub solutions: Vec<Solution>,
    pub stats: SolveStats,
}

impl SolveResult {
    /// Score shared by all solutions.
    pub fn best_score(&self) -> Option<Score> {
        self.solutions.first().map(|s| s.score)
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
