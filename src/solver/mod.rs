//! Solve entry point.
//!
//! [`Solver::run`] validates the strategy, rejects hard conflicts, finds a
//! feasible starting placement and then runs one of four strategies:
//!
//! - [`Strategy::HillClimb`]: one steepest-ascent climb.
//! - [`Strategy::LocalSearch`]: randomized restarts followed by iterated
//!   local search (perturb a tracked best, climb, record).
//! - [`Strategy::Annealing`]: independent annealing restarts, recording
//!   every accepted state.
//! - [`Strategy::Hybrid`]: annealing restarts whose end states are
//!   climbed before being recorded.
//!
//! All randomness comes from the caller's RNG. Trials receive sub-seeds
//! drawn from it up front, so results do not depend on whether trials run
//! sequentially or on the rayon pool.

mod config;
mod runner;
mod types;

pub use config::{
    AnnealingConfig, HillClimbConfig, HybridConfig, LocalSearchConfig, ScoringMode, Strategy,
};
pub use runner::Solver;
pub use types::{Solution, SolveResult, SolveStats};
