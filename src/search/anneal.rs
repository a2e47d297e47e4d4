//! Simulated annealing trajectory over unit moves.
//!
//! # Temperature
//!
//! Geometric interpolation between the two bounds:
//!
//! ```text
//! T(step) = temp_high * (temp_low / temp_high)^(step / (steps - 1))
//! ```
//!
//! # Acceptance
//!
//! Metropolis with a maximizing objective: a move with `delta >= 0` is
//! always taken, otherwise with probability `exp(delta / T)`. Proposals
//! are priced without being applied, so a rejected proposal needs no
//! revert.

use rand::Rng;

use super::Move;
use crate::instance::Instance;
use crate::scoring::{IncrementalScore, MoveEvaluator};
use crate::tracker::SolutionTracker;

/// Log-linear cooling from `temp_high` down to `temp_low` over `steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub steps: usize,
    pub temp_high: f64,
    pub temp_low: f64,
}

impl Schedule {
    /// Temperature at `step` (0-based). A single-step schedule stays at
    /// `temp_high`.
    pub fn temperature(&self, step: usize) -> f64 {
        if self.steps <= 1 {
            return self.temp_high;
        }
        let progress = step as f64 / (self.steps - 1) as f64;
        self.temp_high * (self.temp_low / self.temp_high).powf(progress)
    }
}

/// Counters of one trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnealStats {
    /// Proposals that passed the feasibility check.
    pub proposed: usize,
    pub accepted: usize,
}

/// One annealing trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Annealer {
    pub schedule: Schedule,
    /// When a swap proposal is infeasible, propose a relocation of the
    /// same unit in the same step instead of skipping the step.
    pub swap_fallback: bool,
}

impl Annealer {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            swap_fallback: false,
        }
    }

    pub fn with_swap_fallback(mut self, enabled: bool) -> Self {
        self.swap_fallback = enabled;
        self
    }

    /// Runs the trajectory on `eval`.
    ///
    /// Every accepted state is offered to `tracker` when one is given.
    /// With fewer than two rooms no move exists and nothing happens.
    pub fn run<R: Rng>(
        &self,
        inst: &Instance,
        eval: &mut IncrementalScore,
        rng: &mut R,
        mut tracker: Option<&mut SolutionTracker>,
    ) -> AnnealStats {
        let mut stats = AnnealStats::default();
        if inst.num_rooms() < 2 || inst.num_units() == 0 {
            return stats;
        }

        for step in 0..self.schedule.steps {
            let Some(mv) = self.propose(inst, eval, rng) else {
                continue;
            };
            stats.proposed += 1;

            let delta = eval.delta(inst, mv);
            let accept = delta >= 0 || {
                let t = self.schedule.temperature(step);
                rng.random::<f64>() < (delta as f64 / t).exp()
            };
            if !accept {
                continue;
            }

            eval.commit(inst, mv);
            stats.accepted += 1;
            if let Some(tracker) = tracker.as_deref_mut() {
                tracker.offer(eval.rooms(), eval.score());
            }
        }
        stats
    }

    /// Draws one feasible move, or `None` if this step's draw was
    /// infeasible.
    fn propose<R: Rng>(
        &self,
        inst: &Instance,
        eval: &IncrementalScore,
        rng: &mut R,
    ) -> Option<Move> {
        let units = inst.num_units();
        let unit = rng.random_range(0..units);

        if rng.random_range(0..3) == 0 && units > 1 {
            let mut second = rng.random_range(0..units - 1);
            if second >= unit {
                second += 1;
            }
            let swap = Move::Swap { first: unit, second };
            if swap.is_feasible(inst, eval.rooms(), eval.occupancy()) {
                return Some(swap);
            }
            if !self.swap_fallback {
                return None;
            }
        }

        let from = inst.unit_room(eval.rooms(), unit);
        let mut to = rng.random_range(0..inst.num_rooms() - 1);
        if to >= from {
            to += 1;
        }
        let relocate = Move::Relocate { unit, to };
        relocate
            .is_feasible(inst, eval.rooms(), eval.occupancy())
            .then_some(relocate)
    }
}
