//! Steepest-ascent hill climbing over unit relocations and swaps.
//!
//! # Algorithm
//!
//! 1. For every unit, price (a) relocation into every other room and
//!    (b) a swap with every later unit in a different room, skipping
//!    infeasible candidates.
//! 2. Commit the single best strictly improving candidate of the round;
//!    earlier candidates win ties.
//! 3. Repeat until a round finds no improvement (local optimum).

use super::Move;
use crate::instance::Instance;
use crate::model::Score;
use crate::scoring::MoveEvaluator;

/// Climbs to a local optimum and returns its score.
pub fn hill_climb<E: MoveEvaluator>(inst: &Instance, eval: &mut E) -> Score {
    while let Some((mv, _)) = best_improving_move(inst, eval) {
        eval.commit(inst, mv);
    }
    eval.score()
}

/// The best strictly improving feasible move, if any.
pub fn best_improving_move<E: MoveEvaluator>(
    inst: &Instance,
    eval: &mut E,
) -> Option<(Move, Score)> {
    let units = inst.num_units();
    let mut best: Option<(Move, Score)> = None;

    let mut consider = |eval: &mut E, mv: Move| {
        if !mv.is_feasible(inst, eval.rooms(), eval.occupancy()) {
            return;
        }
        let delta = eval.delta(inst, mv);
        if delta > best.map_or(0, |(_, d)| d) {
            best = Some((mv, delta));
        }
    };

    for u in 0..units {
        let from = inst.unit_room(eval.rooms(), u);
        for to in (0..inst.num_rooms()).filter(|&r| r != from) {
            consider(&mut *eval, Move::Relocate { unit: u, to });
        }
        for v in (u + 1)..units {
            consider(&mut *eval, Move::Swap { first: u, second: v });
        }
    }
    best
}
