//! Objective function and feasibility predicate.
//!
//! # Objective
//!
//! ```text
//! +1                       per Prefer(a, b) with a and b in one room
//! -prefer_not_multiplier   per PreferNot(a, b) with a and b in one room
//! -no_prefer_cost          per participant issuing a Prefer, none of
//!                          whose preferences is honored
//! ```
//!
//! A participant can earn several `+1`s but pays `no_prefer_cost` at most
//! once. `Must` and `MustNot` never contribute to the score.
//!
//! Two evaluators implement [`MoveEvaluator`]: [`FullEvaluator`] rescores
//! the whole assignment for every candidate, [`IncrementalScore`] only
//! revisits constraints crossing the moved units' boundary. Both must
//! agree exactly on every delta.

mod evaluator;
mod incremental;

pub use evaluator::{FullEvaluator, MoveEvaluator};
pub use incremental::IncrementalScore;

use crate::model::{Kind, Problem, Score};

/// Full recomputation of the objective for `rooms` (room per participant).
pub fn score(problem: &Problem, rooms: &[usize]) -> Score {
    let mut total = 0;
    let mut satisfied = vec![false; problem.n()];
    let mut issues_prefer = vec![false; problem.n()];

    for c in problem.constraints() {
        let same = rooms[c.a] == rooms[c.b];
        match c.kind {
            Kind::Prefer => {
                issues_prefer[c.a] = true;
                if same {
                    total += 1;
                    satisfied[c.a] = true;
                }
            }
            Kind::PreferNot if same => total -= problem.prefer_not_multiplier(),
            _ => {}
        }
    }

    let unmet = issues_prefer
        .iter()
        .zip(&satisfied)
        .filter(|&(&issues, &sat)| issues && !sat)
        .count() as Score;
    total - unmet * problem.no_prefer_cost()
}

/// Occupant count per room.
pub fn occupancy(rooms: &[usize], num_rooms: usize) -> Vec<usize> {
    let mut counts = vec![0; num_rooms];
    for &room in rooms {
        counts[room] += 1;
    }
    counts
}

/// Whether `rooms` is a complete assignment satisfying every hard
/// constraint and every room capacity.
pub fn is_feasible(problem: &Problem, rooms: &[usize]) -> bool {
    if rooms.len() != problem.n() || rooms.iter().any(|&r| r >= problem.num_rooms()) {
        return false;
    }
    let hard_ok = problem.constraints().iter().all(|c| match c.kind {
        Kind::Must => rooms[c.a] == rooms[c.b],
        Kind::MustNot => rooms[c.a] != rooms[c.b],
        _ => true,
    });
    hard_ok
        && occupancy(rooms, problem.num_rooms())
            .iter()
            .zip(problem.capacities())
            .all(|(&count, &cap)| count <= cap)
}
