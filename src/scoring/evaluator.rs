//! Move evaluation seam shared by the search strategies.

use super::{occupancy, score};
use crate::instance::Instance;
use crate::model::Score;
use crate::search::Move;

/// A mutable assignment that can price and commit unit moves.
///
/// Callers check [`Move::is_feasible`] before asking for a delta; the
/// evaluator itself never rejects a move.
pub trait MoveEvaluator {
    /// Room per participant.
    fn rooms(&self) -> &[usize];

    /// Occupant count per room.
    fn occupancy(&self) -> &[usize];

    /// Score of the current assignment.
    fn score(&self) -> Score;

    /// Score change `mv` would cause. Leaves the assignment unchanged.
    fn delta(&mut self, inst: &Instance, mv: Move) -> Score;

    /// Applies `mv` and returns the score change.
    fn commit(&mut self, inst: &Instance, mv: Move) -> Score;

    /// Releases the assignment.
    fn into_rooms(self) -> Vec<usize>;
}

/// Prices every candidate by rescoring the whole assignment.
#[derive(Debug, Clone)]
pub struct FullEvaluator {
    rooms: Vec<usize>,
    occupancy: Vec<usize>,
    score: Score,
}

impl FullEvaluator {
    pub fn new(inst: &Instance, rooms: Vec<usize>) -> Self {
        let occupancy = occupancy(&rooms, inst.num_rooms());
        let score = score(inst.problem(), &rooms);
        Self {
            rooms,
            occupancy,
            score,
        }
    }
}

impl MoveEvaluator for FullEvaluator {
    fn rooms(&self) -> &[usize] {
        &self.rooms
    }

    fn occupancy(&self) -> &[usize] {
        &self.occupancy
    }

    fn score(&self) -> Score {
        self.score
    }

    fn delta(&mut self, inst: &Instance, mv: Move) -> Score {
        let undo = mv.inverse(inst, &self.rooms);
        mv.apply(inst, &mut self.rooms, &mut self.occupancy);
        let candidate = score(inst.problem(), &self.rooms);
        undo.apply(inst, &mut self.rooms, &mut self.occupancy);
        candidate - self.score
    }

    fn commit(&mut self, inst: &Instance, mv: Move) -> Score {
        mv.apply(inst, &mut self.rooms, &mut self.occupancy);
        let previous = self.score;
        self.score = score(inst.problem(), &self.rooms);
        self.score - previous
    }

    fn into_rooms(self) -> Vec<usize> {
        self.rooms
    }
}
