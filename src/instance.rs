//! Per-solve view of a [`Problem`] with its derived structures.

use crate::error::SolveError;
use crate::grouping::Grouping;
use crate::model::{ConstraintIndex, Problem};

/// A problem together with its units and constraint index.
///
/// Built once per solve call; everything in it is read-only afterwards,
/// so one instance can be shared by parallel trials.
#[derive(Debug, Clone)]
pub struct Instance<'p> {
    problem: &'p Problem,
    grouping: Grouping,
    index: ConstraintIndex,
}

impl<'p> Instance<'p> {
    /// # Errors
    ///
    /// [`SolveError::HardConflict`] if a `MustNot` pair is forced together.
    pub fn new(problem: &'p Problem) -> Result<Self, SolveError> {
        let grouping = Grouping::build(problem.n(), problem.constraints())?;
        let index = ConstraintIndex::build(problem.n(), problem.constraints());
        Ok(Self {
            problem,
            grouping,
            index,
        })
    }

    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn index(&self) -> &ConstraintIndex {
        &self.index
    }

    pub fn num_units(&self) -> usize {
        self.grouping.num_units()
    }

    pub fn num_rooms(&self) -> usize {
        self.problem.num_rooms()
    }

    /// Room currently holding unit `u`.
    pub fn unit_room(&self, rooms: &[usize], u: usize) -> usize {
        rooms[self.grouping.members(u)[0]]
    }
}
