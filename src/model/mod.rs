//! Problem model: participants, rooms, and pairwise constraints.
//!
//! A [`Problem`] is everything the solver sees: a participant count `n`,
//! one capacity per room, the two soft-constraint weights, and a flat list
//! of [`Constraint`]s over participant indices `0..n`. Identities, roles,
//! and per-role overrides live with the caller.

mod constraint;
mod index;
mod problem;

pub use constraint::{Constraint, Kind};
pub use index::ConstraintIndex;
pub use problem::{Problem, RoomGroup};

/// Objective value. Higher is better.
pub type Score = i64;
