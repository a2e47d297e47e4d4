//! Neighbourhood moves and the local search procedures built on them.
//!
//! Every procedure moves whole units and checks [`Move::is_feasible`]
//! before pricing a candidate, so a feasible assignment stays feasible.

mod anneal;
mod hill_climb;
mod moves;
mod perturb;

pub use anneal::{AnnealStats, Annealer, Schedule};
pub use hill_climb::{best_improving_move, hill_climb};
pub use moves::{Move, Shift};
pub use perturb::perturb;
