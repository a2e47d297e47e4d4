//! Room assignment under pairwise constraints.
//!
//! Places `n` participants into rooms of fixed capacity subject to four
//! kinds of pairwise constraint:
//!
//! - **Must** / **MustNot**: hard. Participants joined by `Must` form a
//!   unit that is always placed together; a `MustNot` pair never shares
//!   a room.
//! - **Prefer** / **PreferNot**: soft. Each honored preference earns a
//!   point, each shared `PreferNot` room costs a configurable weight, and
//!   a participant none of whose preferences is honored pays a flat
//!   penalty once.
//!
//! The solver returns every structurally distinct assignment reaching the
//! best score it found.
//!
//! # Pipeline
//!
//! 1. [`grouping`]: union-find over `Must` edges, hard-conflict check.
//! 2. [`placement`]: backtracking bin packing for a feasible start.
//! 3. [`search`]: hill climbing, perturbation and annealing over unit
//!    moves, priced by [`scoring`].
//! 4. [`tracker`]: best-score set deduplicated by partition.
//!
//! [`solver::Solver`] ties these together behind a [`solver::Strategy`].
//!
//! # Example
//!
//! ```
//! use u_rooming::model::{Constraint, Problem};
//! use u_rooming::solver::{Solver, Strategy};
//!
//! let problem = Problem::with_uniform_capacity(
//!     6,
//!     3,
//!     vec![
//!         Constraint::must(0, 1),
//!         Constraint::must_not(0, 2),
//!         Constraint::prefer(3, 2),
//!     ],
//! )
//! .unwrap();
//! let mut rng = u_numflow::random::create_rng(1);
//! let result = Solver::run(&problem, &Strategy::default(), &mut rng).unwrap();
//! for solution in &result.solutions {
//!     assert_eq!(solution.assignment[0], solution.assignment[1]);
//!     assert_ne!(solution.assignment[0], solution.assignment[2]);
//! }
//! ```

pub mod error;
pub mod grouping;
pub mod instance;
pub mod model;
pub mod placement;
pub mod scoring;
pub mod search;
pub mod solver;
pub mod tracker;

pub use error::SolveError;
pub use model::{Constraint, Kind, Problem, RoomGroup, Score};
pub use solver::{Solution, SolveResult, Solver, Strategy};
