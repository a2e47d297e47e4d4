//! Error type shared by problem construction and solving.

use thiserror::Error;

/// Why a problem could not be built or solved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A `MustNot` pair lies inside one `Must`-connected unit. Detected
    /// from the constraint graph alone, before any search.
    #[error("participants {a} and {b} must room together and apart at the same time")]
    HardConflict { a: usize, b: usize },

    /// No feasible starting assignment could be produced, typically
    /// because some unit does not fit any room or the rooms are too few.
    #[error("no feasible placement of units into rooms was found")]
    NoFeasiblePlacement,

    #[error("participant index {index} out of range for {n} participants")]
    ParticipantOutOfRange { index: usize, n: usize },

    #[error("at least one room is required when there are participants")]
    NoRooms,

    #[error("room size must be positive")]
    ZeroRoomSize,

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
