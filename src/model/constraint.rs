//! Pairwise constraint records.

/// How two participants relate.
///
/// `Must` and `MustNot` are hard: they define feasibility and never
/// contribute to the score. `Prefer` and `PreferNot` are soft: they are
/// traded off by the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Kind {
    /// Both participants share a room.
    Must,
    /// Participant `a` would like to share a room with `b`.
    Prefer,
    /// Sharing a room costs `prefer_not_multiplier`.
    PreferNot,
    /// The participants never share a room.
    MustNot,
}

/// An ordered pair of participant indices with a [`Kind`].
///
/// Direction only matters for [`Kind::Prefer`]: the preference (and the
/// penalty for having none of one's preferences honored) belongs to `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub a: usize,
    pub b: usize,
    pub kind: Kind,
}

impl Constraint {
    pub fn new(a: usize, b: usize, kind: Kind) -> Self {
        Self { a, b, kind }
    }

    pub fn must(a: usize, b: usize) -> Self {
        Self::new(a, b, Kind::Must)
    }

    pub fn prefer(a: usize, b: usize) -> Self {
        Self::new(a, b, Kind::Prefer)
    }

    pub fn prefer_not(a: usize, b: usize) -> Self {
        Self::new(a, b, Kind::PreferNot)
    }

    pub fn must_not(a: usize, b: usize) -> Self {
        Self::new(a, b, Kind::MustNot)
    }
}
