//! The immutable problem description handed to the solver.

use super::{Constraint, Score};
use crate::error::SolveError;

/// `count` rooms of capacity `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomGroup {
    pub size: usize,
    pub count: usize,
}

/// A room assignment instance.
///
/// Rooms are interchangeable containers: only their capacities matter,
/// never their identity. A uniform capacity is just a vector of equal
/// values.
///
/// # Examples
///
/// ```
/// use u_rooming::model::{Constraint, Problem};
///
/// let problem = Problem::with_uniform_capacity(
///     5,
///     2,
///     vec![Constraint::prefer(0, 1), Constraint::must_not(1, 2)],
/// )
/// .unwrap()
/// .with_weights(2, 3)
/// .unwrap();
///
/// assert_eq!(problem.capacities(), &[2, 2, 2]);
/// assert_eq!(problem.prefer_not_multiplier(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProblem"))]
pub struct Problem {
    n: usize,
    capacities: Vec<usize>,
    prefer_not_multiplier: Score,
    no_prefer_cost: Score,
    constraints: Vec<Constraint>,
}

/// Wire form of [`Problem`]. Deserialized problems pass through the same
/// checks as the constructors.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProblem {
    n: usize,
    capacities: Vec<usize>,
    #[serde(default = "default_prefer_not_multiplier")]
    prefer_not_multiplier: Score,
    #[serde(default)]
    no_prefer_cost: Score,
    #[serde(default)]
    constraints: Vec<Constraint>,
}

#[cfg(feature = "serde")]
fn default_prefer_not_multiplier() -> Score {
    1
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblem> for Problem {
    type Error = SolveError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        Problem::new(raw.n, raw.capacities, raw.constraints)?
            .with_weights(raw.prefer_not_multiplier, raw.no_prefer_cost)
    }
}

impl Problem {
    /// Creates a problem with an explicit capacity per room.
    ///
    /// Weights default to a prefer-not multiplier of 1 and no penalty for
    /// unmet preferences.
    pub fn new(
        n: usize,
        capacities: Vec<usize>,
        constraints: Vec<Constraint>,
    ) -> Result<Self, SolveError> {
        if n > 0 && capacities.is_empty() {
            return Err(SolveError::NoRooms);
        }
        for c in &constraints {
            for index in [c.a, c.b] {
                if index >= n {
                    return Err(SolveError::ParticipantOutOfRange { index, n });
                }
            }
        }
        Ok(Self {
            n,
            capacities,
            prefer_not_multiplier: 1,
            no_prefer_cost: 0,
            constraints,
        })
    }

    /// Creates a problem with `ceil(n / room_size)` rooms of `room_size`.
    pub fn with_uniform_capacity(
        n: usize,
        room_size: usize,
        constraints: Vec<Constraint>,
    ) -> Result<Self, SolveError> {
        if room_size == 0 {
            return Err(SolveError::ZeroRoomSize);
        }
        let num_rooms = n.div_ceil(room_size);
        Self::new(n, vec![room_size; num_rooms], constraints)
    }

    /// Creates a problem whose rooms are listed group by group.
    pub fn with_room_groups(
        n: usize,
        groups: &[RoomGroup],
        constraints: Vec<Constraint>,
    ) -> Result<Self, SolveError> {
        let capacities = groups
            .iter()
            .flat_map(|g| std::iter::repeat_n(g.size, g.count))
            .collect();
        Self::new(n, capacities, constraints)
    }

    /// Sets the soft-constraint weights.
    ///
    /// `prefer_not_multiplier` must be at least 1 and `no_prefer_cost`
    /// must not be negative.
    pub fn with_weights(
        mut self,
        prefer_not_multiplier: Score,
        no_prefer_cost: Score,
    ) -> Result<Self, SolveError> {
        if prefer_not_multiplier < 1 {
            return Err(SolveError::InvalidWeights(format!(
                "prefer_not_multiplier must be at least 1, got {prefer_not_multiplier}"
            )));
        }
        if no_prefer_cost < 0 {
            return Err(SolveError::InvalidWeights(format!(
                "no_prefer_cost must be at least 0, got {no_prefer_cost}"
            )));
        }
        self.prefer_not_multiplier = prefer_not_multiplier;
        self.no_prefer_cost = no_prefer_cost;
        Ok(self)
    }

    /// Number of participants.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of rooms.
    pub fn num_rooms(&self) -> usize {
        self.capacities.len()
    }

    /// Capacity per room.
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Capacity of `room`.
    pub fn capacity(&self, room: usize) -> usize {
        self.capacities[room]
    }

    /// Seats over all rooms. Below `n` no assignment exists.
    pub fn total_capacity(&self) -> usize {
        self.capacities.iter().sum()
    }

    /// Penalty per `PreferNot` pair sharing a room.
    pub fn prefer_not_multiplier(&self) -> Score {
        self.prefer_not_multiplier
    }

    /// Penalty per `Prefer` issuer with no preference honored.
    pub fn no_prefer_cost(&self) -> Score {
        self.no_prefer_cost
    }

    /// All constraints, in input order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_capacity_rounds_up() {
        let p = Problem::with_uniform_capacity(7, 3, vec![]).unwrap();
        assert_eq!(p.capacities(), &[3, 3, 3]);
        assert_eq!(p.total_capacity(), 9);
    }

    #[test]
    fn test_uniform_capacity_rejects_zero() {
        assert_eq!(
            Problem::with_uniform_capacity(4, 0, vec![]).unwrap_err(),
            SolveError::ZeroRoomSize
        );
    }

    #[test]
    fn test_room_groups_expand_in_order() {
        let groups = [
            RoomGroup { size: 4, count: 1 },
            RoomGroup { size: 2, count: 2 },
        ];
        let p = Problem::with_room_groups(8, &groups, vec![]).unwrap();
        assert_eq!(p.capacities(), &[4, 2, 2]);
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let err = Problem::new(3, vec![3], vec![Constraint::prefer(0, 3)]).unwrap_err();
        assert_eq!(err, SolveError::ParticipantOutOfRange { index: 3, n: 3 });
    }

    #[test]
    fn test_participants_without_rooms() {
        assert_eq!(Problem::new(2, vec![], vec![]).unwrap_err(), SolveError::NoRooms);
        assert!(Problem::new(0, vec![], vec![]).is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_applies_defaults() {
        let p: Problem = serde_json::from_str(r#"{"n":2,"capacities":[2]}"#).unwrap();
        assert_eq!(p.prefer_not_multiplier(), 1);
        assert_eq!(p.no_prefer_cost(), 0);
        assert!(p.constraints().is_empty());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_rejects_out_of_range_endpoint() {
        let json = r#"{"n":2,"capacities":[2],"prefer_not_multiplier":1,"no_prefer_cost":0,
            "constraints":[{"a":0,"b":5,"kind":"prefer"}]}"#;
        let err = serde_json::from_str::<Problem>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_rejects_missing_rooms() {
        let json = r#"{"n":3,"capacities":[],"prefer_not_multiplier":1,"no_prefer_cost":0,
            "constraints":[]}"#;
        let err = serde_json::from_str::<Problem>(json).unwrap_err();
        assert!(err.to_string().contains("at least one room"), "{err}");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_rejects_bad_weights() {
        let json = r#"{"n":2,"capacities":[2],"prefer_not_multiplier":0,"no_prefer_cost":0,
            "constraints":[]}"#;
        assert!(serde_json::from_str::<Problem>(json).is_err());
        let json = r#"{"n":2,"capacities":[2],"prefer_not_multiplier":1,"no_prefer_cost":-3,
            "constraints":[]}"#;
        assert!(serde_json::from_str::<Problem>(json).is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_serialized_problem_reads_back() {
        let p = Problem::with_uniform_capacity(3, 2, vec![Constraint::must_not(0, 2)])
            .unwrap()
            .with_weights(2, 4)
            .unwrap();
        let back: Problem = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(back.capacities(), p.capacities());
        assert_eq!(back.constraints(), p.constraints());
        assert_eq!(back.no_prefer_cost(), 4);
    }

    #[test]
    fn test_weight_validation() {
        let p = Problem::new(2, vec![2], vec![]).unwrap();
        assert!(p.clone().with_weights(0, 0).is_err());
        assert!(p.clone().with_weights(1, -1).is_err());
        let p = p.with_weights(3, 5).unwrap();
        assert_eq!(p.prefer_not_multiplier(), 3);
        assert_eq!(p.no_prefer_cost(), 5);
    }
}
