//! Best-score solution set with partition-level deduplication.
//!
//! Two assignments that differ only by room labels describe the same
//! partition of participants and are stored once, keyed by
//! [`PartitionKey`]. A strictly better score discards everything recorded
//! so far; an equal score adds the assignment if its partition is new;
//! a lower score is ignored.

use std::collections::BTreeMap;

use rand::Rng;

use crate::model::Score;

/// Room-label independent encoding of which participants share a room.
///
/// Members of each room are listed in ascending order, rooms are ordered
/// by their smallest member, and the result is rendered as
/// `"0,3;1,2;"`. Empty rooms do not appear.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// Key of the assignment `rooms` (room per participant).
    pub fn of(rooms: &[usize]) -> Self {
        // Walking participants in order visits each room first at its
        // smallest member, which fixes the room order.
        let mut slot_of_room = BTreeMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (p, &room) in rooms.iter().enumerate() {
            let slot = *slot_of_room.entry(room).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(p);
        }

        let mut key = String::new();
        for group in &groups {
            let members: Vec<String> = group.iter().map(usize::to_string).collect();
            key.push_str(&members.join(","));
            key.push(';');
        }
        PartitionKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A best-scoring assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Room index per participant.
    pub assignment: Vec<usize>,
    pub score: Score,
}

/// The best score seen so far and every distinct partition achieving it.
#[derive(Debug, Clone, Default)]
pub struct SolutionTracker {
    best: Option<Score>,
    members: BTreeMap<PartitionKey, Vec<usize>>,
}

impl SolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rooms` with `score`. Returns `true` if it became a member.
    pub fn offer(&mut self, rooms: &[usize], score: Score) -> bool {
        match self.best {
            Some(best) if score < best => return false,
            Some(best) if score == best => {}
            _ => {
                self.best = Some(score);
                self.members.clear();
            }
        }
        let key = PartitionKey::of(rooms);
        if self.members.contains_key(&key) {
            return false;
        }
        self.members.insert(key, rooms.to_vec());
        true
    }

    /// Folds `other` into `self`. Equivalent to offering every member of
    /// `other` in turn, so merging is order independent.
    pub fn merge(&mut self, other: SolutionTracker) {
        let Some(score) = other.best else {
            return;
        };
        match self.best {
            Some(best) if score < best => {}
            Some(best) if score == best => {
                for (key, rooms) in other.members {
                    self.members.entry(key).or_insert(rooms);
                }
            }
            _ => *self = other,
        }
    }

    pub fn best_score(&self) -> Option<Score> {
        self.best
    }

    /// Number of distinct best partitions.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A uniformly random best assignment.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&[usize]> {
        if self.members.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.members.len());
        self.members.values().nth(i).map(Vec::as_slice)
    }

    /// The best assignment with the smallest partition key.
    pub fn first(&self) -> Option<&[usize]> {
        self.members.values().next().map(Vec::as_slice)
    }

    /// Best assignments paired with the best score, ordered by key.
    pub fn into_solutions(self) -> Vec<Solution> {
        let Some(score) = self.best else {
            return Vec::new();
        };
        self.members
            .into_values()
            .map(|assignment| Solution { assignment, score })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_ignores_room_labels() {
        assert_eq!(PartitionKey::of(&[0, 1, 1, 0]).as_str(), "0,3;1,2;");
        assert_eq!(PartitionKey::of(&[0, 1, 1, 0]), PartitionKey::of(&[5, 2, 2, 5]));
        assert_ne!(PartitionKey::of(&[0, 1, 1, 0]), PartitionKey::of(&[0, 0, 1, 1]));
    }

    #[test]
    fn test_relabelled_assignment_is_one_entry() {
        let mut t = SolutionTracker::new();
        assert!(t.offer(&[0, 0, 1, 1], 3));
        assert!(!t.offer(&[1, 1, 0, 0], 3));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_tied_partitions_both_kept() {
        let mut t = SolutionTracker::new();
        t.offer(&[0, 0, 1, 1], 3);
        t.offer(&[0, 1, 0, 1], 3);
        assert_eq!(t.len(), 2);
        assert_eq!(t.best_score(), Some(3));
    }

    #[test]
    fn test_improvement_resets_members() {
        let mut t = SolutionTracker::new();
        t.offer(&[0, 0, 1, 1], 3);
        t.offer(&[0, 1, 0, 1], 3);
        assert!(!t.offer(&[0, 1, 1, 0], 2));
        assert!(t.offer(&[0, 1, 1, 0], 4));
        assert_eq!(t.len(), 1);
        let solutions = t.into_solutions();
        assert_eq!(
            solutions,
            vec![Solution {
                assignment: vec![0, 1, 1, 0],
                score: 4
            }]
        );
    }

    #[test]
    fn test_pick_and_first() {
        let mut t = SolutionTracker::new();
        let mut rng = u_numflow::random::create_rng(1);
        assert!(t.pick(&mut rng).is_none());
        t.offer(&[0, 1, 0, 1], 0);
        t.offer(&[0, 0, 1, 1], 0);
        assert_eq!(t.first(), Some(&[0, 0, 1, 1][..]));
        for _ in 0..20 {
            let picked = t.pick(&mut rng).unwrap();
            assert!(picked == [0, 0, 1, 1] || picked == [0, 1, 0, 1]);
        }
    }

    #[test]
    fn test_merge_into_empty() {
        let mut a = SolutionTracker::new();
        let mut b = SolutionTracker::new();
        b.offer(&[0, 1], -2);
        a.merge(b);
        assert_eq!(a.best_score(), Some(-2));
        a.merge(SolutionTracker::new());
        assert_eq!(a.len(), 1);
    }

    fn arb_offers() -> impl Strategy<Value = Vec<(Vec<usize>, Score)>> {
        prop::collection::vec((prop::collection::vec(0usize..3, 4), -3i64..3), 0..12)
    }

    fn build(offers: &[(Vec<usize>, Score)]) -> SolutionTracker {
        let mut t = SolutionTracker::new();
        for (rooms, score) in offers {
            t.offer(rooms, *score);
        }
        t
    }

    fn keys(t: &SolutionTracker) -> Vec<PartitionKey> {
        t.members.keys().cloned().collect()
    }

    proptest! {
        #[test]
        fn prop_merge_order_independent(left in arb_offers(), right in arb_offers()) {
            let mut ab = build(&left);
            ab.merge(build(&right));
            let mut ba = build(&right);
            ba.merge(build(&left));
            let mut all = left.clone();
            all.extend(right.iter().cloned());
            let flat = build(&all);

            prop_assert_eq!(ab.best_score(), ba.best_score());
            prop_assert_eq!(keys(&ab), keys(&ba));
            prop_assert_eq!(keys(&ab), keys(&flat));
        }

        #[test]
        fn prop_best_score_never_decreases(offers in arb_offers()) {
            let mut t = SolutionTracker::new();
            let mut previous = None;
            for (rooms, score) in &offers {
                t.offer(rooms, *score);
                prop_assert!(t.best_score() >= previous);
                previous = t.best_score();
            }
        }
    }
}
