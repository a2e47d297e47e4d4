//! Per-participant lookups derived once from the constraint list.

use super::{Constraint, Kind};

/// Adjacency built from a constraint list.
///
/// Soft constraints are indexed by id so the incremental scorer can walk
/// exactly the constraints touching a moved participant. `MustNot` pairs
/// are kept as a plain partner list, deduplicated per participant.
/// `Must` edges are not indexed; they only shape the units.
#[derive(Debug, Clone)]
pub struct ConstraintIndex {
    by_participant: Vec<Vec<usize>>,
    must_not: Vec<Vec<usize>>,
}

impl ConstraintIndex {
    pub fn build(n: usize, constraints: &[Constraint]) -> Self {
        let mut by_participant = vec![Vec::new(); n];
        let mut must_not: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (ci, c) in constraints.iter().enumerate() {
            match c.kind {
                Kind::Prefer | Kind::PreferNot => {
                    by_participant[c.a].push(ci);
                    if c.b != c.a {
                        by_participant[c.b].push(ci);
                    }
                }
                Kind::MustNot => {
                    must_not[c.a].push(c.b);
                    must_not[c.b].push(c.a);
                }
                Kind::Must => {}
            }
        }
        for partners in &mut must_not {
            partners.sort_unstable();
            partners.dedup();
        }

        Self {
            by_participant,
            must_not,
        }
    }

    /// Ids of the soft constraints with `p` as an endpoint.
    pub fn soft_constraints_of(&self, p: usize) -> &[usize] {
        &self.by_participant[p]
    }

    /// Participants that may never share a room with `p`.
    pub fn must_not_partners(&self, p: usize) -> &[usize] {
        &self.must_not[p]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_partitions_kinds() {
        let constraints = vec![
            Constraint::prefer(0, 1),
            Constraint::must(1, 2),
            Constraint::must_not(0, 2),
            Constraint::must_not(2, 0),
            Constraint::prefer_not(1, 3),
        ];
        let idx = ConstraintIndex::build(4, &constraints);

        assert_eq!(idx.soft_constraints_of(0), &[0]);
        assert_eq!(idx.soft_constraints_of(1), &[0, 4]);
        assert!(idx.soft_constraints_of(2).is_empty());
        assert_eq!(idx.must_not_partners(0), &[2]);
        assert_eq!(idx.must_not_partners(2), &[0]);
    }

    #[test]
    fn test_self_pair_indexed_once() {
        let idx = ConstraintIndex::build(2, &[Constraint::prefer(1, 1)]);
        assert_eq!(idx.soft_constraints_of(1), &[0]);
    }
}
