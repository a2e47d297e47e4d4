//! Union-find reduction of `Must` constraints into placement units.
//!
//! Every `Must` edge merges its endpoints; each connected component becomes
//! one unit that the search moves as a whole. A `MustNot` pair whose
//! endpoints end up in one unit makes the instance infeasible regardless of
//! room capacities.

mod union_find;

pub use union_find::UnionFind;

use crate::error::SolveError;
use crate::model::{Constraint, Kind};

/// The units of one solve call. Built once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Grouping {
    units: Vec<Vec<usize>>,
    unit_of: Vec<usize>,
}

impl Grouping {
    /// Groups `0..n` by the `Must` relation.
    ///
    /// Units are ordered by their union-find root; members within a unit
    /// are ascending.
    ///
    /// # Errors
    ///
    /// [`SolveError::HardConflict`] naming the first `MustNot` pair (in
    /// constraint order) that falls inside one unit.
    pub fn build(n: usize, constraints: &[Constraint]) -> Result<Self, SolveError> {
        let mut uf = UnionFind::new(n);
        for c in constraints.iter().filter(|c| c.kind == Kind::Must) {
            uf.union(c.a, c.b);
        }

        if let Some(c) = constraints
            .iter()
            .filter(|c| c.kind == Kind::MustNot)
            .find(|c| uf.find(c.a) == uf.find(c.b))
        {
            return Err(SolveError::HardConflict { a: c.a, b: c.b });
        }

        let root_of: Vec<usize> = (0..n).map(|p| uf.find(p)).collect();
        let mut roots: Vec<usize> = root_of.clone();
        roots.sort_unstable();
        roots.dedup();

        let mut unit_by_root = vec![usize::MAX; n];
        for (u, &root) in roots.iter().enumerate() {
            unit_by_root[root] = u;
        }

        let mut units = vec![Vec::new(); roots.len()];
        let mut unit_of = vec![0; n];
        for (p, &root) in root_of.iter().enumerate() {
            let u = unit_by_root[root];
            units[u].push(p);
            unit_of[p] = u;
        }

        Ok(Self { units, unit_of })
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    /// Members of unit `u`, ascending.
    pub fn members(&self, u: usize) -> &[usize] {
        &self.units[u]
    }

    pub fn size(&self, u: usize) -> usize {
        self.units[u].len()
    }

    /// Unit containing participant `p`.
    pub fn unit_of(&self, p: usize) -> usize {
        self.unit_of[p]
    }

    /// Unit indices sorted by descending size, ties by unit order.
    pub fn by_descending_size(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.units.len()).collect();
        order.sort_by_key(|&u| std::cmp::Reverse(self.units[u].len()));
        order
    }
}
