//! Boundary-only score maintenance.
//!
//! Moving a unit only changes the "same room" status of soft constraints
//! with exactly one endpoint inside the moved set. For each such
//! constraint the contribution is flipped, and `Prefer` issuers get their
//! satisfied-preference counter adjusted; the `no_prefer_cost` term then
//! changes only for issuers whose counter crosses zero.
//!
//! Cost per evaluated move: O(moved members x soft-constraint degree).

use super::{occupancy, score, MoveEvaluator};
use crate::instance::Instance;
use crate::model::{Kind, Score};
use crate::search::{Move, Shift};

/// Assignment plus the counters needed to price moves incrementally.
#[derive(Debug, Clone)]
pub struct IncrementalScore {
    rooms: Vec<usize>,
    occupancy: Vec<usize>,
    /// Satisfied `Prefer` constraints per issuer.
    satisfied: Vec<u32>,
    score: Score,

    // Scratch: constraint visit stamps and per-issuer pending changes.
    stamp: Vec<u32>,
    epoch: u32,
    pending: Vec<i32>,
    touched: Vec<usize>,
}

impl IncrementalScore {
    pub fn new(inst: &Instance, rooms: Vec<usize>) -> Self {
        let problem = inst.problem();
        let mut satisfied = vec![0; problem.n()];
        for c in problem.constraints() {
            if c.kind == Kind::Prefer && rooms[c.a] == rooms[c.b] {
                satisfied[c.a] += 1;
            }
        }
        Self {
            occupancy: occupancy(&rooms, inst.num_rooms()),
            score: score(problem, &rooms),
            rooms,
            satisfied,
            stamp: vec![0; problem.constraints().len()],
            epoch: 0,
            pending: vec![0; problem.n()],
            touched: Vec::new(),
        }
    }

    fn next_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamp.fill(0);
            self.epoch = 1;
        }
    }

    /// Prices `mv`; with `commit` also applies it.
    fn evaluate(&mut self, inst: &Instance, mv: Move, commit: bool) -> Score {
        let problem = inst.problem();
        let grouping = inst.grouping();
        let (a, b) = mv.shifts(inst, &self.rooms);
        let destination = |p: usize, rooms: &[usize]| -> usize {
            let u = grouping.unit_of(p);
            if u == a.unit {
                a.to
            } else if let Some(b) = b.filter(|b| b.unit == u) {
                b.to
            } else {
                rooms[p]
            }
        };

        self.next_epoch();
        let mut delta: Score = 0;

        for shift in std::iter::once(a).chain(b) {
            for &m in grouping.members(shift.unit) {
                for &ci in inst.index().soft_constraints_of(m) {
                    if self.stamp[ci] == self.epoch {
                        continue;
                    }
                    self.stamp[ci] = self.epoch;

                    let c = &problem.constraints()[ci];
                    let was = self.rooms[c.a] == self.rooms[c.b];
                    let will = destination(c.a, &self.rooms) == destination(c.b, &self.rooms);
                    if was == will {
                        continue;
                    }
                    match c.kind {
                        Kind::Prefer => {
                            let change = if will { 1 } else { -1 };
                            delta += Score::from(change);
                            if self.pending[c.a] == 0 && !self.touched.contains(&c.a) {
                                self.touched.push(c.a);
                            }
                            self.pending[c.a] += change;
                        }
                        Kind::PreferNot => {
                            let weight = problem.prefer_not_multiplier();
                            delta += if will { -weight } else { weight };
                        }
                        Kind::Must | Kind::MustNot => {}
                    }
                }
            }
        }

        for i in 0..self.touched.len() {
            let p = self.touched[i];
            let change = std::mem::take(&mut self.pending[p]);
            let before = self.satisfied[p];
            let after = (i64::from(before) + i64::from(change)) as u32;
            if before > 0 && after == 0 {
                delta -= problem.no_prefer_cost();
            } else if before == 0 && after > 0 {
                delta += problem.no_prefer_cost();
            }
            if commit {
                self.satisfied[p] = after;
            }
        }
        self.touched.clear();

        if commit {
            self.write(inst, a);
            if let Some(b) = b {
                self.write(inst, b);
            }
            self.score += delta;
        }
        delta
    }

    fn write(&mut self, inst: &Instance, shift: Shift) {
        let members = inst.grouping().members(shift.unit);
        self.occupancy[shift.from] -= members.len();
        self.occupancy[shift.to] += members.len();
        for &m in members {
            self.rooms[m] = shift.to;
        }
    }
}

impl MoveEvaluator for IncrementalScore {
    fn rooms(&self) -> &[usize] {
        &self.rooms
    }

    fn occupancy(&self) -> &[usize] {
        &self.occupancy
    }

    fn score(&self) -> Score {
        self.score
    }

    fn delta(&mut self, inst: &Instance, mv: Move) -> Score {
        self.evaluate(inst, mv, false)
    }

    fn commit(&mut self, inst: &Instance, mv: Move) -> Score {
        self.evaluate(inst, mv, true)
    }

    fn into_rooms(self) -> Vec<usize> {
        self.rooms
    }
}
