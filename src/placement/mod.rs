//! Starting assignments.
//!
//! - [`backtracking`]: units by descending size, rooms in order, undo on
//!   dead ends. Deterministic.
//! - [`round_robin`]: `i -> i mod rooms`, ignoring every constraint.
//! - [`random`]: random unit order, random room order, first room that
//!   fits. No backtracking.
//! - [`initial`]: backtracking, then a validated round-robin fallback.

use log::{debug, warn};
use rand::Rng;

use crate::instance::Instance;
use crate::scoring::is_feasible;

/// Upper bound on room tries during backtracking. Exhausting it counts
/// as placement failure.
pub const BACKTRACK_BUDGET: usize = 100_000;

/// Finds a complete placement honoring capacities and `MustNot` by
/// depth-first search over units.
///
/// Returns `None` when the search space (or [`BACKTRACK_BUDGET`]) is
/// exhausted. Failure does not prove infeasibility.
pub fn backtracking(inst: &Instance) -> Option<Vec<usize>> {
    backtracking_with_budget(inst, BACKTRACK_BUDGET)
}

pub(crate) fn backtracking_with_budget(inst: &Instance, budget: usize) -> Option<Vec<usize>> {
    let mut search = Backtrack {
        inst,
        order: inst.grouping().by_descending_size(),
        placed: vec![None; inst.problem().n()],
        remaining: inst.problem().capacities().to_vec(),
        budget,
    };
    if search.place(0) {
        search.placed.into_iter().collect()
    } else {
        None
    }
}

struct Backtrack<'a, 'p> {
    inst: &'a Instance<'p>,
    order: Vec<usize>,
    placed: Vec<Option<usize>>,
    remaining: Vec<usize>,
    budget: usize,
}

impl Backtrack<'_, '_> {
    fn place(&mut self, depth: usize) -> bool {
        let Some(&u) = self.order.get(depth) else {
            return true;
        };
        let size = self.inst.grouping().size(u);
        for room in 0..self.inst.num_rooms() {
            if self.remaining[room] < size {
                continue;
            }
            if self.budget == 0 {
                return false;
            }
            self.budget -= 1;
            if conflicts(self.inst, &self.placed, u, room) {
                continue;
            }

            self.assign(u, Some(room));
            self.remaining[room] -= size;
            if self.place(depth + 1) {
                return true;
            }
            self.remaining[room] += size;
            self.assign(u, None);
        }
        false
    }

    fn assign(&mut self, u: usize, room: Option<usize>) {
        for &m in self.inst.grouping().members(u) {
            self.placed[m] = room;
        }
    }
}

/// Whether a placed `MustNot` partner of unit `u` already sits in `room`.
fn conflicts(inst: &Instance, placed: &[Option<usize>], u: usize, room: usize) -> bool {
    inst.grouping().members(u).iter().any(|&m| {
        inst.index()
            .must_not_partners(m)
            .iter()
            .any(|&partner| placed[partner] == Some(room))
    })
}

/// `participant i -> room i mod num_rooms`.
pub fn round_robin(n: usize, num_rooms: usize) -> Vec<usize> {
    (0..n).map(|i| i % num_rooms).collect()
}

/// Greedy randomized placement: units in random order, each into the
/// first room (in random order) with room for it and no `MustNot`
/// partner. Returns `None` as soon as some unit fits nowhere.
pub fn random<R: Rng>(inst: &Instance, rng: &mut R) -> Option<Vec<usize>> {
    let mut placed = vec![None; inst.problem().n()];
    let mut remaining = inst.problem().capacities().to_vec();

    let mut units: Vec<usize> = (0..inst.num_units()).collect();
    u_numflow::random::shuffle(&mut units, rng);
    let mut rooms: Vec<usize> = (0..inst.num_rooms()).collect();

    for u in units {
        let size = inst.grouping().size(u);
        u_numflow::random::shuffle(&mut rooms, rng);
        let room = rooms
            .iter()
            .copied()
            .find(|&r| remaining[r] >= size && !conflicts(inst, &placed, u, r))?;
        for &m in inst.grouping().members(u) {
            placed[m] = Some(room);
        }
        remaining[room] -= size;
    }

    placed.into_iter().collect()
}

/// The deterministic starting point of a solve.
///
/// Backtracking first; if it fails, the round-robin assignment is used
/// only when it happens to satisfy every hard constraint and capacity.
pub fn initial(inst: &Instance) -> Option<Vec<usize>> {
    initial_with_budget(inst, BACKTRACK_BUDGET)
}

pub(crate) fn initial_with_budget(inst: &Instance, budget: usize) -> Option<Vec<usize>> {
    if let Some(rooms) = backtracking_with_budget(inst, budget) {
        return Some(rooms);
    }
    let fallback = round_robin(inst.problem().n(), inst.num_rooms());
    if is_feasible(inst.problem(), &fallback) {
        debug!("backtracking placement failed, using round-robin fallback");
        Some(fallback)
    } else {
        warn!("backtracking placement failed and round-robin fallback is infeasible");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, Problem};

    fn assert_valid(problem: &Problem, rooms: &[usize]) {
        assert!(is_feasible(problem, rooms), "infeasible placement {rooms:?}");
    }

    #[test]
    fn test_backtracking_respects_must_not() {
        let problem = Problem::with_uniform_capacity(
            4,
            2,
            vec![Constraint::must_not(0, 1), Constraint::must_not(2, 3)],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        let rooms = backtracking(&inst).unwrap();
        assert_valid(&problem, &rooms);
    }

    #[test]
    fn test_backtracking_places_larger_units_first() {
        let problem = Problem::new(
            6,
            vec![3, 3],
            vec![
                Constraint::must(0, 1),
                Constraint::must(1, 2),
                Constraint::must(3, 4),
                Constraint::must_not(5, 0),
            ],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        let rooms = backtracking(&inst).unwrap();
        assert_valid(&problem, &rooms);
        assert_eq!(rooms[3], rooms[5]);
    }

    #[test]
    fn test_backtracking_undoes_dead_end() {
        // 0 and 1 share room 0 first; 3 then fits nowhere, so 1 moves.
        let problem = Problem::new(
            4,
            vec![2, 2],
            vec![Constraint::must_not(3, 0), Constraint::must_not(3, 2)],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        let rooms = backtracking(&inst).unwrap();
        assert_valid(&problem, &rooms);
        assert_eq!(rooms[0], rooms[2]);
        assert_eq!(rooms[1], rooms[3]);
        assert_ne!(rooms[0], rooms[1]);
    }

    #[test]
    fn test_backtracking_fails_on_oversized_unit() {
        let problem = Problem::new(
            3,
            vec![2, 2],
            vec![Constraint::must(0, 1), Constraint::must(1, 2)],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        assert!(backtracking(&inst).is_none());
        assert!(initial(&inst).is_none());
    }

    #[test]
    fn test_exhausted_budget_falls_back_to_round_robin() {
        let problem = Problem::new(4, vec![2, 2], vec![Constraint::prefer(0, 2)]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        assert!(backtracking_with_budget(&inst, 0).is_none());
        assert_eq!(initial_with_budget(&inst, 0), Some(vec![0, 1, 0, 1]));
    }

    #[test]
    fn test_exhausted_budget_rejects_infeasible_round_robin() {
        // Round robin splits 0 and 1 across rooms.
        let problem = Problem::new(4, vec![2, 2], vec![Constraint::must(0, 1)]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        assert!(initial_with_budget(&inst, 0).is_none());
        assert!(initial(&inst).is_some());
    }

    #[test]
    fn test_round_robin() {
        assert_eq!(round_robin(5, 2), vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_random_placement_is_feasible() {
        let problem = Problem::with_uniform_capacity(
            9,
            3,
            vec![
                Constraint::must(0, 1),
                Constraint::must_not(0, 2),
                Constraint::must_not(3, 4),
            ],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(7);
        let mut successes = 0;
        for _ in 0..50 {
            if let Some(rooms) = random(&inst, &mut rng) {
                assert_valid(&problem, &rooms);
                successes += 1;
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn test_random_placement_reports_failure() {
        let problem = Problem::new(2, vec![1], vec![]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(1);
        assert!(random(&inst, &mut rng).is_none());
    }
}
