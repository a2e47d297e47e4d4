//! Unit moves and their feasibility check.

use crate::instance::Instance;

/// A change to the room of one or two units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Move `unit` into room `to`.
    Relocate { unit: usize, to: usize },
    /// Exchange the rooms of two units.
    Swap { first: usize, second: usize },
}

/// One unit changing rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub unit: usize,
    pub from: usize,
    pub to: usize,
}

impl Move {
    /// Resolves the move against the current rooms.
    pub fn shifts(self, inst: &Instance, rooms: &[usize]) -> (Shift, Option<Shift>) {
        match self {
            Move::Relocate { unit, to } => (
                Shift {
                    unit,
                    from: inst.unit_room(rooms, unit),
                    to,
                },
                None,
            ),
            Move::Swap { first, second } => {
                let r1 = inst.unit_room(rooms, first);
                let r2 = inst.unit_room(rooms, second);
                (
                    Shift {
                        unit: first,
                        from: r1,
                        to: r2,
                    },
                    Some(Shift {
                        unit: second,
                        from: r2,
                        to: r1,
                    }),
                )
            }
        }
    }

    /// Whether applying the move keeps capacities and `MustNot` intact.
    ///
    /// Only the moved units' boundary is inspected: the rest of the
    /// assignment is assumed feasible already. A no-op (same room) is
    /// never feasible.
    pub fn is_feasible(self, inst: &Instance, rooms: &[usize], occupancy: &[usize]) -> bool {
        let grouping = inst.grouping();
        let (a, b) = self.shifts(inst, rooms);
        if a.from == a.to || a.to >= inst.num_rooms() {
            return false;
        }

        let size_a = grouping.size(a.unit);
        let size_b = b.map_or(0, |b| grouping.size(b.unit));
        let problem = inst.problem();
        if occupancy[a.to] + size_a - size_b > problem.capacity(a.to) {
            return false;
        }
        if let Some(b) = b {
            if occupancy[b.to] + size_b - size_a > problem.capacity(b.to) {
                return false;
            }
        }

        let other = b.map(|s| s.unit);
        let clear = |shift: Shift, co_mover: Option<usize>| {
            grouping.members(shift.unit).iter().all(|&m| {
                inst.index().must_not_partners(m).iter().all(|&partner| {
                    let pu = grouping.unit_of(partner);
                    pu == shift.unit || Some(pu) == co_mover || rooms[partner] != shift.to
                })
            })
        };
        clear(a, other) && b.is_none_or(|b| clear(b, Some(a.unit)))
    }

    /// The move that restores the current rooms once `self` is applied.
    pub fn inverse(self, inst: &Instance, rooms: &[usize]) -> Move {
        match self {
            Move::Relocate { unit, .. } => Move::Relocate {
                unit,
                to: inst.unit_room(rooms, unit),
            },
            swap @ Move::Swap { .. } => swap,
        }
    }

    /// Writes the move into `rooms` and `occupancy`.
    pub fn apply(self, inst: &Instance, rooms: &mut [usize], occupancy: &mut [usize]) {
        let (a, b) = self.shifts(inst, rooms);
        for shift in std::iter::once(a).chain(b) {
            let size = inst.grouping().size(shift.unit);
            occupancy[shift.from] -= size;
            occupancy[shift.to] += size;
            for &m in inst.grouping().members(shift.unit) {
                rooms[m] = shift.to;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, Problem};
    use crate::scoring::{is_feasible, occupancy};

    fn setup() -> Problem {
        // Units: {0,1}, {2}, {3}, {4}, {5}; rooms of 3.
        Problem::with_uniform_capacity(
            6,
            3,
            vec![
                Constraint::must(0, 1),
                Constraint::must_not(2, 3),
                Constraint::must_not(0, 4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_relocate_capacity() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 0, 1, 1];
        let occ = occupancy(&rooms, 2);
        let pair = inst.grouping().unit_of(0);
        let five = inst.grouping().unit_of(5);
        assert!(!Move::Relocate { unit: pair, to: 1 }.is_feasible(&inst, &rooms, &occ));
        assert!(!Move::Relocate { unit: five, to: 0 }.is_feasible(&inst, &rooms, &occ));
        assert!(!Move::Relocate { unit: five, to: 1 }.is_feasible(&inst, &rooms, &occ));
    }

    #[test]
    fn test_relocate_must_not() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 0, 1, 1];
        // Occupancy with slack so only MustNot decides.
        let occ = [2, 2];
        let g = inst.grouping();
        assert!(!Move::Relocate { unit: g.unit_of(3), to: 1 }.is_feasible(&inst, &rooms, &occ));
        assert!(!Move::Relocate { unit: g.unit_of(2), to: 0 }.is_feasible(&inst, &rooms, &occ));
        assert!(Move::Relocate { unit: g.unit_of(5), to: 0 }.is_feasible(&inst, &rooms, &occ));
        let tight = [1, 1];
        assert!(!Move::Relocate { unit: g.unit_of(0), to: 1 }.is_feasible(&inst, &rooms, &tight));
    }

    #[test]
    fn test_swap_excludes_co_mover_from_must_not() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 0, 1, 1];
        let occ = occupancy(&rooms, 2);
        let two = inst.grouping().unit_of(2);
        let three = inst.grouping().unit_of(3);
        let mv = Move::Swap { first: two, second: three };
        assert!(mv.is_feasible(&inst, &rooms, &occ));

        let mut rooms2 = rooms.clone();
        let mut occ2 = occ.clone();
        mv.apply(&inst, &mut rooms2, &mut occ2);
        assert_eq!(rooms2, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(occ2, occ);
        assert!(is_feasible(&problem, &rooms2));

        mv.inverse(&inst, &rooms).apply(&inst, &mut rooms2, &mut occ2);
        assert_eq!(rooms2, rooms);
    }

    #[test]
    fn test_relocate_inverse_restores() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 1, 0, 1];
        let mut occ = occupancy(&rooms, 2);
        let mv = Move::Relocate { unit: inst.grouping().unit_of(0), to: 1 };
        let undo = mv.inverse(&inst, &rooms);
        let mut moved = rooms.clone();
        mv.apply(&inst, &mut moved, &mut occ);
        assert_eq!(moved, vec![1, 1, 1, 1, 0, 1]);
        assert_eq!(occ, vec![1, 5]);
        undo.apply(&inst, &mut moved, &mut occ);
        assert_eq!(moved, rooms);
        assert_eq!(occ, vec![3, 3]);
    }

    #[test]
    fn test_swap_unit_sizes_change_occupancy() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 1, 1, 0];
        let occ = occupancy(&rooms, 2);
        let pair = inst.grouping().unit_of(0);
        let two = inst.grouping().unit_of(2);
        let mv = Move::Swap { first: pair, second: two };
        // Room 1 would hold 4.
        assert!(!mv.is_feasible(&inst, &rooms, &occ));
    }

    #[test]
    fn test_swap_same_room_is_noop() {
        let problem = setup();
        let inst = Instance::new(&problem).unwrap();
        let rooms = vec![0, 0, 1, 0, 1, 1];
        let occ = occupancy(&rooms, 2);
        let mv = Move::Swap {
            first: inst.grouping().unit_of(4),
            second: inst.grouping().unit_of(5),
        };
        assert!(!mv.is_feasible(&inst, &rooms, &occ));
    }
}
