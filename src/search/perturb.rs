//! Random unit relocations used to kick iterated local search out of a
//! local optimum.

use rand::Rng;

use super::Move;
use crate::instance::Instance;

/// Relocates up to `count` distinct random units.
///
/// Each chosen unit goes to the first room, in random order, that differs
/// from its current one and accepts it without breaking capacity or
/// `MustNot`. A unit with no such room stays put. Returns the number of
/// units actually moved.
pub fn perturb<R: Rng>(
    inst: &Instance,
    rooms: &mut [usize],
    occupancy: &mut [usize],
    count: usize,
    rng: &mut R,
) -> usize {
    let mut units: Vec<usize> = (0..inst.num_units()).collect();
    u_numflow::random::shuffle(&mut units, rng);
    units.truncate(count);

    let mut order: Vec<usize> = (0..inst.num_rooms()).collect();
    let mut moved = 0;
    for unit in units {
        u_numflow::random::shuffle(&mut order, rng);
        let target = order.iter().map(|&to| Move::Relocate { unit, to }).find(|mv| {
            // is_feasible rejects the unit's own room
            mv.is_feasible(inst, &*rooms, &*occupancy)
        });
        if let Some(mv) = target {
            mv.apply(inst, rooms, occupancy);
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, Problem};
    use crate::scoring::{is_feasible, occupancy};

    #[test]
    fn test_perturb_keeps_feasibility_and_units() {
        let problem = Problem::with_uniform_capacity(
            12,
            4,
            vec![
                Constraint::must(0, 1),
                Constraint::must(1, 2),
                Constraint::must_not(0, 5),
                Constraint::must_not(6, 7),
            ],
        )
        .unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(11);
        let mut rooms = crate::placement::backtracking(&inst).unwrap();
        let mut occ = occupancy(&rooms, inst.num_rooms());
        for _ in 0..100 {
            perturb(&inst, &mut rooms, &mut occ, 5, &mut rng);
            assert!(is_feasible(&problem, &rooms), "{rooms:?}");
            assert_eq!(occ, occupancy(&rooms, inst.num_rooms()));
        }
    }

    #[test]
    fn test_perturb_moves_when_there_is_slack() {
        let problem = Problem::new(4, vec![4, 4], vec![]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(3);
        let start = vec![0, 0, 1, 1];
        let mut rooms = start.clone();
        let mut occ = occupancy(&rooms, 2);
        assert_eq!(perturb(&inst, &mut rooms, &mut occ, 2, &mut rng), 2);
        assert_ne!(rooms, start);
    }

    #[test]
    fn test_perturb_count_clamped_to_units() {
        let problem = Problem::new(2, vec![2, 2], vec![]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(5);
        let mut rooms = vec![0, 1];
        let mut occ = occupancy(&rooms, 2);
        assert_eq!(perturb(&inst, &mut rooms, &mut occ, 10, &mut rng), 2);
        assert_eq!(rooms, vec![1, 0]);
    }

    #[test]
    fn test_full_rooms_leave_units_in_place() {
        let problem = Problem::new(4, vec![2, 2], vec![]).unwrap();
        let inst = Instance::new(&problem).unwrap();
        let mut rng = u_numflow::random::create_rng(9);
        let mut rooms = vec![0, 0, 1, 1];
        let mut occ = occupancy(&rooms, 2);
        assert_eq!(perturb(&inst, &mut rooms, &mut occ, 3, &mut rng), 0);
        assert_eq!(rooms, vec![0, 0, 1, 1]);
    }
}
