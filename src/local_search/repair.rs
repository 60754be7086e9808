//! Capacity repair.
//!
//! The augmented descent may settle in a state where some route carries more
//! than the vehicle capacity. Repair moves customers out of the most
//! overloaded route, one at a time, into the cheapest position (by plain
//! distance) of any route with room for them, until no route is overloaded.

use tracing::trace;

use super::cost::{at_or_depot, before};
use crate::distance::DistanceMatrix;

/// Removes overload by greedy cheapest reinsertion.
///
/// Returns `false` if some route stays overloaded because no customer on it
/// fits anywhere else; the routes are left in their partially repaired state.
pub fn repair_capacity(
    routes: &mut [Vec<usize>],
    distances: &DistanceMatrix,
    demands: &[i32],
    capacity: i32,
    depot: usize,
) -> bool {
    let capacity = i64::from(capacity);
    loop {
        let loads: Vec<i64> = routes
            .iter()
            .map(|r| r.iter().map(|&c| i64::from(demands[c])).sum())
            .collect();

        let worst = loads
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l > capacity)
            .max_by_key(|&(i, &l)| (l, std::cmp::Reverse(i)));
        let Some((from, _)) = worst else {
            return true;
        };

        let src = &routes[from];
        // (cost, position in source, target route, insertion position)
        let mut best: Option<(i64, usize, usize, usize)> = None;
        for (i, &c) in src.iter().enumerate() {
            let d = i64::from(demands[c]);
            if d <= 0 {
                continue;
            }
            let prev = before(src, i, depot);
            let next = at_or_depot(src, i + 1, depot);
            let removal =
                distances.get(prev, next) - distances.get(prev, c) - distances.get(c, next);

            for (to, target) in routes.iter().enumerate() {
                if to == from || loads[to] + d > capacity {
                    continue;
                }
                for j in 0..=target.len() {
                    let p = before(target, j, depot);
                    let q = at_or_depot(target, j, depot);
                    let insertion =
                        distances.get(p, c) + distances.get(c, q) - distances.get(p, q);
                    let delta = removal + insertion;
                    if best.is_none_or(|(b, ..)| delta < b) {
                        best = Some((delta, i, to, j));
                    }
                }
            }
        }

        let Some((delta, i, to, j)) = best else {
            trace!(route = from, load = loads[from], "capacity repair stuck");
            return false;
        };
        let customer = routes[from].remove(i);
        routes[to].insert(j, customer);
        trace!(customer, from, to, delta, "repair move");
    }
}
