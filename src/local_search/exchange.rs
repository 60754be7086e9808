//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Given R1 = [a₁, ..., aᵢ | aᵢ₊₁, ..., aₙ] and R2 = [b₁, ..., bⱼ | bⱼ₊₁, ..., bₘ],
//! produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Cuts may sit at either end of a route, so a route can hand over its whole
//! sequence or be split into an empty vehicle. Loads come from prefix sums
//! and are charged through the overload term.
//!
//! # Complexity
//!
//! O(n₁ × n₂) per route pair.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use super::cost::{at_or_depot, before, AugmentedCost, IMPROVEMENT_EPS};

/// Tail exchange between two routes, cutting before the given positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeMove {
    pub route_a: usize,
    pub cut_a: usize,
    pub route_b: usize,
    pub cut_b: usize,
    pub delta: f64,
}

fn prefix_loads(route: &[usize], cost: &AugmentedCost) -> Vec<i64> {
    let mut prefix = Vec::with_capacity(route.len() + 1);
    let mut acc = 0;
    prefix.push(acc);
    for &c in route {
        acc += cost.demand(c);
        prefix.push(acc);
    }
    prefix
}

/// Finds the best improving tail exchange, scanning routes in `order`.
pub fn find_best_exchange(
    routes: &[Vec<usize>],
    loads: &[i64],
    cost: &AugmentedCost,
    order: &[usize],
) -> Option<ExchangeMove> {
    let depot = cost.depot();
    let mut best: Option<ExchangeMove> = None;
    let mut best_delta = -IMPROVEMENT_EPS;

    for &a in order {
        for &b in order {
            if b <= a {
                continue;
            }
            let (r1, r2) = (&routes[a], &routes[b]);
            let (n1, n2) = (r1.len(), r2.len());
            let (p1, p2) = (prefix_loads(r1, cost), prefix_loads(r2, cost));

            for c1 in 0..=n1 {
                let h1 = before(r1, c1, depot);
                let t1 = at_or_depot(r1, c1, depot);
                for c2 in 0..=n2 {
                    // Both cuts at the same end only relabel the routes.
                    if (c1 == 0 && c2 == 0) || (c1 == n1 && c2 == n2) {
                        continue;
                    }
                    let h2 = before(r2, c2, depot);
                    let t2 = at_or_depot(r2, c2, depot);

                    let new_a = p1[c1] + (loads[b] - p2[c2]);
                    let new_b = p2[c2] + (loads[a] - p1[c1]);
                    let delta = cost.arc(h1, t2) + cost.arc(h2, t1)
                        - cost.arc(h1, t1)
                        - cost.arc(h2, t2)
                        + cost.overload_delta(loads[a], new_a)
                        + cost.overload_delta(loads[b], new_b);

                    if delta < best_delta {
                        best_delta = delta;
                        best = Some(ExchangeMove {
                            route_a: a,
                            cut_a: c1,
                            route_b: b,
                            cut_b: c2,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Applies a tail exchange in place. Requires `route_a < route_b`.
pub fn apply_exchange(routes: &mut [Vec<usize>], mv: &ExchangeMove) {
    let (left, right) = routes.split_at_mut(mv.route_b);
    let r1 = &mut left[mv.route_a];
    let r2 = &mut right[0];
    let tail1 = r1.split_off(mv.cut_a);
    let tail2 = r2.split_off(mv.cut_b);
    r1.extend(tail2);
    r2.extend(tail1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::gls::ArcPenalties;
    use crate::models::PlanarPoint;

    fn total(routes: &[Vec<usize>], dm: &DistanceMatrix) -> i64 {
        routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| dm.tour_distance(0, r))
            .sum()
    }

    fn interleaved() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(50.0, 10.0),   // east
            PlanarPoint::new(-50.0, -10.0), // west
            PlanarPoint::new(50.0, -10.0),  // east
            PlanarPoint::new(-50.0, 10.0),  // west
        ])
        .expect("valid")
    }

    #[test]
    fn test_fixes_interleaved_routes() {
        let dm = interleaved();
        let demands = [0, 1, 1, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 2, 0, 0.0, 1000.0);
        // [1, 4] and [2, 3] each cross the depot: 200 + 200.
        let mut routes = vec![vec![1, 4], vec![2, 3]];
        let loads = vec![2, 2];
        let before = total(&routes, &dm);
        let mv = find_best_exchange(&routes, &loads, &cost, &[0, 1]).expect("improving");
        apply_exchange(&mut routes, &mv);
        let after = total(&routes, &dm);
        assert_eq!(after, 240);
        assert_eq!((after - before) as f64, mv.delta);
        let mut all: Vec<usize> = routes.concat();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_capacity_blocks_unbalanced_exchange() {
        let dm = interleaved();
        let demands = [0, 1, 1, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 2, 0, 0.0, 1.0e6);
        let routes = vec![vec![1, 4], vec![3, 2]];
        if let Some(mv) = find_best_exchange(&routes, &[2, 2], &cost, &[0, 1]) {
            let mut r = routes.clone();
            apply_exchange(&mut r, &mv);
            assert!(r.iter().all(|route| route.len() <= 2));
        }
    }

    #[test]
    fn test_split_into_empty_route() {
        let mut routes = vec![vec![], vec![1, 2, 3]];
        let mv = ExchangeMove {
            route_a: 0,
            cut_a: 0,
            route_b: 1,
            cut_b: 1,
            delta: -1.0,
        };
        apply_exchange(&mut routes, &mv);
        assert_eq!(routes, vec![vec![2, 3], vec![1]]);
    }

    #[test]
    fn test_prefix_loads() {
        let dm = interleaved();
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &[0, 2, 3, 4, 5], &penalties, 10, 0, 0.0, 1.0);
        assert_eq!(prefix_loads(&[1, 3], &cost), vec![0, 2, 6]);
        assert_eq!(prefix_loads(&[], &cost), vec![0]);
    }
}
