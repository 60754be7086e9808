//! Customer swap operator.
//!
//! Exchanges the positions of two customers, within one route or between
//! two routes. Inter-route swaps move demand both ways and are charged the
//! resulting change in overload.
//!
//! # Complexity
//!
//! O(n²) per scan.

use super::cost::{at_or_depot, before, AugmentedCost, IMPROVEMENT_EPS};

/// Exchange of two customers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    pub route_a: usize,
    pub pos_a: usize,
    pub route_b: usize,
    pub pos_b: usize,
    pub delta: f64,
}

/// Finds the best improving swap, scanning routes in `order`.
pub fn find_best_swap(
    routes: &[Vec<usize>],
    loads: &[i64],
    cost: &AugmentedCost,
    order: &[usize],
) -> Option<SwapMove> {
    let mut best: Option<SwapMove> = None;
    let mut best_delta = -IMPROVEMENT_EPS;

    for &a in order {
        let ra = &routes[a];
        for &b in order {
            if b < a {
                continue;
            }
            let rb = &routes[b];
            for i in 0..ra.len() {
                let start = if a == b { i + 1 } else { 0 };
                for j in start..rb.len() {
                    let delta = if a == b {
                        intra_delta(ra, i, j, cost)
                    } else {
                        inter_delta(ra, i, rb, j, loads[a], loads[b], cost)
                    };
                    if delta < best_delta {
                        best_delta = delta;
                        best = Some(SwapMove {
                            route_a: a,
                            pos_a: i,
                            route_b: b,
                            pos_b: j,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

fn intra_delta(route: &[usize], i: usize, j: usize, cost: &AugmentedCost) -> f64 {
    let depot = cost.depot();
    let u = route[i];
    let v = route[j];
    let p = before(route, i, depot);
    let q = at_or_depot(route, j + 1, depot);

    if j == i + 1 {
        return cost.arc(p, v) + cost.arc(v, u) + cost.arc(u, q)
            - cost.arc(p, u)
            - cost.arc(u, v)
            - cost.arc(v, q);
    }

    let un = route[i + 1];
    let vp = route[j - 1];
    cost.arc(p, v) + cost.arc(v, un) + cost.arc(vp, u) + cost.arc(u, q)
        - cost.arc(p, u)
        - cost.arc(u, un)
        - cost.arc(vp, v)
        - cost.arc(v, q)
}

fn inter_delta(
    ra: &[usize],
    i: usize,
    rb: &[usize],
    j: usize,
    load_a: i64,
    load_b: i64,
    cost: &AugmentedCost,
) -> f64 {
    let depot = cost.depot();
    let u = ra[i];
    let v = rb[j];
    let (pa, na) = (before(ra, i, depot), at_or_depot(ra, i + 1, depot));
    let (pb, nb) = (before(rb, j, depot), at_or_depot(rb, j + 1, depot));
    let shift = cost.demand(v) - cost.demand(u);

    cost.arc(pa, v) + cost.arc(v, na) - cost.arc(pa, u) - cost.arc(u, na)
        + cost.arc(pb, u)
        + cost.arc(u, nb)
        - cost.arc(pb, v)
        - cost.arc(v, nb)
        + cost.overload_delta(load_a, load_a + shift)
        + cost.overload_delta(load_b, load_b - shift)
}

/// Applies a swap in place.
pub fn apply_swap(routes: &mut [Vec<usize>], mv: &SwapMove) {
    if mv.route_a == mv.route_b {
        routes[mv.route_a].swap(mv.pos_a, mv.pos_b);
    } else {
        let u = routes[mv.route_a][mv.pos_a];
        routes[mv.route_a][mv.pos_a] = routes[mv.route_b][mv.pos_b];
        routes[mv.route_b][mv.pos_b] = u;
    }
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

    fn two_sides() -> DistanceMatrix {
        // East pair at x = 10, 20; west pair at x = -10, -20.
        DistanceMatrix::from_points(&[
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(20.0, 0.0),
            PlanarPoint::new(-10.0, 0.0),
            PlanarPoint::new(-20.0, 0.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_inter_swap_separates_sides() {
        let dm = two_sides();
        let demands = [0, 1, 1, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 2, 0, 0.0, 1000.0);
        // Each route mixes east and west: 10+30+20 = 60 and 20+30+10 = 60.
        let mut routes = vec![vec![1, 4], vec![2, 3]];
        let loads = vec![2, 2];
        let mv = find_best_swap(&routes, &loads, &cost, &[0, 1]).expect("improving");
        let before = total(&routes, &dm);
        apply_swap(&mut routes, &mv);
        assert_eq!((total(&routes, &dm) - before) as f64, mv.delta);
        assert_eq!(total(&routes, &dm), 80);
    }

    #[test]
    fn test_adjacent_intra_swap() {
        let dm = two_sides();
        let demands = [0, 1, 1, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 10, 0, 0.0, 1.0);
        // 0→2→1→3→4→0 = 20+10+20+10+20 = 80 vs 0→1→2→3→4→0 = 10+10+30+10+20 = 80.
        let routes = vec![vec![2, 1, 3, 4]];
        let d = intra_delta(&routes[0], 0, 1, &cost);
        let mut swapped = routes.clone();
        swapped[0].swap(0, 1);
        assert_eq!(d, (total(&swapped, &dm) - total(&routes, &dm)) as f64);
    }

    #[test]
    fn test_distant_intra_swap_delta_matches() {
        let dm = two_sides();
        let demands = [0, 1, 1, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 10, 0, 0.0, 1.0);
        let routes = vec![vec![3, 1, 2, 4]];
        let d = intra_delta(&routes[0], 0, 3, &cost);
        let mut swapped = routes.clone();
        swapped[0].swap(0, 3);
        assert_eq!(d, (total(&swapped, &dm) - total(&routes, &dm)) as f64);
    }

    #[test]
    fn test_unequal_demands_charge_overload() {
        let dm = two_sides();
        let demands = [0, 1, 3, 1, 1];
        let penalties = ArcPenalties::new(5);
        let cost = AugmentedCost::new(&dm, &demands, &penalties, 3, 0, 0.0, 1000.0);
        let routes = vec![vec![1, 4], vec![2, 3]];
        let loads = vec![2, 4];
        // Swapping 4 for 2 would put load 4 on route 0 and relieve route 1.
        let d = inter_delta(&routes[0], 1, &routes[1], 0, loads[0], loads[1], &cost);
        let arcs = -(total(&routes, &dm) as f64) + {
            let mut r = routes.clone();
            r[0][1] = 2;
            r[1][0] = 4;
            total(&r, &dm) as f64
        };
        assert_eq!(d, arcs);
    }
}
