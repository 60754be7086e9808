//! Cheapest-arc path construction.
//!
//! Builds routes one vehicle at a time: starting at the depot, the route is
//! repeatedly extended by the unrouted customer whose addition raises the
//! closed route cost the least,
//!
//! ```text
//! delta(c) = d(last, c) + d(c, depot) - d(last, depot)
//! ```
//!
//! subject to the running load staying within capacity. Ties go to the
//! lowest customer index, which makes the construction deterministic for a
//! given input order. When no remaining customer fits, the next vehicle
//! starts; customers still unrouted after the last vehicle make the
//! instance infeasible under the given fleet.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use tracing::trace;

use crate::distance::DistanceMatrix;

/// Route sequences produced by construction, one per vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Customer sequences (depot excluded), one per vehicle, possibly empty.
    pub routes: Vec<Vec<usize>>,
    /// Customers that no vehicle could take, in index order.
    pub unrouted: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every customer was placed on a route.
    pub fn is_complete(&self) -> bool {
        self.unrouted.is_empty()
    }
}

/// Constructs an initial assignment with the cheapest-arc heuristic.
///
/// # Arguments
///
/// * `distances` — Distance matrix over all stops
/// * `demands` — Demand per stop (depot entry ignored)
/// * `vehicle_count` — Number of routes to build
/// * `capacity` — Per-vehicle capacity
/// * `depot` — Depot stop index
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::PlanarPoint;
/// use cluster_cvrp::distance::DistanceMatrix;
/// use cluster_cvrp::constructive::cheapest_arc;
///
/// let dm = DistanceMatrix::from_points(&[
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(1.0, 0.0),
///     PlanarPoint::new(2.0, 0.0),
///     PlanarPoint::new(3.0, 0.0),
/// ]).unwrap();
///
/// let built = cheapest_arc(&dm, &[0, 1, 1, 1], 2, 2, 0);
/// assert!(built.is_complete());
/// assert_eq!(built.routes, vec![vec![1, 2], vec![3]]);
/// ```
pub fn cheapest_arc(
    distances: &DistanceMatrix,
    demands: &[i32],
    vehicle_count: usize,
    capacity: i32,
    depot: usize,
) -> Construction {
    let n = distances.size();
    let mut routed = vec![false; n];
    if depot < n {
        routed[depot] = true;
    }
    let mut remaining = n.saturating_sub(1);
    let mut routes = Vec::with_capacity(vehicle_count);
    let capacity = i64::from(capacity);

    for vehicle in 0..vehicle_count {
        let mut route = Vec::new();
        let mut load = 0i64;
        let mut last = depot;

        while remaining > 0 {
            let mut best: Option<(usize, i64)> = None;
            for c in 0..n {
                if routed[c] || load + i64::from(demands[c]) > capacity {
                    continue;
                }
                let delta = distances.get(last, c) + distances.get(c, depot)
                    - distances.get(last, depot);
                if best.is_none_or(|(_, b)| delta < b) {
                    best = Some((c, delta));
                }
            }

            let Some((next, _)) = best else { break };
            routed[next] = true;
            remaining -= 1;
            load += i64::from(demands[next]);
            route.push(next);
            last = next;
        }

        trace!(vehicle, customers = route.len(), load, "constructed route");
        routes.push(route);
    }

    let unrouted = (0..n).filter(|&c| !routed[c]).collect();
    Construction { routes, unrouted }
}
