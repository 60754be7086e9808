//! Route evaluator that computes load and distance and checks feasibility.

use crate::distance::DistanceMatrix;
use crate::models::{Route, Violation, ViolationType};

/// Builds depot-anchored routes from customer sequences and checks route
/// sets against the capacity and single-visit constraints.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::PlanarPoint;
/// use cluster_cvrp::distance::DistanceMatrix;
/// use cluster_cvrp::evaluation::RouteEvaluator;
///
/// let dm = DistanceMatrix::from_points(&[
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(3.0, 4.0),
///     PlanarPoint::new(6.0, 8.0),
/// ]).unwrap();
/// let demands = [0, 1, 1];
///
/// let evaluator = RouteEvaluator::new(&dm, &demands, 50, 0);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.stops(), &[0, 1, 2, 0]);
/// assert_eq!(route.distance(), 20);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    distances: &'a DistanceMatrix,
    demands: &'a [i32],
    capacity: i32,
    depot: usize,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(
        distances: &'a DistanceMatrix,
        demands: &'a [i32],
        capacity: i32,
        depot: usize,
    ) -> Self {
        Self {
            distances,
            demands,
            capacity,
            depot,
        }
    }

    /// Sum of demand over a customer sequence.
    pub fn load(&self, customers: &[usize]) -> i64 {
        customers.iter().map(|&c| i64::from(self.demands[c])).sum()
    }

    /// Builds the route `depot → customers… → depot` for one vehicle.
    ///
    /// Returns the route and a capacity violation if the load exceeds the
    /// vehicle capacity.
    pub fn build_route(&self, vehicle_id: usize, customers: &[usize]) -> (Route, Vec<Violation>) {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(self.depot);
        stops.extend_from_slice(customers);
        stops.push(self.depot);

        let distance = self.distances.tour_distance(self.depot, customers);
        let load = self.load(customers);

        let mut violations = Vec::new();
        if load > i64::from(self.capacity) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: vehicle_id,
                load,
                capacity: self.capacity,
            }));
        }

        (Route::new(vehicle_id, stops, distance, load), violations)
    }

    /// Builds one route per customer sequence, in vehicle order.
    pub fn build_routes(&self, sequences: &[Vec<usize>]) -> (Vec<Route>, Vec<Violation>) {
        let mut routes = Vec::with_capacity(sequences.len());
        let mut violations = Vec::new();
        for (vehicle_id, seq) in sequences.iter().enumerate() {
            let (route, mut v) = self.build_route(vehicle_id, seq);
            routes.push(route);
            violations.append(&mut v);
        }
        (routes, violations)
    }

    /// Checks a full route set: depot anchoring, known stops, capacity, and
    /// that every customer is visited exactly once.
    pub fn check_routes(&self, routes: &[Route]) -> Vec<Violation> {
        let n = self.distances.size();
        let mut visits = vec![0usize; n];
        let mut violations = Vec::new();

        for (idx, route) in routes.iter().enumerate() {
            let stops = route.stops();
            let anchored = stops.len() >= 2
                && stops[0] == self.depot
                && stops[stops.len() - 1] == self.depot
                && !route.customers().contains(&self.depot);
            if !anchored {
                violations.push(Violation::new(ViolationType::NotAnchoredAtDepot {
                    route_index: idx,
                }));
            }

            let mut load = 0i64;
            for &stop in route.customers() {
                if stop >= n {
                    violations.push(Violation::new(ViolationType::UnknownStop {
                        route_index: idx,
                        stop,
                    }));
                    continue;
                }
                if stop != self.depot {
                    visits[stop] += 1;
                    load += i64::from(self.demands[stop]);
                }
            }

            if load > i64::from(self.capacity) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load,
                    capacity: self.capacity,
                }));
            }
        }

        for (customer, &count) in visits.iter().enumerate() {
            if customer == self.depot {
                continue;
            }
            match count {
                1 => {}
                0 => violations.push(Violation::new(ViolationType::MissingCustomer { customer })),
                _ => violations.push(Violation::new(ViolationType::DuplicateVisit { customer })),
            }
        }

        violations
    }
}
