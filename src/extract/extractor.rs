//! Walks a solved assignment into per-vehicle plans.
//!
//! Distances and loads are recomputed from the distance matrix and demand
//! vector rather than copied from the result, so a [`RoutePlan`] doubles as
//! an independent check of the solver's reported objective.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::SolveResult;

/// One vehicle's stop sequence with running load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoute {
    pub vehicle_id: usize,
    /// Stop indices, depot first and last.
    pub stops: Vec<usize>,
    /// Load carried after serving each stop, parallel to `stops`.
    pub cumulative_load: Vec<i64>,
    /// Sum of consecutive arc costs.
    pub distance: i64,
    pub load: i64,
}

impl VehicleRoute {
    /// Returns `true` if the vehicle serves no customer.
    pub fn is_empty(&self) -> bool {
        self.stops.len() <= 2
    }
}

/// Per-vehicle routes plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub vehicles: Vec<VehicleRoute>,
    pub total_distance: i64,
    pub total_load: i64,
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.vehicles {
            writeln!(f, "Route for vehicle {}:", v.vehicle_id)?;
            let legs: Vec<String> = v
                .stops
                .iter()
                .zip(&v.cumulative_load)
                .map(|(stop, load)| format!(" {stop} Load({load})"))
                .collect();
            writeln!(f, "{}", legs.join(" -> "))?;
            writeln!(f, "Distance of the route: {}m", v.distance)?;
            writeln!(f, "Load of the route: {}", v.load)?;
            writeln!(f)?;
        }
        writeln!(f, "Total distance of all routes: {}m", self.total_distance)?;
        write!(f, "Total load of all routes: {}", self.total_load)
    }
}

/// Recomputes route metrics from the instance data.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cluster_cvrp::config::SolverConfig;
/// use cluster_cvrp::distance::DistanceMatrix;
/// use cluster_cvrp::extract::RouteExtractor;
/// use cluster_cvrp::gls::RoutingSolver;
/// use cluster_cvrp::models::PlanarPoint;
///
/// let dm = DistanceMatrix::from_points(&[
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(30.0, 40.0),
/// ]).unwrap();
/// let demands = [0, 1];
/// let solver = RoutingSolver::new(SolverConfig::default().with_seed(0));
/// let outcome = solver.solve(&dm, &demands, 1, 50, 0, Duration::from_millis(50)).unwrap();
/// let result = outcome.solution().unwrap();
///
/// let plan = RouteExtractor::new(&dm, &demands).extract_verified(result).unwrap();
/// assert_eq!(plan.total_distance, 100);
/// assert_eq!(plan.vehicles[0].cumulative_load, vec![0, 1, 1]);
/// ```
pub struct RouteExtractor<'a> {
    distances: &'a DistanceMatrix,
    demands: &'a [i32],
}

impl<'a> RouteExtractor<'a> {
    pub fn new(distances: &'a DistanceMatrix, demands: &'a [i32]) -> Self {
        Self { distances, demands }
    }

    /// Builds the plan for every vehicle of `result`, in vehicle order.
    pub fn extract(&self, result: &SolveResult) -> RoutePlan {
        let vehicles: Vec<VehicleRoute> = result
            .routes()
            .iter()
            .map(|route| {
                let stops = route.stops().to_vec();
                let mut load = 0i64;
                let cumulative_load = stops
                    .iter()
                    .map(|&s| {
                        load += i64::from(self.demands[s]);
                        load
                    })
                    .collect();
                let distance = stops
                    .windows(2)
                    .map(|w| self.distances.get(w[0], w[1]))
                    .sum();
                VehicleRoute {
                    vehicle_id: route.vehicle_id(),
                    stops,
                    cumulative_load,
                    distance,
                    load,
                }
            })
            .collect();

        RoutePlan {
            total_distance: vehicles.iter().map(|v| v.distance).sum(),
            total_load: vehicles.iter().map(|v| v.load).sum(),
            vehicles,
        }
    }

    /// Like [`extract`](Self::extract), failing if the recomputed totals
    /// differ from the totals the solver reported.
    pub fn extract_verified(&self, result: &SolveResult) -> Result<RoutePlan> {
        let plan = self.extract(result);
        if plan.total_distance != result.total_distance() {
            return Err(RoutingError::InvariantViolated(format!(
                "reported distance {} but routes sum to {}",
                result.total_distance(),
                plan.total_distance
            )));
        }
        if plan.total_load != result.total_load() {
            return Err(RoutingError::InvariantViolated(format!(
                "reported load {} but routes sum to {}",
                result.total_load(),
                plan.total_load
            )));
        }
        Ok(plan)
    }
}
