//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered stop sequence driven by a single vehicle.
///
/// Unlike the solver's internal representation, the stop list includes the
/// depot at both ends. An unused vehicle has the route `[depot, depot]`.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::Route;
///
/// let route = Route::new(0, vec![0, 2, 1, 0], 42, 2);
/// assert_eq!(route.customers(), &[2, 1]);
/// assert_eq!(route.len(), 2);
/// assert!(!route.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    distance: i64,
    load: i64,
}

impl Route {
    /// Creates a route from a depot-anchored stop sequence.
    pub fn new(vehicle_id: usize, stops: Vec<usize>, distance: i64, load: i64) -> Self {
        Self {
            vehicle_id,
            stops,
            distance,
            load,
        }
    }

    /// Vehicle driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Full stop sequence, depot first and last.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer stops only (depot endpoints stripped).
    pub fn customers(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of customers visited.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` for a depot-to-depot route.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Sum of arc costs along the route.
    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Sum of customer demand on the route.
    pub fn load(&self) -> i64 {
        self.load
    }
}
