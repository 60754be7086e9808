//! Stop type.

use serde::{Deserialize, Serialize};

use super::PlanarPoint;

/// A depot or customer stop in a routing instance.
///
/// Stop 0 is conventionally the depot and never carries demand. Stops are
/// immutable once loaded for a solve.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::{PlanarPoint, Stop};
///
/// let depot = Stop::depot(PlanarPoint::new(35.0, 35.0));
/// assert_eq!(depot.index(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Stop::customer(1, PlanarPoint::new(41.0, 49.0), 1);
/// assert_eq!(c.index(), 1);
/// assert!(!c.is_depot());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    index: usize,
    point: PlanarPoint,
    demand: i32,
}

impl Stop {
    /// Creates a customer stop.
    pub fn customer(index: usize, point: PlanarPoint, demand: i32) -> Self {
        Self {
            index,
            point,
            demand,
        }
    }

    /// Creates the depot (index 0, demand 0).
    pub fn depot(point: PlanarPoint) -> Self {
        Self::customer(0, point, 0)
    }

    /// Builds the stop list for a cluster: depot first, then customers with
    /// a uniform demand.
    pub fn from_points(depot: PlanarPoint, customers: &[PlanarPoint], demand: i32) -> Vec<Stop> {
        std::iter::once(Self::depot(depot))
            .chain(
                customers
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| Self::customer(i + 1, p, demand)),
            )
            .collect()
    }

    /// Stop index (0 = depot).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Planar position.
    pub fn point(&self) -> PlanarPoint {
        self.point
    }

    /// Capacity consumed when this stop is served.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_layout() {
        let stops = Stop::from_points(
            PlanarPoint::new(0.0, 0.0),
            &[PlanarPoint::new(1.0, 0.0), PlanarPoint::new(2.0, 0.0)],
            1,
        );
        assert_eq!(stops.len(), 3);
        assert!(stops[0].is_depot());
        assert_eq!(stops[0].demand(), 0);
        assert_eq!(stops[2].index(), 2);
        assert_eq!(stops[2].demand(), 1);
        assert_eq!(stops[2].point(), PlanarPoint::new(2.0, 0.0));
    }

    #[test]
    fn test_depot_only() {
        let stops = Stop::from_points(PlanarPoint::new(5.0, 5.0), &[], 1);
        assert_eq!(stops.len(), 1);
        assert!(stops[0].is_depot());
    }
}
