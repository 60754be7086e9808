//! Homogeneous vehicle fleet.

use serde::{Deserialize, Serialize};

/// A fleet of identical vehicles sharing one depot.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::VehicleFleet;
///
/// let fleet = VehicleFleet::new(3, 50);
/// assert_eq!(fleet.count(), 3);
/// assert_eq!(fleet.capacity(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFleet {
    count: usize,
    capacity: i32,
}

impl VehicleFleet {
    /// Creates a fleet of `count` vehicles with the given capacity each.
    pub fn new(count: usize, capacity: i32) -> Self {
        Self { count, capacity }
    }

    /// Number of vehicles.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Per-vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_accessors() {
        let f = VehicleFleet::new(2, 50);
        assert_eq!(f.count(), 2);
        assert_eq!(f.capacity(), 50);
    }
}
