//! Demand model: per-stop demand and the per-vehicle capacity ceiling.

use crate::error::{Result, RoutingError};

use super::{Stop, VehicleFleet};

/// Maps stop index to the capacity it consumes.
///
/// The depot (index 0) always has demand 0. Clusters normally give every
/// customer the same unit demand, but arbitrary non-negative demands are
/// accepted.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::DemandModel;
///
/// let model = DemandModel::uniform(101, 1, 50).unwrap();
/// assert_eq!(model.demands().len(), 102);
/// assert_eq!(model.demand(0), 0);
/// assert_eq!(model.vehicle_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DemandModel {
    demands: Vec<i32>,
    capacity: i32,
}

impl DemandModel {
    /// Depot zero, then `customer_count` customers with `unit_demand` each.
    pub fn uniform(customer_count: usize, unit_demand: i32, capacity: i32) -> Result<Self> {
        if unit_demand < 0 {
            return Err(RoutingError::invalid(format!(
                "unit demand must be non-negative, got {unit_demand}"
            )));
        }
        let demands = std::iter::once(0)
            .chain(std::iter::repeat_n(unit_demand, customer_count))
            .collect();
        Self::from_demands(demands, capacity)
    }

    /// Builds a model from an explicit demand vector (index 0 = depot).
    pub fn from_demands(demands: Vec<i32>, capacity: i32) -> Result<Self> {
        if capacity <= 0 {
            return Err(RoutingError::invalid(format!(
                "vehicle capacity must be positive, got {capacity}"
            )));
        }
        match demands.first() {
            None => return Err(RoutingError::invalid("demand vector is empty")),
            Some(&d) if d != 0 => {
                return Err(RoutingError::invalid(format!(
                    "depot demand must be 0, got {d}"
                )))
            }
            _ => {}
        }
        if let Some((i, d)) = demands.iter().enumerate().find(|(_, &d)| d < 0) {
            return Err(RoutingError::invalid(format!(
                "stop {i} has negative demand {d}"
            )));
        }
        Ok(Self { demands, capacity })
    }

    /// Reads demands off a stop list (depot first).
    pub fn from_stops(stops: &[Stop], capacity: i32) -> Result<Self> {
        Self::from_demands(stops.iter().map(Stop::demand).collect(), capacity)
    }

    /// Demand per stop index.
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Demand at a single stop.
    pub fn demand(&self, index: usize) -> i32 {
        self.demands[index]
    }

    /// Per-vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of customers (excluding the depot).
    pub fn customer_count(&self) -> usize {
        self.demands.len() - 1
    }

    /// Sum of all customer demand.
    pub fn total_demand(&self) -> i64 {
        self.demands.iter().map(|&d| i64::from(d)).sum()
    }

    /// ⌈total demand / capacity⌉ with a floor of one vehicle.
    ///
    /// For unit demand this is ⌈customers / capacity⌉.
    pub fn vehicle_count(&self) -> usize {
        let cap = i64::from(self.capacity);
        let needed = (self.total_demand() + cap - 1) / cap;
        (needed as usize).max(1)
    }

    /// Homogeneous fleet sized for this demand.
    pub fn fleet(&self) -> VehicleFleet {
        VehicleFleet::new(self.vehicle_count(), self.capacity)
    }
}
