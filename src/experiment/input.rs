//! Per-cluster solver input.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::models::{GeoPoint, PlanarPoint, Stop};

/// Stops of one cluster in planar metres, with the parallel lon/lat pairs
/// used only for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInput {
    cluster_id: usize,
    depot: PlanarPoint,
    depot_geo: GeoPoint,
    customers: Vec<PlanarPoint>,
    customers_geo: Vec<GeoPoint>,
}

impl ClusterInput {
    /// Validates and wraps a cluster.
    ///
    /// Fails with `InvalidInput` if there are no customers, if any planar
    /// coordinate is non-finite, or if the geographic list does not match
    /// the planar one in length.
    pub fn new(
        cluster_id: usize,
        depot: PlanarPoint,
        depot_geo: GeoPoint,
        customers: Vec<PlanarPoint>,
        customers_geo: Vec<GeoPoint>,
    ) -> Result<Self> {
        if customers.is_empty() {
            return Err(RoutingError::invalid(format!(
                "cluster {cluster_id} has no customers"
            )));
        }
        if customers_geo.len() != customers.len() {
            return Err(RoutingError::invalid(format!(
                "cluster {cluster_id}: {} planar but {} geographic customer coordinates",
                customers.len(),
                customers_geo.len()
            )));
        }
        if !depot.is_finite() {
            return Err(RoutingError::invalid(format!(
                "cluster {cluster_id}: non-finite depot coordinate"
            )));
        }
        if let Some(i) = customers.iter().position(|p| !p.is_finite()) {
            return Err(RoutingError::invalid(format!(
                "cluster {cluster_id}: non-finite coordinate for customer {}",
                i + 1
            )));
        }
        Ok(Self {
            cluster_id,
            depot,
            depot_geo,
            customers,
            customers_geo,
        })
    }

    pub fn cluster_id(&self) -> usize {
        self.cluster_id
    }

    /// Nominal depot (the cluster center).
    pub fn depot(&self) -> PlanarPoint {
        self.depot
    }

    pub fn depot_geo(&self) -> GeoPoint {
        self.depot_geo
    }

    pub fn customers(&self) -> &[PlanarPoint] {
        &self.customers
    }

    pub fn customers_geo(&self) -> &[GeoPoint] {
        &self.customers_geo
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Stop list with `depot` first, followed by the customers, each
    /// carrying `unit_demand`.
    pub fn stops(&self, depot: PlanarPoint, unit_demand: i32) -> Vec<Stop> {
        Stop::from_points(depot, &self.customers, unit_demand)
    }
}
