//! Export geometry for one solved scenario.
//!
//! Stop indices are resolved to lon/lat through the cluster's coordinate
//! lists: index 0 is the depot, index `i` is customer `i - 1`. Serializing
//! this into a feature collection is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::extract::RoutePlan;
use crate::models::GeoPoint;

/// One vehicle's path as a line string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRoute {
    pub vehicle_id: usize,
    pub coordinates: Vec<GeoPoint>,
}

/// Depot, customers, and route line strings of one scenario, in lon/lat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioExport {
    pub cluster_id: usize,
    pub depot: GeoPoint,
    pub customers: Vec<GeoPoint>,
    pub routes: Vec<ExportRoute>,
    pub total_distance: i64,
    pub total_load: i64,
    pub feasible: bool,
}

impl ScenarioExport {
    /// Builds the export for a solved plan.
    ///
    /// Fails with `InvalidInput` if a route references a stop that has no
    /// coordinate.
    pub fn from_plan(
        cluster_id: usize,
        plan: &RoutePlan,
        depot: GeoPoint,
        customers: &[GeoPoint],
    ) -> Result<Self> {
        let resolve = |stop: usize| -> Result<GeoPoint> {
            if stop == 0 {
                return Ok(depot);
            }
            customers.get(stop - 1).copied().ok_or_else(|| {
                RoutingError::invalid(format!(
                    "stop {stop} has no coordinate ({} customers)",
                    customers.len()
                ))
            })
        };

        let routes = plan
            .vehicles
            .iter()
            .map(|v| {
                Ok(ExportRoute {
                    vehicle_id: v.vehicle_id,
                    coordinates: v
                        .stops
                        .iter()
                        .map(|&s| resolve(s))
                        .collect::<Result<Vec<_>>>()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            cluster_id,
            depot,
            customers: customers.to_vec(),
            routes,
            total_distance: plan.total_distance,
            total_load: plan.total_load,
            feasible: true,
        })
    }

    /// Export for a scenario without a solution: points only.
    pub fn infeasible(cluster_id: usize, depot: GeoPoint, customers: &[GeoPoint]) -> Self {
        Self {
            cluster_id,
            depot,
            customers: customers.to_vec(),
            routes: Vec::new(),
            total_distance: 0,
            total_load: 0,
            feasible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::VehicleRoute;

    fn plan() -> RoutePlan {
        RoutePlan {
            vehicles: vec![VehicleRoute {
                vehicle_id: 0,
                stops: vec![0, 2, 1, 0],
                cumulative_load: vec![0, 1, 2, 2],
                distance: 30,
                load: 2,
            }],
            total_distance: 30,
            total_load: 2,
        }
    }

    #[test]
    fn test_resolves_coordinates() {
        let depot = GeoPoint::new(139.8, 36.0);
        let customers = [GeoPoint::new(139.81, 36.0), GeoPoint::new(139.82, 36.01)];
        let export = ScenarioExport::from_plan(3, &plan(), depot, &customers).expect("resolved");
        assert_eq!(
            export.routes[0].coordinates,
            vec![depot, customers[1], customers[0], depot]
        );
        assert!(export.feasible);
        assert_eq!(export.total_distance, 30);
    }

    #[test]
    fn test_missing_coordinate() {
        let depot = GeoPoint::new(139.8, 36.0);
        let err = ScenarioExport::from_plan(0, &plan(), depot, &[GeoPoint::new(139.81, 36.0)]);
        assert!(matches!(err, Err(RoutingError::InvalidInput(_))));
    }

    #[test]
    fn test_serializes_lon_lat_pairs() {
        let export = ScenarioExport::infeasible(1, GeoPoint::new(139.5, 36.25), &[]);
        let json = serde_json::to_value(&export).expect("serializable");
        assert_eq!(json["depot"], serde_json::json!([139.5, 36.25]));
        assert_eq!(json["feasible"], serde_json::json!(false));
    }
}
