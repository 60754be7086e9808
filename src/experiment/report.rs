//! Sweep results for tabulation and plotting.

use serde::{Deserialize, Serialize};

use super::ScenarioRun;
use crate::error::Result;
use crate::models::{GeoPoint, PlanarPoint};

/// Which input a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepKind {
    TimeBudget,
    DepotPerturbation,
}

/// One data point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub index: usize,
    /// Budget in seconds or displacement radius in km.
    pub parameter: f64,
    /// `None` when the scenario was infeasible.
    pub total_distance: Option<i64>,
    pub total_distance_km: Option<f64>,
    pub depot: PlanarPoint,
    pub depot_geo: GeoPoint,
}

/// Ordered results of one sweep over a single cluster.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::experiment::{SweepKind, SweepReport};
///
/// let report = SweepReport::new(SweepKind::TimeBudget, 4, Vec::new());
/// assert!(report.series().is_empty());
/// assert!(report.to_json().unwrap().contains("time_budget"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub kind: SweepKind,
    pub cluster_id: usize,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    pub fn new(kind: SweepKind, cluster_id: usize, points: Vec<SweepPoint>) -> Self {
        Self {
            kind,
            cluster_id,
            points,
        }
    }

    /// Builds a report from scenario runs, keeping their order.
    pub fn from_runs(kind: SweepKind, cluster_id: usize, runs: &[ScenarioRun]) -> Self {
        let points = runs
            .iter()
            .map(|run| {
                let total_distance = run.total_distance();
                SweepPoint {
                    index: run.spec.index,
                    parameter: run.spec.parameter,
                    total_distance,
                    total_distance_km: total_distance.map(|d| d as f64 / 1000.0),
                    depot: run.spec.depot,
                    depot_geo: run.spec.depot_geo,
                }
            })
            .collect();
        Self::new(kind, cluster_id, points)
    }

    /// `(parameter, total distance)` pairs in sweep order.
    pub fn series(&self) -> Vec<(f64, Option<i64>)> {
        self.points
            .iter()
            .map(|p| (p.parameter, p.total_distance))
            .collect()
    }

    /// Number of scenarios that produced a solution.
    pub fn solved_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.total_distance.is_some())
            .count()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
