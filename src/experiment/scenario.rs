//! Scenario descriptions and per-scenario results.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ClusterInput;
use crate::error::Result;
use crate::extract::RoutePlan;
use crate::geo::ScenarioExport;
use crate::models::{GeoPoint, PlanarPoint, SolveOutcome, SolveResult};

/// One independent solve within a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Position in the sweep; results are reported in this order.
    pub index: usize,
    pub cluster_id: usize,
    /// Depot used for this scenario (nominal or perturbed).
    pub depot: PlanarPoint,
    /// Geographic position of `depot`, for export.
    pub depot_geo: GeoPoint,
    pub time_budget: Duration,
    /// Swept value: budget in seconds or displacement radius in km.
    pub parameter: f64,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub spec: ScenarioSpec,
    pub outcome: SolveOutcome,
    /// Per-vehicle plan, present when the scenario was solved.
    pub plan: Option<RoutePlan>,
}

impl ScenarioRun {
    /// Solved result, if any.
    pub fn solution(&self) -> Option<&SolveResult> {
        self.outcome.solution()
    }

    /// Total distance, `None` for an infeasible scenario.
    pub fn total_distance(&self) -> Option<i64> {
        self.solution().map(SolveResult::total_distance)
    }

    /// Export geometry for this scenario's depot and routes.
    pub fn export(&self, input: &ClusterInput) -> Result<ScenarioExport> {
        match &self.plan {
            Some(plan) => ScenarioExport::from_plan(
                self.spec.cluster_id,
                plan,
                self.spec.depot_geo,
                input.customers_geo(),
            ),
            None => Ok(ScenarioExport::infeasible(
                self.spec.cluster_id,
                self.spec.depot_geo,
                input.customers_geo(),
            )),
        }
    }
}
