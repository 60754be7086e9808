//! Sweep driver.
//!
//! Every scenario builds its own distance matrix and demand model and runs a
//! fresh solver, so scenarios share nothing but the read-only cluster input.
//! With `parallel` enabled they run on the rayon pool; results are collected
//! in scenario order either way.

use std::f64::consts::{SQRT_2, TAU};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{ClusterInput, ScenarioRun, ScenarioSpec, SweepKind, SweepReport};
use crate::config::{AzimuthSampling, HarnessConfig};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::extract::RouteExtractor;
use crate::geo::Projection;
use crate::gls::RoutingSolver;
use crate::models::{DemandModel, SolveOutcome};

/// Report and per-scenario runs of one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub report: SweepReport,
    pub runs: Vec<ScenarioRun>,
}

/// Runs the time-budget and depot-perturbation sweeps over a cluster.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cluster_cvrp::config::{HarnessConfig, SolverConfig};
/// use cluster_cvrp::experiment::{ClusterInput, ExperimentHarness};
/// use cluster_cvrp::models::{GeoPoint, PlanarPoint};
///
/// let input = ClusterInput::new(
///     0,
///     PlanarPoint::new(0.0, 0.0),
///     GeoPoint::new(139.8, 36.0),
///     vec![PlanarPoint::new(100.0, 0.0), PlanarPoint::new(0.0, 100.0)],
///     vec![GeoPoint::new(139.801, 36.0), GeoPoint::new(139.8, 36.001)],
/// ).unwrap();
///
/// let config = HarnessConfig::default()
///     .with_solver(SolverConfig::default().with_seed(3).with_max_iterations(10));
/// let sweep = ExperimentHarness::new(config)
///     .time_budget_sweep(&input, &[Duration::from_millis(50), Duration::from_millis(100)])
///     .unwrap();
/// assert_eq!(sweep.report.points.len(), 2);
/// assert_eq!(sweep.report.solved_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentHarness {
    config: HarnessConfig,
}

impl ExperimentHarness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Solves the cluster at its nominal depot once per budget.
    pub fn time_budget_sweep(&self, input: &ClusterInput, budgets: &[Duration]) -> Result<Sweep> {
        let specs: Vec<ScenarioSpec> = budgets
            .iter()
            .enumerate()
            .map(|(index, &budget)| ScenarioSpec {
                index,
                cluster_id: input.cluster_id(),
                depot: input.depot(),
                depot_geo: input.depot_geo(),
                time_budget: budget,
                parameter: budget.as_secs_f64(),
            })
            .collect();
        self.sweep(SweepKind::TimeBudget, input, &specs)
    }

    /// Solves the cluster at the nominal depot and at depots displaced by
    /// `radius_step × i` for `i = 1..=perturbation_steps`.
    pub fn depot_perturbation_sweep<P>(&self, input: &ClusterInput, projection: &P) -> Result<Sweep>
    where
        P: Projection + ?Sized,
    {
        let specs = self.perturbed_depots(input, projection)?;
        self.sweep(SweepKind::DepotPerturbation, input, &specs)
    }

    /// Scenario list of the perturbation sweep, nominal depot first.
    ///
    /// Fails with `InvalidInput` if the configured radius step is negative
    /// or not finite.
    pub fn perturbed_depots<P>(
        &self,
        input: &ClusterInput,
        projection: &P,
    ) -> Result<Vec<ScenarioSpec>>
    where
        P: Projection + ?Sized,
    {
        let cfg = &self.config;
        cfg.validate()?;
        let mut rng = match cfg.perturbation_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut specs = Vec::with_capacity(cfg.perturbation_steps + 1);
        specs.push(ScenarioSpec {
            index: 0,
            cluster_id: input.cluster_id(),
            depot: input.depot(),
            depot_geo: input.depot_geo(),
            time_budget: cfg.solver.time_budget,
            parameter: 0.0,
        });

        for step in 1..=cfg.perturbation_steps {
            let radius = cfg.radius_step * step as f64;
            let (dx, dy) = sample_offset(cfg.azimuth, radius, &mut rng);
            let depot = input.depot().offset(dx, dy);
            specs.push(ScenarioSpec {
                index: step,
                cluster_id: input.cluster_id(),
                depot,
                depot_geo: projection.unproject(depot, cfg.projection_origin),
                time_budget: cfg.solver.time_budget,
                parameter: radius / 1000.0,
            });
        }
        Ok(specs)
    }

    /// Solves every scenario, returning runs in scenario order.
    pub fn run_scenarios(
        &self,
        input: &ClusterInput,
        specs: &[ScenarioSpec],
    ) -> Result<Vec<ScenarioRun>> {
        if self.config.parallel {
            specs
                .par_iter()
                .map(|spec| self.run_scenario(input, spec))
                .collect()
        } else {
            specs
                .iter()
                .map(|spec| self.run_scenario(input, spec))
                .collect()
        }
    }

    /// Solves one scenario. Infeasibility is recorded, not raised.
    pub fn run_scenario(&self, input: &ClusterInput, spec: &ScenarioSpec) -> Result<ScenarioRun> {
        let fleet = &self.config.fleet;
        let stops = input.stops(spec.depot, fleet.unit_demand);
        let distances = DistanceMatrix::from_stops(&stops)?;
        let model = DemandModel::from_stops(&stops, fleet.capacity)?;
        let solver = RoutingSolver::new(self.config.solver.clone());

        let outcome = solver.solve(
            &distances,
            model.demands(),
            model.vehicle_count(),
            model.capacity(),
            0,
            spec.time_budget,
        )?;

        let plan = match &outcome {
            SolveOutcome::Solved(result) => {
                debug!(
                    cluster = spec.cluster_id,
                    scenario = spec.index,
                    parameter = spec.parameter,
                    total_distance = result.total_distance(),
                    "scenario solved"
                );
                Some(RouteExtractor::new(&distances, model.demands()).extract_verified(result)?)
            }
            SolveOutcome::Infeasible(reason) => {
                warn!(
                    cluster = spec.cluster_id,
                    scenario = spec.index,
                    parameter = spec.parameter,
                    ?reason,
                    "scenario infeasible, recorded as missing"
                );
                None
            }
        };

        Ok(ScenarioRun {
            spec: spec.clone(),
            outcome,
            plan,
        })
    }

    fn sweep(&self, kind: SweepKind, input: &ClusterInput, specs: &[ScenarioSpec]) -> Result<Sweep> {
        debug!(
            cluster = input.cluster_id(),
            ?kind,
            customers = input.customer_count(),
            scenarios = specs.len(),
            parallel = self.config.parallel,
            "starting sweep"
        );
        let runs = self.run_scenarios(input, specs)?;
        let report = SweepReport::from_runs(kind, input.cluster_id(), &runs);
        info!(
            cluster = input.cluster_id(),
            ?kind,
            solved = report.solved_count(),
            scenarios = runs.len(),
            "sweep complete"
        );
        Ok(Sweep { report, runs })
    }
}

/// Planar offset of length `radius` in a randomly drawn direction.
fn sample_offset<R: Rng + ?Sized>(sampling: AzimuthSampling, radius: f64, rng: &mut R) -> (f64, f64) {
    match sampling {
        AzimuthSampling::Uniform => {
            let theta = rng.random_range(0.0..TAU);
            (radius * theta.cos(), radius * theta.sin())
        }
        AzimuthSampling::Quadrant => {
            let max_x = (radius / SQRT_2).floor() as i64;
            let x = rng.random_range(0..=max_x) as f64;
            let y = (radius * radius - x * x).max(0.0).sqrt();
            let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            (sx * x, sy * y)
        }
    }
}
