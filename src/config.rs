//! Solver, fleet, and experiment configuration.
//!
//! All configuration types deserialize from JSON with every field optional;
//! missing fields take the defaults listed on each type.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// Per-vehicle capacity used when none is configured.
pub const DEFAULT_CAPACITY: i32 = 50;

/// Demand of a single customer used when none is configured.
pub const DEFAULT_UNIT_DEMAND: i32 = 1;

/// Configuration for the guided local search solver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cluster_cvrp::config::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_budget(Duration::from_secs(2))
///     .with_seed(7)
///     .with_max_iterations(500);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_iterations, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock budget for the improvement phase (default 1 s).
    pub time_budget: Duration,
    /// Seed for move-order randomization. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Cap on guided local search rounds.
    pub max_iterations: Option<usize>,
    /// Rounds without a new incumbent before the search gives up (default 300).
    pub max_stalled_rounds: usize,
    /// Scales the arc-penalty weight relative to the mean arc cost of the
    /// first local optimum (default 0.1).
    pub lambda_coefficient: f64,
    /// Cost per unit of overload, as a multiple of the mean arc cost
    /// (default 1.0).
    pub capacity_penalty: f64,
    /// Longest customer segment moved by the relocate operator (default 3).
    pub max_segment_len: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(1),
            seed: None,
            max_iterations: None,
            max_stalled_rounds: 300,
            lambda_coefficient: 0.1,
            capacity_penalty: 1.0,
            max_segment_len: 3,
        }
    }
}

impl SolverConfig {
    /// Sets the improvement-phase time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Seeds the random source for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Caps the number of guided local search rounds.
    pub fn with_max_iterations(mut self, rounds: usize) -> Self {
        self.max_iterations = Some(rounds);
        self
    }

    /// Sets the stall limit.
    pub fn with_max_stalled_rounds(mut self, rounds: usize) -> Self {
        self.max_stalled_rounds = rounds;
        self
    }

    /// Sets the arc-penalty weight coefficient.
    pub fn with_lambda_coefficient(mut self, coefficient: f64) -> Self {
        self.lambda_coefficient = coefficient;
        self
    }

    /// Sets the overload penalty multiplier.
    pub fn with_capacity_penalty(mut self, penalty: f64) -> Self {
        self.capacity_penalty = penalty;
        self
    }

    /// Sets the longest segment moved by relocation.
    pub fn with_max_segment_len(mut self, len: usize) -> Self {
        self.max_segment_len = len;
        self
    }
}

/// Fleet sizing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Per-vehicle capacity (default 50).
    pub capacity: i32,
    /// Demand of every customer (default 1).
    pub unit_demand: i32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            unit_demand: DEFAULT_UNIT_DEMAND,
        }
    }
}

/// Origin of the planar projection, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOrigin {
    /// Origin latitude.
    pub lat: f64,
    /// Origin longitude.
    pub lon: f64,
}

impl Default for ProjectionOrigin {
    /// Zone IX of the Japanese plane rectangular system (36°N, 139°50′E).
    fn default() -> Self {
        Self {
            lat: 36.0,
            lon: 139.0 + 50.0 / 60.0,
        }
    }
}

/// How the depot-perturbation sweep draws a direction for each radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthSampling {
    /// Uniform angle on the full circle.
    #[default]
    Uniform,
    /// Integer x offset in `[0, r/√2]`, y completing the radius, then a
    /// random sign on each axis.
    Quadrant,
}

/// Configuration for the experiment harness.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::config::{AzimuthSampling, HarnessConfig};
///
/// let config = HarnessConfig::from_json(
///     r#"{ "perturbation_steps": 4, "azimuth": "quadrant",
///          "fleet": { "capacity": 30 } }"#,
/// ).unwrap();
/// assert_eq!(config.perturbation_steps, 4);
/// assert_eq!(config.azimuth, AzimuthSampling::Quadrant);
/// assert_eq!(config.fleet.capacity, 30);
/// assert_eq!(config.fleet.unit_demand, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Solver settings shared by every scenario.
    pub solver: SolverConfig,
    /// Fleet sizing.
    pub fleet: FleetConfig,
    /// Projection origin used to unproject perturbed depots.
    pub projection_origin: ProjectionOrigin,
    /// Radius increment per perturbation step in planar units (default 1000).
    pub radius_step: f64,
    /// Number of perturbed depots after the nominal one (default 10).
    pub perturbation_steps: usize,
    /// Direction sampling for perturbed depots.
    pub azimuth: AzimuthSampling,
    /// Seed for depot perturbation draws. `None` draws from the OS.
    pub perturbation_seed: Option<u64>,
    /// Solve scenarios concurrently (default false).
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            fleet: FleetConfig::default(),
            projection_origin: ProjectionOrigin::default(),
            radius_step: 1000.0,
            perturbation_steps: 10,
            azimuth: AzimuthSampling::default(),
            perturbation_seed: None,
            parallel: false,
        }
    }
}

impl HarnessConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that deserialization alone cannot rule out.
    ///
    /// `radius_step` must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.radius_step.is_finite() || self.radius_step < 0.0 {
            return Err(RoutingError::invalid(format!(
                "radius step must be finite and non-negative, got {}",
                self.radius_step
            )));
        }
        Ok(())
    }

    /// Sets the solver configuration.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the fleet configuration.
    pub fn with_fleet(mut self, fleet: FleetConfig) -> Self {
        self.fleet = fleet;
        self
    }

    /// Sets the perturbation radius step and step count.
    pub fn with_perturbation(mut self, radius_step: f64, steps: usize) -> Self {
        self.radius_step = radius_step;
        self.perturbation_steps = steps;
        self
    }

    /// Sets the azimuth sampling strategy.
    pub fn with_azimuth(mut self, azimuth: AzimuthSampling) -> Self {
        self.azimuth = azimuth;
        self
    }

    /// Seeds the perturbation draws.
    pub fn with_perturbation_seed(mut self, seed: u64) -> Self {
        self.perturbation_seed = Some(seed);
        self
    }

    /// Enables or disables concurrent scenario solving.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
