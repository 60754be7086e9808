//! Scenario sweeps over one cluster.
//!
//! - [`ClusterInput`] — Validated stops of a cluster, planar and geographic
//! - [`ScenarioSpec`] / [`ScenarioRun`] — One independent solve and its outcome
//! - [`ExperimentHarness`] — Time-budget and depot-perturbation sweeps
//! - [`SweepReport`] — Ordered `(parameter, total distance)` results

mod harness;
mod input;
mod report;
mod scenario;

pub use harness::{ExperimentHarness, Sweep};
pub use input::ClusterInput;
pub use report::{SweepKind, SweepPoint, SweepReport};
pub use scenario::{ScenarioRun, ScenarioSpec};
