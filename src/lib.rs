//! # cluster-cvrp
//!
//! Capacitated vehicle routing for clustered delivery stops: cheapest-arc
//! construction, guided local search under a wall-clock budget, route
//! extraction, and sweep experiments over time budget and depot placement.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Stop, DemandModel, VehicleFleet, Route, SolveResult)
//! - [`distance`] — Integer distance matrix
//! - [`evaluation`] — Route building and solution invariant checks
//! - [`constructive`] — Cheapest-arc construction
//! - [`local_search`] — Move operators on a penalty-augmented cost
//! - [`gls`] — Guided local search solver
//! - [`extract`] — Per-vehicle plans and aggregate metrics
//! - [`geo`] — Projection and export boundary
//! - [`experiment`] — Time-budget and depot-perturbation sweeps
//! - [`config`] — Solver, fleet, and harness configuration
//! - [`error`] — Error types

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod experiment;
pub mod extract;
pub mod geo;
pub mod gls;
pub mod local_search;
pub mod models;

pub use error::{Result, RoutingError};
