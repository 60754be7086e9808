//! Guided local search solver.
//!
//! - [`RoutingSolver`] — Construction plus time-bounded guided local search
//! - [`ArcPenalties`] — Undirected arc penalty counters
//! - [`SolverPhase`] — Lifecycle of one solve call

mod penalties;
mod solver;

pub use penalties::ArcPenalties;
pub use solver::{RoutingSolver, SolverPhase};
