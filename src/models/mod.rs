//! Domain model types for clustered capacitated routing.
//!
//! Provides stops with planar positions and demands, the demand model and
//! fleet derived from them, depot-anchored routes, and the solve result and
//! outcome types returned by the solver.

mod demand;
mod fleet;
mod point;
mod route;
mod solution;
mod stop;

pub use demand::DemandModel;
pub use fleet::VehicleFleet;
pub use point::{GeoPoint, PlanarPoint};
pub use route::Route;
pub use solution::{
    Infeasibility, SolveOutcome, SolveResult, SolveStats, Termination, Violation, ViolationType,
};
pub use stop::Stop;
