//! Boundary with the geodetic projection and export collaborators.
//!
//! - [`Projection`] — Forward/inverse planar projection, supplied by the caller
//! - [`ScenarioExport`] — Route geometry in lon/lat for map export

mod export;
mod projection;

pub use crate::config::ProjectionOrigin;
pub use export::{ExportRoute, ScenarioExport};
pub use projection::Projection;
