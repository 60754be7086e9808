//! Route extraction: per-vehicle stop sequences and aggregate metrics.

mod extractor;

pub use extractor::{RouteExtractor, RoutePlan, VehicleRoute};
