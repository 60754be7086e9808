//! Construction of an initial route assignment.
//!
//! - [`cheapest_arc`] — Cheapest-arc path construction, one vehicle at a time

mod cheapest_arc;

pub use cheapest_arc::{cheapest_arc, Construction};
