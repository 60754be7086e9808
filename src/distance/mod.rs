//! Integer distance matrix over planar stop coordinates.

mod matrix;

pub use matrix::DistanceMatrix;
