//! Penalty-augmented cost model shared by all move operators.
//!
//! ```text
//! g(s) = Σ (d(i, j) + λ · p(i, j))  over arcs (i, j) in s
//!      + w · Σ max(0, load(r) − capacity)  over routes r
//! ```
//!
//! `p` are the guided local search arc penalties and `w` weighs overload,
//! which lets the descent pass through capacity-infeasible states.

use crate::distance::DistanceMatrix;
use crate::gls::ArcPenalties;

/// Moves whose augmented delta is not below `-IMPROVEMENT_EPS` are ignored.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-9;

/// Stop preceding position `pos` in a depot-anchored route.
pub(crate) fn before(route: &[usize], pos: usize, depot: usize) -> usize {
    if pos == 0 {
        depot
    } else {
        route[pos - 1]
    }
}

/// Stop at position `pos`, or the depot past the end of the route.
pub(crate) fn at_or_depot(route: &[usize], pos: usize, depot: usize) -> usize {
    route.get(pos).copied().unwrap_or(depot)
}

/// Augmented arc and overload costs for one local search descent.
pub struct AugmentedCost<'a> {
    distances: &'a DistanceMatrix,
    demands: &'a [i32],
    penalties: &'a ArcPenalties,
    capacity: i32,
    depot: usize,
    lambda: f64,
    overload_weight: f64,
}

impl<'a> AugmentedCost<'a> {
    /// Creates a cost model.
    ///
    /// With `lambda = 0` arc penalties are ignored and the model reduces to
    /// distance plus overload.
    pub fn new(
        distances: &'a DistanceMatrix,
        demands: &'a [i32],
        penalties: &'a ArcPenalties,
        capacity: i32,
        depot: usize,
        lambda: f64,
        overload_weight: f64,
    ) -> Self {
        Self {
            distances,
            demands,
            penalties,
            capacity,
            depot,
            lambda,
            overload_weight,
        }
    }

    /// Augmented cost of the arc `from → to`.
    pub fn arc(&self, from: usize, to: usize) -> f64 {
        let d = self.distances.get(from, to) as f64;
        if self.lambda == 0.0 {
            return d;
        }
        d + self.lambda * f64::from(self.penalties.get(from, to))
    }

    /// Overload cost of a route carrying `load`.
    pub fn overload(&self, load: i64) -> f64 {
        (load - i64::from(self.capacity)).max(0) as f64 * self.overload_weight
    }

    /// Change in overload cost when a route's load goes from `old` to `new`.
    pub fn overload_delta(&self, old: i64, new: i64) -> f64 {
        self.overload(new) - self.overload(old)
    }

    /// Demand of a stop.
    pub fn demand(&self, stop: usize) -> i64 {
        i64::from(self.demands[stop])
    }

    /// Demand per stop.
    pub fn demands(&self) -> &[i32] {
        self.demands
    }

    /// Depot stop index.
    pub fn depot(&self) -> usize {
        self.depot
    }
}
