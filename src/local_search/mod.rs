//! Local search over a fixed set of vehicle routes.
//!
//! - [`relocate`] — Segment relocation within and between routes
//! - [`swap`] — Customer exchange within and between routes
//! - [`two_opt`] — Intra-route segment reversal
//! - [`exchange`] — Inter-route tail exchange (2-opt*)
//! - [`repair`] — Greedy removal of capacity overload
//!
//! All operators score moves with an [`AugmentedCost`], so the same descent
//! serves both plain improvement (`lambda = 0`) and guided local search.

mod cost;
mod exchange;
mod relocate;
mod repair;
mod swap;
mod two_opt;

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

pub use cost::AugmentedCost;
pub use exchange::{apply_exchange, find_best_exchange, ExchangeMove};
pub use relocate::{apply_relocate, find_best_relocate, RelocateMove};
pub use repair::repair_capacity;
pub use swap::{apply_swap, find_best_swap, SwapMove};
pub use two_opt::{apply_two_opt, find_best_two_opt, two_opt_delta, TwoOptMove};

use crate::distance::DistanceMatrix;

/// Customer sequences for every vehicle with their cached loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSet {
    routes: Vec<Vec<usize>>,
    loads: Vec<i64>,
}

impl RouteSet {
    /// Wraps customer sequences (depot excluded), computing loads.
    pub fn new(routes: Vec<Vec<usize>>, demands: &[i32]) -> Self {
        let mut set = Self {
            loads: Vec::with_capacity(routes.len()),
            routes,
        };
        set.refresh_loads(demands);
        set
    }

    /// Recomputes cached loads after the sequences changed.
    pub fn refresh_loads(&mut self, demands: &[i32]) {
        self.loads = self
            .routes
            .iter()
            .map(|r| r.iter().map(|&c| i64::from(demands[c])).sum())
            .collect();
    }

    /// Customer sequences, one per vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Cached route loads.
    pub fn loads(&self) -> &[i64] {
        &self.loads
    }

    /// Total plain distance over non-empty routes.
    pub fn distance(&self, distances: &DistanceMatrix, depot: usize) -> i64 {
        self.routes
            .iter()
            .map(|r| distances.tour_distance(depot, r))
            .sum()
    }

    /// Number of arcs traversed by non-empty routes.
    pub fn arc_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.len() + 1)
            .sum()
    }

    /// Total load above capacity across routes.
    pub fn total_overload(&self, capacity: i32) -> i64 {
        self.loads
            .iter()
            .map(|&l| (l - i64::from(capacity)).max(0))
            .sum()
    }

    /// Returns `true` if no route exceeds `capacity`.
    pub fn is_feasible(&self, capacity: i32) -> bool {
        self.loads.iter().all(|&l| l <= i64::from(capacity))
    }

    /// Consumes the set, returning the sequences.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }
}

/// Result of one descent to a local optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descent {
    /// Number of moves applied.
    pub moves: usize,
    /// `true` if the deadline cut the descent short.
    pub interrupted: bool,
}

/// Best-improvement descent until no operator finds an improving move.
///
/// Each pass scans routes in a fresh random order and applies the first
/// operator (relocate, swap, 2-opt, 2-opt*) that reports an improvement.
/// The deadline is checked between moves.
pub fn descend<R: Rng + ?Sized>(
    set: &mut RouteSet,
    cost: &AugmentedCost,
    max_segment_len: usize,
    rng: &mut R,
    deadline: Instant,
) -> Descent {
    let mut order: Vec<usize> = (0..set.routes.len()).collect();
    let mut moves = 0;

    loop {
        if Instant::now() >= deadline {
            return Descent {
                moves,
                interrupted: true,
            };
        }
        order.shuffle(rng);

        if let Some(mv) =
            find_best_relocate(&set.routes, &set.loads, cost, max_segment_len, &order)
        {
            apply_relocate(&mut set.routes, &mv);
        } else if let Some(mv) = find_best_swap(&set.routes, &set.loads, cost, &order) {
            apply_swap(&mut set.routes, &mv);
        } else if let Some(mv) = find_best_two_opt(&set.routes, cost, &order) {
            apply_two_opt(&mut set.routes, &mv);
        } else if let Some(mv) = find_best_exchange(&set.routes, &set.loads, cost, &order) {
            apply_exchange(&mut set.routes, &mv);
        } else {
            return Descent {
                moves,
                interrupted: false,
            };
        }

        set.refresh_loads(cost.demands());
        moves += 1;
    }
}
