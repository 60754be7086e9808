//! Arc penalties for guided local search.
//!
//! A feature is an undirected arc `{i, j}`. At each local optimum the arcs of
//! the current solution with the highest utility
//!
//! ```text
//! util(i, j) = d(i, j) / (1 + p(i, j))
//! ```
//!
//! have their penalty incremented, pushing the next descent away from long
//! arcs that keep reappearing.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use crate::distance::DistanceMatrix;

/// Symmetric penalty counters over all arcs of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcPenalties {
    counts: Vec<u32>,
    size: usize,
}

impl ArcPenalties {
    /// Creates zeroed penalties for `size` stops.
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        lo * self.size + hi
    }

    /// Penalty of the arc `{i, j}`.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.counts[self.slot(i, j)]
    }

    /// Adds one to the penalty of the arc `{i, j}`.
    pub fn increment(&mut self, i: usize, j: usize) {
        let slot = self.slot(i, j);
        self.counts[slot] = self.counts[slot].saturating_add(1);
    }

    /// Sum of all penalties.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Penalizes the maximum-utility arcs among those used by `routes`.
    ///
    /// Returns the number of arcs penalized (ties are all penalized).
    pub fn penalize_max_utility(
        &mut self,
        routes: &[Vec<usize>],
        depot: usize,
        distances: &DistanceMatrix,
    ) -> usize {
        let mut arcs = Vec::new();
        for route in routes.iter().filter(|r| !r.is_empty()) {
            let mut prev = depot;
            for &c in route {
                arcs.push((prev, c));
                prev = c;
            }
            arcs.push((prev, depot));
        }

        let utility =
            |&(i, j): &(usize, usize)| distances.get(i, j) as f64 / (1.0 + f64::from(self.get(i, j)));
        let max_util = arcs.iter().map(utility).fold(f64::NEG_INFINITY, f64::max);
        if max_util <= 0.0 {
            return 0;
        }

        let mut chosen: Vec<(usize, usize)> = arcs
            .iter()
            .filter(|a| utility(a) >= max_util)
            .map(|&(i, j)| (i.min(j), i.max(j)))
            .collect();
        // A single-customer route uses its depot arc in both directions.
        chosen.sort_unstable();
        chosen.dedup();
        for &(i, j) in &chosen {
            self.increment(i, j);
        }
        chosen.len()
    }
}
