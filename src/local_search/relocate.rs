//! Segment relocation operator (Or-opt generalized across routes).
//!
//! # Algorithm
//!
//! Moves a segment of 1 to `max_len` consecutive customers to the best
//! position in any route, its own included, optionally reversing it. Move
//! values are measured on the augmented cost, so a relocation may overload
//! the receiving route if the arc savings outweigh the overload charge.
//!
//! # Complexity
//!
//! O(n² × k) per scan, where n = customers and k = `max_len`.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::cost::{at_or_depot, before, AugmentedCost, IMPROVEMENT_EPS};

/// A segment relocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelocateMove {
    /// Route the segment is taken from.
    pub from_route: usize,
    /// Position of the first segment customer.
    pub from_pos: usize,
    /// Segment length.
    pub len: usize,
    /// Receiving route.
    pub to_route: usize,
    /// Insertion position in the receiving route, before removal.
    pub to_pos: usize,
    /// Whether the segment is inserted in reverse order.
    pub reversed: bool,
    /// Change in augmented cost.
    pub delta: f64,
}

/// Finds the best improving segment relocation, scanning routes in `order`.
pub fn find_best_relocate(
    routes: &[Vec<usize>],
    loads: &[i64],
    cost: &AugmentedCost,
    max_len: usize,
    order: &[usize],
) -> Option<RelocateMove> {
    let depot = cost.depot();
    let mut best: Option<RelocateMove> = None;
    let mut best_delta = -IMPROVEMENT_EPS;

    for &a in order {
        let ra = &routes[a];
        let n = ra.len();
        for len in 1..=max_len.min(n) {
            for i in 0..=(n - len) {
                let first = ra[i];
                let last = ra[i + len - 1];
                let prev = before(ra, i, depot);
                let next = at_or_depot(ra, i + len, depot);
                let seg_load: i64 = ra[i..i + len].iter().map(|&c| cost.demand(c)).sum();
                let removal =
                    cost.arc(prev, next) - cost.arc(prev, first) - cost.arc(last, next);

                for &b in order {
                    let rb = &routes[b];
                    let load_delta = if a == b {
                        0.0
                    } else {
                        cost.overload_delta(loads[a], loads[a] - seg_load)
                            + cost.overload_delta(loads[b], loads[b] + seg_load)
                    };

                    for j in 0..=rb.len() {
                        // Positions touching the segment reproduce the same route.
                        if a == b && j >= i && j <= i + len {
                            continue;
                        }
                        let p = before(rb, j, depot);
                        let q = at_or_depot(rb, j, depot);
                        let base = removal + load_delta - cost.arc(p, q);

                        for reversed in [false, true] {
                            if reversed && len == 1 {
                                continue;
                            }
                            let (s, e) = if reversed { (last, first) } else { (first, last) };
                            let delta = base + cost.arc(p, s) + cost.arc(e, q);
                            if delta < best_delta {
                                best_delta = delta;
                                best = Some(RelocateMove {
                                    from_route: a,
                                    from_pos: i,
                                    len,
                                    to_route: b,
                                    to_pos: j,
                                    reversed,
                                    delta,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    best
}

/// Applies a relocation in place.
pub fn apply_relocate(routes: &mut [Vec<usize>], mv: &RelocateMove) {
    let mut segment: Vec<usize> = routes[mv.from_route]
        .drain(mv.from_pos..mv.from_pos + mv.len)
        .collect();
    if mv.reversed {
        segment.reverse();
    }
    let pos = if mv.from_route == mv.to_route && mv.to_pos > mv.from_pos {
        mv.to_pos - mv.len
    } else {
        mv.to_pos
    };
    routes[mv.to_route].splice(pos..pos, segment);
}
