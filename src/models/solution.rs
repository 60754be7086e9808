//! Solve results, outcomes, and violation types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Route;
use crate::error::{Result, RoutingError};

/// A type of constraint violation found in a route set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load carried by the route.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A customer appears on no route.
    MissingCustomer {
        /// The unvisited customer.
        customer: usize,
    },
    /// A customer is visited more than once.
    DuplicateVisit {
        /// The repeated customer.
        customer: usize,
    },
    /// A route does not start and end at the depot, or visits it midway.
    NotAnchoredAtDepot {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A route references a stop outside the distance matrix.
    UnknownStop {
        /// Route index in the solution.
        route_index: usize,
        /// The out-of-range stop index.
        stop: usize,
    },
}

/// A constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity,
            } => write!(f, "route {route_index} carries {load} > capacity {capacity}"),
            ViolationType::MissingCustomer { customer } => {
                write!(f, "customer {customer} is not visited")
            }
            ViolationType::DuplicateVisit { customer } => {
                write!(f, "customer {customer} is visited more than once")
            }
            ViolationType::NotAnchoredAtDepot { route_index } => {
                write!(f, "route {route_index} is not anchored at the depot")
            }
            ViolationType::UnknownStop { route_index, stop } => {
                write!(f, "route {route_index} references unknown stop {stop}")
            }
        }
    }
}

/// Why the improvement phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The wall-clock budget elapsed.
    TimeBudget,
    /// The configured round limit was reached.
    IterationLimit,
    /// No improving move was found for the configured number of rounds.
    Stalled,
    /// There was nothing to improve (no customers or a single customer).
    Trivial,
}

/// Search statistics attached to every solved result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Total distance of the construction-phase solution.
    pub initial_distance: i64,
    /// Guided local search rounds completed.
    pub rounds: usize,
    /// Times a new incumbent was committed.
    pub improvements: usize,
    /// Wall-clock time spent in `solve`.
    pub elapsed: Duration,
    /// Why the improvement phase stopped.
    pub termination: Termination,
}

/// A complete, invariant-respecting solution.
///
/// Holds one route per vehicle (possibly empty) such that every customer is
/// visited exactly once and no route exceeds capacity.
///
/// Only the solver constructs one, after checking those invariants. It can
/// be serialized for reports but not deserialized back:
///
/// ```compile_fail
/// fn deserializable<T: serde::de::DeserializeOwned>() {}
/// deserializable::<cluster_cvrp::models::SolveResult>();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    routes: Vec<Route>,
    total_distance: i64,
    total_load: i64,
    feasible: bool,
    stats: SolveStats,
}

impl SolveResult {
    pub(crate) fn new(routes: Vec<Route>, stats: SolveStats) -> Self {
        let total_distance = routes.iter().map(Route::distance).sum();
        let total_load = routes.iter().map(Route::load).sum();
        Self {
            routes,
            total_distance,
            total_load,
            feasible: true,
            stats,
        }
    }

    /// One route per vehicle, in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Sum of arc costs across all routes.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Total distance converted from metres to kilometres.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance as f64 / 1000.0
    }

    /// Sum of demand served across all routes.
    pub fn total_load(&self) -> i64 {
        self.total_load
    }

    /// Always `true`: infeasible outcomes never produce a `SolveResult`.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Number of vehicles that serve at least one customer.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Search statistics.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}

/// Why a solve produced no solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Infeasibility {
    /// All vehicles were filled with customers still unrouted.
    CapacityExhausted {
        /// Customers left without a route.
        unrouted: Vec<usize>,
    },
    /// Construction could not start (no vehicles for a non-empty instance).
    BudgetExceededWithoutSolution,
}

/// Result of a solve: a full solution or an explicit infeasibility signal.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A feasible solution.
    Solved(SolveResult),
    /// No feasible solution exists under the given fleet.
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    /// Returns the solution, if any.
    pub fn solution(&self) -> Option<&SolveResult> {
        match self {
            Self::Solved(result) => Some(result),
            Self::Infeasible(_) => None,
        }
    }

    /// Returns `true` for a solved outcome.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// Converts the outcome into a `Result`, mapping infeasibility to the
    /// matching [`RoutingError`].
    pub fn into_result(self) -> Result<SolveResult> {
        match self {
            Self::Solved(result) => Ok(result),
            Self::Infeasible(Infeasibility::CapacityExhausted { unrouted }) => {
                Err(RoutingError::Infeasible {
                    unrouted: unrouted.len(),
                })
            }
            Self::Infeasible(Infeasibility::BudgetExceededWithoutSolution) => {
                Err(RoutingError::BudgetExceededWithoutSolution)
            }
        }
    }
}
