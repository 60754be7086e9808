//! Guided local search driver.
//!
//! # Algorithm
//!
//! 1. Build an initial assignment with [`cheapest_arc`]. Customers left over
//!    once every vehicle is full make the instance infeasible.
//! 2. Repeat until the budget, the round limit, or the stall limit is hit:
//!    - descend to a local optimum of the augmented cost
//!      `distance + λ·penalties + w·overload`;
//!    - copy the optimum, repair any overload, and commit it as the
//!      incumbent if its distance does not exceed the best so far;
//!    - penalize the maximum-utility arcs of the optimum.
//!
//! The first descent runs with `λ = 0`; afterwards λ is set from the mean
//! arc cost of that first local optimum. A descent cut short by the deadline
//! is never committed, so for a fixed seed a longer budget only ever adds
//! rounds to the same trajectory.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (2003). "Guided Local Search", in *Handbook of
//! Metaheuristics*, 185-218.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::ArcPenalties;
use crate::config::SolverConfig;
use crate::constructive::cheapest_arc;
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::local_search::{descend, repair_capacity, AugmentedCost, RouteSet};
use crate::models::{
    DemandModel, Infeasibility, SolveOutcome, SolveResult, SolveStats, Termination, VehicleFleet,
};

/// Lifecycle of a single `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPhase {
    Uninitialized,
    Constructing,
    Improving,
    Solved,
    Infeasible,
}

impl SolverPhase {
    /// Returns `true` if `next` may follow `self`.
    pub fn can_transition_to(self, next: SolverPhase) -> bool {
        use SolverPhase::*;
        matches!(
            (self, next),
            (Uninitialized, Constructing)
                | (Constructing, Improving)
                | (Constructing, Solved)
                | (Constructing, Infeasible)
                | (Improving, Solved)
        )
    }

    /// Returns `true` for `Solved` and `Infeasible`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SolverPhase::Solved | SolverPhase::Infeasible)
    }
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverPhase::Uninitialized => "uninitialized",
            SolverPhase::Constructing => "constructing",
            SolverPhase::Improving => "improving",
            SolverPhase::Solved => "solved",
            SolverPhase::Infeasible => "infeasible",
        };
        f.write_str(name)
    }
}

fn advance(phase: &mut SolverPhase, next: SolverPhase) {
    debug_assert!(phase.can_transition_to(next), "{phase} -> {next}");
    debug!(from = %phase, to = %next, "solver phase");
    *phase = next;
}

/// Capacitated routing solver: cheapest-arc construction followed by guided
/// local search under a wall-clock budget.
///
/// The solver holds only its configuration; every call to `solve` starts
/// from scratch.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cluster_cvrp::config::SolverConfig;
/// use cluster_cvrp::distance::DistanceMatrix;
/// use cluster_cvrp::gls::RoutingSolver;
/// use cluster_cvrp::models::PlanarPoint;
///
/// let dm = DistanceMatrix::from_points(&[
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(10.0, 0.0),
///     PlanarPoint::new(0.0, 10.0),
///     PlanarPoint::new(-10.0, 0.0),
/// ]).unwrap();
///
/// let solver = RoutingSolver::new(SolverConfig::default().with_seed(1).with_max_iterations(20));
/// let outcome = solver
///     .solve(&dm, &[0, 1, 1, 1], 1, 50, 0, Duration::from_secs(1))
///     .unwrap();
/// let result = outcome.solution().unwrap();
/// assert_eq!(result.total_distance(), 48);
/// assert_eq!(result.total_load(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutingSolver {
    config: SolverConfig,
}

impl RoutingSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a demand model with its derived fleet and the configured budget.
    pub fn solve_model(
        &self,
        distances: &DistanceMatrix,
        model: &DemandModel,
    ) -> Result<SolveOutcome> {
        if model.customer_count() + 1 != distances.size() {
            return Err(RoutingError::invalid(format!(
                "demand model has {} customers, distance matrix has {} stops",
                model.customer_count(),
                distances.size()
            )));
        }
        self.solve_fleet(distances, model.demands(), model.fleet())
    }

    /// Solves with an explicit fleet, depot 0, and the configured budget.
    pub fn solve_fleet(
        &self,
        distances: &DistanceMatrix,
        demands: &[i32],
        fleet: VehicleFleet,
    ) -> Result<SolveOutcome> {
        self.solve(
            distances,
            demands,
            fleet.count(),
            fleet.capacity(),
            0,
            self.config.time_budget,
        )
    }

    /// Solves one instance.
    ///
    /// Returns `Err` only for invalid input. An instance that the fleet
    /// cannot serve yields [`SolveOutcome::Infeasible`].
    ///
    /// # Arguments
    ///
    /// * `distances` — Distance matrix over depot and customers
    /// * `demands` — Demand per stop, zero at the depot
    /// * `vehicle_count` — Number of vehicles (one route each)
    /// * `capacity` — Per-vehicle capacity
    /// * `depot` — Depot stop index
    /// * `time_budget` — Wall-clock budget for the improvement phase
    pub fn solve(
        &self,
        distances: &DistanceMatrix,
        demands: &[i32],
        vehicle_count: usize,
        capacity: i32,
        depot: usize,
        time_budget: Duration,
    ) -> Result<SolveOutcome> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.solve_with_rng(
            distances,
            demands,
            vehicle_count,
            capacity,
            depot,
            time_budget,
            &mut rng,
        )
    }

    /// Like [`solve`](Self::solve), drawing move-order randomness from `rng`.
    #[allow(clippy::too_many_arguments)]
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        distances: &DistanceMatrix,
        demands: &[i32],
        vehicle_count: usize,
        capacity: i32,
        depot: usize,
        time_budget: Duration,
        rng: &mut R,
    ) -> Result<SolveOutcome> {
        validate(distances, demands, capacity, depot)?;

        let started = Instant::now();
        let deadline = started + time_budget;
        let customers = distances.size() - 1;
        let mut phase = SolverPhase::Uninitialized;
        advance(&mut phase, SolverPhase::Constructing);

        if customers == 0 {
            let stats = SolveStats {
                initial_distance: 0,
                rounds: 0,
                improvements: 0,
                elapsed: started.elapsed(),
                termination: Termination::Trivial,
            };
            advance(&mut phase, SolverPhase::Solved);
            let empty = vec![Vec::new(); vehicle_count.max(1)];
            return self
                .finish(distances, demands, capacity, depot, &empty, stats)
                .map(SolveOutcome::Solved);
        }

        if vehicle_count == 0 {
            debug!(customers, "no vehicles available for construction");
            advance(&mut phase, SolverPhase::Infeasible);
            return Ok(SolveOutcome::Infeasible(
                Infeasibility::BudgetExceededWithoutSolution,
            ));
        }

        let built = cheapest_arc(distances, demands, vehicle_count, capacity, depot);
        if !built.is_complete() {
            debug!(
                unrouted = built.unrouted.len(),
                vehicle_count, capacity, "fleet exhausted during construction"
            );
            advance(&mut phase, SolverPhase::Infeasible);
            return Ok(SolveOutcome::Infeasible(Infeasibility::CapacityExhausted {
                unrouted: built.unrouted,
            }));
        }

        let mut set = RouteSet::new(built.routes, demands);
        let initial_distance = set.distance(distances, depot);
        debug!(initial_distance, vehicle_count, "construction complete");

        let (best, stats) = if customers <= 1 {
            advance(&mut phase, SolverPhase::Solved);
            let stats = SolveStats {
                initial_distance,
                rounds: 0,
                improvements: 0,
                elapsed: started.elapsed(),
                termination: Termination::Trivial,
            };
            (set.into_routes(), stats)
        } else {
            advance(&mut phase, SolverPhase::Improving);
            let (best, mut stats) =
                self.improve(&mut set, distances, demands, capacity, depot, deadline, rng);
            stats.initial_distance = initial_distance;
            stats.elapsed = started.elapsed();
            advance(&mut phase, SolverPhase::Solved);
            (best, stats)
        };

        let result = self.finish(distances, demands, capacity, depot, &best, stats)?;
        info!(
            total_distance = result.total_distance(),
            initial_distance,
            vehicles_used = result.vehicles_used(),
            rounds = result.stats().rounds,
            termination = ?result.stats().termination,
            "solve complete"
        );
        Ok(SolveOutcome::Solved(result))
    }

    /// Guided local search from a complete, feasible starting assignment.
    /// Returns the best feasible routes found and the search statistics.
    #[allow(clippy::too_many_arguments)]
    fn improve<R: Rng + ?Sized>(
        &self,
        set: &mut RouteSet,
        distances: &DistanceMatrix,
        demands: &[i32],
        capacity: i32,
        depot: usize,
        deadline: Instant,
        rng: &mut R,
    ) -> (Vec<Vec<usize>>, SolveStats) {
        let cfg = &self.config;
        let mut penalties = ArcPenalties::new(distances.size());
        let overload_weight = cfg.capacity_penalty * distances.mean_arc().max(1.0);
        let mut lambda = 0.0;

        let mut best = set.routes().to_vec();
        let mut best_distance = set.distance(distances, depot);
        let mut rounds = 0;
        let mut improvements = 0;
        let mut stalled = 0;

        let termination = loop {
            if Instant::now() >= deadline {
                break Termination::TimeBudget;
            }
            if cfg.max_iterations.is_some_and(|max| rounds >= max) {
                break Termination::IterationLimit;
            }
            if stalled >= cfg.max_stalled_rounds {
                break Termination::Stalled;
            }

            let descent = {
                let cost = AugmentedCost::new(
                    distances,
                    demands,
                    &penalties,
                    capacity,
                    depot,
                    lambda,
                    overload_weight,
                );
                descend(set, &cost, cfg.max_segment_len, rng, deadline)
            };
            if descent.interrupted {
                break Termination::TimeBudget;
            }
            rounds += 1;

            let overload = set.total_overload(capacity);
            let mut candidate = set.routes().to_vec();
            let repaired = set.is_feasible(capacity)
                || repair_capacity(&mut candidate, distances, demands, capacity, depot);
            let distance: i64 = candidate
                .iter()
                .map(|r| distances.tour_distance(depot, r))
                .sum();
            if repaired && distance < best_distance {
                improvements += 1;
                stalled = 0;
                trace!(round = rounds, distance, overload, "new incumbent");
            } else {
                stalled += 1;
            }
            if repaired && distance <= best_distance {
                best_distance = distance;
                best = candidate;
            }

            if rounds == 1 {
                let arcs = set.arc_count().max(1) as f64;
                let mean = set.distance(distances, depot) as f64 / arcs;
                lambda = cfg.lambda_coefficient * mean.max(1.0);
                debug!(lambda, overload_weight, "penalty weights set");
            }

            let penalized = penalties.penalize_max_utility(set.routes(), depot, distances);
            trace!(
                round = rounds,
                penalized,
                total_penalty = penalties.total(),
                moves = descent.moves,
                "penalized arcs"
            );
            if penalized == 0 {
                break Termination::Stalled;
            }
        };

        let stats = SolveStats {
            initial_distance: 0,
            rounds,
            improvements,
            elapsed: Duration::ZERO,
            termination,
        };
        (best, stats)
    }

    /// Builds the result and checks it against every solution invariant.
    fn finish(
        &self,
        distances: &DistanceMatrix,
        demands: &[i32],
        capacity: i32,
        depot: usize,
        sequences: &[Vec<usize>],
        stats: SolveStats,
    ) -> Result<SolveResult> {
        let evaluator = RouteEvaluator::new(distances, demands, capacity, depot);
        let (routes, _) = evaluator.build_routes(sequences);
        let violations = evaluator.check_routes(&routes);
        if !violations.is_empty() {
            let detail: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(RoutingError::InvariantViolated(detail.join("; ")));
        }
        Ok(SolveResult::new(routes, stats))
    }
}

fn validate(distances: &DistanceMatrix, demands: &[i32], capacity: i32, depot: usize) -> Result<()> {
    let n = distances.size();
    if demands.len() != n {
        return Err(RoutingError::invalid(format!(
            "{} demands for a {n}x{n} distance matrix",
            demands.len()
        )));
    }
    if depot >= n {
        return Err(RoutingError::invalid(format!(
            "depot index {depot} out of range for {n} stops"
        )));
    }
    if capacity <= 0 {
        return Err(RoutingError::invalid(format!(
            "capacity must be positive, got {capacity}"
        )));
    }
    if demands[depot] != 0 {
        return Err(RoutingError::invalid("depot demand must be zero"));
    }
    if let Some(i) = demands.iter().position(|&d| d < 0) {
        return Err(RoutingError::invalid(format!("negative demand at stop {i}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RouteExtractor;
    use crate::models::PlanarPoint;
    use proptest::prelude::*;

    fn toy() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(0.0, 10.0),
            PlanarPoint::new(-10.0, 0.0),
        ])
        .expect("valid")
    }

    fn seeded(rounds: usize) -> RoutingSolver {
        RoutingSolver::new(
            SolverConfig::default()
                .with_seed(42)
                .with_max_iterations(rounds),
        )
    }

    fn grid(side: usize, spacing: f64) -> DistanceMatrix {
        let mut pts = vec![PlanarPoint::new(0.0, 0.0)];
        for i in 0..side {
            for j in 0..side {
                pts.push(PlanarPoint::new(
                    (i as f64 - side as f64 / 2.0) * spacing,
                    (j as f64 + 1.0) * spacing,
                ));
            }
        }
        DistanceMatrix::from_points(&pts).expect("valid")
    }

    #[test]
    fn test_toy_instance_optimal() {
        let out = seeded(20)
            .solve(&toy(), &[0, 1, 1, 1], 1, 50, 0, Duration::from_secs(5))
            .expect("valid input");
        let result = out.solution().expect("solved");
        // 10 + 14 + 14 + 10
        assert_eq!(result.total_distance(), 48);
        assert_eq!(result.routes().len(), 1);
        assert_eq!(result.routes()[0].len(), 3);
        assert!(result.is_feasible());
    }

    #[test]
    fn test_zero_customers() {
        let dm = DistanceMatrix::from_data(1, vec![0]).expect("valid");
        let out = seeded(5)
            .solve(&dm, &[0], 1, 50, 0, Duration::from_millis(10))
            .expect("valid input");
        let result = out.solution().expect("solved");
        assert_eq!(result.routes().len(), 1);
        assert_eq!(result.routes()[0].stops(), &[0, 0]);
        assert_eq!(result.total_distance(), 0);
        assert_eq!(result.total_load(), 0);
        assert_eq!(result.stats().termination, Termination::Trivial);
    }

    #[test]
    fn test_zero_vehicles() {
        let out = seeded(5)
            .solve(&toy(), &[0, 1, 1, 1], 0, 50, 0, Duration::from_millis(10))
            .expect("valid input");
        assert_eq!(
            out,
            SolveOutcome::Infeasible(Infeasibility::BudgetExceededWithoutSolution)
        );
    }

    #[test]
    fn test_undersized_fleet_is_infeasible() {
        let out = seeded(5)
            .solve(&toy(), &[0, 1, 1, 1], 1, 2, 0, Duration::from_millis(10))
            .expect("valid input");
        match out {
            SolveOutcome::Infeasible(Infeasibility::CapacityExhausted { unrouted }) => {
                assert_eq!(unrouted.len(), 1);
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_input() {
        let solver = seeded(1);
        let budget = Duration::from_millis(10);
        let dm = toy();
        assert!(matches!(
            solver.solve(&dm, &[0, 1, 1], 1, 50, 0, budget),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(matches!(
            solver.solve(&dm, &[0, 1, 1, 1], 1, 50, 4, budget),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(matches!(
            solver.solve(&dm, &[0, 1, 1, 1], 1, 0, 0, budget),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(matches!(
            solver.solve(&dm, &[1, 1, 1, 1], 1, 50, 0, budget),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(matches!(
            solver.solve(&dm, &[0, 1, -1, 1], 1, 50, 0, budget),
            Err(RoutingError::InvalidInput(_))
        ));
        let short = DemandModel::uniform(2, 1, 50).expect("valid");
        assert!(matches!(
            solver.solve_model(&dm, &short),
            Err(RoutingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_improves_on_construction() {
        let dm = grid(5, 100.0);
        let demands: Vec<i32> = (0..26).map(|i| i32::from(i > 0)).collect();
        let out = seeded(50)
            .solve(&dm, &demands, 3, 10, 0, Duration::from_secs(30))
            .expect("valid input");
        let result = out.solution().expect("solved");
        assert!(result.total_distance() <= result.stats().initial_distance);
        assert_eq!(result.total_load(), 25);
        for route in result.routes() {
            assert!(route.load() <= 10);
        }
    }

    #[test]
    fn test_loads_near_i32_max() {
        let big = i32::MAX;
        let out = seeded(5)
            .solve(&toy(), &[0, big, big, big], 3, big, 0, Duration::from_secs(30))
            .expect("valid input");
        let result = out.solution().expect("one customer per vehicle");
        assert_eq!(result.total_load(), 3 * i64::from(big));
        assert!(result.routes().iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_seeded_runs_match() {
        let dm = grid(4, 50.0);
        let demands: Vec<i32> = (0..17).map(|i| i32::from(i > 0)).collect();
        let run = || {
            seeded(30)
                .solve(&dm, &demands, 2, 9, 0, Duration::from_secs(30))
                .expect("valid input")
                .solution()
                .map(|r| r.routes().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_more_rounds_never_worse() {
        let dm = grid(4, 70.0);
        let demands: Vec<i32> = (0..17).map(|i| i32::from(i > 0)).collect();
        let mut last = i64::MAX;
        for rounds in [1, 5, 20, 60] {
            let d = seeded(rounds)
                .solve(&dm, &demands, 2, 9, 0, Duration::from_secs(30))
                .expect("valid input")
                .solution()
                .expect("solved")
                .total_distance();
            assert!(d <= last, "{rounds} rounds gave {d} after {last}");
            last = d;
        }
    }

    #[test]
    fn test_phase_transitions() {
        use SolverPhase::*;
        assert!(Uninitialized.can_transition_to(Constructing));
        assert!(Constructing.can_transition_to(Improving));
        assert!(Improving.can_transition_to(Solved));
        assert!(!Improving.can_transition_to(Constructing));
        assert!(!Solved.can_transition_to(Improving));
        assert!(Infeasible.is_terminal());
        assert!(!Improving.is_terminal());
        assert_eq!(Improving.to_string(), "improving");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_solutions_respect_invariants(
            coords in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..25),
            capacity in 2i32..8,
            seed in any::<u64>(),
        ) {
            let mut pts = vec![PlanarPoint::new(0.0, 0.0)];
            pts.extend(coords.iter().map(|&(x, y)| PlanarPoint::new(x, y)));
            let dm = DistanceMatrix::from_points(&pts).expect("finite");
            let model = DemandModel::uniform(coords.len(), 1, capacity).expect("valid");
            let solver = RoutingSolver::new(
                SolverConfig::default()
                    .with_seed(seed)
                    .with_max_iterations(10)
                    .with_time_budget(Duration::from_secs(30)),
            );

            let out = solver.solve_model(&dm, &model).expect("valid input");
            let result = out.solution().expect("derived fleet always suffices");

            prop_assert_eq!(result.routes().len(), model.vehicle_count());
            let mut seen = vec![0usize; pts.len()];
            for route in result.routes() {
                let stops = route.stops();
                prop_assert_eq!(stops[0], 0);
                prop_assert_eq!(stops[stops.len() - 1], 0);
                prop_assert!(route.load() <= i64::from(capacity));
                for &c in route.customers() {
                    seen[c] += 1;
                }
            }
            prop_assert!(seen[1..].iter().all(|&v| v == 1));

            let plan = RouteExtractor::new(&dm, model.demands()).extract(result);
            prop_assert_eq!(plan.total_distance, result.total_distance());
            prop_assert_eq!(plan.total_load, result.total_load());
        }
    }
}
