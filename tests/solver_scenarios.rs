use std::time::Duration;

use cluster_cvrp::config::SolverConfig;
use cluster_cvrp::distance::DistanceMatrix;
use cluster_cvrp::evaluation::RouteEvaluator;
use cluster_cvrp::extract::RouteExtractor;
use cluster_cvrp::gls::RoutingSolver;
use cluster_cvrp::models::{DemandModel, Infeasibility, PlanarPoint, SolveOutcome, VehicleFleet};
use cluster_cvrp::RoutingError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn solver(rounds: usize) -> RoutingSolver {
    RoutingSolver::new(
        SolverConfig::default()
            .with_seed(2024)
            .with_max_iterations(rounds)
            .with_time_budget(Duration::from_secs(5)),
    )
}

/// Deterministic scatter of `n` customers around the origin.
fn scatter(n: usize) -> Vec<PlanarPoint> {
    let mut pts = vec![PlanarPoint::new(0.0, 0.0)];
    for i in 0..n {
        let r = 300.0 + (i * 7919 % 1000) as f64;
        let a = i as f64 * 2.399_963;
        pts.push(PlanarPoint::new(r * a.cos(), r * a.sin()));
    }
    pts
}

#[test]
fn toy_instance_matches_hand_computed_optimum() {
    init_tracing();
    let dm = DistanceMatrix::from_points(&[
        PlanarPoint::new(0.0, 0.0),
        PlanarPoint::new(10.0, 0.0),
        PlanarPoint::new(0.0, 10.0),
        PlanarPoint::new(-10.0, 0.0),
    ])
    .expect("valid");
    let model = DemandModel::uniform(3, 1, 50).expect("valid");
    assert_eq!(model.vehicle_count(), 1);

    let outcome = solver(20).solve_model(&dm, &model).expect("valid input");
    let result = outcome.solution().expect("solved");

    // 0 → (10,0) → (0,10) → (-10,0) → 0 = 10 + 14 + 14 + 10
    assert_eq!(result.total_distance(), 48);
    assert_eq!(result.total_load(), 3);
    assert_eq!(result.routes().len(), 1);
    assert_eq!(result.routes()[0].customers().len(), 3);
}

#[test]
fn hundred_and_one_customers_need_three_vehicles() {
    init_tracing();
    let pts = scatter(101);
    let dm = DistanceMatrix::from_points(&pts).expect("valid");
    let model = DemandModel::uniform(101, 1, 50).expect("valid");
    assert_eq!(model.vehicle_count(), 3);

    let two = solver(1)
        .solve_fleet(&dm, model.demands(), VehicleFleet::new(2, 50))
        .expect("valid input");
    match two {
        SolveOutcome::Infeasible(Infeasibility::CapacityExhausted { unrouted }) => {
            assert_eq!(unrouted.len(), 1);
        }
        other => panic!("two vehicles must not suffice: {other:?}"),
    }
    let one = solver(1)
        .solve_fleet(&dm, model.demands(), VehicleFleet::new(1, 50))
        .expect("valid input");
    assert!(!one.is_solved());

    let three = solver(2).solve_model(&dm, &model).expect("valid input");
    let result = three.solution().expect("three vehicles suffice");
    assert_eq!(result.routes().len(), 3);
    assert!(result.routes().iter().all(|r| r.load() <= 50));
    assert_eq!(result.total_load(), 101);

    let evaluator = RouteEvaluator::new(&dm, model.demands(), 50, 0);
    assert!(evaluator.check_routes(result.routes()).is_empty());
}

#[test]
fn zero_customers_give_one_empty_route() {
    let dm = DistanceMatrix::from_data(1, vec![0]).expect("depot only");
    let model = DemandModel::uniform(0, 1, 50).expect("valid");
    assert_eq!(model.vehicle_count(), 1);

    let outcome = solver(5).solve_model(&dm, &model).expect("valid input");
    let result = outcome.solution().expect("solved");
    assert_eq!(result.routes().len(), 1);
    assert_eq!(result.routes()[0].stops(), &[0, 0]);
    assert_eq!(result.total_distance(), 0);
    assert_eq!(result.total_load(), 0);
}

#[test]
fn too_few_stops_for_a_matrix() {
    let err = DistanceMatrix::from_points(&[PlanarPoint::new(0.0, 0.0)]).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidInput(_)));
}

#[test]
fn extractor_reproduces_solver_totals() {
    let pts = scatter(40);
    let dm = DistanceMatrix::from_points(&pts).expect("valid");
    let model = DemandModel::uniform(40, 1, 12).expect("valid");
    let outcome = solver(10).solve_model(&dm, &model).expect("valid input");
    let result = outcome.solution().expect("solved");

    let plan = RouteExtractor::new(&dm, model.demands())
        .extract_verified(result)
        .expect("totals agree");
    assert_eq!(plan.total_distance, result.total_distance());
    assert_eq!(plan.vehicles.len(), model.vehicle_count());
    for v in &plan.vehicles {
        assert_eq!(v.stops.first(), Some(&0));
        assert_eq!(v.stops.last(), Some(&0));
        assert_eq!(v.cumulative_load.last().copied(), Some(v.load));
        assert!(v.load <= 12);
    }
    assert!(plan.to_string().contains("Total distance of all routes"));
}

#[test]
fn construction_is_reproducible_across_runs() {
    let pts = scatter(30);
    let dm = DistanceMatrix::from_points(&pts).expect("valid");
    let model = DemandModel::uniform(30, 1, 8).expect("valid");
    let a = solver(0).solve_model(&dm, &model).expect("valid input");
    let b = solver(0).solve_model(&dm, &model).expect("valid input");
    let (a, b) = (a.solution().expect("solved"), b.solution().expect("solved"));
    assert_eq!(a.routes(), b.routes());
    assert_eq!(a.total_distance(), a.stats().initial_distance);
}
