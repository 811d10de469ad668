//! End-to-end optimisation tests against the in-process solver

use fcl_algo::{
    find_violations, optimize, sample_instance, solve_instance, GoodLpBackend, MilpBackend,
    SamplerConfig, SolverKind,
};
use fcl_core::{
    Coordinate, Customer, FacilityCandidate, FclError, LocationTable, ProblemInstance, ProblemSize,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn table(n: usize) -> LocationTable {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| (35.0 + (i % 4) as f64 * 0.7, -90.0 + (i / 4) as f64 * 1.3))
        .collect();
    LocationTable::from_coordinates(&points)
}

/// Three customers with demands 20 / 30 / 50 and three candidates at unit
/// opening cost. Only {20, 30} | {50} fits under the bound of 50.
fn fixed_instance(k: usize) -> ProblemInstance {
    let customers = [((0.0, 0.0), 20), ((0.0, 1.0), 30), ((10.0, 0.0), 50)]
        .iter()
        .enumerate()
        .map(|(i, &((lat, lng), demand))| Customer {
            index: i,
            record: i,
            coordinate: Coordinate::new(lat, lng),
            demand,
        })
        .collect();
    let facilities = [(0.0, 0.5), (10.0, 0.0), (5.0, 5.0)]
        .iter()
        .enumerate()
        .map(|(j, &(lat, lng))| FacilityCandidate {
            index: j,
            record: j,
            coordinate: Coordinate::new(lat, lng),
            opening_cost: 1000,
        })
        .collect();
    ProblemInstance::new(customers, facilities, k).unwrap()
}

#[test]
fn test_fixed_instance_optimum() {
    let outcome = solve_instance(fixed_instance(2), &GoodLpBackend::microlp()).unwrap();
    let solution = &outcome.solution;

    assert_eq!(solution.chosen_facilities, vec![0, 1]);
    assert_eq!(solution.assignment.as_slice(), &[0, 0, 1]);
    // 20 * 0.5 + 30 * 0.5 + 50 * 0 + 2 * 1000
    assert!(
        (outcome.total_cost() - 2025.0).abs() < 1e-6,
        "total cost {}",
        outcome.total_cost()
    );
    assert_eq!(outcome.backend, "microlp");
    assert!(find_violations(&outcome.instance, &outcome.costs, solution).is_empty());
}

#[test]
fn test_fixed_instance_single_facility_infeasible() {
    let err = solve_instance(fixed_instance(1), &GoodLpBackend::microlp()).unwrap_err();
    assert!(matches!(err, FclError::InfeasibleModel(_)), "{err}");
}

#[test]
fn test_ten_customers_one_facility_infeasible() {
    let table = table(10);
    let size = ProblemSize::new(10, 2, 1).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let err = optimize(
        &table,
        size,
        &SamplerConfig::default(),
        &GoodLpBackend::microlp(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, FclError::InfeasibleModel(_)), "{err}");
    assert!(err.is_retryable());
}

#[test]
fn test_small_table_feasible_draw() {
    // Random demands only admit k = 2 when they split exactly in half, so
    // keep drawing until one does.
    let table = table(5);
    let size = ProblemSize::new(5, 3, 2).unwrap();
    let backend = GoodLpBackend::microlp();

    let mut solved = None;
    for seed in 0..300 {
        let mut rng = StdRng::seed_from_u64(seed);
        match optimize(&table, size, &SamplerConfig::default(), &backend, &mut rng) {
            Ok(outcome) => {
                solved = Some(outcome);
                break;
            }
            Err(FclError::InfeasibleModel(_)) => continue,
            Err(other) => panic!("seed {seed}: unexpected error {other}"),
        }
    }
    let outcome = solved.expect("no feasible draw in 300 seeds");
    let solution = &outcome.solution;

    assert_eq!(solution.chosen_facilities.len(), 2);
    assert_eq!(solution.assignment.len(), 5);
    for (_, facility) in solution.assignment.iter() {
        assert!(solution.is_chosen(facility));
    }
    let limit = outcome.instance.capacity_limit();
    for (_, load) in solution.facility_loads(&outcome.instance) {
        assert!(load as f64 <= limit + 1e-6);
    }
    assert!(outcome.total_cost() > 0.0);
    let recomputed = solution.recomputed_cost(&outcome.instance, &outcome.costs);
    assert!((outcome.total_cost() - recomputed).abs() < 1e-3 * outcome.total_cost().max(1.0));
}

#[test]
fn test_same_request_same_locations() {
    let table = table(40);
    let size = ProblemSize::new(12, 6, 2).unwrap();
    let config = SamplerConfig::default();

    let a = sample_instance(&table, size, &config, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = sample_instance(&table, size, &config, &mut StdRng::seed_from_u64(2)).unwrap();

    assert_eq!(a.customer_coordinates(), b.customer_coordinates());
    assert_eq!(a.facility_coordinates(), b.facility_coordinates());
}

#[test]
fn test_rejections() {
    for (c, f, k) in [(0, 3, 1), (5, 0, 1), (5, 3, 0), (5, 3, 4)] {
        assert!(matches!(
            ProblemSize::new(c, f, k),
            Err(FclError::InvalidParameter(_))
        ));
    }

    let table = table(5);
    let size = ProblemSize::new(6, 3, 2).unwrap();
    let err = optimize(
        &table,
        size,
        &SamplerConfig::default(),
        &GoodLpBackend::microlp(),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FclError::InsufficientData {
            requested: 6,
            available: 5
        }
    ));
    assert!(!err.is_client_error());
}

#[cfg(feature = "solver-cbc")]
#[test]
fn test_cbc_matches_microlp() {
    let cbc = SolverKind::Cbc.build_backend();
    assert!(cbc.is_available());
    let reference = solve_instance(fixed_instance(2), &GoodLpBackend::microlp()).unwrap();
    let outcome = solve_instance(fixed_instance(2), cbc.as_ref()).unwrap();
    assert!((outcome.total_cost() - reference.total_cost()).abs() < 1e-6);
    assert_eq!(outcome.solution.chosen_facilities, vec![0, 1]);
}

#[cfg(not(feature = "solver-cbc"))]
#[test]
fn test_cbc_without_feature_reports_unavailable() {
    let cbc = SolverKind::Cbc.build_backend();
    assert!(!cbc.is_available());
    let err = solve_instance(fixed_instance(2), cbc.as_ref()).unwrap_err();
    assert!(matches!(err, FclError::SolverUnavailable(_)));
    assert!(err.is_retryable());
}
