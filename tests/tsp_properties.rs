//! End-to-end checks against brute force, plus property tests.

use std::thread;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_exact_tsp::distance::DistanceMatrix;
use u_exact_tsp::models::{Location, SolveStatus, TourResult};
use u_exact_tsp::{Formulation, SolveRequest, SolverConfig, TspSolver};

fn matrix(n: usize, data: Vec<f64>) -> DistanceMatrix {
    let names: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
    DistanceMatrix::from_data(Location::from_names(names), data).expect("valid matrix")
}

fn random_matrix(rng: &mut StdRng, n: usize) -> DistanceMatrix {
    let data = (0..n * n).map(|_| rng.random_range(1.0..100.0)).collect();
    matrix(n, data)
}

/// Minimum directed tour cost, location 0 fixed first.
fn brute_force(dm: &DistanceMatrix) -> f64 {
    fn extend(dm: &DistanceMatrix, path: &mut Vec<usize>, used: &mut [bool], cost: f64, best: &mut f64) {
        let n = dm.size();
        let last = path[path.len() - 1];
        if path.len() == n {
            let total = cost + dm.get(last, path[0]).expect("in range");
            if total < *best {
                *best = total;
            }
            return;
        }
        for next in 1..n {
            if used[next] {
                continue;
            }
            used[next] = true;
            path.push(next);
            let step = dm.get(last, next).expect("in range");
            extend(dm, path, used, cost + step, best);
            path.pop();
            used[next] = false;
        }
    }

    let mut best = f64::INFINITY;
    let mut used = vec![false; dm.size()];
    used[0] = true;
    extend(dm, &mut vec![0], &mut used, 0.0, &mut best);
    best
}

/// Tour cost recomputed from the matrix, by matrix position.
fn tour_cost(dm: &DistanceMatrix, positions: &[usize]) -> f64 {
    let n = positions.len();
    (0..n)
        .map(|k| dm.get(positions[k], positions[(k + 1) % n]).expect("in range"))
        .sum()
}

fn positions(dm: &DistanceMatrix, result: &TourResult) -> Vec<usize> {
    result
        .tour
        .iter()
        .map(|l| dm.position_of(l.name()).expect("known location"))
        .collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(1.0)
}

#[test]
fn test_random_instances_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let dfj = TspSolver::new(SolverConfig::default());
    let mtz = TspSolver::new(SolverConfig::default().with_formulation(Formulation::Mtz));

    for round in 0..12 {
        let n = 3 + round % 4;
        let dm = random_matrix(&mut rng, n);
        let expected = brute_force(&dm);

        for solver in [&dfj, &mtz] {
            let result = solver.solve(SolveRequest::new(&dm)).expect("solve");
            assert_eq!(result.status, SolveStatus::Optimal);
            let got = result.total_distance.expect("distance");
            assert!(
                close(got, expected),
                "n={n} {:?}: got {got}, brute force {expected}",
                solver.config().formulation()
            );
        }
    }
}

#[test]
fn test_concurrent_full_and_subset_solves() {
    let mut rng = StdRng::seed_from_u64(7);
    let dm = random_matrix(&mut rng, 7);
    let solver = TspSolver::default();
    let subset = ["L5", "L1", "L3", "L6"];

    let full_alone = solver.solve(SolveRequest::new(&dm)).expect("full");
    let subset_alone = solver
        .solve(SolveRequest::new(&dm).with_subset(subset))
        .expect("subset");

    let (full, sub) = thread::scope(|s| {
        let full = s.spawn(|| solver.solve(SolveRequest::new(&dm)));
        let sub = s.spawn(|| solver.solve(SolveRequest::new(&dm).with_subset(subset)));
        (
            full.join().expect("full thread").expect("full"),
            sub.join().expect("subset thread").expect("subset"),
        )
    });

    assert!(close(
        full.total_distance.expect("distance"),
        full_alone.total_distance.expect("distance")
    ));
    assert!(close(
        sub.total_distance.expect("distance"),
        subset_alone.total_distance.expect("distance")
    ));
    assert_eq!(sub.tour.len(), 4);
    assert_eq!(sub.names()[0], "L5");
    let mut names = sub.names();
    names.sort_unstable();
    assert_eq!(names, vec!["L1", "L3", "L5", "L6"]);
}

#[test]
fn test_raised_threshold_admits_larger_instance() {
    let mut rng = StdRng::seed_from_u64(3);
    let dm = random_matrix(&mut rng, 8);
    let solver = TspSolver::new(SolverConfig::default().with_max_locations(7));
    assert!(solver.solve(SolveRequest::new(&dm)).is_err());

    let solver = TspSolver::new(SolverConfig::default().with_max_locations(8));
    let result = solver.solve(SolveRequest::new(&dm)).expect("solve");
    assert_eq!(result.status, SolveStatus::Optimal);
    assert!(close(result.total_distance.expect("distance"), brute_force(&dm)));
}

#[test]
fn test_node_budget_returns_feasible_incumbent() {
    let exact = TspSolver::default();
    let mut feasible = 0;

    for seed in 1..=6 {
        let mut rng = StdRng::seed_from_u64(seed);
        let dm = random_matrix(&mut rng, 9);
        let optimum = exact
            .solve(SolveRequest::new(&dm))
            .expect("exact")
            .total_distance
            .expect("optimum");

        for budget in [5, 20] {
            let config = SolverConfig::default()
                .with_formulation(Formulation::Mtz)
                .with_max_nodes(budget);
            let result = TspSolver::new(config)
                .solve(SolveRequest::new(&dm))
                .expect("budgeted");
            assert!(result.nodes_explored <= budget);
            if result.status != SolveStatus::Feasible {
                continue;
            }
            feasible += 1;

            let order = positions(&dm, &result);
            let mut seen = vec![false; 9];
            for &p in &order {
                assert!(!seen[p], "seed {seed}: location {p} visited twice");
                seen[p] = true;
            }
            assert_eq!(order.len(), 9);

            let total = result.total_distance.expect("incumbent distance");
            assert!(close(total, tour_cost(&dm, &order)));
            assert!(
                total >= optimum - 1e-6,
                "seed {seed}: incumbent {total} beats optimum {optimum}"
            );
        }
    }
    assert!(feasible > 0, "no budgeted search stopped with an incumbent");
}

fn instance() -> impl Strategy<Value = (usize, Vec<f64>)> {
    (3usize..=6).prop_flat_map(|n| (Just(n), prop::collection::vec(0.0f64..50.0, n * n)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_optimal_tour_is_hamiltonian_and_consistent((n, data) in instance()) {
        let dm = matrix(n, data);
        let result = TspSolver::default().solve(SolveRequest::new(&dm)).expect("solve");
        prop_assert_eq!(result.status, SolveStatus::Optimal);

        let order = positions(&dm, &result);
        prop_assert_eq!(order.len(), n);
        let mut seen = vec![false; n];
        for &p in &order {
            prop_assert!(!seen[p]);
            seen[p] = true;
        }
        prop_assert_eq!(order[0], 0);

        let total = result.total_distance.expect("distance");
        prop_assert!(close(total, tour_cost(&dm, &order)));
        prop_assert!(close(total, brute_force(&dm)));
    }

    #[test]
    fn prop_tour_respects_subset_bounds((n, data) in instance()) {
        let dm = matrix(n, data);
        let result = TspSolver::default().solve(SolveRequest::new(&dm)).expect("solve");
        let order = positions(&dm, &result);
        let arcs: Vec<(usize, usize)> = (0..n).map(|k| (order[k], order[(k + 1) % n])).collect();

        for mask in 1u64..(1u64 << n) - 1 {
            let size = mask.count_ones() as usize;
            if size < 2 {
                continue;
            }
            let inside = arcs
                .iter()
                .filter(|&&(i, j)| mask & (1 << i) != 0 && mask & (1 << j) != 0)
                .count();
            prop_assert!(inside < size, "mask {mask:b} holds {inside} arcs");
        }
    }

    #[test]
    fn prop_resolving_is_deterministic((n, data) in instance()) {
        let dm = matrix(n, data);
        let solver = TspSolver::default();
        let a = solver.solve(SolveRequest::new(&dm)).expect("first");
        let b = solver.solve(SolveRequest::new(&dm)).expect("second");
        prop_assert!(close(a.total_distance.expect("first"), b.total_distance.expect("second")));
    }

    #[test]
    fn prop_subset_matches_standalone_instance((n, data) in instance(), pick in prop::collection::vec(any::<bool>(), 6)) {
        let dm = matrix(n, data);
        let mut chosen: Vec<usize> = (0..n).filter(|&i| pick[i]).collect();
        if chosen.len() < 2 {
            chosen = vec![0, n - 1];
        }
        let names: Vec<String> = chosen.iter().map(|&i| format!("L{i}")).collect();

        let solver = TspSolver::default();
        let sub = solver
            .solve(SolveRequest::new(&dm).with_subset(names.clone()))
            .expect("subset");

        let rows: Vec<Vec<f64>> = chosen
            .iter()
            .map(|&i| chosen.iter().map(|&j| if i == j { 0.0 } else { dm.get(i, j).expect("in range") }).collect())
            .collect();
        let standalone = solver
            .solve_table(Location::from_names(names.clone()), rows, None, None)
            .expect("standalone");

        prop_assert_eq!(sub.tour.len(), chosen.len());
        prop_assert_eq!(sub.names()[0], names[0].as_str());
        for location in &sub.tour {
            prop_assert!(chosen.contains(&location.index()));
        }
        prop_assert!(close(
            sub.total_distance.expect("subset"),
            standalone.total_distance.expect("standalone")
        ));
    }
}
