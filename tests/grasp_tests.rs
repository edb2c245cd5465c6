// tests/grasp_tests.rs
//! Tests voor de GRASP-hoofdlus: budgetgrenzen, incumbent-monotonie,
//! reproduceerbaarheid met vaste seed en gedrag op onhaalbare instanties.

extern crate scqbf;
use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use scqbf::config::ConfigError;
use scqbf::grasp::{Grasp, StopReason};
use scqbf::instance::Instance;
use scqbf::params::{ConstructionMethod, Params, SearchMethod};
use scqbf::solution::Solution;

fn toy() -> Instance {
    let mut inst = Instance::with_sets(0..3, vec![vec![0, 1], vec![2], vec![0, 1, 2]]).unwrap();
    inst.set_linear(0, 1.0);
    inst.set_linear(1, 1.0);
    inst.set_linear(2, 5.0);
    inst
}

/// Willekeurige instantie waarin elk element door minstens één set gedekt wordt.
fn random_instance(seed: u64, n: usize, m: usize) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sets = vec![Vec::new(); n];
    for e in 1..=m {
        let owner = rng.gen_range(0..n);
        for (s, set) in sets.iter_mut().enumerate() {
            if s == owner || rng.gen_bool(0.2) {
                set.push(e);
            }
        }
    }
    let coefficients = (0..n)
        .map(|i| (i..n).map(|_| rng.gen_range(-10.0..10.0)).collect())
        .collect();
    Instance::from_parts(1..=m, sets, coefficients).unwrap()
}

fn seeded(
    alpha: f64,
    max_iterations: usize,
    construction: ConstructionMethod,
    search: SearchMethod,
    seed: u64,
) -> Params {
    let mut p = Params::new(alpha, max_iterations, 60.0, construction, search);
    p.with_seed(seed);
    p
}

#[test]
fn test_zero_iterations_yields_empty_incumbent() {
    let inst = toy();
    let mut grasp = Grasp::new(seeded(
        0.1,
        0,
        ConstructionMethod::Standard,
        SearchMethod::FirstImproving,
        1,
    ))
    .unwrap();
    let out = grasp.run(&inst);
    assert!(out.best.is_empty());
    assert_eq!(out.best.value, f64::NEG_INFINITY);
    assert_eq!(out.iterations, 0);
    assert_eq!(out.stop_reason, StopReason::IterationLimit);
    assert!(out.improvements.is_empty());
}

#[test]
fn test_zero_time_limit_yields_empty_incumbent() {
    let inst = toy();
    let mut p = seeded(
        0.1,
        1_000,
        ConstructionMethod::Standard,
        SearchMethod::FirstImproving,
        1,
    );
    p.time_limit = 0.0;
    let mut grasp = Grasp::new(p).unwrap();
    let out = grasp.run(&inst);
    assert!(out.best.is_empty());
    assert_eq!(out.iterations, 0);
    assert_eq!(out.stop_reason, StopReason::TimeLimit);
}

#[test]
fn test_toy_instance_every_configuration() {
    let inst = toy();
    for construction in ConstructionMethod::ALL {
        for search in SearchMethod::ALL {
            let mut grasp = Grasp::new(seeded(0.0, 5, construction, search, 3)).unwrap();
            let out = grasp.run(&inst);
            assert_eq!(out.best.solution, Solution::from_indices(3, &[0, 1, 2]));
            assert_relative_eq!(out.best.value, 7.0);
            assert!(inst.is_feasible(&out.best.solution));
            assert_eq!(out.iterations, 5);
            // Alleen de eerste iteratie levert een nieuwe incumbent op.
            assert_eq!(out.improvements, vec![(1, 7.0)]);
        }
    }
}

#[test]
fn test_incumbent_is_monotone() {
    for seed in 0..5 {
        let inst = random_instance(seed, 12, 25);
        for construction in ConstructionMethod::ALL {
            for search in SearchMethod::ALL {
                let mut grasp = Grasp::new(seeded(0.4, 25, construction, search, seed)).unwrap();
                let out = grasp.run(&inst);
                assert!(!out.best.is_empty());
                for pair in out.improvements.windows(2) {
                    assert!(pair[0].0 < pair[1].0);
                    assert!(pair[0].1 < pair[1].1);
                }
                let last = out.improvements.last().unwrap();
                assert_relative_eq!(last.1, out.best.value);
                assert_relative_eq!(out.best.value, inst.evaluate(&out.best.solution));
                assert!(inst.is_feasible(&out.best.solution));
            }
        }
    }
}

#[test]
fn test_same_seed_same_result() {
    let inst = random_instance(9, 14, 30);
    let p = seeded(
        0.3,
        20,
        ConstructionMethod::SampledGreedy,
        SearchMethod::BestImproving,
        77,
    );
    let a = Grasp::new(p.clone()).unwrap().run(&inst);
    let b = Grasp::new(p.clone()).unwrap().run(&inst);
    assert_eq!(a.best, b.best);
    assert_eq!(a.improvements, b.improvements);

    let solved = Grasp::new(p).unwrap().solve(&inst);
    assert_eq!(solved, a.best.solution);
}

#[test]
fn test_unsatisfiable_instance_keeps_empty_incumbent() {
    // Element 3 wordt door geen enkele set gedekt.
    let inst = Instance::with_sets(1..=3, vec![vec![1], vec![2]]).unwrap();
    let mut grasp = Grasp::new(seeded(
        0.5,
        10,
        ConstructionMethod::Standard,
        SearchMethod::FirstImproving,
        2,
    ))
    .unwrap();
    let out = grasp.run(&inst);
    assert_eq!(out.iterations, 10);
    assert!(out.best.is_empty());
    assert!(!inst.is_feasible(&out.best.solution));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let mut p = Params::default();
    p.alpha = 1.5;
    assert!(matches!(Grasp::new(p), Err(ConfigError::Invalid(_))));

    let mut p = Params::default();
    p.random_inclusion_probability = -0.1;
    assert!(matches!(Grasp::new(p), Err(ConfigError::Invalid(_))));

    let mut p = Params::default();
    p.time_limit = f64::NAN;
    assert!(matches!(Grasp::new(p), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_infinite_time_limit_runs_all_iterations() {
    let inst = toy();
    let mut p = seeded(
        0.2,
        3,
        ConstructionMethod::RandomPlusGreedy,
        SearchMethod::FirstImproving,
        4,
    );
    p.time_limit = f64::INFINITY;
    let out = Grasp::new(p).unwrap().run(&inst);
    assert_eq!(out.iterations, 3);
    assert_eq!(out.stop_reason, StopReason::IterationLimit);
}
