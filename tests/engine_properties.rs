//! End-to-end properties of the evolution engine on the reference
//! configuration (2 channels, 16x16, Moore kernel, center weight 10).

use key_automata::{
    AutomataError, AutomatonEngine, CaptureMode, EngineConfig, Grid, Kernel, KernelKind,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_binary_grid(channels: usize, rows: usize, cols: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::from_fn(channels, rows, cols, |_, _, _| {
        if rng.random_bool(0.5) {
            1.0
        } else {
            0.0
        }
    })
    .unwrap()
}

#[test]
fn test_determinism() {
    let seed = random_binary_grid(2, 16, 16, 42);
    let engine = AutomatonEngine::new(Kernel::moore(10));

    let first = engine.evolve(seed.clone(), 500).unwrap();
    let second = engine.evolve(seed.clone(), 500).unwrap();
    assert_eq!(first, second);

    let first_trajectory = engine.trajectory(seed.clone(), 50).unwrap();
    let second_trajectory = engine.trajectory(seed, 50).unwrap();
    assert_eq!(first_trajectory, second_trajectory);
}

#[test]
fn test_zero_iteration_identity() {
    let seed = random_binary_grid(2, 16, 16, 7);
    let engine = AutomatonEngine::default();
    assert_eq!(engine.evolve(seed.clone(), 0).unwrap(), seed);
}

#[test]
fn test_binary_output_invariant() {
    let engine = AutomatonEngine::new(Kernel::moore(10));
    for grid_seed in 0..8 {
        let seed = random_binary_grid(2, 16, 16, grid_seed);
        let mut grid = seed;
        for iteration in 1..=25 {
            grid = engine.step(&grid).unwrap();
            assert!(
                grid.is_binary(),
                "seed {} iteration {} produced a non-binary cell",
                grid_seed,
                iteration
            );
        }
    }
}

#[test]
fn test_binary_output_invariant_von_neumann() {
    let engine = AutomatonEngine::new(Kernel::von_neumann(10));
    let evolved = engine.evolve(random_binary_grid(2, 16, 16, 3), 100).unwrap();
    assert!(evolved.is_binary());
}

#[test]
fn test_toroidal_shift_symmetry() {
    // Shifting the seed and stepping equals stepping and then shifting.
    let seed = random_binary_grid(1, 16, 16, 99);
    let engine = AutomatonEngine::new(Kernel::moore(10));

    for (dr, dc) in [(1, 0), (0, 1), (3, 5), (-2, 7), (15, -1)] {
        let shifted_then_stepped = engine.step(&seed.shifted(dr, dc)).unwrap();
        let stepped_then_shifted = engine.step(&seed).unwrap().shifted(dr, dc);
        assert_eq!(
            shifted_then_stepped, stepped_then_shifted,
            "shift ({}, {})",
            dr, dc
        );
    }
}

#[test]
fn test_neighbor_count_rule_dead_cells() {
    // A dead center cell surrounded by k live neighbors scores exactly k.
    // Per the polynomial's root placement, 2 and 3 (and up to 6) neighbors
    // give birth; 0, 1, 7, and 8 leave the cell dead. Wider spacing than
    // the 3x3 block keeps the toroidal wrap out of the center's
    // neighborhood on a 7x7 grid.
    let neighbor_cells = [
        (2, 2),
        (2, 3),
        (2, 4),
        (3, 2),
        (3, 4),
        (4, 2),
        (4, 3),
        (4, 4),
    ];
    let engine = AutomatonEngine::new(Kernel::moore(10));

    for (k, expected) in [
        (0, 0.0),
        (1, 0.0),
        (2, 1.0),
        (3, 1.0),
        (7, 0.0),
        (8, 0.0),
    ] {
        let live: Vec<_> = neighbor_cells[..k].to_vec();
        let seed = Grid::from_fn(1, 7, 7, |_, r, c| {
            if live.contains(&(r, c)) {
                1.0
            } else {
                0.0
            }
        })
        .unwrap();
        let next = engine.step(&seed).unwrap();
        assert_eq!(next.get(0, 3, 3), expected, "{} live neighbors", k);
    }
}

#[test]
fn test_neighbor_count_rule_live_cells() {
    // A live center with k live neighbors scores 10 + k: survival for
    // k in 2..=4, death otherwise.
    let neighbor_cells = [
        (2, 2),
        (2, 3),
        (2, 4),
        (3, 2),
        (3, 4),
        (4, 2),
        (4, 3),
        (4, 4),
    ];
    let engine = AutomatonEngine::new(Kernel::moore(10));

    for (k, expected) in [
        (0, 0.0),
        (1, 0.0),
        (2, 1.0),
        (3, 1.0),
        (4, 1.0),
        (5, 0.0),
        (8, 0.0),
    ] {
        let live: Vec<_> = neighbor_cells[..k].to_vec();
        let seed = Grid::from_fn(1, 7, 7, |_, r, c| {
            if (r, c) == (3, 3) || live.contains(&(r, c)) {
                1.0
            } else {
                0.0
            }
        })
        .unwrap();
        let next = engine.step(&seed).unwrap();
        assert_eq!(next.get(0, 3, 3), expected, "{} live neighbors", k);
    }
}

#[test]
fn test_single_seed_scenario() {
    // 1-channel 4x4 zero grid with one live cell at (1, 1), Moore kernel,
    // center 10, one iteration. Hard-coded from the polynomial: the seed
    // scores 10 and its 8 toroidal neighbors score 1; every score falls
    // outside both alive intervals, so the grid goes dark.
    let seed = Grid::from_fn(1, 4, 4, |_, r, c| if (r, c) == (1, 1) { 1.0 } else { 0.0 }).unwrap();
    let engine = AutomatonEngine::new(Kernel::moore(10));

    let expected = Grid::zeros(1, 4, 4).unwrap();
    assert_eq!(engine.evolve(seed, 1).unwrap(), expected);
}

#[test]
fn test_trajectory_consistency() {
    let seed = random_binary_grid(2, 8, 8, 11);
    let engine = AutomatonEngine::default();

    let trajectory = engine.trajectory(seed.clone(), 20).unwrap();
    assert_eq!(trajectory.len(), 21);
    for (i, state) in trajectory.iter().enumerate() {
        assert_eq!(
            *state,
            engine.evolve(seed.clone(), i as u64).unwrap(),
            "iteration {}",
            i
        );
    }
    assert_eq!(
        trajectory[20],
        engine.evolve(seed, 20).unwrap(),
        "trajectory end vs final-only"
    );
}

#[test]
fn test_early_termination_keeps_intermediate_state() {
    let seed = random_binary_grid(2, 8, 8, 23);
    let engine = AutomatonEngine::default();

    // Stop as soon as a channel goes extinct, or after 200 iterations.
    let mut last = None;
    for (i, state) in engine.evolution(seed.clone()).take(200).enumerate() {
        let state = state.unwrap();
        let extinct = state.population(0) == 0;
        last = Some((i, state));
        if extinct {
            break;
        }
    }
    let (i, state) = last.unwrap();
    assert_eq!(state, engine.evolve(seed, i as u64 + 1).unwrap());
}

#[test]
fn test_numeric_domain_error_propagates() {
    // A magnitude that overflows the quartic surfaces as NumericDomain with
    // the offending cell's coordinates, not as a silent clamp.
    let seed = Grid::from_fn(1, 4, 4, |_, r, c| {
        if (r, c) == (2, 3) {
            1e100
        } else {
            0.0
        }
    })
    .unwrap();
    let engine = AutomatonEngine::default();
    match engine.evolve(seed, 1).unwrap_err() {
        AutomataError::NumericDomain { channel, row, .. } => {
            assert_eq!(channel, 0);
            // The first overflowing score is in the seed cell's wrapped
            // neighborhood, whose top row is row 1.
            assert_eq!(row, 1);
        }
        other => panic!("expected NumericDomain, got {:?}", other),
    }
}

#[test]
fn test_config_end_to_end() {
    let config = EngineConfig::new(KernelKind::Moore, 100).with_capture(CaptureMode::FullTrajectory);
    config.validate().unwrap();

    let outcome = config.run(random_binary_grid(2, 16, 16, 5)).unwrap();
    let trajectory = outcome.into_trajectory().unwrap();
    assert_eq!(trajectory.len(), 101);
    assert!(trajectory.iter().skip(1).all(Grid::is_binary));
}
