//! Integration tests for Kohonen map training.

use kohonen::som::{decay, update_grid};
use kohonen::{
    ChainBoundary, Coordinate, FrameKind, GridPosition, KohonenError, NeuronGrid, NeuronMap,
    NoopVisualizer, SampleDistribution, SampleGenerator, SamplingConfig, SnapshotRecorder,
    SomTrainer, Topology, TrainingConfig, GRID_SIDE,
};

const EPS: f64 = 1e-12;

fn generator(distribution: SampleDistribution, seed: u64) -> SampleGenerator {
    SampleGenerator::new(SamplingConfig {
        sample_count: 200,
        distribution,
        neuron_count: 30,
        init_half_range: 0.2,
        seed: Some(seed),
    })
    .unwrap()
}

fn training(seed: u64) -> TrainingConfig {
    TrainingConfig {
        passes: 10,
        shuffle: true,
        seed: Some(seed),
        ..Default::default()
    }
}

fn bounding_width(positions: &[Coordinate]) -> f64 {
    let min = positions.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max = positions.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    max - min
}

#[test]
fn test_end_to_end_training() {
    let disk = SampleDistribution::Disk { radius: 2.0 };

    for topology in [Topology::Chain, Topology::Ring, Topology::Grid] {
        let mut gen = generator(disk, 11);
        let samples = gen.samples().unwrap();
        let mut map = NeuronMap::from_positions(topology, gen.neurons(topology)).unwrap();
        let before = map.positions();

        let report = SomTrainer::new(training(12))
            .train(&mut map, &samples, &mut NoopVisualizer)
            .unwrap();

        assert_eq!(report.topology, topology);
        assert_eq!(report.passes, 10);
        assert_eq!(report.samples_seen, 2000);

        let after = map.positions();
        assert_ne!(before, after);

        // Every move is a convex step toward a sample inside the disk, and the
        // neurons start inside it too, so they never leave it.
        let limit = disk.outer_radius() + EPS;
        assert!(after.iter().all(|p| p.distance(&Coordinate::default()) <= limit));

        // The map unfolds well beyond the initial 0.4-wide square.
        assert!(bounding_width(&after) > 1.0, "{} map did not spread", topology);

        // Only the last winner is still excluded.
        assert_eq!(map.excluded_count(), 1);
    }
}

#[test]
fn test_annulus_and_mixed_distributions_train() {
    for distribution in [
        SampleDistribution::Annulus { inner: 2.0, outer: 4.0 },
        SampleDistribution::Mixed { radius: 2.0 },
    ] {
        let mut gen = generator(distribution, 3);
        let samples = gen.samples().unwrap();
        let mut map = NeuronMap::ring(gen.neurons(Topology::Ring)).unwrap();

        let report = SomTrainer::new(training(4))
            .train(&mut map, &samples, &mut NoopVisualizer)
            .unwrap();

        assert_eq!(report.samples_seen, 2000);
        assert!(map.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn test_empty_samples_bit_identical() {
    let mut gen = generator(SampleDistribution::default(), 5);
    for topology in [Topology::Chain, Topology::Ring, Topology::Grid] {
        let mut map = NeuronMap::from_positions(topology, gen.neurons(topology)).unwrap();
        let before: Vec<(u64, u64)> = map
            .positions()
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();

        SomTrainer::new(training(1))
            .train(&mut map, &[], &mut NoopVisualizer)
            .unwrap();

        let after: Vec<(u64, u64)> = map
            .positions()
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        assert_eq!(before, after);
    }
}

#[test]
fn test_invalid_configurations() {
    assert!(matches!(
        NeuronMap::chain(Vec::new()),
        Err(KohonenError::InvalidConfiguration(_))
    ));

    let four_rows = vec![vec![Coordinate::default(); GRID_SIDE]; GRID_SIDE - 1];
    assert!(matches!(
        NeuronMap::grid(four_rows),
        Err(KohonenError::InvalidConfiguration(_))
    ));

    let mut map = NeuronMap::ring(vec![Coordinate::default(); 3]).unwrap();
    let result = SomTrainer::new(TrainingConfig {
        passes: 0,
        ..Default::default()
    })
    .train(&mut map, &[Coordinate::new(1.0, 1.0)], &mut NoopVisualizer);
    assert!(matches!(result, Err(KohonenError::InvalidConfiguration(_))));

    assert!(SampleGenerator::new(SamplingConfig {
        neuron_count: 0,
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_chain_scenario_through_trainer() {
    let mut map = NeuronMap::chain(
        (0..4).map(|x| Coordinate::new(x as f64, 0.0)).collect(),
    )
    .unwrap();
    let trainer = SomTrainer::new(TrainingConfig::default());

    let outcome = trainer.step(&mut map, &Coordinate::new(1.5, 0.0), 1).unwrap();

    assert_eq!(outcome.winner, 1);
    let xs: Vec<f64> = map.positions().iter().map(|p| p.x).collect();
    assert!((xs[0] - 0.375).abs() < EPS);
    assert!((xs[1] - 1.25).abs() < EPS);
    assert!((xs[2] - 1.875).abs() < EPS);
    assert_eq!(xs[3], 3.0);
}

#[test]
fn test_exclusive_chain_boundary_through_trainer() {
    let mut map = NeuronMap::chain(
        (0..4).map(|x| Coordinate::new(x as f64, 0.0)).collect(),
    )
    .unwrap();
    let trainer = SomTrainer::new(TrainingConfig {
        chain_boundary: ChainBoundary::Exclusive,
        ..Default::default()
    });

    trainer.step(&mut map, &Coordinate::new(1.5, 0.0), 1).unwrap();

    assert_eq!(map.positions()[0].x, 0.0);
}

#[test]
fn test_ring_antipode_updated_once_through_trainer() {
    let mut map = NeuronMap::ring(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(10.0, 0.0),
        Coordinate::new(20.0, 0.0),
        Coordinate::new(30.0, 0.0),
    ])
    .unwrap();
    let trainer = SomTrainer::new(TrainingConfig::default());

    let outcome = trainer.step(&mut map, &Coordinate::new(-4.0, 0.0), 2).unwrap();

    assert_eq!(outcome.winner, 0);
    assert_eq!(outcome.moved, 3);
    let xs: Vec<f64> = map.positions().iter().map(|p| p.x).collect();
    assert!((xs[0] - -2.0).abs() < EPS);
    assert!((xs[1] - 6.5).abs() < EPS);
    assert!((xs[3] - 21.5).abs() < EPS);
    assert!((xs[2] - 17.0).abs() < EPS);
}

#[test]
fn test_grid_wavefront_bands() {
    let mut grid = NeuronGrid::from_flat(vec![Coordinate::default(); 25]).unwrap();
    let sample = Coordinate::new(1.0, -1.0);

    let moved = update_grid(&mut grid, &sample, GridPosition::new(2, 2), 2);
    assert_eq!(moved, 12);

    let mut by_band = [0usize; 5];
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            let d = row.abs_diff(2) + col.abs_diff(2);
            let cell = grid.get(GridPosition::new(row, col)).unwrap();
            let expected = match d {
                0 => 0.5,
                1 | 2 => decay(d),
                _ => 0.0,
            };
            assert!((cell.position.x - expected).abs() < EPS);
            assert!((cell.position.y + expected).abs() < EPS);
            if cell.position.x != 0.0 {
                by_band[d] += 1;
            }
        }
    }
    assert_eq!(by_band, [1, 4, 8, 0, 0]);
}

#[test]
fn test_grid_schedule_in_snapshots() {
    let mut gen = generator(SampleDistribution::default(), 21);
    let samples = gen.samples().unwrap();
    let mut map = NeuronMap::from_positions(Topology::Grid, gen.neurons(Topology::Grid)).unwrap();
    let mut recorder = SnapshotRecorder::new();

    let report = SomTrainer::new(TrainingConfig {
        passes: 7,
        seed: Some(22),
        snapshot_every: 50,
        ..Default::default()
    })
    .train(&mut map, &samples, &mut recorder)
    .unwrap();

    assert_eq!(report.final_radius, 0);

    let mut radius_by_pass = vec![None; 7];
    for frame in recorder.frames().iter().filter(|f| f.kind == FrameKind::Sample) {
        let seen = radius_by_pass[frame.pass].get_or_insert(frame.radius);
        // Constant within a pass.
        assert_eq!(*seen, frame.radius);
    }
    let radii: Vec<usize> = radius_by_pass.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(radii, vec![5, 4, 3, 2, 1, 0, 0]);
}

#[test]
fn test_chain_radius_shrinks_within_pass() {
    let mut gen = generator(SampleDistribution::default(), 8);
    let samples = gen.samples().unwrap();
    let mut map = NeuronMap::chain(gen.neurons(Topology::Chain)).unwrap();
    let mut recorder = SnapshotRecorder::new();

    SomTrainer::new(TrainingConfig {
        passes: 2,
        seed: Some(9),
        snapshot_every: 1,
        ..Default::default()
    })
    .train(&mut map, &samples, &mut recorder)
    .unwrap();

    // 30 neurons, 200 samples: start at 15, one step down every 14 samples.
    for frame in recorder.frames().iter().filter(|f| f.kind == FrameKind::Sample) {
        assert_eq!(frame.radius, 15 - frame.sample_index / 14);
    }
    let last_pass: Vec<_> = recorder
        .frames()
        .iter()
        .filter(|f| f.kind == FrameKind::Sample && f.pass == 1)
        .collect();
    assert_eq!(last_pass.len(), 200);
    assert_eq!(last_pass[0].radius, 15);
}

#[test]
fn test_single_neuron_maps_train() {
    let samples = [
        Coordinate::new(1.0, 0.0),
        Coordinate::new(2.0, 0.0),
        Coordinate::new(-1.0, 3.0),
    ];

    for topology in [Topology::Chain, Topology::Ring] {
        let mut map = NeuronMap::from_positions(topology, vec![Coordinate::default()]).unwrap();

        let report = SomTrainer::new(TrainingConfig {
            passes: 3,
            shuffle: false,
            ..Default::default()
        })
        .train(&mut map, &samples, &mut NoopVisualizer)
        .unwrap();

        assert_eq!(report.samples_seen, 9);
        assert_eq!(report.final_radius, 0);
        assert_eq!(map.excluded_count(), 0);
        assert_ne!(map.positions()[0], Coordinate::default());
    }
}
