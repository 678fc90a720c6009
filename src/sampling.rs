//! Sample generation and neuron initialization.
//!
//! These feed the training core but are not part of it: the trainer only
//! ever sees the finished coordinate lists. All generators take the RNG as a
//! parameter so a seeded `ChaCha8Rng` reproduces a run exactly.

use crate::config::{SampleDistribution, SamplingConfig};
use crate::error::Result;
use crate::som::{Coordinate, NeuronMap, Topology, GRID_SIDE};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Draws a point uniformly from the region `inner <= |p| <= outer`.
///
/// Rejection sampling over the bounding square.
fn sample_in_annulus<R: Rng + ?Sized>(inner: f64, outer: f64, rng: &mut R) -> Coordinate {
    let inner_sq = inner * inner;
    let outer_sq = outer * outer;
    loop {
        let x = rng.gen_range(-outer..=outer);
        let y = rng.gen_range(-outer..=outer);
        let r_sq = x * x + y * y;
        if r_sq <= outer_sq && r_sq >= inner_sq {
            return Coordinate::new(x, y);
        }
    }
}

/// `count` points uniform over the disk of `radius` around the origin.
pub fn disk_samples<R: Rng + ?Sized>(count: usize, radius: f64, rng: &mut R) -> Vec<Coordinate> {
    (0..count).map(|_| sample_in_annulus(0.0, radius, rng)).collect()
}

/// `count` points uniform over the ring between `inner` and `outer`.
pub fn annulus_samples<R: Rng + ?Sized>(
    count: usize,
    inner: f64,
    outer: f64,
    rng: &mut R,
) -> Vec<Coordinate> {
    (0..count)
        .map(|_| sample_in_annulus(inner, outer, rng))
        .collect()
}

/// `count` points from a two-density disk.
///
/// The first half lands in a disk of `radius / 2`, the rest in the full disk.
pub fn mixed_samples<R: Rng + ?Sized>(count: usize, radius: f64, rng: &mut R) -> Vec<Coordinate> {
    let dense = count / 2;
    let mut samples = disk_samples(dense, radius / 2.0, rng);
    samples.extend(disk_samples(count - dense, radius, rng));
    samples
}

/// `count` points drawn from `distribution`.
pub fn generate_samples<R: Rng + ?Sized>(
    count: usize,
    distribution: &SampleDistribution,
    rng: &mut R,
) -> Result<Vec<Coordinate>> {
    distribution.validate()?;

    let samples = match *distribution {
        SampleDistribution::Disk { radius } => disk_samples(count, radius, rng),
        SampleDistribution::Annulus { inner, outer } => annulus_samples(count, inner, outer, rng),
        SampleDistribution::Mixed { radius } => mixed_samples(count, radius, rng),
    };
    Ok(samples)
}

/// `count` neuron positions uniform in `[-half_range, half_range]` on both axes.
pub fn uniform_neurons<R: Rng + ?Sized>(
    count: usize,
    half_range: f64,
    rng: &mut R,
) -> Vec<Coordinate> {
    (0..count)
        .map(|_| {
            if half_range > 0.0 {
                Coordinate::new(
                    rng.gen_range(-half_range..=half_range),
                    rng.gen_range(-half_range..=half_range),
                )
            } else {
                Coordinate::default()
            }
        })
        .collect()
}

/// A 5x5 layout of neuron positions, row-major.
pub fn uniform_grid<R: Rng + ?Sized>(half_range: f64, rng: &mut R) -> Vec<Vec<Coordinate>> {
    (0..GRID_SIDE)
        .map(|_| uniform_neurons(GRID_SIDE, half_range, rng))
        .collect()
}

/// Shuffles a sample sequence in place.
pub fn shuffle_samples<R: Rng + ?Sized>(samples: &mut [Coordinate], rng: &mut R) {
    samples.shuffle(rng);
}

/// Seeded generator for samples and initial neuron layouts.
pub struct SampleGenerator {
    config: SamplingConfig,
    rng: ChaCha8Rng,
}

impl SampleGenerator {
    /// Creates a generator after validating the configuration.
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self { config, rng })
    }

    /// The generator's configuration.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Draws the configured number of training samples.
    pub fn samples(&mut self) -> Result<Vec<Coordinate>> {
        generate_samples(
            self.config.sample_count,
            &self.config.distribution,
            &mut self.rng,
        )
    }

    /// Initial positions for a map of the given topology.
    ///
    /// Chain and ring maps get `neuron_count` positions; grid maps get 25,
    /// row-major.
    pub fn neurons(&mut self, topology: Topology) -> Vec<Coordinate> {
        let count = match topology {
            Topology::Chain | Topology::Ring => self.config.neuron_count,
            Topology::Grid => GRID_SIDE * GRID_SIDE,
        };
        uniform_neurons(count, self.config.init_half_range, &mut self.rng)
    }

    /// A freshly initialized map of the given topology.
    pub fn map(&mut self, topology: Topology) -> Result<NeuronMap> {
        match topology {
            Topology::Grid => {
                NeuronMap::grid(uniform_grid(self.config.init_half_range, &mut self.rng))
            }
            Topology::Chain | Topology::Ring => {
                NeuronMap::from_positions(topology, self.neurons(topology))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_disk_samples_stay_inside() {
        let samples = disk_samples(500, 2.0, &mut rng());
        assert_eq!(samples.len(), 500);
        assert!(samples.iter().all(|p| p.x * p.x + p.y * p.y <= 4.0));
        // Not all piled up in one spot.
        assert!(samples.iter().any(|p| p.x > 1.0));
        assert!(samples.iter().any(|p| p.x < -1.0));
    }

    #[test]
    fn test_annulus_samples_stay_in_ring() {
        let samples = annulus_samples(500, 2.0, 4.0, &mut rng());
        for p in &samples {
            let r_sq = p.x * p.x + p.y * p.y;
            assert!((4.0..=16.0).contains(&r_sq));
        }
    }

    #[test]
    fn test_mixed_samples_split() {
        let samples = mixed_samples(201, 2.0, &mut rng());
        assert_eq!(samples.len(), 201);
        assert!(samples[..100].iter().all(|p| p.x * p.x + p.y * p.y <= 1.0));
        assert!(samples[100..].iter().all(|p| p.x * p.x + p.y * p.y <= 4.0));
    }

    #[test]
    fn test_generate_rejects_bad_distribution() {
        let bad = SampleDistribution::Annulus { inner: 3.0, outer: 1.0 };
        assert!(generate_samples(10, &bad, &mut rng()).is_err());
    }

    #[test]
    fn test_uniform_neurons_range() {
        let neurons = uniform_neurons(100, 0.2, &mut rng());
        assert!(neurons.iter().all(|p| p.x.abs() <= 0.2 && p.y.abs() <= 0.2));

        let zeros = uniform_neurons(3, 0.0, &mut rng());
        assert!(zeros.iter().all(|p| *p == Coordinate::default()));
    }

    #[test]
    fn test_uniform_grid_shape() {
        let grid = uniform_grid(0.2, &mut rng());
        assert_eq!(grid.len(), GRID_SIDE);
        assert!(grid.iter().all(|row| row.len() == GRID_SIDE));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut samples = disk_samples(50, 1.0, &mut rng());
        let original = samples.clone();
        shuffle_samples(&mut samples, &mut rng());
        assert_ne!(samples, original);
        for p in &original {
            assert!(samples.contains(p));
        }
    }

    #[test]
    fn test_generator_is_reproducible() {
        let config = SamplingConfig {
            seed: Some(7),
            ..Default::default()
        };
        let mut a = SampleGenerator::new(config.clone()).unwrap();
        let mut b = SampleGenerator::new(config).unwrap();

        assert_eq!(a.samples().unwrap(), b.samples().unwrap());
        assert_eq!(a.neurons(Topology::Ring), b.neurons(Topology::Ring));
        assert_eq!(a.neurons(Topology::Grid).len(), 25);
    }

    #[test]
    fn test_generator_builds_maps() {
        let config = SamplingConfig {
            neuron_count: 12,
            seed: Some(3),
            ..Default::default()
        };
        let mut generator = SampleGenerator::new(config.clone()).unwrap();

        let chain = generator.map(Topology::Chain).unwrap();
        assert_eq!(chain.topology(), Topology::Chain);
        assert_eq!(chain.len(), 12);

        let grid = generator.map(Topology::Grid).unwrap();
        assert_eq!(grid.topology(), Topology::Grid);
        assert_eq!(grid.len(), GRID_SIDE * GRID_SIDE);
        assert!(grid
            .positions()
            .iter()
            .all(|p| p.x.abs() <= 0.2 && p.y.abs() <= 0.2));

        // Nested and flat grid layouts draw the same stream.
        let mut a = SampleGenerator::new(config.clone()).unwrap();
        let mut b = SampleGenerator::new(config).unwrap();
        let nested = a.map(Topology::Grid).unwrap();
        let flat = NeuronMap::from_positions(Topology::Grid, b.neurons(Topology::Grid)).unwrap();
        assert_eq!(nested.positions(), flat.positions());
    }
}
