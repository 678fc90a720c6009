//! Training loop.
//!
//! A run is a fixed number of passes over the sample sequence. Each sample
//! goes through winner search and a neighborhood update, in order, so a pass
//! always starts from the state the previous pass left behind.

use crate::config::TrainingConfig;
use crate::error::Result;
use crate::sampling::shuffle_samples;
use crate::som::topology::Topology;
use crate::som::update::{update_chain, update_grid, update_ring};
use crate::som::winner::{find_grid_winner, find_winner};
use crate::som::{Coordinate, NeuronMap};
use crate::visualize::{Snapshot, Visualizer};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// How the neighborhood radius shrinks over a run.
///
/// Chain and ring maps restart every pass at half the neuron count and lose
/// one step of radius per segment of samples. Grid maps start one above the
/// grid side and lose one step per pass, holding it constant within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusSchedule {
    /// Shrinks within a pass, every `segment_size` samples.
    Segmented {
        /// Radius for the first segment of a pass.
        initial: usize,
        /// Samples per segment.
        segment_size: usize,
    },
    /// Shrinks once at the start of every pass.
    PerPass {
        /// Radius before the first pass.
        initial: usize,
    },
}

impl RadiusSchedule {
    /// The schedule for `map` trained on `sample_count` samples.
    pub fn for_map(map: &NeuronMap, sample_count: usize) -> Self {
        match map {
            NeuronMap::Grid(grid) => RadiusSchedule::PerPass {
                initial: grid.side() + 1,
            },
            NeuronMap::Chain(_) | NeuronMap::Ring(_) => {
                let neurons = map.len().max(1);
                RadiusSchedule::Segmented {
                    initial: neurons / 2,
                    segment_size: sample_count * 2 / neurons + 1,
                }
            }
        }
    }

    /// Radius for the `sample_index`-th sample of pass `pass` (both zero-based).
    ///
    /// Never negative: the radius bottoms out at 0.
    #[inline]
    pub fn radius_at(&self, pass: usize, sample_index: usize) -> usize {
        match *self {
            RadiusSchedule::Segmented {
                initial,
                segment_size,
            } => initial.saturating_sub(sample_index / segment_size),
            RadiusSchedule::PerPass { initial } => initial.saturating_sub(pass + 1),
        }
    }
}

/// Result of absorbing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Flat index of the winner (row-major for the grid).
    pub winner: usize,
    /// Neighbors moved besides the winner.
    pub moved: usize,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingReport {
    /// Topology of the trained map.
    pub topology: Topology,
    /// Passes completed.
    pub passes: usize,
    /// Samples absorbed across all passes.
    pub samples_seen: usize,
    /// Radius in effect for the last absorbed sample.
    pub final_radius: usize,
}

/// SOM trainer driving passes over a sample sequence.
pub struct SomTrainer {
    config: TrainingConfig,
    rng: ChaCha8Rng,
}

impl SomTrainer {
    /// Creates a new trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self { config, rng }
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Absorbs one sample: winner search, neighborhood update, conscience reset.
    pub fn step(
        &self,
        map: &mut NeuronMap,
        sample: &Coordinate,
        radius: usize,
    ) -> Result<StepOutcome> {
        match map {
            NeuronMap::Chain(chain) => {
                let winner = find_winner(sample, chain.neurons())?;
                let moved = update_chain(
                    chain.neurons_mut(),
                    sample,
                    winner,
                    radius,
                    self.config.chain_boundary,
                );
                Ok(StepOutcome { winner, moved })
            }
            NeuronMap::Ring(ring) => {
                let winner = find_winner(sample, ring.neurons())?;
                let moved = update_ring(ring.neurons_mut(), sample, winner, radius);
                Ok(StepOutcome { winner, moved })
            }
            NeuronMap::Grid(grid) => {
                let winner = find_grid_winner(sample, grid)?;
                let moved = update_grid(grid, sample, winner, radius);
                Ok(StepOutcome {
                    winner: winner.to_linear(grid.side()),
                    moved,
                })
            }
        }
    }

    /// Trains `map` in place on `samples`.
    ///
    /// An empty sample sequence does no work and leaves the map untouched.
    /// On error the map is left mid-run and should be discarded.
    pub fn train<V: Visualizer + ?Sized>(
        &mut self,
        map: &mut NeuronMap,
        samples: &[Coordinate],
        visualizer: &mut V,
    ) -> Result<TrainingReport> {
        self.config.validate()?;

        let topology = map.topology();
        let schedule = RadiusSchedule::for_map(map, samples.len());

        if samples.is_empty() {
            info!("No training samples; {} map left unchanged", topology);
            return Ok(TrainingReport {
                topology,
                passes: 0,
                samples_seen: 0,
                final_radius: schedule.radius_at(0, 0),
            });
        }

        info!(
            "Training {} map: {} neurons, {} samples, {} passes",
            topology,
            map.len(),
            samples.len(),
            self.config.passes
        );

        let mut order = samples.to_vec();
        let every = self.config.snapshot_every;
        let mut radius = schedule.radius_at(0, 0);
        let mut samples_seen = 0;
        let mut last_index = 0;

        visualizer.on_start(&Snapshot {
            pass: 0,
            sample_index: 0,
            radius,
            map: &*map,
            samples: &order,
        });

        for pass in 0..self.config.passes {
            if self.config.shuffle {
                shuffle_samples(&mut order, &mut self.rng);
            }

            for (i, sample) in order.iter().enumerate() {
                let current = schedule.radius_at(pass, i);
                if current != radius || i == 0 {
                    debug!("Pass {} sample {}: radius {}", pass + 1, i, current);
                }
                radius = current;

                self.step(map, sample, radius)?;
                samples_seen += 1;
                last_index = i;

                if every > 0 && i % every == 0 {
                    visualizer.on_sample(&Snapshot {
                        pass,
                        sample_index: i,
                        radius,
                        map: &*map,
                        samples: &order,
                    });
                }
            }

            info!(
                "Pass {}/{} complete (radius {})",
                pass + 1,
                self.config.passes,
                radius
            );
        }

        visualizer.on_finish(&Snapshot {
            pass: self.config.passes - 1,
            sample_index: last_index,
            radius,
            map: &*map,
            samples: &order,
        });

        info!("SOM training completed: {} samples absorbed", samples_seen);
        Ok(TrainingReport {
            topology,
            passes: self.config.passes,
            samples_seen,
            final_radius: radius,
        })
    }
}
