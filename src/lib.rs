//! # Kohonen - Self-Organizing Maps in the plane
//!
//! Kohonen self-organizing maps over 2D samples with three neighborhood
//! topologies: an open chain, a closed ring, and a 5x5 grid.
//!
//! ## Overview
//!
//! Every sample picks a winner, the nearest neuron that did not win the
//! previous sample (the *conscience* rule). The winner moves half of the way
//! toward the sample; its topological neighbors follow with a pull that
//! halves at every step of distance, `2^-(d+1)`. The neighborhood radius
//! shrinks as training goes on.
//!
//! - Chain and ring maps find neighbors by index arithmetic.
//! - Grid maps spread the update as a breadth-first wave over the 5x5
//!   adjacency graph, one distance band at a time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonen::{NeuronMap, NoopVisualizer, SampleGenerator, SamplingConfig, SomTrainer,
//!               Topology, TrainingConfig};
//!
//! let mut generator = SampleGenerator::new(SamplingConfig { seed: Some(42), ..Default::default() })?;
//! let samples = generator.samples()?;
//! let mut map = NeuronMap::from_positions(Topology::Ring, generator.neurons(Topology::Ring))?;
//!
//! let mut trainer = SomTrainer::new(TrainingConfig::default());
//! let report = trainer.train(&mut map, &samples, &mut NoopVisualizer)?;
//! println!("{} samples absorbed", report.samples_seen);
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - The training core: topology, winner search, updates, training loop
//! - [`sampling`] - Sample distributions and initial neuron layouts
//! - [`visualize`] - Read-only snapshot hand-off during training
//! - [`config`] - Training and sampling configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod sampling;
pub mod som;
pub mod visualize;

// Re-export commonly used types
pub use config::{ChainBoundary, Config, SampleDistribution, SamplingConfig, TrainingConfig};
pub use error::{KohonenError, Result};
pub use sampling::SampleGenerator;
pub use som::{
    Coordinate, GridPosition, GridTopology, Neuron, NeuronChain, NeuronGrid, NeuronMap,
    RadiusSchedule, SomTrainer, StepOutcome, Topology, TrainingReport, GRID_SIDE,
};
pub use visualize::{Frame, FrameKind, NoopVisualizer, Snapshot, SnapshotRecorder, Visualizer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of passes over the samples.
pub const DEFAULT_PASSES: usize = 10;
