//! Self-Organizing Map (SOM) training core.
//!
//! - **Topology**: chain and ring index rules, 5x5 grid adjacency (topology.rs)
//! - **Winner search** under the conscience rule (winner.rs)
//! - **Neighborhood updates** with `2^-(d+1)` decay (update.rs)
//! - **Training loop** with shrinking radius schedules (training.rs)

mod map;
mod neuron;
pub mod topology;
pub mod training;
pub mod update;
pub mod winner;

pub use map::{NeuronChain, NeuronGrid, NeuronMap};
pub use neuron::{Coordinate, GridPosition, Neuron};
pub use topology::{GridTopology, Topology, GRID_SIDE};
pub use training::{RadiusSchedule, SomTrainer, StepOutcome, TrainingReport};
pub use update::{decay, reset_conscience, update_chain, update_grid, update_ring};
pub use winner::{find_grid_winner, find_winner};
