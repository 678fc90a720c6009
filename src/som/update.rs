//! Neighborhood updates.
//!
//! The winner always moves half of the way toward the sample. A neighbor at
//! topological distance `d` moves `2^-(d+1)` of the way. Chain and ring maps
//! find neighbors by index arithmetic; the grid map propagates a
//! breadth-first wave over its adjacency graph, one distance band at a time.
//!
//! Every update ends with a conscience reset: only the winner keeps its
//! `excluded` flag, so it cannot win the next sample.

use crate::config::ChainBoundary;
use crate::som::map::NeuronGrid;
use crate::som::{Coordinate, GridPosition, Neuron};
use log::trace;
use std::collections::VecDeque;

/// Pull applied to the winner itself.
pub const WINNER_PULL: f64 = 0.5;

/// Pull applied to a neighbor at topological distance `distance >= 1`.
#[inline]
pub fn decay(distance: usize) -> f64 {
    0.5f64.powi(distance as i32 + 1)
}

/// Clears the conscience flag on every neuron except `winner`.
///
/// A single-neuron collection has nobody else to win the next sample, so its
/// flag is cleared as well.
pub fn reset_conscience(neurons: &mut [Neuron], winner: usize) {
    let solitary = neurons.len() == 1;
    for (i, neuron) in neurons.iter_mut().enumerate() {
        neuron.excluded = i == winner && !solitary;
    }
}

fn absorb_winner(neuron: &mut Neuron, sample: &Coordinate) {
    neuron.pull_toward(sample, WINNER_PULL);
    neuron.excluded = true;
}

fn absorb_neighbor(neuron: &mut Neuron, sample: &Coordinate, distance: usize) {
    neuron.pull_toward(sample, decay(distance));
    neuron.excluded = true;
}

/// Updates an open chain around `winner`.
///
/// Returns the number of neighbors that moved (the winner excluded).
///
/// # Panics
///
/// Panics if `winner` is not an index into `neurons`. Use the index returned
/// by [`find_winner`](crate::som::winner::find_winner).
pub fn update_chain(
    neurons: &mut [Neuron],
    sample: &Coordinate,
    winner: usize,
    radius: usize,
    boundary: ChainBoundary,
) -> usize {
    let len = neurons.len();
    absorb_winner(&mut neurons[winner], sample);

    let mut moved = 0;
    for d in 1..=radius.min(len) {
        let right = winner + d;
        if right < len {
            absorb_neighbor(&mut neurons[right], sample, d);
            moved += 1;
        }

        let reaches_left = match boundary {
            ChainBoundary::Inclusive => winner >= d,
            ChainBoundary::Exclusive => winner > d,
        };
        if reaches_left {
            absorb_neighbor(&mut neurons[winner - d], sample, d);
            moved += 1;
        }
    }

    reset_conscience(neurons, winner);
    trace!("chain update: winner={} radius={} moved={}", winner, radius, moved);
    moved
}

/// Updates a closed ring around `winner`.
///
/// Distances wrap. Propagation stops at half the ring, where both directions
/// meet; a neuron reached from both sides at once moves a single time.
///
/// # Panics
///
/// Panics if `winner` is not an index into `neurons`, which includes an
/// empty slice.
pub fn update_ring(
    neurons: &mut [Neuron],
    sample: &Coordinate,
    winner: usize,
    radius: usize,
) -> usize {
    let len = neurons.len();
    absorb_winner(&mut neurons[winner], sample);

    let mut moved = 0;
    for d in 1..=radius.min(len / 2) {
        let right = (winner + d) % len;
        let left = (winner + len - d) % len;

        absorb_neighbor(&mut neurons[right], sample, d);
        moved += 1;
        if left != right {
            absorb_neighbor(&mut neurons[left], sample, d);
            moved += 1;
        }
    }

    reset_conscience(neurons, winner);
    trace!("ring update: winner={} radius={} moved={}", winner, radius, moved);
    moved
}

/// Updates a grid around `winner` with a banded breadth-first wave.
///
/// Two queues alternate: one drains the cells at distance `d` while the
/// other collects the candidates for `d + 1`. A cell is moved only if its
/// flag is clear, and is flagged as soon as it moves, so each cell is moved
/// at most once and at its shortest hop distance from the winner.
pub fn update_grid(
    grid: &mut NeuronGrid,
    sample: &Coordinate,
    winner: GridPosition,
    radius: usize,
) -> usize {
    let side = grid.side();
    let (cells, topology) = grid.split_mut();
    let origin = winner.to_linear(side);

    // The previous winner's flag has served its purpose in the winner search;
    // the wave starts with only the current winner marked.
    reset_conscience(cells, origin);
    absorb_winner(&mut cells[origin], sample);

    let mut current: VecDeque<usize> = topology.neighbors(origin).iter().copied().collect();
    let mut next: VecDeque<usize> = VecDeque::new();
    let mut moved = 0;

    for d in 1..=radius {
        if current.is_empty() {
            break;
        }

        while let Some(cell) = current.pop_front() {
            if cells[cell].excluded {
                continue;
            }
            absorb_neighbor(&mut cells[cell], sample, d);
            moved += 1;

            next.extend(
                topology
                    .neighbors(cell)
                    .iter()
                    .copied()
                    .filter(|&n| !cells[n].excluded),
            );
        }

        std::mem::swap(&mut current, &mut next);
    }

    reset_conscience(cells, origin);
    trace!(
        "grid update: winner=({}, {}) radius={} moved={}",
        winner.row,
        winner.col,
        radius,
        moved
    );
    moved
}
