//! Winner search under the conscience rule.
//!
//! The winner is the neuron nearest to the sample (Euclidean) among those
//! whose `excluded` flag is clear. Ties go to the first neuron in iteration
//! order, which is row-major for the grid.

use crate::error::{KohonenError, Result};
use crate::som::map::NeuronGrid;
use crate::som::{Coordinate, GridPosition, Neuron};

/// Finds the index of the nearest eligible neuron.
///
/// Returns `ExhaustedCandidates` if every neuron is excluded (or the slice
/// is empty).
pub fn find_winner(sample: &Coordinate, neurons: &[Neuron]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, neuron) in neurons.iter().enumerate() {
        if neuron.excluded {
            continue;
        }
        let distance = neuron.distance(sample);
        if best.map_or(true, |(_, min)| distance < min) {
            best = Some((i, distance));
        }
    }

    best.map(|(i, _)| i).ok_or(KohonenError::ExhaustedCandidates)
}

/// Finds the position of the nearest eligible grid cell.
pub fn find_grid_winner(sample: &Coordinate, grid: &NeuronGrid) -> Result<GridPosition> {
    let index = find_winner(sample, grid.cells())?;
    Ok(GridPosition::from_linear(index, grid.side()))
}
