//! Coordinates and neurons of the map.

use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// Used both for training samples and for neuron positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Coordinate) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// A neuron: a movable position plus the conscience flag.
///
/// `excluded` is set on the winner of a sample (and, transiently, on grid
/// cells touched by the propagation wave). An excluded neuron cannot win the
/// next winner search.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Neuron {
    /// Current position.
    pub position: Coordinate,
    /// Conscience flag.
    pub excluded: bool,
}

impl Neuron {
    /// Creates an eligible neuron at the given position.
    #[inline]
    pub const fn new(position: Coordinate) -> Self {
        Self {
            position,
            excluded: false,
        }
    }

    /// Moves the neuron a `fraction` of the way toward `sample`.
    #[inline]
    pub fn pull_toward(&mut self, sample: &Coordinate, fraction: f64) {
        self.position.x += (sample.x - self.position.x) * fraction;
        self.position.y += (sample.y - self.position.y) * fraction;
    }

    /// Euclidean distance from this neuron to a sample.
    #[inline]
    pub fn distance(&self, sample: &Coordinate) -> f64 {
        self.position.distance(sample)
    }
}

/// A cell position in a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Row coordinate (0 to side-1).
    pub row: usize,
    /// Column coordinate (0 to side-1).
    pub col: usize,
}

impl GridPosition {
    /// Create a new grid position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert from row-major index to 2D position.
    #[inline]
    pub fn from_linear(index: usize, side: usize) -> Self {
        Self {
            row: index / side,
            col: index % side,
        }
    }

    /// Convert to row-major index.
    #[inline]
    pub fn to_linear(&self, side: usize) -> usize {
        self.row * side + self.col
    }
}
