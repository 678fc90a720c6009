//! Neuron collections for the three topologies.
//!
//! Chain and ring maps share a flat, index-ordered collection. The grid map
//! keeps its cells in a row-major arena next to a read-only adjacency graph.

use crate::error::{KohonenError, Result};
use crate::som::topology::{GridTopology, Topology, GRID_SIDE};
use crate::som::{Coordinate, GridPosition, Neuron};
use serde::Serialize;

/// A flat, index-ordered neuron collection (chain or ring).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronChain {
    neurons: Vec<Neuron>,
}

impl NeuronChain {
    /// Creates a collection from initial positions.
    ///
    /// Fails with `InvalidConfiguration` if `positions` is empty.
    pub fn new(positions: Vec<Coordinate>) -> Result<Self> {
        if positions.is_empty() {
            return Err(KohonenError::InvalidConfiguration(
                "neuron set must not be empty".to_string(),
            ));
        }

        Ok(Self {
            neurons: positions.into_iter().map(Neuron::new).collect(),
        })
    }

    /// Number of neurons.
    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Always false; construction rejects empty collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// The neurons in index order.
    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Mutable access to the neurons in index order.
    #[inline]
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Gets a neuron by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Current neuron positions in index order.
    pub fn positions(&self) -> Vec<Coordinate> {
        self.neurons.iter().map(|n| n.position).collect()
    }

    /// The line a renderer would draw through the neurons.
    ///
    /// A closed polyline repeats the first position at the end.
    pub fn polyline(&self, closed: bool) -> Vec<Coordinate> {
        let mut line = self.positions();
        if closed {
            if let Some(&first) = line.first() {
                line.push(first);
            }
        }
        line
    }
}

/// A 5x5 grid of neurons with orthogonal adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronGrid {
    cells: Vec<Neuron>,
    topology: GridTopology,
}

impl NeuronGrid {
    /// Creates a grid from a row-major nested layout.
    ///
    /// Fails with `InvalidConfiguration` unless the layout is exactly 5x5.
    pub fn new(rows: Vec<Vec<Coordinate>>) -> Result<Self> {
        if rows.len() != GRID_SIDE {
            return Err(KohonenError::InvalidConfiguration(format!(
                "grid must have {} rows, got {}",
                GRID_SIDE,
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != GRID_SIDE {
                return Err(KohonenError::InvalidConfiguration(format!(
                    "grid row {} must have {} columns, got {}",
                    r,
                    GRID_SIDE,
                    row.len()
                )));
            }
            cells.extend(row.into_iter().map(Neuron::new));
        }

        Ok(Self {
            cells,
            topology: GridTopology::standard(),
        })
    }

    /// Creates a grid from 25 row-major positions.
    pub fn from_flat(positions: Vec<Coordinate>) -> Result<Self> {
        if positions.len() != GRID_SIDE * GRID_SIDE {
            return Err(KohonenError::InvalidConfiguration(format!(
                "grid needs {} positions, got {}",
                GRID_SIDE * GRID_SIDE,
                positions.len()
            )));
        }

        Ok(Self {
            cells: positions.into_iter().map(Neuron::new).collect(),
            topology: GridTopology::standard(),
        })
    }

    /// Grid side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.topology.side()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; construction requires a full grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The adjacency graph.
    #[inline]
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Neuron] {
        &self.cells
    }

    /// Mutable cells in row-major order.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Neuron] {
        &mut self.cells
    }

    /// Mutable cells together with the adjacency they are wired by.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [Neuron], &GridTopology) {
        (&mut self.cells, &self.topology)
    }

    /// Gets a cell by its 2D position.
    #[inline]
    pub fn get(&self, pos: GridPosition) -> Option<&Neuron> {
        if pos.row < self.side() && pos.col < self.side() {
            Some(&self.cells[pos.to_linear(self.side())])
        } else {
            None
        }
    }

    /// Current cell positions in row-major order.
    pub fn positions(&self) -> Vec<Coordinate> {
        self.cells.iter().map(|n| n.position).collect()
    }

    /// One polyline per grid row.
    pub fn row_lines(&self) -> Vec<Vec<Coordinate>> {
        self.cells
            .chunks(self.side())
            .map(|row| row.iter().map(|n| n.position).collect())
            .collect()
    }

    /// One polyline per grid column.
    pub fn column_lines(&self) -> Vec<Vec<Coordinate>> {
        let side = self.side();
        (0..side)
            .map(|col| {
                (0..side)
                    .map(|row| self.cells[row * side + col].position)
                    .collect()
            })
            .collect()
    }
}

/// A neuron collection tagged with its topology.
#[derive(Debug, Clone, PartialEq)]
pub enum NeuronMap {
    /// Open line.
    Chain(NeuronChain),
    /// Closed loop.
    Ring(NeuronChain),
    /// 5x5 mesh.
    Grid(NeuronGrid),
}

impl NeuronMap {
    /// Builds a chain map.
    pub fn chain(positions: Vec<Coordinate>) -> Result<Self> {
        NeuronChain::new(positions).map(NeuronMap::Chain)
    }

    /// Builds a ring map.
    pub fn ring(positions: Vec<Coordinate>) -> Result<Self> {
        NeuronChain::new(positions).map(NeuronMap::Ring)
    }

    /// Builds a grid map from a nested 5x5 layout.
    pub fn grid(rows: Vec<Vec<Coordinate>>) -> Result<Self> {
        NeuronGrid::new(rows).map(NeuronMap::Grid)
    }

    /// Builds a map of the requested topology from flat positions.
    ///
    /// Grid maps read the positions in row-major order.
    pub fn from_positions(topology: Topology, positions: Vec<Coordinate>) -> Result<Self> {
        match topology {
            Topology::Chain => Self::chain(positions),
            Topology::Ring => Self::ring(positions),
            Topology::Grid => NeuronGrid::from_flat(positions).map(NeuronMap::Grid),
        }
    }

    /// The map's topology.
    pub fn topology(&self) -> Topology {
        match self {
            NeuronMap::Chain(_) => Topology::Chain,
            NeuronMap::Ring(_) => Topology::Ring,
            NeuronMap::Grid(_) => Topology::Grid,
        }
    }

    /// All neurons, flat (row-major for the grid).
    pub fn neurons(&self) -> &[Neuron] {
        match self {
            NeuronMap::Chain(chain) | NeuronMap::Ring(chain) => chain.neurons(),
            NeuronMap::Grid(grid) => grid.cells(),
        }
    }

    /// Number of neurons.
    #[inline]
    pub fn len(&self) -> usize {
        self.neurons().len()
    }

    /// True if the map has no neurons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons().is_empty()
    }

    /// Current positions, flat (row-major for the grid).
    pub fn positions(&self) -> Vec<Coordinate> {
        self.neurons().iter().map(|n| n.position).collect()
    }

    /// Number of neurons currently carrying the conscience flag.
    pub fn excluded_count(&self) -> usize {
        self.neurons().iter().filter(|n| n.excluded).count()
    }

    /// The polylines a renderer would draw for this map.
    pub fn polylines(&self) -> Vec<Vec<Coordinate>> {
        match self {
            NeuronMap::Chain(chain) => vec![chain.polyline(false)],
            NeuronMap::Ring(ring) => vec![ring.polyline(true)],
            NeuronMap::Grid(grid) => {
                let mut lines = grid.row_lines();
                lines.extend(grid.column_lines());
                lines
            }
        }
    }
}
