//! Neighborhood topologies.
//!
//! Chain and ring maps relate neurons purely by index arithmetic. The grid
//! map needs an explicit adjacency graph: every cell points at its in-bounds
//! orthogonal neighbors, and those point back. The graph is stored as an
//! arena of index lists so no cell owns another.

use crate::som::GridPosition;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Side length of the grid topology.
pub const GRID_SIDE: usize = 5;

/// The neighbor-adjacency structure over a neuron collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Open line, no wraparound.
    Chain,
    /// Closed loop.
    Ring,
    /// 5x5 mesh with orthogonal adjacency.
    Grid,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Chain => "chain",
            Topology::Ring => "ring",
            Topology::Grid => "grid",
        };
        f.write_str(name)
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chain" | "line" => Ok(Topology::Chain),
            "ring" | "circle" => Ok(Topology::Ring),
            "grid" | "board" => Ok(Topology::Grid),
            other => Err(format!("unknown topology: {}", other)),
        }
    }
}

/// Orthogonal adjacency of a square grid.
///
/// Cells are addressed by row-major index. Each cell lists its neighbors in
/// the order left, up, right, down, skipping the ones that fall off the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    side: usize,
    adjacency: Vec<Vec<usize>>,
}

impl GridTopology {
    /// Builds the adjacency of a `side` x `side` grid.
    pub fn new(side: usize) -> Self {
        let mut adjacency = Vec::with_capacity(side * side);

        for row in 0..side {
            for col in 0..side {
                let mut neighbors = Vec::with_capacity(4);
                if col > 0 {
                    neighbors.push(row * side + col - 1);
                }
                if row > 0 {
                    neighbors.push((row - 1) * side + col);
                }
                if col + 1 < side {
                    neighbors.push(row * side + col + 1);
                }
                if row + 1 < side {
                    neighbors.push((row + 1) * side + col);
                }
                adjacency.push(neighbors);
            }
        }

        Self { side, adjacency }
    }

    /// The 5x5 topology used by grid maps.
    pub fn standard() -> Self {
        Self::new(GRID_SIDE)
    }

    /// Grid side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// True for a 0x0 grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Row-major indices adjacent to `index`.
    #[inline]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Positions adjacent to `pos`.
    pub fn neighbors_of(&self, pos: GridPosition) -> impl Iterator<Item = GridPosition> + '_ {
        let side = self.side;
        self.adjacency[pos.to_linear(side)]
            .iter()
            .map(move |&i| GridPosition::from_linear(i, side))
    }

    /// Shortest-path hop count from `from` to every cell.
    pub fn hop_distances(&self, from: usize) -> Vec<usize> {
        let mut dist = vec![usize::MAX; self.len()];
        let mut queue = VecDeque::new();
        dist[from] = 0;
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            for &next in &self.adjacency[cell] {
                if dist[next] == usize::MAX {
                    dist[next] = dist[cell] + 1;
                    queue.push_back(next);
                }
            }
        }

        dist
    }
}

impl Default for GridTopology {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_counts() {
        let grid = GridTopology::standard();
        assert_eq!(grid.len(), 25);

        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let on_row_edge = row == 0 || row == GRID_SIDE - 1;
                let on_col_edge = col == 0 || col == GRID_SIDE - 1;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 2,
                    (true, false) | (false, true) => 3,
                    (false, false) => 4,
                };
                let count = grid.neighbors(row * GRID_SIDE + col).len();
                assert_eq!(count, expected, "cell ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_adjacency_is_symmetric_and_orthogonal() {
        let grid = GridTopology::standard();
        for cell in 0..grid.len() {
            let a = GridPosition::from_linear(cell, GRID_SIDE);
            for &other in grid.neighbors(cell) {
                assert!(grid.neighbors(other).contains(&cell));
                let b = GridPosition::from_linear(other, GRID_SIDE);
                let manhattan = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
                assert_eq!(manhattan, 1);
            }
        }
    }

    #[test]
    fn test_neighbor_order() {
        let grid = GridTopology::standard();
        let center: Vec<_> = grid.neighbors_of(GridPosition::new(2, 2)).collect();
        assert_eq!(
            center,
            vec![
                GridPosition::new(2, 1),
                GridPosition::new(1, 2),
                GridPosition::new(2, 3),
                GridPosition::new(3, 2),
            ]
        );

        let corner: Vec<_> = grid.neighbors_of(GridPosition::new(4, 4)).collect();
        assert_eq!(corner, vec![GridPosition::new(4, 3), GridPosition::new(3, 4)]);
    }

    #[test]
    fn test_hop_distances_are_manhattan() {
        let grid = GridTopology::standard();
        let dist = grid.hop_distances(12);
        for cell in 0..grid.len() {
            let pos = GridPosition::from_linear(cell, GRID_SIDE);
            assert_eq!(dist[cell], pos.row.abs_diff(2) + pos.col.abs_diff(2));
        }
    }

    #[test]
    fn test_topology_parse() {
        assert_eq!("Chain".parse::<Topology>().unwrap(), Topology::Chain);
        assert_eq!("circle".parse::<Topology>().unwrap(), Topology::Ring);
        assert_eq!("grid".parse::<Topology>().unwrap(), Topology::Grid);
        assert!("torus".parse::<Topology>().is_err());
        assert_eq!(Topology::Ring.to_string(), "ring");
    }
}
