//! Core value types shared by the knowledge base, the board oracle and the
//! wasm surface.
//!
//! Cells are plain `(row, col)` values compared structurally. The packed
//! `u32` key `(row << 16) | col` is only used when crossing into JS.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Bit-pack into a single u32 key, matching JS `(row << 16) | col`.
    ///
    /// Lossless only for coordinates below [`Dimensions::MAX_SIDE`];
    /// `GameConfig::validate` rejects larger boards.
    #[inline(always)]
    pub fn key(self) -> u32 {
        debug_assert!(self.row < Dimensions::MAX_SIDE && self.col < Dimensions::MAX_SIDE);
        ((self.row as u32) << 16) | (self.col as u32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board height and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    /// Largest side whose coordinates still fit 16 bits of the packed key.
    pub const MAX_SIDE: usize = 1 << 16;

    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Row-major index of an in-bounds cell.
    #[inline(always)]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    /// Every cell of the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Pre-computed neighbor cache for all cells.
///
/// Stores the 8-directional neighbors (clipped to grid bounds) for every cell,
/// indexed by the row-major cell index.
pub struct NeighborCache {
    dimensions: Dimensions,
    /// Flat storage of all neighbor cells.
    data: Vec<Cell>,
    /// offsets[i] = start index in `data` for cell i.
    /// offsets[i+1] - offsets[i] = number of neighbors for cell i.
    offsets: Vec<usize>,
}

impl NeighborCache {
    pub fn new(dimensions: Dimensions) -> Self {
        let total = dimensions.cell_count();
        let mut data = Vec::with_capacity(total * 8);
        let mut offsets = Vec::with_capacity(total + 1);

        for cell in dimensions.cells() {
            offsets.push(data.len());
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = cell.row as i64 + dr;
                    let nc = cell.col as i64 + dc;
                    if nr >= 0 && nc >= 0 {
                        let neighbor = Cell::new(nr as usize, nc as usize);
                        if dimensions.contains(neighbor) {
                            data.push(neighbor);
                        }
                    }
                }
            }
        }
        offsets.push(data.len()); // sentinel

        Self {
            dimensions,
            data,
            offsets,
        }
    }

    #[inline(always)]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Neighbors of an in-bounds cell.
    #[inline(always)]
    pub fn get(&self, cell: Cell) -> &[Cell] {
        let idx = self.dimensions.index(cell);
        &self.data[self.offsets[idx]..self.offsets[idx + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_packing() {
        assert_eq!(Cell::new(0, 0).key(), 0);
        assert_eq!(Cell::new(2, 3).key(), (2 << 16) | 3);
        let last = Dimensions::MAX_SIDE - 1;
        assert_eq!(Cell::new(last, last).key(), u32::MAX);
        assert_ne!(Cell::new(1, 0).key(), Cell::new(0, last).key());
    }

    #[test]
    fn test_cells_are_value_compared() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Cell::new(2, 3));
        assert!(set.contains(&Cell::new(2, 3)));
        assert!(!set.insert(Cell::new(2, 3)));
    }

    #[test]
    fn test_dimensions_index_is_row_major() {
        let dims = Dimensions::new(4, 7);
        for (i, cell) in dims.cells().enumerate() {
            assert_eq!(dims.index(cell), i);
        }
        assert_eq!(dims.cells().count(), 28);
        assert!(!dims.contains(Cell::new(4, 0)));
        assert!(!dims.contains(Cell::new(0, 7)));
    }

    #[test]
    fn test_neighbor_cache_corners() {
        let nc = NeighborCache::new(Dimensions::new(5, 5));
        assert_eq!(nc.get(Cell::new(0, 0)).len(), 3);
        assert_eq!(nc.get(Cell::new(0, 2)).len(), 5);
        assert_eq!(nc.get(Cell::new(2, 2)).len(), 8);
        assert_eq!(nc.get(Cell::new(4, 4)).len(), 3);
    }

    #[test]
    fn test_neighbor_cache_chebyshev_distance_one() {
        let nc = NeighborCache::new(Dimensions::new(6, 9));
        let center = Cell::new(3, 4);
        for &n in nc.get(center) {
            let dr = n.row as i64 - 3;
            let dc = n.col as i64 - 4;
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            assert_ne!(n, center);
        }
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let nc = NeighborCache::new(Dimensions::new(1, 1));
        assert!(nc.get(Cell::new(0, 0)).is_empty());
    }
}
