//! The board oracle: ground truth the knowledge base never sees directly.
//!
//! The engine only needs [`BoardOracle`]. [`Board`] is the concrete
//! implementation used by the autoplay driver, the tests and the wasm
//! surface: random mine placement plus precomputed neighbor counts.

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::rng::GameRng;
use crate::types::{Cell, Dimensions, NeighborCache};

/// What the engine is allowed to ask about the real board.
pub trait BoardOracle {
    fn dimensions(&self) -> Dimensions;

    fn is_mine(&self, cell: Cell) -> bool;

    /// Number of mines among the cell's neighbors, in `0..=8`.
    fn count_adjacent_mines(&self, cell: Cell) -> usize;
}

pub struct Board {
    dimensions: Dimensions,
    /// Row-major mine flags.
    mines: Vec<bool>,
    /// Row-major neighbor counts. Mine cells hold their count too.
    counts: Vec<u8>,
    mine_count: usize,
}

impl Board {
    /// Build a board with mines at exactly the given cells.
    pub fn from_mines(dimensions: Dimensions, mines: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let mut flags = vec![false; dimensions.cell_count()];
        for cell in mines {
            if !dimensions.contains(cell) {
                return Err(Error::OutOfBounds { cell, dimensions });
            }
            flags[dimensions.index(cell)] = true;
        }
        Ok(Self::from_flags(dimensions, flags))
    }

    /// Place `config.mines` mines uniformly at random.
    pub fn random(config: &GameConfig, rng: &mut GameRng) -> Result<Self> {
        let dimensions = config.validate()?;
        let flags = place_mines_random(dimensions, config.mines, rng);
        Ok(Self::from_flags(dimensions, flags))
    }

    fn from_flags(dimensions: Dimensions, mines: Vec<bool>) -> Self {
        let nc = NeighborCache::new(dimensions);
        let counts = calculate_numbers(dimensions, &mines, &nc);
        let mine_count = mines.iter().filter(|&&m| m).count();
        Self {
            dimensions,
            mines,
            counts,
            mine_count,
        }
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn safe_count(&self) -> usize {
        self.dimensions.cell_count() - self.mine_count
    }

    pub fn mine_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.dimensions.cells().filter(|&cell| self.is_mine(cell))
    }
}

impl BoardOracle for Board {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn is_mine(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell) && self.mines[self.dimensions.index(cell)]
    }

    fn count_adjacent_mines(&self, cell: Cell) -> usize {
        if !self.dimensions.contains(cell) {
            return 0;
        }
        self.counts[self.dimensions.index(cell)] as usize
    }
}

/// Pick `mine_count` distinct cells. `mine_count` must not exceed the board.
fn place_mines_random(dimensions: Dimensions, mine_count: usize, rng: &mut GameRng) -> Vec<bool> {
    let total = dimensions.cell_count();
    let mut mines = vec![false; total];
    for idx in rng.sample_indices(total, mine_count) {
        mines[idx] = true;
    }
    mines
}

/// Neighbor mine counts for every cell.
fn calculate_numbers(dimensions: Dimensions, mines: &[bool], nc: &NeighborCache) -> Vec<u8> {
    dimensions
        .cells()
        .map(|cell| {
            nc.get(cell)
                .iter()
                .filter(|&&n| mines[dimensions.index(n)])
                .count() as u8
        })
        .collect()
}
