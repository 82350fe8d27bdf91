//! A single logical constraint: exactly `count` of `cells` are mines.
//!
//! Sentences compare by value (cell set and count), which is what the
//! knowledge base relies on to suppress duplicates. Cells live in a
//! `BTreeSet` so iteration order, and therefore every pass over a sentence,
//! is deterministic.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Build a sentence, rejecting `count > |cells|`.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Result<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(Error::InvalidSentence {
                count,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// All cells, when every one of them must be a mine.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.count == self.cells.len()).then_some(&self.cells)
    }

    /// All cells, when none of them can be a mine.
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.count == 0).then_some(&self.cells)
    }

    /// Remove a cell known to be a mine, decrementing the count.
    /// Returns whether the sentence changed.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(Error::Contradiction { cell });
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Remove a cell known to be safe. The count is unchanged.
    /// Returns whether the sentence changed.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        // Every remaining cell is a mine; one of them cannot be safe.
        if self.count == self.cells.len() {
            return Err(Error::Contradiction { cell });
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    /// Strip every cell that is already a known fact.
    pub(crate) fn prune(&mut self, safes: &HashSet<Cell>, mines: &HashSet<Cell>) -> Result<bool> {
        let known: Vec<Cell> = self
            .cells
            .iter()
            .filter(|&&c| safes.contains(&c) || mines.contains(&c))
            .copied()
            .collect();

        let mut changed = false;
        for cell in known {
            changed |= if mines.contains(&cell) {
                self.mark_mine(cell)?
            } else {
                self.mark_safe(cell)?
            };
        }
        Ok(changed)
    }

    /// Subset rule: if `subset.cells ⊆ self.cells`, the remaining cells hold
    /// exactly `self.count - subset.count` mines.
    ///
    /// Returns `None` when `subset` is not a subset, when nothing is left
    /// over, or when the derived count does not fit the difference.
    pub fn subtract(&self, subset: &Sentence) -> Option<Sentence> {
        if !subset.cells.is_subset(&self.cells) {
            return None;
        }
        let cells: BTreeSet<Cell> = self.cells.difference(&subset.cells).copied().collect();
        if cells.is_empty() {
            return None;
        }
        let count = self.count.checked_sub(subset.count)?;
        if count > cells.len() {
            return None;
        }
        Some(Sentence { cells, count })
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
