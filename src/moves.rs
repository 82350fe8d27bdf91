//! Move selection on top of the knowledge base.
//!
//! A proven-safe cell is always preferred. Otherwise the fallback is a
//! uniform pick among cells that are neither observed nor known mines.

use serde::Serialize;

use crate::knowledge::KnowledgeBase;
use crate::rng::GameRng;
use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    /// Proven safe by the knowledge base.
    Safe(Cell),
    /// A guess among the unexplored cells.
    Random(Cell),
}

impl Move {
    pub fn cell(self) -> Cell {
        match self {
            Move::Safe(cell) | Move::Random(cell) => cell,
        }
    }

    pub fn is_guess(self) -> bool {
        matches!(self, Move::Random(_))
    }
}

impl KnowledgeBase {
    /// A known-safe cell that has not been observed yet.
    ///
    /// Any candidate is valid; the smallest one is returned so replays are
    /// deterministic.
    pub fn best_safe_move(&self) -> Option<Cell> {
        self.safes()
            .iter()
            .filter(|&&cell| !self.moves_made().contains(&cell))
            .min()
            .copied()
    }

    /// Cells that are neither observed nor known mines, in row-major order.
    pub fn unexplored_cells(&self) -> Vec<Cell> {
        self.dimensions()
            .cells()
            .filter(|cell| !self.moves_made().contains(cell) && !self.mines().contains(cell))
            .collect()
    }

    /// Uniform pick among [`unexplored_cells`](Self::unexplored_cells).
    pub fn fallback_move(&self, rng: &mut GameRng) -> Option<Cell> {
        rng.choose(&self.unexplored_cells())
    }

    pub fn next_move(&self, rng: &mut GameRng) -> Option<Move> {
        self.best_safe_move()
            .map(Move::Safe)
            .or_else(|| self.fallback_move(rng).map(Move::Random))
    }

    /// Every cell is either observed or a known mine.
    ///
    /// When this holds there is nothing left to flag: the remaining hidden
    /// cells are exactly the known mines, so no unproven cell ever needs to be
    /// marked as a mine.
    pub fn is_resolved(&self) -> bool {
        self.dimensions()
            .cells()
            .all(|cell| self.moves_made().contains(&cell) || self.mines().contains(&cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_no_safe_move_on_fresh_board() {
        let kb = KnowledgeBase::new(Dimensions::new(3, 3));
        assert_eq!(kb.best_safe_move(), None);
    }

    #[test]
    fn test_best_safe_move_skips_observed_cells() {
        let mut kb = KnowledgeBase::new(Dimensions::new(1, 3));
        kb.add_knowledge(c(0, 0), 0).unwrap();
        assert_eq!(kb.best_safe_move(), Some(c(0, 1)));

        kb.add_knowledge(c(0, 1), 0).unwrap();
        assert_eq!(kb.best_safe_move(), Some(c(0, 2)));

        kb.add_knowledge(c(0, 2), 0).unwrap();
        assert_eq!(kb.best_safe_move(), None);
    }

    #[test]
    fn test_fallback_excludes_observed_and_mines() {
        let mut kb = KnowledgeBase::new(Dimensions::new(1, 4));
        kb.add_knowledge(c(0, 0), 1).unwrap();
        assert!(kb.mines().contains(&c(0, 1)));

        assert_eq!(kb.unexplored_cells(), vec![c(0, 2), c(0, 3)]);
        let mut rng = GameRng::from_seed(3);
        for _ in 0..50 {
            let cell = kb.fallback_move(&mut rng).unwrap();
            assert!(cell == c(0, 2) || cell == c(0, 3));
        }
    }

    #[test]
    fn test_fallback_none_on_resolved_board() {
        let mut kb = KnowledgeBase::new(Dimensions::new(1, 2));
        kb.add_knowledge(c(0, 0), 1).unwrap();
        let mut rng = GameRng::from_seed(3);

        assert!(kb.is_resolved());
        assert_eq!(kb.fallback_move(&mut rng), None);
        assert_eq!(kb.next_move(&mut rng), None);
    }

    #[test]
    fn test_next_move_prefers_safe() {
        let mut kb = KnowledgeBase::new(Dimensions::new(3, 3));
        kb.add_knowledge(c(0, 0), 0).unwrap();
        let mut rng = GameRng::from_seed(11);
        assert_eq!(kb.next_move(&mut rng), Some(Move::Safe(c(0, 1))));
    }

    #[test]
    fn test_next_move_guesses_when_nothing_is_proven() {
        let kb = KnowledgeBase::new(Dimensions::new(2, 2));
        let mut rng = GameRng::from_seed(11);
        let mv = kb.next_move(&mut rng).unwrap();
        assert!(mv.is_guess());
        assert!(kb.dimensions().contains(mv.cell()));
    }
}
