//! Headless game loop: the AI plays a whole board against an oracle.
//!
//! Each turn takes a proven-safe cell if there is one and guesses otherwise,
//! then feeds the revealed count back into the knowledge base. The game is
//! won once every non-mine cell has been observed.

use serde::Serialize;
use tracing::info;

use crate::board::BoardOracle;
use crate::error::{Error, Result};
use crate::knowledge::KnowledgeBase;
use crate::moves::Move;
use crate::rng::GameRng;
use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum GameOutcome {
    Won,
    /// A guess landed on a mine.
    Lost { cell: Cell },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub outcome: GameOutcome,
    pub safe_moves: usize,
    pub random_moves: usize,
}

/// Play until the board is won or a guess hits a mine.
///
/// A proven-safe move that turns out to be a mine means the knowledge base
/// made an unsound deduction; that is reported as [`Error::Contradiction`].
pub fn play<B: BoardOracle>(
    board: &B,
    kb: &mut KnowledgeBase,
    rng: &mut GameRng,
) -> Result<PlayReport> {
    let dimensions = board.dimensions();
    if dimensions != kb.dimensions() {
        return Err(Error::Config(format!(
            "board is {dimensions} but the knowledge base is {}",
            kb.dimensions()
        )));
    }
    let safe_total = dimensions.cells().filter(|&cell| !board.is_mine(cell)).count();

    let mut safe_moves = 0usize;
    let mut random_moves = 0usize;

    let outcome = loop {
        if kb.moves_made().len() == safe_total {
            break GameOutcome::Won;
        }
        let Some(mv) = kb.next_move(rng) else {
            // Every unobserved cell is a proven mine.
            break GameOutcome::Won;
        };
        let cell = mv.cell();
        match mv {
            Move::Safe(_) => safe_moves += 1,
            Move::Random(_) => random_moves += 1,
        }

        if board.is_mine(cell) {
            if mv.is_guess() {
                break GameOutcome::Lost { cell };
            }
            return Err(Error::Contradiction { cell });
        }
        kb.add_knowledge(cell, board.count_adjacent_mines(cell))?;
    };

    info!(
        ?outcome,
        safe_moves,
        random_moves,
        mines_found = kb.mines().len(),
        "game finished"
    );
    Ok(PlayReport {
        outcome,
        safe_moves,
        random_moves,
    })
}
