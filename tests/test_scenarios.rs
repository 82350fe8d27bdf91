//! End-to-end deduction scenarios through the public API.

use minesweeper_ai::board::{Board, BoardOracle};
use minesweeper_ai::knowledge::KnowledgeBase;
use minesweeper_ai::rng::GameRng;
use minesweeper_ai::sentence::Sentence;
use minesweeper_ai::types::{Cell, Dimensions};

fn c(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

/// Reveal `cell` on `board` and feed the observation to `kb`.
fn reveal(board: &Board, kb: &mut KnowledgeBase, cell: Cell) {
    assert!(!board.is_mine(cell), "test revealed a mine at {cell}");
    kb.add_knowledge(cell, board.count_adjacent_mines(cell)).unwrap();
}

#[test]
fn zero_reveal_marks_every_neighbor_safe() {
    let board = Board::from_mines(Dimensions::new(3, 3), [c(2, 2)]).unwrap();
    let mut kb = KnowledgeBase::new(board.dimensions());

    reveal(&board, &mut kb, c(0, 0));

    for n in kb.neighbors(c(0, 0)).unwrap().to_vec() {
        assert!(kb.safes().contains(&n), "{n} should be safe");
    }
    assert!(kb.mines().is_empty());
}

#[test]
fn subset_rule_then_propagation_marks_leftover_safe() {
    let (a, b, cc) = (c(0, 0), c(0, 1), c(0, 2));
    let mut kb = KnowledgeBase::new(Dimensions::new(1, 3));
    kb.add_sentence(Sentence::new([a, b, cc], 1).unwrap()).unwrap();
    kb.add_sentence(Sentence::new([a, b], 1).unwrap()).unwrap();

    kb.extra_inference();
    kb.check_knowledge().unwrap();

    assert!(kb.safes().contains(&cc));
    assert!(!kb.safes().contains(&a) && !kb.safes().contains(&b));
    assert!(kb.mines().is_empty());
}

#[test]
fn full_sentence_marks_every_cell_mine() {
    let mut kb = KnowledgeBase::new(Dimensions::new(1, 2));
    kb.add_sentence(Sentence::new([c(0, 0), c(0, 1)], 2).unwrap())
        .unwrap();
    kb.check_knowledge().unwrap();

    assert_eq!(kb.mines().len(), 2);
    assert!(kb.safes().is_empty());
    assert!(kb.knowledge().is_empty());
}

#[test]
fn repeated_observation_changes_nothing() {
    let board = Board::from_mines(Dimensions::new(4, 4), [c(0, 3), c(3, 0)]).unwrap();
    let mut kb = KnowledgeBase::new(board.dimensions());

    reveal(&board, &mut kb, c(1, 1));
    let moves = kb.moves_made().clone();
    let knowledge = kb.knowledge().to_vec();

    reveal(&board, &mut kb, c(1, 1));
    assert_eq!(kb.moves_made(), &moves);
    assert_eq!(kb.knowledge(), knowledge.as_slice());
}

#[test]
fn no_moves_left_yields_none() {
    let mut kb = KnowledgeBase::new(Dimensions::new(2, 2));
    let mut rng = GameRng::from_seed(1);
    assert_eq!(kb.best_safe_move(), None);

    // Three mines around (1,1): revealing it resolves the whole board.
    kb.add_knowledge(c(1, 1), 3).unwrap();
    assert_eq!(kb.best_safe_move(), None);
    assert_eq!(kb.fallback_move(&mut rng), None);
    assert!(kb.is_resolved());
}

#[test]
fn one_two_one_chain_resolves_row() {
    // Hidden row 0 over a revealed row 1 reading 1 2 2 1: mines at (0,1), (0,2).
    let board = Board::from_mines(Dimensions::new(2, 4), [c(0, 1), c(0, 2)]).unwrap();
    let mut kb = KnowledgeBase::new(board.dimensions());
    for col in 0..4 {
        reveal(&board, &mut kb, c(1, col));
    }

    let mines: Vec<Cell> = board.mine_cells().collect();
    for mine in &mines {
        assert!(kb.mines().contains(mine));
    }
    assert!(kb.safes().contains(&c(0, 0)));
    assert!(kb.safes().contains(&c(0, 3)));
}

#[test]
fn undecidable_pair_stays_open() {
    // A 50/50: two hidden cells, one mine, nothing else to learn.
    let board = Board::from_mines(Dimensions::new(2, 2), [c(0, 0)]).unwrap();
    let mut kb = KnowledgeBase::new(board.dimensions());
    reveal(&board, &mut kb, c(1, 0));
    reveal(&board, &mut kb, c(1, 1));

    assert!(kb.mines().is_empty());
    assert!(!kb.safes().contains(&c(0, 0)));
    assert!(!kb.safes().contains(&c(0, 1)));
    assert_eq!(
        kb.knowledge(),
        &[Sentence::new([c(0, 0), c(0, 1)], 1).unwrap()]
    );
}
