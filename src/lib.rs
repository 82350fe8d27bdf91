//! Knowledge-base Minesweeper AI.
//!
//! Observations (a revealed cell and its adjacent-mine count) become
//! sentences in a [`knowledge::KnowledgeBase`], which propagates them to a
//! fixpoint of proven-safe and proven-mine cells using two rules only:
//! resolution of all-safe / all-mine sentences and subset subtraction.
//!
//! Exports a `MinesweeperAi` and a `WasmBoard` class to JavaScript via
//! wasm-bindgen. Cell sets cross the boundary as `Uint32Array`s of packed
//! `(row << 16) | col` keys.

pub mod autoplay;
pub mod board;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod moves;
pub mod rng;
pub mod sentence;
pub mod types;

pub use error::{Error, Result};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use std::collections::HashSet;

    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use crate::autoplay;
    use crate::board::{Board, BoardOracle};
    use crate::config::{GameConfig, InferenceConfig};
    use crate::knowledge::KnowledgeBase;
    use crate::rng::GameRng;
    use crate::types::Cell;

    /// `undefined` / `null` select the defaults.
    fn config_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(T::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
    }

    fn to_js<T: Serialize>(value: Option<T>) -> Result<JsValue, JsError> {
        match value {
            Some(v) => serde_wasm_bindgen::to_value(&v).map_err(|e| JsError::new(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    fn packed_keys(cells: &HashSet<Cell>) -> js_sys::Uint32Array {
        let mut keys: Vec<u32> = cells.iter().map(|c| c.key()).collect();
        keys.sort_unstable();
        js_sys::Uint32Array::from(keys.as_slice())
    }

    /// The inference engine plus the RNG used for fallback guesses.
    #[wasm_bindgen]
    pub struct MinesweeperAi {
        kb: KnowledgeBase,
        rng: GameRng,
    }

    #[wasm_bindgen]
    impl MinesweeperAi {
        /// `game`: `{ height, width, mines, seed }`,
        /// `inference`: `{ max_inference_rounds }`. Both optional.
        #[wasm_bindgen(constructor)]
        pub fn new(game: JsValue, inference: JsValue) -> Result<MinesweeperAi, JsError> {
            let game: GameConfig = config_from_js(game)?;
            let inference: InferenceConfig = config_from_js(inference)?;
            let dimensions = game.validate()?;
            Ok(MinesweeperAi {
                kb: KnowledgeBase::with_config(dimensions, inference),
                rng: GameRng::from_optional_seed(game.seed),
            })
        }

        #[wasm_bindgen(js_name = "addKnowledge")]
        pub fn add_knowledge(&mut self, row: usize, col: usize, count: usize) -> Result<(), JsError> {
            self.kb.add_knowledge(Cell::new(row, col), count)?;
            Ok(())
        }

        /// `{ row, col }` or `null`.
        #[wasm_bindgen(js_name = "bestSafeMove")]
        pub fn best_safe_move(&self) -> Result<JsValue, JsError> {
            to_js(self.kb.best_safe_move())
        }

        /// `{ row, col }` or `null`.
        #[wasm_bindgen(js_name = "fallbackMove")]
        pub fn fallback_move(&mut self) -> Result<JsValue, JsError> {
            to_js(self.kb.fallback_move(&mut self.rng))
        }

        /// `{ kind: "safe" | "random", row, col }` or `null`.
        #[wasm_bindgen(js_name = "nextMove")]
        pub fn next_move(&mut self) -> Result<JsValue, JsError> {
            to_js(self.kb.next_move(&mut self.rng))
        }

        #[wasm_bindgen(js_name = "isResolved")]
        pub fn is_resolved(&self) -> bool {
            self.kb.is_resolved()
        }

        pub fn safes(&self) -> js_sys::Uint32Array {
            packed_keys(self.kb.safes())
        }

        pub fn mines(&self) -> js_sys::Uint32Array {
            packed_keys(self.kb.mines())
        }

        #[wasm_bindgen(js_name = "movesMade")]
        pub fn moves_made(&self) -> js_sys::Uint32Array {
            packed_keys(self.kb.moves_made())
        }
    }

    /// A randomly generated board acting as the oracle.
    #[wasm_bindgen]
    pub struct WasmBoard {
        board: Board,
    }

    #[wasm_bindgen]
    impl WasmBoard {
        #[wasm_bindgen(constructor)]
        pub fn new(game: JsValue) -> Result<WasmBoard, JsError> {
            let game: GameConfig = config_from_js(game)?;
            let mut rng = GameRng::from_optional_seed(game.seed);
            Ok(WasmBoard {
                board: Board::random(&game, &mut rng)?,
            })
        }

        #[wasm_bindgen(js_name = "isMine")]
        pub fn is_mine(&self, row: usize, col: usize) -> bool {
            self.board.is_mine(Cell::new(row, col))
        }

        #[wasm_bindgen(js_name = "countAdjacentMines")]
        pub fn count_adjacent_mines(&self, row: usize, col: usize) -> usize {
            self.board.count_adjacent_mines(Cell::new(row, col))
        }

        #[wasm_bindgen(js_name = "mineCount")]
        pub fn mine_count(&self) -> usize {
            self.board.mine_count()
        }

        /// Let a fresh AI play this board to the end.
        /// Returns `{ outcome, safe_moves, random_moves }`.
        pub fn autoplay(&self, seed: Option<u64>) -> Result<JsValue, JsError> {
            let mut kb = KnowledgeBase::new(self.board.dimensions());
            let mut rng = GameRng::from_optional_seed(seed);
            let report = autoplay::play(&self.board, &mut kb, &mut rng)?;
            to_js(Some(report))
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM inference engine ready".to_string()
    }
}
