//! Game and inference configuration.
//!
//! Both structs deserialize from a plain JS object via `serde-wasm-bindgen`;
//! missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Dimensions;

const MAX_SIDE: usize = Dimensions::MAX_SIDE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    /// Seed for board generation and random moves. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<Dimensions> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::Config(format!(
                "board must be at least 1x1, got {}x{}",
                self.height, self.width
            )));
        }
        if self.height > MAX_SIDE || self.width > MAX_SIDE {
            return Err(Error::Config(format!(
                "board sides are limited to {MAX_SIDE}, got {}x{}",
                self.height, self.width
            )));
        }
        let dims = Dimensions::new(self.height, self.width);
        if self.mines > dims.cell_count() {
            return Err(Error::Config(format!(
                "{} mines do not fit on a {dims} board",
                self.mines
            )));
        }
        Ok(dims)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Subset-inference rounds per observation. Each round derives new
    /// sentences from the current snapshot and propagates them; rounds stop
    /// early once nothing new is derived. 1 means a single subset pass.
    pub max_inference_rounds: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_inference_rounds: 32,
        }
    }
}
