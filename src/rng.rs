//! WASM-compatible random number generator.
//!
//! Uses the `rand` crate with `SmallRng` (xoshiro256++) which is fast and
//! works with WASM. Entropy is sourced from `getrandom` (browser crypto API).

use rand::rngs::SmallRng;
use rand::seq::{index, IndexedRandom};
use rand::SeedableRng;

/// A seedable RNG for mine placement and random fallback moves.
///
/// Can be seeded for deterministic replay, or created from system entropy.
pub struct GameRng {
    inner: SmallRng,
}

impl GameRng {
    /// Create from system entropy (browser crypto.getRandomValues or OS).
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Create with a specific seed for deterministic behavior.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::from_seed)
    }

    /// Uniform pick from a slice.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.inner).copied()
    }

    /// `amount` distinct indices from `0..length`. Caller guarantees
    /// `amount <= length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, length, amount).into_vec()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}
