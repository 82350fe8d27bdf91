//! The knowledge base: sentences plus the safe/mine facts derived from them.
//!
//! Two rules drive all deduction:
//! - Resolution: a sentence with `count == 0` makes all its cells safe, one
//!   with `count == |cells|` makes all its cells mines.
//! - Subset subtraction: if `A.cells ⊆ B.cells`, then `B.cells - A.cells`
//!   holds exactly `B.count - A.count` mines.
//!
//! Every pass works on a snapshot of the sentence list and applies its
//! results afterwards, so no pass mutates the list it is iterating.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::InferenceConfig;
use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::types::{Cell, Dimensions, NeighborCache};

pub struct KnowledgeBase {
    neighbors: NeighborCache,
    config: InferenceConfig,
    /// Cells whose count has been observed.
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Sentence>,
}

impl KnowledgeBase {
    /// `dimensions` are expected to come from [`GameConfig::validate`], which
    /// keeps every side within [`Dimensions::MAX_SIDE`].
    ///
    /// [`GameConfig::validate`]: crate::config::GameConfig::validate
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_config(dimensions, InferenceConfig::default())
    }

    pub fn with_config(dimensions: Dimensions, config: InferenceConfig) -> Self {
        Self {
            neighbors: NeighborCache::new(dimensions),
            config,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.neighbors.dimensions()
    }

    pub fn neighbors(&self, cell: Cell) -> Result<&[Cell]> {
        self.check_bounds(cell)?;
        Ok(self.neighbors.get(cell))
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    pub fn is_known(&self, cell: Cell) -> bool {
        self.safes.contains(&cell) || self.mines.contains(&cell)
    }

    fn check_bounds(&self, cell: Cell) -> Result<()> {
        let dimensions = self.dimensions();
        if dimensions.contains(cell) {
            Ok(())
        } else {
            Err(Error::OutOfBounds { cell, dimensions })
        }
    }

    /// Record a proven mine and strip it from every sentence.
    /// Re-marking a known mine is a no-op. Returns whether anything changed.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.safes.contains(&cell) {
            return Err(Error::Contradiction { cell });
        }
        if !self.mines.insert(cell) {
            return Ok(false);
        }
        trace!(%cell, "proved mine");
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell)?;
        }
        Ok(true)
    }

    /// Record a proven safe cell and strip it from every sentence.
    /// Re-marking a known safe cell is a no-op. Returns whether anything changed.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.mines.contains(&cell) {
            return Err(Error::Contradiction { cell });
        }
        if !self.safes.insert(cell) {
            return Ok(false);
        }
        trace!(%cell, "proved safe");
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell)?;
        }
        Ok(true)
    }

    /// Add a sentence directly, pruned against the current facts. Empty and
    /// duplicate sentences are dropped. Does not propagate; call
    /// [`check_knowledge`](Self::check_knowledge) afterwards.
    pub fn add_sentence(&mut self, mut sentence: Sentence) -> Result<bool> {
        for &cell in sentence.cells() {
            self.check_bounds(cell)?;
        }
        sentence.prune(&self.safes, &self.mines)?;
        Ok(self.insert_sentence(sentence))
    }

    fn insert_sentence(&mut self, sentence: Sentence) -> bool {
        if sentence.is_empty() || self.knowledge.contains(&sentence) {
            return false;
        }
        self.knowledge.push(sentence);
        true
    }

    /// Propagate facts and sentences to a mutual fixpoint.
    ///
    /// Each pass strips known cells from every sentence, collects the cells
    /// that resolved sentences prove, drops empty and duplicate sentences and
    /// finally records the new facts. The loop ends on the first pass that
    /// changes nothing. Every productive pass either adds a fact or removes
    /// cells or sentences, so it terminates.
    ///
    /// Returns whether anything changed.
    pub fn check_knowledge(&mut self) -> Result<bool> {
        let mut any_change = false;
        let mut passes = 0usize;

        loop {
            passes += 1;
            let mut changed = false;

            for sentence in &mut self.knowledge {
                changed |= sentence.prune(&self.safes, &self.mines)?;
            }

            let mut new_mines = Vec::new();
            let mut new_safes = Vec::new();
            for sentence in &self.knowledge {
                if let Some(cells) = sentence.known_mines() {
                    new_mines.extend(cells.iter().copied());
                } else if let Some(cells) = sentence.known_safes() {
                    new_safes.extend(cells.iter().copied());
                }
            }

            let before = self.knowledge.len();
            let mut seen: HashSet<Sentence> = HashSet::with_capacity(before);
            self.knowledge
                .retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));
            changed |= self.knowledge.len() != before;

            for cell in new_mines {
                changed |= self.mark_mine(cell)?;
            }
            for cell in new_safes {
                changed |= self.mark_safe(cell)?;
            }

            if !changed {
                break;
            }
            any_change = true;
        }

        debug!(
            passes,
            sentences = self.knowledge.len(),
            safes = self.safes.len(),
            mines = self.mines.len(),
            "propagation reached fixpoint"
        );
        Ok(any_change)
    }

    /// One subset-inference pass over every ordered pair of sentences.
    ///
    /// Derived sentences are collected against a stable snapshot and only
    /// appended once the pass is over. Sentences already present are not
    /// derived twice. Returns how many sentences were added.
    pub fn extra_inference(&mut self) -> usize {
        let existing: HashSet<&Sentence> = self.knowledge.iter().collect();
        let mut derived_set: HashSet<Sentence> = HashSet::new();
        let mut derived: Vec<Sentence> = Vec::new();

        for (i, subset) in self.knowledge.iter().enumerate() {
            for (j, superset) in self.knowledge.iter().enumerate() {
                if i == j || subset.len() >= superset.len() {
                    continue;
                }
                let Some(sentence) = superset.subtract(subset) else {
                    continue;
                };
                if !existing.contains(&sentence) && derived_set.insert(sentence.clone()) {
                    derived.push(sentence);
                }
            }
        }

        let added = derived.len();
        if added > 0 {
            debug!(added, "subset inference derived sentences");
        }
        self.knowledge.extend(derived);
        added
    }

    /// Alternate subset inference and propagation until a pass derives
    /// nothing or the configured round cap is reached.
    ///
    /// Returns `false` when the cap stopped inference before it converged.
    fn infer(&mut self) -> Result<bool> {
        let max_rounds = self.config.max_inference_rounds;
        for _ in 0..max_rounds {
            if self.extra_inference() == 0 {
                return Ok(true);
            }
            self.check_knowledge()?;
        }
        if max_rounds > 0 {
            warn!(max_rounds, "subset inference hit the round cap");
        }
        Ok(false)
    }

    /// Ingest one observation: `cell` is safe and has `count` adjacent mines.
    ///
    /// The observation is validated before anything is mutated, so a rejected
    /// observation leaves the knowledge base untouched. Observing a cell twice
    /// is a no-op. A [`Error::Contradiction`] raised during propagation means
    /// the observations so far are inconsistent; the knowledge base should be
    /// discarded.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> Result<()> {
        self.check_bounds(cell)?;
        if self.moves_made.contains(&cell) {
            debug!(%cell, "cell already observed");
            return Ok(());
        }
        if self.mines.contains(&cell) {
            return Err(Error::Contradiction { cell });
        }

        let neighbors = self.neighbors.get(cell);
        if count > neighbors.len() {
            return Err(Error::CountOutOfRange {
                cell,
                count,
                min: 0,
                max: neighbors.len(),
            });
        }
        let known_mines = neighbors.iter().filter(|&&n| self.mines.contains(&n)).count();
        let unknown: Vec<Cell> = neighbors
            .iter()
            .filter(|&&n| !self.safes.contains(&n) && !self.mines.contains(&n))
            .copied()
            .collect();
        if count < known_mines || count - known_mines > unknown.len() {
            return Err(Error::CountOutOfRange {
                cell,
                count,
                min: known_mines,
                max: known_mines + unknown.len(),
            });
        }

        debug!(%cell, count, unknown = unknown.len(), "observation");
        self.moves_made.insert(cell);
        self.mark_safe(cell)?;
        if !unknown.is_empty() {
            self.insert_sentence(Sentence::new(unknown, count - known_mines)?);
        }

        self.check_knowledge()?;
        let converged = self.infer()?;
        self.check_knowledge()?;
        if !converged {
            debug!(%cell, "observation left subset inference unfinished");
        }
        Ok(())
    }
}
