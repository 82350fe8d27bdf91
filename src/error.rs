//! Error type for the inference engine.
//!
//! Every variant is a caller contract violation or an inconsistency in the
//! supplied observations. "No move available" is not an error.

use std::fmt;

use crate::types::{Cell, Dimensions};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A cell outside the board was observed or named in a sentence.
    OutOfBounds { cell: Cell, dimensions: Dimensions },
    /// An observed count cannot be satisfied by the cell's neighbors.
    CountOutOfRange {
        cell: Cell,
        count: usize,
        min: usize,
        max: usize,
    },
    /// A sentence claiming more mines than it has cells.
    InvalidSentence { count: usize, cells: usize },
    /// The knowledge base proved a cell both safe and a mine. The state is no
    /// longer meaningful and should be discarded.
    Contradiction { cell: Cell },
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds { cell, dimensions } => {
                write!(f, "cell {cell} is outside the {dimensions} board")
            }
            Error::CountOutOfRange {
                cell,
                count,
                min,
                max,
            } => {
                write!(f, "count {count} at {cell} is outside {min}..={max}")
            }
            Error::InvalidSentence { count, cells } => {
                write!(f, "sentence claims {count} mines among {cells} cells")
            }
            Error::Contradiction { cell } => {
                write!(f, "observations are inconsistent at {cell}")
            }
            Error::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
