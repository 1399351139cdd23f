use crate::Position;
use thiserror::Error;

/// Errors raised by the grid engine on malformed input.
///
/// Off-grid *neighbors* are never an error: they simply count as dead.
/// [`GridError::OutOfBounds`] is reserved for a target cell that the caller
/// placed outside the grid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// The grid has zero rows, zero columns, rows of different lengths or
    /// too many cells.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },
    /// A position lies outside the grid.
    #[error("position {position} is outside of the {height}x{width} grid")]
    OutOfBounds {
        position: Position,
        height: usize,
        width: usize,
    },
    /// The probability of a cell being alive is not within `[0, 1]`.
    #[error("alive probability {0} is not within [0, 1]")]
    InvalidProbability(f64),
}

impl GridError {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }
}
