//! Errors raised by the grid engine on malformed input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A direction name or code outside the four valid directions.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A grid that is not N x N.
    #[error("malformed grid: {0}")]
    InvalidShape(String),
    /// A non-zero cell that is not a power of two >= 2.
    #[error("invalid tile {value} at row {row}, column {col}")]
    InvalidTile { row: usize, col: usize, value: u32 },
}
