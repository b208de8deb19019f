use thiserror::Error;

use crate::models::Cell;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("map has zero extent ({width}x{length})")]
    Empty { width: u32, length: u32 },
    #[error("{which} cell {cell} lies outside the {width}x{length} grid")]
    OutOfBounds { which: &'static str, cell: Cell, width: u32, length: u32 },
    #[error("terrain row {row} has {found} values, expected {width}")]
    RowWidth { row: usize, found: usize, width: u32 },
    #[error("terrain value {value} at {cell} must be finite and non-negative")]
    BadTerrain { cell: Cell, value: f64 },
    #[error("{which} cell {cell} is impassable")]
    Blocked { which: &'static str, cell: Cell },
    #[error("invalid map file: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Parse(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    InvalidMap(#[from] MapError),
    #[error("no path from {start} to {goal}")]
    NoPath { start: Cell, goal: Cell },
    #[error("predecessor chain broken at {at}")]
    BrokenChain { at: Cell },
    #[error("heuristic weight {weight} must be finite and non-negative")]
    InvalidWeight { weight: f64 },
}
