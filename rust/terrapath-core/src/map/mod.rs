//! Map collaborator consumed by the search engine.
//!
//! The engine only ever reads a map through [`TerrainMap`]; [`GridMap`] is the
//! reference implementation used by the harness and the tests.

pub mod grid;
pub mod movement;

pub use grid::{CostFunction, GridMap, MapFile, MAX_STEP_COST};
pub use movement::{Movement, MOVEMENT_ORDER};

use crate::errors::MapError;
use crate::models::Cell;

pub trait TerrainMap {
    fn width(&self) -> u32;
    fn length(&self) -> u32;
    fn start(&self) -> Cell;
    fn goal(&self) -> Cell;

    /// Terrain value of an in-bounds cell.
    fn tile(&self, x: u32, y: u32) -> f64;

    /// Cells reachable in one step from `cell`, clipped to the grid.
    fn neighbors(&self, cell: Cell) -> Vec<Cell>;

    /// Non-negative cost of stepping from `from` to the adjacent `to`.
    fn cost(&self, from: Cell, to: Cell) -> f64;

    fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width() && cell.y < self.length()
    }

    fn cell_count(&self) -> usize {
        self.width() as usize * self.length() as usize
    }
}

/// Rejects maps the search loop cannot run on: zero extent, or a start/goal
/// outside the grid.
pub fn validate<M: TerrainMap + ?Sized>(map: &M) -> Result<(), MapError> {
    let (width, length) = (map.width(), map.length());
    if width == 0 || length == 0 {
        return Err(MapError::Empty { width, length });
    }
    for (which, cell) in [("start", map.start()), ("goal", map.goal())] {
        if !map.contains(cell) {
            return Err(MapError::OutOfBounds { which, cell, width, length });
        }
    }
    Ok(())
}
