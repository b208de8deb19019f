use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. `x` indexes columns (`< width`), `y` indexes rows (`< length`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `max(|dx|, |dy|)`, the step count between two cells under king moves.
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.chebyshev(other) == 1
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Start-to-goal cells, or `None` when the goal was never reached.
    pub path: Option<Vec<Cell>>,
    /// Sum of edge costs along `path`; infinite when there is no path.
    pub cost: f64,
    /// Goal entry of the cost table when the search stopped. Never below
    /// `cost`; above it when a predecessor improved after the goal was last
    /// relaxed.
    pub table_cost: f64,
    pub expanded: u64,
    pub pushed: u64,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    pub(crate) fn unreachable(expanded: u64, pushed: u64) -> Self {
        Self { path: None, cost: f64::INFINITY, table_cost: f64::INFINITY, expanded, pushed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_takes_the_larger_axis() {
        let a = Cell::new(0, 0);
        assert_eq!(a.chebyshev(Cell::new(3, 5)), 5);
        assert_eq!(Cell::new(4, 1).chebyshev(Cell::new(0, 2)), 4);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn adjacency_is_king_move() {
        let c = Cell::new(2, 2);
        assert!(c.is_adjacent(Cell::new(3, 3)));
        assert!(c.is_adjacent(Cell::new(2, 1)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(4, 2)));
    }

    #[test]
    fn cell_serializes_as_object() {
        let v = serde_json::to_value(Cell::new(1, 2)).unwrap();
        assert_eq!(v, serde_json::json!({ "x": 1, "y": 2 }));
    }

    #[test]
    fn unreachable_result_has_infinite_cost() {
        let r = SearchResult::unreachable(7, 9);
        assert!(!r.found());
        assert!(r.cost.is_infinite());
        assert!(r.table_cost.is_infinite());
        assert_eq!(r.expanded, 7);
    }
}
