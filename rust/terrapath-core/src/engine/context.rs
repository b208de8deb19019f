use aligned_vec::AVec;
use bitvec::prelude::*;

use crate::errors::SearchError;
use crate::models::Cell;

const NO_PARENT: u32 = u32::MAX;

/// Per-run cost, predecessor and explored tables, indexed row-major.
pub struct SearchContext {
    width: u32,
    cells: usize,
    cost: AVec<f64>,
    parent: AVec<u32>,
    explored: BitVec,
}

impl SearchContext {
    /// Every cost starts at +inf, every predecessor empty, nothing explored.
    pub fn new(width: u32, length: u32) -> Self {
        let cells = width as usize * length as usize;
        Self {
            width,
            cells,
            cost: AVec::__from_elem(64, f64::INFINITY, cells),
            parent: AVec::__from_elem(64, NO_PARENT, cells),
            explored: bitvec![0; cells],
        }
    }

    #[inline(always)]
    fn index(&self, c: Cell) -> usize {
        c.y as usize * self.width as usize + c.x as usize
    }

    #[inline(always)]
    fn cell_at(&self, i: usize) -> Cell {
        let w = self.width as usize;
        Cell { x: (i % w) as u32, y: (i / w) as u32 }
    }

    #[inline(always)]
    pub fn cost(&self, c: Cell) -> f64 {
        self.cost[self.index(c)]
    }

    #[inline(always)]
    pub fn set_cost(&mut self, c: Cell, val: f64) {
        let i = self.index(c);
        self.cost[i] = val;
    }

    #[inline(always)]
    pub fn parent(&self, c: Cell) -> Option<Cell> {
        match self.parent[self.index(c)] {
            NO_PARENT => None,
            p => Some(self.cell_at(p as usize)),
        }
    }

    #[inline(always)]
    pub fn set_parent(&mut self, c: Cell, p: Cell) {
        let i = self.index(c);
        self.parent[i] = self.index(p) as u32;
    }

    #[inline(always)]
    pub fn is_explored(&self, c: Cell) -> bool {
        self.explored[self.index(c)]
    }

    #[inline(always)]
    pub fn mark_explored(&mut self, c: Cell) {
        let i = self.index(c);
        self.explored.set(i, true);
    }

    pub fn explored_count(&self) -> usize {
        self.explored.count_ones()
    }

    /// Follows predecessors from `terminal` back to `start` and returns the
    /// forward path. A chain longer than the grid, or one that ends before
    /// reaching `start`, is reported instead of followed.
    pub fn reconstruct(&self, start: Cell, terminal: Cell) -> Result<Vec<Cell>, SearchError> {
        let mut path = Vec::new();
        let mut cur = terminal;
        while cur != start {
            if path.len() >= self.cells {
                return Err(SearchError::BrokenChain { at: cur });
            }
            path.push(cur);
            cur = self.parent(cur).ok_or(SearchError::BrokenChain { at: cur })?;
        }
        path.push(start);
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_start_unset() {
        let ctx = SearchContext::new(4, 3);
        let c = Cell::new(3, 2);
        assert!(ctx.cost(c).is_infinite());
        assert_eq!(ctx.parent(c), None);
        assert!(!ctx.is_explored(c));
        assert_eq!(ctx.explored_count(), 0);
    }

    #[test]
    fn setters_round_trip_through_index() {
        let mut ctx = SearchContext::new(4, 3);
        let a = Cell::new(3, 1);
        let b = Cell::new(2, 2);
        ctx.set_cost(a, 2.5);
        ctx.set_parent(b, a);
        ctx.mark_explored(b);
        assert_eq!(ctx.cost(a), 2.5);
        assert_eq!(ctx.parent(b), Some(a));
        assert!(ctx.is_explored(b));
        assert!(!ctx.is_explored(a));
    }

    #[test]
    fn reconstruct_walks_back_to_start() {
        let mut ctx = SearchContext::new(3, 3);
        let (s, m, g) = (Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 1));
        ctx.set_parent(m, s);
        ctx.set_parent(g, m);
        assert_eq!(ctx.reconstruct(s, g).unwrap(), vec![s, m, g]);
        assert_eq!(ctx.reconstruct(s, s).unwrap(), vec![s]);
    }

    #[test]
    fn reconstruct_reports_missing_link() {
        let ctx = SearchContext::new(3, 3);
        let err = ctx.reconstruct(Cell::new(0, 0), Cell::new(2, 2)).unwrap_err();
        assert_eq!(err, SearchError::BrokenChain { at: Cell::new(2, 2) });
    }

    #[test]
    fn reconstruct_reports_cycles() {
        let mut ctx = SearchContext::new(2, 2);
        let (a, b) = (Cell::new(1, 0), Cell::new(1, 1));
        ctx.set_parent(a, b);
        ctx.set_parent(b, a);
        assert!(matches!(ctx.reconstruct(Cell::new(0, 0), a), Err(SearchError::BrokenChain { .. })));
    }
}
