use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::Cell;

/// Immutable frontier entry. A relaxation pushes a fresh entry; older entries
/// for the same cell stay in the heap and are reconciled at pop time.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub priority: f64,
    pub seq: u64,
    pub cell: Cell,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert for min-priority, earliest-pushed first
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of cells without decrease-key. Equal priorities pop in
/// insertion order, which keeps every search deterministic.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), seq: 0 }
    }

    pub fn push(&mut self, cell: Cell, priority: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { priority, seq, cell });
    }

    pub fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since creation.
    pub fn pushed(&self) -> u64 {
        self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_priority() {
        let mut q = Frontier::new();
        q.push(Cell::new(0, 0), 3.5);
        q.push(Cell::new(1, 0), 0.25);
        q.push(Cell::new(2, 0), 2.0);
        let order: Vec<f64> = std::iter::from_fn(|| q.pop()).map(|e| e.priority).collect();
        assert_eq!(order, vec![0.25, 2.0, 3.5]);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = Frontier::with_capacity(4);
        q.push(Cell::new(5, 5), 1.0);
        q.push(Cell::new(0, 0), 1.0);
        q.push(Cell::new(3, 1), 1.0);
        assert_eq!(q.pop().unwrap().cell, Cell::new(5, 5));
        assert_eq!(q.pop().unwrap().cell, Cell::new(0, 0));
        assert_eq!(q.pop().unwrap().cell, Cell::new(3, 1));
    }

    #[test]
    fn duplicate_cells_are_kept() {
        let mut q = Frontier::new();
        let c = Cell::new(2, 2);
        q.push(c, 9.0);
        q.push(c, 4.0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pushed(), 2);
        let first = q.pop().unwrap();
        assert_eq!((first.cell, first.priority), (c, 4.0));
        let stale = q.pop().unwrap();
        assert_eq!((stale.cell, stale.priority), (c, 9.0));
    }

    #[test]
    fn infinite_priority_sorts_last() {
        let mut q = Frontier::new();
        q.push(Cell::new(1, 1), f64::INFINITY);
        q.push(Cell::new(0, 1), 1e12);
        assert_eq!(q.pop().unwrap().cell, Cell::new(0, 1));
    }
}
