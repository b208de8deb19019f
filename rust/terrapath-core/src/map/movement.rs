//! King-move offsets and their deterministic enumeration order.

use crate::models::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub name: &'static str,
    pub dx: i32,
    pub dy: i32,
}

pub const NORTH: Movement = Movement { name: "north", dx: 0, dy: 1 };
pub const SOUTH: Movement = Movement { name: "south", dx: 0, dy: -1 };
pub const EAST: Movement = Movement { name: "east", dx: 1, dy: 0 };
pub const WEST: Movement = Movement { name: "west", dx: -1, dy: 0 };
pub const NORTHEAST: Movement = Movement { name: "northeast", dx: 1, dy: 1 };
pub const NORTHWEST: Movement = Movement { name: "northwest", dx: -1, dy: 1 };
pub const SOUTHEAST: Movement = Movement { name: "southeast", dx: 1, dy: -1 };
pub const SOUTHWEST: Movement = Movement { name: "southwest", dx: -1, dy: -1 };

// Cardinals first, then diagonals.
pub const MOVEMENT_ORDER: [Movement; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTHEAST, NORTHWEST, SOUTHEAST, SOUTHWEST,
];

impl Movement {
    /// Applies the offset to `from`, returning `None` when it leaves a
    /// `width` x `length` grid.
    #[inline]
    pub fn apply(&self, from: Cell, width: u32, length: u32) -> Option<Cell> {
        let x = from.x.checked_add_signed(self.dx)?;
        let y = from.y.checked_add_signed(self.dy)?;
        (x < width && y < length).then_some(Cell { x, y })
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }
}
