use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::MapError;
use crate::models::Cell;

use super::movement::MOVEMENT_ORDER;
use super::{validate, TerrainMap};

pub const DEFAULT_TERRAIN: f64 = 1.0;

/// Ceiling for a single step under [`CostFunction::Exponential`]. A climb of
/// more than about 1023 units would otherwise overflow to infinity, which the
/// relaxation can never improve on, leaving the cell unreachable.
pub const MAX_STEP_COST: f64 = 1e300;

/// How a step between two adjacent cells is priced from their terrain values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostFunction {
    /// Every step costs 1.
    #[default]
    Uniform,
    /// Entering a cell costs its terrain value.
    Entry,
    /// `2^(to - from)`: climbing doubles per unit, descending halves.
    /// Saturates at [`MAX_STEP_COST`].
    Exponential,
    /// `from / (to + 1)`.
    Division,
}

impl CostFunction {
    pub fn step_cost(self, from: f64, to: f64) -> f64 {
        match self {
            CostFunction::Uniform => 1.0,
            CostFunction::Entry => to,
            CostFunction::Exponential => 2f64.powf(to - from).min(MAX_STEP_COST),
            CostFunction::Division => from / (to + 1.0),
        }
    }
}

/// On-disk map description. `tiles[y][x]` holds the terrain of `Cell { x, y }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub start: Cell,
    pub goal: Cell,
    pub tiles: Vec<Vec<f64>>,
    #[serde(default)]
    pub cost: CostFunction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<Cell>,
}

/// Dense row-major terrain grid with 8-directional adjacency.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: u32,
    length: u32,
    tiles: Vec<f64>,
    blocked: BitVec,
    start: Cell,
    goal: Cell,
    cost_fn: CostFunction,
}

impl GridMap {
    /// Flat terrain of [`DEFAULT_TERRAIN`] with uniform step cost.
    pub fn new(width: u32, length: u32, start: Cell, goal: Cell) -> Result<Self, MapError> {
        Self::from_fn(width, length, start, goal, |_| DEFAULT_TERRAIN)
    }

    pub fn from_fn<F>(width: u32, length: u32, start: Cell, goal: Cell, terrain: F) -> Result<Self, MapError>
    where
        F: Fn(Cell) -> f64,
    {
        let n = width as usize * length as usize;
        let mut tiles = Vec::with_capacity(n);
        for y in 0..length {
            for x in 0..width {
                let cell = Cell { x, y };
                tiles.push(check_terrain(cell, terrain(cell))?);
            }
        }
        let map = GridMap {
            width,
            length,
            tiles,
            blocked: bitvec![0; n],
            start,
            goal,
            cost_fn: CostFunction::default(),
        };
        validate(&map)?;
        Ok(map)
    }

    pub fn from_json_str(s: &str) -> Result<Self, MapError> {
        let file: MapFile = serde_json::from_str(s)?;
        Self::try_from(file)
    }

    pub fn with_cost_function(mut self, cost_fn: CostFunction) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    pub fn cost_function(&self) -> CostFunction {
        self.cost_fn
    }

    pub fn set_tile(&mut self, cell: Cell, value: f64) -> Result<(), MapError> {
        let i = self.checked_index("tile", cell)?;
        self.tiles[i] = check_terrain(cell, value)?;
        Ok(())
    }

    /// Removes `cell` from every neighbor set. Start and goal cannot be blocked.
    pub fn block(&mut self, cell: Cell) -> Result<(), MapError> {
        let i = self.checked_index("blocked", cell)?;
        if cell == self.start {
            return Err(MapError::Blocked { which: "start", cell });
        }
        if cell == self.goal {
            return Err(MapError::Blocked { which: "goal", cell });
        }
        self.blocked.set(i, true);
        Ok(())
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.contains(cell) && self.blocked[self.index(cell)]
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    fn checked_index(&self, which: &'static str, cell: Cell) -> Result<usize, MapError> {
        if !self.contains(cell) {
            return Err(MapError::OutOfBounds { which, cell, width: self.width, length: self.length });
        }
        Ok(self.index(cell))
    }
}

fn check_terrain(cell: Cell, value: f64) -> Result<f64, MapError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MapError::BadTerrain { cell, value })
    }
}

impl TryFrom<MapFile> for GridMap {
    type Error = MapError;

    fn try_from(file: MapFile) -> Result<Self, Self::Error> {
        let length = u32::try_from(file.tiles.len()).map_err(|_| MapError::Parse("too many rows".into()))?;
        let width = file.tiles.first().map_or(0, |row| row.len());
        let width = u32::try_from(width).map_err(|_| MapError::Parse("too many columns".into()))?;
        for (row, values) in file.tiles.iter().enumerate() {
            if values.len() != width as usize {
                return Err(MapError::RowWidth { row, found: values.len(), width });
            }
        }
        let tiles = &file.tiles;
        let mut map = GridMap::from_fn(width, length, file.start, file.goal, |c| {
            tiles[c.y as usize][c.x as usize]
        })?
        .with_cost_function(file.cost);
        for cell in file.blocked {
            map.block(cell)?;
        }
        Ok(map)
    }
}

impl TerrainMap for GridMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn length(&self) -> u32 {
        self.length
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn goal(&self) -> Cell {
        self.goal
    }

    fn tile(&self, x: u32, y: u32) -> f64 {
        self.tiles[self.index(Cell { x, y })]
    }

    fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        MOVEMENT_ORDER
            .iter()
            .filter_map(|m| m.apply(cell, self.width, self.length))
            .filter(|&n| !self.blocked[self.index(n)])
            .collect()
    }

    fn cost(&self, from: Cell, to: Cell) -> f64 {
        self.cost_fn.step_cost(self.tile(from.x, from.y), self.tile(to.x, to.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid3() -> GridMap {
        GridMap::from_fn(3, 3, Cell::new(0, 0), Cell::new(2, 2), |c| (c.x + 3 * c.y) as f64).unwrap()
    }

    #[test]
    fn tiles_are_row_major() {
        let m = grid3();
        assert_eq!(m.tile(0, 0), 0.0);
        assert_eq!(m.tile(2, 0), 2.0);
        assert_eq!(m.tile(0, 1), 3.0);
        assert_eq!(m.tile(2, 2), 8.0);
    }

    #[test]
    fn neighbors_are_clipped_and_ordered() {
        let m = grid3();
        assert_eq!(m.neighbors(Cell::new(0, 0)), vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
        assert_eq!(m.neighbors(Cell::new(1, 1)).len(), 8);
        assert_eq!(m.neighbors(Cell::new(2, 1)).len(), 5);
    }

    #[test]
    fn blocked_cells_drop_out_of_neighbor_sets() {
        let mut m = grid3();
        m.block(Cell::new(1, 1)).unwrap();
        assert!(m.is_blocked(Cell::new(1, 1)));
        assert!(!m.neighbors(Cell::new(0, 0)).contains(&Cell::new(1, 1)));
        assert_eq!(m.block(Cell::new(0, 0)), Err(MapError::Blocked { which: "start", cell: Cell::new(0, 0) }));
        assert!(matches!(m.block(Cell::new(5, 0)), Err(MapError::OutOfBounds { .. })));
    }

    #[test]
    fn cost_functions_price_steps() {
        assert_eq!(CostFunction::Uniform.step_cost(3.0, 9.0), 1.0);
        assert_eq!(CostFunction::Entry.step_cost(3.0, 9.0), 9.0);
        assert_eq!(CostFunction::Exponential.step_cost(1.0, 3.0), 4.0);
        assert_eq!(CostFunction::Exponential.step_cost(3.0, 1.0), 0.25);
        assert_eq!(CostFunction::Division.step_cost(6.0, 2.0), 2.0);

        let m = grid3().with_cost_function(CostFunction::Entry);
        assert_eq!(m.cost(Cell::new(0, 0), Cell::new(1, 1)), 4.0);
        assert_eq!(m.cost_function(), CostFunction::Entry);
    }

    #[test]
    fn exponential_cliff_saturates_instead_of_overflowing() {
        assert_eq!(CostFunction::Exponential.step_cost(0.0, 5000.0), MAX_STEP_COST);
        assert_eq!(CostFunction::Exponential.step_cost(5000.0, 0.0), 0.0);

        let cliff = GridMap::from_fn(2, 1, Cell::new(0, 0), Cell::new(1, 0), |c| f64::from(c.x) * 5000.0)
            .unwrap()
            .with_cost_function(CostFunction::Exponential);
        let res = crate::BestFirst::default().search(&cliff).unwrap();
        assert_eq!(res.path, Some(vec![Cell::new(0, 0), Cell::new(1, 0)]));
        assert!(res.cost.is_finite());
    }

    #[test]
    fn rejects_negative_or_nan_terrain() {
        let err = GridMap::from_fn(2, 2, Cell::new(0, 0), Cell::new(1, 1), |_| -1.0).unwrap_err();
        assert!(matches!(err, MapError::BadTerrain { .. }));
        let mut m = grid3();
        assert!(m.set_tile(Cell::new(1, 1), f64::NAN).is_err());
        m.set_tile(Cell::new(1, 1), 42.0).unwrap();
        assert_eq!(m.tile(1, 1), 42.0);
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let err = GridMap::new(2, 2, Cell::new(0, 0), Cell::new(2, 0)).unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds { which: "goal", .. }));
    }

    #[test]
    fn loads_map_file_json() {
        let v = json!({
            "start": { "x": 0, "y": 0 },
            "goal": { "x": 2, "y": 1 },
            "tiles": [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            "cost": "exponential",
            "blocked": [{ "x": 1, "y": 0 }]
        });
        let m = GridMap::from_json_str(&v.to_string()).unwrap();
        assert_eq!((m.width(), m.length()), (3, 2));
        assert_eq!(m.tile(2, 1), 6.0);
        assert_eq!(m.cost_function(), CostFunction::Exponential);
        assert!(m.is_blocked(Cell::new(1, 0)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let v = json!({
            "start": { "x": 0, "y": 0 },
            "goal": { "x": 0, "y": 1 },
            "tiles": [[1.0, 2.0], [3.0]]
        });
        let err = GridMap::from_json_str(&v.to_string()).unwrap_err();
        assert_eq!(err, MapError::RowWidth { row: 1, found: 1, width: 2 });
    }

    #[test]
    fn wide_single_row_keeps_its_width() {
        let width = 70_000;
        let file = MapFile {
            start: Cell::new(0, 0),
            goal: Cell::new(width - 1, 0),
            tiles: vec![vec![1.0; width as usize]],
            cost: CostFunction::Uniform,
            blocked: Vec::new(),
        };
        let m = GridMap::try_from(file).unwrap();
        assert_eq!((m.width(), m.length()), (width, 1));
    }

    #[test]
    fn empty_tiles_are_rejected() {
        let v = json!({ "start": { "x": 0, "y": 0 }, "goal": { "x": 0, "y": 0 }, "tiles": [] });
        let err = GridMap::from_json_str(&v.to_string()).unwrap_err();
        assert_eq!(err, MapError::Empty { width: 0, length: 0 });
    }
}
