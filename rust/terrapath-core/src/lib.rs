//! Best-first route search over weighted terrain grids.
//!
//! One engine ([`BestFirst`]) drives four strategies: uniform-cost search and
//! three heuristic-guided variants that differ in estimator, weight and
//! whether explored cells may be expanded again.

pub mod engine;
pub mod errors;
pub mod map;
pub mod models;
pub mod options;
pub mod strategy;

pub use engine::{path_cost, BestFirst, Estimator, Frontier, LogBase, SearchContext};
pub use errors::{MapError, SearchError};
pub use map::{CostFunction, GridMap, MapFile, TerrainMap, MAX_STEP_COST};
pub use models::{Cell, SearchResult};
pub use options::{SearchPolicy, Strategy};
pub use strategy::PathStrategy;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
