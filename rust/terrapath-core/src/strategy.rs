//! The strategy contract handed to harnesses.

use crate::engine::BestFirst;
use crate::errors::SearchError;
use crate::map::TerrainMap;
use crate::models::{Cell, SearchResult};
use crate::options::Strategy;

pub trait PathStrategy {
    fn name(&self) -> &str;

    /// Runs the search and reports statistics. An unreachable goal is an
    /// `Ok` result with `path: None`.
    fn search(&self, map: &dyn TerrainMap) -> Result<SearchResult, SearchError>;

    /// Start-to-goal path; consecutive cells are neighbors per `map`.
    fn create_path(&self, map: &dyn TerrainMap) -> Result<Vec<Cell>, SearchError> {
        self.search(map)?
            .path
            .ok_or(SearchError::NoPath { start: map.start(), goal: map.goal() })
    }
}

impl PathStrategy for BestFirst {
    fn name(&self) -> &str {
        self.label()
    }

    fn search(&self, map: &dyn TerrainMap) -> Result<SearchResult, SearchError> {
        BestFirst::search(self, map)
    }
}

impl PathStrategy for Strategy {
    fn name(&self) -> &str {
        Strategy::name(*self)
    }

    fn search(&self, map: &dyn TerrainMap) -> Result<SearchResult, SearchError> {
        BestFirst::from(*self).search(map)
    }
}
