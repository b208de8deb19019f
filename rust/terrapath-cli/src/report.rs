use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use terrapath_core::{Cell, GridMap, PathStrategy, SearchError, TerrainMap};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Goal entry of the cost table; differs from `cost` only after re-expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    pub expanded: u64,
    pub pushed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Cell>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub width: u32,
    pub length: u32,
    pub start: Cell,
    pub goal: Cell,
    pub results: Vec<StrategyReport>,
}

pub fn load_map(path: &Path) -> anyhow::Result<GridMap> {
    let text = fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?;
    let map = GridMap::from_json_str(&text).with_context(|| format!("parsing map {}", path.display()))?;
    info!(path = %path.display(), width = map.width(), length = map.length(), "map loaded");
    Ok(map)
}

/// Runs each planner on `map` in order. Unreachable goals are reported as
/// `found: false`; invalid maps abort the run.
pub fn run(map: &GridMap, planners: &[&dyn PathStrategy], include_path: bool) -> Result<RunReport, SearchError> {
    let mut results = Vec::with_capacity(planners.len());
    for p in planners {
        let res = p.search(map)?;
        info!(strategy = p.name(), found = res.found(), cost = res.cost, expanded = res.expanded, "strategy finished");
        results.push(StrategyReport {
            strategy: p.name().to_string(),
            found: res.found(),
            cost: res.found().then_some(res.cost),
            table_cost: res.found().then_some(res.table_cost),
            steps: res.path.as_ref().map(|cells| cells.len() - 1),
            expanded: res.expanded,
            pushed: res.pushed,
            path: if include_path { res.path } else { None },
        });
    }
    Ok(RunReport { width: map.width(), length: map.length(), start: map.start(), goal: map.goal(), results })
}
