use tracing::{debug, trace, warn};

use crate::errors::SearchError;
use crate::map::{validate, TerrainMap};
use crate::models::{Cell, SearchResult};
use crate::options::{SearchPolicy, Strategy};

use super::context::SearchContext;
use super::frontier::{Entry, Frontier};

const COST_TOLERANCE: f64 = 1e-9;

/// Generalized best-first search. Every strategy is one [`SearchPolicy`] run
/// through the same loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestFirst {
    label: &'static str,
    policy: SearchPolicy,
}

impl BestFirst {
    /// Builds a custom policy. The weight must be finite and non-negative.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self { label: "custom", policy })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    pub fn search<M: TerrainMap + ?Sized>(&self, map: &M) -> Result<SearchResult, SearchError> {
        validate(map)?;
        let start = map.start();
        let goal = map.goal();
        let SearchPolicy { estimator, weight, skip_explored } = self.policy;
        debug!(strategy = self.label, %start, %goal, width = map.width(), length = map.length(), "search start");

        let mut ctx = SearchContext::new(map.width(), map.length());
        let mut open = Frontier::with_capacity(map.cell_count().min(1 << 16));
        ctx.set_cost(start, 0.0);
        open.push(start, 0.0);

        let mut expanded: u64 = 0;
        let mut reached = false;
        while let Some(Entry { cell: v, priority, .. }) = open.pop() {
            if skip_explored && ctx.is_explored(v) {
                trace!(cell = %v, priority, "skip stale entry");
                continue;
            }
            ctx.mark_explored(v);
            expanded += 1;
            if v == goal {
                reached = true;
                break;
            }

            let gv = ctx.cost(v);
            for n in map.neighbors(v) {
                if !map.contains(n) {
                    continue;
                }
                let alt = gv + map.cost(v, n);
                if alt < ctx.cost(n) {
                    ctx.set_cost(n, alt);
                    ctx.set_parent(n, v);
                    let key = if weight == 0.0 { alt } else { alt + weight * estimator.estimate(map, v, n) };
                    trace!(from = %v, to = %n, cost = alt, key, "relax");
                    open.push(n, key);
                }
            }
        }

        if !reached {
            debug!(strategy = self.label, expanded, pushed = open.pushed(), "frontier exhausted, no path");
            return Ok(SearchResult::unreachable(expanded, open.pushed()));
        }

        let path = match ctx.reconstruct(start, goal) {
            Ok(p) => p,
            Err(e) => {
                warn!(strategy = self.label, error = %e, "path reconstruction failed");
                return Err(e);
            }
        };
        let cost = path_cost(map, &path);
        let table_cost = ctx.cost(goal);
        if (table_cost - cost).abs() > COST_TOLERANCE {
            warn!(strategy = self.label, cost, table_cost, "path cost differs from cost table");
        }
        debug!(
            strategy = self.label,
            expanded,
            pushed = open.pushed(),
            explored = ctx.explored_count(),
            steps = path.len() - 1,
            cost,
            "search finished"
        );
        Ok(SearchResult { path: Some(path), cost, table_cost, expanded, pushed: open.pushed() })
    }
}

impl Default for BestFirst {
    fn default() -> Self {
        Strategy::UniformCost.into()
    }
}

impl From<Strategy> for BestFirst {
    fn from(s: Strategy) -> Self {
        Self { label: s.name(), policy: s.policy() }
    }
}

/// Sum of edge costs between consecutive cells.
pub fn path_cost<M: TerrainMap + ?Sized>(map: &M, path: &[Cell]) -> f64 {
    path.windows(2).map(|w| map.cost(w[0], w[1])).sum()
}
