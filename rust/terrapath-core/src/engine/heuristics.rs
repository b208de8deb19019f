//! Remaining-cost estimators.
//!
//! Each estimator is a pure function of the expanding cell, the neighbor being
//! relaxed and the map, and never returns a negative value. Both singular
//! points (zero distance to the goal, terrain below 1 under a logarithm) are
//! guarded here so the search loop never sees a NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::map::TerrainMap;
use crate::models::Cell;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogBase {
    #[default]
    Binary,
    Natural,
}

impl LogBase {
    #[inline]
    pub fn log(self, v: f64) -> f64 {
        match self {
            LogBase::Binary => v.log2(),
            LogBase::Natural => v.ln(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Estimator {
    /// Always 0: the search degrades to uniform-cost.
    #[default]
    Zero,
    ExponentialElevation,
    LogDamped {
        #[serde(default)]
        base: LogBase,
    },
    /// `max(exponential-elevation, log-damped with natural log)`.
    HybridMax,
}

impl Estimator {
    pub fn estimate<M: TerrainMap + ?Sized>(self, map: &M, current: Cell, neighbor: Cell) -> f64 {
        match self {
            Estimator::Zero => 0.0,
            Estimator::ExponentialElevation => exponential_elevation(map, neighbor),
            Estimator::LogDamped { base } => log_damped(map, current, neighbor, base),
            Estimator::HybridMax => hybrid_max(map, current, neighbor),
        }
    }
}

/// Penalizes climbing toward the goal's elevation more steeply than
/// descending to it. Zero at the goal itself.
pub fn exponential_elevation<M: TerrainMap + ?Sized>(map: &M, neighbor: Cell) -> f64 {
    let goal = map.goal();
    let h0 = map.tile(neighbor.x, neighbor.y);
    let h1 = map.tile(goal.x, goal.y);
    let hdif = (h1 - h0).abs();
    let dist = f64::from(neighbor.chebyshev(goal));
    if dist == 0.0 {
        return 0.0;
    }
    if h0 < h1 {
        2.0 * hdif + (dist - hdif).max(0.0)
    } else if h0 > h1 {
        2f64.powf(hdif / dist) * dist
    } else {
        dist
    }
}

/// Chebyshev distance discounted by `floor(log(terrain))`, halved.
pub fn log_damped<M: TerrainMap + ?Sized>(map: &M, _current: Cell, neighbor: Cell, base: LogBase) -> f64 {
    let h0 = map.tile(neighbor.x, neighbor.y).max(1.0);
    let lh = base.log(h0).floor();
    let cd = f64::from(neighbor.chebyshev(map.goal()));
    ((cd - lh) / 2.0).max(0.0)
}

pub fn hybrid_max<M: TerrainMap + ?Sized>(map: &M, current: Cell, neighbor: Cell) -> f64 {
    let h = exponential_elevation(map, neighbor);
    let h2 = log_damped(map, current, neighbor, LogBase::Natural);
    h.max(h2)
}
