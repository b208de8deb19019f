use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::heuristics::{Estimator, LogBase};
use crate::errors::SearchError;

pub const EXPONENTIAL_WEIGHT: f64 = 0.65;
pub const LOG_DAMPED_WEIGHT: f64 = 1.0;
pub const HYBRID_WEIGHT: f64 = 0.45;

/// Configuration of the best-first engine: priority is
/// `cost + weight * estimator(current, neighbor)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub estimator: Estimator,
    pub weight: f64,
    /// Skip popped cells already explored. Without it a finalized cell is
    /// expanded again whenever a cheaper relaxation re-queues it.
    pub skip_explored: bool,
}

impl SearchPolicy {
    /// Rejects weights that would turn priority keys into NaN or reward
    /// larger estimates.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.weight.is_finite() && self.weight >= 0.0 {
            Ok(())
        } else {
            Err(SearchError::InvalidWeight { weight: self.weight })
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Strategy::UniformCost.policy()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Strategy {
    #[cfg_attr(feature = "clap", value(alias = "dijkstra", alias = "ucs"))]
    UniformCost,
    #[cfg_attr(feature = "clap", value(alias = "exp"))]
    ExponentialElevation,
    #[cfg_attr(feature = "clap", value(alias = "log"))]
    LogDamped,
    #[cfg_attr(feature = "clap", value(alias = "hybrid"))]
    HybridMax,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::UniformCost,
        Strategy::ExponentialElevation,
        Strategy::LogDamped,
        Strategy::HybridMax,
    ];

    pub fn policy(self) -> SearchPolicy {
        match self {
            Strategy::UniformCost => SearchPolicy {
                estimator: Estimator::Zero,
                weight: 0.0,
                skip_explored: true,
            },
            Strategy::ExponentialElevation => SearchPolicy {
                estimator: Estimator::ExponentialElevation,
                weight: EXPONENTIAL_WEIGHT,
                skip_explored: false,
            },
            Strategy::LogDamped => SearchPolicy {
                estimator: Estimator::LogDamped { base: LogBase::Binary },
                weight: LOG_DAMPED_WEIGHT,
                skip_explored: false,
            },
            Strategy::HybridMax => SearchPolicy {
                estimator: Estimator::HybridMax,
                weight: HYBRID_WEIGHT,
                skip_explored: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::UniformCost => "uniform-cost",
            Strategy::ExponentialElevation => "exponential-elevation",
            Strategy::LogDamped => "log-damped",
            Strategy::HybridMax => "hybrid-max",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == norm)
            .or(match norm.as_str() {
                "dijkstra" | "ucs" => Some(Strategy::UniformCost),
                "exp" => Some(Strategy::ExponentialElevation),
                "log" => Some(Strategy::LogDamped),
                "hybrid" => Some(Strategy::HybridMax),
                _ => None,
            })
            .ok_or_else(|| format!("unknown strategy '{s}'"))
    }
}
