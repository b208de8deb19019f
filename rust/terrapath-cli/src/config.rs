use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use terrapath_core::Strategy;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown log format '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub strategy: Strategy,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self { strategy: Strategy::UniformCost, log_format: LogFormat::Text }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Reads `TERRAPATH_STRATEGY` and `TERRAPATH_LOG_FORMAT` through `get`;
    /// unset keys keep their defaults, malformed values are errors.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(s) = get("TERRAPATH_STRATEGY") {
            cfg.strategy = s
                .parse::<Strategy>()
                .map_err(|e| anyhow!(e))
                .context("TERRAPATH_STRATEGY")?;
        }
        if let Some(s) = get("TERRAPATH_LOG_FORMAT") {
            cfg.log_format = s.parse().context("TERRAPATH_LOG_FORMAT")?;
        }
        Ok(cfg)
    }
}
