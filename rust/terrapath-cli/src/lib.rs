pub mod config;
pub mod report;

pub use config::{Config, LogFormat};
pub use report::{load_map, run, RunReport, StrategyReport};
