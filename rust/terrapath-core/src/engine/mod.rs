pub mod context;
pub mod frontier;
pub mod heuristics;
pub mod search;

pub use context::SearchContext;
pub use frontier::{Entry, Frontier};
pub use heuristics::{Estimator, LogBase};
pub use search::{path_cost, BestFirst};
