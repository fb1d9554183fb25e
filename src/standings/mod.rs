pub mod filter;
pub mod types;

pub use filter::{compute_results, filter_results, score_climber, sort_results};
pub use types::{ClimberResult, Filters};
