pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, compute_score, effective_score, round_score, ScoreResult, ScoredClimb};
pub use validation::validate_scoring;
