use serde::{Deserialize, Serialize};

/// Bonus added to an onsighted climb. Small enough that it only breaks ties
/// between problems of equal value.
pub const DEFAULT_ONSIGHT_BONUS: f64 = 0.1;

/// Number of sent climbs that count toward a climber's total.
pub const DEFAULT_TOP_CLIMBS: usize = 5;

/// Scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   onsight_bonus: 0.1
///   top_climbs: 5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points added to each onsighted climb (default: 0.1)
    #[serde(default)]
    pub onsight_bonus: Option<f64>,

    /// How many of a climber's best sends are summed (default: 5)
    #[serde(default)]
    pub top_climbs: Option<usize>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            onsight_bonus: Some(DEFAULT_ONSIGHT_BONUS),
            top_climbs: Some(DEFAULT_TOP_CLIMBS),
        }
    }
}

impl ScoringConfig {
    pub fn new(onsight_bonus: f64, top_climbs: usize) -> Self {
        Self {
            onsight_bonus: Some(onsight_bonus),
            top_climbs: Some(top_climbs),
        }
    }

    pub fn onsight_bonus(&self) -> f64 {
        self.onsight_bonus.unwrap_or(DEFAULT_ONSIGHT_BONUS)
    }

    pub fn top_climbs(&self) -> usize {
        self.top_climbs.unwrap_or(DEFAULT_TOP_CLIMBS)
    }

    /// Apply command-line overrides on top of the configured values
    pub fn with_overrides(mut self, onsight_bonus: Option<f64>, top_climbs: Option<usize>) -> Self {
        if onsight_bonus.is_some() {
            self.onsight_bonus = onsight_bonus;
        }
        if top_climbs.is_some() {
            self.top_climbs = top_climbs;
        }
        self
    }
}
