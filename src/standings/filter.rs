use std::cmp::Ordering;

use super::types::{ClimberResult, Filters};
use crate::roster::{normalize_category, normalize_gender, Climber, ClimberMap};
use crate::scoring::{calculate_score, round_score, ScoringConfig};

/// Score a single climber into a display row
pub fn score_climber(climber: &Climber, scoring: &ScoringConfig) -> ClimberResult {
    let result = calculate_score(&climber.climbs, scoring);
    ClimberResult {
        climber_name: climber.full_name(),
        score: round_score(result.total_score),
        num_climbs: result.best_climbs.len(),
        gender: normalize_gender(&climber.gender),
        category: normalize_category(&climber.category),
        scored_climbs: result.scored_climbs_label(),
    }
}

/// Keep only results matching the selection
pub fn filter_results(results: Vec<ClimberResult>, filters: &Filters) -> Vec<ClimberResult> {
    results.into_iter().filter(|r| filters.matches(r)).collect()
}

/// Sort by score descending. The sort is stable, so equal scores keep the
/// order they came in (climber name order when fed from a `ClimberMap`).
pub fn sort_results(results: &mut [ClimberResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Score every climber, apply the filters, and rank what is left.
///
/// A fresh vector is built on every call; an empty result is a valid outcome.
pub fn compute_results(
    climbers: &ClimberMap,
    filters: &Filters,
    scoring: &ScoringConfig,
) -> Vec<ClimberResult> {
    let all: Vec<ClimberResult> = climbers
        .values()
        .map(|climber| score_climber(climber, scoring))
        .collect();

    let mut results = filter_results(all, filters);
    sort_results(&mut results);
    results
}
