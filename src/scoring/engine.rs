use super::config::ScoringConfig;
use crate::roster::Climb;

/// A sent climb together with the score it contributes
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredClimb {
    pub climb: Climb,
    pub effective_score: f64, // points + onsight bonus
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub total_score: f64,
    /// Counted climbs, best first
    pub best_climbs: Vec<ScoredClimb>,
}

impl ScoreResult {
    pub fn empty() -> Self {
        Self {
            total_score: 0.0,
            best_climbs: Vec::new(),
        }
    }

    /// "1000*, 900, 800" - points of each counted climb, onsights starred
    pub fn scored_climbs_label(&self) -> String {
        self.best_climbs
            .iter()
            .map(|s| s.climb.display_points())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Score of a single climb. Unsent climbs score nothing.
pub fn effective_score(climb: &Climb, onsight_bonus: f64) -> f64 {
    if !climb.sent {
        return 0.0;
    }
    climb.points + if climb.onsight { onsight_bonus } else { 0.0 }
}

/// Select a climber's `top_k` best sends and sum them.
///
/// Only sent climbs are considered. Each is worth its points plus
/// `onsight_bonus` when onsighted, and the bonus is part of the total. Climbs
/// with equal effective score keep their input order.
pub fn compute_score(climbs: &[Climb], onsight_bonus: f64, top_k: usize) -> ScoreResult {
    let mut scored: Vec<ScoredClimb> = climbs
        .iter()
        .filter(|c| c.sent)
        .map(|c| ScoredClimb {
            climb: c.clone(),
            effective_score: effective_score(c, onsight_bonus),
        })
        .collect();

    if scored.is_empty() {
        return ScoreResult::empty();
    }

    // Stable sort: ties keep feed order
    scored.sort_by(|a, b| b.effective_score.total_cmp(&a.effective_score));
    scored.truncate(top_k);

    let total_score = scored.iter().map(|s| s.effective_score).sum();

    ScoreResult {
        total_score,
        best_climbs: scored,
    }
}

/// `compute_score` with the configured bonus and climb count
pub fn calculate_score(climbs: &[Climb], config: &ScoringConfig) -> ScoreResult {
    compute_score(climbs, config.onsight_bonus(), config.top_climbs())
}

/// Round a total for display, half away from zero at 2 decimals
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(points: f64) -> Climb {
        Climb::new(format!("P{}", points), points, true, false)
    }

    fn onsight(points: f64) -> Climb {
        Climb::new(format!("P{}", points), points, true, true)
    }

    fn failed(points: f64) -> Climb {
        Climb::new(format!("P{}", points), points, false, false)
    }

    fn best_points(result: &ScoreResult) -> Vec<f64> {
        result.best_climbs.iter().map(|s| s.climb.points).collect()
    }

    #[test]
    fn test_empty_climbs() {
        let result = compute_score(&[], 0.1, 5);
        assert_eq!(result.total_score, 0.0);
        assert!(result.best_climbs.is_empty());
    }

    #[test]
    fn test_no_sent_climbs() {
        let climbs = vec![failed(1000.0), failed(900.0)];
        let result = compute_score(&climbs, 0.1, 5);
        assert_eq!(result, ScoreResult::empty());
    }

    #[test]
    fn test_top_five_of_six() {
        let climbs: Vec<Climb> = [1000.0, 900.0, 800.0, 700.0, 600.0, 500.0]
            .into_iter()
            .map(sent)
            .collect();
        let result = compute_score(&climbs, 0.1, 5);

        assert_eq!(best_points(&result), vec![1000.0, 900.0, 800.0, 700.0, 600.0]);
        assert_eq!(result.total_score, 4000.0);
        assert_eq!(result.scored_climbs_label(), "1000, 900, 800, 700, 600");
    }

    #[test]
    fn test_onsight_bonus_counts_toward_total() {
        let climbs = vec![
            onsight(1000.0),
            sent(900.0),
            sent(800.0),
            sent(700.0),
            sent(600.0),
            sent(500.0),
        ];
        let result = compute_score(&climbs, 0.1, 5);

        assert_eq!(result.best_climbs[0].effective_score, 1000.1);
        assert_eq!(round_score(result.total_score), 4000.1);
        assert_eq!(result.scored_climbs_label(), "1000*, 900, 800, 700, 600");
    }

    #[test]
    fn test_onsight_breaks_tie() {
        let climbs = vec![sent(700.0), onsight(700.0)];
        let result = compute_score(&climbs, 0.1, 1);
        assert!(result.best_climbs[0].climb.onsight);
        assert_eq!(result.total_score, 700.1);
    }

    #[test]
    fn test_unsent_climbs_excluded_even_when_higher() {
        let climbs = vec![failed(1000.0), sent(350.0)];
        let result = compute_score(&climbs, 0.1, 5);
        assert_eq!(best_points(&result), vec![350.0]);
        assert_eq!(result.total_score, 350.0);
    }

    #[test]
    fn test_fewer_sends_than_top_k() {
        let climbs = vec![sent(400.0), sent(600.0)];
        let result = compute_score(&climbs, 0.1, 5);
        assert_eq!(best_points(&result), vec![600.0, 400.0]);
        assert_eq!(result.total_score, 1000.0);
    }

    #[test]
    fn test_top_k_zero_counts_nothing() {
        let result = compute_score(&[sent(400.0)], 0.1, 0);
        assert_eq!(result, ScoreResult::empty());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let climbs = vec![
            Climb::new("first", 500.0, true, false),
            Climb::new("second", 500.0, true, false),
            Climb::new("third", 500.0, true, false),
        ];
        let result = compute_score(&climbs, 0.1, 2);
        let names: Vec<&str> = result.best_climbs.iter().map(|s| s.climb.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_custom_bonus() {
        let climbs = vec![onsight(100.0), sent(100.0)];
        let result = compute_score(&climbs, 50.0, 5);
        assert_eq!(result.total_score, 250.0);
    }

    #[test]
    fn test_calculate_score_uses_config() {
        let climbs: Vec<Climb> = [500.0, 400.0, 300.0].into_iter().map(sent).collect();
        let config = ScoringConfig::new(0.1, 2);
        let result = calculate_score(&climbs, &config);
        assert_eq!(result.total_score, 900.0);
    }

    #[test]
    fn test_effective_score_unsent() {
        assert_eq!(effective_score(&failed(800.0), 0.1), 0.0);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(4000.1000000000004), 4000.1);
        assert_eq!(round_score(12.3456), 12.35);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let climbs = vec![onsight(650.0), sent(900.0), failed(1000.0), sent(650.0)];
        assert_eq!(compute_score(&climbs, 0.1, 3), compute_score(&climbs, 0.1, 3));
    }
}
