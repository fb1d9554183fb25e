use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(bonus) = config.onsight_bonus {
        if !bonus.is_finite() {
            errors.push("scoring.onsight_bonus: must be a finite number".to_string());
        } else if bonus < 0.0 {
            errors.push("scoring.onsight_bonus: must be non-negative".to_string());
        }
    }

    if let Some(top) = config.top_climbs {
        if top == 0 {
            errors.push("scoring.top_climbs: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
