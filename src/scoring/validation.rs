use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = [
        ("like_score", config.like_score),
        ("share_score", config.share_score),
        ("comment_score", config.comment_score),
        ("time_weight", config.time_weight),
    ];
    for (name, value) in weights {
        if !value.is_finite() {
            errors.push(format!("scoring.{}: must be a finite number", name));
        } else if value < 0.0 {
            errors.push(format!("scoring.{}: must be non-negative", name));
        }
    }

    // Only meaningful once every weight is usable
    if errors.is_empty() {
        let max = config.max_possible_score();
        if !max.is_finite() {
            errors.push("scoring: max possible score overflows".to_string());
        } else if max <= 0.0 {
            errors.push(
                "scoring: max possible score must be positive (all weights are zero)".to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
