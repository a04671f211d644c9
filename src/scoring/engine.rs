use serde::Serialize;
use serde_json::Value;

use super::config::ScoringConfig;
use crate::activity::{validate_entry, ActivityEntry};
use crate::error::ValidationError;

/// A scoring strategy for raw activity entries.
///
/// Implementations validate the entry themselves; callers hand over the raw
/// record and get back either the normalized entry with its score or the
/// reason it was rejected.
///
/// Scores are percentages of a fixed denominator and are not clamped, so
/// values above 100 are legitimate.
pub trait Scorer {
    fn calculate_score(&self, entry: &Value) -> Result<ScoredEntry, ValidationError>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn calculate_score(&self, entry: &Value) -> Result<ScoredEntry, ValidationError> {
        (**self).calculate_score(entry)
    }
}

/// A normalized entry together with its unrounded score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: ActivityEntry,
    pub engagement_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: &'static str, // "Time", "Like", "Shares", "Comment"
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    pub raw_score: f64,
    pub max_possible_score: f64,
    pub score: f64,
}

/// Weighted-sum scorer normalized against [`ScoringConfig::max_possible_score`].
#[derive(Debug, Clone)]
pub struct StandardScorer {
    config: ScoringConfig,
}

impl StandardScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score an already-normalized entry, keeping each weighted component.
    pub fn breakdown(&self, entry: &ActivityEntry) -> ScoreBreakdown {
        let config = &self.config;
        let time = entry.time_spent * config.time_weight;
        let like = if entry.liked { config.like_score } else { 0.0 };
        let shares = entry.shares as f64 * config.share_score;
        let comment = if entry.commented {
            config.comment_score
        } else {
            0.0
        };

        let raw_score = time + like + shares + comment;
        let max_possible_score = config.max_possible_score();

        ScoreBreakdown {
            factors: vec![
                FactorContribution { label: "Time", points: time },
                FactorContribution { label: "Like", points: like },
                FactorContribution { label: "Shares", points: shares },
                FactorContribution { label: "Comment", points: comment },
            ],
            raw_score,
            max_possible_score,
            score: (raw_score / max_possible_score) * 100.0,
        }
    }
}

impl Default for StandardScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Scorer for StandardScorer {
    fn calculate_score(&self, entry: &Value) -> Result<ScoredEntry, ValidationError> {
        let entry = validate_entry(entry)?;
        let engagement_score = self.breakdown(&entry).score;
        Ok(ScoredEntry {
            entry,
            engagement_score,
        })
    }
}

/// Score one raw entry with the standard weighting.
///
/// Fails only when the entry does not validate. The result is not rounded and
/// may exceed 100 (more than 20 shares, or `time_spent` above `max_time`).
pub fn calculate_score(entry: &Value, config: &ScoringConfig) -> Result<f64, ValidationError> {
    let entry = validate_entry(entry)?;
    Ok(StandardScorer::new(*config).breakdown(&entry).score)
}
