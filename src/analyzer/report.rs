use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::activity::ActivityEntry;
use crate::error::ValidationError;

/// Top entries kept for one user.
///
/// `hashtags` and `engagement_score` are parallel, best entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResult {
    pub user_id: String,
    pub hashtags: Vec<Vec<Value>>,
    pub engagement_score: Vec<f64>,
}

/// An entry dropped during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub user_id: String,
    /// Position in the user's entry list.
    pub index: usize,
    pub reason: ValidationError,
}

/// Everything one analysis pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub results: Vec<UserResult>,
    /// Normalized kept entries, parallel to `results`.
    pub top_entries: Vec<Vec<ActivityEntry>>,
    pub skipped: Vec<SkippedEntry>,
    pub users_seen: usize,
}

impl AnalysisReport {
    /// Users present in the input that produced no result.
    pub fn users_omitted(&self) -> usize {
        self.users_seen - self.results.len()
    }
}

/// Round to two decimal places, ties to even.
///
/// Ties are judged on the exact binary value of `score`, so 10.125 rounds
/// down to 10.12 while 2.675 (stored just below) also rounds down to 2.67.
pub fn round_to_cents(score: f64) -> f64 {
    let scaled = score * 100.0;
    let cents = if scaled.fract().abs() == 0.5 {
        // the product may itself have been rounded onto the half
        let residual = score.mul_add(100.0, -scaled);
        if residual > 0.0 {
            scaled.ceil()
        } else if residual < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };
    cents / 100.0
}
