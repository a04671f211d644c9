//! Per-user ranking of scored activity entries.

mod report;

pub use report::{round_to_cents, AnalysisReport, SkippedEntry, UserResult};

use crate::activity::{ActivityEntry, ActivityLog, UserActivity};
use crate::scoring::{ScoredEntry, Scorer, StandardScorer};

/// How many entries survive per user.
pub const TOP_ENTRIES_PER_USER: usize = 2;

/// Scores every user's entries and keeps the best ones.
///
/// Generic over the scoring strategy so alternative scorers plug in without
/// changes here.
#[derive(Debug, Clone)]
pub struct Analyzer<S> {
    scorer: S,
}

impl<S: Scorer> Analyzer<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Top entries per user, in input user order.
    ///
    /// Invalid entries are skipped with a warning; users left with nothing
    /// are omitted.
    pub fn process_user_data(&self, data: &ActivityLog) -> Vec<UserResult> {
        self.analyze(data).results
    }

    /// Like [`process_user_data`](Self::process_user_data), also reporting
    /// which entries were skipped.
    pub fn analyze(&self, data: &ActivityLog) -> AnalysisReport {
        let mut report = AnalysisReport::default();

        for user in data.iter() {
            report.users_seen += 1;
            let scored = self.score_user(user, &mut report.skipped);
            if let Some((result, entries)) = select_top(&user.user_id, scored) {
                report.results.push(result);
                report.top_entries.push(entries);
            }
        }

        report
    }

    fn score_user(&self, user: &UserActivity, skipped: &mut Vec<SkippedEntry>) -> Vec<ScoredEntry> {
        let mut scored = Vec::with_capacity(user.entries.len());

        for (index, raw) in user.entries.iter().enumerate() {
            match self.scorer.calculate_score(raw) {
                Ok(entry) => {
                    tracing::debug!(
                        user_id = %user.user_id,
                        index,
                        score = entry.engagement_score,
                        "scored entry"
                    );
                    scored.push(entry);
                }
                Err(reason) => {
                    tracing::warn!(
                        user_id = %user.user_id,
                        index,
                        "Skipping invalid entry for user {}: {}",
                        user.user_id,
                        reason
                    );
                    skipped.push(SkippedEntry {
                        user_id: user.user_id.clone(),
                        index,
                        reason,
                    });
                }
            }
        }

        scored
    }
}

impl Default for Analyzer<StandardScorer> {
    fn default() -> Self {
        Self::new(StandardScorer::default())
    }
}

/// Rank by score descending and keep the top entries.
///
/// `sort_by` is stable, so equal scores keep their input order.
fn select_top(
    user_id: &str,
    mut scored: Vec<ScoredEntry>,
) -> Option<(UserResult, Vec<ActivityEntry>)> {
    if scored.is_empty() {
        return None;
    }

    scored.sort_by(|a, b| b.engagement_score.total_cmp(&a.engagement_score));
    scored.truncate(TOP_ENTRIES_PER_USER);

    let hashtags = scored.iter().map(|s| s.entry.hashtags.clone()).collect();
    let (engagement_score, entries): (Vec<_>, Vec<_>) = scored
        .into_iter()
        .map(|s| (round_to_cents(s.engagement_score), s.entry))
        .unzip();

    let result = UserResult {
        user_id: user_id.to_string(),
        hashtags,
        engagement_score,
    };
    Some((result, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::scoring::ScoringConfig;
    use serde_json::{json, Value};

    fn entry(time_spent: f64, shares: i64, hashtag: &str) -> Value {
        json!({
            "time_spent": time_spent,
            "liked": false,
            "shares": shares,
            "commented": false,
            "hashtags": hashtag
        })
    }

    fn reference_log() -> ActivityLog {
        serde_json::from_value(json!({
            "user_123": [
                {
                    "time_spent": 60,
                    "liked": true,
                    "shares": 5,
                    "commented": true,
                    "hashtags": ["python", "coding"]
                },
                {
                    "time_spent": 45,
                    "liked": false,
                    "shares": 2,
                    "commented": true,
                    "hashtags": "javascript"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_reference_user() {
        let results = Analyzer::default().process_user_data(&reference_log());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user_id, "user_123");
        assert_eq!(results[0].engagement_score, vec![44.19, 25.0]);
        assert_eq!(
            results[0].hashtags,
            vec![vec![json!("python"), json!("coding")], vec![json!("javascript")]]
        );
    }

    #[test]
    fn test_keeps_only_top_two_descending() {
        let log: ActivityLog = vec![(
            "u",
            vec![
                entry(10.0, 0, "low"),
                entry(100.0, 0, "high"),
                entry(50.0, 0, "mid"),
            ],
        )]
        .into_iter()
        .collect();

        let results = Analyzer::default().process_user_data(&log);
        assert_eq!(results[0].hashtags, vec![vec![json!("high")], vec![json!("mid")]]);
        assert!(results[0].engagement_score[0] > results[0].engagement_score[1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let log: ActivityLog = vec![(
            "u",
            vec![
                entry(10.0, 0, "first"),
                entry(10.0, 0, "second"),
                entry(10.0, 0, "third"),
            ],
        )]
        .into_iter()
        .collect();

        let results = Analyzer::default().process_user_data(&log);
        assert_eq!(
            results[0].hashtags,
            vec![vec![json!("first")], vec![json!("second")]]
        );
    }

    #[test]
    fn test_single_valid_entry() {
        let log: ActivityLog = vec![("solo", vec![entry(20.0, 1, "one")])]
            .into_iter()
            .collect();

        let results = Analyzer::default().process_user_data(&log);
        assert_eq!(results[0].hashtags.len(), 1);
        assert_eq!(results[0].engagement_score.len(), 1);
    }

    #[test]
    fn test_all_invalid_user_omitted() {
        let log: ActivityLog = vec![
            ("bad", vec![json!({"time_spent": 1}), json!("junk")]),
            ("good", vec![entry(1.0, 0, "ok")]),
        ]
        .into_iter()
        .collect();

        let report = Analyzer::default().analyze(&log);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].user_id, "good");
        assert_eq!(report.users_seen, 2);
        assert_eq!(report.users_omitted(), 1);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_user_with_no_entries_omitted() {
        let log: ActivityLog = vec![("empty", vec![])].into_iter().collect();
        assert!(Analyzer::default().process_user_data(&log).is_empty());
    }

    #[test]
    fn test_invalid_entry_skipped_siblings_kept() {
        let mut missing = entry(30.0, 0, "broken");
        missing.as_object_mut().unwrap().remove("liked");
        let log: ActivityLog = vec![(
            "u",
            vec![entry(5.0, 0, "a"), missing, entry(8.0, 0, "b")],
        )]
        .into_iter()
        .collect();

        let report = Analyzer::default().analyze(&log);
        assert_eq!(report.results[0].hashtags, vec![vec![json!("b")], vec![json!("a")]]);
        assert_eq!(
            report.skipped,
            vec![SkippedEntry {
                user_id: "u".to_string(),
                index: 1,
                reason: ValidationError::MissingFields(vec!["liked"]),
            }]
        );
    }

    #[test]
    fn test_type_errors_skipped() {
        let mut float_shares = entry(30.0, 0, "float");
        float_shares["shares"] = json!(2.0);
        let mut string_time = entry(30.0, 0, "string");
        string_time["time_spent"] = json!("30");
        let log: ActivityLog = vec![("u", vec![float_shares, string_time])]
            .into_iter()
            .collect();

        let report = Analyzer::default().analyze(&log);
        assert!(report.results.is_empty());
        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                ValidationError::SharesNotInteger,
                ValidationError::TimeSpentNotNumeric
            ]
        );
    }

    #[test]
    fn test_output_follows_input_user_order() {
        let log: ActivityLog = serde_json::from_value(json!({
            "charlie": [entry(1.0, 0, "c")],
            "alice": [entry(90.0, 0, "a")],
            "bob": [entry(45.0, 0, "b")]
        }))
        .unwrap();

        let ids: Vec<String> = Analyzer::default()
            .process_user_data(&log)
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(ids, vec!["charlie", "alice", "bob"]);
    }

    #[test]
    fn test_rounding_matches_rescoring() {
        let log = reference_log();
        let config = ScoringConfig::default();
        let results = Analyzer::new(StandardScorer::new(config)).process_user_data(&log);

        let user = log.iter().next().unwrap();
        let mut rescored: Vec<f64> = user
            .entries
            .iter()
            .map(|e| crate::scoring::calculate_score(e, &config).unwrap())
            .map(round_to_cents)
            .collect();
        rescored.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(results[0].engagement_score, rescored);
    }

    #[test]
    fn test_half_cent_score_rounds_to_even() {
        let config = ScoringConfig {
            like_score: 0.0,
            ..ScoringConfig::default()
        };
        // 27 * 1.5 = 40.5 over a denominator of 400 is exactly 10.125
        let log: ActivityLog = vec![("u", vec![entry(27.0, 0, "tie")])]
            .into_iter()
            .collect();

        let results = Analyzer::new(StandardScorer::new(config)).process_user_data(&log);
        assert_eq!(results[0].engagement_score, vec![10.12]);
    }

    #[test]
    fn test_report_keeps_top_entries_in_rank_order() {
        let log: ActivityLog = vec![
            ("bad", vec![json!({"time_spent": 1})]),
            (
                "u",
                vec![entry(10.0, 0, "low"), entry(100.0, 1, "high"), entry(50.0, 0, "mid")],
            ),
        ]
        .into_iter()
        .collect();

        let report = Analyzer::default().analyze(&log);
        assert_eq!(report.top_entries.len(), report.results.len());

        let kept: Vec<(f64, i64)> = report.top_entries[0]
            .iter()
            .map(|e| (e.time_spent, e.shares))
            .collect();
        assert_eq!(kept, vec![(100.0, 1), (50.0, 0)]);
    }

    struct FlatScorer;

    impl Scorer for FlatScorer {
        fn calculate_score(&self, entry: &Value) -> Result<ScoredEntry, ValidationError> {
            let entry = crate::activity::validate_entry(entry)?;
            Ok(ScoredEntry {
                engagement_score: entry.shares as f64,
                entry,
            })
        }
    }

    #[test]
    fn test_custom_scorer_plugs_in() {
        let log: ActivityLog = vec![(
            "u",
            vec![entry(500.0, 1, "long"), entry(1.0, 9, "shared")],
        )]
        .into_iter()
        .collect();

        let results = Analyzer::new(FlatScorer).process_user_data(&log);
        assert_eq!(results[0].engagement_score, vec![9.0, 1.0]);
        assert_eq!(results[0].hashtags[0], vec![json!("shared")]);
    }
}
