use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::analyzer::{AnalysisReport, SkippedEntry, UserResult};
use crate::scoring::{ScoreBreakdown, ScoringConfig};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals ("44.19", "25.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format one entry's hashtags as "#python #coding"
/// Non-string elements are shown as their JSON text.
pub fn format_hashtags(tags: &[Value]) -> String {
    if tags.is_empty() {
        return "(no hashtags)".to_string();
    }

    tags.iter()
        .map(|tag| match tag {
            Value::String(s) => format!("#{}", s),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line run summary
pub fn format_summary(report: &AnalysisReport, use_colors: bool) -> String {
    let users = format!("{} of {} users", report.results.len(), report.users_seen);
    let skipped = match report.skipped.len() {
        0 => String::new(),
        1 => ", 1 invalid entry skipped".to_string(),
        n => format!(", {} invalid entries skipped", n),
    };

    if use_colors {
        format!("Scored {}{}", users.bold(), skipped.yellow())
    } else {
        format!("Scored {}{}", users, skipped)
    }
}

/// Format results as an indexed table, one line per kept entry
/// The user id is only printed on the user's first line.
pub fn format_results_table(results: &[UserResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No users with valid entries.".to_string();
    }

    let id_width = results
        .iter()
        .map(|r| r.user_id.chars().count())
        .max()
        .unwrap_or(0);
    let score_width = 7;

    let mut lines = Vec::new();
    for (idx, result) in results.iter().enumerate() {
        let rows = result.engagement_score.iter().zip(&result.hashtags);
        for (rank, (score, tags)) in rows.enumerate() {
            let index_str = if rank == 0 {
                format!("{:>3}.", idx + 1)
            } else {
                "    ".to_string()
            };
            let user = if rank == 0 { result.user_id.as_str() } else { "" };
            let user_padded = format!("{:<width$}", user, width = id_width);
            let score_padded = format!("{:>width$}", format_score(*score), width = score_width);
            let tags = format_hashtags(tags);

            let line = if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    user_padded.cyan(),
                    score_padded.bold(),
                    tags
                )
            } else {
                format!("{} {}  {}  {}", index_str, user_padded, score_padded, tags)
            };
            lines.push(line.trim_end().to_string());
        }
    }
    lines.join("\n")
}

/// Describe skipped entries, one per line (for verbose mode)
pub fn format_skipped(skipped: &[SkippedEntry]) -> String {
    skipped
        .iter()
        .map(|s| format!("  {} entry #{}: {}", s.user_id, s.index + 1, s.reason))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show how one entry's score was built:
/// "Time 90.00 + Like 30.00 + Shares 50.00 + Comment 20.00 = 190.00 / 430.00 -> 44.19"
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let factors = breakdown
        .factors
        .iter()
        .map(|f| format!("{} {}", f.label, format_score(f.points)))
        .collect::<Vec<_>>()
        .join(" + ");
    let ratio = format!(
        "= {} / {} ->",
        format_score(breakdown.raw_score),
        format_score(breakdown.max_possible_score)
    );
    let score = format_score(breakdown.score);

    if use_colors {
        format!("{} {} {}", factors, ratio.dimmed(), score.bold())
    } else {
        format!("{} {} {}", factors, ratio, score)
    }
}

/// Format the effective scoring weights
pub fn format_scoring_config(config: &ScoringConfig, use_colors: bool) -> String {
    let rows = [
        ("max_time", config.max_time.to_string()),
        ("time_weight", config.time_weight.to_string()),
        ("like_score", config.like_score.to_string()),
        ("share_score", config.share_score.to_string()),
        ("comment_score", config.comment_score.to_string()),
        ("max_possible_score", config.max_possible_score().to_string()),
    ];

    rows.iter()
        .map(|(name, value)| {
            if use_colors {
                format!("{}{}", format!("{:<20}", name).dimmed(), value.bold())
            } else {
                format!("{:<20}{}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
