//! Engagement scoring for user activity records.
//!
//! Each raw entry is validated into an [`ActivityEntry`], scored by a
//! [`Scorer`] against a [`ScoringConfig`], and the [`Analyzer`] keeps the two
//! best entries per user. The [`pipeline`] module wraps that core with JSON
//! file input and atomic JSON output.
//!
//! ```
//! use engagement_score::{ActivityLog, Analyzer};
//! use serde_json::json;
//!
//! let log: ActivityLog = serde_json::from_value(json!({
//!     "user_123": [
//!         {"time_spent": 60, "liked": true, "shares": 5, "commented": true,
//!          "hashtags": ["python", "coding"]},
//!         {"time_spent": 45, "liked": false, "shares": 2, "commented": true,
//!          "hashtags": "javascript"}
//!     ]
//! })).unwrap();
//!
//! let results = Analyzer::default().process_user_data(&log);
//! assert_eq!(results[0].engagement_score, vec![44.19, 25.0]);
//! ```

pub mod activity;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scoring;

pub use activity::{validate_entry, ActivityEntry, ActivityLog};
pub use analyzer::{AnalysisReport, Analyzer, UserResult};
pub use error::{FileOperationError, ValidationError};
pub use pipeline::process_engagement_data;
pub use scoring::{calculate_score, ScoringConfig, Scorer, StandardScorer};
