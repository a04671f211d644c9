pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{
    calculate_score, FactorContribution, ScoreBreakdown, ScoredEntry, Scorer, StandardScorer,
};
pub use validation::validate_scoring;
