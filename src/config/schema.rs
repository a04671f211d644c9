use serde::{Deserialize, Serialize};

use crate::scoring::{ScoringConfig, ScoringOverrides};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringOverrides>,
}

impl Config {
    /// Effective scoring weights: defaults, then this file, then `cli`.
    pub fn scoring_config(&self, cli: &ScoringOverrides) -> ScoringConfig {
        let file = self.scoring.clone().unwrap_or_default();
        ScoringConfig::default().with_overrides(&file.merge(cli))
    }
}
