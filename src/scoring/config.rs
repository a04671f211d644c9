use serde::{Deserialize, Serialize};

/// Share count the normalization denominator is sized for.
///
/// Entries with more shares than this score above 100.
pub const MAX_MEANINGFUL_SHARES: f64 = 20.0;

/// Weights used to turn an activity entry into an engagement score.
///
/// Built once per run and shared by reference with every scorer call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringConfig {
    /// Reference ceiling for time spent. Used only to size the denominator,
    /// longer sessions are not clamped.
    pub max_time: u64,
    pub like_score: f64,
    pub share_score: f64,
    pub comment_score: f64,
    pub time_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_time: 120,
            like_score: 30.0,
            share_score: 10.0,
            comment_score: 20.0,
            time_weight: 1.5,
        }
    }
}

impl ScoringConfig {
    /// Fixed denominator for normalization:
    /// `max_time * time_weight + like_score + 20 * share_score + comment_score`.
    pub fn max_possible_score(&self) -> f64 {
        self.max_time as f64 * self.time_weight
            + self.like_score
            + MAX_MEANINGFUL_SHARES * self.share_score
            + self.comment_score
    }

    /// Return a copy with every field that is set in `overrides` replaced.
    pub fn with_overrides(mut self, overrides: &ScoringOverrides) -> Self {
        if let Some(max_time) = overrides.max_time {
            self.max_time = max_time;
        }
        if let Some(like_score) = overrides.like_score {
            self.like_score = like_score;
        }
        if let Some(share_score) = overrides.share_score {
            self.share_score = share_score;
        }
        if let Some(comment_score) = overrides.comment_score {
            self.comment_score = comment_score;
        }
        if let Some(time_weight) = overrides.time_weight {
            self.time_weight = time_weight;
        }
        self
    }
}

/// Optional replacements for scoring weights.
///
/// This is the `scoring` section of the config file and the shape CLI flags
/// are collected into. Unset fields keep whatever the layer below provides.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   max_time: 90
///   share_score: 12.5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_weight: Option<f64>,
}

impl ScoringOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(&self, other: &ScoringOverrides) -> ScoringOverrides {
        ScoringOverrides {
            max_time: other.max_time.or(self.max_time),
            like_score: other.like_score.or(self.like_score),
            share_score: other.share_score.or(self.share_score),
            comment_score: other.comment_score.or(self.comment_score),
            time_weight: other.time_weight.or(self.time_weight),
        }
    }
}

impl From<&ScoringConfig> for ScoringOverrides {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            max_time: Some(config.max_time),
            like_score: Some(config.like_score),
            share_score: Some(config.share_score),
            comment_score: Some(config.comment_score),
            time_weight: Some(config.time_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.max_time, 120);
        assert_eq!(config.like_score, 30.0);
        assert_eq!(config.share_score, 10.0);
        assert_eq!(config.comment_score, 20.0);
        assert_eq!(config.time_weight, 1.5);
    }

    #[test]
    fn test_default_max_possible_score() {
        // 120*1.5 + 30 + 20*10 + 20
        assert_eq!(ScoringConfig::default().max_possible_score(), 430.0);
    }

    #[test]
    fn test_overrides_replace_only_set_fields() {
        let overrides = ScoringOverrides {
            max_time: Some(60),
            share_score: Some(5.0),
            ..Default::default()
        };
        let config = ScoringConfig::default().with_overrides(&overrides);

        assert_eq!(config.max_time, 60);
        assert_eq!(config.share_score, 5.0);
        assert_eq!(config.like_score, 30.0);
        assert_eq!(config.comment_score, 20.0);
        assert_eq!(config.time_weight, 1.5);
        // 60*1.5 + 30 + 20*5 + 20
        assert_eq!(config.max_possible_score(), 240.0);
    }

    #[test]
    fn test_merge_prefers_upper_layer() {
        let file = ScoringOverrides {
            max_time: Some(90),
            like_score: Some(10.0),
            ..Default::default()
        };
        let cli = ScoringOverrides {
            like_score: Some(40.0),
            ..Default::default()
        };
        let merged = file.merge(&cli);

        assert_eq!(merged.max_time, Some(90));
        assert_eq!(merged.like_score, Some(40.0));
        assert!(merged.time_weight.is_none());
    }

    #[test]
    fn test_empty_overrides() {
        assert!(ScoringOverrides::default().is_empty());
        let config = ScoringConfig::default();
        assert_eq!(config.with_overrides(&ScoringOverrides::default()), config);
    }

    #[test]
    fn test_scoring_overrides_serde_roundtrip() {
        let overrides = ScoringOverrides::from(&ScoringConfig::default());
        let yaml = serde_saphyr::to_string(&overrides).unwrap();
        let parsed: ScoringOverrides = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(overrides, parsed);
    }

    #[test]
    fn test_partial_overrides_parse() {
        let yaml = r#"
max_time: 90
time_weight: 2.0
"#;
        let overrides: ScoringOverrides = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(overrides.max_time, Some(90));
        assert_eq!(overrides.time_weight, Some(2.0));
        assert!(overrides.like_score.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "base_score: 100\n";
        let result: Result<ScoringOverrides, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
