//! Analysis configuration types.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default co-author trailer marking an assisted pull request.
pub const DEFAULT_COAUTHOR_PATTERN: &str = r"(?i)Co-authored-by:.*[Oo]na.*@ona\.com";

/// Default login prefix of assistant-authored pull requests.
pub const DEFAULT_LOGIN_PREFIX: &str = "ona-";

/// Default title pattern marking a revert.
pub const DEFAULT_REVERT_PATTERN: &str =
    r"(?i)\b(revert|reverting|rollback|roll\s+back|rolled\s+back)\b";

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of full weeks to analyze, ending before the current week.
    pub weeks: u32,

    /// Positional trend window as a percentage of the valid periods (1-49).
    pub window_pct: u32,

    /// When set, compare periods below vs at/above this assisted percentage
    /// instead of first vs last window.
    pub assisted_threshold: Option<f64>,

    /// Number of top contributors to report. 0 disables the breakdown.
    pub top_contributors: usize,

    /// Drop weeks with fewer merged PRs than this. 0 disables the filter.
    pub min_prs_per_week: u32,

    /// Drop the bottom N% of contributors by PR count (0-99).
    pub exclude_bottom_contributor_pct: u32,

    /// Aggregation period for trend rows.
    pub period: Period,

    /// Author logins excluded from ingestion (case-insensitive).
    pub exclude_authors: Vec<String>,

    /// How assisted pull requests are recognized.
    pub assist: AssistRules,

    /// Title pattern marking a revert.
    pub revert_pattern: String,

    /// Periods below this percentage of the mean active-period PR count are
    /// left out of trend analysis.
    pub activity_floor_pct: f64,

    /// Fewest periods that must survive the activity floor.
    pub min_weeks: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weeks: 12,
            window_pct: 10,
            assisted_threshold: None,
            top_contributors: 10,
            min_prs_per_week: 0,
            exclude_bottom_contributor_pct: 0,
            period: Period::Week,
            exclude_authors: vec!["dependabot[bot]".to_string(), "renovate[bot]".to_string()],
            assist: AssistRules::default(),
            revert_pattern: DEFAULT_REVERT_PATTERN.to_string(),
            activity_floor_pct: 10.0,
            min_weeks: 4,
        }
    }
}

impl AnalysisConfig {
    /// Whether trend rows split by the assisted threshold.
    pub fn uses_threshold(&self) -> bool {
        self.assisted_threshold.is_some()
    }
}

/// Rules for flagging a pull request as assisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssistRules {
    /// Regex matched against every commit message.
    pub coauthor_pattern: String,
    /// Author login prefix (lower-case).
    pub login_prefix: String,
}

impl Default for AssistRules {
    fn default() -> Self {
        Self {
            coauthor_pattern: DEFAULT_COAUTHOR_PATTERN.to_string(),
            login_prefix: DEFAULT_LOGIN_PREFIX.to_string(),
        }
    }
}

/// Aggregation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    /// Short unit used in window labels.
    pub fn abbrev(self) -> &'static str {
        match self {
            Period::Week => "w",
            Period::Month => "mo",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.weeks, 12);
        assert_eq!(cfg.window_pct, 10);
        assert_eq!(cfg.top_contributors, 10);
        assert_eq!(cfg.min_weeks, 4);
        assert_eq!(cfg.period, Period::Week);
        assert!(!cfg.uses_threshold());
        assert!(cfg.exclude_authors.contains(&"dependabot[bot]".to_string()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"window_pct": 25, "period": "month"}"#).unwrap();
        assert_eq!(cfg.window_pct, 25);
        assert_eq!(cfg.period, Period::Month);
        assert_eq!(cfg.assist, AssistRules::default());
        assert_eq!(cfg.activity_floor_pct, 10.0);
    }

    #[test]
    fn period_abbreviations() {
        assert_eq!(Period::Week.abbrev(), "w");
        assert_eq!(Period::Month.abbrev(), "mo");
        assert_eq!(Period::Month.to_string(), "month");
    }
}
