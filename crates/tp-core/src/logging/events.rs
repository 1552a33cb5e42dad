//! Event names and pipeline stages carried on log records.
//!
//! Every record emitted by the analysis carries an `event` field drawn from
//! [`event_names`] and, where useful, a `stage` field.

use serde::{Deserialize, Serialize};

/// Stages of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ingest,
    Filter,
    Aggregate,
    Contributors,
    Trend,
    Significance,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Ingest => "ingest",
            Stage::Filter => "filter",
            Stage::Aggregate => "aggregate",
            Stage::Contributors => "contributors",
            Stage::Trend => "trend",
            Stage::Significance => "significance",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Ingest
    pub const INGEST_FINISHED: &str = "ingest.finished";

    // Population filters
    pub const CONTRIBUTORS_EXCLUDED: &str = "filter.contributors_excluded";
    pub const WEEKS_DROPPED: &str = "filter.weeks_dropped";

    // Aggregation
    pub const RECORDS_UNASSIGNED: &str = "aggregate.records_unassigned";
    pub const MONTH_DROPPED: &str = "aggregate.month_dropped";

    // Contributors
    pub const CONTRIBUTORS_RANKED: &str = "contributors.ranked";

    // Trend statistics
    pub const WEEKS_EXCLUDED: &str = "stats.weeks_excluded";
    pub const NOT_COMPUTABLE: &str = "stats.not_computable";

    // Significance
    pub const SMALL_GROUPS: &str = "significance.small_groups";
    pub const TEST_SKIPPED: &str = "significance.test_skipped";

    // Pipeline
    pub const ANALYSIS_FINISHED: &str = "analysis.finished";
}
