//! Throughput Core Library
//!
//! Turns merged pull-request records into time-bucketed statistics and
//! tests whether assisted co-authorship tracks changes in them:
//! - Week range construction and record ingestion
//! - Weekly and monthly aggregation
//! - Per-contributor before/after comparison
//! - Trend windows with Pearson and Mann-Whitney significance
//!
//! Everything here is pure and synchronous; acquisition and rendering live
//! elsewhere.

pub mod contributors;
pub mod error;
pub mod filters;
pub mod ingest;
pub mod logging;
pub mod metric;
pub mod monthly;
pub mod pipeline;
pub mod rows;
pub mod schema;
pub mod trend;
pub mod weekly;
pub mod weeks;

#[cfg(test)]
mod test_utils;

pub use contributors::{top_contributors, ContributorStat};
pub use error::NotComputable;
pub use filters::{drop_low_activity_weeks, exclude_bottom_contributors, ContributorFilter};
pub use ingest::{ingest, IngestRules, RawCommit, RawPullRequest};
pub use metric::{Metric, PeriodStats};
pub use monthly::{aggregate_monthly, MonthGroup};
pub use pipeline::{analyze, ThroughputReport};
pub use rows::{build_rows, ConsolidatedRow, Significance, SkippedMetric, TrendRows};
pub use trend::{
    apply_activity_filter, compute_window, ActivePeriods, PctChange, TrendWindow, WindowMode,
};
pub use weekly::{aggregate_weekly, assign_week, DurationSummary, WeekStat};
pub use weeks::compute_week_ranges;
