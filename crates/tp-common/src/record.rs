//! Merged pull-request records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One qualifying merged pull request.
///
/// Records are produced by ingestion and never mutated afterwards.
/// Duration facts are `None` when the source did not provide enough
/// timeline events to compute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    /// Pull request number.
    pub number: u64,
    /// Merge timestamp (UTC).
    pub merged_at: DateTime<Utc>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Author login, lower-cased.
    pub author: String,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
    /// Files changed.
    pub changed_files: u64,
    /// Whether the assistive co-authorship signal was present.
    pub assisted: bool,
    /// Whether the title marks this as a revert.
    pub revert: bool,
    /// First commit to ready-for-review, in hours.
    pub coding_time_hours: Option<f64>,
    /// Ready-for-review to merge, in hours.
    pub review_time_hours: Option<f64>,
    /// Creation to first submitted review, in hours.
    pub review_turnaround_hours: Option<f64>,
    /// Commit counts keyed by lower-cased commit author login.
    #[serde(default)]
    pub commits_by_author: BTreeMap<String, u32>,
}

impl Record {
    /// Merge time as Unix seconds.
    pub fn merged_epoch(&self) -> i64 {
        self.merged_at.timestamp()
    }

    /// Duration value for a kind, `None` when not available.
    pub fn duration(&self, kind: DurationKind) -> Option<f64> {
        match kind {
            DurationKind::CodingTime => self.coding_time_hours,
            DurationKind::ReviewTime => self.review_time_hours,
            DurationKind::ReviewTurnaround => self.review_turnaround_hours,
        }
    }

    /// Boolean flag value for a kind.
    pub fn flag(&self, kind: FlagKind) -> bool {
        match kind {
            FlagKind::Assisted => self.assisted,
            FlagKind::Revert => self.revert,
        }
    }
}

/// Duration facts tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    CodingTime,
    ReviewTime,
    ReviewTurnaround,
}

impl DurationKind {
    pub const ALL: [DurationKind; 3] = [
        DurationKind::CodingTime,
        DurationKind::ReviewTime,
        DurationKind::ReviewTurnaround,
    ];

    /// Position in per-kind arrays.
    pub fn index(self) -> usize {
        match self {
            DurationKind::CodingTime => 0,
            DurationKind::ReviewTime => 1,
            DurationKind::ReviewTurnaround => 2,
        }
    }
}

/// Boolean flags tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// The covariate: assistive co-authorship.
    Assisted,
    Revert,
}

impl FlagKind {
    pub const ALL: [FlagKind; 2] = [FlagKind::Assisted, FlagKind::Revert];

    /// Position in per-kind arrays.
    pub fn index(self) -> usize {
        match self {
            FlagKind::Assisted => 0,
            FlagKind::Revert => 1,
        }
    }
}
