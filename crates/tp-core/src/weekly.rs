//! Weekly aggregation.

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeSet;
use tp_common::{validate_partition, DurationKind, FlagKind, Record, Result, WeekRange};
use tp_math::{median, p90};
use tracing::debug;

use crate::logging::{event_names, Stage};

/// Median and p90 of one duration kind within a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, JsonSchema)]
pub struct DurationSummary {
    /// `None` when no record in the period had this duration.
    pub median_hours: Option<f64>,
    pub p90_hours: Option<f64>,
    /// Records contributing a value.
    pub samples: u32,
}

impl DurationSummary {
    fn from_values(values: &[f64]) -> Self {
        Self {
            median_hours: median(values),
            p90_hours: p90(values),
            samples: values.len() as u32,
        }
    }
}

/// Statistics for the records merged in one week.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct WeekStat {
    pub week: WeekRange,
    pub prs_merged: u32,
    /// Distinct (case-folded) authors.
    pub unique_authors: u32,
    /// `prs_merged / unique_authors`, 0 with no authors.
    pub prs_per_engineer: f64,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    /// `(additions + deletions) / prs_merged`, 0 with no PRs.
    pub avg_pr_size_lines: f64,
    /// Commits attributed to linked authors.
    pub commits: u64,
    /// Distinct commit authors, who need not be PR authors.
    pub commit_authors: u32,
    /// `commits / commit_authors`, 0 with no linked commits.
    pub commits_per_engineer: f64,
    pub assisted_count: u32,
    pub revert_count: u32,
    /// Percentage of PRs flagged assisted, 0 with no PRs.
    pub pct_assisted: f64,
    pub pct_reverts: f64,
    pub coding_time: DurationSummary,
    pub review_time: DurationSummary,
    pub review_turnaround: DurationSummary,
}

impl WeekStat {
    pub fn duration(&self, kind: DurationKind) -> &DurationSummary {
        match kind {
            DurationKind::CodingTime => &self.coding_time,
            DurationKind::ReviewTime => &self.review_time,
            DurationKind::ReviewTurnaround => &self.review_turnaround,
        }
    }

    pub fn flag_count(&self, kind: FlagKind) -> u32 {
        match kind {
            FlagKind::Assisted => self.assisted_count,
            FlagKind::Revert => self.revert_count,
        }
    }

    pub fn pct_flag(&self, kind: FlagKind) -> f64 {
        match kind {
            FlagKind::Assisted => self.pct_assisted,
            FlagKind::Revert => self.pct_reverts,
        }
    }
}

#[derive(Default)]
struct Bucket {
    count: u32,
    additions: u64,
    deletions: u64,
    changed_files: u64,
    commits: u64,
    authors: BTreeSet<String>,
    commit_authors: BTreeSet<String>,
    flags: [u32; 2],
    durations: [Vec<f64>; 3],
}

impl Bucket {
    fn add(&mut self, record: &Record) {
        self.count += 1;
        self.additions += record.additions;
        self.deletions += record.deletions;
        self.changed_files += record.changed_files;
        for (login, count) in &record.commits_by_author {
            self.commits += u64::from(*count);
            self.commit_authors.insert(login.to_lowercase());
        }
        self.authors.insert(record.author.to_lowercase());
        for kind in FlagKind::ALL {
            if record.flag(kind) {
                self.flags[kind.index()] += 1;
            }
        }
        for kind in DurationKind::ALL {
            if let Some(hours) = record.duration(kind) {
                self.durations[kind.index()].push(hours);
            }
        }
    }

    fn finish(self, week: WeekRange) -> WeekStat {
        let unique_authors = self.authors.len() as u32;
        let per_author = |n: f64| {
            if unique_authors == 0 {
                0.0
            } else {
                n / f64::from(unique_authors)
            }
        };
        let commit_authors = self.commit_authors.len() as u32;
        let per_pr = |n: f64| {
            if self.count == 0 {
                0.0
            } else {
                n / f64::from(self.count)
            }
        };

        WeekStat {
            week,
            prs_merged: self.count,
            unique_authors,
            prs_per_engineer: per_author(f64::from(self.count)),
            additions: self.additions,
            deletions: self.deletions,
            changed_files: self.changed_files,
            avg_pr_size_lines: per_pr((self.additions + self.deletions) as f64),
            commits: self.commits,
            commit_authors,
            commits_per_engineer: if commit_authors == 0 {
                0.0
            } else {
                self.commits as f64 / f64::from(commit_authors)
            },
            assisted_count: self.flags[FlagKind::Assisted.index()],
            revert_count: self.flags[FlagKind::Revert.index()],
            pct_assisted: per_pr(f64::from(self.flags[FlagKind::Assisted.index()])) * 100.0,
            pct_reverts: per_pr(f64::from(self.flags[FlagKind::Revert.index()])) * 100.0,
            coding_time: DurationSummary::from_values(
                &self.durations[DurationKind::CodingTime.index()],
            ),
            review_time: DurationSummary::from_values(
                &self.durations[DurationKind::ReviewTime.index()],
            ),
            review_turnaround: DurationSummary::from_values(
                &self.durations[DurationKind::ReviewTurnaround.index()],
            ),
        }
    }
}

/// Index of the range containing `epoch`, if any.
///
/// `ranges` must be sorted and disjoint (see [`validate_partition`]); the
/// lookup is a binary search on range starts.
pub fn assign_week(ranges: &[WeekRange], epoch: i64) -> Option<usize> {
    let after = ranges.partition_point(|r| r.start_epoch() <= epoch);
    let idx = after.checked_sub(1)?;
    ranges[idx].contains(epoch).then_some(idx)
}

/// Bucket records by merge time and emit one [`WeekStat`] per range.
///
/// Records merged outside every range are dropped. Fails only when the
/// ranges overlap, are unsorted, or are malformed.
pub fn aggregate_weekly(records: &[Record], ranges: &[WeekRange]) -> Result<Vec<WeekStat>> {
    validate_partition(ranges)?;

    let mut buckets: Vec<Bucket> = ranges.iter().map(|_| Bucket::default()).collect();
    let mut unassigned = 0usize;

    for record in records {
        match assign_week(ranges, record.merged_epoch()) {
            Some(idx) => buckets[idx].add(record),
            None => unassigned += 1,
        }
    }

    if unassigned > 0 {
        debug!(
            event = event_names::RECORDS_UNASSIGNED,
            stage = %Stage::Aggregate,
            unassigned,
            "records merged outside the analysis window"
        );
    }

    Ok(buckets
        .into_iter()
        .zip(ranges)
        .map(|(bucket, week)| bucket.finish(*week))
        .collect())
}
