//! Monthly aggregation of weekly statistics.
//!
//! Weeks belong to the calendar month their start date falls in. Count-type
//! fields are summed over member weeks; rate-type fields are the median over
//! member weeks that merged at least one PR.

use chrono::{Datelike, Days, Months, NaiveDate};
use schemars::JsonSchema;
use serde::Serialize;
use tp_common::{DurationKind, FlagKind};
use tp_math::median;
use tracing::info;

use crate::logging::{event_names, Stage};
use crate::metric::PeriodStats;
use crate::weekly::WeekStat;

/// Statistics for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MonthGroup {
    /// `YYYY-MM`.
    pub month: String,
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month, or the end of the last member week if later.
    pub end: NaiveDate,
    /// Number of member weeks.
    pub weeks: u32,
    pub prs_merged: u32,
    pub assisted_count: u32,
    pub revert_count: u32,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub commits: u64,
    /// Median of the weekly distinct-author counts.
    pub unique_authors: f64,
    pub prs_per_engineer: f64,
    pub commits_per_engineer: f64,
    pub pct_assisted: f64,
    pub pct_reverts: f64,
    pub median_coding_time_hours: Option<f64>,
    pub median_review_time_hours: Option<f64>,
    pub median_review_turnaround_hours: Option<f64>,
}

impl MonthGroup {
    pub fn median_duration(&self, kind: DurationKind) -> Option<f64> {
        match kind {
            DurationKind::CodingTime => self.median_coding_time_hours,
            DurationKind::ReviewTime => self.median_review_time_hours,
            DurationKind::ReviewTurnaround => self.median_review_turnaround_hours,
        }
    }
}

impl PeriodStats for MonthGroup {
    fn prs_merged(&self) -> u32 {
        self.prs_merged
    }

    fn unique_authors(&self) -> f64 {
        self.unique_authors
    }

    fn prs_per_engineer(&self) -> f64 {
        self.prs_per_engineer
    }

    fn commits_per_engineer(&self) -> f64 {
        self.commits_per_engineer
    }

    fn median_duration(&self, kind: DurationKind) -> Option<f64> {
        MonthGroup::median_duration(self, kind)
    }

    fn pct_flag(&self, kind: FlagKind) -> f64 {
        match kind {
            FlagKind::Assisted => self.pct_assisted,
            FlagKind::Revert => self.pct_reverts,
        }
    }
}

struct Group<'a> {
    year: i32,
    month: u32,
    start: NaiveDate,
    month_end: NaiveDate,
    end: NaiveDate,
    weeks: Vec<&'a WeekStat>,
}

/// First and last calendar day of the month containing `date`.
fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// Collapse weekly statistics into calendar months.
///
/// `weeks` must be in chronological order. The chronologically last month is
/// dropped entirely unless one of its weeks starts within the final 7 days
/// of that month.
pub fn aggregate_monthly(weeks: &[WeekStat]) -> Vec<MonthGroup> {
    let mut groups: Vec<Group> = Vec::new();

    for week in weeks {
        let start = week.week.start;
        let same_month = groups
            .last()
            .is_some_and(|g| g.year == start.year() && g.month == start.month());
        if !same_month {
            let (first, last) = month_bounds(start);
            groups.push(Group {
                year: start.year(),
                month: start.month(),
                start: first,
                month_end: last,
                end: last,
                weeks: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.end = group.end.max(week.week.end);
            group.weeks.push(week);
        }
    }

    if let Some(last) = groups.last() {
        let cutoff = last.month_end.checked_sub_days(Days::new(6));
        let last_week_start = last.weeks.last().map(|w| w.week.start);
        let incomplete = match (cutoff, last_week_start) {
            (Some(cutoff), Some(start)) => start < cutoff,
            _ => true,
        };
        if incomplete {
            info!(
                event = event_names::MONTH_DROPPED,
                stage = %Stage::Aggregate,
                month = %format!("{:04}-{:02}", last.year, last.month),
                weeks = last.weeks.len(),
                "dropping incomplete trailing month"
            );
            groups.pop();
        }
    }

    groups.into_iter().map(Group::finish).collect()
}

impl Group<'_> {
    fn finish(self) -> MonthGroup {
        let active: Vec<&WeekStat> = self
            .weeks
            .iter()
            .copied()
            .filter(|w| w.prs_merged > 0)
            .collect();
        let median_duration = |kind: DurationKind| -> Option<f64> {
            let values: Vec<f64> = active
                .iter()
                .filter_map(|w| w.duration(kind).median_hours)
                .collect();
            median(&values)
        };

        MonthGroup {
            month: format!("{:04}-{:02}", self.year, self.month),
            start: self.start,
            end: self.end,
            weeks: self.weeks.len() as u32,
            prs_merged: self.weeks.iter().map(|w| w.prs_merged).sum(),
            assisted_count: self.weeks.iter().map(|w| w.assisted_count).sum(),
            revert_count: self.weeks.iter().map(|w| w.revert_count).sum(),
            additions: self.weeks.iter().map(|w| w.additions).sum(),
            deletions: self.weeks.iter().map(|w| w.deletions).sum(),
            changed_files: self.weeks.iter().map(|w| w.changed_files).sum(),
            commits: self.weeks.iter().map(|w| w.commits).sum(),
            unique_authors: median_over(&active, |w| f64::from(w.unique_authors)),
            prs_per_engineer: median_over(&active, |w| w.prs_per_engineer),
            commits_per_engineer: median_over(&active, |w| w.commits_per_engineer),
            pct_assisted: median_over(&active, |w| w.pct_assisted),
            pct_reverts: median_over(&active, |w| w.pct_reverts),
            median_coding_time_hours: median_duration(DurationKind::CodingTime),
            median_review_time_hours: median_duration(DurationKind::ReviewTime),
            median_review_turnaround_hours: median_duration(DurationKind::ReviewTurnaround),
        }
    }
}

/// Median of `f` over `weeks`, 0 when there are none.
fn median_over(weeks: &[&WeekStat], f: impl Fn(&WeekStat) -> f64) -> f64 {
    let values: Vec<f64> = weeks.iter().map(|&w| f(w)).collect();
    median(&values).unwrap_or(0.0)
}
