//! Shared fixtures for unit tests.

use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use tp_common::{Record, WeekRange};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Week starting on the given date (callers pass Mondays).
pub(crate) fn monday(y: i32, m: u32, d: u32) -> WeekRange {
    WeekRange::starting(date(y, m, d))
}

/// `n` consecutive weeks starting on the given Monday.
pub(crate) fn weeks_from(y: i32, m: u32, d: u32, n: u64) -> Vec<WeekRange> {
    (0..n)
        .map(|i| WeekRange::starting(date(y, m, d) + chrono::Days::new(7 * i)))
        .collect()
}

/// A plain record merged at noon on the given day.
pub(crate) fn record(number: u64, author: &str, y: i32, m: u32, d: u32) -> Record {
    Record {
        number,
        merged_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap(),
        author: author.to_string(),
        additions: 10,
        deletions: 5,
        changed_files: 2,
        assisted: false,
        revert: false,
        coding_time_hours: None,
        review_time_hours: None,
        review_turnaround_hours: None,
        commits_by_author: BTreeMap::new(),
    }
}

/// Minimal period for exercising trend and row logic directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FakePeriod {
    pub prs: u32,
    pub authors: f64,
    pub assisted_pct: f64,
    pub review_hours: Option<f64>,
}

impl FakePeriod {
    pub(crate) fn new(prs: u32, assisted_pct: f64) -> Self {
        Self {
            prs,
            authors: 1.0,
            assisted_pct,
            review_hours: None,
        }
    }
}

impl crate::metric::PeriodStats for FakePeriod {
    fn prs_merged(&self) -> u32 {
        self.prs
    }

    fn unique_authors(&self) -> f64 {
        self.authors
    }

    fn prs_per_engineer(&self) -> f64 {
        f64::from(self.prs) / self.authors
    }

    fn commits_per_engineer(&self) -> f64 {
        2.0 * self.prs_per_engineer()
    }

    fn median_duration(&self, kind: tp_common::DurationKind) -> Option<f64> {
        match kind {
            tp_common::DurationKind::ReviewTime => self.review_hours,
            _ => None,
        }
    }

    fn pct_flag(&self, kind: tp_common::FlagKind) -> f64 {
        match kind {
            tp_common::FlagKind::Assisted => self.assisted_pct,
            tp_common::FlagKind::Revert => 0.0,
        }
    }
}
