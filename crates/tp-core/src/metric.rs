//! Tracked metrics and the period abstraction they are read from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tp_common::{DurationKind, FlagKind};

use crate::weekly::WeekStat;

/// A metric with one value per period, compared across trend windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PrsMerged,
    UniqueAuthors,
    PrsPerEngineer,
    CommitsPerEngineer,
    MedianCodingTimeHours,
    MedianReviewTimeHours,
    MedianReviewTurnaroundHours,
    PctReverts,
    /// The covariate itself.
    PctAssisted,
}

impl Metric {
    /// Row order in reports.
    pub const ALL: [Metric; 9] = [
        Metric::PrsMerged,
        Metric::UniqueAuthors,
        Metric::PrsPerEngineer,
        Metric::CommitsPerEngineer,
        Metric::MedianCodingTimeHours,
        Metric::MedianReviewTimeHours,
        Metric::MedianReviewTurnaroundHours,
        Metric::PctReverts,
        Metric::PctAssisted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::PrsMerged => "prs_merged",
            Metric::UniqueAuthors => "unique_authors",
            Metric::PrsPerEngineer => "prs_per_engineer",
            Metric::CommitsPerEngineer => "commits_per_engineer",
            Metric::MedianCodingTimeHours => "median_coding_time_hours",
            Metric::MedianReviewTimeHours => "median_review_time_hours",
            Metric::MedianReviewTurnaroundHours => "median_review_turnaround_hours",
            Metric::PctReverts => "pct_reverts",
            Metric::PctAssisted => "pct_assisted",
        }
    }

    /// Whether this metric is the covariate significance is tested against.
    pub fn is_covariate(self) -> bool {
        self == Metric::PctAssisted
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A period (week or month) that trend analysis can read metrics from.
pub trait PeriodStats {
    fn prs_merged(&self) -> u32;
    fn unique_authors(&self) -> f64;
    fn prs_per_engineer(&self) -> f64;
    fn commits_per_engineer(&self) -> f64;
    fn median_duration(&self, kind: DurationKind) -> Option<f64>;
    fn pct_flag(&self, kind: FlagKind) -> f64;

    /// The covariate: percentage of assisted pull requests.
    fn covariate(&self) -> f64 {
        self.pct_flag(FlagKind::Assisted)
    }

    /// The metric's value for this period, `None` when the period does not
    /// count for it (no merged PRs, or no duration data).
    fn metric_value(&self, metric: Metric) -> Option<f64> {
        if self.prs_merged() == 0 {
            return None;
        }
        match metric {
            Metric::PrsMerged => Some(f64::from(self.prs_merged())),
            Metric::UniqueAuthors => Some(self.unique_authors()),
            Metric::PrsPerEngineer => Some(self.prs_per_engineer()),
            Metric::CommitsPerEngineer => Some(self.commits_per_engineer()),
            Metric::MedianCodingTimeHours => self.median_duration(DurationKind::CodingTime),
            Metric::MedianReviewTimeHours => self.median_duration(DurationKind::ReviewTime),
            Metric::MedianReviewTurnaroundHours => {
                self.median_duration(DurationKind::ReviewTurnaround)
            }
            Metric::PctReverts => Some(self.pct_flag(FlagKind::Revert)),
            Metric::PctAssisted => Some(self.pct_flag(FlagKind::Assisted)),
        }
    }
}

impl PeriodStats for WeekStat {
    fn prs_merged(&self) -> u32 {
        self.prs_merged
    }

    fn unique_authors(&self) -> f64 {
        f64::from(self.unique_authors)
    }

    fn prs_per_engineer(&self) -> f64 {
        self.prs_per_engineer
    }

    fn commits_per_engineer(&self) -> f64 {
        self.commits_per_engineer
    }

    fn median_duration(&self, kind: DurationKind) -> Option<f64> {
        self.duration(kind).median_hours
    }

    fn pct_flag(&self, kind: FlagKind) -> f64 {
        WeekStat::pct_flag(self, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{monday, record};
    use crate::weekly::aggregate_weekly;

    #[test]
    fn names_match_serde() {
        for metric in Metric::ALL {
            let json = serde_json::to_value(metric).unwrap();
            assert_eq!(json, metric.name());
        }
    }

    #[test]
    fn only_pct_assisted_is_the_covariate() {
        let covariates: Vec<Metric> = Metric::ALL.into_iter().filter(|m| m.is_covariate()).collect();
        assert_eq!(covariates, vec![Metric::PctAssisted]);
    }

    #[test]
    fn empty_week_has_no_metric_values() {
        let weeks = vec![monday(2026, 1, 5), monday(2026, 1, 12)];
        let mut a = record(1, "a", 2026, 1, 6);
        a.assisted = true;
        a.coding_time_hours = Some(3.0);
        a.commits_by_author.insert("a".into(), 3);
        a.commits_by_author.insert("c".into(), 1);
        let b = record(2, "b", 2026, 1, 7);
        let stats = aggregate_weekly(&[a, b], &weeks).unwrap();

        for metric in Metric::ALL {
            assert_eq!(stats[1].metric_value(metric), None, "{metric}");
        }
        assert_eq!(stats[0].metric_value(Metric::PrsMerged), Some(2.0));
        assert_eq!(stats[0].metric_value(Metric::PctAssisted), Some(50.0));
        assert_eq!(stats[0].metric_value(Metric::CommitsPerEngineer), Some(2.0));
        assert_eq!(stats[0].metric_value(Metric::MedianCodingTimeHours), Some(3.0));
        assert_eq!(stats[0].metric_value(Metric::MedianReviewTimeHours), None);
        assert_eq!(stats[0].covariate(), 50.0);
    }
}
