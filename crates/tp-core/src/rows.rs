//! Consolidated per-metric rows: trend window plus significance.

use schemars::JsonSchema;
use serde::Serialize;
use tp_config::Period;
use tp_math::{mann_whitney_u, pearson_correlation, SignificanceLabel};
use tracing::{debug, warn};

use crate::error::NotComputable;
use crate::logging::{event_names, Stage};
use crate::metric::{Metric, PeriodStats};
use crate::trend::{apply_activity_filter, compute_window, TrendWindow, WindowMode};

/// Paired periods needed before significance is attempted.
pub const MIN_SIGNIFICANCE_SAMPLES: usize = 4;

/// Association between the assisted covariate and one metric.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Significance {
    /// Paired periods tested.
    pub samples: usize,
    pub pearson_r: f64,
    pub r_squared: f64,
    pub p_pearson: f64,
    /// `None` when the median split of the covariate left a group empty.
    pub p_mann_whitney: Option<f64>,
    /// Either Mann-Whitney group had fewer than 8 periods.
    pub mann_whitney_small_groups: bool,
    /// Reading of `p_pearson`.
    pub label: SignificanceLabel,
}

/// One tracked metric's row.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ConsolidatedRow {
    pub metric: Metric,
    #[serde(flatten)]
    pub trend: TrendWindow,
    /// Absent for the covariate itself and for sparse metrics.
    pub significance: Option<Significance>,
}

/// A metric for which no row could be built.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SkippedMetric {
    pub metric: Metric,
    #[serde(flatten)]
    pub reason: NotComputable,
}

/// Rows for every metric that could be computed.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TrendRows {
    pub rows: Vec<ConsolidatedRow>,
    pub skipped: Vec<SkippedMetric>,
    /// Periods that passed the activity filter.
    pub periods_used: usize,
    /// Active periods below the activity floor.
    pub periods_excluded: usize,
}

fn significance_for<P: PeriodStats>(metric: Metric, periods: &[&P]) -> Option<Significance> {
    let (covariate, values): (Vec<f64>, Vec<f64>) = periods
        .iter()
        .filter_map(|p| p.metric_value(metric).map(|v| (p.covariate(), v)))
        .unzip();

    if values.len() < MIN_SIGNIFICANCE_SAMPLES {
        debug!(
            event = event_names::TEST_SKIPPED,
            stage = %Stage::Significance,
            %metric,
            samples = values.len(),
            required = MIN_SIGNIFICANCE_SAMPLES,
            "too few paired periods for significance"
        );
        return None;
    }

    let pearson = match pearson_correlation(&covariate, &values) {
        Ok(pearson) => pearson,
        Err(err) => {
            debug!(
                event = event_names::TEST_SKIPPED,
                stage = %Stage::Significance,
                %metric,
                reason = %err,
                "pearson correlation skipped"
            );
            return None;
        }
    };

    let mann_whitney = match mann_whitney_u(&covariate, &values) {
        Ok(mw) => Some(mw),
        Err(err) => {
            debug!(
                event = event_names::TEST_SKIPPED,
                stage = %Stage::Significance,
                %metric,
                reason = %err,
                "mann-whitney test skipped"
            );
            None
        }
    };
    let small_groups = mann_whitney.is_some_and(|mw| mw.small_groups());
    if let Some(mw) = mann_whitney.filter(|mw| mw.small_groups()) {
        warn!(
            event = event_names::SMALL_GROUPS,
            stage = %Stage::Significance,
            %metric,
            n_low = mw.n_low,
            n_high = mw.n_high,
            "mann-whitney normal approximation on small groups"
        );
    }

    Some(Significance {
        samples: values.len(),
        pearson_r: pearson.r,
        r_squared: pearson.r_squared(),
        p_pearson: pearson.p_value,
        p_mann_whitney: mann_whitney.map(|mw| mw.p_value),
        mann_whitney_small_groups: small_groups,
        label: SignificanceLabel::from_p_value(pearson.p_value),
    })
}

/// Build one row per tracked metric over the periods that pass the
/// activity filter.
///
/// Metrics whose window cannot be computed are listed in
/// [`TrendRows::skipped`]. The whole result is not computable when the
/// activity filter fails or no metric produced a row.
pub fn build_rows<P: PeriodStats>(
    periods: &[P],
    mode: WindowMode,
    period: Period,
    floor_pct: f64,
    min_periods: usize,
) -> Result<TrendRows, NotComputable> {
    let active = apply_activity_filter(periods, floor_pct, min_periods).inspect_err(|reason| {
        debug!(
            event = event_names::NOT_COMPUTABLE,
            stage = %Stage::Trend,
            %reason,
            "trend rows not computable"
        );
    })?;

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for metric in Metric::ALL {
        match compute_window(metric, &active.periods, mode, period) {
            Ok(trend) => {
                let significance = if metric.is_covariate() {
                    None
                } else {
                    significance_for(metric, &active.periods)
                };
                rows.push(ConsolidatedRow {
                    metric,
                    trend,
                    significance,
                });
            }
            Err(reason) => {
                debug!(
                    event = event_names::NOT_COMPUTABLE,
                    stage = %Stage::Trend,
                    %metric,
                    %reason,
                    "metric skipped"
                );
                skipped.push(SkippedMetric { metric, reason });
            }
        }
    }

    if rows.is_empty() {
        if let Some(first) = skipped.into_iter().next() {
            return Err(first.reason);
        }
        return Err(NotComputable::NoActivePeriods);
    }

    Ok(TrendRows {
        rows,
        skipped,
        periods_used: active.periods.len(),
        periods_excluded: active.excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakePeriod;
    use crate::trend::PctChange;

    fn ramp() -> Vec<FakePeriod> {
        (0..8)
            .map(|i| FakePeriod::new(2 + i, f64::from(i) * 10.0))
            .collect()
    }

    fn row(rows: &TrendRows, metric: Metric) -> &ConsolidatedRow {
        rows.rows.iter().find(|r| r.metric == metric).unwrap()
    }

    #[test]
    fn rows_for_every_computable_metric() {
        let rows = build_rows(
            &ramp(),
            WindowMode::Positional { window_pct: 25 },
            Period::Week,
            10.0,
            4,
        )
        .unwrap();

        assert_eq!(rows.periods_used, 8);
        assert_eq!(rows.periods_excluded, 0);

        let prs = row(&rows, Metric::PrsMerged);
        assert_eq!(prs.trend.first_avg, 2.5);
        assert_eq!(prs.trend.last_avg, 8.5);
        assert!(matches!(prs.trend.pct_change, PctChange::Ratio(p) if (p - 240.0).abs() < 1e-9));
        assert_eq!(prs.trend.pct_change.to_string(), "+240.0%");

        let sig = prs.significance.as_ref().unwrap();
        assert_eq!(sig.samples, 8);
        assert!(sig.pearson_r > 0.999);
        assert!(sig.p_pearson < 1e-6);
        assert_eq!(sig.label, SignificanceLabel::Significant);
        // covariate split 4/4, fully separated
        assert!((sig.p_mann_whitney.unwrap() - 0.020921).abs() < 1e-5);
        assert!(sig.mann_whitney_small_groups);

        // constant authors: no evidence either way
        let authors = row(&rows, Metric::UniqueAuthors);
        let sig = authors.significance.as_ref().unwrap();
        assert_eq!(sig.p_pearson, 1.0);
        assert_eq!(sig.label, SignificanceLabel::NotSignificant);

        assert!(row(&rows, Metric::PctAssisted).significance.is_none());

        let commits = row(&rows, Metric::CommitsPerEngineer);
        assert_eq!(commits.trend.first_avg, 5.0);
        assert_eq!(commits.trend.last_avg, 17.0);
        assert!(commits.significance.is_some());
    }

    #[test]
    fn metrics_without_data_are_skipped() {
        let rows = build_rows(
            &ramp(),
            WindowMode::Positional { window_pct: 25 },
            Period::Week,
            10.0,
            4,
        )
        .unwrap();
        let skipped: Vec<Metric> = rows.skipped.iter().map(|s| s.metric).collect();
        assert_eq!(
            skipped,
            vec![
                Metric::MedianCodingTimeHours,
                Metric::MedianReviewTimeHours,
                Metric::MedianReviewTurnaroundHours,
            ]
        );
        assert_eq!(rows.rows.len(), Metric::ALL.len() - 3);
    }

    #[test]
    fn sparse_metric_gets_a_row_without_significance() {
        let mut periods = ramp();
        periods[0].review_hours = Some(5.0);
        periods[7].review_hours = Some(3.0);
        let rows = build_rows(
            &periods,
            WindowMode::Positional { window_pct: 25 },
            Period::Week,
            10.0,
            4,
        )
        .unwrap();
        let review = row(&rows, Metric::MedianReviewTimeHours);
        assert_eq!(review.trend.n, 2);
        assert_eq!(review.trend.abs_change, -2.0);
        assert!(review.significance.is_none());
    }

    #[test]
    fn too_few_periods_is_not_computable() {
        let periods = vec![FakePeriod::new(3, 0.0); 3];
        let err = build_rows(
            &periods,
            WindowMode::Positional { window_pct: 10 },
            Period::Week,
            10.0,
            4,
        )
        .unwrap_err();
        assert_eq!(err, NotComputable::TooFewPeriods { found: 3, required: 4 });
    }

    #[test]
    fn threshold_without_upper_group_fails_every_metric() {
        let err = build_rows(
            &ramp(),
            WindowMode::Threshold { threshold: 95.0 },
            Period::Week,
            10.0,
            4,
        )
        .unwrap_err();
        assert!(matches!(err, NotComputable::EmptyThresholdGroup { above: 0, .. }));
    }

    #[test]
    fn row_serializes_flat() {
        let rows = build_rows(
            &ramp(),
            WindowMode::Positional { window_pct: 25 },
            Period::Month,
            10.0,
            4,
        )
        .unwrap();
        let json = serde_json::to_value(&rows).unwrap();
        let first = &json["rows"][0];
        assert_eq!(first["metric"], "prs_merged");
        assert_eq!(first["label"], "first 2mo vs last 2mo avg");
        assert_eq!(first["pct_change"]["kind"], "ratio");
        assert_eq!(first["significance"]["label"], "significant");
        assert_eq!(json["skipped"][0]["reason"], "insufficient_samples");
    }
}
