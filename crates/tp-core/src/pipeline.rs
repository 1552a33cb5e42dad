//! End-to-end analysis over ingested records.

use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tp_common::{validate_partition, Error, Record, Result, WeekRange, SCHEMA_VERSION};
use tp_config::{validate_config, AnalysisConfig, Period, ValidationError};
use tracing::info;

use crate::contributors::{top_contributors, ContributorStat};
use crate::error::NotComputable;
use crate::filters::{drop_low_activity_weeks, exclude_bottom_contributors};
use crate::logging::event_names;
use crate::monthly::{aggregate_monthly, MonthGroup};
use crate::rows::{build_rows, TrendRows};
use crate::trend::WindowMode;
use crate::weekly::{aggregate_weekly, WeekStat};

/// Everything the analysis produces for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ThroughputReport {
    pub schema_version: String,
    pub period: Period,
    pub mode: WindowMode,
    /// Weekly statistics after the low-activity week filter.
    pub weeks: Vec<WeekStat>,
    /// Present when the period is `month`.
    pub months: Option<Vec<MonthGroup>>,
    /// Present when `top_contributors` is non-zero.
    pub contributors: Option<Vec<ContributorStat>>,
    pub excluded_contributors: Vec<String>,
    pub dropped_weeks: Vec<WeekRange>,
    #[serde(serialize_with = "serialize_trend")]
    #[schemars(with = "TrendOutcome")]
    pub trend: std::result::Result<TrendRows, NotComputable>,
}

/// Serialized shape of [`ThroughputReport::trend`].
#[derive(JsonSchema)]
#[serde(untagged)]
#[allow(dead_code)]
enum TrendOutcome {
    Rows(TrendRows),
    NotComputable { not_computable: NotComputable },
}

fn serialize_trend<S: Serializer>(
    trend: &std::result::Result<TrendRows, NotComputable>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match trend {
        Ok(rows) => rows.serialize(serializer),
        Err(reason) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("not_computable", reason)?;
            map.end()
        }
    }
}

fn config_error(err: ValidationError) -> Error {
    match err {
        ValidationError::InvalidValue { field, message } => Error::InvalidConfig { field, message },
        other => Error::Config(other.to_string()),
    }
}

/// Run the full analysis.
///
/// Stages: bottom-contributor filter, weekly aggregation, low-activity week
/// filter, monthly aggregation (month period only), top contributors, and
/// trend rows. Top contributors are measured over every supplied range.
///
/// Fails on invalid configuration or malformed ranges. Sparse data never
/// fails: it surfaces as `NotComputable` inside the report.
pub fn analyze(
    records: &[Record],
    ranges: &[WeekRange],
    config: &AnalysisConfig,
) -> Result<ThroughputReport> {
    validate_config(config).map_err(config_error)?;
    if ranges.is_empty() {
        return Err(Error::EmptyWeekRanges);
    }
    validate_partition(ranges)?;

    let population =
        exclude_bottom_contributors(records.to_vec(), config.exclude_bottom_contributor_pct);
    let all_weeks = aggregate_weekly(&population.kept, ranges)?;
    let (weeks, dropped_weeks) = drop_low_activity_weeks(all_weeks, config.min_prs_per_week);

    let months = match config.period {
        Period::Month => Some(aggregate_monthly(&weeks)),
        Period::Week => None,
    };
    let contributors = (config.top_contributors > 0)
        .then(|| top_contributors(&population.kept, ranges, config.top_contributors));

    let mode = WindowMode::from_config(config);
    let trend = match &months {
        Some(months) => build_rows(
            months,
            mode,
            config.period,
            config.activity_floor_pct,
            config.min_weeks,
        ),
        None => build_rows(
            &weeks,
            mode,
            config.period,
            config.activity_floor_pct,
            config.min_weeks,
        ),
    };

    info!(
        event = event_names::ANALYSIS_FINISHED,
        records = population.kept.len(),
        weeks = weeks.len(),
        months = months.as_ref().map_or(0, Vec::len),
        rows = trend.as_ref().map_or(0, |t| t.rows.len()),
        computable = trend.is_ok(),
        "analysis finished"
    );

    Ok(ThroughputReport {
        schema_version: SCHEMA_VERSION.to_string(),
        period: config.period,
        mode,
        weeks,
        months,
        contributors,
        excluded_contributors: population.excluded,
        dropped_weeks,
        trend,
    })
}
