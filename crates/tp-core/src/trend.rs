//! Trend windows: how a metric moved between two groups of periods.
//!
//! Periods first pass a global activity filter. The survivors are then
//! compared either positionally (first vs last share of the sequence) or by
//! the assisted-percentage covariate (below vs at-or-above a threshold).

use schemars::JsonSchema;
use serde::Serialize;
use tp_config::{AnalysisConfig, Period};
use tp_math::mean;
use tracing::info;

use crate::error::NotComputable;
use crate::logging::{event_names, Stage};
use crate::metric::{Metric, PeriodStats};

/// Minimum metric-valid periods for a positional window.
pub const MIN_POSITIONAL_PERIODS: usize = 2;

/// Periods that passed the activity filter, in input order.
#[derive(Debug)]
pub struct ActivePeriods<'a, P> {
    pub periods: Vec<&'a P>,
    /// Active periods that fell below the floor. Periods with no merged
    /// PRs are dropped without being counted here.
    pub excluded: usize,
    /// Mean PRs merged over periods with any activity.
    pub mean_prs: f64,
    /// PRs a period needed to survive.
    pub floor: f64,
}

/// Drop periods with no merged PRs, or fewer than `floor_pct` percent of the
/// mean over active periods.
///
/// Fails when nothing is active or fewer than `min_periods` remain.
pub fn apply_activity_filter<P: PeriodStats>(
    periods: &[P],
    floor_pct: f64,
    min_periods: usize,
) -> Result<ActivePeriods<'_, P>, NotComputable> {
    let active: Vec<f64> = periods
        .iter()
        .filter(|p| p.prs_merged() > 0)
        .map(|p| f64::from(p.prs_merged()))
        .collect();
    let mean_prs = mean(&active).ok_or(NotComputable::NoActivePeriods)?;
    let floor = mean_prs * floor_pct / 100.0;

    let (kept, below): (Vec<&P>, Vec<&P>) = periods
        .iter()
        .filter(|p| p.prs_merged() > 0)
        .partition(|p| f64::from(p.prs_merged()) >= floor);
    let excluded = below.len();

    if excluded > 0 {
        info!(
            event = event_names::WEEKS_EXCLUDED,
            stage = %Stage::Trend,
            excluded,
            kept = kept.len(),
            mean_prs,
            floor,
            "low-activity periods excluded from trend statistics"
        );
    }

    if kept.len() < min_periods {
        return Err(NotComputable::TooFewPeriods {
            found: kept.len(),
            required: min_periods,
        });
    }

    Ok(ActivePeriods {
        periods: kept,
        excluded,
        mean_prs,
        floor,
    })
}

/// How the two comparison windows are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowMode {
    /// First vs last `window_pct` percent of the periods.
    Positional { window_pct: u32 },
    /// Periods below vs at-or-above an assisted percentage.
    Threshold { threshold: f64 },
}

impl WindowMode {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        match config.assisted_threshold {
            Some(threshold) => WindowMode::Threshold { threshold },
            None => WindowMode::Positional {
                window_pct: config.window_pct,
            },
        }
    }
}

/// Change between the window averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PctChange {
    /// Percent change relative to the first average.
    Ratio(f64),
    /// Signed absolute change, used when the first average is zero.
    Absolute(f64),
}

impl PctChange {
    fn between(first_avg: f64, abs_change: f64) -> Self {
        if first_avg != 0.0 {
            PctChange::Ratio(abs_change / first_avg.abs() * 100.0)
        } else {
            PctChange::Absolute(abs_change)
        }
    }
}

impl std::fmt::Display for PctChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PctChange::Ratio(pct) => write!(f, "{:+.1}%", pct),
            PctChange::Absolute(abs) => write!(f, "{:+.2}", abs),
        }
    }
}

/// One metric's window comparison.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TrendWindow {
    /// Metric-valid periods considered.
    pub n: usize,
    pub first_size: usize,
    pub last_size: usize,
    pub first_avg: f64,
    pub last_avg: f64,
    /// `last_avg - first_avg`.
    pub abs_change: f64,
    pub pct_change: PctChange,
    /// Human description of the two windows.
    pub label: String,
}

impl TrendWindow {
    fn new(n: usize, first: &[f64], last: &[f64], label: String) -> Self {
        let first_avg = mean(first).unwrap_or(0.0);
        let last_avg = mean(last).unwrap_or(0.0);
        let abs_change = last_avg - first_avg;
        Self {
            n,
            first_size: first.len(),
            last_size: last.len(),
            first_avg,
            last_avg,
            abs_change,
            pct_change: PctChange::between(first_avg, abs_change),
            label,
        }
    }
}

/// Compare a metric across two windows of `periods`.
///
/// Only periods where the metric has a value take part. Positional windows
/// hold `max(1, ⌊n·window_pct/100⌋)` periods each and may overlap when `n`
/// is small.
pub fn compute_window<P: PeriodStats>(
    metric: Metric,
    periods: &[&P],
    mode: WindowMode,
    period: Period,
) -> Result<TrendWindow, NotComputable> {
    let unit = period.abbrev();
    let valid: Vec<(f64, f64)> = periods
        .iter()
        .filter_map(|p| p.metric_value(metric).map(|v| (p.covariate(), v)))
        .collect();
    let n = valid.len();

    match mode {
        WindowMode::Positional { window_pct } => {
            if n < MIN_POSITIONAL_PERIODS {
                return Err(NotComputable::InsufficientSamples {
                    found: n,
                    required: MIN_POSITIONAL_PERIODS,
                });
            }
            let size = (n * window_pct as usize / 100).clamp(1, n);
            let values: Vec<f64> = valid.iter().map(|(_, v)| *v).collect();
            let label = format!("first {size}{unit} vs last {size}{unit} avg");
            Ok(TrendWindow::new(n, &values[..size], &values[n - size..], label))
        }
        WindowMode::Threshold { threshold } => {
            let (below, above): (Vec<(f64, f64)>, Vec<(f64, f64)>) =
                valid.iter().partition(|(cov, _)| *cov < threshold);
            if below.is_empty() || above.is_empty() {
                return Err(NotComputable::EmptyThresholdGroup {
                    threshold,
                    below: below.len(),
                    above: above.len(),
                });
            }
            let below: Vec<f64> = below.into_iter().map(|(_, v)| v).collect();
            let above: Vec<f64> = above.into_iter().map(|(_, v)| v).collect();
            let label = format!(
                "below {threshold:.0}% assisted ({}{unit}) vs above {threshold:.0}% assisted ({}{unit})",
                below.len(),
                above.len()
            );
            Ok(TrendWindow::new(n, &below, &above, label))
        }
    }
}
