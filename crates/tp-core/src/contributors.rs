//! Per-contributor before/after comparison around first assisted merge.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tp_common::{Record, WeekRange};
use tracing::debug;

use crate::logging::{event_names, Stage};
use crate::weekly::assign_week;

/// One author's merge rate before and after their first assisted PR.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ContributorStat {
    pub login: String,
    pub total_prs: u32,
    pub before_prs: u32,
    pub after_prs: u32,
    /// PRs per active week before the split, two decimals.
    pub before_rate: f64,
    /// PRs per active week from the split on, two decimals.
    pub after_rate: f64,
    /// Percent change from `before_rate`, one decimal; 0 when `before_rate` is 0.
    pub pct_change: f64,
    /// The author has at least one assisted PR.
    pub has_flag: bool,
    /// Merge time of the earliest assisted PR.
    pub first_flagged_at: Option<DateTime<Utc>>,
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// PRs per week in which the group merged at least one PR.
fn rate(group: &[&Record], ranges: &[WeekRange]) -> f64 {
    let active: BTreeSet<usize> = group
        .iter()
        .filter_map(|r| assign_week(ranges, r.merged_epoch()))
        .collect();
    if active.is_empty() {
        0.0
    } else {
        round_to(group.len() as f64 / active.len() as f64, 2)
    }
}

/// Rank authors by PR count and compare the `n` busiest before and after
/// their first assisted merge.
///
/// Logins are case-folded. Ties in count are broken by login. Authors
/// without an assisted PR have every PR on the "before" side. `ranges` must
/// be sorted and disjoint.
pub fn top_contributors(records: &[Record], ranges: &[WeekRange], n: usize) -> Vec<ContributorStat> {
    if n == 0 {
        return Vec::new();
    }

    let mut by_author: BTreeMap<String, Vec<&Record>> = BTreeMap::new();
    for record in records {
        by_author.entry(record.author.to_lowercase()).or_default().push(record);
    }

    let mut ranked: Vec<(String, Vec<&Record>)> = by_author.into_iter().collect();
    // BTreeMap order is ascending login; a stable sort keeps it for ties.
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(n);

    let stats: Vec<ContributorStat> = ranked
        .into_iter()
        .map(|(login, prs)| {
            let first_flagged_at = prs
                .iter()
                .filter(|r| r.assisted)
                .map(|r| r.merged_at)
                .min();
            let (before, after): (Vec<&Record>, Vec<&Record>) = match first_flagged_at {
                Some(split) => prs.iter().partition(|r| r.merged_at < split),
                None => (prs.clone(), Vec::new()),
            };

            let before_rate = rate(&before, ranges);
            let after_rate = rate(&after, ranges);
            let pct_change = if before_rate > 0.0 {
                round_to((after_rate - before_rate) / before_rate * 100.0, 1)
            } else {
                0.0
            };

            ContributorStat {
                login,
                total_prs: prs.len() as u32,
                before_prs: before.len() as u32,
                after_prs: after.len() as u32,
                before_rate,
                after_rate,
                pct_change,
                has_flag: first_flagged_at.is_some(),
                first_flagged_at,
            }
        })
        .collect();

    debug!(
        event = event_names::CONTRIBUTORS_RANKED,
        stage = %Stage::Contributors,
        ranked = stats.len(),
        flagged = stats.iter().filter(|s| s.has_flag).count(),
        "top contributors computed"
    );

    stats
}
