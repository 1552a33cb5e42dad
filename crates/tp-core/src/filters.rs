//! Population filters applied before and after weekly aggregation.

use std::collections::{BTreeMap, BTreeSet};
use tp_common::{Record, WeekRange};
use tracing::info;

use crate::logging::{event_names, Stage};
use crate::weekly::WeekStat;

/// Records left after dropping the least active contributors.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorFilter {
    pub kept: Vec<Record>,
    /// Excluded logins, ascending by PR count then login.
    pub excluded: Vec<String>,
}

/// Drop the bottom `pct` percent of authors by PR count.
///
/// Authors are ranked by case-folded login and count ascending (ties by
/// login). The first
/// `⌊authors·pct/100⌋` are excluded, along with anyone whose count does not
/// exceed the last excluded author's. `pct` of 0 or at least 100 keeps
/// everything.
pub fn exclude_bottom_contributors(records: Vec<Record>, pct: u32) -> ContributorFilter {
    if pct == 0 || pct >= 100 {
        return ContributorFilter {
            kept: records,
            excluded: Vec::new(),
        };
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        *counts.entry(record.author.to_lowercase()).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let cutoff = ranked.len() * pct as usize / 100;
    let Some(&(_, ceiling)) = cutoff.checked_sub(1).and_then(|i| ranked.get(i)) else {
        return ContributorFilter {
            kept: records,
            excluded: Vec::new(),
        };
    };

    let excluded: Vec<String> = ranked
        .iter()
        .take_while(|(_, count)| *count <= ceiling)
        .map(|(login, _)| login.clone())
        .collect();
    let drop: BTreeSet<&str> = excluded.iter().map(String::as_str).collect();
    let kept: Vec<Record> = records
        .iter()
        .filter(|r| !drop.contains(r.author.to_lowercase().as_str()))
        .cloned()
        .collect();

    info!(
        event = event_names::CONTRIBUTORS_EXCLUDED,
        stage = %Stage::Filter,
        excluded = excluded.len(),
        ceiling,
        records_kept = kept.len(),
        records_dropped = records.len() - kept.len(),
        "bottom contributors excluded"
    );

    ContributorFilter { kept, excluded }
}

/// Remove weeks that merged fewer than `min_prs` PRs.
///
/// Returns the surviving weeks and the ranges of the dropped ones. A
/// `min_prs` of 0 keeps every week.
pub fn drop_low_activity_weeks(weeks: Vec<WeekStat>, min_prs: u32) -> (Vec<WeekStat>, Vec<WeekRange>) {
    if min_prs == 0 {
        return (weeks, Vec::new());
    }

    let (kept, dropped): (Vec<WeekStat>, Vec<WeekStat>) =
        weeks.into_iter().partition(|w| w.prs_merged >= min_prs);
    let dropped: Vec<WeekRange> = dropped.into_iter().map(|w| w.week).collect();

    if !dropped.is_empty() {
        info!(
            event = event_names::WEEKS_DROPPED,
            stage = %Stage::Filter,
            min_prs,
            dropped = dropped.len(),
            kept = kept.len(),
            "low-activity weeks dropped"
        );
    }

    (kept, dropped)
}
