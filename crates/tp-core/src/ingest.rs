//! Turning raw pull-request facts into analysis records.
//!
//! Raw facts are handed over by the acquisition layer already fetched; this
//! module only filters, derives durations, and classifies.

use chrono::{DateTime, Utc};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tp_common::{Error, Record, Result};
use tp_config::AnalysisConfig;
use tracing::info;

use crate::logging::{event_names, Stage};

/// A pull request as delivered by the acquisition layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawPullRequest {
    pub number: u64,
    pub title: String,
    pub author_login: String,
    /// The author is a bot account.
    #[serde(default)]
    pub author_is_bot: bool,
    pub created_at: DateTime<Utc>,
    /// `None` for pull requests that were closed without merging.
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changed_files: u64,
    /// First ready-for-review event. Absent for PRs never opened as draft.
    #[serde(default)]
    pub ready_for_review_at: Option<DateTime<Utc>>,
    /// First submitted review.
    #[serde(default)]
    pub first_review_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub commits: Vec<RawCommit>,
}

/// One commit on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawCommit {
    #[serde(default)]
    pub authored_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
    /// Linked account of the commit author, if any.
    #[serde(default)]
    pub author_login: Option<String>,
}

/// Compiled ingestion rules.
#[derive(Debug, Clone)]
pub struct IngestRules {
    exclude: BTreeSet<String>,
    login_prefix: String,
    coauthor: Regex,
    revert: Regex,
}

impl IngestRules {
    /// Compile the rules from an analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            exclude: config
                .exclude_authors
                .iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
            login_prefix: config.assist.login_prefix.to_lowercase(),
            coauthor: compile(&config.assist.coauthor_pattern)?,
            revert: compile(&config.revert_pattern)?,
        })
    }

    /// Whether the login is on the exclusion list (case-insensitive).
    pub fn is_excluded(&self, login: &str) -> bool {
        self.exclude.contains(&login.to_lowercase())
    }

    fn is_assisted(&self, login: &str, commits: &[RawCommit]) -> bool {
        (!self.login_prefix.is_empty() && login.starts_with(&self.login_prefix))
            || commits.iter().any(|c| self.coauthor.is_match(&c.message))
    }

    fn is_revert(&self, title: &str) -> bool {
        self.revert.is_match(title)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Default)]
struct Dropped {
    bots: usize,
    excluded: usize,
    unmerged: usize,
    drafts: usize,
}

/// Filter raw pull requests and derive one [`Record`] per qualifying PR.
///
/// Bots, excluded authors, unmerged and draft PRs are dropped. Durations
/// are hours rounded to two decimals:
/// - review time: ready-for-review to merge
/// - coding time: earliest commit to ready-for-review, clamped at zero
/// - review turnaround: creation to first review
///
/// Coding and review time need a ready-for-review event; turnaround is
/// missing when there is no review or the review predates creation.
pub fn ingest(raw: &[RawPullRequest], rules: &IngestRules) -> Vec<Record> {
    let mut dropped = Dropped::default();
    let mut records = Vec::with_capacity(raw.len());

    for pr in raw {
        if pr.author_is_bot {
            dropped.bots += 1;
            continue;
        }
        let login = pr.author_login.to_lowercase();
        if rules.exclude.contains(&login) {
            dropped.excluded += 1;
            continue;
        }
        let Some(merged_at) = pr.merged_at else {
            dropped.unmerged += 1;
            continue;
        };
        if pr.is_draft {
            dropped.drafts += 1;
            continue;
        }

        let (coding_time_hours, review_time_hours) = match pr.ready_for_review_at {
            Some(ready) => (
                earliest_commit(&pr.commits).map(|first| {
                    if ready >= first {
                        hours_between(first, ready)
                    } else {
                        0.0
                    }
                }),
                (merged_at >= ready).then(|| hours_between(ready, merged_at)),
            ),
            None => (None, None),
        };

        let review_turnaround_hours = pr
            .first_review_at
            .filter(|review| *review >= pr.created_at)
            .map(|review| hours_between(pr.created_at, review));

        let mut commits_by_author: BTreeMap<String, u32> = BTreeMap::new();
        for commit in &pr.commits {
            if let Some(author) = commit.author_login.as_deref().filter(|a| !a.is_empty()) {
                *commits_by_author.entry(author.to_lowercase()).or_default() += 1;
            }
        }

        records.push(Record {
            number: pr.number,
            merged_at,
            created_at: pr.created_at,
            assisted: rules.is_assisted(&login, &pr.commits),
            revert: rules.is_revert(&pr.title),
            author: login,
            additions: pr.additions,
            deletions: pr.deletions,
            changed_files: pr.changed_files,
            coding_time_hours,
            review_time_hours,
            review_turnaround_hours,
            commits_by_author,
        });
    }

    info!(
        event = event_names::INGEST_FINISHED,
        stage = %Stage::Ingest,
        kept = records.len(),
        bots = dropped.bots,
        excluded = dropped.excluded,
        unmerged = dropped.unmerged,
        drafts = dropped.drafts,
        "pull requests ingested"
    );

    records
}

fn earliest_commit(commits: &[RawCommit]) -> Option<DateTime<Utc>> {
    commits.iter().filter_map(|c| c.authored_at).min()
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let hours = (to - from).num_seconds() as f64 / 3600.0;
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, h, m, 0).unwrap()
    }

    fn raw(number: u64, login: &str) -> RawPullRequest {
        RawPullRequest {
            number,
            title: format!("Change {number}"),
            author_login: login.to_string(),
            author_is_bot: false,
            created_at: at(5, 9, 0),
            merged_at: Some(at(6, 17, 0)),
            is_draft: false,
            additions: 10,
            deletions: 2,
            changed_files: 1,
            ready_for_review_at: None,
            first_review_at: None,
            commits: Vec::new(),
        }
    }

    fn commit(authored_at: DateTime<Utc>, message: &str, login: Option<&str>) -> RawCommit {
        RawCommit {
            authored_at: Some(authored_at),
            message: message.to_string(),
            author_login: login.map(str::to_string),
        }
    }

    fn rules() -> IngestRules {
        IngestRules::from_config(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn drops_bots_excluded_unmerged_and_drafts() {
        let mut bot = raw(1, "helper");
        bot.author_is_bot = true;
        let excluded = raw(2, "Dependabot[bot]");
        let mut unmerged = raw(3, "alice");
        unmerged.merged_at = None;
        let mut draft = raw(4, "alice");
        draft.is_draft = true;
        let kept = raw(5, "Alice");

        let records = ingest(&[bot, excluded, unmerged, draft, kept], &rules());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number, 5);
        assert_eq!(records[0].author, "alice");
    }

    #[test]
    fn durations_need_a_ready_event() {
        let mut pr = raw(1, "alice");
        pr.commits = vec![commit(at(5, 8, 0), "wip", Some("alice"))];
        let records = ingest(&[pr], &rules());
        assert_eq!(records[0].coding_time_hours, None);
        assert_eq!(records[0].review_time_hours, None);
    }

    #[test]
    fn durations_are_rounded_hours() {
        let mut pr = raw(1, "alice");
        pr.commits = vec![
            commit(at(5, 8, 0), "second", None),
            commit(at(5, 7, 0), "first", None),
        ];
        pr.ready_for_review_at = Some(at(5, 10, 20));
        pr.first_review_at = Some(at(5, 9, 10));
        let rec = &ingest(&[pr], &rules())[0];
        // 07:00 -> 10:20 = 3h20m
        assert_eq!(rec.coding_time_hours, Some(3.33));
        // 10:20 on the 5th -> 17:00 on the 6th = 30h40m
        assert_eq!(rec.review_time_hours, Some(30.67));
        // 09:00 -> 09:10
        assert_eq!(rec.review_turnaround_hours, Some(0.17));
    }

    #[test]
    fn coding_time_clamps_when_commit_postdates_ready() {
        let mut pr = raw(1, "alice");
        pr.commits = vec![commit(at(5, 12, 0), "late", None)];
        pr.ready_for_review_at = Some(at(5, 10, 0));
        let rec = &ingest(&[pr], &rules())[0];
        assert_eq!(rec.coding_time_hours, Some(0.0));
    }

    #[test]
    fn review_before_creation_is_missing() {
        let mut pr = raw(1, "alice");
        pr.first_review_at = Some(at(4, 12, 0));
        let rec = &ingest(&[pr], &rules())[0];
        assert_eq!(rec.review_turnaround_hours, None);
    }

    #[test]
    fn assisted_by_prefix_or_trailer() {
        let by_prefix = raw(1, "Ona-Agent");
        let mut by_trailer = raw(2, "bob");
        by_trailer.commits = vec![commit(
            at(5, 8, 0),
            "Fix flake\n\nCo-authored-by: Ona <no-reply@ona.com>",
            Some("bob"),
        )];
        let plain = raw(3, "carol");

        let records = ingest(&[by_prefix, by_trailer, plain], &rules());
        let flags: Vec<bool> = records.iter().map(|r| r.assisted).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn revert_titles_are_flagged() {
        let mut a = raw(1, "alice");
        a.title = "Revert \"Add cache\"".to_string();
        let mut b = raw(2, "alice");
        b.title = "Rolled back migration".to_string();
        let mut c = raw(3, "alice");
        c.title = "Add irreverent easter egg".to_string();

        let records = ingest(&[a, b, c], &rules());
        let flags: Vec<bool> = records.iter().map(|r| r.revert).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn commits_are_counted_per_linked_author() {
        let mut pr = raw(1, "alice");
        pr.commits = vec![
            commit(at(5, 7, 0), "a", Some("Alice")),
            commit(at(5, 8, 0), "b", Some("alice")),
            commit(at(5, 9, 0), "c", Some("bob")),
            commit(at(5, 9, 30), "d", None),
        ];
        let rec = &ingest(&[pr], &rules())[0];
        assert_eq!(rec.commits_by_author.get("alice"), Some(&2));
        assert_eq!(rec.commits_by_author.get("bob"), Some(&1));
        assert_eq!(rec.commits_by_author.len(), 2);
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        let mut cfg = AnalysisConfig::default();
        cfg.revert_pattern = "(".to_string();
        let err = IngestRules::from_config(&cfg).unwrap_err();
        assert_eq!(err.code(), 12);
    }
}
