//! Fuzz target for the full analysis over arbitrary pull requests.
//!
//! Any JSON that deserializes into pull requests must analyze without
//! panicking.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use tp_config::AnalysisConfig;
use tp_core::{analyze, compute_week_ranges, ingest, IngestRules, RawPullRequest};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<Vec<RawPullRequest>>(data) else {
        return;
    };
    let Some(today) = NaiveDate::from_ymd_opt(2026, 3, 4) else {
        return;
    };
    let config = AnalysisConfig::default();
    let Ok(rules) = IngestRules::from_config(&config) else {
        return;
    };
    let records = ingest(&raw, &rules);
    let ranges = compute_week_ranges(today, config.weeks);
    let _ = analyze(&records, &ranges, &config);
});
