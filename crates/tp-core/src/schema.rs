//! JSON Schema generation for analysis input and output types.
//!
//! Presentation and acquisition code can validate what they exchange with
//! the core against these schemas, or generate bindings from them.

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::contributors::ContributorStat;
pub use crate::error::NotComputable;
pub use crate::ingest::RawPullRequest;
pub use crate::metric::Metric;
pub use crate::monthly::MonthGroup;
pub use crate::pipeline::ThroughputReport;
pub use crate::rows::{ConsolidatedRow, Significance, TrendRows};
pub use crate::trend::{PctChange, TrendWindow, WindowMode};
pub use crate::weekly::WeekStat;
pub use tp_common::{Record, WeekRange};
pub use tp_config::AnalysisConfig;

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        // Input types
        ("AnalysisConfig", "Analysis settings (windows, filters, patterns)"),
        ("RawPullRequest", "Pull request facts from the acquisition layer"),
        ("Record", "One qualifying merged pull request"),
        ("WeekRange", "Monday-aligned 7-day analysis bucket"),
        // Aggregates
        ("WeekStat", "Statistics for one week"),
        ("MonthGroup", "Statistics for one calendar month"),
        (
            "ContributorStat",
            "Per-author rates before and after the first assisted PR",
        ),
        // Trend rows
        ("Metric", "Tracked metric name"),
        ("WindowMode", "Positional or threshold window selection"),
        ("PctChange", "Ratio or absolute change between windows"),
        ("TrendWindow", "Window comparison for one metric"),
        ("Significance", "Pearson and Mann-Whitney results for one metric"),
        ("ConsolidatedRow", "Trend window with optional significance"),
        ("TrendRows", "All rows plus skipped metrics"),
        ("NotComputable", "Reason a statistic could not be produced"),
        // Report
        ("ThroughputReport", "Complete analysis output"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns `None` if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "AnalysisConfig" => schema_for!(AnalysisConfig),
        "RawPullRequest" => schema_for!(RawPullRequest),
        "Record" => schema_for!(Record),
        "WeekRange" => schema_for!(WeekRange),
        "WeekStat" => schema_for!(WeekStat),
        "MonthGroup" => schema_for!(MonthGroup),
        "ContributorStat" => schema_for!(ContributorStat),
        "Metric" => schema_for!(Metric),
        "WindowMode" => schema_for!(WindowMode),
        "PctChange" => schema_for!(PctChange),
        "TrendWindow" => schema_for!(TrendWindow),
        "Significance" => schema_for!(Significance),
        "ConsolidatedRow" => schema_for!(ConsolidatedRow),
        "TrendRows" => schema_for!(TrendRows),
        "NotComputable" => schema_for!(NotComputable),
        "ThroughputReport" => schema_for!(ThroughputReport),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    available_schemas()
        .into_iter()
        .filter_map(|(name, _)| generate_schema(name).map(|schema| (name.to_string(), schema)))
        .collect()
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> serde_json::Result<String> {
    match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_schemas_generate() {
        for (name, _desc) in available_schemas() {
            assert!(generate_schema(name).is_some(), "schema for '{}' should generate", name);
        }
        assert_eq!(generate_all_schemas().len(), available_schemas().len());
    }

    #[test]
    fn unknown_schema_returns_none() {
        assert!(generate_schema("UnknownType").is_none());
        assert!(generate_schema("").is_none());
    }

    #[test]
    fn report_schema_describes_trend_outcomes() {
        let schema = generate_schema("ThroughputReport").unwrap();
        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.contains("not_computable"));
        assert!(text.contains("periods_used"));
    }

    #[test]
    fn formats() {
        let schema = generate_schema("PctChange").unwrap();
        let pretty = format_schema(&schema, SchemaFormat::Json).unwrap();
        let compact = format_schema(&schema, SchemaFormat::JsonCompact).unwrap();
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
    }
}
