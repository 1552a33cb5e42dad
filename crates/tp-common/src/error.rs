//! Error types for throughput analysis.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - A category for grouping
//! - A remediation hint for humans
//!
//! Missing data is never an error. Durations without data are `None`,
//! rates with a zero denominator are `0.0`, and statistics that cannot be
//! computed are reported through `tp_core::NotComputable`. This type covers
//! structural faults: bad configuration, malformed week partitions, and I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for throughput operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file or value errors.
    Config,
    /// Malformed input handed over by the acquisition layer.
    Input,
    /// Internal analysis failures.
    Analysis,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Analysis => write!(f, "analysis"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for throughput analysis.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    // Input errors (20-29)
    #[error("week range ends before it starts: {start}..{end}")]
    InvalidWeekRange { start: String, end: String },

    #[error("week ranges overlap or are out of order: range ending {previous_end} followed by range starting {next_start}")]
    OverlappingWeekRanges {
        previous_end: String,
        next_start: String,
    },

    #[error("no week ranges supplied")]
    EmptyWeekRanges,

    // Analysis errors (30-39)
    #[error("analysis failed: {0}")]
    Analysis(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Analysis errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig { .. } => 11,
            Error::InvalidPattern { .. } => 12,
            Error::InvalidWeekRange { .. } => 20,
            Error::OverlappingWeekRanges { .. } => 21,
            Error::EmptyWeekRanges => 22,
            Error::Analysis(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Parse(_) => 62,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidConfig { .. } | Error::InvalidPattern { .. } => {
                ErrorCategory::Config
            }
            Error::InvalidWeekRange { .. }
            | Error::OverlappingWeekRanges { .. }
            | Error::EmptyWeekRanges => ErrorCategory::Input,
            Error::Analysis(_) => ErrorCategory::Analysis,
            Error::Io(_) | Error::Json(_) | Error::Parse(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::InvalidConfig { .. } => {
                "Check the analysis configuration file against the documented ranges."
            }
            Error::InvalidPattern { .. } => {
                "Fix the regular expression in the configuration; it must compile as a Rust regex."
            }
            Error::InvalidWeekRange { .. } | Error::EmptyWeekRanges => {
                "Week ranges must be Monday-aligned 7-day spans; regenerate them with compute_week_ranges."
            }
            Error::OverlappingWeekRanges { .. } => {
                "Week ranges must be sorted and disjoint. Overlapping buckets are rejected rather than tie-broken."
            }
            Error::Analysis(_) => "Report as a bug with the input dataset attached.",
            Error::Io(_) => "Check that the file exists and is readable.",
            Error::Json(_) | Error::Parse(_) => {
                "The file is not valid for its extension. Check its syntax."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_grouped_by_category() {
        let config = Error::InvalidConfig {
            field: "window_pct".into(),
            message: "must be in 1..=49".into(),
        };
        assert_eq!(config.code(), 11);
        assert_eq!(config.category(), ErrorCategory::Config);

        let overlap = Error::OverlappingWeekRanges {
            previous_end: "2026-01-11".into(),
            next_start: "2026-01-10".into(),
        };
        assert_eq!(overlap.code(), 21);
        assert_eq!(overlap.category(), ErrorCategory::Input);

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.code(), 60);
        assert_eq!(io.category(), ErrorCategory::Io);
    }

    #[test]
    fn display_includes_context() {
        let err = Error::InvalidPattern {
            pattern: "(".into(),
            message: "unclosed group".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"(\""));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::Input).unwrap();
        assert_eq!(json, "\"input\"");
        assert_eq!(ErrorCategory::Analysis.to_string(), "analysis");
    }

    #[test]
    fn every_error_has_remediation() {
        let errors = [
            Error::Config("x".into()),
            Error::EmptyWeekRanges,
            Error::Analysis("x".into()),
            Error::Parse("x".into()),
        ];
        for err in errors {
            assert!(!err.remediation().is_empty());
        }
    }
}
