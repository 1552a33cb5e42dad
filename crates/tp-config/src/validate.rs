//! Configuration validation errors and semantic validation.

use crate::settings::AnalysisConfig;
use regex::Regex;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 62,
            ValidationError::UnsupportedFormat(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
        }
    }

    fn invalid(field: &str, message: String) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message,
        }
    }
}

/// Validate an analysis configuration semantically.
pub fn validate_config(config: &AnalysisConfig) -> ValidationResult<()> {
    if !(1..=520).contains(&config.weeks) {
        return Err(ValidationError::invalid(
            "weeks",
            format!("Must be in [1, 520], got {}", config.weeks),
        ));
    }

    if !(1..=49).contains(&config.window_pct) {
        return Err(ValidationError::invalid(
            "window_pct",
            format!("Must be in [1, 49], got {}", config.window_pct),
        ));
    }

    if let Some(threshold) = config.assisted_threshold {
        if !(threshold > 0.0 && threshold <= 100.0) {
            return Err(ValidationError::invalid(
                "assisted_threshold",
                format!("Must be in (0, 100], got {}", threshold),
            ));
        }
    }

    if config.exclude_bottom_contributor_pct > 99 {
        return Err(ValidationError::invalid(
            "exclude_bottom_contributor_pct",
            format!("Must be in [0, 99], got {}", config.exclude_bottom_contributor_pct),
        ));
    }

    if !(0.0..100.0).contains(&config.activity_floor_pct) {
        return Err(ValidationError::invalid(
            "activity_floor_pct",
            format!("Must be in [0, 100), got {}", config.activity_floor_pct),
        ));
    }

    if config.min_weeks == 0 {
        return Err(ValidationError::invalid(
            "min_weeks",
            "Must be at least 1".to_string(),
        ));
    }

    if config.exclude_authors.iter().any(|a| a.trim().is_empty()) {
        return Err(ValidationError::invalid(
            "exclude_authors",
            "Entries must not be empty".to_string(),
        ));
    }

    validate_pattern("assist.coauthor_pattern", &config.assist.coauthor_pattern)?;
    validate_pattern("revert_pattern", &config.revert_pattern)?;

    Ok(())
}

fn validate_pattern(field: &str, pattern: &str) -> ValidationResult<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ValidationError::invalid(field, format!("Invalid regex: {}", e)))
}
