//! Throughput analysis configuration.
//!
//! This crate provides:
//! - Typed settings for the analysis (`AnalysisConfig`)
//! - Config file resolution (explicit path → env → XDG → defaults)
//! - TOML/JSON loading and semantic validation

pub mod load;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use load::{load_config, load_resolved, ResolvedConfig};
pub use resolve::{resolve_config_path, ConfigPath, ConfigSource};
pub use settings::{AnalysisConfig, AssistRules, Period};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
