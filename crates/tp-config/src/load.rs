//! Reading configuration files.

use crate::resolve::{resolve_config_path, ConfigSource};
use crate::settings::AnalysisConfig;
use crate::validate::{validate_config, ValidationError, ValidationResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loaded configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AnalysisConfig,
    /// File the configuration came from (None if using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Load and validate a configuration file.
///
/// The format follows the extension: `.toml` or `.json`.
pub fn load_config(path: &Path) -> ValidationResult<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;

    let config = parse_config(path, &content)?;
    validate_config(&config)?;
    Ok(config)
}

fn parse_config(path: &Path, content: &str) -> ValidationResult<AnalysisConfig> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("toml") => toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("{}: {}", path.display(), e))),
        Some("json") => serde_json::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("{}: {}", path.display(), e))),
        _ => Err(ValidationError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Resolve, load, and validate the configuration.
///
/// With no file anywhere in the resolution order, the validated defaults
/// are returned.
pub fn load_resolved(explicit: Option<&Path>) -> ValidationResult<ResolvedConfig> {
    let resolved = resolve_config_path(explicit);

    let config = match &resolved.path {
        Some(path) => load_config(path)?,
        None => {
            let config = AnalysisConfig::default();
            validate_config(&config)?;
            config
        }
    };

    debug!(
        source = %resolved.source,
        path = ?resolved.path,
        period = %config.period,
        "configuration loaded"
    );

    Ok(ResolvedConfig {
        config,
        path: resolved.path,
        source: resolved.source,
    })
}
