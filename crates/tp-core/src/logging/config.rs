//! Logging configuration.
//!
//! Supports configuration via:
//! - Environment variables (TP_LOG, RUST_LOG, TP_LOG_FORMAT)
//! - Explicit overrides from the embedding program

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// Machine-parseable JSON lines.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" | "structured" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    /// Standard operational info (default).
    #[default]
    Info,
    Warn,
    Error,
    /// Completely silent.
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
            LogLevel::Off => tracing_subscriber::filter::LevelFilter::OFF,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Whether to include timestamps in human output.
    pub timestamps: bool,
    /// Raw `RUST_LOG` directives, used verbatim as the filter when present.
    pub directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
            directives: None,
        }
    }
}

impl LogConfig {
    /// Create config from the process environment and explicit overrides.
    pub fn from_env(level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), level, format)
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// `TP_LOG` beats `RUST_LOG`; explicit overrides beat both.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        level: Option<LogLevel>,
        format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        if let Some(val) = lookup("TP_LOG") {
            if let Ok(parsed) = val.parse::<LogLevel>() {
                config.level = parsed;
            }
        } else if let Some(val) = lookup("RUST_LOG") {
            if let Ok(parsed) = val.parse::<LogLevel>() {
                config.level = parsed;
            } else {
                config.directives = Some(val);
            }
        }

        if let Some(val) = lookup("TP_LOG_FORMAT") {
            if let Ok(parsed) = val.parse::<LogFormat>() {
                config.format = parsed;
            }
        }

        if let Some(level) = level {
            config.level = level;
            config.directives = None;
        }
        if let Some(format) = format {
            config.format = format;
        }

        config
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Filter directives handed to `EnvFilter`.
    pub fn filter_directives(&self) -> String {
        match &self.directives {
            Some(raw) => raw.clone(),
            None => format!("tp_core={level},tp_config={level}", level = self.level),
        }
    }
}
