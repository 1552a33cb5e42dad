//! Structured logging for the analysis.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - JSON lines for pipelines and agents
//!
//! # Usage
//!
//! ```ignore
//! use tp_core::logging::{init_logging, LogConfig, event_names};
//!
//! init_logging(&LogConfig::from_env(None, None))?;
//! tracing::info!(event = event_names::INGEST_FINISHED, kept = 120, "records ingested");
//! ```
//!
//! stdout is left to the caller's payload; all log output goes to stderr.

pub mod config;
pub mod events;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, Stage};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(config.filter_directives())
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    }
}

/// Initialize logging from the environment (for tests and simple cases).
pub fn init_default_logging() -> Result<(), TryInitError> {
    init_logging(&LogConfig::from_env(None, None))
}
