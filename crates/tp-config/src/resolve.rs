//! Configuration path discovery.
//!
//! Resolution order: explicit path → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Where the configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed in by the caller.
    Explicit,

    /// Set via `TP_CONFIG` or `TP_CONFIG_DIR`.
    Environment,

    /// Found in the XDG config directory.
    XdgConfig,

    /// No file; built-in defaults apply.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved configuration location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath {
    /// File to load, `None` for built-in defaults.
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Environment variable names.
const ENV_CONFIG_PATH: &str = "TP_CONFIG";
const ENV_CONFIG_DIR: &str = "TP_CONFIG_DIR";

/// Candidate file names inside a config directory, in preference order.
const CONFIG_FILENAMES: [&str; 2] = ["throughput.toml", "throughput.json"];

/// Application name for XDG directories.
const APP_NAME: &str = "throughput";

/// Resolve the configuration file using the standard order:
///
/// 1. Explicit path (returned even if missing, so loading reports it)
/// 2. `TP_CONFIG` (direct path)
/// 3. `TP_CONFIG_DIR` + `throughput.toml` / `throughput.json`
/// 4. XDG config directory (`~/.config/throughput/`)
/// 5. Built-in defaults
pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigPath {
    resolve_with(explicit, |key| std::env::var(key).ok(), xdg_config_dir())
}

/// Resolution with injectable environment and XDG directory.
pub(crate) fn resolve_with(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    xdg_dir: Option<PathBuf>,
) -> ConfigPath {
    if let Some(path) = explicit {
        return ConfigPath {
            path: Some(path.to_path_buf()),
            source: ConfigSource::Explicit,
        };
    }

    if let Some(env_path) = env(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return ConfigPath {
                path: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    if let Some(dir) = env(ENV_CONFIG_DIR) {
        if let Some(path) = first_existing(Path::new(&dir)) {
            return ConfigPath {
                path: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    if let Some(dir) = xdg_dir {
        if let Some(path) = first_existing(&dir) {
            return ConfigPath {
                path: Some(path),
                source: ConfigSource::XdgConfig,
            };
        }
    }

    ConfigPath::default()
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// The XDG config directory for throughput.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
