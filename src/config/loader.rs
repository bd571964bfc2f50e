//! Configuration file loading with precedence handling.

use crate::model::{Direction, DEFAULT_STICKY_CLASS};
use crate::scenario::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCROLLSTICK_CONFIG";

/// Environment variable overriding the default direction filter.
pub const DIRECTION_ENV: &str = "SCROLLSTICK_DIRECTION";

/// Environment variable overriding the report format.
pub const FORMAT_ENV: &str = "SCROLLSTICK_FORMAT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override environment variable holds an unusable value.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/scrollstick/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Class attached to stuck elements.
    #[serde(default)]
    pub sticky_class: Option<String>,

    /// Wrap targets in a height guard.
    #[serde(default)]
    pub guard_height: Option<bool>,

    /// Minimum scroll velocity to stick.
    #[serde(default)]
    pub delta: Option<f64>,

    /// Direction filter (`both`, `up`, `down`).
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Report format (`text`, `json`).
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Default sticky class.
    pub sticky_class: String,
    /// Default guard setting.
    pub guard_height: bool,
    /// Default velocity threshold.
    pub delta: f64,
    /// Default direction filter.
    pub direction: Direction,
    /// Report format.
    pub format: OutputFormat,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            sticky_class: DEFAULT_STICKY_CLASS.to_string(),
            guard_height: true,
            delta: 0.0,
            direction: Direction::Both,
            format: OutputFormat::Text,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/scrollstick/scrollstick.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scrollstick").join("scrollstick.log")
    } else {
        PathBuf::from("scrollstick.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/scrollstick/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scrollstick").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SCROLLSTICK_CONFIG` environment variable
/// 3. Default path `~/.config/scrollstick/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        sticky_class: config.sticky_class.unwrap_or(defaults.sticky_class),
        guard_height: config.guard_height.unwrap_or(defaults.guard_height),
        delta: config.delta.unwrap_or(defaults.delta),
        direction: config.direction.unwrap_or(defaults.direction),
        format: config.format.unwrap_or(defaults.format),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SCROLLSTICK_DIRECTION`: Override direction filter
/// - `SCROLLSTICK_FORMAT`: Override report format
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] when a set variable cannot be parsed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(direction) = std::env::var(DIRECTION_ENV) {
        config.direction = direction.parse().map_err(|e: crate::model::InvalidDirection| {
            ConfigError::InvalidEnv {
                var: DIRECTION_ENV,
                reason: e.to_string(),
            }
        })?;
    }

    if let Ok(format) = std::env::var(FORMAT_ENV) {
        config.format = format.parse().map_err(|e: crate::scenario::InvalidFormat| {
            ConfigError::InvalidEnv {
                var: FORMAT_ENV,
                reason: e.to_string(),
            }
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    direction_override: Option<Direction>,
    delta_override: Option<f64>,
    format_override: Option<OutputFormat>,
) -> ResolvedConfig {
    if let Some(direction) = direction_override {
        config.direction = direction;
    }

    if let Some(delta) = delta_override {
        config.delta = delta;
    }

    if let Some(format) = format_override {
        config.format = format;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
