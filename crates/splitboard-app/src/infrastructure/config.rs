//! TOML configuration for the keyboard.
//!
//! The file is optional and read-only: a missing file yields
//! [`AppConfig::default()`], and nothing is ever written back.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [injection]
//! encoding = "scan_code"      # or "virtual_key" (default)
//! focus_diagnostics = true
//!
//! [repeat]
//! delay_ms = 500
//! interval_ms = 50
//! ```
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent, so partial files are fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use splitboard_core::KeyEncoding;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error other than "not found".
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub injection: InjectionConfig,
    #[serde(default)]
    pub repeat: RepeatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InjectionConfig {
    #[serde(default)]
    pub encoding: KeyEncoding,
    /// Record the focused window before each injection.
    #[serde(default = "default_true")]
    pub focus_diagnostics: bool,
}

/// Auto-repeat timing handed to the GUI; the core never waits on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepeatConfig {
    #[serde(default = "default_repeat_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_repeat_interval_ms")]
    pub interval_ms: u64,
}

impl RepeatConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_repeat_delay_ms() -> u64 {
    500
}
fn default_repeat_interval_ms() -> u64 {
    50
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            encoding: KeyEncoding::default(),
            focus_diagnostics: default_true(),
        }
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_repeat_delay_ms(),
            interval_ms: default_repeat_interval_ms(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses config TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads `AppConfig` from `path`, or returns the defaults when no path is
/// given or the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
