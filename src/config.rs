//! Configuration for the logger middleware.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Verbosity of the events emitted by the logger middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

/// Logger middleware settings.
///
/// Every field is optional in TOML:
///
/// ```toml
/// enabled = true
/// level = "info"
/// include_payload = true
/// include_state = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// When false the middleware passes dispatches through untouched (default: true).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Level of the emitted events (default: debug).
    #[serde(default)]
    pub level: LogLevel,
    /// Log action payloads (default: true).
    #[serde(default = "default_include_payload")]
    pub include_payload: bool,
    /// Log the state before and after each dispatch (default: false).
    /// Requires the state type to implement `Debug`.
    #[serde(default)]
    pub include_state: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_include_payload() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: LogLevel::default(),
            include_payload: default_include_payload(),
            include_state: false,
        }
    }
}

impl LoggerConfig {
    /// Parses TOML text. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.into(),
            source: e,
        })
    }

    /// Loads settings from a TOML file.
    ///
    /// - If the file doesn't exist, returns `LoggerConfig::default()`.
    /// - Returns an error if reading or parsing fails.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Logger config not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = LoggerConfig::from_toml_str("", "inline").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = LoggerConfig::from_toml_str("level = \"warn\"\ninclude_state = true", "inline")
            .unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(config.include_state);
        assert!(config.include_payload);
    }

    #[test]
    fn unknown_level_is_a_parse_error() {
        let err = LoggerConfig::from_toml_str("level = \"loud\"", "inline").unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, PathBuf::from("inline")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
