//! TOML configuration loading.
//!
//! Any `Deserialize` type gets [`ConfigLoader::load`] for free. Services
//! embed [`SharedConfig`] under a `[shared]` table for the settings every
//! touch disabler deployment carries (log level, instance name).
//!
//! ```rust,no_run
//! use serde::Deserialize;
//! use std::path::Path;
//! use touch_common::config::{ConfigError, ConfigLoader, SharedConfig};
//!
//! #[derive(Debug, Deserialize)]
//! struct BoardConfig {
//!     shared: SharedConfig,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let board = BoardConfig::load(Path::new("/etc/touch_disabler.toml"))?;
//!     board.shared.validate()?;
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Why a configuration file could not be used.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// File unreadable or not valid TOML for the target type.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Well-formed but semantically wrong.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Verbosity of the service log, as written in TOML (`"debug"`, `"warn"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing` env filters.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// `[shared]` table: settings common to every deployment.
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "touch_disabler"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Defaults to `info` when omitted.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Instance name shown in startup logs.
    pub service_name: String,
}

impl SharedConfig {
    /// Reject an empty `service_name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a TOML file straight into `Self`.
///
/// A missing file is `FileNotFound`; any other read failure and any TOML
/// or type mismatch is `ParseError`. Semantic checks are left to the
/// caller's own `validate()`.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound,
            _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct LevelOnly {
        level: LogLevel,
    }

    #[test]
    fn omitted_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn level_names_match_filter_directives() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let text = format!("level = \"{}\"", level.as_directive());
            let parsed: LevelOnly = toml::from_str(&text).unwrap();
            assert_eq!(parsed.level, level);
        }
    }

    #[test]
    fn empty_service_name_fails_validation() {
        let mut shared = SharedConfig {
            log_level: LogLevel::Warn,
            service_name: "touch_disabler".to_string(),
        };
        assert!(shared.validate().is_ok());

        shared.service_name.clear();
        assert!(matches!(
            shared.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
