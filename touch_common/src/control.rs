//! Control mode, request origin and attribute token parsing.
//!
//! `ControlMode` decides which `RequestOrigin` may change the enabled
//! state: Auto defers to the panel, Manual defers to the operator.
//! Attribute writes are parsed by exact match against a closed token set.

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `EINVAL` as reported by attribute transports.
pub const ERRNO_INVALID: i32 = 22;
/// `EPERM` as reported by attribute transports.
pub const ERRNO_NOT_PERMITTED: i32 = 1;

/// Who drives the enabled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Panel blank/unblank notifications drive the enabled state.
    #[default]
    Auto,
    /// Only operator writes drive the enabled state.
    Manual,
}

impl ControlMode {
    /// Attribute rendering (without trailing newline).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }

    /// The only origin whose requests are accepted in this mode.
    #[inline]
    pub const fn authority(self) -> RequestOrigin {
        match self {
            Self::Auto => RequestOrigin::Panel,
            Self::Manual => RequestOrigin::Operator,
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a transition request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOrigin {
    /// Display driver reporting a blank/unblank.
    Panel,
    /// Write to the `enabled` attribute.
    Operator,
}

impl fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => write!(f, "panel"),
            Self::Operator => write!(f, "operator"),
        }
    }
}

/// Rejections surfaced to callers of the control operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// Written value is outside the attribute's token set.
    #[error("invalid input {value:?} for attribute '{attribute}'")]
    InvalidInput {
        attribute: &'static str,
        value: String,
    },

    /// Origin has no authority in the current mode.
    #[error("{origin} request not permitted in {mode} mode")]
    NotPermitted {
        origin: RequestOrigin,
        mode: ControlMode,
    },

    /// No attribute with this name.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
}

impl ControlError {
    /// Errno-style status for transports that report numeric codes.
    pub const fn errno(&self) -> i32 {
        match self {
            Self::NotPermitted { .. } => ERRNO_NOT_PERMITTED,
            Self::InvalidInput { .. } | Self::UnknownAttribute(_) => ERRNO_INVALID,
        }
    }
}

/// Parse a write to the `mode` attribute.
///
/// Accepts exactly `auto`/`0` and `manual`/`1`, ignoring surrounding
/// whitespace (attribute writes usually carry a trailing newline).
pub fn parse_mode_token(input: &str) -> Result<ControlMode, ControlError> {
    match input.trim_ascii() {
        "auto" | "0" => Ok(ControlMode::Auto),
        "manual" | "1" => Ok(ControlMode::Manual),
        other => Err(ControlError::InvalidInput {
            attribute: "mode",
            value: other.to_string(),
        }),
    }
}

/// Parse a write to the `enabled` attribute.
///
/// Accepts exactly `true`/`1` and `false`/`0`, ignoring surrounding whitespace.
pub fn parse_enabled_token(input: &str) -> Result<bool, ControlError> {
    match input.trim_ascii() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ControlError::InvalidInput {
            attribute: "enabled",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_auto() {
        assert_eq!(ControlMode::default(), ControlMode::Auto);
    }

    #[test]
    fn authority_follows_mode() {
        assert_eq!(ControlMode::Auto.authority(), RequestOrigin::Panel);
        assert_eq!(ControlMode::Manual.authority(), RequestOrigin::Operator);
    }

    #[test]
    fn mode_tokens() {
        assert_eq!(parse_mode_token("auto"), Ok(ControlMode::Auto));
        assert_eq!(parse_mode_token("0"), Ok(ControlMode::Auto));
        assert_eq!(parse_mode_token("manual"), Ok(ControlMode::Manual));
        assert_eq!(parse_mode_token("1\n"), Ok(ControlMode::Manual));
    }

    #[test]
    fn mode_tokens_are_exact() {
        // Prefix matches are not accepted.
        for bad in ["manually", "autox", "10", "", "Manual", "bogus"] {
            assert!(
                matches!(
                    parse_mode_token(bad),
                    Err(ControlError::InvalidInput { attribute: "mode", .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn enabled_tokens() {
        assert_eq!(parse_enabled_token("true"), Ok(true));
        assert_eq!(parse_enabled_token("1"), Ok(true));
        assert_eq!(parse_enabled_token("false\n"), Ok(false));
        assert_eq!(parse_enabled_token(" 0 "), Ok(false));
        assert!(parse_enabled_token("yes").is_err());
        assert!(parse_enabled_token("truee").is_err());
    }

    #[test]
    fn errno_mapping() {
        let err = parse_enabled_token("2").unwrap_err();
        assert_eq!(err.errno(), ERRNO_INVALID);

        let err = ControlError::NotPermitted {
            origin: RequestOrigin::Operator,
            mode: ControlMode::Auto,
        };
        assert_eq!(err.errno(), ERRNO_NOT_PERMITTED);
        assert_eq!(err.to_string(), "operator request not permitted in auto mode");
    }
}
