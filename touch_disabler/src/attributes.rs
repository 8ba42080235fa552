//! Control surface: the `enabled` and `mode` attributes.
//!
//! Translates attribute reads into newline-terminated text and attribute
//! writes into controller calls. Transport (attribute files, a console,
//! an RPC) is up to the caller; this module only deals in strings.
//!
//! | Attribute | Read               | Write                                    |
//! |-----------|--------------------|------------------------------------------|
//! | `enabled` | `true` / `false`   | `true`/`1`, `false`/`0` (manual mode only) |
//! | `mode`    | `auto` / `manual`  | `auto`/`0`, `manual`/`1`                 |

use crate::controller::TouchDisabler;
use core::fmt;
use core::str::FromStr;
use touch_common::control::{
    ControlError, RequestOrigin, parse_enabled_token, parse_mode_token,
};
use tracing::{info, warn};

/// Attributes exposed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// Logical enabled/disabled state of the touch devices.
    Enabled,
    /// Auto/manual control mode.
    Mode,
}

impl AttributeName {
    pub const ALL: [AttributeName; 2] = [AttributeName::Enabled, AttributeName::Mode];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Mode => "mode",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = ControlError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(Self::Enabled),
            // Older builds named the mode attribute `control`.
            "mode" | "control" => Ok(Self::Mode),
            _ => Err(ControlError::UnknownAttribute(s.to_string())),
        }
    }
}

/// Read/write access to the controller's attributes.
#[derive(Clone, Copy)]
pub struct ControlSurface<'a> {
    controller: &'a TouchDisabler,
}

impl<'a> ControlSurface<'a> {
    pub fn new(controller: &'a TouchDisabler) -> Self {
        Self { controller }
    }

    /// Render an attribute as text, newline-terminated.
    pub fn show(&self, attr: AttributeName) -> String {
        match attr {
            AttributeName::Enabled => format!("{}\n", self.controller.enabled()),
            AttributeName::Mode => format!("{}\n", self.controller.mode()),
        }
    }

    /// Apply a write to an attribute.
    ///
    /// Returns the number of bytes consumed (the whole input) on success.
    ///
    /// # Errors
    ///
    /// - `ControlError::InvalidInput` if the value is not a recognized token
    /// - `ControlError::NotPermitted` for an `enabled` write in auto mode,
    ///   whatever the value
    pub fn store(&self, attr: AttributeName, input: &str) -> Result<usize, ControlError> {
        match attr {
            AttributeName::Mode => self.store_mode(input)?,
            AttributeName::Enabled => self.store_enabled(input)?,
        }
        Ok(input.len())
    }

    fn store_mode(&self, input: &str) -> Result<(), ControlError> {
        let mode = parse_mode_token(input).inspect_err(|e| warn!("{}", e))?;
        self.controller.set_mode(mode);
        Ok(())
    }

    fn store_enabled(&self, input: &str) -> Result<(), ControlError> {
        // Authority is checked before the value so auto mode rejects any write.
        let mode = self.controller.mode();
        if mode.authority() != RequestOrigin::Operator {
            warn!("Input ignored since auto control is enabled");
            return Err(ControlError::NotPermitted {
                origin: RequestOrigin::Operator,
                mode,
            });
        }

        let desired = parse_enabled_token(input).inspect_err(|e| warn!("{}", e))?;
        let report = self.controller.request(RequestOrigin::Operator, desired)?;
        info!(
            "Operator {} touch devices ({} acknowledged)",
            if desired { "enabled" } else { "disabled" },
            report.applied_count()
        );
        Ok(())
    }
}
