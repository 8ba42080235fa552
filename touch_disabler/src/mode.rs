//! Mode controller.
//!
//! State machine over `(mode, enabled)`:
//!
//! ```text
//!            set_mode(Manual)
//!   (Auto, *) ───────────────► (Manual, *)
//!       ▲   ◄───────────────       │
//!       │      set_mode(Auto)      │
//!  request(Panel, x)        request(Operator, x)
//!  enabled := x             enabled := x
//! ```
//!
//! Initial state is `(Auto, Disabled)`. Switching mode never touches
//! `enabled`; it only changes which origin may alter it next.

use touch_common::control::{ControlError, ControlMode, RequestOrigin};

/// Authority and logical state of the touch devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeController {
    mode: ControlMode,
    enabled: bool,
}

impl ModeController {
    pub const fn new() -> Self {
        Self {
            mode: ControlMode::Auto,
            enabled: false,
        }
    }

    #[inline]
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Last accepted logical state, independent of per-device outcome.
    #[inline]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Switch mode. Always succeeds; returns the previous mode.
    pub fn set_mode(&mut self, mode: ControlMode) -> ControlMode {
        std::mem::replace(&mut self.mode, mode)
    }

    /// Check whether `origin` may drive the enabled state right now.
    #[inline]
    pub fn check_authority(&self, origin: RequestOrigin) -> Result<(), ControlError> {
        if self.mode.authority() == origin {
            Ok(())
        } else {
            Err(ControlError::NotPermitted {
                origin,
                mode: self.mode,
            })
        }
    }

    /// Accept or reject a transition request.
    ///
    /// On acceptance `enabled` is set to `desired` (even if unchanged);
    /// the caller is then responsible for applying it to the devices.
    /// On rejection nothing changes.
    pub fn request(&mut self, origin: RequestOrigin, desired: bool) -> Result<(), ControlError> {
        self.check_authority(origin)?;
        self.enabled = desired;
        Ok(())
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
