//! Prelude module for common re-exports.
//!
//! ```rust
//! use touch_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Control ────────────────────────────────────────────────────────
pub use crate::control::{
    ControlError, ControlMode, RequestOrigin, parse_enabled_token, parse_mode_token,
};

// ─── Devices ────────────────────────────────────────────────────────
pub use crate::device::{DeviceError, DeviceRole, TouchDevice};
