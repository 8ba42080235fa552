//! Touch Common Library
//!
//! Shared types for the touch disabler workspace: device roles and the
//! device capability trait, control modes and attribute token parsing,
//! and TOML configuration loading.
//!
//! # Module Structure
//!
//! - [`device`] - `DeviceRole`, `TouchDevice` trait, `DeviceError`
//! - [`control`] - `ControlMode`, `RequestOrigin`, token parsing, `ControlError`
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use touch_common::prelude::*;
//!
//! assert_eq!(parse_mode_token("manual\n").unwrap(), ControlMode::Manual);
//! assert_eq!(ControlMode::Auto.authority(), RequestOrigin::Panel);
//! ```

pub mod config;
pub mod control;
pub mod device;
pub mod prelude;
