//! # Touch Disabler Library
//!
//! Links a display panel's power state to the enabled state of its touch
//! input devices (touchscreen and optional touch keys), with an operator
//! override.
//!
//! # Module Structure
//!
//! - [`registry`] - Per-role non-owning device handles
//! - [`mode`] - Auto/manual authority and the logical enabled state
//! - [`executor`] - Applies an accepted transition to each device
//! - [`controller`] - `TouchDisabler`, the lock-guarded composition
//! - [`attributes`] - `enabled` / `mode` text attributes
//! - [`devices`] - Simulated touch devices
//! - [`config`] - Service configuration
//! - [`console`] - Line-oriented operator console
//!
//! # Architecture
//!
//! ```text
//!  panel driver ── notify_panel_state ──┐
//!                                       ▼
//!  operator ── ControlSurface ──► TouchDisabler (Mutex)
//!                                  │  ModeController  (authority check)
//!                                  │  executor::apply (enable/disable)
//!                                  ▼
//!  device drivers ── register ──► DeviceHandleRegistry ──► Weak<dyn TouchDevice>
//! ```

pub mod attributes;
pub mod config;
pub mod console;
pub mod controller;
pub mod devices;
pub mod executor;
pub mod mode;
pub mod registry;

// Re-export key types for convenience
pub use crate::attributes::{AttributeName, ControlSurface};
pub use crate::controller::{ControllerSnapshot, TouchDisabler};
pub use crate::executor::{DeviceOutcome, TransitionReport};
pub use crate::registry::DeviceHandleRegistry;
