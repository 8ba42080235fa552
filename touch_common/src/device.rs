//! Touch device roles and the device capability trait.
//!
//! This module defines:
//! - `DeviceRole` enum - The two device slots the controller drives
//! - `TouchDevice` trait - Enable/disable primitives provided by a device driver
//! - `DeviceError` enum - Failures reported by those primitives

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by a device driver's enable/disable primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Bus or transport failure while talking to the device
    #[error("I/O error: {0}")]
    Io(String),

    /// Device is busy and refused the request
    #[error("Device busy: {0}")]
    Busy(String),

    /// Any other driver-reported failure
    #[error("Device error: {0}")]
    Other(String),
}

/// Role a touch input device plays on the board.
///
/// Closed set: a touchscreen and an optional separate touch-key device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DeviceRole {
    /// Touch panel layered over the display.
    TouchScreen = 0,
    /// Capacitive navigation keys beside the display.
    TouchKey = 1,
}

impl DeviceRole {
    /// Every role, in the order transitions are applied.
    pub const ALL: [DeviceRole; 2] = [DeviceRole::TouchScreen, DeviceRole::TouchKey];

    /// Slot index for fixed-size per-role storage.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable description used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::TouchScreen => "touch panel",
            Self::TouchKey => "touch keys",
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TouchScreen => write!(f, "touchscreen"),
            Self::TouchKey => write!(f, "touchkey"),
        }
    }
}

impl FromStr for DeviceRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "touchscreen" | "ts" => Ok(Self::TouchScreen),
            "touchkey" | "tk" => Ok(Self::TouchKey),
            _ => Err(format!(
                "unknown DeviceRole: {s:?}, expected \"touchscreen\" or \"touchkey\""
            )),
        }
    }
}

/// Capability exposed by a touch device driver.
///
/// The driver owns the device; the controller only keeps a non-owning
/// reference and calls these primitives when a transition is accepted.
///
/// # Contract
///
/// - `enable()` / `disable()` are idempotent on the real device
/// - Both may block briefly but must return in bounded time
/// - A failure is reported, never retried by the caller
pub trait TouchDevice: Send + Sync {
    /// Device name used in diagnostics (e.g., "sec_touchscreen").
    fn name(&self) -> &str;

    /// Open the input device so it reports events again.
    fn enable(&self) -> Result<(), DeviceError>;

    /// Close the input device so it stops reporting events.
    fn disable(&self) -> Result<(), DeviceError>;
}
