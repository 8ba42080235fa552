//! Transition executor.
//!
//! Applies an accepted enabled/disabled state to every registered device.
//! Roles are handled independently: an unset or stale slot is skipped, a
//! failing device is logged, and neither affects the other role. Nothing
//! is rolled back or retried.

use crate::registry::{DeviceHandleRegistry, Slot};
use serde::Serialize;
use touch_common::device::{DeviceError, DeviceRole};
use tracing::{error, info, warn};

/// What happened to one role during a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum DeviceOutcome {
    /// The device primitive was invoked and returned success.
    Applied,
    /// No live device for this role.
    Skipped,
    /// The device primitive was invoked and reported an error.
    Failed(String),
}

/// Per-role result of one accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionReport {
    /// State that was applied.
    pub desired: bool,
    outcomes: [DeviceOutcome; 2],
}

impl TransitionReport {
    /// Outcome for a single role.
    pub fn outcome(&self, role: DeviceRole) -> &DeviceOutcome {
        &self.outcomes[role.index()]
    }

    /// Number of devices that acknowledged the transition.
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DeviceOutcome::Applied))
            .count()
    }

    /// True if any device primitive failed.
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, DeviceOutcome::Failed(_)))
    }
}

/// Invoke `enable()` or `disable()` on each registered device.
///
/// Always completes. Must be called with the controller lock held so the
/// registry cannot change mid-transition.
pub fn apply(registry: &DeviceHandleRegistry, desired: bool) -> TransitionReport {
    let outcomes = DeviceRole::ALL.map(|role| apply_one(registry, role, desired));
    TransitionReport { desired, outcomes }
}

fn apply_one(registry: &DeviceHandleRegistry, role: DeviceRole, desired: bool) -> DeviceOutcome {
    let device = match registry.slot(role) {
        Slot::Registered(device) => device,
        Slot::Unset => {
            warn!("{} not registered, skipping", role.describe());
            return DeviceOutcome::Skipped;
        }
        Slot::Stale => {
            warn!("{} handle is stale (device dropped), skipping", role.describe());
            return DeviceOutcome::Skipped;
        }
    };

    let result: Result<(), DeviceError> = if desired {
        info!("Enabling {} {}", device.name(), role.describe());
        device.enable()
    } else {
        info!("Disabling {} {}", device.name(), role.describe());
        device.disable()
    };

    match result {
        Ok(()) => DeviceOutcome::Applied,
        Err(e) => {
            error!(
                "Failed to {} {} ({}): {}",
                if desired { "enable" } else { "disable" },
                device.name(),
                role,
                e
            );
            DeviceOutcome::Failed(e.to_string())
        }
    }
}
