//! Touch disabler controller.
//!
//! `TouchDisabler` is the explicitly owned controller object. The panel
//! driver, the device drivers and the control surface all reach it through
//! a shared reference (typically `Arc<TouchDisabler>`).
//!
//! All state lives behind a single mutex. Every public operation takes the
//! lock once and holds it for the whole check → mutate → apply sequence,
//! device invocation included, so a transition can neither interleave with
//! another transition nor observe a handle swapped mid-way.

use crate::executor::{self, TransitionReport};
use crate::mode::ModeController;
use crate::registry::DeviceHandleRegistry;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Weak;
use touch_common::control::{ControlError, ControlMode, RequestOrigin};
use touch_common::device::{DeviceRole, TouchDevice};
use tracing::{debug, info, warn};

/// Everything guarded by the controller lock.
#[derive(Default)]
struct ControllerState {
    mode: ModeController,
    registry: DeviceHandleRegistry,
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerSnapshot {
    pub mode: ControlMode,
    pub enabled: bool,
    /// Live device name per role, `None` when unset or stale.
    pub touchscreen: Option<String>,
    pub touchkey: Option<String>,
}

/// Links panel power state to touch device state, with operator override.
#[derive(Default)]
pub struct TouchDisabler {
    state: Mutex<ControllerState>,
}

impl TouchDisabler {
    /// Create a controller in `(auto, disabled)` with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the device handle for `role`.
    ///
    /// The controller keeps only a weak reference; the caller keeps the
    /// device alive. Does not change the enabled state or touch the device.
    pub fn register_device<D: TouchDevice + 'static>(&self, role: DeviceRole, handle: Weak<D>) {
        let mut state = self.state.lock();
        if state.registry.register(role, handle) {
            info!("{} handle replaced", role.describe());
        } else {
            info!("{} handle registered", role.describe());
        }
    }

    /// Clear the device handle for `role`.
    ///
    /// Returns `true` if a handle was registered.
    pub fn unregister_device(&self, role: DeviceRole) -> bool {
        let removed = self.state.lock().registry.unregister(role);
        if removed {
            info!("{} handle unregistered", role.describe());
        }
        removed
    }

    /// Panel blanked (`false`) or unblanked (`true`).
    ///
    /// Fire-and-forget: ignored without error while in manual mode.
    pub fn notify_panel_state(&self, is_on: bool) {
        match self.request(RequestOrigin::Panel, is_on) {
            Ok(_) => {}
            Err(e) => debug!("Panel {} ignored: {}", if is_on { "on" } else { "off" }, e),
        }
    }

    /// Switch mode. Never changes the enabled state.
    pub fn set_mode(&self, mode: ControlMode) {
        let previous = self.state.lock().mode.set_mode(mode);
        if previous != mode {
            info!("{} control is enabled", mode);
        } else {
            debug!("Mode already {}", mode);
        }
    }

    /// Request a transition to `desired` on behalf of `origin`.
    ///
    /// Accepted only when `origin` has authority in the current mode. On
    /// acceptance, every registered device is instructed before this
    /// returns; the report carries the per-device outcome.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::NotPermitted` if `origin` lacks authority.
    pub fn request(
        &self,
        origin: RequestOrigin,
        desired: bool,
    ) -> Result<TransitionReport, ControlError> {
        let mut state = self.state.lock();
        state.mode.request(origin, desired)?;
        info!(
            "Touch devices {} ({} request)",
            if desired { "enabled" } else { "disabled" },
            origin
        );
        let report = executor::apply(&state.registry, desired);
        if report.has_failures() {
            warn!("Transition applied with device failures");
        }
        Ok(report)
    }

    pub fn mode(&self) -> ControlMode {
        self.state.lock().mode.mode()
    }

    pub fn enabled(&self) -> bool {
        self.state.lock().mode.enabled()
    }

    /// Consistent view of mode, enabled state and registered devices.
    pub fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock();
        ControllerSnapshot {
            mode: state.mode.mode(),
            enabled: state.mode.enabled(),
            touchscreen: state.registry.device_name(DeviceRole::TouchScreen),
            touchkey: state.registry.device_name(DeviceRole::TouchKey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::SimulatedTouchDevice;
    use crate::executor::DeviceOutcome;
    use std::sync::Arc;

    #[test]
    fn new_controller_is_auto_disabled() {
        let td = TouchDisabler::new();
        assert_eq!(td.mode(), ControlMode::Auto);
        assert!(!td.enabled());
        let snap = td.snapshot();
        assert_eq!(snap.touchscreen, None);
        assert_eq!(snap.touchkey, None);
    }

    #[test]
    fn registration_does_not_touch_state_or_device() {
        let td = TouchDisabler::new();
        td.notify_panel_state(true);

        let ts = Arc::new(SimulatedTouchDevice::new("ts"));
        td.register_device(DeviceRole::TouchScreen, Arc::downgrade(&ts));

        assert!(td.enabled());
        assert_eq!(ts.enable_calls(), 0);
        assert_eq!(ts.disable_calls(), 0);
        assert_eq!(td.snapshot().touchscreen.as_deref(), Some("ts"));
    }

    #[test]
    fn replaced_handle_receives_next_transition() {
        let td = TouchDisabler::new();
        let old = Arc::new(SimulatedTouchDevice::new("old"));
        let new = Arc::new(SimulatedTouchDevice::new("new"));

        td.register_device(DeviceRole::TouchScreen, Arc::downgrade(&old));
        td.register_device(DeviceRole::TouchScreen, Arc::downgrade(&new));
        td.notify_panel_state(true);

        assert_eq!(old.enable_calls(), 0);
        assert_eq!(new.enable_calls(), 1);
    }

    #[test]
    fn rejected_request_reports_not_permitted() {
        let td = TouchDisabler::new();
        let ts = Arc::new(SimulatedTouchDevice::new("ts"));
        td.register_device(DeviceRole::TouchScreen, Arc::downgrade(&ts));

        let err = td.request(RequestOrigin::Operator, true).unwrap_err();
        assert!(matches!(err, ControlError::NotPermitted { .. }));
        assert_eq!(ts.enable_calls(), 0);
        assert!(!td.enabled());
    }

    #[test]
    fn enabled_is_logical_even_when_devices_fail() {
        let td = TouchDisabler::new();
        let ts = Arc::new(SimulatedTouchDevice::new("ts").fail_on_enable(true));
        td.register_device(DeviceRole::TouchScreen, Arc::downgrade(&ts));

        let report = td.request(RequestOrigin::Panel, true).unwrap();
        assert!(matches!(
            report.outcome(DeviceRole::TouchScreen),
            DeviceOutcome::Failed(_)
        ));
        assert!(td.enabled());
    }

    #[test]
    fn unregister_makes_role_skipped() {
        let td = TouchDisabler::new();
        let tk = Arc::new(SimulatedTouchDevice::new("tk"));
        td.register_device(DeviceRole::TouchKey, Arc::downgrade(&tk));
        assert!(td.unregister_device(DeviceRole::TouchKey));
        assert!(!td.unregister_device(DeviceRole::TouchKey));

        let report = td.request(RequestOrigin::Panel, true).unwrap();
        assert_eq!(report.outcome(DeviceRole::TouchKey), &DeviceOutcome::Skipped);
        assert_eq!(tk.enable_calls(), 0);
    }

    #[test]
    fn snapshot_serializes() {
        let td = TouchDisabler::new();
        td.set_mode(ControlMode::Manual);
        let json = serde_json::to_string(&td.snapshot()).unwrap();
        assert_eq!(
            json,
            r#"{"mode":"manual","enabled":false,"touchscreen":null,"touchkey":null}"#
        );
    }
}
