//! Device handle registry.
//!
//! Holds at most one non-owning handle per [`DeviceRole`]. Device drivers
//! own their devices; the registry stores a `Weak` reference so a driver
//! that goes away leaves a stale slot behind instead of a dangling one.

use std::sync::{Arc, Weak};
use touch_common::device::{DeviceRole, TouchDevice};

/// Contents of a registry slot at lookup time.
#[derive(Clone)]
pub enum Slot {
    /// Nothing was ever registered (or it was unregistered).
    Unset,
    /// A handle was registered but its owner has since dropped the device.
    Stale,
    /// A live device.
    Registered(Arc<dyn TouchDevice>),
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "Unset"),
            Self::Stale => write!(f, "Stale"),
            Self::Registered(device) => write!(f, "Registered({})", device.name()),
        }
    }
}

/// Per-role device handles.
///
/// Constructed empty and populated via `register()`. Registration is
/// unconditional: a driver that re-probes simply replaces its old handle.
#[derive(Default)]
pub struct DeviceHandleRegistry {
    slots: [Option<Weak<dyn TouchDevice>>; 2],
}

impl DeviceHandleRegistry {
    /// Create a registry with both roles unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the handle for `role`.
    ///
    /// Returns `true` if a previous registration was replaced.
    pub fn register<D: TouchDevice + 'static>(&mut self, role: DeviceRole, handle: Weak<D>) -> bool {
        let handle: Weak<dyn TouchDevice> = handle;
        self.slots[role.index()].replace(handle).is_some()
    }

    /// Clear the handle for `role`.
    ///
    /// Returns `true` if a registration was removed.
    pub fn unregister(&mut self, role: DeviceRole) -> bool {
        self.slots[role.index()].take().is_some()
    }

    /// Inspect the slot for `role`, resolving the weak reference.
    pub fn slot(&self, role: DeviceRole) -> Slot {
        match &self.slots[role.index()] {
            None => Slot::Unset,
            Some(weak) => match weak.upgrade() {
                Some(device) => Slot::Registered(device),
                None => Slot::Stale,
            },
        }
    }

    /// Current live handle for `role`, or `None` if unset or stale.
    pub fn lookup(&self, role: DeviceRole) -> Option<Arc<dyn TouchDevice>> {
        match self.slot(role) {
            Slot::Registered(device) => Some(device),
            Slot::Unset | Slot::Stale => None,
        }
    }

    /// Name of the live device for `role`.
    pub fn device_name(&self, role: DeviceRole) -> Option<String> {
        self.lookup(role).map(|device| device.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touch_common::device::DeviceError;

    struct TestDevice(&'static str);

    impl TouchDevice for TestDevice {
        fn name(&self) -> &str {
            self.0
        }

        fn enable(&self) -> Result<(), DeviceError> {
            Ok(())
        }

        fn disable(&self) -> Result<(), DeviceError> {
            Ok(())
        }
    }

    #[test]
    fn empty_registry_is_unset() {
        let reg = DeviceHandleRegistry::new();
        for role in DeviceRole::ALL {
            assert!(matches!(reg.slot(role), Slot::Unset));
            assert!(reg.lookup(role).is_none());
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = DeviceHandleRegistry::new();
        let ts = Arc::new(TestDevice("ts0"));
        assert!(!reg.register(DeviceRole::TouchScreen, Arc::downgrade(&ts)));

        let found = reg.lookup(DeviceRole::TouchScreen).expect("registered");
        assert_eq!(found.name(), "ts0");
        assert!(reg.lookup(DeviceRole::TouchKey).is_none());
    }

    #[test]
    fn reregister_replaces() {
        let mut reg = DeviceHandleRegistry::new();
        let first = Arc::new(TestDevice("first"));
        let second = Arc::new(TestDevice("second"));

        reg.register(DeviceRole::TouchKey, Arc::downgrade(&first));
        assert!(reg.register(DeviceRole::TouchKey, Arc::downgrade(&second)));
        assert_eq!(reg.device_name(DeviceRole::TouchKey).as_deref(), Some("second"));
    }

    #[test]
    fn registry_does_not_own_devices() {
        let mut reg = DeviceHandleRegistry::new();
        let ts = Arc::new(TestDevice("ts0"));
        reg.register(DeviceRole::TouchScreen, Arc::downgrade(&ts));
        assert_eq!(Arc::strong_count(&ts), 1);

        drop(ts);
        assert!(matches!(reg.slot(DeviceRole::TouchScreen), Slot::Stale));
        assert!(reg.lookup(DeviceRole::TouchScreen).is_none());
    }

    #[test]
    fn unregister_clears_slot() {
        let mut reg = DeviceHandleRegistry::new();
        let ts = Arc::new(TestDevice("ts0"));
        reg.register(DeviceRole::TouchScreen, Arc::downgrade(&ts));

        assert!(reg.unregister(DeviceRole::TouchScreen));
        assert!(!reg.unregister(DeviceRole::TouchScreen));
        assert!(matches!(reg.slot(DeviceRole::TouchScreen), Slot::Unset));
    }
}
