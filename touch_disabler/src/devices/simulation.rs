//! Simulated touch device.
//!
//! Tracks open/closed state and call counts so tests and the operator
//! console can observe what the controller asked the hardware to do.
//! Fault injection makes a primitive report an error while still counting
//! the call.

use crate::config::DeviceEntry;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use touch_common::device::{DeviceError, TouchDevice};
use tracing::debug;

/// Software touch device implementing `TouchDevice`.
#[derive(Debug)]
pub struct SimulatedTouchDevice {
    name: String,
    open: AtomicBool,
    enable_calls: AtomicU32,
    disable_calls: AtomicU32,
    fail_on_enable: bool,
    fail_on_disable: bool,
}

impl SimulatedTouchDevice {
    /// Create a closed device that never fails.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: AtomicBool::new(false),
            enable_calls: AtomicU32::new(0),
            disable_calls: AtomicU32::new(0),
            fail_on_enable: false,
            fail_on_disable: false,
        }
    }

    /// Create a device from its configuration entry.
    pub fn from_entry(entry: &DeviceEntry) -> Self {
        Self::new(entry.name.clone())
            .fail_on_enable(entry.fail_on_enable)
            .fail_on_disable(entry.fail_on_disable)
    }

    /// Make `enable()` report an I/O error.
    pub fn fail_on_enable(mut self, fail: bool) -> Self {
        self.fail_on_enable = fail;
        self
    }

    /// Make `disable()` report an I/O error.
    pub fn fail_on_disable(mut self, fail: bool) -> Self {
        self.fail_on_disable = fail;
        self
    }

    /// Whether the last successful primitive left the device open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn enable_calls(&self) -> u32 {
        self.enable_calls.load(Ordering::SeqCst)
    }

    pub fn disable_calls(&self) -> u32 {
        self.disable_calls.load(Ordering::SeqCst)
    }
}

impl TouchDevice for SimulatedTouchDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn enable(&self) -> Result<(), DeviceError> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_enable {
            return Err(DeviceError::Io(format!("{}: simulated open failure", self.name)));
        }
        self.open.store(true, Ordering::SeqCst);
        debug!("{} opened", self.name);
        Ok(())
    }

    fn disable(&self) -> Result<(), DeviceError> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_disable {
            return Err(DeviceError::Io(format!("{}: simulated close failure", self.name)));
        }
        self.open.store(false, Ordering::SeqCst);
        debug!("{} closed", self.name);
        Ok(())
    }
}
