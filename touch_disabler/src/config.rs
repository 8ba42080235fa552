//! Service configuration.
//!
//! Loaded from a TOML file via [`ConfigLoader`]. Describes logging and the
//! touch devices the console brings up. Mode and enabled state are never
//! configured: the controller always starts in `(auto, disabled)`.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "touch_disabler"
//!
//! [devices.touchscreen]
//! name = "sec_touchscreen"
//!
//! [devices.touchkey]
//! name = "sec_touchkey"
//! fail_on_disable = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use touch_common::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
use touch_common::device::DeviceRole;
use tracing::info;

/// Canonical service name.
pub const SERVICE_NAME: &str = "touch_disabler";

/// One simulated touch device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    /// Device name used in diagnostics.
    pub name: String,
    /// Inject a failure into every `enable()`.
    #[serde(default)]
    pub fail_on_enable: bool,
    /// Inject a failure into every `disable()`.
    #[serde(default)]
    pub fail_on_disable: bool,
}

impl DeviceEntry {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail_on_enable: false,
            fail_on_disable: false,
        }
    }
}

/// Devices present on the board. A missing entry means no hardware for that role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicesConfig {
    #[serde(default)]
    pub touchscreen: Option<DeviceEntry>,
    #[serde(default)]
    pub touchkey: Option<DeviceEntry>,
}

impl DevicesConfig {
    /// Entry configured for `role`.
    pub fn entry(&self, role: DeviceRole) -> Option<&DeviceEntry> {
        match role {
            DeviceRole::TouchScreen => self.touchscreen.as_ref(),
            DeviceRole::TouchKey => self.touchkey.as_ref(),
        }
    }
}

/// Top-level configuration for the touch disabler service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisablerConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
}

impl Default for DisablerConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig {
                log_level: LogLevel::Info,
                service_name: SERVICE_NAME.to_string(),
            },
            devices: DevicesConfig {
                touchscreen: Some(DeviceEntry::named("sec_touchscreen")),
                touchkey: Some(DeviceEntry::named("sec_touchkey")),
            },
        }
    }
}

impl DisablerConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from {:?}", path);
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the service name or any
    /// configured device name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        for role in DeviceRole::ALL {
            if let Some(entry) = self.devices.entry(role) {
                if entry.name.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "device name for {role} cannot be empty"
                    )));
                }
            }
        }
        Ok(())
    }
}
