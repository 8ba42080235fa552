//! Operator console.
//!
//! Line-oriented front end used by the `touch_disabler` binary. It plays
//! the roles of the external collaborators: the panel driver (`panel`),
//! the device drivers (`register`, `unregister`, `drop`) and the attribute
//! transport (`cat`, `echo`, `write`).
//!
//! ```text
//! panel on|off                 panel unblank / blank notification
//! cat <attr>                   read `enabled` or `mode`
//! echo <value> > <attr>        write an attribute
//! write <attr> <value>         same, without the shell syntax
//! register|unregister <role>   (re)register or clear a device handle
//! drop <role>                  device driver releases its device
//! status | devices             JSON snapshot / simulated device state
//! help | quit
//! ```

use crate::attributes::{AttributeName, ControlSurface};
use crate::config::DevicesConfig;
use crate::controller::TouchDisabler;
use crate::devices::SimulatedTouchDevice;
use std::fmt::Write as _;
use std::sync::Arc;
use thiserror::Error;
use touch_common::control::ControlError;
use touch_common::device::{DeviceRole, TouchDevice};
use tracing::info;

/// Console errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Command line could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// Controller rejected the operation.
    #[error(transparent)]
    Control(#[from] ControlError),

    /// No device is held for this role.
    #[error("no {0} device present")]
    NoDevice(DeviceRole),

    /// Snapshot could not be rendered.
    #[error("failed to render status: {0}")]
    Render(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Errno-style code printed next to rejections.
    pub fn errno(&self) -> i32 {
        match self {
            Self::Control(e) => e.errno(),
            _ => touch_common::control::ERRNO_INVALID,
        }
    }
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Panel(bool),
    Show(AttributeName),
    Store(AttributeName, String),
    Register(DeviceRole),
    Unregister(DeviceRole),
    Drop(DeviceRole),
    Status,
    Devices,
    Help,
    Quit,
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

pub const HELP: &str = "\
panel on|off                 panel unblank / blank notification
cat <attr>                   read `enabled` or `mode`
echo <value> > <attr>        write an attribute
write <attr> <value>         same, without the shell syntax
register|unregister <role>   (re)register or clear a device handle (touchscreen|touchkey)
drop <role>                  device driver releases its device
status                       controller snapshot as JSON
devices                      simulated device state
quit
";

fn parse_attr(token: Option<&str>) -> Result<AttributeName, ConsoleError> {
    let token = token.ok_or_else(|| ConsoleError::Parse("missing attribute".to_string()))?;
    Ok(token.parse::<AttributeName>()?)
}

fn parse_role(token: Option<&str>) -> Result<DeviceRole, ConsoleError> {
    let token = token.ok_or_else(|| ConsoleError::Parse("missing device role".to_string()))?;
    token.parse::<DeviceRole>().map_err(ConsoleError::Parse)
}

/// Parse one console line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let command = match verb {
        "panel" => match words.next() {
            Some("on") => Command::Panel(true),
            Some("off") => Command::Panel(false),
            other => {
                return Err(ConsoleError::Parse(format!(
                    "panel expects on|off, got {other:?}"
                )));
            }
        },
        "cat" => Command::Show(parse_attr(words.next())?),
        "write" => {
            let attr = parse_attr(words.next())?;
            let value = words.collect::<Vec<_>>().join(" ");
            Command::Store(attr, value)
        }
        "echo" => {
            let rest = line["echo".len()..].trim_start();
            let (value, target) = rest
                .rsplit_once('>')
                .ok_or_else(|| ConsoleError::Parse("usage: echo <value> > <attr>".to_string()))?;
            let attr = parse_attr(Some(target.trim()))?;
            Command::Store(attr, value.trim().to_string())
        }
        "register" => Command::Register(parse_role(words.next())?),
        "unregister" => Command::Unregister(parse_role(words.next())?),
        "drop" => Command::Drop(parse_role(words.next())?),
        "status" => Command::Status,
        "devices" => Command::Devices,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ConsoleError::Parse(format!("unknown command '{other}'"))),
    };
    Ok(Some(command))
}

/// Console state: the controller plus the devices the simulated drivers own.
pub struct Console {
    controller: Arc<TouchDisabler>,
    devices: [Option<Arc<SimulatedTouchDevice>>; 2],
}

impl Console {
    /// Build the simulated devices from configuration and register them.
    pub fn new(controller: Arc<TouchDisabler>, config: &DevicesConfig) -> Self {
        let devices = DeviceRole::ALL.map(|role| {
            config
                .entry(role)
                .map(|entry| Arc::new(SimulatedTouchDevice::from_entry(entry)))
        });
        for role in DeviceRole::ALL {
            match &devices[role.index()] {
                // Present devices register at "probe" time.
                Some(device) => controller.register_device(role, Arc::downgrade(device)),
                None => info!("No {} configured", role.describe()),
            }
        }
        Self { controller, devices }
    }

    pub fn controller(&self) -> &Arc<TouchDisabler> {
        &self.controller
    }

    /// Device currently owned for `role`.
    pub fn device(&self, role: DeviceRole) -> Option<&Arc<SimulatedTouchDevice>> {
        self.devices[role.index()].as_ref()
    }

    fn register(&self, role: DeviceRole) -> Result<(), ConsoleError> {
        let device = self.device(role).ok_or(ConsoleError::NoDevice(role))?;
        self.controller.register_device(role, Arc::downgrade(device));
        Ok(())
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        let surface = ControlSurface::new(&self.controller);
        let output = match command {
            Command::Panel(is_on) => {
                self.controller.notify_panel_state(is_on);
                String::new()
            }
            Command::Show(attr) => surface.show(attr),
            Command::Store(attr, value) => {
                surface.store(attr, &value)?;
                String::new()
            }
            Command::Register(role) => {
                self.register(role)?;
                String::new()
            }
            Command::Unregister(role) => {
                if !self.controller.unregister_device(role) {
                    return Err(ConsoleError::NoDevice(role));
                }
                String::new()
            }
            Command::Drop(role) => {
                self.devices[role.index()]
                    .take()
                    .ok_or(ConsoleError::NoDevice(role))?;
                info!("{} released by its driver", role.describe());
                String::new()
            }
            Command::Status => {
                format!("{}\n", serde_json::to_string_pretty(&self.controller.snapshot())?)
            }
            Command::Devices => self.render_devices(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(output))
    }

    fn render_devices(&self) -> String {
        let mut out = String::new();
        for role in DeviceRole::ALL {
            match self.device(role) {
                Some(dev) => {
                    let _ = writeln!(
                        out,
                        "{role:<12} {:<20} {:<6} enable={} disable={}",
                        dev.name(),
                        if dev.is_open() { "open" } else { "closed" },
                        dev.enable_calls(),
                        dev.disable_calls()
                    );
                }
                None => {
                    let _ = writeln!(out, "{role:<12} -");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisablerConfig;
    use touch_common::control::ControlMode;

    fn console() -> Console {
        let config = DisablerConfig::default();
        Console::new(Arc::new(TouchDisabler::new()), &config.devices)
    }

    fn run(console: &mut Console, line: &str) -> Result<Reply, ConsoleError> {
        let command = parse_line(line)?.expect("command");
        console.execute(command)
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_line("panel off").unwrap(), Some(Command::Panel(false)));
        assert_eq!(
            parse_line("cat control").unwrap(),
            Some(Command::Show(AttributeName::Mode))
        );
        assert_eq!(
            parse_line("echo 1 > enabled").unwrap(),
            Some(Command::Store(AttributeName::Enabled, "1".to_string()))
        );
        assert_eq!(
            parse_line("write mode manual").unwrap(),
            Some(Command::Store(AttributeName::Mode, "manual".to_string()))
        );
        assert_eq!(
            parse_line("drop tk").unwrap(),
            Some(Command::Drop(DeviceRole::TouchKey))
        );
        assert_eq!(parse_line("  # comment").unwrap(), None);
        assert!(parse_line("panel dim").is_err());
        assert!(parse_line("reboot").is_err());
        assert!(parse_line("echo 1 enabled").is_err());
    }

    #[test]
    fn default_console_registers_both_devices() {
        let console = console();
        let snap = console.controller().snapshot();
        assert_eq!(snap.touchscreen.as_deref(), Some("sec_touchscreen"));
        assert_eq!(snap.touchkey.as_deref(), Some("sec_touchkey"));
    }

    #[test]
    fn session_drives_devices() {
        let mut console = console();
        run(&mut console, "panel on").unwrap();
        assert!(console.device(DeviceRole::TouchScreen).unwrap().is_open());

        let err = run(&mut console, "echo 0 > enabled").unwrap_err();
        assert_eq!(err.errno(), 1);

        run(&mut console, "echo manual > mode").unwrap();
        run(&mut console, "write enabled false").unwrap();
        assert_eq!(
            run(&mut console, "cat enabled").unwrap(),
            Reply::Output("false\n".to_string())
        );
        assert_eq!(console.controller().mode(), ControlMode::Manual);
        assert!(!console.device(DeviceRole::TouchKey).unwrap().is_open());
    }

    #[test]
    fn dropped_device_becomes_stale() {
        let mut console = console();
        run(&mut console, "drop touchkey").unwrap();
        assert!(console.device(DeviceRole::TouchKey).is_none());
        assert_eq!(console.controller().snapshot().touchkey, None);

        run(&mut console, "panel on").unwrap();
        assert!(console.controller().enabled());
        assert!(matches!(
            run(&mut console, "register touchkey"),
            Err(ConsoleError::NoDevice(DeviceRole::TouchKey))
        ));
    }

    #[test]
    fn status_renders_json() {
        let mut console = console();
        let Reply::Output(text) = run(&mut console, "status").unwrap() else {
            panic!("expected output");
        };
        assert!(text.contains("\"mode\": \"auto\""));
        assert!(text.contains("\"enabled\": false"));
    }

    #[test]
    fn devices_lists_simulated_state() {
        let mut console = console();
        run(&mut console, "panel on").unwrap();
        let Reply::Output(text) = run(&mut console, "devices").unwrap() else {
            panic!("expected output");
        };
        assert!(text.contains("sec_touchscreen"));
        assert!(text.contains("open"));
        assert!(text.contains("enable=1 disable=0"));

        run(&mut console, "drop touchscreen").unwrap();
        let Reply::Output(text) = run(&mut console, "devices").unwrap() else {
            panic!("expected output");
        };
        assert!(text.lines().next().unwrap().ends_with('-'));
    }

    #[test]
    fn quit() {
        let mut console = console();
        assert_eq!(run(&mut console, "quit").unwrap(), Reply::Quit);
    }
}
