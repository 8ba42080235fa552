//! # Touch Disabler Console
//!
//! Composition root: builds the controller, brings up the configured
//! (simulated) touch devices, and reads operator commands from stdin.
//!
//! # Usage
//!
//! ```bash
//! # Default devices (touchscreen + touch keys)
//! touch_disabler
//!
//! # Board variant without touch keys, verbose logging
//! touch_disabler --no-touchkey -v
//!
//! # Config file, JSON logs
//! touch_disabler --config /etc/touch_disabler.toml --json
//! ```

#![deny(warnings)]

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use touch_disabler::TouchDisabler;
use touch_disabler::config::DisablerConfig;
use touch_disabler::console::{Console, Reply, parse_line};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Touch Disabler - panel-linked touch device control with operator override
#[derive(Parser, Debug)]
#[command(name = "touch_disabler")]
#[command(version)]
#[command(about = "Links display panel power state to touch input devices")]
#[command(long_about = None)]
struct Args {
    /// Path to configuration file (touch_disabler.toml).
    /// Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leave the touch-key role unpopulated (board variant without keys)
    #[arg(long)]
    no_touchkey: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("touch_disabler failed: {}", e);
        eprintln!("touch_disabler: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DisablerConfig::from_file(path)?,
        None => DisablerConfig::default(),
    };
    if args.no_touchkey {
        config.devices.touchkey = None;
    }

    setup_tracing(&args, &config);

    info!(
        "{} v{} starting...",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION")
    );

    let controller = Arc::new(TouchDisabler::new());
    let mut console = Console::new(Arc::clone(&controller), &config.devices);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error ({}): {}", e.errno(), e)?;
                continue;
            }
        };
        match console.execute(command) {
            Ok(Reply::Output(text)) => write!(stdout, "{text}")?,
            Ok(Reply::Quit) => break,
            Err(e) => writeln!(stdout, "error ({}): {}", e.errno(), e)?,
        }
        stdout.flush()?;
    }

    info!("shutdown complete (mode={}, enabled={})", controller.mode(), controller.enabled());
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and configured log level.
fn setup_tracing(args: &Args, config: &DisablerConfig) {
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.shared.log_level.as_directive()))
    };

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}
