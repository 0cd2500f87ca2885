//! Driver settings.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `JENWAY_*` environment variables. Only the port
//! path and timing knobs are configurable — the line parameters themselves
//! (1200 baud, 7 data bits, odd parity, 1 stop bit) are fixed by the
//! instrument and live in the serial transport.
//!
//! ```toml
//! port = "/dev/ttyUSB0"
//! settle_ms = 100
//! read_timeout_ms = 1000
//! ```

use crate::error::DriverResult;
use serde::Deserialize;
use std::path::Path;

/// Session settings for a Jenway 6305 connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serial port path (e.g., "/dev/ttyAMA0", "COM3").
    pub port: String,
    /// Base settle interval after shutter toggles and wavelength moves.
    pub settle_ms: u64,
    /// Read timeout on the serial port; a timed-out read yields an empty line.
    pub read_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: "/dev/ttyAMA0".to_string(),
            settle_ms: 100,
            read_timeout_ms: 1000,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file, and `JENWAY_*`
    /// environment overrides (e.g., `JENWAY_PORT=/dev/ttyUSB1`).
    pub fn load(path: Option<&Path>) -> DriverResult<Self> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("port", defaults.port)?
            .set_default("settle_ms", defaults.settle_ms)?
            .set_default("read_timeout_ms", defaults.read_timeout_ms)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("JENWAY"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
