//! Serial driver for the Jenway 6305 spectrophotometer.
//!
//! The 6305 speaks a stateless ASCII protocol over RS-232 at 1200 baud,
//! 7 data bits, odd parity, 1 stop bit: single-letter commands terminated
//! by CR, one tab-delimited `<value>\t<wavelength>` line per query. A
//! [`Spectrometer`] session owns one open port and issues every operation
//! synchronously on it.
//!
//! ```no_run
//! use jenway6305::{config::Settings, Spectrometer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let mut spec = Spectrometer::connect(&settings)?;
//!     spec.set_wavelength(540)?;
//!     let m = spec.absorbance()?;
//!     println!("{} Abs @ {} nm", m.value, m.wavelength_nm);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod instrument;
pub mod measurement;

pub use error::{DriverError, DriverResult};
pub use instrument::{ShutterState, Spectrometer, ZeroMode};
pub use measurement::Measurement;
