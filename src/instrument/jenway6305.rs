//! Jenway 6305 spectrophotometer driver.
//!
//! Protocol overview:
//! - Commands: single ASCII letters (`A`, `T`, `C`, `V`, `Z`, `D`, `SO`,
//!   `SC`) or letter + integer (`G540`, `F10`), CR-terminated.
//! - Responses: one `<value>\t<wavelength>` line per read command; silence
//!   otherwise.
//! - Timing: half-duplex; the electronics need a fixed settle interval after
//!   shutter toggles and monochromator moves, with no ready indication.
//!
//! The session caches the shutter state and the last-known wavelength so
//! shutter toggles are issued at most once per state change and the settle
//! after a wavelength move can scale with the distance traveled.

use crate::adapters::{SerialTransport, Transport};
use crate::config::Settings;
use crate::error::{DriverError, DriverResult};
use crate::measurement::Measurement;
use log::info;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Shortest wavelength the monochromator can reach, in nanometers.
pub const MIN_WAVELENGTH_NM: u16 = 198;
/// Longest wavelength the monochromator can reach, in nanometers.
pub const MAX_WAVELENGTH_NM: u16 = 1000;

/// Last-known position of the light shutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterState {
    /// Shutter admits light; optical reads are valid.
    Open,
    /// Shutter blocks light.
    Closed,
    /// State not yet observed this session; the next toggle always sends.
    Unknown,
}

/// Which reference the `Z` (zero) command establishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroMode {
    /// Zero absorbance against the current sample (shutter open).
    Absorbance,
    /// Zero transmission against darkness (shutter closed).
    Transmission,
}

/// A session with one Jenway 6305 over one open serial connection.
///
/// All operations are synchronous write-then-readline exchanges; the device
/// protocol is stateless apart from the shutter and the grating position.
pub struct Spectrometer {
    transport: Box<dyn Transport>,
    shutter: ShutterState,
    wavelength: Option<u16>,
    settle: Duration,
}

impl Spectrometer {
    /// Wrap an already-open transport. Performs no I/O; the shutter state is
    /// `Unknown` and the wavelength cache is empty until first use.
    pub fn new(transport: Box<dyn Transport>, settings: &Settings) -> Self {
        Self {
            transport,
            shutter: ShutterState::Unknown,
            wavelength: None,
            settle: Duration::from_millis(settings.settle_ms),
        }
    }

    /// Open the serial port named in `settings` and probe the instrument
    /// with one absorbance read to seed the wavelength cache.
    pub fn connect(settings: &Settings) -> DriverResult<Self> {
        let transport = SerialTransport::open(settings)?;
        let mut spec = Self::new(Box::new(transport), settings);
        let probe = spec.absorbance()?;
        info!(
            "Connected to Jenway 6305 on '{}' at {} nm",
            settings.port, probe.wavelength_nm
        );
        Ok(spec)
    }

    /// Last wavelength sent to or reported by the instrument, if any.
    pub fn wavelength(&self) -> Option<u16> {
        self.wavelength
    }

    /// Last-known shutter state.
    pub fn shutter(&self) -> ShutterState {
        self.shutter
    }

    /// Open the shutter. No-op if it is already known to be open.
    pub fn open_shutter(&mut self) -> DriverResult<()> {
        self.set_shutter(ShutterState::Open)
    }

    /// Close the shutter. No-op if it is already known to be closed.
    pub fn close_shutter(&mut self) -> DriverResult<()> {
        self.set_shutter(ShutterState::Closed)
    }

    fn set_shutter(&mut self, target: ShutterState) -> DriverResult<()> {
        if self.shutter != target {
            let command = match target {
                ShutterState::Open => "SO",
                _ => "SC",
            };
            self.transport.write_command(command)?;
            self.shutter = target;
            thread::sleep(self.settle);
        }
        Ok(())
    }

    /// Read absorbance at the current wavelength.
    pub fn absorbance(&mut self) -> DriverResult<Measurement> {
        self.read_value("A")
    }

    /// Read percent transmission at the current wavelength.
    pub fn transmission(&mut self) -> DriverResult<Measurement> {
        self.read_value("T")
    }

    /// Read concentration (absorbance scaled by the concentration factor).
    pub fn concentration(&mut self) -> DriverResult<Measurement> {
        self.read_value("C")
    }

    /// Read the raw detector voltage.
    pub fn voltage(&mut self) -> DriverResult<Measurement> {
        self.read_value("V")
    }

    /// Optical reads are only valid with the shutter open, so every read
    /// opens it first (a cached no-op after the first).
    fn read_value(&mut self, command: &str) -> DriverResult<Measurement> {
        self.open_shutter()?;
        self.transport.write_command(command)?;
        let line = self.transport.read_line()?;
        let measurement = parse_measurement(&line)?;
        self.wavelength = Some(measurement.wavelength_nm);
        Ok(measurement)
    }

    /// Move the monochromator to `nm`.
    ///
    /// Fails with [`DriverError::WavelengthOutOfRange`] outside
    /// [198, 1000] nm. The settle sleep scales with the distance traveled
    /// from the cached wavelength; the device gives no ready indication.
    pub fn set_wavelength(&mut self, nm: u16) -> DriverResult<()> {
        if !(MIN_WAVELENGTH_NM..=MAX_WAVELENGTH_NM).contains(&nm) {
            return Err(DriverError::WavelengthOutOfRange(nm));
        }
        self.transport.write_command(&format!("G{nm}"))?;
        thread::sleep(self.wavelength_settle(nm));
        self.wavelength = Some(nm);
        Ok(())
    }

    /// Settle interval for a move to `nm`: the base interval plus 5% of it
    /// per nanometer traveled from the cached position.
    fn wavelength_settle(&self, nm: u16) -> Duration {
        let distance = self.wavelength.map_or(0, |current| current.abs_diff(nm));
        self.settle + self.settle.mul_f64(f64::from(distance) * 0.05)
    }

    /// Set the factor the instrument multiplies absorbance by to report
    /// concentration.
    pub fn set_concentration_factor(&mut self, factor: i32) -> DriverResult<()> {
        self.transport.write_command(&format!("F{factor}"))?;
        thread::sleep(self.settle);
        Ok(())
    }

    /// Establish a zero reference, leaving the shutter open afterwards.
    ///
    /// Absorbance zeroes against the blank with the shutter open;
    /// transmission zeroes against darkness with the shutter closed.
    pub fn calibrate(&mut self, mode: ZeroMode) -> DriverResult<()> {
        match mode {
            ZeroMode::Absorbance => self.open_shutter()?,
            ZeroMode::Transmission => self.close_shutter()?,
        }
        self.transport.write_command("Z")?;
        thread::sleep(self.settle);
        self.open_shutter()?;
        info!("Zeroed ({mode:?} mode)");
        Ok(())
    }

    /// Equivalent to pressing the PRINT key: the instrument dumps its
    /// current readings as text. Accumulates lines until the device stops
    /// sending (a read timeout yields the terminating empty line).
    pub fn printout(&mut self) -> DriverResult<String> {
        self.transport.write_command("D")?;
        let mut output = String::new();
        loop {
            let line = self.transport.read_line()?;
            if line.is_empty() {
                break;
            }
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }

    /// Absorbance scan from `start` up to (excluding) `end`, one reading
    /// every `interval` nanometers, in ascending order.
    pub fn scan(
        &mut self,
        start: u16,
        end: u16,
        interval: u16,
    ) -> DriverResult<Vec<Measurement>> {
        if interval == 0 {
            return Err(DriverError::InvalidScanInterval);
        }
        self.set_wavelength(start)?;
        // The move to the scan start can cross most of the range; give the
        // grating a long fixed settle before the first reading.
        thread::sleep(self.settle * 20);

        let mut data = Vec::new();
        let mut nm = start;
        while nm < end {
            self.set_wavelength(nm)?;
            data.push(self.absorbance()?);
            match nm.checked_add(interval) {
                Some(next) => nm = next,
                None => break,
            }
        }
        info!("Scan complete: {} points", data.len());
        Ok(data)
    }

    /// Run [`scan`](Self::scan) and write the results to `path` as
    /// tab-delimited text with an `Abs`/`Wavelength` header row.
    pub fn scan_to_file(
        &mut self,
        path: &Path,
        start: u16,
        end: u16,
        interval: u16,
    ) -> DriverResult<()> {
        let data = self.scan(start, end, interval)?;

        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
        writer.write_record(["Abs", "Wavelength"])?;
        for m in &data {
            writer.write_record([m.value.to_string(), m.wavelength_nm.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Parse a `<value>\t<wavelength>` response line.
fn parse_measurement(line: &str) -> DriverResult<Measurement> {
    let mut fields = line.split('\t');
    let (Some(value), Some(wavelength)) = (fields.next(), fields.next()) else {
        return Err(DriverError::MalformedResponse(line.to_string()));
    };
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| DriverError::MalformedResponse(line.to_string()))?;
    let wavelength_nm = wavelength
        .trim()
        .parse::<u16>()
        .map_err(|_| DriverError::MalformedResponse(line.to_string()))?;
    Ok(Measurement {
        value,
        wavelength_nm,
    })
}
