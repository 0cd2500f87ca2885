//! Serial transport for RS-232 communication with the 6305.
//!
//! The instrument is fixed at 1200 baud, 7 data bits, odd parity, 1 stop
//! bit; only the port path and read timeout come from [`Settings`].

use crate::adapters::Transport;
use crate::config::Settings;
use crate::error::DriverResult;
use log::debug;
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

/// Command terminator the instrument expects.
const TERMINATOR: u8 = b'\r';

/// Transport backed by a real serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open the serial port named in `settings` with the instrument's fixed
    /// line parameters.
    pub fn open(settings: &Settings) -> DriverResult<Self> {
        let port = serialport::new(&settings.port, 1200)
            .data_bits(DataBits::Seven)
            .parity(Parity::Odd)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(settings.read_timeout_ms))
            .open()?;

        debug!("Serial port '{}' opened at 1200-7-O-1", settings.port);
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn write_command(&mut self, command: &str) -> DriverResult<()> {
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(&[TERMINATOR])?;
        self.port.flush()?;
        debug!("Sent command: {}", command);
        Ok(())
    }

    fn read_line(&mut self) -> DriverResult<String> {
        let mut response = Vec::new();
        let mut buf = [0u8; 1];

        loop {
            match self.port.read(&mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if buf[0] == b'\n' {
                        break;
                    }
                    response.push(buf[0]);
                }
                // Timeout means the device has nothing (more) to say;
                // return what arrived, which may be nothing at all.
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) => return Err(e.into()),
            }
        }

        let line = String::from_utf8_lossy(&response).trim().to_string();
        debug!("Received response: {:?}", line);
        Ok(line)
    }
}
