//! Transport layer between the driver and the serial line.
//!
//! The instrument protocol is a strict write-then-readline exchange, so the
//! seam is two blocking calls. [`SerialTransport`] is the real thing;
//! [`MockTransport`] replays scripted responses for tests.

pub mod mock;
pub mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

use crate::error::DriverResult;

/// Blocking byte transport for one instrument connection.
pub trait Transport: Send {
    /// Write an ASCII command, appending the CR terminator, and flush.
    fn write_command(&mut self, command: &str) -> DriverResult<()>;

    /// Read one response line, stripped of its terminator.
    ///
    /// A read timeout is not an error: it yields an empty string, matching
    /// the device falling silent. Callers that expect a response turn the
    /// empty line into a parse failure.
    fn read_line(&mut self) -> DriverResult<String>;
}
