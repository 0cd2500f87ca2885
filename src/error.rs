//! Custom error types for the driver.
//!
//! Using the `thiserror` crate, `DriverError` consolidates the few failure
//! modes the instrument protocol has. Only one precondition is validated
//! before touching the wire: the wavelength range. Everything else (missing
//! port, malformed response line, the empty line a read timeout yields)
//! propagates as-is with the `?` operator — the device protocol is stateless
//! and there is nothing useful to recover.

use thiserror::Error;

/// Convenience alias for results using the driver error type.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Wavelength {0} nm out of range (198-1000 nm)")]
    WavelengthOutOfRange(u16),

    #[error("Scan interval must be at least 1 nm")]
    InvalidScanInterval,

    #[error("Malformed device response: {0:?}")]
    MalformedResponse(String),

    #[error("Scan output error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::WavelengthOutOfRange(1064);
        assert_eq!(
            err.to_string(),
            "Wavelength 1064 nm out of range (198-1000 nm)"
        );
    }

    #[test]
    fn test_malformed_response_quotes_line() {
        let err = DriverError::MalformedResponse("0.123 540".to_string());
        assert!(err.to_string().contains("\"0.123 540\""));
    }
}
