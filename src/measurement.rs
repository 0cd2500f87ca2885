//! Measurement value type.

/// A single reading returned by the instrument.
///
/// Every read operation (absorbance, transmission, concentration, voltage)
/// produces one of these fresh from the device's `<value>\t<wavelength>`
/// response line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// The measured value, in whatever unit the issuing command implies
    /// (Abs, %T, concentration units, or volts).
    pub value: f64,
    /// The monochromator wavelength the reading was taken at, in nanometers.
    pub wavelength_nm: u16,
}
