//! Instrument drivers.

pub mod jenway6305;

pub use jenway6305::{ShutterState, Spectrometer, ZeroMode};
