//! Bench CLI for the Jenway 6305 spectrophotometer.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jenway6305::config::Settings;
use jenway6305::{Measurement, Spectrometer, ZeroMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jenway6305", about = "Drive a Jenway 6305 spectrophotometer over RS-232")]
struct Cli {
    /// Settings file (TOML); defaults and JENWAY_* env vars apply either way
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port path, overriding the settings file
    #[arg(short, long)]
    port: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read absorbance at the current wavelength
    Absorbance,
    /// Read percent transmission at the current wavelength
    Transmission,
    /// Read concentration at the current wavelength
    Concentration,
    /// Read the raw detector voltage
    Voltage,
    /// Move the monochromator to a wavelength (198-1000 nm)
    SetWavelength { nm: u16 },
    /// Set the concentration factor
    SetFactor { factor: i32 },
    /// Zero the instrument
    Calibrate {
        /// Zero transmission (dark reference) instead of absorbance
        #[arg(long)]
        transmission: bool,
    },
    /// Open or close the shutter
    Shutter { state: ShutterArg },
    /// Dump the instrument's PRINT output
    Printout,
    /// Absorbance scan across a wavelength range
    Scan {
        #[arg(default_value_t = 198)]
        start: u16,
        /// End wavelength (exclusive): the scan stops before reaching it
        #[arg(default_value_t = 1000)]
        end: u16,
        #[arg(default_value_t = 10)]
        interval: u16,
        /// Write tab-delimited results to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShutterArg {
    Open,
    Close,
}

fn print_measurement(m: Measurement) {
    println!("{}\t{}", m.value, m.wavelength_nm);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let mut spec = Spectrometer::connect(&settings)?;

    match cli.command {
        Command::Absorbance => print_measurement(spec.absorbance()?),
        Command::Transmission => print_measurement(spec.transmission()?),
        Command::Concentration => print_measurement(spec.concentration()?),
        Command::Voltage => print_measurement(spec.voltage()?),
        Command::SetWavelength { nm } => spec.set_wavelength(nm)?,
        Command::SetFactor { factor } => spec.set_concentration_factor(factor)?,
        Command::Calibrate { transmission } => {
            let mode = if transmission {
                ZeroMode::Transmission
            } else {
                ZeroMode::Absorbance
            };
            spec.calibrate(mode)?;
        }
        Command::Shutter { state } => match state {
            ShutterArg::Open => spec.open_shutter()?,
            ShutterArg::Close => spec.close_shutter()?,
        },
        Command::Printout => print!("{}", spec.printout()?),
        Command::Scan {
            start,
            end,
            interval,
            output,
        } => match output {
            Some(path) => spec.scan_to_file(&path, start, end, interval)?,
            None => {
                for m in spec.scan(start, end, interval)? {
                    print_measurement(m);
                }
            }
        },
    }

    Ok(())
}
