//! Driver integration tests against the scripted mock transport.

use jenway6305::adapters::MockTransport;
use jenway6305::config::Settings;
use jenway6305::{Spectrometer, ZeroMode};
use std::fs;

fn test_spectrometer() -> (MockTransport, Spectrometer) {
    let settings = Settings {
        settle_ms: 0,
        ..Settings::default()
    };
    let mock = MockTransport::new();
    let spec = Spectrometer::new(Box::new(mock.clone()), &settings);
    (mock, spec)
}

/// Wavelengths a start-exclusive-end scan visits.
fn scan_wavelengths(start: u16, end: u16, interval: u16) -> Vec<u16> {
    (start..end).step_by(interval as usize).collect()
}

#[test]
fn full_range_scan_yields_expected_measurements() {
    let (mock, mut spec) = test_spectrometer();

    let wavelengths = scan_wavelengths(198, 1000, 10);
    assert_eq!(wavelengths.len(), 81);
    for nm in &wavelengths {
        mock.queue_response(format!("0.5\t{nm}"));
    }

    let data = spec.scan(198, 1000, 10).unwrap();
    assert_eq!(data.len(), 81);

    // Each measurement carries the wavelength requested just before it,
    // in ascending order
    for (m, nm) in data.iter().zip(&wavelengths) {
        assert_eq!(m.wavelength_nm, *nm);
        assert_eq!(m.value, 0.5);
    }
    assert_eq!(data.first().unwrap().wavelength_nm, 198);
    assert_eq!(data.last().unwrap().wavelength_nm, 998);

    // Wire traffic: goto start, then (goto + read) per point, shutter opened
    // once before the first optical read
    let commands = mock.sent_commands();
    assert_eq!(commands[0], "G198");
    assert_eq!(commands[1], "G198");
    assert_eq!(commands[2], "SO");
    assert_eq!(commands[3], "A");
    assert_eq!(commands[4], "G208");
    assert_eq!(commands.len(), 2 + 2 * 81);
    assert_eq!(commands.iter().filter(|c| *c == "SO").count(), 1);
}

#[test]
fn scan_to_file_writes_tab_delimited_table() {
    let (mock, mut spec) = test_spectrometer();

    for nm in scan_wavelengths(400, 450, 10) {
        mock.queue_response(format!("0.25\t{nm}"));
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.tsv");
    spec.scan_to_file(&path, 400, 450, 10).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Abs\tWavelength");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "0.25\t400");
    assert_eq!(lines[5], "0.25\t440");
}

#[test]
fn scan_stops_at_malformed_response() {
    let (mock, mut spec) = test_spectrometer();

    mock.queue_response("0.5\t500");
    // Second reading times out: empty line, which fails to parse
    let err = spec.scan(500, 520, 10).unwrap_err();
    assert!(err.to_string().contains("Malformed device response"));
}

#[test]
fn reads_track_the_device_reported_wavelength() {
    let (mock, mut spec) = test_spectrometer();
    assert_eq!(spec.wavelength(), None);

    mock.queue_response("1.042\t260");
    spec.absorbance().unwrap();
    assert_eq!(spec.wavelength(), Some(260));

    mock.queue_response("87.5\t280");
    spec.transmission().unwrap();
    assert_eq!(spec.wavelength(), Some(280));

    mock.queue_response("12.0\t280");
    let m = spec.concentration().unwrap();
    assert_eq!(m.value, 12.0);

    mock.queue_response("0.91\t280");
    let m = spec.voltage().unwrap();
    assert_eq!(m.value, 0.91);

    assert_eq!(
        mock.sent_commands(),
        vec!["SO", "A", "T", "C", "V"]
    );
}

#[test]
fn calibrate_then_measure_sequence() {
    let (mock, mut spec) = test_spectrometer();

    spec.calibrate(ZeroMode::Transmission).unwrap();
    mock.queue_response("100.0\t540");
    spec.transmission().unwrap();

    // Calibration closes, zeroes, reopens; the read then finds the shutter
    // already open and sends only its query
    assert_eq!(mock.sent_commands(), vec!["SC", "Z", "SO", "T"]);
}

#[test]
fn printout_returns_accumulated_text() {
    let (mock, mut spec) = test_spectrometer();
    mock.queue_response("JENWAY 6305");
    mock.queue_response("0.123 Abs");
    mock.queue_response("540 nm");

    let output = spec.printout().unwrap();
    assert_eq!(output, "JENWAY 6305\n0.123 Abs\n540 nm\n");
}
