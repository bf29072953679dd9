//! Scan reporter
//!
//! At the end of a sweep the stored samples are listed on the serial port,
//! one `Angle: <a> Dist: <d>` line each, in insertion order.

use embedded_io::Write;
use zilgamr_protocol::{ScanLine, LINE_TERMINATOR};

use crate::error::SweepError;
use crate::scan::Sample;
use crate::traits::RadarDisplay;

/// Wire form of a sample
pub fn scan_line(sample: &Sample) -> ScanLine {
    ScanLine::new(sample.angle, sample.distance.cm())
}

/// Write one line per sample and flush
///
/// Returns the number of lines written.
pub fn write_scan_log<W: Write>(serial: &mut W, samples: &[Sample]) -> Result<usize, W::Error> {
    for sample in samples {
        let line = scan_line(sample).to_line();
        serial.write_all(line.as_bytes())?;
        serial.write_all(LINE_TERMINATOR.as_bytes())?;
    }
    serial.flush()?;
    Ok(samples.len())
}

/// Present a finished sweep
///
/// Clears the screen and draws the header, or the full on-screen listing
/// when `screen_log` is set, then sends the serial log.
pub fn report<D, W>(
    display: &mut D,
    serial: &mut W,
    samples: &[Sample],
    screen_log: bool,
) -> Result<usize, SweepError>
where
    D: RadarDisplay,
    W: Write,
{
    if screen_log {
        display
            .draw_scan_log(samples)
            .map_err(|_| SweepError::Display)?;
    } else {
        display.clear().map_err(|_| SweepError::Display)?;
        display
            .draw_scan_header()
            .map_err(|_| SweepError::Display)?;
    }

    write_scan_log(serial, samples).map_err(|_| SweepError::Serial)
}
