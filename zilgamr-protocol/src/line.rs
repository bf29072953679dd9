//! A single `Angle: <a> Dist: <d>` line

use core::fmt::{self, Write};

use heapless::String;

/// Label preceding the angle field
pub const ANGLE_LABEL: &str = "Angle: ";

/// Label separating the angle and distance fields
pub const DIST_LABEL: &str = " Dist: ";

/// Line terminator written after every line
pub const LINE_TERMINATOR: &str = "\r\n";

/// Maximum formatted line length, terminator excluded
///
/// The widest line is `Angle: -32768 Dist: 65535` (25 bytes).
pub const LINE_CAPACITY: usize = 32;

/// Errors that can occur while parsing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line does not start with `Angle: `
    MissingAngle,
    /// Line has no ` Dist: ` field
    MissingDistance,
    /// Angle field is not a signed integer
    InvalidAngle,
    /// Distance field is not an unsigned integer
    InvalidDistance,
    /// Line is longer than [`LINE_CAPACITY`]
    LineTooLong,
}

/// One reported sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanLine {
    /// Logical sweep angle in degrees
    pub angle: i16,
    /// Distance in centimetres (999 = no echo)
    pub distance: u16,
}

impl ScanLine {
    /// Create a line for a sample
    pub const fn new(angle: i16, distance: u16) -> Self {
        Self { angle, distance }
    }

    /// Format the line without terminator
    pub fn to_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        // Cannot overflow: LINE_CAPACITY covers the widest i16/u16 pair
        let _ = write!(line, "{}", self);
        line
    }

    /// Parse a line, ignoring any trailing `\r` or `\n`
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        if line.len() > LINE_CAPACITY {
            return Err(ParseError::LineTooLong);
        }

        let rest = line
            .strip_prefix(ANGLE_LABEL)
            .ok_or(ParseError::MissingAngle)?;
        let (angle, distance) = rest
            .split_once(DIST_LABEL)
            .ok_or(ParseError::MissingDistance)?;

        let angle = angle
            .parse::<i16>()
            .map_err(|_| ParseError::InvalidAngle)?;
        let distance = distance
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidDistance)?;

        Ok(Self { angle, distance })
    }
}

impl fmt::Display for ScanLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", ANGLE_LABEL, self.angle, DIST_LABEL, self.distance)
    }
}
