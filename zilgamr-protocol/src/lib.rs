//! Serial scan log protocol
//!
//! After every sweep the radar dumps the samples it stored over the serial
//! port, one text line per sample:
//!
//! ```text
//! Angle: -180 Dist: 23\r\n
//! Angle: -178 Dist: 999\r\n
//! ```
//!
//! There is no framing, checksum or acknowledgement. A distance of `999`
//! means the sensor saw no echo. This crate formats those lines on the
//! firmware side and parses them back for host tools and tests.

#![no_std]
#![deny(unsafe_code)]

// Property tests format their failure messages
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod line;

pub use line::{ParseError, ScanLine, LINE_CAPACITY, LINE_TERMINATOR};
