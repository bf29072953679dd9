//! Board-agnostic core logic for the sonar radar firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (range sensor, actuator, radar display)
//! - Sweep state machine and the controller that drives it
//! - Fixed-capacity sample store for one scan cycle
//! - Polar-to-screen projection and servo angle mapping
//! - Serial scan reporting
//! - Compile-time configuration

#![no_std]
#![deny(unsafe_code)]

// Property tests format their failure messages
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod report;
pub mod scan;
pub mod state;
pub mod traits;

pub use controller::{CycleSummary, SweepController, SweepStep};
pub use error::SweepError;
pub use scan::{Distance, Sample, SampleStore};
