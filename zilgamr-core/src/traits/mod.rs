//! Hardware abstraction traits
//!
//! These traits define the interface between the sweep logic and
//! hardware-specific implementations. Timing uses
//! [`embedded_hal::delay::DelayNs`] and the serial log uses
//! [`embedded_io::Write`] directly.

pub mod actuator;
pub mod display;
pub mod sensor;

pub use actuator::{Actuator, ActuatorError};
pub use display::{Ink, RadarDisplay, RadarDisplayExt};
pub use sensor::{RangeSensor, SensorError};
