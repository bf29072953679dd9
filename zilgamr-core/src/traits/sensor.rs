//! Range sensor trait

use crate::scan::Distance;

/// Errors that can occur while ranging
///
/// A missing echo is not an error; it is reported as
/// [`Distance::NO_ECHO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Trigger or echo pin could not be driven or read
    Pin,
}

/// Trait for distance sensors
pub trait RangeSensor {
    /// Take one blocking measurement
    fn measure_distance(&mut self) -> Result<Distance, SensorError>;
}
