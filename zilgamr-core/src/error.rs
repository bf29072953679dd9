//! Sweep error type

use crate::traits::{ActuatorError, SensorError};

/// Errors surfaced by the sweep controller
///
/// Sensor timeouts and a full sample store are not errors. These cover
/// hardware faults only; the controller does not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepError {
    /// Range sensor pin fault
    Sensor(SensorError),
    /// Actuator rejected a command
    Actuator(ActuatorError),
    /// Draw target reported an error
    Display,
    /// Serial write failed
    Serial,
}

impl From<SensorError> for SweepError {
    fn from(e: SensorError) -> Self {
        SweepError::Sensor(e)
    }
}

impl From<ActuatorError> for SweepError {
    fn from(e: ActuatorError) -> Self {
        SweepError::Actuator(e)
    }
}
