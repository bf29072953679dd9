//! Rotational actuator trait

/// Errors that can occur while commanding the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// PWM output rejected the duty cycle
    Pwm,
}

/// Trait for a single positional actuator (hobby servo)
pub trait Actuator {
    /// Command the actuator towards `degrees` (0-180)
    ///
    /// Returns as soon as the command is issued. Callers wait for
    /// mechanical settling themselves.
    fn set_angle(&mut self, degrees: u8) -> Result<(), ActuatorError>;
}
