//! Hobby servo on a PWM channel
//!
//! The servo expects one pulse every 20 ms; the pulse width selects the
//! horn position. Widths follow the common 544-2400 µs range for 0-180°.

use embedded_hal::pwm::SetDutyCycle;
use zilgamr_core::traits::{Actuator, ActuatorError};

/// Servo pulse timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at `max_angle`
    pub max_pulse_us: u16,
    /// PWM period (50 Hz)
    pub period_us: u16,
    /// Commands above this are clamped
    pub max_angle: u8,
}

impl ServoConfig {
    pub const DEFAULT: Self = Self {
        min_pulse_us: 544,
        max_pulse_us: 2400,
        period_us: 20_000,
        max_angle: 180,
    };

    /// Pulse width for `degrees`, clamped to the travel
    pub const fn pulse_width_us(&self, degrees: u8) -> u16 {
        let degrees = if degrees > self.max_angle {
            self.max_angle
        } else {
            degrees
        };
        if self.max_angle == 0 {
            return self.min_pulse_us;
        }
        let range = (self.max_pulse_us - self.min_pulse_us) as u32;
        self.min_pulse_us + (range * degrees as u32 / self.max_angle as u32) as u16
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Servo driven by a single PWM output
pub struct ServoDriver<P> {
    pwm: P,
    config: ServoConfig,
    /// Last commanded angle, after clamping
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// Create a driver
    ///
    /// `pwm` must already run at the configured period. No pulse is
    /// emitted until the first command.
    pub fn new(pwm: P) -> Self {
        Self::with_config(pwm, ServoConfig::DEFAULT)
    }

    pub fn with_config(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            angle: None,
        }
    }

    /// Last commanded angle
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Actuator for ServoDriver<P> {
    fn set_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        let degrees = degrees.min(self.config.max_angle);
        let pulse = self.config.pulse_width_us(degrees);
        self.pwm
            .set_duty_cycle_fraction(pulse, self.config.period_us)
            .map_err(|_| ActuatorError::Pwm)?;
        self.angle = Some(degrees);
        Ok(())
    }
}
