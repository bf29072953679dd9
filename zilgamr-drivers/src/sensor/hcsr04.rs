//! HC-SR04 ultrasonic range sensor
//!
//! A 10 µs pulse on TRIG starts a measurement; ECHO then goes high for as
//! long as the sound took to travel out and back. The echo width is
//! measured by busy-polling the pin against a microsecond clock.
//!
//! ```ignore
//! let mut sonar = Hcsr04::new(trig, echo, Delay, clock);
//! let distance = sonar.measure_distance()?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use zilgamr_core::config::SensorTiming;
use zilgamr_core::traits::{RangeSensor, SensorError};
use zilgamr_core::Distance;

/// Free-running microsecond counter used to time the echo pulse
pub trait MicrosClock {
    /// Microseconds since some fixed point
    fn now_micros(&mut self) -> u64;
}

/// HC-SR04 driver
pub struct Hcsr04<TRIG, ECHO, D, C> {
    trigger: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    timing: SensorTiming,
}

impl<TRIG, ECHO, D, C> Hcsr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    /// Create a driver with the standard trigger timing and 1 s echo timeout
    pub fn new(trigger: TRIG, echo: ECHO, delay: D, clock: C) -> Self {
        Self::with_timing(trigger, echo, delay, clock, SensorTiming::DEFAULT)
    }

    pub fn with_timing(trigger: TRIG, echo: ECHO, delay: D, clock: C, timing: SensorTiming) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timing,
        }
    }

    /// Fire the trigger: low for a moment, then a short high pulse
    fn trigger_pulse(&mut self) -> Result<(), SensorError> {
        self.trigger.set_low().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(self.timing.trigger_settle_us);
        self.trigger.set_high().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(self.timing.trigger_pulse_us);
        self.trigger.set_low().map_err(|_| SensorError::Pin)
    }

    fn echo_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::Pin)
    }

    fn timed_out(&mut self, start: u64) -> bool {
        self.clock.now_micros().wrapping_sub(start) >= self.timing.echo_timeout_us as u64
    }

    /// Width of the next high pulse on ECHO in microseconds
    ///
    /// Waits for any pulse already in progress to end first. Returns 0 if
    /// the whole measurement exceeds the echo timeout.
    pub fn pulse_in(&mut self) -> Result<u32, SensorError> {
        let start = self.clock.now_micros();

        while self.echo_high()? {
            if self.timed_out(start) {
                return Ok(0);
            }
        }

        while !self.echo_high()? {
            if self.timed_out(start) {
                return Ok(0);
            }
        }
        let rise = self.clock.now_micros();

        while self.echo_high()? {
            if self.timed_out(start) {
                return Ok(0);
            }
        }
        let fall = self.clock.now_micros();

        Ok(fall.wrapping_sub(rise).min(u32::MAX as u64) as u32)
    }

    /// Release the pins and timing resources
    pub fn release(self) -> (TRIG, ECHO, D, C) {
        (self.trigger, self.echo, self.delay, self.clock)
    }
}

impl<TRIG, ECHO, D, C> RangeSensor for Hcsr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    fn measure_distance(&mut self) -> Result<Distance, SensorError> {
        self.trigger_pulse()?;
        let duration_us = self.pulse_in()?;
        Ok(Distance::from_echo_micros(duration_us))
    }
}
