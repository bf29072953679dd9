//! Compile-time configuration
//!
//! Sweep range, step size, delays and screen geometry are fixed at build
//! time. Nothing here is read from flash or changed at runtime.

/// Number of samples kept per sweep
///
/// The sweep itself produces 136 steps; everything past the 91st sample of
/// a cycle is dropped.
pub const SAMPLE_CAPACITY: usize = 91;

/// Distance reported when no echo arrives before the timeout
pub const NO_ECHO_CM: u16 = 999;

/// Detections at or beyond this distance are not drawn
pub const VISUAL_RANGE_CM: u16 = 100;

/// Serial log baud rate
pub const SERIAL_BAUD: u32 = 115_200;

/// Sweep timing and range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepConfig {
    /// First logical angle of a sweep (degrees)
    pub start_angle: i16,
    /// Last logical angle of a sweep, inclusive (degrees)
    pub end_angle: i16,
    /// Angular step between samples (degrees)
    pub step_deg: i16,
    /// Servo command issued at boot
    pub servo_home: u8,
    /// Servo travel at the end of the logical range
    pub servo_max: u8,
    /// Wait after commanding the servo before sampling
    pub servo_settle_ms: u32,
    /// How long the sweep needle stays visible
    pub trace_dwell_ms: u32,
    /// Pause after the scan log is sent
    pub cycle_pause_ms: u32,
    /// How long the startup banner stays on screen
    pub banner_dwell_ms: u32,
    /// Also list every sample on screen after a sweep
    pub screen_log: bool,
}

impl SweepConfig {
    /// Default sweep: -180° to 90° in 2° steps
    pub const DEFAULT: Self = Self {
        start_angle: -180,
        end_angle: 90,
        step_deg: 2,
        servo_home: 90,
        servo_max: 180,
        servo_settle_ms: 30,
        trace_dwell_ms: 20,
        cycle_pause_ms: 1000,
        banner_dwell_ms: 2000,
        screen_log: false,
    };

    /// Number of steps in one sweep
    pub const fn step_count(&self) -> usize {
        if self.end_angle < self.start_angle || self.step_deg <= 0 {
            return 0;
        }
        ((self.end_angle - self.start_angle) / self.step_deg) as usize + 1
    }

    /// Width of the logical range in degrees
    pub const fn span(&self) -> i32 {
        self.end_angle as i32 - self.start_angle as i32
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Radar layout on the 160x128 landscape panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenGeometry {
    pub width: i32,
    pub height: i32,
    /// Pivot x (horizontal centre)
    pub center_x: i32,
    /// Pivot y, also the baseline
    pub pivot_y: i32,
    /// Sweep needle length in pixels
    pub scan_length: i32,
    /// Radius increment between grid rings
    pub ring_spacing: i32,
    pub ring_count: i32,
    /// Pixels per centimetre for detection markers, x100
    pub marker_scale_x100: u32,
    /// Detections at or beyond this are not drawn
    pub visual_range_cm: u16,
}

impl ScreenGeometry {
    pub const DEFAULT: Self = Self {
        width: 160,
        height: 128,
        center_x: 80,
        pivot_y: 118,
        scan_length: 105,
        ring_spacing: 29,
        ring_count: 4,
        marker_scale_x100: 115,
        visual_range_cm: VISUAL_RANGE_CM,
    };
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// HC-SR04 trigger and echo timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorTiming {
    /// Trigger held low before the pulse
    pub trigger_settle_us: u32,
    /// Trigger pulse width
    pub trigger_pulse_us: u32,
    /// Bound on one echo measurement, from the start of polling
    pub echo_timeout_us: u32,
}

impl SensorTiming {
    pub const DEFAULT: Self = Self {
        trigger_settle_us: 2,
        trigger_pulse_us: 10,
        echo_timeout_us: 1_000_000,
    };
}

impl Default for SensorTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
