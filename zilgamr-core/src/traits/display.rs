//! Radar display trait

use crate::scan::{Distance, Sample};

/// Colour used for the sweep needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ink {
    /// Bright needle
    Trace,
    /// Background colour, removes a previously traced needle
    Erase,
}

/// Trait for rendering the radar
///
/// Implementations own the drawing surface and know the screen layout.
/// Angles are logical sweep angles.
pub trait RadarDisplay {
    /// Error type of the underlying draw target
    type Error;

    /// Draw the splash screen
    fn draw_startup_banner(&mut self) -> Result<(), Self::Error>;

    /// Fill the screen with the background colour
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draw range rings, baseline and pivot
    fn draw_grid(&mut self) -> Result<(), Self::Error>;

    /// Draw the "25cm".."100cm" ring labels
    fn draw_range_labels(&mut self) -> Result<(), Self::Error>;

    /// Draw or erase the sweep needle at `angle`
    fn draw_sweep_line(&mut self, angle: i16, ink: Ink) -> Result<(), Self::Error>;

    /// Mark a detection at `angle`
    ///
    /// Draws nothing when `distance` is outside the visual range.
    fn draw_detection(&mut self, angle: i16, distance: Distance) -> Result<(), Self::Error>;

    /// Draw the "Scanned Data:" header
    fn draw_scan_header(&mut self) -> Result<(), Self::Error>;

    /// Clear the screen and list `samples` below the header
    fn draw_scan_log(&mut self, samples: &[Sample]) -> Result<(), Self::Error>;
}

/// Helper trait for drawing composite screens
pub trait RadarDisplayExt: RadarDisplay {
    /// Draw the static radar backdrop
    fn draw_backdrop(&mut self) -> Result<(), Self::Error> {
        self.draw_grid()?;
        self.draw_range_labels()
    }

    /// Flash the sweep needle: trace, wait, erase
    fn flash_sweep_line<D>(&mut self, angle: i16, delay: &mut D, dwell_ms: u32) -> Result<(), Self::Error>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.draw_sweep_line(angle, Ink::Trace)?;
        delay.delay_ms(dwell_ms);
        self.draw_sweep_line(angle, Ink::Erase)
    }
}

// Blanket implementation for all RadarDisplay types
impl<T: RadarDisplay> RadarDisplayExt for T {}
