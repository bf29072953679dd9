//! Colours
//!
//! RGB565 equivalents of the 8-bit colours the radar is drawn with.

use embedded_graphics::pixelcolor::Rgb565;

/// Background, also used to erase the needle
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

/// (0, 40, 0): rings, baseline, pivot
pub const GRID: Rgb565 = Rgb565::new(0, 10, 0);

/// (0, 180, 0): ring labels
pub const LABEL: Rgb565 = Rgb565::new(0, 45, 0);

/// (0, 255, 0): needle, banner and log text
pub const TRACE: Rgb565 = Rgb565::new(0, 63, 0);

/// (255, 0, 0): detection markers
pub const DETECTION: Rgb565 = Rgb565::new(31, 0, 0);

/// Green level at the top of the banner gradient, (0, 100, 0)
pub const BANNER_TOP_G6: u8 = 25;

/// Banner background colour for row `y` of `height`
///
/// Fades from [`BANNER_TOP_G6`] at the top to black at the bottom.
pub fn banner_row(y: i32, height: i32) -> Rgb565 {
    if height <= 1 {
        return Rgb565::new(0, BANNER_TOP_G6, 0);
    }
    let y = y.clamp(0, height - 1);
    let g = BANNER_TOP_G6 as i32 * (height - 1 - y) / (height - 1);
    Rgb565::new(0, g as u8, 0)
}
