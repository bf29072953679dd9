//! Radar display
//!
//! The ST7735 panel is drawn through the shared
//! [`zilgamr_display::RadarRenderer`].

pub mod st7735;

pub use st7735::{St7735, St7735Error};
