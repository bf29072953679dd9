//! Radar renderer for Z.I.L.G.A.M.R
//!
//! Implements [`zilgamr_core::traits::RadarDisplay`] on any
//! `embedded-graphics` draw target with RGB565 colour. The same renderer
//! drives the ST7735 panel on the board and an in-memory framebuffer in
//! tests.
//!
//! Layout is a half-disc radar in the landscape 160x128 frame: pivot near
//! the bottom centre, four range rings, a sweep needle and red detection
//! markers.

#![no_std]
#![deny(unsafe_code)]

pub mod palette;
pub mod radar;

pub use radar::RadarRenderer;
