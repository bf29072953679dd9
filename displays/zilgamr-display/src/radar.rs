//! Radar screens
//!
//! Text positions are the left end of the text baseline.

use embedded_graphics::geometry::Angle;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_4X6, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use zilgamr_core::config::ScreenGeometry;
use zilgamr_core::geometry::{self, ScreenPoint};
use zilgamr_core::traits::{Ink, RadarDisplay};
use zilgamr_core::{Distance, Sample};
use zilgamr_protocol::ScanLine;

use crate::palette;

const TITLE: &str = "Z.I.L.G.A.M.R";
const TITLE_POS: Point = Point::new(25, 40);
const STATUS: &str = "Testing . . . OK";
const STATUS_POS: Point = Point::new(40, 100);

const HEADER: &str = "Scanned Data:";
const HEADER_POS: Point = Point::new(10, 20);

/// Ring labels, outermost first, with their distance up from the bottom edge
const RANGE_LABELS: [(&str, i32); 4] = [("100cm", 113), ("75cm", 96), ("50cm", 68), ("25cm", 39)];
const LABEL_OFFSET_X: i32 = -10;

const PIVOT_RADIUS: u32 = 3;
const MARKER_RADIUS: u32 = 2;

const TITLE_FONT: &MonoFont = &FONT_10X20;
const TEXT_FONT: &MonoFont = &FONT_6X10;
const LABEL_FONT: &MonoFont = &FONT_4X6;

fn point(p: ScreenPoint) -> Point {
    Point::new(p.x, p.y)
}

/// Circle of `radius` pixels around `center`
fn disc(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, 2 * radius + 1)
}

/// Draws the radar onto an RGB565 target
pub struct RadarRenderer<D> {
    target: D,
    geometry: ScreenGeometry,
}

impl<D> RadarRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create a renderer with the default 160x128 layout
    pub fn new(target: D) -> Self {
        Self::with_geometry(target, ScreenGeometry::DEFAULT)
    }

    pub fn with_geometry(target: D, geometry: ScreenGeometry) -> Self {
        Self { target, geometry }
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    fn text(&mut self, text: &str, at: Point, font: &MonoFont, color: Rgb565) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(font, color);
        Text::with_baseline(text, at, style, Baseline::Alphabetic).draw(&mut self.target)?;
        Ok(())
    }

    fn pivot(&self) -> Point {
        point(geometry::pivot(&self.geometry))
    }
}

impl<D> RadarDisplay for RadarRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn draw_startup_banner(&mut self) -> Result<(), D::Error> {
        let g = self.geometry;
        for y in 0..g.height {
            let row = Rectangle::new(Point::new(0, y), Size::new(g.width as u32, 1));
            self.target.fill_solid(&row, palette::banner_row(y, g.height))?;
        }

        self.text(TITLE, TITLE_POS, TITLE_FONT, palette::TRACE)?;
        self.text(STATUS, STATUS_POS, TEXT_FONT, palette::TRACE)
    }

    fn clear(&mut self) -> Result<(), D::Error> {
        self.target.clear(palette::BACKGROUND)
    }

    fn draw_grid(&mut self) -> Result<(), D::Error> {
        let g = self.geometry;
        let pivot = self.pivot();
        let stroke = PrimitiveStyle::with_stroke(palette::GRID, 1);
        let half_turn = Angle::from_degrees(180.0);

        disc(pivot, PIVOT_RADIUS)
            .into_styled(PrimitiveStyle::with_fill(palette::GRID))
            .draw(&mut self.target)?;

        // Upper half only: from 9 o'clock clockwise over the top to 3 o'clock
        for index in 0..g.ring_count {
            let radius = geometry::ring_radius(&g, index) as u32;
            Arc::with_center(pivot, 2 * radius + 1, half_turn, half_turn)
                .into_styled(stroke)
                .draw(&mut self.target)?;
        }

        Line::new(Point::new(0, g.pivot_y), Point::new(g.width, g.pivot_y))
            .into_styled(stroke)
            .draw(&mut self.target)
    }

    fn draw_range_labels(&mut self) -> Result<(), D::Error> {
        let g = self.geometry;
        for (label, up) in RANGE_LABELS {
            let at = Point::new(g.center_x + LABEL_OFFSET_X, g.height - up);
            self.text(label, at, LABEL_FONT, palette::LABEL)?;
        }
        Ok(())
    }

    fn draw_sweep_line(&mut self, angle: i16, ink: Ink) -> Result<(), D::Error> {
        let color = match ink {
            Ink::Trace => palette::TRACE,
            Ink::Erase => palette::BACKGROUND,
        };
        let end = point(geometry::sweep_endpoint(&self.geometry, angle));

        Line::new(self.pivot(), end)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    fn draw_detection(&mut self, angle: i16, distance: Distance) -> Result<(), D::Error> {
        let Some(at) = geometry::detection_point(&self.geometry, angle, distance) else {
            return Ok(());
        };

        disc(point(at), MARKER_RADIUS)
            .into_styled(PrimitiveStyle::with_fill(palette::DETECTION))
            .draw(&mut self.target)
    }

    fn draw_scan_header(&mut self) -> Result<(), D::Error> {
        self.text(HEADER, HEADER_POS, TEXT_FONT, palette::TRACE)
    }

    fn draw_scan_log(&mut self, samples: &[Sample]) -> Result<(), D::Error> {
        RadarDisplay::clear(self)?;
        self.draw_scan_header()?;

        let line_height = TEXT_FONT.character_size.height as i32 + 2;
        let mut at = HEADER_POS + Point::new(0, line_height);

        for sample in samples {
            if at.y > self.geometry.height {
                break;
            }
            let line = ScanLine::new(sample.angle, sample.distance.cm()).to_line();
            self.text(&line, at, TEXT_FONT, palette::TRACE)?;
            at.y += line_height;
        }
        Ok(())
    }
}
