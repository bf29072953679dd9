//! ST7735 TFT driver
//!
//! Driver for the 1.8" 128x160 ST7735R panel over SPI, rotated to
//! 160x128 landscape. Writes go straight to panel RAM; there is no frame
//! buffer on the MCU side.

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Landscape dimensions
pub const WIDTH: u32 = 160;
pub const HEIGHT: u32 = 128;

/// ST7735 commands
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const PWCTR3: u8 = 0xC2;
    pub const PWCTR4: u8 = 0xC3;
    pub const PWCTR5: u8 = 0xC4;
    pub const VMCTR1: u8 = 0xC5;
    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL: row/column exchange + row mirror (landscape), BGR panel
const MADCTL_LANDSCAPE: u8 = 0xA8;

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x05;

/// Power-up sequence: command, parameters, delay after (ms)
const INIT_SEQUENCE: &[(u8, &[u8], u32)] = &[
    (cmd::SWRESET, &[], 150),
    (cmd::SLPOUT, &[], 255),
    (cmd::FRMCTR1, &[0x01, 0x2C, 0x2D], 0),
    (cmd::FRMCTR2, &[0x01, 0x2C, 0x2D], 0),
    (cmd::FRMCTR3, &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D], 0),
    (cmd::INVCTR, &[0x07], 0),
    (cmd::PWCTR1, &[0xA2, 0x02, 0x84], 0),
    (cmd::PWCTR2, &[0xC5], 0),
    (cmd::PWCTR3, &[0x0A, 0x00], 0),
    (cmd::PWCTR4, &[0x8A, 0x2A], 0),
    (cmd::PWCTR5, &[0x8A, 0xEE], 0),
    (cmd::VMCTR1, &[0x0E], 0),
    (cmd::INVOFF, &[], 0),
    (cmd::MADCTL, &[MADCTL_LANDSCAPE], 0),
    (cmd::COLMOD, &[COLMOD_RGB565], 0),
    (
        cmd::GMCTRP1,
        &[
            0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01,
            0x03, 0x10,
        ],
        0,
    ),
    (
        cmd::GMCTRN1,
        &[
            0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00,
            0x02, 0x10,
        ],
        0,
    ),
    (cmd::NORON, &[], 10),
    (cmd::DISPON, &[], 100),
];

/// Bytes of solid colour pushed per SPI transfer
const FILL_CHUNK: usize = 64;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7735Error {
    /// SPI transfer failed
    Spi,
    /// CS, A0 or RESET pin could not be driven
    Pin,
}

/// ST7735 panel on a dedicated SPI bus
pub struct St7735<SPI, CS, DC, RST> {
    spi: SPI,
    /// Chip select, active low
    cs: CS,
    /// A0: low for commands, high for data
    dc: DC,
    reset: RST,
}

impl<SPI, CS, DC, RST> St7735<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver; call [`St7735::init`] before drawing
    pub fn new(spi: SPI, cs: CS, dc: DC, reset: RST) -> Self {
        Self { spi, cs, dc, reset }
    }

    /// Hardware reset and power-up sequence
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), St7735Error> {
        self.cs.set_high().map_err(|_| St7735Error::Pin)?;
        self.reset.set_high().map_err(|_| St7735Error::Pin)?;
        delay.delay_ms(5);
        self.reset.set_low().map_err(|_| St7735Error::Pin)?;
        delay.delay_ms(5);
        self.reset.set_high().map_err(|_| St7735Error::Pin)?;
        delay.delay_ms(150);

        for &(command, params, wait_ms) in INIT_SEQUENCE {
            self.command(command, params)?;
            if wait_ms > 0 {
                delay.delay_ms(wait_ms);
            }
        }

        Ok(())
    }

    fn select(&mut self) -> Result<(), St7735Error> {
        self.cs.set_low().map_err(|_| St7735Error::Pin)
    }

    fn deselect(&mut self) -> Result<(), St7735Error> {
        self.spi.flush().map_err(|_| St7735Error::Spi)?;
        self.cs.set_high().map_err(|_| St7735Error::Pin)
    }

    fn write_command_byte(&mut self, command: u8) -> Result<(), St7735Error> {
        self.dc.set_low().map_err(|_| St7735Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| St7735Error::Spi)?;
        // Command byte must be clocked out before A0 flips to data
        self.spi.flush().map_err(|_| St7735Error::Spi)?;
        self.dc.set_high().map_err(|_| St7735Error::Pin)
    }

    /// Send a command with its parameters in one chip-select window
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), St7735Error> {
        self.select()?;
        self.write_command_byte(command)?;
        if !params.is_empty() {
            self.spi.write(params).map_err(|_| St7735Error::Spi)?;
        }
        self.deselect()
    }

    /// Set the RAM window to `area` and start a memory write
    ///
    /// Leaves the chip selected with A0 high; pixel data follows.
    fn begin_window(&mut self, area: &Rectangle) -> Result<(), St7735Error> {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let (x0, y0) = (area.top_left.x as u16, area.top_left.y as u16);
        let (x1, y1) = (bottom_right.x as u16, bottom_right.y as u16);

        self.command(cmd::CASET, &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8])?;
        self.command(cmd::RASET, &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8])?;

        self.select()?;
        self.write_command_byte(cmd::RAMWR)
    }

    /// Fill a clipped area with one colour
    fn fill_area(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), St7735Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        let [hi, lo] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = area.size.width as usize * area.size.height as usize * 2;
        self.begin_window(&area)?;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.spi.write(&chunk[..n]).map_err(|_| St7735Error::Spi)?;
            remaining -= n;
        }
        self.deselect()
    }

    /// Write a single pixel
    fn put_pixel(&mut self, at: Point, color: Rgb565) -> Result<(), St7735Error> {
        let area = Rectangle::new(at, Size::new(1, 1));
        self.begin_window(&area)?;
        self.spi
            .write(&color.into_storage().to_be_bytes())
            .map_err(|_| St7735Error::Spi)?;
        self.deselect()
    }
}

impl<SPI, CS, DC, RST> OriginDimensions for St7735<SPI, CS, DC, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl<SPI, CS, DC, RST> DrawTarget for St7735<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = St7735Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(at, color) in pixels {
            if bounds.contains(at) {
                self.put_pixel(at, color)?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_area(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let screen = self.bounding_box();
        self.fill_area(&screen, color)
    }
}
