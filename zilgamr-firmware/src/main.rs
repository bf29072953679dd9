//! Z.I.L.G.A.M.R - sonar radar firmware
//!
//! An HC-SR04 on a hobby servo sweeps a half circle. Each reading is drawn
//! on an ST7735 TFT as a radar plot, and at the end of every sweep the
//! readings are listed on UART0 as `Angle: <a> Dist: <d>` lines.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use zilgamr_core::config::SERIAL_BAUD;
use zilgamr_core::SweepController;
use zilgamr_display::RadarRenderer;
use zilgamr_drivers::sensor::Hcsr04;
use zilgamr_drivers::servo::ServoDriver;

use crate::board::{EmbassyClock, ServoPwm, TFT_SPI_HZ};
use crate::display::St7735;

mod board;
mod display;
mod radar;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Z.I.L.G.A.M.R starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Serial scan log (UART0 TX on GPIO0)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = SERIAL_BAUD;
    let serial = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // ST7735 on SPI0: SCK=GPIO18, MOSI=GPIO19, CS=GPIO17, A0=GPIO16, RESET=GPIO20
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = TFT_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let reset = Output::new(p.PIN_20, Level::High);

    let mut tft = St7735::new(spi, cs, dc, reset);
    if let Err(e) = tft.init(&mut Delay) {
        error!("ST7735 init failed: {}", e);
    }
    let renderer = RadarRenderer::new(tft);
    info!("Display initialized");

    // Servo on PWM slice 1 channel A (GPIO2)
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    let servo = ServoDriver::new(ServoPwm::new(pwm));

    // HC-SR04: TRIG=GPIO6, ECHO=GPIO5
    let trigger = Output::new(p.PIN_6, Level::Low);
    let echo = Input::new(p.PIN_5, Pull::None);
    let sonar = Hcsr04::new(trigger, echo, Delay, EmbassyClock);
    info!("Servo and sonar initialized");

    let controller = SweepController::new(sonar, servo, renderer, serial, Delay);
    radar::run(controller)
}
