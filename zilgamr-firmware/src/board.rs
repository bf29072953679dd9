//! Board glue
//!
//! RP2040 wiring:
//!
//! | Function      | Peripheral         | GPIO |
//! |---------------|--------------------|------|
//! | Serial TX     | UART0              | 0    |
//! | Servo signal  | PWM slice 1, A     | 2    |
//! | HC-SR04 ECHO  | input              | 5    |
//! | HC-SR04 TRIG  | output             | 6    |
//! | TFT A0        | output             | 16   |
//! | TFT CS        | output             | 17   |
//! | TFT SCK       | SPI0               | 18   |
//! | TFT SDA       | SPI0 MOSI          | 19   |
//! | TFT RESET     | output             | 20   |

use core::convert::Infallible;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Instant;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use fixed::FixedU16;
use zilgamr_drivers::sensor::MicrosClock;

/// 125 MHz / 64 = 1.953125 MHz PWM counter
const SERVO_PWM_DIVIDER: u16 = 64;

/// 39063 counts at 1.953125 MHz = 20 ms
const SERVO_PWM_TOP: u16 = 39_062;

/// TFT SPI clock
pub const TFT_SPI_HZ: u32 = 16_000_000;

/// Servo output on one PWM slice channel A, fixed at 50 Hz
pub struct ServoPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl ServoPwm {
    /// Take over `pwm` and reprogram it for servo pulses, output low
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = FixedU16::from_num(SERVO_PWM_DIVIDER);
        config.top = SERVO_PWM_TOP;
        config.compare_a = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl ErrorType for ServoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for ServoPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.config.top
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.config.compare_a = duty.min(self.config.top);
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

/// Microsecond clock backed by the embassy time driver (1 MHz tick)
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_micros(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}
