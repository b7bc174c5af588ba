//! `embedded-hal` views of the raw peripherals set up in [`hw_init`].
//!
//! The servo and button drivers are generic over the `embedded-hal` 1.0
//! traits; these newtypes bind them to the ESP-IDF LEDC channels and GPIO
//! levels (or to the host stubs).

use embedded_hal::digital::{self, InputPin};
use embedded_hal::pwm::{self, ErrorKind, SetDutyCycle};

use crate::drivers::hw_init;

// ── PWM ───────────────────────────────────────────────────────

/// Error returned when the LEDC driver rejects a duty update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcWriteError;

impl pwm::Error for LedcWriteError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One LEDC channel on the shared servo timer.
pub struct LedcChannel {
    channel: u32,
}

impl LedcChannel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }
}

impl pwm::ErrorType for LedcChannel {
    type Error = LedcWriteError;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        hw_init::LEDC_MAX_DUTY as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if hw_init::ledc_set(self.channel, u32::from(duty)) {
            Ok(())
        } else {
            Err(LedcWriteError)
        }
    }
}

// ── GPIO ──────────────────────────────────────────────────────

/// A configured GPIO input pin.
pub struct GpioInput {
    gpio: i32,
}

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl digital::ErrorType for GpioInput {
    type Error = core::convert::Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}
