//! Two-axis analog joystick.
//!
//! Each axis is a potentiometer on an ADC1 channel.  The ESP32-S3 samples
//! 12-bit values; [`JoystickAxis`] scales them down to the 0–1023 range the
//! deadband thresholds are written against.  A failed conversion reads as a
//! centred stick, so a flaky ADC never moves the arm.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the oneshot ADC via hw_init helpers.
//! On host/test: hw_init reports a centred stick, or tests inject any
//! [`AnalogRead`] implementation.

use log::{info, warn};

use crate::control::context::AXIS_CENTRE;
use crate::drivers::hw_init;

/// Largest value on the normalised axis scale.
pub const AXIS_MAX: u16 = 1023;

/// A raw analog sample source.
pub trait AnalogRead {
    /// One raw sample, or `None` if the conversion failed.
    fn read_raw(&mut self) -> Option<u16>;
}

/// One oneshot ADC1 channel.
pub struct Adc1Channel {
    channel: u32,
}

impl Adc1Channel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl AnalogRead for Adc1Channel {
    fn read_raw(&mut self) -> Option<u16> {
        hw_init::adc1_read(self.channel)
    }
}

/// One joystick axis, normalised to 0–1023.
pub struct JoystickAxis<A> {
    adc: A,
    shift: u8,
    last: u16,
    /// Consecutive failed reads.
    failures: u32,
}

impl<A: AnalogRead> JoystickAxis<A> {
    /// `shift` is the number of bits to drop from the raw sample.
    pub fn new(adc: A, shift: u8) -> Self {
        Self {
            adc,
            shift,
            last: AXIS_CENTRE,
            failures: 0,
        }
    }

    /// Normalised sample; [`AXIS_CENTRE`] when the ADC read fails.
    pub fn read(&mut self) -> u16 {
        match self.adc.read_raw() {
            Some(raw) => {
                if self.failures > 0 {
                    info!("Joystick ADC: recovered after {} failed reads", self.failures);
                    self.failures = 0;
                }
                self.last = (raw >> self.shift).min(AXIS_MAX);
            }
            None => {
                if self.failures == 0 {
                    warn!("Joystick ADC: read failed, holding axis centred");
                }
                self.failures = self.failures.saturating_add(1);
                self.last = AXIS_CENTRE;
            }
        }
        self.last
    }

    /// Most recent normalised sample.
    pub fn last(&self) -> u16 {
        self.last
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}
