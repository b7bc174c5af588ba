//! Active-low push-button driver.
//!
//! ## Hardware
//!
//! Momentary switch to ground with a pull-up: the pin reads low while the
//! button is held.  The control loop samples the level once per input
//! tick; there is no edge detection and no gesture state, a held button
//! simply keeps requesting motion.

use embedded_hal::digital::InputPin;
use log::warn;

pub struct ActiveLowButton<P> {
    pin: P,
    gpio: i32,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P, gpio: i32) -> Self {
        Self { pin, gpio }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// `true` while the button is held.  A failed read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("Button GPIO{}: read failed ({:?})", self.gpio, e);
                false
            }
        }
    }
}
