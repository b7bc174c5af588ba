//! Hobby servo driver.
//!
//! Converts an angle in degrees into a pulse width on a 50 Hz PWM output.
//! Pulse limits follow the common 544–2400 µs servo convention, mapped
//! linearly over 0–180°.
//!
//! ## Dual-target design
//!
//! Generic over [`SetDutyCycle`]: on ESP-IDF it drives an LEDC channel, on
//! host/test any mock PWM.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

/// 50 Hz frame.
const PERIOD_US: u32 = 20_000;
/// Pulse width at 0°.
pub const MIN_PULSE_US: u32 = 544;
/// Pulse width at 180°.
pub const MAX_PULSE_US: u32 = 2_400;
/// Mechanical travel.
pub const MAX_ANGLE_DEG: u8 = 180;

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    /// Drive the servo to `angle` (saturated to 0–180).
    pub fn set_angle(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let angle = angle.min(MAX_ANGLE_DEG);
        let duty = self.angle_to_duty(angle);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.angle = Some(angle);
        Ok(())
    }

    /// Last angle successfully written, `None` before the first write.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    pub fn pulse_width_us(angle: u8) -> u32 {
        let angle = u32::from(angle.min(MAX_ANGLE_DEG));
        MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE_DEG)
    }

    fn angle_to_duty(&self, angle: u8) -> u16 {
        let max = u32::from(self.pwm.max_duty_cycle());
        (Self::pulse_width_us(angle) * max / PERIOD_US) as u16
    }
}
