//! Operator input → target angle mapping.
//!
//! ## Analog axes (base, shoulder)
//!
//! ```text
//!   0 ─────── lower ════ neutral ════ upper ─────── 1023
//!      -rate               0                 +rate
//! ```
//!
//! Samples at or between the thresholds leave the target untouched so
//! joystick centre noise never drifts the arm.
//!
//! ## Button pairs (elbow down/up, clamp left/right)
//!
//! A pressed "decrease" button moves the target by `-rate`, a pressed
//! "increase" button by `+rate`.  When both buttons of a pair are held the
//! pair cancels and the joint is left alone.

use crate::config::ArmConfig;
use crate::control::context::{ArmContext, InputSnapshot};
use crate::joint::{Joint, JointTable};

pub struct InputMapper {
    rate: i16,
    upper: u16,
    lower: u16,
}

impl InputMapper {
    pub fn new(rate: i16, upper: u16, lower: u16) -> Self {
        Self { rate, upper, lower }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(
            config.input_rate_deg,
            config.axis_upper_threshold,
            config.axis_lower_threshold,
        )
    }

    /// Per-joint target deltas requested by `input`.  Pure.
    pub fn deltas(&self, input: &InputSnapshot) -> JointTable<i16> {
        let b = input.buttons;
        JointTable::new([
            self.axis_delta(input.base_axis),
            self.axis_delta(input.shoulder_axis),
            self.pair_delta(b.elbow_down, b.elbow_up),
            self.pair_delta(b.clamp_left, b.clamp_right),
        ])
    }

    /// Record `input` in the context and apply its deltas to the targets.
    /// Saturation happens in the target's [`ClampedAngle`].
    ///
    /// [`ClampedAngle`]: crate::control::clamped::ClampedAngle
    pub fn apply(&self, input: &InputSnapshot, ctx: &mut ArmContext) {
        ctx.last_input = *input;
        let deltas = self.deltas(input);
        for joint in Joint::ALL {
            if deltas[joint] != 0 {
                ctx.target_mut(joint).adjust(deltas[joint]);
            }
        }
    }

    fn axis_delta(&self, sample: u16) -> i16 {
        if sample > self.upper {
            self.rate
        } else if sample < self.lower {
            -self.rate
        } else {
            0
        }
    }

    fn pair_delta(&self, decrease: bool, increase: bool) -> i16 {
        match (decrease, increase) {
            (true, false) => -self.rate,
            (false, true) => self.rate,
            _ => 0,
        }
    }
}
