//! System configuration parameters
//!
//! All tunable parameters for the RoboArm controller.  The defaults are the
//! compiled-in reference values; [`ArmConfig::validate`] runs once at boot.

use serde::{Deserialize, Serialize};

use crate::control::clamped::AngleRange;
use crate::control::smoother::SmoothingPolicy;
use crate::error::{Error, Result};
use crate::joint::{Joint, JointTable};

/// Per-joint motion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointConfig {
    /// Mechanical range of the joint (degrees).
    pub range: AngleRange,
    /// Initial commanded angle.
    pub home: i16,
    /// Angle the actuator is assumed to sit at on power-up.
    pub boot: i16,
    /// Maximum degrees the actual angle may change per smoothing tick.
    pub rate: i16,
}

impl JointConfig {
    const fn new(min: i16, max: i16, home: i16, rate: i16) -> Self {
        Self {
            range: AngleRange::new(min, max),
            home,
            boot: home,
            rate,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmConfig {
    // --- Joints ---
    pub joints: JointTable<JointConfig>,

    // --- Input mapping ---
    /// Degrees added to / removed from a target per input tick.
    pub input_rate_deg: i16,
    /// Joystick samples above this move the target up (0–1023 scale).
    pub axis_upper_threshold: u16,
    /// Joystick samples below this move the target down (0–1023 scale).
    pub axis_lower_threshold: u16,

    // --- Smoothing ---
    pub smoothing: SmoothingPolicy,

    // --- Timing ---
    /// Input sampling period (milliseconds)
    pub input_period_ms: u32,
    /// Servo update period (milliseconds)
    pub servo_period_ms: u32,
    /// Delay between startup ramp iterations (milliseconds)
    pub ramp_step_delay_ms: u32,
    /// Idle delay at the end of each main loop pass (milliseconds)
    pub loop_idle_ms: u32,

    // --- Assembly ---
    /// Angle the spare tester servo is parked at on boot, if fitted.
    pub tester_angle_deg: Option<u8>,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            joints: JointTable::new([
                JointConfig::new(0, 180, 0, 4),  // base
                JointConfig::new(0, 60, 0, 1),   // shoulder
                JointConfig::new(0, 160, 160, 1), // elbow
                JointConfig::new(0, 124, 92, 4), // clamp
            ]),

            input_rate_deg: 4,
            axis_upper_threshold: 680,
            axis_lower_threshold: 340,

            smoothing: SmoothingPolicy::Deadband,

            input_period_ms: 10,    // 100 Hz
            servo_period_ms: 10,    // 100 Hz
            ramp_step_delay_ms: 10,
            loop_idle_ms: 5,

            tester_angle_deg: Some(0),
        }
    }
}

impl ArmConfig {
    /// Per-joint smoothing rates.
    pub fn rates(&self) -> JointTable<i16> {
        self.joints.map(|_, j| j.rate)
    }

    /// Reject parameter sets the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (_, joint) in self.joints.iter() {
            if joint.range.min > joint.range.max {
                return Err(Error::Config("joint range min above max"));
            }
            if !joint.range.contains(joint.home) {
                return Err(Error::Config("joint home angle outside range"));
            }
            if !joint.range.contains(joint.boot) {
                return Err(Error::Config("joint boot angle outside range"));
            }
            if joint.range.min < 0 || joint.range.max > 180 {
                return Err(Error::Config("joint range outside servo travel 0-180"));
            }
            if joint.rate <= 0 {
                return Err(Error::Config("joint rate must be positive"));
            }
            let span = (i32::from(joint.range.max) - i32::from(joint.range.min)).max(1);
            if i32::from(joint.rate) > span {
                return Err(Error::Config("joint rate wider than joint travel"));
            }
        }
        if self.input_rate_deg <= 0 {
            return Err(Error::Config("input rate must be positive"));
        }
        if self.axis_lower_threshold >= self.axis_upper_threshold {
            return Err(Error::Config("axis lower threshold must be below upper"));
        }
        if self.input_period_ms == 0 || self.servo_period_ms == 0 {
            return Err(Error::Config("task periods must be non-zero"));
        }
        if self.tester_angle_deg.is_some_and(|a| a > 180) {
            return Err(Error::Config("tester angle above 180"));
        }
        Ok(())
    }

    /// Convenience accessor for a single joint.
    pub fn joint(&self, joint: Joint) -> &JointConfig {
        &self.joints[joint]
    }
}
