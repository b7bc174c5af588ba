//! Shared mutable context threaded through every control stage.
//!
//! `ArmContext` holds the commanded (target) and real (actual) angle of
//! every joint plus the latest input snapshot.  It is owned by the
//! [`ArmService`](crate::app::service::ArmService) and lent by `&mut` to
//! the input mapper, the motion smoother and the startup ramp in turn.
//! Target angles are written only by the input mapper; actual angles only
//! by the smoother and the ramp.

use crate::config::ArmConfig;
use crate::control::clamped::ClampedAngle;
use crate::joint::{Joint, JointTable};

// ---------------------------------------------------------------------------
// Input snapshot (written by the input port each input tick)
// ---------------------------------------------------------------------------

/// Pressed state of the four push buttons (`true` = pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStates {
    pub elbow_down: bool,
    pub elbow_up: bool,
    pub clamp_left: bool,
    pub clamp_right: bool,
}

/// A point-in-time snapshot of every operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Joystick X axis (base), 0–1023.
    pub base_axis: u16,
    /// Joystick Y axis (shoulder), 0–1023.
    pub shoulder_axis: u16,
    pub buttons: ButtonStates,
}

/// Centre of the 10-bit joystick scale.
pub const AXIS_CENTRE: u16 = 512;

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            base_axis: AXIS_CENTRE,
            shoulder_axis: AXIS_CENTRE,
            buttons: ButtonStates::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ArmContext
// ---------------------------------------------------------------------------

pub struct ArmContext {
    target: JointTable<ClampedAngle>,
    actual: JointTable<ClampedAngle>,
    /// Latest input snapshot.  Updated before each input mapping.
    pub last_input: InputSnapshot,
}

impl ArmContext {
    /// Targets start at the configured home angles, actuals at the boot
    /// angles.
    pub fn new(config: &ArmConfig) -> Self {
        Self {
            target: config
                .joints
                .map(|_, j| ClampedAngle::new(j.home, j.range)),
            actual: config
                .joints
                .map(|_, j| ClampedAngle::new(j.boot, j.range)),
            last_input: InputSnapshot::default(),
        }
    }

    pub fn target(&self, joint: Joint) -> i16 {
        self.target[joint].get()
    }

    pub fn actual(&self, joint: Joint) -> i16 {
        self.actual[joint].get()
    }

    /// Actual angles as servo degrees, ready for the actuator port.
    pub fn actual_degrees(&self) -> JointTable<u8> {
        self.actual.map(|_, a| a.as_degrees())
    }

    /// Signed distance `actual - target` for one joint.
    pub fn error(&self, joint: Joint) -> i16 {
        self.actual(joint) - self.target(joint)
    }

    /// `true` when every joint's actual angle equals its target.
    pub fn converged(&self) -> bool {
        Joint::ALL.iter().all(|&j| self.error(j) == 0)
    }

    pub(crate) fn target_mut(&mut self, joint: Joint) -> &mut ClampedAngle {
        &mut self.target[joint]
    }

    pub(crate) fn actual_mut(&mut self, joint: Joint) -> &mut ClampedAngle {
        &mut self.actual[joint]
    }
}
