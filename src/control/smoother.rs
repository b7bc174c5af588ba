//! Rate-limited convergence of actual angles toward targets.
//!
//! Each smoothing tick moves every joint independently by at most its
//! configured rate.  What happens close to the target depends on the
//! [`SmoothingPolicy`].

use serde::{Deserialize, Serialize};

use crate::config::ArmConfig;
use crate::control::context::ArmContext;
use crate::joint::{Joint, JointTable};

/// Behaviour once a joint is within a few steps of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingPolicy {
    /// Move by the full rate only while `|actual - target| > 2 * rate`,
    /// otherwise hold.  A joint can settle up to `2 * rate` degrees short
    /// of its target; the slack absorbs one-step jitter around the target.
    Deadband,
    /// Move by `min(rate, |actual - target|)`; joints land on the target.
    Exact,
}

pub struct MotionSmoother {
    rates: JointTable<i16>,
    policy: SmoothingPolicy,
}

impl MotionSmoother {
    pub fn new(rates: JointTable<i16>, policy: SmoothingPolicy) -> Self {
        Self { rates, policy }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(config.rates(), config.smoothing)
    }

    pub fn policy(&self) -> SmoothingPolicy {
        self.policy
    }

    /// Advance every joint by one tick.  Returns the signed movement
    /// applied to each joint's actual angle.
    pub fn step(&self, ctx: &mut ArmContext) -> JointTable<i16> {
        let mut moved: JointTable<i16> = JointTable::default();
        for joint in Joint::ALL {
            let delta = self.delta(joint, ctx.error(joint));
            if delta != 0 {
                let before = ctx.actual(joint);
                ctx.actual_mut(joint).adjust(delta);
                moved[joint] = ctx.actual(joint) - before;
            }
        }
        moved
    }

    /// Movement for one joint given `error = actual - target`.
    fn delta(&self, joint: Joint, error: i16) -> i16 {
        // Widened so `2 * rate` cannot overflow for any configured rate.
        let rate = i32::from(self.rates[joint]);
        let distance = i32::from(error).abs();
        let step = match self.policy {
            SmoothingPolicy::Deadband if distance > 2 * rate => rate,
            SmoothingPolicy::Deadband => 0,
            SmoothingPolicy::Exact => rate.min(distance),
        } as i16;
        if error > 0 { -step } else { step }
    }
}
