//! One-shot startup ramp.
//!
//! Brings every joint's actual angle onto its target before steady-state
//! scheduling begins.  All joints move together, each by at most its rate
//! per iteration; the last step of a joint closes whatever gap is left so
//! nothing overshoots.  Every iteration writes all four servos and then
//! waits a fixed delay, so the ramp blocks its caller until convergence.
//!
//! ```text
//!   Pending ──run()──▶ Done { iterations }
//! ```
//!
//! A `Done` ramp never moves anything again.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::ActuatorPort;
use crate::config::ArmConfig;
use crate::control::context::ArmContext;
use crate::joint::{Joint, JointTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    Pending,
    Done { iterations: u32 },
}

pub struct StartupRamp {
    rates: JointTable<i16>,
    step_delay_ms: u32,
    state: RampState,
}

impl StartupRamp {
    pub fn new(rates: JointTable<i16>, step_delay_ms: u32) -> Self {
        Self {
            rates,
            step_delay_ms,
            state: RampState::Pending,
        }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(config.rates(), config.ramp_step_delay_ms)
    }

    pub fn state(&self) -> RampState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, RampState::Done { .. })
    }

    /// Move every unconverged joint one step toward its target.
    /// Returns `true` once all joints are on target.
    pub fn step(&self, ctx: &mut ArmContext) -> bool {
        for joint in Joint::ALL {
            let error = ctx.error(joint);
            if error != 0 {
                let step = self.rates[joint].min(error.abs());
                ctx.actual_mut(joint)
                    .adjust(if error > 0 { -step } else { step });
            }
        }
        ctx.converged()
    }

    /// Run the ramp to completion, blocking on `delay` between iterations.
    ///
    /// Returns the number of iterations performed; `0` if the arm was
    /// already on target or the ramp has run before.
    pub fn run(
        &mut self,
        ctx: &mut ArmContext,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> u32 {
        if let RampState::Done { iterations } = self.state {
            info!("Ramp: already completed ({} iterations), skipping", iterations);
            return 0;
        }

        let mut iterations = 0u32;
        while !ctx.converged() {
            self.step(ctx);
            hw.write_all(&ctx.actual_degrees());
            delay.delay_ms(self.step_delay_ms);
            iterations += 1;
        }

        info!("Ramp: converged after {} iterations", iterations);
        self.state = RampState::Done { iterations };
        iterations
    }
}
