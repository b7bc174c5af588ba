//! Application service — the hexagonal core.
//!
//! [`ArmService`] owns the arm context, the control stages and the
//! scheduler.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         ArmService          │
//! ActuatorPort ◀──│ Mapper · Smoother · Ramp    │
//!                 └─────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::ArmConfig;
use crate::control::context::ArmContext;
use crate::control::input_mapper::InputMapper;
use crate::control::ramp::StartupRamp;
use crate::control::smoother::MotionSmoother;
use crate::joint::Joint;
use crate::scheduler::{Schedule, Scheduler};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, InputPort, ScheduledTask, SchedulerDelegate};

// ───────────────────────────────────────────────────────────────
// ArmService
// ───────────────────────────────────────────────────────────────

pub struct ArmService {
    ctx: ArmContext,
    mapper: InputMapper,
    smoother: MotionSmoother,
    ramp: StartupRamp,
    scheduler: Scheduler,
    pass_count: u64,
    warned_not_started: bool,
}

impl ArmService {
    /// Construct the service from configuration.
    ///
    /// Does **not** move anything; call [`start`](Self::start) next.
    pub fn new(config: &ArmConfig) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add(Schedule::periodic(
            "read-inputs",
            ScheduledTask::ReadInputs,
            config.input_period_ms,
        ));
        scheduler.add(Schedule::periodic(
            "update-servos",
            ScheduledTask::UpdateServos,
            config.servo_period_ms,
        ));

        Self {
            ctx: ArmContext::new(config),
            mapper: InputMapper::from_config(config),
            smoother: MotionSmoother::from_config(config),
            ramp: StartupRamp::from_config(config),
            scheduler,
            pass_count: 0,
            warned_not_started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the startup ramp, then hold the arm at its actual pose.
    ///
    /// Blocks until every joint has reached its target.  The ramp is
    /// one-shot: calling `start` again returns immediately without touching
    /// the actuators.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        if self.ramp.is_done() {
            return;
        }
        let iterations = self.ramp.run(&mut self.ctx, hw, delay);
        hw.write_all(&self.ctx.actual_degrees());
        sink.emit(&AppEvent::Started {
            ramp_iterations: iterations,
        });
        info!("ArmService started after {} ramp iterations", iterations);
    }

    pub fn is_started(&self) -> bool {
        self.ramp.is_done()
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one scheduler pass at `now_ms` and emit the diagnostics line.
    ///
    /// Due tasks run to completion inside this call; nothing blocks.  The
    /// `hw` parameter satisfies **both** [`InputPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut (impl InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        if !self.ramp.is_done() {
            if !self.warned_not_started {
                warn!("ArmService polled before start(); ignoring");
                self.warned_not_started = true;
            }
            return;
        }

        let mut dispatch = TaskDispatch {
            ctx: &mut self.ctx,
            mapper: &self.mapper,
            smoother: &self.smoother,
            hw,
        };
        self.scheduler.poll(now_ms, &mut dispatch);

        self.pass_count += 1;
        sink.emit(&AppEvent::Telemetry(self.telemetry()));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            actual: self.ctx.actual_degrees(),
            base_raw: self.ctx.last_input.base_axis,
            pass: self.pass_count,
        }
    }

    pub fn target(&self, joint: Joint) -> i16 {
        self.ctx.target(joint)
    }

    pub fn actual(&self, joint: Joint) -> i16 {
        self.ctx.actual(joint)
    }

    pub fn context(&self) -> &ArmContext {
        &self.ctx
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Borrows the control stages for one scheduler pass and runs whichever
/// task comes due.
struct TaskDispatch<'a, H> {
    ctx: &'a mut ArmContext,
    mapper: &'a InputMapper,
    smoother: &'a MotionSmoother,
    hw: &'a mut H,
}

impl<H: InputPort + ActuatorPort> SchedulerDelegate for TaskDispatch<'_, H> {
    fn on_task_due(&mut self, _label: &str, task: ScheduledTask) {
        match task {
            ScheduledTask::ReadInputs => {
                let input = self.hw.sample();
                self.mapper.apply(&input, self.ctx);
            }
            ScheduledTask::UpdateServos => {
                self.smoother.step(self.ctx);
                // Written every tick, moved or not.
                self.hw.write_all(&self.ctx.actual_degrees());
            }
        }
    }
}
