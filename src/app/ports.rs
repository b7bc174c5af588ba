//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ArmService (domain)
//! ```
//!
//! Driven adapters (joystick + buttons, servos, diagnostics output)
//! implement these traits.  The [`ArmService`](super::service::ArmService)
//! consumes them via generics, so the motion core never touches hardware
//! directly.  None of the ports can fail: inputs are always valid and
//! actuator writes are assumed to succeed.

use crate::control::context::InputSnapshot;
use crate::joint::{Joint, JointTable};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per input tick.
pub trait InputPort {
    /// Sample both joystick axes (0–1023 scale) and all four buttons.
    fn sample(&mut self) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the joint servos.
pub trait ActuatorPort {
    /// Drive one joint's servo to `degrees`.
    fn write(&mut self, joint: Joint, degrees: u8);

    /// Drive every joint, in [`Joint::ALL`] order.
    fn write_all(&mut self, degrees: &JointTable<u8>) {
        for (joint, &deg) in degrees.iter() {
            self.write(joint, deg);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the control stages)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a task is due.
///
/// The [`Scheduler`](crate::scheduler::Scheduler) only tracks due times;
/// the service implements this to run the input mapper or the motion
/// smoother.
pub trait SchedulerDelegate {
    /// Called when a schedule fires.
    ///
    /// * `label` — the human-readable label of the schedule that fired.
    /// * `task`  — which periodic task is due.
    fn on_task_due(&mut self, label: &str, task: ScheduledTask);
}

/// Discriminant passed to [`SchedulerDelegate::on_task_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Sample inputs and update target angles.
    ReadInputs,
    /// Advance actual angles and write them to the servos.
    UpdateServos,
}
