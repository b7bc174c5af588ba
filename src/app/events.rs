//! Outbound application events.
//!
//! The [`ArmService`](super::service::ArmService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, display, etc.).

use core::fmt::{self, Write};

use crate::joint::{Joint, JointTable};

/// Capacity of a rendered telemetry line.
pub const TELEMETRY_LINE_LEN: usize = 128;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The startup ramp finished and steady-state scheduling begins.
    Started { ramp_iterations: u32 },

    /// Per-pass diagnostics snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot of the arm, emitted once per scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    /// Actual angle of every joint (degrees).
    pub actual: JointTable<u8>,
    /// Latest raw base-axis joystick sample (0–1023).
    pub base_raw: u16,
    /// Scheduler passes since start.
    pub pass: u64,
}

impl TelemetryData {
    /// Render the diagnostic line into a fixed-capacity buffer.
    pub fn render(&self) -> heapless::String<TELEMETRY_LINE_LEN> {
        let mut line = heapless::String::new();
        // 128 bytes always fit four angles and one sample.
        let written = write!(line, "{self}");
        debug_assert!(written.is_ok(), "telemetry line truncated: {line}");
        line
    }
}

impl fmt::Display for TelemetryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, joint) in Joint::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} degree : {}", joint.name(), self.actual[*joint])?;
        }
        write!(f, " | base raw : {}", self.base_raw)
    }
}
