//! Mock hardware adapter for integration tests.
//!
//! Replays scripted input snapshots and records every servo write so tests
//! can assert on the full command history without touching real GPIO/PWM
//! registers.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use roboarm::app::events::{AppEvent, TelemetryData};
use roboarm::app::ports::{ActuatorPort, EventSink, InputPort};
use roboarm::control::context::{ButtonStates, InputSnapshot};
use roboarm::joint::Joint;

// ── MockArm ───────────────────────────────────────────────────

/// Scripted inputs plus a servo write log.
///
/// Once the script runs out, the held snapshot is reported.  It defaults to
/// a centred, idle pad.
#[derive(Default)]
pub struct MockArm {
    script: VecDeque<InputSnapshot>,
    held: InputSnapshot,
    pub samples: usize,
    pub writes: Vec<(Joint, u8)>,
}

#[allow(dead_code)]
impl MockArm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` identical snapshots.
    pub fn push(&mut self, input: InputSnapshot, count: usize) {
        self.script.extend(std::iter::repeat_n(input, count));
    }

    /// Hold `input` for every sample after the script drains.
    pub fn hold(&mut self, input: InputSnapshot) {
        self.held = input;
    }

    /// Last angle written to `joint`, if any.
    pub fn last_written(&self, joint: Joint) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find_map(|&(j, deg)| (j == joint).then_some(deg))
    }

    pub fn writes_for(&self, joint: Joint) -> usize {
        self.writes.iter().filter(|(j, _)| *j == joint).count()
    }
}

impl InputPort for MockArm {
    fn sample(&mut self) -> InputSnapshot {
        self.samples += 1;
        self.script.pop_front().unwrap_or(self.held)
    }
}

impl ActuatorPort for MockArm {
    fn write(&mut self, joint: Joint, degrees: u8) {
        self.writes.push((joint, degrees));
    }
}

// ── Helpers for building inputs ───────────────────────────────

#[allow(dead_code)]
pub fn stick(base_axis: u16, shoulder_axis: u16) -> InputSnapshot {
    InputSnapshot {
        base_axis,
        shoulder_axis,
        buttons: ButtonStates::default(),
    }
}

#[allow(dead_code)]
pub fn buttons(buttons: ButtonStates) -> InputSnapshot {
    InputSnapshot {
        buttons,
        ..InputSnapshot::default()
    }
}

// ── CountingDelay ─────────────────────────────────────────────

/// Delay that only accumulates the requested time.
#[derive(Default)]
pub struct CountingDelay {
    pub total_ns: u64,
    pub calls: usize,
}

#[allow(dead_code)]
impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that keeps every event for inspection.
#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn telemetry(&self) -> Vec<TelemetryData> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(t) => Some(*t),
                AppEvent::Started { .. } => None,
            })
            .collect()
    }

    pub fn started(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Started { ramp_iterations } => Some(*ramp_iterations),
                AppEvent::Telemetry(_) => None,
            })
            .collect()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
