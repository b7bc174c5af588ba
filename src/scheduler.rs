//! Non-blocking cooperative scheduler.
//!
//! Interleaves input sampling and servo updates at independent periods.
//! The scheduler only tracks due times: when a schedule is due it notifies
//! a [`SchedulerDelegate`], and the delegate runs the actual work.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Main loop                             │
//! │                                                              │
//! │   now_ms ──▶ Scheduler.poll() ──┬──▶ ReadInputs   (10 ms)    │
//! │                                 └──▶ UpdateServos (10 ms)    │
//! │                                          │                   │
//! │                                          ▼                   │
//! │                             SchedulerDelegate.on_task_due()  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A schedule fires when `now_ms >= next_due_ms` and is then rescheduled
//! to `now_ms + period_ms`.  A late poll therefore fires a task once; it
//! never runs twice to catch up.

use crate::app::ports::{ScheduledTask, SchedulerDelegate};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label (e.g., "servo-update").
    pub label: &'static str,
    /// Task handed to the delegate when the schedule fires.
    pub task: ScheduledTask,
    /// Fixed period between firings (milliseconds).
    pub period_ms: u32,
    /// Whether this schedule is currently enabled.
    pub enabled: bool,
}

impl Schedule {
    pub fn periodic(label: &'static str, task: ScheduledTask, period_ms: u32) -> Self {
        Self {
            label,
            task,
            period_ms,
            enabled: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
const MAX_SCHEDULES: usize = 4;

pub struct Scheduler {
    schedules: [Option<ScheduleEntry>; MAX_SCHEDULES],
    /// Global enable flag.
    enabled: bool,
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Monotonic time at or after which the schedule fires next.
    next_due_ms: u64,
    /// Number of times the schedule has fired.
    fire_count: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            schedules: [None, None, None, None],
            enabled: true,
        }
    }

    /// Add a schedule, due immediately.  Returns the slot index, or `None`
    /// if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        for (i, slot) in self.schedules.iter_mut().enumerate() {
            if slot.is_none() {
                info!(
                    "Scheduler: added '{}' at slot {} (every {}ms)",
                    schedule.label, i, schedule.period_ms
                );
                *slot = Some(ScheduleEntry {
                    schedule,
                    next_due_ms: 0,
                    fire_count: 0,
                });
                return Some(i);
            }
        }
        None // All slots full.
    }

    /// Remove a schedule by slot index.
    pub fn remove(&mut self, slot: usize) {
        if slot < MAX_SCHEDULES {
            if let Some(entry) = &self.schedules[slot] {
                info!("Scheduler: removed '{}' from slot {}", entry.schedule.label, slot);
            }
            self.schedules[slot] = None;
        }
    }

    /// Enable or disable the entire scheduler.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Poll the scheduler.  Call once per main loop pass.
    ///
    /// Every enabled schedule whose due time has been reached fires once,
    /// in slot order.  Returns the number of schedules fired.
    ///
    /// # Parameters
    ///
    /// * `now_ms` — monotonic milliseconds since boot.
    /// * `delegate` — receives fire notifications.
    pub fn poll(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut fired = 0;
        for slot in &mut self.schedules {
            let entry = match slot {
                Some(e) if e.schedule.enabled => e,
                _ => continue,
            };

            if now_ms >= entry.next_due_ms {
                entry.next_due_ms = now_ms + u64::from(entry.schedule.period_ms);
                entry.fire_count += 1;
                debug!(
                    "Scheduler: '{}' due at {}ms, next at {}ms",
                    entry.schedule.label, now_ms, entry.next_due_ms
                );
                delegate.on_task_due(entry.schedule.label, entry.schedule.task);
                fired += 1;
            }
        }
        fired
    }

    /// Next due time of the schedule in `slot`, if occupied.
    pub fn next_due(&self, slot: usize) -> Option<u64> {
        self.schedules
            .get(slot)
            .and_then(Option::as_ref)
            .map(|e| e.next_due_ms)
    }

    /// Number of times the schedule in `slot` has fired.
    pub fn fire_count(&self, slot: usize) -> u64 {
        self.schedules
            .get(slot)
            .and_then(Option::as_ref)
            .map_or(0, |e| e.fire_count)
    }

    /// Number of active (enabled) schedules.
    pub fn active_count(&self) -> usize {
        self.schedules
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.schedule.enabled))
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
