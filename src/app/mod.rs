//! Application core — arm orchestration, zero direct I/O.
//!
//! This module wires the motion-control stages to the scheduler and to
//! the outside world.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
