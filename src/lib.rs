//! RoboArm firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod joint;
pub mod pins;
pub mod scheduler;

// Hardware-facing layers.  The ESP-IDF calls inside are cfg-guarded, so
// these build (against stubs) on the host as well.
pub mod adapters;
pub mod drivers;
pub mod sensors;
