//! Motion control — pure logic, zero I/O.
//!
//! ```text
//!   InputSnapshot ──▶ InputMapper ──▶ target ──▶ MotionSmoother ──▶ actual
//!                                                 StartupRamp (once) ─┘
//! ```

pub mod clamped;
pub mod context;
pub mod input_mapper;
pub mod ramp;
pub mod smoother;
