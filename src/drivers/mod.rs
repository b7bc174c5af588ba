//! Actuator and input drivers, hardware initialisation, and peripheral helpers.

pub mod button;
pub mod channels;
pub mod hw_init;
pub mod servo;
