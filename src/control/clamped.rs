//! Saturating joint angle.
//!
//! Every joint angle in the system is a [`ClampedAngle`]: an integer number
//! of degrees bound to an [`AngleRange`].  Writes never fail; an
//! out-of-range value is pulled to the nearest bound.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: i16,
    pub max: i16,
}

impl AngleRange {
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: i16) -> bool {
        value >= self.min && value <= self.max
    }

    /// Saturate `value` into the range.  Accepts a widened value so callers
    /// can add deltas without overflow.
    pub fn saturate(&self, value: i32) -> i16 {
        value.clamp(i32::from(self.min), i32::from(self.max)) as i16
    }
}

/// A bounded integer angle that is never observed outside its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedAngle {
    value: i16,
    range: AngleRange,
}

impl ClampedAngle {
    /// Create an angle, saturating `value` into `range`.
    pub fn new(value: i16, range: AngleRange) -> Self {
        Self {
            value: range.saturate(i32::from(value)),
            range,
        }
    }

    pub fn get(&self) -> i16 {
        self.value
    }

    pub fn range(&self) -> AngleRange {
        self.range
    }

    /// Store `value`, saturated to the range.
    pub fn set(&mut self, value: i16) {
        self.value = self.range.saturate(i32::from(value));
    }

    /// Equivalent to `set(current + delta)`.
    pub fn adjust(&mut self, delta: i16) {
        self.value = self
            .range
            .saturate(i32::from(self.value) + i32::from(delta));
    }

    /// Angle as servo degrees.  Ranges are configured inside 0–180.
    pub fn as_degrees(&self) -> u8 {
        self.value.clamp(0, i16::from(u8::MAX)) as u8
    }
}
