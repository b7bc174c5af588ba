//! Joint identifiers and the fixed per-joint table.
//!
//! The arm has exactly four independently driven joints.  Every per-joint
//! quantity (angles, rates, ranges, servo drivers) lives in a
//! [`JointTable`], a plain `[T; 4]` indexed by [`Joint`].

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of joints on the arm.
pub const JOINT_COUNT: usize = 4;

/// One independently controlled rotational axis of the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
    Clamp,
}

impl Joint {
    /// Every joint, in actuator write order.
    pub const ALL: [Joint; JOINT_COUNT] = [Joint::Base, Joint::Shoulder, Joint::Elbow, Joint::Clamp];

    /// Position of this joint inside a [`JointTable`].
    pub const fn index(self) -> usize {
        match self {
            Self::Base => 0,
            Self::Shoulder => 1,
            Self::Elbow => 2,
            Self::Clamp => 3,
        }
    }

    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::Clamp => "clamp",
        }
    }
}

impl core::fmt::Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per joint, indexed by [`Joint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JointTable<T>([T; JOINT_COUNT]);

impl<T> JointTable<T> {
    /// Build a table from values in [`Joint::ALL`] order.
    pub const fn new(values: [T; JOINT_COUNT]) -> Self {
        Self(values)
    }

    /// Build a table by evaluating `f` for every joint.
    pub fn from_fn(mut f: impl FnMut(Joint) -> T) -> Self {
        Self(Joint::ALL.map(&mut f))
    }

    /// Map every entry into a new table.
    pub fn map<U>(&self, mut f: impl FnMut(Joint, &T) -> U) -> JointTable<U> {
        JointTable::from_fn(|joint| f(joint, &self[joint]))
    }

    /// Iterate `(joint, value)` pairs in [`Joint::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &T)> {
        Joint::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate `(joint, value)` pairs mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Joint, &mut T)> {
        Joint::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> &[T; JOINT_COUNT] {
        &self.0
    }
}

impl<T> Index<Joint> for JointTable<T> {
    type Output = T;

    fn index(&self, joint: Joint) -> &T {
        &self.0[joint.index()]
    }
}

impl<T> IndexMut<Joint> for JointTable<T> {
    fn index_mut(&mut self, joint: Joint) -> &mut T {
        &mut self.0[joint.index()]
    }
}
