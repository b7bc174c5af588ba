//! Operator inputs — individual drivers and the aggregating [`InputHub`].
//!
//! The hub owns both joystick axes and all four buttons and produces an
//! [`InputSnapshot`] each input tick.

pub mod joystick;

use embedded_hal::digital::InputPin;

use crate::control::context::{ButtonStates, InputSnapshot};
use crate::drivers::button::ActiveLowButton;
use joystick::{AnalogRead, JoystickAxis};

/// The four arm buttons, grouped by the joint they drive.
pub struct ButtonPad<P> {
    pub elbow_down: ActiveLowButton<P>,
    pub elbow_up: ActiveLowButton<P>,
    pub clamp_left: ActiveLowButton<P>,
    pub clamp_right: ActiveLowButton<P>,
}

impl<P: InputPin> ButtonPad<P> {
    pub fn read(&mut self) -> ButtonStates {
        ButtonStates {
            elbow_down: self.elbow_down.is_pressed(),
            elbow_up: self.elbow_up.is_pressed(),
            clamp_left: self.clamp_left.is_pressed(),
            clamp_right: self.clamp_right.is_pressed(),
        }
    }
}

/// Aggregates every input driver and produces a unified snapshot.
pub struct InputHub<A, P> {
    pub base_axis: JoystickAxis<A>,
    pub shoulder_axis: JoystickAxis<A>,
    pub buttons: ButtonPad<P>,
}

impl<A: AnalogRead, P: InputPin> InputHub<A, P> {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(base_axis: JoystickAxis<A>, shoulder_axis: JoystickAxis<A>, buttons: ButtonPad<P>) -> Self {
        Self {
            base_axis,
            shoulder_axis,
            buttons,
        }
    }

    /// Read every input and return a unified snapshot.
    pub fn read_all(&mut self) -> InputSnapshot {
        InputSnapshot {
            base_axis: self.base_axis.read(),
            shoulder_axis: self.shoulder_axis.read(),
            buttons: self.buttons.read(),
        }
    }
}
