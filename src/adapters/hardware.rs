//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`InputHub`] and all servo drivers, exposing them through
//! [`InputPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  The drivers are generic over
//! `embedded-hal` traits, so the same adapter runs against LEDC/GPIO on
//! the board and against mocks on the host.
//!
//! The actuator port cannot fail.  A servo write error is logged once when
//! it starts and once when the servo recovers; the joint keeps being
//! commanded every tick in between.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, InputPort};
use crate::control::context::InputSnapshot;
use crate::drivers::servo::ServoDriver;
use crate::joint::{Joint, JointTable};
use crate::sensors::InputHub;
use crate::sensors::joystick::AnalogRead;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, A, P> {
    servos: JointTable<ServoDriver<S>>,
    tester: Option<ServoDriver<S>>,
    inputs: InputHub<A, P>,
    /// Consecutive failed writes per joint.
    write_failures: JointTable<u32>,
}

impl<S: SetDutyCycle, A: AnalogRead, P: InputPin> HardwareAdapter<S, A, P> {
    pub fn new(
        servos: JointTable<ServoDriver<S>>,
        tester: Option<ServoDriver<S>>,
        inputs: InputHub<A, P>,
    ) -> Self {
        Self {
            servos,
            tester,
            inputs,
            write_failures: JointTable::default(),
        }
    }

    /// Park the spare tester servo, used to zero servo horns during
    /// assembly.  No-op when no tester output is fitted.
    pub fn park_tester(&mut self, angle: u8) {
        if let Some(tester) = self.tester.as_mut() {
            match tester.set_angle(angle) {
                Ok(()) => info!("Tester servo parked at {}\u{00b0}", angle),
                Err(e) => warn!("Tester servo: {}", e),
            }
        }
    }

    /// Last angle written to `joint`'s servo.
    pub fn servo_angle(&self, joint: Joint) -> Option<u8> {
        self.servos[joint].angle()
    }

    pub fn tester_angle(&self) -> Option<u8> {
        self.tester.as_ref().and_then(ServoDriver::angle)
    }

    pub fn write_failures(&self, joint: Joint) -> u32 {
        self.write_failures[joint]
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<S, A: AnalogRead, P: InputPin> InputPort for HardwareAdapter<S, A, P> {
    fn sample(&mut self) -> InputSnapshot {
        self.inputs.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S: SetDutyCycle, A, P> ActuatorPort for HardwareAdapter<S, A, P> {
    fn write(&mut self, joint: Joint, degrees: u8) {
        let failures = &mut self.write_failures[joint];
        match self.servos[joint].set_angle(degrees) {
            Ok(()) => {
                if *failures > 0 {
                    info!("Servo {}: recovered after {} failed writes", joint, failures);
                    *failures = 0;
                }
            }
            Err(e) => {
                if *failures == 0 {
                    warn!("Servo {}: {} (holding last pulse)", joint, e);
                }
                *failures = failures.saturating_add(1);
            }
        }
    }
}
