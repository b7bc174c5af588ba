//! Integration tests for the HardwareAdapter port implementations.
//!
//! The adapter is assembled from the real servo, button and joystick
//! drivers on top of mock `embedded-hal` peripherals.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::pwm::{self, ErrorKind, SetDutyCycle};
use roboarm::adapters::hardware::HardwareAdapter;
use roboarm::app::ports::{ActuatorPort, InputPort};
use roboarm::drivers::button::ActiveLowButton;
use roboarm::drivers::servo::ServoDriver;
use roboarm::joint::{Joint, JointTable};
use roboarm::sensors::joystick::{AnalogRead, JoystickAxis};
use roboarm::sensors::{ButtonPad, InputHub};

// ── Mock peripherals ──────────────────────────────────────────

#[derive(Debug)]
struct PwmFault;

impl pwm::Error for PwmFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// PWM channel whose writes fail while the shared flag is set.
struct MockPwm {
    fail: Rc<Cell<bool>>,
}

impl pwm::ErrorType for MockPwm {
    type Error = PwmFault;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        16_383
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        if self.fail.get() { Err(PwmFault) } else { Ok(()) }
    }
}

/// ADC channel returning one fixed sample; `None` fails every read.
struct FixedAdc(Option<u16>);

impl AnalogRead for FixedAdc {
    fn read_raw(&mut self) -> Option<u16> {
        self.0
    }
}

/// GPIO input stuck at one level (`true` = high).
struct LevelPin(bool);

impl digital::ErrorType for LevelPin {
    type Error = Infallible;
}

impl InputPin for LevelPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0)
    }
}

type Adapter = HardwareAdapter<MockPwm, FixedAdc, LevelPin>;

fn adapter(fail: &Rc<Cell<bool>>, with_tester: bool) -> Adapter {
    adapter_with_axes(fail, with_tester, Some(2800), Some(4095))
}

fn adapter_with_axes(
    fail: &Rc<Cell<bool>>,
    with_tester: bool,
    base_raw: Option<u16>,
    shoulder_raw: Option<u16>,
) -> Adapter {
    let servo = || {
        ServoDriver::new(MockPwm {
            fail: Rc::clone(fail),
        })
    };
    let inputs = InputHub::new(
        JoystickAxis::new(FixedAdc(base_raw), 2),
        JoystickAxis::new(FixedAdc(shoulder_raw), 2),
        ButtonPad {
            // Active-low: a low level means pressed.
            elbow_down: ActiveLowButton::new(LevelPin(false), 4),
            elbow_up: ActiveLowButton::new(LevelPin(true), 5),
            clamp_left: ActiveLowButton::new(LevelPin(true), 6),
            clamp_right: ActiveLowButton::new(LevelPin(true), 7),
        },
    );
    let tester = with_tester.then(|| servo());
    HardwareAdapter::new(JointTable::from_fn(|_| servo()), tester, inputs)
}

// ── InputPort ─────────────────────────────────────────────────

#[test]
fn sample_scales_axes_and_reads_active_low_buttons() {
    let fail = Rc::new(Cell::new(false));
    let mut hw = adapter(&fail, false);

    let input = hw.sample();
    assert_eq!(input.base_axis, 700);
    assert_eq!(input.shoulder_axis, 1023);
    assert!(input.buttons.elbow_down);
    assert!(!input.buttons.elbow_up);
    assert!(!input.buttons.clamp_left);
    assert!(!input.buttons.clamp_right);
}

#[test]
fn failed_adc_read_samples_centred_stick() {
    let fail = Rc::new(Cell::new(false));
    let mut hw = adapter_with_axes(&fail, false, None, Some(400));

    let input = hw.sample();
    assert_eq!(input.base_axis, 512);
    assert_eq!(input.shoulder_axis, 100);
}

// ── ActuatorPort ──────────────────────────────────────────────

#[test]
fn write_all_drives_every_servo() {
    let fail = Rc::new(Cell::new(false));
    let mut hw = adapter(&fail, false);

    hw.write_all(&JointTable::new([10, 20, 160, 92]));

    assert_eq!(hw.servo_angle(Joint::Base), Some(10));
    assert_eq!(hw.servo_angle(Joint::Shoulder), Some(20));
    assert_eq!(hw.servo_angle(Joint::Elbow), Some(160));
    assert_eq!(hw.servo_angle(Joint::Clamp), Some(92));
}

#[test]
fn failed_writes_are_counted_until_recovery() {
    let fail = Rc::new(Cell::new(false));
    let mut hw = adapter(&fail, false);
    hw.write(Joint::Elbow, 150);

    fail.set(true);
    hw.write(Joint::Elbow, 140);
    hw.write(Joint::Elbow, 130);
    assert_eq!(hw.write_failures(Joint::Elbow), 2);
    assert_eq!(hw.servo_angle(Joint::Elbow), Some(150), "last good angle kept");
    assert_eq!(hw.write_failures(Joint::Base), 0);

    fail.set(false);
    hw.write(Joint::Elbow, 120);
    assert_eq!(hw.write_failures(Joint::Elbow), 0);
    assert_eq!(hw.servo_angle(Joint::Elbow), Some(120));
}

#[test]
fn tester_servo_is_parked_when_fitted() {
    let fail = Rc::new(Cell::new(false));

    let mut hw = adapter(&fail, true);
    assert_eq!(hw.tester_angle(), None);
    hw.park_tester(0);
    assert_eq!(hw.tester_angle(), Some(0));

    let mut bare = adapter(&fail, false);
    bare.park_tester(0);
    assert_eq!(bare.tester_angle(), None);
}
