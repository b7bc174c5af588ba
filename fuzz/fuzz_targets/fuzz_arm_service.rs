//! Fuzz target: `ArmService` control loop
//!
//! Decodes the input into a stream of `(time gap, joystick, buttons)`
//! polls and drives a started service through them, verifying:
//! - No panics under arbitrary input sequences or poll timing
//! - Every servo write stays inside its joint's range
//! - Actual angles never move further than their rate per pass
//!
//! cargo fuzz run fuzz_arm_service

#![no_main]

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use roboarm::app::events::AppEvent;
use roboarm::app::ports::{ActuatorPort, EventSink, InputPort};
use roboarm::app::service::ArmService;
use roboarm::config::ArmConfig;
use roboarm::control::context::{ButtonStates, InputSnapshot};
use roboarm::control::smoother::SmoothingPolicy;
use roboarm::joint::Joint;

struct FuzzArm {
    next: InputSnapshot,
    writes: Vec<(Joint, u8)>,
}

impl InputPort for FuzzArm {
    fn sample(&mut self) -> InputSnapshot {
        self.next
    }
}

impl ActuatorPort for FuzzArm {
    fn write(&mut self, joint: Joint, degrees: u8) {
        self.writes.push((joint, degrees));
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&policy, steps)) = data.split_first() else {
        return;
    };

    let config = ArmConfig {
        smoothing: if policy & 1 == 0 {
            SmoothingPolicy::Deadband
        } else {
            SmoothingPolicy::Exact
        },
        ..ArmConfig::default()
    };

    let mut app = ArmService::new(&config);
    let mut hw = FuzzArm {
        next: InputSnapshot::default(),
        writes: Vec::new(),
    };
    app.start(&mut hw, &mut NoDelay, &mut NullSink);

    let mut now = 0u64;
    // Each pass consumes 4 bytes: gap, base axis, shoulder axis, buttons.
    for chunk in steps.chunks_exact(4) {
        now += u64::from(chunk[0]);
        hw.next = InputSnapshot {
            base_axis: u16::from(chunk[1]) * 4,
            shoulder_axis: u16::from(chunk[2]) * 4,
            buttons: ButtonStates {
                elbow_down: chunk[3] & 0b0001 != 0,
                elbow_up: chunk[3] & 0b0010 != 0,
                clamp_left: chunk[3] & 0b0100 != 0,
                clamp_right: chunk[3] & 0b1000 != 0,
            },
        };

        let before: Vec<i16> = Joint::ALL.iter().map(|&j| app.actual(j)).collect();
        app.poll(now, &mut hw, &mut NullSink);

        for (i, &joint) in Joint::ALL.iter().enumerate() {
            let step = (app.actual(joint) - before[i]).abs();
            assert!(step <= config.joints[joint].rate);
        }
    }

    for (joint, deg) in hw.writes {
        assert!(config.joints[joint].range.contains(i16::from(deg)));
    }
});
