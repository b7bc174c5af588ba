//! Integration tests for the ArmService → scheduler → servos pipeline.
//!
//! These run on the host (x86_64) and drive the full service through
//! mock ports: startup ramp, periodic input mapping, motion smoothing and
//! the per-pass diagnostics line.

use roboarm::app::service::ArmService;
use roboarm::config::ArmConfig;
use roboarm::control::context::ButtonStates;
use roboarm::control::smoother::SmoothingPolicy;
use roboarm::joint::Joint;

use super::mock_hw::{CountingDelay, LogSink, MockArm, buttons, stick};

fn started(config: &ArmConfig) -> (ArmService, MockArm, LogSink) {
    let mut app = ArmService::new(config);
    let mut hw = MockArm::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut CountingDelay::default(), &mut sink);
    hw.writes.clear();
    sink.events.clear();
    (app, hw, sink)
}

/// Poll once every `step_ms` from `from_ms` up to and including `to_ms`.
fn run(app: &mut ArmService, hw: &mut MockArm, sink: &mut LogSink, from_ms: u64, to_ms: u64, step_ms: u64) {
    let mut now = from_ms;
    while now <= to_ms {
        app.poll(now, hw, sink);
        now += step_ms;
    }
}

// ── Startup ramp ──────────────────────────────────────────────

#[test]
fn start_ramps_boot_pose_onto_home() {
    let mut config = ArmConfig::default();
    config.joints[Joint::Base].boot = 10;
    config.joints[Joint::Elbow].boot = 158;

    let mut app = ArmService::new(&config);
    let mut hw = MockArm::new();
    let mut delay = CountingDelay::default();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut delay, &mut sink);

    assert!(app.is_started());
    assert_eq!(sink.started(), vec![3]);
    assert_eq!(delay.total_ms(), 30, "one step delay per iteration");

    // Three ramp iterations plus the final hold write.
    assert_eq!(hw.writes.len(), 16);
    let base: Vec<u8> = hw
        .writes
        .iter()
        .filter(|(j, _)| *j == Joint::Base)
        .map(|&(_, deg)| deg)
        .collect();
    assert_eq!(base, vec![6, 2, 0, 0]);
    assert_eq!(hw.last_written(Joint::Elbow), Some(160));
    assert!(app.context().converged());
}

#[test]
fn start_on_target_needs_no_iterations() {
    let mut app = ArmService::new(&ArmConfig::default());
    let mut hw = MockArm::new();
    let mut delay = CountingDelay::default();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut delay, &mut sink);

    assert_eq!(sink.started(), vec![0]);
    assert_eq!(delay.total_ns, 0);
    // The arm is still commanded to its pose once.
    assert_eq!(hw.writes.len(), 4);
    assert_eq!(hw.last_written(Joint::Clamp), Some(92));
}

#[test]
fn second_start_is_a_no_op() {
    let mut config = ArmConfig::default();
    config.joints[Joint::Clamp].boot = 60;

    let mut app = ArmService::new(&config);
    let mut hw = MockArm::new();
    let mut delay = CountingDelay::default();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut delay, &mut sink);

    let writes = hw.writes.len();
    let waited = delay.total_ns;
    app.start(&mut hw, &mut delay, &mut sink);

    assert_eq!(hw.writes.len(), writes);
    assert_eq!(delay.total_ns, waited);
    assert_eq!(sink.started().len(), 1);
}

#[test]
fn poll_before_start_is_ignored() {
    let mut app = ArmService::new(&ArmConfig::default());
    let mut hw = MockArm::new();
    let mut sink = LogSink::new();

    app.poll(0, &mut hw, &mut sink);
    app.poll(10, &mut hw, &mut sink);

    assert!(!app.is_started());
    assert_eq!(hw.samples, 0);
    assert!(hw.writes.is_empty());
    assert!(sink.events.is_empty());
}

// ── Scheduling ────────────────────────────────────────────────

#[test]
fn tasks_fire_on_their_periods() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());

    // 5 ms loop idle, 10 ms task periods.
    run(&mut app, &mut hw, &mut sink, 0, 95, 5);

    assert_eq!(hw.samples, 10);
    assert_eq!(hw.writes.len(), 40);
    // One diagnostics line per pass, fired or not.
    let passes: Vec<u64> = sink.telemetry().iter().map(|t| t.pass).collect();
    assert_eq!(passes, (1..=20).collect::<Vec<_>>());
}

#[test]
fn input_and_servo_periods_are_independent() {
    let config = ArmConfig {
        input_period_ms: 20,
        ..ArmConfig::default()
    };
    let (mut app, mut hw, mut sink) = started(&config);

    run(&mut app, &mut hw, &mut sink, 0, 90, 10);

    assert_eq!(hw.samples, 5);
    assert_eq!(hw.writes_for(Joint::Shoulder), 10);
}

#[test]
fn servos_are_rewritten_while_idle() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());

    run(&mut app, &mut hw, &mut sink, 0, 20, 10);

    let expected: Vec<(Joint, u8)> = [(Joint::Base, 0), (Joint::Shoulder, 0), (Joint::Elbow, 160), (Joint::Clamp, 92)]
        .into_iter()
        .cycle()
        .take(12)
        .collect();
    assert_eq!(hw.writes, expected);
}

// ── Input → target → actual ───────────────────────────────────

#[test]
fn held_stick_moves_base_exactly_with_exact_policy() {
    let config = ArmConfig {
        smoothing: SmoothingPolicy::Exact,
        ..ArmConfig::default()
    };
    let (mut app, mut hw, mut sink) = started(&config);
    hw.push(stick(700, 512), 5);

    run(&mut app, &mut hw, &mut sink, 0, 40, 10);
    assert_eq!(app.target(Joint::Base), 20);
    assert_eq!(app.actual(Joint::Base), 20);

    // Centred stick: nothing moves any more.
    run(&mut app, &mut hw, &mut sink, 50, 200, 10);
    assert_eq!(app.target(Joint::Base), 20);
    assert_eq!(app.actual(Joint::Base), 20);
    assert_eq!(hw.last_written(Joint::Base), Some(20));
}

#[test]
fn deadband_policy_stalls_short_of_target() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());
    hw.push(stick(700, 512), 5);

    run(&mut app, &mut hw, &mut sink, 0, 300, 10);

    assert_eq!(app.target(Joint::Base), 20);
    // Holds once the gap is no longer above twice the rate.
    assert_eq!(app.actual(Joint::Base), 12);
}

#[test]
fn shoulder_target_saturates_at_range_limit() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());
    hw.push(stick(512, 900), 30);

    run(&mut app, &mut hw, &mut sink, 0, 290, 10);
    assert_eq!(app.target(Joint::Shoulder), 60);

    hw.push(stick(512, 100), 30);
    run(&mut app, &mut hw, &mut sink, 300, 590, 10);
    assert_eq!(app.target(Joint::Shoulder), 0);
}

#[test]
fn elbow_button_lowers_target_and_actual_follows() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());
    hw.push(
        buttons(ButtonStates {
            elbow_down: true,
            ..ButtonStates::default()
        }),
        3,
    );

    run(&mut app, &mut hw, &mut sink, 0, 20, 10);

    assert_eq!(app.target(Joint::Elbow), 148);
    assert_eq!(app.actual(Joint::Elbow), 157);
}

#[test]
fn opposing_clamp_buttons_cancel() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());
    hw.hold(buttons(ButtonStates {
        clamp_left: true,
        clamp_right: true,
        ..ButtonStates::default()
    }));

    run(&mut app, &mut hw, &mut sink, 0, 100, 10);

    assert_eq!(app.target(Joint::Clamp), 92);
    assert_eq!(app.actual(Joint::Clamp), 92);
}

// ── Diagnostics ───────────────────────────────────────────────

#[test]
fn diagnostics_line_reports_actuals_and_base_sample() {
    let (mut app, mut hw, mut sink) = started(&ArmConfig::default());
    hw.push(stick(700, 512), 1);

    app.poll(0, &mut hw, &mut sink);

    let lines = sink.telemetry();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].pass, 1);
    assert_eq!(
        lines[0].render().as_str(),
        "base degree : 0, shoulder degree : 0, elbow degree : 160, clamp degree : 92 | base raw : 700"
    );
}
