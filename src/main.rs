//! RoboArm Firmware — Main Entry Point
//!
//! Hexagonal architecture driven by a single cooperative loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink      Esp32TimeAdapter   │
//! │  (Input+Actuator)         (EventSink)       (uptime, delay)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ArmService (pure logic)                   │    │
//! │  │  InputMapper · MotionSmoother · StartupRamp            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven, fixed period per task)            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::info;

use roboarm::adapters::hardware::HardwareAdapter;
use roboarm::adapters::log_sink::LogEventSink;
use roboarm::adapters::time::{Esp32TimeAdapter, ThreadDelay};
use roboarm::app::service::ArmService;
use roboarm::config::ArmConfig;
use roboarm::drivers::button::ActiveLowButton;
use roboarm::drivers::channels::{GpioInput, LedcChannel};
use roboarm::drivers::hw_init;
use roboarm::drivers::servo::ServoDriver;
use roboarm::joint::JointTable;
use roboarm::pins;
use roboarm::sensors::joystick::{Adc1Channel, JoystickAxis};
use roboarm::sensors::{ButtonPad, InputHub};

fn button(gpio: i32) -> ActiveLowButton<GpioInput> {
    ActiveLowButton::new(GpioInput::new(gpio), gpio)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RoboArm v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ArmConfig::default();
    config.validate()?;

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical: log and halt.
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let inputs = InputHub::new(
        JoystickAxis::new(Adc1Channel::new(pins::ADC1_CH_JOYSTICK_X), pins::ADC_TO_10BIT_SHIFT),
        JoystickAxis::new(Adc1Channel::new(pins::ADC1_CH_JOYSTICK_Y), pins::ADC_TO_10BIT_SHIFT),
        ButtonPad {
            elbow_down: button(pins::BUTTON_ELBOW_DOWN_GPIO),
            elbow_up: button(pins::BUTTON_ELBOW_UP_GPIO),
            clamp_left: button(pins::BUTTON_CLAMP_LEFT_GPIO),
            clamp_right: button(pins::BUTTON_CLAMP_RIGHT_GPIO),
        },
    );

    let servos = JointTable::new([
        ServoDriver::new(LedcChannel::new(hw_init::LEDC_CH_BASE)),
        ServoDriver::new(LedcChannel::new(hw_init::LEDC_CH_SHOULDER)),
        ServoDriver::new(LedcChannel::new(hw_init::LEDC_CH_ELBOW)),
        ServoDriver::new(LedcChannel::new(hw_init::LEDC_CH_CLAMP)),
    ]);
    let tester = config
        .tester_angle_deg
        .map(|_| ServoDriver::new(LedcChannel::new(hw_init::LEDC_CH_TESTER)));

    let mut hw = HardwareAdapter::new(servos, tester, inputs);
    if let Some(angle) = config.tester_angle_deg {
        hw.park_tester(angle);
    }

    let mut log_sink = LogEventSink::new();
    let time_adapter = Esp32TimeAdapter::new();
    let mut delay = ThreadDelay;

    // ── 5. Construct app service and run the startup ramp ─────
    let mut app = ArmService::new(&config);
    app.start(&mut hw, &mut delay, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        app.poll(time_adapter.uptime_ms(), &mut hw, &mut log_sink);
        delay.delay_ms(config.loop_idle_ms);
    }
}
