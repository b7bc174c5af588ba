//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions, and the servo LEDC timer and
//! channels using raw ESP-IDF sys calls. Called once from `main()` before
//! the startup ramp.  On host targets every call is a no-op stub so the
//! drivers above stay testable.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── LEDC channel map ──────────────────────────────────────────

pub const LEDC_CH_BASE: u32 = 0;
pub const LEDC_CH_SHOULDER: u32 = 1;
pub const LEDC_CH_ELBOW: u32 = 2;
pub const LEDC_CH_CLAMP: u32 = 3;
pub const LEDC_CH_TESTER: u32 = 4;

/// Maximum LEDC duty value at the configured resolution.
pub const LEDC_MAX_DUTY: u32 = (1 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;

/// `(channel, gpio)` for every servo output, in joint order then tester.
const SERVO_OUTPUTS: [(u32, i32); 5] = [
    (LEDC_CH_BASE, pins::SERVO_BASE_GPIO),
    (LEDC_CH_SHOULDER, pins::SERVO_SHOULDER_GPIO),
    (LEDC_CH_ELBOW, pins::SERVO_ELBOW_GPIO),
    (LEDC_CH_CLAMP, pins::SERVO_CLAMP_GPIO),
    (LEDC_CH_TESTER, pins::SERVO_TESTER_GPIO),
];

/// Active-low button inputs.
const BUTTON_PINS: [i32; 4] = [
    pins::BUTTON_ELBOW_DOWN_GPIO,
    pins::BUTTON_ELBOW_UP_GPIO,
    pins::BUTTON_CLAMP_LEFT_GPIO,
    pins::BUTTON_CLAMP_RIGHT_GPIO,
];

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!(
        "hw_init(sim): peripheral init skipped ({} servo outputs, {} buttons, joystick GPIO{}/GPIO{})",
        SERVO_OUTPUTS.len(),
        BUTTON_PINS.len(),
        pins::JOYSTICK_X_GPIO,
        pins::JOYSTICK_Y_GPIO
    );
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::ADC1_CH_JOYSTICK_X, pins::ADC1_CH_JOYSTICK_Y] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=joystick X on GPIO{}, CH{}=joystick Y on GPIO{})",
        pins::ADC1_CH_JOYSTICK_X,
        pins::JOYSTICK_X_GPIO,
        pins::ADC1_CH_JOYSTICK_Y,
        pins::JOYSTICK_Y_GPIO
    );
    Ok(())
}

/// One 12-bit sample, or `None` if the oneshot read failed.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.max(0) as u16)
}

/// Host stub: a centred joystick on the 12-bit scale.
#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    Some(2048)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    for &pin in &BUTTON_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: button inputs configured (pull-up, active-low)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host stub: pull-ups hold every button released (high).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: all servos (50 Hz, 14-bit)
    // SAFETY: Called from single main-task context via init_peripherals().
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    for &(channel, gpio) in &SERVO_OUTPUTS {
        let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        }) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    info!("hw_init: LEDC configured (servos=CH0-3, tester=CH4 @ 50Hz)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> bool {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    unsafe {
        let set = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        let update = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        set == ESP_OK as i32 && update == ESP_OK as i32
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) -> bool {
    true
}
