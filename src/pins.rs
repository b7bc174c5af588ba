//! GPIO / peripheral pin assignments for the RoboArm controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Joint servos (LEDC PWM, 50 Hz)
// ---------------------------------------------------------------------------

pub const SERVO_BASE_GPIO: i32 = 15;
pub const SERVO_SHOULDER_GPIO: i32 = 16;
pub const SERVO_ELBOW_GPIO: i32 = 17;
pub const SERVO_CLAMP_GPIO: i32 = 18;
/// Spare servo header used to zero horns during assembly.
pub const SERVO_TESTER_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Joystick, analog (ADC1)
// ---------------------------------------------------------------------------

/// Joystick X axis drives the base.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const JOYSTICK_X_GPIO: i32 = 1;
/// Joystick Y axis drives the shoulder.  ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const JOYSTICK_Y_GPIO: i32 = 2;

pub const ADC1_CH_JOYSTICK_X: u32 = 0;
pub const ADC1_CH_JOYSTICK_Y: u32 = 1;

/// ESP32-S3 ADC1 samples are 12-bit; shifting by 2 yields the 0–1023 scale
/// the deadband thresholds are expressed in.
pub const ADC_TO_10BIT_SHIFT: u8 = 2;

// ---------------------------------------------------------------------------
// Push buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

pub const BUTTON_ELBOW_DOWN_GPIO: i32 = 4;
pub const BUTTON_ELBOW_UP_GPIO: i32 = 5;
pub const BUTTON_CLAMP_LEFT_GPIO: i32 = 6;
pub const BUTTON_CLAMP_RIGHT_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  14-bit gives ~1.2 µs steps at 50 Hz.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
