//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to               |
//! |-------------|--------------------|---------------------------|
//! | `hardware`  | InputPort          | ESP32 ADC1, GPIO buttons  |
//! |             | ActuatorPort       | ESP32 LEDC servo channels |
//! | `log_sink`  | EventSink          | Serial log output         |
//! | `time`      | uptime / DelayNs   | ESP32 system timer        |

pub mod hardware;
pub mod log_sink;
pub mod time;
