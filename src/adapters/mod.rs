//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                      |
//! |------------|----------------|----------------------------------|
//! | `hardware` | SensorPort     | End-stop GPIO                    |
//! |            | MotorPort      | Servo PWM (LEDC), status LED     |
//! |            | ClockPort      | System timer                     |
//! |            | IndicatorPort  | Status LED                       |
//! | `log_sink` | EventSink      | Serial log output                |
//! | `remote`   | (inbound)      | Radio "set open duration" mailbox|
//! | `time`     | ClockPort      | ESP32 system timer               |

pub mod hardware;
pub mod log_sink;
pub mod remote;
pub mod time;
