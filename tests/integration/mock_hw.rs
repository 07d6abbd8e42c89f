//! Mock hardware adapter for integration tests.
//!
//! Records every motor and indicator call so tests can assert on the
//! full command history without touching real GPIO/PWM registers.  The
//! clock and end-stop are plain fields the test drives directly.

use window_servo::app::events::AppEvent;
use window_servo::app::ports::{ClockPort, EventSink, IndicatorPort, MotorPort, SensorPort};
use window_servo::fsm::context::MotorDirection;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub now_ms: u64,
    pub window_closed: bool,
    pub motor_calls: Vec<MotorDirection>,
    pub pulses: Vec<u32>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            window_closed: false,
            motor_calls: Vec::new(),
            pulses: Vec::new(),
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn last_motor(&self) -> Option<MotorDirection> {
        self.motor_calls.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn window_closed(&mut self) -> bool {
        self.window_closed
    }
}

impl MotorPort for MockHardware {
    fn drive(&mut self, direction: MotorDirection) {
        self.motor_calls.push(direction);
    }
}

impl ClockPort for MockHardware {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl IndicatorPort for MockHardware {
    fn pulse(&mut self, duration_ms: u32) {
        self.pulses.push(duration_ms);
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that keeps everything it is given.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Only the events that would be published on the radio.
    pub fn published(&self) -> Vec<AppEvent> {
        self.events
            .iter()
            .filter(|e| e.topic().is_some())
            .copied()
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
