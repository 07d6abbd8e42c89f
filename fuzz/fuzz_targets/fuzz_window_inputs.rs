//! Fuzz target: `WindowService` input sequences
//!
//! Interprets the fuzz input as a stream of (opcode, argument) pairs:
//! button gestures, remote durations, end-stop changes and clock jumps.
//! After every controller step it asserts that the phase moved along the
//! cycle, the closing deadline is armed exactly while closing, and no
//! step leaves the window closing past its deadline.
//!
//! cargo fuzz run fuzz_window_inputs

#![no_main]

// Host lock implementation for the library's remote mailbox.
use critical_section as _;
use libfuzzer_sys::fuzz_target;
use window_servo::app::commands::ButtonEvent;
use window_servo::app::events::AppEvent;
use window_servo::app::ports::{ClockPort, EventSink, IndicatorPort, MotorPort, SensorPort};
use window_servo::app::service::WindowService;
use window_servo::config::WindowConfig;
use window_servo::fsm::StateId;
use window_servo::fsm::context::MotorDirection;

#[derive(Default)]
struct Sim {
    now_ms: u64,
    closed: bool,
}

impl SensorPort for Sim {
    fn window_closed(&mut self) -> bool {
        self.closed
    }
}

impl MotorPort for Sim {
    fn drive(&mut self, _direction: MotorDirection) {}
}

impl ClockPort for Sim {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl IndicatorPort for Sim {
    fn pulse(&mut self, _duration_ms: u32) {}
}

struct Check;

impl EventSink for Check {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::PhaseChanged { from, to } = *event {
            // The table order is the cycle order; Opened wraps to Close.
            let next = StateId::from_index((from as usize + 1) % StateId::COUNT);
            assert_eq!(next, to, "illegal transition {:?} -> {:?}", from, to);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut app = WindowService::new(WindowConfig::default());
    let mut sim = Sim::default();
    let mut sink = Check;
    app.start(&mut sink);
    let mut next_due = 0u64;

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        match op % 5 {
            0 => app.handle_button(ButtonEvent::Click, &mut sim),
            1 => app.handle_button(ButtonEvent::Hold, &mut sim),
            2 => app.handle_remote_duration(arg),
            3 => sim.closed = arg & 1 == 1,
            _ => sim.now_ms += u64::from(arg) * 10,
        }

        if sim.now_ms < next_due {
            continue;
        }
        let delay = app.step(&mut sim, &mut sink).delay_ms();
        next_due = sim.now_ms + u64::from(delay);

        let closing = app.phase() == StateId::Closing;
        assert_eq!(closing, app.safety_deadline_ms().is_some());
        if let Some(deadline) = app.safety_deadline_ms() {
            assert!(sim.now_ms <= deadline);
        }
    }
});
