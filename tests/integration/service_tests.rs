//! Integration tests: WindowService → FSM → motor / events.
//!
//! The mock clock only moves when a test advances it, so every deadline
//! comparison is exact.

use super::mock_hw::{LogSink, MockHardware};

use window_servo::app::commands::{AppCommand, ButtonEvent};
use window_servo::app::events::AppEvent;
use window_servo::app::service::WindowService;
use window_servo::config::WindowConfig;
use window_servo::fsm::StateId;
use window_servo::fsm::context::MotorDirection;

fn make_app() -> (WindowService, MockHardware, LogSink) {
    let mut app = WindowService::new(WindowConfig::default());
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

fn step(app: &mut WindowService, hw: &mut MockHardware, sink: &mut LogSink) -> u32 {
    app.step(hw, sink).delay_ms()
}

/// Drive the fresh controller to `Closed` via the end-stop.
fn close_window(app: &mut WindowService, hw: &mut MockHardware, sink: &mut LogSink) {
    hw.window_closed = false;
    step(app, hw, sink);
    hw.advance(20);
    hw.window_closed = true;
    step(app, hw, sink);
    assert_eq!(app.phase(), StateId::Closed);
    sink.clear();
}

/// From `Closed`, request `ms` remotely and run the opening cycle to `Opened`.
fn open_window(app: &mut WindowService, hw: &mut MockHardware, sink: &mut LogSink, ms: u32) {
    app.handle_remote_duration((ms / 100) as u8);
    hw.advance(20);
    step(app, hw, sink); // Closed → Open
    hw.advance(20);
    assert_eq!(step(app, hw, sink), ms); // Open → Opening, wait
    hw.advance(u64::from(ms));
    step(app, hw, sink); // Opening → Opened
    assert_eq!(app.phase(), StateId::Opened);
}

// ── Startup / closing ─────────────────────────────────────────

#[test]
fn startup_drives_closed_and_arms_deadline() {
    let (mut app, mut hw, mut sink) = make_app();
    assert_eq!(app.phase(), StateId::Close);
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Close)]);

    hw.now_ms = 1000;
    let delay = step(&mut app, &mut hw, &mut sink);

    assert_eq!(delay, 20);
    assert_eq!(app.phase(), StateId::Closing);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Close));
    assert_eq!(app.safety_deadline_ms(), Some(6000));
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::PhaseChanged {
            from: StateId::Close,
            to: StateId::Closing
        })
    );
}

#[test]
fn end_stop_before_deadline_emits_closed() {
    let (mut app, mut hw, mut sink) = make_app();
    step(&mut app, &mut hw, &mut sink);

    for _ in 0..10 {
        hw.advance(20);
        step(&mut app, &mut hw, &mut sink);
        assert_eq!(app.phase(), StateId::Closing);
    }

    hw.advance(20);
    hw.window_closed = true;
    step(&mut app, &mut hw, &mut sink);

    assert_eq!(app.phase(), StateId::Closed);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Stop));
    assert_eq!(sink.published(), vec![AppEvent::Closed]);
    assert_eq!(app.safety_deadline_ms(), None);
}

#[test]
fn stuck_end_stop_triggers_safety_stop_strictly_after_deadline() {
    let (mut app, mut hw, mut sink) = make_app();
    step(&mut app, &mut hw, &mut sink); // deadline = 5000

    hw.now_ms = 5000;
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Closing);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Close));

    hw.now_ms = 5001;
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Closed);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Stop));
    assert_eq!(sink.published(), vec![AppEvent::SafetyStop]);
    assert_eq!(app.safety_deadline_ms(), None);
}

#[test]
fn end_stop_takes_precedence_over_expired_deadline() {
    let (mut app, mut hw, mut sink) = make_app();
    step(&mut app, &mut hw, &mut sink);

    hw.now_ms = 9000;
    hw.window_closed = true;
    step(&mut app, &mut hw, &mut sink);

    assert_eq!(sink.published(), vec![AppEvent::Closed]);
}

#[test]
fn closed_without_duration_stays_closed() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);

    for _ in 0..500 {
        hw.advance(20);
        assert_eq!(step(&mut app, &mut hw, &mut sink), 20);
    }
    assert_eq!(app.phase(), StateId::Closed);
    assert!(sink.events.is_empty());
    assert_eq!(hw.last_motor(), Some(MotorDirection::Stop));
}

// ── Opening cycle ─────────────────────────────────────────────

#[test]
fn click_in_closed_runs_timed_open() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);

    app.handle_button(ButtonEvent::Click, &mut hw);
    assert_eq!(app.open_duration_ms(), 2000);
    assert_eq!(hw.pulses, vec![200]);

    hw.advance(20);
    assert_eq!(step(&mut app, &mut hw, &mut sink), 20);
    assert_eq!(app.phase(), StateId::Open);

    hw.advance(20);
    assert_eq!(step(&mut app, &mut hw, &mut sink), 2000);
    assert_eq!(app.phase(), StateId::Opening);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Open));

    hw.advance(2000);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Opened);
    assert_eq!(sink.published(), vec![AppEvent::Opened { duration_ms: 2000 }]);

    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Opened);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Stop));
}

#[test]
fn hold_in_closed_requests_long_open() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);

    app.handle_command(AppCommand::Button(ButtonEvent::Hold), &mut hw);
    assert_eq!(app.open_duration_ms(), 4000);
    assert_eq!(hw.pulses, vec![2000]);
}

#[test]
fn opened_holds_until_click_then_closes() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);
    open_window(&mut app, &mut hw, &mut sink, 2000);

    for _ in 0..100 {
        hw.advance(20);
        step(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.phase(), StateId::Opened);

    // A hold while open is acknowledged but changes nothing.
    app.handle_button(ButtonEvent::Hold, &mut hw);
    assert_eq!(app.open_duration_ms(), 2000);

    app.handle_button(ButtonEvent::Click, &mut hw);
    assert_eq!(app.open_duration_ms(), 0);

    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Close);

    hw.window_closed = false;
    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Closing);
    assert_eq!(hw.last_motor(), Some(MotorDirection::Close));
    assert_eq!(app.safety_deadline_ms(), Some(hw.now_ms + 5000));
}

// ── Remote command ────────────────────────────────────────────

#[test]
fn remote_zero_closes_an_opened_window() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);
    open_window(&mut app, &mut hw, &mut sink, 3000);

    app.handle_command(AppCommand::SetOpenDuration { tenths: 0 }, &mut hw);
    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Close);
    assert!(hw.pulses.is_empty());
}

#[test]
fn remote_zero_during_open_wait_still_completes_cycle() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);

    app.handle_remote_duration(25);
    hw.advance(20);
    step(&mut app, &mut hw, &mut sink); // → Open
    hw.advance(20);
    assert_eq!(step(&mut app, &mut hw, &mut sink), 2500); // → Opening

    app.handle_remote_duration(0);
    hw.advance(2500);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Opened);
    assert_eq!(sink.published(), vec![AppEvent::Opened { duration_ms: 0 }]);

    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Close);
}

#[test]
fn remote_while_closed_triggers_open() {
    let (mut app, mut hw, mut sink) = make_app();
    close_window(&mut app, &mut hw, &mut sink);

    app.handle_remote_duration(255);
    assert_eq!(app.open_duration_ms(), 25_500);
    hw.advance(20);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.phase(), StateId::Open);
}

// ── Motor output ──────────────────────────────────────────────

#[test]
fn motor_command_applied_every_step() {
    let (mut app, mut hw, mut sink) = make_app();
    for _ in 0..5 {
        step(&mut app, &mut hw, &mut sink);
        hw.advance(20);
    }
    assert_eq!(hw.motor_calls.len(), 5);
    assert!(hw.motor_calls.iter().all(|m| *m == MotorDirection::Close));
    assert_eq!(app.step_count(), 5);
}
