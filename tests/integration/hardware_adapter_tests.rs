//! Integration tests: WindowService driving the real HardwareAdapter.
//!
//! The drivers run unmodified on top of fake `embedded-hal` pins, so
//! these cover the servo pulse widths, the end-stop polarity, the LED
//! modes and the error paths end to end.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use super::mock_hw::LogSink;

use window_servo::adapters::hardware::HardwareAdapter;
use window_servo::app::commands::ButtonEvent;
use window_servo::app::events::AppEvent;
use window_servo::app::ports::ClockPort;
use window_servo::app::service::WindowService;
use window_servo::config::WindowConfig;
use window_servo::drivers::servo::ServoDriver;
use window_servo::drivers::status_led::{LedMode, StatusLed};
use window_servo::fsm::StateId;
use window_servo::sensors::end_stop::EndStop;

// ── Fake peripherals ──────────────────────────────────────────

/// Input level shared with the test; `None` makes reads fail.
#[derive(Clone)]
struct SharedInput(Rc<Cell<Option<bool>>>);

#[derive(Debug)]
struct GpioFault;

impl embedded_hal::digital::Error for GpioFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for SharedInput {
    type Error = GpioFault;
}

impl InputPin for SharedInput {
    fn is_high(&mut self) -> Result<bool, GpioFault> {
        self.0.get().ok_or(GpioFault)
    }
    fn is_low(&mut self) -> Result<bool, GpioFault> {
        self.0.get().map(|high| !high).ok_or(GpioFault)
    }
}

/// PWM whose max duty equals the frame length in µs.
#[derive(Clone)]
struct SharedPwm(Rc<Cell<u16>>);

impl embedded_hal::pwm::ErrorType for SharedPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SharedPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.set(duty);
        Ok(())
    }
}

#[derive(Clone)]
struct SharedOutput(Rc<Cell<bool>>);

impl ErrorType for SharedOutput {
    type Error = Infallible;
}

impl OutputPin for SharedOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

#[derive(Clone)]
struct SharedClock(Rc<Cell<u64>>);

impl ClockPort for SharedClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── Rig ───────────────────────────────────────────────────────

type Board = HardwareAdapter<SharedPwm, SharedInput, SharedOutput, SharedClock>;

struct Rig {
    board: Board,
    end_stop: Rc<Cell<Option<bool>>>,
    duty: Rc<Cell<u16>>,
    led: Rc<Cell<bool>>,
    clock: Rc<Cell<u64>>,
}

fn rig() -> Rig {
    let cfg = WindowConfig::default();
    // Pull-up: HIGH while the window is not closed.
    let end_stop = Rc::new(Cell::new(Some(true)));
    let duty = Rc::new(Cell::new(0));
    let led = Rc::new(Cell::new(false));
    let clock = Rc::new(Cell::new(0));
    let board = HardwareAdapter::new(
        ServoDriver::new(
            SharedPwm(duty.clone()),
            cfg.servo_opening_angle,
            cfg.servo_closing_angle,
        ),
        EndStop::new(SharedInput(end_stop.clone())),
        StatusLed::new(SharedOutput(led.clone())),
        SharedClock(clock.clone()),
    );
    Rig {
        board,
        end_stop,
        duty,
        led,
        clock,
    }
}

fn step(app: &mut WindowService, rig: &mut Rig, sink: &mut LogSink) {
    let _ = app.step(&mut rig.board, sink);
    rig.board.tick_led();
}

#[test]
fn closing_drives_servo_at_closing_angle_and_blinks() {
    let mut rig = rig();
    let mut app = WindowService::new(WindowConfig::default());
    let mut sink = LogSink::new();
    app.start(&mut sink);

    step(&mut app, &mut rig, &mut sink);
    assert_eq!(app.phase(), StateId::Closing);
    assert_eq!(rig.duty.get(), 1277); // 70°
    assert_eq!(rig.board.led().mode(), LedMode::Blink);

    // End-stop pulls LOW when closed.
    rig.end_stop.set(Some(false));
    rig.clock.set(20);
    step(&mut app, &mut rig, &mut sink);
    assert_eq!(app.phase(), StateId::Closed);
    assert_eq!(rig.duty.get(), 0);
    assert!(!rig.board.servo().is_running());
    assert_eq!(rig.board.led().mode(), LedMode::Off);
    assert!(!rig.led.get());
}

#[test]
fn opening_drives_servo_at_opening_angle_and_blinks_fast() {
    let mut rig = rig();
    let mut app = WindowService::new(WindowConfig::default());
    let mut sink = LogSink::new();
    app.start(&mut sink);
    rig.end_stop.set(Some(false));
    step(&mut app, &mut rig, &mut sink); // → Closing
    step(&mut app, &mut rig, &mut sink); // → Closed

    app.handle_button(ButtonEvent::Click, &mut rig.board);
    rig.board.tick_led();
    assert!(rig.led.get(), "click pulse lights the LED");

    step(&mut app, &mut rig, &mut sink); // → Open
    step(&mut app, &mut rig, &mut sink); // → Opening
    assert_eq!(rig.duty.get(), 1722); // 110°
    assert_eq!(rig.board.led().mode(), LedMode::BlinkFast);
}

#[test]
fn failing_end_stop_falls_back_to_safety_stop() {
    let mut rig = rig();
    let mut app = WindowService::new(WindowConfig::default());
    let mut sink = LogSink::new();
    app.start(&mut sink);

    rig.end_stop.set(None);
    step(&mut app, &mut rig, &mut sink);
    rig.clock.set(5001);
    step(&mut app, &mut rig, &mut sink);

    assert_eq!(app.phase(), StateId::Closed);
    assert_eq!(sink.published(), vec![AppEvent::SafetyStop]);
    assert_eq!(rig.duty.get(), 0);
}

#[test]
fn pulse_expires_back_to_led_mode() {
    let mut rig = rig();
    let mut app = WindowService::new(WindowConfig::default());
    let mut sink = LogSink::new();
    app.start(&mut sink);
    rig.end_stop.set(Some(false));
    step(&mut app, &mut rig, &mut sink);
    step(&mut app, &mut rig, &mut sink);
    assert_eq!(app.phase(), StateId::Closed);

    rig.clock.set(1000);
    app.handle_button(ButtonEvent::Hold, &mut rig.board);
    rig.board.tick_led();
    assert!(rig.led.get());

    rig.clock.set(2999);
    rig.board.tick_led();
    assert!(rig.led.get());

    rig.clock.set(3000);
    rig.board.tick_led();
    assert!(!rig.led.get());
}
