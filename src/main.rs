//! Window Servo Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative, self-rescheduling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink     remote mailbox      │
//! │  (Sensor+Motor+Clock+LED) (EventSink)      (Signal, latest)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           WindowService (pure logic)                   │    │
//! │  │  FSM · closing deadline                                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (runs the controller when its Continue is due)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Result, anyhow, ensure};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{Pin, PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{info, warn};

use window_servo::adapters::hardware::HardwareAdapter;
use window_servo::adapters::log_sink::LogEventSink;
use window_servo::adapters::remote;
use window_servo::adapters::time::MonotonicClock;
use window_servo::app::ports::{ClockPort, IndicatorPort};
use window_servo::app::service::WindowService;
use window_servo::app::task::{WINDOW_TASK, WindowTask};
use window_servo::config::WindowConfig;
use window_servo::drivers::button::ButtonDriver;
use window_servo::drivers::servo::ServoDriver;
use window_servo::drivers::status_led::StatusLed;
use window_servo::pins;
use window_servo::scheduler::Scheduler;
use window_servo::sensors::end_stop::EndStop;

/// Build-time configuration override (JSON).
fn load_config() -> WindowConfig {
    match option_env!("WINDOW_CONFIG_JSON") {
        None => WindowConfig::default(),
        Some(json) => match WindowConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config override applied");
                cfg
            }
            Err(e) => {
                warn!("Config override rejected ({}), using defaults", e);
                WindowConfig::default()
            }
        },
    }
}

/// LEDC timer resolution matching `pins::SERVO_PWM_RESOLUTION_BITS`.
fn servo_resolution() -> Result<Resolution> {
    match pins::SERVO_PWM_RESOLUTION_BITS {
        10 => Ok(Resolution::Bits10),
        12 => Ok(Resolution::Bits12),
        13 => Ok(Resolution::Bits13),
        14 => Ok(Resolution::Bits14),
        bits => Err(anyhow!("unsupported servo PWM resolution: {} bits", bits)),
    }
}

/// Fail boot when a peripheral field and its `pins` entry disagree.
fn check_pin(name: &str, pin: &impl Pin, expected: i32) -> Result<()> {
    ensure!(
        pin.pin() == expected,
        "{} wired to GPIO{}, pins.rs says GPIO{}",
        name,
        pin.pin(),
        expected
    );
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Window Servo v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config not printable: {}", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let servo_gpio = peripherals.pins.gpio4;
    let end_stop_gpio = peripherals.pins.gpio5;
    let button_gpio = peripherals.pins.gpio9;
    let led_gpio = peripherals.pins.gpio8;
    check_pin("servo", &servo_gpio, pins::SERVO_PWM_GPIO)?;
    check_pin("end-stop", &end_stop_gpio, pins::END_STOP_GPIO)?;
    check_pin("button", &button_gpio, pins::BUTTON_GPIO)?;
    check_pin("status LED", &led_gpio, pins::STATUS_LED_GPIO)?;
    info!(
        "Pins: servo={} end-stop={} button={} led={}",
        pins::SERVO_PWM_GPIO,
        pins::END_STOP_GPIO,
        pins::BUTTON_GPIO,
        pins::STATUS_LED_GPIO
    );

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz().into())
            .resolution(servo_resolution()?),
    )?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, servo_gpio)?;

    let mut end_stop_pin = PinDriver::input(end_stop_gpio)?;
    end_stop_pin.set_pull(Pull::Up)?;

    let mut button_pin = PinDriver::input(button_gpio)?;
    button_pin.set_pull(Pull::Down)?;

    let led_pin = PinDriver::output(led_gpio)?;

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        ServoDriver::new(
            servo_pwm,
            config.servo_opening_angle,
            config.servo_closing_angle,
        ),
        EndStop::new(end_stop_pin),
        StatusLed::new(led_pin),
        MonotonicClock::new(),
    );
    hw.all_off();
    hw.pulse(config.boot_pulse_ms);

    let mut button = ButtonDriver::new(button_pin, config.button_hold_time_ms);
    let mut log_sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let idle_tick_ms = u64::from(config.idle_tick_ms);
    let mut app = WindowService::new(config);
    app.start(&mut log_sink);

    let mut sched = Scheduler::new();
    sched
        .register(WINDOW_TASK, hw.now_ms())
        .ok_or_else(|| anyhow!("scheduler full"))?;

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now = hw.now_ms();

        // Inputs are applied between controller steps.
        if let Some(gesture) = button.tick(now) {
            app.handle_button(gesture, &mut hw);
        }
        if let Some(cmd) = remote::take_pending() {
            app.handle_command(cmd, &mut hw);
        }

        sched.run_due(
            now,
            &mut WindowTask {
                app: &mut app,
                hw: &mut hw,
                sink: &mut log_sink,
            },
        );

        hw.tick_led();

        // Sleep until the controller is due, but keep polling the button.
        let wait = sched
            .next_due()
            .map_or(idle_tick_ms, |due| due.saturating_sub(now))
            .clamp(1, idle_tick_ms);
        FreeRtos::delay_ms(wait as u32);
    }
}
