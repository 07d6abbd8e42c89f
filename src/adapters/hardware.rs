//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the servo, end-stop and status LED drivers plus the clock, and
//! exposes them through [`SensorPort`], [`MotorPort`], [`ClockPort`] and
//! [`IndicatorPort`].  This is the only module in the system that touches
//! actual hardware.  Driver errors stop here: they are logged and the
//! controller sees a safe reading ("not closed") instead.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::error;

use crate::app::ports::{ClockPort, IndicatorPort, MotorPort, SensorPort};
use crate::drivers::servo::ServoDriver;
use crate::drivers::status_led::{LedMode, StatusLed};
use crate::fsm::context::MotorDirection;
use crate::sensors::end_stop::EndStop;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, E, L, C> {
    servo: ServoDriver<S>,
    end_stop: EndStop<E>,
    led: StatusLed<L>,
    clock: C,
}

impl<S, E, L, C> HardwareAdapter<S, E, L, C>
where
    S: SetDutyCycle,
    E: InputPin,
    L: OutputPin,
    C: ClockPort,
{
    pub fn new(servo: ServoDriver<S>, end_stop: EndStop<E>, led: StatusLed<L>, clock: C) -> Self {
        Self {
            servo,
            end_stop,
            led,
            clock,
        }
    }

    /// Advance the LED pattern.  Call every main-loop iteration.
    pub fn tick_led(&mut self) {
        let now = self.clock.now_ms();
        if let Err(e) = self.led.tick(now) {
            error!("status LED: {}", e);
        }
    }

    /// Stop the servo and darken the LED.
    pub fn all_off(&mut self) {
        self.drive(MotorDirection::Stop);
        self.tick_led();
    }

    pub fn servo(&self) -> &ServoDriver<S> {
        &self.servo
    }

    pub fn led(&self) -> &StatusLed<L> {
        &self.led
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, E, L, C> SensorPort for HardwareAdapter<S, E, L, C>
where
    E: InputPin,
{
    fn window_closed(&mut self) -> bool {
        match self.end_stop.read() {
            Ok(closed) => closed,
            Err(e) => {
                // Closing stays bounded by the safety deadline.
                error!("end-stop: {}, assuming not closed", e);
                false
            }
        }
    }
}

// ── MotorPort implementation ──────────────────────────────────

impl<S, E, L, C> MotorPort for HardwareAdapter<S, E, L, C>
where
    S: SetDutyCycle,
    L: OutputPin,
{
    fn drive(&mut self, direction: MotorDirection) {
        self.led.set_mode(match direction {
            MotorDirection::Open => LedMode::BlinkFast,
            MotorDirection::Close => LedMode::Blink,
            MotorDirection::Stop => LedMode::Off,
        });
        if let Err(e) = self.servo.drive(direction) {
            error!("servo {:?}: {}", direction, e);
        }
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<S, E, L, C: ClockPort> ClockPort for HardwareAdapter<S, E, L, C> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<S, E, L, C> IndicatorPort for HardwareAdapter<S, E, L, C>
where
    L: OutputPin,
    C: ClockPort,
{
    fn pulse(&mut self, duration_ms: u32) {
        let now = self.clock.now_ms();
        self.led.pulse(now, duration_ms);
    }
}
