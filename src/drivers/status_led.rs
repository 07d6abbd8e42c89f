//! Single-colour status LED driver.
//!
//! The LED shows what the motor is doing (blinking while closing, blinking
//! fast while opening, dark when stopped) and acknowledges button gestures
//! with a solid pulse that overrides the blink mode while it lasts.
//!
//! The main loop calls [`StatusLed::tick`] every iteration; the pin is only
//! written when the computed level changes.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::error::{ActuatorError, Result};

/// Half-period of [`LedMode::Blink`] (ms).
pub const BLINK_HALF_PERIOD_MS: u64 = 500;
/// Half-period of [`LedMode::BlinkFast`] (ms).
pub const BLINK_FAST_HALF_PERIOD_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Off,
    Blink,
    BlinkFast,
}

pub struct StatusLed<P> {
    pin: P,
    mode: LedMode,
    /// Solid-on override until this time (ms).
    pulse_until_ms: Option<u64>,
    /// Last level written to the pin; `None` before the first write.
    lit: Option<bool>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            mode: LedMode::Off,
            pulse_until_ms: None,
            lit: None,
        }
    }

    pub fn set_mode(&mut self, mode: LedMode) {
        if mode != self.mode {
            debug!("LED mode {:?}", mode);
            self.mode = mode;
        }
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    /// Light the LED solid for `duration_ms` starting at `now_ms`.
    /// A new pulse replaces one still running.
    pub fn pulse(&mut self, now_ms: u64, duration_ms: u32) {
        self.pulse_until_ms = Some(now_ms.saturating_add(u64::from(duration_ms)));
    }

    /// True while a pulse overrides the blink mode.
    pub fn is_pulsing(&self, now_ms: u64) -> bool {
        self.pulse_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Level the LED should show at `now_ms`.
    pub fn level_at(&self, now_ms: u64) -> bool {
        if self.is_pulsing(now_ms) {
            return true;
        }
        match self.mode {
            LedMode::Off => false,
            LedMode::Blink => (now_ms / BLINK_HALF_PERIOD_MS) % 2 == 0,
            LedMode::BlinkFast => (now_ms / BLINK_FAST_HALF_PERIOD_MS) % 2 == 0,
        }
    }

    /// Advance the pattern and drive the pin.
    pub fn tick(&mut self, now_ms: u64) -> Result<()> {
        if !self.is_pulsing(now_ms) {
            self.pulse_until_ms = None;
        }
        let level = self.level_at(now_ms);
        if self.lit == Some(level) {
            return Ok(());
        }
        let written = if level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        written.map_err(|e| {
            debug!("LED GPIO error: {:?}", e);
            ActuatorError::GpioWriteFailed
        })?;
        self.lit = Some(level);
        Ok(())
    }

    /// Last level written to the pin.
    pub fn is_lit(&self) -> bool {
        self.lit.unwrap_or(false)
    }
}
