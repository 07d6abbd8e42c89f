//! Debounced push-button driver with click and hold detection.
//!
//! ## Hardware
//!
//! Active-high momentary switch with pull-down.  The main loop calls
//! [`ButtonDriver::tick`] every iteration; the driver samples the pin,
//! debounces it, and runs the gesture state machine.
//!
//! ## Gesture detection
//!
//! | Gesture | Condition                                  | Event   |
//! |---------|--------------------------------------------|---------|
//! | Click   | Released before the hold time              | `Click` |
//! | Hold    | Still pressed when the hold time elapses   | `Hold`  |
//!
//! A hold fires while the button is still down; the release that
//! follows produces nothing.

use embedded_hal::digital::InputPin;
use log::{debug, warn};

use crate::app::commands::ButtonEvent;

/// Contacts must be stable this long before a level change counts.
pub const DEBOUNCE_MS: u64 = 50;

/// Internal state machine for gesture detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Released,
    Pressed { since_ms: u64 },
    /// Hold already reported; waiting for release.
    Held,
}

pub struct ButtonDriver<P> {
    pin: P,
    hold_time_ms: u64,
    state: GestureState,
    /// Debounced level.
    stable: bool,
    /// Last raw sample and when it last changed.
    raw: bool,
    raw_since_ms: u64,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P, hold_time_ms: u32) -> Self {
        Self {
            pin,
            hold_time_ms: u64::from(hold_time_ms),
            state: GestureState::Released,
            stable: false,
            raw: false,
            raw_since_ms: 0,
        }
    }

    /// Call from the main loop every iteration.
    /// `now_ms` is the current monotonic time in milliseconds.
    /// Returns a classified gesture event, if any.
    pub fn tick(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let level = match self.pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("button read failed: {:?}", e);
                return None;
            }
        };

        if level != self.raw {
            self.raw = level;
            self.raw_since_ms = now_ms;
        }
        if self.raw != self.stable && now_ms.saturating_sub(self.raw_since_ms) >= DEBOUNCE_MS {
            self.stable = self.raw;
            debug!("button {}", if self.stable { "down" } else { "up" });
        }

        match (self.state, self.stable) {
            (GestureState::Released, true) => {
                self.state = GestureState::Pressed { since_ms: now_ms };
                None
            }
            (GestureState::Pressed { .. }, false) => {
                self.state = GestureState::Released;
                Some(ButtonEvent::Click)
            }
            (GestureState::Pressed { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) >= self.hold_time_ms {
                    self.state = GestureState::Held;
                    return Some(ButtonEvent::Hold);
                }
                None
            }
            (GestureState::Held, false) => {
                self.state = GestureState::Released;
                None
            }
            (GestureState::Released, false) | (GestureState::Held, true) => None,
        }
    }

    /// Debounced "pressed" level.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
