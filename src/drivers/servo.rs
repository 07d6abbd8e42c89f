//! Continuous-rotation window servo driver.
//!
//! Standard hobby-servo framing: one pulse every 20 ms (50 Hz), pulse
//! width 500 µs at 0° up to 2500 µs at 180°.  On a continuous-rotation
//! servo the "angle" selects speed and direction around a neutral middle
//! (~93°), so opening and closing are two fixed angles either side of it.
//!
//! ## Stop
//!
//! Stopping disables the PWM output entirely rather than commanding the
//! neutral angle; an uncalibrated servo creeps at "neutral".

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::{ActuatorError, Result};
use crate::fsm::context::MotorDirection;

/// PWM frame period (µs).
pub const FRAME_US: u16 = 20_000;
/// Pulse width at 0° (µs).
pub const MIN_PULSE_US: u16 = 500;
/// Pulse width at 180° (µs).
pub const MAX_PULSE_US: u16 = 2500;

/// Pulse width for `angle` degrees (clamped to 180).
pub const fn pulse_width_us(angle: u8) -> u16 {
    let angle = (if angle > 180 { 180 } else { angle }) as u32;
    MIN_PULSE_US + (angle * (MAX_PULSE_US - MIN_PULSE_US) as u32 / 180) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoState {
    Stopped,
    Driving { angle: u8 },
}

pub struct ServoDriver<P> {
    pwm: P,
    opening_angle: u8,
    closing_angle: u8,
    state: ServoState,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P, opening_angle: u8, closing_angle: u8) -> Self {
        Self {
            pwm,
            opening_angle,
            closing_angle,
            state: ServoState::Stopped,
        }
    }

    /// Command the servo for a motor direction.
    pub fn drive(&mut self, direction: MotorDirection) -> Result<()> {
        match direction {
            MotorDirection::Open => self.set_angle(self.opening_angle),
            MotorDirection::Close => self.set_angle(self.closing_angle),
            MotorDirection::Stop => self.stop(),
        }
    }

    pub fn set_angle(&mut self, angle: u8) -> Result<()> {
        let pulse = pulse_width_us(angle);
        self.pwm
            .set_duty_cycle_fraction(pulse, FRAME_US)
            .map_err(|e| {
                debug!("servo PWM error: {:?}", e);
                ActuatorError::PwmWriteFailed
            })?;
        self.state = ServoState::Driving { angle };
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        self.pwm.set_duty_cycle_fully_off().map_err(|e| {
            debug!("servo PWM error: {:?}", e);
            ActuatorError::PwmWriteFailed
        })?;
        self.state = ServoState::Stopped;
        Ok(())
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, ServoState::Stopped)
    }
}
