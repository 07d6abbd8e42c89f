//! Window controller configuration parameters
//!
//! All tunable timings and servo levels for the window controller.
//! The firmware can override the defaults at build time with a JSON
//! document in the `WINDOW_CONFIG_JSON` environment variable.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    // --- Timing ---
    /// Closing is force-stopped this long after it began (milliseconds)
    pub safety_closing_timeout_ms: u32,
    /// Re-invocation period of the controller outside the open wait (milliseconds)
    pub idle_tick_ms: u32,

    // --- Open durations ---
    /// Open duration requested by a button hold (milliseconds)
    pub hold_open_ms: u32,
    /// Open duration requested by a button click (milliseconds)
    pub click_open_ms: u32,
    /// Milliseconds per unit of the 8-bit remote duration command
    pub remote_step_ms: u32,

    // --- Button ---
    /// Press time after which a hold fires instead of a click (milliseconds)
    pub button_hold_time_ms: u32,

    // --- Status LED ---
    /// LED pulse length acknowledging a hold (milliseconds)
    pub hold_pulse_ms: u32,
    /// LED pulse length acknowledging a click (milliseconds)
    pub click_pulse_ms: u32,
    /// LED pulse length at boot (milliseconds)
    pub boot_pulse_ms: u32,

    // --- Servo ---
    /// Continuous-rotation servo angle that drives the window open (0-180)
    pub servo_opening_angle: u8,
    /// Continuous-rotation servo angle that drives the window closed (0-180)
    pub servo_closing_angle: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            // Timing
            safety_closing_timeout_ms: 5000,
            idle_tick_ms: 20, // 50 Hz

            // Open durations
            hold_open_ms: 4000,
            click_open_ms: 2000,
            remote_step_ms: 100, // tenths of a second

            // Button
            button_hold_time_ms: 1000,

            // Status LED
            hold_pulse_ms: 2000,
            click_pulse_ms: 200,
            boot_pulse_ms: 2000,

            // Servo (93 is the neutral middle)
            servo_opening_angle: 110,
            servo_closing_angle: 70,
        }
    }
}

impl WindowConfig {
    /// Reject parameter combinations the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_tick_ms == 0 {
            return Err(ConfigError::ValidationFailed("idle_tick_ms must be non-zero"));
        }
        if self.safety_closing_timeout_ms <= self.idle_tick_ms {
            return Err(ConfigError::ValidationFailed(
                "safety_closing_timeout_ms must exceed idle_tick_ms",
            ));
        }
        if self.remote_step_ms == 0 {
            return Err(ConfigError::ValidationFailed("remote_step_ms must be non-zero"));
        }
        if self.button_hold_time_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "button_hold_time_ms must be non-zero",
            ));
        }
        if self.servo_opening_angle > 180 || self.servo_closing_angle > 180 {
            return Err(ConfigError::ValidationFailed("servo angles must be within 0-180"));
        }
        if self.servo_opening_angle == self.servo_closing_angle {
            return Err(ConfigError::ValidationFailed(
                "servo opening and closing angles must differ",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document (missing fields keep their defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from loading or validating a [`WindowConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this structure.
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "config parse failed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
