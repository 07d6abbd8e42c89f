//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WindowService (domain)
//! ```
//!
//! Driven adapters (end-stop, servo, clock, status LED, event sinks)
//! implement these traits.  The [`WindowService`](super::service::WindowService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Self-rescheduling is not a port: the service returns a
//! [`Continue`](crate::fsm::Continue) and the caller's scheduler owns timing.

use crate::fsm::context::MotorDirection;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample the end-stop.
pub trait SensorPort {
    /// True iff the end-stop reports the window fully closed.
    fn window_closed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the window motor.
pub trait MotorPort {
    /// Drive the motor open, closed, or stop it.
    fn drive(&mut self, direction: MotorDirection);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LED)
// ───────────────────────────────────────────────────────────────

/// User feedback for accepted button gestures.
pub trait IndicatorPort {
    /// Light the status LED for `duration_ms`, overriding its blink mode.
    fn pulse(&mut self, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / radio)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// radio publish, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
