//! Shared mutable context threaded through every FSM handler.
//!
//! `WindowContext` is the single struct that state handlers read from and
//! write to.  It holds the clock and end-stop snapshot for the current
//! tick, the motor command output, the requested open duration, the
//! closing deadline, and the events raised during the tick.  The
//! [`WindowService`](crate::app::service::WindowService) fills the inputs
//! before each tick and applies the outputs afterwards.

use heapless::Vec;
use log::warn;

use crate::app::events::AppEvent;
use crate::config::WindowConfig;
use crate::safety::SafetyTimer;

/// Maximum number of events a single tick can raise before they are dropped.
pub const OUTBOX_CAP: usize = 4;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the controller's inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// True iff the end-stop switch reports the window fully closed.
    pub window_closed: bool,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Motor drive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorDirection {
    Open,
    Close,
    Stop,
}

/// Commands that state handlers write to request actuator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Desired motor mode.
    pub motor: MotorDirection,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self {
            motor: MotorDirection::Stop,
        }
    }
}

// ---------------------------------------------------------------------------
// WindowContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct WindowContext {
    // -- Timing --
    /// Monotonic clock reading (ms) taken at the start of the current tick.
    pub now_ms: u64,
    /// Delay before the next tick, when a handler wants something other
    /// than the idle tick.  Consumed by the engine after every tick.
    pub wake_after_ms: Option<u32>,

    // -- Inputs --
    /// Latest end-stop reading.  Updated before each FSM tick.
    pub sensors: SensorSnapshot,
    /// Requested open dwell (ms).  Written by button and remote handlers,
    /// consumed by the `Closed`, `Open`, `Opening` and `Opened` states.
    pub open_duration_ms: u32,

    // -- Outputs --
    /// Commands to be applied to the motor after the FSM tick.
    pub commands: ActuatorCommands,
    /// Events raised during the tick, emitted by the service afterwards.
    pub outbox: Vec<AppEvent, OUTBOX_CAP>,

    // -- Safety --
    /// Closing deadline; armed only while `Closing`.
    pub safety: SafetyTimer,

    // -- Configuration --
    pub config: WindowConfig,
}

impl WindowContext {
    /// Create a new context with the given configuration.
    pub fn new(config: WindowConfig) -> Self {
        Self {
            now_ms: 0,
            wake_after_ms: None,
            sensors: SensorSnapshot::default(),
            open_duration_ms: 0,
            commands: ActuatorCommands::default(),
            outbox: Vec::new(),
            safety: SafetyTimer::new(),
            config,
        }
    }

    /// Queue an outbound event.  Events are fire-and-forget, so a full
    /// outbox drops the event instead of failing the tick.
    pub fn raise(&mut self, event: AppEvent) {
        if let Err(dropped) = self.outbox.push(event) {
            warn!("outbox full, dropping {:?}", dropped);
        }
    }

    /// Ask the engine to run the next tick after `delay_ms` instead of
    /// the idle tick.
    pub fn wake_after(&mut self, delay_ms: u32) {
        self.wake_after_ms = Some(delay_ms);
    }
}
