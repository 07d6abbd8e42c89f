//! Outbound application events.
//!
//! The [`WindowService`](super::service::WindowService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, publish over the radio,
//! etc.  Delivery is fire-and-forget; a dropped event never affects the
//! controller.

use crate::fsm::StateId;

/// Radio topic for [`AppEvent::Closed`].
pub const TOPIC_CLOSED: &str = "servo/-/closed";
/// Radio topic for [`AppEvent::SafetyStop`].
pub const TOPIC_SAFETY_STOP: &str = "servo/-/safety-stop";
/// Radio topic for [`AppEvent::Opened`].
pub const TOPIC_OPENED: &str = "servo/-/opened";

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The end-stop confirmed the window fully closed.
    Closed,

    /// Closing was aborted by the safety deadline.
    SafetyStop,

    /// The timed opening travel completed.
    Opened { duration_ms: u32 },

    /// The FSM moved between phases.
    PhaseChanged { from: StateId, to: StateId },

    /// The application service has started (carries initial phase).
    Started(StateId),
}

impl AppEvent {
    /// Radio topic for events published to the outside world, `None` for
    /// local diagnostics.
    pub fn topic(&self) -> Option<&'static str> {
        match self {
            Self::Closed => Some(TOPIC_CLOSED),
            Self::SafetyStop => Some(TOPIC_SAFETY_STOP),
            Self::Opened { .. } => Some(TOPIC_OPENED),
            Self::PhaseChanged { .. } | Self::Started(_) => None,
        }
    }

    /// Integer payload published alongside the topic.
    pub fn payload(&self) -> Option<i32> {
        match self {
            Self::Opened { duration_ms } => Some(i32::try_from(*duration_ms).unwrap_or(i32::MAX)),
            _ => None,
        }
    }
}
