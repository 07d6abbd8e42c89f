//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (local button,
//! radio) that the [`WindowService`](super::service::WindowService)
//! interprets and acts upon.

/// Classified gestures from the local push-button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Press released before the hold time.
    Click,
    /// Press held past the hold time (fires while still pressed).
    Hold,
}

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A classified button gesture.
    Button(ButtonEvent),

    /// Remote "set open duration" in tenths of a second (0 – 25.5 s).
    SetOpenDuration { tenths: u8 },
}
