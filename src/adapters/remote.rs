//! Inbound remote command mailbox.
//!
//! The radio transport delivers "set open duration" commands from its own
//! task.  They land in a [`Signal`]: a single slot where a newer value
//! replaces an unread older one.  The main loop takes the pending value
//! once per iteration and hands it to the window service, so remote
//! commands are applied between controller steps, never during one.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::debug;

use crate::app::commands::AppCommand;

/// Latest unread remote duration (tenths of a second).
static REMOTE_DURATION: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Called by the radio transport when a duration command arrives.
/// Safe to call from any task.
pub fn on_remote_duration(tenths: u8) {
    debug!("remote: duration {} queued", tenths);
    REMOTE_DURATION.signal(tenths);
}

/// Take the pending remote command, if any.
pub fn take_pending() -> Option<AppCommand> {
    REMOTE_DURATION
        .try_take()
        .map(|tenths| AppCommand::SetOpenDuration { tenths })
}
