//! Closing safety deadline.
//!
//! The end-stop switch is the normal way a closing run ends.  If it is
//! stuck, unplugged, or the window jams short of the stop, the motor
//! would otherwise be driven forever.  [`SafetyTimer`] bounds every
//! closing run:
//!
//! 1. `Close` arms the timer at `now + safety_closing_timeout_ms`.
//! 2. Each `Closing` tick checks the end-stop first, then the deadline.
//! 3. Once `now` is strictly past the deadline the run is aborted with
//!    [`SafetyFault::ClosingTimeout`]; the motor stops and the phase is
//!    forced to `Closed`.
//! 4. Leaving `Closing` disarms the timer, so a deadline only exists
//!    while a closing run is in progress.

use crate::error::SafetyFault;
use log::{info, warn};

/// One-shot deadline for the closing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyTimer {
    /// Absolute clock timestamp (ms); `None` while disarmed.
    deadline_ms: Option<u64>,
}

impl SafetyTimer {
    pub const fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Start a fresh deadline `timeout_ms` after `now_ms`.
    /// Re-arming replaces any previous deadline.
    pub fn arm(&mut self, now_ms: u64, timeout_ms: u32) {
        let deadline = now_ms.saturating_add(u64::from(timeout_ms));
        self.deadline_ms = Some(deadline);
        info!("Safety: closing deadline armed at t={}ms", deadline);
    }

    /// Drop the deadline.
    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }

    /// The armed deadline, if any.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Check the deadline against the clock.
    ///
    /// Returns the fault once `now_ms` is strictly greater than the
    /// deadline.  A disarmed timer never expires.
    pub fn check(&self, now_ms: u64) -> Option<SafetyFault> {
        match self.deadline_ms {
            Some(deadline) if now_ms > deadline => {
                warn!(
                    "SAFETY FAULT: {} (now={}ms, deadline={}ms)",
                    SafetyFault::ClosingTimeout,
                    now_ms,
                    deadline
                );
                Some(SafetyFault::ClosingTimeout)
            }
            _ => None,
        }
    }
}
