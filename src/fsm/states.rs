//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.  Every phase performs its action in its
//! own tick, so a full cycle is a chain of single-tick hops plus two
//! waits: polling the end-stop while `Closing`, and the timed open
//! travel between `Open` and `Opening`.
//!
//! ```text
//!  CLOSE ──[drive close, arm deadline]──▶ CLOSING
//!    ▲                                       │
//!    │                     [end-stop] or [deadline passed]
//!    │                                       ▼
//!    │                                    CLOSED ──[duration ≠ 0]──▶ OPEN
//!    │                                                                │
//!    │                                        [drive open, wait duration]
//!    │                                                                ▼
//!    └──[duration == 0]── OPENED ◀──[emit opened(duration)]─── OPENING
//! ```

use super::context::{MotorDirection, WindowContext};
use super::{StateDescriptor, StateId};
use crate::app::events::AppEvent;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Close
        StateDescriptor {
            id: StateId::Close,
            name: "Close",
            on_enter: None,
            on_exit: None,
            on_update: close_update,
        },
        // Index 1 — Closing
        StateDescriptor {
            id: StateId::Closing,
            name: "Closing",
            on_enter: None,
            on_exit: Some(closing_exit),
            on_update: closing_update,
        },
        // Index 2 — Closed
        StateDescriptor {
            id: StateId::Closed,
            name: "Closed",
            on_enter: Some(closed_enter),
            on_exit: None,
            on_update: closed_update,
        },
        // Index 3 — Open
        StateDescriptor {
            id: StateId::Open,
            name: "Open",
            on_enter: None,
            on_exit: None,
            on_update: open_update,
        },
        // Index 4 — Opening
        StateDescriptor {
            id: StateId::Opening,
            name: "Opening",
            on_enter: None,
            on_exit: None,
            on_update: opening_update,
        },
        // Index 5 — Opened
        StateDescriptor {
            id: StateId::Opened,
            name: "Opened",
            on_enter: None,
            on_exit: None,
            on_update: opened_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSE — start a closing run
// ═══════════════════════════════════════════════════════════════════════════

fn close_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.commands.motor = MotorDirection::Close;
    ctx.safety.arm(ctx.now_ms, ctx.config.safety_closing_timeout_ms);
    info!("CLOSE: motor closing");
    Some(StateId::Closing)
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSING — wait for the end-stop, bounded by the safety deadline
// ═══════════════════════════════════════════════════════════════════════════

fn closing_exit(ctx: &mut WindowContext) {
    ctx.safety.disarm();
}

fn closing_update(ctx: &mut WindowContext) -> Option<StateId> {
    if ctx.sensors.window_closed {
        ctx.commands.motor = MotorDirection::Stop;
        ctx.raise(AppEvent::Closed);
        info!("CLOSING: end-stop reached");
        return Some(StateId::Closed);
    }

    if let Some(fault) = ctx.safety.check(ctx.now_ms) {
        ctx.commands.motor = MotorDirection::Stop;
        ctx.raise(AppEvent::SafetyStop);
        warn!("CLOSING: safety stop ({})", fault);
        return Some(StateId::Closed);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED — idle until someone asks for an open duration
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &mut WindowContext) {
    info!(
        "CLOSED: waiting for open request (pending {}ms)",
        ctx.open_duration_ms
    );
}

fn closed_update(ctx: &mut WindowContext) -> Option<StateId> {
    if ctx.open_duration_ms != 0 {
        return Some(StateId::Open);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN — timed, uninterruptible opening travel
// ═══════════════════════════════════════════════════════════════════════════

fn open_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.commands.motor = MotorDirection::Open;
    // Not re-entered until the travel time has elapsed.
    ctx.wake_after(ctx.open_duration_ms);
    info!("OPEN: motor opening for {}ms", ctx.open_duration_ms);
    Some(StateId::Opening)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENING — travel finished, report it
// ═══════════════════════════════════════════════════════════════════════════

fn opening_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.raise(AppEvent::Opened {
        duration_ms: ctx.open_duration_ms,
    });
    Some(StateId::Opened)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENED — hold open until the duration is cleared
// ═══════════════════════════════════════════════════════════════════════════

fn opened_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.commands.motor = MotorDirection::Stop;

    if ctx.open_duration_ms == 0 {
        info!("OPENED: duration cleared, closing");
        return Some(StateId::Close);
    }

    None
}
