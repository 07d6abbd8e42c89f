//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Close   │ -         │ -        │ fn(ctx)->Option<> │  │
//! │  │ Closing │ -         │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Closed  │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Open    │ -         │ -        │ fn(ctx)->Option<> │  │
//! │  │ Opening │ -         │ -        │ fn(ctx)->Option<> │  │
//! │  │ Opened  │ -         │ -        │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut WindowContext`.
//!
//! The engine never sleeps.  Every tick returns a [`Continue`] telling
//! the surrounding scheduler when to run the next one: the configured
//! idle tick, or whatever delay a handler requested through
//! [`WindowContext::wake_after`].

pub mod context;
pub mod states;

use context::WindowContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Controller phase.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Close = 0,
    Closing = 1,
    Closed = 2,
    Open = 3,
    Opening = 4,
    Opened = 5,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 6;

    /// Every state, in table order.
    pub const ALL: [StateId; StateId::COUNT] = [
        Self::Close,
        Self::Closing,
        Self::Closed,
        Self::Open,
        Self::Opening,
        Self::Opened,
    ];

    /// Convert a table index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Close` in release (drives the window shut).
    pub fn from_index(idx: usize) -> Self {
        match Self::ALL.get(idx) {
            Some(id) => *id,
            None => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Close
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduling decision
// ---------------------------------------------------------------------------

/// What the controller asks of its scheduler after a tick.
#[must_use = "the scheduler must re-arm the controller"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continue {
    /// Run the next tick after this many milliseconds.
    After(u32),
}

impl Continue {
    /// Requested delay in milliseconds.
    pub fn delay_ms(self) -> u32 {
        match self {
            Self::After(ms) => ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut WindowContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut WindowContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and the current
/// pointer.  The [`WindowContext`] is owned by the caller and threaded
/// through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut WindowContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 3. Report when the next tick is due.
    pub fn tick(&mut self, ctx: &mut WindowContext) -> Continue {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }

        Continue::After(ctx.wake_after_ms.take().unwrap_or(ctx.config.idle_tick_ms))
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut WindowContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
