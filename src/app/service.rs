//! Application service — the hexagonal core.
//!
//! [`WindowService`] owns the FSM and its shared context.  It exposes a
//! clean, hardware-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │     WindowService      │
//!   MotorPort ◀── │  FSM · safety deadline │ ──▶ Continue (to scheduler)
//! IndicatorPort ◀─└────────────────────────┘ ◀── button / remote
//! ```

use log::{debug, info};

use crate::config::WindowConfig;
use crate::fsm::context::{MotorDirection, WindowContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Continue, Fsm, StateId};

use super::commands::{AppCommand, ButtonEvent};
use super::events::AppEvent;
use super::ports::{ClockPort, EventSink, IndicatorPort, MotorPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// WindowService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct WindowService {
    fsm: Fsm,
    ctx: WindowContext,
    step_count: u64,
}

impl WindowService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: WindowConfig) -> Self {
        let ctx = WindowContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Close);
        Self {
            fsm,
            ctx,
            step_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial phase (Close).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("WindowService started in {:?}", self.fsm.current_state());
    }

    // ── Per-step orchestration ────────────────────────────────

    /// Run one controller step: read clock and end-stop → FSM → motor → events.
    ///
    /// The returned [`Continue`] says when the scheduler should run the
    /// next step.  The `hw` parameter satisfies every driven port at once;
    /// this avoids a double mutable borrow while keeping the port
    /// boundary explicit.
    pub fn step(
        &mut self,
        hw: &mut (impl SensorPort + MotorPort + ClockPort),
        sink: &mut impl EventSink,
    ) -> Continue {
        self.step_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Inputs
        self.ctx.now_ms = hw.now_ms();
        self.ctx.sensors.window_closed = hw.window_closed();

        // 2. FSM tick (pure phase logic)
        let next = self.fsm.tick(&mut self.ctx);

        // 3. Apply motor command via MotorPort
        self.apply_motor(hw);

        // 4. Publish events raised during the tick
        for event in &self.ctx.outbox {
            sink.emit(event);
        }
        self.ctx.outbox.clear();

        // 5. Emit phase change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::PhaseChanged {
                from: prev_state,
                to: new_state,
            });
        }

        next
    }

    // ── Input handling ────────────────────────────────────────

    /// Translate a button gesture into an open duration request.
    ///
    /// Gestures only act in `Closed` (hold → long open, click → short
    /// open) and `Opened` (click → close now).  Every gesture is
    /// acknowledged with an LED pulse, whether or not it changes anything.
    pub fn handle_button(&mut self, event: ButtonEvent, indicator: &mut impl IndicatorPort) {
        let phase = self.fsm.current_state();
        let cfg = &self.ctx.config;

        let (pulse_ms, duration) = match (event, phase) {
            (ButtonEvent::Hold, StateId::Closed) => (cfg.hold_pulse_ms, Some(cfg.hold_open_ms)),
            (ButtonEvent::Hold, _) => (cfg.hold_pulse_ms, None),
            (ButtonEvent::Click, StateId::Closed) => (cfg.click_pulse_ms, Some(cfg.click_open_ms)),
            (ButtonEvent::Click, StateId::Opened) => (cfg.click_pulse_ms, Some(0)),
            (ButtonEvent::Click, _) => (cfg.click_pulse_ms, None),
        };

        indicator.pulse(pulse_ms);

        match duration {
            Some(ms) => {
                self.ctx.open_duration_ms = ms;
                info!("Button {:?} in {:?}: open duration {}ms", event, phase, ms);
            }
            None => debug!("Button {:?} ignored in {:?}", event, phase),
        }
    }

    /// Apply a remote "set open duration" command (tenths of a second).
    ///
    /// Accepted in every phase; the latest value wins.
    pub fn handle_remote_duration(&mut self, tenths: u8) {
        let step_ms = self.ctx.config.remote_step_ms;
        self.ctx.open_duration_ms = u32::from(tenths).saturating_mul(step_ms);
        info!(
            "Remote: open duration {}ms (phase {:?})",
            self.ctx.open_duration_ms,
            self.fsm.current_state()
        );
    }

    /// Process an external command (button driver, radio, etc.).
    pub fn handle_command(&mut self, cmd: AppCommand, indicator: &mut impl IndicatorPort) {
        match cmd {
            AppCommand::Button(event) => self.handle_button(event, indicator),
            AppCommand::SetOpenDuration { tenths } => self.handle_remote_duration(tenths),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current controller phase.
    pub fn phase(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Requested open duration (ms).
    pub fn open_duration_ms(&self) -> u32 {
        self.ctx.open_duration_ms
    }

    /// Closing deadline, armed only while `Closing`.
    pub fn safety_deadline_ms(&self) -> Option<u64> {
        self.ctx.safety.deadline_ms()
    }

    /// Motor mode commanded by the last step.
    pub fn motor(&self) -> MotorDirection {
        self.ctx.commands.motor
    }

    /// Total controller steps executed since startup.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// The live configuration.
    pub fn config(&self) -> &WindowConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_motor(&self, hw: &mut impl MotorPort) {
        hw.drive(self.ctx.commands.motor);
    }
}
