//! Scheduler delegate that runs the window controller.
//!
//! Bridges the [`Scheduler`](crate::scheduler::Scheduler), which knows
//! nothing about windows, to [`WindowService::step`].  The step's
//! [`Continue`] flows straight back to the scheduler as the next plan.

use log::warn;

use crate::fsm::Continue;
use crate::scheduler::{SchedulerDelegate, TaskId};

use super::ports::{ClockPort, EventSink, MotorPort, SensorPort};
use super::service::WindowService;

/// Label the controller task is registered under.
pub const WINDOW_TASK: &str = "window";

/// Borrowed view of everything one controller step needs.
pub struct WindowTask<'a, H, S> {
    pub app: &'a mut WindowService,
    pub hw: &'a mut H,
    pub sink: &'a mut S,
}

impl<H, S> SchedulerDelegate for WindowTask<'_, H, S>
where
    H: SensorPort + MotorPort + ClockPort,
    S: EventSink,
{
    fn on_task_due(&mut self, _task: TaskId, label: &'static str, _now_ms: u64) -> Continue {
        if label != WINDOW_TASK {
            warn!("WindowTask: unexpected task '{}'", label);
            return Continue::After(self.app.config().idle_tick_ms);
        }
        self.app.step(&mut *self.hw, &mut *self.sink)
    }
}
