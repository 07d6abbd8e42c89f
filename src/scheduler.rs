//! Cooperative task scheduler.
//!
//! Owns every timing decision in the firmware.  Tasks never sleep: each
//! run returns a [`Continue`] and the scheduler re-plans the task that
//! many milliseconds later.  Planning a task always replaces its
//! previous plan, so a task has at most one pending run.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Main loop                               │
//! │                                                              │
//! │   now_ms ──▶ Scheduler::run_due ──▶ SchedulerDelegate        │
//! │                   ▲                      │                   │
//! │                   │                      ▼                   │
//! │                   └──── Continue ── WindowService::step()    │
//! │                                                              │
//! │   Scheduler::next_due ──▶ how long the loop may idle         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::fsm::Continue;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Delegate
// ═══════════════════════════════════════════════════════════════

/// Handle to a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(usize);

/// Callback trait that the scheduler invokes when a task is due.
///
/// This decouples the [`Scheduler`] from what the tasks do.  The main
/// loop implements it by forwarding to the window service, tests
/// implement it with a recorder.
pub trait SchedulerDelegate {
    /// Run the task.  The returned [`Continue`] becomes the task's next plan.
    fn on_task_due(&mut self, task: TaskId, label: &'static str, now_ms: u64) -> Continue;
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent tasks (stack-allocated).
const MAX_TASKS: usize = 4;

/// Internal bookkeeping for a registered task.
#[derive(Debug, Clone, Copy)]
struct TaskEntry {
    label: &'static str,
    /// Absolute time (ms) of the next run; `None` while unplanned.
    due_ms: Option<u64>,
}

/// The scheduler engine.
pub struct Scheduler {
    tasks: [Option<TaskEntry>; MAX_TASKS],
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: [None; MAX_TASKS],
        }
    }

    /// Register a task due at `first_due_ms`.  Returns `None` if full.
    pub fn register(&mut self, label: &'static str, first_due_ms: u64) -> Option<TaskId> {
        for (i, slot) in self.tasks.iter_mut().enumerate() {
            if slot.is_none() {
                info!("Scheduler: registered '{}' at slot {}", label, i);
                *slot = Some(TaskEntry {
                    label,
                    due_ms: Some(first_due_ms),
                });
                return Some(TaskId(i));
            }
        }
        None
    }

    /// Plan `task` to run `after_ms` after `now_ms`, replacing any pending plan.
    pub fn plan_relative(&mut self, task: TaskId, now_ms: u64, after_ms: u32) {
        self.plan_absolute(task, now_ms.saturating_add(u64::from(after_ms)));
    }

    /// Plan `task` to run at `due_ms`, replacing any pending plan.
    pub fn plan_absolute(&mut self, task: TaskId, due_ms: u64) {
        if let Some(Some(entry)) = self.tasks.get_mut(task.0) {
            entry.due_ms = Some(due_ms);
        }
    }

    /// Absolute due time of `task`, if planned.
    pub fn due_ms(&self, task: TaskId) -> Option<u64> {
        self.tasks.get(task.0).copied().flatten().and_then(|e| e.due_ms)
    }

    /// Earliest due time across all tasks.
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().flatten().filter_map(|e| e.due_ms).min()
    }

    /// Run every task whose due time has been reached.
    ///
    /// Each due task runs at most once per call and is re-planned from
    /// `now_ms` with the delay it returns.  Returns the number of runs.
    pub fn run_due(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) -> usize {
        let mut runs = 0;
        for i in 0..MAX_TASKS {
            let label = match self.tasks[i] {
                Some(e) if e.due_ms.is_some_and(|due| due <= now_ms) => e.label,
                _ => continue,
            };

            let task = TaskId(i);
            let delay = delegate.on_task_due(task, label, now_ms).delay_ms();
            self.plan_relative(task, now_ms, delay);
            debug!("Scheduler: '{}' next run in {}ms", label, delay);
            runs += 1;
        }
        runs
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
