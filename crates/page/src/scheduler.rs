//! Deterministic timer queue on a virtual clock.
//!
//! Timers never fire on their own. The page advances the clock explicitly and
//! runs every task that came due, in due-time order with ties broken by
//! scheduling order.

use std::fmt;

use serde::Serialize;
use shopfront_core::TaskId;

use crate::error::Result;
use crate::page::Page;

/// Default bound on how many tasks a single `flush` may run.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// A deferred callback.
pub type Task = Box<dyn FnOnce(&mut Page) -> Result<()>>;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskHandle {
    id: TaskId,
    due_at: u64,
}

impl TaskHandle {
    #[must_use]
    pub const fn id(self) -> TaskId {
        self.id
    }

    /// Virtual time in milliseconds at which the task runs.
    #[must_use]
    pub const fn due_at(self) -> u64 {
        self.due_at
    }
}

/// A timer that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTimer {
    pub id: TaskId,
    pub due_at: u64,
}

struct ScheduledTask {
    id: TaskId,
    due_at: u64,
    order: u64,
    callback: Task,
}

pub(crate) struct Scheduler {
    now_ms: u64,
    queue: Vec<ScheduledTask>,
    next_id: usize,
    next_order: u64,
    step_limit: usize,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            now_ms: 0,
            queue: Vec::new(),
            next_id: 0,
            next_order: 0,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl Scheduler {
    pub(crate) const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub(crate) const fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub(crate) const fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub(crate) const fn set_step_limit(&mut self, limit: usize) {
        self.step_limit = limit;
    }

    pub(crate) fn schedule(&mut self, delay_ms: u64, callback: Task) -> TaskHandle {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);
        self.queue.push(ScheduledTask {
            id,
            due_at,
            order: self.next_order,
            callback,
        });
        self.next_order += 1;
        TaskHandle { id, due_at }
    }

    pub(crate) fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|task| task.id != id);
        self.queue.len() != before
    }

    pub(crate) fn is_pending(&self, id: TaskId) -> bool {
        self.queue.iter().any(|task| task.id == id)
    }

    /// Remove and return the earliest task due at or before `deadline`.
    pub(crate) fn pop_due(&mut self, deadline: u64) -> Option<(u64, Task)> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= deadline)
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(index, _)| index)?;
        let task = self.queue.remove(index);
        Some((task.due_at, task.callback))
    }

    /// Due time of the earliest pending task.
    pub(crate) fn next_due(&self) -> Option<u64> {
        self.queue.iter().map(|task| task.due_at).min()
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers: Vec<_> = self
            .queue
            .iter()
            .map(|task| (task.due_at, task.order, task.id))
            .collect();
        timers.sort_unstable();
        timers
            .into_iter()
            .map(|(due_at, _, id)| PendingTimer { id, due_at })
            .collect()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.queue.len())
            .field("step_limit", &self.step_limit)
            .finish_non_exhaustive()
    }
}
