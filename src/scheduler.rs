use std::time::Duration;

use bevy::time::{Timer, TimerMode};

/// Handle returned by [`Scheduler::schedule`], used to cancel the task before it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    timer: Timer,
    task: T,
}

/// Cancellable fixed-delay task queue driven by elapsed time.
///
/// Nothing runs on its own: the owner calls [`tick`](Scheduler::tick) with
/// the time that passed and receives the tasks whose delay has elapsed.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_handle: u64,
    pending: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.pending.push(ScheduledTask {
            handle,
            timer: Timer::new(delay, TimerMode::Once),
            task,
        });
        handle
    }

    /// Drops a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|scheduled| scheduled.handle != handle);
        self.pending.len() != before
    }

    /// Drops every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|scheduled| scheduled.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advances every timer by `delta` and returns the tasks that came due, oldest first.
    pub fn tick(&mut self, delta: Duration) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].timer.tick(delta).finished() {
                due.push(self.pending.remove(i).task);
            } else {
                i += 1;
            }
        }
        due
    }
}
