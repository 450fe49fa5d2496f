//! Periodic task scheduling.
//!
//! The engine never touches a clock directly: it asks a [`Scheduler`] to run
//! a [`TimerToken`] every `period` and to cancel it again. The actor host
//! implements this over the actix context; [`ManualScheduler`] implements it
//! over a virtual clock so rounds can be replayed deterministically.

use std::time::Duration;

#[cfg(test)]
use crate::game::engine::GameEngine;
use crate::game::types::Process;

/// Identifies one scheduled process of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub process: Process,
    pub round: u64,
}

pub trait Scheduler {
    type Handle;

    /// Deliver `token` back to the engine every `period` until cancelled.
    fn schedule(&mut self, token: TimerToken, period: Duration) -> Self::Handle;

    /// Stop a periodic task. No tick of it may be delivered afterwards.
    fn cancel(&mut self, handle: Self::Handle);
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManualHandle(u64);

#[cfg(test)]
#[derive(Debug, Clone)]
struct ManualTask {
    handle: ManualHandle,
    token: TimerToken,
    period: Duration,
    due: Duration,
}

/// Virtual-time scheduler: nothing fires until [`ManualScheduler::advance`].
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    tasks: Vec<ManualTask>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens of every task still scheduled.
    pub fn active_tokens(&self) -> Vec<TimerToken> {
        self.tasks.iter().map(|t| t.token).collect()
    }

    pub fn is_running(&self, process: Process) -> bool {
        self.tasks.iter().any(|t| t.token.process == process)
    }

    /// Move the clock forward by `by`, delivering every tick that falls due,
    /// in deadline order (ties go to the task scheduled first).
    pub fn advance(&mut self, engine: &mut GameEngine<ManualHandle>, by: Duration) {
        let target = self.now + by;
        while let Some(index) = self.next_due(target) {
            let task = &mut self.tasks[index];
            let token = task.token;
            self.now = task.due;
            task.due += task.period;
            engine.fire(token, self);
        }
        self.now = target;
    }

    /// Deliver exactly one tick of `process`, whatever its deadline.
    /// Returns false when no such task is scheduled.
    pub fn fire_once(&mut self, engine: &mut GameEngine<ManualHandle>, process: Process) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.token.process == process) else {
            return false;
        };
        let token = task.token;
        engine.fire(token, self);
        true
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&mut self, token: TimerToken, period: Duration) -> ManualHandle {
        let handle = ManualHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ManualTask {
            handle,
            token,
            period,
            due: self.now + period,
        });
        handle
    }

    fn cancel(&mut self, handle: ManualHandle) {
        self.tasks.retain(|t| t.handle != handle);
    }
}
