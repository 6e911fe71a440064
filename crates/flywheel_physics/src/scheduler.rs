//! Deferred task scheduling
//!
//! Cancellable delayed tasks for the tap-detection and long-press checks
//! and for re-arming animation ticks. The host run loop calls
//! `advance(now_ms)` once per delivered frame; due tasks are removed and
//! their tokens returned in fire order. Tokens carry whatever staleness
//! tag the caller needs (the engine packs a generation counter in).

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled task, usable for cancellation
    pub struct TaskId;
}

/// Caller-defined task payload. The high bits conventionally carry a
/// generation counter compared at fire time.
pub type Token = u64;

#[derive(Debug, Clone, Copy)]
struct Deferred {
    fire_at_ms: u64,
    token: Token,
    seq: u64,
}

/// Single-owner scheduler for cancellable delayed tasks
#[derive(Debug, Default)]
pub struct TickScheduler {
    tasks: SlotMap<TaskId, Deferred>,
    next_seq: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `token` to fire `after_ms` from `now_ms`
    pub fn schedule(&mut self, now_ms: u64, after_ms: u64, token: Token) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(Deferred {
            fire_at_ms: now_ms + after_ms,
            token,
            seq,
        })
    }

    /// Cancel a pending task. Cancelling an already-fired task is a no-op.
    pub fn cancel(&mut self, id: TaskId) {
        self.tasks.remove(id);
    }

    /// Remove and return every task due at `now_ms`, ordered by fire time
    /// (scheduling order breaks ties).
    pub fn advance(&mut self, now_ms: u64) -> SmallVec<[Token; 2]> {
        let mut due: SmallVec<[(u64, u64, TaskId); 2]> = SmallVec::new();
        for (id, task) in self.tasks.iter() {
            if task.fire_at_ms <= now_ms {
                due.push((task.fire_at_ms, task.seq, id));
            }
        }
        due.sort_unstable();

        let mut fired = SmallVec::new();
        for (_, _, id) in due {
            if let Some(task) = self.tasks.remove(id) {
                fired.push(task.token);
            }
        }
        fired
    }

    /// Drop every pending task (gesture interrupted)
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}
