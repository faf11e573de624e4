//! Deferred message delivery
//!
//! Timers are keyed so that scheduling the same key twice replaces the
//! earlier timer and cancelling is idempotent. The runtime asks for due
//! messages on every pump.

use std::time::{Duration, Instant};

use crate::messages::Msg;

/// Identity of a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Auto-dismiss of the toast with this id
    ToastExpiry(u64),
    /// Frame delay between "exporting" and rasterization
    ExportFrame,
}

impl TimerKey {
    /// Background timers don't keep a scripted session alive
    pub fn is_background(&self) -> bool {
        matches!(self, TimerKey::ToastExpiry(_))
    }
}

#[derive(Debug)]
struct Timer {
    key: TimerKey,
    deadline: Instant,
    seq: u64,
    msg: Msg,
}

/// Pending timers
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `msg` at `now + delay`, replacing any timer with the same key
    pub fn schedule(&mut self, key: TimerKey, now: Instant, delay: Duration, msg: Msg) {
        self.timers.retain(|t| t.key != key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            key,
            deadline: now + delay,
            seq,
            msg,
        });
    }

    /// Drop the timer for `key`; returns false if none was pending
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.key != key);
        self.timers.len() != before
    }

    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.timers.iter().any(|t| t.key == key)
    }

    /// Remove and return every message whose deadline is at or before `now`,
    /// earliest deadline first (ties in scheduling order)
    pub fn take_due(&mut self, now: Instant) -> Vec<Msg> {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.deadline, t.seq));
        due.into_iter().map(|t| t.msg).collect()
    }

    /// Earliest pending deadline, optionally ignoring background timers
    pub fn next_deadline(&self, include_background: bool) -> Option<Instant> {
        self.timers
            .iter()
            .filter(|t| include_background || !t.key.is_background())
            .map(|t| t.deadline)
            .min()
    }

    /// Whether any non-background timer is pending
    pub fn has_foreground(&self) -> bool {
        self.timers.iter().any(|t| !t.key.is_background())
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
