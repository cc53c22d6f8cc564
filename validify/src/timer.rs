//! Deferred work: debounced validation and post-reset.
//!
//! Nothing runs on its own; the host calls [`FormController::tick`] with the
//! current time and sleeps until [`FormController::next_deadline`] in between.
//!
//! [`FormController::tick`]: crate::FormController::tick
//! [`FormController::next_deadline`]: crate::FormController::next_deadline

use std::time::Instant;

use crate::field::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    /// Validate a field once typing has settled.
    Validate(FieldId),
    /// Reset the whole form once the host restored default values.
    Reset,
}

#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<(TimerKey, Instant)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer, replacing any pending one with the same key.
    pub fn arm(&mut self, key: TimerKey, deadline: Instant) {
        self.cancel(key);
        self.pending.push((key, deadline));
    }

    pub fn cancel(&mut self, key: TimerKey) {
        self.pending.retain(|(k, _)| *k != key);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.pending.iter().any(|(k, _)| *k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<(TimerKey, Instant)> = Vec::new();
        self.pending.retain(|(key, at)| {
            if *at <= now {
                due.push((*key, *at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(key, _)| key).collect()
    }
}
