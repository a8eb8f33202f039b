//! Cancellable deadline slots for deferred controller actions.
//!
//! A slot holds at most one pending deadline. Arming it again replaces the
//! previous deadline, so a superseded action can never fire.

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct DeadlineSlot {
    pending: Option<Instant>,
}

impl DeadlineSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot to fire `delay` after `now`, cancelling any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.pending = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Disarm the slot and return true if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(at) if at <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
