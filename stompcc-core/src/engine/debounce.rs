//! Time-based switch debouncing
//!
//! A raw change restarts the debounce window. The new state is accepted
//! only once it has been held for longer than [`DEBOUNCE_MICROS`].

use crate::time::{elapsed_micros, DEBOUNCE_MICROS};

/// Debounce state of a single switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Accepted switch state
    stable: bool,
    /// Most recently sampled raw state
    raw: bool,
    /// Timestamp of the last raw state change (µs)
    changed_at: u32,
}

impl Debouncer {
    /// Create a debouncer with both states released
    pub const fn new() -> Self {
        Self {
            stable: false,
            raw: false,
            changed_at: 0,
        }
    }

    /// Accepted switch state
    pub fn stable(&self) -> bool {
        self.stable
    }

    /// Check if a raw change is waiting to be accepted
    pub fn is_pending(&self) -> bool {
        self.raw != self.stable
    }

    /// Record a raw sample
    ///
    /// A differing sample restarts the debounce window at `now`.
    pub fn observe(&mut self, raw: bool, now: u32) {
        if raw != self.raw {
            self.raw = raw;
            self.changed_at = now;
        }
    }

    /// Accept the pending state if it has been held long enough
    ///
    /// Returns the newly accepted state.
    pub fn commit(&mut self, now: u32) -> Option<bool> {
        if !self.is_pending() {
            return None;
        }
        if elapsed_micros(self.changed_at, now) > DEBOUNCE_MICROS {
            self.stable = self.raw;
            Some(self.stable)
        } else {
            None
        }
    }

    /// Record a raw sample and try to accept it in one step
    pub fn update(&mut self, raw: bool, now: u32) -> Option<bool> {
        self.observe(raw, now);
        self.commit(now)
    }
}
