//! Tick timing
//!
//! Timestamps come from a free-running 32-bit microsecond counter that
//! wraps roughly every 71 minutes. All differences are taken with wrapping
//! subtraction so a rollover between two samples still yields the right
//! elapsed time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest value of the microsecond counter before it wraps to zero
pub const TIME_MAX: u32 = u32::MAX;

/// Minimum time a switch must hold a new state before it is accepted (µs)
pub const DEBOUNCE_MICROS: u32 = 5000;

/// Microseconds elapsed from `earlier` to `later`
///
/// Correct across a single counter rollover.
#[inline]
pub const fn elapsed_micros(earlier: u32, later: u32) -> u32 {
    later.wrapping_sub(earlier)
}

/// Timestamps of the current and previous control loop tick
///
/// Updated once per tick: [`begin`](Self::begin) stores the new
/// timestamp, the tick does its work, then [`finish`](Self::finish) makes
/// it the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeState {
    /// Timestamp captured at the start of the current tick
    pub current_micros: u32,
    /// Timestamp captured at the start of the previous tick
    pub last_micros: u32,
}

impl TimeState {
    /// Create a time state anchored at `now`
    ///
    /// The first tick then reports the time since boot instead of the
    /// time since counter zero.
    pub const fn starting_at(now: u32) -> Self {
        Self {
            current_micros: now,
            last_micros: now,
        }
    }

    /// Capture the timestamp of a new tick
    ///
    /// Returns the time elapsed since the previous tick.
    pub fn begin(&mut self, now: u32) -> u32 {
        self.current_micros = now;
        self.elapsed()
    }

    /// Time between the previous and the current tick
    pub fn elapsed(&self) -> u32 {
        elapsed_micros(self.last_micros, self.current_micros)
    }

    /// Close the current tick
    pub fn finish(&mut self) {
        self.last_micros = self.current_micros;
    }
}
