//! # Debounce gates
//!
//! ## Overview
//!
//! Rapid successive events (fast typing) should not each run the expensive
//! work they request; only the last event inside a quiet window should. A
//! [Debounce] gate records marks as events arrive and reports readiness once
//! the window has elapsed with no further marks.
//!
//! Gates take the current [Instant] as an argument instead of reading the
//! clock, so callers poll them from their event loop and tests can drive
//! them with synthetic times. There are no timers and no threads; a pass
//! that has already started always runs to completion.
use std::time::{Duration, Instant};

/// Collapses bursts of events so that only the last one within a quiet
/// window triggers work.
#[derive(Clone, Copy, Debug)]
pub struct Debounce {
    window: Duration,
    marked_at: Option<Instant>,
}

impl Debounce {
    /// Create a gate with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Debounce { window, marked_at: None }
    }

    /// Record an event, restarting the quiet window.
    pub fn mark(&mut self, now: Instant) {
        self.marked_at = Some(now);
    }

    /// Whether an event is pending, ready or not.
    pub fn pending(&self) -> bool {
        self.marked_at.is_some()
    }

    /// Whether a pending event's quiet window has fully elapsed.
    pub fn ready(&self, now: Instant) -> bool {
        match self.marked_at {
            Some(at) => now.duration_since(at) >= self.window,
            None => false,
        }
    }

    /// Consume the pending event if its quiet window has elapsed, returning
    /// whether the caller should run the debounced work now.
    pub fn take(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.marked_at = None;

            return true;
        } else {
            return false;
        }
    }

    /// Drop any pending event without running it.
    pub fn clear(&mut self) {
        self.marked_at = None;
    }
}
