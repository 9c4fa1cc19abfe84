//! Debounce primitive for coalescing rapid input events.

use std::time::{Duration, Instant};

/// Coalesces bursts of events into one recomputation: `mark()` on every
/// event, `ready()` fires once the quiet period has elapsed since the last
/// mark. The wrapped computation itself stays synchronous; this only delays
/// when it starts.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    dirty_since: Option<Instant>,
    fire_now: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            dirty_since: None,
            fire_now: false,
        }
    }

    /// Records an input event, restarting the quiet period.
    pub fn mark(&mut self) {
        self.dirty_since = Some(Instant::now());
        self.fire_now = false;
    }

    /// Requests an immediate recomputation on the next poll, skipping the
    /// quiet period (used when a document swap must re-run a pending query).
    pub fn force(&mut self) {
        self.dirty_since = Some(Instant::now());
        self.fire_now = true;
    }

    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Consumes the pending mark once the quiet period has passed.
    pub fn ready(&mut self) -> bool {
        let due = self.fire_now
            || self
                .dirty_since
                .map(|t| t.elapsed() >= self.delay)
                .unwrap_or(false);
        if due {
            self.dirty_since = None;
            self.fire_now = false;
        }
        due
    }
}
