//! Time source for entry timestamps

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Instant recorded on an entry when it is fetched (and, under LRU, used)
pub type Timestamp = Instant;

/// Source of the current time
///
/// Implementations must never go backwards, otherwise the eviction order
/// stops being sorted by timestamp.
pub trait Clock {
    /// Current time
    fn now(&self) -> Timestamp;
}

/// Monotonic system clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Instant::now()
    }
}

/// Manually driven clock
///
/// Clones share the same current time, so a test can keep one handle
/// and give another to the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock frozen at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to `to`; ignored if `to` is earlier than the current time
    pub fn set(&self, to: Instant) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
