//! Cooperative scan budget

use std::time::{Duration, Instant};

/// Wall-clock deadline polled between units of work.
///
/// Nothing is interrupted; the owner checks `expired()` at its own
/// yield points and stops cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline that never expires
    pub fn never() -> Self {
        Self { at: None }
    }

    pub fn expired(&self) -> bool {
        self.at.map_or(false, |at| Instant::now() >= at)
    }
}
