// Rust guideline compliant 2026-10-19

//! Pinned-instant adapter for the `Clock` port.
//!
//! Selected by `--clock` so a run can be replayed exactly.

use fare_domain::Clock;
use jiff::Timestamp;

/// `Clock` adapter that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: Timestamp,
}

impl FixedClock {
    /// Create a clock frozen at `at`.
    #[must_use]
    pub fn new(at: Timestamp) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.at
    }
}
