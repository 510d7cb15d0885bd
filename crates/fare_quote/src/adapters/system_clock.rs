// Rust guideline compliant 2026-10-19

//! Wall-clock adapter for the `Clock` port.

use fare_domain::Clock;
use jiff::Timestamp;

/// `Clock` adapter backed by the operating system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
