// Rust guideline compliant 2026-10-19

//! Time-of-day classification for surge pricing.
//!
//! Pure functions only: callers supply the instant, nothing here reads a clock.

use jiff::{Timestamp, Zoned};
use policy::{HourWindow, PricingPolicy};

/// Peak and night flags for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeClass {
    pub is_peak_hour: bool,
    pub is_night_time: bool,
}

/// Whether the local hour of `at` falls inside any of `windows`.
///
/// Windows are half-open, so `[7, 10)` matches 07:00 but not 10:00.
#[must_use]
pub fn is_peak_hour(at: &Zoned, windows: &[HourWindow]) -> bool {
    let hour = at.hour();
    windows.iter().any(|window| window.contains(hour))
}

/// Whether the local hour of `at` falls inside the (usually wrapping) night window.
#[must_use]
pub fn is_night_time(at: &Zoned, window: HourWindow) -> bool {
    window.contains(at.hour())
}

/// Classify `timestamp` in the policy's zone against its peak and night windows.
#[must_use]
pub fn classify(timestamp: Timestamp, policy: &PricingPolicy) -> TimeClass {
    let local = timestamp.to_zoned(policy.time_zone().clone());
    TimeClass {
        is_peak_hour: is_peak_hour(&local, policy.peak_windows()),
        is_night_time: is_night_time(&local, policy.night_window()),
    }
}
