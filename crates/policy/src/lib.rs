// Rust guideline compliant 2026-10-19

//! Pricing policy: margins, surge multipliers, fare bounds, billing thresholds,
//! and the hour windows that trigger surge.
//!
//! Construction via [`PricingPolicy::builder`]; `build` validates every value
//! and is the only place [`FareError::InvalidConfiguration`] originates.

use fare_domain::FareError;
use jiff::tz::TimeZone;

// ---------------------------------------------------------------------------
// HourWindow
// ---------------------------------------------------------------------------

/// Half-open range of wall-clock hours, `[start, end)`.
///
/// When `start > end` the window wraps past midnight: `[22, 6)` covers
/// 22:00 through 05:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    start: i8,
    end: i8,
}

/// A window during which the peak-hour multiplier applies.
pub type PeakWindow = HourWindow;

impl HourWindow {
    const fn from_hours(start: i8, end: i8) -> Self {
        Self { start, end }
    }

    /// Create a window covering `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidConfiguration`] when an hour is outside
    /// `0..24` or `start == end`.
    pub fn new(start: i8, end: i8) -> Result<Self, FareError> {
        if !(0..24).contains(&start) || !(0..24).contains(&end) {
            return Err(FareError::config(format!(
                "hour window [{start}, {end}) must use hours in 0..24"
            )));
        }
        if start == end {
            return Err(FareError::config(format!("hour window [{start}, {end}) is empty")));
        }
        Ok(Self { start, end })
    }

    /// First hour inside the window.
    #[must_use]
    pub fn start(&self) -> i8 {
        self.start
    }

    /// First hour after the window.
    #[must_use]
    pub fn end(&self) -> i8 {
        self.end
    }

    /// Whether the window crosses midnight.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Whether `hour` (0..24) lies inside the window.
    #[must_use]
    pub fn contains(&self, hour: i8) -> bool {
        if self.wraps() {
            hour >= self.start || hour < self.end
        } else {
            (self.start..self.end).contains(&hour)
        }
    }
}

// ---------------------------------------------------------------------------
// PricingPolicy
// ---------------------------------------------------------------------------

/// Validated, immutable pricing configuration.
///
/// Construct via [`PricingPolicy::builder`] (reference defaults) or
/// [`PricingPolicy::default`].
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    operational_margin: f64,
    peak_multiplier: f64,
    night_multiplier: f64,
    minimum_fare: f64,
    maximum_fare: f64,
    min_billable_distance_km: f64,
    min_billable_duration_min: f64,
    default_fuel_price: f64,
    max_fuel_price: f64,
    max_distance_km: f64,
    peak_windows: Vec<HourWindow>,
    night_window: HourWindow,
    time_zone: TimeZone,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        let b = PricingPolicy::builder();
        Self {
            operational_margin: b.operational_margin,
            peak_multiplier: b.peak_multiplier,
            night_multiplier: b.night_multiplier,
            minimum_fare: b.minimum_fare,
            maximum_fare: b.maximum_fare,
            min_billable_distance_km: b.min_billable_distance_km,
            min_billable_duration_min: b.min_billable_duration_min,
            default_fuel_price: b.default_fuel_price,
            max_fuel_price: b.max_fuel_price,
            max_distance_km: b.max_distance_km,
            peak_windows: b.peak_windows,
            night_window: b.night_window,
            time_zone: TimeZone::UTC,
        }
    }
}

impl PricingPolicy {
    /// Create a builder pre-filled with the reference configuration.
    ///
    /// Default values: margin 1.15, peak 1.2, night 1.1, fare `[50, 5000]`,
    /// min distance 0.5 km, min time 2 min, fuel price 280 (max 2000),
    /// max distance 5000 km,
    /// peak `[7, 10)` and `[17, 20)`, night `[22, 6)`, zone UTC.
    #[must_use]
    pub fn builder() -> PricingPolicyBuilder {
        PricingPolicyBuilder {
            operational_margin: 1.15,
            peak_multiplier: 1.2,
            night_multiplier: 1.1,
            minimum_fare: 50.0,
            maximum_fare: 5000.0,
            min_billable_distance_km: 0.5,
            min_billable_duration_min: 2.0,
            default_fuel_price: 280.0,
            max_fuel_price: 2000.0,
            max_distance_km: 5000.0,
            peak_windows: vec![HourWindow::from_hours(7, 10), HourWindow::from_hours(17, 20)],
            night_window: HourWindow::from_hours(22, 6),
            time_zone: ZoneChoice::Zone(TimeZone::UTC),
        }
    }

    #[must_use]
    pub fn operational_margin(&self) -> f64 {
        self.operational_margin
    }

    #[must_use]
    pub fn peak_multiplier(&self) -> f64 {
        self.peak_multiplier
    }

    #[must_use]
    pub fn night_multiplier(&self) -> f64 {
        self.night_multiplier
    }

    /// Fare floor, in currency units.
    #[must_use]
    pub fn minimum_fare(&self) -> f64 {
        self.minimum_fare
    }

    /// Fare ceiling, in currency units.
    #[must_use]
    pub fn maximum_fare(&self) -> f64 {
        self.maximum_fare
    }

    /// Shortest distance ever billed.
    #[must_use]
    pub fn min_billable_distance_km(&self) -> f64 {
        self.min_billable_distance_km
    }

    /// Shortest duration ever billed.
    #[must_use]
    pub fn min_billable_duration_min(&self) -> f64 {
        self.min_billable_duration_min
    }

    /// Fuel price used when a request omits one.
    #[must_use]
    pub fn default_fuel_price(&self) -> f64 {
        self.default_fuel_price
    }

    /// Highest fuel price a request may supply.
    #[must_use]
    pub fn max_fuel_price(&self) -> f64 {
        self.max_fuel_price
    }

    /// Longest distance a request may supply.
    #[must_use]
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    #[must_use]
    pub fn peak_windows(&self) -> &[HourWindow] {
        &self.peak_windows
    }

    #[must_use]
    pub fn night_window(&self) -> HourWindow {
        self.night_window
    }

    /// Zone in which trip times are classified.
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }
}

#[derive(Debug)]
enum ZoneChoice {
    Zone(TimeZone),
    Named(String),
}

/// Builder for [`PricingPolicy`].
///
/// Obtain via [`PricingPolicy::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct PricingPolicyBuilder {
    operational_margin: f64,
    peak_multiplier: f64,
    night_multiplier: f64,
    minimum_fare: f64,
    maximum_fare: f64,
    min_billable_distance_km: f64,
    min_billable_duration_min: f64,
    default_fuel_price: f64,
    max_fuel_price: f64,
    max_distance_km: f64,
    peak_windows: Vec<HourWindow>,
    night_window: HourWindow,
    time_zone: ZoneChoice,
}

impl PricingPolicyBuilder {
    #[must_use]
    pub fn operational_margin(mut self, value: f64) -> Self {
        self.operational_margin = value;
        self
    }

    #[must_use]
    pub fn peak_multiplier(mut self, value: f64) -> Self {
        self.peak_multiplier = value;
        self
    }

    #[must_use]
    pub fn night_multiplier(mut self, value: f64) -> Self {
        self.night_multiplier = value;
        self
    }

    /// Set fare floor and ceiling together.
    #[must_use]
    pub fn fare_bounds(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_fare = minimum;
        self.maximum_fare = maximum;
        self
    }

    #[must_use]
    pub fn min_billable_distance_km(mut self, value: f64) -> Self {
        self.min_billable_distance_km = value;
        self
    }

    #[must_use]
    pub fn min_billable_duration_min(mut self, value: f64) -> Self {
        self.min_billable_duration_min = value;
        self
    }

    #[must_use]
    pub fn default_fuel_price(mut self, value: f64) -> Self {
        self.default_fuel_price = value;
        self
    }

    #[must_use]
    pub fn max_fuel_price(mut self, value: f64) -> Self {
        self.max_fuel_price = value;
        self
    }

    #[must_use]
    pub fn max_distance_km(mut self, value: f64) -> Self {
        self.max_distance_km = value;
        self
    }

    /// Replace the peak windows. An empty list disables peak surge.
    #[must_use]
    pub fn peak_windows(mut self, windows: Vec<HourWindow>) -> Self {
        self.peak_windows = windows;
        self
    }

    #[must_use]
    pub fn night_window(mut self, window: HourWindow) -> Self {
        self.night_window = window;
        self
    }

    #[must_use]
    pub fn time_zone(mut self, zone: TimeZone) -> Self {
        self.time_zone = ZoneChoice::Zone(zone);
        self
    }

    /// Use an IANA zone name (e.g. `"Asia/Karachi"`), resolved by `build`.
    #[must_use]
    pub fn time_zone_name(mut self, name: impl Into<String>) -> Self {
        self.time_zone = ZoneChoice::Named(name.into());
        self
    }

    /// Validate and build the policy.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidConfiguration`] when any value is not a
    /// finite positive number, a multiplier is below 1, the fare floor exceeds
    /// the ceiling, the default fuel price exceeds its maximum, the minimum
    /// billable distance exceeds the maximum distance, or the zone name cannot
    /// be resolved.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<PricingPolicy, FareError> {
        let positive = [
            ("operational_margin", self.operational_margin),
            ("peak_multiplier", self.peak_multiplier),
            ("night_multiplier", self.night_multiplier),
            ("minimum_fare", self.minimum_fare),
            ("maximum_fare", self.maximum_fare),
            ("min_billable_distance_km", self.min_billable_distance_km),
            ("min_billable_duration_min", self.min_billable_duration_min),
            ("default_fuel_price", self.default_fuel_price),
            ("max_fuel_price", self.max_fuel_price),
            ("max_distance_km", self.max_distance_km),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FareError::config(format!("{name} must be a finite value > 0, got {value}")));
            }
        }
        for (name, value) in positive.iter().take(3) {
            if *value < 1.0 {
                return Err(FareError::config(format!("{name} must be >= 1, got {value}")));
            }
        }
        if self.minimum_fare > self.maximum_fare {
            return Err(FareError::config(format!(
                "minimum_fare {} exceeds maximum_fare {}",
                self.minimum_fare, self.maximum_fare
            )));
        }
        if self.default_fuel_price > self.max_fuel_price {
            return Err(FareError::config(format!(
                "default_fuel_price {} exceeds max_fuel_price {}",
                self.default_fuel_price, self.max_fuel_price
            )));
        }
        if self.min_billable_distance_km > self.max_distance_km {
            return Err(FareError::config(format!(
                "min_billable_distance_km {} exceeds max_distance_km {}",
                self.min_billable_distance_km, self.max_distance_km
            )));
        }
        // Windows built through the setters may bypass `HourWindow::new`.
        for window in self.peak_windows.iter().chain(std::iter::once(&self.night_window)) {
            HourWindow::new(window.start, window.end)?;
        }
        let time_zone = match self.time_zone {
            ZoneChoice::Zone(zone) => zone,
            ZoneChoice::Named(name) => TimeZone::get(&name).map_err(|e| {
                FareError::config(format!("unknown time zone {name}: {e}"))
            })?,
        };
        tracing::debug!(
            "policy.built: margin={} peak={} night={} fare=[{}, {}]",
            self.operational_margin,
            self.peak_multiplier,
            self.night_multiplier,
            self.minimum_fare,
            self.maximum_fare
        );
        Ok(PricingPolicy {
            operational_margin: self.operational_margin,
            peak_multiplier: self.peak_multiplier,
            night_multiplier: self.night_multiplier,
            minimum_fare: self.minimum_fare,
            maximum_fare: self.maximum_fare,
            min_billable_distance_km: self.min_billable_distance_km,
            min_billable_duration_min: self.min_billable_duration_min,
            default_fuel_price: self.default_fuel_price,
            max_fuel_price: self.max_fuel_price,
            max_distance_km: self.max_distance_km,
            peak_windows: self.peak_windows,
            night_window: self.night_window,
            time_zone,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(result: Result<PricingPolicy, FareError>) {
        assert!(
            matches!(result, Err(FareError::InvalidConfiguration { .. })),
            "expected InvalidConfiguration, got {result:?}"
        );
    }

    // ------------------------------------------------------------------
    // HourWindow
    // ------------------------------------------------------------------

    #[test]
    fn window_is_half_open() {
        let w = HourWindow::new(7, 10).unwrap();
        assert!(!w.contains(6));
        assert!(w.contains(7));
        assert!(w.contains(9));
        assert!(!w.contains(10));
        assert!(!w.wraps());
    }

    #[test]
    fn window_wraps_past_midnight() {
        let w = HourWindow::new(22, 6).unwrap();
        assert!(w.wraps());
        for hour in [22, 23, 0, 3, 5] {
            assert!(w.contains(hour), "hour {hour} must be inside [22, 6)");
        }
        for hour in [6, 12, 21] {
            assert!(!w.contains(hour), "hour {hour} must be outside [22, 6)");
        }
    }

    #[test]
    fn window_rejects_bad_hours() {
        assert!(HourWindow::new(-1, 5).is_err());
        assert!(HourWindow::new(5, 24).is_err());
        assert!(HourWindow::new(8, 8).is_err());
    }

    // ------------------------------------------------------------------
    // Defaults
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact reference literals")]
    fn builder_defaults_are_reference_values() {
        let policy = PricingPolicy::builder().build().unwrap();
        assert_eq!(policy.operational_margin(), 1.15);
        assert_eq!(policy.peak_multiplier(), 1.2);
        assert_eq!(policy.night_multiplier(), 1.1);
        assert_eq!(policy.minimum_fare(), 50.0);
        assert_eq!(policy.maximum_fare(), 5000.0);
        assert_eq!(policy.min_billable_distance_km(), 0.5);
        assert_eq!(policy.min_billable_duration_min(), 2.0);
        assert_eq!(policy.default_fuel_price(), 280.0);
        assert_eq!(policy.max_distance_km(), 5000.0);
        assert_eq!(
            policy.peak_windows(),
            &[HourWindow::new(7, 10).unwrap(), HourWindow::new(17, 20).unwrap()]
        );
        assert_eq!(policy.night_window(), HourWindow::new(22, 6).unwrap());
        assert_eq!(policy.time_zone(), &TimeZone::UTC);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact reference literals")]
    fn default_matches_builder() {
        let built = PricingPolicy::builder().build().unwrap();
        let default = PricingPolicy::default();
        assert_eq!(default.operational_margin(), built.operational_margin());
        assert_eq!(default.maximum_fare(), built.maximum_fare());
        assert_eq!(default.peak_windows(), built.peak_windows());
        assert_eq!(default.night_window(), built.night_window());
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    #[test]
    fn rejects_non_positive_values() {
        assert_invalid(PricingPolicy::builder().fare_bounds(0.0, 100.0).build());
        assert_invalid(PricingPolicy::builder().min_billable_distance_km(0.0).build());
        assert_invalid(PricingPolicy::builder().min_billable_duration_min(-2.0).build());
        assert_invalid(PricingPolicy::builder().default_fuel_price(0.0).build());
        assert_invalid(PricingPolicy::builder().max_fuel_price(f64::INFINITY).build());
        assert_invalid(PricingPolicy::builder().max_distance_km(f64::INFINITY).build());
        assert_invalid(PricingPolicy::builder().max_distance_km(0.0).build());
    }

    #[test]
    fn rejects_multipliers_below_one() {
        assert_invalid(PricingPolicy::builder().operational_margin(0.9).build());
        assert_invalid(PricingPolicy::builder().peak_multiplier(0.5).build());
        assert_invalid(PricingPolicy::builder().night_multiplier(f64::NAN).build());
    }

    #[test]
    fn accepts_multipliers_of_exactly_one() {
        let policy = PricingPolicy::builder()
            .operational_margin(1.0)
            .peak_multiplier(1.0)
            .night_multiplier(1.0)
            .build();
        assert!(policy.is_ok(), "a multiplier of 1 disables that factor: {policy:?}");
    }

    #[test]
    fn rejects_inverted_fare_bounds() {
        assert_invalid(PricingPolicy::builder().fare_bounds(500.0, 100.0).build());
    }

    #[test]
    fn rejects_default_fuel_above_max() {
        assert_invalid(PricingPolicy::builder().default_fuel_price(300.0).max_fuel_price(250.0).build());
    }

    #[test]
    fn rejects_distance_ceiling_below_billable_floor() {
        assert_invalid(PricingPolicy::builder().min_billable_distance_km(2.0).max_distance_km(1.0).build());
    }

    #[test]
    fn rejects_unchecked_window() {
        let bad = HourWindow::from_hours(3, 3);
        assert_invalid(PricingPolicy::builder().night_window(bad).build());
        assert_invalid(PricingPolicy::builder().peak_windows(vec![HourWindow::from_hours(9, 30)]).build());
    }

    #[test]
    fn empty_peak_windows_allowed() {
        let policy = PricingPolicy::builder().peak_windows(vec![]).build().unwrap();
        assert!(policy.peak_windows().is_empty());
    }

    #[test]
    fn fixed_offset_zone_accepted() {
        let zone = TimeZone::fixed(jiff::tz::offset(5));
        let policy = PricingPolicy::builder().time_zone(zone.clone()).build().unwrap();
        assert_eq!(policy.time_zone(), &zone);
    }

    #[test]
    fn zone_name_resolves() {
        let policy = PricingPolicy::builder().time_zone_name("Asia/Karachi").build().unwrap();
        assert_eq!(policy.time_zone().iana_name(), Some("Asia/Karachi"));
        let local = "2026-05-04T03:30:00Z"
            .parse::<jiff::Timestamp>()
            .unwrap()
            .to_zoned(policy.time_zone().clone());
        assert_eq!(local.hour(), 8, "Karachi is UTC+5");
    }

    #[test]
    fn unknown_zone_name_rejected() {
        assert_invalid(PricingPolicy::builder().time_zone_name("Mars/Olympus_Mons").build());
    }
}
