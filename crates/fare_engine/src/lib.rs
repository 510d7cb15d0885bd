// Rust guideline compliant 2026-10-19

//! Fare engine: prices one trip for one vehicle class.
//!
//! [`FareEngine`] reads the vehicle catalog, the pricing policy, and the
//! time classifier. Its only outside dependency is the injected
//! `fare_domain::Clock`, consulted when a request carries no trip time.
//!
//! Entry points: [`FareEngine::compute`], [`FareEngine::compute_at`].

use catalog::VehicleCatalog;
use fare_domain::{
    Clock, FareBreakdown, FareClamp, FareDetails, FareError, FareRequest, FareResult, SurgeReason,
    TripRequest, VehicleClass,
};
use jiff::Timestamp;
use policy::PricingPolicy;

// ---------------------------------------------------------------------------
// FareEngine
// ---------------------------------------------------------------------------

/// Computes fares from an immutable catalog and policy.
///
/// Generic over `C: Clock` for static dispatch. Holds no mutable state, so a
/// shared reference can serve any number of callers.
#[derive(Debug)]
pub struct FareEngine<C: Clock> {
    catalog: VehicleCatalog,
    policy: PricingPolicy,
    clock: C,
}

impl<C: Clock> FareEngine<C> {
    /// Create an engine. Catalog and policy are already validated by their builders.
    #[must_use]
    pub fn new(catalog: VehicleCatalog, policy: PricingPolicy, clock: C) -> Self {
        Self { catalog, policy, clock }
    }

    #[must_use]
    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Instant a request without a trip time is priced at.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Price `request`, reading the clock only when it has no trip time.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidDistance`], [`FareError::UnknownVehicleClass`],
    /// or [`FareError::InvalidFuelPrice`], checked in that order.
    pub fn compute(&self, request: &FareRequest) -> Result<FareResult, FareError> {
        let at = request.trip.trip_time.unwrap_or_else(|| self.clock.now());
        self.compute_at(request, at)
    }

    /// Price `request` at `fallback_time` unless the request pins its own trip time.
    ///
    /// The quoter resolves "now" once and prices every class against it.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute).
    pub fn compute_at(
        &self,
        request: &FareRequest,
        fallback_time: Timestamp,
    ) -> Result<FareResult, FareError> {
        let trip = &request.trip;
        validate_distance(trip.distance_km, self.policy.max_distance_km())?;
        let class = self.catalog.lookup(&request.vehicle_class_id)?;
        let fuel_price = self.resolve_fuel_price(trip)?;
        let at = trip.trip_time.unwrap_or(fallback_time);

        let duration_min = trip
            .duration_min
            .map_or_else(|| derive_duration_min(trip.distance_km, class), f64::from);
        let billable_distance_km = trip.distance_km.max(self.policy.min_billable_distance_km());
        let billable_duration_min = duration_min.max(self.policy.min_billable_duration_min());

        let distance_charge = billable_distance_km * class.per_km_rate;
        let time_charge = billable_duration_min * class.per_minute_rate;
        let fuel_cost = billable_distance_km / class.fuel_efficiency * fuel_price;
        let subtotal = class.base_fare + distance_charge + time_charge + fuel_cost;
        let with_margin = subtotal * self.policy.operational_margin();

        let time_class = classifier::classify(at, &self.policy);
        let mut surge_multiplier = 1.0_f64;
        let mut surge_reasons = Vec::new();
        if trip.include_surge {
            if time_class.is_peak_hour {
                surge_multiplier *= self.policy.peak_multiplier();
                surge_reasons.push(SurgeReason::PeakHour);
            }
            if time_class.is_night_time {
                surge_multiplier *= self.policy.night_multiplier();
                surge_reasons.push(SurgeReason::NightTime);
            }
        }

        let surged = with_margin * surge_multiplier;
        let surge_amount = with_margin * (surge_multiplier - 1.0);
        let (total, fare_clamp) = self.clamp_total(surged);

        let breakdown = FareBreakdown {
            base_fare: to_currency(class.base_fare),
            distance_charge: to_currency(distance_charge),
            time_charge: to_currency(time_charge),
            fuel_cost: to_currency(fuel_cost),
            subtotal: to_currency(subtotal),
            margin_amount: to_currency(with_margin - subtotal),
            surge_amount: to_currency(surge_amount),
            total: to_currency(total),
        };

        tracing::debug!(
            "fare_engine.computed: vehicle={} distance_km={} total={} surge={surge_multiplier}",
            class.id,
            billable_distance_km,
            breakdown.total
        );

        Ok(FareResult {
            vehicle_class_id: class.id.clone(),
            vehicle_class: class.clone(),
            breakdown,
            details: FareDetails {
                billable_distance_km,
                billable_duration_min,
                fuel_price,
                surge_multiplier,
                surge_reasons,
                is_peak_hour: time_class.is_peak_hour,
                is_night_time: time_class.is_night_time,
                trip_time: at,
                fare_clamp,
            },
        })
    }

    fn resolve_fuel_price(&self, trip: &TripRequest) -> Result<f64, FareError> {
        let Some(fuel_price) = trip.fuel_price else {
            return Ok(self.policy.default_fuel_price());
        };
        let max = self.policy.max_fuel_price();
        if !fuel_price.is_finite() || fuel_price <= 0.0 || fuel_price > max {
            return Err(FareError::InvalidFuelPrice { fuel_price, max });
        }
        Ok(fuel_price)
    }

    /// Clamp into `[minimum_fare, maximum_fare]`, after surge.
    fn clamp_total(&self, total: f64) -> (f64, Option<FareClamp>) {
        if total < self.policy.minimum_fare() {
            (self.policy.minimum_fare(), Some(FareClamp::Floor))
        } else if total > self.policy.maximum_fare() {
            (self.policy.maximum_fare(), Some(FareClamp::Ceiling))
        } else {
            (total, None)
        }
    }
}

fn validate_distance(distance_km: f64, max: f64) -> Result<(), FareError> {
    if !distance_km.is_finite() || distance_km <= 0.0 || distance_km > max {
        return Err(FareError::InvalidDistance { distance_km, max });
    }
    Ok(())
}

/// Minutes at the class's average speed, rounded to the nearest whole minute.
fn derive_duration_min(distance_km: f64, class: &VehicleClass) -> f64 {
    (distance_km / class.avg_speed_kmh * 60.0).round()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "total is clamped; other amounts are finite rates times a capped distance or a u32 duration"
)]
fn to_currency(amount: f64) -> i64 {
    amount.round() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
