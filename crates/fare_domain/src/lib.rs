// Rust guideline compliant 2026-10-19

//! Shared domain types for the fare computation engine.
//!
//! Defines the vehicle class record, the request/result value types, the
//! error taxonomy (`FareError`, `ErrorKind`, `Failure`), and the `Clock`
//! hexagonal port. Every other crate in the workspace depends on this one.

use jiff::Timestamp;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Vehicle classes
// ---------------------------------------------------------------------------

/// Eligibility flags attached to a vehicle class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VehicleFlags {
    /// Vehicle is air-conditioned.
    pub air_conditioned: bool,
    /// Vehicle has room for checked luggage.
    pub luggage: bool,
    /// Vehicle may be booked for airport pick-ups.
    pub airport_eligible: bool,
}

/// Cost and performance attributes of one bookable vehicle class.
///
/// Immutable once registered in a catalog; the engine snapshots it into
/// every [`FareResult`] it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleClass {
    /// Stable identifier, e.g. `"bike"`.
    pub id: String,
    /// Human-readable name shown to passengers.
    pub display_name: String,
    /// Flat fare charged at pick-up, in currency units.
    pub base_fare: f64,
    /// Charge per billable kilometre.
    pub per_km_rate: f64,
    /// Charge per billable minute.
    pub per_minute_rate: f64,
    /// Fuel efficiency in km per litre (`> 0`).
    pub fuel_efficiency: f64,
    /// Average speed in km/h (`> 0`), used to derive a missing duration.
    pub avg_speed_kmh: f64,
    /// Maximum number of passengers (`>= 1`).
    pub capacity: u32,
    /// Eligibility flags.
    pub flags: VehicleFlags,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Trip parameters shared by every vehicle class priced for the same ride.
///
/// Construct via [`TripRequest::builder`]. Values are not validated here;
/// the engine rejects bad input per request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Trip distance in kilometres, supplied by the routing collaborator.
    pub distance_km: f64,
    /// Trip duration in whole minutes. `None` derives it from average speed.
    pub duration_min: Option<u32>,
    /// Fuel price per litre. `None` uses the policy default.
    pub fuel_price: Option<f64>,
    /// Trip start. `None` reads the engine's injected clock.
    pub trip_time: Option<Timestamp>,
    /// Whether peak-hour and night-time surge is evaluated.
    pub include_surge: bool,
}

/// Builder for [`TripRequest`].
///
/// Obtain via [`TripRequest::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct TripRequestBuilder {
    distance_km: f64,
    duration_min: Option<u32>,
    fuel_price: Option<f64>,
    trip_time: Option<Timestamp>,
    include_surge: bool,
}

impl TripRequest {
    /// Create a builder. `distance_km` is the only required parameter.
    ///
    /// Default values: no duration, no fuel price, no trip time, `include_surge = true`.
    #[must_use]
    pub fn builder(distance_km: f64) -> TripRequestBuilder {
        TripRequestBuilder {
            distance_km,
            duration_min: None,
            fuel_price: None,
            trip_time: None,
            include_surge: true,
        }
    }

    /// Attach a vehicle class id, producing a request the engine can price.
    #[must_use]
    pub fn for_vehicle(&self, vehicle_class_id: impl Into<String>) -> FareRequest {
        FareRequest { vehicle_class_id: vehicle_class_id.into(), trip: self.clone() }
    }
}

impl TripRequestBuilder {
    /// Use a known trip duration instead of deriving one.
    #[must_use]
    pub fn duration_min(mut self, minutes: u32) -> Self {
        self.duration_min = Some(minutes);
        self
    }

    /// Override the policy's default fuel price.
    #[must_use]
    pub fn fuel_price(mut self, fuel_price: f64) -> Self {
        self.fuel_price = Some(fuel_price);
        self
    }

    /// Pin the trip start instead of reading the clock.
    #[must_use]
    pub fn trip_time(mut self, trip_time: Timestamp) -> Self {
        self.trip_time = Some(trip_time);
        self
    }

    /// Enable or disable surge evaluation.
    #[must_use]
    pub fn include_surge(mut self, include_surge: bool) -> Self {
        self.include_surge = include_surge;
        self
    }

    /// Finish the request.
    #[must_use]
    pub fn build(self) -> TripRequest {
        TripRequest {
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            fuel_price: self.fuel_price,
            trip_time: self.trip_time,
            include_surge: self.include_surge,
        }
    }
}

/// A trip priced for exactly one vehicle class.
#[derive(Debug, Clone, PartialEq)]
pub struct FareRequest {
    /// Vehicle class to price.
    pub vehicle_class_id: String,
    /// Shared trip parameters.
    pub trip: TripRequest,
}

impl FareRequest {
    /// Create a request for `vehicle_class_id`.
    #[must_use]
    pub fn new(vehicle_class_id: impl Into<String>, trip: TripRequest) -> Self {
        Self { vehicle_class_id: vehicle_class_id.into(), trip }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Integer currency amounts making up one fare.
///
/// Every field is rounded on its own. The sum of the parts can differ from
/// `total` by one unit; consumers must display `total` as the charged amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FareBreakdown {
    pub base_fare: i64,
    pub distance_charge: i64,
    pub time_charge: i64,
    pub fuel_cost: i64,
    /// Sum of the four charges above, before margin and surge.
    pub subtotal: i64,
    /// Operational margin added on top of `subtotal`.
    pub margin_amount: i64,
    /// Surge added on top of the margin-adjusted subtotal.
    pub surge_amount: i64,
    /// Charged amount, always within the policy's fare floor and ceiling.
    pub total: i64,
}

/// Condition that raised the surge multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurgeReason {
    /// Trip starts inside a configured peak window.
    PeakHour,
    /// Trip starts inside the night window.
    NightTime,
}

impl std::fmt::Display for SurgeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PeakHour => f.write_str("Peak hour surge"),
            Self::NightTime => f.write_str("Night time surge"),
        }
    }
}

/// Bound that replaced the computed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FareClamp {
    /// Raised to the minimum fare.
    Floor,
    /// Lowered to the maximum fare.
    Ceiling,
}

/// Inputs the engine actually billed, after defaults and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareDetails {
    pub billable_distance_km: f64,
    pub billable_duration_min: f64,
    pub fuel_price: f64,
    /// Product of all applied surge factors; `1.0` when none applied.
    pub surge_multiplier: f64,
    /// Applied surge conditions, peak before night.
    pub surge_reasons: Vec<SurgeReason>,
    pub is_peak_hour: bool,
    pub is_night_time: bool,
    /// Instant the trip was priced for.
    pub trip_time: Timestamp,
    /// Set when the floor or ceiling replaced the computed total.
    pub fare_clamp: Option<FareClamp>,
}

/// One priced fare for one vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareResult {
    pub vehicle_class_id: String,
    /// Snapshot of the class used for pricing.
    pub vehicle_class: VehicleClass,
    pub breakdown: FareBreakdown,
    pub details: FareDetails,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by catalog, policy, engine, and quoter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// Distance is zero, negative, not finite, or above the policy ceiling.
    #[error("invalid distance: {distance_km} km (must be in (0, {max}])")]
    InvalidDistance {
        /// Rejected distance.
        distance_km: f64,
        /// Longest accepted distance.
        max: f64,
    },
    /// No vehicle class is registered under `id`.
    #[error("unknown vehicle class: {id}")]
    UnknownVehicleClass {
        /// Rejected id.
        id: String,
    },
    /// Fuel price is non-positive, not finite, or above the policy ceiling.
    #[error("invalid fuel price: {fuel_price} (must be in (0, {max}])")]
    InvalidFuelPrice {
        /// Rejected price.
        fuel_price: f64,
        /// Highest accepted price.
        max: f64,
    },
    /// Vehicle class cannot seat the requested party.
    #[error("vehicle class {id} seats {capacity}, party of {passengers} requested")]
    InsufficientCapacity {
        /// Vehicle class id.
        id: String,
        /// Seats available.
        capacity: u32,
        /// Seats requested.
        passengers: u32,
    },
    /// Catalog or policy values are out of their allowed range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Every vehicle class failed, so no range exists.
    #[error("no valid fares: every vehicle class failed")]
    NoValidFares,
}

/// Discriminant of a [`FareError`], used in batch results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidDistance,
    UnknownVehicleClass,
    InvalidFuelPrice,
    InsufficientCapacity,
    InvalidConfiguration,
    NoValidFares,
}

impl FareError {
    /// Return the discriminant of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDistance { .. } => ErrorKind::InvalidDistance,
            Self::UnknownVehicleClass { .. } => ErrorKind::UnknownVehicleClass,
            Self::InvalidFuelPrice { .. } => ErrorKind::InvalidFuelPrice,
            Self::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::NoValidFares => ErrorKind::NoValidFares,
        }
    }

    /// Shorthand for [`FareError::InvalidConfiguration`].
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}

/// A vehicle class that could not be priced inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub vehicle_class_id: String,
    pub kind: ErrorKind,
    /// Display form of the underlying error.
    pub message: String,
}

impl Failure {
    /// Record `error` against `vehicle_class_id`.
    #[must_use]
    pub fn new(vehicle_class_id: impl Into<String>, error: &FareError) -> Self {
        Self {
            vehicle_class_id: vehicle_class_id.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Hexagonal port: source of "now" for requests without a trip time.
///
/// The engine depends exclusively on this trait. The system clock adapter
/// lives in the binary crate; tests pin the instant.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    #[test]
    fn trip_builder_defaults() {
        let trip = TripRequest::builder(3.5).build();
        assert!(trip.duration_min.is_none());
        assert!(trip.fuel_price.is_none());
        assert!(trip.trip_time.is_none());
        assert!(trip.include_surge, "surge is evaluated unless disabled");
    }

    #[test]
    fn trip_builder_setters_override() {
        let at: Timestamp = "2026-03-02T08:15:00Z".parse().unwrap();
        let trip = TripRequest::builder(12.0)
            .duration_min(30)
            .fuel_price(300.0)
            .trip_time(at)
            .include_surge(false)
            .build();
        assert_eq!(trip.duration_min, Some(30));
        assert_eq!(trip.fuel_price, Some(300.0));
        assert_eq!(trip.trip_time, Some(at));
        assert!(!trip.include_surge);
    }

    #[test]
    fn for_vehicle_keeps_trip_fields() {
        let trip = TripRequest::builder(4.0).duration_min(9).build();
        let req = trip.for_vehicle("mini");
        assert_eq!(req.vehicle_class_id, "mini");
        assert_eq!(req.trip, trip);
        assert_eq!(FareRequest::new("mini", trip), req);
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    #[test]
    fn error_kinds_match_variants() {
        assert_eq!(
            FareError::InvalidDistance { distance_km: -1.0, max: 5000.0 }.kind(),
            ErrorKind::InvalidDistance
        );
        assert_eq!(
            FareError::UnknownVehicleClass { id: "jet".to_owned() }.kind(),
            ErrorKind::UnknownVehicleClass
        );
        assert_eq!(
            FareError::InvalidFuelPrice { fuel_price: 0.0, max: 2000.0 }.kind(),
            ErrorKind::InvalidFuelPrice
        );
        assert_eq!(FareError::config("bad").kind(), ErrorKind::InvalidConfiguration);
        assert_eq!(FareError::NoValidFares.kind(), ErrorKind::NoValidFares);
    }

    #[test]
    fn error_messages() {
        let e = FareError::UnknownVehicleClass { id: "jet".to_owned() };
        assert_eq!(e.to_string(), "unknown vehicle class: jet");
        let e = FareError::config("minimum_fare must be > 0");
        assert_eq!(e.to_string(), "invalid configuration: minimum_fare must be > 0");
    }

    #[test]
    fn failure_records_kind_and_message() {
        let err = FareError::UnknownVehicleClass { id: "jet".to_owned() };
        let failure = Failure::new("jet", &err);
        assert_eq!(failure.vehicle_class_id, "jet");
        assert_eq!(failure.kind, ErrorKind::UnknownVehicleClass);
        assert_eq!(failure.message, "unknown vehicle class: jet");
    }

    #[test]
    fn surge_reason_display() {
        assert_eq!(SurgeReason::PeakHour.to_string(), "Peak hour surge");
        assert_eq!(SurgeReason::NightTime.to_string(), "Night time surge");
    }

    // ------------------------------------------------------------------
    // Ports
    // ------------------------------------------------------------------

    #[test]
    fn clock_reference_delegates() {
        struct Pinned(Timestamp);

        impl Clock for Pinned {
            fn now(&self) -> Timestamp {
                self.0
            }
        }

        let at: Timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        let clock = Pinned(at);
        let by_ref: &dyn Clock = &clock;
        assert_eq!((&clock).now(), at);
        assert_eq!(by_ref.now(), at);
    }

    #[test]
    fn failure_serializes_kind_as_variant_name() {
        let failure = Failure::new("jet", &FareError::UnknownVehicleClass { id: "jet".to_owned() });
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "UnknownVehicleClass");
        assert_eq!(json["vehicle_class_id"], "jet");
    }
}
