// Rust guideline compliant 2026-10-19

//! Multi-vehicle quoter: prices one trip for every vehicle class.
//!
//! Per-class failures are recorded and never abort the batch.
//!
//! Entry points: [`MultiVehicleQuoter::quote_all`], [`MultiVehicleQuoter::quote_vehicles`],
//! [`MultiVehicleQuoter::quote_for_party`], [`MultiVehicleQuoter::estimate_range`].

use fare_domain::{Clock, Failure, FareError, FareResult, TripRequest};
use fare_engine::FareEngine;
use jiff::Timestamp;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Batch results
// ---------------------------------------------------------------------------

/// Outcome of pricing one vehicle class inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteOutcome {
    Priced(FareResult),
    Failed(Failure),
}

/// One entry of a batch, keyed by vehicle class id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Also carried by the outcome itself, so it is not serialized twice.
    #[serde(skip)]
    pub vehicle_class_id: String,
    #[serde(flatten)]
    pub outcome: QuoteOutcome,
}

/// Batch result in the order the vehicle classes were requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Quotes {
    entries: Vec<Quote>,
}

impl Quotes {
    /// Outcome for `vehicle_class_id`, if it was part of the batch.
    #[must_use]
    pub fn get(&self, vehicle_class_id: &str) -> Option<&QuoteOutcome> {
        self.entries
            .iter()
            .find(|quote| quote.vehicle_class_id == vehicle_class_id)
            .map(|quote| &quote.outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.entries.iter()
    }

    /// Successfully priced classes, in batch order.
    pub fn priced(&self) -> impl Iterator<Item = &FareResult> {
        self.entries.iter().filter_map(|quote| match &quote.outcome {
            QuoteOutcome::Priced(result) => Some(result),
            QuoteOutcome::Failed(_) => None,
        })
    }

    /// Failed classes, in batch order.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.entries.iter().filter_map(|quote| match &quote.outcome {
            QuoteOutcome::Priced(_) => None,
            QuoteOutcome::Failed(failure) => Some(failure),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cheapest and most expensive priced total in this batch.
    ///
    /// Ties keep the class that appears first.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::NoValidFares`] when nothing was priced.
    pub fn range(&self) -> Result<FareRange, FareError> {
        let mut priced = self.priced();
        let first = priced.next().ok_or(FareError::NoValidFares)?;
        let mut range = FareRange {
            min: first.breakdown.total,
            max: first.breakdown.total,
            cheapest: first.vehicle_class_id.clone(),
            priciest: first.vehicle_class_id.clone(),
        };
        for result in priced {
            let total = result.breakdown.total;
            if total < range.min {
                range.min = total;
                range.cheapest.clone_from(&result.vehicle_class_id);
            }
            if total > range.max {
                range.max = total;
                range.priciest.clone_from(&result.vehicle_class_id);
            }
        }
        Ok(range)
    }
}

impl<'a> IntoIterator for &'a Quotes {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lowest and highest total across the priced classes of one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareRange {
    pub min: i64,
    pub max: i64,
    /// Class that produced `min`.
    pub cheapest: String,
    /// Class that produced `max`.
    pub priciest: String,
}

// ---------------------------------------------------------------------------
// MultiVehicleQuoter
// ---------------------------------------------------------------------------

/// Fans a trip out over the catalog via a [`FareEngine`].
///
/// Stateless between calls; "now" is read at most once per batch so every
/// class is priced against the same instant.
#[derive(Debug)]
pub struct MultiVehicleQuoter<C: Clock> {
    engine: FareEngine<C>,
}

impl<C: Clock> MultiVehicleQuoter<C> {
    /// Create a quoter around `engine`.
    #[must_use]
    pub fn new(engine: FareEngine<C>) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &FareEngine<C> {
        &self.engine
    }

    /// Price `trip` for every catalog class, in catalog order.
    #[must_use]
    pub fn quote_all(&self, trip: &TripRequest) -> Quotes {
        let ids = self.engine.catalog().list_ids();
        self.quote_vehicles(trip, &ids)
    }

    /// Price `trip` for each id in `vehicle_class_ids`, in the given order.
    ///
    /// Unknown ids and invalid trip values become [`Failure`] entries.
    #[must_use]
    pub fn quote_vehicles(&self, trip: &TripRequest, vehicle_class_ids: &[&str]) -> Quotes {
        let at = self.batch_time(trip);
        let entries = vehicle_class_ids
            .iter()
            .map(|id| self.quote_one(trip, id, at))
            .collect();
        summarize(Quotes { entries })
    }

    /// Price `trip` for every class; classes seating fewer than `passengers`
    /// are recorded as `InsufficientCapacity` failures.
    #[must_use]
    pub fn quote_for_party(&self, trip: &TripRequest, passengers: u32) -> Quotes {
        let at = self.batch_time(trip);
        let entries = self
            .engine
            .catalog()
            .iter()
            .map(|class| {
                if class.capacity < passengers {
                    let err = FareError::InsufficientCapacity {
                        id: class.id.clone(),
                        capacity: class.capacity,
                        passengers,
                    };
                    failed(&class.id, &err)
                } else {
                    self.quote_one(trip, &class.id, at)
                }
            })
            .collect();
        summarize(Quotes { entries })
    }

    /// Min/max total across all classes with surge excluded.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::NoValidFares`] only when every class failed.
    pub fn estimate_range(&self, trip: &TripRequest) -> Result<FareRange, FareError> {
        let mut base = trip.clone();
        base.include_surge = false;
        self.quote_all(&base).range()
    }

    fn batch_time(&self, trip: &TripRequest) -> Timestamp {
        trip.trip_time.unwrap_or_else(|| self.engine.now())
    }

    fn quote_one(&self, trip: &TripRequest, vehicle_class_id: &str, at: Timestamp) -> Quote {
        match self.engine.compute_at(&trip.for_vehicle(vehicle_class_id), at) {
            Ok(result) => Quote {
                vehicle_class_id: vehicle_class_id.to_owned(),
                outcome: QuoteOutcome::Priced(result),
            },
            Err(err) => failed(vehicle_class_id, &err),
        }
    }
}

#[cfg(feature = "parallel")]
impl<C: Clock + Sync> MultiVehicleQuoter<C> {
    /// [`quote_all`](Self::quote_all) with one rayon task per class.
    ///
    /// Results keep catalog order.
    #[must_use]
    pub fn quote_all_parallel(&self, trip: &TripRequest) -> Quotes {
        use rayon::prelude::*;

        let at = self.batch_time(trip);
        let entries = self
            .engine
            .catalog()
            .list_ids()
            .par_iter()
            .map(|id| self.quote_one(trip, id, at))
            .collect();
        summarize(Quotes { entries })
    }
}

fn failed(vehicle_class_id: &str, err: &FareError) -> Quote {
    tracing::warn!("quoter.vehicle.failed: vehicle={vehicle_class_id} error={err}");
    Quote {
        vehicle_class_id: vehicle_class_id.to_owned(),
        outcome: QuoteOutcome::Failed(Failure::new(vehicle_class_id, err)),
    }
}

fn summarize(quotes: Quotes) -> Quotes {
    tracing::info!(
        "quoter.batch.done: priced={} failed={}",
        quotes.priced().count(),
        quotes.failures().count()
    );
    quotes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
