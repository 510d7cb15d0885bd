// Rust guideline compliant 2026-10-19

//! Vehicle catalog: the immutable registry of bookable vehicle classes.
//!
//! Entry points: [`VehicleCatalog::lookup`], [`VehicleCatalog::list_ids`].
//! Construction via [`VehicleCatalog::builder`] or [`VehicleCatalog::default_fleet`].

use fare_domain::{FareError, VehicleClass, VehicleFlags};

// ---------------------------------------------------------------------------
// VehicleCatalog
// ---------------------------------------------------------------------------

/// Ordered, validated set of vehicle classes.
///
/// Iteration order is registration order and never changes after `build`.
#[derive(Debug, Clone)]
pub struct VehicleCatalog {
    classes: Vec<VehicleClass>,
}

impl VehicleCatalog {
    /// Create an empty builder.
    #[must_use]
    pub fn builder() -> VehicleCatalogBuilder {
        VehicleCatalogBuilder { classes: vec![] }
    }

    /// The reference fleet: `bike`, `rickshaw`, `mini`, `sedan`, `suv`.
    #[must_use]
    pub fn default_fleet() -> Self {
        // Reference values are known-valid; builder validation is skipped.
        Self { classes: default_classes() }
    }

    /// Return the class registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::UnknownVehicleClass`] when no class has that id.
    pub fn lookup(&self, id: &str) -> Result<&VehicleClass, FareError> {
        self.classes
            .iter()
            .find(|class| class.id == id)
            .ok_or_else(|| FareError::UnknownVehicleClass { id: id.to_owned() })
    }

    /// Registered ids in registration order.
    #[must_use]
    pub fn list_ids(&self) -> Vec<&str> {
        self.classes.iter().map(|class| class.id.as_str()).collect()
    }

    /// Registered classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleClass> {
        self.classes.iter()
    }

    /// Number of registered classes; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always `false`: `build` rejects an empty catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Builder for [`VehicleCatalog`].
///
/// Obtain via [`VehicleCatalog::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct VehicleCatalogBuilder {
    classes: Vec<VehicleClass>,
}

impl VehicleCatalogBuilder {
    /// Register one class. Order of calls is the catalog order.
    #[must_use]
    pub fn vehicle(mut self, class: VehicleClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Register several classes in iteration order.
    #[must_use]
    pub fn vehicles(mut self, classes: impl IntoIterator<Item = VehicleClass>) -> Self {
        self.classes.extend(classes);
        self
    }

    /// Validate and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidConfiguration`] when the catalog is empty,
    /// an id is blank or registered twice, or a class has out-of-range values.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<VehicleCatalog, FareError> {
        if self.classes.is_empty() {
            return Err(FareError::config("catalog must contain at least one vehicle class"));
        }
        for (idx, class) in self.classes.iter().enumerate() {
            validate_class(class)?;
            if self.classes[..idx].iter().any(|earlier| earlier.id == class.id) {
                return Err(FareError::config(format!(
                    "vehicle class {} registered twice",
                    class.id
                )));
            }
        }
        tracing::debug!("catalog.built: classes={}", self.classes.len());
        Ok(VehicleCatalog { classes: self.classes })
    }
}

fn validate_class(class: &VehicleClass) -> Result<(), FareError> {
    if class.id.trim().is_empty() {
        return Err(FareError::config("vehicle class id must not be blank"));
    }
    let rates = [
        ("base_fare", class.base_fare),
        ("per_km_rate", class.per_km_rate),
        ("per_minute_rate", class.per_minute_rate),
    ];
    for (name, value) in rates {
        if !value.is_finite() || value < 0.0 {
            return Err(FareError::config(format!(
                "{}: {name} must be a finite value >= 0, got {value}",
                class.id
            )));
        }
    }
    if rates.iter().all(|(_, value)| *value <= 0.0) {
        return Err(FareError::config(format!("{}: at least one rate must be > 0", class.id)));
    }
    for (name, value) in [("fuel_efficiency", class.fuel_efficiency), ("avg_speed_kmh", class.avg_speed_kmh)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(FareError::config(format!(
                "{}: {name} must be a finite value > 0, got {value}",
                class.id
            )));
        }
    }
    if class.capacity == 0 {
        return Err(FareError::config(format!("{}: capacity must be >= 1", class.id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reference fleet
// ---------------------------------------------------------------------------

#[expect(clippy::too_many_arguments, reason = "flat table row, one argument per column")]
fn class(
    id: &str,
    display_name: &str,
    base_fare: f64,
    per_km_rate: f64,
    per_minute_rate: f64,
    fuel_efficiency: f64,
    avg_speed_kmh: f64,
    capacity: u32,
    flags: VehicleFlags,
) -> VehicleClass {
    VehicleClass {
        id: id.to_owned(),
        display_name: display_name.to_owned(),
        base_fare,
        per_km_rate,
        per_minute_rate,
        fuel_efficiency,
        avg_speed_kmh,
        capacity,
        flags,
    }
}

fn default_classes() -> Vec<VehicleClass> {
    let plain = VehicleFlags::default();
    let car = VehicleFlags { air_conditioned: false, luggage: true, airport_eligible: true };
    let ac_car = VehicleFlags { air_conditioned: true, ..car };
    vec![
        class("bike", "Bike", 80.0, 15.0, 3.0, 45.0, 25.0, 1, plain),
        class("rickshaw", "Rickshaw", 120.0, 22.0, 4.0, 30.0, 22.0, 3, plain),
        class("mini", "Mini", 200.0, 35.0, 5.0, 14.0, 30.0, 4, car),
        class("sedan", "Sedan", 300.0, 45.0, 6.0, 12.0, 32.0, 4, ac_car),
        class("suv", "SUV", 450.0, 60.0, 8.0, 9.0, 30.0, 6, ac_car),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
