// Rust guideline compliant 2026-10-19

//! JSON configuration file for the `fare-quote` binary.
//!
//! Both sections are optional; anything omitted keeps the reference value.
//!
//! ```json
//! {
//!   "policy": { "minimum_fare": 80, "peak_windows": [[8, 11]], "time_zone": "Asia/Karachi" },
//!   "vehicles": [ { "id": "bike", "display_name": "Bike", "base_fare": 80, ... } ]
//! }
//! ```

use std::path::Path;

use anyhow::Context as _;
use catalog::VehicleCatalog;
use fare_domain::{VehicleClass, VehicleFlags};
use policy::{HourWindow, PricingPolicy};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    policy: PolicyConfig,
    vehicles: Option<Vec<VehicleConfig>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyConfig {
    operational_margin: Option<f64>,
    peak_multiplier: Option<f64>,
    night_multiplier: Option<f64>,
    minimum_fare: Option<f64>,
    maximum_fare: Option<f64>,
    min_billable_distance_km: Option<f64>,
    min_billable_duration_min: Option<f64>,
    default_fuel_price: Option<f64>,
    max_fuel_price: Option<f64>,
    max_distance_km: Option<f64>,
    /// `[start, end)` hour pairs.
    peak_windows: Option<Vec<[i8; 2]>>,
    night_window: Option<[i8; 2]>,
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VehicleConfig {
    id: String,
    display_name: String,
    base_fare: f64,
    per_km_rate: f64,
    per_minute_rate: f64,
    fuel_efficiency: f64,
    avg_speed_kmh: f64,
    capacity: u32,
    #[serde(default)]
    air_conditioned: bool,
    #[serde(default)]
    luggage: bool,
    #[serde(default)]
    airport_eligible: bool,
}

impl From<VehicleConfig> for VehicleClass {
    fn from(v: VehicleConfig) -> Self {
        Self {
            id: v.id,
            display_name: v.display_name,
            base_fare: v.base_fare,
            per_km_rate: v.per_km_rate,
            per_minute_rate: v.per_minute_rate,
            fuel_efficiency: v.fuel_efficiency,
            avg_speed_kmh: v.avg_speed_kmh,
            capacity: v.capacity,
            flags: VehicleFlags {
                air_conditioned: v.air_conditioned,
                luggage: v.luggage,
                airport_eligible: v.airport_eligible,
            },
        }
    }
}

impl FileConfig {
    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid config JSON.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build the validated policy.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidConfiguration` from the policy builder.
    pub fn policy(&self) -> anyhow::Result<PricingPolicy> {
        let p = &self.policy;
        let defaults = PricingPolicy::default();
        let mut builder = PricingPolicy::builder()
            .operational_margin(p.operational_margin.unwrap_or(defaults.operational_margin()))
            .peak_multiplier(p.peak_multiplier.unwrap_or(defaults.peak_multiplier()))
            .night_multiplier(p.night_multiplier.unwrap_or(defaults.night_multiplier()))
            .fare_bounds(
                p.minimum_fare.unwrap_or(defaults.minimum_fare()),
                p.maximum_fare.unwrap_or(defaults.maximum_fare()),
            )
            .min_billable_distance_km(p.min_billable_distance_km.unwrap_or(defaults.min_billable_distance_km()))
            .min_billable_duration_min(p.min_billable_duration_min.unwrap_or(defaults.min_billable_duration_min()))
            .default_fuel_price(p.default_fuel_price.unwrap_or(defaults.default_fuel_price()))
            .max_fuel_price(p.max_fuel_price.unwrap_or(defaults.max_fuel_price()))
            .max_distance_km(p.max_distance_km.unwrap_or(defaults.max_distance_km()));
        if let Some(windows) = &p.peak_windows {
            let windows = windows
                .iter()
                .map(|[start, end]| HourWindow::new(*start, *end))
                .collect::<Result<Vec<_>, _>>()
                .context("invalid peak window")?;
            builder = builder.peak_windows(windows);
        }
        if let Some([start, end]) = p.night_window {
            builder = builder.night_window(HourWindow::new(start, end).context("invalid night window")?);
        }
        if let Some(name) = &p.time_zone {
            builder = builder.time_zone_name(name.as_str());
        }
        builder.build().context("invalid pricing policy")
    }

    /// Build the validated catalog; the reference fleet when no vehicles are listed.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidConfiguration` from the catalog builder.
    pub fn catalog(self) -> anyhow::Result<VehicleCatalog> {
        match self.vehicles {
            None => Ok(VehicleCatalog::default_fleet()),
            Some(vehicles) => VehicleCatalog::builder()
                .vehicles(vehicles.into_iter().map(VehicleClass::from))
                .build()
                .context("invalid vehicle catalog"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "values copied verbatim from JSON")]
    fn empty_file_keeps_reference_values() {
        let config = FileConfig::parse("{}").unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.operational_margin(), 1.15);
        assert_eq!(policy.maximum_fare(), 5000.0);
        assert_eq!(config.catalog().unwrap().list_ids(), vec!["bike", "rickshaw", "mini", "sedan", "suv"]);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "values copied verbatim from JSON")]
    fn policy_overrides_apply() {
        let config = FileConfig::parse(
            r#"{ "policy": { "minimum_fare": 80, "peak_windows": [[8, 11]], "night_window": [23, 5] } }"#,
        )
        .unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.minimum_fare(), 80.0);
        assert_eq!(policy.peak_windows(), &[HourWindow::new(8, 11).unwrap()]);
        assert_eq!(policy.night_window(), HourWindow::new(23, 5).unwrap());
        assert_eq!(policy.peak_multiplier(), 1.2, "untouched values keep defaults");
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "values copied verbatim from JSON")]
    fn distance_ceiling_override_applies() {
        let config = FileConfig::parse(r#"{ "policy": { "max_distance_km": 300 } }"#).unwrap();
        assert_eq!(config.policy().unwrap().max_distance_km(), 300.0);
    }

    #[test]
    fn invalid_policy_value_rejected() {
        let config = FileConfig::parse(r#"{ "policy": { "peak_multiplier": 0.8 } }"#).unwrap();
        assert!(config.policy().is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(FileConfig::parse(r#"{ "policy": { "surge": 2 } }"#).is_err());
    }

    #[test]
    fn vehicles_replace_reference_fleet() {
        let config = FileConfig::parse(
            r#"{ "vehicles": [ {
                "id": "tuk", "display_name": "Tuk-tuk", "base_fare": 90, "per_km_rate": 18,
                "per_minute_rate": 3, "fuel_efficiency": 28, "avg_speed_kmh": 20, "capacity": 3,
                "luggage": true
            } ] }"#,
        )
        .unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.list_ids(), vec!["tuk"]);
        let tuk = catalog.lookup("tuk").unwrap();
        assert!(tuk.flags.luggage);
        assert!(!tuk.flags.air_conditioned);
    }

    #[test]
    fn empty_vehicle_list_rejected() {
        let config = FileConfig::parse(r#"{ "vehicles": [] }"#).unwrap();
        assert!(config.catalog().is_err());
    }
}
