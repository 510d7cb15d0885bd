// Rust guideline compliant 2026-10-19

//! Fare quote entry point.
//!
//! Wires the catalog, policy, engine, and quoter to a clock adapter and prints
//! results as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! fare-quote quote --vehicle bike --distance 10 --fuel-price 280 --no-surge
//! fare-quote quote-all --distance 7.5 --at 2026-05-04T08:15:00Z --passengers 3
//! fare-quote range --distance 22
//! fare-quote --config pricing.json vehicles
//!
//! # Pin "now" for a reproducible run; show per-class debug output
//! RUST_LOG=debug fare-quote --clock 2026-05-04T23:10:00Z quote-all --distance 4
//! ```

mod adapters;
mod config;

use std::path::PathBuf;

use adapters::fixed_clock::FixedClock;
use adapters::system_clock::SystemClock;
use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use config::FileConfig;
use fare_domain::{Clock, FareRequest, TripRequest};
use fare_engine::FareEngine;
use jiff::Timestamp;
use quoter::{MultiVehicleQuoter, Quotes};
use serde::Serialize;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the pricing policy and/or the vehicle catalog.
    #[arg(short, long, env = "FARE_QUOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Freeze "now" at this RFC 3339 instant instead of reading the system clock.
    #[arg(long)]
    clock: Option<Timestamp>,

    /// Force debug logging regardless of RUST_LOG.
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one vehicle class.
    Quote {
        #[arg(short, long)]
        vehicle: String,
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Price every vehicle class; per-class failures are reported inline.
    QuoteAll {
        #[command(flatten)]
        trip: TripArgs,
        /// Only price classes that seat this many passengers.
        #[arg(short, long)]
        passengers: Option<u32>,
    },
    /// Cheapest and most expensive fare across all classes, surge excluded.
    Range {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// List the configured vehicle classes.
    Vehicles,
}

#[derive(Args)]
struct TripArgs {
    /// Trip distance in kilometres.
    #[arg(long)]
    distance: f64,
    /// Trip duration in minutes; derived from average speed when omitted.
    #[arg(long)]
    duration: Option<u32>,
    /// Fuel price per litre; policy default when omitted.
    #[arg(long)]
    fuel_price: Option<f64>,
    /// Trip start (RFC 3339); "now" when omitted.
    #[arg(long)]
    at: Option<Timestamp>,
    /// Skip peak-hour and night-time surge.
    #[arg(long)]
    no_surge: bool,
}

impl TripArgs {
    fn to_request(&self) -> TripRequest {
        let mut builder = TripRequest::builder(self.distance).include_surge(!self.no_surge);
        if let Some(minutes) = self.duration {
            builder = builder.duration_min(minutes);
        }
        if let Some(price) = self.fuel_price {
            builder = builder.fuel_price(price);
        }
        if let Some(at) = self.at {
            builder = builder.trip_time(at);
        }
        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    // Optional local overrides, e.g. FARE_QUOTE_CONFIG; absence is not an error.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    let filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let policy = file_config.policy()?;
    let catalog = file_config.catalog()?;
    tracing::info!("main.config.loaded: vehicles={}", catalog.len());

    match cli.clock {
        Some(at) => {
            tracing::info!("main.clock.pinned: at={at}");
            run(cli.command, FareEngine::new(catalog, policy, FixedClock::new(at)))
        }
        None => run(cli.command, FareEngine::new(catalog, policy, SystemClock)),
    }
}

fn run<C: Clock + Sync>(command: Commands, engine: FareEngine<C>) -> anyhow::Result<()> {
    match command {
        Commands::Quote { vehicle, trip } => {
            let request = FareRequest::new(vehicle, trip.to_request());
            let result = engine
                .compute(&request)
                .with_context(|| format!("failed to price {}", request.vehicle_class_id))?;
            print_json(&result)
        }
        Commands::QuoteAll { trip, passengers } => {
            let batch = MultiVehicleQuoter::new(engine);
            let trip = trip.to_request();
            let quotes = match passengers {
                Some(party) => batch.quote_for_party(&trip, party),
                None => quote_all(&batch, &trip),
            };
            print_json(&quotes)
        }
        Commands::Range { trip } => {
            let range = MultiVehicleQuoter::new(engine)
                .estimate_range(&trip.to_request())
                .context("failed to estimate fare range")?;
            print_json(&range)
        }
        Commands::Vehicles => {
            let classes: Vec<_> = engine.catalog().iter().collect();
            print_json(&classes)
        }
    }
}

#[cfg(feature = "parallel")]
fn quote_all<C: Clock + Sync>(batch: &MultiVehicleQuoter<C>, trip: &TripRequest) -> Quotes {
    batch.quote_all_parallel(trip)
}

#[cfg(not(feature = "parallel"))]
fn quote_all<C: Clock + Sync>(batch: &MultiVehicleQuoter<C>, trip: &TripRequest) -> Quotes {
    batch.quote_all(trip)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
