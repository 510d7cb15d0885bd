// Rust guideline compliant 2026-10-19

//! Adapters (secondary ports) for the `fare-quote` binary.
//!
//! Each sub-module implements the `fare_domain::Clock` port. Library crates
//! never see these types, only the trait.

pub mod fixed_clock;
pub mod system_clock;
