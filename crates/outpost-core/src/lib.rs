//! Configuration, logging and the per-request facade for the Outpost
//! village economy core.
//!
//! The economy and defense crates are independent of each other. This crate
//! wires them together for the game server: it loads configuration and the
//! building catalog once at startup, and per request combines a village's
//! [`ResourceLedger`] summary with its defense report into a single
//! [`VillageOverview`].
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with defaults
//! - [`error`] -- [`CoreError`]
//! - [`outpost`] -- The [`Outpost`] facade
//! - [`telemetry`] -- `tracing` subscriber setup
//!
//! [`ResourceLedger`]: outpost_ledger::ResourceLedger
//! [`VillageOverview`]: outpost_types::VillageOverview

pub mod config;
pub mod error;
pub mod outpost;
pub mod telemetry;

// Re-export primary types at crate root.
pub use config::{ConfigError, OutpostConfig};
pub use error::CoreError;
pub use outpost::{Outpost, PollOutcome};
